use std::fmt::Display;
use std::str::FromStr;

use crate::value::{Object, Value};
use crate::{Error, Evaluation, Result};

/// A dotted property path such as `user.address.city`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Path {
	segments: Vec<String>,
}

impl Path {
	/// Segments are trimmed, so `{{ user . name }}` and `user.name` are the
	/// same path. Empty segments are rejected.
	pub fn parse(path: &str) -> Result<Path> {
		let segments: Vec<String> = path.split('.').map(|s| s.trim().to_owned()).collect();
		if segments.iter().any(String::is_empty) {
			return Err(Error::InvalidPath(path.to_owned()));
		}

		Ok(Path { segments })
	}

	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	/// Folds the path over `root`. Reading through anything but an object
	/// fails instead of producing an empty value.
	pub fn resolve(&self, root: &Object, eval: &Evaluation) -> Result<Value> {
		let mut current = Value::Object(root.clone());
		for segment in &self.segments {
			current = self.object(&current, segment)?.get(segment, eval)?;
		}

		Ok(current)
	}

	/// Writes `value` at the last segment. Intermediate segments are read
	/// without tracking.
	pub fn assign(&self, root: &Object, value: Value) -> Result<bool> {
		let eval = Evaluation::untracked();
		let (last, parents) = match self.segments.split_last() {
			Some(split) => split,
			None => return Err(Error::InvalidPath(self.to_string())),
		};

		let mut current = Value::Object(root.clone());
		for segment in parents {
			current = self.object(&current, segment)?.get(segment, &eval)?;
		}

		self.object(&current, last)?.set(last, value)
	}

	fn object<'a>(&self, value: &'a Value, segment: &str) -> Result<&'a Object> {
		value.as_object().ok_or_else(|| Error::NotAnObject {
			path: self.to_string(),
			segment: segment.to_owned(),
			found: value.type_name(),
		})
	}
}

impl FromStr for Path {
	type Err = Error;
	fn from_str(s: &str) -> Result<Self> {
		Path::parse(s)
	}
}

impl Display for Path {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.segments.join("."))
	}
}
