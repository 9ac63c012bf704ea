use regex::Regex;

use crate::Result;

pub const DEFAULT_PREFIX: &str = "directive-";
pub const DEFAULT_OPEN: &str = "{{";
pub const DEFAULT_CLOSE: &str = "}}";

/// Compiler settings.
#[derive(Clone, Debug)]
pub struct Config {
	/// Attribute names starting with this prefix are directives.
	pub prefix: String,
	pub open: String,
	pub close: String,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			prefix: DEFAULT_PREFIX.to_owned(),
			open: DEFAULT_OPEN.to_owned(),
			close: DEFAULT_CLOSE.to_owned(),
		}
	}
}

impl Config {
	pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	pub fn delimiters(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
		self.open = open.into();
		self.close = close.into();
		self
	}

	pub fn interpolation(&self) -> Result<Interpolation> {
		Interpolation::new(&self.open, &self.close)
	}
}

/// Matcher for interpolation spans, built once from the delimiters.
#[derive(Clone, Debug)]
pub struct Interpolation {
	regex: Regex,
}

impl Interpolation {
	pub fn new(open: &str, close: &str) -> Result<Self> {
		let pattern = format!("{}(.+?){}", regex::escape(open), regex::escape(close));
		Ok(Interpolation {
			regex: Regex::new(&pattern)?,
		})
	}

	pub(crate) fn regex(&self) -> &Regex {
		&self.regex
	}
}
