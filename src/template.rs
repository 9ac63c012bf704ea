use crate::config::Interpolation;
use crate::view_model::ViewModel;
use crate::Result;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Segment {
	Literal(String),
	Path(String),
}

/// Text content split into literal runs and interpolated paths.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Template {
	segments: Vec<Segment>,
}

impl Template {
	/// Returns `None` when `text` contains no interpolation.
	pub fn parse(text: &str, interpolation: &Interpolation) -> Option<Template> {
		let mut segments = Vec::new();
		let mut last = 0;

		for captures in interpolation.regex().captures_iter(text) {
			let (Some(span), Some(path)) = (captures.get(0), captures.get(1)) else {
				continue;
			};

			if span.start() > last {
				segments.push(Segment::Literal(text[last..span.start()].to_owned()));
			}
			segments.push(Segment::Path(path.as_str().trim().to_owned()));
			last = span.end();
		}

		if segments.is_empty() {
			return None;
		}

		if last < text.len() {
			segments.push(Segment::Literal(text[last..].to_owned()));
		}

		Some(Template { segments })
	}

	pub fn segments(&self) -> &[Segment] {
		&self.segments
	}

	/// Interpolated paths in order of appearance, repeats included.
	pub fn paths(&self) -> impl Iterator<Item = &str> {
		self.segments.iter().filter_map(|segment| match segment {
			Segment::Path(path) => Some(path.as_str()),
			Segment::Literal(_) => None,
		})
	}

	/// Renders the whole text from the current data, without tracking.
	pub fn render(&self, vm: &ViewModel) -> Result<String> {
		let mut out = String::new();
		for segment in &self.segments {
			match segment {
				Segment::Literal(text) => out.push_str(text),
				Segment::Path(path) => out.push_str(&vm.get_once(path)?.to_string()),
			}
		}

		Ok(out)
	}
}
