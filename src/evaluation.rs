use std::cell::Cell;
use std::rc::Weak;

use crate::dependencies::Dependencies;
use crate::Subscriber;

/// Context of a single evaluation of an expression.
///
/// A tracked evaluation registers its subscriber into the registry of
/// every reactive property read through it. An untracked one only reads.
pub struct Evaluation {
	parent: Option<Weak<dyn Subscriber>>,
	registrations: Cell<usize>,
}

impl AsRef<Evaluation> for Evaluation {
	fn as_ref(&self) -> &Evaluation {
		self
	}
}

impl Default for Evaluation {
	fn default() -> Self {
		Evaluation::untracked()
	}
}

impl Evaluation {
	pub fn new(parent: Weak<dyn Subscriber>) -> Self {
		Evaluation {
			parent: Some(parent),
			registrations: Cell::new(0),
		}
	}

	pub fn untracked() -> Self {
		Evaluation {
			parent: None,
			registrations: Cell::new(0),
		}
	}

	pub fn is_tracking(&self) -> bool {
		self.parent.is_some()
	}

	/// Number of registries this evaluation newly subscribed to.
	pub fn registrations(&self) -> usize {
		self.registrations.get()
	}

	pub(crate) fn based_on(&self, dependencies: &Dependencies) {
		if let Some(parent) = &self.parent {
			if dependencies.add(parent.clone()) {
				self.registrations.set(self.registrations.get() + 1);
			}
		}
	}
}
