use std::rc::Rc;

use crate::value::Value;
use crate::view_model::{ViewModel, WeakViewModel};
use crate::{Error, Evaluation, Result};

pub type ComputedFn = Rc<dyn Fn(&ViewModel, &Evaluation) -> Result<Value>>;

/// A derived property defined on the data root.
///
/// Nothing is cached: every read runs the function again with the
/// reader's [`Evaluation`], so whatever the function reads becomes a
/// dependency of whoever read the computed property.
#[derive(Clone)]
pub struct Computed {
	name: Rc<str>,
	func: ComputedFn,
	vm: WeakViewModel,
}

impl Computed {
	pub(crate) fn new(name: &str, func: ComputedFn, vm: WeakViewModel) -> Self {
		Computed {
			name: name.into(),
			func,
			vm,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn get(&self, eval: &Evaluation) -> Result<Value> {
		let vm = self.vm.upgrade().ok_or(Error::Detached)?;
		tracing::trace!(name = %self.name, "computing");
		(self.func)(&vm, eval)
	}
}
