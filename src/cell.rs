use std::cell::RefCell;
use std::fmt::Debug;
use std::rc::Rc;

use crate::dependencies::Dependencies;
use crate::evaluation::Evaluation;
use crate::value::Value;

/// A single reactive property.
///
/// Reads through a tracking [`Evaluation`] subscribe the evaluating
/// watcher, writes of a different value notify every subscriber.
pub struct Cell {
	body: Rc<CellBody>,
}

struct CellBody {
	value: RefCell<Value>,
	dependencies: Dependencies,
}

impl Clone for Cell {
	fn clone(&self) -> Self {
		Self {
			body: self.body.clone(),
		}
	}
}

impl Default for Cell {
	fn default() -> Self {
		Cell::new(Value::Null)
	}
}

impl Cell {
	pub fn new(value: impl Into<Value>) -> Self {
		Cell {
			body: Rc::new(CellBody {
				value: RefCell::new(value.into()),
				dependencies: Dependencies::new(),
			}),
		}
	}

	#[inline]
	pub fn get(&self, eval: &impl AsRef<Evaluation>) -> Value {
		eval.as_ref().based_on(&self.body.dependencies);
		self.get_once()
	}

	#[inline]
	pub fn get_once(&self) -> Value {
		self.body.value.borrow().clone()
	}

	/// Stores `value` and notifies subscribers, unless it is the same as
	/// the current value.
	pub fn set(&self, value: impl Into<Value>) -> bool {
		let value = value.into();
		{
			let mut current = self.body.value.borrow_mut();
			if current.same(&value) {
				return false;
			}
			*current = value;
		}

		let failed = self.body.dependencies.notify();
		if failed > 0 {
			tracing::warn!(failed, "write left failing subscribers behind");
		}

		true
	}

	pub fn subscriber_count(&self) -> usize {
		self.body.dependencies.len()
	}
}

impl Debug for Cell {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		self.get_once().fmt(f)
	}
}
