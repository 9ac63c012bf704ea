use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::path::Path;
use crate::value::Value;
use crate::view_model::{ViewModel, WeakViewModel};
use crate::{Error, Evaluation, Result, Subscriber};

/// Receives `(new, old)` after the watched expression changed.
pub type Callback = Box<dyn Fn(&Value, &Value) -> Result<()>>;

/// Binds a property path to a callback.
#[derive(Clone)]
pub struct Watcher {
	body: Rc<WatcherBody>,
}

struct WatcherBody {
	vm: WeakViewModel,
	path: Path,
	callback: Callback,
	value: RefCell<Value>,
	this: Weak<WatcherBody>,
}

impl Watcher {
	/// Evaluates `path` once, subscribing to every property read on the
	/// way, and keeps the result as the baseline for later updates.
	pub fn new(vm: &ViewModel, path: &str, callback: Callback) -> Result<Self> {
		let path = Path::parse(path)?;
		let body = Rc::new_cyclic(|this| WatcherBody {
			vm: vm.downgrade(),
			path,
			callback,
			value: RefCell::new(Value::Null),
			this: this.clone(),
		});

		let value = body.evaluate(vm)?;
		*body.value.borrow_mut() = value;

		Ok(Watcher { body })
	}

	pub fn path(&self) -> &Path {
		&self.body.path
	}

	/// Last value seen by this watcher.
	pub fn value(&self) -> Value {
		self.body.value.borrow().clone()
	}

	pub fn update(&self) -> Result<()> {
		self.body.update()
	}
}

impl WatcherBody {
	fn evaluate(&self, vm: &ViewModel) -> Result<Value> {
		let this = self.this.clone() as Weak<dyn Subscriber>;
		let evaluation = Evaluation::new(this);
		let value = self.path.resolve(vm.data(), &evaluation)?;

		tracing::trace!(
			path = %self.path,
			registrations = evaluation.registrations(),
			"evaluated"
		);

		Ok(value)
	}
}

impl Subscriber for WatcherBody {
	fn update(&self) -> Result<()> {
		let vm = self.vm.upgrade().ok_or(Error::Detached)?;

		// Re-collecting keeps the binding live when an object along the
		// path was replaced. Registries ignore repeated registrations.
		let next = self.evaluate(&vm)?;

		let prev = {
			let mut value = self.value.borrow_mut();
			if value.same(&next) {
				return Ok(());
			}
			std::mem::replace(&mut *value, next.clone())
		};

		(self.callback)(&next, &prev)
	}
}

impl std::fmt::Debug for Watcher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Watcher")
			.field("path", &self.body.path.to_string())
			.field("value", &*self.body.value.borrow())
			.finish()
	}
}
