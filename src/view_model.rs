use std::cell::RefCell;
use std::rc::{Rc, Weak};

use fxhash::FxHashMap;

use crate::computed::{Computed, ComputedFn};
use crate::config::Config;
use crate::host::Event;
use crate::path::Path;
use crate::value::{Object, Value};
use crate::watcher::{Callback, Watcher};
use crate::{Error, Evaluation, Result};

/// An entry of the method table, called with the view-model as receiver.
pub type Method = Rc<dyn Fn(&ViewModel, &Event) -> Result<()>>;

/// Where the compiler starts.
pub enum Mount<N> {
	Node(N),
	Selector(String),
}

impl<N> From<&str> for Mount<N> {
	fn from(selector: &str) -> Self {
		Mount::Selector(selector.to_owned())
	}
}

impl<N> From<String> for Mount<N> {
	fn from(selector: String) -> Self {
		Mount::Selector(selector)
	}
}

/// Construction options: mount target, data, methods and computed
/// properties.
pub struct Options<N> {
	pub el: Mount<N>,
	pub data: Value,
	pub methods: FxHashMap<String, Method>,
	pub computed: Vec<(String, ComputedFn)>,
	pub config: Config,
}

impl<N> Options<N> {
	pub fn new(el: impl Into<Mount<N>>) -> Self {
		Options {
			el: el.into(),
			data: Value::Object(Object::new()),
			methods: FxHashMap::default(),
			computed: Vec::new(),
			config: Config::default(),
		}
	}

	pub fn node(node: N) -> Self {
		Self::new(Mount::Node(node))
	}

	pub fn data(mut self, data: impl Into<Value>) -> Self {
		self.data = data.into();
		self
	}

	pub fn method(
		mut self,
		name: &str,
		func: impl Fn(&ViewModel, &Event) -> Result<()> + 'static,
	) -> Self {
		let func: Method = Rc::new(func);
		self.methods.insert(name.to_owned(), func);
		self
	}

	pub fn computed(
		mut self,
		name: &str,
		func: impl Fn(&ViewModel, &Evaluation) -> Result<Value> + 'static,
	) -> Self {
		let func: ComputedFn = Rc::new(func);
		self.computed.push((name.to_owned(), func));
		self
	}

	pub fn config(mut self, config: Config) -> Self {
		self.config = config;
		self
	}
}

impl Options<()> {
	/// Options for a view-model that is not mounted anywhere.
	pub fn detached() -> Self {
		Self::node(())
	}
}

/// Data graph, method table and computed properties behind one handle.
#[derive(Clone)]
pub struct ViewModel {
	body: Rc<ViewModelBody>,
}

#[derive(Clone)]
pub struct WeakViewModel {
	body: Weak<ViewModelBody>,
}

impl WeakViewModel {
	pub fn upgrade(&self) -> Option<ViewModel> {
		self.body.upgrade().map(|body| ViewModel { body })
	}
}

struct ViewModelBody {
	data: Object,
	methods: FxHashMap<String, Method>,
	watchers: RefCell<Vec<Watcher>>,
}

impl ViewModel {
	pub fn new<N>(options: Options<N>) -> Result<Self> {
		Self::build(options.data, options.methods, options.computed)
	}

	pub(crate) fn build(
		data: Value,
		methods: FxHashMap<String, Method>,
		computed: Vec<(String, ComputedFn)>,
	) -> Result<Self> {
		let data = match data {
			Value::Object(object) => object,
			other => return Err(Error::DataNotObject(other.type_name())),
		};

		let body = Rc::new_cyclic(|this: &Weak<ViewModelBody>| {
			for (name, func) in computed {
				let vm = WeakViewModel { body: this.clone() };
				data.define_computed(&name, Computed::new(&name, func, vm));
			}

			ViewModelBody {
				data,
				methods,
				watchers: RefCell::new(Vec::new()),
			}
		});

		Ok(ViewModel { body })
	}

	pub fn downgrade(&self) -> WeakViewModel {
		WeakViewModel {
			body: Rc::downgrade(&self.body),
		}
	}

	pub fn data(&self) -> &Object {
		&self.body.data
	}

	pub fn get(&self, path: &str, eval: &Evaluation) -> Result<Value> {
		Path::parse(path)?.resolve(&self.body.data, eval)
	}

	pub fn get_once(&self, path: &str) -> Result<Value> {
		self.get(path, &Evaluation::untracked())
	}

	/// Writes `value` at `path`, synchronously updating everything that
	/// depends on it. Returns whether the value changed.
	pub fn set(&self, path: &str, value: impl Into<Value>) -> Result<bool> {
		Path::parse(path)?.assign(&self.body.data, value.into())
	}

	pub fn has_method(&self, name: &str) -> bool {
		self.body.methods.contains_key(name)
	}

	pub fn call(&self, name: &str, event: &Event) -> Result<()> {
		let method = self
			.body
			.methods
			.get(name)
			.cloned()
			.ok_or_else(|| Error::UnknownMethod(name.to_owned()))?;

		method(self, event)
	}

	/// Creates a watcher that lives as long as this view-model.
	pub fn watch(
		&self,
		path: &str,
		callback: impl Fn(&Value, &Value) -> Result<()> + 'static,
	) -> Result<Watcher> {
		let callback: Callback = Box::new(callback);
		let watcher = Watcher::new(self, path, callback)?;
		self.body.watchers.borrow_mut().push(watcher.clone());
		Ok(watcher)
	}

	pub fn watcher_count(&self) -> usize {
		self.body.watchers.borrow().len()
	}

	pub fn snapshot(&self) -> serde_json::Value {
		self.body.data.to_json()
	}
}

impl std::fmt::Debug for ViewModel {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ViewModel")
			.field("data", &self.body.data)
			.field("methods", &self.body.methods.keys().collect::<Vec<_>>())
			.finish()
	}
}
