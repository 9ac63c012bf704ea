//! Declarative data binding for view trees.
//!
//! A plain data object is turned into a graph of reactive cells, and a view
//! tree annotated with directives (`directive-model`, `directive-text`, ...)
//! and `{{ path }}` interpolations is compiled once against it. Afterwards
//! every write to the data synchronously re-renders the bound nodes, and
//! input on writable bindings flows back into the data.

pub mod macros;

mod addr;
mod cell;
mod compiler;
mod computed;
mod config;
mod dependencies;
mod directive;
mod error;
mod evaluation;
mod host;
pub mod memory;
mod observer;
mod path;
mod template;
mod value;
mod view_model;
mod watcher;

use std::rc::Rc;

pub use cell::Cell;
pub use compiler::Compiler;
pub use computed::{Computed, ComputedFn};
pub use config::{Config, Interpolation};
pub use dependencies::Dependencies;
pub use directive::{Binding, Directive};
pub use error::{Error, Result};
pub use evaluation::Evaluation;
pub use host::{Event, Host, Listener, NodeKind};
pub use observer::observe;
pub use path::Path;
pub use template::{Segment, Template};
pub use value::{Object, Value};
pub use view_model::{Method, Mount, Options, ViewModel, WeakViewModel};
pub use watcher::{Callback, Watcher};

pub trait Subscriber: 'static {
	/// Called by a [`Dependencies`] registry after one of the
	/// properties this subscriber read has been written.
	fn update(&self) -> Result<()>;
}

/// Builds the view-model described by `options` and compiles the
/// mount target against it.
pub fn mount<H: Host>(host: Rc<H>, options: Options<H::Node>) -> Result<ViewModel> {
	let Options {
		el,
		data,
		methods,
		computed,
		config,
	} = options;

	let root = match el {
		Mount::Node(node) => node,
		Mount::Selector(selector) => host
			.query(&selector)
			.ok_or(Error::MountNotFound(selector))?,
	};

	let vm = ViewModel::build(data, methods, computed)?;
	Compiler::new(host, vm.clone(), &config)?.compile(&root)?;

	tracing::debug!(watchers = vm.watcher_count(), "mounted");
	Ok(vm)
}
