use std::rc::Rc;

use enclose::enclose;

use crate::host::{Event, Host};
use crate::template::Template;
use crate::value::Value;
use crate::view_model::ViewModel;
use crate::{Error, Result};

/// The closed set of directives the compiler understands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Directive {
	/// Two-way binding of the node value.
	Model,
	/// Raw markup.
	Html,
	/// Plain text content.
	Text,
	/// Event listener calling a method, `on:<event>`.
	On,
}

/// Everything a directive handler gets to work with.
pub struct Binding<'a, H: Host> {
	pub host: &'a Rc<H>,
	pub node: &'a H::Node,
	/// Property path, or method name for [`Directive::On`].
	pub value: &'a str,
	pub vm: &'a ViewModel,
	pub argument: Option<&'a str>,
}

impl Directive {
	pub fn name(self) -> &'static str {
		match self {
			Directive::Model => "model",
			Directive::Html => "html",
			Directive::Text => "text",
			Directive::On => "on",
		}
	}

	pub fn from_name(name: &str) -> Result<Self> {
		match name {
			"model" => Ok(Directive::Model),
			"html" => Ok(Directive::Html),
			"text" => Ok(Directive::Text),
			"on" => Ok(Directive::On),
			other => Err(Error::UnknownDirective(other.to_owned())),
		}
	}

	/// Splits `<prefix><name>[:<argument>]`. Attributes without the prefix
	/// are not directives and yield `Ok(None)`.
	pub fn parse<'a>(
		attribute: &'a str,
		prefix: &str,
	) -> Result<Option<(Directive, Option<&'a str>)>> {
		let Some(rest) = attribute.strip_prefix(prefix) else {
			return Ok(None);
		};

		let (name, argument) = match rest.split_once(':') {
			Some((name, argument)) => (name, Some(argument)),
			None => (rest, None),
		};

		Ok(Some((Directive::from_name(name)?, argument)))
	}

	pub fn bind<H: Host>(self, binding: &Binding<'_, H>) -> Result<()> {
		tracing::debug!(
			directive = self.name(),
			value = binding.value,
			argument = binding.argument,
			node = ?binding.node,
			"binding"
		);

		match self {
			Directive::Model => model(binding),
			Directive::Html => html(binding),
			Directive::Text => text(binding),
			Directive::On => on(binding),
		}
	}
}

fn model<H: Host>(binding: &Binding<'_, H>) -> Result<()> {
	let host = binding.host.clone();
	let node = binding.node.clone();

	let watcher = binding.vm.watch(
		binding.value,
		enclose!((host, node) move |value: &Value, _: &Value| {
			host.set_value(&node, &value.to_string());
			Ok(())
		}),
	)?;

	host.set_value(&node, &watcher.value().to_string());

	// Writes coming back from the view go through the same path
	// assignment as any other write. The watcher above fires once for the
	// new value and re-renders the text that is already there.
	// The host owns its listeners, so the listener only holds it weakly.
	let vm = binding.vm.downgrade();
	let weak_host = Rc::downgrade(&host);
	let path = binding.value.to_owned();
	host.listen(
		&node,
		"input",
		Rc::new(enclose!((node) move |event: &Event| -> Result<()> {
			let Some(vm) = vm.upgrade() else {
				return Ok(());
			};
			let value = match &event.value {
				Some(value) => value.clone(),
				None => match weak_host.upgrade() {
					Some(host) => host.value(&node),
					None => return Ok(()),
				},
			};
			vm.set(&path, value)?;
			Ok(())
		})),
	);

	Ok(())
}

fn html<H: Host>(binding: &Binding<'_, H>) -> Result<()> {
	let host = binding.host.clone();
	let node = binding.node.clone();

	let watcher = binding.vm.watch(
		binding.value,
		enclose!((host, node) move |value: &Value, _: &Value| {
			host.set_inner_html(&node, &value.to_string());
			Ok(())
		}),
	)?;

	host.set_inner_html(&node, &watcher.value().to_string());
	Ok(())
}

fn text<H: Host>(binding: &Binding<'_, H>) -> Result<()> {
	let host = binding.host.clone();
	let node = binding.node.clone();

	let watcher = binding.vm.watch(
		binding.value,
		enclose!((host, node) move |value: &Value, _: &Value| {
			host.set_text(&node, &value.to_string());
			Ok(())
		}),
	)?;

	host.set_text(&node, &watcher.value().to_string());
	Ok(())
}

fn on<H: Host>(binding: &Binding<'_, H>) -> Result<()> {
	let kind = binding
		.argument
		.ok_or(Error::MissingArgument(Directive::On.name()))?;

	if !binding.vm.has_method(binding.value) {
		return Err(Error::UnknownMethod(binding.value.to_owned()));
	}

	let vm = binding.vm.downgrade();
	let method = binding.value.to_owned();
	binding.host.listen(
		binding.node,
		kind,
		Rc::new(move |event: &Event| match vm.upgrade() {
			Some(vm) => vm.call(&method, event),
			None => Ok(()),
		}),
	);

	Ok(())
}

/// Renders a text node from `template` and re-renders all of it whenever
/// any interpolated path changes.
pub(crate) fn interpolate<H: Host>(
	host: &Rc<H>,
	node: &H::Node,
	template: Template,
	vm: &ViewModel,
) -> Result<()> {
	let template = Rc::new(template);
	let weak = vm.downgrade();

	for path in template.paths() {
		let host = host.clone();
		let node = node.clone();
		vm.watch(
			path,
			enclose!((template, weak) move |_: &Value, _: &Value| -> Result<()> {
				let vm = weak.upgrade().ok_or(Error::Detached)?;
				host.set_text(&node, &template.render(&vm)?);
				Ok(())
			}),
		)?;
	}

	host.set_text(node, &template.render(vm)?);
	Ok(())
}
