use std::rc::Rc;

use crate::config::{Config, Interpolation};
use crate::directive::{self, Binding, Directive};
use crate::host::{Host, NodeKind};
use crate::template::Template;
use crate::view_model::ViewModel;
use crate::Result;

/// Walks a view tree once and binds its directives and interpolations to
/// a view-model.
pub struct Compiler<H: Host> {
	host: Rc<H>,
	vm: ViewModel,
	prefix: String,
	interpolation: Interpolation,
}

impl<H: Host> Compiler<H> {
	pub fn new(host: Rc<H>, vm: ViewModel, config: &Config) -> Result<Self> {
		Ok(Compiler {
			host,
			vm,
			prefix: config.prefix.clone(),
			interpolation: config.interpolation()?,
		})
	}

	/// The children of `root` are detached for the duration of the walk and
	/// put back afterwards, also when compilation fails.
	pub fn compile(&self, root: &H::Node) -> Result<()> {
		let fragment = self.host.detach_children(root);
		let result = self.build(&fragment);
		self.host.append_children(root, fragment);
		result
	}

	fn build(&self, nodes: &[H::Node]) -> Result<()> {
		for node in nodes {
			match self.host.kind(node) {
				NodeKind::Element => {
					self.build_element(node)?;
					self.build(&self.host.children(node))?;
				}
				NodeKind::Text => self.build_text(node)?,
				NodeKind::Other => {}
			}
		}

		Ok(())
	}

	fn build_element(&self, node: &H::Node) -> Result<()> {
		for (name, value) in self.host.attributes(node) {
			let Some((directive, argument)) = Directive::parse(&name, &self.prefix)? else {
				continue;
			};

			directive.bind(&Binding {
				host: &self.host,
				node,
				value: &value,
				vm: &self.vm,
				argument,
			})?;
		}

		Ok(())
	}

	fn build_text(&self, node: &H::Node) -> Result<()> {
		let content = self.host.text(node);
		if let Some(template) = Template::parse(&content, &self.interpolation) {
			directive::interpolate(&self.host, node, template, &self.vm)?;
		}

		Ok(())
	}
}
