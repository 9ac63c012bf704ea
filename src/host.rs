use std::fmt::Debug;
use std::rc::Rc;

use crate::Result;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeKind {
	Element,
	Text,
	Other,
}

/// An event delivered by the host to a listener.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Event {
	pub kind: String,
	/// Current value of the target node, for input events.
	pub value: Option<String>,
}

impl Event {
	pub fn new(kind: impl Into<String>) -> Self {
		Event {
			kind: kind.into(),
			value: None,
		}
	}

	pub fn input(value: impl Into<String>) -> Self {
		Event {
			kind: "input".to_owned(),
			value: Some(value.into()),
		}
	}
}

pub type Listener = Rc<dyn Fn(&Event) -> Result<()>>;

/// What the compiler needs from a view tree.
pub trait Host: 'static {
	type Node: Clone + Debug + 'static;

	fn query(&self, selector: &str) -> Option<Self::Node>;

	fn kind(&self, node: &Self::Node) -> NodeKind;

	/// Attributes in declaration order.
	fn attributes(&self, node: &Self::Node) -> Vec<(String, String)>;

	fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

	fn text(&self, node: &Self::Node) -> String;

	fn set_text(&self, node: &Self::Node, text: &str);

	fn value(&self, node: &Self::Node) -> String;

	fn set_value(&self, node: &Self::Node, value: &str);

	fn set_inner_html(&self, node: &Self::Node, html: &str);

	/// Removes all children of `node` and hands them over to the caller.
	fn detach_children(&self, node: &Self::Node) -> Vec<Self::Node>;

	fn append_children(&self, node: &Self::Node, children: Vec<Self::Node>);

	fn listen(&self, node: &Self::Node, event: &str, listener: Listener);
}
