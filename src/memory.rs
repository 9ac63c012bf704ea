//! An in-memory view tree.
//!
//! Useful for tests and for driving bindings without a real UI: nodes
//! live in an arena owned by [`MemoryHost`] and are addressed by
//! [`NodeId`]. Events are delivered with [`MemoryHost::input`] and
//! [`MemoryHost::dispatch`].

use std::cell::RefCell;

use crate::host::{Event, Host, Listener, NodeKind};
use crate::Result;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct NodeId(usize);

struct NodeData {
	kind: NodeKind,
	tag: String,
	attributes: Vec<(String, String)>,
	children: Vec<NodeId>,
	parent: Option<NodeId>,
	text: String,
	value: String,
	html: String,
	listeners: Vec<(String, Listener)>,
	value_writes: usize,
	text_writes: usize,
}

impl NodeData {
	fn new(kind: NodeKind, tag: &str) -> Self {
		NodeData {
			kind,
			tag: tag.to_owned(),
			attributes: Vec::new(),
			children: Vec::new(),
			parent: None,
			text: String::new(),
			value: String::new(),
			html: String::new(),
			listeners: Vec::new(),
			value_writes: 0,
			text_writes: 0,
		}
	}
}

#[derive(Default)]
pub struct MemoryHost {
	nodes: RefCell<Vec<NodeData>>,
}

impl MemoryHost {
	pub fn new() -> Self {
		Self::default()
	}

	fn push(&self, data: NodeData) -> NodeId {
		let mut nodes = self.nodes.borrow_mut();
		nodes.push(data);
		NodeId(nodes.len() - 1)
	}

	pub fn element(&self, tag: &str, attributes: &[(&str, &str)], children: &[NodeId]) -> NodeId {
		let mut data = NodeData::new(NodeKind::Element, tag);
		data.attributes = attributes
			.iter()
			.map(|(name, value)| (name.to_string(), value.to_string()))
			.collect();

		let id = self.push(data);
		self.append_children(&id, children.to_vec());
		id
	}

	pub fn text_node(&self, text: &str) -> NodeId {
		let mut data = NodeData::new(NodeKind::Text, "#text");
		data.text = text.to_owned();
		self.push(data)
	}

	pub fn comment(&self, text: &str) -> NodeId {
		let mut data = NodeData::new(NodeKind::Other, "#comment");
		data.text = text.to_owned();
		self.push(data)
	}

	/// Number of nodes ever created in this host.
	pub fn node_count(&self) -> usize {
		self.nodes.borrow().len()
	}

	pub fn parent(&self, node: NodeId) -> Option<NodeId> {
		self.nodes.borrow()[node.0].parent
	}

	pub fn inner_html(&self, node: NodeId) -> String {
		self.nodes.borrow()[node.0].html.clone()
	}

	/// How many times a binding wrote the value of `node`.
	pub fn value_writes(&self, node: NodeId) -> usize {
		self.nodes.borrow()[node.0].value_writes
	}

	/// How many times a binding wrote the text of `node`.
	pub fn text_writes(&self, node: NodeId) -> usize {
		self.nodes.borrow()[node.0].text_writes
	}

	/// Simulates the user typing `value` into `node`.
	pub fn input(&self, node: NodeId, value: &str) -> Result<()> {
		self.nodes.borrow_mut()[node.0].value = value.to_owned();
		self.dispatch_event(node, &Event::input(value))
	}

	pub fn dispatch(&self, node: NodeId, kind: &str) -> Result<()> {
		let value = self.nodes.borrow()[node.0].value.clone();
		self.dispatch_event(
			node,
			&Event {
				kind: kind.to_owned(),
				value: Some(value),
			},
		)
	}

	/// Calls every listener for the event kind, stopping at the first
	/// failure.
	pub fn dispatch_event(&self, node: NodeId, event: &Event) -> Result<()> {
		let listeners: Vec<Listener> = self.nodes.borrow()[node.0]
			.listeners
			.iter()
			.filter(|(kind, _)| *kind == event.kind)
			.map(|(_, listener)| listener.clone())
			.collect();

		for listener in listeners {
			listener(event)?;
		}

		Ok(())
	}

	fn text_of(&self, node: NodeId) -> String {
		let (kind, text, children) = {
			let nodes = self.nodes.borrow();
			let data = &nodes[node.0];
			(data.kind, data.text.clone(), data.children.clone())
		};

		match kind {
			NodeKind::Text => text,
			NodeKind::Element => children.into_iter().map(|child| self.text_of(child)).collect(),
			NodeKind::Other => String::new(),
		}
	}
}

impl Host for MemoryHost {
	type Node = NodeId;

	/// Supports `#id` and tag names, first match in creation order.
	fn query(&self, selector: &str) -> Option<NodeId> {
		let nodes = self.nodes.borrow();
		let found = match selector.strip_prefix('#') {
			Some(id) => nodes.iter().position(|data| {
				data.attributes
					.iter()
					.any(|(name, value)| name == "id" && value == id)
			}),
			None => nodes
				.iter()
				.position(|data| data.kind == NodeKind::Element && data.tag == selector),
		};

		found.map(NodeId)
	}

	fn kind(&self, node: &NodeId) -> NodeKind {
		self.nodes.borrow()[node.0].kind
	}

	fn attributes(&self, node: &NodeId) -> Vec<(String, String)> {
		self.nodes.borrow()[node.0].attributes.clone()
	}

	fn children(&self, node: &NodeId) -> Vec<NodeId> {
		self.nodes.borrow()[node.0].children.clone()
	}

	fn text(&self, node: &NodeId) -> String {
		self.text_of(*node)
	}

	/// On an element this replaces all children with one text node, or
	/// rewrites the text child already there.
	fn set_text(&self, node: &NodeId, text: &str) {
		let kind = self.kind(node);
		match kind {
			NodeKind::Element => match self.children(node)[..] {
				[child] if self.kind(&child) == NodeKind::Text => {
					self.nodes.borrow_mut()[child.0].text = text.to_owned();
				}
				_ => {
					let child = self.text_node(text);
					self.detach_children(node);
					self.append_children(node, vec![child]);
				}
			},
			NodeKind::Text | NodeKind::Other => {
				self.nodes.borrow_mut()[node.0].text = text.to_owned();
			}
		}

		self.nodes.borrow_mut()[node.0].text_writes += 1;
	}

	fn value(&self, node: &NodeId) -> String {
		self.nodes.borrow()[node.0].value.clone()
	}

	fn set_value(&self, node: &NodeId, value: &str) {
		let mut nodes = self.nodes.borrow_mut();
		nodes[node.0].value = value.to_owned();
		nodes[node.0].value_writes += 1;
	}

	fn set_inner_html(&self, node: &NodeId, html: &str) {
		self.nodes.borrow_mut()[node.0].html = html.to_owned();
	}

	fn detach_children(&self, node: &NodeId) -> Vec<NodeId> {
		let mut nodes = self.nodes.borrow_mut();
		let children = std::mem::take(&mut nodes[node.0].children);
		for child in &children {
			nodes[child.0].parent = None;
		}

		children
	}

	fn append_children(&self, node: &NodeId, children: Vec<NodeId>) {
		let mut nodes = self.nodes.borrow_mut();
		for child in &children {
			nodes[child.0].parent = Some(*node);
		}

		nodes[node.0].children.extend(children);
	}

	fn listen(&self, node: &NodeId, event: &str, listener: Listener) {
		self.nodes.borrow_mut()[node.0]
			.listeners
			.push((event.to_owned(), listener));
	}
}
