use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use std::rc::Rc;

use crate::cell::Cell;
use crate::computed::Computed;
use crate::dependencies::Dependencies;
use crate::{Error, Evaluation, Result};

const MAX_SAFE_INTEGER: f64 = 9007199254740992.0;

/// A value stored in the data graph.
///
/// Objects are reactive and compared by identity. Arrays are stored as
/// immutable snapshots, also compared by identity: replacing an array is a
/// write, mutating one in place is not possible.
#[derive(Clone, Default)]
pub enum Value {
	#[default]
	Null,
	Bool(bool),
	Number(f64),
	String(String),
	Array(Rc<[Value]>),
	Object(Object),
}

impl Value {
	/// Equality used to decide whether a write is a change.
	pub fn same(&self, other: &Value) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Number(a), Value::Number(b)) => a == b,
			(Value::String(a), Value::String(b)) => a == b,
			(Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
			(Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
			_ => false,
		}
	}

	pub fn type_name(&self) -> &'static str {
		match self {
			Value::Null => "null",
			Value::Bool(_) => "boolean",
			Value::Number(_) => "number",
			Value::String(_) => "string",
			Value::Array(_) => "array",
			Value::Object(_) => "object",
		}
	}

	pub fn as_object(&self) -> Option<&Object> {
		match self {
			Value::Object(object) => Some(object),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Number(n) => Some(*n),
			_ => None,
		}
	}

	/// Plain copy of the current state, computed properties excluded.
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Value::Null => serde_json::Value::Null,
			Value::Bool(b) => serde_json::Value::Bool(*b),
			Value::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => {
				serde_json::Value::from(*n as i64)
			}
			Value::Number(n) => serde_json::Number::from_f64(*n)
				.map(serde_json::Value::Number)
				.unwrap_or(serde_json::Value::Null),
			Value::String(s) => serde_json::Value::String(s.clone()),
			Value::Array(items) => items.iter().map(Value::to_json).collect(),
			Value::Object(object) => object.to_json(),
		}
	}
}

/// Text form used when a value is rendered into the view tree.
impl Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Null => Ok(()),
			Value::Bool(b) => write!(f, "{}", b),
			Value::Number(n) if n.is_infinite() => {
				write!(f, "{}Infinity", if *n < 0.0 { "-" } else { "" })
			}
			Value::Number(n) => write!(f, "{}", n),
			Value::String(s) => f.write_str(s),
			Value::Array(items) => {
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(",")?;
					}
					write!(f, "{}", item)?;
				}
				Ok(())
			}
			Value::Object(_) => f.write_str("[object Object]"),
		}
	}
}

impl Debug for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Null => f.write_str("Null"),
			Value::Bool(b) => write!(f, "Bool({})", b),
			Value::Number(n) => write!(f, "Number({})", n),
			Value::String(s) => write!(f, "String({:?})", s),
			Value::Array(items) => f.debug_list().entries(items.iter()).finish(),
			Value::Object(object) => object.fmt(f),
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		self.same(other)
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Number(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Number(value.into())
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Number(value as f64)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(value: Vec<Value>) -> Self {
		Value::Array(value.into())
	}
}

impl From<Object> for Value {
	fn from(value: Object) -> Self {
		Value::Object(value)
	}
}

#[derive(Clone)]
pub(crate) enum Slot {
	Cell(Cell),
	Computed(Computed),
}

/// A reactive object: every property is a [`Cell`] or a read-only
/// computed property.
#[derive(Clone, Default)]
pub struct Object {
	body: Rc<ObjectBody>,
}

#[derive(Default)]
struct ObjectBody {
	slots: RefCell<BTreeMap<String, Slot>>,
	/// Subscribers that read a key before it existed.
	missing: RefCell<BTreeMap<String, Dependencies>>,
}

impl Object {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn ptr_eq(&self, other: &Object) -> bool {
		Rc::ptr_eq(&self.body, &other.body)
	}

	fn slot(&self, key: &str) -> Option<Slot> {
		self.body.slots.borrow().get(key).cloned()
	}

	/// Reads a property. A missing property reads as [`Value::Null`]; a
	/// tracked read of it is notified once the property is added.
	pub fn get(&self, key: &str, eval: &Evaluation) -> Result<Value> {
		match self.slot(key) {
			Some(Slot::Cell(cell)) => Ok(cell.get(eval)),
			Some(Slot::Computed(computed)) => computed.get(eval),
			None => {
				if eval.is_tracking() {
					let mut missing = self.body.missing.borrow_mut();
					eval.based_on(missing.entry(key.to_owned()).or_default());
				}
				Ok(Value::Null)
			}
		}
	}

	pub fn get_once(&self, key: &str) -> Result<Value> {
		self.get(key, &Evaluation::untracked())
	}

	/// Writes a property, inserting a new cell if the key is missing.
	/// Returns whether the stored value changed.
	pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<bool> {
		let value = value.into();
		match self.slot(key) {
			Some(Slot::Cell(cell)) => Ok(cell.set(value)),
			Some(Slot::Computed(_)) => Err(Error::ReadOnly(key.to_owned())),
			None => {
				tracing::debug!(key, "adding property");
				self.insert(key, Cell::new(value));

				// Waiting subscribers re-evaluate and pick up the new cell.
				let waiting = self.body.missing.borrow_mut().remove(key);
				if let Some(waiting) = waiting {
					let failed = waiting.notify();
					if failed > 0 {
						tracing::warn!(key, failed, "new property left failing subscribers behind");
					}
				}

				Ok(true)
			}
		}
	}

	pub fn cell(&self, key: &str) -> Option<Cell> {
		match self.slot(key)? {
			Slot::Cell(cell) => Some(cell),
			Slot::Computed(_) => None,
		}
	}

	pub fn contains(&self, key: &str) -> bool {
		self.body.slots.borrow().contains_key(key)
	}

	pub fn keys(&self) -> Vec<String> {
		self.body.slots.borrow().keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.body.slots.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub(crate) fn insert(&self, key: &str, cell: Cell) {
		self.body
			.slots
			.borrow_mut()
			.insert(key.to_owned(), Slot::Cell(cell));
	}

	/// Defines a read-only derived property, replacing any data property
	/// with the same name.
	pub fn define_computed(&self, key: &str, computed: Computed) {
		self.body
			.slots
			.borrow_mut()
			.insert(key.to_owned(), Slot::Computed(computed));
	}

	pub fn to_json(&self) -> serde_json::Value {
		let slots = self.body.slots.borrow();
		let map = slots
			.iter()
			.filter_map(|(key, slot)| match slot {
				Slot::Cell(cell) => Some((key.clone(), cell.get_once().to_json())),
				Slot::Computed(_) => None,
			})
			.collect();

		serde_json::Value::Object(map)
	}
}

impl Debug for Object {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let slots = self.body.slots.borrow();
		let mut map = f.debug_map();
		for (key, slot) in slots.iter() {
			match slot {
				Slot::Cell(cell) => map.entry(key, &cell.get_once()),
				Slot::Computed(_) => map.entry(key, &format_args!("<computed>")),
			};
		}
		map.finish()
	}
}
