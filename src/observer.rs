use crate::cell::Cell;
use crate::value::{Object, Value};

/// Turns plain data into reactive data.
///
/// Every object reachable from `data` becomes an [`Object`] whose
/// properties are [`Cell`]s. Arrays keep their elements as values, with
/// object elements instrumented the same way.
pub fn observe(data: serde_json::Value) -> Value {
	match data {
		serde_json::Value::Null => Value::Null,
		serde_json::Value::Bool(b) => Value::Bool(b),
		serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
		serde_json::Value::String(s) => Value::String(s),
		serde_json::Value::Array(items) => {
			Value::Array(items.into_iter().map(observe).collect())
		}
		serde_json::Value::Object(map) => {
			let object = Object::new();
			for (key, value) in map {
				object.insert(&key, Cell::new(observe(value)));
			}
			Value::Object(object)
		}
	}
}

impl From<serde_json::Value> for Value {
	fn from(data: serde_json::Value) -> Self {
		observe(data)
	}
}
