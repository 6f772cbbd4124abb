use crate::node::Node;

/// A value stored in a configuration tree.
///
/// Nested mappings only ever exist as the `Node` variant, so the recursive
/// wrapping invariant holds by construction: any mapping reachable from a
/// tree is itself a tree. Lists are terminal for flattening purposes and are
/// never expanded element-wise.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Null,
	Bool(bool),
	Int(i64),
	Float(f64),
	String(String),
	List(Vec<Value>),
	Node(Node),
}

impl Value {
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	pub fn is_node(&self) -> bool {
		matches!(self, Value::Node(_))
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Value::Int(n) => Some(*n),
			_ => None,
		}
	}

	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Float(x) => Some(*x),
			Value::Int(n) => Some(*n as f64),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_node(&self) -> Option<&Node> {
		match self {
			Value::Node(node) => Some(node),
			_ => None,
		}
	}

	pub fn as_node_mut(&mut self) -> Option<&mut Node> {
		match self {
			Value::Node(node) => Some(node),
			_ => None,
		}
	}
}

impl From<bool> for Value {
	fn from(b: bool) -> Self {
		Value::Bool(b)
	}
}

impl From<i64> for Value {
	fn from(n: i64) -> Self {
		Value::Int(n)
	}
}

impl From<i32> for Value {
	fn from(n: i32) -> Self {
		Value::Int(n.into())
	}
}

impl From<f64> for Value {
	fn from(x: f64) -> Self {
		Value::Float(x)
	}
}

impl From<&str> for Value {
	fn from(s: &str) -> Self {
		Value::String(s.to_string())
	}
}

impl From<String> for Value {
	fn from(s: String) -> Self {
		Value::String(s)
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Value::List(items)
	}
}

impl From<Node> for Value {
	fn from(node: Node) -> Self {
		Value::Node(node)
	}
}
