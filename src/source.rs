//! The YAML document boundary.
//!
//! Parsing goes through `serde_yaml::Value`, whose mapping type preserves
//! document order, and is then wrapped into [`Node`]/[`Value`] so that every
//! nested mapping is itself a tree. Serialization is a hand-written
//! `Serialize` that emits block-style YAML in insertion order.

use crate::error::{LaminateError, Result};
use crate::node::{Key, Node, Value};
use serde::ser::{Serialize, Serializer};
use std::io;
use std::path::Path;
use tracing::debug;

impl Node {
	/// Parse a YAML document from a string. An empty document is an empty
	/// tree; a non-mapping top level is rejected.
	pub fn from_yaml_str(text: &str) -> Result<Node> {
		parse_document(text, Path::new("<string>"))
	}

	/// Load and parse a YAML document from a file.
	pub fn from_file(path: impl AsRef<Path>) -> Result<Node> {
		let path = path.as_ref();
		if !path.exists() {
			return Err(LaminateError::SourceNotFound {
				path: path.to_path_buf(),
			});
		}
		let text = std::fs::read_to_string(path).map_err(|source| LaminateError::SourceRead {
			path: path.to_path_buf(),
			source,
		})?;
		debug!(path = %path.display(), bytes = text.len(), "loading config");
		parse_document(&text, path)
	}

	/// As [`Node::from_file`], but a missing file resolves to an empty tree.
	pub fn from_file_if_exists(path: impl AsRef<Path>) -> Result<Node> {
		let path = path.as_ref();
		if path.exists() {
			Node::from_file(path)
		} else {
			debug!(path = %path.display(), "config absent, skipping");
			Ok(Node::new())
		}
	}

	/// Serialize the tree as block-style YAML, mapping order matching
	/// insertion order.
	pub fn dump<W: io::Write>(&self, writer: W) -> Result<()> {
		serde_yaml::to_writer(writer, self).map_err(|source| LaminateError::Serialize { source })
	}

	pub fn to_yaml_string(&self) -> Result<String> {
		serde_yaml::to_string(self).map_err(|source| LaminateError::Serialize { source })
	}
}

fn parse_document(text: &str, path: &Path) -> Result<Node> {
	let raw: serde_yaml::Value =
		serde_yaml::from_str(text).map_err(|source| LaminateError::Parse {
			path: path.to_path_buf(),
			source,
		})?;
	match raw {
		serde_yaml::Value::Null => Ok(Node::new()),
		serde_yaml::Value::Mapping(mapping) => node_from_mapping(mapping),
		other => Err(LaminateError::ConfigValue {
			key: path.display().to_string(),
			reason: format!("top-level document must be a mapping, found {}", yaml_type(&other)),
		}),
	}
}

fn node_from_mapping(mapping: serde_yaml::Mapping) -> Result<Node> {
	let mut node = Node::new();
	for (key, value) in mapping {
		node.insert(key_from_yaml(key)?, value_from_yaml(value)?);
	}
	Ok(node)
}

/// Coerce a parsed key into its hashable form. Sequence keys become
/// `Key::Seq` (the immutable ordered form); mapping, tagged, and float keys
/// have no such form and are rejected.
fn key_from_yaml(raw: serde_yaml::Value) -> Result<Key> {
	match raw {
		serde_yaml::Value::Null => Ok(Key::Null),
		serde_yaml::Value::Bool(b) => Ok(Key::Bool(b)),
		serde_yaml::Value::Number(n) => n.as_i64().map(Key::Int).ok_or_else(|| {
			LaminateError::UnhashableKey {
				key: n.to_string(),
			}
		}),
		serde_yaml::Value::String(s) => Ok(Key::Str(s)),
		serde_yaml::Value::Sequence(items) => Ok(Key::Seq(
			items
				.into_iter()
				.map(key_from_yaml)
				.collect::<Result<Vec<_>>>()?,
		)),
		other => Err(LaminateError::UnhashableKey {
			key: yaml_type(&other).to_string(),
		}),
	}
}

fn value_from_yaml(raw: serde_yaml::Value) -> Result<Value> {
	Ok(match raw {
		serde_yaml::Value::Null => Value::Null,
		serde_yaml::Value::Bool(b) => Value::Bool(b),
		serde_yaml::Value::Number(n) => match n.as_i64() {
			Some(i) => Value::Int(i),
			None => Value::Float(n.as_f64().unwrap_or_default()),
		},
		serde_yaml::Value::String(s) => Value::String(s),
		serde_yaml::Value::Sequence(items) => Value::List(
			items
				.into_iter()
				.map(value_from_yaml)
				.collect::<Result<Vec<_>>>()?,
		),
		serde_yaml::Value::Mapping(mapping) => Value::Node(node_from_mapping(mapping)?),
		// Tags carry no meaning here; keep the inner value.
		serde_yaml::Value::Tagged(tagged) => value_from_yaml(tagged.value)?,
	})
}

fn yaml_type(value: &serde_yaml::Value) -> &'static str {
	match value {
		serde_yaml::Value::Null => "null",
		serde_yaml::Value::Bool(_) => "a bool",
		serde_yaml::Value::Number(_) => "a number",
		serde_yaml::Value::String(_) => "a string",
		serde_yaml::Value::Sequence(_) => "a sequence",
		serde_yaml::Value::Mapping(_) => "a mapping",
		serde_yaml::Value::Tagged(_) => "a tagged value",
	}
}

impl Serialize for Node {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.collect_map(self.iter())
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Value::Null => serializer.serialize_unit(),
			Value::Bool(b) => serializer.serialize_bool(*b),
			Value::Int(n) => serializer.serialize_i64(*n),
			Value::Float(x) => serializer.serialize_f64(*x),
			Value::String(s) => serializer.serialize_str(s),
			Value::List(items) => serializer.collect_seq(items),
			Value::Node(node) => node.serialize(serializer),
		}
	}
}

impl Serialize for Key {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		match self {
			Key::Null => serializer.serialize_unit(),
			Key::Bool(b) => serializer.serialize_bool(*b),
			Key::Int(n) => serializer.serialize_i64(*n),
			Key::Str(s) => serializer.serialize_str(s),
			Key::Seq(keys) => serializer.collect_seq(keys),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::fs;

	#[test]
	fn test_parse_preserves_document_order() {
		let node = Node::from_yaml_str("zeta: 1\nalpha: 2\nmiddle: 3\n").unwrap();
		let keys: Vec<_> = node.keys().map(|k| k.to_string()).collect();
		assert_eq!(keys, ["zeta", "alpha", "middle"]);
	}

	#[test]
	fn test_parse_wraps_nested_mappings() {
		let node = Node::from_yaml_str("a:\n  b:\n    c: deep\n").unwrap();
		assert_eq!(node.at("a.b.c").unwrap().as_str(), Some("deep"));
	}

	#[test]
	fn test_parse_empty_document() {
		assert!(Node::from_yaml_str("").unwrap().is_empty());
		assert!(Node::from_yaml_str("# only a comment\n").unwrap().is_empty());
	}

	#[test]
	fn test_parse_rejects_scalar_document() {
		match Node::from_yaml_str("just a string") {
			Err(LaminateError::ConfigValue { reason, .. }) => {
				assert!(reason.contains("must be a mapping"));
			}
			other => panic!("Expected ConfigValue, got {other:?}"),
		}
	}

	#[test]
	fn test_parse_reports_malformed_yaml() {
		let result = Node::from_yaml_str("a: [unclosed\n");
		assert!(matches!(result, Err(LaminateError::Parse { .. })));
	}

	#[test]
	fn test_sequence_key_coerced_to_seq_key() {
		let node = Node::from_yaml_str("? [a, b]\n: 1\n").unwrap();
		let expected = Key::Seq(vec![Key::from("a"), Key::from("b")]);
		assert_eq!(node.get(expected).and_then(Value::as_i64), Some(1));
	}

	#[test]
	fn test_non_string_scalar_keys() {
		let node = Node::from_yaml_str("1: one\ntrue: yes\n~: null-key\n").unwrap();
		assert_eq!(node.get(1).and_then(Value::as_str), Some("one"));
		assert_eq!(node.get(true).and_then(Value::as_str), Some("yes"));
		assert_eq!(node.get(Key::Null).and_then(Value::as_str), Some("null-key"));
	}

	#[test]
	fn test_mapping_key_is_unhashable() {
		let result = Node::from_yaml_str("? {a: 1}\n: 2\n");
		match result {
			Err(LaminateError::UnhashableKey { key }) => assert_eq!(key, "a mapping"),
			other => panic!("Expected UnhashableKey, got {other:?}"),
		}
	}

	#[test]
	fn test_tagged_value_unwrapped() {
		let node = Node::from_yaml_str("x: !custom 5\n").unwrap();
		assert_eq!(node["x"].as_i64(), Some(5));
	}

	#[test]
	fn test_number_variants() {
		let node = Node::from_yaml_str("i: -3\nf: 0.5\nbig: 9999999999999999999\n").unwrap();
		assert_eq!(node["i"].as_i64(), Some(-3));
		assert_eq!(node["f"].as_f64(), Some(0.5));
		// Beyond i64 falls back to float
		assert!(matches!(node["big"], Value::Float(_)));
	}

	#[test]
	fn test_from_file_not_found() {
		let dir = tempfile::tempdir().unwrap();
		let missing = dir.path().join("absent.yaml");

		match Node::from_file(&missing) {
			Err(LaminateError::SourceNotFound { path }) => assert_eq!(path, missing),
			other => panic!("Expected SourceNotFound, got {other:?}"),
		}
		assert!(Node::from_file_if_exists(&missing).unwrap().is_empty());
	}

	#[test]
	fn test_from_file_round_trip() {
		let dir = tempfile::tempdir().unwrap();
		let file = dir.path().join("config.yaml");
		fs::write(&file, "server:\n  port: 80\n").unwrap();

		let node = Node::from_file(&file).unwrap();
		assert_eq!(node.at("server.port").unwrap().as_i64(), Some(80));
	}

	#[test]
	fn test_dump_block_style_in_insertion_order() {
		let node = Node::from_yaml_str("zeta: 1\nalpha:\n  nested: true\nlist:\n  - a\n  - b\n")
			.unwrap();
		let out = node.to_yaml_string().unwrap();
		assert_eq!(out, "zeta: 1\nalpha:\n  nested: true\nlist:\n- a\n- b\n");
	}

	#[test]
	fn test_dump_null_renders_as_null() {
		let mut node = Node::new();
		node.insert("empty", Value::Null);
		assert_eq!(node.to_yaml_string().unwrap(), "empty: null\n");
	}

	#[test]
	fn test_parse_dump_round_trip() {
		let text = "a: 1\nb:\n  c: true\n  d: text\n";
		let node = Node::from_yaml_str(text).unwrap();
		let reparsed = Node::from_yaml_str(&node.to_yaml_string().unwrap()).unwrap();
		assert_eq!(reparsed, node);
	}
}
