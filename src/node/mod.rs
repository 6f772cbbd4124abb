//! The configuration tree itself.
//!
//! This module provides:
//! - `Key`/`KeyPath`: hashable mapping keys and root-relative paths
//! - `Value`: scalars, lists, and nested trees
//! - `Node`: the order-preserving tree container and primary API surface

pub mod key;
pub mod value;

pub use key::{Key, KeyPath, path_to_string};
pub use value::Value;

use crate::error::{LaminateError, Result};
use indexmap::IndexMap;
use std::ops::Index;

/// An order-preserving configuration tree.
///
/// Entries keep their insertion order, which is what serialization emits;
/// merge correctness does not depend on it. Children are owned outright, so
/// `clone()` is a structurally independent deep copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
	entries: IndexMap<Key, Value>,
}

impl Node {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn clear(&mut self) {
		self.entries.clear();
	}

	pub fn iter(&self) -> impl Iterator<Item = (&Key, &Value)> {
		self.entries.iter()
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = (&Key, &mut Value)> {
		self.entries.iter_mut()
	}

	pub fn keys(&self) -> impl Iterator<Item = &Key> {
		self.entries.keys()
	}

	pub fn contains_key(&self, key: impl Into<Key>) -> bool {
		self.entries.contains_key(&key.into())
	}

	/// Keyed access: `None` when absent, so the caller can supply a default.
	pub fn get(&self, key: impl Into<Key>) -> Option<&Value> {
		self.entries.get(&key.into())
	}

	pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut Value> {
		self.entries.get_mut(&key.into())
	}

	/// Insert a value, returning the previous value at that key if any.
	/// An entry inserted over an existing key keeps its original position.
	pub fn insert(&mut self, key: impl Into<Key>, value: impl Into<Value>) -> Option<Value> {
		self.entries.insert(key.into(), value.into())
	}

	pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
		self.entries.shift_remove(&key.into())
	}

	pub(crate) fn retain_raw(&mut self, keep: impl FnMut(&Key, &mut Value) -> bool) {
		self.entries.retain(keep);
	}

	/// Strict access: a missing key is an error rather than a default.
	pub fn fetch(&self, key: impl Into<Key>) -> Result<&Value> {
		let key = key.into();
		self.entries
			.get(&key)
			.ok_or_else(|| LaminateError::MissingKey {
				key: key.to_string(),
			})
	}

	/// Resolve a root-relative key path. The empty path has no `Value`
	/// representation (it denotes the tree itself) and yields `None`.
	pub fn get_path(&self, path: &[Key]) -> Option<&Value> {
		let (first, rest) = path.split_first()?;
		let value = self.entries.get(first)?;
		if rest.is_empty() {
			Some(value)
		} else {
			value.as_node()?.get_path(rest)
		}
	}

	/// Strict dotted-path access: `node.at("server.port")`.
	///
	/// Every segment is taken as a string key. Descending through a
	/// non-mapping value or a missing key is an error.
	pub fn at(&self, dotted: &str) -> Result<&Value> {
		let segments: Vec<&str> = dotted.split('.').collect();
		let mut node = self;
		for (i, segment) in segments.iter().enumerate() {
			if i + 1 == segments.len() {
				return node.fetch(*segment);
			}
			let value = node.fetch(*segment)?;
			node = value.as_node().ok_or_else(|| LaminateError::NotAMapping {
				path: segments[..=i].join("."),
			})?;
		}
		// split() always yields at least one segment
		Err(LaminateError::MissingKey {
			key: dotted.to_string(),
		})
	}

	/// Dotted-path access returning `None` on any missing or non-mapping
	/// segment, so the caller can supply a default.
	pub fn lookup(&self, dotted: &str) -> Option<&Value> {
		let mut node = self;
		let mut segments = dotted.split('.').peekable();
		loop {
			let value = node.get(segments.next()?)?;
			if segments.peek().is_none() {
				return Some(value);
			}
			node = value.as_node()?;
		}
	}
}

impl Index<&str> for Node {
	type Output = Value;

	/// Strict indexed access; panics on a missing key like std map indexing.
	fn index(&self, key: &str) -> &Value {
		self.get(key)
			.unwrap_or_else(|| panic!("Key not found: {key}"))
	}
}

impl<'a> IntoIterator for &'a Node {
	type Item = (&'a Key, &'a Value);
	type IntoIter = indexmap::map::Iter<'a, Key, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}

impl<K: Into<Key>, V: Into<Value>> FromIterator<(K, V)> for Node {
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Node {
			entries: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}
