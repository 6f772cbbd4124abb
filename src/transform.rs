//! Bulk transforms over a whole tree.
//!
//! Depth-first helpers for rewriting, visiting, and pruning leaves across a
//! tree in one pass, e.g. coercing every scalar to a common type or dropping
//! empty values after a merge.

use crate::error::Result;
use crate::node::{Key, Node, Value};

impl Node {
	/// Rewrite every leaf value in place, depth-first. Subtree values are
	/// recursed into, not passed to `f`.
	pub fn apply(&mut self, f: &mut impl FnMut(&Key, Value) -> Value) {
		for (key, value) in self.iter_mut() {
			if let Value::Node(child) = value {
				child.apply(f);
			} else {
				let leaf = std::mem::replace(value, Value::Null);
				*value = f(key, leaf);
			}
		}
	}

	/// Rewrite every value in place, depth-first, including subtree values
	/// themselves (after their children have been visited).
	pub fn apply_all(&mut self, f: &mut impl FnMut(&Key, Value) -> Value) {
		for (key, value) in self.iter_mut() {
			if let Value::Node(child) = value {
				child.apply_all(f);
			}
			let current = std::mem::replace(value, Value::Null);
			*value = f(key, current);
		}
	}

	/// Read-only depth-first walk over every leaf.
	pub fn visit(&self, f: &mut impl FnMut(&Key, &Value)) {
		for (key, value) in self.iter() {
			if let Value::Node(child) = value {
				child.visit(f);
			} else {
				f(key, value);
			}
		}
	}

	/// Rewrite every leaf given its full key path, then reassemble through
	/// the merge engine. Use this when a transform needs more than the
	/// local key.
	pub fn apply_flat(&mut self, f: &mut impl FnMut(&[Key], Value) -> Value) -> Result<()> {
		let pairs: Vec<_> = self
			.flatten()
			.into_iter()
			.map(|(path, value)| {
				let value = f(&path, value);
				(path, value)
			})
			.collect();
		self.update_flat(pairs)
	}

	/// Drop every leaf whose predicate is false, depth-first. Subtrees are
	/// never removed by this pass; pruning all of a subtree's leaves leaves
	/// it empty but present.
	pub fn retain(&mut self, f: &mut impl FnMut(&Key, &Value) -> bool) {
		for (_, value) in self.iter_mut() {
			if let Value::Node(child) = value {
				child.retain(f);
			}
		}
		self.retain_raw(|key, value| value.is_node() || f(key, &*value));
	}
}
