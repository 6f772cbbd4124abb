//! The flatten/merge engine.
//!
//! A tree reduces to an ordered list of (key path, leaf value) pairs and
//! reassembles from one; that round trip drives override merging, file
//! overlays, and `rebase`. All operations are single-pass inherent methods
//! on [`Node`] with no engine state of their own.

use crate::error::{LaminateError, Result};
use crate::node::{Key, KeyPath, Node, Value, path_to_string};
use std::path::Path;
use tracing::debug;

impl Node {
	/// Flatten the tree into (key path, leaf value) pairs in iteration
	/// order. Subtrees are expanded recursively; scalars and lists are
	/// terminal. An empty subtree contributes no pairs.
	pub fn flatten(&self) -> Vec<(KeyPath, Value)> {
		let mut pairs = Vec::new();
		self.flatten_into(&mut pairs, &[]);
		pairs
	}

	fn flatten_into(&self, pairs: &mut Vec<(KeyPath, Value)>, prefix: &[Key]) {
		for (key, value) in self.iter() {
			let mut path = prefix.to_vec();
			path.push(key.clone());
			match value {
				Value::Node(child) => child.flatten_into(pairs, &path),
				leaf => pairs.push((path, leaf.clone())),
			}
		}
	}

	/// Build a fresh tree from flattened pairs by replaying them through
	/// the merge engine.
	pub fn assemble(pairs: impl IntoIterator<Item = (KeyPath, Value)>) -> Result<Node> {
		let mut node = Node::new();
		node.update_flat(pairs)?;
		Ok(node)
	}

	/// Apply a single leaf value at a path, creating empty intermediate
	/// nodes where a segment is missing or holds a null.
	///
	/// At the final segment, a null value never replaces an existing
	/// subtree; any other combination lands, including a null over a plain
	/// leaf and a scalar over a subtree.
	pub fn apply_at(&mut self, path: &[Key], value: Value) -> Result<()> {
		let (last, parents) = path.split_last().ok_or(LaminateError::EmptyPath)?;
		let mut dst = self;
		for (i, segment) in parents.iter().enumerate() {
			if matches!(dst.get(segment), None | Some(Value::Null)) {
				dst.insert(segment.clone(), Node::new());
			}
			dst = match dst.get_mut(segment) {
				Some(Value::Node(child)) => child,
				_ => {
					return Err(LaminateError::NotAMapping {
						path: path_to_string(&path[..=i]),
					});
				}
			};
		}
		match dst.get(last) {
			Some(Value::Node(_)) if value.is_null() => {}
			_ => {
				dst.insert(last.clone(), value);
			}
		}
		Ok(())
	}

	/// Apply flattened pairs in sequence order; later pairs win.
	pub fn update_flat(
		&mut self,
		pairs: impl IntoIterator<Item = (KeyPath, Value)>,
	) -> Result<()> {
		for (path, value) in pairs {
			self.apply_at(&path, value)?;
		}
		Ok(())
	}

	/// Merge another tree into this one, leaf by leaf.
	pub fn update(&mut self, other: &Node) -> Result<()> {
		self.update_flat(other.flatten())
	}

	/// Load a YAML document and merge it in. With `if_exists`, a missing
	/// file is a no-op rather than an error.
	pub fn update_file(&mut self, path: &Path, if_exists: bool) -> Result<()> {
		let overlay = if if_exists {
			Node::from_file_if_exists(path)?
		} else {
			Node::from_file(path)?
		};
		debug!(path = %path.display(), entries = overlay.len(), "merging overlay");
		self.update(&overlay)
	}

	/// Recompose this tree as `base` overridden by its own current values,
	/// in place. External holders of a reference to this tree observe the
	/// rebased contents.
	pub fn rebase(&mut self, base: &Node) -> Result<()> {
		let mut merged = base.clone();
		merged.update(self)?;
		*self = merged;
		Ok(())
	}
}
