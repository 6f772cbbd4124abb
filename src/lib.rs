//! Laminate - layered YAML configuration trees with deterministic merge.
//!
//! This library provides the core functionality for laminate, including:
//! - An order-preserving configuration tree with keyed and dotted-path access
//! - Flattening a tree into (key path, leaf value) pairs and back
//! - Deep merging of configuration layers where a null override never
//!   erases an existing subtree
//! - Bulk transforms over every leaf of a tree
//!
//! # Example
//!
//! ```
//! use laminate::Node;
//!
//! let mut cfg = Node::from_yaml_str("server:\n  port: 80\n  tls: false\n").unwrap();
//! let overlay = Node::from_yaml_str("server:\n  tls: true\n").unwrap();
//! cfg.update(&overlay).unwrap();
//!
//! assert_eq!(cfg.at("server.port").unwrap().as_i64(), Some(80));
//! assert_eq!(cfg.at("server.tls").unwrap().as_bool(), Some(true));
//! ```

pub mod error;
pub mod logging;
pub mod node;

mod merge;
mod source;
mod transform;

pub use error::{LaminateError, Result};
pub use node::{Key, KeyPath, Node, Value, path_to_string};
