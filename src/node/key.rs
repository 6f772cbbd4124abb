use std::fmt;

/// A hashable mapping key.
///
/// YAML allows more than strings in key position; everything that can be
/// compared and hashed losslessly is kept. A sequence key is coerced into
/// `Key::Seq` (the immutable ordered form), anything else — mappings, tagged
/// values, floats — is rejected at the parse boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
	Null,
	Bool(bool),
	Int(i64),
	Str(String),
	Seq(Vec<Key>),
}

/// An owned path of keys from the root of a tree to a leaf or subtree.
///
/// The empty path denotes the root itself.
pub type KeyPath = Vec<Key>;

impl Key {
	/// Borrow the string form of this key, if it is a string key.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Key::Str(s) => Some(s),
			_ => None,
		}
	}
}

impl fmt::Display for Key {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Key::Null => write!(f, "~"),
			Key::Bool(b) => write!(f, "{b}"),
			Key::Int(n) => write!(f, "{n}"),
			Key::Str(s) => write!(f, "{s}"),
			Key::Seq(keys) => {
				write!(f, "[")?;
				for (i, k) in keys.iter().enumerate() {
					if i > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{k}")?;
				}
				write!(f, "]")
			}
		}
	}
}

impl From<&Key> for Key {
	fn from(key: &Key) -> Self {
		key.clone()
	}
}

impl From<&str> for Key {
	fn from(s: &str) -> Self {
		Key::Str(s.to_string())
	}
}

impl From<String> for Key {
	fn from(s: String) -> Self {
		Key::Str(s)
	}
}

impl From<i64> for Key {
	fn from(n: i64) -> Self {
		Key::Int(n)
	}
}

impl From<i32> for Key {
	fn from(n: i32) -> Self {
		Key::Int(n.into())
	}
}

impl From<bool> for Key {
	fn from(b: bool) -> Self {
		Key::Bool(b)
	}
}

/// Render a key path in dotted form, for error messages and logs.
pub fn path_to_string(path: &[Key]) -> String {
	path.iter()
		.map(|k| k.to_string())
		.collect::<Vec<_>>()
		.join(".")
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_display_scalars() {
		assert_eq!(Key::from("host").to_string(), "host");
		assert_eq!(Key::from(42).to_string(), "42");
		assert_eq!(Key::from(true).to_string(), "true");
		assert_eq!(Key::Null.to_string(), "~");
	}

	#[test]
	fn test_display_seq() {
		let key = Key::Seq(vec![Key::from("a"), Key::from(1)]);
		assert_eq!(key.to_string(), "[a, 1]");
	}

	#[test]
	fn test_path_to_string() {
		let path = vec![Key::from("server"), Key::from("tls"), Key::from("cert")];
		assert_eq!(path_to_string(&path), "server.tls.cert");
		assert_eq!(path_to_string(&[]), "");
	}

	#[test]
	fn test_as_str() {
		assert_eq!(Key::from("x").as_str(), Some("x"));
		assert_eq!(Key::from(1).as_str(), None);
	}
}
