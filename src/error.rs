use std::path::PathBuf;

/// Library-level structured errors for laminate.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum LaminateError {
	#[error("Key not found: {key}")]
	MissingKey { key: String },

	#[error("Cannot apply a value at the empty path")]
	EmptyPath,

	#[error("Cannot descend into {path}: not a mapping")]
	NotAMapping { path: String },

	#[error("Mapping key is not usable as a key: {key}")]
	UnhashableKey { key: String },

	#[error("Config file not found: {path}")]
	SourceNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	SourceRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	Parse {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	#[error("Failed to serialize config tree")]
	Serialize {
		#[source]
		source: serde_yaml::Error,
	},

	#[error("Invalid config value for {key}: {reason}")]
	ConfigValue { key: String, reason: String },

	#[error("Mutually exclusive options: {option1} and {option2}")]
	MutuallyExclusive { option1: String, option2: String },
}

/// Result type alias using LaminateError.
pub type Result<T> = std::result::Result<T, LaminateError>;
