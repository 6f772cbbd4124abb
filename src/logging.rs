//! Logging bootstrap driven by a configuration subtree.
//!
//! The subtree holds a top-level `level` plus an optional `targets` mapping
//! of target name to level; any level string equal to `"custom"` is
//! substituted with the caller-supplied level before the filter is built.
//!
//! ```yaml
//! logging:
//!   level: info
//!   targets:
//!     laminate: custom
//!     hyper: warn
//! ```

use crate::error::{LaminateError, Result};
use crate::node::{Node, Value};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber from an optional config subtree.
///
/// `custom_level` and `debug` are two ways to pick the level substituted
/// for `"custom"` entries and are mutually exclusive; `debug` maps to
/// `DEBUG`/`WARN`, and with neither given the substitution level is `WARN`.
/// Without a config subtree the whole filter is just that level.
pub fn init_logging(
	cfg: Option<&Node>,
	custom_level: Option<Level>,
	debug: Option<bool>,
) -> Result<()> {
	let custom = resolve_custom_level(custom_level, debug)?;
	let filter = match cfg {
		Some(cfg) if !cfg.is_empty() => build_filter(cfg, custom)?,
		_ => EnvFilter::new(level_name(custom)),
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.try_init()
		.map_err(|e| LaminateError::ConfigValue {
			key: "logging".to_string(),
			reason: format!("failed to install subscriber: {e}"),
		})
}

fn resolve_custom_level(custom_level: Option<Level>, debug: Option<bool>) -> Result<Level> {
	match (custom_level, debug) {
		(Some(_), Some(_)) => Err(LaminateError::MutuallyExclusive {
			option1: "custom_level".to_string(),
			option2: "debug".to_string(),
		}),
		(Some(level), None) => Ok(level),
		(None, Some(true)) => Ok(Level::DEBUG),
		(None, Some(false)) | (None, None) => Ok(Level::WARN),
	}
}

fn build_filter(cfg: &Node, custom: Level) -> Result<EnvFilter> {
	let base = resolve_level(cfg.get("level"), custom, "level")?;
	let mut filter = EnvFilter::new(&base);

	if let Some(targets) = cfg.get("targets").and_then(Value::as_node) {
		for (target, value) in targets.iter() {
			let key = format!("targets.{target}");
			let level = resolve_level(Some(value), custom, &key)?;
			let directive = format!("{target}={level}")
				.parse()
				.map_err(|e| LaminateError::ConfigValue {
					key,
					reason: format!("invalid filter directive: {e}"),
				})?;
			filter = filter.add_directive(directive);
		}
	}

	Ok(filter)
}

/// Resolve a configured level string, substituting `"custom"` and
/// validating everything else. A missing entry resolves to the custom level.
fn resolve_level(value: Option<&Value>, custom: Level, key: &str) -> Result<String> {
	let Some(value) = value else {
		return Ok(level_name(custom));
	};
	let text = value.as_str().ok_or_else(|| LaminateError::ConfigValue {
		key: key.to_string(),
		reason: "expected a level string".to_string(),
	})?;
	if text == "custom" {
		return Ok(level_name(custom));
	}
	text.parse::<tracing::level_filters::LevelFilter>()
		.map_err(|_| LaminateError::ConfigValue {
			key: key.to_string(),
			reason: format!("unknown log level: {text}"),
		})?;
	Ok(text.to_lowercase())
}

fn level_name(level: Level) -> String {
	level.to_string().to_lowercase()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_custom_level_and_debug_are_exclusive() {
		let result = resolve_custom_level(Some(Level::INFO), Some(true));
		match result {
			Err(LaminateError::MutuallyExclusive { option1, option2 }) => {
				assert_eq!(option1, "custom_level");
				assert_eq!(option2, "debug");
			}
			other => panic!("Expected MutuallyExclusive, got {other:?}"),
		}
	}

	#[test]
	fn test_debug_flag_picks_level() {
		assert_eq!(resolve_custom_level(None, Some(true)).unwrap(), Level::DEBUG);
		assert_eq!(resolve_custom_level(None, Some(false)).unwrap(), Level::WARN);
		assert_eq!(resolve_custom_level(None, None).unwrap(), Level::WARN);
	}

	#[test]
	fn test_custom_placeholder_substituted() {
		assert_eq!(
			resolve_level(Some(&Value::from("custom")), Level::DEBUG, "level").unwrap(),
			"debug"
		);
		assert_eq!(
			resolve_level(Some(&Value::from("error")), Level::DEBUG, "level").unwrap(),
			"error"
		);
		assert_eq!(resolve_level(None, Level::INFO, "level").unwrap(), "info");
	}

	#[test]
	fn test_invalid_level_is_rejected() {
		let result = resolve_level(Some(&Value::from("loud")), Level::WARN, "level");
		match result {
			Err(LaminateError::ConfigValue { key, reason }) => {
				assert_eq!(key, "level");
				assert!(reason.contains("loud"));
			}
			other => panic!("Expected ConfigValue, got {other:?}"),
		}
	}

	#[test]
	fn test_non_string_level_is_rejected() {
		let result = resolve_level(Some(&Value::from(3)), Level::WARN, "targets.hyper");
		assert!(matches!(result, Err(LaminateError::ConfigValue { .. })));
	}

	#[test]
	fn test_filter_includes_target_directives() {
		let cfg = Node::from_yaml_str("level: warn\ntargets:\n  laminate: custom\n").unwrap();
		let filter = build_filter(&cfg, Level::TRACE).unwrap();
		let rendered = filter.to_string();
		assert!(rendered.contains("laminate=trace"));
		assert!(rendered.contains("warn"));
	}
}
