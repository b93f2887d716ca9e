use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// Contents of a project file. Paths are relative to the project file.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Config {
	/// JSON widget table.
	pub widgets: Option<String>,
	/// Glob patterns matching JSON resource tables.
	pub resources: Option<Vec<String>>,
	pub completions: Option<CompletionsConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone, SmartDefault)]
#[serde(default)]
pub struct CompletionsConfig {
	#[default = 200]
	pub limit: usize,
	/// Collapse candidates with the same prefix, name and package.
	#[default = true]
	pub dedup: bool,
	/// Leave out attributes the element already sets.
	#[default = true]
	pub skip_existing: bool,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_partial_completions_config() {
		let config: Config = serde_json::from_str(r#"{ "completions": { "limit": 5 } }"#).unwrap();
		let completions = config.completions.unwrap();
		assert_eq!(completions.limit, 5);
		assert!(completions.dedup);
		assert!(completions.skip_existing);
		assert!(config.widgets.is_none());
	}
}
