//! Loads a project file and everything it points at.

use std::path::{Path, PathBuf};

use globwalk::{FileType, GlobWalkerBuilder};
use tracing::{debug, info, instrument, warn};

use crate::completion::CompletionContext;
use crate::config::Config;
use crate::matcher::Matcher;
use crate::resource::{ResourceRegistry, ResourceTable};
use crate::widget::WidgetIndex;
use crate::{errloc, format_loc, ok};

/// The widget table and resource tables of one project, loaded once.
#[derive(Debug)]
pub struct Project {
	/// Directory of the project file; every configured path is relative to it.
	pub root: PathBuf,
	pub config: Config,
	pub widgets: WidgetIndex,
	pub resources: ResourceRegistry,
}

impl Project {
	#[instrument(level = "debug")]
	pub fn load(path: &Path) -> anyhow::Result<Self> {
		let contents = ok!(std::fs::read_to_string(path), "could not read project file {}", path.display());
		let config: Config = ok!(serde_json::from_str(&contents), "invalid project file {}", path.display());
		let root = match path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
			_ => PathBuf::from("."),
		};

		let widgets = match &config.widgets {
			Some(widgets) => {
				let widgets = root.join(widgets);
				let contents = ok!(std::fs::read_to_string(&widgets), "could not read {}", widgets.display());
				ok!(WidgetIndex::from_json(&contents), "invalid widget table {}", widgets.display())
			}
			None => {
				warn!("no widget table configured, only dotted tags will resolve");
				WidgetIndex::default()
			}
		};

		let mut resources = ResourceRegistry::default();
		let patterns = config.resources.as_deref().unwrap_or_default();
		if !patterns.is_empty() {
			for table in resource_paths(&root, patterns)? {
				let contents = ok!(std::fs::read_to_string(&table), "could not read {}", table.display());
				let table_data: ResourceTable =
					ok!(serde_json::from_str(&contents), "invalid resource table {}", table.display());
				debug!(path = %table.display(), namespace = %table_data.namespace, "loaded resource table");
				resources.register(table_data);
			}
		}

		info!(
			widgets = widgets.len(),
			tables = resources.len(),
			"loaded project {}",
			path.display()
		);
		Ok(Project {
			root,
			config,
			widgets,
			resources,
		})
	}

	pub fn context<'a>(&'a self, matcher: &'a dyn Matcher) -> CompletionContext<'a> {
		CompletionContext {
			widgets: &self.widgets,
			resources: &self.resources,
			matcher,
			config: self.config.completions.clone().unwrap_or_default(),
		}
	}
}

/// Files under `root` matching any of `patterns`, sorted so tables register
/// in a stable order.
fn resource_paths(root: &Path, patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
	let walker = GlobWalkerBuilder::from_patterns(root, patterns)
		.file_type(FileType::FILE)
		.build()
		.map_err(|err| errloc!("bad resource pattern in {:?}: {}", patterns, err))?;
	let mut paths = vec![];
	for entry in walker {
		match entry {
			Ok(entry) => paths.push(entry.into_path()),
			Err(err) => warn!("{}", format_loc!("skipping unreadable entry: {}", err)),
		}
	}
	paths.sort();
	Ok(paths)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::matcher::CamelHumpMatcher;
	use pretty_assertions::assert_eq;

	fn scratch(name: &str) -> PathBuf {
		let dir = std::env::temp_dir().join(format!("layout-attrs-{name}-{}", std::process::id()));
		_ = std::fs::remove_dir_all(&dir);
		std::fs::create_dir_all(dir.join("res")).unwrap();
		dir
	}

	#[test]
	fn test_load_project() {
		let dir = scratch("load");
		std::fs::write(
			dir.join("project.json"),
			r#"{ "widgets": "widgets.json", "resources": ["res/*.json"], "completions": { "limit": 3 } }"#,
		)
		.unwrap();
		std::fs::write(
			dir.join("widgets.json"),
			r#"[{ "qualified_name": "android.view.View" }]"#,
		)
		.unwrap();
		std::fs::write(
			dir.join("res/android.json"),
			r#"{ "namespace": "http://schemas.android.com/apk/res/android",
			     "packages": { "android": { "View": { "styleable": [{ "name": "id", "format": "REFERENCE" }] } } } }"#,
		)
		.unwrap();
		std::fs::write(dir.join("res/notes.txt"), "ignored").unwrap();

		let project = Project::load(&dir.join("project.json")).unwrap();
		assert_eq!(project.widgets.len(), 1);
		assert_eq!(project.resources.len(), 1);
		let context = project.context(&CamelHumpMatcher);
		assert_eq!(context.config.limit, 3);
		assert!(context.config.dedup);
		_ = std::fs::remove_dir_all(&dir);
	}

	#[test]
	fn test_bad_table_reports_path() {
		let dir = scratch("bad");
		std::fs::write(dir.join("project.json"), r#"{ "resources": ["res/*.json"] }"#).unwrap();
		std::fs::write(dir.join("res/broken.json"), "{").unwrap();
		let err = Project::load(&dir.join("project.json")).unwrap_err();
		assert!(format!("{err:#}").contains("broken.json"), "{err:#}");
		_ = std::fs::remove_dir_all(&dir);
	}
}
