//! Maps attribute namespaces to the resource packages to search.

use const_format::concatcp;
use tracing::trace;

use crate::document::{Document, NodeId};
use crate::resource::{Package, ResourceRegistry};

/// Every package-backed namespace URI starts with this marker.
pub const URI_PREFIX: &str = "http://schemas.android.com/apk/res/";
pub const ANDROID_URI: &str = concatcp!(URI_PREFIX, "android");
pub const AUTO_URI: &str = "http://schemas.android.com/apk/res-auto";
pub const TOOLS_URI: &str = "http://schemas.android.com/tools";

/// One package to search, and the prefix its attributes are written with.
#[derive(Clone, Debug)]
pub struct SearchTarget<'r> {
	pub package: &'r Package,
	pub prefix: String,
}

/// Packages behind a namespace URI.
///
/// [`AUTO_URI`] stands for every package of every registered table; any other
/// URI names exactly one package symbol after [`URI_PREFIX`], looked up in the
/// tables registered for that URI.
pub fn packages_for_uri<'r>(uri: &str, registry: &'r ResourceRegistry) -> Vec<&'r Package> {
	if uri == AUTO_URI {
		return registry.all_packages().collect();
	}
	let Some(symbol) = uri.strip_prefix(URI_PREFIX) else {
		trace!(uri, "namespace has no resource packages");
		return vec![];
	};
	let packages = registry
		.tables_for_namespace(uri)
		.filter_map(|table| table.package(symbol))
		.collect::<Vec<_>>();
	if packages.is_empty() {
		trace!(uri, symbol, "no table registered for namespace");
	}
	packages
}

/// Targets for an attribute whose prefix is already bound to `uri`.
pub fn targets_for_namespace<'r>(uri: &str, prefix: &str, registry: &'r ResourceRegistry) -> Vec<SearchTarget<'r>> {
	packages_for_uri(uri, registry)
		.into_iter()
		.map(|package| SearchTarget {
			package,
			prefix: prefix.to_string(),
		})
		.collect()
}

/// Targets for every namespace declared at or above `node`, used while the
/// attribute has no namespace yet.
pub fn fan_out<'r>(document: &Document, node: NodeId, registry: &'r ResourceRegistry) -> Vec<SearchTarget<'r>> {
	document
		.namespace_declarations(node)
		.into_iter()
		.flat_map(|(prefix, uri)| targets_for_namespace(uri, prefix, registry))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::resource::{PackageName, ResourceTable};
	use pretty_assertions::assert_eq;

	fn registry() -> ResourceRegistry {
		let mut registry = ResourceRegistry::default();
		let mut android = ResourceTable::new(ANDROID_URI);
		android.insert(Package::new(PackageName::new("android")));
		registry.register(android);
		let mut app = ResourceTable::new(AUTO_URI);
		app.insert(Package::new(PackageName::new("com.example.app")));
		registry.register(app);
		registry
	}

	fn names(packages: &[&Package]) -> Vec<&'static str> {
		let mut names = packages.iter().map(|package| package.name.as_str()).collect::<Vec<_>>();
		names.sort();
		names
	}

	#[test]
	fn test_specific_uri() {
		let registry = registry();
		assert_eq!(names(&packages_for_uri(ANDROID_URI, &registry)), vec!["android"]);
	}

	#[test]
	fn test_auto_uri_spans_all_tables() {
		let registry = registry();
		assert_eq!(
			names(&packages_for_uri(AUTO_URI, &registry)),
			vec!["android", "com.example.app"]
		);
	}

	#[test]
	fn test_unbacked_uris_contribute_nothing() {
		let registry = registry();
		assert!(packages_for_uri(TOOLS_URI, &registry).is_empty());
		assert!(packages_for_uri(concatcp!(URI_PREFIX, "com.example.missing"), &registry).is_empty());
		assert!(packages_for_uri("urn:whatever", &registry).is_empty());
	}

	#[test]
	fn test_fan_out_tags_each_prefix() {
		let registry = registry();
		let document = Document::parse(concatcp!(
			r#"<FrameLayout xmlns:android=""#,
			ANDROID_URI,
			r#"" xmlns:tools=""#,
			TOOLS_URI,
			r#""><Button x="" /></FrameLayout>"#
		))
		.unwrap();
		let root = document.root().unwrap();
		let button = document[root].children[0];
		let targets = fan_out(&document, button, &registry);
		assert_eq!(targets.len(), 1);
		assert_eq!(targets[0].prefix, "android");
		assert_eq!(targets[0].package.name.as_str(), "android");
	}
}
