use super::*;
use pretty_assertions::assert_eq;

const TABLE: &str = r#"{
	"namespace": "http://schemas.android.com/apk/res/com.example.app",
	"packages": {
		"com.example.app": {
			"CustomView": { "styleable": [
				{ "name": "title", "format": "STRING | REFERENCE" },
				{ "name": "text", "package": "android" }
			] },
			"Themed": { "night": { "styleable": [{ "name": "tint" }] } },
			"Both": {
				"": { "styleable": [{ "name": "base" }] },
				"land": { "styleable": [{ "name": "wide" }] }
			},
			"app_name": { "string": "Demo" }
		}
	}
}"#;

fn table() -> ResourceTable {
	serde_json::from_str(TABLE).unwrap()
}

#[test]
fn test_styleable_default_configuration() {
	let table = table();
	let package = table.package("com.example.app").unwrap();
	let group = package.styleable("CustomView").unwrap();
	let names = group.attributes.iter().map(|attr| attr.name.as_str()).collect::<Vec<_>>();
	assert_eq!(names, vec!["title", "text"]);
	assert_eq!(group.attributes[0].format, AttrFormat::STRING | AttrFormat::REFERENCE);
	assert_eq!(group.attributes[0].package.as_str(), "com.example.app");
	assert_eq!(group.attributes[1].package.as_str(), "android");
	assert_eq!(group.attributes[1].format, AttrFormat::empty());

	let both = package.styleable("Both").unwrap();
	assert_eq!(both.attributes.len(), 1);
	assert_eq!(both.attributes[0].name, "base");
}

#[test]
fn test_styleable_absent_cases() {
	let table = table();
	let package = table.package("com.example.app").unwrap();
	// only declared for a non-default configuration
	assert!(package.entry("Themed").is_some());
	assert_eq!(package.styleable("Themed"), None);
	// not styleable-shaped
	assert_eq!(
		package.entry("app_name").and_then(|entry| entry.value(DEFAULT_CONFIG)),
		Some(&ResourceValue::String("Demo".to_string()))
	);
	assert_eq!(package.styleable("app_name"), None);
	assert_eq!(package.styleable("NeverDeclaredAnywhere"), None);
}

#[test]
fn test_registry_namespaces_not_one_to_one() {
	let mut registry = ResourceRegistry::default();
	registry.register(table());
	let mut lib = ResourceTable::new("http://schemas.android.com/apk/res/com.example.app");
	lib.insert(Package::new(PackageName::new("com.example.lib")));
	registry.register(lib);
	registry.register(ResourceTable::new("http://schemas.android.com/apk/res/android"));

	assert_eq!(registry.len(), 3);
	assert_eq!(
		registry
			.tables_for_namespace("http://schemas.android.com/apk/res/com.example.app")
			.count(),
		2
	);
	assert_eq!(registry.tables_for_namespace("urn:unknown").count(), 0);
	let mut packages = registry.all_packages().map(|package| package.name.as_str()).collect::<Vec<_>>();
	packages.sort();
	assert_eq!(packages, vec!["com.example.app", "com.example.lib"]);
}

#[test]
fn test_format_display() {
	assert_eq!((AttrFormat::COLOR | AttrFormat::REFERENCE).to_string(), "REFERENCE | COLOR");
	assert_eq!(AttrFormat::empty().to_string(), "");
}
