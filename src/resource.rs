//! Resource tables and the styleables they declare.
//!
//! Tables are loaded from JSON once and never mutated afterwards. The JSON
//! shape of a table is
//!
//! ```json
//! { "namespace": "http://schemas.android.com/apk/res/android",
//!   "packages": { "android": {
//!     "TextView": { "styleable": [{ "name": "textColor", "format": "COLOR | REFERENCE" }] },
//!     "Theme": { "": { "styleable": [] }, "night": { "styleable": [] } },
//!     "app_name": { "string": "Demo" } } } }
//! ```
//!
//! where an entry is either a single value for the default configuration, or a
//! map from configuration qualifier to value.

use std::collections::HashMap;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::symbol::Symbol;

pub type PackageName = Symbol<Package>;
pub type ResourceName = Symbol<ResourceEntry>;

/// The configuration qualifier every lookup in this crate uses.
pub const DEFAULT_CONFIG: &str = "";

bitflags! {
	/// Value formats an attribute accepts. Carried for display only.
	#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
	#[serde(transparent)]
	pub struct AttrFormat: u16 {
		const REFERENCE = 1 << 0;
		const STRING = 1 << 1;
		const COLOR = 1 << 2;
		const DIMENSION = 1 << 3;
		const BOOLEAN = 1 << 4;
		const INTEGER = 1 << 5;
		const FLOAT = 1 << 6;
		const FRACTION = 1 << 7;
		const ENUM = 1 << 8;
		const FLAGS = 1 << 9;
	}
}

/// Writes flag names as `COLOR | REFERENCE`, the same text the JSON uses.
impl std::fmt::Display for AttrFormat {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		bitflags::parser::to_writer(self, f)
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeEntry {
	pub name: String,
	/// The package declaring the attribute, which may differ from the package
	/// declaring the styleable (e.g. `android:text` reused by an app styleable).
	pub package: PackageName,
	pub format: AttrFormat,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeGroup {
	pub attributes: Vec<AttributeEntry>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResourceValue {
	Styleable(AttributeGroup),
	String(String),
	Color(String),
	Dimen(String),
}

#[derive(Clone, Debug, Default)]
pub struct ResourceEntry {
	configurations: HashMap<String, ResourceValue>,
}

impl ResourceEntry {
	pub fn value(&self, configuration: &str) -> Option<&ResourceValue> {
		self.configurations.get(configuration)
	}
}

#[derive(Debug)]
pub struct Package {
	pub name: PackageName,
	entries: HashMap<ResourceName, ResourceEntry>,
}

/// Looks up styleables by name within one package.
pub trait StyleableIndex {
	fn package_name(&self) -> PackageName;
	/// The styleable `name` in the default configuration. Entries of any other
	/// shape are treated as absent.
	fn styleable(&self, name: &str) -> Option<&AttributeGroup>;
}

impl Package {
	pub fn new(name: PackageName) -> Self {
		Package {
			name,
			entries: HashMap::new(),
		}
	}
	pub fn insert(&mut self, name: &str, configuration: &str, value: ResourceValue) {
		self.entries
			.entry(ResourceName::new(name))
			.or_default()
			.configurations
			.insert(configuration.to_string(), value);
	}
	/// Shorthand for a default-configuration styleable.
	pub fn insert_styleable<'a, I>(&mut self, name: &str, attributes: I)
	where
		I: IntoIterator<Item = (&'a str, AttrFormat)>,
	{
		let attributes = attributes
			.into_iter()
			.map(|(attr, format)| AttributeEntry {
				name: attr.to_string(),
				package: self.name,
				format,
			})
			.collect();
		self.insert(name, DEFAULT_CONFIG, ResourceValue::Styleable(AttributeGroup { attributes }));
	}
	pub fn entry(&self, name: &str) -> Option<&ResourceEntry> {
		let name = ResourceName::get(name)?;
		self.entries.get(&name)
	}
}

impl StyleableIndex for Package {
	#[inline]
	fn package_name(&self) -> PackageName {
		self.name
	}
	fn styleable(&self, name: &str) -> Option<&AttributeGroup> {
		match self.entry(name)?.value(DEFAULT_CONFIG)? {
			ResourceValue::Styleable(group) => Some(group),
			_ => None,
		}
	}
}

#[derive(Debug, Deserialize)]
#[serde(from = "RawTable")]
pub struct ResourceTable {
	/// The namespace URI this table is registered under.
	pub namespace: String,
	packages: HashMap<PackageName, Package>,
}

impl ResourceTable {
	pub fn new(namespace: impl Into<String>) -> Self {
		ResourceTable {
			namespace: namespace.into(),
			packages: HashMap::new(),
		}
	}
	pub fn insert(&mut self, package: Package) {
		self.packages.insert(package.name, package);
	}
	pub fn package(&self, symbol: &str) -> Option<&Package> {
		let name = PackageName::get(symbol)?;
		self.packages.get(&name)
	}
	pub fn packages(&self) -> impl Iterator<Item = &Package> {
		self.packages.values()
	}
}

#[derive(Deserialize)]
struct RawTable {
	namespace: String,
	#[serde(default)]
	packages: HashMap<String, HashMap<String, RawEntry>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
	Default(RawValue),
	Configured(HashMap<String, RawValue>),
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawValue {
	Styleable(Vec<RawAttribute>),
	String(String),
	Color(String),
	Dimen(String),
}

#[derive(Deserialize)]
struct RawAttribute {
	name: String,
	package: Option<String>,
	#[serde(default = "AttrFormat::empty")]
	format: AttrFormat,
}

impl RawValue {
	fn resolve(self, package: PackageName) -> ResourceValue {
		match self {
			RawValue::Styleable(attributes) => ResourceValue::Styleable(AttributeGroup {
				attributes: attributes
					.into_iter()
					.map(|attr| AttributeEntry {
						name: attr.name,
						package: attr.package.map(PackageName::new).unwrap_or(package),
						format: attr.format,
					})
					.collect(),
			}),
			RawValue::String(value) => ResourceValue::String(value),
			RawValue::Color(value) => ResourceValue::Color(value),
			RawValue::Dimen(value) => ResourceValue::Dimen(value),
		}
	}
}

impl From<RawTable> for ResourceTable {
	fn from(raw: RawTable) -> Self {
		let mut table = ResourceTable::new(raw.namespace);
		for (name, entries) in raw.packages {
			let mut package = Package::new(PackageName::new(&name));
			for (entry, value) in entries {
				match value {
					RawEntry::Default(value) => {
						let value = value.resolve(package.name);
						package.insert(&entry, DEFAULT_CONFIG, value);
					}
					RawEntry::Configured(configurations) => {
						for (configuration, value) in configurations {
							let value = value.resolve(package.name);
							package.insert(&entry, &configuration, value);
						}
					}
				}
			}
			table.insert(package);
		}
		table
	}
}

/// Every loaded [ResourceTable], keyed by the namespace URI it serves.
///
/// Namespace URIs are not 1:1 with tables: several tables may share one.
#[derive(Debug, Default)]
pub struct ResourceRegistry {
	tables: Vec<ResourceTable>,
	by_namespace: HashMap<String, Vec<usize>>,
}

impl ResourceRegistry {
	pub fn register(&mut self, table: ResourceTable) {
		let idx = self.tables.len();
		self.by_namespace.entry(table.namespace.clone()).or_default().push(idx);
		self.tables.push(table);
	}
	pub fn tables_for_namespace<'a>(&'a self, uri: &str) -> impl Iterator<Item = &'a ResourceTable> + use<'a> {
		let indices = self.by_namespace.get(uri).map(Vec::as_slice).unwrap_or_default();
		indices.iter().map(move |idx| &self.tables[*idx])
	}
	/// Every package of every registered table, in registration order of tables.
	pub fn all_packages(&self) -> impl Iterator<Item = &Package> {
		self.tables.iter().flat_map(ResourceTable::packages)
	}
	pub fn len(&self) -> usize {
		self.tables.len()
	}
	pub fn is_empty(&self) -> bool {
		self.tables.is_empty()
	}
}

#[cfg(test)]
mod tests;
