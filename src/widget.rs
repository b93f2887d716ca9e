//! Widget class metadata: which classes exist and what they extend.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Deserialize;

use crate::utils::simple_name;

#[derive(Clone, Debug, Deserialize)]
#[serde(from = "RawWidget")]
pub struct WidgetDescriptor {
	pub qualified_name: String,
	pub simple_name: String,
	/// Ancestor class names. Either the full chain or only the direct
	/// superclass; [`superclass_chain`] handles both.
	pub superclasses: Vec<String>,
}

#[derive(Deserialize)]
struct RawWidget {
	qualified_name: String,
	#[serde(default)]
	superclasses: Vec<String>,
}

impl From<RawWidget> for WidgetDescriptor {
	fn from(raw: RawWidget) -> Self {
		WidgetDescriptor::new(raw.qualified_name, raw.superclasses)
	}
}

impl WidgetDescriptor {
	pub fn new(qualified_name: impl Into<String>, superclasses: Vec<String>) -> Self {
		let qualified_name = qualified_name.into();
		WidgetDescriptor {
			simple_name: simple_name(&qualified_name).to_string(),
			qualified_name,
			superclasses,
		}
	}
}

pub trait WidgetTable {
	fn by_qualified_name(&self, name: &str) -> Option<&WidgetDescriptor>;
	fn by_simple_name(&self, name: &str) -> Option<&WidgetDescriptor>;

	/// Looks up `name` the way a tag is resolved: qualified if it contains a dot.
	fn lookup(&self, name: &str) -> Option<&WidgetDescriptor> {
		if name.contains('.') {
			self.by_qualified_name(name)
		} else {
			self.by_simple_name(name)
		}
	}
}

/// The concrete [WidgetTable], filled once and read-only afterwards.
#[derive(Default, Debug)]
pub struct WidgetIndex {
	widgets: Vec<WidgetDescriptor>,
	by_qualified: HashMap<String, usize>,
	by_simple: HashMap<String, usize>,
}

impl WidgetIndex {
	/// On a simple-name collision, the first widget inserted keeps the name.
	pub fn insert(&mut self, widget: WidgetDescriptor) {
		let idx = self.widgets.len();
		if self.by_qualified.contains_key(&widget.qualified_name) {
			return;
		}
		self.by_qualified.insert(widget.qualified_name.clone(), idx);
		self.by_simple.entry(widget.simple_name.clone()).or_insert(idx);
		self.widgets.push(widget);
	}
	pub fn from_json(contents: &str) -> serde_json::Result<Self> {
		let widgets: Vec<WidgetDescriptor> = serde_json::from_str(contents)?;
		Ok(widgets.into_iter().collect())
	}
	pub fn len(&self) -> usize {
		self.widgets.len()
	}
	pub fn is_empty(&self) -> bool {
		self.widgets.is_empty()
	}
}

impl FromIterator<WidgetDescriptor> for WidgetIndex {
	fn from_iter<T: IntoIterator<Item = WidgetDescriptor>>(iter: T) -> Self {
		let mut index = WidgetIndex::default();
		for widget in iter {
			index.insert(widget);
		}
		index
	}
}

impl WidgetTable for WidgetIndex {
	fn by_qualified_name(&self, name: &str) -> Option<&WidgetDescriptor> {
		self.by_qualified.get(name).map(|idx| &self.widgets[*idx])
	}
	fn by_simple_name(&self, name: &str) -> Option<&WidgetDescriptor> {
		self.by_simple.get(name).map(|idx| &self.widgets[*idx])
	}
}

/// Every ancestor class of `widget`, breadth-first, each visited once.
///
/// Ancestors the table knows about contribute their own superclasses too, so
/// tables that only record the direct superclass still yield the full chain.
/// Names are compared by simple name; cycles terminate.
pub fn superclass_chain<'w, W>(table: &'w W, widget: &'w WidgetDescriptor) -> Vec<&'w str>
where
	W: WidgetTable + ?Sized,
{
	let mut visited = HashSet::from([widget.simple_name.as_str()]);
	let mut queue = widget.superclasses.iter().map(String::as_str).collect::<VecDeque<_>>();
	let mut chain = vec![];
	while let Some(name) = queue.pop_front() {
		if !visited.insert(simple_name(name)) {
			continue;
		}
		chain.push(name);
		if let Some(known) = table.lookup(name) {
			queue.extend(known.superclasses.iter().map(String::as_str));
		}
	}
	chain
}
