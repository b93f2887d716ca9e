//! Resolves which styleables apply to a layout node.
//!
//! Attributes are declared per class rather than per tag: a node gets the
//! styleables of its own class and every superclass, plus the layout-parameter
//! styleables of its immediate parent's class.

use std::collections::{BTreeSet, HashMap};

use const_format::concatcp;
use derive_more::Deref;
use tracing::trace;

use crate::document::{Document, NodeId};
use crate::resource::{AttributeGroup, ResourceName, StyleableIndex};
use crate::utils::simple_name;
use crate::widget::{WidgetDescriptor, WidgetTable, superclass_chain};

pub const LAYOUT_SUFFIX: &str = "_Layout";
pub const MARGIN_LAYOUT_SUFFIX: &str = "_MarginLayout";

const ROOT_WIDGET_NAME: &str = "View";
const ROOT_CONTAINER_NAME: &str = "ViewGroup";
pub const ROOT_CONTAINER: &str = concatcp!("android.view.", ROOT_CONTAINER_NAME);

/// Attributes common to every widget.
pub const BASE_STYLEABLE: &str = ROOT_WIDGET_NAME;
pub const CONTAINER_LAYOUT: &str = concatcp!(ROOT_CONTAINER_NAME, LAYOUT_SUFFIX);
pub const CONTAINER_MARGIN_LAYOUT: &str = concatcp!(ROOT_CONTAINER_NAME, MARGIN_LAYOUT_SUFFIX);

/// A set of styleables from one package, keyed by styleable name.
#[derive(Debug, Default, Deref)]
pub struct StyleableSet<'i> {
	groups: HashMap<ResourceName, &'i AttributeGroup>,
}

impl PartialEq for StyleableSet<'_> {
	fn eq(&self, other: &Self) -> bool {
		self.groups.len() == other.groups.len()
			&& self
				.groups
				.iter()
				.all(|(name, group)| other.groups.get(name).is_some_and(|other| std::ptr::eq(*group, *other)))
	}
}

impl<'i> StyleableSet<'i> {
	/// Adds the styleable `name` if `index` declares it.
	fn include<I>(&mut self, index: &'i I, name: &str)
	where
		I: StyleableIndex + ?Sized,
	{
		match index.styleable(name) {
			Some(group) => {
				self.groups.insert(ResourceName::new(name), group);
			}
			None => trace!(name, package = %index.package_name(), "styleable not declared"),
		}
	}
	/// Names of the contained styleables, sorted.
	pub fn names(&self) -> BTreeSet<&'static str> {
		self.groups.keys().map(|name| name.as_str()).collect()
	}
}

/// What a tag name resolves to.
#[derive(Debug, Clone, Copy)]
pub enum WidgetClass<'w, 'd> {
	Known(&'w WidgetDescriptor),
	/// A dotted tag the widget table does not know; its simple name is used
	/// directly as the styleable name.
	Convention(&'d str),
	Unresolved,
}

pub fn classify<'w, 'd, W>(widgets: &'w W, tag: &'d str) -> WidgetClass<'w, 'd>
where
	W: WidgetTable + ?Sized,
{
	let qualified = tag.contains('.');
	match widgets.lookup(tag) {
		Some(widget) => WidgetClass::Known(widget),
		None if qualified => WidgetClass::Convention(simple_name(tag)),
		None => WidgetClass::Unresolved,
	}
}

#[inline]
fn is_root_container(class: &str) -> bool {
	class == ROOT_CONTAINER || class == ROOT_CONTAINER_NAME
}

pub struct HierarchyResolver<'w, W: ?Sized> {
	widgets: &'w W,
}

impl<'w, W> HierarchyResolver<'w, W>
where
	W: WidgetTable + ?Sized,
{
	pub fn new(widgets: &'w W) -> Self {
		HierarchyResolver { widgets }
	}

	/// Every styleable of `index` that applies to `node`.
	///
	/// An undotted tag the widget table does not know resolves to nothing,
	/// parent or not.
	pub fn resolve<'i, I>(&self, document: &Document, node: NodeId, index: &'i I) -> StyleableSet<'i>
	where
		I: StyleableIndex + ?Sized,
	{
		let mut out = StyleableSet::default();
		let tag = document[node].tag.as_str();
		match classify(self.widgets, tag) {
			WidgetClass::Unresolved => {
				trace!(tag, "unknown widget, no styleables");
				return out;
			}
			WidgetClass::Known(widget) => {
				out.include(index, BASE_STYLEABLE);
				out.include(index, &widget.simple_name);
				let mut margins_seen = false;
				for class in superclass_chain(self.widgets, widget) {
					out.include(index, simple_name(class));
					if !margins_seen && is_root_container(class) {
						out.include(index, CONTAINER_MARGIN_LAYOUT);
						margins_seen = true;
					}
				}
			}
			WidgetClass::Convention(name) => {
				out.include(index, BASE_STYLEABLE);
				out.include(index, name);
			}
		}

		if let Some(parent) = document[node].parent {
			out.include(index, CONTAINER_LAYOUT);
			out.include(index, CONTAINER_MARGIN_LAYOUT);
			match classify(self.widgets, &document[parent].tag) {
				WidgetClass::Known(container) => self.layout_params(container, index, &mut out),
				WidgetClass::Convention(_) | WidgetClass::Unresolved => {
					trace!(parent = %document[parent].tag, "unknown container, base layout params only");
				}
			}
		}

		trace!(tag, package = %index.package_name(), groups = out.len(), "resolved styleables");
		out
	}

	/// Layout-parameter styleables a container offers its direct children.
	/// Grandparents are never consulted.
	fn layout_params<'i, I>(&self, container: &WidgetDescriptor, index: &'i I, out: &mut StyleableSet<'i>)
	where
		I: StyleableIndex + ?Sized,
	{
		let chain = superclass_chain(self.widgets, container);
		let classes = std::iter::once(container.simple_name.as_str()).chain(chain.into_iter().map(simple_name));
		for class in classes {
			out.include(index, &format!("{class}{LAYOUT_SUFFIX}"));
			out.include(index, &format!("{class}{MARGIN_LAYOUT_SUFFIX}"));
		}
	}
}
