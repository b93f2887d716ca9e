//! A view tree over layout documents, with `<include>` layouts spliced in.
//!
//! An included layout is represented by an [IncludeView] wrapping the root of
//! the included layout. The wrapper is transparent: attributes written on the
//! `<include>` tag land on the included root, and printing shows the included
//! root in place of the tag.

use std::collections::HashMap;
use std::fmt::{self, Write};

use tracing::{debug, warn};

use crate::document::{Document, NodeId};

pub const INCLUDE_TAG: &str = "include";
pub const LAYOUT_REFERENCE: &str = "@layout/";
/// Nesting bound for includes, which also stops self-including layouts.
pub const MAX_INCLUDE_DEPTH: usize = 8;

pub trait LayoutView {
	fn apply_attribute(&mut self, name: &str, value: &str);
	fn print_hierarchy(&self, out: &mut dyn Write, depth: usize) -> fmt::Result;
}

/// A view built directly from an element.
#[derive(Default)]
pub struct ElementView {
	pub tag: String,
	pub attributes: Vec<(String, String)>,
	pub children: Vec<Box<dyn LayoutView>>,
}

impl ElementView {
	pub fn new(tag: impl Into<String>) -> Self {
		ElementView {
			tag: tag.into(),
			..Default::default()
		}
	}
}

impl LayoutView for ElementView {
	/// Later values replace earlier ones.
	fn apply_attribute(&mut self, name: &str, value: &str) {
		match self.attributes.iter_mut().find(|(key, _)| key == name) {
			Some((_, existing)) => *existing = value.to_string(),
			None => self.attributes.push((name.to_string(), value.to_string())),
		}
	}
	fn print_hierarchy(&self, out: &mut dyn Write, depth: usize) -> fmt::Result {
		write!(out, "{:indent$}{}", "", self.tag, indent = depth * 2)?;
		for (name, value) in &self.attributes {
			write!(out, " {name}={value:?}")?;
		}
		writeln!(out)?;
		for child in &self.children {
			child.print_hierarchy(out, depth + 1)?;
		}
		Ok(())
	}
}

/// Stands in for an `<include>` tag and forwards everything to the included root.
pub struct IncludeView {
	inner: Box<dyn LayoutView>,
}

impl IncludeView {
	pub fn new(inner: Box<dyn LayoutView>) -> Self {
		IncludeView { inner }
	}
}

impl LayoutView for IncludeView {
	#[inline]
	fn apply_attribute(&mut self, name: &str, value: &str) {
		self.inner.apply_attribute(name, value)
	}
	#[inline]
	fn print_hierarchy(&self, out: &mut dyn Write, depth: usize) -> fmt::Result {
		self.inner.print_hierarchy(out, depth)
	}
}

/// Finds layouts by the name used in `@layout/name`.
pub trait LayoutSource {
	fn layout(&self, name: &str) -> Option<&Document>;
}

impl LayoutSource for HashMap<String, Document> {
	fn layout(&self, name: &str) -> Option<&Document> {
		self.get(name)
	}
}

pub struct ViewTree<'s, S: ?Sized> {
	source: &'s S,
}

impl<'s, S> ViewTree<'s, S>
where
	S: LayoutSource + ?Sized,
{
	/// Builds the views of `document`, or [None] if it has no elements.
	pub fn build(document: &Document, source: &'s S) -> Option<Box<dyn LayoutView>> {
		let tree = ViewTree { source };
		let root = document.root()?;
		Some(tree.build_node(document, root, 0))
	}

	fn build_node(&self, document: &Document, node: NodeId, depth: usize) -> Box<dyn LayoutView> {
		let element = &document[node];
		if element.tag == INCLUDE_TAG
			&& let Some(included) = self.include(document, node, depth)
		{
			return included;
		}

		let mut view = ElementView::new(&element.tag);
		for attr in element.attributes.iter().filter(|attr| !attr.is_namespace_declaration()) {
			view.apply_attribute(&attr.name(), &attr.value);
		}
		for child in &element.children {
			view.children.push(self.build_node(document, *child, depth));
		}
		Box::new(view)
	}

	/// Splices in the layout named by the `layout` attribute of an `<include>`.
	fn include(&self, document: &Document, node: NodeId, depth: usize) -> Option<Box<dyn LayoutView>> {
		let element = &document[node];
		let reference = element.attributes.iter().find(|attr| attr.name() == "layout")?;
		let Some(name) = reference.value.strip_prefix(LAYOUT_REFERENCE) else {
			debug!(value = %reference.value, "include does not reference a layout");
			return None;
		};
		if depth >= MAX_INCLUDE_DEPTH {
			warn!(name, "includes nested too deeply, leaving include unexpanded");
			return None;
		}
		let Some(included) = self.source.layout(name) else {
			debug!(name, "included layout not available");
			return None;
		};
		let root = included.root()?;
		let mut view = IncludeView::new(self.build_node(included, root, depth + 1));
		for attr in &element.attributes {
			if attr.name() != "layout" && !attr.is_namespace_declaration() {
				view.apply_attribute(&attr.name(), &attr.value);
			}
		}
		Some(Box::new(view))
	}
}

/// Prints `view` and everything below it.
pub fn render(view: &dyn LayoutView) -> Result<String, fmt::Error> {
	let mut out = String::new();
	view.print_hierarchy(&mut out, 0)?;
	Ok(out)
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn layouts(entries: &[(&str, &str)]) -> HashMap<String, Document> {
		entries
			.iter()
			.map(|(name, xml)| (name.to_string(), Document::parse(xml).unwrap()))
			.collect()
	}

	#[test]
	fn test_plain_tree() {
		let document = Document::parse(r#"<LinearLayout a:orientation="vertical"><Button a:text="Go" /><TextView /></LinearLayout>"#).unwrap();
		let view = ViewTree::build(&document, &layouts(&[])).unwrap();
		assert_eq!(
			render(view.as_ref()).unwrap(),
			"LinearLayout a:orientation=\"vertical\"\n  Button a:text=\"Go\"\n  TextView\n"
		);
	}

	#[test]
	fn test_include_forwards_attributes() {
		let source = layouts(&[("toolbar", r#"<FrameLayout a:id="@+id/bar"><ImageView /></FrameLayout>"#)]);
		let document = Document::parse(
			r#"<LinearLayout><include layout="@layout/toolbar" a:id="@+id/top" a:layout_height="48dp" /></LinearLayout>"#,
		)
		.unwrap();
		let view = ViewTree::build(&document, &source).unwrap();
		assert_eq!(
			render(view.as_ref()).unwrap(),
			"LinearLayout\n  FrameLayout a:id=\"@+id/top\" a:layout_height=\"48dp\"\n    ImageView\n"
		);
	}

	#[test]
	fn test_unknown_include_stays_element() {
		let document = Document::parse(r#"<LinearLayout><include layout="@layout/missing" /></LinearLayout>"#).unwrap();
		let view = ViewTree::build(&document, &layouts(&[])).unwrap();
		assert_eq!(
			render(view.as_ref()).unwrap(),
			"LinearLayout\n  include layout=\"@layout/missing\"\n"
		);
	}

	#[test]
	fn test_self_include_terminates() {
		let source = layouts(&[("loop", r#"<FrameLayout><include layout="@layout/loop" /></FrameLayout>"#)]);
		let view = ViewTree::build(&source["loop"], &source).unwrap();
		let rendered = render(view.as_ref()).unwrap();
		assert_eq!(rendered.matches("FrameLayout").count(), MAX_INCLUDE_DEPTH + 1);
		assert!(rendered.trim_end().ends_with("include layout=\"@layout/loop\""));
	}

	#[test]
	fn test_wrapper_is_transparent() {
		let mut direct = ElementView::new("Button");
		direct.apply_attribute("a:text", "Go");
		let mut wrapped = IncludeView::new(Box::new(ElementView::new("Button")));
		wrapped.apply_attribute("a:text", "Go");
		assert_eq!(render(&direct).unwrap(), render(&wrapped).unwrap());
	}
}
