//! A read-only element tree over a layout document, built with [xmlparser].
//!
//! Only start tags are modelled: completion never needs text nodes, and every
//! offset query is answered against start-tag spans.

use std::ops::{Index, Range};

use ropey::Rope;
use tracing::warn;
use xmlparser::{ElementEnd, StrSpan, Token, Tokenizer};

use crate::error::CompletionError;
use crate::utils::{Position, position_to_offset};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
	#[inline]
	fn index(self) -> usize {
		self.0 as usize
	}
}

#[derive(Debug)]
pub struct Element {
	/// The tag as written, e.g. `Button` or `com.example.CustomView`.
	pub tag: String,
	/// From `<` up to and including the closing `>` or `/>` of the start tag.
	pub span: Range<usize>,
	pub attributes: Vec<Attribute>,
	pub parent: Option<NodeId>,
	pub children: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Attribute {
	pub prefix: String,
	pub local: String,
	pub value: String,
	pub name_span: Range<usize>,
	pub span: Range<usize>,
}

impl Attribute {
	/// The attribute name as written, including its prefix.
	pub fn name(&self) -> String {
		if self.prefix.is_empty() {
			self.local.clone()
		} else {
			format!("{}:{}", self.prefix, self.local)
		}
	}
	#[inline]
	pub fn is_namespace_declaration(&self) -> bool {
		self.prefix == "xmlns" || (self.prefix.is_empty() && self.local == "xmlns")
	}
}

#[derive(Debug, Default)]
pub struct Document {
	elements: Vec<Element>,
}

impl Index<NodeId> for Document {
	type Output = Element;
	#[inline]
	fn index(&self, id: NodeId) -> &Self::Output {
		&self.elements[id.index()]
	}
}

impl Document {
	/// Builds the element tree.
	///
	/// A tokenizer error after at least one element keeps the tree built so far,
	/// since a document being edited is rarely well-formed past the cursor.
	pub fn parse(text: &str) -> Result<Self, CompletionError> {
		let mut elements: Vec<Element> = vec![];
		let mut stack: Vec<NodeId> = vec![];
		for token in Tokenizer::from(text) {
			match token {
				Ok(Token::ElementStart { prefix, local, span }) => {
					let id = NodeId(elements.len() as u32);
					let parent = stack.last().copied();
					elements.push(Element {
						tag: qualify(prefix, local),
						span: span.start()..span.end(),
						attributes: vec![],
						parent,
						children: vec![],
					});
					if let Some(parent) = parent {
						elements[parent.index()].children.push(id);
					}
					stack.push(id);
				}
				Ok(Token::Attribute {
					prefix,
					local,
					value,
					span,
				}) => {
					let Some(current) = stack.last() else { continue };
					let name_start = if prefix.is_empty() { local.start() } else { prefix.start() };
					let element = &mut elements[current.index()];
					element.span.end = span.end();
					element.attributes.push(Attribute {
						prefix: prefix.to_string(),
						local: local.to_string(),
						value: value.to_string(),
						name_span: name_start..local.end(),
						span: span.start()..span.end(),
					});
				}
				Ok(Token::ElementEnd { end, span }) => match end {
					ElementEnd::Open => {
						if let Some(current) = stack.last() {
							elements[current.index()].span.end = span.end();
						}
					}
					ElementEnd::Empty => {
						if let Some(current) = stack.pop() {
							elements[current.index()].span.end = span.end();
						}
					}
					ElementEnd::Close(..) => {
						stack.pop();
					}
				},
				Err(err) => {
					let pos = err.pos();
					let position = Position {
						line: pos.row.saturating_sub(1) as usize,
						character: pos.col.saturating_sub(1) as usize,
					};
					let offset = position_to_offset(position, &Rope::from_str(text)).unwrap_or(text.len());
					if elements.is_empty() {
						return Err(CompletionError::Malformed {
							message: err.to_string(),
							span: (offset, 0).into(),
						});
					}
					warn!("layout is malformed past offset {offset}: {err}");
					break;
				}
				Ok(_) => {}
			}
		}
		Ok(Document { elements })
	}

	#[inline]
	pub fn root(&self) -> Option<NodeId> {
		(!self.elements.is_empty()).then_some(NodeId(0))
	}

	/// Every element in document order.
	pub fn nodes(&self) -> impl Iterator<Item = NodeId> + use<> {
		(0..self.elements.len() as u32).map(NodeId)
	}

	pub fn len(&self) -> usize {
		self.elements.len()
	}

	pub fn is_empty(&self) -> bool {
		self.elements.is_empty()
	}

	/// The element whose start tag contains `offset`.
	pub fn find_node_at(&self, offset: usize) -> Option<NodeId> {
		// Start tags never overlap, so the first hit is the only one.
		self.elements
			.iter()
			.position(|element| element.span.start < offset && offset <= element.span.end)
			.map(|idx| NodeId(idx as u32))
	}

	/// The attribute whose name contains `offset`, or ends exactly at it.
	pub fn find_attribute_at(&self, offset: usize) -> Option<(NodeId, usize)> {
		let node = self.find_node_at(offset)?;
		let attr = self[node]
			.attributes
			.iter()
			.position(|attr| attr.name_span.start <= offset && offset <= attr.name_span.end)?;
		Some((node, attr))
	}

	/// Iterates from `node` up to the document root, `node` included.
	pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
		std::iter::successors(Some(node), |id| self[*id].parent)
	}

	/// Resolves `prefix` against the nearest `xmlns:prefix` at or above `node`.
	///
	/// An empty prefix never resolves: unprefixed attributes carry no namespace.
	pub fn namespace_uri(&self, node: NodeId, prefix: &str) -> Option<&str> {
		if prefix.is_empty() {
			return None;
		}
		self.ancestors(node).find_map(|id| {
			self[id]
				.attributes
				.iter()
				.find(|attr| attr.prefix == "xmlns" && attr.local == prefix)
				.map(|attr| attr.value.as_str())
		})
	}

	/// Every `(prefix, uri)` binding visible at `node`, nearest first.
	/// A prefix rebound closer to the node hides the outer binding.
	pub fn namespace_declarations(&self, node: NodeId) -> Vec<(&str, &str)> {
		let mut out: Vec<(&str, &str)> = vec![];
		for id in self.ancestors(node) {
			for attr in &self[id].attributes {
				if attr.prefix != "xmlns" {
					continue;
				}
				let prefix = attr.local.as_str();
				if !out.iter().any(|(seen, _)| *seen == prefix) {
					out.push((prefix, attr.value.as_str()));
				}
			}
		}
		out
	}
}

fn qualify(prefix: StrSpan, local: StrSpan) -> String {
	if prefix.is_empty() {
		local.to_string()
	} else {
		format!("{}:{}", prefix.as_str(), local.as_str())
	}
}
