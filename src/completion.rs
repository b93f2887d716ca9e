//! Attribute completions for the attribute name under the cursor.
//!
//! A request flows one way: the namespace of the typed attribute picks the
//! packages to search ([`namespace`](crate::namespace)), each package yields the
//! styleables applicable to the node ([`hierarchy`](crate::hierarchy)), and the
//! attributes of those styleables are filtered against the typed text here.

use std::cmp::Reverse;
use std::collections::HashSet;

use tracing::{debug, instrument};

use crate::config::CompletionsConfig;
use crate::document::{Attribute, Document};
use crate::error::CompletionError;
use crate::hierarchy::{HierarchyResolver, StyleableSet};
use crate::matcher::{Match, Matcher};
use crate::namespace::{fan_out, targets_for_namespace};
use crate::resource::{AttrFormat, PackageName, ResourceRegistry};
use crate::utils::MaxVec;
use crate::widget::WidgetTable;

/// Inserted at the cursor so a half-typed attribute still tokenizes.
pub const CARET_MARKER: &str = "LayoutAttrsCaret";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionCandidate {
	pub name: String,
	/// Namespace prefix to insert, empty for unprefixed attributes.
	pub prefix: String,
	pub package: PackageName,
	pub format: AttrFormat,
	pub quality: Match,
}

impl CompletionCandidate {
	pub fn label(&self) -> String {
		qualified(&self.prefix, &self.name)
	}
}

#[derive(Debug, Default)]
pub struct CompletionList {
	pub items: Vec<CompletionCandidate>,
	/// More candidates matched than the configured limit allows.
	pub is_incomplete: bool,
}

/// What the typed text is matched against.
#[derive(Clone, Copy, Debug)]
pub enum Needle<'a> {
	/// The prefix is bound to a namespace: match the bare attribute name.
	Local(&'a str),
	/// No namespace yet: match `prefix:name` or the bare name, whichever is better.
	Unqualified(&'a str),
}

/// Everything a request reads. Nothing in here is mutated.
pub struct CompletionContext<'a> {
	pub widgets: &'a dyn WidgetTable,
	pub resources: &'a ResourceRegistry,
	pub matcher: &'a dyn Matcher,
	pub config: CompletionsConfig,
}

fn qualified(prefix: &str, name: &str) -> String {
	if prefix.is_empty() {
		name.to_string()
	} else {
		format!("{prefix}:{name}")
	}
}

/// Turns every attribute of `groups` that matches `needle` into a candidate.
///
/// Attributes sharing a name are all kept, even within one package.
pub fn assemble<M>(groups: &StyleableSet<'_>, needle: Needle<'_>, prefix: &str, matcher: &M) -> Vec<CompletionCandidate>
where
	M: Matcher + ?Sized,
{
	let mut out = vec![];
	for group in groups.values() {
		for attr in &group.attributes {
			let quality = match needle {
				Needle::Local(typed) => matcher.classify(&attr.name, typed),
				Needle::Unqualified(typed) => {
					let label = qualified(prefix, &attr.name);
					matcher.classify(&label, typed).max(matcher.classify(&attr.name, typed))
				}
			};
			if quality == Match::None {
				continue;
			}
			out.push(CompletionCandidate {
				name: attr.name.clone(),
				prefix: prefix.to_string(),
				package: attr.package,
				format: attr.format,
				quality,
			});
		}
	}
	out
}

/// A document with [`CARET_MARKER`] spliced in at the cursor.
#[derive(Debug)]
pub struct CompletionRequest {
	pub text: String,
	/// The cursor, which is also where the marker starts.
	pub offset: usize,
}

#[inline]
fn is_name_char(ch: char) -> bool {
	ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.' | ':')
}

impl CompletionRequest {
	/// Inserts the marker at `offset`, followed by `=""` unless the name under
	/// the cursor already has a value.
	pub fn prepare(text: &str, offset: usize) -> Result<Self, CompletionError> {
		if !text.is_char_boundary(offset) {
			return Err(CompletionError::invalid_request(offset));
		}
		let (head, rest) = text.split_at(offset);
		let name_end = rest.find(|ch: char| !is_name_char(ch)).unwrap_or(rest.len());
		let (name_tail, rest) = rest.split_at(name_end);
		let has_value = rest.trim_start().starts_with('=');

		let mut prepared = String::with_capacity(text.len() + CARET_MARKER.len() + 4);
		prepared.push_str(head);
		prepared.push_str(CARET_MARKER);
		prepared.push_str(name_tail);
		if !has_value {
			prepared.push_str("=\"\" ");
		}
		prepared.push_str(rest);
		Ok(CompletionRequest { text: prepared, offset })
	}
}

/// Completes the attribute name at `offset` in the unprepared `text`.
#[instrument(skip_all, fields(offset = offset))]
pub fn complete(text: &str, offset: usize, ctx: &CompletionContext<'_>) -> Result<CompletionList, CompletionError> {
	let request = CompletionRequest::prepare(text, offset)?;
	let document = Document::parse(&request.text)?;
	complete_in(&document, request.offset, ctx)
}

/// Completes the attribute name at `offset` in an already parsed document.
///
/// Everything from the start of the name up to `offset` counts as typed.
pub fn complete_in(
	document: &Document,
	offset: usize,
	ctx: &CompletionContext<'_>,
) -> Result<CompletionList, CompletionError> {
	let Some((node, attr_idx)) = document.find_attribute_at(offset) else {
		debug!(offset, "no attribute at offset");
		return Err(CompletionError::invalid_request(offset));
	};
	let attributes = &document[node].attributes;
	let attr = &attributes[attr_idx];
	let name = attr.name();
	let Some(typed) = name.get(..offset - attr.name_span.start) else {
		return Err(CompletionError::invalid_request(offset));
	};

	let resolver = HierarchyResolver::new(ctx.widgets);
	let mut candidates = vec![];
	let bound = match typed.split_once(':') {
		Some((prefix, local)) => document.namespace_uri(node, prefix).map(|uri| (prefix, uri, local)),
		None => None,
	};
	match bound {
		Some((prefix, uri, local)) => {
			for target in targets_for_namespace(uri, prefix, ctx.resources) {
				let groups = resolver.resolve(document, node, target.package);
				candidates.extend(assemble(&groups, Needle::Local(local), &target.prefix, ctx.matcher));
			}
		}
		None => {
			for target in fan_out(document, node, ctx.resources) {
				let groups = resolver.resolve(document, node, target.package);
				candidates.extend(assemble(&groups, Needle::Unqualified(typed), &target.prefix, ctx.matcher));
			}
		}
	}

	debug!(
		tag = %document[node].tag,
		typed,
		candidates = candidates.len(),
		"assembled completions"
	);
	Ok(finish(candidates, attributes, attr_idx, &ctx.config))
}

/// Downstream filtering: drops attributes already set, ranks, de-duplicates
/// and truncates.
fn finish(
	mut candidates: Vec<CompletionCandidate>,
	attributes: &[Attribute],
	current: usize,
	config: &CompletionsConfig,
) -> CompletionList {
	if config.skip_existing {
		let present = attributes
			.iter()
			.enumerate()
			.filter(|(idx, attr)| *idx != current && !attr.is_namespace_declaration())
			.map(|(_, attr)| attr.name())
			.collect::<HashSet<_>>();
		candidates.retain(|candidate| !present.contains(&candidate.label()));
	}
	candidates.sort_by_cached_key(|candidate| (Reverse(candidate.quality), candidate.label(), candidate.package));
	if config.dedup {
		candidates.dedup_by(|next, prev| {
			next.prefix == prev.prefix && next.name == prev.name && next.package == prev.package
		});
	}
	let mut items = MaxVec::new(config.limit);
	items.extend(candidates);
	CompletionList {
		is_incomplete: items.overflowed(),
		items: items.into_inner(),
	}
}
