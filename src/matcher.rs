//! Classifies how well a candidate name matches what has been typed.

/// Match levels, weakest first. Only [`Match::None`] removes a candidate;
/// the other levels are for ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Match {
	None,
	Partial,
	Prefix,
	Exact,
}

pub trait Matcher {
	fn classify(&self, candidate: &str, typed: &str) -> Match;
}

/// Case-sensitive prefix matching, falling back to case-insensitive prefixes
/// and camel humps (`tC` for `textColor`, `layout_mS` for `layout_marginStart`).
#[derive(Clone, Copy, Debug, Default)]
pub struct CamelHumpMatcher;

impl Matcher for CamelHumpMatcher {
	fn classify(&self, candidate: &str, typed: &str) -> Match {
		if typed.is_empty() {
			return Match::Prefix;
		}
		if candidate == typed {
			return Match::Exact;
		}
		if candidate.starts_with(typed) {
			return Match::Prefix;
		}
		if starts_with_ignore_case(candidate, typed) || humps_match(candidate, typed) {
			return Match::Partial;
		}
		Match::None
	}
}

fn starts_with_ignore_case(candidate: &str, typed: &str) -> bool {
	candidate
		.get(..typed.len())
		.is_some_and(|head| head.eq_ignore_ascii_case(typed))
}

/// Splits before every uppercase letter and after every `_` or `:`.
fn humps(text: &str) -> Vec<&str> {
	let mut out = vec![];
	let mut start = 0;
	for (idx, ch) in text.char_indices() {
		if ch.is_uppercase() && idx > start {
			out.push(&text[start..idx]);
			start = idx;
		} else if matches!(ch, '_' | ':') {
			out.push(&text[start..idx + 1]);
			start = idx + 1;
		}
	}
	if start < text.len() {
		out.push(&text[start..]);
	}
	out
}

/// Every typed hump must prefix a word of the candidate, in order, and the
/// first typed hump must prefix the first word.
fn humps_match(candidate: &str, typed: &str) -> bool {
	let words = humps(candidate);
	let mut words = words.iter();
	let typed = humps(typed);
	let mut typed = typed.iter();
	let (Some(first_word), Some(first_typed)) = (words.next(), typed.next()) else {
		return false;
	};
	if !first_word.starts_with(first_typed) {
		return false;
	}
	typed.all(|hump| words.any(|word| word.starts_with(hump)))
}
