use core::fmt::Display;

use ropey::Rope;

/// Early return, with optional message passed to [`format_loc`](crate::format_loc!).
#[macro_export]
macro_rules! ok {
    ($res:expr $(,)?) => {
    	anyhow::Context::context($res, concat!($crate::loc!(), " ", stringify!($res)))?
    };
    ($res:expr, $($tt:tt)+) => {
		anyhow::Context::with_context($res, || $crate::format_loc!($($tt)+))?
    }
}

#[macro_export]
macro_rules! loc {
	() => {
		concat!("[", file!(), ":", line!(), ":", column!(), "]")
	};
}

#[macro_export]
macro_rules! errloc {
	($msg:literal $(, $($tt:tt)* )?) => {
		::anyhow::anyhow!(concat!($crate::loc!(), " ", $msg) $(, $($tt)* )?)
	}
}

/// [format] preceded with file location information.
/// If no arguments are passed, a string literal is returned.
#[macro_export]
macro_rules! format_loc {
	($tpl:literal) => {
		concat!($crate::loc!(), " ", $tpl)
	};
	($tpl:literal $($tt:tt)*) => {
		format!($crate::format_loc!($tpl) $($tt)*)
	};
}

/// A [Vec] that silently drops items past its limit.
#[derive(Debug)]
pub struct MaxVec<T> {
	items: Vec<T>,
	limit: usize,
	dropped: usize,
}

impl<T> MaxVec<T> {
	pub fn new(limit: usize) -> Self {
		MaxVec {
			items: Vec::with_capacity(limit.min(256)),
			limit,
			dropped: 0,
		}
	}
	#[inline]
	fn remaining_space(&self) -> usize {
		self.limit.saturating_sub(self.items.len())
	}
	#[inline]
	pub fn has_space(&self) -> bool {
		self.remaining_space() > 0
	}
	/// Whether any item was refused because the limit was reached.
	#[inline]
	pub fn overflowed(&self) -> bool {
		self.dropped > 0
	}
	pub fn extend(&mut self, items: impl IntoIterator<Item = T>) {
		for item in items {
			self.push_checked(item);
		}
	}
	pub fn push_checked(&mut self, item: T) {
		if self.has_space() {
			self.items.push(item);
		} else {
			self.dropped += 1;
		}
	}
	#[inline]
	pub fn into_inner(self) -> Vec<T> {
		self.items
	}
}

impl<T> std::ops::Deref for MaxVec<T> {
	type Target = Vec<T>;
	#[inline]
	fn deref(&self) -> &Self::Target {
		&self.items
	}
}

/// Zero-based line and character (in chars) within a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
	pub line: usize,
	pub character: usize,
}

impl Display for Position {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}:{}", self.line + 1, self.character + 1)
	}
}

/// Converts a [Position] to a byte offset, or [None] if it lies outside the rope.
pub fn position_to_offset(position: Position, rope: &Rope) -> Option<usize> {
	let line_start = rope.try_line_to_char(position.line).ok()?;
	let line_len = rope.get_line(position.line)?.len_chars();
	if position.character > line_len {
		return None;
	}
	rope.try_char_to_byte(line_start + position.character).ok()
}

pub fn offset_to_position(offset: usize, rope: &Rope) -> Option<Position> {
	let char_offset = rope.try_byte_to_char(offset).ok()?;
	let line = rope.try_char_to_line(char_offset).ok()?;
	let line_start = rope.try_line_to_char(line).ok()?;
	Some(Position {
		line,
		character: char_offset - line_start,
	})
}

/// The segment after the last `.`, or the whole name if unqualified.
#[inline]
pub fn simple_name(name: &str) -> &str {
	name.rsplit_once('.').map(|(_, simple)| simple).unwrap_or(name)
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn test_max_vec_overflow() {
		let mut items = MaxVec::new(2);
		items.extend([1, 2, 3]);
		assert!(items.overflowed());
		assert_eq!(items.into_inner(), vec![1, 2]);
	}

	#[test]
	fn test_position_roundtrip_multibyte() {
		let rope = Rope::from_str("<a>\n  é<b x=\"\"/>\n");
		let offset = position_to_offset(Position { line: 1, character: 4 }, &rope).unwrap();
		assert_eq!(&rope.to_string()[offset..offset + 2], "b ");
		assert_eq!(
			offset_to_position(offset, &rope),
			Some(Position { line: 1, character: 4 })
		);
	}

	#[test]
	fn test_position_out_of_line() {
		let rope = Rope::from_str("ab\ncd");
		assert_eq!(position_to_offset(Position { line: 0, character: 9 }, &rope), None);
		assert_eq!(position_to_offset(Position { line: 7, character: 0 }, &rope), None);
	}

	#[test]
	fn test_simple_name() {
		assert_eq!(simple_name("android.widget.Button"), "Button");
		assert_eq!(simple_name("Button"), "Button");
	}
}
