use std::any::type_name;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::OnceLock;

use lasso::{Spur, ThreadedRodeo};

/// Type-safe wrapper around [Spur].
///
/// Package names and resource names are interned once and compared by key,
/// which keeps [`StyleableSet`](crate::hierarchy::StyleableSet) membership cheap.
#[repr(transparent)]
pub struct Symbol<T> {
	inner: Spur,
	_kind: PhantomData<T>,
}

impl<T> Symbol<T> {
	#[inline]
	pub fn new<S: AsRef<str>>(name: S) -> Self {
		_I(name).into()
	}
	/// Returns the symbol only if `name` was interned before.
	#[inline]
	pub fn get<S: AsRef<str>>(name: S) -> Option<Self> {
		_G(name).map(Self::from)
	}
	#[inline]
	pub fn as_str(&self) -> &'static str {
		_R(self.inner)
	}
}

impl<T> Debug for Symbol<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let tpath = type_name::<T>();
		let name = tpath.rsplit_once("::").map(|(_, last)| last).unwrap_or(tpath);
		f.debug_tuple(&format!("Symbol<{name}>"))
			.field(&interner().resolve(&self.inner))
			.finish()
	}
}

impl<T> Display for Symbol<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl<T> From<Spur> for Symbol<T> {
	#[inline]
	fn from(inner: Spur) -> Self {
		Symbol {
			inner,
			_kind: PhantomData,
		}
	}
}

impl<T> From<Symbol<T>> for Spur {
	#[inline]
	fn from(value: Symbol<T>) -> Self {
		value.inner
	}
}

impl<T> Clone for Symbol<T> {
	#[inline]
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Symbol<T> {}
impl<T> Eq for Symbol<T> {}
impl<T> PartialEq for Symbol<T> {
	#[inline]
	fn eq(&self, other: &Self) -> bool {
		self.inner.eq(&other.inner)
	}
}

impl<T> PartialOrd for Symbol<T> {
	#[inline]
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

/// Orders by the interned text, not by interning order.
impl<T> Ord for Symbol<T> {
	#[inline]
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.as_str().cmp(other.as_str())
	}
}

impl<T> Hash for Symbol<T> {
	#[inline]
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.inner.hash(state)
	}
}

impl<T> Deref for Symbol<T> {
	type Target = Spur;
	fn deref(&self) -> &Self::Target {
		&self.inner
	}
}

fn interner() -> &'static ThreadedRodeo {
	static INTERNER: OnceLock<ThreadedRodeo> = OnceLock::new();
	INTERNER.get_or_init(|| {
		let interner = ThreadedRodeo::default();
		let common_names = include_str!("common_names.txt").lines();
		for name in common_names {
			interner.get_or_intern_static(name);
		}
		interner
	})
}

#[inline]
#[allow(non_snake_case)]
#[doc(alias = "get_or_intern")]
pub fn _I<T: AsRef<str>>(string: T) -> Spur {
	fn impl_(string: &str) -> Spur {
		interner().get_or_intern(string)
	}
	impl_(string.as_ref())
}

#[inline]
#[allow(non_snake_case)]
#[doc(alias = "intern_resolve")]
pub fn _R<T: Into<Spur>>(token: T) -> &'static str {
	interner().resolve(&token.into())
}

#[inline]
#[allow(non_snake_case)]
#[doc(alias = "intern_get")]
pub fn _G<T: AsRef<str>>(string: T) -> Option<Spur> {
	fn impl_(string: &str) -> Option<Spur> {
		interner().get(string)
	}
	impl_(string.as_ref())
}
