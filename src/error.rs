use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// The only failures a completion request can surface.
///
/// Missing widgets, styleables or resource tables are not errors; they simply
/// contribute nothing.
#[derive(Debug, Error, Diagnostic)]
pub enum CompletionError {
	#[error("no attribute name at offset {offset}")]
	#[diagnostic(
		code(layout_attrs::invalid_request),
		help("completions must be requested inside or at the end of an attribute name")
	)]
	InvalidRequest {
		offset: usize,
		#[label("requested here")]
		span: SourceSpan,
	},
	#[error("could not parse layout: {message}")]
	#[diagnostic(code(layout_attrs::malformed))]
	Malformed {
		message: String,
		#[label("parsing stopped here")]
		span: SourceSpan,
	},
}

impl CompletionError {
	pub fn invalid_request(offset: usize) -> Self {
		CompletionError::InvalidRequest {
			offset,
			span: (offset, 0).into(),
		}
	}
}
