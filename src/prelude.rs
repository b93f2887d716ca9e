//! Useful common imports.

pub use anyhow::{Context, anyhow};
pub use ropey::Rope;
pub use serde::{Deserialize, Serialize};
pub use tracing::{debug, error, info, instrument, trace, warn};

pub use crate::completion::{CompletionCandidate, CompletionContext, CompletionList, complete};
pub use crate::document::{Document, NodeId};
pub use crate::error::CompletionError;
pub use crate::matcher::{CamelHumpMatcher, Match, Matcher};
pub use crate::project::Project;
pub use crate::symbol::{_G, _I, _R, Symbol};
pub use crate::utils::*;
pub use crate::view::{LayoutView, ViewTree};
pub use crate::{errloc, format_loc, loc, ok};
