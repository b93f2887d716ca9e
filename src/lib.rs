pub mod completion;
pub mod config;
pub mod document;
pub mod error;
pub mod hierarchy;
pub mod matcher;
pub mod namespace;
pub mod prelude;
pub mod project;
pub mod resource;
pub mod symbol;
pub mod utils;
pub mod view;
pub mod widget;

mod version;
pub use version::{GIT_VERSION, GITVER, NAME, VERSION};
