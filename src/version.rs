pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_VERSION: &str = git_version::git_version!(args = ["--tags", "--candidates=0"], fallback = "");
const GIT_DESCRIBE: &str = git_version::git_version!(fallback = "unknown");
pub const GITVER: &str = if GIT_VERSION.is_empty() { GIT_DESCRIBE } else { GIT_VERSION };
