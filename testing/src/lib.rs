//! Fixture-driven tests. Each directory under `fixtures/` is a project whose
//! layouts carry their expected completions in `<!-- ^complete ... -->` comments.

#[cfg(test)]
mod tests;
