use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Once;

use layout_attrs::completion::{CompletionCandidate, complete};
use layout_attrs::matcher::CamelHumpMatcher;
use layout_attrs::project::Project;
use layout_attrs::utils::{Position, offset_to_position, position_to_offset};
use pretty_assertions::Comparison;
use rstest::*;
use ropey::Rope;

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
	TRACING_INIT.call_once(|| {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::builder().parse_lossy("warn,layout_attrs=trace"))
			.with_test_writer()
			.init();
	});
}

#[rstest]
fn fixture_test(#[files("fixtures/*/project.json")] project: PathBuf) {
	init_tracing();
	let root = project.parent().unwrap();
	let project = match Project::load(&project) {
		Ok(project) => project,
		Err(err) => panic!("failed to load {}: {err:#}", root.display()),
	};
	let matcher = CamelHumpMatcher;
	let context = project.context(&matcher);

	let mut diffs = vec![];
	for (path, expected) in gather_expected(root) {
		let text = std::fs::read_to_string(&path).unwrap();
		let rope = Rope::from_str(&text);
		for (position, expected) in expected.complete {
			let Some(offset) = position_to_offset(position, &rope) else {
				diffs.push(format!("[complete] {position} is outside of {}", path.display()));
				continue;
			};
			match complete(&text, offset, &context) {
				Ok(list) => {
					let actual = list.items.iter().map(CompletionCandidate::label).collect::<Vec<_>>();
					if expected[..] != actual[..] {
						diffs.push(format!(
							"[complete] in {}:{position}\n{}",
							path.display(),
							Comparison::new(&expected[..], &actual[..]),
						));
					}
				}
				Err(err) => diffs.push(format!(
					"[complete] failed to get completions: {err:?}\n\tat {}:{position}",
					path.display()
				)),
			}
		}
	}

	let message = diffs.join("\n");
	let message = message.trim_ascii();
	assert!(message.is_empty(), "{message}");
}

#[derive(Default)]
struct Expected {
	complete: Vec<(Position, Vec<String>)>,
}

/// Collects `^complete` comments. The caret marks a column on the line above.
fn gather_expected(root: &Path) -> BTreeMap<PathBuf, Expected> {
	let pattern = root.join("**/*.xml").to_string_lossy().into_owned();
	let mut expected = BTreeMap::<_, Expected>::new();

	for file in globwalk::glob(&pattern).unwrap() {
		let Ok(file) = file else { continue };
		let contents = std::fs::read_to_string(file.path()).unwrap();
		let rope = Rope::from_str(&contents);
		let expected = expected.entry(file.into_path()).or_default();

		for (start, _) in contents.match_indices("<!--") {
			let body = &contents[start + 4..];
			let Some(end) = body.find("-->") else { continue };
			let body = &body[..end];
			let Some(idx) = body.find('^') else { continue };
			let Some(labels) = body[idx..].trim_ascii_end().strip_prefix("^complete") else {
				continue;
			};
			let caret = offset_to_position(start + 4 + idx, &rope).unwrap();
			let position = Position {
				line: caret.line - 1,
				character: caret.character,
			};
			let labels = labels.split_ascii_whitespace().map(String::from).collect();
			expected.complete.push((position, labels));
		}
	}

	expected
}
