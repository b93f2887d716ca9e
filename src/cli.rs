//! One-shot commands.

use std::collections::HashMap;
use std::path::Path;
use std::process::exit;

use fomat_macros::fomat;
use layout_attrs::prelude::*;
use layout_attrs::view::render;
use layout_attrs::{GITVER, NAME, VERSION};
use miette::{IntoDiagnostic, NamedSource, Report, WrapErr, miette};

#[derive(Default)]
pub struct Args<'a> {
	pub project: Option<&'a str>,
	pub includes: Vec<(&'a str, &'a str)>,
	pub log_format: LogFormat,
	pub command: Command<'a>,
}

#[derive(Default, Debug, PartialEq, Eq)]
pub enum Command<'a> {
	#[default]
	Help,
	Complete {
		target: &'a str,
	},
	Tree {
		layout: &'a str,
	},
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
	#[default]
	Compact,
	Json,
}

const HELP: &str = include_str!("../contrib/usage.txt");

pub fn parse_args<'r>(mut args: &[&'r str]) -> Args<'r> {
	let mut out = Args::default();
	loop {
		match args {
			["complete", rest @ ..] => {
				args = rest;
				out.command = Command::Complete { target: "" };
			}
			["tree", rest @ ..] => {
				args = rest;
				out.command = Command::Tree { layout: "" };
			}
			["-p" | "--project", path, rest @ ..] => {
				args = rest;
				out.project = Some(path);
			}
			["--include", include, rest @ ..] => {
				args = rest;
				match include.split_once('=') {
					Some(pair) => out.includes.push(pair),
					None => {
						eprintln!("--include expects <name>=<path>, got {include}");
						exit(1);
					}
				}
			}
			["--log-format", "json", rest @ ..] => {
				args = rest;
				out.log_format = LogFormat::Json;
			}
			["-h" | "--help", ..] => {
				eprintln!("{HELP}");
				exit(0);
			}
			["-v" | "--version", ..] => {
				eprintln!("{NAME} v{VERSION} git:{GITVER}");
				exit(0);
			}
			[positional, rest @ ..] if !positional.starts_with('-') => {
				args = rest;
				match &mut out.command {
					Command::Complete { target } if target.is_empty() => *target = *positional,
					Command::Tree { layout } if layout.is_empty() => *layout = *positional,
					_ => {
						eprintln!("unexpected argument {positional}\n\n{HELP}");
						exit(1);
					}
				}
			}
			[] => break,
			_ => {
				eprintln!("{HELP}");
				exit(1);
			}
		}
	}

	out
}

pub fn run(args: Args<'_>) -> miette::Result<()> {
	match args.command {
		Command::Help => {
			eprintln!("{HELP}");
			Ok(())
		}
		Command::Complete { target: "" } | Command::Tree { layout: "" } => {
			Err(miette!(help = HELP, "missing layout argument"))
		}
		Command::Complete { target } => {
			let project = args
				.project
				.ok_or_else(|| miette!(help = "pass --project <project.json>", "no project file given"))?;
			let project = Project::load(Path::new(project)).map_err(|err| miette!("{err:#}"))?;
			run_complete(&project, target)
		}
		Command::Tree { layout } => run_tree(layout, &args.includes),
	}
}

/// Splits `<path>:<line>:<column>`, with 1-based line and column.
fn parse_target(target: &str) -> Option<(&str, Position)> {
	let (rest, column) = target.rsplit_once(':')?;
	let (path, line) = rest.rsplit_once(':')?;
	let line = line.parse::<usize>().ok()?.checked_sub(1)?;
	let character = column.parse::<usize>().ok()?.checked_sub(1)?;
	Some((path, Position { line, character }))
}

fn read_layout(path: &str) -> miette::Result<(String, Document)> {
	let text = std::fs::read_to_string(path)
		.into_diagnostic()
		.wrap_err_with(|| format!("could not read {path}"))?;
	match Document::parse(&text) {
		Ok(document) => Ok((text, document)),
		Err(err) => Err(Report::new(err).with_source_code(NamedSource::new(path, text))),
	}
}

fn run_complete(project: &Project, target: &str) -> miette::Result<()> {
	let (path, position) = parse_target(target)
		.ok_or_else(|| miette!(help = "expected <layout.xml>:<line>:<column>", "invalid target {target}"))?;
	let text = std::fs::read_to_string(path)
		.into_diagnostic()
		.wrap_err_with(|| format!("could not read {path}"))?;
	let offset = position_to_offset(position, &Rope::from_str(&text))
		.ok_or_else(|| miette!("{position} is outside of {path}"))?;
	debug!(path, %position, offset, "completing");

	let matcher = CamelHumpMatcher;
	let list = match complete(&text, offset, &project.context(&matcher)) {
		Ok(list) => list,
		Err(err) => return Err(Report::new(err).with_source_code(NamedSource::new(path, text))),
	};
	let out = fomat!(
		for item in &list.items {
			(item.label()) "\t" (item.package) "\t" (item.format) "\n"
		}
		if list.is_incomplete {
			"(more candidates omitted)\n"
		}
	);
	print!("{out}");
	Ok(())
}

fn run_tree(layout: &str, includes: &[(&str, &str)]) -> miette::Result<()> {
	let mut layouts = HashMap::new();
	for (name, path) in includes {
		let (_, document) = read_layout(path)?;
		layouts.insert(name.to_string(), document);
	}
	let (_, document) = read_layout(layout)?;
	let Some(view) = ViewTree::build(&document, &layouts) else {
		return Err(miette!("{layout} has no elements"));
	};
	print!("{}", render(view.as_ref()).into_diagnostic()?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn parse_args_defaults() {
		let args = parse_args(&[]);
		assert_eq!(args.command, Command::Help);
		assert_eq!(args.project, None);
		assert_eq!(args.log_format, LogFormat::Compact);
	}

	#[test]
	fn parse_args_complete() {
		let args = parse_args(&["complete", "--project", "app/project.json", "main.xml:3:9", "--log-format", "json"]);
		assert_eq!(args.command, Command::Complete { target: "main.xml:3:9" });
		assert_eq!(args.project, Some("app/project.json"));
		assert_eq!(args.log_format, LogFormat::Json);

		let args = parse_args(&["-p", "app/project.json", "complete", "main.xml:3:9"]);
		assert_eq!(args.command, Command::Complete { target: "main.xml:3:9" });
	}

	#[test]
	fn parse_args_tree_includes() {
		let args = parse_args(&["tree", "main.xml", "--include", "toolbar=toolbar.xml", "--include", "row=res/row.xml"]);
		assert_eq!(args.command, Command::Tree { layout: "main.xml" });
		assert_eq!(args.includes, vec![("toolbar", "toolbar.xml"), ("row", "res/row.xml")]);
	}

	#[test]
	fn parse_target_positions() {
		assert_eq!(
			parse_target("res/layout/main.xml:3:9"),
			Some(("res/layout/main.xml", Position { line: 2, character: 8 }))
		);
		assert_eq!(parse_target("C:/layout.xml:1:1").map(|(path, _)| path), Some("C:/layout.xml"));
		assert_eq!(parse_target("main.xml:0:1"), None);
		assert_eq!(parse_target("main.xml:3"), None);
	}
}
