use std::process::ExitCode;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod cli;

fn main() -> ExitCode {
	let args = std::env::args().skip(1).collect::<Vec<_>>();
	let args = args.iter().map(String::as_str).collect::<Vec<_>>();
	let args = cli::parse_args(&args);

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
	let (json, compact) = match args.log_format {
		cli::LogFormat::Json => (Some(fmt::layer().json().with_writer(std::io::stderr)), None),
		cli::LogFormat::Compact => (None, Some(fmt::layer().compact().with_writer(std::io::stderr))),
	};
	tracing_subscriber::registry().with(filter).with(json).with(compact).init();

	match cli::run(args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(report) => {
			eprintln!("{report:?}");
			ExitCode::FAILURE
		}
	}
}
