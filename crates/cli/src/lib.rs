//! `routegen` command-line front end.

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub mod generate;

use generate::{GenerateArgs, Mode};

/// Crates a plain `ROUTEGEN_LOG` level applies to
const CRATE_ROOTS: [&str; 2] = ["routegen_cli", "routegen_core"];

#[derive(Parser)]
#[command(
    name = "routegen",
    version,
    about = "Generate a typed Hono client and data-fetching hooks from an OpenAPI document"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every enabled module to the output directory
    Generate(GenerateArgs),
    /// Fail with a diff when the generated files on disk are stale
    Check(GenerateArgs),
}

/// Parse `args` (program name first) and run the selected command.
///
/// Returns the process exit status: 0 on success, 1 on failure or stale
/// output, clap's status (2) on usage errors.
pub fn run_cli(args: Vec<String>) -> i32 {
    match Cli::try_parse_from(args) {
        Ok(cli) => match cli.command {
            Commands::Generate(args) => generate::run(&args, Mode::Write),
            Commands::Check(args) => generate::run(&args, Mode::Check),
        },
        Err(e) => {
            let code = e.exit_code();
            let _ = e.print();
            code
        }
    }
}

pub fn init_tracing() {
    // ROUTEGEN_LOG takes a level ("debug") or a full filter spec
    // ("routegen_core=trace,routegen_cli=info")
    let filter = match std::env::var("ROUTEGEN_LOG") {
        Ok(level) if is_plain_level(&level) => CRATE_ROOTS
            .iter()
            .map(|root| format!("{root}={level}"))
            .collect::<Vec<_>>()
            .join(","),
        Ok(spec) => spec,
        Err(_) => format!("{}=info", CRATE_ROOTS[0]),
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_file(true)
        .with_filter(EnvFilter::new(filter));

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}

fn is_plain_level(s: &str) -> bool {
    matches!(
        s.to_ascii_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    )
}
