use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::Args;
use similar::{ChangeTag, TextDiff};
use tracing::debug;

use routegen_core::openapi::{Format, OpenApiSource, SCHEMAS_FILE};
use routegen_core::{GeneratorConfig, Target, generate};

/// Looked up in the working directory when `--config` is not given
const DEFAULT_CONFIG: &str = "routegen.toml";

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// OpenAPI 3.x document (JSON or YAML)
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
    /// Configuration file [default: ./routegen.toml when present]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Output directory, overrides `output.dir`
    #[arg(long, value_name = "DIR")]
    pub out: Option<PathBuf>,
    /// Enabled target, repeatable; overrides `targets`
    #[arg(long = "target", value_name = "TARGET")]
    pub targets: Vec<Target>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Write files to disk
    Write,
    /// Compare against disk without writing
    Check,
}

/// A file ready to be written, relative to the output directory
#[derive(Debug, Clone)]
struct OutputFile {
    rel_path: String,
    content: String,
}

pub fn run(args: &GenerateArgs, mode: Mode) -> i32 {
    match run_inner(args, mode) {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

/// `Ok(false)` means check mode found stale files.
fn run_inner(args: &GenerateArgs, mode: Mode) -> Result<bool, String> {
    let config = load_config(args)?;
    let files = render(&args.input, &config)?;
    let out_dir = PathBuf::from(&config.output.dir);

    match mode {
        Mode::Write => {
            write_files(&out_dir, &files)?;
            println!(
                "Generated {} files in {}",
                files.len(),
                out_dir.display()
            );
            Ok(true)
        }
        Mode::Check => {
            let fresh = check_files(&out_dir, &files)?;
            if fresh {
                println!("{} files up to date", files.len());
            } else {
                eprintln!("Generated files are stale; run `routegen generate`");
            }
            Ok(fresh)
        }
    }
}

/// File values first, then command-line overrides.
fn load_config(args: &GenerateArgs) -> Result<GeneratorConfig, String> {
    let path = match &args.config {
        Some(path) => Some(path.clone()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG);
            default.is_file().then_some(default)
        }
    };

    let mut config = match path {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
            debug!("Loaded config from {}", path.display());
            toml::from_str(&text)
                .map_err(|e| format!("Invalid config {}: {e}", path.display()))?
        }
        None => GeneratorConfig::default(),
    };

    if let Some(out) = &args.out {
        config.output.dir = out.to_string_lossy().into_owned();
    }
    if !args.targets.is_empty() {
        config.targets.clone_from(&args.targets);
    }
    Ok(config)
}

fn render(input: &Path, config: &GeneratorConfig) -> Result<Vec<OutputFile>, String> {
    let text = fs::read_to_string(input)
        .map_err(|e| format!("Failed to read {}: {e}", input.display()))?;
    let source = OpenApiSource::parse(&text, Format::detect(input, &text))
        .map_err(|e| format!("{}: {e}", input.display()))?;
    let decls = source
        .declarations()
        .map_err(|e| format!("{}: {e}", input.display()))?;
    let modules = generate(&decls, config).map_err(|e| e.to_string())?;

    let mut files = Vec::with_capacity(modules.len() + 1);
    for module in modules {
        for warning in &module.warnings {
            eprintln!("warning: {warning}");
        }
        files.push(OutputFile {
            rel_path: module.file_name,
            content: module.source,
        });
    }
    if config.output.schemas {
        files.push(OutputFile {
            rel_path: SCHEMAS_FILE.to_string(),
            content: source.schema_module(),
        });
    }
    Ok(files)
}

fn write_files(out_dir: &Path, files: &[OutputFile]) -> Result<(), String> {
    fs::create_dir_all(out_dir)
        .map_err(|e| format!("Failed to create {}: {e}", out_dir.display()))?;
    for file in files {
        let path = out_dir.join(&file.rel_path);
        fs::write(&path, &file.content)
            .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
        debug!("Wrote {}", path.display());
    }
    Ok(())
}

/// Print a diff for every file that differs from disk; `false` if any did.
fn check_files(out_dir: &Path, files: &[OutputFile]) -> Result<bool, String> {
    let mut fresh = true;
    for file in files {
        let path = out_dir.join(&file.rel_path);
        let existing = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                println!("missing: {}", path.display());
                fresh = false;
                continue;
            }
            Err(e) => return Err(format!("Failed to read {}: {e}", path.display())),
        };
        if let Some(diff) = generate_diff(&file.rel_path, &existing, &file.content) {
            print!("{diff}");
            fresh = false;
        }
    }
    Ok(fresh)
}

fn generate_diff(rel_path: &str, existing: &str, new_content: &str) -> Option<String> {
    if existing == new_content {
        return None;
    }

    let diff = TextDiff::from_lines(existing, new_content);
    let mut output = String::new();

    output.push_str(&format!("\x1b[1m--- {rel_path} (on disk)\x1b[0m\n"));
    output.push_str(&format!("\x1b[1m+++ {rel_path} (generated)\x1b[0m\n"));

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            output.push_str("...\n");
        }
        for op in group {
            for change in diff.iter_changes(op) {
                let (sign, color) = match change.tag() {
                    ChangeTag::Delete => ("-", "\x1b[31m"),
                    ChangeTag::Insert => ("+", "\x1b[32m"),
                    ChangeTag::Equal => (" ", ""),
                };
                output.push_str(color);
                output.push_str(sign);
                output.push_str(change.value());
                if change.missing_newline() {
                    output.push('\n');
                }
                if !color.is_empty() {
                    output.push_str("\x1b[0m");
                }
            }
        }
    }

    Some(output)
}
