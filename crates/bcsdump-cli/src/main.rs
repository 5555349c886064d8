use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use glob::glob;

mod render;

#[derive(Parser, Debug)]
#[command(name = "bcsdump")]
#[command(version)]
#[command(
    about = "Decoder for device EEPROM configuration images (lump trees).",
    long_about = None,
    after_help = "Examples:\n  bcsdump image inspect device.eeprom -o report.json\n  bcsdump image dump device.eeprom --stdout --pretty\n  bcsdump image tree device.eeprom"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on EEPROM image files.
    Image {
        #[command(subcommand)]
        command: ImageCommands,
    },
    /// Print version and build metadata.
    Version,
}

#[derive(Subcommand, Debug)]
enum ImageCommands {
    /// Decode an image and write a versioned JSON report.
    #[command(alias = "dump")]
    #[command(
        after_help = "Examples:\n  bcsdump image inspect device.eeprom -o report.json\n  bcsdump image dump device.eeprom --stdout"
    )]
    Inspect(InspectArgs),
    /// Decode an image and print its lump tree as indented text.
    Tree {
        /// Path to an EEPROM image
        input: PathBuf,
    },
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Path to an EEPROM image
    input: PathBuf,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if the image contains unknown lumps
    #[arg(long)]
    strict: bool,

    /// List unknown lump tags after decoding
    #[arg(long)]
    list_unknown: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Image { command } => match command {
            ImageCommands::Inspect(args) => cmd_image_inspect(args),
            ImageCommands::Tree { input } => cmd_image_tree(input),
        },
        Commands::Version => {
            print_version();
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn cmd_image_inspect(args: InspectArgs) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&args.input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;

    let report = if args.stdout {
        None
    } else {
        Some(args.report.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    if let Some(report_path) = report.as_ref() {
        ensure_distinct_output(report_path, &input_abs)?;
    }

    let rep = decode_image(&resolved_input)?;
    let json = serialize_report(&rep, args.pretty, args.compact)?;

    match report {
        None => print!("{}", json),
        Some(report) => {
            if let Some(parent) = report.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&report, json)
                .with_context(|| format!("Failed to write report: {}", report.display()))?;
            if !args.quiet {
                eprintln!("OK: report written -> {}", report.display());
            }
        }
    }

    if args.list_unknown && !args.quiet {
        print_unknown(&rep);
    }
    if args.strict && !rep.summary.unknown_tags.is_empty() {
        return Err(CliError::new(
            "unknown lumps present",
            Some("use --list-unknown to inspect".to_string()),
        ));
    }
    Ok(())
}

fn cmd_image_tree(input: PathBuf) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    let rep = decode_image(&resolved_input)?;
    print!("{}", render::render_tree(&rep.root));
    Ok(())
}

fn decode_image(input: &Path) -> Result<bcsdump_core::ImageReport, CliError> {
    bcsdump_core::inspect_image_file(input).map_err(|err| {
        CliError::new(
            format!("image decoding failed: {}", err),
            Some("the file is not a valid or complete EEPROM image".to_string()),
        )
    })
}

fn ensure_distinct_output(report_path: &Path, input_abs: &Path) -> Result<(), CliError> {
    // A directory that does not exist yet cannot hold the input.
    if let Some(parent) = report_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            return Ok(());
        }
    }
    let report_dir = report_path
        .parent()
        .map(|parent| {
            if parent.as_os_str().is_empty() {
                fs::canonicalize(".")
            } else {
                fs::canonicalize(parent)
            }
        })
        .transpose()
        .with_context(|| format!("Failed to resolve output path: {}", report_path.display()))?;
    if let Some(report_dir) = report_dir {
        let report_target = report_dir.join(
            report_path
                .file_name()
                .ok_or_else(|| anyhow::anyhow!("Invalid report path"))?,
        );
        if report_target == input_abs {
            return Err(CliError::new(
                format!(
                    "report path must differ from input: {}",
                    report_path.display()
                ),
                Some("choose a different output path".to_string()),
            ));
        }
    }
    Ok(())
}

fn serialize_report(
    rep: &bcsdump_core::ImageReport,
    pretty: bool,
    compact: bool,
) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn print_unknown(rep: &bcsdump_core::ImageReport) {
    eprintln!("Unknown lumps:");
    for tag in &rep.summary.unknown_tags {
        let count = rep
            .root
            .walk()
            .filter(|lump| lump.name().to_string() == *tag)
            .count();
        eprintln!("  {} ({})", tag, count);
    }
}

fn print_version() {
    println!(
        "bcsdump {} (commit {}, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("BCSDUMP_BUILD_COMMIT"),
        env!("BCSDUMP_BUILD_DATE")
    );
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass the path of an EEPROM image file".to_string()),
        ));
    }
    let meta = fs::metadata(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    if !meta.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass the path of an EEPROM image file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        ));
    }
    if matches.len() > 1 {
        let hint = "pass a single image file, or run once per file".to_string();
        let mut message = format!(
            "multiple files match pattern '{}' ({} matches)",
            pattern,
            matches.len()
        );
        let listed = matches
            .iter()
            .take(3)
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>();
        message.push_str("; matches: ");
        message.push_str(&listed.join(", "));
        if matches.len() > 3 {
            message.push_str(", ...");
        }
        return Err(CliError::new(message, Some(hint)));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
