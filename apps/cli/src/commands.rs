//! CLI definition, routing, and tracing setup.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use versebook_core::{ProgressReporter, Registry, SkippedChapter, assemble, write_document};
use versebook_shared::{ChapterSpec, RenderConfig, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Preprocess Verse documentation markdown for Pandoc/LaTeX conversion.
#[derive(Parser)]
#[command(
    name = "preprocess",
    version,
    about = "Assemble Verse documentation chapters into one Pandoc/LaTeX-ready markdown document.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Directory containing the chapter markdown files.
    #[arg(required_unless_present_any = ["list_chapters", "show_config"])]
    pub docs_dir: Option<PathBuf>,

    /// Output file. Without it the document goes to stdout and the
    /// `Processing:` and `Warning:` progress lines move to stderr.
    pub output: Option<PathBuf>,

    /// Render config file (TOML).
    #[arg(long, env = "VERSEBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the chapter registry with anchors and exit.
    #[arg(long, conflicts_with = "show_config")]
    pub list_chapters: bool,

    /// Print the chapter listing as JSON.
    #[arg(long, requires = "list_chapters")]
    pub json: bool,

    /// Print the resolved render config as TOML and exit.
    #[arg(long)]
    pub show_config: bool,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags. Logs go to stderr; stdout may carry the document.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "versebook=info",
        1 => "versebook=debug",
        _ => "versebook=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    if cli.show_config {
        return cmd_show_config(&config);
    }

    let registry = Registry::builtin()?;

    if cli.list_chapters {
        return cmd_list_chapters(&registry, cli.json);
    }

    let docs_dir = cli
        .docs_dir
        .ok_or_else(|| eyre!("missing documentation directory argument"))?;

    cmd_preprocess(&docs_dir, cli.output.as_deref(), &registry, &config)
}

fn cmd_preprocess(
    docs_dir: &Path,
    output: Option<&Path>,
    registry: &Registry,
    config: &RenderConfig,
) -> Result<()> {
    info!(
        docs_dir = %docs_dir.display(),
        output = %output.map(|p| p.display().to_string()).unwrap_or_else(|| "-".into()),
        "preprocessing documentation"
    );

    // Progress lines must not end up inside a document written to stdout.
    let reporter = CliProgress {
        to_stderr: output.is_none(),
    };

    let result = assemble(docs_dir, registry, config, &reporter)?;

    match output {
        Some(path) => {
            write_document(path, &result.text)?;
            println!("Written to: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", result.text)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

fn cmd_list_chapters(registry: &Registry, json: bool) -> Result<()> {
    let listing = registry.listing();

    if json {
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    for entry in &listing {
        if let Some(part) = &entry.opens_part {
            println!("{part}");
        }
        let number = entry
            .number
            .map(|n| format!("{n:>2}"))
            .unwrap_or_else(|| "  ".into());
        println!(
            "  {number}  {:<26} #{:<18} {}",
            entry.filename, entry.anchor, entry.title
        );
    }

    Ok(())
}

fn cmd_show_config(config: &RenderConfig) -> Result<()> {
    let toml_str = toml::to_string_pretty(config)?;
    println!("{toml_str}");
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// Prints one line per processed or skipped chapter.
struct CliProgress {
    to_stderr: bool,
}

impl CliProgress {
    fn emit(&self, line: &str) {
        if self.to_stderr {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
    }
}

impl ProgressReporter for CliProgress {
    fn chapter_started(&self, chapter: &ChapterSpec) {
        self.emit(&format!("Processing: {} -> {}", chapter.filename, chapter.title));
    }

    fn chapter_skipped(&self, skipped: &SkippedChapter) {
        self.emit(&format!(
            "Warning: {} {}, skipping",
            skipped.path.display(),
            skipped.reason
        ));
    }
}
