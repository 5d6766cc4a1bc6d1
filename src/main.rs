//! mdmaker - Document tree to Markdown converter

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use mdmaker::ir::{DocTree, NodeId};
use mdmaker::markdown::equation_at;
use mdmaker::{Converted, Document, MarkdownConfig, SmartQuotes, document_from_path};

#[derive(Parser)]
#[command(name = "mdmaker")]
#[command(version, about = "Convert document trees to Markdown", long_about = None)]
#[command(after_help = "EXAMPLES:
    mdmaker notes.json                     Print Markdown to stdout
    mdmaker notes.json -o out/             Write out/notes-exported.md and images
    mdmaker notes.json --equation 2.0      Print the equation at body child 2, child 0")]
struct Cli {
    /// Input document tree (JSON)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output file or directory ("-" for stdout)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Directory for extracted images (defaults to the output directory)
    #[arg(long, value_name = "DIR")]
    assets: Option<PathBuf>,

    /// Document name used for the exported file (defaults to the input stem)
    #[arg(long)]
    name: Option<String>,

    /// Smart quote handling
    #[arg(long, value_enum, default_value_t = Quotes::All)]
    quotes: Quotes,

    /// Additional font family to render as inline code
    #[arg(long = "code-font", value_name = "FONT")]
    code_fonts: Vec<String>,

    /// Print the equation enclosing the body node at PATH (dot-separated
    /// child indices) instead of converting
    #[arg(long, value_name = "PATH")]
    equation: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Quotes {
    /// Replace every smart quote
    All,
    /// Replace only the first of each kind
    First,
    /// Leave smart quotes alone
    Keep,
}

impl From<Quotes> for SmartQuotes {
    fn from(quotes: Quotes) -> Self {
        match quotes {
            Quotes::All => SmartQuotes::All,
            Quotes::First => SmartQuotes::FirstOnly,
            Quotes::Keep => SmartQuotes::Keep,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.equation.as_deref() {
        Some(path) => show_equation(&cli.input, path),
        None => convert(&cli),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load(path: &Path) -> Result<Document, String> {
    document_from_path(path).map_err(|e| format!("{}: {e}", path.display()))
}

fn show_equation(input: &Path, path: &str) -> Result<(), String> {
    let doc = load(input)?;
    let node = resolve_path(&doc.body, path)?;
    let latex = equation_at(&doc.body, node).map_err(|e| e.to_string())?;
    println!("{latex}");
    Ok(())
}

/// Follow dot-separated child indices from the body root.
fn resolve_path(tree: &DocTree, path: &str) -> Result<NodeId, String> {
    let mut node = tree.root();
    for part in path.split('.').filter(|p| !p.is_empty()) {
        let index: usize = part
            .parse()
            .map_err(|_| format!("invalid node path segment: {part}"))?;
        node = tree
            .children(node)
            .nth(index)
            .ok_or_else(|| format!("no child {index} in node path {path}"))?;
    }
    Ok(node)
}

fn convert(cli: &Cli) -> Result<(), String> {
    let doc = load(&cli.input)?;

    let mut config = MarkdownConfig::new().with_smart_quotes(cli.quotes.into());
    for font in &cli.code_fonts {
        config = config.with_code_font(font.as_str());
    }

    let converted = doc
        .to_markdown_with_config(&config)
        .map_err(|e| e.to_string())?;

    let name = match &cli.name {
        Some(name) => name.clone(),
        None => cli
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string()),
    };

    let output = cli
        .output
        .as_deref()
        .filter(|p| *p != Path::new("-"))
        .map(|p| {
            if p.is_dir() {
                p.join(Converted::export_file_name(&name))
            } else {
                p.to_path_buf()
            }
        });

    match &output {
        Some(path) => {
            fs::write(path, &converted.text).map_err(|e| format!("{}: {e}", path.display()))?
        }
        None => io::stdout()
            .write_all(converted.text.as_bytes())
            .map_err(|e| e.to_string())?,
    }

    let assets = cli.assets.clone().unwrap_or_else(|| {
        output
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_default()
    });
    write_images(&converted, &assets)?;

    if !cli.quiet {
        let target = output
            .as_deref()
            .map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
        eprintln!(
            "Converted {} -> {target} ({} images)",
            cli.input.display(),
            converted.images.len()
        );
    }

    Ok(())
}

fn write_images(converted: &Converted, dir: &Path) -> Result<(), String> {
    if converted.images.is_empty() {
        return Ok(());
    }
    if !dir.as_os_str().is_empty() {
        fs::create_dir_all(dir).map_err(|e| format!("{}: {e}", dir.display()))?;
    }
    for image in &converted.images {
        let path = dir.join(&image.filename);
        fs::write(&path, &image.bytes).map_err(|e| format!("{}: {e}", path.display()))?;
    }
    Ok(())
}
