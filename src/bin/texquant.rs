//! texquant - report LaTeX variable/quantity conflicts in text and HTML files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use texquant::report::{self, AnalyzerSession, ReportOptions, TableStyle};
use texquant::{Analyzer, AnalyzerOptions, Document, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Plain,
    Markdown,
    Json,
}

/// Report LaTeX variables used for several quantities, and quantities
/// written with several variables.
#[derive(Parser)]
#[command(name = "texquant")]
#[command(version)]
struct Cli {
    /// YAML analyzer options
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Plain)]
    format: Format,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Files to analyse; .html/.htm files are parsed as markup.
    /// With the `http` feature, http(s) URLs are fetched through the proxy chain.
    #[arg(required = true)]
    inputs: Vec<String>,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}

fn is_url(input: &str) -> bool {
    texquant::proxy::normalize_url(input).is_ok()
}

#[cfg(feature = "http")]
fn fetch_document(url: &str) -> Result<Document> {
    use texquant::proxy::{FetchRequest, HttpFetcher, ProxyChain};

    let fetcher = HttpFetcher::new()?;
    let response = ProxyChain::new().fetch(&fetcher, url, &FetchRequest::get())?;
    if response.body.is_empty() {
        return Err(Error::EmptyResponse);
    }
    Ok(Document::from_html(&response.body))
}

#[cfg(not(feature = "http"))]
fn fetch_document(url: &str) -> Result<Document> {
    Err(Error::Other(format!("{url}: fetching URLs requires the `http` feature")))
}

fn load_document(input: &str) -> Result<Document> {
    if is_url(input) {
        return fetch_document(input);
    }

    let path = Path::new(input);
    let text = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "read input");
    Ok(document_from_text(path, &text))
}

/// HTML files are parsed as markup; anything else is split into paragraphs.
fn document_from_text(path: &Path, text: &str) -> Document {
    if is_html(path) {
        Document::from_html(text)
    } else {
        Document::from_paragraphs(text)
    }
}

/// Render the report for one input.
///
/// Every input gets its own session, so a clean file never reports warnings
/// of the file before it as resolved.
fn report_document(
    analyzer: &Analyzer,
    document: &Document,
    format: Format,
    report_options: &ReportOptions,
) -> Result<String> {
    let analysis = analyzer.analyze_document(document);
    let caution = AnalyzerSession::new().record_now(&analysis.result);

    match format {
        Format::Json => report::to_json(&analysis),
        Format::Plain | Format::Markdown => report::render(&analysis, &caution, report_options),
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = match &cli.config {
        Some(path) => AnalyzerOptions::from_yaml_file(path)?,
        None => AnalyzerOptions::default(),
    };
    let report_options = ReportOptions::new().with_table_style(match cli.format {
        Format::Markdown => TableStyle::Markdown,
        Format::Plain | Format::Json => TableStyle::Plain,
    });

    let analyzer = Analyzer::new(&options);

    for (i, input) in cli.inputs.iter().enumerate() {
        let document = load_document(input).map_err(|e| Error::Other(format!("{input}: {e}")))?;
        let output = report_document(&analyzer, &document, cli.format, &report_options)?;

        if cli.inputs.len() > 1 {
            if i > 0 {
                println!();
            }
            match cli.format {
                Format::Markdown => println!("## {input}\n"),
                Format::Plain => println!("==> {input} <=="),
                Format::Json => {},
            }
        }
        print!("{output}");
        if !output.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "texquant failed");
            eprintln!("texquant: {err}");
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_text_file_keeps_multiline_display_math() {
        let mut file = tempfile::Builder::new().suffix(".tex").tempfile().unwrap();
        write!(file, "Energy is\n$$\nE = \\text{{energy}}\n$$\n\nNext paragraph.\n").unwrap();

        let input = file.path().to_str().unwrap();
        let document = load_document(input).unwrap();
        assert_eq!(document.chunk_count(), 2);

        let report = Analyzer::default().analyze_document(&document);
        assert_eq!(report.expression_count, 1);
        assert_eq!(report.result.rows[0].variable, "E");
        assert_eq!(report.result.rows[0].quantity, "energy");
    }

    #[test]
    fn test_html_extension_parsed_as_markup() {
        let doc = document_from_text(Path::new("page.HTM"), "<p>$x$</p>");
        assert_eq!(doc.chunk_count(), 1);
    }

    #[test]
    fn test_clean_input_after_conflicting_input_has_no_notice() {
        let analyzer = Analyzer::default();
        let options = ReportOptions::new();
        let conflicting = Document::from_paragraphs("$x = \\text{a}$ and $x = \\text{b}$");
        let clean = Document::from_paragraphs("$v = \\text{speed}$");

        let first = report_document(&analyzer, &conflicting, Format::Plain, &options).unwrap();
        assert!(first.starts_with("Warnings:"));

        let second = report_document(&analyzer, &clean, Format::Plain, &options).unwrap();
        assert!(second.starts_with("LaTeX expressions detected: 1"));
        assert!(!second.contains("resolved"));
    }
}
