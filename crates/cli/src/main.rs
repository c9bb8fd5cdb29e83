use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use folio_core::{
    JsonConfig, MarkdownConfig, NormalizedUrl, Reader, ReaderConfig, RenderOutcome, RenderedArticle,
    convert_to_json, convert_to_markdown, convert_to_text, fetch_file, fetch_stdin, normalize, render_page,
};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

mod echo;

use echo::{
    format_size, print_article_details, print_banner, print_detail, print_error, print_info, print_step,
    print_success, print_timing_summary, print_warning,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

const TOTAL_STEPS: usize = 3;

/// Output format for the rendered article
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Html,
    Page,
    Text,
    Markdown,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "page" => Ok(Self::Page),
            "text" | "txt" => Ok(Self::Text),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid format: {}. Valid options: html, page, text, markdown, json", s)),
        }
    }
}

/// Render any web article as a clean, safe reader fragment
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(version = VERSION)]
#[command(about = "Render any web article as a clean, safe reader fragment", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (html, page, text, markdown, json)
    #[arg(short, long, default_value = "html", value_name = "FORMAT")]
    format: OutputFormat,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Largest accepted response body in bytes
    #[arg(long, default_value = "5242880", value_name = "BYTES")]
    max_bytes: usize,

    /// Base URL for resolving links in files and stdin
    #[arg(long, default_value = "https://localhost/", value_name = "URL")]
    base_url: String,

    /// Minimum article length for readability extraction
    #[arg(long, default_value = "250", value_name = "NUM")]
    char_threshold: usize,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Where the HTML comes from.
enum Source {
    Stdin,
    File(String),
    Url(NormalizedUrl),
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_source(input: &str) -> Option<Source> {
    if input == "-" {
        Some(Source::Stdin)
    } else if Path::new(input).is_file() {
        Some(Source::File(input.to_string()))
    } else {
        normalize(input).map(Source::Url)
    }
}

fn fail(message: &str) -> ! {
    print_error(message);
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let config = ReaderConfig::builder()
        .timeout(args.timeout)
        .max_body_bytes(args.max_bytes)
        .char_threshold(args.char_threshold);
    let config = match &args.user_agent {
        Some(user_agent) => config.user_agent(user_agent.clone()),
        None => config,
    };
    let reader = Reader::new(config.build()).context("Failed to build HTTP client")?;

    let total_start = Instant::now();
    let mut timings: Vec<(&str, Duration)> = Vec::new();

    let Some(source) = resolve_source(&args.input) else {
        fail(&format!("Invalid or missing URL. Received: {}", args.input));
    };

    let step_start = Instant::now();
    let (html, url) = match source {
        Source::Url(url) => {
            if args.verbose {
                print_step(1, TOTAL_STEPS, &format!("Fetching {}", url.as_str().bright_white().underline()));
            }
            let fetched = reader.fetcher().fetch(&url).await;
            match fetched {
                Ok(page) => (page.html, url),
                Err(e) => fail(&format!("Failed to render article: {e}")),
            }
        }
        Source::File(path) => {
            if args.verbose {
                print_step(1, TOTAL_STEPS, &format!("Reading from file {}", path.bright_white()));
            }
            let html = fetch_file(&path).with_context(|| format!("Failed to read file: {}", path))?;
            (html, base_url(&args.base_url))
        }
        Source::Stdin => {
            if args.verbose {
                print_step(1, TOTAL_STEPS, "Reading from stdin");
            }
            let html = fetch_stdin().context("Failed to read from stdin")?;
            (html, base_url(&args.base_url))
        }
    };
    timings.push(("Input", step_start.elapsed()));

    if args.verbose {
        print_detail("Size", &format_size(html.len()));
        eprintln!();
        print_step(2, TOTAL_STEPS, "Extracting and sanitizing content");
    }

    let step_start = Instant::now();
    let article = reader.render_html(&html, &url);
    timings.push(("Render", step_start.elapsed()));

    if args.verbose {
        print_article_details(&article);
        if article.html.trim().is_empty() {
            print_warning("Extracted fragment is empty");
        }
        print_step(3, TOTAL_STEPS, "Writing output");
    }

    let output = format_output(article, args.format)?;

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            print!("{}", output);
        }
    }

    if args.verbose {
        print_timing_summary(total_start.elapsed(), &timings);
    }

    Ok(())
}

fn base_url(raw: &str) -> NormalizedUrl {
    match NormalizedUrl::parse(raw) {
        Ok(url) => url,
        Err(_) => fail(&format!("Invalid base URL: {}", raw)),
    }
}

fn format_output(article: RenderedArticle, format: OutputFormat) -> anyhow::Result<String> {
    let output = match format {
        OutputFormat::Html => article.html,
        OutputFormat::Page => render_page(&RenderOutcome::Rendered(article)),
        OutputFormat::Text => convert_to_text(&article, true),
        OutputFormat::Markdown => {
            let config = MarkdownConfig { include_title_heading: true, include_source: true };
            convert_to_markdown(&article, &config)
        }
        OutputFormat::Json => {
            let config = JsonConfig { include_text: true, pretty: true };
            convert_to_json(&article, &config).context("Failed to serialize article")?
        }
    };

    Ok(output)
}
