//! `hljs-ln` - number the highlighted code blocks of an HTML file.

use std::env;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use hljs_ln::{LineNumbersConfig, StyleInjector};
use hljs_ln_document::{HtmlDocument, LineNumbers};
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "usage: hljs-ln [--single-line] [--start-from N] [--config FILE] [-o OUTPUT] INPUT";

#[derive(Debug, Default, PartialEq)]
struct Args {
    single_line: bool,
    start_from: Option<f64>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    /// `None` reads standard input.
    input: Option<PathBuf>,
}

fn invalid_args(message: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, message.into())
}

fn parse_args(args: impl IntoIterator<Item = String>) -> io::Result<Args> {
    let mut parsed = Args::default();
    let mut input = None;
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--single-line" => parsed.single_line = true,
            "--start-from" => {
                let value = args
                    .next()
                    .ok_or_else(|| invalid_args("--start-from needs a value"))?;
                let number = value
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .ok_or_else(|| invalid_args(format!("invalid --start-from value: {value}")))?;
                parsed.start_from = Some(number);
            }
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| invalid_args("--config needs a file"))?;
                parsed.config = Some(PathBuf::from(path));
            }
            "-o" | "--output" => {
                let path = args
                    .next()
                    .ok_or_else(|| invalid_args(format!("{arg} needs a file")))?;
                parsed.output = Some(PathBuf::from(path));
            }
            "-" => input = Some(None),
            other if other.starts_with('-') => {
                return Err(invalid_args(format!("unknown option: {other}")));
            }
            other => {
                if input.is_some() {
                    return Err(invalid_args(format!("unexpected argument: {other}")));
                }
                input = Some(Some(PathBuf::from(other)));
            }
        }
    }

    parsed.input = input.ok_or_else(|| invalid_args("missing INPUT"))?;
    Ok(parsed)
}

/// Config file first, then command line flags on top.
fn load_config(args: &Args) -> io::Result<LineNumbersConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            serde_json::from_str::<LineNumbersConfig>(&text)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        }
        None => LineNumbersConfig::default(),
    };
    if args.single_line {
        config.single_line = true;
    }
    if let Some(start_from) = args.start_from {
        config.start_from = Some(start_from);
    }
    Ok(config)
}

fn read_input(input: Option<&PathBuf>) -> io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn number_document(html: String, config: LineNumbersConfig) -> String {
    let plugin = LineNumbers::new(config);
    let mut document = HtmlDocument::new(html);

    let failures = plugin.render_document(&mut document);
    if !failures.is_empty() {
        tracing::warn!(failed = failures.len(), "some code blocks were left unnumbered");
    }
    plugin.add_styles(&mut document, StyleInjector::global());
    document.to_html()
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hljs_ln=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() -> io::Result<()> {
    init_logging();

    let args = match parse_args(env::args().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            eprintln!("{USAGE}");
            return Err(err);
        }
    };

    let config = load_config(&args)?;
    let html = read_input(args.input.as_ref())?;
    let numbered = number_document(html, config);

    match &args.output {
        Some(path) => fs::write(path, numbered)?,
        None => io::stdout().lock().write_all(numbered.as_bytes())?,
    }
    tracing::debug!(output = ?args.output, "done");
    Ok(())
}
