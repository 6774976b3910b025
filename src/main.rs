//! CLI entry point for `mailtrace`.
//!
//! The binary is a thin host around the library: it reads one raw header
//! block from a file or stdin, runs the analysis, and prints the result as
//! text or JSON.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{CommandFactory, FromArgMatches, Parser};

use mailtrace::config::Config;
use mailtrace::error::TraceError;
use mailtrace::i18n;
use mailtrace::model::headers::HeaderModel;
use mailtrace::parser::analyze::analyze;

#[derive(Parser)]
#[command(name = "mailtrace", version)]
struct Cli {
    /// Header file to analyze (reads stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Emit the full model as JSON
    #[arg(long)]
    json: bool,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Language (en, es). Defaults to system locale.
    #[arg(long, value_name = "LANG")]
    lang: Option<String>,
}

/// Detect language from the raw `--lang` argument, the config file, or the
/// system environment — before clap renders `--help`.
fn detect_lang_early(config: &Config) -> i18n::Lang {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--lang" {
            if let Some(code) = args.get(i + 1) {
                if let Some(lang) = i18n::Lang::from_code(code) {
                    return lang;
                }
            }
        }
        if let Some(code) = args[i].strip_prefix("--lang=") {
            if let Some(lang) = i18n::Lang::from_code(code) {
                return lang;
            }
        }
    }
    if let Some(lang) = i18n::Lang::from_code(&config.general.language) {
        return lang;
    }
    i18n::detect_system_lang()
}

fn main() -> anyhow::Result<()> {
    let config = mailtrace::config::load_config();

    // Language BEFORE clap parsing so --help comes out localized.
    i18n::set_lang(detect_lang_early(&config));

    let cmd = Cli::command().about(i18n::app_about());
    let matches = cmd.get_matches();
    let cli = Cli::from_arg_matches(&matches)?;

    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level);

    let raw = read_input(cli.file.as_deref())?;
    let model = analyze(&raw);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&model)?);
    } else {
        print_model(&model);
    }

    Ok(())
}

/// Set up tracing output on stderr.
fn setup_logging(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Read the raw header block from the given file, or from stdin.
fn read_input(file: Option<&Path>) -> Result<String, TraceError> {
    match file {
        Some(path) => {
            if !path.exists() {
                return Err(TraceError::FileNotFound(path.to_path_buf()));
            }
            std::fs::read_to_string(path).map_err(|e| TraceError::io(path, e))
        }
        None => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

/// Plain-text rendering of the model, section by section.
fn print_model(model: &HeaderModel) {
    println!("== {} ==", i18n::caption_summary());
    for row in &model.summary {
        if !row.value.is_empty() {
            println!("  {:<14} {}", row.label, row.value);
        }
    }

    if !model.hops.is_empty() {
        println!();
        println!("== {} ==", i18n::caption_trace());
        for hop in &model.hops {
            println!(
                "  {:>3}  {:<32} -> {:<32} {:>20} {:>5.1}%",
                hop.hop,
                hop.from.as_deref().unwrap_or("-"),
                hop.by.as_deref().unwrap_or("-"),
                hop.delay.as_deref().unwrap_or("*"),
                hop.percent,
            );
        }
        let total = model
            .total_delay
            .as_deref()
            .unwrap_or_else(|| i18n::msg_no_timing());
        println!("  {}: {}", i18n::msg_total_delay(), total);
    }

    let reports = [&model.microsoft_report, &model.forefront_report];
    if reports.iter().any(|r| r.exists()) {
        println!();
        println!("== {} ==", i18n::caption_antispam());
        for report in reports {
            for field in report.fields.iter().filter(|f| !f.value.is_empty()) {
                println!("  {:<28} {}", field.label, field.value);
            }
        }
    }

    if !model.other.is_empty() {
        println!();
        println!("== {} ==", i18n::caption_other());
        for header in &model.other {
            match header.url {
                Some(url) => println!("  {}: {}  ({url})", header.name, header.value),
                None => println!("  {}: {}", header.name, header.value),
            }
        }
    }
}
