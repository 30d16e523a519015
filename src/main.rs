use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use stymatch::{
    Diagnostic, MatchConfig, StyleProgram, check_style_program, compile_selectors, load_config,
    load_fact_program, load_style_program, load_vocabulary,
};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(name = "stymatch")]
#[command(about = "Style selector matcher")]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Match {
        #[arg(long)]
        vocab: PathBuf,
        #[arg(long)]
        facts: PathBuf,
        #[arg(long)]
        style: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    Check {
        #[arg(long)]
        vocab: PathBuf,
        #[arg(long)]
        style: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let exit_code = match cli.command {
        Command::Match {
            vocab,
            facts,
            style,
            config,
            format,
        } => run_match(&vocab, &facts, &style, config.as_deref(), format),
        Command::Check {
            vocab,
            style,
            config,
        } => run_check(&vocab, &style, config.as_deref()),
    };
    std::process::exit(exit_code);
}

fn report(diags: Vec<Diagnostic>) -> i32 {
    for d in diags {
        eprintln!("{d}");
    }
    1
}

fn read_config(path: Option<&Path>) -> Result<MatchConfig, Vec<Diagnostic>> {
    match path {
        Some(path) => load_config(path),
        None => Ok(MatchConfig::default()),
    }
}

fn run_match(
    vocab: &Path,
    facts: &Path,
    style: &Path,
    config: Option<&Path>,
    format: OutputFormat,
) -> i32 {
    let loaded = read_config(config).and_then(|config| {
        Ok((
            config,
            load_vocabulary(vocab)?,
            load_fact_program(facts)?,
            load_style_program(style)?,
        ))
    });
    let (config, vocab, facts, style) = match loaded {
        Ok(inputs) => inputs,
        Err(diags) => return report(diags),
    };

    let results = compile_selectors(&vocab, &facts, &style, &config);
    match format {
        OutputFormat::Json => {
            let rendered = match serde_json::to_string_pretty(&results.to_report(&style)) {
                Ok(s) => s,
                Err(err) => {
                    eprintln!("E-IO: failed to serialize match report: {err}");
                    return 1;
                }
            };
            println!("{rendered}");
        }
        OutputFormat::Text => print_text(&style, &results),
    }

    let diags: Vec<Diagnostic> = results.diagnostics().cloned().collect();
    if diags.is_empty() { 0 } else { report(diags) }
}

fn print_text(style: &StyleProgram, results: &stymatch::MatchResults) {
    for (index, (header, outcome)) in style.headers.iter().zip(&results.outcomes).enumerate() {
        match outcome {
            Ok(substs) => {
                println!("#{index} {header}: {} substitution(s)", substs.len());
                for subst in substs {
                    println!("  {subst}");
                }
            }
            Err(_) => println!("#{index} {header}: error"),
        }
    }
}

fn run_check(vocab: &Path, style: &Path, config: Option<&Path>) -> i32 {
    let loaded = read_config(config)
        .and_then(|config| Ok((config, load_vocabulary(vocab)?, load_style_program(style)?)));
    let (config, vocab, style) = match loaded {
        Ok(inputs) => inputs,
        Err(diags) => return report(diags),
    };

    match check_style_program(&vocab, &style, &config) {
        Ok(summary) => {
            println!(
                "ok ({} selectors, {} namespaces)",
                summary.selectors_checked, summary.namespaces
            );
            0
        }
        Err(diags) => report(diags),
    }
}
