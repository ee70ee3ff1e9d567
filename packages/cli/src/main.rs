mod commands;
mod config;
mod context;
mod dirview;
mod lexicon;
mod repl;

use anyhow::Context as _;
use clap::{ArgAction, Parser};
use colored::Colorize;
use commands::document::FileArgs;
use config::Config;
use context::Context;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// htmled - edit HTML documents by element id from an interactive shell
#[derive(Parser, Debug)]
#[command(name = "htmled")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Documents to load on startup
    files: Vec<PathBuf>,

    /// Config file (defaults to htmled.config.json in the working directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Don't restore or save the session
    #[arg(long)]
    no_session: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // Logs go to stderr so they never mix with command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("cannot get current directory")?;

    let config = match &cli.config {
        Some(path) => Config::load_file(path),
        None => Config::load(&cwd),
    }
    .context("cannot load config")?;

    let mut ctx = Context::new(config, cwd);

    if !cli.no_session {
        ctx.restore_session();
    }

    for file in cli.files {
        let args = FileArgs { file };
        if let Err(err) = commands::document::load(args, &mut ctx, &mut std::io::stdout()) {
            eprintln!("{} {}", "Error:".red().bold(), err);
        }
    }

    let stdin = std::io::stdin();
    repl::run(&mut ctx, stdin.lock(), std::io::stdout())?;

    if !cli.no_session {
        ctx.save_session().context("cannot save session")?;
        info!(path = %ctx.session_path().display(), "saved session");
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli) {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
