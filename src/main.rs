use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use smallsh::config::{Config, ConfigLoader};
use smallsh::executor::signals;
use smallsh::{Shell, ShellError};
use tracing_subscriber::EnvFilter;

/// smallsh - a small interactive command interpreter
#[derive(Parser, Debug)]
#[command(name = "smallsh", version, about)]
struct Args {
    /// key=value configuration file
    #[arg(long, env = "SMALLSH_CONFIG")]
    config: Option<PathBuf>,

    /// Execute one line and exit
    #[arg(short = 'c')]
    command: Option<String>,

    /// Log at debug level regardless of SMALLSH_LOG
    #[arg(long)]
    debug: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match ConfigLoader::load_from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("smallsh: {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let filter = if args.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SMALLSH_LOG").unwrap_or_else(|_| EnvFilter::new(&config.log))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("smallsh: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args, config: &Config) -> Result<(), ShellError> {
    signals::ignore_interrupt()?;

    let mut shell = Shell::new(config);
    let mut out = io::stdout().lock();
    match &args.command {
        Some(line) => {
            shell.execute_line(line, &mut out)?;
            Ok(())
        }
        None => shell.run(&mut io::stdin().lock(), &mut out),
    }
}
