use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use simplelog::LevelFilter;

use gensemver::cli::{self, RunArgs};
use gensemver::config;
use gensemver::git::GitRepository;
use gensemver::ui;

#[derive(clap::Parser)]
#[command(
    name = "gensemver",
    version,
    about = "Print the next semantic version based on the commits since the last version tag"
)]
struct Args {
    #[arg(help = "Start revision (exclusive), defaults to the latest version tag")]
    start: Option<String>,

    #[arg(help = "End revision (inclusive), defaults to HEAD")]
    end: Option<String>,

    #[arg(long, value_name = "VERSION", help = "Force a previous version number")]
    prev: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(
        short = 'C',
        long,
        default_value = ".",
        help = "Directory to start looking for the repository from"
    )]
    repo: PathBuf,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Log progress to stderr (-vv for debug output)")]
    verbose: u8,
}

fn initialize_logger(verbose: u8) -> Result<()> {
    let filter = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("gensemver")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
    .context("failed to initialize logger")?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    initialize_logger(args.verbose)?;

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let run_args = RunArgs {
        start: args.start,
        end: args.end,
        prev: args.prev,
    };
    let repo_dir = args.repo;
    let executable = config.git.executable.clone();

    match cli::run(&run_args, &config, || {
        GitRepository::discover(&repo_dir, executable)
    }) {
        Ok(resolution) => {
            ui::display_version(&resolution.version);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
