use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use modscan::{
    config::Config,
    logging,
    output::{print_summary, CliReporter},
    scanner::{Auditor, InstallTree, PackageInspector},
    Registry,
};
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

/// Exit codes for CI integration
mod exit_codes {
    pub const SUCCESS: u8 = 0;
    pub const ERROR: u8 = 1;
    pub const AFFECTED: u8 = 2;
}

#[derive(Parser)]
#[command(name = "modscan")]
#[command(
    author,
    version,
    about = "Check installed node modules against a list of compromised releases"
)]
struct Cli {
    /// Directory containing the node_modules tree to audit
    #[arg(default_value = ".")]
    dir: PathBuf,

    /// Advisory list, one `name@version` per line (overrides the config file)
    #[arg(short, long)]
    advisories: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Exit with status 2 if any installed package is in an affected range
    #[arg(long)]
    fail_on_hit: bool,

    /// Write the default config file and exit
    #[arg(long, conflicts_with = "config_path")]
    init_config: bool,

    /// Print the config file path and exit
    #[arg(long)]
    config_path: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(exit_codes::ERROR)
        }
    }
}

fn run() -> Result<u8> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    if cli.config_path {
        println!("{}", config_path.display());
        return Ok(exit_codes::SUCCESS);
    }
    if cli.init_config {
        init_config(&config_path)?;
        return Ok(exit_codes::SUCCESS);
    }

    let config = Config::load_from(&config_path)?;
    let advisories = cli.advisories.unwrap_or(config.advisory_file);

    let registry = Registry::load(&advisories)?.without_ignored(&config.ignore);
    info!(packages = registry.len(), "registry ready");

    let tree = InstallTree::open(&cli.dir, &config.install_dir_name)?;
    let locations = discover(&tree, !cli.quiet && std::io::stderr().is_terminal());

    if locations.is_empty() {
        eprintln!("\n\nNo more directories found ... exiting");
        return Ok(exit_codes::SUCCESS);
    }

    let auditor = Auditor::new(&registry, PackageInspector::with_descriptor(config.descriptor_file));
    let mut reporter = CliReporter::stdout();
    let result = auditor.audit(locations, &mut reporter)?;

    print_summary(&mut std::io::stdout().lock(), &result)?;

    if cli.fail_on_hit && result.has_hits() {
        Ok(exit_codes::AFFECTED)
    } else {
        Ok(exit_codes::SUCCESS)
    }
}

/// Collect install locations, showing a spinner on interactive terminals.
fn discover(tree: &InstallTree, interactive: bool) -> Vec<PathBuf> {
    let progress = if interactive {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("Discovering install directories in {}...", tree.root().display()));
        Some(pb)
    } else {
        None
    };

    let locations: Vec<PathBuf> = tree.locations().collect();

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    info!(count = locations.len(), "discovered install directories");

    locations
}

fn init_config(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        println!("Config file already exists at: {}", config_path.display());
        return Ok(());
    }

    Config::default().save_to(config_path)?;
    println!("Created config file at: {}", config_path.display());
    println!();
    println!("Default configuration:");
    println!("{}", Config::generate_default_config());
    Ok(())
}
