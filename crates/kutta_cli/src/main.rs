use anyhow::Result;
use clap::Parser;
use kutta_cli::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = kutta_cli::log_level(&cli.verbosity)?;
    env_logger::builder().filter_level(level).init();

    kutta_cli::run(cli, &mut std::io::stdout().lock())
}
