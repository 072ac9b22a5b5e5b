use anyhow::Context;
use clap::Parser;
use lunglens::errors::ErrorHandler;
use lunglens::structs::cli::Cli;
use lunglens::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .try_init()
        .context("failed to initialise logging")?;

    let cli = Cli::parse();
    let mut runner = CommandRunner::new();

    if let Err(e) = runner.run_command(cli.command).await {
        ErrorHandler::handle_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
