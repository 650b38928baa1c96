mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.global.verbose);

    match run(cli).await {
        Ok(()) => Ok(()),
        // A user-cancelled operation is a clean exit, not a failure.
        Err(err) if err.is_cancelled() => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = commands::connect(&cli.global).await?;

    // A pending forced password change gates everything else.
    if ctx.session.password_change_required && !matches!(cli.command, Command::Passwd) {
        return Err(CliError::PasswordChangeRequired);
    }

    tracing::debug!(user = %ctx.session.username, "session established");

    match cli.command {
        Command::Devices(args) => commands::devices::handle(&ctx, args, &cli.global).await,
        Command::Status(args) => commands::status::handle(&ctx, &args, &cli.global).await,
        Command::Watch(args) => commands::watch::handle(&ctx, &args).await,
        Command::Sections(args) => commands::sections::handle(&ctx, args, &cli.global).await,
        Command::Passwd => commands::passwd::handle(&ctx).await,
    }
}
