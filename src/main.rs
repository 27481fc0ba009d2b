mod auth;
mod cli;
mod config;
mod error;
mod output;
mod providers;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use cli::Cli;
use error::ArtifactError;
use log::info;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let cli = Cli::parse_from(cli::normalize_single_dash_flags(std::env::args_os()));
    info!("Starting ciartifacts - GitLab CI Artifact Downloader");

    match cli.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<ArtifactError>()
                .map_or(1, ArtifactError::exit_code);

            eprintln!("{} {err:#}", output::bright_red("error:"));
            if code == 2 {
                eprintln!("\n{}", Cli::command().render_usage());
                eprintln!("For more information, try '--help'.");
            }

            ExitCode::from(code)
        }
    }
}
