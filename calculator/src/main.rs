mod aggregate;
mod app;
mod cli;
mod config;
mod fetch;
mod models;
mod prices;
mod report;
#[cfg(test)]
mod test_support;

use app::RunError;
use clap::{CommandFactory, Parser};
use cli::Cli;
use config::{OutputMode, Settings};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr, stdout is reserved for the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_log_filter(cli.verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::from_cli(&cli);

    let report = match app::run(&settings).await {
        Ok(report) => report,
        Err(RunError::NoInput) => {
            let _ = Cli::command().print_help();
            return ExitCode::from(RunError::NoInput.exit_code());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(e.exit_code());
        }
    };

    match settings.output {
        OutputMode::Text => print!("{}", report::render_text(&report)),
        OutputMode::Json => match report::render_json(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: failed to encode report: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}

fn default_log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "warn,ff_net_worth_calc=info,mesh_parser=info",
        _ => "debug,hyper=info,reqwest=info",
    }
}
