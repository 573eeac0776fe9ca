use std::process::ExitCode;

use clap::Parser;

use limber::app;
use limber_core::LimberConfig;

#[derive(Parser)]
#[command(version, about = "Steps you through a timed stretching routine")]
struct Cli {}

#[tokio::main]
async fn main() -> ExitCode {
    let _cli = Cli::parse();
    let _guard = limber::logging::init();

    let config = LimberConfig::load();
    tracing::info!(?config, path = ?LimberConfig::path(), "Configuration loaded");

    match app::run(config).await {
        Ok(last) => {
            let total = last.activities.len();
            if last.is_complete() {
                println!("All done! {total} stretches completed.");
            } else {
                println!(
                    "Stopped at {}/{}: {}",
                    last.current_index + 1,
                    total,
                    last.current_activity().unwrap_or_default()
                );
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(error = %err, "Limber exited with error");
            eprintln!("limber: {err}");
            if let Some(source) = std::error::Error::source(&err) {
                eprintln!("  caused by: {source}");
            }
            ExitCode::FAILURE
        }
    }
}
