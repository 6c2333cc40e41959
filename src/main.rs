//! Car price prediction - main entry point

use clap::Parser;
use car_price_prediction::cli::{cmd_predict, cmd_serve, cmd_train, resolve_server_config, Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "car_price_prediction=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let server_config = resolve_server_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Train { data, models_dir, n_estimators, max_depth, test_split, seed } => {
            let models_dir = models_dir.unwrap_or(server_config.models_dir);
            cmd_train(&data, &models_dir, n_estimators, max_depth, test_split, seed)?;
        }
        Commands::Serve { host, port, models_dir } => {
            let mut config = server_config;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(dir) = models_dir {
                config.models_dir = dir;
            }
            cmd_serve(config).await?;
        }
        Commands::Predict { record, models_dir } => {
            let models_dir = models_dir.unwrap_or(server_config.models_dir);
            cmd_predict(&record, &models_dir)?;
        }
    }

    Ok(())
}
