use std::path::{Path, PathBuf};

use actix_web::{web, App, HttpServer};
use amapgeo::{
    config, geolocate, transport::HttpTransport, AmapProvider, GeolocationProvider,
    LocationCallback, Observation, ProviderError,
};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tokio::io::AsyncReadExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the geolocate API
    Serve { port: Option<u16> },
    /// Locate a single observation read from a file or stdin
    Locate { file: Option<PathBuf> },
}

/// Prints a located position, keeps a failure for the exit status.
#[derive(Default)]
struct PrintCallback {
    error: Option<ProviderError>,
}

impl PrintCallback {
    fn finish(self) -> Result<()> {
        match self.error {
            Some(e) => Err(e).context("Failed to locate observation"),
            None => Ok(()),
        }
    }
}

impl LocationCallback for &mut PrintCallback {
    fn on_success(&mut self, latitude: f64, longitude: f64, radius: u32) {
        println!(
            "{}",
            json!({ "latitude": latitude, "longitude": longitude, "radius": radius })
        );
    }

    fn on_failure(&mut self, error: ProviderError) {
        self.error = Some(error);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let path = match cli.config.as_deref() {
        Some(x) => x,
        None => Path::new("config.toml"),
    };
    let config = config::load(path)?;
    let provider = AmapProvider::from_config(&config.amap()?)?;

    match cli.command {
        Command::Serve { port } => {
            let port = port.unwrap_or(config.http_port);
            let provider = web::Data::new(provider);
            info!(port, url = provider.transport().url(), "starting server");
            HttpServer::new(move || {
                App::new()
                    .app_data(provider.clone())
                    .configure(geolocate::configure::<AmapProvider<HttpTransport>>)
            })
            .bind(("0.0.0.0", port))?
            .run()
            .await?;
        }

        Command::Locate { file } => {
            let data = match file {
                Some(path) => tokio::fs::read(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = Vec::new();
                    tokio::io::stdin().read_to_end(&mut buf).await?;
                    buf
                }
            };
            let observation: Observation =
                serde_json::from_slice(&data).context("Failed to parse observation")?;
            let mut callback = PrintCallback::default();
            provider.get_location(&observation, &mut callback).await;
            callback.finish()?;
        }
    };

    Ok(())
}
