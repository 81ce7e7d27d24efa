//! Binary crate for the weather assistant HTTP server.
//!
//! This crate focuses on:
//! - Process bootstrap (.env loading, logging, config validation)
//! - The axum routes and the anonymous request counter

use std::net::SocketAddr;

use anyhow::Context;
use clap::Parser;
use meteo_core::{Config, MistralClient, OpenWeatherProvider, WeatherAgent};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod http;
mod stats;

#[derive(Parser, Debug)]
#[command(name = "meteo-server", version, about = "Conversational weather assistant")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "127.0.0.1:5000")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading config; a missing file is fine, missing keys
    // are not.
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder().with_max_level(Level::INFO).finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let args = Args::parse();
    let config = Config::from_env()?;

    info!(model = %config.model, lang = %config.language, "Starting weather assistant");

    let llm = MistralClient::new(config.mistral_api_key, config.model);
    let weather = OpenWeatherProvider::new(config.openweather_api_key, config.language);
    let agent = WeatherAgent::new(Box::new(llm), Box::new(weather));

    http::run_server(agent, args.listen).await
}
