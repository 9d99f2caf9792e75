// Server binary: one pcterm session per telnet connection.

use std::sync::Arc;

use anyhow::{Context, Result};

use pcterm::{api::ApiClient, config::load, server::Server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (safe to ignore if not found)
    let _ = dotenvy::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = load().context("Failed to load configuration")?;
    cfg.print_summary();

    let client = ApiClient::new(&cfg.api_url, cfg.submit_timeout)
        .context("Failed to build contact API client")?;
    let server = Server::bind(&cfg, Arc::new(client)).await?;
    let addr = server.local_addr()?;

    log::info!("pcterm listening on {addr}");
    println!("pcterm ready: telnet {} {}", cfg.host, addr.port());

    server
        .serve(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::warn!("failed to listen for ctrl-c: {e}");
                std::future::pending::<()>().await;
            }
            log::info!("interrupt received");
        })
        .await
}
