// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use catvsdog_node::{
    api::{start_server, AppState},
    classifier::OnnxClassifier,
    config::ServerConfig,
    version,
};
use clap::Parser;
use std::{env, sync::Arc};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = ServerConfig::parse();

    info!("🚀 Starting {}", version::get_version_string());

    // The model must load before any traffic is accepted
    let classifier = match OnnxClassifier::load(&config.model_path, config.intra_threads) {
        Ok(classifier) => classifier,
        Err(e) => {
            error!("❌ Failed to load classifier model: {}", e);
            return Err(e).with_context(|| {
                format!(
                    "cannot start without model {}",
                    config.model_path.display()
                )
            });
        }
    };
    info!("✅ Classifier ready ({})", classifier.model_path().display());

    let state = AppState::new(Arc::new(classifier));

    start_server(&config, state).await
}
