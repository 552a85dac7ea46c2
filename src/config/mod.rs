// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Server configuration
//!
//! Every option can be given on the command line or through the environment
//! (a `.env` file is loaded first when present).

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

use crate::classifier::DEFAULT_MODEL_PATH;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_INTRA_THREADS: usize = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid listen host '{host}': {source}")]
    InvalidHost {
        host: String,
        source: std::net::AddrParseError,
    },
}

/// Cats-vs-dogs classification server
#[derive(Parser, Debug, Clone)]
#[command(name = "catvsdog-node")]
#[command(version)]
#[command(about = "HTTP endpoint classifying uploaded images as cat or dog", long_about = None)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to
    #[arg(long, env = "API_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to bind the HTTP listener to
    #[arg(long, env = "API_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Pretrained ONNX classifier loaded at startup
    #[arg(long, env = "MODEL_PATH", default_value = DEFAULT_MODEL_PATH)]
    pub model_path: PathBuf,

    /// ONNX Runtime intra-op thread count
    #[arg(long, env = "ORT_INTRA_THREADS", default_value_t = DEFAULT_INTRA_THREADS)]
    pub intra_threads: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            intra_threads: DEFAULT_INTRA_THREADS,
        }
    }
}

impl ServerConfig {
    /// Socket address the server binds to
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.host.parse().map_err(|source| ConfigError::InvalidHost {
            host: self.host.clone(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
