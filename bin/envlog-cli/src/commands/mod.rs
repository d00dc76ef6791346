// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

pub mod latest;
pub mod log;
pub mod status;
pub mod summary;

use anyhow::Context;
use sampler::SamplerConfig;
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Database flags shared by the commands that touch the store.
#[derive(clap::Args)]
pub struct DatabaseArgs {
    /// MySQL connection URL.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Table holding the readings.
    #[arg(long)]
    pub table: Option<String>,
}

impl DatabaseArgs {
    pub fn apply(self, config: &mut SamplerConfig) {
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
        if let Some(table) = self.table {
            config.database.table = table;
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `-v`.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the config file if one was given, defaults otherwise.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<SamplerConfig> {
    match path {
        Some(path) => SamplerConfig::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(SamplerConfig::default()),
    }
}
