// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # envlog
//!
//! Command-line interface for the envlog environment logger.
//!
//! ## Usage
//! ```bash
//! # Log a compensated reading every 2 seconds until interrupted
//! envlog log --database-url mysql://logger@localhost/sensor_data
//!
//! # Try the pipeline without a database
//! envlog log --dry-run --max-ticks 5
//!
//! # Show the 10 most recent rows
//! envlog latest
//!
//! # Today's temperatures and the 24 h pressure outlook
//! envlog summary
//! ```

mod commands;

use clap::{Parser, Subcommand};
use sampler::Schedule;

#[derive(Parser)]
#[command(
    name = "envlog",
    about = "Environment sensor logger with host heat compensation",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file (command-line flags take precedence).
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,

    /// Enable verbose logging (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample, compensate and persist readings until interrupted.
    Log {
        #[command(flatten)]
        database: commands::DatabaseArgs,

        /// Host heat weight.
        #[arg(long)]
        weight: Option<f64>,

        /// Manual calibration offset in °C.
        #[arg(long, allow_negative_numbers = true)]
        offset: Option<f64>,

        /// Seconds to wait between ticks.
        #[arg(short, long)]
        interval: Option<u64>,

        /// Tick scheduling: fixed-delay or fixed-rate.
        #[arg(long)]
        schedule: Option<Schedule>,

        /// Keep readings in memory instead of writing to the database.
        #[arg(long)]
        dry_run: bool,

        /// Stop after this many ticks.
        #[arg(long)]
        max_ticks: Option<u64>,
    },

    /// Print the most recent readings.
    Latest {
        #[command(flatten)]
        database: commands::DatabaseArgs,

        /// Number of rows to show.
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: u32,
    },

    /// Summarise today's temperatures and forecast from the pressure trend.
    Summary {
        #[command(flatten)]
        database: commands::DatabaseArgs,
    },

    /// Read the sensor and host temperature once, without persisting.
    Status,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    commands::init_tracing(cli.verbose);

    let mut config = commands::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Log {
            database,
            weight,
            offset,
            interval,
            schedule,
            dry_run,
            max_ticks,
        } => {
            database.apply(&mut config);
            if let Some(weight) = weight {
                config.compensation.weight = weight;
            }
            if let Some(offset) = offset {
                config.compensation.offset = offset;
            }
            if let Some(interval) = interval {
                config.interval_secs = interval;
            }
            if let Some(schedule) = schedule {
                config.schedule = schedule;
            }
            config.validate()?;
            commands::log::execute(config, dry_run, max_ticks).await
        }
        Commands::Latest { database, limit } => {
            database.apply(&mut config);
            commands::latest::execute(config, limit).await
        }
        Commands::Summary { database } => {
            database.apply(&mut config);
            commands::summary::execute(config).await
        }
        Commands::Status => commands::status::execute(config).await,
    }
}
