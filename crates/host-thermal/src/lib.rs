// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # host-thermal
//!
//! Reads the host processor temperature of a Raspberry Pi-class board.
//!
//! # Sources
//! 1. **Firmware utility**: `vcgencmd measure_temp`, printing `temp=54.8'C`.
//!    Bounded by a timeout; the child is killed if it overruns.
//! 2. **Thermal zone**: `/sys/class/thermal/thermal_zone0/temp`, in
//!    millidegrees Celsius.
//!
//! # Graceful Degradation
//! A failed first source falls through to the second; a failed second
//! source yields `None`. Failures are logged at `debug` and never returned.
//!
//! # Example
//! ```no_run
//! use host_thermal::HostThermalReader;
//!
//! # async fn example() {
//! let reader = HostThermalReader::default();
//! match reader.read().await {
//!     Some(c) => println!("CPU at {c:.2} °C"),
//!     None => println!("no host temperature available"),
//! }
//! # }
//! ```

mod command;
mod error;
mod reader;
mod zone;

pub use command::{parse_measure_temp, read_command};
pub use error::ThermalError;
pub use reader::{HostReading, HostTemperature, HostThermalReader, ThermalSettings, ThermalSource};
pub use zone::{read_zone, THERMAL_ZONE_PATH};
