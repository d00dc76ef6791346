// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! `envlog status` command: one reading, nothing persisted.
//!
//! Shows which host temperature source answered, so a Pi without
//! `vcgencmd` on the PATH is easy to spot.

use compensation::CompensationEngine;
use env_sensor::EnvironmentSensor;
use host_thermal::HostThermalReader;
use sampler::SamplerConfig;

pub async fn execute(config: SamplerConfig) -> anyhow::Result<()> {
    println!("╔══════════════════════════════════════════════════════╗");
    println!("║              envlog · Sensor Status                  ║");
    println!("╚══════════════════════════════════════════════════════╝");
    println!();

    // ── Host ───────────────────────────────────────────────────
    let thermal = HostThermalReader::new(&config.thermal);
    let host = thermal.read_with_source().await;
    println!("  Host");
    match host {
        Some(reading) => {
            println!("   Temperature:  {:.2} C", reading.celsius);
            println!("   Source:       {}", reading.source);
        }
        None => {
            println!("   Temperature:  unavailable");
            println!("   Tried:        {}", config.thermal.command.join(" "));
            println!("                 {}", config.thermal.zone_path.display());
        }
    }
    println!();

    // ── Sensor ─────────────────────────────────────────────────
    println!("  Sensor");
    let sample = env_sensor::open(&config.sensor).and_then(|mut sensor| {
        println!("   Device:       {}", sensor.name());
        sensor.sample()
    });
    let sample = match sample {
        Ok(sample) => sample,
        Err(e) => {
            println!("   Error:        {e}");
            return Ok(());
        }
    };
    println!("   Temperature:  {:.2} C (raw)", sample.temperature);
    println!("   Humidity:     {:.2} %", sample.humidity);
    println!("   Pressure:     {:.2} hPa", sample.pressure);
    println!();

    // ── Compensation ───────────────────────────────────────────
    let engine = CompensationEngine::new(config.compensation);
    let corrected = engine.compensate(sample.temperature, host.map(|h| h.celsius));
    println!("  Compensation");
    println!(
        "   Weight:       {}  Offset: {} C",
        engine.params().weight,
        engine.params().offset
    );
    println!("   Corrected:    {corrected:.2} C");
    if host.is_none() {
        println!("   Note:         no host temperature, offset only");
    }

    Ok(())
}
