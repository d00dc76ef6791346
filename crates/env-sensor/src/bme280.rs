// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Bosch BME280 over the Raspberry Pi I²C bus.
//!
//! The chip is put in normal mode with ×1 oversampling on all channels and
//! a 1000 ms standby, so every read returns the latest conversion. Raw ADC
//! values are converted with the floating-point formulas of the datasheet
//! (section 8.1).

use crate::{EnvironmentSensor, SensorError, SensorSample};
use rppal::i2c::I2c;

/// Default slave address (SDO pulled low).
pub const DEFAULT_ADDRESS: u16 = 0x76;

const CHIP_ID: u8 = 0x60;

// Register map.
const REG_CHIP_ID: u8 = 0xD0;
const REG_CTRL_HUM: u8 = 0xF2;
const REG_CTRL_MEAS: u8 = 0xF4;
const REG_CONFIG: u8 = 0xF5;
const REG_CALIB_00: u8 = 0x88;
const REG_CALIB_26: u8 = 0xE1;
const REG_ADC: u8 = 0xF7;

const CALIB_00_LEN: usize = 26;
const CALIB_26_LEN: usize = 7;
const ADC_LEN: usize = 8;

/// Factory trimming parameters read once at start-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    pub t1: u16,
    pub t2: i16,
    pub t3: i16,
    pub p: [f64; 9],
    pub h1: u8,
    pub h2: i16,
    pub h3: u8,
    pub h4: i16,
    pub h5: i16,
    pub h6: i8,
}

impl Calibration {
    /// Decodes the two calibration blocks (`0x88..=0xA1` and `0xE1..=0xE7`).
    pub fn from_registers(block0: &[u8; CALIB_00_LEN], block1: &[u8; CALIB_26_LEN]) -> Self {
        let u16_at = |i: usize| u16::from_le_bytes([block0[i], block0[i + 1]]);
        let i16_at = |i: usize| i16::from_le_bytes([block0[i], block0[i + 1]]);

        let mut p = [0.0; 9];
        p[0] = f64::from(u16_at(6));
        for (n, slot) in p.iter_mut().enumerate().skip(1) {
            *slot = f64::from(i16_at(6 + 2 * n));
        }

        // H4 and H5 are 12-bit signed values sharing the nibbles of 0xE5.
        let h4 = (i16::from(block1[3] as i8) << 4) | i16::from(block1[4] & 0x0F);
        let h5 = (i16::from(block1[5] as i8) << 4) | i16::from(block1[4] >> 4);

        Self {
            t1: u16_at(0),
            t2: i16_at(2),
            t3: i16_at(4),
            p,
            h1: block0[25],
            h2: i16::from_le_bytes([block1[0], block1[1]]),
            h3: block1[2],
            h4,
            h5,
            h6: block1[6] as i8,
        }
    }

    /// Returns `(t_fine, °C)` for a raw temperature ADC value.
    pub fn temperature(&self, adc_t: u32) -> (f64, f64) {
        let adc = f64::from(adc_t);
        let t1 = f64::from(self.t1);
        let var1 = (adc / 16384.0 - t1 / 1024.0) * f64::from(self.t2);
        let d = adc / 131072.0 - t1 / 8192.0;
        let var2 = d * d * f64::from(self.t3);
        let t_fine = var1 + var2;
        (t_fine, t_fine / 5120.0)
    }

    /// Returns pressure in hPa for a raw ADC value, given `t_fine`.
    pub fn pressure(&self, adc_p: u32, t_fine: f64) -> f64 {
        let p = &self.p;
        let mut var1 = t_fine / 2.0 - 64000.0;
        let mut var2 = var1 * var1 * p[5] / 32768.0;
        var2 += var1 * p[4] * 2.0;
        var2 = var2 / 4.0 + p[3] * 65536.0;
        var1 = (p[2] * var1 * var1 / 524288.0 + p[1] * var1) / 524288.0;
        var1 = (1.0 + var1 / 32768.0) * p[0];
        if var1 == 0.0 {
            return 0.0;
        }
        let mut pa = 1048576.0 - f64::from(adc_p);
        pa = (pa - var2 / 4096.0) * 6250.0 / var1;
        var1 = p[8] * pa * pa / 2147483648.0;
        var2 = pa * p[7] / 32768.0;
        pa += (var1 + var2 + p[6]) / 16.0;
        pa / 100.0
    }

    /// Returns relative humidity in %, clamped to `[0, 100]`, given `t_fine`.
    pub fn humidity(&self, adc_h: u32, t_fine: f64) -> f64 {
        let h = t_fine - 76800.0;
        let mut rh = (f64::from(adc_h)
            - (f64::from(self.h4) * 64.0 + f64::from(self.h5) / 16384.0 * h))
            * (f64::from(self.h2) / 65536.0
                * (1.0
                    + f64::from(self.h6) / 67108864.0
                        * h
                        * (1.0 + f64::from(self.h3) / 67108864.0 * h)));
        rh *= 1.0 - f64::from(self.h1) * rh / 524288.0;
        rh.clamp(0.0, 100.0)
    }
}

/// Raw 20-bit pressure/temperature and 16-bit humidity conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMeasurement {
    pub pressure: u32,
    pub temperature: u32,
    pub humidity: u32,
}

impl RawMeasurement {
    /// Unpacks the `0xF7..=0xFE` burst.
    pub fn from_registers(data: &[u8; ADC_LEN]) -> Self {
        let d = data.map(u32::from);
        Self {
            pressure: (d[0] << 12) | (d[1] << 4) | (d[2] >> 4),
            temperature: (d[3] << 12) | (d[4] << 4) | (d[5] >> 4),
            humidity: (d[6] << 8) | d[7],
        }
    }
}

/// A BME280 on the Raspberry Pi I²C bus.
pub struct Bme280 {
    i2c: I2c,
    calibration: Calibration,
}

impl Bme280 {
    /// Opens `bus`, checks the chip id at `address`, configures
    /// normal mode, and reads the calibration.
    pub fn open(bus: u8, address: u16) -> Result<Self, SensorError> {
        let mut i2c = I2c::with_bus(bus)?;
        i2c.set_slave_address(address)?;

        let id = i2c.smbus_read_byte(REG_CHIP_ID)?;
        if id != CHIP_ID {
            return Err(SensorError::WrongChip {
                address,
                expected: CHIP_ID,
                found: id,
            });
        }

        let osrs_t: u8 = 1; // temperature oversampling x1
        let osrs_p: u8 = 1; // pressure oversampling x1
        let osrs_h: u8 = 1; // humidity oversampling x1
        let mode: u8 = 3; // normal
        let t_sb: u8 = 5; // standby 1000 ms
        let filter: u8 = 0;

        // ctrl_hum only takes effect after a write to ctrl_meas.
        i2c.smbus_write_byte(REG_CTRL_HUM, osrs_h)?;
        i2c.smbus_write_byte(REG_CTRL_MEAS, (osrs_t << 5) | (osrs_p << 2) | mode)?;
        i2c.smbus_write_byte(REG_CONFIG, (t_sb << 5) | (filter << 2))?;

        let mut block0 = [0u8; CALIB_00_LEN];
        let mut block1 = [0u8; CALIB_26_LEN];
        i2c.block_read(REG_CALIB_00, &mut block0)?;
        i2c.block_read(REG_CALIB_26, &mut block1)?;
        let calibration = Calibration::from_registers(&block0, &block1);

        tracing::info!("BME280 ready on i2c-{bus} at 0x{address:02x}");
        Ok(Self { i2c, calibration })
    }

    fn read_raw(&mut self) -> Result<RawMeasurement, SensorError> {
        let mut data = [0u8; ADC_LEN];
        self.i2c.block_read(REG_ADC, &mut data)?;
        Ok(RawMeasurement::from_registers(&data))
    }

    /// Reads one burst and converts all three quantities.
    fn measure(&mut self) -> Result<(f64, f64, f64), SensorError> {
        let raw = self.read_raw()?;
        let (t_fine, temperature) = self.calibration.temperature(raw.temperature);
        let humidity = self.calibration.humidity(raw.humidity, t_fine);
        let pressure = self.calibration.pressure(raw.pressure, t_fine);
        if pressure <= 0.0 {
            return Err(SensorError::InvalidData {
                quantity: "pressure",
                value: pressure,
            });
        }
        Ok((temperature, humidity, pressure))
    }
}

impl EnvironmentSensor for Bme280 {
    fn name(&self) -> &'static str {
        "bme280"
    }

    fn read_temperature(&mut self) -> Result<f64, SensorError> {
        self.measure().map(|(t, _, _)| t)
    }

    fn read_humidity(&mut self) -> Result<f64, SensorError> {
        self.measure().map(|(_, h, _)| h)
    }

    fn read_pressure(&mut self) -> Result<f64, SensorError> {
        self.measure().map(|(_, _, p)| p)
    }

    fn sample(&mut self) -> Result<SensorSample, SensorError> {
        let (t, h, p) = self.measure()?;
        Ok(SensorSample::new(t, h, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Trimming values from the Bosch datasheet worked example.
    fn datasheet_calibration() -> Calibration {
        Calibration {
            t1: 27504,
            t2: 26435,
            t3: -1000,
            p: [
                36477.0, -10685.0, 3024.0, 2855.0, 140.0, -7.0, 15500.0, -14600.0, 6000.0,
            ],
            h1: 75,
            h2: 362,
            h3: 0,
            h4: 313,
            h5: 50,
            h6: 30,
        }
    }

    #[test]
    fn test_temperature_conversion() {
        let (t_fine, celsius) = datasheet_calibration().temperature(519888);
        assert!((celsius - 25.08).abs() < 0.01);
        assert!((t_fine - 128422.0).abs() < 5.0);
    }

    #[test]
    fn test_pressure_conversion() {
        let cal = datasheet_calibration();
        let (t_fine, _) = cal.temperature(519888);
        let hpa = cal.pressure(415148, t_fine);
        assert!((hpa - 1006.53).abs() < 0.05, "got {hpa}");
    }

    #[test]
    fn test_humidity_is_clamped() {
        let cal = datasheet_calibration();
        let (t_fine, _) = cal.temperature(519888);
        for adc in [0, 20000, 30000, 65535] {
            let rh = cal.humidity(adc, t_fine);
            assert!((0.0..=100.0).contains(&rh), "adc {adc} gave {rh}");
        }
        assert_eq!(cal.humidity(0, t_fine), 0.0);
        assert_eq!(cal.humidity(65535, t_fine), 100.0);
    }

    #[test]
    fn test_zero_p1_gives_zero_pressure() {
        let mut cal = datasheet_calibration();
        cal.p[0] = 0.0;
        assert_eq!(cal.pressure(415148, 128422.0), 0.0);
    }

    #[test]
    fn test_decode_calibration_blocks() {
        let mut block0 = [0u8; CALIB_00_LEN];
        block0[0..2].copy_from_slice(&27504u16.to_le_bytes());
        block0[2..4].copy_from_slice(&26435i16.to_le_bytes());
        block0[4..6].copy_from_slice(&(-1000i16).to_le_bytes());
        block0[6..8].copy_from_slice(&36477u16.to_le_bytes());
        block0[8..10].copy_from_slice(&(-10685i16).to_le_bytes());
        block0[22..24].copy_from_slice(&6000i16.to_le_bytes());
        block0[25] = 75;

        // H2 = 362, H3 = 0, H4 = 313 (0x139), H5 = -50 (0xFCE), H6 = 30.
        let block1 = [0x6A, 0x01, 0x00, 0x13, 0xE9, 0xFC, 0x1E];

        let cal = Calibration::from_registers(&block0, &block1);
        assert_eq!(cal.t1, 27504);
        assert_eq!(cal.t2, 26435);
        assert_eq!(cal.t3, -1000);
        assert_eq!(cal.p[0], 36477.0);
        assert_eq!(cal.p[1], -10685.0);
        assert_eq!(cal.p[8], 6000.0);
        assert_eq!(cal.h1, 75);
        assert_eq!(cal.h2, 362);
        assert_eq!(cal.h3, 0);
        assert_eq!(cal.h4, 313);
        assert_eq!(cal.h5, -50);
        assert_eq!(cal.h6, 30);
    }

    #[test]
    fn test_unpack_adc_burst() {
        let raw = RawMeasurement::from_registers(&[0x65, 0x5A, 0xC0, 0x7E, 0xED, 0x00, 0x6E, 0x8F]);
        assert_eq!(raw.pressure, 0x655AC);
        assert_eq!(raw.temperature, 0x7EED0);
        assert_eq!(raw.humidity, 0x6E8F);
    }
}
