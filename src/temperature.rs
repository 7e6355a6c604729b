//! Temperature register codec.
//!
//! TA, TUPPER, TLOWER and TCRIT share one layout:
//!
//! ```text
//!  MSB: F F F S 2^7 2^6 2^5 2^4    LSB: 2^3 2^2 2^1 2^0 2^-1 2^-2 2^-3 2^-4
//! ```
//!
//! `F` are alert flags (reserved on the limit registers), `S` is the sign.
//! A set sign means the reading is the 12-bit value minus 256 °C.

use core::fmt;
use num_traits::float::FloatCore;

// Clears the 3 flag bits
const TEMP_MSB_MSK: u8 = 0x1F;
const TEMP_SIGN_BIT: u8 = 0x10;
const TEMP_MAGNITUDE_MSK: u8 = 0x0F;
const TEMP_VALUE_MSK: u16 = 0x1FFF;

// 256 °C in 1/16 steps
const TEMP_BIAS: i16 = 4096;
const STEPS_PER_DEGREE: f32 = 16.0;

/// Lowest temperature the registers can hold, in Celsius.
pub const TEMP_MIN_CELSIUS: f32 = -256.0;
/// Highest temperature the registers can hold, in Celsius.
pub const TEMP_MAX_CELSIUS: f32 = 255.9375;

/// Temperature with the sensor's 0.0625 °C resolution.
///
/// Stored as a signed count of 1/16 °C steps, so conversions to and from the
/// register format are exact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature(i16);

impl Temperature {
    pub const MIN: Temperature = Temperature(-TEMP_BIAS);
    pub const MAX: Temperature = Temperature(TEMP_BIAS - 1);
    pub const ZERO: Temperature = Temperature(0);

    /// Build from a count of 1/16 °C steps, `None` outside `MIN..=MAX`.
    pub fn from_raw(steps: i16) -> Option<Self> {
        if (Self::MIN.0..=Self::MAX.0).contains(&steps) {
            Some(Temperature(steps))
        } else {
            None
        }
    }

    /// Round to the nearest 1/16 °C. `None` for NaN or values out of range.
    pub fn from_celsius(celsius: f32) -> Option<Self> {
        if !(TEMP_MIN_CELSIUS..=TEMP_MAX_CELSIUS).contains(&celsius) {
            return None;
        }
        Some(Temperature(FloatCore::round(celsius * STEPS_PER_DEGREE) as i16))
    }

    /// Decode 2 register bytes, MSB first. Flag bits are ignored.
    pub fn from_register(data: [u8; 2]) -> Self {
        let msb = data[0] & TEMP_MSB_MSK;
        let magnitude = (((msb & TEMP_MAGNITUDE_MSK) as i16) << 8) | data[1] as i16;
        if msb & TEMP_SIGN_BIT != 0 {
            Temperature(magnitude - TEMP_BIAS)
        } else {
            Temperature(magnitude)
        }
    }

    /// Encode as 2 register bytes, MSB first, flag bits cleared.
    pub fn to_register(self) -> [u8; 2] {
        ((self.0 as u16) & TEMP_VALUE_MSK).to_be_bytes()
    }

    /// Count of 1/16 °C steps.
    #[inline]
    pub fn raw(self) -> i16 {
        self.0
    }

    #[inline]
    pub fn celsius(self) -> f32 {
        self.0 as f32 / STEPS_PER_DEGREE
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }
}

impl From<Temperature> for f32 {
    fn from(t: Temperature) -> f32 {
        t.celsius()
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}°C", self.celsius())
    }
}

/// Decode a temperature register into Celsius.
pub fn decode(data: [u8; 2]) -> f32 {
    Temperature::from_register(data).celsius()
}

/// Encode Celsius into temperature register bytes, `None` if out of range.
pub fn encode(celsius: f32) -> Option<[u8; 2]> {
    Temperature::from_celsius(celsius).map(Temperature::to_register)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_zero() {
        assert_eq!(decode([0x00, 0x00]), 0.0);
    }

    #[test]
    fn decode_room_temperature() {
        // 1 * 16 + 0x90 / 16
        assert_eq!(decode([0x01, 0x90]), 25.0);
        assert_eq!(decode([0x01, 0x94]), 25.25);
        assert_eq!(decode([0x01, 0x9F]), 25.9375);
    }

    #[test]
    fn decode_masks_alert_flags() {
        assert_eq!(decode([0xE1, 0x90]), 25.0);
        assert_eq!(decode([0x81, 0x90]), 25.0);
        assert_eq!(decode([0x41, 0x90]), 25.0);
        assert_eq!(decode([0x21, 0x90]), 25.0);
        assert_eq!(decode([0xF1, 0x00]), decode([0x11, 0x00]));
    }

    #[test]
    fn decode_negative() {
        // Sign set: 13-bit two's complement, (m' * 16 + LSB / 16) - 256, so the
        // sign-magnitude reading of [0x11, 0x00] as -16 does not apply
        assert_eq!(decode([0x11, 0x00]), -240.0);
        assert_eq!(decode([0x1F, 0xFF]), -0.0625);
        assert_eq!(decode([0x1F, 0xF0]), -1.0);
        assert_eq!(decode([0x1E, 0x70]), -25.0);
        assert_eq!(decode([0x10, 0x00]), -256.0);
    }

    #[test]
    fn decode_bounds() {
        assert_eq!(decode([0x0F, 0xF0]), 255.0);
        assert_eq!(decode([0x0F, 0xFF]), TEMP_MAX_CELSIUS);
        assert_eq!(decode([0x10, 0x00]), TEMP_MIN_CELSIUS);
        assert_eq!(Temperature::from_register([0x0F, 0xFF]), Temperature::MAX);
        assert_eq!(Temperature::from_register([0x10, 0x00]), Temperature::MIN);
    }

    #[test]
    fn decode_matches_datasheet_formula() {
        for msb in 0..=0xFFu8 {
            for lsb in 0..=0xFFu8 {
                let upper = (msb & 0x1F) as f32;
                let expected = if upper as u8 & 0x10 != 0 {
                    ((msb & 0x0F) as f32 * 16.0 + lsb as f32 / 16.0) - 256.0
                } else {
                    upper * 16.0 + lsb as f32 / 16.0
                };
                assert_eq!(decode([msb, lsb]), expected, "raw {:02x} {:02x}", msb, lsb);
            }
        }
    }

    #[test]
    fn encode_values() {
        assert_eq!(encode(0.0), Some([0x00, 0x00]));
        assert_eq!(encode(25.0), Some([0x01, 0x90]));
        assert_eq!(encode(-0.0625), Some([0x1F, 0xFF]));
        assert_eq!(encode(-240.0), Some([0x11, 0x00]));
        assert_eq!(encode(TEMP_MIN_CELSIUS), Some([0x10, 0x00]));
        assert_eq!(encode(TEMP_MAX_CELSIUS), Some([0x0F, 0xFF]));
    }

    #[test]
    fn encode_rounds_to_resolution() {
        assert_eq!(encode(25.03), Some([0x01, 0x90]));
        assert_eq!(encode(25.04), Some([0x01, 0x91]));
        assert_eq!(encode(-0.01), Some([0x00, 0x00]));
    }

    #[test]
    fn encode_out_of_range() {
        assert_eq!(encode(300.0), None);
        assert_eq!(encode(256.0), None);
        assert_eq!(encode(-256.0625), None);
        assert_eq!(encode(f32::NAN), None);
        assert_eq!(encode(f32::INFINITY), None);
        assert_eq!(encode(f32::NEG_INFINITY), None);
    }

    #[test]
    fn every_step_survives_the_register() {
        for steps in Temperature::MIN.raw()..=Temperature::MAX.raw() {
            let t = Temperature::from_raw(steps).unwrap();
            assert_eq!(Temperature::from_register(t.to_register()), t);
            assert_eq!(Temperature::from_celsius(t.celsius()), Some(t));
            assert_eq!(t.to_register()[0] & 0xE0, 0);
        }
    }

    #[test]
    fn from_raw_bounds() {
        assert_eq!(Temperature::from_raw(-4096), Some(Temperature::MIN));
        assert_eq!(Temperature::from_raw(4095), Some(Temperature::MAX));
        assert_eq!(Temperature::from_raw(4096), None);
        assert_eq!(Temperature::from_raw(-4097), None);
    }

    #[test]
    fn conversions() {
        let t = Temperature::from_register([0x1E, 0x70]);
        assert!(t.is_negative());
        assert_eq!(t.raw(), -400);
        assert_eq!(f32::from(t), -25.0);
        assert_eq!(format!("{}", t), "-25°C");
        assert_eq!(format!("{}", Temperature::from_register([0x01, 0x94])), "25.25°C");
        assert!(!Temperature::ZERO.is_negative());
    }
}
