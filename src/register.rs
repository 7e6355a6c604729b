//! MCP9808 register map.

/// Default I2C address (A2 = A1 = A0 = GND).
pub const MCP9808_I2CADDR: u8 = 0x18;
/// Highest address reachable through the A2..A0 pins.
pub const MCP9808_I2CADDR_MAX: u8 = 0x1F;

/// Fast-mode maximum clock of the serial interface.
pub const MAX_BUS_FREQUENCY_HZ: u32 = 400_000;

/// Manufacturer ID register content, MSB first.
pub const MANUFACTURER_ID: [u8; 2] = [0x00, 0x54];
/// High byte of the device ID register. The low byte is the revision.
pub const DEVICE_ID: u8 = 0x04;

const FLAG_CRITICAL: u8 = 0x80;
const FLAG_UPPER: u8 = 0x40;
const FLAG_LOWER: u8 = 0x20;

/// Register pointers. Every register is read or written as 2 bytes, MSB first.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Register {
    /// Alert temperature upper boundary, TUPPER
    UpperLimit = 0x02,
    /// Alert temperature lower boundary, TLOWER
    LowerLimit = 0x03,
    /// Critical temperature, TCRIT
    CriticalLimit = 0x04,
    /// Ambient temperature, TA
    AmbientTemperature = 0x05,
    ManufacturerId = 0x06,
    /// Device ID (MSB) and revision (LSB)
    DeviceId = 0x07,
    Resolution = 0x08,
}

impl Register {
    #[inline]
    pub fn addr(self) -> u8 {
        self as u8
    }

    /// Registers whose content is a temperature.
    pub fn holds_temperature(self) -> bool {
        matches!(
            self,
            Register::UpperLimit | Register::LowerLimit | Register::CriticalLimit | Register::AmbientTemperature
        )
    }

    /// Alert limit registers, the only writable temperature registers.
    pub fn is_limit(self) -> bool {
        matches!(self, Register::UpperLimit | Register::LowerLimit | Register::CriticalLimit)
    }
}

/// Alert status bits carried in the ambient temperature MSB.
///
/// On the limit registers the same bits are reserved and always written as 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlertFlags {
    /// TA >= TCRIT
    pub critical: bool,
    /// TA > TUPPER
    pub upper: bool,
    /// TA < TLOWER
    pub lower: bool,
}

impl AlertFlags {
    pub fn from_msb(msb: u8) -> Self {
        AlertFlags {
            critical: msb & FLAG_CRITICAL != 0,
            upper: msb & FLAG_UPPER != 0,
            lower: msb & FLAG_LOWER != 0,
        }
    }

    pub fn bits(&self) -> u8 {
        let mut bits = 0;
        if self.critical {
            bits |= FLAG_CRITICAL;
        }
        if self.upper {
            bits |= FLAG_UPPER;
        }
        if self.lower {
            bits |= FLAG_LOWER;
        }
        bits
    }

    /// Any alert condition active.
    pub fn any(&self) -> bool {
        self.critical || self.upper || self.lower
    }
}
