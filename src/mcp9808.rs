//! MCP9808 ±0.5°C maximum accuracy digital temperature sensor.
//!
//! - Resolution: 0.0625 C
//! - Range: -40 to +125 C (operating), registers span -256 to +255.9375 C
//! - Address(7bit): 0x18 to 0x1F, selected by the A2..A0 pins

use core::fmt;

use embedded_hal::i2c::I2c;

use crate::register::{
    AlertFlags, Register, DEVICE_ID, MANUFACTURER_ID, MCP9808_I2CADDR, MCP9808_I2CADDR_MAX,
};
use crate::temperature::Temperature;

/// MCP9808 errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// No MCP9808 answered at this address, or the identity registers did not match
    DeviceNotFound(u8),
    /// I²C bus error
    Bus(E),
    /// Threshold outside of -256.0 to 255.9375 C
    ValueOutOfRange,
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DeviceNotFound(addr) => write!(f, "unable to find MCP9808 at I2C address 0x{:02X}", addr),
            Error::Bus(e) => write!(f, "I2C bus error: {:?}", e),
            Error::ValueOutOfRange => f.write_str("temperature out of range"),
        }
    }
}

/// Content of the manufacturer and device ID registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Identity {
    /// manufacturer ID, `0x0054` for Microchip
    pub manufacturer_id: u16,
    /// device ID, `0x04` for the MCP9808
    pub device_id: u8,
    /// silicon revision
    pub revision: u8,
}

impl Identity {
    fn parse(manufacturer: [u8; 2], device: [u8; 2]) -> Self {
        Identity {
            manufacturer_id: u16::from_be_bytes(manufacturer),
            device_id: device[0],
            revision: device[1],
        }
    }

    /// Manufacturer and device ID match an MCP9808. Any revision is accepted.
    pub fn is_supported(&self) -> bool {
        self.manufacturer_id == u16::from_be_bytes(MANUFACTURER_ID) && self.device_id == DEVICE_ID
    }
}

/// One ambient temperature reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Ambient {
    /// ambient temperature, flags masked off
    pub temperature: Temperature,
    /// alert status at the time of the conversion
    pub flags: AlertFlags,
}

/// Alert limit registers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Limit {
    Upper,
    Lower,
    Critical,
}

impl Limit {
    pub fn register(self) -> Register {
        match self {
            Limit::Upper => Register::UpperLimit,
            Limit::Lower => Register::LowerLimit,
            Limit::Critical => Register::CriticalLimit,
        }
    }
}

/// Representation of an MCP9808.
///
/// Only obtainable through a successful identity check. Every accessor
/// performs a fresh bus transaction, nothing is cached.
#[derive(Debug)]
pub struct Mcp9808<I2C> {
    /// concrete I²C device implementation
    i2c: I2C,
    /// I²C device address
    address: u8,
}

impl<I2C> Mcp9808<I2C>
where
    I2C: I2c,
{
    /// Create a driver at the default address `0x18` and verify the device identity.
    pub fn new(i2c: I2C) -> Result<Self, Error<I2C::Error>> {
        Self::new_with_address(i2c, MCP9808_I2CADDR)
    }

    /// Create a driver at `0x18..=0x1F` and verify the device identity.
    pub fn new_with_address(i2c: I2C, address: u8) -> Result<Self, Error<I2C::Error>> {
        if !(MCP9808_I2CADDR..=MCP9808_I2CADDR_MAX).contains(&address) {
            return Err(Error::DeviceNotFound(address));
        }
        let mut sensor = Mcp9808 { i2c, address };
        sensor.verify_identity()?;
        Ok(sensor)
    }

    pub fn release(self) -> I2C {
        self.i2c
    }

    pub fn address(&self) -> u8 {
        self.address
    }

    /// Read manufacturer ID, device ID and revision.
    pub fn identity(&mut self) -> Result<Identity, Error<I2C::Error>> {
        let manufacturer = self.read_register(Register::ManufacturerId)?;
        let device = self.read_register(Register::DeviceId)?;
        Ok(Identity::parse(manufacturer, device))
    }

    fn verify_identity(&mut self) -> Result<(), Error<I2C::Error>> {
        // A missing device NAKs, which is reported the same as a wrong one
        let identity = self.identity().map_err(|_| Error::DeviceNotFound(self.address))?;
        if identity.is_supported() {
            #[cfg(feature = "defmt")]
            defmt::debug!("MCP9808 rev {=u8} at {=u8:#x}", identity.revision, self.address);
            Ok(())
        } else {
            #[cfg(feature = "defmt")]
            defmt::debug!("not an MCP9808 at {=u8:#x}: {}", self.address, identity);
            Err(Error::DeviceNotFound(self.address))
        }
    }

    /// Ambient temperature together with the alert flags of the same read.
    pub fn read_ambient(&mut self) -> Result<Ambient, Error<I2C::Error>> {
        let data = self.read_register(Register::AmbientTemperature)?;
        Ok(Ambient {
            temperature: Temperature::from_register(data),
            flags: AlertFlags::from_msb(data[0]),
        })
    }

    pub fn ambient_temperature(&mut self) -> Result<Temperature, Error<I2C::Error>> {
        self.read_ambient().map(|ambient| ambient.temperature)
    }

    pub fn alert_flags(&mut self) -> Result<AlertFlags, Error<I2C::Error>> {
        self.read_ambient().map(|ambient| ambient.flags)
    }

    pub fn upper_temperature_limit(&mut self) -> Result<Temperature, Error<I2C::Error>> {
        self.read_temperature(Register::UpperLimit)
    }

    pub fn lower_temperature_limit(&mut self) -> Result<Temperature, Error<I2C::Error>> {
        self.read_temperature(Register::LowerLimit)
    }

    pub fn critical_temperature_limit(&mut self) -> Result<Temperature, Error<I2C::Error>> {
        self.read_temperature(Register::CriticalLimit)
    }

    pub fn set_upper_temperature_limit(&mut self, celsius: f32) -> Result<(), Error<I2C::Error>> {
        self.write_temperature(Register::UpperLimit, celsius)
    }

    pub fn set_lower_temperature_limit(&mut self, celsius: f32) -> Result<(), Error<I2C::Error>> {
        self.write_temperature(Register::LowerLimit, celsius)
    }

    pub fn set_critical_temperature_limit(&mut self, celsius: f32) -> Result<(), Error<I2C::Error>> {
        self.write_temperature(Register::CriticalLimit, celsius)
    }

    fn read_temperature(&mut self, register: Register) -> Result<Temperature, Error<I2C::Error>> {
        debug_assert!(register.holds_temperature());
        self.read_register(register).map(Temperature::from_register)
    }

    /// Write a limit register, e.g. with a value read back from another one.
    pub fn set_limit(&mut self, limit: Limit, temperature: Temperature) -> Result<(), Error<I2C::Error>> {
        self.write_register(limit.register(), temperature.to_register())
    }

    fn write_temperature(&mut self, register: Register, celsius: f32) -> Result<(), Error<I2C::Error>> {
        debug_assert!(register.is_limit());
        let temperature = Temperature::from_celsius(celsius).ok_or(Error::ValueOutOfRange)?;
        self.write_register(register, temperature.to_register())
    }

    fn read_register(&mut self, register: Register) -> Result<[u8; 2], Error<I2C::Error>> {
        let mut data = [0u8; 2];
        self.i2c
            .write_read(self.address, &[register.addr()], &mut data)
            .map_err(Error::Bus)?;
        #[cfg(feature = "defmt")]
        defmt::trace!("read {} = {:x}", register, data);
        Ok(data)
    }

    fn write_register(&mut self, register: Register, payload: [u8; 2]) -> Result<(), Error<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::trace!("write {} = {:x}", register, payload);
        self.i2c
            .write(self.address, &[register.addr(), payload[0], payload[1]])
            .map_err(Error::Bus)
    }
}
