#![cfg_attr(not(test), no_std)]

//! Read-only driver for the LTC4162 battery charger.
//!
//! [`ll`] describes the register map and its fields, [`telemetry`] and [`thermistor`] turn ADC
//! codes into physical values, and [`Ltc4162`] ties those to an I²C bus.

use core::fmt;

use device_descriptor::{
    find_register, register_at, ReadOnlyRegister, RegisterDescriptor, UnknownRegister, UNRECOGNIZED,
};
use embedded_hal::i2c::I2c;
use register_access::{RegisterAccess, RegisterReader};

mod descriptors;
pub mod lerp;
pub mod ll;
pub mod telemetry;
pub mod thermistor;

pub use lerp::DegenerateScale;
pub use telemetry::{Channel, ScalingConstants, Unit};

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus transfer failed.
    Bus(E),
    UnknownRegister,
    DegenerateScale,
}

impl<E> From<UnknownRegister> for Error<E> {
    fn from(_: UnknownRegister) -> Self {
        Error::UnknownRegister
    }
}

impl<E> From<DegenerateScale> for Error<E> {
    fn from(_: DegenerateScale) -> Self {
        Error::DegenerateScale
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "bus error: {e:?}"),
            Error::UnknownRegister => fmt::Display::fmt(&UnknownRegister, f),
            Error::DegenerateScale => fmt::Display::fmt(&DegenerateScale, f),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

/// Chemistry and cell count, as strapped on the part.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChemCells {
    pub chem: u8,
    pub cell_count: u8,
}

impl ChemCells {
    pub fn from_register(reg: ll::ChemCells) -> Self {
        Self {
            chem: reg.chem().read_field_bits() as u8,
            cell_count: reg.cell_count().read_field_bits() as u8,
        }
    }

    pub fn chemistry(&self) -> Option<ll::Chemistry> {
        ll::Chemistry::try_from(self.chem as u16).ok()
    }

    pub fn chemistry_label(&self) -> &'static str {
        ll::Chemistry::TABLE.label(self.chem as u32)
    }

    pub fn cell_count_label(&self) -> &'static str {
        ll::CellCount::TABLE.label(self.cell_count as u32)
    }
}

/// Every status register and converted measurement, read in one pass.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    pub chem_cells: ChemCells,
    pub charger_state: ll::ChargerState,
    pub charge_status: ll::ChargeStatus,
    pub system_status: ll::SystemStatus,
    pub telemetry_status: ll::TelemetryStatus,
    /// V
    pub vbat: f32,
    /// V
    pub vin: f32,
    /// V
    pub vout: f32,
    /// A, negative while discharging
    pub ibat: f32,
    /// A
    pub iin: f32,
    /// °C
    pub die_temp: f32,
    /// °C, `None` without a usable thermistor
    pub thermistor_temp: Option<f32>,
    /// Ω per cell
    pub bsr: f32,
}

impl Snapshot {
    pub fn charger_state_label(&self) -> &'static str {
        ll::ChargerStateCode::TABLE.label(self.charger_state.bits() as u32)
    }

    pub fn charge_status_label(&self) -> &'static str {
        ll::ChargeStatusCode::TABLE.label(self.charge_status.bits() as u32)
    }
}

pub struct Ltc4162<I> {
    interface: ll::Ltc4162I2cInterface<I>,
    constants: ScalingConstants,
}

impl<I> Ltc4162<I>
where
    I: I2c,
{
    pub const DEFAULT_DEVICE_ADDR: u8 = ll::Ltc4162I2cInterface::<I>::DEFAULT_DEVICE_ADDR;

    pub fn new(i2c: I, constants: ScalingConstants) -> Self {
        Self::with_address(i2c, Self::DEFAULT_DEVICE_ADDR, constants)
    }

    pub fn with_address(i2c: I, address: u8, constants: ScalingConstants) -> Self {
        Self {
            interface: ll::Ltc4162I2cInterface::new(i2c, address),
            constants,
        }
    }

    pub fn constants(&self) -> &ScalingConstants {
        &self.constants
    }

    pub fn address(&self) -> u8 {
        self.interface.address
    }

    pub fn inner_mut(&mut self) -> &mut I {
        &mut self.interface.i2c
    }

    pub fn into_inner(self) -> I {
        self.interface.i2c
    }

    pub fn read_raw(&mut self, address: u8) -> Result<u16, Error<I::Error>> {
        let raw = self.interface.read_raw(address).map_err(Error::Bus)?;

        match register_at(ll::REGISTERS, address) {
            Some(reg) => log::debug!("{} (0x{:02X}) = 0x{:04X}", reg.name, address, raw),
            None => log::debug!("0x{:02X} = 0x{:04X}", address, raw),
        }

        Ok(raw)
    }

    /// Reads a register by its datasheet mnemonic, like `VBAT_REG`.
    pub fn read_named(
        &mut self,
        name: &str,
    ) -> Result<(&'static RegisterDescriptor, u16), Error<I::Error>> {
        let reg = find_register(ll::REGISTERS, name)?;
        let raw = self.read_raw(reg.address)?;

        Ok((reg, raw))
    }

    pub fn read_register<R>(&mut self) -> Result<R, Error<I::Error>>
    where
        R: ReadOnlyRegister<RegisterWidth = u16>,
    {
        let reg = <R as RegisterReader<u16>>::read(&mut self.interface).map_err(Error::Bus)?;

        log::debug!("{} (0x{:02X}) = 0x{:04X}", R::NAME, R::ADDRESS, reg.bits());

        Ok(reg)
    }

    pub fn read_chem_cells(&mut self) -> Result<ChemCells, Error<I::Error>> {
        let chem_cells = ChemCells::from_register(self.read_register()?);

        if chem_cells.chemistry().is_none() {
            log::warn!("Unrecognized chemistry code {}", chem_cells.chem);
        }
        if chem_cells.cell_count_label() == UNRECOGNIZED {
            log::warn!("Unrecognized cell count code {}", chem_cells.cell_count);
        }

        Ok(chem_cells)
    }

    pub fn read_charger_state(&mut self) -> Result<ll::ChargerState, Error<I::Error>> {
        self.read_register()
    }

    pub fn read_charge_status(&mut self) -> Result<ll::ChargeStatus, Error<I::Error>> {
        self.read_register()
    }

    pub fn read_system_status(&mut self) -> Result<ll::SystemStatus, Error<I::Error>> {
        self.read_register()
    }

    pub fn read_telemetry_status(&mut self) -> Result<ll::TelemetryStatus, Error<I::Error>> {
        self.read_register()
    }

    pub fn read_limit_alerts(&mut self) -> Result<ll::LimitAlerts, Error<I::Error>> {
        self.read_register()
    }

    /// Reads and converts one telemetry channel.
    pub fn read_channel(&mut self, channel: Channel) -> Result<f32, Error<I::Error>> {
        let raw = self.read_raw(channel.register())?;
        let value = channel.convert(&self.constants, raw)?;

        Ok(value)
    }

    /// Battery voltage in V, for a pack of `cell_count` cells.
    pub fn read_vbat(&mut self, cell_count: u8) -> Result<f32, Error<I::Error>> {
        self.read_channel(Channel::BatteryVoltage { cell_count })
    }

    pub fn read_vbat_filtered(&mut self, cell_count: u8) -> Result<f32, Error<I::Error>> {
        self.read_channel(Channel::FilteredBatteryVoltage { cell_count })
    }

    pub fn read_vin(&mut self) -> Result<f32, Error<I::Error>> {
        self.read_channel(Channel::InputVoltage)
    }

    pub fn read_vout(&mut self) -> Result<f32, Error<I::Error>> {
        self.read_channel(Channel::OutputVoltage)
    }

    pub fn read_ibat(&mut self) -> Result<f32, Error<I::Error>> {
        self.read_channel(Channel::BatteryCurrent)
    }

    pub fn read_iin(&mut self) -> Result<f32, Error<I::Error>> {
        self.read_channel(Channel::InputCurrent)
    }

    pub fn read_die_temp(&mut self) -> Result<f32, Error<I::Error>> {
        self.read_channel(Channel::DieTemperature)
    }

    pub fn read_bsr(&mut self) -> Result<f32, Error<I::Error>> {
        self.read_channel(Channel::BatteryResistance)
    }

    /// Thermistor temperature in °C, `None` if the thermistor is open or out of range.
    pub fn read_thermistor_temp(&mut self) -> Result<Option<f32>, Error<I::Error>> {
        let reg: ll::ThermistorVoltage = self.read_register()?;

        Ok(thermistor::decode(&self.constants, reg.bits()))
    }

    pub fn read_snapshot(&mut self) -> Result<Snapshot, Error<I::Error>> {
        let chem_cells = self.read_chem_cells()?;
        let cell_count = chem_cells.cell_count;

        Ok(Snapshot {
            chem_cells,
            charger_state: self.read_charger_state()?,
            charge_status: self.read_charge_status()?,
            system_status: self.read_system_status()?,
            telemetry_status: self.read_telemetry_status()?,
            vbat: self.read_vbat(cell_count)?,
            vin: self.read_vin()?,
            vout: self.read_vout()?,
            ibat: self.read_ibat()?,
            iin: self.read_iin()?,
            die_temp: self.read_die_temp()?,
            thermistor_temp: self.read_thermistor_temp()?,
            bsr: self.read_bsr()?,
        })
    }
}
