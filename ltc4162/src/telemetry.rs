use crate::{
    lerp::{DegenerateScale, Lerp},
    ll,
};

/// Die temperature at ADC code 0, in °C.
const DIE_TEMP_OFFSET: f64 = -264.4;
/// ADC codes per °C of die temperature.
const DIE_TEMP_GAIN: f64 = 46.557;
/// ADC codes per Ω of battery series resistance, per Ω of RSNSB.
const BSR_CODES: f64 = 500.0;

/// Board dependent constants used to scale raw telemetry codes.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScalingConstants {
    /// Input current sense resistor, Ω
    pub rsnsi: f32,
    /// Battery current sense resistor, Ω
    pub rsnsb: f32,
    /// Thermistor bias resistor, Ω
    pub rntcbias: f32,
    /// Resistance in series with the thermistor, Ω
    pub rntcser: f32,
    pub vindiv: f32,
    pub voutdiv: f32,
    pub batdiv: f32,
    pub avprog: f32,
    pub avclprog: f32,
    /// ADC codes per volt
    pub adcgain: f32,
    pub vref: f32,
}

impl Default for ScalingConstants {
    fn default() -> Self {
        Self {
            rsnsi: 0.100,
            rsnsb: 0.010,
            rntcbias: 10_000.0,
            rntcser: 0.0,
            vindiv: 30.0,
            voutdiv: 30.0 * 1.00232,
            batdiv: 3.5,
            avprog: 37.5,
            avclprog: 37.5,
            adcgain: 18191.0,
            vref: 1.2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Unit {
    Volt,
    Ampere,
    Celsius,
    Ohm,
}

impl Unit {
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Volt => "V",
            Unit::Ampere => "A",
            Unit::Celsius => "°C",
            Unit::Ohm => "Ω",
        }
    }
}

/// A telemetry measurement that converts linearly from its ADC code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    /// Battery voltage. The per-cell reading is scaled by `cell_count / 2`.
    BatteryVoltage { cell_count: u8 },
    FilteredBatteryVoltage { cell_count: u8 },
    InputVoltage,
    OutputVoltage,
    BatteryCurrent,
    InputCurrent,
    DieTemperature,
    /// Battery series resistance, per cell.
    BatteryResistance,
}

impl Channel {
    pub fn register(self) -> u8 {
        match self {
            Channel::BatteryVoltage { .. } => ll::VBAT_REG,
            Channel::FilteredBatteryVoltage { .. } => ll::VBAT_FILT_REG,
            Channel::InputVoltage => ll::VIN_REG,
            Channel::OutputVoltage => ll::VOUT_REG,
            Channel::BatteryCurrent => ll::IBAT_REG,
            Channel::InputCurrent => ll::IIN_REG,
            Channel::DieTemperature => ll::DIE_TEMP_REG,
            Channel::BatteryResistance => ll::BSR_REG,
        }
    }

    pub fn unit(self) -> Unit {
        match self {
            Channel::BatteryVoltage { .. }
            | Channel::FilteredBatteryVoltage { .. }
            | Channel::InputVoltage
            | Channel::OutputVoltage => Unit::Volt,
            Channel::BatteryCurrent | Channel::InputCurrent => Unit::Ampere,
            Channel::DieTemperature => Unit::Celsius,
            Channel::BatteryResistance => Unit::Ohm,
        }
    }

    /// Whether the chip reports this channel in two's complement.
    pub fn is_signed(self) -> bool {
        matches!(
            self,
            Channel::BatteryCurrent | Channel::InputCurrent | Channel::DieTemperature
        )
    }

    /// Returns the line that maps ADC codes of this channel to physical units.
    ///
    /// Fails if the constants leave the line without a finite slope, which a zero divider or
    /// gain does.
    pub fn scale(self, constants: &ScalingConstants) -> Result<Lerp, DegenerateScale> {
        let rsnsi = constants.rsnsi as f64;
        let rsnsb = constants.rsnsb as f64;
        let adcgain = constants.adcgain as f64;

        let scale = match self {
            Channel::BatteryVoltage { .. } | Channel::FilteredBatteryVoltage { .. } => {
                Lerp::through((0.0, 0.0), (1.0, constants.batdiv as f64 / adcgain * 2.0))
            }
            Channel::InputVoltage => {
                Lerp::through((0.0, 0.0), (1.0, constants.vindiv as f64 / adcgain))
            }
            Channel::OutputVoltage => {
                Lerp::through((0.0, 0.0), (1.0, constants.voutdiv as f64 / adcgain))
            }
            Channel::BatteryCurrent => Lerp::through(
                (0.0, 0.0),
                (1.0, 1.0 / rsnsb / constants.avprog as f64 / adcgain),
            ),
            Channel::InputCurrent => Lerp::through(
                (0.0, 0.0),
                (1.0, 1.0 / rsnsi / constants.avclprog as f64 / adcgain),
            ),
            Channel::DieTemperature => Lerp::through(
                (0.0, DIE_TEMP_OFFSET),
                (1.0, DIE_TEMP_OFFSET + 1.0 / DIE_TEMP_GAIN),
            ),
            Channel::BatteryResistance => Lerp::through((0.0, 0.0), (BSR_CODES, rsnsb)),
        };

        scale.slope()?;

        Ok(scale)
    }

    /// Converts a raw register value of this channel to its physical unit.
    ///
    /// ```rust
    /// # use ltc4162::{Channel, ScalingConstants};
    /// let constants = ScalingConstants::default();
    /// let vbat = Channel::BatteryVoltage { cell_count: 4 };
    ///
    /// assert_eq!(vbat.convert(&constants, 0), Ok(0.0));
    /// assert!(Channel::BatteryCurrent.convert(&constants, 0xFFFF).unwrap() < 0.0);
    /// ```
    pub fn convert(self, constants: &ScalingConstants, raw: u16) -> Result<f32, DegenerateScale> {
        let code = if self.is_signed() {
            raw as i16 as f64
        } else {
            raw as f64
        };

        let value = self.scale(constants)?.map(code)?;

        Ok(match self {
            Channel::BatteryVoltage { cell_count }
            | Channel::FilteredBatteryVoltage { cell_count } => {
                (value * cell_count as f64 / 2.0) as f32
            }
            _ => value as f32,
        })
    }
}
