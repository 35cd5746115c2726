//! NTC thermistor decoding.
//!
//! The thermistor sits at the bottom of a divider fed from the ADC reference, so the ADC code
//! maps to a resistance first, and the resistance is looked up in the thermistor's curve.

use crate::{lerp::interpolate, telemetry::ScalingConstants};

/// ADC code of a full-scale thermistor reading, the bias voltage itself.
const FULL_SCALE: f32 = 21829.0;

/// Codes above this mean that the thermistor is missing or disconnected.
pub const OPEN_THRESHOLD: u16 = 21684;

/// Resistance of the 10 kΩ NTC at selected temperatures, °C to Ω, by rising temperature.
#[rustfmt::skip]
pub const NTC_TABLE: &[(f32, f32)] = &[
    (-40.0, 214063.67),
    (-34.0, 152840.30),
    (-28.0, 110480.73),
    (-21.0, 76798.02),
    (-14.0, 54214.99),
    (-6.0, 37075.65),
    (4.0, 23649.71),
    (33.0, 7400.97),
    (44.0, 5001.22),
    (53.0, 3693.55),
    (62.0, 2768.21),
    (70.0, 2167.17),
    (78.0, 1714.08),
    (86.0, 1368.87),
    (94.0, 1103.18),
    (102.0, 896.73),
    (110.0, 734.86),
    (118.0, 606.86),
    (126.0, 504.80),
    (134.0, 422.81),
    (142.0, 356.45),
    (150.0, 302.36),
];

/// Returns the thermistor resistance in Ω, or `None` if the thermistor is open.
pub fn resistance(constants: &ScalingConstants, code: u16) -> Option<f32> {
    if code > OPEN_THRESHOLD {
        return None;
    }

    let code = code as f32;
    Some(constants.rntcbias * code / (FULL_SCALE - code) - constants.rntcser)
}

/// Looks up the temperature of a thermistor resistance, in °C.
///
/// Returns `None` outside of the tabulated range.
pub fn temperature(ohms: f32) -> Option<f32> {
    NTC_TABLE.windows(2).find_map(|pair| {
        let (t0, r0) = pair[0];
        let (t1, r1) = pair[1];

        if (r1..=r0).contains(&ohms) {
            interpolate(r0 as f64, t0 as f64, r1 as f64, t1 as f64, ohms as f64)
                .ok()
                .map(|celsius| celsius as f32)
        } else {
            None
        }
    })
}

/// Converts a `THERMISTOR_VOLTAGE_REG` reading to °C.
pub fn decode(constants: &ScalingConstants, code: u16) -> Option<f32> {
    let ohms = resistance(constants, code)?;
    let temp = temperature(ohms);

    if temp.is_none() {
        log::debug!("Thermistor resistance {} Ω is out of range", ohms);
    }

    temp
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn table_is_monotonic() {
        for pair in NTC_TABLE.windows(2) {
            assert!(pair[0].0 < pair[1].0);
            assert!(pair[0].1 > pair[1].1);
        }
    }

    #[test]
    fn resistance_of_codes() {
        let constants = ScalingConstants::default();

        assert_eq!(resistance(&constants, 0), Some(0.0));

        let half = resistance(&constants, 10_914).unwrap();
        assert!((half - 10_000.0).abs() < 2.0, "{half}");

        let constants = ScalingConstants {
            rntcser: 100.0,
            ..Default::default()
        };
        let with_series = resistance(&constants, 10_914).unwrap();
        assert!((with_series - 9_900.0).abs() < 2.0, "{with_series}");
    }

    #[test]
    fn open_thermistor() {
        let constants = ScalingConstants::default();

        assert!(resistance(&constants, OPEN_THRESHOLD).is_some());
        assert_eq!(resistance(&constants, OPEN_THRESHOLD + 1), None);
        assert_eq!(decode(&constants, 21_829), None);
        assert_eq!(decode(&constants, u16::MAX), None);
    }

    #[test]
    fn table_points() {
        for &(celsius, ohms) in NTC_TABLE {
            let decoded = temperature(ohms).unwrap();
            assert!((decoded - celsius).abs() < 1e-3, "{decoded} != {celsius}");
        }
    }

    #[test]
    fn room_temperature() {
        let constants = ScalingConstants::default();

        let temp = decode(&constants, 10_914).unwrap();
        assert!(4.0 < temp && temp < 33.0, "{temp}");

        // warmer means lower resistance, which means a lower code
        let warmer = decode(&constants, 8_000).unwrap();
        assert!(warmer > temp);
    }

    #[test]
    fn out_of_range() {
        assert_eq!(temperature(300.0), None);
        assert_eq!(temperature(250_000.0), None);

        let constants = ScalingConstants::default();
        assert_eq!(decode(&constants, 0), None);
    }
}
