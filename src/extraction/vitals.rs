//! Advisory range checks for vital sign readings.
//!
//! Classification only: readings are never clamped or corrected, and an
//! abnormal reading never blocks data entry.

use std::ops::RangeInclusive;

use super::types::BloodPressure;

/// Normal adult ranges.
pub mod ranges {
    use std::ops::RangeInclusive;

    pub const SYSTOLIC_MMHG: RangeInclusive<u32> = 90..=140;
    pub const DIASTOLIC_MMHG: RangeInclusive<u32> = 60..=90;
    pub const HEART_RATE_BPM: RangeInclusive<u32> = 60..=100;
    pub const TEMPERATURE_C: RangeInclusive<f32> = 36.0..=37.5;
}

/// Parse a `"SYS/DIA"` reading. `None` if either side is not an integer.
pub fn parse_blood_pressure(reading: &str) -> Option<BloodPressure> {
    let (sys, dia) = reading.trim().split_once('/')?;
    Some(BloodPressure {
        systolic: sys.trim().parse().ok()?,
        diastolic: dia.trim().parse().ok()?,
    })
}

impl BloodPressure {
    pub fn is_normal(&self) -> bool {
        ranges::SYSTOLIC_MMHG.contains(&self.systolic)
            && ranges::DIASTOLIC_MMHG.contains(&self.diastolic)
    }
}

/// Normal iff 90 ≤ systolic ≤ 140 and 60 ≤ diastolic ≤ 90. Malformed readings are not normal.
pub fn is_normal_blood_pressure(reading: &str) -> bool {
    parse_blood_pressure(reading).is_some_and(|bp| bp.is_normal())
}

pub fn is_normal_heart_rate(bpm: u32) -> bool {
    ranges::HEART_RATE_BPM.contains(&bpm)
}

pub fn is_normal_temperature(celsius: f32) -> bool {
    in_range(&ranges::TEMPERATURE_C, celsius)
}

fn in_range(range: &RangeInclusive<f32>, value: f32) -> bool {
    value.is_finite() && range.contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_bound_reading_is_normal() {
        assert!(is_normal_blood_pressure("140/85"));
    }

    #[test]
    fn hypertensive_reading_is_not_normal() {
        assert!(!is_normal_blood_pressure("160/95"));
    }

    #[test]
    fn boundaries_are_inclusive() {
        assert!(is_normal_blood_pressure("90/60"));
        assert!(is_normal_blood_pressure("140/90"));
        assert!(!is_normal_blood_pressure("89/70"));
        assert!(!is_normal_blood_pressure("120/91"));
        assert!(!is_normal_blood_pressure("120/59"));
    }

    #[test]
    fn malformed_reading_is_not_normal() {
        assert!(!is_normal_blood_pressure(""));
        assert!(!is_normal_blood_pressure("120"));
        assert!(!is_normal_blood_pressure("abc/80"));
        assert!(parse_blood_pressure("120/").is_none());
    }

    #[test]
    fn parses_components() {
        assert_eq!(
            parse_blood_pressure(" 118 / 76 "),
            Some(BloodPressure { systolic: 118, diastolic: 76 })
        );
    }

    #[test]
    fn heart_rate_range() {
        assert!(is_normal_heart_rate(60));
        assert!(is_normal_heart_rate(100));
        assert!(!is_normal_heart_rate(110));
        assert!(!is_normal_heart_rate(48));
    }

    #[test]
    fn temperature_range() {
        assert!(is_normal_temperature(36.8));
        assert!(is_normal_temperature(37.5));
        assert!(!is_normal_temperature(38.2));
        assert!(!is_normal_temperature(35.1));
        assert!(!is_normal_temperature(f32::NAN));
    }
}
