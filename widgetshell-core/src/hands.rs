//! Analog clock hand angles, in degrees clockwise from twelve o'clock.

use chrono::{NaiveDateTime, Timelike};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
    pub second: f64,
}

impl HandAngles {
    pub fn at(time: NaiveDateTime) -> Self {
        let hour = f64::from(time.hour() % 12);
        let minute = f64::from(time.minute());
        let second = f64::from(time.second());

        HandAngles {
            hour: (hour + minute / 60.0) / 12.0 * 360.0,
            minute: ((minute + second / 60.0) / 60.0) * 360.0,
            second: (second / 60.0) * 360.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 18)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn midnight_and_noon_point_up() {
        assert_eq!(
            HandAngles::at(at(0, 0, 0)),
            HandAngles {
                hour: 0.0,
                minute: 0.0,
                second: 0.0
            }
        );
        assert_eq!(HandAngles::at(at(12, 0, 0)).hour, 0.0);
    }

    #[test]
    fn hour_hand_advances_with_minutes() {
        let angles = HandAngles::at(at(15, 30, 0));
        assert_eq!(angles.hour, 105.0);
        assert_eq!(angles.minute, 180.0);
    }

    #[test]
    fn minute_hand_advances_with_seconds() {
        let angles = HandAngles::at(at(9, 15, 30));
        assert!((angles.minute - 93.0).abs() < 1e-9);
        assert_eq!(angles.second, 180.0);
    }
}
