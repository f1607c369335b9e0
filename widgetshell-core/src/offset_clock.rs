//! Wall clock with a persisted, user-correctable minute offset.

use chrono::{Duration, NaiveDateTime, Timelike};
use log::{debug, warn};

use crate::error::ClockError;
use crate::storage::KeyValueStore;
use crate::time_source::TimeSource;

/// Storage key for the offset, stored as a decimal integer string.
pub const OFFSET_KEY: &str = "clock_offset";

const MINUTES_PER_HOUR: u32 = 60;
const HOURS_PER_DAY: u32 = 24;

/// Displays `real clock + offset`, where the offset is a signed number of
/// minutes the user has dialled in.
pub struct OffsetClock<T: TimeSource, S: KeyValueStore> {
    source: T,
    storage: S,
    offset_minutes: i64,
}

impl<T: TimeSource, S: KeyValueStore> OffsetClock<T, S> {
    /// Load the offset from storage, defaulting to zero when missing or
    /// unparsable.
    pub fn load(source: T, storage: S) -> Self {
        let offset_minutes = match storage.get(OFFSET_KEY) {
            Some(raw) => match raw.trim().parse::<i64>() {
                Ok(offset) => offset,
                Err(e) => {
                    warn!("ignoring unreadable {} {:?}: {}", OFFSET_KEY, raw, e);
                    0
                }
            },
            None => 0,
        };

        debug!("loaded clock offset {}m", offset_minutes);
        OffsetClock {
            source,
            storage,
            offset_minutes,
        }
    }

    /// The displayed time. Recomputed from the real clock on every call.
    pub fn now(&self) -> NaiveDateTime {
        let real = self.source.now();
        Duration::try_minutes(self.offset_minutes)
            .and_then(|offset| real.checked_add_signed(offset))
            .unwrap_or(real)
    }

    /// The real clock, without the offset applied.
    pub fn real_now(&self) -> NaiveDateTime {
        self.source.now()
    }

    pub fn offset_minutes(&self) -> i64 {
        self.offset_minutes
    }

    /// The reset affordance is only offered while a correction is in effect.
    pub fn can_reset(&self) -> bool {
        self.offset_minutes != 0
    }

    pub fn bump_offset(&mut self, delta_minutes: i64) {
        self.store_offset(self.offset_minutes.saturating_add(delta_minutes));
    }

    pub fn reset(&mut self) {
        self.store_offset(0);
    }

    /// Set the offset so the displayed time reads `hour:minute` now.
    ///
    /// Out-of-range input is rejected and leaves the offset untouched.
    /// Returns the new offset in minutes.
    pub fn set_absolute(&mut self, hour: u32, minute: u32) -> Result<i64, ClockError> {
        if hour >= HOURS_PER_DAY || minute >= MINUTES_PER_HOUR {
            return Err(ClockError::OutOfRange { hour, minute });
        }

        let real = self.source.now();
        let target = i64::from(hour * MINUTES_PER_HOUR + minute);
        let current = i64::from(real.hour() * MINUTES_PER_HOUR + real.minute());

        let offset = target - current;
        self.store_offset(offset);
        Ok(offset)
    }

    /// Parse `HH:MM` text and apply it with [`OffsetClock::set_absolute`].
    pub fn set_absolute_from_str(&mut self, input: &str) -> Result<i64, ClockError> {
        let (hour, minute) = parse_wall_time(input)?;
        self.set_absolute(hour, minute)
    }

    /// Zero-padded `HH:MM` of the displayed time.
    pub fn display_hhmm(&self) -> String {
        self.now().format("%H:%M").to_string()
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    fn store_offset(&mut self, offset_minutes: i64) {
        debug!("clock offset {}m -> {}m", self.offset_minutes, offset_minutes);
        self.offset_minutes = offset_minutes;

        if let Err(e) = self.storage.set(OFFSET_KEY, &offset_minutes.to_string()) {
            warn!("could not persist {}: {}", OFFSET_KEY, e);
        }
    }
}

/// Parse user-entered `HH:MM` into an hour and minute.
///
/// Exactly two numeric components separated by a single `:` are accepted;
/// surrounding whitespace on each component is ignored.
pub fn parse_wall_time(input: &str) -> Result<(u32, u32), ClockError> {
    let malformed = || ClockError::Malformed(input.to_string());

    let mut parts = input.split(':');
    let (Some(hour), Some(minute), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };

    let hour = parse_component(hour).ok_or_else(malformed)?;
    let minute = parse_component(minute).ok_or_else(malformed)?;

    if hour >= HOURS_PER_DAY || minute >= MINUTES_PER_HOUR {
        return Err(ClockError::OutOfRange { hour, minute });
    }

    Ok((hour, minute))
}

fn parse_component(part: &str) -> Option<u32> {
    let part = part.trim();
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ShellError, ShellResult};
    use crate::storage::MemoryStore;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 18)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn clock_at(
        hour: u32,
        minute: u32,
    ) -> OffsetClock<impl Fn() -> NaiveDateTime, MemoryStore> {
        let real = at(hour, minute, 0);
        OffsetClock::load(move || real, MemoryStore::new())
    }

    #[test]
    fn now_without_offset_is_real_time() {
        let clock = clock_at(9, 0);
        assert_eq!(clock.now(), at(9, 0, 0));
        assert_eq!(clock.offset_minutes(), 0);
        assert!(!clock.can_reset());
    }

    #[test]
    fn now_is_stable_without_mutation() {
        let clock = clock_at(14, 30);
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn bump_sequence_nets_out() {
        let mut clock = clock_at(9, 0);
        for _ in 0..5 {
            clock.bump_offset(1);
        }
        for _ in 0..2 {
            clock.bump_offset(-1);
        }
        assert_eq!(clock.offset_minutes(), 3);
        assert_eq!(clock.now(), at(9, 3, 0));
        assert_eq!(clock.real_now(), at(9, 0, 0));
    }

    #[test]
    fn large_offsets_wrap_through_dates() {
        let mut clock = clock_at(23, 30);
        clock.bump_offset(24 * 60 + 45);
        let expected = NaiveDate::from_ymd_opt(2025, 10, 20)
            .unwrap()
            .and_hms_opt(0, 15, 0)
            .unwrap();
        assert_eq!(clock.now(), expected);

        clock.bump_offset(-3 * 24 * 60);
        assert_eq!(clock.now().date(), NaiveDate::from_ymd_opt(2025, 10, 17).unwrap());
    }

    #[test]
    fn reset_returns_to_zero() {
        let mut clock = clock_at(9, 0);
        clock.bump_offset(-17);
        assert!(clock.can_reset());
        clock.reset();
        assert_eq!(clock.offset_minutes(), 0);
        assert!(!clock.can_reset());
    }

    #[test]
    fn set_absolute_computes_offset_from_real_time() {
        let mut clock = clock_at(9, 0);
        assert_eq!(clock.set_absolute(9, 5), Ok(5));
        assert_eq!(clock.offset_minutes(), 5);
        assert_eq!(clock.display_hhmm(), "09:05");
    }

    #[test]
    fn set_absolute_can_go_negative() {
        let mut clock = clock_at(9, 0);
        assert_eq!(clock.set_absolute(7, 45), Ok(-75));
    }

    #[test]
    fn set_absolute_ignores_existing_offset() {
        let mut clock = clock_at(9, 0);
        clock.bump_offset(120);
        assert_eq!(clock.set_absolute(9, 10), Ok(10));
    }

    #[test]
    fn set_absolute_rejects_out_of_range() {
        let mut clock = clock_at(9, 0);
        clock.bump_offset(4);

        assert_eq!(
            clock.set_absolute(25, 0),
            Err(ClockError::OutOfRange { hour: 25, minute: 0 })
        );
        assert_eq!(
            clock.set_absolute(10, 60),
            Err(ClockError::OutOfRange { hour: 10, minute: 60 })
        );
        assert_eq!(clock.offset_minutes(), 4);
    }

    #[test]
    fn set_absolute_from_str_rejects_malformed_input() {
        let mut clock = clock_at(9, 0);
        for input in ["", "9", "9:", ":5", "9:05:00", "9-05", "nine:05", "9:5a", "-1:00", "9 : x"] {
            assert!(
                matches!(clock.set_absolute_from_str(input), Err(ClockError::Malformed(_))),
                "{input:?} should be malformed"
            );
        }
        assert_eq!(clock.offset_minutes(), 0);
    }

    #[test]
    fn parse_wall_time_accepts_padded_and_unpadded() {
        assert_eq!(parse_wall_time("09:05"), Ok((9, 5)));
        assert_eq!(parse_wall_time("9:5"), Ok((9, 5)));
        assert_eq!(parse_wall_time(" 23 : 59 "), Ok((23, 59)));
        assert_eq!(
            parse_wall_time("24:00"),
            Err(ClockError::OutOfRange { hour: 24, minute: 0 })
        );
    }

    #[test]
    fn offset_persists_and_reloads() {
        let real = at(9, 0, 0);
        let mut clock = OffsetClock::load(move || real, MemoryStore::new());
        clock.bump_offset(-42);

        let storage = clock.into_storage();
        assert_eq!(storage.get(OFFSET_KEY).as_deref(), Some("-42"));

        let reloaded = OffsetClock::load(move || real, storage);
        assert_eq!(reloaded.offset_minutes(), -42);
    }

    #[test]
    fn unreadable_offset_defaults_to_zero() {
        let mut storage = MemoryStore::new();
        storage.set(OFFSET_KEY, "twelve").unwrap();
        let real = at(9, 0, 0);
        let clock = OffsetClock::load(move || real, storage);
        assert_eq!(clock.offset_minutes(), 0);
    }

    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, _value: &str) -> ShellResult<()> {
            Err(ShellError::Storage {
                key: key.to_string(),
                source: std::io::Error::other("read-only"),
            })
        }
    }

    #[test]
    fn write_failure_keeps_memory_offset() {
        let mut seeded = MemoryStore::new();
        seeded.set(OFFSET_KEY, "10").unwrap();
        let real = at(9, 0, 0);
        let mut clock = OffsetClock::load(move || real, ReadOnlyStore(seeded));

        clock.bump_offset(5);
        assert_eq!(clock.offset_minutes(), 15);
        assert_eq!(clock.now(), at(9, 15, 0));

        assert_eq!(clock.set_absolute(8, 0), Ok(-60));
        assert_eq!(clock.now(), at(8, 0, 0));

        clock.reset();
        assert!(!clock.can_reset());

        let storage = clock.into_storage();
        assert_eq!(storage.get(OFFSET_KEY).as_deref(), Some("10"));
    }
}
