//! Clock and civil-time presentation for timestamps.
//!
//! Production code uses `SystemClock`, which delegates to `chrono::Utc::now()`.
//! Tests inject a fixed clock to make formatted output deterministic.

use chrono::{DateTime, FixedOffset, Utc};
use chrono_tz::Tz;

/// `2024-01-15T14:30:00.123+07`
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f+07";

/// UTC+7, used when the zone database has no entry for the configured name.
pub const FALLBACK_OFFSET: FixedOffset = match FixedOffset::east_opt(7 * 60 * 60) {
    Some(offset) => offset,
    None => panic!("+07:00 is within a day of UTC"),
};

/// Trait for getting the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to `chrono::Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Zone used to present timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CivilZone {
    /// Resolved from the zone database.
    Named(Tz),
    /// Fixed offset substitute.
    Fixed(FixedOffset),
}

impl CivilZone {
    /// Resolve `name` from the zone database, substituting a fixed UTC+7
    /// offset when the name is unknown. Never fails.
    pub fn resolve(name: &str) -> Self {
        match name.parse::<Tz>() {
            Ok(tz) => CivilZone::Named(tz),
            Err(e) => {
                tracing::debug!(zone = name, error = %e, "Zone lookup failed, using fixed +07:00");
                CivilZone::Fixed(FALLBACK_OFFSET)
            }
        }
    }

    /// Render `at` as `YYYY-MM-DDTHH:mm:ss.SSS+07` in this zone.
    pub fn format(&self, at: DateTime<Utc>) -> String {
        match self {
            CivilZone::Named(tz) => at.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string(),
            CivilZone::Fixed(offset) => at
                .with_timezone(offset)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 7, 30, 0).unwrap() + chrono::Duration::milliseconds(123)
    }

    #[test]
    fn system_clock_returns_time() {
        // after 2020-01-01
        assert!(SystemClock.now().timestamp() > 1_577_836_800);
    }

    #[test]
    fn named_zone_formats_with_millis_and_plus_seven() {
        let zone = CivilZone::resolve("Asia/Jakarta");
        assert_eq!(zone, CivilZone::Named(chrono_tz::Asia::Jakarta));
        assert_eq!(zone.format(instant()), "2024-01-15T14:30:00.123+07");
    }

    #[test]
    fn unknown_zone_falls_back_to_fixed_offset() {
        let zone = CivilZone::resolve("Mars/Olympus_Mons");
        assert_eq!(zone, CivilZone::Fixed(FALLBACK_OFFSET));
        assert_eq!(FALLBACK_OFFSET.local_minus_utc(), 25_200);
        assert_eq!(zone.format(instant()), "2024-01-15T14:30:00.123+07");
    }

    #[test]
    fn date_rolls_over_at_utc_plus_seven() {
        let late = Utc.with_ymd_and_hms(2023, 12, 31, 17, 0, 0).unwrap();
        assert_eq!(
            CivilZone::resolve("Asia/Jakarta").format(late),
            "2024-01-01T00:00:00.000+07"
        );
    }

    #[test]
    fn fixed_clock_is_frozen() {
        let clock = FixedClock(instant());
        assert_eq!(clock.now(), clock.now());
    }
}
