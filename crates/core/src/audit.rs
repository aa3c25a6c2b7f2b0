//! Creation and last-update timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::clock::Clock;

/// Audit timestamps of an entity.
///
/// Invariant: `created_at <= updated_at`, and `updated_at` never moves backward.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct AuditStamps {
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AuditStamps {
    /// Both stamps set to the clock's current instant.
    pub fn new(clock: &impl Clock) -> Self {
        let now = clock.now();
        Self {
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild stamps read back from storage.
    ///
    /// An `updated_at` earlier than `created_at` is raised to `created_at`.
    pub fn restore(created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            updated_at: updated_at.max(created_at),
        }
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Advance `updated_at` to the clock's current instant.
    ///
    /// A clock reading older than the current `updated_at` leaves it unchanged.
    pub fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = self.updated_at.max(clock.now());
    }
}

impl<'de> Deserialize<'de> for AuditStamps {
    /// Stored stamps go through [`AuditStamps::restore`].
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Stored {
            created_at: DateTime<Utc>,
            updated_at: DateTime<Utc>,
        }

        let stored = Stored::deserialize(deserializer)?;
        Ok(Self::restore(stored.created_at, stored.updated_at))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::clock::{FixedClock, ManualClock};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn new_stamps_are_equal() {
        let stamps = AuditStamps::new(&FixedClock::new(t0()));
        assert_eq!(stamps.created_at(), t0());
        assert_eq!(stamps.updated_at(), t0());
    }

    #[test]
    fn touch_moves_updated_at_forward() {
        let clock = ManualClock::new(t0());
        let mut stamps = AuditStamps::new(&clock);

        clock.advance(Duration::minutes(3));
        stamps.touch(&clock);

        assert_eq!(stamps.created_at(), t0());
        assert_eq!(stamps.updated_at(), t0() + Duration::minutes(3));
    }

    #[test]
    fn touch_ignores_a_clock_that_went_backward() {
        let clock = ManualClock::new(t0());
        let mut stamps = AuditStamps::new(&clock);
        clock.advance(Duration::hours(1));
        stamps.touch(&clock);

        clock.set(t0() - Duration::days(2));
        stamps.touch(&clock);

        assert_eq!(stamps.updated_at(), t0() + Duration::hours(1));
        assert!(stamps.updated_at() >= stamps.created_at());
    }

    #[test]
    fn restore_never_yields_updated_before_created() {
        let stamps = AuditStamps::restore(t0(), t0() - Duration::seconds(1));
        assert_eq!(stamps.updated_at(), t0());

        let later = t0() + Duration::days(1);
        let stamps = AuditStamps::restore(t0(), later);
        assert_eq!(stamps.updated_at(), later);
    }

    #[test]
    fn deserialize_clamps_updated_at_like_restore() {
        let json = r#"{"created_at":"2024-06-01T12:00:00Z","updated_at":"2020-01-01T00:00:00Z"}"#;
        let stamps: AuditStamps = serde_json::from_str(json).unwrap();

        assert_eq!(stamps.created_at(), t0());
        assert_eq!(stamps.updated_at(), t0());
    }

    #[test]
    fn serialized_stamps_read_back_unchanged() {
        let clock = ManualClock::new(t0());
        let mut stamps = AuditStamps::new(&clock);
        clock.advance(Duration::minutes(5));
        stamps.touch(&clock);

        let json = serde_json::to_string(&stamps).unwrap();
        assert_eq!(serde_json::from_str::<AuditStamps>(&json).unwrap(), stamps);
    }
}
