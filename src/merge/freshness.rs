use chrono::{DateTime, Duration, Utc};

/// Rejects entries published before `now - window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreshnessFilter {
    cutoff: DateTime<Utc>,
}

impl FreshnessFilter {
    pub fn new(now: DateTime<Utc>, window: Duration) -> Self {
        Self {
            cutoff: now - window,
        }
    }

    pub fn cutoff(&self) -> DateTime<Utc> {
        self.cutoff
    }

    /// The cutoff instant itself is still fresh.
    pub fn accepts(&self, published_at: DateTime<Utc>) -> bool {
        published_at >= self.cutoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn boundary_is_inclusive() {
        let filter = FreshnessFilter::new(now(), Duration::hours(48));
        assert!(filter.accepts(now() - Duration::hours(48)));
        assert!(!filter.accepts(now() - Duration::hours(48) - Duration::seconds(1)));
    }

    #[test]
    fn rejects_forty_nine_hours_old() {
        let filter = FreshnessFilter::new(now(), Duration::hours(48));
        assert!(!filter.accepts(now() - Duration::hours(49)));
        assert!(filter.accepts(now() - Duration::hours(1)));
    }

    #[test]
    fn future_dates_pass() {
        let filter = FreshnessFilter::new(now(), Duration::hours(48));
        assert!(filter.accepts(now() + Duration::hours(3)));
    }
}
