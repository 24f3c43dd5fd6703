//! Date serialization for temporal query terms.
//!
//! Temporal filters are serialized into opaque index tokens by a
//! [`DateSerializer`]. The translator never interprets the tokens; it only
//! places them on the right field. The default [`IsoDateSerializer`] emits
//! inclusive RFC 3339 range tokens.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Produces opaque index tokens for temporal constraints.
///
/// Implementations are assumed not to fail on already-validated input.
pub trait DateSerializer: Send + Sync {
    /// Token matching any instant within the given calendar day.
    fn day(&self, day: NaiveDate) -> String;

    /// Token matching any instant within the inclusive range.
    fn range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> String;
}

/// Default serializer emitting inclusive RFC 3339 range tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoDateSerializer;

impl DateSerializer for IsoDateSerializer {
    fn day(&self, day: NaiveDate) -> String {
        format!("[{day}T00:00:00Z TO {day}T23:59:59Z]")
    }

    fn range(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> String {
        format!(
            "[{} TO {}]",
            from.to_rfc3339_opts(SecondsFormat::Secs, true),
            to.to_rfc3339_opts(SecondsFormat::Secs, true)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_bucket_covers_calendar_day() {
        let day = NaiveDate::from_ymd_opt(2014, 3, 9).unwrap();
        assert_eq!(
            IsoDateSerializer.day(day),
            "[2014-03-09T00:00:00Z TO 2014-03-09T23:59:59Z]"
        );
    }

    #[test]
    fn test_range_is_inclusive() {
        let from = Utc.with_ymd_and_hms(2014, 3, 9, 8, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2014, 3, 10, 18, 30, 0).unwrap();
        assert_eq!(
            IsoDateSerializer.range(from, to),
            "[2014-03-09T08:00:00Z TO 2014-03-10T18:30:00Z]"
        );
    }
}
