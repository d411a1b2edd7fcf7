//! # Bill Number Generation
//!
//! Bill numbers are timestamp-derived with a process-wide sequence:
//! `BILL-<unix millis>-<seq>`, e.g. `BILL-1754474400123-0007`.
//!
//! The millisecond prefix keeps numbers monotonically distinguishable
//! across runs; the sequence guarantees uniqueness within the process
//! even when two settlements land in the same millisecond.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

/// Hands out bill numbers, unique for the process lifetime.
#[derive(Debug, Default)]
pub struct BillNumberGenerator {
    seq: AtomicU64,
}

impl BillNumberGenerator {
    /// Creates a generator starting at sequence 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Next bill number for a settlement happening at `now`.
    ///
    /// The timestamp is a parameter so settlement keeps a single "now"
    /// for both the number and the bill's `settled_at`.
    pub fn next(&self, now: DateTime<Utc>) -> String {
        let seq = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        format!("BILL-{}-{:04}", now.timestamp_millis(), seq)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format() {
        let gen = BillNumberGenerator::new();
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 10, 30, 0).unwrap();
        let number = gen.next(now);

        assert!(number.starts_with("BILL-"));
        assert!(number.ends_with("-0001"));
        assert!(number.contains(&now.timestamp_millis().to_string()));
    }

    #[test]
    fn test_unique_within_same_millisecond() {
        let gen = BillNumberGenerator::new();
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 10, 30, 0).unwrap();

        let a = gen.next(now);
        let b = gen.next(now);
        assert_ne!(a, b);
    }
}
