//! # Bill History Store
//!
//! Append-only collection of settled bills, newest first, capped to the
//! most recent [`BILL_HISTORY_CAP`] entries.
//!
//! ## Eviction
//! ```text
//! append #51 ──► [new, ..., 50 previous] ──► oldest dropped
//! ```
//! The CAP is enforced by the store itself - callers append and never
//! think about trimming.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::StoreResult;
use carepos_core::{Bill, BILL_HISTORY_CAP};

// =============================================================================
// Store Contract
// =============================================================================

/// The settled-bill history the dashboard reads.
#[async_trait]
pub trait BillHistoryStore: Send + Sync {
    /// Appends a settled bill, evicting the oldest entry beyond the cap.
    async fn append(&self, bill: Bill) -> StoreResult<()>;

    /// The most recent bills, newest first, at most `limit`.
    async fn recent(&self, limit: usize) -> StoreResult<Vec<Bill>>;

    /// Everything retained (at most the cap), newest first.
    async fn all(&self) -> StoreResult<Vec<Bill>>;

    /// Number of retained bills.
    async fn len(&self) -> StoreResult<usize>;
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// VecDeque-backed history: push_front on append, pop_back on eviction.
#[derive(Debug, Default)]
pub struct MemoryBillHistory {
    bills: RwLock<VecDeque<Bill>>,
}

impl MemoryBillHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BillHistoryStore for MemoryBillHistory {
    async fn append(&self, bill: Bill) -> StoreResult<()> {
        let mut bills = self.bills.write().await;

        debug!(bill_number = %bill.bill_number, total = %bill.total_paise, "Appending bill");
        bills.push_front(bill);

        while bills.len() > BILL_HISTORY_CAP {
            if let Some(evicted) = bills.pop_back() {
                debug!(bill_number = %evicted.bill_number, "Evicted oldest bill");
            }
        }

        Ok(())
    }

    async fn recent(&self, limit: usize) -> StoreResult<Vec<Bill>> {
        let bills = self.bills.read().await;
        Ok(bills.iter().take(limit).cloned().collect())
    }

    async fn all(&self) -> StoreResult<Vec<Bill>> {
        let bills = self.bills.read().await;
        Ok(bills.iter().cloned().collect())
    }

    async fn len(&self) -> StoreResult<usize> {
        Ok(self.bills.read().await.len())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use carepos_core::Customer;
    use chrono::{TimeZone, Utc};

    fn bill(n: usize) -> Bill {
        Bill {
            bill_number: format!("BILL-{:04}", n),
            customer: Customer::walk_in(),
            items: Vec::new(),
            subtotal_paise: 100 * n as i64,
            tax_paise: 5 * n as i64,
            discount_paise: 0,
            total_paise: 105 * n as i64,
            settled_at: Utc.with_ymd_and_hms(2026, 8, 6, 9, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_append_newest_first() {
        let store = MemoryBillHistory::new();
        store.append(bill(1)).await.unwrap();
        store.append(bill(2)).await.unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].bill_number, "BILL-0002");
        assert_eq!(all[1].bill_number, "BILL-0001");
    }

    #[tokio::test]
    async fn test_recent_limit() {
        let store = MemoryBillHistory::new();
        for n in 1..=10 {
            store.append(bill(n)).await.unwrap();
        }

        let recent = store.recent(5).await.unwrap();
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].bill_number, "BILL-0010");
        assert_eq!(recent[4].bill_number, "BILL-0006");
    }

    #[tokio::test]
    async fn test_cap_evicts_oldest() {
        let store = MemoryBillHistory::new();
        for n in 1..=BILL_HISTORY_CAP + 1 {
            store.append(bill(n)).await.unwrap();
        }

        // Never more than the cap; the 51st append dropped BILL-0001
        assert_eq!(store.len().await.unwrap(), BILL_HISTORY_CAP);
        let all = store.all().await.unwrap();
        assert_eq!(all.first().unwrap().bill_number, "BILL-0051");
        assert_eq!(all.last().unwrap().bill_number, "BILL-0002");
        assert!(!all.iter().any(|b| b.bill_number == "BILL-0001"));
    }
}
