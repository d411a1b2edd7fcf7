//! # Stock Aggregator
//!
//! Classifies and summarizes a snapshot of medicine records for the
//! dashboard, without mutating anything.
//!
//! ## Classification Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            classify(medicine, today) - first match wins                 │
//! │                                                                         │
//! │  days_to_expiry < 0 ───────────────► Expired                            │
//! │  0 <= days_to_expiry <= 30 ────────► ExpiringSoon                       │
//! │  quantity <= 0 ────────────────────► OutOfStock                         │
//! │  1 <= quantity < 10 ───────────────► LowStock                           │
//! │  otherwise ────────────────────────► InStock                            │
//! │                                                                         │
//! │  Expiry outranks quantity: 5 units expiring in 10 days is               │
//! │  ExpiringSoon, not LowStock.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Classifications are derived fresh from a snapshot and "today" - they
//! are never persisted. This module is pure: the caller fetches the
//! snapshot and supplies the date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Bill, Medicine};
use crate::{EXPIRY_SOON_DAYS, LOW_STOCK_THRESHOLD, RECENT_MEDICINES_LIMIT};

// =============================================================================
// Status & Bands
// =============================================================================

/// Dashboard-facing status of a single medicine record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum StockStatus {
    /// Expiry date has passed.
    Expired,
    /// Expires within 30 days (inclusive), today counts.
    ExpiringSoon,
    /// No units on hand.
    OutOfStock,
    /// Fewer than 10 units on hand.
    LowStock,
    /// Healthy stock, comfortably before expiry.
    InStock,
}

/// Quantity band for the stock doughnut chart.
///
/// Bands look only at quantity - the chart shows stock depth, the status
/// alerts show urgency, and the two deliberately use different cuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export)]
pub enum StockBand {
    /// More than 50 units.
    High,
    /// 11 to 50 units.
    Medium,
    /// 1 to 10 units.
    Low,
    /// Zero or negative.
    Empty,
}

/// Signed whole days from `today` until `expiry`.
///
/// Negative means the date has passed; zero means it expires today. The
/// calendar-date difference equals the day-count the views derive from
/// instant arithmetic.
#[inline]
pub fn days_to_expiry(expiry: NaiveDate, today: NaiveDate) -> i64 {
    (expiry - today).num_days()
}

/// Classifies one medicine record against "today". See the module-level
/// precedence table.
pub fn classify(medicine: &Medicine, today: NaiveDate) -> StockStatus {
    let days = days_to_expiry(medicine.expiry_date, today);

    if days < 0 {
        StockStatus::Expired
    } else if days <= EXPIRY_SOON_DAYS {
        StockStatus::ExpiringSoon
    } else if medicine.quantity <= 0 {
        StockStatus::OutOfStock
    } else if medicine.quantity < LOW_STOCK_THRESHOLD {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

/// Buckets one record into its chart band by quantity alone.
pub fn band(medicine: &Medicine) -> StockBand {
    match medicine.quantity {
        q if q <= 0 => StockBand::Empty,
        q if q <= 10 => StockBand::Low,
        q if q <= 50 => StockBand::Medium,
        _ => StockBand::High,
    }
}

// =============================================================================
// Summary Types
// =============================================================================

/// Per-status record counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StatusCounts {
    pub expired: usize,
    pub expiring_soon: usize,
    pub out_of_stock: usize,
    pub low_stock: usize,
    pub in_stock: usize,
}

/// Per-band record counts for the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct BandCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub empty: usize,
}

/// One row in a dashboard alert panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockAlert {
    pub medicine_id: String,
    pub name: String,
    pub quantity: i64,
    /// Signed days to expiry; negative for already-expired records.
    pub days_to_expiry: i64,
}

/// The full dashboard aggregation over one inventory snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct StockSummary {
    /// Number of medicine records in the snapshot.
    pub medicine_count: usize,
    /// Total units on hand across all records.
    pub total_units: i64,
    /// Total inventory value in paise (`Σ price × quantity`).
    pub total_value_paise: i64,
    pub status_counts: StatusCounts,
    pub band_counts: BandCounts,
    /// Alert rows per urgent status (expired, expiring, low, out).
    pub expired: Vec<StockAlert>,
    pub expiring_soon: Vec<StockAlert>,
    pub low_stock: Vec<StockAlert>,
    pub out_of_stock: Vec<StockAlert>,
    /// The five most recently created records, newest first, ties kept in
    /// insertion order.
    pub recent: Vec<Medicine>,
}

impl StockSummary {
    /// Total inventory value as Money.
    #[inline]
    pub fn total_value(&self) -> Money {
        Money::from_paise(self.total_value_paise)
    }
}

/// Revenue counters derived from the bill history snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SalesSummary {
    /// Bills settled today.
    pub bills_today: usize,
    /// Revenue from today's bills, in paise.
    pub revenue_today_paise: i64,
    /// Bills across the retained history (at most the 50-entry cap).
    pub bills_total: usize,
    /// Revenue across the retained history, in paise.
    pub revenue_total_paise: i64,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Summarizes an inventory snapshot for the dashboard.
///
/// Pure: the snapshot order is the insertion order of the store, which is
/// what breaks `created_at` ties in the "recent" panel.
pub fn summarize(snapshot: &[Medicine], today: NaiveDate) -> StockSummary {
    let mut status_counts = StatusCounts::default();
    let mut band_counts = BandCounts::default();
    let mut expired = Vec::new();
    let mut expiring_soon = Vec::new();
    let mut low_stock = Vec::new();
    let mut out_of_stock = Vec::new();

    let mut total_units = 0i64;
    let mut total_value = Money::zero();

    for medicine in snapshot {
        total_units += medicine.quantity.max(0);
        total_value += medicine.stock_value();

        match band(medicine) {
            StockBand::High => band_counts.high += 1,
            StockBand::Medium => band_counts.medium += 1,
            StockBand::Low => band_counts.low += 1,
            StockBand::Empty => band_counts.empty += 1,
        }

        let alert = || StockAlert {
            medicine_id: medicine.id.clone(),
            name: medicine.name.clone(),
            quantity: medicine.quantity,
            days_to_expiry: days_to_expiry(medicine.expiry_date, today),
        };

        match classify(medicine, today) {
            StockStatus::Expired => {
                status_counts.expired += 1;
                expired.push(alert());
            }
            StockStatus::ExpiringSoon => {
                status_counts.expiring_soon += 1;
                expiring_soon.push(alert());
            }
            StockStatus::OutOfStock => {
                status_counts.out_of_stock += 1;
                out_of_stock.push(alert());
            }
            StockStatus::LowStock => {
                status_counts.low_stock += 1;
                low_stock.push(alert());
            }
            StockStatus::InStock => {
                status_counts.in_stock += 1;
            }
        }
    }

    // Stable sort: equal created_at keeps snapshot (insertion) order
    let mut recent: Vec<Medicine> = snapshot.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(RECENT_MEDICINES_LIMIT);

    StockSummary {
        medicine_count: snapshot.len(),
        total_units,
        total_value_paise: total_value.paise(),
        status_counts,
        band_counts,
        expired,
        expiring_soon,
        low_stock,
        out_of_stock,
        recent,
    }
}

/// Summarizes the retained bill history.
///
/// "Today" buckets by the UTC calendar date of `settled_at`.
pub fn sales_summary(bills: &[Bill], today: NaiveDate) -> SalesSummary {
    let mut summary = SalesSummary {
        bills_total: bills.len(),
        ..SalesSummary::default()
    };

    for bill in bills {
        summary.revenue_total_paise += bill.total_paise;
        if bill.settled_at.date_naive() == today {
            summary.bills_today += 1;
            summary.revenue_today_paise += bill.total_paise;
        }
    }

    summary
}

// =============================================================================
// Unit Tests
// =============================================================================
