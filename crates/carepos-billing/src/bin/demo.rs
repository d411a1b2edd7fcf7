//! # Demo Sale
//!
//! Seeds an in-memory inventory, runs one sale end-to-end, and prints the
//! receipt and dashboard summary.
//!
//! ## Usage
//! ```bash
//! cargo run -p carepos-billing --bin demo
//!
//! # With debug logging
//! RUST_LOG=debug cargo run -p carepos-billing --bin demo
//! ```

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;
use tracing_subscriber::EnvFilter;

use carepos_billing::BillingSession;
use carepos_core::{Customer, Money};
use carepos_store::{
    ChangeNotifier, InventoryStore, MemoryBillHistory, MemoryCartRecovery, MemoryInventory,
    NewMedicine,
};

/// Demo shelf: name, company, price in paise, units, days to expiry.
const SHELF: &[(&str, &str, i64, i64, i64)] = &[
    ("Paracetamol 500mg", "Cipla Ltd", 550, 100, 500),
    ("Cetirizine 10mg", "Sun Pharma", 875, 50, 120),
    ("Aspirin 75mg", "Bayer", 1299, 30, 25),
    ("Amoxicillin 250mg", "GSK", 2250, 8, 200),
    ("Ibuprofen 400mg", "Abbott", 650, 0, -10),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Wire the stores and the session
    let inventory = Arc::new(MemoryInventory::new());
    let history = Arc::new(MemoryBillHistory::new());
    let recovery = Arc::new(MemoryCartRecovery::new());
    let notifier = ChangeNotifier::new();
    let mut dashboard_events = notifier.subscribe();

    let today = Utc::now().date_naive();
    let mut ids = Vec::new();
    for (name, company, price, qty, expiry_days) in SHELF {
        let created = inventory
            .create(NewMedicine {
                name: name.to_string(),
                company: company.to_string(),
                price_paise: *price,
                quantity: (*qty).max(1),
                expiry_date: today + Duration::days(*expiry_days),
            })
            .await?;
        // Drive zero-stock rows through an update, like a real sell-out would
        if *qty < 1 {
            inventory
                .decrement_stock(&created.id, created.quantity)
                .await?;
        }
        ids.push(created.id);
    }
    info!(count = ids.len(), "Seeded inventory");

    let mut session = BillingSession::new(
        inventory.clone(),
        history.clone(),
        recovery,
        notifier.clone(),
    );

    // Build the bill: 10 × Paracetamol, 4 × Cetirizine
    session.add_item(&ids[0], 10).await?;
    session.add_item(&ids[1], 4).await?;

    let totals = session.totals(Money::from_paise(500)); // ₹5.00 off
    println!("Subtotal: {}", Money::from_paise(totals.subtotal_paise));
    println!("Tax (5%): {}", Money::from_paise(totals.tax_paise));
    println!("Discount: {}", Money::from_paise(totals.discount_paise));
    println!("Total:    {}", Money::from_paise(totals.total_paise));

    // Settle and print the receipt data
    let report = session
        .settle(
            Customer::new("Asha Rao", Some("98765 43210")),
            Money::from_paise(500),
        )
        .await?;
    let bill = &report.bill;

    println!();
    println!("=== PharmaCare Pharmacy ===");
    println!("Bill No: {}", bill.bill_number);
    println!("Customer: {}", bill.customer.name);
    for item in &bill.items {
        println!(
            "  {} x{} @ {} = {}",
            item.name,
            item.quantity,
            item.unit_price(),
            item.line_total()
        );
    }
    println!("Grand total: {}", bill.total());
    println!("Fully synced: {}", report.fully_synced());

    // The dashboard view would re-fetch on these events
    while let Ok(event) = dashboard_events.try_recv() {
        info!(?event, "View notified");
    }

    let snapshot = session.dashboard(today).await?;
    println!();
    println!("=== Dashboard ===");
    println!("Medicines: {}", snapshot.stock.medicine_count);
    println!("Units in stock: {}", snapshot.stock.total_units);
    println!("Inventory value: {}", snapshot.stock.total_value());
    println!(
        "Alerts: {} expired, {} expiring soon, {} low, {} out",
        snapshot.stock.status_counts.expired,
        snapshot.stock.status_counts.expiring_soon,
        snapshot.stock.status_counts.low_stock,
        snapshot.stock.status_counts.out_of_stock,
    );
    println!(
        "Sales today: {} bills, {}",
        snapshot.sales.bills_today,
        Money::from_paise(snapshot.sales.revenue_today_paise)
    );

    // What the dashboard view would actually receive
    println!();
    println!("{}", serde_json::to_string_pretty(&snapshot.sales)?);

    Ok(())
}
