//! End-to-end settlement tests: session + in-memory stores wired the way
//! the demo wires them, plus a failing inventory to exercise the
//! best-effort contract.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use carepos_billing::{BillingError, BillingSession, SettlementStage};
use carepos_core::{CoreError, Customer, Medicine, Money};
use carepos_store::{
    BillHistoryStore, CartRecovery, ChangeEvent, ChangeNotifier, InventoryStore, MedicineUpdate,
    MemoryBillHistory, MemoryCartRecovery, MemoryInventory, NewMedicine, StoreError, StoreResult,
};

// =============================================================================
// Fixtures
// =============================================================================

struct Rig {
    inventory: Arc<MemoryInventory>,
    history: Arc<MemoryBillHistory>,
    recovery: Arc<MemoryCartRecovery>,
    notifier: ChangeNotifier,
    ids: Vec<String>,
}

async fn seeded_rig() -> Rig {
    let inventory = Arc::new(MemoryInventory::new());
    let today = Utc::now().date_naive();

    let shelf = [
        ("Paracetamol 500mg", "Cipla Ltd", 550i64, 100i64),
        ("Cetirizine 10mg", "Sun Pharma", 875, 50),
        ("Aspirin 75mg", "Bayer", 1299, 30),
    ];

    let mut ids = Vec::new();
    for (name, company, price, qty) in shelf {
        let created = inventory
            .create(NewMedicine {
                name: name.to_string(),
                company: company.to_string(),
                price_paise: price,
                quantity: qty,
                expiry_date: today + Duration::days(365),
            })
            .await
            .unwrap();
        ids.push(created.id);
    }

    Rig {
        inventory,
        history: Arc::new(MemoryBillHistory::new()),
        recovery: Arc::new(MemoryCartRecovery::new()),
        notifier: ChangeNotifier::new(),
        ids,
    }
}

fn session_for(rig: &Rig) -> BillingSession {
    BillingSession::new(
        rig.inventory.clone(),
        rig.history.clone(),
        rig.recovery.clone(),
        rig.notifier.clone(),
    )
}

/// Inventory wrapper whose stock decrements always fail. Reads and
/// writes outside settlement still work, so add_item succeeds.
struct DecrementFails {
    inner: MemoryInventory,
}

#[async_trait]
impl InventoryStore for DecrementFails {
    async fn list(&self) -> StoreResult<Vec<Medicine>> {
        self.inner.list().await
    }

    async fn get(&self, id: &str) -> StoreResult<Option<Medicine>> {
        self.inner.get(id).await
    }

    async fn create(&self, input: NewMedicine) -> StoreResult<Medicine> {
        self.inner.create(input).await
    }

    async fn update(&self, id: &str, update: MedicineUpdate) -> StoreResult<Medicine> {
        self.inner.update(id, update).await
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.inner.delete(id).await
    }

    async fn decrement_stock(&self, _id: &str, _qty: i64) -> StoreResult<()> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }
}

// =============================================================================
// Settlement
// =============================================================================

#[tokio::test]
async fn settle_happy_path() {
    let rig = seeded_rig().await;
    let mut events = rig.notifier.subscribe();
    let mut session = session_for(&rig);

    session.add_item(&rig.ids[0], 10).await.unwrap(); // ₹5.50 × 10
    session.add_item(&rig.ids[1], 4).await.unwrap(); // ₹8.75 × 4

    let report = session
        .settle(Customer::new("Asha Rao", None), Money::zero())
        .await
        .unwrap();
    let bill = &report.bill;

    // subtotal 5500 + 3500 = 9000; tax 450; total 9450
    assert_eq!(bill.subtotal_paise, 9000);
    assert_eq!(bill.tax_paise, 450);
    assert_eq!(bill.total_paise, 9450);
    assert!(report.fully_synced());
    assert!(bill.bill_number.starts_with("BILL-"));

    // stock decremented
    let paracetamol = rig.inventory.get(&rig.ids[0]).await.unwrap().unwrap();
    assert_eq!(paracetamol.quantity, 90);

    // history appended
    assert_eq!(rig.history.len().await.unwrap(), 1);
    let stored = &rig.history.all().await.unwrap()[0];
    assert_eq!(stored.bill_number, bill.bill_number);

    // cart and checkpoint released
    assert!(session.cart().is_empty());
    assert!(rig.recovery.load().is_none());

    // both change events broadcast
    assert_eq!(events.recv().await.unwrap(), ChangeEvent::BillSettled);
    assert_eq!(events.recv().await.unwrap(), ChangeEvent::InventoryChanged);
}

#[tokio::test]
async fn settle_empty_cart_is_rejected() {
    let rig = seeded_rig().await;
    let mut session = session_for(&rig);

    let err = session
        .settle(Customer::walk_in(), Money::zero())
        .await
        .unwrap_err();

    assert!(matches!(err, BillingError::Core(CoreError::EmptyCart)));
    // nothing persisted
    assert_eq!(rig.history.len().await.unwrap(), 0);
}

#[tokio::test]
async fn settle_with_discount_beyond_subtotal_goes_negative() {
    let rig = seeded_rig().await;
    let mut session = session_for(&rig);

    session.add_item(&rig.ids[0], 10).await.unwrap(); // ₹55.00 + ₹2.75 tax

    let report = session
        .settle(Customer::walk_in(), Money::from_paise(10_000))
        .await
        .unwrap();

    // Deployed behavior: no clamping, total goes to -₹42.25
    assert_eq!(report.bill.total_paise, -4225);
}

#[tokio::test]
async fn settle_negative_discount_is_rejected() {
    let rig = seeded_rig().await;
    let mut session = session_for(&rig);
    session.add_item(&rig.ids[0], 1).await.unwrap();

    let err = session
        .settle(Customer::walk_in(), Money::from_paise(-100))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        BillingError::Core(CoreError::Validation(_))
    ));

    // the cart survives a rejected settlement
    assert_eq!(session.cart().line_count(), 1);
}

#[tokio::test]
async fn failed_stock_sync_is_soft() {
    let today = Utc::now().date_naive();
    let flaky = DecrementFails {
        inner: MemoryInventory::new(),
    };
    let med = flaky
        .create(NewMedicine {
            name: "Paracetamol 500mg".to_string(),
            company: "Cipla Ltd".to_string(),
            price_paise: 550,
            quantity: 100,
            expiry_date: today + Duration::days(365),
        })
        .await
        .unwrap();

    let history = Arc::new(MemoryBillHistory::new());
    let mut session = BillingSession::new(
        Arc::new(flaky),
        history.clone(),
        Arc::new(MemoryCartRecovery::new()),
        ChangeNotifier::new(),
    );

    session.add_item(&med.id, 10).await.unwrap();
    let report = session
        .settle(Customer::walk_in(), Money::zero())
        .await
        .unwrap();

    // The bill stands despite the dead backend
    assert_eq!(report.bill.total_paise, 5775);
    assert!(!report.fully_synced());
    assert_eq!(report.soft_failures.len(), 1);
    assert!(matches!(
        report.soft_failures[0].stage,
        SettlementStage::StockSync { .. }
    ));

    // ...and it still reached the history, and the cart is released
    assert_eq!(history.len().await.unwrap(), 1);
    assert!(session.cart().is_empty());
}

#[tokio::test]
async fn bill_numbers_are_unique_across_settlements() {
    let rig = seeded_rig().await;
    let mut session = session_for(&rig);

    let mut numbers = std::collections::HashSet::new();
    for _ in 0..5 {
        session.add_item(&rig.ids[0], 1).await.unwrap();
        let report = session
            .settle(Customer::walk_in(), Money::zero())
            .await
            .unwrap();
        assert!(numbers.insert(report.bill.bill_number.clone()));
    }
}

// =============================================================================
// Cart Recovery
// =============================================================================

#[tokio::test]
async fn interrupted_sale_resumes_from_checkpoint() {
    let rig = seeded_rig().await;

    // First view builds a cart, then "crashes"
    let mut first = session_for(&rig);
    first.add_item(&rig.ids[0], 3).await.unwrap();
    first.add_item(&rig.ids[2], 2).await.unwrap();
    drop(first);

    // The reloaded view resumes the same cart
    let mut second = session_for(&rig);
    assert!(second.restore_cart());
    assert_eq!(second.cart().line_count(), 2);
    assert_eq!(second.cart().total_quantity(), 5);

    // Settling the resumed cart releases the checkpoint
    second
        .settle(Customer::walk_in(), Money::zero())
        .await
        .unwrap();
    let mut third = session_for(&rig);
    assert!(!third.restore_cart());
}

#[tokio::test]
async fn clear_drops_cart_and_checkpoint() {
    let rig = seeded_rig().await;
    let mut session = session_for(&rig);

    session.add_item(&rig.ids[0], 3).await.unwrap();
    assert!(rig.recovery.load().is_some());

    session.clear();
    assert!(session.cart().is_empty());
    assert!(rig.recovery.load().is_none());

    session.clear(); // idempotent
}

// =============================================================================
// Session Cart Rules
// =============================================================================

#[tokio::test]
async fn add_item_unknown_medicine_is_a_hard_error() {
    let rig = seeded_rig().await;
    let mut session = session_for(&rig);

    let err = session.add_item("ghost", 1).await.unwrap_err();
    assert!(matches!(
        err,
        BillingError::Store(StoreError::NotFound { .. })
    ));
}

#[tokio::test]
async fn add_item_respects_live_stock_snapshot() {
    let rig = seeded_rig().await;
    let mut session = session_for(&rig);

    // Aspirin has 30 on the shelf
    session.add_item(&rig.ids[2], 20).await.unwrap();
    let err = session.add_item(&rig.ids[2], 20).await.unwrap_err();
    assert!(matches!(
        err,
        BillingError::Core(CoreError::InsufficientStock {
            available: 30,
            requested: 40,
            ..
        })
    ));

    // failed add leaves the line as it was
    assert_eq!(session.cart().total_quantity(), 20);
}

#[tokio::test]
async fn update_quantity_clamps_to_snapshot() {
    let rig = seeded_rig().await;
    let mut session = session_for(&rig);

    session.add_item(&rig.ids[2], 5).await.unwrap(); // 30 in stock

    assert!(session.update_quantity(&rig.ids[2], 500).unwrap());
    assert_eq!(session.cart().lines()[0].quantity, 30);

    assert!(session.update_quantity(&rig.ids[2], 0).unwrap());
    assert_eq!(session.cart().lines()[0].quantity, 1);
}

// =============================================================================
// Dashboard
// =============================================================================

#[tokio::test]
async fn dashboard_reflects_sales() {
    let rig = seeded_rig().await;
    let today = Utc::now().date_naive();
    let mut session = session_for(&rig);

    session.add_item(&rig.ids[0], 10).await.unwrap();
    session
        .settle(Customer::walk_in(), Money::zero())
        .await
        .unwrap();

    let snapshot = session.dashboard(today).await.unwrap();

    assert_eq!(snapshot.stock.medicine_count, 3);
    assert_eq!(snapshot.stock.total_units, 90 + 50 + 30);
    assert_eq!(snapshot.sales.bills_today, 1);
    assert_eq!(snapshot.sales.revenue_today_paise, 5775);
    assert_eq!(snapshot.recent_bills.len(), 1);
}
