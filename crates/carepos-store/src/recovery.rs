//! # Cart Recovery Store
//!
//! Checkpoint port for the working cart, so a reload can resume an
//! interrupted sale.
//!
//! The billing session saves after EVERY successful cart mutation and
//! clears on settle/clear - the onChange contract. The port is
//! synchronous: checkpointing is a local scratch write, not a round trip.
//!
//! The in-memory backend stores the cart as a JSON string, exactly the
//! shape a browser keeps under its `currentCart` key, so the snapshot
//! format is pinned by tests rather than incidental.

use std::sync::Mutex;

use tracing::warn;

use carepos_core::Cart;

// =============================================================================
// Port
// =============================================================================

/// Where the working cart is checkpointed between mutations.
pub trait CartRecovery: Send + Sync {
    /// Overwrites the checkpoint with the current cart.
    fn save(&self, cart: &Cart);

    /// Loads the last checkpoint, if one exists and still parses.
    fn load(&self) -> Option<Cart>;

    /// Drops the checkpoint (after settle or explicit clear).
    fn clear(&self);
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// Keeps the checkpoint as a JSON snapshot in process memory.
#[derive(Debug, Default)]
pub struct MemoryCartRecovery {
    saved: Mutex<Option<String>>,
}

impl MemoryCartRecovery {
    /// Creates an empty recovery slot.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartRecovery for MemoryCartRecovery {
    fn save(&self, cart: &Cart) {
        match serde_json::to_string(cart) {
            Ok(json) => {
                let mut saved = self.saved.lock().expect("recovery mutex poisoned");
                *saved = Some(json);
            }
            Err(err) => {
                // A failed checkpoint must never fail the mutation itself
                warn!(error = %err, "Could not checkpoint cart");
            }
        }
    }

    fn load(&self) -> Option<Cart> {
        let saved = self.saved.lock().expect("recovery mutex poisoned");
        let json = saved.as_ref()?;

        match serde_json::from_str(json) {
            Ok(cart) => Some(cart),
            Err(err) => {
                warn!(error = %err, "Discarding unreadable cart checkpoint");
                None
            }
        }
    }

    fn clear(&self) {
        let mut saved = self.saved.lock().expect("recovery mutex poisoned");
        *saved = None;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use carepos_core::Money;

    #[test]
    fn test_save_load_clear() {
        let recovery = MemoryCartRecovery::new();
        assert!(recovery.load().is_none());

        let mut cart = Cart::new();
        cart.add_line("m1", "Paracetamol 500mg", Money::from_paise(550), 2, 100)
            .unwrap();
        recovery.save(&cart);

        let loaded = recovery.load().unwrap();
        assert_eq!(loaded.line_count(), 1);
        assert_eq!(loaded.total_quantity(), 2);
        assert_eq!(loaded.lines()[0].unit_price_paise, 550);

        recovery.clear();
        assert!(recovery.load().is_none());
        recovery.clear(); // idempotent
    }

    #[test]
    fn test_save_overwrites() {
        let recovery = MemoryCartRecovery::new();

        let mut cart = Cart::new();
        cart.add_line("m1", "Paracetamol 500mg", Money::from_paise(550), 2, 100)
            .unwrap();
        recovery.save(&cart);

        cart.update_quantity("m1", 5).unwrap();
        recovery.save(&cart);

        assert_eq!(recovery.load().unwrap().total_quantity(), 5);
    }

    #[test]
    fn test_checkpoint_roundtrips_through_json() {
        // The snapshot is the same camelCase shape a browser would keep
        let recovery = MemoryCartRecovery::new();

        let mut cart = Cart::new();
        cart.add_line("m1", "Cetirizine 10mg", Money::from_paise(875), 4, 50)
            .unwrap();
        recovery.save(&cart);

        let loaded = recovery.load().unwrap();
        assert_eq!(loaded.totals(Money::zero()).subtotal_paise, 3500);
        assert_eq!(loaded.lines()[0].max_stock, 50);
    }
}
