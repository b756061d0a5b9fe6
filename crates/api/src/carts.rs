//! In-memory per-session cart store.
//!
//! Carts are ephemeral browsing state, not orders: they live only as long
//! as the process and are swept after a period of inactivity. Checkout
//! reads the cart but the durable record is the order row it creates.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use gamevault_core::cart::{Cart, CartMode};

/// Sessions idle longer than this are dropped on the next sweep.
const IDLE_TTL: Duration = Duration::from_secs(60 * 60 * 2);

/// How often the store sweeps idle sessions (piggybacked on writes).
const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 5);

struct Entry {
    cart: Cart,
    last_touched: Instant,
}

/// Concurrent map of session id to cart.
pub struct CartStore {
    inner: RwLock<HashMap<String, Entry>>,
    last_sweep: RwLock<Instant>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            last_sweep: RwLock::new(Instant::now()),
        }
    }

    /// Snapshot a session's cart. Absent sessions read as an empty
    /// purchase-mode cart without creating an entry.
    pub async fn get(&self, session_id: &str) -> Cart {
        let map = self.inner.read().await;
        map.get(session_id)
            .map(|e| e.cart.clone())
            .unwrap_or_else(|| Cart::new(CartMode::Purchase))
    }

    /// Run a mutation against a session's cart, creating it on first use,
    /// and return the updated snapshot.
    pub async fn with_cart<F, T>(&self, session_id: &str, f: F) -> (Cart, T)
    where
        F: FnOnce(&mut Cart) -> T,
    {
        self.maybe_sweep().await;

        let mut map = self.inner.write().await;
        let entry = map.entry(session_id.to_string()).or_insert_with(|| Entry {
            cart: Cart::new(CartMode::Purchase),
            last_touched: Instant::now(),
        });
        entry.last_touched = Instant::now();
        let out = f(&mut entry.cart);
        (entry.cart.clone(), out)
    }

    /// Drop a session's cart entirely.
    pub async fn remove(&self, session_id: &str) {
        self.inner.write().await.remove(session_id);
    }

    /// Number of live sessions (used by tests and the health probe).
    pub async fn session_count(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Drop idle sessions if the sweep interval has elapsed.
    async fn maybe_sweep(&self) {
        {
            let last = self.last_sweep.read().await;
            if last.elapsed() < SWEEP_INTERVAL {
                return;
            }
        }
        let mut last = self.last_sweep.write().await;
        if last.elapsed() < SWEEP_INTERVAL {
            return;
        }
        *last = Instant::now();

        let mut map = self.inner.write().await;
        let before = map.len();
        map.retain(|_, entry| entry.last_touched.elapsed() < IDLE_TTL);
        let dropped = before - map.len();
        if dropped > 0 {
            tracing::debug!(dropped, "Swept idle cart sessions");
        }
    }
}
