use uuid::Uuid;

use crate::Store;
use crate::models::CartLine;

/// Repository for per-user cart lines. The cart is collaborator
/// state: staged by the user, consumed and cleared by the checkout.
pub struct CartRepository<'a> {
    store: &'a Store,
}

impl<'a> CartRepository<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    pub fn get(&self, user_id: Uuid) -> Vec<CartLine> {
        self.store
            .carts()
            .get(&user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    pub fn set_lines(&self, user_id: Uuid, lines: Vec<CartLine>) {
        self.store.carts().insert(user_id, lines);
    }

    pub fn clear(&self, user_id: Uuid) {
        self.store.carts().remove(&user_id);
    }
}
