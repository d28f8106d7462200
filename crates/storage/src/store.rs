use std::sync::Arc;

use dashmap::DashMap;
use uuid::Uuid;

use crate::models::{CartLine, Match, Reservation, Team, User};

/// Shared in-memory store. Cheap to clone (all clones share the same
/// tables), so it plays the role a connection pool would in front of
/// an external database. Repositories borrow it.
#[derive(Clone, Default)]
pub struct Store {
    inner: Arc<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    matches: DashMap<Uuid, Match>,
    reservations: DashMap<Uuid, Reservation>,
    /// Teams keyed by match id; replaced wholesale on regeneration.
    teams: DashMap<Uuid, Vec<Team>>,
    /// Cart lines keyed by user id.
    carts: DashMap<Uuid, Vec<CartLine>>,
    users: DashMap<Uuid, User>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn matches(&self) -> &DashMap<Uuid, Match> {
        &self.inner.matches
    }

    pub(crate) fn reservations(&self) -> &DashMap<Uuid, Reservation> {
        &self.inner.reservations
    }

    pub(crate) fn teams(&self) -> &DashMap<Uuid, Vec<Team>> {
        &self.inner.teams
    }

    pub(crate) fn carts(&self) -> &DashMap<Uuid, Vec<CartLine>> {
        &self.inner.carts
    }

    pub(crate) fn users(&self) -> &DashMap<Uuid, User> {
        &self.inner.users
    }
}
