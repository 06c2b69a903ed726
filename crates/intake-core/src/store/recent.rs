//! Rolling list of recently added clients

use std::collections::VecDeque;

use crate::domain::RecentClient;

use super::traits::{KeyValueStore, StoreResult};

pub const RECENT_CLIENTS_KEY: &str = "recentClients";
pub const RECENT_CLIENTS_CAPACITY: usize = 5;

/// Newest-first, capped at [`RECENT_CLIENTS_CAPACITY`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecentClients {
    entries: VecDeque<RecentClient>,
}

impl RecentClients {
    /// Loads the persisted list; unreadable data starts an empty list
    pub fn load<S: KeyValueStore>(store: &S) -> Self {
        match store.get_json::<Vec<RecentClient>>(RECENT_CLIENTS_KEY) {
            Ok(Some(list)) => Self::from_vec(list),
            Ok(None) => Self::default(),
            Err(e) => {
                log::warn!("Ignoring stored recent clients: {}", e);
                Self::default()
            }
        }
    }

    fn from_vec(list: Vec<RecentClient>) -> Self {
        let mut entries: VecDeque<RecentClient> = list.into();
        entries.truncate(RECENT_CLIENTS_CAPACITY);
        Self { entries }
    }

    /// Prepends a client, returning the evicted oldest entry if over capacity
    pub fn push_front(&mut self, client: RecentClient) -> Option<RecentClient> {
        self.entries.push_front(client);
        if self.entries.len() > RECENT_CLIENTS_CAPACITY {
            self.entries.pop_back()
        } else {
            None
        }
    }

    pub fn save<S: KeyValueStore>(&self, store: &S) -> StoreResult<()> {
        store.set_json(RECENT_CLIENTS_KEY, &self.to_vec())
    }

    pub fn to_vec(&self) -> Vec<RecentClient> {
        self.entries.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecentClient> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
