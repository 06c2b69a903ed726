//! Local Fallback Store
//!
//! Recent clients and pending submissions persisted as JSON
//! through an injected key-value capability.

mod memory;
mod pending;
mod recent;
mod traits;


pub use memory::MemoryStore;
pub use pending::{PendingQueue, PENDING_SUBMISSIONS_KEY};
pub use recent::{RecentClients, RECENT_CLIENTS_CAPACITY, RECENT_CLIENTS_KEY};
pub use traits::{KeyValueStore, StoreError, StoreResult};
