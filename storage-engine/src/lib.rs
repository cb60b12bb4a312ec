pub mod moka_store;
pub mod sled_store;

pub use moka_store::MokaCartStore;
pub use sled_store::SledCartStore;

use quire::cart::CartStore;
use shared::Result;
use shared::config::CartBackend;
use std::sync::Arc;
use tracing::info;

/// Build the cart store selected by configuration; `db` backs the sled variant
pub fn build_cart_store(backend: CartBackend, db: &sled::Db) -> Result<Arc<dyn CartStore>> {
    let store: Arc<dyn CartStore> = match backend {
        CartBackend::Memory => Arc::new(MokaCartStore::unbounded()),
        CartBackend::Sled => Arc::new(SledCartStore::from_db(db)?),
    };

    info!(?backend, "cart store ready");
    Ok(store)
}
