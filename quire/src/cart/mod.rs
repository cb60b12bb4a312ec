pub mod error;
pub mod locks;
pub mod model;
pub mod ports;
pub mod repository;
pub mod usecase;

pub use error::CartError;
pub use model::{AddItem, AdjustMode, Cart, Item};
pub use ports::{CartStore, CatalogLookup};
pub use repository::CartRepository;
pub use usecase::CartUseCase;
