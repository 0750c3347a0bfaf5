pub mod hashmap;
pub mod traits;

pub use hashmap::HashMapStore;
pub use traits::{StoreCore, StoreFull, StoreMetrics, StoreMut};
