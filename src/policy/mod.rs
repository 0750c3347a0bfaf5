pub mod belady;
pub mod lfu;

pub use belady::BeladyCache;
pub use lfu::LfuCache;
