//! `KeyValueStore` implementations

mod file;
#[cfg(feature = "web")]
mod local;
mod memory;

pub use file::FileStore;
#[cfg(feature = "web")]
pub use local::LocalStorageStore;
pub use memory::MemoryStore;
