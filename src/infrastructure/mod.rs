//! Storage back ends implementing [`CartStore`](crate::domain::ports::CartStore).

pub mod file;
pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
