//! Filesystem-backed implementation of the blob store port.

mod fs_store;

pub use fs_store::FsBlobStore;
