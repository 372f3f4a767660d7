//! Mutable mapping stores: user overrides and crowd popularity.
//!
//! Both stores keep their data in memory behind an `RwLock` and
//! persist to versioned JSON files with atomic writes. Disk is
//! written before memory is updated, so a failed save never leaves
//! the two out of sync.

#![deny(unsafe_code)]

pub mod error;
pub mod persist;
pub mod popularity;
pub mod user;

pub use crate::error::{Result, StoreError};
pub use crate::persist::{CURRENT_STORE_VERSION, StoreFile};
pub use crate::popularity::PopularityStore;
pub use crate::user::UserMappingStore;
