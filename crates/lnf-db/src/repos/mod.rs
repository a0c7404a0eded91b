//! Table-level repository methods for the catalog.
//!
//! Each module adds methods to `LnfDb` via `impl LnfDb` blocks.

pub mod audit;
pub mod category;
pub mod claim;
pub mod image;
pub mod item;
pub mod notification;
pub mod token;
pub mod user;
