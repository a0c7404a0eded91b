//! # lnf-core
//!
//! Core types and collaborator ports for the lost-and-found catalog.
//!
//! This crate provides the foundational types shared across all lnf crates:
//! - Entity structs for items, claims, notifications, audit entries, and users
//! - Status enums with state machine transitions
//! - ID prefix constants
//! - Audit detail sub-types
//! - Response shapes returned by the catalog engine
//! - Ports (`Repository`, `BlobStore`, `IdentityResolver`) implemented by
//!   storage and transport crates

pub mod audit_detail;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod filters;
pub mod identity;
pub mod ids;
pub mod ports;
pub mod responses;
pub mod updates;
