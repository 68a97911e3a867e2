//! Per-content-item layout overrides.
//!
//! The crate holds the layout catalog, the region-assignment data model, the
//! layout store contract and the two engines built on top of them:
//! resolution (which template and which elements to render) and merge/save
//! (how a submitted layout becomes the next revision's record).
//!
//! Storage and HTTP live in the `pagelayout-db` and `pagelayout-api` crates.

pub mod assignment;
pub mod catalog;
pub mod content;
pub mod context;
pub mod element;
pub mod engine;
pub mod error;
pub mod inventory;
pub mod memory;
pub mod merge;
pub mod naming;
pub mod page;
pub mod plugin;
pub mod render;
pub mod resolution;
pub mod store;
pub mod types;
