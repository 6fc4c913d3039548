//! # Branchbook Architecture
//!
//! Branchbook models books whose story forks. A book is a tree of **paths**;
//! each path holds an ordered run of **pages** and may offer any number of child
//! paths as alternative continuations. Readers page through a path and, when it
//! runs out, pick one of its branches.
//!
//! This crate is the UI-agnostic core. The `branchbook` binary is one client of
//! it; a web front end would be another.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI Layer (the `branchbook` CLI, or any other client)       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Parses opaque string ids and closed tokens               │
//! │  - Applies configuration                                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*)                                 │
//! │  - Navigation, tree edits, page saves, catalog, doctor      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library Arena (tree.rs) + Storage (store/*)                │
//! │  - Id-keyed books, paths, pages; invariant checks           │
//! │  - Whole-document commits through a DataStore               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Map
//!
//! - [`model`]: `Book`, `Path`, `Page` and their edit types
//! - [`tree`]: the [`tree::Library`] arena, ordered queries and invariants
//! - [`store`]: `DataStore` trait, file and in-memory implementations
//! - [`commands`]: business logic
//! - [`api`]: the facade clients talk to
//! - [`config`], [`init`]: configuration and data directory discovery
//! - [`error`]: [`error::BookError`] and the crate `Result`
//!
//! ## Logging
//!
//! The library emits [`tracing`] events and never installs a subscriber; that is
//! the client's call.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod store;
pub mod tree;
