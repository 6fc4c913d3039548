//! # Command Layer
//!
//! This module contains the **core business logic** of branchbook. Each area
//! lives in its own submodule as plain functions generic over [`DataStore`].
//!
//! ## Role and Responsibilities
//!
//! Commands are where the real work happens:
//! - Resolve ids against a snapshot of the library
//! - Apply mutations inside [`DataStore::transact`] so they commit whole or not at all
//! - Return domain types (`Book`, `Path`, `Page`, [`navigate::Navigation`], ...)
//! - Are completely UI-agnostic
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: No stdout, stderr, or terminal concerns
//! - **Argument parsing**: Ids arrive already parsed; the API facade does that
//! - **Authorization**: Ownership checks belong to the caller's auth layer
//! - **Presentation**: No strings meant for humans beyond error messages
//!
//! ## Testing Strategy
//!
//! **This is where the lion's share of testing lives.** Command tests use the
//! in-memory store and the `StoreFixture` builder, and cover every branch and
//! error condition.
//!
//! ## Command Modules
//!
//! - [`books`]: Book catalog (create, edit, delete, public highlights, my books)
//! - [`paths`]: Path tree mutator (add, rename, end, delete) and tree queries
//! - [`pages`]: Page store (by path, by book, by id, save)
//! - [`navigate`]: The reader's previous/current/next resolver
//! - [`outline`]: Nested path/page tree for the authoring view
//! - [`doctor`]: Verify and fix data consistency
//!
//! [`DataStore`]: crate::store::DataStore
//! [`DataStore::transact`]: crate::store::DataStore::transact

pub mod books;
pub mod doctor;
pub mod navigate;
pub mod outline;
pub mod pages;
pub mod paths;

pub use navigate::{Direction, Navigation, Reference};
pub use outline::OutlineNode;
pub use paths::{TreeOp, TreeOutcome};
