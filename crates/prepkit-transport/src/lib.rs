//! HTTP transport for Prepkit.
//!
//! This crate wraps all outbound requests with the two cross-cutting
//! behaviors the rest of the stack relies on:
//!
//! 1. **Auth-header injection** — a stored token rides along on every
//!    request as a bearer credential ([`ApiClient`]).
//! 2. **Forced logout on authorization-denied** — a 401 response evicts
//!    the stored token and fires the registered [`UnauthorizedHook`]
//!    before the error propagates.
//!
//! It also owns durable token storage ([`TokenStore`] and its file and
//! in-memory implementations), since both hooks read or write it.
//!
//! # How it fits in the stack
//!
//! ```text
//! Session Layer (above)  ← typed operations: login, profile, logout
//!     ↕
//! Transport Layer (this crate)  ← base URL, timeouts, hooks, token store
//!     ↕
//! Backend API (outside)  ← opaque request/response over HTTP
//! ```

mod client;
mod error;
mod storage;

pub use client::{ApiClient, ApiConfig, UnauthorizedHook};
pub use error::TransportError;
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
