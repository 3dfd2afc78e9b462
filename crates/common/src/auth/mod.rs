//! Session token storage
//!
//! The session is an explicit [`TokenStore`] object: constructed when the
//! application starts, handed to the request layer, and cleared on logout.
//! Nothing reaches the tokens through ambient global state.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   TokenStore    │  access/refresh pair under two fixed keys
//! └────────┬────────┘
//!          │
//!          └──► KeyValueStorage   (synchronous key-value backend)
//!                 ├── MemoryStorage    (process memory)
//!                 ├── KeychainStorage  (platform keychain, `platform` feature)
//!                 └── FileStorage      (JSON file, provided by infra)
//! ```
//!
//! # Usage Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use applymate_common::auth::{MemoryStorage, TokenStore};
//! use applymate_domain::TokenPair;
//!
//! let store = TokenStore::new(Arc::new(MemoryStorage::new()));
//! store.set_tokens(&TokenPair::new("A1", "R1"))?;
//! assert!(store.is_authenticated());
//!
//! store.clear()?;
//! assert_eq!(store.access(), "");
//! # Ok::<(), applymate_common::auth::StorageError>(())
//! ```

#[cfg(feature = "platform")]
mod keychain;
pub mod storage;
pub mod token_store;

#[cfg(feature = "platform")]
pub use keychain::KeychainStorage;
pub use storage::{KeyValueStorage, MemoryStorage, StorageError};
pub use token_store::TokenStore;
