//! Contact store capability
//!
//! A contact store is one account: something that can list, read, create and
//! update contact records addressed by a store-relative path. The aggregator
//! only ever talks to stores through [`ContactStore`].

pub mod memory;
pub mod vdir;

use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::contact::vcard::VcardError;
use crate::contact::{Card, ContactRecord};

pub use memory::MemoryStore;
pub use vdir::VdirStore;

/// Errors raised by a contact store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("deadline exceeded before {0}")]
    Timeout(String),

    #[error("{path} was modified since it was read")]
    Conflict { path: String },

    #[error("no record at {0}")]
    NotFound(String),

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: VcardError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether the failure means the account could not be reached at all
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            StoreError::Unavailable(_) | StoreError::Timeout(_) | StoreError::Io(_)
        )
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Per-invocation call options handed to every store operation
#[derive(Debug, Clone, Copy, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
}

impl CallContext {
    /// No deadline
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(timeout),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fail with [`StoreError::Timeout`] once the deadline has passed
    pub fn check(&self, operation: &str) -> StoreResult<()> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                Err(StoreError::Timeout(operation.to_string()))
            }
            _ => Ok(()),
        }
    }
}

/// One remote (or local) address book
pub trait ContactStore: Send + Sync {
    /// Account identity used in logs and error messages
    fn account_name(&self) -> &str;

    /// Run the full listing query
    fn list_contacts(&self, ctx: &CallContext) -> StoreResult<Vec<ContactRecord>>;

    fn get_contact(&self, ctx: &CallContext, path: &str) -> StoreResult<ContactRecord>;

    /// Write a record back to its path. Rejects the write with
    /// [`StoreError::Conflict`] when the record's etag is stale.
    fn put_contact(&self, ctx: &CallContext, record: &ContactRecord) -> StoreResult<ContactRecord>;

    /// Create a new record at a store-chosen path
    fn create_contact(&self, ctx: &CallContext, card: Card) -> StoreResult<ContactRecord>;
}

/// Content version of a serialized record
pub fn etag_for(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes).as_slice())
}
