// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Account Storage
//!
//! The backend writes the most recently created account (address and key
//! material) to a JSON file. This module puts that file behind the narrow
//! [`AccountStore`] interface so handlers never touch the filesystem
//! directly and tests can swap in [`InMemoryAccountStore`].
//!
//! ## Semantics
//!
//! - There is exactly one account: the last one the backend created.
//! - Every `get_account` call re-reads the source. Nothing is cached, so a
//!   read racing an account creation can observe the old record or fail.
//! - No locking across processes. The backend owns the file.

pub mod file;
pub mod memory;

pub use file::FileAccountStore;
pub use memory::InMemoryAccountStore;

use std::io;

use crate::models::AccountRecord;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// No account has been written yet.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[source] io::Error),

    /// The record exists but is not valid account JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        if e.kind() == io::ErrorKind::NotFound {
            StorageError::NotFound(e.to_string())
        } else {
            StorageError::Io(e)
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Single-slot store for the most recent account record.
pub trait AccountStore: Send + Sync {
    fn get_account(&self) -> StorageResult<AccountRecord>;

    /// Replace the stored record.
    fn put_account(&self, record: &AccountRecord) -> StorageResult<()>;
}
