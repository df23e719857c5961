// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory account store for tests and local runs without a backend.

use std::sync::RwLock;

use super::{AccountStore, StorageError, StorageResult};
use crate::models::AccountRecord;

#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    account: RwLock<Option<AccountRecord>>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(record: AccountRecord) -> Self {
        Self {
            account: RwLock::new(Some(record)),
        }
    }
}

impl AccountStore for InMemoryAccountStore {
    fn get_account(&self) -> StorageResult<AccountRecord> {
        let guard = self
            .account
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard
            .clone()
            .ok_or_else(|| StorageError::NotFound("account".to_string()))
    }

    fn put_account(&self, record: &AccountRecord) -> StorageResult<()> {
        let mut guard = self
            .account
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(address: &str) -> AccountRecord {
        AccountRecord {
            address: address.into(),
            private_key: "0xkey".into(),
            public_key: None,
            funding_tx_hash: None,
        }
    }

    #[test]
    fn empty_store_has_no_account() {
        let store = InMemoryAccountStore::new();
        assert!(matches!(store.get_account(), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn keeps_only_the_most_recent_account() {
        let store = InMemoryAccountStore::with_account(record("0x01"));
        assert_eq!(store.get_account().unwrap().address, "0x01");

        store.put_account(&record("0x02")).unwrap();
        assert_eq!(store.get_account().unwrap().address, "0x02");
    }
}
