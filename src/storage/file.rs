// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Account record on the local filesystem.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use super::{AccountStore, StorageResult};
use crate::models::AccountRecord;

/// Reads and writes the backend's account JSON file.
#[derive(Debug, Clone)]
pub struct FileAccountStore {
    path: PathBuf,
}

impl FileAccountStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl AccountStore for FileAccountStore {
    fn get_account(&self) -> StorageResult<AccountRecord> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }

    fn put_account(&self, record: &AccountRecord) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        // Write to temp file first, then rename
        let temp_path = self.path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, record)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StorageError;
    use serde_json::json;

    fn record() -> AccountRecord {
        AccountRecord {
            address: "0x04a69af1ef2d19c4e7ef379f6ff4c1a36e78d10fd5c8f96f0ea41012052a8e7c".into(),
            private_key: "0x7f3a".into(),
            public_key: Some("0x51c2".into()),
            funding_tx_hash: Some(json!("0xfeed")),
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileAccountStore::new(dir.path().join("new_account.json"));

        assert!(matches!(store.get_account(), Err(StorageError::NotFound(_))));
    }

    #[test]
    fn reads_file_written_by_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new_account.json");
        fs::write(
            &path,
            r#"{
    "address": "0x0abc",
    "private_key": "0xdef",
    "public_key": "0x123",
    "funding_tx_hash": {"tx_hash": "0x99"}
}"#,
        )
        .unwrap();

        let store = FileAccountStore::new(&path);
        let account = store.get_account().unwrap();
        assert_eq!(account.address, "0x0abc");
        assert_eq!(account.private_key, "0xdef");
        assert_eq!(account.funding_tx_hash, Some(json!({"tx_hash": "0x99"})));
    }

    #[test]
    fn malformed_file_is_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new_account.json");
        fs::write(&path, "{ not json").unwrap();

        let store = FileAccountStore::new(&path);
        assert!(matches!(store.get_account(), Err(StorageError::Json(_))));
    }

    #[test]
    fn put_then_get_returns_latest_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("new_account.json");
        let store = FileAccountStore::new(&path);

        store.put_account(&record()).unwrap();
        assert!(path.is_file());
        assert_eq!(store.get_account().unwrap(), record());

        let mut newer = record();
        newer.address = "0x0530f347bb9aad521c36d803f44957242dbf67cb52078609e3c3cfb5a82e9544".into();
        store.put_account(&newer).unwrap();
        assert_eq!(store.get_account().unwrap(), newer);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn every_read_sees_the_current_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new_account.json");
        let store = FileAccountStore::new(&path);

        store.put_account(&record()).unwrap();
        let _ = store.get_account().unwrap();

        fs::write(&path, r#"{"address":"0x0fresh","private_key":"0x1"}"#).unwrap();
        assert_eq!(store.get_account().unwrap().address, "0x0fresh");
    }
}
