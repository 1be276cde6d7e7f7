// Copyright 2024 Aleo Network Foundation
// This file is part of the snarkOS library.

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at:

// http://www.apache.org/licenses/LICENSE-2.0

// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::{fmt_id, Hash, LedgerError, LedgerService, Presence, TransactionRecord, NULL_HASH};

use indexmap::{IndexMap, IndexSet};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::*;

/// A transaction entry in a ledger file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub hash: Hash,
    pub trunk: Hash,
    pub branch: Hash,
    /// Marks the entry as solid on load (e.g. for transactions below a snapshot).
    #[serde(default)]
    pub solid: bool,
}

/// The on-disk format of a ledger file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFile {
    pub transactions: Vec<LedgerEntry>,
}

/// An in-memory ledger service.
///
/// Referencing an unseen trunk or branch creates a placeholder record for it,
/// which is upgraded once the transaction body arrives.
#[derive(Debug, Default)]
pub struct MemoryLedgerService {
    /// The map of `transaction hash` to `transaction record` entries.
    records: RwLock<IndexMap<Hash, TransactionRecord>>,
}

impl MemoryLedgerService {
    /// Initializes a new in-memory ledger service.
    pub fn new() -> Self {
        Self { records: Default::default() }
    }

    /// Initializes a new in-memory ledger service from the given ledger file.
    pub fn from_file(file: &LedgerFile) -> Self {
        let ledger = Self::new();
        for entry in &file.transactions {
            ledger.insert_transaction(entry.hash, entry.trunk, entry.branch);
        }
        let solid: IndexSet<Hash> =
            file.transactions.iter().filter(|entry| entry.solid).map(|entry| entry.hash).collect();
        ledger.set_solid(&solid);
        ledger
    }

    /// Loads an in-memory ledger service from the JSON ledger file at the given path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|error| LedgerError::Unavailable(format!("failed to read '{}': {error}", path.display())))?;
        let file: LedgerFile = serde_json::from_str(&contents)
            .map_err(|error| LedgerError::Unavailable(format!("failed to parse '{}': {error}", path.display())))?;
        Ok(Self::from_file(&file))
    }

    /// Stores the genesis record.
    pub fn insert_genesis(&self) {
        self.records.write().insert(NULL_HASH, TransactionRecord::genesis());
    }

    /// Stores the body of the given transaction, creating placeholders for any unseen ancestors.
    /// Returns `true` if the transaction body is new.
    pub fn insert_transaction(&self, hash: Hash, trunk: Hash, branch: Hash) -> bool {
        if hash.is_null() {
            self.insert_genesis();
            return false;
        }
        // Acquire the write lock.
        let mut records = self.records.write();
        let is_new = match records.get_mut(&hash) {
            Some(record) if record.presence.is_filled() => false,
            Some(record) => {
                // Upgrade the placeholder, keeping its position in the ledger.
                record.trunk = trunk;
                record.branch = branch;
                record.presence = Presence::Filled;
                true
            }
            None => {
                records.insert(hash, TransactionRecord::filled(hash, trunk, branch));
                true
            }
        };
        if is_new {
            for ancestor in [trunk, branch] {
                if !ancestor.is_null() && !records.contains_key(&ancestor) {
                    trace!("Inserting a placeholder for {}", fmt_id(ancestor));
                    records.insert(ancestor, TransactionRecord::placeholder(ancestor));
                }
            }
        }
        is_new
    }

    /// Returns the presence state of the given hash.
    pub fn presence(&self, hash: &Hash) -> Presence {
        self.records.read().get(hash).map_or(Presence::Unknown, |record| record.presence)
    }

    /// Returns `true` if the given hash is marked as solid.
    pub fn is_solid(&self, hash: &Hash) -> bool {
        self.records.read().get(hash).map_or(false, |record| record.solid)
    }

    /// Returns the solid flags of the given hashes, read under a single lock.
    pub fn solid_flags(&self, hashes: &[Hash]) -> Vec<bool> {
        let records = self.records.read();
        hashes.iter().map(|hash| records.get(hash).map_or(false, |record| record.solid)).collect()
    }

    /// Returns the number of records, including placeholders.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Returns `true` if the ledger holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Returns the hashes of all received transaction bodies.
    pub fn filled_hashes(&self) -> Vec<Hash> {
        self.records.read().values().filter(|record| record.presence.is_filled()).map(|record| record.hash).collect()
    }

    /// Sets the solid flag on every stored record in the given set.
    fn set_solid(&self, hashes: &IndexSet<Hash>) {
        // Acquire the write lock once, so readers never observe a partial update.
        let mut records = self.records.write();
        for hash in hashes {
            match records.get_mut(hash) {
                Some(record) => record.solid = true,
                None if hash.is_null() => {
                    records.insert(NULL_HASH, TransactionRecord::genesis());
                }
                None => trace!("Skipping the solid flag for unknown transaction {}", fmt_id(hash)),
            }
        }
    }
}

impl LedgerService for MemoryLedgerService {
    /// Returns `true` for the null hash and for received transaction bodies.
    fn exists(&self, hash: &Hash) -> Result<bool, LedgerError> {
        Ok(hash.is_null() || self.presence(hash).is_filled())
    }

    /// Returns the same answer as `exists`, as the in-memory lookup is already cheap.
    fn might_exist(&self, hash: &Hash) -> Result<bool, LedgerError> {
        self.exists(hash)
    }

    fn fetch(&self, hash: &Hash) -> Result<TransactionRecord, LedgerError> {
        match self.records.read().get(hash) {
            Some(record) => Ok(record.clone()),
            None if hash.is_null() => Ok(TransactionRecord::genesis()),
            None => Err(LedgerError::NotFound(*hash)),
        }
    }

    fn list_missing(&self) -> Result<Vec<Hash>, LedgerError> {
        Ok(self.records.read().values().filter(|record| record.presence.is_placeholder()).map(|r| r.hash).collect())
    }

    fn mark_solid(&self, hashes: &IndexSet<Hash>) -> Result<(), LedgerError> {
        self.set_solid(hashes);
        Ok(())
    }

    fn count_stored(&self) -> Result<usize, LedgerError> {
        Ok(self.records.read().values().filter(|record| record.presence.is_filled()).count())
    }
}
