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

use crate::{Hash, LedgerError, TransactionRecord};

use indexmap::IndexSet;
use std::fmt::Debug;

/// The ledger operations consumed by the transaction requester.
pub trait LedgerService: Debug + Send + Sync {
    /// Returns `true` if the transaction body for the given hash is fully present.
    fn exists(&self, hash: &Hash) -> Result<bool, LedgerError>;

    /// Returns `false` only if the transaction is definitely not present.
    /// This probe may report false positives, but never false negatives.
    fn might_exist(&self, hash: &Hash) -> Result<bool, LedgerError>;

    /// Returns the transaction record for the given hash.
    fn fetch(&self, hash: &Hash) -> Result<TransactionRecord, LedgerError>;

    /// Returns the hashes that are referenced but not yet fully present.
    fn list_missing(&self) -> Result<Vec<Hash>, LedgerError>;

    /// Marks every given hash as solid, as a single atomic update.
    fn mark_solid(&self, hashes: &IndexSet<Hash>) -> Result<(), LedgerError>;

    /// Returns the number of stored transactions.
    fn count_stored(&self) -> Result<usize, LedgerError>;
}
