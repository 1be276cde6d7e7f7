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

use crate::TransactionRequester;
use dagsync_node_ledger_service::{fmt_id, Hash, LedgerError, NULL_HASH};

use indexmap::IndexSet;
use std::collections::VecDeque;

/// The outcome of a traversal of a transaction's ancestry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Solidity {
    /// Every ancestor is present. Holds the analyzed hashes, including the null hash.
    Solid(IndexSet<Hash>),
    /// The traversal stopped at the first ancestor whose body is missing.
    MissingAncestor(Hash),
}

impl Solidity {
    /// Returns `true` if every ancestor is present.
    pub const fn is_solid(&self) -> bool {
        matches!(self, Self::Solid(..))
    }
}

impl TransactionRequester {
    /// Returns `true` if the full ancestry of the given transaction is present.
    ///
    /// On success, every analyzed hash is marked solid in one ledger update.
    /// Otherwise, the first missing ancestor (breadth-first, trunk before branch)
    /// is requested, and no solid flag is changed.
    pub fn check_solidity(&self, hash: Hash) -> Result<bool, LedgerError> {
        match self.analyze_solidity(hash)? {
            Solidity::Solid(analyzed) => {
                self.ledger.mark_solid(&analyzed)?;
                debug!(
                    "Solidified {} transactions from {}: {}",
                    analyzed.len(),
                    fmt_id(hash),
                    analyzed.iter().map(fmt_id).collect::<Vec<_>>().join(", ")
                );
                #[cfg(feature = "metrics")]
                metrics::increment_counter(metrics::solidity::SOLIDIFIED);
                Ok(true)
            }
            Solidity::MissingAncestor(missing) => {
                trace!("Transaction {} is missing ancestor {}", fmt_id(hash), fmt_id(missing));
                self.request(missing)?;
                #[cfg(feature = "metrics")]
                metrics::increment_counter(metrics::solidity::MISSING);
                Ok(false)
            }
        }
    }

    /// Traverses the ancestry of the given transaction without side effects.
    ///
    /// Ancestors already marked solid are not descended into. The traversal stops
    /// at the first ancestor whose body is not present.
    pub fn analyze_solidity(&self, hash: Hash) -> Result<Solidity, LedgerError> {
        // The null hash is always present.
        let mut analyzed = IndexSet::from([NULL_HASH]);
        let mut frontier = VecDeque::from([hash]);

        while let Some(pointer) = frontier.pop_front() {
            if !analyzed.insert(pointer) {
                continue;
            }
            let record = self.ledger.fetch(&pointer)?;
            if record.solid {
                continue;
            }
            if !record.presence.is_filled() {
                return Ok(Solidity::MissingAncestor(pointer));
            }
            frontier.push_back(record.trunk);
            frontier.push_back(record.branch);
        }
        Ok(Solidity::Solid(analyzed))
    }
}
