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

use crate::{Hash, NULL_HASH};

use serde::{Deserialize, Serialize};

/// The presence state of a transaction in the ledger.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Presence {
    /// The transaction has never been seen.
    Unknown,
    /// The transaction is referenced by a child, but its body has not been received.
    Placeholder,
    /// The transaction body has been received.
    Filled,
}

impl Presence {
    /// Returns `true` if the transaction body is present.
    pub const fn is_filled(&self) -> bool {
        matches!(self, Self::Filled)
    }

    /// Returns `true` if the transaction is only known by its hash.
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }
}

/// A read-only view of a transaction, as stored in the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// The transaction hash.
    pub hash: Hash,
    /// The trunk ancestry reference.
    pub trunk: Hash,
    /// The branch ancestry reference.
    pub branch: Hash,
    /// The presence state of the transaction body.
    pub presence: Presence,
    /// `true` once the full ancestry of the transaction is known to be present.
    pub solid: bool,
}

impl TransactionRecord {
    /// Initializes a new record for a received transaction.
    pub const fn filled(hash: Hash, trunk: Hash, branch: Hash) -> Self {
        Self { hash, trunk, branch, presence: Presence::Filled, solid: false }
    }

    /// Initializes a new record for a transaction that is only known by its hash.
    pub const fn placeholder(hash: Hash) -> Self {
        Self { hash, trunk: NULL_HASH, branch: NULL_HASH, presence: Presence::Placeholder, solid: false }
    }

    /// Returns the genesis record, which is always solid.
    pub const fn genesis() -> Self {
        Self { hash: NULL_HASH, trunk: NULL_HASH, branch: NULL_HASH, presence: Presence::Filled, solid: true }
    }
}
