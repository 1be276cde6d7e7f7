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

#![allow(dead_code)]

use dagsync_node_ledger_service::{Hash, MemoryLedgerService, HASH_SIZE, NULL_HASH};

use std::sync::Arc;

/// Returns a hash with every byte set to the given value.
pub fn hash(byte: u8) -> Hash {
    Hash::new([byte; HASH_SIZE])
}

/// Returns a distinct hash for the given index.
pub fn indexed_hash(index: u32) -> Hash {
    let mut bytes = [0u8; HASH_SIZE];
    bytes[..4].copy_from_slice(&index.to_le_bytes());
    bytes[HASH_SIZE - 1] = 0xff;
    Hash::new(bytes)
}

/// Builds a ledger holding a chain of `length` transactions, where each transaction
/// uses its predecessor as trunk and the null hash as branch. Returns the chain tip.
pub fn chain(ledger: &MemoryLedgerService, length: u32) -> Hash {
    let mut parent = NULL_HASH;
    for index in 1..=length {
        let hash = indexed_hash(index);
        ledger.insert_transaction(hash, parent, NULL_HASH);
        parent = hash;
    }
    parent
}

/// Initializes a new in-memory ledger.
pub fn sample_ledger() -> Arc<MemoryLedgerService> {
    let ledger = Arc::new(MemoryLedgerService::new());
    ledger.insert_genesis();
    ledger
}
