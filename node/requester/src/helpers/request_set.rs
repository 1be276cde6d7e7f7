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

use dagsync_node_ledger_service::Hash;

use indexmap::IndexMap;
use parking_lot::Mutex;
use std::{collections::VecDeque, sync::Arc};

/// The outcome of cycling the head of the request set.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cycle {
    /// The hash was kept, and moved to the tail of the set.
    Kept(Hash),
    /// The hash was dropped from the set.
    Dropped(Hash),
}

/// A FIFO queue with constant-time membership.
///
/// Removal only drops the membership entry; the stale queue slot is skipped on pop,
/// and reclaimed once stale slots outnumber the live ones.
#[derive(Debug, Default)]
struct Queue {
    /// The queue slots, each tagged with the sequence number it was pushed with.
    order: VecDeque<(u64, Hash)>,
    /// The live hashes, mapped to the sequence number of their queue slot.
    members: IndexMap<Hash, u64>,
    /// The sequence number of the next push.
    next_sequence: u64,
}

impl Queue {
    fn is_live(&self, sequence: u64, hash: &Hash) -> bool {
        self.members.get(hash) == Some(&sequence)
    }

    fn push_back(&mut self, hash: Hash) -> bool {
        if self.members.contains_key(&hash) {
            return false;
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.members.insert(hash, sequence);
        self.order.push_back((sequence, hash));
        true
    }

    fn pop_front(&mut self) -> Option<Hash> {
        while let Some((sequence, hash)) = self.order.pop_front() {
            if self.is_live(sequence, &hash) {
                self.members.swap_remove(&hash);
                return Some(hash);
            }
        }
        None
    }

    fn remove(&mut self, hash: &Hash) -> bool {
        let is_removed = self.members.swap_remove(hash).is_some();
        if is_removed && self.order.len() > 2 * self.members.len() + 32 {
            let members = &self.members;
            self.order.retain(|(sequence, hash)| members.get(hash) == Some(sequence));
        }
        is_removed
    }

    fn iter(&self) -> impl Iterator<Item = &Hash> {
        self.order.iter().filter(|(sequence, hash)| self.is_live(*sequence, hash)).map(|(_, hash)| hash)
    }
}

/// A de-duplicated, FIFO-ordered set of hashes awaiting request.
///
/// Every access acquires the lock for the duration of a single operation,
/// and the underlying collection is never exposed. Insertion, removal, and
/// cycling the head are amortized constant time.
#[derive(Clone, Debug, Default)]
pub struct RequestSet {
    /// The queue of `transaction hashes` to request, in insertion order.
    hashes: Arc<Mutex<Queue>>,
}

impl RequestSet {
    /// Initializes a new instance of the request set.
    pub fn new() -> Self {
        Self { hashes: Default::default() }
    }

    /// Returns `true` if the request set is empty.
    pub fn is_empty(&self) -> bool {
        self.hashes.lock().members.is_empty()
    }

    /// Returns the number of hashes in the request set.
    pub fn len(&self) -> usize {
        self.hashes.lock().members.len()
    }

    /// Returns `true` if the request set contains the specified `hash`.
    pub fn contains(&self, hash: &Hash) -> bool {
        self.hashes.lock().members.contains_key(hash)
    }

    /// Returns a point-in-time copy of the hashes, in queue order.
    pub fn snapshot(&self) -> Vec<Hash> {
        self.hashes.lock().iter().copied().collect()
    }

    /// Appends the specified `hash` to the tail of the set.
    /// Returns `true` if the hash was newly inserted.
    pub fn insert(&self, hash: Hash) -> bool {
        self.hashes.lock().push_back(hash)
    }

    /// Removes the specified `hash`, preserving the order of the remaining hashes.
    /// Returns `true` if the hash was present.
    pub fn remove(&self, hash: &Hash) -> bool {
        self.hashes.lock().remove(hash)
    }

    /// Replaces the contents of the set with the given hashes, returning the new size.
    pub fn replace(&self, hashes: impl IntoIterator<Item = Hash>) -> usize {
        // Build the new queue before acquiring the lock.
        let mut queue = Queue::default();
        for hash in hashes {
            queue.push_back(hash);
        }
        let num_hashes = queue.members.len();
        *self.hashes.lock() = queue;
        num_hashes
    }

    /// Removes the head of the set and passes it to `keep`, all under one lock acquisition.
    /// If `keep` returns `true`, the hash is moved to the tail of the set, otherwise it is dropped.
    /// If `keep` fails, the hash is moved to the tail and the error is returned.
    ///
    /// Returns `None` if the set is empty.
    pub fn cycle_front<E>(&self, keep: impl FnOnce(&Hash) -> Result<bool, E>) -> Result<Option<Cycle>, E> {
        // Acquire the lock.
        let mut hashes = self.hashes.lock();
        // Take the head of the queue.
        let Some(hash) = hashes.pop_front() else {
            return Ok(None);
        };
        match keep(&hash) {
            Ok(true) => {
                hashes.push_back(hash);
                Ok(Some(Cycle::Kept(hash)))
            }
            Ok(false) => Ok(Some(Cycle::Dropped(hash))),
            Err(error) => {
                hashes.push_back(hash);
                Err(error)
            }
        }
    }
}
