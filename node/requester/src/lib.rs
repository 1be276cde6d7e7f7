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

#![forbid(unsafe_code)]

#[macro_use]
extern crate tracing;

pub mod helpers;
pub use helpers::*;

mod dispatcher;
pub use dispatcher::*;

mod missing;
pub use missing::*;

mod solidity;
pub use solidity::*;

use dagsync_node_ledger_service::{fmt_id, Hash, LedgerError, LedgerService};

use parking_lot::Mutex;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

/// The minimum time between two queue-depth reports.
pub const REPORT_INTERVAL: Duration = Duration::from_secs(10);

/// Tracks the transactions that are referenced but missing, and must be requested from peers.
#[derive(Clone, Debug)]
pub struct TransactionRequester {
    /// The collaborator that originates these requests.
    kind: RequestKind,
    /// The ledger, which is the source of truth for presence and solidity.
    ledger: Arc<dyn LedgerService>,
    /// The hashes awaiting request.
    requests: RequestSet,
    /// The minimum time between two queue-depth reports.
    report_interval: Duration,
    /// The time of the last queue-depth report.
    last_report: Arc<Mutex<Instant>>,
}

impl TransactionRequester {
    /// Initializes a new transaction requester.
    pub fn new(kind: RequestKind, ledger: Arc<dyn LedgerService>) -> Self {
        Self {
            kind,
            ledger,
            requests: Default::default(),
            report_interval: REPORT_INTERVAL,
            last_report: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Sets the minimum time between two queue-depth reports.
    pub fn with_report_interval(mut self, report_interval: Duration) -> Self {
        self.report_interval = report_interval;
        self
    }

    /// Returns the collaborator that originates these requests.
    pub const fn kind(&self) -> RequestKind {
        self.kind
    }

    /// Returns the number of transactions to request.
    pub fn num_requests(&self) -> usize {
        self.requests.len()
    }

    /// Returns `true` if the specified `hash` is awaiting request.
    pub fn contains(&self, hash: &Hash) -> bool {
        self.requests.contains(hash)
    }

    /// Returns the transactions to request, in queue order.
    pub fn requested_hashes(&self) -> Vec<Hash> {
        self.requests.snapshot()
    }

    /// Replaces the transactions to request with the ledger's list of missing transactions.
    /// If the ledger cannot answer, the current requests are left untouched.
    pub fn rescan(&self) -> Result<usize, LedgerError> {
        let missing = self.ledger.list_missing()?;
        let num_requests = self.requests.replace(missing.into_iter().filter(|hash| !hash.is_null()));
        debug!("Rescanned {num_requests} missing transactions for {} requests", self.kind);
        self.update_metrics();
        Ok(num_requests)
    }

    /// Adds the specified `hash` to the transactions to request, unless it is the null hash
    /// or the ledger already has it. Returns `true` if the hash was newly added.
    pub fn request(&self, hash: Hash) -> Result<bool, LedgerError> {
        if hash.is_null() || self.ledger.exists(&hash)? {
            return Ok(false);
        }
        let is_new = self.requests.insert(hash);
        if is_new {
            trace!("Requesting {} transaction {}", self.kind, fmt_id(hash));
            self.update_metrics();
        }
        Ok(is_new)
    }

    /// Removes the specified `hash` from the transactions to request.
    /// Returns `true` if the hash was awaiting request.
    pub fn clear(&self, hash: &Hash) -> bool {
        let is_removed = self.requests.remove(hash);
        if is_removed {
            trace!("Cleared the {} request for {}", self.kind, fmt_id(hash));
            self.update_metrics();
        }
        is_removed
    }

    /// Updates the pending requests gauge.
    fn update_metrics(&self) {
        #[cfg(feature = "metrics")]
        metrics::gauge(self.kind.pending_gauge(), self.requests.len() as f64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dagsync_node_ledger_service::{MemoryLedgerService, TransactionRecord, HASH_SIZE, NULL_HASH};

    use indexmap::IndexSet;
    use std::sync::atomic::{AtomicBool, Ordering};

    pub(crate) fn hash(byte: u8) -> Hash {
        Hash::new([byte; HASH_SIZE])
    }

    /// A ledger that fails every query while `is_down` is set, and every solid update while `rejects_writes` is set.
    #[derive(Debug, Default)]
    pub(crate) struct FlakyLedger {
        pub(crate) inner: MemoryLedgerService,
        pub(crate) is_down: AtomicBool,
        pub(crate) rejects_writes: AtomicBool,
    }

    impl FlakyLedger {
        fn check(&self) -> Result<(), LedgerError> {
            match self.is_down.load(Ordering::SeqCst) {
                true => Err(LedgerError::Unavailable("storage fault".to_string())),
                false => Ok(()),
            }
        }
    }

    impl LedgerService for FlakyLedger {
        fn exists(&self, hash: &Hash) -> Result<bool, LedgerError> {
            self.check()?;
            self.inner.exists(hash)
        }

        fn might_exist(&self, hash: &Hash) -> Result<bool, LedgerError> {
            self.check()?;
            self.inner.might_exist(hash)
        }

        fn fetch(&self, hash: &Hash) -> Result<TransactionRecord, LedgerError> {
            self.check()?;
            self.inner.fetch(hash)
        }

        fn list_missing(&self) -> Result<Vec<Hash>, LedgerError> {
            self.check()?;
            self.inner.list_missing()
        }

        fn mark_solid(&self, hashes: &IndexSet<Hash>) -> Result<(), LedgerError> {
            self.check()?;
            if self.rejects_writes.load(Ordering::SeqCst) {
                return Err(LedgerError::Unavailable("read-only storage".to_string()));
            }
            self.inner.mark_solid(hashes)
        }

        fn count_stored(&self) -> Result<usize, LedgerError> {
            self.check()?;
            self.inner.count_stored()
        }
    }

    #[test]
    fn test_request_is_idempotent() {
        let ledger = Arc::new(MemoryLedgerService::new());
        let requester = TransactionRequester::new(RequestKind::Tip, ledger);

        assert!(requester.request(hash(1)).unwrap());
        assert!(!requester.request(hash(1)).unwrap());
        assert_eq!(requester.num_requests(), 1);
        assert_eq!(requester.requested_hashes(), vec![hash(1)]);
    }

    #[test]
    fn test_request_skips_null_and_present_hashes() {
        let ledger = Arc::new(MemoryLedgerService::new());
        ledger.insert_transaction(hash(1), NULL_HASH, NULL_HASH);
        let requester = TransactionRequester::new(RequestKind::Tip, ledger.clone());

        assert!(!requester.request(NULL_HASH).unwrap());
        assert!(!requester.request(hash(1)).unwrap());
        assert_eq!(requester.num_requests(), 0);

        // The check is read-only.
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_request_accepts_placeholders() {
        let ledger = Arc::new(MemoryLedgerService::new());
        ledger.insert_transaction(hash(1), hash(2), NULL_HASH);
        let requester = TransactionRequester::new(RequestKind::Milestone, ledger);

        assert!(requester.request(hash(2)).unwrap());
        assert!(requester.contains(&hash(2)));
        assert_eq!(requester.kind(), RequestKind::Milestone);
    }

    #[test]
    fn test_clear() {
        let ledger = Arc::new(MemoryLedgerService::new());
        let requester = TransactionRequester::new(RequestKind::Tip, ledger);

        assert!(!requester.clear(&hash(1)));
        requester.request(hash(1)).unwrap();
        requester.request(hash(2)).unwrap();
        assert!(requester.clear(&hash(1)));
        assert!(!requester.clear(&hash(1)));
        assert_eq!(requester.requested_hashes(), vec![hash(2)]);
    }

    #[test]
    fn test_rescan_replaces_requests() {
        let ledger = Arc::new(MemoryLedgerService::new());
        ledger.insert_transaction(hash(1), hash(2), hash(3));
        let requester = TransactionRequester::new(RequestKind::Tip, ledger);

        // A stale request is discarded by the rescan.
        requester.request(hash(9)).unwrap();
        assert_eq!(requester.rescan().unwrap(), 2);
        assert_eq!(requester.requested_hashes(), vec![hash(2), hash(3)]);
    }

    #[test]
    fn test_rescan_failure_keeps_requests() {
        let ledger = Arc::new(FlakyLedger::default());
        ledger.inner.insert_transaction(hash(1), hash(2), hash(3));
        let requester = TransactionRequester::new(RequestKind::Tip, ledger.clone());
        requester.request(hash(9)).unwrap();

        ledger.is_down.store(true, Ordering::SeqCst);
        assert!(matches!(requester.rescan(), Err(LedgerError::Unavailable(_))));
        assert_eq!(requester.requested_hashes(), vec![hash(9)]);

        ledger.is_down.store(false, Ordering::SeqCst);
        assert_eq!(requester.rescan().unwrap(), 2);
        assert_eq!(requester.requested_hashes(), vec![hash(2), hash(3)]);
    }

    #[test]
    fn test_request_propagates_unavailable() {
        let ledger = Arc::new(FlakyLedger::default());
        ledger.is_down.store(true, Ordering::SeqCst);
        let requester = TransactionRequester::new(RequestKind::Tip, ledger);

        assert!(matches!(requester.request(hash(1)), Err(LedgerError::Unavailable(_))));
        assert_eq!(requester.num_requests(), 0);
        // The null hash is rejected before the ledger is consulted.
        assert!(!requester.request(NULL_HASH).unwrap());
    }
}
