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

use crate::{Cycle, TransactionRequester};
use dagsync_node_ledger_service::{fmt_id, Hash, LedgerError};

use std::time::Instant;

impl TransactionRequester {
    /// Returns the next transaction to request from peers, or `None` if there is nothing to request.
    ///
    /// Each candidate is re-checked against the ledger's cheap existence probe. A hash that is
    /// still missing is rotated to the tail of the queue and returned, so that it is offered
    /// again on a later call until it arrives. A hash that may already exist is discarded.
    pub fn transaction_to_request(&self) -> Result<Option<Hash>, LedgerError> {
        let timer = Instant::now();

        let mut hash = None;
        while let Some(cycle) = self.requests.cycle_front(|hash| self.probe(hash).map(|exists| !exists))? {
            match cycle {
                Cycle::Kept(candidate) => {
                    hash = Some(candidate);
                    break;
                }
                Cycle::Dropped(candidate) => {
                    info!("Removed existing transaction {} from the {} request list", fmt_id(candidate), self.kind);
                    #[cfg(feature = "metrics")]
                    metrics::increment_counter(metrics::requester::DISCARDED);
                }
            }
        }

        #[cfg(feature = "metrics")]
        {
            metrics::histogram(metrics::dispatcher::PROBE_LATENCY, timer.elapsed().as_secs_f64());
            self.update_metrics();
        }
        self.report_queue_depth(timer);
        Ok(hash)
    }

    /// Returns `true` if the given hash may already be in the ledger.
    fn probe(&self, hash: &Hash) -> Result<bool, LedgerError> {
        Ok(hash.is_null() || self.ledger.might_exist(hash)?)
    }

    /// Logs the number of transactions to request, at most once per report interval.
    fn report_queue_depth(&self, timer: Instant) {
        let now = Instant::now();
        {
            let mut last_report = self.last_report.lock();
            if now.duration_since(*last_report) < self.report_interval {
                return;
            }
            *last_report = now;
        }
        match self.ledger.count_stored() {
            Ok(num_stored) => info!(
                "Transactions to request = {} / {num_stored} ({} ms)",
                self.num_requests(),
                timer.elapsed().as_millis()
            ),
            Err(error) => warn!("Unable to count the stored transactions - {error}"),
        }
    }
}
