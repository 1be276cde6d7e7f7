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

use crate::{RequestKind, TransactionRequester};
use dagsync_node_ledger_service::{Hash, LedgerError, LedgerService};

use std::{sync::Arc, time::Duration};

/// The transaction requesters of a node, one per originating collaborator.
#[derive(Clone, Debug)]
pub struct MissingRequests {
    /// The requests for the ancestry of milestones.
    milestones: TransactionRequester,
    /// The requests for the ancestry of ordinary tips.
    tips: TransactionRequester,
}

impl MissingRequests {
    /// Initializes the milestone and tip requesters over the given ledger.
    pub fn new(ledger: Arc<dyn LedgerService>) -> Self {
        Self {
            milestones: TransactionRequester::new(RequestKind::Milestone, ledger.clone()),
            tips: TransactionRequester::new(RequestKind::Tip, ledger),
        }
    }

    /// Sets the minimum time between two queue-depth reports, for both requesters.
    pub fn with_report_interval(self, report_interval: Duration) -> Self {
        Self {
            milestones: self.milestones.with_report_interval(report_interval),
            tips: self.tips.with_report_interval(report_interval),
        }
    }

    /// Returns the milestone requester.
    pub const fn milestones(&self) -> &TransactionRequester {
        &self.milestones
    }

    /// Returns the tip requester.
    pub const fn tips(&self) -> &TransactionRequester {
        &self.tips
    }

    /// Returns the requester for the given kind.
    pub const fn get(&self, kind: RequestKind) -> &TransactionRequester {
        match kind {
            RequestKind::Milestone => &self.milestones,
            RequestKind::Tip => &self.tips,
        }
    }

    /// Returns the total number of transactions to request, across milestones and tips.
    pub fn num_total_requests(&self) -> usize {
        self.milestones.num_requests() + self.tips.num_requests()
    }

    /// Rebuilds the tip requests from the ledger's missing transactions, returning the total number
    /// of requests. The origin of a rescanned hash is unknown, so it is tracked as a tip request,
    /// unless a milestone request already covers it.
    pub fn rescan_all(&self) -> Result<usize, LedgerError> {
        self.tips.rescan()?;
        for hash in self.milestones.requested_hashes() {
            self.tips.clear(&hash);
        }
        Ok(self.num_total_requests())
    }

    /// Clears the given hash from both requesters, returning `true` if either held it.
    pub fn clear(&self, hash: &Hash) -> bool {
        let cleared_milestone = self.milestones.clear(hash);
        let cleared_tip = self.tips.clear(hash);
        cleared_milestone || cleared_tip
    }
}
