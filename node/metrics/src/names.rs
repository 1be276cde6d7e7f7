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

pub const GAUGE_NAMES: [&str; 2] = [requester::PENDING_MILESTONES, requester::PENDING_TIPS];
pub const COUNTER_NAMES: [&str; 3] = [requester::DISCARDED, solidity::MISSING, solidity::SOLIDIFIED];
pub const HISTOGRAM_NAMES: [&str; 1] = [dispatcher::PROBE_LATENCY];

pub mod requester {
    pub const PENDING_MILESTONES: &str = "dagsync_requester_pending_milestones";
    pub const PENDING_TIPS: &str = "dagsync_requester_pending_tips";
    pub const DISCARDED: &str = "dagsync_requester_discarded_total";
}

pub mod solidity {
    pub const SOLIDIFIED: &str = "dagsync_solidity_solidified_total";
    pub const MISSING: &str = "dagsync_solidity_missing_total";
}

pub mod dispatcher {
    pub const PROBE_LATENCY: &str = "dagsync_dispatcher_probe_latency_secs";
}
