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

use std::fmt;

/// The collaborator that originates a set of transaction requests.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Requests for the ancestry of milestones.
    Milestone,
    /// Requests for the ancestry of ordinary tips.
    Tip,
}

impl RequestKind {
    /// Returns the name of the gauge tracking the number of pending requests.
    #[cfg(feature = "metrics")]
    pub(crate) const fn pending_gauge(&self) -> &'static str {
        match self {
            Self::Milestone => metrics::requester::PENDING_MILESTONES,
            Self::Tip => metrics::requester::PENDING_TIPS,
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Milestone => write!(f, "milestone"),
            Self::Tip => write!(f, "tip"),
        }
    }
}
