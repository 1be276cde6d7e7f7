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

pub mod logger;
pub use logger::*;

use dagsync_node_ledger_service::Hash;

use anyhow::{anyhow, Result};
use core::str::FromStr;

/// Parses a comma-separated list of hex-encoded hashes, rejecting malformed entries.
pub fn parse_hashes(hashes: &str) -> Result<Vec<Hash>> {
    hashes
        .split(',')
        .map(str::trim)
        .filter(|hash| !hash.is_empty())
        .map(|hash| Hash::from_str(hash).map_err(|error| anyhow!("The hash '{hash}' is malformed: {error}")))
        .collect()
}
