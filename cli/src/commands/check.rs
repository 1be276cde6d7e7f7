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

use dagsync_node_ledger_service::{Hash, MemoryLedgerService};
use dagsync_node_requester::{RequestKind, TransactionRequester};

use anyhow::Result;
use clap::Parser;
use core::str::FromStr;
use std::{path::PathBuf, sync::Arc};

/// Checks whether the full ancestry of a transaction is present in a ledger file.
#[derive(Clone, Debug, Parser)]
pub struct Check {
    /// Specify the path to the JSON ledger file.
    #[clap(long = "ledger")]
    pub ledger: PathBuf,
    /// Specify the hex-encoded hash of the transaction to check.
    #[clap(value_parser = Hash::from_str)]
    pub hash: Hash,
}

impl Check {
    /// Runs the solidity check, returning a summary.
    pub fn parse(self) -> Result<String> {
        let ledger = Arc::new(MemoryLedgerService::load(&self.ledger)?);
        let requester = TransactionRequester::new(RequestKind::Tip, ledger);

        match requester.check_solidity(self.hash)? {
            true => Ok(format!("✅ Transaction {} is solid", self.hash)),
            false => {
                let requests = requester.requested_hashes().iter().map(Hash::to_string).collect::<Vec<_>>();
                Ok(format!("❌ Transaction {} is not solid - requesting {}", self.hash, requests.join(", ")))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dagsync_node_ledger_service::{LedgerEntry, LedgerFile, HASH_SIZE, NULL_HASH};

    use std::io::Write;

    fn write_ledger(file: &LedgerFile) -> tempfile::NamedTempFile {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(serde_json::to_string(file).unwrap().as_bytes()).unwrap();
        tmp
    }

    #[test]
    fn test_check_solid() {
        let a = Hash::new([0xa; HASH_SIZE]);
        let tmp = write_ledger(&LedgerFile {
            transactions: vec![LedgerEntry { hash: a, trunk: NULL_HASH, branch: NULL_HASH, solid: false }],
        });
        let ledger = tmp.path().to_str().unwrap();
        let check = Check::try_parse_from(["dagsync", "--ledger", ledger, &a.to_string()]).unwrap();
        let output = check.parse().unwrap();
        assert!(output.contains("is solid"));
    }

    #[test]
    fn test_check_not_solid() {
        let (a, b) = (Hash::new([0xa; HASH_SIZE]), Hash::new([0xb; HASH_SIZE]));
        let tmp = write_ledger(&LedgerFile {
            transactions: vec![LedgerEntry { hash: a, trunk: b, branch: NULL_HASH, solid: false }],
        });
        let ledger = tmp.path().to_str().unwrap();
        let check = Check::try_parse_from(["dagsync", "--ledger", ledger, &a.to_string()]).unwrap();
        let output = check.parse().unwrap();
        assert!(output.contains("is not solid"));
        assert!(output.contains(&b.to_string()));
    }

    #[test]
    fn test_check_rejects_malformed_hashes() {
        assert!(Check::try_parse_from(["dagsync", "--ledger", "ledger.json", ""]).is_err());
        assert!(Check::try_parse_from(["dagsync", "--ledger", "ledger.json", "abcd"]).is_err());
    }
}
