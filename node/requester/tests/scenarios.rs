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

mod common;
use common::*;

use dagsync_node_ledger_service::{LedgerService, Presence, NULL_HASH};
use dagsync_node_requester::{MissingRequests, RequestKind, Solidity, TransactionRequester};

#[test]
fn test_scenario_genesis_child() {
    let ledger = sample_ledger();
    let a = hash(0xa);
    ledger.insert_transaction(a, NULL_HASH, NULL_HASH);
    let requester = TransactionRequester::new(RequestKind::Tip, ledger.clone());

    assert!(requester.check_solidity(a).unwrap());
    assert!(ledger.is_solid(&a));
    assert!(ledger.is_solid(&NULL_HASH));
}

#[test]
fn test_scenario_placeholder_trunk() {
    let ledger = sample_ledger();
    let (a, b) = (hash(0xa), hash(0xb));
    ledger.insert_transaction(a, b, NULL_HASH);
    assert_eq!(ledger.presence(&b), Presence::Placeholder);
    let requester = TransactionRequester::new(RequestKind::Tip, ledger.clone());

    assert!(!requester.check_solidity(a).unwrap());
    assert_eq!(requester.requested_hashes(), vec![b]);
    assert!(!ledger.is_solid(&a));
}

#[test]
fn test_scenario_repeated_request() {
    let ledger = sample_ledger();
    let b = hash(0xb);
    let requester = TransactionRequester::new(RequestKind::Tip, ledger);

    requester.request(b).unwrap();
    requester.request(b).unwrap();
    assert_eq!(requester.num_requests(), 1);
}

#[test]
fn test_repeated_checks_drain_a_missing_subtree() {
    let ledger = sample_ledger();
    // The root references four missing transactions across two levels.
    let root = hash(1);
    ledger.insert_transaction(root, hash(2), hash(3));
    ledger.insert_transaction(hash(2), hash(4), hash(5));
    let requester = TransactionRequester::new(RequestKind::Milestone, ledger.clone());

    let mut rounds = 0;
    while !requester.check_solidity(root).unwrap() {
        rounds += 1;
        // Deliver whatever the dispatcher hands out.
        let missing = requester.transaction_to_request().unwrap().unwrap();
        ledger.insert_transaction(missing, NULL_HASH, NULL_HASH);
        assert!(requester.clear(&missing));
        assert!(rounds <= 3, "each call surfaces exactly one gap");
    }
    assert_eq!(rounds, 3);
    assert_eq!(requester.num_requests(), 0);
    assert_eq!(ledger.solid_flags(&[hash(1), hash(2), hash(3), hash(4), hash(5)]), vec![true; 5]);
}

#[test]
fn test_long_chain_solidifies_in_one_call() {
    let ledger = sample_ledger();
    let tip = chain(&ledger, 1_000);
    let requester = TransactionRequester::new(RequestKind::Tip, ledger.clone());

    let Solidity::Solid(analyzed) = requester.analyze_solidity(tip).unwrap() else {
        panic!("expected a solid chain");
    };
    // The chain plus the null hash.
    assert_eq!(analyzed.len(), 1_001);

    assert!(requester.check_solidity(tip).unwrap());
    assert!((1..=1_000).all(|index| ledger.is_solid(&indexed_hash(index))));
}

#[test]
fn test_rescan_then_dispatch() {
    let ledger = sample_ledger();
    ledger.insert_transaction(hash(1), hash(2), hash(3));
    ledger.insert_transaction(hash(4), hash(5), hash(1));
    let requests = MissingRequests::new(ledger.clone());

    requests.tips().rescan().unwrap();
    assert_eq!(requests.num_total_requests(), 3);
    assert_eq!(requests.tips().requested_hashes(), ledger.list_missing().unwrap());

    // Receiving a transaction clears it from every request list.
    ledger.insert_transaction(hash(2), NULL_HASH, NULL_HASH);
    assert!(requests.clear(&hash(2)));
    assert_eq!(requests.tips().transaction_to_request().unwrap(), Some(hash(3)));
    assert_eq!(requests.tips().transaction_to_request().unwrap(), Some(hash(5)));
    assert_eq!(requests.tips().transaction_to_request().unwrap(), Some(hash(3)));
}
