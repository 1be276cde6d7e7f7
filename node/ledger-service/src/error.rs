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

use crate::Hash;

use thiserror::Error;

/// The errors surfaced by a ledger service.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// The ledger could not be reached or queried.
    #[error("ledger unavailable: {0}")]
    Unavailable(String),
    /// A transaction record expected to be retrievable could not be fetched.
    #[error("missing transaction record {0}")]
    NotFound(Hash),
}

/// The errors raised when constructing a hash from untrusted input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HashError {
    #[error("empty hash")]
    Empty,
    #[error("invalid hash length {0} (expected {} bytes)", crate::HASH_SIZE)]
    InvalidLength(usize),
    #[error("invalid hex encoding: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for HashError {
    fn from(error: hex::FromHexError) -> Self {
        HashError::InvalidHex(error.to_string())
    }
}
