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

use crate::HashError;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// The number of bytes in a transaction hash.
pub const HASH_SIZE: usize = 32;

/// The sentinel ancestry root. It is always present, and never requested.
pub const NULL_HASH: Hash = Hash([0u8; HASH_SIZE]);

/// A fixed-size transaction identifier.
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    /// Initializes a new hash from the given bytes.
    pub const fn new(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }

    /// Initializes a new hash from the given slice, rejecting empty or wrongly-sized input.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, HashError> {
        match bytes.len() {
            0 => Err(HashError::Empty),
            HASH_SIZE => {
                let mut hash = [0u8; HASH_SIZE];
                hash.copy_from_slice(bytes);
                Ok(Self(hash))
            }
            length => Err(HashError::InvalidLength(length)),
        }
    }

    /// Returns `true` if this is the null hash.
    pub fn is_null(&self) -> bool {
        *self == NULL_HASH
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Hash {
    type Err = HashError;

    /// Parses a hash from its hex encoding.
    fn from_str(hash: &str) -> Result<Self, Self::Err> {
        let hash = hash.trim();
        if hash.is_empty() {
            return Err(HashError::Empty);
        }
        Self::from_slice(&hex::decode(hash)?)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Hash({self})")
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hash = String::deserialize(deserializer)?;
        Hash::from_str(&hash).map_err(de::Error::custom)
    }
}
