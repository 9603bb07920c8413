//! Opaque record identifiers
//!
//! Every record is keyed by a 12-byte [`ObjectId`]. Externally the id travels
//! as 24 lower-case hex characters; that is the only accepted form, so
//! `ObjectId::parse(s)?.to_string() == s` for every `s` that parses.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

use chrono::{DateTime, TimeZone, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Length of the canonical hex encoding.
pub const HEX_LEN: usize = 24;

/// Returned when a string is not a canonical identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid identifier [{input}]: must be a string of 24 lower-case hex characters")]
pub struct InvalidIdentifier {
    /// The rejected input, kept for error reporting
    pub input: String,
}

/// 12-byte identifier: 4 bytes of creation time, 5 process-unique bytes and
/// a 3-byte counter.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; 12]);

static PROCESS_UNIQUE: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

impl ObjectId {
    /// Generate a new id stamped with the current time.
    pub fn new() -> Self {
        let seconds = Utc::now().timestamp() as u32;
        let process = PROCESS_UNIQUE.get_or_init(rand::random::<[u8; 5]>);
        let counter = COUNTER
            .get_or_init(|| AtomicU32::new(rand::random::<u32>()))
            .fetch_add(1, Ordering::SeqCst)
            & 0x00ff_ffff;

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(process);
        bytes[9..12].copy_from_slice(&counter.to_be_bytes()[1..4]);
        Self(bytes)
    }

    /// Build an id from its raw bytes.
    pub const fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Parse the canonical 24-character lower-case hex form.
    pub fn parse(input: &str) -> Result<Self, InvalidIdentifier> {
        let canonical = input.len() == HEX_LEN
            && input
                .bytes()
                .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));

        if !canonical {
            return Err(InvalidIdentifier {
                input: input.to_string(),
            });
        }

        let mut bytes = [0u8; 12];
        hex::decode_to_slice(input, &mut bytes).map_err(|_| InvalidIdentifier {
            input: input.to_string(),
        })?;
        Ok(Self(bytes))
    }

    /// Canonical hex form, the inverse of [`ObjectId::parse`].
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Creation time embedded in the id, truncated to the second.
    pub fn timestamp(&self) -> DateTime<Utc> {
        let seconds = u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]]);
        Utc.timestamp_opt(i64::from(seconds), 0)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = InvalidIdentifier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.to_hex()
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ObjectId::parse(&s).map_err(de::Error::custom)
    }
}
