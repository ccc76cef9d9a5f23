//! 24-hex-digit document identifiers.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

const HEX_LEN: usize = 24;

static PROCESS_BYTES: Lazy<[u8; 5]> = Lazy::new(rand::random);
static COUNTER: Lazy<AtomicU32> = Lazy::new(|| AtomicU32::new(rand::random::<u32>() & 0x00ff_ffff));

/// Opaque identifier for shops and comments: seconds timestamp (4 bytes),
/// per-process random (5 bytes), wrapping counter (3 bytes), lowercase hex.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new() -> Self {
        let secs = u32::try_from(chrono::Utc::now().timestamp()).unwrap_or(u32::MAX);
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & 0x00ff_ffff;
        let mut out = format!("{secs:08x}");
        for b in PROCESS_BYTES.iter() {
            out.push_str(&format!("{b:02x}"));
        }
        out.push_str(&format!("{count:06x}"));
        Self(out)
    }

    /// Accepts exactly 24 ASCII hex digits, either case.
    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        if raw.len() != HEX_LEN || !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ModelError::Validation(format!("malformed id `{raw}`")));
        }
        Ok(Self(raw.to_ascii_lowercase()))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl Default for ObjectId {
    fn default() -> Self { Self::new() }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl FromStr for ObjectId {
    type Err = ModelError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl TryFrom<String> for ObjectId {
    type Error = ModelError;
    fn try_from(value: String) -> Result<Self, Self::Error> { Self::parse(&value) }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self { id.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_are_well_formed_and_unique() {
        let ids: HashSet<ObjectId> = (0..1000).map(|_| ObjectId::new()).collect();
        assert_eq!(ids.len(), 1000);
        for id in &ids {
            assert!(ObjectId::parse(id.as_str()).is_ok(), "{id}");
        }
    }

    #[test]
    fn rejects_wrong_shapes() {
        assert!(ObjectId::parse("abc").is_err());
        assert!(ObjectId::parse(&"a".repeat(23)).is_err());
        assert!(ObjectId::parse(&"a".repeat(25)).is_err());
        assert!(ObjectId::parse("zzzzzzzzzzzzzzzzzzzzzzzz").is_err());
        assert!(ObjectId::parse("").is_err());
    }

    #[test]
    fn normalizes_case() {
        let id = ObjectId::parse("5F8D0D55B54764421B7156C3").unwrap();
        assert_eq!(id.as_str(), "5f8d0d55b54764421b7156c3");
    }

    #[test]
    fn serde_as_plain_string() {
        let id = ObjectId::parse("5f8d0d55b54764421b7156c3").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"5f8d0d55b54764421b7156c3\"");
        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<ObjectId>("\"nope\"").is_err());
    }
}
