use std::fmt;
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CoreError;

/// Report times are seconds since the Unix epoch.
pub type UnixSeconds = i64;

/// Message returned for any identifier that is not 24 hex characters.
pub const INVALID_ID_MESSAGE: &str = "invalid id format";

/// Opaque 12-byte report identifier.
///
/// The canonical form is the raw bytes; the wire form is the 24-character
/// lowercase hex encoding. The all-zero value means "unset".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ReportId([u8; ReportId::LEN]);

impl ReportId {
    /// Length of the raw identifier in bytes.
    pub const LEN: usize = 12;

    pub const fn from_bytes(bytes: [u8; Self::LEN]) -> Self {
        Self(bytes)
    }

    pub const fn bytes(&self) -> [u8; Self::LEN] {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Decode the 24-character hex wire form.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        if s.len() != Self::LEN * 2 {
            return Err(CoreError::Validation(INVALID_ID_MESSAGE.into()));
        }
        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| CoreError::Validation(INVALID_ID_MESSAGE.into()))?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ReportId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ReportId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ReportId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(|_| de::Error::custom(INVALID_ID_MESSAGE))
    }
}

/// Deserialize an identifier a client may leave unset.
///
/// Missing, `null`, `""` and the all-zero id all mean "let the server assign
/// one"; anything else must be a valid hex id.
pub fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<ReportId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => {
            let id = ReportId::parse(s).map_err(|_| de::Error::custom(INVALID_ID_MESSAGE))?;
            Ok((!id.is_zero()).then_some(id))
        }
    }
}
