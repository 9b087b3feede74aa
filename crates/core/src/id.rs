//! Identifiers issued by the remote service.
//!
//! The server hands out identifiers either as JSON strings or as JSON
//! integers depending on the table. They are opaque on the client: we never
//! do arithmetic on them, but we must send them back in the exact wire form
//! we received.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Raw identifier in its wire form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl WireId {
    /// Parse a path segment / CLI argument.
    ///
    /// All-digit input becomes `Number` so it serializes the way the server
    /// issued it; anything else stays text. Blank input is rejected.
    pub fn parse(s: &str, kind: &str) -> Result<Self, DomainError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DomainError::invalid_id(format!("{kind}: empty")));
        }
        if s.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = s.parse::<i64>() {
                return Ok(Self::Number(n));
            }
        }
        Ok(Self::Text(s.to_string()))
    }
}

impl core::fmt::Display for WireId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            WireId::Number(n) => core::fmt::Display::fmt(n, f),
            WireId::Text(s) => f.write_str(s),
        }
    }
}

/// Identifier of a forum post.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(WireId);

/// Identifier of a forum category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(WireId);

macro_rules! impl_wire_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub fn from_wire(id: WireId) -> Self {
                Self(id)
            }

            pub fn as_wire(&self) -> &WireId {
                &self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<i64> for $t {
            fn from(value: i64) -> Self {
                Self(WireId::Number(value))
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(WireId::parse(s, $name)?))
            }
        }
    };
}

impl_wire_newtype!(PostId, "PostId");
impl_wire_newtype!(CategoryId, "CategoryId");
