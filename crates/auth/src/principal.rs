use core::str::FromStr;
use serde::{Deserialize, Serialize};

use vetforum_core::{DomainError, WireId};

/// Identity of an authenticated principal, as issued by the login service.
///
/// Kept in its wire form so it can be echoed back verbatim as the author of
/// a forum answer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(WireId);

impl PrincipalId {
    pub fn from_wire(id: WireId) -> Self {
        Self(id)
    }

    pub fn as_wire(&self) -> &WireId {
        &self.0
    }
}

impl core::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<WireId> for PrincipalId {
    fn from(value: WireId) -> Self {
        Self(value)
    }
}

impl FromStr for PrincipalId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(WireId::parse(s, "PrincipalId")?))
    }
}
