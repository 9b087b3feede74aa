use core::str::FromStr;

use serde::{Deserialize, Serialize};

use vetforum_core::DomainError;

/// Kind of registrant, selected by the sign-up tab.
///
/// Determines which document scheme is checked and which role code the
/// remote service receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileKind {
    #[default]
    OrdinaryPerson,
    VeterinaryPractice,
    Department,
}

/// Numeric user-type code understood by the registration endpoint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleCode(u8);

impl RoleCode {
    pub fn as_u8(self) -> u8 {
        self.0
    }
}

impl core::fmt::Display for RoleCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl ProfileKind {
    pub const ALL: [ProfileKind; 3] = [
        ProfileKind::OrdinaryPerson,
        ProfileKind::VeterinaryPractice,
        ProfileKind::Department,
    ];

    pub fn role_code(self) -> RoleCode {
        match self {
            ProfileKind::OrdinaryPerson => RoleCode(4),
            ProfileKind::VeterinaryPractice => RoleCode(2),
            ProfileKind::Department => RoleCode(3),
        }
    }

    /// Label of the document field shown for this kind.
    pub fn document_label(self) -> &'static str {
        match self {
            ProfileKind::OrdinaryPerson => "CPF",
            ProfileKind::VeterinaryPractice => "CRMV registration number",
            ProfileKind::Department => "CNPJ",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProfileKind::OrdinaryPerson => "ordinary_person",
            ProfileKind::VeterinaryPractice => "veterinary_practice",
            ProfileKind::Department => "department",
        }
    }
}

impl core::fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ordinary_person" | "person" => Ok(ProfileKind::OrdinaryPerson),
            "veterinary_practice" | "vet" => Ok(ProfileKind::VeterinaryPractice),
            "department" => Ok(ProfileKind::Department),
            other => Err(DomainError::validation(format!(
                "unknown profile kind '{other}' (expected person, vet or department)"
            ))),
        }
    }
}
