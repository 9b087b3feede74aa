//! Registration form and the submission gate.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::password::{PasswordRequirement, PasswordStrength};
use crate::{ProfileKind, RoleCode, validate_document};

/// Sign-up form state as edited by the user.
///
/// # Invariants
/// - Switching to a different profile kind clears `document`, so a document
///   typed under one tab is never submitted under another.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub display_name: String,
    pub phone: String,
    document: String,
    profile_kind: ProfileKind,
}

impl RegistrationForm {
    pub fn new(profile_kind: ProfileKind) -> Self {
        Self {
            profile_kind,
            ..Default::default()
        }
    }

    pub fn profile_kind(&self) -> ProfileKind {
        self.profile_kind
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn set_document(&mut self, document: impl Into<String>) {
        self.document = document.into();
    }

    /// Select a profile tab. Selecting the current tab again is a no-op.
    pub fn set_profile_kind(&mut self, kind: ProfileKind) {
        if self.profile_kind != kind {
            self.profile_kind = kind;
            self.document.clear();
        }
    }

    /// Run the submission gate against the form's own confirmation field.
    pub fn validate(&self) -> Result<ValidatedForm, ValidationError> {
        validate_submission(self, &self.password_confirmation)
    }
}

impl core::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("password_confirmation", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("phone", &self.phone)
            .field("document", &self.document)
            .field("profile_kind", &self.profile_kind)
            .finish()
    }
}

/// A form that passed the gate, carrying the role code for the remote
/// service. Serializes to the registration endpoint's body.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedForm {
    pub email: String,
    #[serde(rename = "senha")]
    pub password: String,
    #[serde(rename = "nome")]
    pub display_name: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "documento")]
    pub document: String,
    #[serde(skip)]
    pub profile_kind: ProfileKind,
    #[serde(rename = "tipousuarioid")]
    pub role_code: RoleCode,
}

impl core::fmt::Debug for ValidatedForm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ValidatedForm")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("phone", &self.phone)
            .field("document", &self.document)
            .field("profile_kind", &self.profile_kind)
            .field("role_code", &self.role_code)
            .finish()
    }
}

/// User-correctable rejection of a registration submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("password is too weak: missing {}", join_requirements(.unmet))]
    WeakPassword { unmet: Vec<PasswordRequirement> },

    #[error("invalid {}", document_label(.kind))]
    InvalidDocument { kind: ProfileKind },
}

fn document_label(kind: &ProfileKind) -> &'static str {
    kind.document_label()
}

fn join_requirements(unmet: &[PasswordRequirement]) -> String {
    unmet
        .iter()
        .map(|r| r.description())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Gate a submission. Checks run in a fixed order and stop at the first
/// failure: confirmation, then password strength, then document.
pub fn validate_submission(
    form: &RegistrationForm,
    confirmation: &str,
) -> Result<ValidatedForm, ValidationError> {
    let kind = form.profile_kind();

    if form.password != confirmation {
        tracing::debug!(%kind, "registration rejected: password confirmation mismatch");
        return Err(ValidationError::PasswordMismatch);
    }

    let strength = PasswordStrength::evaluate(&form.password);
    if !strength.is_satisfied() {
        let unmet = strength.unmet();
        tracing::debug!(%kind, ?unmet, "registration rejected: weak password");
        return Err(ValidationError::WeakPassword { unmet });
    }

    if !validate_document(kind, form.document()) {
        tracing::debug!(%kind, "registration rejected: invalid document");
        return Err(ValidationError::InvalidDocument { kind });
    }

    let role_code = kind.role_code();
    tracing::debug!(%kind, %role_code, "registration form validated");

    Ok(ValidatedForm {
        email: form.email.clone(),
        password: form.password.clone(),
        display_name: form.display_name.clone(),
        phone: form.phone.clone(),
        document: form.document().to_string(),
        profile_kind: kind,
        role_code,
    })
}
