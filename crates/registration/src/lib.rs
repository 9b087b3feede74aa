//! Registration domain module (multi-profile sign-up validation).
//!
//! Everything here is deterministic and side-effect free: no I/O, no HTTP.
//! The caller presents [`ValidationError`]s and performs the remote
//! submission of the [`ValidatedForm`].

pub mod document;
pub mod form;
pub mod password;
pub mod profile;

pub use document::{Cnpj, Cpf, Crmv, format_document, validate_document};
pub use form::{RegistrationForm, ValidatedForm, ValidationError, validate_submission};
pub use password::{PasswordRequirement, PasswordStrength, validate_password};
pub use profile::{ProfileKind, RoleCode};
