use serde::Serialize;
use thiserror::Error;

use vetforum_auth::{CredentialDecodeError, PrincipalId, SessionIdentityResolver};
use vetforum_core::PostId;

/// An answer ready to be posted. Built per submit action, never stored.
///
/// Serializes to the add-answer body; the post id travels in the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerSubmission {
    #[serde(skip)]
    pub post_id: PostId,
    #[serde(rename = "usuarioidresposta")]
    pub author_id: PrincipalId,
    #[serde(rename = "resposta")]
    pub body: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnswerError {
    #[error("you must be logged in to answer")]
    NoSession,

    #[error(transparent)]
    Credential(#[from] CredentialDecodeError),

    #[error("answer cannot be empty")]
    EmptyBody,
}

impl AnswerSubmission {
    /// Attach the current session's principal as author.
    ///
    /// Anonymous answers are refused up front, so no request is ever sent
    /// without an author.
    pub fn compose(
        post_id: PostId,
        resolver: &SessionIdentityResolver,
        body: impl Into<String>,
    ) -> Result<Self, AnswerError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(AnswerError::EmptyBody);
        }

        let author_id = resolver
            .current_principal_id()?
            .ok_or(AnswerError::NoSession)?;

        tracing::debug!(%post_id, %author_id, "answer composed");

        Ok(Self {
            post_id,
            author_id,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use serde_json::json;
    use std::sync::Arc;
    use vetforum_auth::{InMemoryCredentialStore, SESSION_CREDENTIAL_KEY};

    fn resolver(token: Option<String>) -> SessionIdentityResolver {
        let store = InMemoryCredentialStore::new();
        if let Some(token) = token {
            store.insert(SESSION_CREDENTIAL_KEY, token);
        }
        SessionIdentityResolver::new(Arc::new(store))
    }

    fn mint(claims: serde_json::Value) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .expect("failed to encode jwt")
    }

    #[test]
    fn compose_attaches_session_principal() {
        let r = resolver(Some(mint(json!({ "_id": "u-42" }))));
        let answer = AnswerSubmission::compose(PostId::from(7), &r, "Keep the dog hydrated.").unwrap();

        assert_eq!(answer.author_id.to_string(), "u-42");
        assert_eq!(
            serde_json::to_value(&answer).unwrap(),
            json!({ "usuarioidresposta": "u-42", "resposta": "Keep the dog hydrated." })
        );
    }

    #[test]
    fn anonymous_answers_are_refused() {
        let err = AnswerSubmission::compose(PostId::from(7), &resolver(None), "hi").unwrap_err();
        assert_eq!(err, AnswerError::NoSession);
    }

    #[test]
    fn corrupted_session_is_not_treated_as_anonymous() {
        let err = AnswerSubmission::compose(PostId::from(7), &resolver(Some("broken".into())), "hi")
            .unwrap_err();
        assert!(matches!(err, AnswerError::Credential(_)));
    }

    #[test]
    fn blank_body_is_rejected() {
        let r = resolver(Some(mint(json!({ "_id": 1 }))));
        assert_eq!(
            AnswerSubmission::compose(PostId::from(7), &r, " \n ").unwrap_err(),
            AnswerError::EmptyBody
        );
    }
}
