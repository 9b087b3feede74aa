//! reqwest implementation of the gateway ports.

use reqwest::{RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use vetforum_core::{CategoryId, PostId};
use vetforum_forum::{AnswerSubmission, Category, CategoryDraft, PostDetail, PostSummary};
use vetforum_registration::ValidatedForm;

use crate::config::ClientConfig;
use crate::gateway::{
    CategoryGateway, ForumGateway, RegistrationGateway, RemoteCallFailure, RemoteReply,
};

/// HTTP client for the forum/registration API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    api_url: Url,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig) -> Result<Self, RemoteCallFailure> {
        let api_url = Url::parse(&config.api_url)
            .map_err(|e| RemoteCallFailure::InvalidRequest(format!("API URL {}: {e}", config.api_url)))?;
        if api_url.cannot_be_a_base() {
            return Err(RemoteCallFailure::InvalidRequest(format!(
                "API URL {} cannot take a path",
                config.api_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| RemoteCallFailure::Network(e.to_string()))?;
        Ok(Self { client, api_url })
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Append `segments` to the API URL, each percent-encoded as a single
    /// path segment. Empty and dot segments are refused.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteCallFailure> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(RemoteCallFailure::InvalidRequest(format!(
                "unusable path segment {bad:?}"
            )));
        }

        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RemoteCallFailure::InvalidRequest(format!("API URL {} cannot take a path", self.api_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, RemoteCallFailure> {
        let value = self.send_value(req).await?;
        serde_json::from_value(value).map_err(|e| RemoteCallFailure::Parse(e.to_string()))
    }

    async fn send_reply(&self, req: RequestBuilder) -> Result<RemoteReply, RemoteCallFailure> {
        Ok(RemoteReply::from_body(self.send_value(req).await?))
    }

    async fn send_value(&self, req: RequestBuilder) -> Result<Value, RemoteCallFailure> {
        let resp = req
            .send()
            .await
            .map_err(|e| RemoteCallFailure::Network(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| RemoteCallFailure::Network(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&text)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %message, "remote call rejected");
            return Err(RemoteCallFailure::Api {
                status: status.as_u16(),
                message,
            });
        }

        let value = parse_body(&text)?;
        if let Some(message) = reported_error(&value) {
            tracing::warn!(status = status.as_u16(), %message, "remote call reported an error");
            return Err(RemoteCallFailure::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(value)
    }
}

/// Empty bodies are `null`; anything else must be JSON.
fn parse_body(text: &str) -> Result<Value, RemoteCallFailure> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| RemoteCallFailure::Parse(e.to_string()))
}

/// Message of a failed response: the JSON `message` field, else the raw text.
fn error_message(text: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if let Some(msg) = value.get("message").and_then(Value::as_str) {
            return Some(msg.to_string());
        }
    }
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// A 2xx body shaped `{ "error": true, "message": ... }` is still a failure.
fn reported_error(value: &Value) -> Option<String> {
    if value.get("error").and_then(Value::as_bool) != Some(true) {
        return None;
    }
    Some(
        value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_string(),
    )
}

#[async_trait::async_trait]
impl RegistrationGateway for HttpGateway {
    async fn register(&self, form: &ValidatedForm) -> Result<RemoteReply, RemoteCallFailure> {
        tracing::info!(kind = %form.profile_kind, "submitting registration");
        let url = self.endpoint(&["register"])?;
        self.send_reply(self.client.post(url).json(form)).await
    }
}

#[async_trait::async_trait]
impl ForumGateway for HttpGateway {
    async fn list_posts(&self) -> Result<Vec<PostSummary>, RemoteCallFailure> {
        let url = self.endpoint(&["getAllPosts"])?;
        self.send(self.client.get(url)).await
    }

    async fn get_post(&self, id: &PostId) -> Result<PostDetail, RemoteCallFailure> {
        let id = id.to_string();
        let url = self.endpoint(&["getPostById", id.as_str()])?;
        self.send(self.client.get(url)).await
    }

    async fn add_answer(&self, answer: &AnswerSubmission) -> Result<RemoteReply, RemoteCallFailure> {
        tracing::info!(post_id = %answer.post_id, "submitting answer");
        let post_id = answer.post_id.to_string();
        let url = self.endpoint(&["addResposta", post_id.as_str()])?;
        self.send_reply(self.client.post(url).json(answer)).await
    }
}

#[async_trait::async_trait]
impl CategoryGateway for HttpGateway {
    async fn list_categories(&self) -> Result<Vec<Category>, RemoteCallFailure> {
        let url = self.endpoint(&["getAllCategoriaForum"])?;
        self.send(self.client.get(url)).await
    }

    async fn create_category(&self, draft: &CategoryDraft) -> Result<RemoteReply, RemoteCallFailure> {
        let url = self.endpoint(&["registerCategoryForum"])?;
        self.send_reply(self.client.post(url).json(draft)).await
    }

    async fn update_category(
        &self,
        id: &CategoryId,
        draft: &CategoryDraft,
    ) -> Result<RemoteReply, RemoteCallFailure> {
        let id = id.to_string();
        let url = self.endpoint(&["updateCategoriaForum", id.as_str()])?;
        self.send_reply(self.client.put(url).json(draft)).await
    }

    // The server exposes deletion as a PUT.
    async fn delete_category(&self, id: &CategoryId) -> Result<RemoteReply, RemoteCallFailure> {
        let id = id.to_string();
        let url = self.endpoint(&["deleteCategoriaForum", id.as_str()])?;
        self.send_reply(self.client.put(url)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_message_prefers_json_message_field() {
        assert_eq!(
            error_message(r#"{"message":"E-mail already registered"}"#).as_deref(),
            Some("E-mail already registered")
        );
        assert_eq!(error_message("  upstream down ").as_deref(), Some("upstream down"));
        assert_eq!(error_message(""), None);
    }

    #[test]
    fn flagged_success_bodies_are_errors() {
        assert_eq!(
            reported_error(&json!({ "error": true, "message": "Post not found" })).as_deref(),
            Some("Post not found")
        );
        assert_eq!(
            reported_error(&json!({ "error": true })).as_deref(),
            Some("request failed")
        );
        assert_eq!(reported_error(&json!({ "error": false, "message": "ok" })), None);
        assert_eq!(reported_error(&json!([1, 2])), None);
    }

    #[test]
    fn empty_body_parses_as_null() {
        assert_eq!(parse_body("  ").unwrap(), Value::Null);
        assert!(matches!(parse_body("<html>"), Err(RemoteCallFailure::Parse(_))));
    }

    fn gateway(api_url: &str) -> HttpGateway {
        HttpGateway::new(&ClientConfig {
            api_url: api_url.to_string(),
            ..ClientConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn urls_join_base_and_path() {
        let gw = HttpGateway::new(&ClientConfig::default()).unwrap();
        assert_eq!(
            gw.endpoint(&["getAllPosts"]).unwrap().as_str(),
            "http://localhost:4000/api/getAllPosts"
        );
        assert_eq!(
            gateway("http://localhost:4000").endpoint(&["getAllPosts"]).unwrap().as_str(),
            "http://localhost:4000/getAllPosts"
        );
    }

    #[test]
    fn ids_stay_inside_their_path_segment() {
        let gw = HttpGateway::new(&ClientConfig::default()).unwrap();
        let id: PostId = "1/../../admin?x=1#top".parse().unwrap();
        let id = id.to_string();

        let url = gw.endpoint(&["getPostById", id.as_str()]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:4000/api/getPostById/1%2F..%2F..%2Fadmin%3Fx=1%23top"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);
        assert_eq!(url.path_segments().unwrap().count(), 3);
    }

    #[test]
    fn dot_and_empty_segments_are_refused() {
        let gw = HttpGateway::new(&ClientConfig::default()).unwrap();
        for id in ["", ".", ".."] {
            assert!(
                matches!(gw.endpoint(&["deleteCategoriaForum", id]), Err(RemoteCallFailure::InvalidRequest(_))),
                "{id:?}"
            );
        }
    }

    #[test]
    fn unusable_api_urls_are_rejected_up_front() {
        for api_url in ["not a url", "mailto:forum@example.org"] {
            let err = HttpGateway::new(&ClientConfig {
                api_url: api_url.to_string(),
                ..ClientConfig::default()
            })
            .unwrap_err();
            assert!(matches!(err, RemoteCallFailure::InvalidRequest(_)), "{api_url}");
        }
    }
}
