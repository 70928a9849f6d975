//! Progressive responses
//!
//! Lets a handler speak an interim message while it is still working on the
//! final response, by posting a `VoicePlayer.Speak` directive to the
//! platform's directive service.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{SkillError, model::RequestEnvelope};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendDirectiveRequest {
    pub header: DirectiveHeader,
    pub directive: Directive,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveHeader {
    pub request_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Directive {
    #[serde(rename = "VoicePlayer.Speak")]
    VoicePlayerSpeak {
        #[serde(skip_serializing_if = "Option::is_none")]
        speech: Option<String>,
    },
}

/// Returns a `VoicePlayer.Speak` directive for the current request.
pub fn voice_player_speak_directive(
    envelope: &RequestEnvelope,
    speech: Option<&str>,
) -> SendDirectiveRequest {
    SendDirectiveRequest {
        header: DirectiveHeader {
            request_id: envelope.request.request_id().to_string(),
        },
        directive: Directive::VoicePlayerSpeak {
            speech: speech.map(str::to_string),
        },
    }
}

#[async_trait]
pub trait DirectiveServiceClient: Send + Sync {
    async fn enqueue(&self, request: &SendDirectiveRequest) -> Result<(), SkillError>;
}

/// Directive service client talking to the platform over HTTP
#[derive(Clone)]
pub struct HttpDirectiveServiceClient {
    api_endpoint: String,
    api_access_token: String,
    client: Client,
}

impl HttpDirectiveServiceClient {
    pub fn new(api_endpoint: &str, api_access_token: &str) -> Self {
        Self {
            api_endpoint: api_endpoint.trim_end_matches('/').to_string(),
            api_access_token: api_access_token.to_string(),
            client: Client::new(),
        }
    }

    /// Builds a client from the endpoint and token the platform sent along
    /// with the request, if both are present.
    pub fn from_envelope(envelope: &RequestEnvelope) -> Option<Self> {
        let system = envelope.context.as_ref()?.system.as_ref()?;
        let endpoint = system.api_endpoint.as_deref()?;
        let token = system.api_access_token.as_deref()?;
        Some(Self::new(endpoint, token))
    }

    pub fn directives_url(&self) -> String {
        format!("{}/v1/directives", self.api_endpoint)
    }
}

#[async_trait]
impl DirectiveServiceClient for HttpDirectiveServiceClient {
    async fn enqueue(&self, request: &SendDirectiveRequest) -> Result<(), SkillError> {
        let url = self.directives_url();
        debug!(request_id = %request.header.request_id, "Sending progressive response");

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_access_token)
            .json(request)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            warn!(%status, "Directive service rejected directive");
            return Err(SkillError::Directive(format!("{}: {}", status, body)));
        }

        Ok(())
    }
}
