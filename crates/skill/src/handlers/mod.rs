//! Request handlers, error handlers and the input they all share
//!
//! A handler is a predicate/action pair: the skill asks each registered
//! handler in order whether it can handle the request and runs the first one
//! that says yes.

use async_trait::async_trait;

use crate::{
    SkillError,
    attributes::{RequestAttributes, SessionAttributes},
    directive::HttpDirectiveServiceClient,
    model::RequestEnvelope,
    response::Response,
};

pub mod builtin;
pub mod errors;
pub mod hello;
pub mod lifecycle;

pub use builtin::{Fallback, Help, Launch};
pub use errors::{Unexpected, Unknown};
pub use hello::HelloWorld;
pub use lifecycle::{DebugLog, SessionEnded, SystemExceptionEncountered};

/// Everything a handler sees for one request
#[derive(Debug)]
pub struct HandlerInput {
    pub request_envelope: RequestEnvelope,
    request_attributes: RequestAttributes,
    session_attributes: SessionAttributes,
}

impl HandlerInput {
    pub fn new(request_envelope: RequestEnvelope) -> Self {
        let session_attributes = request_envelope
            .session
            .as_ref()
            .and_then(|s| s.attributes.clone())
            .map(SessionAttributes::from)
            .unwrap_or_default();

        Self {
            request_envelope,
            request_attributes: RequestAttributes::default(),
            session_attributes,
        }
    }

    pub fn request_attributes(&self) -> &RequestAttributes {
        &self.request_attributes
    }

    pub fn request_attributes_mut(&mut self) -> &mut RequestAttributes {
        &mut self.request_attributes
    }

    pub fn session_attributes(&self) -> &SessionAttributes {
        &self.session_attributes
    }

    pub fn set_session_attributes(&mut self, attributes: SessionAttributes) {
        self.session_attributes = attributes;
    }

    /// Client for progressive responses, when the platform provided an API
    /// endpoint and token for this request.
    pub fn directive_service_client(&self) -> Option<HttpDirectiveServiceClient> {
        HttpDirectiveServiceClient::from_envelope(&self.request_envelope)
    }

    /// Session attributes to send back; only requests that belong to a
    /// session carry them.
    pub(crate) fn take_session_attributes(&mut self) -> Option<SessionAttributes> {
        self.request_envelope
            .session
            .as_ref()
            .map(|_| std::mem::take(&mut self.session_attributes))
    }
}

#[async_trait]
pub trait RequestHandler: Send + Sync {
    fn name(&self) -> &'static str;

    fn can_handle(&self, input: &HandlerInput) -> bool;

    async fn handle(&self, input: &mut HandlerInput) -> Result<Response, SkillError>;
}

#[async_trait]
pub trait ErrorHandler: Send + Sync {
    fn name(&self) -> &'static str;

    fn can_handle(&self, input: &HandlerInput, error: &SkillError) -> bool;

    async fn handle(
        &self,
        input: &mut HandlerInput,
        error: &SkillError,
    ) -> Result<Response, SkillError>;
}

/// Runs before the request handler, typically to fill request attributes
#[async_trait]
pub trait RequestInterceptor: Send + Sync {
    fn name(&self) -> &'static str;

    async fn process(&self, input: &mut HandlerInput) -> Result<(), SkillError>;
}
