//! Request dispatch
//!
//! Runs the request interceptors, hands the request to the first handler
//! that can handle it and routes any error to the first matching error
//! handler. Handlers and error handlers are tried in registration order.

use tracing::{debug, info, warn};

use crate::{
    SkillError,
    handlers::{ErrorHandler, HandlerInput, RequestHandler, RequestInterceptor},
    model::RequestEnvelope,
    response::{Response, ResponseEnvelope},
};

pub const RESPONSE_VERSION: &str = "1.0";

pub struct Skill {
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    request_handlers: Vec<Box<dyn RequestHandler>>,
    error_handlers: Vec<Box<dyn ErrorHandler>>,
}

impl Skill {
    pub fn builder() -> SkillBuilder {
        SkillBuilder::default()
    }

    /// Handle one request envelope. Fails only when no error handler accepts
    /// the error raised while handling it.
    pub async fn invoke(&self, envelope: RequestEnvelope) -> Result<ResponseEnvelope, SkillError> {
        let mut input = HandlerInput::new(envelope);
        info!(
            request_type = input.request_envelope.request.request_type(),
            request_id = input.request_envelope.request.request_id(),
            "Handling request"
        );

        let response = match self.dispatch(&mut input).await {
            Ok(response) => response,
            Err(error) => self.handle_error(&mut input, error).await?,
        };

        Ok(ResponseEnvelope {
            version: RESPONSE_VERSION.to_string(),
            session_attributes: input.take_session_attributes().map(|a| a.into_map()),
            response,
        })
    }

    async fn dispatch(&self, input: &mut HandlerInput) -> Result<Response, SkillError> {
        for interceptor in &self.request_interceptors {
            debug!(interceptor = interceptor.name(), "Running request interceptor");
            interceptor.process(input).await?;
        }

        let handler = self
            .request_handlers
            .iter()
            .find(|h| h.can_handle(input))
            .ok_or_else(|| {
                SkillError::NoHandler(input.request_envelope.request.request_type().to_string())
            })?;

        debug!(handler = handler.name(), "Dispatching request");
        handler.handle(input).await
    }

    async fn handle_error(
        &self,
        input: &mut HandlerInput,
        error: SkillError,
    ) -> Result<Response, SkillError> {
        match self
            .error_handlers
            .iter()
            .find(|h| h.can_handle(input, &error))
        {
            Some(handler) => {
                debug!(handler = handler.name(), "Dispatching error");
                handler.handle(input, &error).await
            }
            None => {
                warn!("No error handler for: {}", error);
                Err(error)
            }
        }
    }
}

#[derive(Default)]
pub struct SkillBuilder {
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    request_handlers: Vec<Box<dyn RequestHandler>>,
    error_handlers: Vec<Box<dyn ErrorHandler>>,
}

impl SkillBuilder {
    pub fn add_request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptors.push(Box::new(interceptor));
        self
    }

    pub fn add_request_handler(mut self, handler: impl RequestHandler + 'static) -> Self {
        self.request_handlers.push(Box::new(handler));
        self
    }

    pub fn add_error_handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.error_handlers.push(Box::new(handler));
        self
    }

    pub fn build(self) -> Skill {
        Skill {
            request_interceptors: self.request_interceptors,
            request_handlers: self.request_handlers,
            error_handlers: self.error_handlers,
        }
    }
}
