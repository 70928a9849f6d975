//! Session lifecycle and diagnostics handlers

use async_trait::async_trait;
use tracing::{debug, error};

use super::{HandlerInput, RequestHandler};
use crate::{
    SkillError,
    classifier::is_type,
    model::RequestType,
    response::{Response, ResponseBuilder},
};

pub struct SessionEnded;

#[async_trait]
impl RequestHandler for SessionEnded {
    fn name(&self) -> &'static str {
        "SessionEnded"
    }

    fn can_handle(&self, input: &HandlerInput) -> bool {
        is_type(&input.request_envelope.request, &[RequestType::SessionEnded])
    }

    async fn handle(&self, _input: &mut HandlerInput) -> Result<Response, SkillError> {
        // Nothing to clean up yet.
        Ok(ResponseBuilder::new().build())
    }
}

/// Logs the failed directive the platform reports back
pub struct SystemExceptionEncountered;

#[async_trait]
impl RequestHandler for SystemExceptionEncountered {
    fn name(&self) -> &'static str {
        "SystemExceptionEncountered"
    }

    fn can_handle(&self, input: &HandlerInput) -> bool {
        is_type(
            &input.request_envelope.request,
            &[RequestType::SystemExceptionEncountered],
        )
    }

    async fn handle(&self, input: &mut HandlerInput) -> Result<Response, SkillError> {
        let envelope = serde_json::to_string_pretty(&input.request_envelope)?;
        error!("System exception encountered:\n{}", envelope);

        Ok(ResponseBuilder::new().build())
    }
}

/// Logs every request at debug level. Never handles anything, so it is
/// registered first.
pub struct DebugLog;

#[async_trait]
impl RequestHandler for DebugLog {
    fn name(&self) -> &'static str {
        "DebugLog"
    }

    fn can_handle(&self, input: &HandlerInput) -> bool {
        if tracing::enabled!(tracing::Level::DEBUG) {
            match serde_json::to_string_pretty(&input.request_envelope) {
                Ok(json) => debug!(slots = ?input.request_attributes().slots, "Handler input:\n{}", json),
                Err(e) => debug!("Handler input could not be serialized: {}", e),
            }
        }
        false
    }

    async fn handle(&self, _input: &mut HandlerInput) -> Result<Response, SkillError> {
        Ok(ResponseBuilder::new().build())
    }
}
