//! Error handlers. `Unexpected` must be registered before `Unknown`, which
//! catches everything.

use async_trait::async_trait;
use tracing::error;

use super::{ErrorHandler, HandlerInput};
use crate::{
    SkillError,
    error::ErrorKind,
    i18n::Strings,
    response::{Response, ResponseBuilder},
};

/// Handles errors raised with [`ErrorKind::Unexpected`]; apologises and ends
/// the session.
pub struct Unexpected;

#[async_trait]
impl ErrorHandler for Unexpected {
    fn name(&self) -> &'static str {
        "Unexpected"
    }

    fn can_handle(&self, _input: &HandlerInput, error: &SkillError) -> bool {
        error.kind() == ErrorKind::Unexpected
    }

    async fn handle(
        &self,
        input: &mut HandlerInput,
        error: &SkillError,
    ) -> Result<Response, SkillError> {
        error!(kind = error.kind().as_str(), "{}", error);

        let speech_text = input.request_attributes().t(Strings::ErrorUnexpectedMsg);

        Ok(ResponseBuilder::new().speak(&speech_text).build())
    }
}

/// Handles any error; asks the user to try again and keeps the session open.
pub struct Unknown;

#[async_trait]
impl ErrorHandler for Unknown {
    fn name(&self) -> &'static str {
        "Unknown"
    }

    fn can_handle(&self, _input: &HandlerInput, _error: &SkillError) -> bool {
        true
    }

    async fn handle(
        &self,
        input: &mut HandlerInput,
        error: &SkillError,
    ) -> Result<Response, SkillError> {
        error!(kind = error.kind().as_str(), "{}", error);

        let speech_text = input.request_attributes().t(Strings::ErrorMsg);

        Ok(ResponseBuilder::new()
            .speak(&speech_text)
            .reprompt(&speech_text)
            .build())
    }
}
