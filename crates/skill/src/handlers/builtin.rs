//! Handlers for the launch request and the built-in intents

use async_trait::async_trait;

use super::{HandlerInput, RequestHandler};
use crate::{
    SkillError,
    classifier::{intents, is_intent, is_type},
    i18n::Strings,
    model::RequestType,
    response::{Response, ResponseBuilder},
};

pub struct Launch;

#[async_trait]
impl RequestHandler for Launch {
    fn name(&self) -> &'static str {
        "Launch"
    }

    fn can_handle(&self, input: &HandlerInput) -> bool {
        is_type(&input.request_envelope.request, &[RequestType::Launch])
    }

    async fn handle(&self, input: &mut HandlerInput) -> Result<Response, SkillError> {
        let speech_text = input.request_attributes().t(Strings::WelcomeMsg);

        Ok(ResponseBuilder::new()
            .speak(&speech_text)
            .reprompt(&speech_text)
            .build())
    }
}

pub struct Help;

#[async_trait]
impl RequestHandler for Help {
    fn name(&self) -> &'static str {
        "Help"
    }

    fn can_handle(&self, input: &HandlerInput) -> bool {
        is_intent(&input.request_envelope.request, &[intents::AMAZON_HELP])
    }

    async fn handle(&self, input: &mut HandlerInput) -> Result<Response, SkillError> {
        let speech_text = input.request_attributes().t(Strings::HelpMsg);

        Ok(ResponseBuilder::new()
            .speak(&speech_text)
            .reprompt(&speech_text)
            .build())
    }
}

pub struct Fallback;

#[async_trait]
impl RequestHandler for Fallback {
    fn name(&self) -> &'static str {
        "Fallback"
    }

    fn can_handle(&self, input: &HandlerInput) -> bool {
        is_intent(&input.request_envelope.request, &[intents::AMAZON_FALLBACK])
    }

    async fn handle(&self, input: &mut HandlerInput) -> Result<Response, SkillError> {
        let attributes = input.request_attributes();

        Ok(ResponseBuilder::new()
            .speak(&attributes.t(Strings::FallbackMsg))
            .reprompt(&attributes.t(Strings::FallbackReprompt))
            .build())
    }
}
