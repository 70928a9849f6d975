use async_trait::async_trait;

use super::{HandlerInput, RequestHandler};
use crate::{
    SkillError,
    classifier::{intents, is_intent},
    i18n::Strings,
    response::{Response, ResponseBuilder},
};

/// Says hello and ends the session
pub struct HelloWorld;

#[async_trait]
impl RequestHandler for HelloWorld {
    fn name(&self) -> &'static str {
        "HelloWorld"
    }

    fn can_handle(&self, input: &HandlerInput) -> bool {
        is_intent(&input.request_envelope.request, &[intents::HELLO_WORLD])
    }

    async fn handle(&self, input: &mut HandlerInput) -> Result<Response, SkillError> {
        let speech_text = input.request_attributes().t(Strings::HelloMsg);

        Ok(ResponseBuilder::new().speak(&speech_text).build())
    }
}
