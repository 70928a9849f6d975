//! Request interceptors filling the request attributes before dispatch

use async_trait::async_trait;
use tracing::debug;

use crate::{
    SkillError,
    handlers::{HandlerInput, RequestInterceptor},
    i18n::{Locale, Translator},
    slots::{SlotValues, get_slot_values},
};

/// Binds the translator to the request locale
pub struct Localization;

#[async_trait]
impl RequestInterceptor for Localization {
    fn name(&self) -> &'static str {
        "Localization"
    }

    async fn process(&self, input: &mut HandlerInput) -> Result<(), SkillError> {
        let locale = Locale::resolve(input.request_envelope.request.locale());
        input.request_attributes_mut().translator = Translator::new(locale);
        Ok(())
    }
}

/// Parses the slot values of intent requests into the request attributes
pub struct Slots;

#[async_trait]
impl RequestInterceptor for Slots {
    fn name(&self) -> &'static str {
        "Slots"
    }

    async fn process(&self, input: &mut HandlerInput) -> Result<(), SkillError> {
        let slots = match input.request_envelope.request.as_intent() {
            Some(request) => get_slot_values(&request.intent.slots),
            None => SlotValues::new(),
        };

        debug!(count = slots.len(), "Parsed slot values");
        input.request_attributes_mut().slots = slots;
        Ok(())
    }
}
