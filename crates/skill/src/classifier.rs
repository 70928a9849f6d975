//! Request classification predicates used by every handler's `can_handle`.

use crate::model::{DialogState, Request, RequestType};

/// Built-in and custom intent names the skill reacts to
pub mod intents {
    pub const AMAZON_FALLBACK: &str = "AMAZON.FallbackIntent";
    pub const AMAZON_HELP: &str = "AMAZON.HelpIntent";
    pub const HELLO_WORLD: &str = "HelloWorldIntent";
}

/// Checks if the request matches any of the given types.
pub fn is_type(request: &Request, types: &[RequestType]) -> bool {
    types.iter().any(|t| request.request_type() == t.as_str())
}

/// Checks if the request is an intent request for any of the given intents.
pub fn is_intent(request: &Request, names: &[&str]) -> bool {
    request
        .as_intent()
        .is_some_and(|r| names.iter().any(|name| r.intent.name == *name))
}

/// Checks if the request matches the given intent and dialog state.
pub fn is_intent_with_dialog_state(request: &Request, name: &str, state: DialogState) -> bool {
    request
        .as_intent()
        .is_some_and(|r| r.intent.name == name && r.dialog_state == Some(state))
}

/// Checks if the request matches the given intent with a dialog state other
/// than `COMPLETED`. A missing dialog state counts as incomplete.
pub fn is_intent_with_incomplete_dialog(request: &Request, name: &str) -> bool {
    request
        .as_intent()
        .is_some_and(|r| r.intent.name == name && r.dialog_state != Some(DialogState::Completed))
}

/// Checks if the request matches the given intent with the `COMPLETED` dialog state.
pub fn is_intent_with_complete_dialog(request: &Request, name: &str) -> bool {
    is_intent_with_dialog_state(request, name, DialogState::Completed)
}
