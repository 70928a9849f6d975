//! # Skill - Hello World voice skill
//!
//! Classifies incoming voice requests, normalizes slot resolution results and
//! answers with localized speech (en-US and de-DE).

pub mod attributes;
pub mod classifier;
pub mod directive;
pub mod error;
pub mod handlers;
pub mod i18n;
pub mod interceptors;
pub mod model;
pub mod response;
pub mod skill;
pub mod slots;

pub use attributes::{RequestAttributes, SessionAttributes};
pub use error::{ErrorKind, SkillError};
pub use model::{Request, RequestEnvelope};
pub use response::{Response, ResponseBuilder, ResponseEnvelope};
pub use skill::{Skill, SkillBuilder};
pub use slots::{SlotValue, SlotValues};

/// The Hello World skill with all handlers registered in dispatch order.
pub fn hello_world_skill() -> Skill {
    Skill::builder()
        .add_request_interceptor(interceptors::Localization)
        .add_request_interceptor(interceptors::Slots)
        .add_request_handler(handlers::DebugLog)
        .add_request_handler(handlers::Launch)
        .add_request_handler(handlers::Help)
        .add_request_handler(handlers::Fallback)
        .add_request_handler(handlers::SessionEnded)
        .add_request_handler(handlers::SystemExceptionEncountered)
        .add_request_handler(handlers::HelloWorld)
        .add_error_handler(handlers::Unexpected)
        .add_error_handler(handlers::Unknown)
        .build()
}
