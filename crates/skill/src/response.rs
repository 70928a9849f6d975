//! Response envelope and a builder for spoken responses

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope returned to the platform for every request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<Map<String, Value>>,
    pub response: Response,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
    /// Raw platform directives, sent in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Value>,
}

impl Response {
    /// SSML of the primary speech, if any
    pub fn speech(&self) -> Option<&str> {
        self.output_speech.as_ref().map(OutputSpeech::content)
    }

    pub fn reprompt_speech(&self) -> Option<&str> {
        self.reprompt.as_ref().map(|r| r.output_speech.content())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
    PlainText { text: String },
}

impl OutputSpeech {
    fn ssml(text: &str) -> Self {
        OutputSpeech::Ssml {
            ssml: format!("<speak>{}</speak>", trim_output_speech(text)),
        }
    }

    pub fn content(&self) -> &str {
        match self {
            OutputSpeech::Ssml { ssml } => ssml,
            OutputSpeech::PlainText { text } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Builder for spoken responses
#[derive(Debug, Clone, Default)]
pub struct ResponseBuilder {
    output_speech: Option<OutputSpeech>,
    reprompt: Option<Reprompt>,
    should_end_session: Option<bool>,
    directives: Vec<Value>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary speech (plain text or SSML without `<speak>`)
    pub fn speak(mut self, text: &str) -> Self {
        self.output_speech = Some(OutputSpeech::ssml(text));
        self
    }

    /// Set the reprompt; keeps the session open
    pub fn reprompt(mut self, text: &str) -> Self {
        self.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::ssml(text),
        });
        self.should_end_session = Some(false);
        self
    }

    pub fn with_should_end_session(mut self, end: bool) -> Self {
        self.should_end_session = Some(end);
        self
    }

    pub fn add_directive(mut self, directive: Value) -> Self {
        self.directives.push(directive);
        self
    }

    /// Build the response. Speech without a reprompt ends the session unless
    /// told otherwise; an empty response leaves the flag unset.
    pub fn build(self) -> Response {
        let should_end_session = match self.should_end_session {
            Some(end) => Some(end),
            None if self.output_speech.is_some() && self.reprompt.is_none() => Some(true),
            None => None,
        };

        Response {
            output_speech: self.output_speech,
            reprompt: self.reprompt,
            should_end_session,
            directives: self.directives,
        }
    }
}

/// Strips a surrounding `<speak>` element so the text can be wrapped again.
fn trim_output_speech(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix("<speak>")
        .and_then(|s| s.strip_suffix("</speak>"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

/// Wraps the given string as an interjection.
pub fn interject(text: &str) -> String {
    format!("<say-as interpret-as=\"interjection\">{}</say-as>", text)
}
