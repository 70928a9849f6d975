//! Request envelope model
//!
//! The JSON shape the voice platform posts for every interaction turn. Only
//! the parts the skill reads are modelled; request types the skill does not
//! know about are kept as [`Request::Unknown`] with their raw type string.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de, de::DeserializeOwned, ser};
use serde_json::{Map, Value};

/// Top-level request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<Context>,
    pub request: Request,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl RequestEnvelope {
    pub fn new(request: Request) -> Self {
        Self {
            version: default_version(),
            session: None,
            context: None,
            request,
        }
    }
}

/// Session state carried between turns
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub new: bool,
    #[serde(default)]
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    #[serde(rename = "System", default, skip_serializing_if = "Option::is_none")]
    pub system: Option<SystemState>,
}

/// Platform endpoint details needed for out-of-band service calls
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_access_token: Option<String>,
}

/// Request types the skill distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Launch,
    Intent,
    SessionEnded,
    SystemExceptionEncountered,
}

impl RequestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::Launch => "LaunchRequest",
            RequestType::Intent => "IntentRequest",
            RequestType::SessionEnded => "SessionEndedRequest",
            RequestType::SystemExceptionEncountered => "System.ExceptionEncountered",
        }
    }
}

/// One interaction turn, discriminated by its JSON `type`
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Launch(LaunchRequest),
    Intent(IntentRequest),
    SessionEnded(SessionEndedRequest),
    SystemException(SystemExceptionRequest),
    Unknown(UnknownRequest),
}

impl Request {
    /// The raw `type` string of this request
    pub fn request_type(&self) -> &str {
        match self {
            Request::Launch(_) => RequestType::Launch.as_str(),
            Request::Intent(_) => RequestType::Intent.as_str(),
            Request::SessionEnded(_) => RequestType::SessionEnded.as_str(),
            Request::SystemException(_) => RequestType::SystemExceptionEncountered.as_str(),
            Request::Unknown(r) => &r.request_type,
        }
    }

    pub fn request_id(&self) -> &str {
        match self {
            Request::Launch(r) => &r.request_id,
            Request::Intent(r) => &r.request_id,
            Request::SessionEnded(r) => &r.request_id,
            Request::SystemException(r) => &r.request_id,
            Request::Unknown(r) => &r.request_id,
        }
    }

    pub fn locale(&self) -> Option<&str> {
        match self {
            Request::Launch(r) => r.locale.as_deref(),
            Request::Intent(r) => r.locale.as_deref(),
            Request::SessionEnded(r) => r.locale.as_deref(),
            Request::SystemException(r) => r.locale.as_deref(),
            Request::Unknown(r) => r.locale.as_deref(),
        }
    }

    pub fn as_intent(&self) -> Option<&IntentRequest> {
        match self {
            Request::Intent(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_intent_mut(&mut self) -> Option<&mut IntentRequest> {
        match self {
            Request::Intent(r) => Some(r),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for Request {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut body = Map::deserialize(deserializer)?;
        let request_type = match body.remove("type") {
            Some(Value::String(t)) => t,
            Some(_) => return Err(de::Error::custom("request `type` must be a string")),
            None => return Err(de::Error::missing_field("type")),
        };
        let body = Value::Object(body);

        let parsed = match request_type.as_str() {
            "LaunchRequest" => serde_json::from_value(body).map(Request::Launch),
            "IntentRequest" => serde_json::from_value(body).map(Request::Intent),
            "SessionEndedRequest" => serde_json::from_value(body).map(Request::SessionEnded),
            "System.ExceptionEncountered" => {
                serde_json::from_value(body).map(Request::SystemException)
            }
            _ => serde_json::from_value(body).map(|mut unknown: UnknownRequest| {
                unknown.request_type = request_type.clone();
                Request::Unknown(unknown)
            }),
        };

        parsed.map_err(de::Error::custom)
    }
}

impl Serialize for Request {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let body = match self {
            Request::Launch(r) => serde_json::to_value(r),
            Request::Intent(r) => serde_json::to_value(r),
            Request::SessionEnded(r) => serde_json::to_value(r),
            Request::SystemException(r) => serde_json::to_value(r),
            Request::Unknown(r) => serde_json::to_value(r),
        }
        .map_err(ser::Error::custom)?;

        let mut tagged = Map::new();
        tagged.insert(
            "type".to_string(),
            Value::String(self.request_type().to_string()),
        );
        if let Value::Object(fields) = body {
            tagged.extend(fields);
        }
        tagged.serialize(serializer)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchRequest {
    #[serde(default)]
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    #[serde(default)]
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog_state: Option<DialogState>,
    pub intent: Intent,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEndedRequest {
    #[serde(default)]
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemExceptionRequest {
    #[serde(default)]
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<Value>,
}

/// A request type the skill has no model for. Unmodelled fields are kept
/// verbatim in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnknownRequest {
    #[serde(skip)]
    pub request_type: String,
    #[serde(default)]
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Multi-turn slot collection progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DialogState {
    Started,
    InProgress,
    Completed,
    /// A state this skill does not model; never equal to a known one
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub confirmation_status: ConfirmationStatus,
    #[serde(default)]
    pub slots: BTreeMap<String, Slot>,
}

/// Whether the user explicitly confirmed or denied a value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfirmationStatus {
    #[default]
    None,
    Confirmed,
    Denied,
}

/// Raw slot as recognised by the platform
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub confirmation_status: ConfirmationStatus,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolutions: Option<Resolutions>,
}

// Every level below is optional and decoded leniently: a missing or malformed
// level only leaves its slot unmatched, it never fails the whole request.

/// Decodes a field, falling back to its default when the value has the wrong
/// shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(raw).unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolutions {
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolutions_per_authority: Option<Vec<Resolution>>,
}

/// Candidate values proposed by one resolution authority
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<ResolutionStatus>,
    #[serde(default, deserialize_with = "lenient")]
    pub values: Vec<ValueWrapper>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResolutionStatus {
    #[serde(
        default,
        deserialize_with = "lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub code: Option<StatusCode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    ErSuccessMatch,
    ErSuccessNoMatch,
    ErErrorTimeout,
    ErErrorException,
    #[serde(other)]
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueWrapper {
    pub value: ResolvedValue,
}

/// Canonical value from a slot type definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedValue {
    pub name: String,
    pub id: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parses_intent_request_with_slots() {
        let envelope: RequestEnvelope = serde_json::from_value(json!({
            "version": "1.0",
            "request": {
                "type": "IntentRequest",
                "requestId": "req-1",
                "locale": "de-DE",
                "dialogState": "IN_PROGRESS",
                "intent": {
                    "name": "OrderIntent",
                    "slots": {
                        "drink": {
                            "name": "drink",
                            "value": "Cola",
                            "confirmationStatus": "NONE",
                            "resolutions": {
                                "resolutionsPerAuthority": [{
                                    "authority": "amzn1.er-authority.drink",
                                    "status": { "code": "ER_SUCCESS_MATCH" },
                                    "values": [{ "value": { "id": "cocacola", "name": "Coca Cola" } }]
                                }]
                            }
                        }
                    }
                }
            }
        }))
        .unwrap();

        let intent = envelope.request.as_intent().unwrap();
        assert_eq!(envelope.request.request_type(), "IntentRequest");
        assert_eq!(envelope.request.locale(), Some("de-DE"));
        assert_eq!(intent.dialog_state, Some(DialogState::InProgress));
        assert_eq!(intent.intent.slots["drink"].value.as_deref(), Some("Cola"));
    }

    #[test]
    fn test_unknown_request_keeps_its_type() {
        let request: Request = serde_json::from_value(json!({
            "type": "AudioPlayer.PlaybackStarted",
            "requestId": "req-2",
            "token": "abc"
        }))
        .unwrap();

        assert_eq!(request.request_type(), "AudioPlayer.PlaybackStarted");
        assert_eq!(request.request_id(), "req-2");

        let back = serde_json::to_value(&request).unwrap();
        assert_eq!(back["type"], "AudioPlayer.PlaybackStarted");
        assert_eq!(back["token"], "abc");
    }

    #[test]
    fn test_missing_type_is_rejected() {
        let result: Result<Request, _> = serde_json::from_value(json!({ "requestId": "x" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_dialog_state_does_not_reject_request() {
        let request: Request = serde_json::from_value(json!({
            "type": "IntentRequest",
            "requestId": "req-3",
            "dialogState": "SOMEWHERE_ELSE",
            "intent": { "name": "OrderIntent" }
        }))
        .unwrap();

        let intent = request.as_intent().unwrap();
        assert_eq!(intent.dialog_state, Some(DialogState::Unrecognized));
    }

    #[test]
    fn test_malformed_resolutions_are_dropped_per_level() {
        let slot: Slot = serde_json::from_value(json!({
            "name": "drink",
            "value": "Cola",
            "resolutions": { "resolutionsPerAuthority": { "not": "a list" } }
        }))
        .unwrap();
        assert_eq!(slot.resolutions, Some(Resolutions::default()));

        let slot: Slot = serde_json::from_value(json!({
            "name": "drink",
            "resolutions": "ER_SUCCESS_MATCH"
        }))
        .unwrap();
        assert_eq!(slot.resolutions, None);

        let status: ResolutionStatus = serde_json::from_value(json!({ "code": 0 })).unwrap();
        assert_eq!(status.code, None);
    }

    #[test]
    fn test_future_status_codes_parse_as_unrecognized() {
        let status: ResolutionStatus =
            serde_json::from_value(json!({ "code": "ER_SOMETHING_NEW" })).unwrap();
        assert_eq!(status.code, Some(StatusCode::Unrecognized));
    }
}
