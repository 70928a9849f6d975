//! Slot value resolution
//!
//! Turns the platform's per-authority resolution results into one outcome per
//! slot: matched (with the first resolved value and all candidates when the
//! match is ambiguous) or unmatched. Unmatched slots can be reset so the
//! dialog manager asks for them again.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::model::{
    ConfirmationStatus, IntentRequest, RequestEnvelope, Resolution, ResolvedValue, Slot,
    StatusCode,
};

/// Normalized outcomes keyed by slot name
pub type SlotValues = BTreeMap<String, SlotValue>;

/// A slot whose first authority reported `ER_SUCCESS_MATCH`
///
/// If the user said "Cola" and the slot type defines both "Coca Cola" and
/// "Coca Cola Zero", the outcome is matched, `resolved` is "Coca Cola",
/// `is_ambiguous` is true and `values` holds both candidates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedSlotValue {
    /// Name of the slot
    pub name: String,
    /// What the user said
    pub value: String,
    /// The first resolved value
    pub resolved: String,
    /// The first resolved id
    pub id: String,
    /// True if more than one value was resolved
    pub is_ambiguous: bool,
    /// All resolved values when ambiguous, empty otherwise
    pub values: Vec<ResolvedValue>,
    pub confirmation_status: ConfirmationStatus,
}

/// A slot that could not be resolved against its slot type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnmatchedSlotValue {
    pub name: String,
    pub value: Option<String>,
    pub confirmation_status: ConfirmationStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    Matched(MatchedSlotValue),
    Unmatched(UnmatchedSlotValue),
}

impl SlotValue {
    pub fn name(&self) -> &str {
        match self {
            SlotValue::Matched(v) => &v.name,
            SlotValue::Unmatched(v) => &v.name,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, SlotValue::Matched(_))
    }
}

// Serialized with an `isMatch` discriminator next to the variant's fields.
impl Serialize for SlotValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Tagged<'a, T> {
            #[serde(flatten)]
            inner: &'a T,
            is_match: bool,
        }

        match self {
            SlotValue::Matched(inner) => Tagged {
                inner,
                is_match: true,
            }
            .serialize(serializer),
            SlotValue::Unmatched(inner) => Tagged {
                inner,
                is_match: false,
            }
            .serialize(serializer),
        }
    }
}

/// Parses the raw slots of an intent into normalized outcomes.
///
/// Slots whose first authority reports a status other than match/no-match
/// (timeouts, errors, codes this skill does not know) get no outcome at all.
pub fn get_slot_values(slots: &BTreeMap<String, Slot>) -> SlotValues {
    let mut slot_values = SlotValues::new();

    for (key, slot) in slots {
        let name = if slot.name.is_empty() {
            key.clone()
        } else {
            slot.name.clone()
        };

        let outcome = match first_authority(slot) {
            None => Some(unmatched(&name, slot)),
            Some((authority, StatusCode::ErSuccessMatch)) => Some(matched(&name, slot, authority)),
            Some((_, StatusCode::ErSuccessNoMatch)) => Some(unmatched(&name, slot)),
            Some((_, code)) => {
                debug!(slot = %name, ?code, "No outcome for slot with unhandled resolution status");
                None
            }
        };

        if let Some(outcome) = outcome {
            slot_values.insert(name, outcome);
        }
    }

    slot_values
}

/// First resolution authority together with its status code, if the
/// resolution tree is complete down to the code.
fn first_authority(slot: &Slot) -> Option<(&Resolution, StatusCode)> {
    let authority = slot
        .resolutions
        .as_ref()?
        .resolutions_per_authority
        .as_ref()?
        .first()?;
    let code = authority.status.as_ref()?.code?;
    Some((authority, code))
}

fn matched(name: &str, slot: &Slot, authority: &Resolution) -> SlotValue {
    let Some(first) = authority.values.first() else {
        // A match without candidates carries nothing to resolve to.
        return unmatched(name, slot);
    };

    let is_ambiguous = authority.values.len() > 1;
    let values = if is_ambiguous {
        authority.values.iter().map(|w| w.value.clone()).collect()
    } else {
        Vec::new()
    };

    SlotValue::Matched(MatchedSlotValue {
        name: name.to_string(),
        value: slot.value.clone().unwrap_or_default(),
        resolved: first.value.name.clone(),
        id: first.value.id.clone(),
        is_ambiguous,
        values,
        confirmation_status: slot.confirmation_status,
    })
}

fn unmatched(name: &str, slot: &Slot) -> SlotValue {
    SlotValue::Unmatched(UnmatchedSlotValue {
        name: name.to_string(),
        value: slot.value.clone(),
        confirmation_status: slot.confirmation_status,
    })
}

/// Resets the given slot value by setting it to an empty string. With the
/// dialog directive this makes the platform prompt for the slot again.
pub fn reset_slot_value(request: &mut IntentRequest, slot_name: &str) {
    if let Some(slot) = request.intent.slots.get_mut(slot_name) {
        slot.value = Some(String::new());
    }
}

/// Resets every unmatched slot of an intent request.
pub fn reset_unmatched_slot_values(envelope: &mut RequestEnvelope, slots: &SlotValues) {
    let Some(request) = envelope.request.as_intent_mut() else {
        return;
    };

    for slot in slots.values().filter(|s| !s.is_match()) {
        reset_slot_value(request, slot.name());
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::model::Request;

    fn slots(raw: serde_json::Value) -> BTreeMap<String, Slot> {
        serde_json::from_value(raw).unwrap()
    }

    fn authority(code: &str, candidates: &[(&str, &str)]) -> serde_json::Value {
        let values: Vec<_> = candidates
            .iter()
            .map(|(id, name)| json!({ "value": { "id": id, "name": name } }))
            .collect();
        json!({
            "resolutionsPerAuthority": [{
                "authority": "amzn1.er-authority.echo-sdk.drink",
                "status": { "code": code },
                "values": values
            }]
        })
    }

    #[test]
    fn test_ambiguous_match_keeps_all_candidates() {
        let raw = slots(json!({
            "drink": {
                "name": "drink",
                "value": "Cola",
                "confirmationStatus": "NONE",
                "resolutions": authority(
                    "ER_SUCCESS_MATCH",
                    &[("cocacola", "Coca Cola"), ("cocacolazero", "Coca Cola Zero")]
                )
            }
        }));

        let values = get_slot_values(&raw);
        let SlotValue::Matched(drink) = &values["drink"] else {
            panic!("expected a matched slot");
        };

        assert_eq!(drink.value, "Cola");
        assert_eq!(drink.resolved, "Coca Cola");
        assert_eq!(drink.id, "cocacola");
        assert!(drink.is_ambiguous);
        assert_eq!(
            drink.values,
            vec![
                ResolvedValue {
                    name: "Coca Cola".to_string(),
                    id: "cocacola".to_string()
                },
                ResolvedValue {
                    name: "Coca Cola Zero".to_string(),
                    id: "cocacolazero".to_string()
                },
            ]
        );

        let serialized = serde_json::to_value(&values["drink"]).unwrap();
        assert_eq!(serialized["isMatch"], true);
        assert_eq!(serialized["isAmbiguous"], true);
        assert_eq!(serialized["confirmationStatus"], "NONE");
    }

    #[test]
    fn test_single_candidate_is_not_ambiguous() {
        let raw = slots(json!({
            "drink": {
                "name": "drink",
                "value": "Sprite",
                "confirmationStatus": "CONFIRMED",
                "resolutions": authority("ER_SUCCESS_MATCH", &[("sprite", "Sprite")])
            }
        }));

        let values = get_slot_values(&raw);
        let SlotValue::Matched(drink) = &values["drink"] else {
            panic!("expected a matched slot");
        };

        assert!(!drink.is_ambiguous);
        assert!(drink.values.is_empty());
        assert_eq!(drink.resolved, "Sprite");
        assert_eq!(drink.confirmation_status, ConfirmationStatus::Confirmed);
    }

    #[test]
    fn test_no_match_and_missing_resolutions_are_unmatched() {
        let raw = slots(json!({
            "drink": {
                "name": "drink",
                "value": "Water",
                "confirmationStatus": "DENIED",
                "resolutions": authority("ER_SUCCESS_NO_MATCH", &[])
            },
            "size": {
                "name": "size",
                "value": "large",
                "confirmationStatus": "NONE"
            },
            "empty": {
                "name": "empty",
                "confirmationStatus": "NONE",
                "resolutions": { "resolutionsPerAuthority": [] }
            }
        }));

        let values = get_slot_values(&raw);
        assert_eq!(values.len(), 3);

        assert_eq!(
            values["drink"],
            SlotValue::Unmatched(UnmatchedSlotValue {
                name: "drink".to_string(),
                value: Some("Water".to_string()),
                confirmation_status: ConfirmationStatus::Denied,
            })
        );
        assert_eq!(
            values["size"],
            SlotValue::Unmatched(UnmatchedSlotValue {
                name: "size".to_string(),
                value: Some("large".to_string()),
                confirmation_status: ConfirmationStatus::None,
            })
        );
        assert_eq!(
            values["empty"],
            SlotValue::Unmatched(UnmatchedSlotValue {
                name: "empty".to_string(),
                value: None,
                confirmation_status: ConfirmationStatus::None,
            })
        );
    }

    #[test]
    fn test_match_without_candidates_is_unmatched() {
        let raw = slots(json!({
            "drink": {
                "name": "drink",
                "value": "Cola",
                "confirmationStatus": "NONE",
                "resolutions": authority("ER_SUCCESS_MATCH", &[])
            }
        }));

        assert_eq!(
            get_slot_values(&raw)["drink"],
            SlotValue::Unmatched(UnmatchedSlotValue {
                name: "drink".to_string(),
                value: Some("Cola".to_string()),
                confirmation_status: ConfirmationStatus::None,
            })
        );
    }

    #[test]
    fn test_malformed_resolution_levels_leave_only_that_slot_unmatched() {
        let raw = slots(json!({
            "status_as_string": {
                "name": "status_as_string",
                "value": "Cola",
                "resolutions": {
                    "resolutionsPerAuthority": [{
                        "status": "ER_SUCCESS_MATCH",
                        "values": [{ "value": { "id": "cocacola", "name": "Coca Cola" } }]
                    }]
                }
            },
            "authorities_as_object": {
                "name": "authorities_as_object",
                "value": "Cola",
                "resolutions": {
                    "resolutionsPerAuthority": { "status": { "code": "ER_SUCCESS_MATCH" } }
                }
            },
            "numeric_code": {
                "name": "numeric_code",
                "value": "Cola",
                "resolutions": {
                    "resolutionsPerAuthority": [{
                        "status": { "code": 0 },
                        "values": [{ "value": { "id": "cocacola", "name": "Coca Cola" } }]
                    }]
                }
            },
            "candidate_without_id": {
                "name": "candidate_without_id",
                "value": "Cola",
                "resolutions": {
                    "resolutionsPerAuthority": [{
                        "status": { "code": "ER_SUCCESS_MATCH" },
                        "values": [{ "value": { "name": "Coca Cola" } }]
                    }]
                }
            },
            "drink": {
                "name": "drink",
                "value": "Sprite",
                "resolutions": authority("ER_SUCCESS_MATCH", &[("sprite", "Sprite")])
            }
        }));

        let values = get_slot_values(&raw);
        assert_eq!(values.len(), 5);

        for name in [
            "status_as_string",
            "authorities_as_object",
            "numeric_code",
            "candidate_without_id",
        ] {
            assert_eq!(
                values[name],
                SlotValue::Unmatched(UnmatchedSlotValue {
                    name: name.to_string(),
                    value: Some("Cola".to_string()),
                    confirmation_status: ConfirmationStatus::None,
                }),
                "slot {name}"
            );
        }
        assert!(values["drink"].is_match());
    }

    #[test]
    fn test_unhandled_status_codes_produce_no_outcome() {
        let raw = slots(json!({
            "drink": {
                "name": "drink",
                "value": "Cola",
                "resolutions": authority("ER_ERROR_TIMEOUT", &[])
            },
            "size": {
                "name": "size",
                "value": "small",
                "resolutions": authority("ER_NOT_A_REAL_CODE", &[])
            }
        }));

        assert!(get_slot_values(&raw).is_empty());
    }

    #[test]
    fn test_outcomes_are_keyed_by_slot_name() {
        let raw = slots(json!({
            "alias": { "name": "drink", "value": "Cola" },
            "unnamed": { "value": "small" }
        }));

        let values = get_slot_values(&raw);
        assert!(values.contains_key("drink"));
        assert!(values.contains_key("unnamed"));
    }

    #[test]
    fn test_reset_unmatched_slot_values() {
        let mut envelope: RequestEnvelope = serde_json::from_value(json!({
            "request": {
                "type": "IntentRequest",
                "requestId": "req-1",
                "intent": {
                    "name": "OrderIntent",
                    "slots": {
                        "drink": {
                            "name": "drink",
                            "value": "Cola",
                            "resolutions": authority("ER_SUCCESS_MATCH", &[("cocacola", "Coca Cola")])
                        },
                        "size": {
                            "name": "size",
                            "value": "gigantic",
                            "resolutions": authority("ER_SUCCESS_NO_MATCH", &[])
                        }
                    }
                }
            }
        }))
        .unwrap();

        let values = get_slot_values(&envelope.request.as_intent().unwrap().intent.slots);
        reset_unmatched_slot_values(&mut envelope, &values);

        let slots = &envelope.request.as_intent().unwrap().intent.slots;
        assert_eq!(slots["drink"].value.as_deref(), Some("Cola"));
        assert_eq!(slots["size"].value.as_deref(), Some(""));
    }

    #[test]
    fn test_reset_ignores_missing_slots_and_other_requests() {
        let mut envelope: RequestEnvelope = serde_json::from_value(json!({
            "request": { "type": "LaunchRequest", "requestId": "req-1" }
        }))
        .unwrap();

        let mut values = SlotValues::new();
        values.insert(
            "ghost".to_string(),
            SlotValue::Unmatched(UnmatchedSlotValue {
                name: "ghost".to_string(),
                value: None,
                confirmation_status: ConfirmationStatus::None,
            }),
        );

        reset_unmatched_slot_values(&mut envelope, &values);
        assert!(matches!(envelope.request, Request::Launch(_)));

        let mut intent: IntentRequest = serde_json::from_value(json!({
            "requestId": "req-2",
            "intent": { "name": "OrderIntent" }
        }))
        .unwrap();
        reset_slot_value(&mut intent, "ghost");
        assert!(intent.intent.slots.is_empty());
    }
}
