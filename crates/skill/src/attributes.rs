//! Per-request and per-session attributes

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    i18n::{Strings, Translator},
    slots::SlotValues,
};

/// Attributes that live for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestAttributes {
    /// Normalized slot values of the current request
    pub slots: SlotValues,
    /// Translation function for the request locale
    pub translator: Translator,
}

impl RequestAttributes {
    /// Translate a message key for the request locale.
    pub fn t(&self, key: Strings) -> String {
        self.translator.t(key, &[])
    }
}

/// Attributes the platform keeps for the lifetime of a session. The skill
/// stores nothing here yet; values are passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionAttributes(Map<String, Value>);

impl SessionAttributes {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for SessionAttributes {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
