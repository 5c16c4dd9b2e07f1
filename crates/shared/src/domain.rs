use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::UnknownToneError;

/// Auto-dismiss delay listeners fall back to when a toast carries none.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 4000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToastTone {
    Success,
    Info,
    Warning,
    Error,
}

impl ToastTone {
    pub const ALL: [ToastTone; 4] = [
        ToastTone::Success,
        ToastTone::Info,
        ToastTone::Warning,
        ToastTone::Error,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToastTone::Success => "success",
            ToastTone::Info => "info",
            ToastTone::Warning => "warning",
            ToastTone::Error => "error",
        }
    }
}

impl fmt::Display for ToastTone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToastTone {
    type Err = UnknownToneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToastTone::ALL
            .into_iter()
            .find(|tone| tone.as_str() == s)
            .ok_or_else(|| UnknownToneError(s.to_string()))
    }
}

/// A transient user-facing message. Built by a caller, broadcast once, then
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToastPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub tone: ToastTone,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl ToastPayload {
    pub fn new(tone: ToastTone, message: impl Into<String>) -> Self {
        Self {
            id: None,
            tone,
            message: message.into(),
            duration_ms: None,
        }
    }

    pub fn with_duration_ms(mut self, duration_ms: Option<u64>) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn effective_duration_ms(&self) -> u64 {
        self.duration_ms.unwrap_or(DEFAULT_TOAST_DURATION_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_names_round_trip_through_from_str() {
        for tone in ToastTone::ALL {
            assert_eq!(tone.to_string().parse::<ToastTone>().unwrap(), tone);
        }
    }

    #[test]
    fn tone_parsing_is_case_sensitive() {
        let err = "Success".parse::<ToastTone>().unwrap_err();
        assert_eq!(err.to_string(), "unknown toast tone 'Success'");
    }

    #[test]
    fn payload_serializes_with_camel_case_and_omits_absent_fields() {
        let payload = ToastPayload::new(ToastTone::Success, "Saved").with_duration_ms(Some(2000));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "tone": "success", "message": "Saved", "durationMs": 2000 })
        );

        let bare = serde_json::to_value(ToastPayload::new(ToastTone::Error, "boom")).unwrap();
        assert_eq!(bare, serde_json::json!({ "tone": "error", "message": "boom" }));
    }

    #[test]
    fn payload_deserializes_without_optional_fields() {
        let payload: ToastPayload =
            serde_json::from_str(r#"{"tone":"warning","message":"Low stock"}"#).unwrap();
        assert_eq!(payload.id, None);
        assert_eq!(payload.duration_ms, None);
        assert_eq!(payload.effective_duration_ms(), DEFAULT_TOAST_DURATION_MS);
    }
}
