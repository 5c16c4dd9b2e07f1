use serde::{Deserialize, Serialize};

use crate::domain::ToastPayload;

/// Name of the single channel toasts are published on.
pub const APP_TOAST_EVENT: &str = "app-toast";

/// A toast as seen by an external listener surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToastEvent {
    pub name: String,
    pub detail: ToastPayload,
}

impl ToastEvent {
    pub fn new(detail: ToastPayload) -> Self {
        Self {
            name: APP_TOAST_EVENT.to_string(),
            detail,
        }
    }

    pub fn is_app_toast(&self) -> bool {
        self.name == APP_TOAST_EVENT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ToastTone;

    #[test]
    fn envelope_carries_app_toast_name() {
        let event = ToastEvent::new(ToastPayload::new(ToastTone::Info, "Synced"));
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"name":"app-toast","detail":{"tone":"info","message":"Synced"}}"#
        );
        assert!(event.is_app_toast());
    }
}
