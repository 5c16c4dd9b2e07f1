use std::{
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use shared::domain::{ToastPayload, ToastTone};
use tracing::debug;

use crate::toast::{ToastBus, ToastSubscription};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveToast {
    pub id: u64,
    pub tone: ToastTone,
    pub message: String,
    pub expires_at: Instant,
}

/// Listener-side record of the toasts currently on screen.
#[derive(Debug, Default)]
pub struct ToastTray {
    next_id: u64,
    active: Vec<ActiveToast>,
}

pub type SharedToastTray = Arc<Mutex<ToastTray>>;

impl ToastTray {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a fresh tray to `bus`, stamping arrivals with the wall clock.
    pub fn attach(bus: &ToastBus) -> (SharedToastTray, ToastSubscription) {
        let tray: SharedToastTray = Arc::new(Mutex::new(ToastTray::new()));
        let sink = Arc::clone(&tray);
        let subscription = bus.subscribe(move |payload| {
            sink.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(payload, Instant::now());
        });
        (tray, subscription)
    }

    /// Shows `payload` and returns its id. A payload reusing the id of a
    /// visible toast replaces it.
    pub fn push(&mut self, payload: &ToastPayload, now: Instant) -> u64 {
        let id = match payload.id {
            Some(id) => id,
            None => self.allocate_id(),
        };
        let entry = ActiveToast {
            id,
            tone: payload.tone,
            message: payload.message.clone(),
            expires_at: now + Duration::from_millis(payload.effective_duration_ms()),
        };

        match self.active.iter_mut().find(|toast| toast.id == id) {
            Some(existing) => *existing = entry,
            None => self.active.push(entry),
        }
        id
    }

    fn allocate_id(&mut self) -> u64 {
        loop {
            self.next_id += 1;
            if !self.active.iter().any(|toast| toast.id == self.next_id) {
                return self.next_id;
            }
        }
    }

    /// Removes and returns every toast whose deadline is at or before `now`.
    pub fn expire(&mut self, now: Instant) -> Vec<ActiveToast> {
        let (expired, live): (Vec<_>, Vec<_>) = self
            .active
            .drain(..)
            .partition(|toast| toast.expires_at <= now);
        self.active = live;
        if !expired.is_empty() {
            debug!("toast: auto-dismissed {} toast(s)", expired.len());
        }
        expired
    }

    pub fn dismiss(&mut self, id: u64) -> Option<ActiveToast> {
        let index = self.active.iter().position(|toast| toast.id == id)?;
        Some(self.active.remove(index))
    }

    pub fn active(&self) -> &[ActiveToast] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/toast_tray_tests.rs"]
mod tests;
