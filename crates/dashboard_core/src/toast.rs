//! In-page toast notifications.
//!
//! A [`ToastBus`] is owned by the UI root and hands out [`ToastEmitter`]s to
//! any component that wants to raise a toast. Delivery is synchronous: every
//! listener registered when [`ToastBus::publish`] is called runs, in
//! subscription order, before `publish` returns. Nothing is buffered, so a
//! toast published while no listener is attached is lost.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use shared::{
    domain::{ToastPayload, ToastTone},
    protocol::APP_TOAST_EVENT,
};
use tracing::{debug, trace};

type Listener = Arc<dyn Fn(&ToastPayload) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_listener_id: u64,
    listeners: Vec<(u64, Listener)>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Clone, Default)]
pub struct ToastBus {
    registry: Arc<Mutex<Registry>>,
}

impl ToastBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` until the returned subscription is dropped.
    pub fn subscribe<F>(&self, listener: F) -> ToastSubscription
    where
        F: Fn(&ToastPayload) + Send + Sync + 'static,
    {
        let mut registry = lock(&self.registry);
        registry.next_listener_id += 1;
        let id = registry.next_listener_id;
        registry.listeners.push((id, Arc::new(listener)));

        ToastSubscription {
            registry: Arc::downgrade(&self.registry),
            id,
        }
    }

    /// Delivers `payload` to the current listeners and returns how many were
    /// notified. Listeners run after the registry lock is released, so they
    /// may publish or subscribe themselves; a listener added mid-publish does
    /// not see the in-flight payload.
    pub fn publish(&self, payload: ToastPayload) -> usize {
        let listeners: Vec<Listener> = lock(&self.registry)
            .listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        if listeners.is_empty() {
            debug!(
                event = APP_TOAST_EVENT,
                tone = %payload.tone,
                "toast: no listener attached, dropping"
            );
            return 0;
        }

        for listener in &listeners {
            listener(&payload);
        }
        listeners.len()
    }

    pub fn emitter(&self) -> ToastEmitter {
        ToastEmitter {
            registry: Some(Arc::downgrade(&self.registry)),
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.registry).listeners.len()
    }
}

impl std::fmt::Debug for ToastBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Keeps a listener registered. Dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes the listener"]
#[derive(Debug)]
pub struct ToastSubscription {
    registry: Weak<Mutex<Registry>>,
    id: u64,
}

impl ToastSubscription {
    /// Consumes the subscription; `Drop` does the unregistering.
    pub fn unsubscribe(self) {}

    /// Leaves the listener registered for the lifetime of the bus.
    pub fn persist(mut self) {
        self.registry = Weak::new();
    }
}

impl Drop for ToastSubscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // The listener may own other subscriptions on this bus; release it
        // only after the guard is gone.
        let removed = {
            let mut registry = lock(&registry);
            let index = registry
                .listeners
                .iter()
                .position(|(listener_id, _)| *listener_id == self.id);
            index.map(|index| registry.listeners.remove(index))
        };
        drop(removed);
    }
}

/// Publishing capability handed to UI components. A detached emitter, or
/// one whose bus has been dropped, silently discards everything.
#[derive(Debug, Clone, Default)]
pub struct ToastEmitter {
    registry: Option<Weak<Mutex<Registry>>>,
}

impl ToastEmitter {
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.registry
            .as_ref()
            .is_some_and(|registry| registry.strong_count() > 0)
    }

    pub fn toast(&self, payload: ToastPayload) {
        let Some(registry) = self.registry.as_ref().and_then(Weak::upgrade) else {
            trace!(tone = %payload.tone, "toast: emitter detached, skipping");
            return;
        };
        ToastBus { registry }.publish(payload);
    }

    pub fn toast_success(&self, message: impl Into<String>, duration_ms: Option<u64>) {
        self.emit(ToastTone::Success, message, duration_ms);
    }

    pub fn toast_info(&self, message: impl Into<String>, duration_ms: Option<u64>) {
        self.emit(ToastTone::Info, message, duration_ms);
    }

    pub fn toast_warning(&self, message: impl Into<String>, duration_ms: Option<u64>) {
        self.emit(ToastTone::Warning, message, duration_ms);
    }

    pub fn toast_error(&self, message: impl Into<String>, duration_ms: Option<u64>) {
        self.emit(ToastTone::Error, message, duration_ms);
    }

    fn emit(&self, tone: ToastTone, message: impl Into<String>, duration_ms: Option<u64>) {
        self.toast(ToastPayload::new(tone, message).with_duration_ms(duration_ms));
    }
}

#[cfg(test)]
#[path = "tests/toast_tests.rs"]
mod tests;
