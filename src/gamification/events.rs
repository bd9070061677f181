//! Transient gamification notifications
//!
//! XP popups and badge-unlock toasts are shown for a fixed time and then
//! expire on their own. Every expiry timer is a Tokio task whose abort handle
//! is kept in the registry, so [`TransientEvents::cancel_all`] and dropping
//! the registry stop all of them.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::AbortHandle;

use super::badges::Badge;
use crate::config::NotificationSettings;

/// Identifier of a transient event, unique per registry
pub type EventId = u64;

/// A short-lived UI notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransientEvent {
    /// "+N XP" popup
    XpGain { id: EventId, amount: u64 },
    /// Badge unlock toast
    BadgeUnlocked { id: EventId, badge: Badge },
}

impl TransientEvent {
    pub fn id(&self) -> EventId {
        match self {
            Self::XpGain { id, .. } | Self::BadgeUnlocked { id, .. } => *id,
        }
    }
}

/// Fan-out message for subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventNotice {
    Shown(TransientEvent),
    Expired(TransientEvent),
    /// All events dropped at once (session ended)
    Cleared,
}

#[derive(Default)]
struct Registry {
    next_id: EventId,
    xp_popup: Option<(EventId, u64)>,
    badge_toasts: Vec<(EventId, Badge)>,
    timers: HashMap<EventId, AbortHandle>,
}

impl Registry {
    fn allocate_id(&mut self) -> EventId {
        self.next_id += 1;
        self.next_id
    }

    fn cancel_timer(&mut self, id: EventId) {
        if let Some(handle) = self.timers.remove(&id) {
            handle.abort();
        }
    }

    /// Remove the event with `id` if it is still active
    fn expire(&mut self, id: EventId) -> Option<TransientEvent> {
        self.timers.remove(&id);

        if let Some((popup_id, amount)) = self.xp_popup {
            if popup_id == id {
                self.xp_popup = None;
                return Some(TransientEvent::XpGain { id, amount });
            }
        }

        let index = self.badge_toasts.iter().position(|(toast_id, _)| *toast_id == id)?;
        let (_, badge) = self.badge_toasts.remove(index);
        Some(TransientEvent::BadgeUnlocked { id, badge })
    }
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Registry of visible transient events and their expiry timers
pub struct TransientEvents {
    registry: Arc<Mutex<Registry>>,
    notices: broadcast::Sender<EventNotice>,
    xp_ttl: Duration,
    badge_ttl: Duration,
}

impl TransientEvents {
    pub fn new(settings: &NotificationSettings) -> Self {
        let (notices, _) = broadcast::channel(settings.channel_capacity.max(1));
        Self {
            registry: Arc::new(Mutex::new(Registry::default())),
            notices,
            xp_ttl: Duration::from_millis(settings.xp_popup_ms),
            badge_ttl: Duration::from_millis(settings.badge_toast_ms),
        }
    }

    /// Receive every notice emitted after this call
    pub fn subscribe(&self) -> broadcast::Receiver<EventNotice> {
        self.notices.subscribe()
    }

    /// Show the XP popup. A newer popup replaces the visible one.
    pub fn show_xp_gain(&self, amount: u64) -> EventId {
        let mut registry = lock(&self.registry);
        let id = registry.allocate_id();

        let replaced = registry.xp_popup.replace((id, amount));
        if let Some((old_id, _)) = replaced {
            registry.cancel_timer(old_id);
        }
        self.schedule_expiry(&mut registry, id, self.xp_ttl);
        drop(registry);

        if let Some((old_id, old_amount)) = replaced {
            self.notify(EventNotice::Expired(TransientEvent::XpGain {
                id: old_id,
                amount: old_amount,
            }));
        }
        self.notify(EventNotice::Shown(TransientEvent::XpGain { id, amount }));
        id
    }

    /// Show a badge-unlock toast. Toasts are independent of each other.
    pub fn show_badge_unlock(&self, badge: Badge) -> EventId {
        let mut registry = lock(&self.registry);
        let id = registry.allocate_id();
        registry.badge_toasts.push((id, badge.clone()));
        self.schedule_expiry(&mut registry, id, self.badge_ttl);
        drop(registry);

        self.notify(EventNotice::Shown(TransientEvent::BadgeUnlocked { id, badge }));
        id
    }

    /// Amount shown by the XP popup, if visible
    pub fn xp_popup(&self) -> Option<u64> {
        lock(&self.registry).xp_popup.map(|(_, amount)| amount)
    }

    /// Badges with a visible toast, oldest first
    pub fn badge_toasts(&self) -> Vec<Badge> {
        lock(&self.registry)
            .badge_toasts
            .iter()
            .map(|(_, badge)| badge.clone())
            .collect()
    }

    /// Number of expiry timers still pending
    pub fn pending_timers(&self) -> usize {
        lock(&self.registry).timers.len()
    }

    /// Abort every pending timer and hide all events
    pub fn cancel_all(&self) -> usize {
        let mut registry = lock(&self.registry);
        let cancelled = registry.timers.len();
        for (_, handle) in registry.timers.drain() {
            handle.abort();
        }
        registry.xp_popup = None;
        registry.badge_toasts.clear();
        drop(registry);

        self.notify(EventNotice::Cleared);
        cancelled
    }

    fn schedule_expiry(&self, registry: &mut Registry, id: EventId, ttl: Duration) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!(
                "[learnit:events] No Tokio runtime, event {} will not expire on its own",
                id
            );
            return;
        };

        let shared = Arc::clone(&self.registry);
        let notices = self.notices.clone();
        let task = runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            let expired = lock(&shared).expire(id);
            if let Some(event) = expired {
                // no subscribers is fine
                let _ = notices.send(EventNotice::Expired(event));
            }
        });
        registry.timers.insert(id, task.abort_handle());
    }

    fn notify(&self, notice: EventNotice) {
        let _ = self.notices.send(notice);
    }
}

impl Drop for TransientEvents {
    fn drop(&mut self) {
        for (_, handle) in lock(&self.registry).timers.drain() {
            handle.abort();
        }
    }
}
