//! System color-scheme preference: the [`Theme`] value, the injectable
//! [`PreferenceSource`] capability, and the [`ThemePreferenceWatcher`] that a
//! code-block viewer owns for its mount lifetime.
//!
//! A preference source is push-based. The watcher reads [`PreferenceSource::current`]
//! once, synchronously, then only reacts to notifications delivered through the
//! handler it registered with [`PreferenceSource::on_change`]. The returned
//! [`Subscription`] is an RAII guard: dropping it (or calling
//! [`Subscription::unsubscribe`]) removes the handler, so a torn-down viewer
//! never receives another update.
//!
//! Hosts without a preference API are modelled by [`NoPreference`]; the watcher
//! falls back to [`Theme::Dark`] and never fails.

use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Color scheme a content variant is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub const ALL: [Theme; 2] = [Theme::Dark, Theme::Light];

    /// The value used in `data-theme` attributes and config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    /// Map a `prefers-color-scheme: dark` match result onto a theme.
    pub fn from_dark_match(matches: bool) -> Self {
        if matches { Theme::Dark } else { Theme::Light }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseThemeError(pub String);

impl fmt::Display for ParseThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown theme '{}' (expected dark or light)", self.0)
    }
}

impl std::error::Error for ParseThemeError {}

impl FromStr for Theme {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            other => Err(ParseThemeError(other.to_string())),
        }
    }
}

/// Callback invoked with the new theme on every preference change.
pub type ThemeHandler = Box<dyn FnMut(Theme)>;

/// Handle to a registered preference listener.
///
/// Unsubscribes exactly once: either explicitly via [`unsubscribe`](Self::unsubscribe)
/// or implicitly on drop.
#[must_use = "dropping a Subscription immediately unsubscribes the handler"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription with nothing to cancel (sources that never push).
    pub fn noop() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(mut self) {
        self.cancel_now();
    }

    fn cancel_now(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel_now();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}

/// Host capability exposing the system light/dark preference.
pub trait PreferenceSource {
    /// Current preference, or `None` when the host has no way to tell.
    fn current(&self) -> Option<Theme>;

    /// Register `handler` for push notifications of preference changes.
    fn on_change(&self, handler: ThemeHandler) -> Subscription;
}

/// A host that offers no preference API at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPreference;

impl PreferenceSource for NoPreference {
    fn current(&self) -> Option<Theme> {
        None
    }

    fn on_change(&self, _handler: ThemeHandler) -> Subscription {
        Subscription::noop()
    }
}

/// A preference that never changes. Used at build time, where the
/// "system preference" is the configured default theme.
#[derive(Debug, Clone, Copy)]
pub struct FixedPreference(pub Theme);

impl PreferenceSource for FixedPreference {
    fn current(&self) -> Option<Theme> {
        Some(self.0)
    }

    fn on_change(&self, _handler: ThemeHandler) -> Subscription {
        Subscription::noop()
    }
}

type SharedHandler = Rc<RefCell<ThemeHandler>>;

struct MemorySourceInner {
    current: Theme,
    next_id: u64,
    handlers: Vec<(u64, SharedHandler)>,
}

/// In-memory, deterministic preference source.
///
/// Clones share state, so a test can keep one handle to drive
/// [`set`](Self::set) while a viewer holds another.
#[derive(Clone)]
pub struct MemoryPreferenceSource {
    inner: Rc<RefCell<MemorySourceInner>>,
}

impl MemoryPreferenceSource {
    pub fn new(initial: Theme) -> Self {
        Self {
            inner: Rc::new(RefCell::new(MemorySourceInner {
                current: initial,
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Change the preference and notify every live listener.
    ///
    /// Setting the same value again is not a change and notifies nobody.
    pub fn set(&self, theme: Theme) {
        let snapshot: Vec<SharedHandler> = {
            let mut inner = self.inner.borrow_mut();
            if inner.current == theme {
                return;
            }
            inner.current = theme;
            inner.handlers.iter().map(|(_, h)| Rc::clone(h)).collect()
        };
        tracing::trace!(%theme, listeners = snapshot.len(), "preference changed");
        // Borrow released above: handlers may subscribe or unsubscribe.
        for handler in snapshot {
            match handler.try_borrow_mut() {
                Ok(mut h) => (*h)(theme),
                Err(_) => tracing::warn!(%theme, "skipping re-entrant preference handler"),
            }
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}

impl fmt::Debug for MemoryPreferenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("MemoryPreferenceSource")
            .field("current", &inner.current)
            .field("listeners", &inner.handlers.len())
            .finish()
    }
}

impl PreferenceSource for MemoryPreferenceSource {
    fn current(&self) -> Option<Theme> {
        Some(self.inner.borrow().current)
    }

    fn on_change(&self, handler: ThemeHandler) -> Subscription {
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.handlers.push((id, Rc::new(RefCell::new(handler))));
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().handlers.retain(|(hid, _)| *hid != id);
            }
        })
    }
}

/// Tracks the active theme for one widget.
///
/// Reads the starting value synchronously, then follows push notifications.
/// Dropping the watcher drops its subscription.
pub struct ThemePreferenceWatcher {
    current: Rc<Cell<Theme>>,
    subscription: Option<Subscription>,
}

impl ThemePreferenceWatcher {
    /// Theme used when the host cannot report a preference.
    pub const FALLBACK: Theme = Theme::Dark;

    /// Start watching `source`. `on_change` runs after the watcher's own
    /// value has been updated, so it always observes the new theme.
    pub fn watch(source: &dyn PreferenceSource, mut on_change: impl FnMut(Theme) + 'static) -> Self {
        let initial = source.current().unwrap_or(Self::FALLBACK);
        let current = Rc::new(Cell::new(initial));
        let tracked = Rc::clone(&current);
        let subscription = source.on_change(Box::new(move |theme| {
            tracked.set(theme);
            on_change(theme);
        }));
        Self {
            current,
            subscription: Some(subscription),
        }
    }

    pub fn current(&self) -> Theme {
        self.current.get()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }

    /// Stop listening. Further preference changes are ignored.
    pub fn stop(&mut self) {
        if let Some(sub) = self.subscription.take() {
            sub.unsubscribe();
        }
    }
}

impl fmt::Debug for ThemePreferenceWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemePreferenceWatcher")
            .field("current", &self.current.get())
            .field("subscribed", &self.subscription.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_parses_case_insensitively() {
        assert_eq!("Dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" light ".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn theme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Theme::Light).unwrap(), "\"light\"");
        let t: Theme = serde_json::from_str("\"dark\"").unwrap();
        assert_eq!(t, Theme::Dark);
    }

    #[test]
    fn dark_match_maps_to_theme() {
        assert_eq!(Theme::from_dark_match(true), Theme::Dark);
        assert_eq!(Theme::from_dark_match(false), Theme::Light);
    }

    #[test]
    fn watcher_reads_initial_preference() {
        let source = MemoryPreferenceSource::new(Theme::Light);
        let watcher = ThemePreferenceWatcher::watch(&source, |_| {});
        assert_eq!(watcher.current(), Theme::Light);
    }

    #[test]
    fn watcher_defaults_to_dark_without_preference_api() {
        let watcher = ThemePreferenceWatcher::watch(&NoPreference, |_| {});
        assert_eq!(watcher.current(), Theme::Dark);
    }

    #[test]
    fn watcher_follows_pushed_changes() {
        let source = MemoryPreferenceSource::new(Theme::Dark);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let watcher = ThemePreferenceWatcher::watch(&source, move |t| sink.borrow_mut().push(t));

        source.set(Theme::Light);
        source.set(Theme::Dark);

        assert_eq!(watcher.current(), Theme::Dark);
        assert_eq!(*seen.borrow(), vec![Theme::Light, Theme::Dark]);
    }

    #[test]
    fn setting_same_theme_does_not_notify() {
        let source = MemoryPreferenceSource::new(Theme::Dark);
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let _watcher = ThemePreferenceWatcher::watch(&source, move |_| c.set(c.get() + 1));

        source.set(Theme::Dark);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn dropping_watcher_unsubscribes() {
        let source = MemoryPreferenceSource::new(Theme::Dark);
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        let watcher = ThemePreferenceWatcher::watch(&source, move |_| c.set(c.get() + 1));
        assert_eq!(source.listener_count(), 1);

        drop(watcher);
        assert_eq!(source.listener_count(), 0);

        source.set(Theme::Light);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn stop_is_idempotent() {
        let source = MemoryPreferenceSource::new(Theme::Dark);
        let mut watcher = ThemePreferenceWatcher::watch(&source, |_| {});
        watcher.stop();
        watcher.stop();
        assert!(!watcher.is_subscribed());
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_source_is_harmless() {
        let source = MemoryPreferenceSource::new(Theme::Dark);
        let sub = source.on_change(Box::new(|_| {}));
        drop(source);
        sub.unsubscribe();
    }

    #[test]
    fn handler_may_unsubscribe_others_during_dispatch() {
        let source = MemoryPreferenceSource::new(Theme::Dark);
        let second: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));
        let slot = Rc::clone(&second);
        let _first = source.on_change(Box::new(move |_| {
            slot.borrow_mut().take();
        }));
        *second.borrow_mut() = Some(source.on_change(Box::new(|_| {})));

        source.set(Theme::Light);
        assert_eq!(source.listener_count(), 1);
    }
}
