//! Theme preference storage and change notification.
//!
//! # Responsibility
//! - Persist the selected theme under its own record, apart from `AppState`.
//! - Notify in-process listeners whenever the theme changes.
//!
//! # Invariants
//! - Missing, unknown or unreadable stored values read as `Theme::Default`.
//! - Persisting is best-effort; listeners are notified even when the write
//!   fails so the active presentation stays in sync with the selection.

use crate::repo::record_repo::RecordRepository;
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Record key holding the theme identifier.
pub const THEME_KEY: &str = "grounding:theme";

/// Closed set of presentation themes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Theme {
    /// Clean and minimal.
    #[default]
    Default,
    /// Focused, calm dark.
    Ink,
    /// Bright color blocking.
    Eighties,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Default, Theme::Ink, Theme::Eighties];

    /// Stable stored identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Ink => "ink",
            Self::Eighties => "80s",
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeParseError(pub String);

impl Display for ThemeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown theme `{}`; expected default|ink|80s", self.0)
    }
}

impl Error for ThemeParseError {}

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str() == value.trim())
            .ok_or_else(|| ThemeParseError(value.to_string()))
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type ThemeListener = Box<dyn Fn(Theme)>;

/// Theme preference store with in-process broadcast.
pub struct ThemeStore<R: RecordRepository> {
    repo: Option<R>,
    listeners: Vec<(ListenerId, ThemeListener)>,
    next_listener: u64,
}

impl<R: RecordRepository> ThemeStore<R> {
    pub fn new(repo: R) -> Self {
        Self {
            repo: Some(repo),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Store with no persistence; `current()` is always the default theme.
    pub fn detached() -> Self {
        Self {
            repo: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Reads the persisted theme, defaulting on any problem.
    pub fn current(&self) -> Theme {
        let Some(repo) = self.repo.as_ref() else {
            return Theme::Default;
        };
        match repo.read_record(THEME_KEY) {
            Ok(Some(raw)) => raw.parse::<Theme>().unwrap_or_else(|_| {
                debug!("event=theme_load module=theme status=fallback reason=unknown_value");
                Theme::Default
            }),
            Ok(None) => Theme::Default,
            Err(err) => {
                warn!("event=theme_load module=theme status=error error={err}");
                Theme::Default
            }
        }
    }

    /// Persists `theme` and notifies listeners. Returns whether the write landed.
    pub fn set(&self, theme: Theme) -> bool {
        let persisted = match self.repo.as_ref() {
            Some(repo) => match repo.write_record(THEME_KEY, theme.as_str()) {
                Ok(()) => true,
                Err(err) => {
                    warn!("event=theme_save module=theme status=dropped theme={theme} error={err}");
                    false
                }
            },
            None => false,
        };

        for (_, listener) in &self.listeners {
            listener(theme);
        }
        debug!(
            "event=theme_change module=theme status=ok theme={theme} listeners={} persisted={persisted}",
            self.listeners.len()
        );
        persisted
    }

    pub fn subscribe(&mut self, listener: impl Fn(Theme) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns whether a listener was removed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}
