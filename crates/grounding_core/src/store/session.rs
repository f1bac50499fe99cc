//! Owning application session.
//!
//! # Responsibility
//! - Hold the canonical in-memory `AppState` for one execution context.
//! - Write the whole document through after every mutation.
//!
//! # Invariants
//! - Phases move `Uninitialized -> Hydrated -> Dirty <-> Persisted`.
//! - Mutations before `hydrate()` are rejected so a default document never
//!   clobbers a persisted one.
//! - Mutations apply to a copy and commit only on success.
//! - A failed write leaves the phase at `Dirty`; memory stays authoritative.

use crate::model::state::AppState;
use crate::repo::record_repo::RecordRepository;
use crate::service::ServiceError;
use crate::store::local_store::LocalStore;
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SessionResult<T> = Result<T, SessionError>;

/// Observable persistence phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Constructed; the persisted document has not been read yet.
    Uninitialized,
    /// Loaded (or reset) and not mutated since.
    Hydrated,
    /// Mutated and the last write did not land.
    Dirty,
    /// Last mutation was written through.
    Persisted,
}

impl SessionPhase {
    /// Returns whether the in-memory document matches storage.
    pub fn is_persisted(self) -> bool {
        matches!(self, Self::Hydrated | Self::Persisted)
    }
}

#[derive(Debug)]
pub enum SessionError {
    NotHydrated,
    Service(ServiceError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotHydrated => write!(f, "session is not hydrated; refusing to write"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotHydrated => None,
            Self::Service(err) => Some(err),
        }
    }
}

impl From<ServiceError> for SessionError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

/// Single owner of the application document.
pub struct AppSession<R: RecordRepository> {
    store: LocalStore<R>,
    state: AppState,
    phase: SessionPhase,
}

impl<R: RecordRepository> AppSession<R> {
    /// Creates an unhydrated session holding the default document.
    pub fn new(store: LocalStore<R>) -> Self {
        Self {
            store,
            state: AppState::default(),
            phase: SessionPhase::Uninitialized,
        }
    }

    /// Creates a session and hydrates it immediately.
    pub fn open(store: LocalStore<R>) -> Self {
        let mut session = Self::new(store);
        session.hydrate();
        session
    }

    /// Loads the persisted document once.
    ///
    /// Later calls keep the current in-memory document.
    pub fn hydrate(&mut self) -> &AppState {
        if self.phase != SessionPhase::Uninitialized {
            debug!("event=session_hydrate module=session status=skipped reason=already_hydrated");
            return &self.state;
        }

        self.state = self.store.load(AppState::default());
        self.phase = SessionPhase::Hydrated;
        info!(
            "event=session_hydrate module=session status=ok attached={} drafts={} tasks={} habits={}",
            self.store.is_attached(),
            self.state.drafts.len(),
            self.state.tasks.len(),
            self.state.habits.len()
        );
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn is_hydrated(&self) -> bool {
        self.phase != SessionPhase::Uninitialized
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Applies an infallible mutation and writes the document through.
    pub fn update<T>(&mut self, mutate: impl FnOnce(&mut AppState) -> T) -> SessionResult<T> {
        self.try_update(|state| Ok(mutate(state)))
    }

    /// Applies a fallible mutation and writes the document through on success.
    ///
    /// On error the in-memory document is left exactly as it was.
    pub fn try_update<T>(
        &mut self,
        mutate: impl FnOnce(&mut AppState) -> Result<T, ServiceError>,
    ) -> SessionResult<T> {
        if !self.is_hydrated() {
            return Err(SessionError::NotHydrated);
        }

        let mut next = self.state.clone();
        let output = mutate(&mut next)?;
        self.state = next;
        self.phase = SessionPhase::Dirty;

        if self.store.save(&self.state) {
            self.phase = SessionPhase::Persisted;
        }
        Ok(output)
    }

    /// Removes the persisted record and reinitializes memory to the default
    /// document. The session stays hydrated.
    ///
    /// Returns whether the record removal landed. When it did not, the old
    /// document is still stored and the phase is `Dirty`.
    pub fn reset(&mut self) -> bool {
        let removed = self.store.reset();
        self.state = AppState::default();
        self.phase = if removed {
            SessionPhase::Hydrated
        } else {
            SessionPhase::Dirty
        };
        info!("event=session_reset module=session status=ok removed={removed}");
        removed
    }

    /// Consumes the session, returning the final in-memory document.
    pub fn into_state(self) -> AppState {
        self.state
    }
}
