//! Session management for PLAYVAULT.
//!
//! [`SessionManager`] owns the single current-session identity, delegates
//! credential checks to [`CredentialStore`], notifies observers of login
//! and logout, and persists save profiles keyed by player id.
//!
//! The manager is an explicitly constructed value: the composition root
//! builds one and hands it to whichever components need it. Nothing here
//! is a global.

use tracing::{debug, info, warn};

use crate::auth::credentials::{profile_key, AuthError, CredentialStore, RegisterError, UserRecord};
use crate::player::PlayerProfile;
use crate::store::{SlotStore, StorageError};

/// A session state change delivered to observers.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A user logged in; carries the authenticated record.
    LoggedIn(UserRecord),
    /// A user logged out; carries the outgoing record, delivered before
    /// the session reference is cleared so observers can persist that
    /// user's in-flight state.
    LoggedOut(UserRecord),
}

impl SessionEvent {
    /// The user the event is about.
    pub fn user(&self) -> &UserRecord {
        match self {
            SessionEvent::LoggedIn(user) | SessionEvent::LoggedOut(user) => user,
        }
    }
}

/// Handle returned by [`SessionManager::subscribe`], used to unsubscribe.
pub type ObserverId = u64;

type Observer = Box<dyn FnMut(&SessionEvent)>;

/// Session identity and profile-persistence orchestration.
///
/// Two states: logged out (initial) and logged in. Registration never
/// changes session state; login and logout notify observers synchronously,
/// in subscription order, before the triggering call returns.
pub struct SessionManager {
    credentials: CredentialStore,
    store: SlotStore,
    current_user: Option<UserRecord>,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: ObserverId,
}

impl SessionManager {
    /// Create a session manager over an opened credential registry.
    pub fn new(credentials: CredentialStore) -> Self {
        let store = credentials.store().clone();
        Self {
            credentials,
            store,
            current_user: None,
            observers: Vec::new(),
            next_observer: 0,
        }
    }

    /// The credential registry, for read-only queries.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Currently logged-in user, if any.
    pub fn current_user(&self) -> Option<&UserRecord> {
        self.current_user.as_ref()
    }

    /// Whether a user is logged in.
    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    /// Subscribe to session events. Delivery is synchronous and follows
    /// subscription order.
    pub fn subscribe(&mut self, observer: impl FnMut(&SessionEvent) + 'static) -> ObserverId {
        let id = self.next_observer;
        self.next_observer += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove a previously subscribed observer. Returns `false` if the
    /// handle is unknown.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(oid, _)| *oid != id);
        self.observers.len() != before
    }

    /// Register a new account. Never changes session state.
    pub fn register(&mut self, username: &str, password: &str) -> Result<(), RegisterError> {
        self.credentials.register(username, password)?;
        Ok(())
    }

    /// Authenticate and start a session, notifying observers.
    ///
    /// A login while a session is already active replaces it without a
    /// logout notification; callers that need one must log out first.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        let user = self.credentials.authenticate(username, password)?;

        if let Some(previous) = &self.current_user {
            warn!(
                "Login by '{}' while '{}' is logged in; session replaced",
                user.username, previous.username
            );
        }

        info!("User '{}' logged in", user.username);
        self.current_user = Some(user.clone());
        self.notify(&SessionEvent::LoggedIn(user));
        Ok(())
    }

    /// End the current session, notifying observers with the outgoing
    /// user before the session is cleared. No-op when logged out.
    pub fn logout(&mut self) {
        let Some(user) = self.current_user.clone() else {
            return;
        };

        info!("User '{}' logged out", user.username);
        self.notify(&SessionEvent::LoggedOut(user));
        self.current_user = None;
    }

    /// Persist a profile to the player's slot, unconditionally.
    ///
    /// Profile contents are not validated; that is the caller's concern.
    pub fn save_profile(
        &self,
        player_id: &str,
        profile: &PlayerProfile,
    ) -> Result<(), StorageError> {
        self.store.save(&profile_key(player_id), profile)?;
        debug!("Saved profile for player '{}'", player_id);
        Ok(())
    }

    /// Load the player's profile, or a default one if none is saved.
    ///
    /// The synthesized default is not persisted; the slot stays absent
    /// until the caller saves. Storage failure is an error, never "no
    /// data".
    pub fn load_profile(&self, player_id: &str) -> Result<PlayerProfile, StorageError> {
        match self.store.load(&profile_key(player_id))? {
            Some(profile) => Ok(profile),
            None => {
                debug!("No saved profile for player '{}', using defaults", player_id);
                Ok(PlayerProfile::default())
            }
        }
    }

    fn notify(&mut self, event: &SessionEvent) {
        for (_, observer) in self.observers.iter_mut() {
            observer(event);
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("current_user", &self.current_user.as_ref().map(|u| &u.username))
            .field("observers", &self.observers.len())
            .finish()
    }
}
