//! End-to-end tests for the account and save-profile flow.
//!
//! Drives the public `SessionManager` surface the way the game client
//! does: register, login, observe notifications, load/save profiles,
//! logout.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use playvault::auth::{profile_key, SessionEvent, SessionManager};
use playvault::player::PlayerProfile;
use playvault::store::SlotStore;
use playvault::CredentialStore;

fn new_session(dir: &Path) -> SessionManager {
    let store = SlotStore::open(dir).unwrap();
    let credentials = CredentialStore::open(store).unwrap();
    SessionManager::new(credentials)
}

/// Registering a taken username fails regardless of letter casing, and the
/// failed attempt leaves the durable account count unchanged.
#[test]
fn test_duplicate_registration_any_casing() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = new_session(dir.path());

    session.register("bob", "pw1").unwrap();
    assert!(session.register("bob", "pw2").is_err());
    assert!(session.register("BOB", "pw2").is_err());
    assert!(session.register("Bob", "pw2").is_err());

    // Reopen from disk: exactly one durable account.
    drop(session);
    let session = new_session(dir.path());
    assert_eq!(session.credentials().len(), 1);
}

/// Authenticating with the registered password succeeds and yields the
/// player id produced at registration.
#[test]
fn test_authenticate_returns_matching_player_id() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = new_session(dir.path());

    session.register("alice", "s3cret").unwrap();
    let registered = session.credentials().authenticate("alice", "s3cret").unwrap();

    session.login("alice", "s3cret").unwrap();
    assert_eq!(
        session.current_user().unwrap().player_id,
        registered.player_id
    );
}

#[test]
fn test_wrong_password_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = new_session(dir.path());

    session.register("alice", "s3cret").unwrap();
    assert!(session.login("alice", "s3cret2").is_err());
    assert!(!session.is_logged_in());
}

/// Username lookup ignores case: registering "Alice" allows logging in as
/// "alice" or "ALICE" with the correct password.
#[test]
fn test_login_username_case_insensitive() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = new_session(dir.path());

    session.register("Alice", "s3cret").unwrap();

    session.login("alice", "s3cret").unwrap();
    assert_eq!(session.current_user().unwrap().username, "Alice");
    session.logout();

    session.login("ALICE", "s3cret").unwrap();
    assert!(session.is_logged_in());
}

/// Loading a profile for a player with no save returns the documented
/// default and does not create a durable entry as a side effect.
#[test]
fn test_missing_profile_loads_default_without_side_effect() {
    let dir = tempfile::tempdir().unwrap();
    let session = new_session(dir.path());
    let store = SlotStore::open(dir.path()).unwrap();

    let first = session.load_profile("no-such-player").unwrap();
    assert_eq!(first, PlayerProfile::default());
    assert_eq!(first.level, 1);
    assert_eq!(first.health, 100.0);
    assert_eq!(first.mana, 50.0);

    // Not persisted: a second load still synthesizes the same default.
    assert!(!store.exists(&profile_key("no-such-player")));
    let second = session.load_profile("no-such-player").unwrap();
    assert_eq!(second, first);
}

/// Saving then loading a profile returns it equal in every field.
#[test]
fn test_profile_save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let session = new_session(dir.path());

    let mut profile = PlayerProfile::for_player("p-42", "alice");
    profile.gain_experience(260.0);
    profile.take_damage(41.5);
    profile.spend_mana(12.0);
    profile.base_damage = 9.5;
    profile.critical_chance = 12.0;
    profile.strength = 6;
    profile.dexterity = 3;

    session.save_profile("p-42", &profile).unwrap();
    let loaded = session.load_profile("p-42").unwrap();
    assert_eq!(loaded, profile);
}

/// Logout while logged out is a no-op: no notification fires and the
/// session stays usable.
#[test]
fn test_logout_while_logged_out_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = new_session(dir.path());

    let fired = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&fired);
    session.subscribe(move |_| *sink.borrow_mut() += 1);

    session.logout();
    assert_eq!(*fired.borrow(), 0);

    assert!(session.load_profile("anyone").is_ok());
    assert!(!session.is_logged_in());
}

/// Registration seeds a default profile slot for the new player id.
#[test]
fn test_registration_seeds_profile_slot() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = new_session(dir.path());

    session.register("alice", "s3cret").unwrap();
    let record = session.credentials().authenticate("alice", "s3cret").unwrap();

    let store = SlotStore::open(dir.path()).unwrap();
    assert!(store.exists(&profile_key(&record.player_id)));

    let profile = session.load_profile(&record.player_id).unwrap();
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.id, record.player_id);
    assert_eq!(profile.level, 1);
}

/// Accounts survive a restart: register, drop everything, reopen from the
/// same directory, authenticate.
#[test]
fn test_accounts_survive_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut session = new_session(dir.path());
        session.register("bob", "pw1").unwrap();
    }

    let mut session = new_session(dir.path());
    session.login("bob", "pw1").unwrap();
    assert_eq!(session.current_user().unwrap().username, "bob");
}

/// The full scenario: register bob, duplicate registration fails, wrong
/// password fails, correct login notifies with bob's player id, logout
/// notifies with the same user, and the session ends logged out.
#[test]
fn test_full_register_login_logout_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = new_session(dir.path());

    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    session.subscribe(move |event| {
        let line = match event {
            SessionEvent::LoggedIn(user) => format!("in:{}", user.player_id),
            SessionEvent::LoggedOut(user) => format!("out:{}", user.player_id),
        };
        sink.borrow_mut().push(line);
    });

    session.register("bob", "pw1").unwrap();
    assert!(session.register("bob", "pw2").is_err());
    assert!(session.login("bob", "pw2").is_err());

    session.login("bob", "pw1").unwrap();
    let player_id = session.current_user().unwrap().player_id.clone();

    session.logout();
    assert!(!session.is_logged_in());

    assert_eq!(
        *events.borrow(),
        vec![format!("in:{player_id}"), format!("out:{player_id}")]
    );
}

/// The logout observer can persist the outgoing user's profile, and the
/// save is visible on the next login. This is the save-on-logout wiring
/// the game client uses.
#[test]
fn test_logout_observer_saves_outgoing_profile() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = new_session(dir.path());

    session.register("bob", "pw1").unwrap();
    session.login("bob", "pw1").unwrap();
    let player_id = session.current_user().unwrap().player_id.clone();

    let mut profile = session.load_profile(&player_id).unwrap();
    profile.gain_experience(50.0);
    profile.take_damage(30.0);

    let live = Rc::new(RefCell::new(Some(profile.clone())));
    let store = SlotStore::open(dir.path()).unwrap();
    let slot = Rc::clone(&live);
    session.subscribe(move |event| {
        if let SessionEvent::LoggedOut(user) = event {
            if let Some(p) = slot.borrow_mut().take() {
                store.save(&profile_key(&user.player_id), &p).unwrap();
            }
        }
    });

    session.logout();

    session.login("bob", "pw1").unwrap();
    let restored = session.load_profile(&player_id).unwrap();
    assert_eq!(restored, profile);
    assert_eq!(restored.current_exp, 50.0);
    assert_eq!(restored.health, 70.0);
}
