use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use tracing::{info, warn};

use playvault::auth::{profile_key, SessionEvent, SessionManager};
use playvault::player::PlayerProfile;
use playvault::store::SlotStore;
use playvault::{Config, CredentialStore};

fn main() {
    // Load configuration
    let config = match Config::load("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            Config::default()
        }
    };

    // Initialize logging
    if let Err(e) = playvault::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        playvault::logging::init_console_only(&config.logging.level);
    }

    info!("PLAYVAULT - local account and save-profile vault");

    if let Err(e) = run(&config) {
        eprintln!("Fatal: {e}");
        std::process::exit(1);
    }
}

fn run(config: &Config) -> playvault::Result<()> {
    let store = SlotStore::open(&config.storage.path)?;
    let credentials = CredentialStore::open(store.clone())?;
    let mut session = SessionManager::new(credentials);

    seed_test_account(&mut session, config);

    // The live profile, shared between the command loop and the logout
    // observer. The logout notification fires while the outgoing user is
    // still known, so the observer can persist their in-flight changes.
    let live_profile: Rc<RefCell<Option<PlayerProfile>>> = Rc::new(RefCell::new(None));

    session.subscribe(|event| {
        if let SessionEvent::LoggedIn(user) = event {
            println!("Welcome back, {}!", user.username);
        }
    });

    {
        let live = Rc::clone(&live_profile);
        let profile_store = store.clone();
        session.subscribe(move |event| {
            if let SessionEvent::LoggedOut(user) = event {
                if let Some(profile) = live.borrow_mut().take() {
                    match profile_store.save(&profile_key(&user.player_id), &profile) {
                        Ok(()) => println!("Progress saved. See you soon, {}.", user.username),
                        Err(e) => eprintln!("Could not save progress: {e}"),
                    }
                }
            }
        });
    }

    println!("Type 'help' for commands.");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let tokens: Vec<&str> = line.split_whitespace().collect();

        match tokens.as_slice() {
            [] => {}
            ["help"] => print_help(),
            ["register", username, password] => match session.register(username, password) {
                Ok(()) => println!("Registration successful. Please login."),
                Err(e) => println!("Register failed: {e}"),
            },
            ["login", username, password] => match session.login(username, password) {
                Ok(()) => {
                    if let Some(player_id) =
                        session.current_user().map(|u| u.player_id.clone())
                    {
                        let profile = session.load_profile(&player_id)?;
                        *live_profile.borrow_mut() = Some(profile);
                    }
                }
                Err(e) => println!("Login failed: {e}"),
            },
            ["logout"] => session.logout(),
            ["whoami"] => match session.current_user() {
                Some(user) => {
                    let since = playvault::datetime::format_timestamp(
                        &user.created_at,
                        &config.display.timezone,
                        "%Y/%m/%d %H:%M",
                    );
                    println!("{} (player {}), registered {}", user.username, user.player_id, since);
                }
                None => println!("Not logged in."),
            },
            ["stats"] => match &*live_profile.borrow() {
                Some(p) => print_stats(p),
                None => println!("Not logged in."),
            },
            ["train"] => match &mut *live_profile.borrow_mut() {
                Some(p) => {
                    p.take_damage(5.0);
                    let levels = p.gain_experience(40.0);
                    if levels > 0 {
                        println!("Level up! You are now level {}.", p.level);
                    } else {
                        println!(
                            "Training... {:.0}/{:.0} exp to level {}.",
                            p.current_exp,
                            p.next_level_exp,
                            p.level + 1
                        );
                    }
                }
                None => println!("Not logged in."),
            },
            ["rest"] => match &mut *live_profile.borrow_mut() {
                Some(p) => {
                    p.revive();
                    p.recover_mana(p.max_mana);
                    println!("You rest by the campfire. Vitals restored.");
                }
                None => println!("Not logged in."),
            },
            ["quit"] | ["exit"] => break,
            _ => println!("Unknown command. Type 'help' for commands."),
        }
    }

    // Saves through the logout observer if a session is still active.
    session.logout();
    Ok(())
}

/// Create the development test account if configured and missing.
fn seed_test_account(session: &mut SessionManager, config: &Config) {
    let account = &config.test_account;
    if !account.enabled {
        return;
    }
    if session.credentials().exists(&account.username) {
        info!("Test account '{}' already exists", account.username);
        return;
    }

    match session.register(&account.username, &account.password) {
        Ok(()) => info!(
            "Created test account - login with username '{}', password '{}'",
            account.username, account.password
        ),
        Err(e) => warn!("Could not create test account: {e}"),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  register <username> <password>   create an account");
    println!("  login <username> <password>      start a session");
    println!("  logout                           end the session (saves progress)");
    println!("  whoami                           show the logged-in account");
    println!("  stats                            show the loaded profile");
    println!("  train                            gain experience (costs a little health)");
    println!("  rest                             restore health and mana");
    println!("  quit                             save and exit");
}

fn print_stats(profile: &PlayerProfile) {
    println!("Level {} ({})", profile.level, profile.username);
    println!("  HP   {:.0}/{:.0}", profile.health, profile.max_health);
    println!("  MP   {:.0}/{:.0}", profile.mana, profile.max_mana);
    println!("  EXP  {:.0}/{:.0}", profile.current_exp, profile.next_level_exp);
    println!(
        "  DMG  {:.1} (crit {:.0}% for {:.0}%)",
        profile.base_damage, profile.critical_chance, profile.critical_damage
    );
    println!("  STR  {}  DEX {}", profile.strength, profile.dexterity);
}
