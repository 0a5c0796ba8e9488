use std::path::PathBuf;

use leasehold::prelude::*;

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

const STORAGE_ENV: &str = "LEASEHOLD_STORAGE";
const DEFAULT_STORAGE: &str = "leasehold-storage.json";

const USAGE: &str = "\
usage: admin-console <command>

commands:
  hash <username> <password>   print the value for LEASEHOLD_ADMIN_PASSWORD_HASH
  login <username> <password>  start an admin session
  status                       show the current session
  logout                       end the session
  flags                        print the resolved feature flags
  check <path>                 ask the gate about a page, e.g. /admin";

type Gate = AccessGate<FileStore, HashedCredential>;

fn storage_path() -> PathBuf {
    std::env::var_os(STORAGE_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE))
}

fn open_gate() -> Result<Gate, LeaseholdError> {
    let credential = HashedCredential::from_env()?;
    let sessions = AdminSessionManager::new(
        FileStore::new(storage_path()),
        credential,
        SessionConfig::default(),
    );
    Ok(AccessGate::new(sessions, FlagResolver::from_process_env()))
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    match args {
        [cmd, user, pass] if cmd == "hash" => {
            println!("{}", HashedCredential::new(user.as_str(), pass).encode());
        }
        [cmd, user, pass] if cmd == "login" => match open_gate()?.login(user, pass) {
            LoginOutcome::Success => println!("logged in as {user}"),
            LoginOutcome::Rejected { message } => {
                eprintln!("{message}");
                std::process::exit(1);
            }
        },
        [cmd] if cmd == "status" => match open_gate()?.sessions().state() {
            AdminState::LoggedIn(session) => println!(
                "logged in as {} since {}",
                session.username,
                session.issued_at.to_rfc3339()
            ),
            AdminState::LoggedOut => println!("logged out"),
        },
        [cmd] if cmd == "logout" => {
            open_gate()?.logout();
            println!("logged out");
        }
        [cmd] if cmd == "flags" => {
            let mut flags = FlagResolver::from_process_env();
            println!("mode: {}", flags.mode());
            println!("{}", serde_json::to_string_pretty(&*flags.get_flags())?);
        }
        [cmd, path] if cmd == "check" => {
            let page = Page::from_path(path).ok_or_else(|| format!("unknown page {path}"))?;
            match open_gate()?.check(page) {
                Access::Allowed => println!("{path}: allowed"),
                Access::RedirectToLogin => {
                    println!("{path}: redirect to {}", Page::AdminLogin.path())
                }
                Access::Disabled(flag) => println!("{path}: disabled ({flag} is off)"),
            }
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(&LoggingConfig {
        level: "warn".to_string(),
        ..LoggingConfig::default()
    })?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    run(&args)
}
