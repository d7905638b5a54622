use clap::Subcommand;
use promptonium_core::SessionManager;

/// Sessions are not persisted between invocations; each command shows what
/// the identity stub returns.
#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in (always succeeds with the demo profile)
    Login {
        username: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Register (always succeeds; the demo profile takes the given username)
    Register {
        username: String,
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Log in, then log out again
    Logout,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut sessions = SessionManager::new();
    match action {
        AuthAction::Login { username, password } => {
            let session = sessions.login(&username, &password)?;
            println!("{}", serde_json::to_string_pretty(session)?);
        }
        AuthAction::Register {
            username,
            email,
            password,
        } => {
            let session = sessions.register(&username, &email, &password)?;
            println!("{}", serde_json::to_string_pretty(session)?);
        }
        AuthAction::Logout => {
            sessions.login("demo_user", "")?;
            match sessions.logout() {
                Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
                None => println!("No active session."),
            }
        }
    }
    Ok(())
}
