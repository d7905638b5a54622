use clap::{Parser, Subcommand};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "promptonium-cli", version, about = "Promptonium prompt-engineering trainer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the challenge catalog
    Challenge {
        #[command(subcommand)]
        action: commands::challenge::ChallengeAction,
    },
    /// Run a timed attempt, streaming events as JSON lines
    Attempt(commands::attempt::AttemptArgs),
    /// Score a prompt immediately, without a countdown
    Evaluate(commands::evaluate::EvaluateArgs),
    /// Show a leaderboard over the sample history
    Leaderboard(commands::leaderboard::LeaderboardArgs),
    /// Show a user's progress report
    Progress(commands::progress::ProgressArgs),
    /// Demo login, registration and logout
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    logging::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Challenge { action } => commands::challenge::run(action),
        Commands::Attempt(args) => commands::attempt::run(args),
        Commands::Evaluate(args) => commands::evaluate::run(args),
        Commands::Leaderboard(args) => commands::leaderboard::run(args),
        Commands::Progress(args) => commands::progress::run(args),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
