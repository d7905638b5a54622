use chrono::Utc;
use clap::Args;
use promptonium_core::history::seeded_sample;
use promptonium_core::leaderboard::{self, Timeframe};
use promptonium_core::{Catalog, Config};

#[derive(Args)]
pub struct LeaderboardArgs {
    /// Restrict to one challenge ID
    #[arg(long)]
    pub challenge: Option<String>,
    /// all_time, this_week or this_month
    #[arg(long, default_value = "all_time")]
    pub timeframe: Timeframe,
    /// Maximum number of entries
    #[arg(long, default_value = "10")]
    pub limit: usize,
    /// Show the fixed demo board instead of the sample history
    #[arg(long)]
    pub demo: bool,
}

pub fn run(args: LeaderboardArgs) -> Result<(), Box<dyn std::error::Error>> {
    let entries = if args.demo {
        let mut board = leaderboard::demo();
        board.truncate(args.limit);
        board
    } else {
        let config = Config::load()?;
        let catalog = Catalog::builtin();
        if let Some(id) = &args.challenge {
            catalog.get(id)?;
        }
        let now = Utc::now();
        let records = seeded_sample(
            config.history.seed,
            config.history.sample_attempts as usize,
            &catalog,
            now,
        );
        leaderboard::rank(
            &records,
            args.challenge.as_deref(),
            args.timeframe,
            args.limit,
            now,
        )
    };
    println!("{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
