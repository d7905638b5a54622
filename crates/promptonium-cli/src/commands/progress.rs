use chrono::Utc;
use clap::Args;
use promptonium_core::history::{seeded_achievements, seeded_sample};
use promptonium_core::progress::ProgressReport;
use promptonium_core::{Catalog, Config};

#[derive(Args)]
pub struct ProgressArgs {
    /// Username to report on
    #[arg(long, default_value = "demo_user")]
    pub user: String,
}

pub fn run(args: ProgressArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let catalog = Catalog::builtin();
    let now = Utc::now();
    let records = seeded_sample(
        config.history.seed,
        config.history.sample_attempts as usize,
        &catalog,
        now,
    );
    let awards = seeded_achievements(config.history.seed, now);
    let report = ProgressReport::build(&args.user, &records, &awards, &catalog);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
