use clap::Subcommand;
use promptonium_core::timer::format_mmss;
use promptonium_core::{Catalog, Challenge, Difficulty};

#[derive(Subcommand)]
pub enum ChallengeAction {
    /// List challenges in catalog order
    List {
        /// Only show one difficulty (beginner, intermediate, advanced)
        #[arg(long)]
        difficulty: Option<Difficulty>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one challenge as JSON
    Show {
        /// Challenge ID (e.g. "professional_email")
        id: String,
    },
}

fn print_row(c: &Challenge) {
    println!(
        "{:<24} {:<13} {:>6}  {}",
        c.id,
        c.difficulty.as_str(),
        format_mmss(c.time_limit_secs),
        c.title
    );
}

pub fn run(action: ChallengeAction) -> Result<(), Box<dyn std::error::Error>> {
    let catalog = Catalog::builtin();
    match action {
        ChallengeAction::List { difficulty, json } => {
            let challenges: Vec<&Challenge> = match difficulty {
                Some(d) => catalog.by_difficulty(d).collect(),
                None => catalog.all().iter().collect(),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&challenges)?);
            } else if challenges.is_empty() {
                println!("No challenges found.");
            } else {
                for c in challenges {
                    print_row(c);
                }
            }
        }
        ChallengeAction::Show { id } => {
            let challenge = catalog.get(&id)?;
            println!("{}", serde_json::to_string_pretty(challenge)?);
        }
    }
    Ok(())
}
