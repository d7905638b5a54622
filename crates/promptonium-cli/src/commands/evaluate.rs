use clap::Args;
use promptonium_core::scoring::evaluate_submission;
use promptonium_core::{Catalog, Config, EvaluatorKind, ModelKind};

#[derive(Args)]
pub struct EvaluateArgs {
    /// Challenge ID (e.g. "professional_email")
    pub challenge_id: String,
    /// Prompt text to score
    pub prompt: String,
    /// Model the result is attributed to (openai, claude, gemini)
    #[arg(long)]
    pub model: Option<ModelKind>,
    /// Scoring strategy (simulated, heuristic)
    #[arg(long)]
    pub evaluator: Option<EvaluatorKind>,
    /// RNG seed for the simulated evaluator
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run(args: EvaluateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let catalog = Catalog::builtin();
    let challenge = catalog.get(&args.challenge_id)?;

    let model = args.model.unwrap_or(config.scoring.model);
    let mut evaluator = args
        .evaluator
        .unwrap_or(config.scoring.evaluator)
        .build(model, args.seed.or(config.scoring.seed));

    let result = evaluate_submission(evaluator.as_mut(), &args.prompt, challenge);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
