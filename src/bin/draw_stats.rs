use clap::Parser;
use gift_draw::core::draw::{draw_with_rng, validate_draw_input};
use gift_draw::utils::logger;
use gift_draw::{AppError, DrawError, ExclusionPair, ImpossibleReason, Participant};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;

#[derive(Parser)]
#[command(name = "draw-stats")]
#[command(about = "Run many seeded draws and report how evenly assignments are spread")]
struct Args {
    /// Number of participants (ids p1..pN)
    #[arg(short, long, default_value = "4")]
    participants: usize,

    /// Exclusions as colon-separated id pairs, e.g. p1:p2
    #[arg(short, long, value_delimiter = ',')]
    exclude: Vec<String>,

    /// Number of draws to run
    #[arg(short, long, default_value = "10000")]
    rounds: usize,

    #[arg(long, default_value = "1000")]
    max_attempts: usize,

    #[arg(long, default_value = "42")]
    seed: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn parse_exclusion(raw: &str) -> anyhow::Result<ExclusionPair> {
    let (first, second) = raw
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("exclusion '{}' must look like a:b", raw))?;
    Ok(ExclusionPair::new(first.trim(), second.trim()))
}

#[derive(Debug, Default)]
struct RoundStats {
    histogram: BTreeMap<String, usize>,
    total_attempts: usize,
    exhausted: usize,
}

impl RoundStats {
    fn successes(&self) -> usize {
        self.histogram.values().sum()
    }
}

/// Runs `rounds` seeded draws. Bad input and proven infeasibility stop the
/// run; only an exhausted attempt budget is counted and the run continues.
fn run_rounds(
    participants: &[Participant],
    exclusions: &[ExclusionPair],
    rounds: usize,
    max_attempts: usize,
    seed: u64,
) -> Result<RoundStats, DrawError> {
    validate_draw_input(participants, exclusions, max_attempts)?;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut stats = RoundStats::default();

    for _ in 0..rounds {
        match draw_with_rng(participants, exclusions, max_attempts, &mut rng) {
            Ok(outcome) => {
                stats.total_attempts += outcome.attempts;
                let key = outcome
                    .assignment
                    .iter()
                    .map(|(giver, receiver)| format!("{}→{}", giver, receiver))
                    .collect::<Vec<_>>()
                    .join(" ");
                *stats.histogram.entry(key).or_default() += 1;
            }
            Err(DrawError::ImpossibleAssignment {
                reason: ImpossibleReason::AttemptBudgetExhausted { .. },
                ..
            }) => {
                stats.exhausted += 1;
            }
            // 無解或輸入錯誤，不需要再跑
            Err(e) => return Err(e),
        }
    }

    Ok(stats)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let participants: Vec<Participant> = (1..=args.participants)
        .map(|i| Participant::new(format!("p{}", i), format!("Participant {}", i)))
        .collect();
    let exclusions = args
        .exclude
        .iter()
        .map(String::as_str)
        .map(parse_exclusion)
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::info!(
        "Running {} draws over {} participants with {} exclusions (seed {})",
        args.rounds,
        participants.len(),
        exclusions.len(),
        args.seed
    );

    let stats = match run_rounds(&participants, &exclusions, args.rounds, args.max_attempts, args.seed) {
        Ok(stats) => stats,
        Err(e) => {
            let e = AppError::from(e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let successes = stats.successes();
    println!(
        "📊 {} distinct assignments over {} successful draws",
        stats.histogram.len(),
        successes
    );
    if successes > 0 {
        println!(
            "   mean attempts per draw: {:.2}",
            stats.total_attempts as f64 / successes as f64
        );
        let expected = successes as f64 / stats.histogram.len() as f64;
        for (assignment, count) in &stats.histogram {
            println!(
                "   {:>6}  ({:+.1}% vs uniform)  {}",
                count,
                (*count as f64 / expected - 1.0) * 100.0,
                assignment
            );
        }
    }
    if stats.exhausted > 0 {
        println!("⚠️  {} draws exhausted the attempt budget", stats.exhausted);
    }

    Ok(())
}
