use salvo::{init_logging, Autopilot, EventLog, GameSession, SessionConfig};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <seed>", args[0]);
        std::process::exit(1);
    }
    let seed: u64 = args[1].parse()?;

    let log = EventLog::new();
    let mut session = GameSession::with_sink(SessionConfig::seeded(seed), Box::new(log.clone()));
    let summary = Autopilot::new(seed.wrapping_add(1)).play_out(&mut session)?;

    let result = json!({
        "seed": seed,
        "outcome": summary.outcome,
        "player_shots": summary.player_shots,
        "enemy_shots": summary.enemy_shots,
        "events": log.len(),
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
