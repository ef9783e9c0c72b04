use std::io::{self, BufRead, Write};

use clap::Parser;
use salvo::cli::{coord_to_string, parse_command, print_session, render_session, turn_label, Command};
use salvo::{
    init_logging, Autopilot, FireReport, GameEvent, GameSession, Orientation, Phase,
    SessionConfig, ShotResult,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Play against the computer in the terminal.
    Play {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Watch a game where both sides fire at random and by hunt-and-kill.
    Watch {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { seed } => {
            if let Some(s) = seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            play(SessionConfig { seed })
        }
        Commands::Watch { seed } => {
            let seed = seed.unwrap_or_else(rand::random);
            println!("Watching game with seed {}", seed);
            let mut session = GameSession::new(SessionConfig::seeded(seed));
            let summary = Autopilot::new(seed.wrapping_add(1)).play_out(&mut session)?;
            print!("{}", render_session(&session));
            println!(
                "Player shots: {}, enemy shots: {}",
                summary.player_shots, summary.enemy_shots
            );
            Ok(())
        }
    }
}

fn play(config: SessionConfig) -> anyhow::Result<()> {
    let mut session = GameSession::with_sink(config, Box::new(announce));
    let mut autopilot = Autopilot::new(config.seed.unwrap_or_else(rand::random));
    print_help();
    print_session(&session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(e) => {
                println!("✗ {}", e);
                continue;
            }
        };
        match command {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::Pause => {
                session.pause();
            }
            Command::Resume => {
                session.resume();
            }
            Command::Restart => {
                session.restart();
                print_session(&session);
            }
            Command::Random => {
                if session.phase() == Phase::Setup && !session.is_paused() {
                    autopilot.place_fleet(&mut session)?;
                    print_session(&session);
                } else {
                    println!("✗ Random placement is only available during setup");
                }
            }
            Command::At { at, orientation } => match session.phase() {
                Phase::Setup => {
                    let orientation = orientation.unwrap_or(Orientation::Horizontal);
                    if session.place_next_ship(orientation, at.x, at.y)? {
                        print_session(&session);
                    } else {
                        println!("✗ Cannot place a ship at {}", coord_to_string(at));
                        println!("   Hint: ships must fit on the board and not touch each other.");
                    }
                }
                Phase::Playing => match session.fire_at_enemy(at.x, at.y)? {
                    Some(report) => {
                        describe(&report);
                        print_session(&session);
                    }
                    None => println!("✗ Shot at {} not accepted", coord_to_string(at)),
                },
                Phase::Finished(_) => println!("The game is over. Type 'restart' or 'quit'."),
            },
        }
    }
    Ok(())
}

fn announce(event: &GameEvent) {
    match event {
        GameEvent::TurnChanged(indicator) => println!("[{}]", turn_label(*indicator)),
        GameEvent::GameStarted => println!("\n✓ All ships placed! Enemy fleet deployed."),
        GameEvent::GameEnded(outcome) => println!("\n*** {:?} ***", outcome),
        GameEvent::Restarted => println!("Game restarted."),
        GameEvent::ShipPlaced { .. } | GameEvent::CellChanged { .. } => {}
    }
}

fn describe(report: &FireReport) {
    if report.ship_sunk {
        println!("💥 SUNK! You destroyed an enemy ship!");
    } else if report.hit {
        println!("🎯 HIT! Fire again.");
    } else {
        println!("💧 Miss.");
    }
    for shot in &report.enemy_shots {
        let at = coord_to_string((shot.x, shot.y).into());
        match shot.result {
            ShotResult::Sunk => println!("💀 Enemy sank your ship at {}", at),
            ShotResult::Hit => println!("⚠️  Enemy hit your ship at {}", at),
            _ => println!("   Enemy missed at {}", at),
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  [place] A5 [H|V]   place the next ship during setup (default H)");
    println!("  [fire] B3          fire at the enemy board during play");
    println!("  random     place the remaining ships at random");
    println!("  pause | resume | restart | help | quit");
}
