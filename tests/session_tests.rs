use proptest::prelude::*;
use salvo::{
    Coord, EventLog, GameError, GameEvent, GameSession, Orientation, Outcome, Phase,
    SessionConfig, ShotResult, Side, Turn, TurnIndicator, FLEET, FLEET_SIZE, TOTAL_SHIP_CELLS,
};

fn place_standard_fleet(session: &mut GameSession) -> Result<(), GameError> {
    for (i, &size) in FLEET.iter().enumerate() {
        assert!(session.place_player_ship(size, Orientation::Horizontal, 0, i * 2)?);
    }
    Ok(())
}

fn started(seed: u64) -> Result<GameSession, GameError> {
    let mut session = GameSession::new(SessionConfig::seeded(seed));
    place_standard_fleet(&mut session)?;
    Ok(session)
}

fn enemy_cells(session: &GameSession, occupied: bool) -> Vec<Coord> {
    session
        .enemy_board()
        .cells()
        .filter(|c| c.is_occupied() == occupied)
        .map(|c| c.coord())
        .collect()
}

#[test]
fn test_new_session_is_in_setup() {
    let session = GameSession::new(SessionConfig::seeded(1));
    assert_eq!(session.phase(), Phase::Setup);
    assert_eq!(session.turn(), Turn::Player);
    assert!(!session.is_paused());
    assert_eq!(session.outcome(), None);
    assert_eq!(session.seed(), Some(1));
    assert_eq!(session.ships_to_place(), FLEET_SIZE);
    assert_eq!(session.pending_sizes(), &FLEET);
    assert_eq!(session.next_ship_size(), Some(5));
    assert!(session.player_board().ships().is_empty());
    assert!(session.enemy_board().ships().is_empty());
}

#[test]
fn test_fire_during_setup_is_rejected() -> Result<(), GameError> {
    let mut session = GameSession::new(SessionConfig::seeded(1));
    assert_eq!(session.fire_at_enemy(0, 0)?, None);
    assert!(!session.enemy_board().cell(0, 0)?.was_shot());
    Ok(())
}

#[test]
fn test_full_placement_starts_game() -> Result<(), GameError> {
    let session = started(7)?;
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.turn(), Turn::Player);
    assert_eq!(session.ships_to_place(), 0);
    assert_eq!(session.next_ship_size(), None);
    for board in [session.player_board(), session.enemy_board()] {
        assert_eq!(board.ships_remaining(), FLEET_SIZE);
        assert_eq!(board.ships().len(), FLEET_SIZE);
        assert_eq!(board.occupancy().count_ones(), TOTAL_SHIP_CELLS);
    }
    Ok(())
}

#[test]
fn test_invalid_placements() -> Result<(), GameError> {
    let mut session = GameSession::new(SessionConfig::seeded(1));
    assert_eq!(
        session.place_player_ship(6, Orientation::Horizontal, 0, 0),
        Err(GameError::InvalidShipSize { size: 6 })
    );
    assert!(session.place_player_ship(0, Orientation::Horizontal, 0, 0).is_err());

    assert!(session.place_player_ship(3, Orientation::Horizontal, 0, 0)?);
    // each size can only be placed once
    assert!(!session.place_player_ship(3, Orientation::Horizontal, 0, 5)?);
    // touching the first ship
    assert!(!session.place_player_ship(2, Orientation::Vertical, 3, 0)?);
    // off the board
    assert!(!session.place_player_ship(5, Orientation::Vertical, 9, 6)?);
    assert_eq!(session.ships_to_place(), FLEET_SIZE - 1);
    assert_eq!(session.pending_sizes(), &[5, 4, 2, 1]);
    assert_eq!(session.phase(), Phase::Setup);
    Ok(())
}

#[test]
fn test_place_next_ship_takes_largest() -> Result<(), GameError> {
    let mut session = GameSession::new(SessionConfig::seeded(1));
    assert!(session.place_next_ship(Orientation::Vertical, 0, 0)?);
    assert_eq!(session.player_board().ships()[0].size(), 5);
    assert_eq!(session.next_ship_size(), Some(4));
    Ok(())
}

#[test]
fn test_placement_after_start_is_rejected() -> Result<(), GameError> {
    let mut session = started(3)?;
    assert!(!session.place_player_ship(1, Orientation::Horizontal, 9, 9)?);
    assert!(!session.place_next_ship(Orientation::Horizontal, 9, 9)?);
    Ok(())
}

#[test]
fn test_player_hit_keeps_turn() -> Result<(), GameError> {
    let mut session = started(11)?;
    let target = enemy_cells(&session, true)[0];
    let report = session.fire_at_enemy(target.x, target.y)?.unwrap();
    assert!(report.hit);
    assert!(report.enemy_shots.is_empty());
    assert_eq!(session.turn(), Turn::Player);
    assert!(session.player_board().shots().is_empty());

    // a repeat shot is not accepted
    assert_eq!(session.fire_at_enemy(target.x, target.y)?, None);
    Ok(())
}

#[test]
fn test_player_miss_hands_over_turn() -> Result<(), GameError> {
    let mut session = started(12)?;
    let target = enemy_cells(&session, false)[0];
    let report = session.fire_at_enemy(target.x, target.y)?.unwrap();
    assert!(!report.hit);
    assert!(!report.ship_sunk);
    assert!(!report.enemy_shots.is_empty());
    assert_eq!(
        session.player_board().shots().count_ones(),
        report.enemy_shots.len()
    );
    if !report.game_over {
        assert_eq!(session.turn(), Turn::Player);
        assert_eq!(report.enemy_shots.last().unwrap().result, ShotResult::Miss);
        let hits = report
            .enemy_shots
            .iter()
            .filter(|s| s.result.is_hit())
            .count();
        assert_eq!(hits, session.targeting().hit_cells().len());
    }
    Ok(())
}

#[test]
fn test_sinking_every_ship_wins() -> Result<(), GameError> {
    let mut session = started(21)?;
    let targets = enemy_cells(&session, true);
    assert_eq!(targets.len(), TOTAL_SHIP_CELLS);
    let mut sunk = 0;
    let mut last = None;
    for at in targets {
        let report = session.fire_at_enemy(at.x, at.y)?.unwrap();
        assert!(report.hit);
        assert!(report.enemy_shots.is_empty());
        if report.ship_sunk {
            sunk += 1;
        }
        last = Some(report);
    }
    let last = last.unwrap();
    assert_eq!(sunk, FLEET_SIZE);
    assert!(last.game_over);
    assert_eq!(last.winner, Some(Side::Player));
    assert_eq!(session.phase(), Phase::Finished(Outcome::Win));
    assert_eq!(session.outcome(), Some(Outcome::Win));
    assert_eq!(session.enemy_board().ships_remaining(), 0);

    // the finished game ignores further shots
    let open = enemy_cells(&session, false)[0];
    assert_eq!(session.fire_at_enemy(open.x, open.y)?, None);
    Ok(())
}

#[test]
fn test_pause_blocks_play() -> Result<(), GameError> {
    let mut session = GameSession::new(SessionConfig::seeded(4));
    assert!(session.pause());
    assert!(!session.pause());
    assert!(session.is_paused());
    assert!(!session.place_player_ship(5, Orientation::Horizontal, 0, 0)?);
    assert!(session.resume());
    assert!(!session.resume());

    place_standard_fleet(&mut session)?;
    assert!(session.toggle_pause());
    let target = enemy_cells(&session, true)[0];
    assert_eq!(session.fire_at_enemy(target.x, target.y)?, None);
    assert!(!session.enemy_board().cell(target.x, target.y)?.was_shot());
    assert!(!session.toggle_pause());
    assert!(session.fire_at_enemy(target.x, target.y)?.is_some());
    Ok(())
}

#[test]
fn test_restart_clears_everything() -> Result<(), GameError> {
    let mut session = started(5)?;
    let target = enemy_cells(&session, false)[0];
    session.fire_at_enemy(target.x, target.y)?;
    session.pause();

    session.restart();
    assert_eq!(session.phase(), Phase::Setup);
    assert!(!session.is_paused());
    assert_eq!(session.turn(), Turn::Player);
    assert_eq!(session.ships_to_place(), FLEET_SIZE);
    assert!(session.targeting().fired().is_empty());
    assert!(session.targeting().hunt_queue().is_empty());
    for board in [session.player_board(), session.enemy_board()] {
        assert!(board.ships().is_empty());
        assert!(board.occupancy().is_empty());
        assert!(board.shots().is_empty());
        assert_eq!(board.ships_remaining(), FLEET_SIZE);
    }

    place_standard_fleet(&mut session)?;
    assert_eq!(session.phase(), Phase::Playing);
    Ok(())
}

#[test]
fn test_restart_with_seed_is_reproducible() -> Result<(), GameError> {
    let fresh = started(42)?;

    let mut reused = started(1)?;
    reused.restart_with_seed(42);
    assert_eq!(reused.seed(), Some(42));
    place_standard_fleet(&mut reused)?;

    assert_eq!(
        fresh.enemy_board().occupancy(),
        reused.enemy_board().occupancy()
    );
    Ok(())
}

#[test]
fn test_events_follow_the_game() -> Result<(), GameError> {
    let log = EventLog::new();
    let mut session = GameSession::with_sink(SessionConfig::seeded(9), Box::new(log.clone()));
    place_standard_fleet(&mut session)?;

    let events = log.drain();
    assert_eq!(events.len(), FLEET_SIZE + 2);
    assert_eq!(
        events[0],
        GameEvent::ShipPlaced {
            side: Side::Player,
            size: 5,
            orientation: Orientation::Horizontal,
            x: 0,
            y: 0,
        }
    );
    assert_eq!(events[FLEET_SIZE], GameEvent::GameStarted);
    assert_eq!(
        events[FLEET_SIZE + 1],
        GameEvent::TurnChanged(TurnIndicator::Player)
    );

    let target = enemy_cells(&session, true)[0];
    session.fire_at_enemy(target.x, target.y)?;
    assert!(matches!(
        log.drain().as_slice(),
        [GameEvent::CellChanged {
            side: Side::Enemy,
            hit: true,
            ..
        }]
    ));

    let open = enemy_cells(&session, false)[0];
    let report = session.fire_at_enemy(open.x, open.y)?.unwrap();
    let events = log.drain();
    assert_eq!(
        events[1],
        GameEvent::TurnChanged(TurnIndicator::Enemy)
    );
    let enemy_changes = events
        .iter()
        .filter(|e| matches!(e, GameEvent::CellChanged { side: Side::Player, .. }))
        .count();
    assert_eq!(enemy_changes, report.enemy_shots.len());
    if !report.game_over {
        assert_eq!(
            events.last(),
            Some(&GameEvent::TurnChanged(TurnIndicator::Player))
        );
    }

    session.pause();
    session.resume();
    session.restart();
    assert_eq!(
        log.drain(),
        vec![
            GameEvent::TurnChanged(TurnIndicator::Paused),
            GameEvent::TurnChanged(TurnIndicator::Player),
            GameEvent::Restarted,
            GameEvent::TurnChanged(TurnIndicator::Player),
        ]
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn games_always_finish_consistently(seed in any::<u64>()) {
        let mut session = started(seed).unwrap();
        // water first, so the computer gets as many turns as possible
        let mut targets = enemy_cells(&session, false);
        targets.extend(enemy_cells(&session, true));

        for at in targets {
            if session.phase() != Phase::Playing {
                break;
            }
            let report = session.fire_at_enemy(at.x, at.y).unwrap();
            prop_assert!(report.is_some());
            let report = report.unwrap();
            prop_assert_eq!(report.game_over, session.outcome().is_some());
            prop_assert_eq!(report.winner, session.outcome().map(|o| o.winner()));
        }

        match session.phase() {
            Phase::Finished(Outcome::Win) => {
                prop_assert_eq!(session.enemy_board().ships_remaining(), 0);
                prop_assert!(session.player_board().ships_remaining() > 0);
            }
            Phase::Finished(Outcome::Lose) => {
                prop_assert_eq!(session.player_board().ships_remaining(), 0);
                prop_assert!(session.enemy_board().ships_remaining() > 0);
                prop_assert_eq!(session.targeting().hit_cells().len(), TOTAL_SHIP_CELLS);
            }
            other => prop_assert!(false, "game did not finish: {:?}", other),
        }
    }
}

#[test]
fn test_enemy_fleet_waits_for_last_player_ship() -> Result<(), GameError> {
    let mut session = GameSession::new(SessionConfig::seeded(17));
    for (i, &size) in FLEET[..FLEET_SIZE - 1].iter().enumerate() {
        assert!(session.place_player_ship(size, Orientation::Horizontal, 0, i * 2)?);
        assert!(session.enemy_board().ships().is_empty());
    }

    // touches the size 4 ship on row 2
    assert!(!session.place_player_ship(1, Orientation::Horizontal, 0, 3)?);
    assert_eq!(session.phase(), Phase::Setup);
    assert_eq!(session.pending_sizes(), &[1]);
    assert!(session.enemy_board().ships().is_empty());

    assert!(session.place_player_ship(1, Orientation::Horizontal, 0, 8)?);
    assert_eq!(session.phase(), Phase::Playing);
    assert_eq!(session.enemy_board().ships().len(), FLEET_SIZE);
    Ok(())
}

#[test]
fn test_replacing_the_sink() -> Result<(), GameError> {
    let first = EventLog::new();
    let second = EventLog::new();
    let mut session =
        GameSession::with_sink(SessionConfig::seeded(2), Box::new(first.clone()));
    assert!(session.place_next_ship(Orientation::Horizontal, 0, 0)?);
    session.set_sink(Box::new(second.clone()));
    session.pause();

    assert_eq!(first.len(), 1);
    assert!(matches!(
        first.events().as_slice(),
        [GameEvent::ShipPlaced { size: 5, .. }]
    ));
    assert_eq!(
        second.events(),
        vec![GameEvent::TurnChanged(TurnIndicator::Paused)]
    );
    // reading does not consume
    assert_eq!(second.len(), 1);
    assert!(!second.is_empty());
    Ok(())
}
