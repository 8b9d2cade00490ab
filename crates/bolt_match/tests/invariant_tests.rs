//! Phase-machine and resolution invariants under full duels

use bolt_core::{ActorId, BodyTag, Team};
use bolt_match::prelude::*;
use bolt_physics::{ColliderDesc, ColliderShape, PhysicsConfig, PhysicsWorld, RigidBodyDesc};
use std::f32::consts::PI;

const DT: f32 = 1.0 / 60.0;

fn arena() -> PhysicsWorld {
    let mut world = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
    let ground = world.create_rigid_body(RigidBodyDesc::fixed());
    world.create_collider(
        ColliderDesc::new(ColliderShape::ground_plane())
            .with_user_data(BodyTag::Scenery.encode()),
        Some(ground),
    );
    world
}

/// A point-blank 1v1: slot 0 spawns facing slot 1 four meters away
fn point_blank_config() -> MatchConfig {
    let mut config = MatchConfig::default()
        .with_spawns(vec![
            SpawnPoint::new(0.0, 0.0, PI),
            SpawnPoint::new(0.0, 4.0, 0.0),
        ])
        .with_turn_duration(2.0)
        .with_transition_duration(0.2);
    // Full power in a quarter second, so a shot fits well inside the turn
    config.charge_rate = 40.0;
    config
}

fn run(game: &mut MatchController, world: &mut PhysicsWorld, seconds: f32) -> Vec<ShotOutcome> {
    let mut outcomes = Vec::new();
    let steps = (seconds / DT).ceil() as usize;
    for _ in 0..steps {
        outcomes.extend(game.frame(world, DT).unwrap());
    }
    outcomes
}

/// Aim, charge to full, fire, and run until the shot resolves
fn fire_full_power(game: &mut MatchController, world: &mut PhysicsWorld) -> Vec<ShotOutcome> {
    game.apply_intent(Intent::ToggleAimCamera, KeyState::Pressed);
    run(game, world, 0.2);
    game.apply_intent(Intent::BeginCharge, KeyState::Pressed);
    run(game, world, 0.3);
    game.apply_intent(Intent::EndCharge, KeyState::Pressed);

    let mut outcomes = Vec::new();
    for _ in 0..600 {
        outcomes.extend(game.frame(world, DT).unwrap());
        if !outcomes.is_empty() {
            break;
        }
    }
    outcomes
}

/// Let the active actor's turn run out untouched
fn skip_turn(game: &mut MatchController, world: &mut PhysicsWorld) {
    let id = game.active_actor().id();
    for _ in 0..600 {
        run(game, world, 0.1);
        if game.phase() == MatchPhase::TurnActive && game.active_actor().id() != id {
            return;
        }
        if game.phase().is_terminal() {
            return;
        }
    }
    panic!("turn never advanced");
}

/// Run frames until the next turn starts; None once the match ends
fn await_turn_start(game: &mut MatchController, world: &mut PhysicsWorld) -> Option<u32> {
    for _ in 0..3000 {
        if game.phase().is_terminal() {
            return None;
        }
        if game.phase() == MatchPhase::TurnActive {
            return Some(game.active_actor().id().index());
        }
        game.frame(world, DT).unwrap();
    }
    panic!("match stalled");
}

#[test]
fn test_phase_edges_are_strictly_sequential() {
    let mut world = arena();
    let mut game = MatchController::new(&mut world, point_blank_config()).unwrap();

    let allowed = |from: MatchPhase, to: MatchPhase| {
        matches!(
            (from, to),
            (MatchPhase::TurnActive, MatchPhase::Charging)
                | (MatchPhase::TurnActive, MatchPhase::TurnTransition)
                | (MatchPhase::Charging, MatchPhase::Resolving)
                | (MatchPhase::Charging, MatchPhase::TurnTransition)
                | (MatchPhase::Resolving, MatchPhase::TurnTransition)
                | (MatchPhase::Resolving, MatchPhase::GameOver)
                | (MatchPhase::TurnTransition, MatchPhase::TurnActive)
        )
    };

    // Scripted inputs covering every live phase
    game.apply_intent(Intent::ToggleAimCamera, KeyState::Pressed);
    let mut phases = vec![game.phase()];
    for frame in 0..600 {
        if frame == 20 {
            game.apply_intent(Intent::BeginCharge, KeyState::Pressed);
        }
        if frame == 40 {
            game.apply_intent(Intent::EndCharge, KeyState::Pressed);
        }
        game.frame(&mut world, DT).unwrap();
        phases.push(game.phase());
    }

    for pair in phases.windows(2) {
        assert!(
            pair[0] == pair[1] || allowed(pair[0], pair[1]),
            "illegal phase edge {:?} -> {:?}",
            pair[0],
            pair[1]
        );
    }
    // The script actually exercised a full shot cycle
    assert!(phases.contains(&MatchPhase::Charging));
    assert!(phases.contains(&MatchPhase::Resolving));
    assert!(phases.contains(&MatchPhase::TurnTransition));
}

#[test]
fn test_three_hits_eliminate_and_end_the_match() {
    let mut world = arena();
    let mut game = MatchController::new(&mut world, point_blank_config()).unwrap();

    let mut eliminations = Vec::new();
    for _ in 0..3 {
        let outcomes = fire_full_power(&mut game, &mut world);
        match outcomes.as_slice() {
            [ShotOutcome::EnemyHit {
                shooter,
                target,
                eliminated,
            }] => {
                assert_eq!(*shooter, ActorId::new(0));
                assert_eq!(*target, ActorId::new(1));
                eliminations.push(*eliminated);
            }
            other => panic!("expected one enemy hit, got {other:?}"),
        }
        if game.phase().is_terminal() {
            break;
        }
        // Hand the turn back: the victim's turn runs out untouched
        skip_turn(&mut game, &mut world);
        skip_turn(&mut game, &mut world);
    }

    assert_eq!(eliminations, vec![false, false, true]);
    assert_eq!(game.phase(), MatchPhase::GameOver);
    assert_eq!(game.winner(), Some(Team::Red));
    assert_eq!(game.actors().count(), 1);

    // A finished match ignores everything
    game.apply_intent(Intent::MoveForward, KeyState::Pressed);
    let before = game.active_actor().position();
    run(&mut game, &mut world, 0.5);
    assert_eq!(game.phase(), MatchPhase::GameOver);
    assert!((game.active_actor().position() - before).length() < 1e-3);
}

#[test]
fn test_two_on_two_duel_runs_to_a_red_victory() {
    let mut world = arena();
    // Two point-blank lanes: each Red slot spawns facing its Blue victim
    let config = point_blank_config().with_spawns(vec![
        SpawnPoint::new(0.0, 0.0, PI),
        SpawnPoint::new(0.0, 4.0, 0.0),
        SpawnPoint::new(20.0, 0.0, PI),
        SpawnPoint::new(20.0, 4.0, 0.0),
    ]);
    let mut game = MatchController::new(&mut world, config).unwrap();

    let mut order = vec![game.active_actor().id().index()];
    for _ in 0..20 {
        if game.phase().is_terminal() {
            break;
        }
        if game.active_actor().team() == Team::Red {
            fire_full_power(&mut game, &mut world);
        } else {
            // The Blue side sits its turns out
            run(&mut game, &mut world, 2.1);
        }
        match await_turn_start(&mut game, &mut world) {
            Some(id) => order.push(id),
            None => break,
        }
    }

    // Every Red shot hits its lane. Actor 1 falls to actor 0's third shot
    // and the hand-over continues with the very next survivor; actor 3's
    // elimination leaves only Red and ends the match.
    assert_eq!(order, vec![0, 1, 2, 3, 0, 1, 2, 3, 0, 2]);
    assert_eq!(game.phase(), MatchPhase::GameOver);
    assert_eq!(game.winner(), Some(Team::Red));
    assert_eq!(game.actors().count(), 2);
}

#[test]
fn test_each_shot_resolves_exactly_once() {
    let mut world = arena();
    // Far apart so the bouncy shot lands on open ground
    let config = point_blank_config().with_spawns(vec![
        SpawnPoint::new(0.0, 0.0, PI),
        SpawnPoint::new(0.0, 35.0, 0.0),
    ]);
    let mut game = MatchController::new(&mut world, config).unwrap();

    game.apply_intent(Intent::ToggleAimCamera, KeyState::Pressed);
    run(&mut game, &mut world, 0.2);
    game.apply_intent(Intent::BeginCharge, KeyState::Pressed);
    run(&mut game, &mut world, 0.1);
    game.apply_intent(Intent::EndCharge, KeyState::Pressed);

    // Run well past the bounce; the restitution guarantees repeat contacts
    let mut total = Vec::new();
    for _ in 0..600 {
        total.extend(game.frame(&mut world, DT).unwrap());
        assert!(game.projectiles().len() <= 1, "never more than one shot live");
    }
    assert_eq!(total.len(), 1, "repeat contacts must not re-resolve");
}

#[test]
fn test_expiry_during_charge_discards_the_shot() {
    let mut world = arena();
    let config = point_blank_config().with_turn_duration(0.6);
    let mut game = MatchController::new(&mut world, config).unwrap();

    game.apply_intent(Intent::ToggleAimCamera, KeyState::Pressed);
    run(&mut game, &mut world, 0.2);
    game.apply_intent(Intent::BeginCharge, KeyState::Pressed);
    run(&mut game, &mut world, 0.2);
    assert_eq!(game.phase(), MatchPhase::Charging);

    // Never released: the countdown runs out mid-charge
    let outcomes = run(&mut game, &mut world, 0.6);
    assert!(outcomes.is_empty(), "an unfired charge produces nothing");
    assert!(game.projectiles().is_empty());
    assert_eq!(game.phase(), MatchPhase::TurnActive);
    assert_eq!(game.active_actor().id(), ActorId::new(1));
}

#[test]
fn test_resolved_projectile_lingers_until_hand_over() {
    let mut world = arena();
    let config = point_blank_config().with_transition_duration(1.0);
    let mut game = MatchController::new(&mut world, config).unwrap();

    let outcomes = fire_full_power(&mut game, &mut world);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(game.phase(), MatchPhase::TurnTransition);
    assert_eq!(
        game.projectiles().len(),
        1,
        "the spent shot stays visible through the delay"
    );

    run(&mut game, &mut world, 1.2);
    assert_eq!(game.phase(), MatchPhase::TurnActive);
    assert!(game.projectiles().is_empty());
}
