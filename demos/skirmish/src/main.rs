//! Headless scripted duel
//!
//! Runs a full default match with a simple bot playing every actor: walk
//! a little, face the nearest enemy, raise the cannon, and fire with a
//! power estimated from the range. Prints the turn-by-turn readout and
//! the final result.

mod arena;

use bolt_match::prelude::*;
use bolt_physics::{PhysicsConfig, PhysicsWorld};
use glam::Vec3;
use log::{info, warn};
use std::f32::consts::{PI, TAU};

const DT: f32 = 1.0 / 60.0;
const MAX_TURNS: usize = 80;
const AIM_ELEVATION: f32 = 0.35;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut world = match PhysicsWorld::new(PhysicsConfig::default()) {
        Ok(world) => world,
        Err(err) => {
            warn!("physics setup failed: {err}");
            return;
        }
    };
    arena::build(&mut world);

    let mut game = match MatchController::new(&mut world, MatchConfig::default()) {
        Ok(game) => game,
        Err(err) => {
            warn!("match setup failed: {err}");
            return;
        }
    };

    for turn in 0..MAX_TURNS {
        if game.phase().is_terminal() {
            break;
        }
        info!(
            "turn {turn}: actor {} ({} team), {}s on the clock",
            game.active_actor().id().index(),
            game.active_actor().team(),
            game.clock().display()
        );
        if let Err(err) = play_turn(&mut game, &mut world) {
            warn!("turn aborted: {err}");
            break;
        }
    }

    match game.winner() {
        Some(team) => info!("{team} team wins the skirmish"),
        None => info!("no winner after {MAX_TURNS} turns"),
    }
}

/// Advance the match by `seconds`, logging any shot outcomes
fn run(game: &mut MatchController, world: &mut PhysicsWorld, seconds: f32) -> Result<()> {
    let steps = (seconds / DT).ceil() as usize;
    for _ in 0..steps {
        for outcome in game.frame(world, DT)? {
            info!("outcome: {outcome:?}");
        }
        if game.phase().is_terminal() {
            break;
        }
    }
    Ok(())
}

/// One scripted turn: close some distance, face the target, fire
fn play_turn(game: &mut MatchController, world: &mut PhysicsWorld) -> Result<()> {
    let shooter = game.active_actor().id();

    // Stretch the legs toward the fight
    game.apply_intent(Intent::MoveForward, KeyState::Pressed);
    run(game, world, 1.0)?;
    game.apply_intent(Intent::MoveForward, KeyState::Released);
    run(game, world, 0.4)?;

    // Face the nearest enemy
    if let Some(target) = nearest_enemy(game) {
        face(game, world, target)?;
    }

    // Raise the cannon and set the elevation
    game.apply_intent(Intent::ToggleAimCamera, KeyState::Pressed);
    run(game, world, 0.25)?;
    game.apply_intent(Intent::AimUp, KeyState::Pressed);
    run(game, world, AIM_ELEVATION / 0.42)?;
    game.apply_intent(Intent::AimUp, KeyState::Released);

    // Charge long enough for the estimated range
    let hold = charge_hold(game);
    game.apply_intent(Intent::BeginCharge, KeyState::Pressed);
    run(game, world, hold)?;
    game.apply_intent(Intent::EndCharge, KeyState::Pressed);

    // Ride out resolution and the hand-over
    while game.active_actor().id() == shooter && !game.phase().is_terminal() {
        run(game, world, 0.25)?;
    }
    Ok(())
}

/// Ground position of the closest opposing actor
fn nearest_enemy(game: &MatchController) -> Option<Vec3> {
    let me = game.active_actor();
    let my_pos = me.position();
    game.actors()
        .filter(|a| a.team() != me.team())
        .map(|a| a.position())
        .min_by(|a, b| {
            let da = (*a - my_pos).length_squared();
            let db = (*b - my_pos).length_squared();
            da.total_cmp(&db)
        })
}

/// Hold the turn key until the rig faces `target`
fn face(game: &mut MatchController, world: &mut PhysicsWorld, target: Vec3) -> Result<()> {
    for _ in 0..200 {
        let me = game.active_actor();
        let to = target - me.position();
        let desired = f32::atan2(-to.x, -to.z);
        let error = wrap_angle(desired - me.yaw());
        if error.abs() < 0.03 {
            break;
        }
        let key = if error > 0.0 {
            Intent::TurnLeft
        } else {
            Intent::TurnRight
        };
        game.apply_intent(key, KeyState::Pressed);
        run(game, world, DT * 3.0)?;
        game.apply_intent(key, KeyState::Released);
    }
    Ok(())
}

/// Charge hold time for the distance to the nearest enemy, from the
/// ballistic range of the chosen elevation
fn charge_hold(game: &MatchController) -> f32 {
    let range = nearest_enemy(game)
        .map(|target| (target - game.active_actor().position()).length())
        .unwrap_or(10.0);
    let gravity = 9.81;
    let speed = (range * gravity / (2.0 * AIM_ELEVATION).sin()).sqrt();
    let power = (speed / 2.5).clamp(1.0, 10.0);
    power / 5.0
}

fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}
