//! Match orchestration
//!
//! The controller runs one frame at a time, in a fixed internal order, so
//! every phase edge is decided by exactly one writer. Inputs land in an
//! [`IntentState`] as flags and pending edges; the frame consumes them.

use crate::clock::TurnClock;
use crate::config::MatchConfig;
use crate::error::{MatchError, Result};
use crate::intent::{Intent, IntentState, KeyState};
use crate::phase::MatchPhase;
use bolt_ballistics::{ProjectileSystem, ShotResolution};
use bolt_core::{ActorId, Team};
use bolt_physics::PhysicsWorld;
use bolt_pose::{AfterShot, PoseController, PoseState};
use bolt_rig::{ActorRig, CameraMount, CameraPose};
use glam::Vec3;
use log::{debug, info};

/// Which camera the presentation layer should use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Over-the-shoulder follow of the active actor
    ThirdPerson,
    /// First-person aim view; movement is frozen, charging is allowed
    Aim,
    /// Detached overhead view of the whole arena
    Global,
}

/// The reported result of one resolved shot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// The shot struck an opposing actor
    EnemyHit {
        shooter: ActorId,
        target: ActorId,
        /// Whether the hit removed the target from the match
        eliminated: bool,
    },
    /// The shot struck an actor on the shooter's own team
    AllyHit {
        shooter: ActorId,
        target: ActorId,
        eliminated: bool,
    },
    /// The shot landed on scenery or the ground
    Missed { shooter: ActorId },
}

/// One roster slot: the rig and its animation driver
struct Combatant {
    rig: ActorRig,
    pose: PoseController,
}

/// Owns the roster, the turn order, the clock, and the phase machine.
///
/// Call [`apply_intent`](MatchController::apply_intent) from the input
/// layer at any time and [`frame`](MatchController::frame) exactly once
/// per render tick. `frame` is the only place phases change.
pub struct MatchController {
    config: MatchConfig,
    combatants: Vec<Combatant>,
    projectiles: ProjectileSystem,
    intents: IntentState,
    clock: TurnClock,
    phase: MatchPhase,
    active_index: usize,
    view: ViewMode,
    /// Remembered so leaving the global camera restores the right view
    view_before_global: ViewMode,
    transition_remaining: f32,
    /// Set when the active actor itself is eliminated: its slot already
    /// holds the next survivor, so the hand-over must not advance again
    active_slot_vacated: bool,
    last_outcome: Option<ShotOutcome>,
    winner: Option<Team>,
}

impl MatchController {
    /// Spawn the roster and start the first turn
    pub fn new(world: &mut PhysicsWorld, config: MatchConfig) -> Result<Self> {
        if config.spawns.is_empty() {
            return Err(MatchError::EmptyRoster);
        }

        let combatants: Vec<Combatant> = config
            .spawns
            .iter()
            .enumerate()
            .map(|(index, spawn)| Combatant {
                rig: ActorRig::spawn(
                    world,
                    ActorId::new(index as u32),
                    Team::from_roster_index(index as u32),
                    spawn.x,
                    spawn.z,
                    spawn.yaw,
                ),
                pose: PoseController::new(),
            })
            .collect();

        combatants[0].rig.activate(world)?;
        info!(
            "match started: {} actors, {}s turns",
            combatants.len(),
            config.turn_duration
        );

        let clock = TurnClock::new(config.turn_duration);
        Ok(Self {
            config,
            combatants,
            projectiles: ProjectileSystem::new(),
            intents: IntentState::default(),
            clock,
            phase: MatchPhase::TurnActive,
            active_index: 0,
            view: ViewMode::ThirdPerson,
            view_before_global: ViewMode::ThirdPerson,
            transition_remaining: 0.0,
            active_slot_vacated: false,
            last_outcome: None,
            winner: None,
        })
    }

    /// Current phase
    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    /// Current view mode
    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// The turn clock (countdown readout, charge state)
    pub fn clock(&self) -> &TurnClock {
        &self.clock
    }

    /// Charge power the active actor would fire at right now
    pub fn charge_power(&self) -> f32 {
        self.clock
            .charge_power(self.config.charge_rate, self.config.max_power)
    }

    /// The actor whose turn it is
    pub fn active_actor(&self) -> &ActorRig {
        &self.combatants[self.active_index].rig
    }

    /// Iterate the surviving roster in turn order
    pub fn actors(&self) -> impl Iterator<Item = &ActorRig> {
        self.combatants.iter().map(|c| &c.rig)
    }

    /// Live projectiles, for rendering
    pub fn projectiles(&self) -> &ProjectileSystem {
        &self.projectiles
    }

    /// The most recently resolved shot, for the scoreboard
    pub fn last_outcome(&self) -> Option<ShotOutcome> {
        self.last_outcome
    }

    /// Two-digit countdown readout for the HUD
    pub fn countdown_display(&self) -> String {
        self.clock.display()
    }

    /// The winning team, once the match is over
    pub fn winner(&self) -> Option<Team> {
        self.winner
    }

    /// Camera placement for the current view mode
    pub fn camera(&self) -> CameraPose {
        match self.view {
            ViewMode::ThirdPerson => self.active_actor().camera_pose(CameraMount::ThirdPerson),
            ViewMode::Aim => self.active_actor().camera_pose(CameraMount::FirstPerson),
            // A touch of Z offset keeps the look direction off the up axis
            ViewMode::Global => CameraPose {
                position: Vec3::new(0.0, self.config.global_camera_height, 0.1),
                target: Vec3::ZERO,
            },
        }
    }

    /// Record one input intent.
    ///
    /// Never changes the phase; anything a dead phase would reject is
    /// simply dropped here so stale holds cannot leak into the next turn.
    pub fn apply_intent(&mut self, intent: Intent, state: KeyState) {
        if self.phase.is_terminal() {
            return;
        }
        match intent {
            // The overhead camera is available in every live or waiting phase
            Intent::ToggleGlobalCamera => self.intents.apply(intent, state),
            // Everything else requires an input-accepting phase
            _ => {
                if self.phase.accepts_input() {
                    self.intents.apply(intent, state);
                }
            }
        }
    }

    /// Run one frame: consume pending input edges, advance the clock,
    /// integrate movement and aim, step physics, resolve shots, drive
    /// every pose, and advance the phase machine. Returns the shot
    /// outcomes decided this frame.
    pub fn frame(&mut self, world: &mut PhysicsWorld, dt: f32) -> Result<Vec<ShotOutcome>> {
        let mut outcomes = Vec::new();

        self.consume_camera_toggles();
        self.consume_charge_edges(world);

        if self.phase.is_live() {
            self.clock.tick(dt);
            if self.clock.expired() {
                debug!("turn clock expired for actor {}", self.active_index);
                self.begin_transition(world)?;
            }
        }

        if self.phase.accepts_input() {
            self.integrate_movement(dt);
        }
        if let Some(active) = self.combatants.get(self.active_index) {
            active.rig.sync_body(world)?;
        }

        world.step(dt);

        if !self.phase.is_terminal() {
            for resolution in self.projectiles.collect_resolutions(world) {
                outcomes.push(self.settle_shot(world, &resolution)?);
            }
        }

        for combatant in &mut self.combatants {
            combatant.pose.update(&mut combatant.rig, dt);
        }

        if self.phase == MatchPhase::TurnTransition {
            self.transition_remaining -= dt;
            if self.transition_remaining <= 0.0 {
                self.advance_turn(world)?;
            }
        }

        self.projectiles.sync(world)?;
        self.projectiles.prune_below(world, self.config.floor_y);

        Ok(outcomes)
    }

    /// View toggles, consumed before anything that depends on the view
    fn consume_camera_toggles(&mut self) {
        if self.intents.take_toggle_global() {
            if self.view == ViewMode::Global {
                self.view = self.view_before_global;
            } else {
                self.view_before_global = self.view;
                self.view = ViewMode::Global;
            }
        }

        // The aim toggle only applies while the actor can still act, and
        // never mid-charge (the held shot pins the stance)
        if self.intents.take_toggle_aim() && self.phase == MatchPhase::TurnActive {
            match self.view {
                ViewMode::Aim => {
                    self.view = ViewMode::ThirdPerson;
                    self.combatants[self.active_index].pose.aim_to_idle();
                }
                ViewMode::ThirdPerson => self.enter_aim_view(),
                ViewMode::Global => {}
            }
        }
    }

    /// Freeze walking, straighten the head, and raise the cannon
    fn enter_aim_view(&mut self) {
        self.intents.clear_movement();
        let combatant = &mut self.combatants[self.active_index];
        combatant.rig.reset_aim_pitch();
        combatant.pose.to_aim();
        self.view = ViewMode::Aim;
    }

    /// Charge press/release edges. A press only counts in the aim view;
    /// a release fires the shot and hands the phase to resolution.
    fn consume_charge_edges(&mut self, world: &mut PhysicsWorld) {
        let pressed = self.intents.take_charge_pressed();
        let released = self.intents.take_charge_released();

        if pressed {
            if self.phase == MatchPhase::TurnActive && self.view == ViewMode::Aim {
                self.clock.start_charge();
                self.phase = MatchPhase::Charging;
                debug!("actor {} charging", self.active_index);
            } else {
                // A press outside the aim view is void; forget the hold so
                // the next press registers cleanly
                self.intents.charge_held = false;
            }
        }

        if released && self.phase == MatchPhase::Charging {
            let power = self.charge_power();
            self.clock.end_charge();
            self.fire(world, power);
            self.phase = MatchPhase::Resolving;
        }
    }

    /// Spawn the projectile from the muzzle along the current aim
    fn fire(&mut self, world: &mut PhysicsWorld, power: f32) {
        let combatant = &mut self.combatants[self.active_index];
        let origin = combatant.rig.hand_origin();
        self.projectiles.spawn(
            world,
            combatant.rig.id(),
            origin,
            combatant.rig.yaw(),
            combatant.rig.aim_pitch(),
            power,
            &self.config.ballistics,
        );
        // Recoil, then ease back into the held stance; the stance itself
        // drops when the turn advances
        combatant.pose.shoot(AfterShot::HoldAim);
    }

    /// Movement, steering, and aim-pitch integration for the active actor
    fn integrate_movement(&mut self, dt: f32) {
        let combatant = &mut self.combatants[self.active_index];

        // Yaw turns at the walking rate normally, and at the slow aim
        // rate while sighting down the cannon
        let steer = self.intents.steering.direction();
        if steer != 0.0 {
            let rate = if self.view == ViewMode::Aim {
                self.config.aim_speed
            } else {
                self.config.turn_speed
            };
            combatant.rig.turn(steer * rate * dt);
        }

        // Aim elevation tracks its axis whenever the stance is up, even
        // mid-charge
        if self.view == ViewMode::Aim {
            let pitch = self.intents.pitch.direction();
            if pitch != 0.0 {
                combatant.rig.adjust_aim_pitch(
                    pitch * self.config.aim_speed * dt,
                    self.config.aim_pitch_bounds,
                );
            }
            return;
        }

        // Walking is frozen while a charge is held
        if self.phase != MatchPhase::TurnActive {
            return;
        }
        let drive = self.intents.longitudinal.direction();
        let walking = matches!(
            combatant.pose.state(),
            PoseState::Walking | PoseState::IdleToWalk
        );
        if drive != 0.0 {
            let step = combatant.rig.forward() * drive * self.config.move_speed * dt;
            combatant.rig.translate(step);
            if !walking {
                combatant.pose.begin_walk();
            }
        } else if walking {
            combatant.pose.end_walk();
        }
    }

    /// Turn a physics resolution into a reported outcome, applying damage
    /// and eliminations, then hand the phase to the inter-turn delay
    fn settle_shot(
        &mut self,
        world: &mut PhysicsWorld,
        resolution: &ShotResolution,
    ) -> Result<ShotOutcome> {
        let shooter = resolution.spawner;
        let outcome = match resolution.hit {
            None => ShotOutcome::Missed { shooter },
            Some(target) => {
                let eliminated = self.damage_actor(world, target);
                // Teams are a pure function of the actor id, so this holds
                // even after the target left the roster
                let friendly = Team::from_roster_index(shooter.index())
                    == Team::from_roster_index(target.index());
                if friendly {
                    ShotOutcome::AllyHit {
                        shooter,
                        target,
                        eliminated,
                    }
                } else {
                    ShotOutcome::EnemyHit {
                        shooter,
                        target,
                        eliminated,
                    }
                }
            }
        };

        info!("shot outcome: {outcome:?}");
        self.last_outcome = Some(outcome);

        if self.combatants.is_empty() {
            // Mutual destruction leaves nobody to hand the turn to
            self.phase = MatchPhase::GameOver;
            self.intents.clear_all();
            info!("match over, no survivors");
        } else if let Some(winner) = self.check_victory() {
            self.winner = Some(winner);
            self.phase = MatchPhase::GameOver;
            self.intents.clear_all();
            info!("match over, {winner} team wins");
        } else if self.phase == MatchPhase::Resolving {
            self.begin_transition(world)?;
        }

        Ok(outcome)
    }

    /// Apply one hit; on elimination, despawn and drop the roster slot.
    /// Returns true when the target was eliminated.
    fn damage_actor(&mut self, world: &mut PhysicsWorld, target: ActorId) -> bool {
        let Some(index) = self.combatants.iter().position(|c| c.rig.id() == target) else {
            return false;
        };

        if !self.combatants[index].rig.take_damage() {
            return false;
        }

        info!("actor {} eliminated", target.index());
        self.combatants[index].rig.despawn(world);
        self.combatants.remove(index);
        // Keep the active slot pointing at the same actor. A ricochet can
        // eliminate the shooter itself; its slot then already holds the
        // next survivor, so the hand-over skips its usual increment.
        if index < self.active_index {
            self.active_index -= 1;
        } else if index == self.active_index {
            if self.active_index >= self.combatants.len() {
                self.active_index = 0;
            }
            self.active_slot_vacated = true;
        }
        true
    }

    /// The surviving team, if only one remains
    fn check_victory(&self) -> Option<Team> {
        let mut teams = self.combatants.iter().map(|c| c.rig.team());
        let first = teams.next()?;
        teams.all(|t| t == first).then_some(first)
    }

    /// End the active actor's turn: discard held input, drop any unfired
    /// charge, settle the pose, freeze the body, and start the delay
    fn begin_transition(&mut self, world: &mut PhysicsWorld) -> Result<()> {
        self.intents.clear_all();
        self.clock.end_charge();

        let combatant = &mut self.combatants[self.active_index];
        match combatant.pose.state() {
            PoseState::Walking | PoseState::IdleToWalk => combatant.pose.end_walk(),
            PoseState::Aiming | PoseState::Shooting => combatant.pose.aim_to_idle(),
            _ => {}
        }
        combatant.rig.deactivate(world)?;

        self.view = ViewMode::ThirdPerson;
        self.phase = MatchPhase::TurnTransition;
        self.transition_remaining = self.config.transition_duration;
        Ok(())
    }

    /// Hand the turn to the next surviving actor
    fn advance_turn(&mut self, world: &mut PhysicsWorld) -> Result<()> {
        self.projectiles.clear_resolved(world);

        if !std::mem::take(&mut self.active_slot_vacated) {
            self.active_index = (self.active_index + 1) % self.combatants.len();
        }
        self.clock.reset();
        self.combatants[self.active_index].rig.activate(world)?;
        self.phase = MatchPhase::TurnActive;

        let rig = &self.combatants[self.active_index].rig;
        info!(
            "turn: actor {} ({} team)",
            rig.id().index(),
            rig.team()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bolt_physics::PhysicsConfig;
    use crate::config::SpawnPoint;

    fn setup() -> (PhysicsWorld, MatchController) {
        let mut world = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        let config = MatchConfig::default().with_spawns(vec![
            SpawnPoint::new(0.0, 0.0, 0.0),
            SpawnPoint::new(5.0, 0.0, 0.0),
            SpawnPoint::new(10.0, 0.0, 0.0),
            SpawnPoint::new(15.0, 0.0, 0.0),
        ]);
        let game = MatchController::new(&mut world, config).unwrap();
        (world, game)
    }

    fn eliminate(game: &mut MatchController, world: &mut PhysicsWorld, target: ActorId) {
        assert!(!game.damage_actor(world, target));
        assert!(!game.damage_actor(world, target));
        assert!(game.damage_actor(world, target));
    }

    fn hand_over(game: &mut MatchController, world: &mut PhysicsWorld) {
        game.begin_transition(world).unwrap();
        game.advance_turn(world).unwrap();
    }

    #[test]
    fn test_self_elimination_at_slot_zero_does_not_skip_a_turn() {
        let (mut world, mut game) = setup();

        // The active actor at slot 0 takes itself out; its slot already
        // holds the next survivor
        eliminate(&mut game, &mut world, ActorId::new(0));
        hand_over(&mut game, &mut world);
        assert_eq!(game.active_actor().id(), ActorId::new(1));

        // Subsequent hand-overs walk the survivors in order
        hand_over(&mut game, &mut world);
        assert_eq!(game.active_actor().id(), ActorId::new(2));
    }

    #[test]
    fn test_self_elimination_at_the_last_slot_wraps_to_slot_zero() {
        let (mut world, mut game) = setup();
        for _ in 0..3 {
            hand_over(&mut game, &mut world);
        }
        assert_eq!(game.active_actor().id(), ActorId::new(3));

        eliminate(&mut game, &mut world, ActorId::new(3));
        hand_over(&mut game, &mut world);
        assert_eq!(game.active_actor().id(), ActorId::new(0));
    }

    #[test]
    fn test_elimination_before_the_active_slot_keeps_the_order() {
        let (mut world, mut game) = setup();
        hand_over(&mut game, &mut world);
        assert_eq!(game.active_actor().id(), ActorId::new(1));

        eliminate(&mut game, &mut world, ActorId::new(0));
        assert_eq!(game.active_actor().id(), ActorId::new(1), "active slot unmoved");
        hand_over(&mut game, &mut world);
        assert_eq!(game.active_actor().id(), ActorId::new(2));
    }

    #[test]
    fn test_sole_survivor_self_destruct_ends_with_no_winner() {
        use bolt_core::ProjectileId;

        let mut world = PhysicsWorld::new(PhysicsConfig::default()).unwrap();
        let config = MatchConfig::default().with_spawns(vec![SpawnPoint::new(0.0, 0.0, 0.0)]);
        let mut game = MatchController::new(&mut world, config).unwrap();

        assert!(!game.damage_actor(&mut world, ActorId::new(0)));
        assert!(!game.damage_actor(&mut world, ActorId::new(0)));
        let resolution = ShotResolution {
            projectile: ProjectileId::new(0),
            spawner: ActorId::new(0),
            hit: Some(ActorId::new(0)),
            point: Vec3::ZERO,
        };
        let outcome = game.settle_shot(&mut world, &resolution).unwrap();

        assert!(matches!(
            outcome,
            ShotOutcome::AllyHit {
                eliminated: true,
                ..
            }
        ));
        assert_eq!(game.phase(), MatchPhase::GameOver);
        assert_eq!(game.winner(), None);
        assert_eq!(game.actors().count(), 0);

        // Frames on the emptied roster must keep running cleanly
        for _ in 0..5 {
            assert!(game.frame(&mut world, 1.0 / 60.0).unwrap().is_empty());
        }
    }

    #[test]
    fn test_elimination_after_the_active_slot_keeps_the_order() {
        let (mut world, mut game) = setup();

        eliminate(&mut game, &mut world, ActorId::new(2));
        assert_eq!(game.active_actor().id(), ActorId::new(0));
        hand_over(&mut game, &mut world);
        assert_eq!(game.active_actor().id(), ActorId::new(1));
        hand_over(&mut game, &mut world);
        assert_eq!(game.active_actor().id(), ActorId::new(3));
    }
}
