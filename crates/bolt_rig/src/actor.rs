//! The actor rig: skeleton + physics body + health

use crate::camera::{CameraMount, CameraPose};
use crate::health::Health;
use crate::pose::JointPose;
use crate::skeleton::{world_transform, JointId, SkeletonDims};
use bolt_core::{ActorId, BodyTag, Team};
use bolt_physics::{
    ColliderDesc, ColliderHandle, ColliderShape, PhysicsMaterial, PhysicsWorld, Result,
    RigidBodyConstraints, RigidBodyDesc, RigidBodyHandle, RigidBodyType,
};
use glam::Vec3;
use log::debug;

/// One combatant: joint tree, pose, health, and a single physics body.
///
/// The body is dynamic only while this actor holds the turn; every other
/// actor is a static obstacle. The rendered transform (position + yaw) is
/// authoritative and is pushed into the body via [`sync_body`].
///
/// [`sync_body`]: ActorRig::sync_body
pub struct ActorRig {
    id: ActorId,
    team: Team,
    dims: SkeletonDims,
    position: Vec3,
    yaw: f32,
    pose: JointPose,
    health: Health,
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

impl ActorRig {
    /// Spawn a rig standing on the ground at (x, z), facing `yaw`.
    ///
    /// The body starts static; call [`activate`](ActorRig::activate) when
    /// this actor's turn begins.
    pub fn spawn(
        world: &mut PhysicsWorld,
        id: ActorId,
        team: Team,
        x: f32,
        z: f32,
        yaw: f32,
    ) -> Self {
        let dims = SkeletonDims::default();
        let position = Vec3::new(x, dims.stand_height(), z);

        let body = world.create_rigid_body(
            RigidBodyDesc::fixed()
                .with_position(position.x, position.y, position.z)
                .with_yaw(yaw)
                .with_constraints(RigidBodyConstraints::LOCK_ROTATION),
        );

        let [hx, hy, hz] = dims.collider_half_extents();
        let collider = world.create_collider(
            ColliderDesc::new(ColliderShape::cuboid(hx, hy, hz))
                .with_offset(0.0, dims.collider_offset_y(), 0.0)
                .with_material(PhysicsMaterial::new(0.5, 0.0))
                .with_contact_events(true)
                .with_user_data(BodyTag::Actor(id).encode()),
            Some(body),
        );

        debug!("spawned actor {} ({} team) at ({x}, {z})", id.index(), team);

        Self {
            id,
            team,
            dims,
            position,
            yaw,
            pose: JointPose::default(),
            health: Health::default(),
            body,
            collider,
        }
    }

    /// Actor identifier
    pub fn id(&self) -> ActorId {
        self.id
    }

    /// Team affiliation
    pub fn team(&self) -> Team {
        self.team
    }

    /// Skeleton dimensions
    pub fn dims(&self) -> &SkeletonDims {
        &self.dims
    }

    /// Waist origin in world space
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Facing angle (radians around Y)
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Current joint pose
    pub fn pose(&self) -> &JointPose {
        &self.pose
    }

    /// Remaining health
    pub fn health(&self) -> Health {
        self.health
    }

    /// Physics body handle
    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }

    /// Set the joint pose. Called by the pose controller each frame.
    pub fn apply_joint_pose(&mut self, pose: JointPose) {
        self.pose = pose;
    }

    /// Translate the waist in the ground plane
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Turn by a yaw delta
    pub fn turn(&mut self, delta: f32) {
        self.yaw += delta;
    }

    /// Unit forward vector in the ground plane
    pub fn forward(&self) -> Vec3 {
        Vec3::new(-self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Current aim elevation (the head pitch)
    pub fn aim_pitch(&self) -> f32 {
        self.pose.head_pitch
    }

    /// Adjust the aim elevation, moving head and cannon shoulder in
    /// lockstep, clamped to `bounds`
    pub fn adjust_aim_pitch(&mut self, delta: f32, bounds: (f32, f32)) {
        let pitch = (self.pose.head_pitch + delta).clamp(bounds.0, bounds.1);
        let applied = pitch - self.pose.head_pitch;
        self.pose.head_pitch = pitch;
        self.pose.shoulder_pitch += applied;
    }

    /// Straighten the head. Interrupted animations can leave it looking
    /// somewhere else, so this runs on every aim-view entry.
    pub fn reset_aim_pitch(&mut self) {
        self.pose.head_pitch = 0.0;
    }

    /// World position of the cannon muzzle - the projectile spawn point
    pub fn hand_origin(&self) -> Vec3 {
        world_transform(self.position, self.yaw, &self.pose, &self.dims, JointId::Muzzle).0
    }

    /// Compute a camera placement for one of the named mounts
    pub fn camera_pose(&self, mount: CameraMount) -> CameraPose {
        let (head_pos, head_rot) =
            world_transform(self.position, self.yaw, &self.pose, &self.dims, JointId::Head);
        CameraPose {
            position: head_pos + head_rot * mount.local_offset(),
            target: head_pos + head_rot * mount.local_target(),
        }
    }

    /// Make the body dynamic so this actor can act and be displaced
    pub fn activate(&self, world: &mut PhysicsWorld) -> Result<()> {
        world.set_body_type(self.body, RigidBodyType::Dynamic)
    }

    /// Freeze the body into a static obstacle
    pub fn deactivate(&self, world: &mut PhysicsWorld) -> Result<()> {
        world.set_body_type(self.body, RigidBodyType::Static)
    }

    /// Push the rendered transform into the physics body
    pub fn sync_body(&self, world: &mut PhysicsWorld) -> Result<()> {
        world.set_body_position(self.body, self.position.x, self.position.y, self.position.z)?;
        world.set_body_yaw(self.body, self.yaw)
    }

    /// Take one hit. Returns true if this hit eliminated the actor.
    pub fn take_damage(&mut self) -> bool {
        let died = self.health.take_hit();
        debug!(
            "actor {} took a hit, {} left",
            self.id.index(),
            self.health.current
        );
        died
    }

    /// Remove the rig's physics objects from the world
    pub fn despawn(&self, world: &mut PhysicsWorld) {
        world.remove_collider(self.collider);
        world.remove_rigid_body(self.body);
    }
}
