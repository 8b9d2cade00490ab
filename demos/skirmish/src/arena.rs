//! Arena construction: the ground plane and the central bunker

use bolt_core::BodyTag;
use bolt_physics::{ColliderDesc, ColliderShape, PhysicsMaterial, PhysicsWorld, RigidBodyDesc};

const WALL_HEIGHT: f32 = 4.0;
const WALL_THICKNESS: f32 = 0.5;
const BUNKER_X: f32 = 15.0;
const BUNKER_Z: f32 = -12.0;
const BUNKER_WIDTH: f32 = 12.0;
const BUNKER_DEPTH: f32 = 18.0;
const ENTRANCE_WIDTH: f32 = 2.5;

fn add_wall(world: &mut PhysicsWorld, cx: f32, cz: f32, hx: f32, hz: f32) {
    let body = world.create_rigid_body(RigidBodyDesc::fixed().with_position(
        cx,
        WALL_HEIGHT / 2.0,
        cz,
    ));
    world.create_collider(
        ColliderDesc::new(ColliderShape::cuboid(hx, WALL_HEIGHT / 2.0, hz))
            .with_material(PhysicsMaterial::new(0.6, 0.2))
            .with_user_data(BodyTag::Scenery.encode()),
        Some(body),
    );
}

/// Build the duel arena: an open ground plane with one walled bunker
/// whose south face has an entrance gap.
pub fn build(world: &mut PhysicsWorld) {
    let ground = world.create_rigid_body(RigidBodyDesc::fixed());
    world.create_collider(
        ColliderDesc::new(ColliderShape::ground_plane())
            .with_material(PhysicsMaterial::new(0.8, 0.1))
            .with_user_data(BodyTag::Scenery.encode()),
        Some(ground),
    );

    let half_w = BUNKER_WIDTH / 2.0;
    let half_d = BUNKER_DEPTH / 2.0;
    let half_t = WALL_THICKNESS / 2.0;

    // East and west walls run the full depth
    add_wall(world, BUNKER_X - half_w, BUNKER_Z, half_t, half_d);
    add_wall(world, BUNKER_X + half_w, BUNKER_Z, half_t, half_d);

    // North wall is solid
    add_wall(world, BUNKER_X, BUNKER_Z - half_d, half_w, half_t);

    // South wall splits around the entrance
    let segment = (BUNKER_WIDTH - ENTRANCE_WIDTH) / 2.0;
    add_wall(
        world,
        BUNKER_X - half_w + segment / 2.0,
        BUNKER_Z + half_d,
        segment / 2.0,
        half_t,
    );
    add_wall(
        world,
        BUNKER_X + half_w - segment / 2.0,
        BUNKER_Z + half_d,
        segment / 2.0,
        half_t,
    );
}
