//! Headless прогон контроллера
//!
//! Сцена: пол, персонаж, дверь, ящик. Скриптованный input на несколько сотен
//! тиков — smoke run связки detection → movement → interaction → rapier.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use vantage_simulation::*;

fn main() {
    println!("Starting VANTAGE headless simulation");

    let mut app = create_headless_app();
    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule());
    app.add_plugins(SimulationPlugin);

    // Пол 100×1×100, верхняя грань на y=0
    app.world_mut().spawn((
        Transform::from_xyz(0.0, -0.5, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(50.0, 0.5, 50.0),
    ));

    // Дверь перед стартовой позицией персонажа
    app.world_mut().spawn((
        Transform::from_xyz(0.0, 1.0, -4.0),
        RigidBody::Fixed,
        Collider::cuboid(0.5, 1.0, 0.05),
        Door::default(),
    ));

    // Ящик, который можно схватить
    app.world_mut().spawn((
        Transform::from_xyz(1.5, 0.25, -2.0),
        RigidBody::Dynamic,
        Collider::cuboid(0.25, 0.25, 0.25),
        Velocity::default(),
        GravityScale(1.0),
        Grabbable::default(),
    ));

    let player = {
        let mut commands = app.world_mut().commands();
        spawn_player_character(
            &mut commands,
            Vec3::new(0.0, 1.0, 0.0),
            MovementConfig::default(),
            JumpConfig {
                mode: JumpMode::Double,
                ..default()
            },
        )
    };
    app.world_mut().flush();

    for tick in 0..600u32 {
        // Скриптованный input: идём вперёд, на 120-м tick прыгаем
        if let Some(mut input) = app.world_mut().get_mut::<InputSnapshot>(player) {
            input.set_axis("Vertical", 1.0);
            if tick == 120 {
                input.press("Jump");
            } else {
                input.release("Jump");
            }
        }

        // Host-камера: глаза на 0.8 над центром капсулы, взгляд вперёд
        let position = app
            .world()
            .get::<Transform>(player)
            .map(|t| t.translation)
            .unwrap_or(Vec3::ZERO);
        if let Some(mut viewpoint) = app.world_mut().get_mut::<ViewpointPose>(player) {
            viewpoint.position = position + Vec3::Y * 0.8;
        }

        app.update();

        if tick % 100 == 0 {
            let grounded = app
                .world()
                .get::<JumpState>(player)
                .map(|s| s.grounded)
                .unwrap_or(false);
            println!(
                "Tick {}: player at ({:.2}, {:.2}, {:.2}), grounded={}",
                tick, position.x, position.y, position.z, grounded
            );
        }
    }

    println!("Simulation complete!");
}
