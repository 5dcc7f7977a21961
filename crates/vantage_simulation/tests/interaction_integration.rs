//! Interaction framework интеграция
//!
//! LookAtEvent подаётся вручную (rapier plugin не подключён) — проверяются
//! гейт, события и поведение вариантов Door/Grabbable на точных tick'ах.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use vantage_simulation::*;

fn create_test_app() -> App {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);
    app.update();
    app
}

fn spawn_interactor(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            Transform::default(),
            ViewpointPose::default(),
            InputSnapshot::default(),
            InteractionConfig::<Door>::default(),
            InteractionConfig::<Grabbable>::default(),
            GrabConfig::default(),
            GrabState::default(),
        ))
        .id()
}

fn spawn_door(app: &mut App, locked: bool) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_xyz(0.0, 1.0, -1.5),
            Door {
                locked,
                ..Default::default()
            },
        ))
        .id()
}

fn spawn_crate(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((
            Transform::from_translation(position),
            Velocity::default(),
            GravityScale(1.0),
            Grabbable::default(),
        ))
        .id()
}

fn look_at(app: &mut App, detector: Entity, target: Entity, distance: f32) {
    app.world_mut().send_event(LookAtEvent {
        detector,
        target,
        distance,
    });
}

fn press(app: &mut App, entity: Entity, button: &str) {
    let mut input = app.world_mut().get_mut::<InputSnapshot>(entity).unwrap();
    input.press(button);
}

fn release(app: &mut App, entity: Entity, button: &str) {
    let mut input = app.world_mut().get_mut::<InputSnapshot>(entity).unwrap();
    input.release(button);
}

fn drain<E: Event>(app: &mut App) -> Vec<E> {
    app.world_mut().resource_mut::<Events<E>>().drain().collect()
}

fn grab_state(app: &App, entity: Entity) -> Option<Entity> {
    app.world()
        .get::<GrabState>(entity)
        .unwrap()
        .held
        .map(|held| held.entity)
}

#[test]
fn test_exactly_one_of_can_cannot_per_tick() {
    let mut app = create_test_app();
    let interactor = spawn_interactor(&mut app);
    let door = spawn_door(&mut app, false);

    // Валидная цель в радиусе: каждый tick ровно одно can-interact событие
    for _ in 0..5 {
        look_at(&mut app, interactor, door, 1.0);
        app.update();

        let can = drain::<CanInteract<Door>>(&mut app);
        let cannot = drain::<CannotInteract<Door>>(&mut app);
        assert_eq!(can.len(), 1);
        assert_eq!(cannot.len(), 0);
        assert_eq!(can[0].target, door);
    }
}

#[test]
fn test_locked_door_raises_cannot_interact() {
    let mut app = create_test_app();
    let interactor = spawn_interactor(&mut app);
    let door = spawn_door(&mut app, true);

    for _ in 0..3 {
        look_at(&mut app, interactor, door, 1.0);
        app.update();

        let can = drain::<CanInteract<Door>>(&mut app);
        let cannot = drain::<CannotInteract<Door>>(&mut app);
        assert_eq!(can.len(), 0);
        assert_eq!(cannot.len(), 1);
    }
}

#[test]
fn test_out_of_range_target_is_silent() {
    let mut app = create_test_app();
    let interactor = spawn_interactor(&mut app);
    let door = spawn_door(&mut app, false);

    // max_distance двери — 2.0
    look_at(&mut app, interactor, door, 3.5);
    app.update();

    assert!(drain::<CanInteract<Door>>(&mut app).is_empty());
    assert!(drain::<CannotInteract<Door>>(&mut app).is_empty());
}

#[test]
fn test_target_without_capability_is_silent() {
    let mut app = create_test_app();
    let interactor = spawn_interactor(&mut app);
    let scenery = app.world_mut().spawn(Transform::default()).id();

    look_at(&mut app, interactor, scenery, 1.0);
    app.update();

    assert!(drain::<CanInteract<Door>>(&mut app).is_empty());
    assert!(drain::<CannotInteract<Door>>(&mut app).is_empty());
    assert!(drain::<CanInteract<Grabbable>>(&mut app).is_empty());
}

#[test]
fn test_capability_resolved_through_ancestors() {
    let mut app = create_test_app();
    let interactor = spawn_interactor(&mut app);
    let door_root = spawn_door(&mut app, false);
    // Луч попадает в дочерний коллайдер (полотно), capability на корне
    let leaf = app
        .world_mut()
        .spawn((Transform::default(), ChildOf(door_root)))
        .id();

    look_at(&mut app, interactor, leaf, 1.0);
    app.update();

    let can = drain::<CanInteract<Door>>(&mut app);
    assert_eq!(can.len(), 1);
    assert_eq!(can[0].target, door_root);
}

#[test]
fn test_interact_toggles_door_and_transition_gates() {
    let mut app = create_test_app();
    let interactor = spawn_interactor(&mut app);
    let door = spawn_door(&mut app, false);

    // Can-interact + кнопка в том же tick → toggle
    look_at(&mut app, interactor, door, 1.0);
    press(&mut app, interactor, "Interact");
    app.update();

    assert_eq!(drain::<Interacted<Door>>(&mut app).len(), 1);
    {
        let state = app.world().get::<Door>(door).unwrap();
        assert!(state.open);
        assert!(state.is_moving());
    }

    // Mid-transition дверь недоступна: cannot-interact, toggle не проходит
    release(&mut app, interactor, "Interact");
    look_at(&mut app, interactor, door, 1.0);
    press(&mut app, interactor, "Interact");
    app.update();

    assert_eq!(drain::<CannotInteract<Door>>(&mut app).len(), 1);
    assert_eq!(drain::<Interacted<Door>>(&mut app).len(), 0);
    assert!(app.world().get::<Door>(door).unwrap().open);

    // Ждём конец transition (1.0 s при 60 Hz) и закрываем обратно
    release(&mut app, interactor, "Interact");
    for _ in 0..61 {
        app.update();
    }
    assert!(!app.world().get::<Door>(door).unwrap().is_moving());

    look_at(&mut app, interactor, door, 1.0);
    press(&mut app, interactor, "Interact");
    app.update();
    assert!(!app.world().get::<Door>(door).unwrap().open);
}

#[test]
fn test_grab_takes_single_ownership() {
    let mut app = create_test_app();
    let interactor = spawn_interactor(&mut app);
    let crate_a = spawn_crate(&mut app, Vec3::new(0.0, 0.0, -1.2));
    let crate_b = spawn_crate(&mut app, Vec3::new(0.5, 0.0, -1.2));

    look_at(&mut app, interactor, crate_a, 1.0);
    press(&mut app, interactor, "Interact");
    app.update();

    assert_eq!(grab_state(&app, interactor), Some(crate_a));
    assert_eq!(
        app.world().get::<Grabbable>(crate_a).unwrap().held_by,
        Some(interactor)
    );
    assert_eq!(app.world().get::<GravityScale>(crate_a).unwrap().0, 0.0);

    // Попытка grab второго объекта, пока держим первый — игнорируется
    release(&mut app, interactor, "Interact");
    look_at(&mut app, interactor, crate_b, 1.0);
    press(&mut app, interactor, "Interact");
    app.update();

    assert_eq!(grab_state(&app, interactor), Some(crate_a));
    assert_eq!(app.world().get::<Grabbable>(crate_b).unwrap().held_by, None);
}

#[test]
fn test_same_tick_grab_suppresses_release() {
    let mut app = create_test_app();
    let interactor = spawn_interactor(&mut app);
    let crate_a = spawn_crate(&mut app, Vec3::new(0.0, 0.0, -1.2));

    // Grab и drop-кнопка в одном tick: release подавлен one-tick латчем
    look_at(&mut app, interactor, crate_a, 1.0);
    press(&mut app, interactor, "Interact");
    press(&mut app, interactor, "Drop");
    app.update();

    assert_eq!(grab_state(&app, interactor), Some(crate_a));

    // Следующий tick: drop проходит, velocity нулевая (Throw(0))
    release(&mut app, interactor, "Drop");
    press(&mut app, interactor, "Drop");
    app.update();

    assert_eq!(grab_state(&app, interactor), None);
    assert_eq!(app.world().get::<Grabbable>(crate_a).unwrap().held_by, None);
    assert_eq!(app.world().get::<GravityScale>(crate_a).unwrap().0, 1.0);
    assert_eq!(app.world().get::<Velocity>(crate_a).unwrap().linvel, Vec3::ZERO);
}

#[test]
fn test_throw_applies_forward_impulse() {
    let mut app = create_test_app();
    let interactor = spawn_interactor(&mut app);
    let crate_a = spawn_crate(&mut app, Vec3::new(0.0, 0.0, -1.2));

    look_at(&mut app, interactor, crate_a, 1.0);
    press(&mut app, interactor, "Interact");
    app.update();

    press(&mut app, interactor, "Throw");
    app.update();

    assert_eq!(grab_state(&app, interactor), None);
    // Viewpoint по умолчанию смотрит в -Z, throw_strength 12
    let thrown = app.world().get::<Velocity>(crate_a).unwrap().linvel;
    assert_eq!(thrown, Vec3::new(0.0, 0.0, -12.0));
    assert_eq!(app.world().get::<GravityScale>(crate_a).unwrap().0, 1.0);
}

#[test]
fn test_carried_object_steps_toward_anchor() {
    let mut app = create_test_app();
    let interactor = spawn_interactor(&mut app);
    let crate_a = spawn_crate(&mut app, Vec3::new(0.0, 0.0, -1.2));

    look_at(&mut app, interactor, crate_a, 1.0);
    press(&mut app, interactor, "Interact");
    app.update();

    // Anchor: viewpoint + forward * base_offset = (0, 0, -0.6); шаг 0.35/tick
    let after_grab = app.world().get::<Transform>(crate_a).unwrap().translation;
    assert!((after_grab.z - (-0.85)).abs() < 1.0e-4, "z = {}", after_grab.z);

    for _ in 0..4 {
        app.update();
    }
    let settled = app.world().get::<Transform>(crate_a).unwrap().translation;
    assert!(settled.distance(Vec3::new(0.0, 0.0, -0.6)) < 1.0e-4);
}

#[test]
fn test_link_lost_forces_drop_without_impulse() {
    let mut app = create_test_app();
    let interactor = spawn_interactor(&mut app);
    let crate_a = spawn_crate(&mut app, Vec3::new(0.0, 0.0, -1.2));

    look_at(&mut app, interactor, crate_a, 1.0);
    press(&mut app, interactor, "Interact");
    app.update();
    assert_eq!(grab_state(&app, interactor), Some(crate_a));

    // Объект "застрял" за препятствием далеко от anchor
    app.world_mut()
        .get_mut::<Transform>(crate_a)
        .unwrap()
        .translation = Vec3::new(50.0, 0.0, 0.0);
    app.update();

    assert_eq!(grab_state(&app, interactor), None);
    assert_eq!(app.world().get::<Grabbable>(crate_a).unwrap().held_by, None);
    assert_eq!(app.world().get::<GravityScale>(crate_a).unwrap().0, 1.0);
    assert_eq!(app.world().get::<Velocity>(crate_a).unwrap().linvel, Vec3::ZERO);
}

#[test]
fn test_manual_interact_disabled_silences_gate() {
    let mut app = create_test_app();
    let interactor = app
        .world_mut()
        .spawn((
            Transform::default(),
            ViewpointPose::default(),
            InputSnapshot::default(),
            InteractionConfig::<Door>::default().with_manual_interact(false),
        ))
        .id();
    let door = spawn_door(&mut app, false);

    look_at(&mut app, interactor, door, 1.0);
    app.update();

    assert!(drain::<CanInteract<Door>>(&mut app).is_empty());
    assert!(drain::<CannotInteract<Door>>(&mut app).is_empty());
}
