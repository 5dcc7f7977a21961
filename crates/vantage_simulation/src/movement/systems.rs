//! Movement/jump системы

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::detection::{BecameGrounded, LeftGround};
use crate::input::{InputBindings, InputSnapshot};
use crate::shared::ViewpointPose;
use super::components::{
    JumpConfig, JumpMode, JumpState, MovementConfig, MovementMode, RunState, SmoothDampState,
};
use super::smoothing::smooth_damp;

/// System: сворачивает ground edges в JumpState + ведёт airborne таймер.
///
/// BecameGrounded сбрасывает jump латчи и таймер; LeftGround только переводит
/// в airborne (double jump остаётся доступен, если не использован).
pub fn track_ground_state(
    mut grounded_events: EventReader<BecameGrounded>,
    mut airborne_events: EventReader<LeftGround>,
    mut states: Query<&mut JumpState>,
    time: Res<Time>,
) {
    for event in grounded_events.read() {
        let Ok(mut state) = states.get_mut(event.entity) else {
            continue;
        };
        state.grounded = true;
        state.jumped = false;
        state.double_jumped = false;
        state.seconds_since_grounded = 0.0;
    }

    for event in airborne_events.read() {
        let Ok(mut state) = states.get_mut(event.entity) else {
            continue;
        };
        state.grounded = false;
    }

    let delta = time.delta_secs();
    for mut state in states.iter_mut() {
        if !state.grounded {
            state.seconds_since_grounded += delta;
        }
    }
}

/// Следующее значение run латча.
///
/// Асимметрия: отпущенная кнопка выключает бег немедленно (и в воздухе),
/// включение возможно только на земле. В воздухе с зажатой кнопкой текущее
/// значение сохраняется.
pub fn next_run_flag(allowed: bool, button_held: bool, grounded: bool, current: bool) -> bool {
    if !allowed || !button_held {
        false
    } else if grounded {
        true
    } else {
        current
    }
}

/// System: обновление run латча
pub fn update_run_flag(
    mut query: Query<(
        &MovementConfig,
        &InputBindings,
        &InputSnapshot,
        &JumpState,
        &mut RunState,
    )>,
) {
    for (config, bindings, input, jump, mut run) in query.iter_mut() {
        run.running = next_run_flag(
            config.run_allowed,
            input.button(&bindings.run_button),
            jump.grounded,
            run.running,
        );
    }
}

/// GravityScale для режима: Flying летает без гравитации
pub fn gravity_for_mode(mode: MovementMode) -> GravityScale {
    match mode {
        MovementMode::Normal => GravityScale(1.0),
        MovementMode::Flying => GravityScale(0.0),
    }
}

/// Явная установка режима движения.
///
/// Side effect — переключение гравитации на rigid-body. Мгновенно, без
/// blending скоростей между режимами.
pub fn set_movement_mode(config: &mut MovementConfig, gravity: &mut GravityScale, mode: MovementMode) {
    config.mode = mode;
    *gravity = gravity_for_mode(mode);
}

/// System: toggle Normal ⇄ Flying по кнопке (если разрешён конфигом)
pub fn toggle_movement_mode(
    mut query: Query<(
        Entity,
        &mut MovementConfig,
        &InputBindings,
        &InputSnapshot,
        &mut GravityScale,
    )>,
) {
    for (entity, mut config, bindings, input, mut gravity) in query.iter_mut() {
        if !config.mode_toggle_allowed || !input.button_down(&bindings.mode_toggle_button) {
            continue;
        }

        let next = match config.mode {
            MovementMode::Normal => MovementMode::Flying,
            MovementMode::Flying => MovementMode::Normal,
        };
        set_movement_mode(&mut config, &mut gravity, next);

        crate::logger::log_info(&format!("Entity {:?} movement mode -> {:?}", entity, next));
    }
}

/// Нормализованное направление движения из осей input.
///
/// Горизонтальная ось — вдоль camera right; вертикальная — вдоль forward
/// персонажа (Normal) или camera forward (Flying); up-ось только в Flying.
/// Нормализация ДО масштабирования скоростью: диагональный input не быстрее
/// осевого.
pub fn movement_direction(
    mode: MovementMode,
    horizontal: f32,
    vertical: f32,
    up: f32,
    viewpoint: &ViewpointPose,
    body_forward: Vec3,
    body_up: Vec3,
) -> Vec3 {
    let mut movement = viewpoint.right * horizontal;

    match mode {
        MovementMode::Normal => {
            movement += body_forward * vertical;
        }
        MovementMode::Flying => {
            movement += body_up * up;
            movement += viewpoint.forward * vertical;
        }
    }

    movement.normalize_or_zero()
}

/// System: строит target velocity из input и демпфирует к ней текущую.
///
/// В Normal вертикальная компонента проходит насквозь — ей владеют
/// gravity/jump, демпфер её не трогает (иначе сглаживание дралось бы с
/// интеграцией гравитации).
pub fn apply_movement_input(
    mut query: Query<(
        &MovementConfig,
        &InputBindings,
        &InputSnapshot,
        &RunState,
        &ViewpointPose,
        &Transform,
        &mut SmoothDampState,
        &mut Velocity,
    )>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (config, bindings, input, run, viewpoint, transform, mut damp, mut velocity) in
        query.iter_mut()
    {
        let direction = movement_direction(
            config.mode,
            input.axis(&bindings.horizontal_axis),
            input.axis(&bindings.vertical_axis),
            input.axis(&bindings.up_axis),
            viewpoint,
            transform.forward().into(),
            transform.up().into(),
        );

        let speed = if run.running {
            config.run_speed
        } else {
            config.walk_speed
        };
        let target = direction * speed;

        let current = velocity.linvel;
        let mut smoothed = smooth_damp(current, target, &mut damp.velocity, config.smoothing, delta);

        if config.mode == MovementMode::Normal {
            smoothed.y = current.y;
            damp.velocity.y = 0.0;
        }

        velocity.linvel = smoothed;
    }
}

/// Прыжок, выполняемый по нажатию jump в данном состоянии
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JumpAction {
    Single { strength: f32 },
    Double { strength: f32 },
}

/// Решение прыжка (grace-window вариант).
///
/// Single: grounded или в пределах coyote grace, и single ещё не использован в
/// этой airborne фазе. Double: только после single, один раз. Инвариант по
/// построению: между двумя BecameGrounded максимум два прыжка, double никогда
/// раньше single (прыжок в grace-окне считается single).
pub fn jump_decision(config: &JumpConfig, state: &JumpState) -> Option<JumpAction> {
    if config.mode == JumpMode::Disabled {
        return None;
    }

    if (state.grounded || state.seconds_since_grounded <= config.grace_secs) && !state.jumped {
        return Some(JumpAction::Single {
            strength: config.jump_strength,
        });
    }

    if config.mode == JumpMode::Double && state.jumped && !state.double_jumped {
        return Some(JumpAction::Double {
            strength: config.double_jump_strength,
        });
    }

    None
}

/// System: jump input → прямое выставление vertical velocity.
///
/// Сила прыжка НЕ добавляется импульсом к текущей вертикали — вертикаль
/// выставляется в конфигурированное значение. Прыжки только в Normal.
pub fn handle_jump_input(
    mut query: Query<(
        Entity,
        &MovementConfig,
        &JumpConfig,
        &InputBindings,
        &InputSnapshot,
        &mut JumpState,
        &mut Velocity,
    )>,
) {
    for (entity, config, jump_config, bindings, input, mut state, mut velocity) in query.iter_mut()
    {
        if config.mode != MovementMode::Normal {
            continue;
        }
        if !input.button_down(&bindings.jump_button) {
            continue;
        }

        match jump_decision(jump_config, &state) {
            Some(JumpAction::Single { strength }) => {
                velocity.linvel.y = strength;
                state.jumped = true;
                crate::logger::log(&format!("Entity {:?} jump ({} m/s)", entity, strength));
            }
            Some(JumpAction::Double { strength }) => {
                velocity.linvel.y = strength;
                state.double_jumped = true;
                crate::logger::log(&format!("Entity {:?} double jump ({} m/s)", entity, strength));
            }
            None => {}
        }
    }
}
