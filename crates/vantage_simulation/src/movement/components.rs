//! Movement/jump компоненты и конфиги

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Режим перемещения (переключается только явным set/toggle)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum MovementMode {
    #[default]
    Normal,
    /// Гравитация выключена, вертикаль управляется осью up_axis
    Flying,
}

/// Режим прыжка (конфигурация)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum JumpMode {
    Disabled,
    #[default]
    Single,
    Double,
}

/// Конфиг движения. В runtime мутабелен только `mode` (через
/// set_movement_mode / toggle).
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct MovementConfig {
    pub mode: MovementMode,
    /// Скорость ходьбы (m/s)
    pub walk_speed: f32,
    /// Скорость бега (m/s)
    pub run_speed: f32,
    /// SmoothDamp time constant (секунды до ~63% сближения с target)
    pub smoothing: f32,
    pub run_allowed: bool,
    pub mode_toggle_allowed: bool,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            mode: MovementMode::Normal,
            walk_speed: 4.0,
            run_speed: 8.0,
            smoothing: 0.2,
            run_allowed: true,
            mode_toggle_allowed: false,
        }
    }
}

/// Конфиг прыжка
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct JumpConfig {
    pub mode: JumpMode,
    /// Vertical velocity, устанавливаемая single jump (m/s)
    pub jump_strength: f32,
    /// Vertical velocity double jump (m/s)
    pub double_jump_strength: f32,
    /// Coyote time: прыжок засчитывается ещё grace_secs после схода с земли
    pub grace_secs: f32,
}

impl Default for JumpConfig {
    fn default() -> Self {
        Self {
            mode: JumpMode::Single,
            jump_strength: 6.0,
            double_jump_strength: 5.0,
            grace_secs: 0.15,
        }
    }
}

/// Jump state — владеет только movement controller.
///
/// `grounded` — производная последнего ground edge (не перечитывается у
/// сенсора). Латчи jumped/double_jumped сбрасываются на BecameGrounded;
/// LeftGround ничего не сбрасывает (начало падения).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct JumpState {
    pub grounded: bool,
    pub jumped: bool,
    pub double_jumped: bool,
    /// Секунды с момента LeftGround (0 пока grounded)
    pub seconds_since_grounded: f32,
}

/// Асимметричный run латч: выключается немедленно при отпускании кнопки (в
/// том числе в воздухе), включается только на земле
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct RunState {
    pub running: bool,
}

/// Явное состояние SmoothDamp демпфера (вместо скрытого ref-параметра:
/// состояние видно, сериализуемо и сбрасываемо)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SmoothDampState {
    /// Текущая скорость изменения демпфируемой величины
    pub velocity: Vec3,
}
