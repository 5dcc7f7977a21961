//! Detection компоненты

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Marker: entity выполняет look-at detection каждый tick
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Detector;

/// Ground sensor: габариты probe + состояние предыдущего tick
///
/// `grounded` хранит результат ПРЕДЫДУЩЕГО tick — из сравнения с текущим
/// выводятся edge события (см. systems::detect_ground).
#[derive(Component, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GroundSensor {
    /// Полувысота капсулы персонажа (центр → подошва)
    pub half_height: f32,
    /// Полуширина персонажа (радиус капсулы)
    pub half_width: f32,
    /// Контакт с землёй на предыдущем tick
    pub grounded: bool,
}

impl Default for GroundSensor {
    fn default() -> Self {
        Self {
            half_height: 0.9,
            half_width: 0.4,
            grounded: false,
        }
    }
}

/// Вертикальный допуск ground probe (метры).
///
/// Поглощает floating-point jitter на границе контакта — без него grounded
/// мерцает. Подбирается вместе с contact tolerance физического solver'а.
pub const GROUND_PROBE_MARGIN: f32 = 0.05;

/// Радиус probe как доля полуширины персонажа: чуть уже капсулы, чтобы не
/// цеплять стены при контакте боком
pub const GROUND_PROBE_WIDTH_FACTOR: f32 = 0.8;
