//! Input snapshot — граница с input polling service
//!
//! Host опрашивает реальный input (named axes/buttons) и записывает snapshot в
//! компонент персонажа каждый tick; симуляция только читает. Edge-состояние
//! (`button_down`) очищается системой clear_input_edges в конце tick —
//! семантика GetButtonDown: true только в tick нажатия.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Снимок input на текущий tick (per-character, host-written)
#[derive(Component, Debug, Clone, Default)]
pub struct InputSnapshot {
    axes: HashMap<String, f32>,
    held: HashSet<String>,
    pressed: HashSet<String>,
}

impl InputSnapshot {
    /// GetAxis: значение оси [-1, 1]; незаписанная ось = 0.0
    pub fn axis(&self, name: &str) -> f32 {
        self.axes.get(name).copied().unwrap_or(0.0)
    }

    /// GetButton: кнопка удерживается
    pub fn button(&self, name: &str) -> bool {
        self.held.contains(name)
    }

    /// GetButtonDown: кнопка перешла в нажатое состояние в этом tick
    pub fn button_down(&self, name: &str) -> bool {
        self.pressed.contains(name)
    }

    pub fn set_axis(&mut self, name: &str, value: f32) {
        self.axes.insert(name.to_string(), value.clamp(-1.0, 1.0));
    }

    /// Нажатие кнопки. Edge регистрируется только при переходе
    /// отпущена → нажата (повторный press удерживаемой кнопки — no-op).
    pub fn press(&mut self, name: &str) {
        if self.held.insert(name.to_string()) {
            self.pressed.insert(name.to_string());
        }
    }

    pub fn release(&mut self, name: &str) {
        self.held.remove(name);
    }

    pub fn clear_edges(&mut self) {
        self.pressed.clear();
    }
}

/// Именованные binding'и осей/кнопок движения.
///
/// Имена резолвит host при записи snapshot'а; здесь они только ключи.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct InputBindings {
    pub horizontal_axis: String,
    pub vertical_axis: String,
    /// Вертикальная ось Flying-режима
    pub up_axis: String,
    pub run_button: String,
    pub jump_button: String,
    pub mode_toggle_button: String,
}

impl Default for InputBindings {
    fn default() -> Self {
        Self {
            horizontal_axis: "Horizontal".to_string(),
            vertical_axis: "Vertical".to_string(),
            up_axis: "UpDown".to_string(),
            run_button: "Run".to_string(),
            jump_button: "Jump".to_string(),
            mode_toggle_button: "ToggleFly".to_string(),
        }
    }
}

/// System: сброс edge-состояния кнопок в конце tick
pub fn clear_input_edges(mut snapshots: Query<&mut InputSnapshot>) {
    for mut input in snapshots.iter_mut() {
        input.clear_edges();
    }
}
