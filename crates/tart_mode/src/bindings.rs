//! Device-to-command mapping for winit hosts.
//!
//! The state machine only understands [`TartCommand`]s; this table turns key
//! presses and mouse clicks into them, and arrow keys into [`FlyInput`] for
//! the camera.

use std::collections::HashMap;

use glam::{UVec2, Vec2};
use tart_core::FlyInput;
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;

use crate::command::{Axis, Spin, TartCommand};

/// Maps keys to commands and names the button that throws.
///
/// # Example
/// ```rust,ignore
/// let mut bindings = KeyBindings::with_defaults();
/// bindings.bind(KeyCode::Enter, TartCommand::Stage);
/// if let Some(cmd) = bindings.command_for_key(KeyCode::Space) {
///     mode.handle_command(&mut world, cmd);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct KeyBindings {
    keys: HashMap<KeyCode, TartCommand>,
    /// Button that throws the staged fruit at the pointer.
    ///
    /// Default: `MouseButton::Left`
    pub throw_button: MouseButton,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl KeyBindings {
    /// No key bindings; left mouse button throws.
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
            throw_button: MouseButton::Left,
        }
    }

    /// Space stages, T switches, U undoes, X/Y/Z pick the axis, A/D rotate.
    pub fn with_defaults() -> Self {
        let mut b = Self::new();
        b.bind(KeyCode::Space, TartCommand::Stage);
        b.bind(KeyCode::KeyT, TartCommand::Switch);
        b.bind(KeyCode::KeyU, TartCommand::Undo);
        b.bind(KeyCode::KeyX, TartCommand::SetAxis(Axis::X));
        b.bind(KeyCode::KeyY, TartCommand::SetAxis(Axis::Y));
        b.bind(KeyCode::KeyZ, TartCommand::SetAxis(Axis::Z));
        b.bind(KeyCode::KeyA, TartCommand::Rotate(Spin::Negative));
        b.bind(KeyCode::KeyD, TartCommand::Rotate(Spin::Positive));
        b
    }

    /// Binds `key` to `command`, replacing any previous binding.
    pub fn bind(&mut self, key: KeyCode, command: TartCommand) {
        self.keys.insert(key, command);
    }

    pub fn unbind(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    /// Command for a key press, if the key is bound.
    pub fn command_for_key(&self, key: KeyCode) -> Option<TartCommand> {
        self.keys.get(&key).copied()
    }

    /// Throw command for a mouse press at `pointer` (window pixels).
    pub fn command_for_click(
        &self,
        button: MouseButton,
        pointer: Vec2,
        window_size: UVec2,
    ) -> Option<TartCommand> {
        (button == self.throw_button).then_some(TartCommand::AimAt {
            pointer,
            window_size,
        })
    }
}

/// Updates held arrow-key state.  Returns `false` for keys that do not steer
/// the camera.
pub fn update_fly_input(input: &mut FlyInput, key: KeyCode, pressed: bool) -> bool {
    let slot = match key {
        KeyCode::ArrowLeft => &mut input.left,
        KeyCode::ArrowRight => &mut input.right,
        KeyCode::ArrowUp => &mut input.up,
        KeyCode::ArrowDown => &mut input.down,
        _ => return false,
    };
    *slot = pressed;
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout() {
        let b = KeyBindings::with_defaults();
        assert_eq!(b.command_for_key(KeyCode::Space), Some(TartCommand::Stage));
        assert_eq!(
            b.command_for_key(KeyCode::KeyA),
            Some(TartCommand::Rotate(Spin::Negative))
        );
        assert_eq!(b.command_for_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn rebinding_overwrites() {
        let mut b = KeyBindings::with_defaults();
        b.bind(KeyCode::Space, TartCommand::Undo);
        assert_eq!(b.command_for_key(KeyCode::Space), Some(TartCommand::Undo));
        b.unbind(KeyCode::Space);
        assert_eq!(b.command_for_key(KeyCode::Space), None);
    }

    #[test]
    fn only_the_throw_button_aims() {
        let b = KeyBindings::new();
        let size = UVec2::new(640, 480);
        assert!(b
            .command_for_click(MouseButton::Right, Vec2::ZERO, size)
            .is_none());
        assert_eq!(
            b.command_for_click(MouseButton::Left, Vec2::new(3.0, 4.0), size),
            Some(TartCommand::AimAt {
                pointer: Vec2::new(3.0, 4.0),
                window_size: size
            })
        );
    }

    #[test]
    fn arrow_keys_drive_fly_input() {
        let mut fly = FlyInput::default();
        assert!(update_fly_input(&mut fly, KeyCode::ArrowUp, true));
        assert!(fly.up);
        assert!(update_fly_input(&mut fly, KeyCode::ArrowUp, false));
        assert!(!fly.up);
        assert!(!update_fly_input(&mut fly, KeyCode::KeyW, true));
    }
}
