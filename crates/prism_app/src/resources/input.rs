use prism_dependencies::{
    nalgebra_glm as glm,
    winit::event::{
        DeviceEvent, ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent,
    },
};
use std::collections::HashMap;

#[derive(Default, Debug)]
pub struct Input {
    pub keystates: HashMap<VirtualKeyCode, ElementState>,
    pub mouse: Mouse,
    focus_lost: bool,
}

impl Input {
    pub fn has_focus(&self) -> bool {
        !self.focus_lost
    }

    pub fn is_key_pressed(&self, keycode: VirtualKeyCode) -> bool {
        self.keystates.get(&keycode) == Some(&ElementState::Pressed)
    }

    pub fn handle_event<T>(&mut self, event: &Event<T>) {
        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            virtual_keycode: Some(keycode),
                            state,
                            ..
                        },
                    ..
                } => {
                    self.keystates.insert(*keycode, *state);
                }
                WindowEvent::MouseInput { button, state, .. } => {
                    self.mouse.set_button(*button, *state);
                }
                WindowEvent::CursorMoved { position, .. } => {
                    self.mouse
                        .move_to(glm::vec2(position.x as f32, position.y as f32));
                }
                // Releases are never delivered to an unfocused window
                WindowEvent::Focused(false) => {
                    self.focus_lost = true;
                    self.keystates.clear();
                    self.mouse.reset();
                }
                WindowEvent::Focused(true) => {
                    self.focus_lost = false;
                    self.mouse.reset();
                }
                _ => {}
            },
            // Raw motion keeps arriving while other windows have focus
            Event::DeviceEvent {
                event: DeviceEvent::MouseMotion { delta },
                ..
            } if !self.focus_lost => {
                self.mouse.motion += glm::vec2(delta.0 as f32, delta.1 as f32);
            }
            _ => {}
        }
    }

    /// Clears the per-frame mouse deltas.
    pub fn end_frame(&mut self) {
        self.mouse.position_delta = glm::vec2(0.0, 0.0);
        self.mouse.motion = glm::vec2(0.0, 0.0);
    }
}

#[derive(Default, Debug)]
pub struct Mouse {
    pub is_left_clicked: bool,
    pub is_right_clicked: bool,
    pub position: glm::Vec2,
    /// Cursor movement since the last frame, in window coordinates.
    pub position_delta: glm::Vec2,
    /// Raw device movement since the last frame. Unaffected by cursor grabs.
    pub motion: glm::Vec2,
    has_position: bool,
}

impl Mouse {
    /// The first sample after a reset only records the position, so the
    /// jump from wherever the cursor entered the window is not a delta.
    pub fn move_to(&mut self, position: glm::Vec2) {
        if self.has_position {
            self.position_delta += position - self.position;
        }
        self.position = position;
        self.has_position = true;
    }

    pub fn set_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.is_left_clicked = pressed,
            MouseButton::Right => self.is_right_clicked = pressed,
            _ => {}
        }
    }

    pub fn reset(&mut self) {
        self.has_position = false;
        self.position_delta = glm::vec2(0.0, 0.0);
        self.motion = glm::vec2(0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_dependencies::winit::{
        dpi::PhysicalPosition,
        event::{DeviceId, ModifiersState},
        window::WindowId,
    };

    #[allow(deprecated)]
    fn key_event(keycode: VirtualKeyCode, state: ElementState) -> Event<'static, ()> {
        Event::WindowEvent {
            window_id: unsafe { WindowId::dummy() },
            event: WindowEvent::KeyboardInput {
                device_id: unsafe { DeviceId::dummy() },
                input: KeyboardInput {
                    scancode: 0,
                    state,
                    virtual_keycode: Some(keycode),
                    modifiers: ModifiersState::empty(),
                },
                is_synthetic: false,
            },
        }
    }

    #[allow(deprecated)]
    fn cursor_event(x: f64, y: f64) -> Event<'static, ()> {
        Event::WindowEvent {
            window_id: unsafe { WindowId::dummy() },
            event: WindowEvent::CursorMoved {
                device_id: unsafe { DeviceId::dummy() },
                position: PhysicalPosition::new(x, y),
                modifiers: ModifiersState::empty(),
            },
        }
    }

    #[test]
    fn tracks_key_presses_and_releases() {
        let mut input = Input::default();
        assert!(!input.is_key_pressed(VirtualKeyCode::W));

        input.handle_event(&key_event(VirtualKeyCode::W, ElementState::Pressed));
        assert!(input.is_key_pressed(VirtualKeyCode::W));
        assert!(!input.is_key_pressed(VirtualKeyCode::S));

        input.handle_event(&key_event(VirtualKeyCode::W, ElementState::Released));
        assert!(!input.is_key_pressed(VirtualKeyCode::W));
    }

    fn focus_event(focused: bool) -> Event<'static, ()> {
        Event::WindowEvent {
            window_id: unsafe { WindowId::dummy() },
            event: WindowEvent::Focused(focused),
        }
    }

    fn motion_event(x: f64, y: f64) -> Event<'static, ()> {
        Event::DeviceEvent {
            device_id: unsafe { DeviceId::dummy() },
            event: DeviceEvent::MouseMotion { delta: (x, y) },
        }
    }

    #[test]
    fn raw_motion_is_ignored_without_focus() {
        let mut input = Input::default();
        input.handle_event(&motion_event(3.0, -2.0));
        assert_eq!(input.mouse.motion, glm::vec2(3.0, -2.0));

        input.handle_event(&focus_event(false));
        assert!(!input.has_focus());
        assert_eq!(input.mouse.motion, glm::vec2(0.0, 0.0));
        input.handle_event(&motion_event(120.0, 40.0));
        assert_eq!(input.mouse.motion, glm::vec2(0.0, 0.0));

        input.handle_event(&focus_event(true));
        assert!(input.has_focus());
        input.handle_event(&motion_event(1.0, 1.0));
        assert_eq!(input.mouse.motion, glm::vec2(1.0, 1.0));
    }

    #[test]
    fn losing_focus_releases_keys() {
        let mut input = Input::default();
        input.handle_event(&key_event(VirtualKeyCode::W, ElementState::Pressed));
        input.handle_event(&focus_event(false));
        assert!(!input.is_key_pressed(VirtualKeyCode::W));
    }

    #[test]
    fn first_cursor_sample_has_no_delta() {
        let mut input = Input::default();
        input.handle_event(&cursor_event(400.0, 300.0));
        assert_eq!(input.mouse.position_delta, glm::vec2(0.0, 0.0));
        assert_eq!(input.mouse.position, glm::vec2(400.0, 300.0));

        input.handle_event(&cursor_event(410.0, 295.0));
        assert_eq!(input.mouse.position_delta, glm::vec2(10.0, -5.0));
    }

    #[test]
    fn deltas_accumulate_until_end_of_frame() {
        let mut input = Input::default();
        input.handle_event(&cursor_event(0.0, 0.0));
        input.handle_event(&cursor_event(3.0, 1.0));
        input.handle_event(&cursor_event(5.0, 4.0));
        assert_eq!(input.mouse.position_delta, glm::vec2(5.0, 4.0));

        input.end_frame();
        assert_eq!(input.mouse.position_delta, glm::vec2(0.0, 0.0));
        input.handle_event(&cursor_event(6.0, 4.0));
        assert_eq!(input.mouse.position_delta, glm::vec2(1.0, 0.0));
    }

    #[test]
    fn reset_restarts_the_first_sample_rule() {
        let mut mouse = Mouse::default();
        mouse.move_to(glm::vec2(1.0, 1.0));
        mouse.reset();
        mouse.move_to(glm::vec2(100.0, 100.0));
        assert_eq!(mouse.position_delta, glm::vec2(0.0, 0.0));
    }

    #[test]
    fn tracks_mouse_buttons() {
        let mut mouse = Mouse::default();
        mouse.set_button(MouseButton::Left, ElementState::Pressed);
        assert!(mouse.is_left_clicked);
        assert!(!mouse.is_right_clicked);
        mouse.set_button(MouseButton::Left, ElementState::Released);
        assert!(!mouse.is_left_clicked);
    }
}
