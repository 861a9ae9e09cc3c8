//! Window events as the camera sees them.
//!
//! egui collects raw events during its polling step; each frame they are
//! translated here and applied in one go before anything is drawn.

use egui::{Event, Key, MouseWheelUnit};
use glam::Vec2;

use crate::gfx::Camera;

/// egui's own conversion factor between wheel lines and points.
const POINTS_PER_LINE: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed(Key),
    /// Absolute cursor position in points.
    CursorMoved(Vec2),
    /// Vertical wheel movement in lines, positive away from the user.
    Scroll(f32),
}

pub fn translate(event: &Event) -> Option<InputEvent> {
    match event {
        // Held keys only count once; auto-repeat is ignored
        Event::Key {
            key,
            pressed: true,
            repeat: false,
            ..
        } => Some(InputEvent::KeyPressed(*key)),
        Event::PointerMoved(pos) => Some(InputEvent::CursorMoved(Vec2::new(pos.x, pos.y))),
        Event::MouseWheel { unit, delta, .. } => {
            let lines = match unit {
                MouseWheelUnit::Point => delta.y / POINTS_PER_LINE,
                MouseWheelUnit::Line | MouseWheelUnit::Page => delta.y,
            };
            (lines != 0.0).then_some(InputEvent::Scroll(lines))
        }
        _ => None,
    }
}

/// Applies one frame's worth of events. Returns `true` when the user asked to quit.
///
/// Without a camera only the quit key is honoured.
pub fn apply_input(mut camera: Option<&mut Camera>, events: &[InputEvent], dt: f32) -> bool {
    let mut close_requested = false;

    for event in events {
        if *event == InputEvent::KeyPressed(Key::Escape) {
            close_requested = true;
            continue;
        }

        let Some(cam) = camera.as_deref_mut() else {
            continue;
        };

        match *event {
            InputEvent::KeyPressed(key) => {
                let amount = cam.step(dt);
                match key {
                    Key::W => cam.move_forward(amount),
                    Key::S => cam.move_backward(amount),
                    Key::A => cam.move_left(amount),
                    Key::D => cam.move_right(amount),
                    _ => {}
                }
            }
            InputEvent::CursorMoved(pos) => cam.look_at_cursor(pos),
            InputEvent::Scroll(lines) => cam.zoom(lines),
        }
    }

    close_requested
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn escape_requests_close_without_camera() {
        assert!(apply_input(None, &[InputEvent::KeyPressed(Key::Escape)], 0.016));
        assert!(!apply_input(
            None,
            &[InputEvent::KeyPressed(Key::W), InputEvent::Scroll(1.0)],
            0.016
        ));
    }

    #[test]
    fn movement_scales_with_frame_time() {
        let mut camera = Camera::new();
        let close = apply_input(Some(&mut camera), &[InputEvent::KeyPressed(Key::W)], 0.1);

        assert!(!close);
        let expected = Vec3::new(0.0, 0.0, 3.0 - 2.55);
        assert!((camera.get_pos() - expected).length() < 1e-4);
    }

    #[test]
    fn zero_dt_does_not_move() {
        let mut camera = Camera::new();
        apply_input(
            Some(&mut camera),
            &[
                InputEvent::KeyPressed(Key::W),
                InputEvent::KeyPressed(Key::D),
            ],
            0.0,
        );
        assert_eq!(camera.get_pos(), Vec3::new(0.0, 0.0, 3.0));
    }

    #[test]
    fn first_cursor_event_latches_then_turns() {
        let mut camera = Camera::new();
        let front = camera.get_front();

        apply_input(
            Some(&mut camera),
            &[InputEvent::CursorMoved(Vec2::new(640.0, 12.0))],
            0.016,
        );
        assert_eq!(camera.get_front(), front);

        apply_input(
            Some(&mut camera),
            &[InputEvent::CursorMoved(Vec2::new(650.0, 12.0))],
            0.016,
        );
        assert_ne!(camera.get_front(), front);
    }

    #[test]
    fn scroll_sequence_keeps_fov_clamped() {
        let mut camera = Camera::new();
        let events: Vec<_> = (0..200).map(|_| InputEvent::Scroll(3.0)).collect();
        apply_input(Some(&mut camera), &events, 0.016);
        assert_eq!(camera.get_fov(), 30.0);

        let events: Vec<_> = (0..200).map(|_| InputEvent::Scroll(-3.0)).collect();
        apply_input(Some(&mut camera), &events, 0.016);
        assert_eq!(camera.get_fov(), 120.0);
    }

    #[test]
    fn translates_pointer_and_wheel() {
        assert_eq!(
            translate(&Event::PointerMoved(egui::pos2(3.0, 4.0))),
            Some(InputEvent::CursorMoved(Vec2::new(3.0, 4.0)))
        );
        assert_eq!(
            translate(&Event::MouseWheel {
                unit: MouseWheelUnit::Point,
                delta: egui::vec2(0.0, 100.0),
                modifiers: egui::Modifiers::NONE,
            }),
            Some(InputEvent::Scroll(2.0))
        );
        assert_eq!(translate(&Event::PointerGone), None);
    }

    fn key_event(key: Key, pressed: bool, repeat: bool) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat,
            modifiers: egui::Modifiers::NONE,
        }
    }

    #[test]
    fn only_fresh_presses_become_key_events() {
        assert_eq!(
            translate(&key_event(Key::W, true, false)),
            Some(InputEvent::KeyPressed(Key::W))
        );
        assert_eq!(translate(&key_event(Key::W, true, true)), None);
        assert_eq!(translate(&key_event(Key::W, false, false)), None);
    }

    #[test]
    fn holding_a_key_moves_once() {
        let mut camera = Camera::new();
        let held = [
            key_event(Key::W, true, false),
            key_event(Key::W, true, true),
            key_event(Key::W, true, true),
            key_event(Key::W, true, true),
        ];
        let events: Vec<_> = held.iter().filter_map(translate).collect();
        apply_input(Some(&mut camera), &events, 0.1);

        let expected = Vec3::new(0.0, 0.0, 3.0 - 2.55);
        assert!((camera.get_pos() - expected).length() < 1e-4);
    }
}
