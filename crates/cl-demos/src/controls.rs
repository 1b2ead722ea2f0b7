use cl_engine::camera::Camera2D;
use cl_engine::input::{InputState, Key};

/// Keyboard bindings for the camera demo.
///
/// W/A/S/D pan, E/Q zoom in/out. Moves are scaled by frame time, so the
/// camera's speed is in world units per second.
#[derive(Debug, Clone, Copy)]
pub struct CameraControls {
    /// Zoom change per second, as a fraction of the current zoom.
    pub zoom_rate: f32,
}

impl Default for CameraControls {
    fn default() -> Self {
        Self { zoom_rate: 1.0 }
    }
}

impl CameraControls {
    /// Applies held keys to `camera` for a frame lasting `dt` seconds.
    pub fn apply(&self, camera: &mut Camera2D, input: &InputState, dt: f32) {
        let right = input.axis(Key::A, Key::D);
        let up = input.axis(Key::S, Key::W);

        if right != 0.0 {
            camera.move_right(right * dt);
        }
        if up != 0.0 {
            camera.move_up(up * dt);
        }

        match input.axis(Key::Q, Key::E) {
            z if z > 0.0 => camera.zoom_by(1.0 + self.zoom_rate * dt),
            z if z < 0.0 => camera.zoom_by(1.0 / (1.0 + self.zoom_rate * dt)),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cl_engine::glam::Vec2;
    use cl_engine::input::{InputEvent, InputFrame, KeyState, Modifiers};

    fn held(keys: &[Key]) -> InputState {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        for &key in keys {
            state.apply_event(
                &mut frame,
                InputEvent::Key { key, state: KeyState::Pressed, modifiers: Modifiers::default(), repeat: false },
            );
        }
        state
    }

    #[test]
    fn idle_input_leaves_camera_alone() {
        let mut cam = Camera2D::new();
        CameraControls::default().apply(&mut cam, &held(&[]), 0.5);
        assert_eq!(cam.position(), Vec2::ZERO);
        assert_eq!(cam.zoom(), 1.0);
    }

    #[test]
    fn wasd_pans_by_speed_times_dt() {
        let mut cam = Camera2D::new().with_speed(2.0);
        CameraControls::default().apply(&mut cam, &held(&[Key::D, Key::W]), 0.25);
        assert_eq!(cam.position(), Vec2::new(0.5, 0.5));

        CameraControls::default().apply(&mut cam, &held(&[Key::A, Key::S]), 0.25);
        assert_eq!(cam.position(), Vec2::ZERO);
    }

    #[test]
    fn opposing_keys_cancel() {
        let mut cam = Camera2D::new();
        CameraControls::default().apply(&mut cam, &held(&[Key::A, Key::D]), 1.0);
        assert_eq!(cam.position().x, 0.0);
    }

    #[test]
    fn e_zooms_in_and_q_zooms_out() {
        let controls = CameraControls { zoom_rate: 1.0 };
        let mut cam = Camera2D::new();

        controls.apply(&mut cam, &held(&[Key::E]), 0.5);
        assert_eq!(cam.zoom(), 1.5);

        controls.apply(&mut cam, &held(&[Key::Q]), 0.5);
        assert!((cam.zoom() - 1.0).abs() < 1e-6);
    }
}
