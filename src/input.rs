use winit::event::ElementState;
use winit::keyboard::KeyCode;

use crate::render::camera::{CameraMove, CameraState};

pub fn camera_move_for(key: KeyCode) -> Option<CameraMove> {
    match key {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(CameraMove::Forward),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(CameraMove::Backward),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(CameraMove::Left),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(CameraMove::Right),
        KeyCode::Space => Some(CameraMove::Up),
        KeyCode::ShiftLeft => Some(CameraMove::Down),
        _ => None,
    }
}

/// Moves the camera one step per press (key repeats arrive as presses too).
/// Returns `true` if the key was a camera key.
pub fn handle_key(camera: &mut CameraState, key: KeyCode, state: ElementState) -> bool {
    let Some(movement) = camera_move_for(key) else {
        return false;
    };

    if state == ElementState::Pressed {
        camera.translate(movement);
        log::trace!("Camera moved {:?} to {}", movement, camera.position);
    }
    true
}
