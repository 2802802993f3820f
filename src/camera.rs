use glam::{DMat4, DVec3, DVec4};
use winit::event::{ElementState, KeyboardInput, VirtualKeyCode, WindowEvent};

use crate::error::DomainError;

/// Window-space viewport rectangle, `[x, y, width, height]`.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Eye position plus the fixed transform state used to unproject screen
/// pixels into world space.
pub struct Camera {
    /// Lookfrom: camera world position.
    pub eye: DVec3,
    /// Initial lookat. Only a placeholder; the renderer computes a fresh
    /// per-pixel target through [`Camera::world_position`].
    pub target: DVec3,
    pub model: DMat4,
    pub projection: DMat4,
    pub viewport: Viewport,
}

impl Camera {
    pub fn new(
        eye: DVec3,
        target: DVec3,
        model: DMat4,
        projection: DMat4,
        viewport: Viewport,
    ) -> Self {
        Self {
            eye,
            target,
            model,
            projection,
            viewport,
        }
    }

    /// Unproject window coordinates (`win_z` in [0, 1]) to world space.
    pub fn world_position(
        &self,
        win_x: f64,
        win_y: f64,
        win_z: f64,
    ) -> Result<DVec3, DomainError> {
        world_position(
            win_x,
            win_y,
            win_z,
            &self.model,
            &self.projection,
            &self.viewport,
        )
    }
}

/// Screen-to-world transform: window coordinates to normalized device
/// coordinates, then through the inverse of `projection * model`.
pub fn world_position(
    win_x: f64,
    win_y: f64,
    win_z: f64,
    model: &DMat4,
    projection: &DMat4,
    viewport: &Viewport,
) -> Result<DVec3, DomainError> {
    let transform = *projection * *model;
    if transform.determinant() == 0.0 {
        return Err(DomainError::SingularMatrix);
    }

    let ndc = DVec4::new(
        2.0 * (win_x - viewport.x) / viewport.width - 1.0,
        2.0 * (win_y - viewport.y) / viewport.height - 1.0,
        2.0 * win_z - 1.0,
        1.0,
    );

    let world = transform.inverse() * ndc;
    if world.w == 0.0 {
        return Err(DomainError::SingularMatrix);
    }
    Ok(world.truncate() / world.w)
}

pub struct CameraController {
    pub speed: f64,
}

impl CameraController {
    pub fn new(speed: f64) -> Self {
        Self { speed }
    }

    /// W/S dolly the eye along z. Returns whether the camera moved.
    pub fn process_events(&self, camera: &mut Camera, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                input:
                    KeyboardInput {
                        state,
                        virtual_keycode: Some(keycode),
                        ..
                    },
                ..
            } if *state == ElementState::Pressed => match keycode {
                VirtualKeyCode::W => {
                    camera.eye.z += self.speed;
                    tracing::info!("key press W");
                    true
                }
                VirtualKeyCode::S => {
                    camera.eye.z -= self.speed;
                    tracing::info!("key press S");
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::{DMat4, DVec3};

    use super::{world_position, Viewport};
    use crate::error::DomainError;

    fn ortho_viewport() -> (DMat4, DMat4, Viewport) {
        let model = DMat4::IDENTITY;
        let projection = DMat4::orthographic_rh_gl(0.0, 300.0, 0.0, 300.0, -1.0, 1.0);
        let viewport = Viewport {
            x: 0.0,
            y: 0.0,
            width: 300.0,
            height: 300.0,
        };
        (model, projection, viewport)
    }

    #[test]
    fn orthographic_unprojection_recovers_pixel_coordinates() {
        let (model, projection, viewport) = ortho_viewport();
        let world = world_position(150.0, 149.0, 1.0, &model, &projection, &viewport).unwrap();
        assert_relative_eq!(world.x, 150.0, max_relative = 1e-9);
        assert_relative_eq!(world.y, 149.0, max_relative = 1e-9);
        assert_relative_eq!(world.z, -1.0, max_relative = 1e-9);
    }

    #[test]
    fn near_plane_depth_maps_to_the_other_end() {
        let (model, projection, viewport) = ortho_viewport();
        let world = world_position(0.0, 0.0, 0.0, &model, &projection, &viewport).unwrap();
        assert_relative_eq!(world.z, 1.0, max_relative = 1e-9);
    }

    #[test]
    fn singular_transform_is_rejected() {
        let (model, _, viewport) = ortho_viewport();
        let result = world_position(0.0, 0.0, 1.0, &model, &DMat4::ZERO, &viewport);
        assert_eq!(result, Err(DomainError::SingularMatrix));
    }

    #[test]
    fn camera_forwards_its_own_state() {
        let (model, projection, viewport) = ortho_viewport();
        let camera = super::Camera::new(
            DVec3::new(155.0, 150.0, -150.0),
            DVec3::new(2.0, 1.0, 0.0),
            model,
            projection,
            viewport,
        );
        let world = camera.world_position(10.0, 20.0, 1.0).unwrap();
        assert_relative_eq!(world.x, 10.0, max_relative = 1e-9);
        assert_relative_eq!(world.y, 20.0, max_relative = 1e-9);
    }
}
