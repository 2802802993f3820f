use glam::DVec3;
use image::RgbImage;
use rayon::prelude::*;

use crate::camera::Camera;
use crate::error::DomainError;
use crate::light::PointLight;
use crate::ray;
use crate::scene::Scene;

/// Synthesize one frame: every pixel is unprojected to a world-space
/// target, tested against every sphere, and the nearest hit is shaded.
///
/// Pixels are independent, so the buffer is filled in parallel; the scene,
/// light and camera are shared read-only across workers. The first domain
/// error aborts the whole frame.
pub fn render(
    scene: &Scene,
    light: &PointLight,
    camera: &Camera,
) -> Result<RgbImage, DomainError> {
    let width = scene.width as usize;
    let viewport_height = camera.viewport.height;

    let mut data = vec![0u8; width * scene.height as usize * 3];
    data.par_chunks_mut(3)
        .enumerate()
        .try_for_each(|(index, pixel)| {
            let x = (index % width) as f64;
            let y = (index / width) as f64;

            // Window y grows upward, image rows grow downward.
            let real_y = viewport_height - y - 1.0;
            let lookat = camera.world_position(x, real_y, 1.0)?;

            let color = match nearest_hit(scene, camera.eye, lookat) {
                Some((sphere_index, t)) => {
                    let sphere = &scene.spheres()[sphere_index];
                    let point = ray::hit_point(camera.eye, lookat, t);
                    let shaded = light.shade(point, sphere.center, camera.eye)?;
                    combine(shaded, sphere.color)?
                }
                None => scene.background,
            };

            pixel[0] = quantize(color.x);
            pixel[1] = quantize(color.y);
            pixel[2] = quantize(color.z);
            Ok(())
        })?;

    Ok(RgbImage::from_raw(scene.width, scene.height, data).unwrap())
}

/// Index and parameter of the nearest sphere with `t > 0`, scanning in
/// insertion order. The strict `<` keeps the first-seen sphere on equal t.
fn nearest_hit(scene: &Scene, lookfrom: DVec3, lookat: DVec3) -> Option<(usize, f64)> {
    let mut nearest: Option<(usize, f64)> = None;
    for (index, sphere) in scene.spheres().iter().enumerate() {
        let t = ray::hit_parameter(lookfrom, lookat, sphere);
        if t <= 0.0 {
            continue;
        }
        match nearest {
            Some((_, best)) if t >= best => {}
            _ => nearest = Some((index, t)),
        }
    }
    nearest
}

/// Modulate shaded light by the sphere's base color, normalized by the
/// color's own norm.
fn combine(shaded: DVec3, base: DVec3) -> Result<DVec3, DomainError> {
    let norm = base.length();
    if norm == 0.0 {
        return Err(DomainError::ZeroLengthColor);
    }
    Ok(shaded * (base / norm))
}

/// Clamp to the displayable range before the 8-bit cast.
fn quantize(channel: f64) -> u8 {
    channel.clamp(0.0, 255.0) as u8
}
