use glam::DVec3;

use crate::sampler::SolidTexture;

/// Reflectance coefficients, conceptually in [0, 1] (unchecked).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub kd: f64,
    pub ks: f64,
}

/// The only renderable primitive. `color` holds RGB components intended in
/// [0, 255]; the renderer normalizes by the color's own norm before use.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    pub center: DVec3,
    pub radius: f64,
    pub material: Material,
    pub color: DVec3,
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            radius: 1.0,
            material: Material { kd: 1.0, ks: 0.0 },
            color: DVec3::splat(255.0),
        }
    }
}

/// A frame's worth of world state: owned spheres, ambient constant,
/// background color and output image dimensions.
#[derive(Debug, Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
    pub ambient: f64,
    pub background: DVec3,
    pub width: u32,
    pub height: u32,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Add a sphere whose color is resolved by sampling the given
    /// per-channel range once, at insertion.
    pub fn add_sphere(
        &mut self,
        center: DVec3,
        radius: f64,
        kd: f64,
        ks: f64,
        color_low: DVec3,
        color_high: DVec3,
    ) {
        let color = SolidTexture::new(color_low, color_high).sample(&mut rand::thread_rng());
        self.push(Sphere {
            center,
            radius,
            material: Material { kd, ks },
            color,
        });
    }

    pub fn push(&mut self, sphere: Sphere) {
        self.spheres.push(sphere);
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn len(&self) -> usize {
        self.spheres.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spheres.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::Scene;

    #[test]
    fn add_sphere_resolves_color_from_range() {
        let mut scene = Scene::new(300, 300);
        scene.add_sphere(
            DVec3::new(150.0, 150.0, 0.0),
            40.0,
            0.3,
            0.3,
            DVec3::new(0.0, 0.0, 254.0),
            DVec3::new(0.0, 0.0, 255.0),
        );

        assert_eq!(scene.len(), 1);
        let sphere = &scene.spheres()[0];
        assert_eq!(sphere.color.x, 0.0);
        assert_eq!(sphere.color.y, 0.0);
        assert!((254.0..255.0).contains(&sphere.color.z));
    }

    #[test]
    fn degenerate_ranges_give_a_zero_color() {
        let mut scene = Scene::new(300, 300);
        scene.add_sphere(
            DVec3::ZERO,
            1.0,
            0.5,
            0.5,
            DVec3::splat(40.0),
            DVec3::splat(40.0),
        );

        assert_eq!(scene.spheres()[0].color, DVec3::ZERO);
    }
}
