use glam::DVec3;

use crate::error::DomainError;
use crate::util::math;

/// Phong illumination constants. `shininess` is the specular exponent; the
/// reference scene uses 2.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongConstants {
    pub ka: f64,
    pub ks: f64,
    pub kd: f64,
    /// Ambient intensity `Ia`.
    pub ambient_intensity: f64,
    /// Per-channel light intensity.
    pub intensity: DVec3,
    /// Attenuation factor `fat`.
    pub attenuation: f64,
    pub shininess: f64,
}

/// A single point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: DVec3,
    pub phong: PhongConstants,
}

impl PointLight {
    pub fn new(position: DVec3, phong: PhongConstants) -> Self {
        Self { position, phong }
    }

    /// Per-channel Phong intensity at `point` on the sphere centered at
    /// `center`, observed from `eye`.
    ///
    /// Pure: the derived normal, light, observer and reflection vectors are
    /// locals recomputed on every call.
    pub fn shade(
        &self,
        point: DVec3,
        center: DVec3,
        eye: DVec3,
    ) -> Result<DVec3, DomainError> {
        let phong = &self.phong;

        let n = math::try_normalize(point - center)?;
        let l = math::try_normalize(self.position - point)?;
        let o = math::try_normalize(eye - point)?;
        let r = math::try_normalize(2.0 * n * n.dot(l) - l)?;

        let diffuse = phong.kd * n.dot(l);
        let specular = phong.ks * o.dot(r).powf(phong.shininess);
        let ambient = phong.ka * phong.ambient_intensity;

        Ok(DVec3::splat(ambient) + phong.attenuation * phong.intensity * (diffuse + specular))
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::{PhongConstants, PointLight};
    use crate::error::DomainError;

    fn reference_light() -> PointLight {
        PointLight::new(
            DVec3::new(3.0, 3.0, 3.0),
            PhongConstants {
                ka: 0.4,
                ks: 0.3,
                kd: 0.3,
                ambient_intensity: 200.0,
                intensity: DVec3::splat(192.0),
                attenuation: 1.0,
                shininess: 2.0,
            },
        )
    }

    #[test]
    fn shading_is_a_pure_function_of_its_inputs() {
        let light = reference_light();
        let point = DVec3::new(150.0, 149.26, -39.99);
        let center = DVec3::new(150.0, 150.0, 0.0);
        let eye = DVec3::new(150.0, 150.0, -150.0);

        let first = light.shade(point, center, eye).unwrap();
        let second = light.shade(point, center, eye).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn zero_coefficients_leave_only_the_ambient_term() {
        let mut light = reference_light();
        light.phong.kd = 0.0;
        light.phong.ks = 0.0;

        let shaded = light
            .shade(DVec3::new(0.0, 0.0, -1.0), DVec3::ZERO, DVec3::new(0.0, 0.0, -10.0))
            .unwrap();
        assert_eq!(shaded, DVec3::splat(0.4 * 200.0));
    }

    #[test]
    fn point_on_center_is_a_domain_error() {
        let light = reference_light();
        let center = DVec3::new(1.0, 2.0, 3.0);
        assert_eq!(
            light.shade(center, center, DVec3::ZERO),
            Err(DomainError::ZeroLengthVector)
        );
    }
}
