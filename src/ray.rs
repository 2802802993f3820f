use glam::DVec3;

use crate::scene::Sphere;

/// Sentinel for a ray that misses the sphere entirely (negative
/// discriminant). Plain control flow, never an error.
pub const NO_HIT: f64 = -1.0;

/// Intersection parameter of the ray cast from `lookfrom` through `lookat`
/// against `sphere`.
///
/// Substituting the parametric ray into the sphere equation gives the
/// quadratic `a·t² + b·t + c = 0`; a negative discriminant returns
/// [`NO_HIT`], otherwise the smaller root. The caller treats `t <= 0.0` as
/// no usable hit — a camera inside the sphere yields a negative nearest
/// root and is deliberately a miss.
pub fn hit_parameter(lookfrom: DVec3, lookat: DVec3, sphere: &Sphere) -> f64 {
    let d = lookat - lookfrom;
    let center = sphere.center;

    let a = d.dot(d);
    let b = 2.0 * (lookfrom.dot(d) - center.dot(d));
    let c = lookfrom.length_squared() + center.length_squared()
        - sphere.radius * sphere.radius
        - 2.0 * center.dot(lookfrom);

    let delta = b * b - 4.0 * a * c;
    if delta < 0.0 {
        return NO_HIT;
    }

    let t1 = (-b + delta.sqrt()) / (2.0 * a);
    let t2 = (-b - delta.sqrt()) / (2.0 * a);
    t1.min(t2)
}

/// Point reached at parameter `t` along the ray from `lookfrom` through
/// `lookat`.
pub fn hit_point(lookfrom: DVec3, lookat: DVec3, t: f64) -> DVec3 {
    lookfrom + t * (lookat - lookfrom)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::DVec3;

    use super::{hit_parameter, hit_point, NO_HIT};
    use crate::scene::Sphere;

    fn unit_sphere_at_origin() -> Sphere {
        Sphere {
            center: DVec3::ZERO,
            radius: 1.0,
            ..Sphere::default()
        }
    }

    #[test]
    fn miss_returns_exact_sentinel() {
        let sphere = unit_sphere_at_origin();
        let t = hit_parameter(
            DVec3::new(0.0, 5.0, -10.0),
            DVec3::new(0.0, 5.0, 0.0),
            &sphere,
        );
        assert_eq!(t, NO_HIT);
    }

    #[test]
    fn axial_ray_hits_near_surface_first() {
        let sphere = unit_sphere_at_origin();
        let lookfrom = DVec3::new(0.0, 0.0, -10.0);
        let lookat = DVec3::ZERO;

        let t = hit_parameter(lookfrom, lookat, &sphere);
        assert_relative_eq!(t, 0.9, max_relative = 1e-12);

        let point = hit_point(lookfrom, lookat, t);
        assert_relative_eq!(point.z, -1.0, max_relative = 1e-12);
        assert_eq!(point.x, 0.0);
        assert_eq!(point.y, 0.0);
    }

    #[test]
    fn accepted_hit_lies_on_the_surface() {
        let sphere = Sphere {
            center: DVec3::new(150.0, 150.0, 0.0),
            radius: 40.0,
            ..Sphere::default()
        };
        let lookfrom = DVec3::new(155.0, 150.0, -150.0);
        let lookat = DVec3::new(150.0, 149.0, -1.0);

        let t = hit_parameter(lookfrom, lookat, &sphere);
        assert!(t > 0.0);

        let point = hit_point(lookfrom, lookat, t);
        assert_relative_eq!(
            (point - sphere.center).length(),
            sphere.radius,
            max_relative = 1e-6
        );
    }

    #[test]
    fn camera_inside_sphere_yields_non_positive_root() {
        let sphere = unit_sphere_at_origin();
        let t = hit_parameter(DVec3::ZERO, DVec3::new(0.0, 0.0, 1.0), &sphere);
        assert!(t <= 0.0);
    }
}
