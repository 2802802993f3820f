pub mod math {
    use glam::DVec3;

    use crate::error::DomainError;

    pub fn radian_to_degree(radian: f64) -> f64 {
        radian * 180.0 / std::f64::consts::PI
    }

    /// Normalize `v`, failing instead of producing NaN components.
    pub fn try_normalize(v: DVec3) -> Result<DVec3, DomainError> {
        let norm = v.length();
        if norm == 0.0 {
            return Err(DomainError::ZeroLengthVector);
        }
        Ok(v / norm)
    }

    /// Angle between `a` and `b` in degrees.
    pub fn angle_degrees(a: DVec3, b: DVec3) -> Result<f64, DomainError> {
        let norms = a.length() * b.length();
        if norms == 0.0 {
            return Err(DomainError::ZeroLengthVector);
        }
        Ok(radian_to_degree((a.dot(b) / norms).acos()))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::DVec3;

    use super::math;
    use crate::error::DomainError;

    #[test]
    fn normalize_scales_to_unit_length() {
        let v = math::try_normalize(DVec3::new(3.0, 0.0, 4.0)).unwrap();
        assert_relative_eq!(v.length(), 1.0);
        assert_relative_eq!(v.x, 0.6);
        assert_relative_eq!(v.z, 0.8);
    }

    #[test]
    fn normalize_rejects_zero_vector() {
        assert_eq!(
            math::try_normalize(DVec3::ZERO),
            Err(DomainError::ZeroLengthVector)
        );
    }

    #[test]
    fn perpendicular_axes_are_ninety_degrees() {
        let angle = math::angle_degrees(DVec3::X, DVec3::Y).unwrap();
        assert_relative_eq!(angle, 90.0, max_relative = 1e-9);
    }

    #[test]
    fn angle_rejects_zero_norm_operand() {
        assert_eq!(
            math::angle_degrees(DVec3::ZERO, DVec3::X),
            Err(DomainError::ZeroLengthVector)
        );
    }
}
