use glam::DVec3;
use rand::Rng;

/// Solid texture: a single color drawn from a per-channel range.
///
/// A channel whose bounds round up to the same value is degenerate and
/// contributes 0 instead of a random draw.
#[derive(Debug, Clone, Copy)]
pub struct SolidTexture {
    low: DVec3,
    high: DVec3,
}

impl SolidTexture {
    pub fn new(low: DVec3, high: DVec3) -> Self {
        Self { low, high }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> DVec3 {
        DVec3::new(
            sample_channel(rng, self.low.x, self.high.x),
            sample_channel(rng, self.low.y, self.high.y),
            sample_channel(rng, self.low.z, self.high.z),
        )
    }
}

fn sample_channel<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    if low.ceil() == high.ceil() {
        return 0.0;
    }
    let (lo, hi) = if low < high { (low, high) } else { (high, low) };
    rng.gen_range(lo..hi)
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::SolidTexture;

    #[test]
    fn degenerate_range_yields_zero() {
        let texture = SolidTexture::new(DVec3::splat(127.0), DVec3::splat(127.0));
        let color = texture.sample(&mut rand::thread_rng());
        assert_eq!(color, DVec3::ZERO);
    }

    #[test]
    fn samples_stay_within_channel_bounds() {
        let texture = SolidTexture::new(
            DVec3::new(0.0, 0.0, 254.0),
            DVec3::new(0.0, 0.0, 255.0),
        );
        let mut rng = rand::thread_rng();
        for _ in 0..64 {
            let color = texture.sample(&mut rng);
            assert_eq!(color.x, 0.0);
            assert_eq!(color.y, 0.0);
            assert!((254.0..255.0).contains(&color.z));
        }
    }

    #[test]
    fn reversed_bounds_sample_the_same_interval() {
        let texture = SolidTexture::new(
            DVec3::new(255.0, 0.0, 0.0),
            DVec3::new(254.0, 0.0, 0.0),
        );
        let color = texture.sample(&mut rand::thread_rng());
        assert!((254.0..255.0).contains(&color.x));
    }
}
