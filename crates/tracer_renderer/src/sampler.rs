//! Per-pixel pseudorandom sampler.
//!
//! Two multiply-with-carry generators whose states are seeded from the
//! pixel coordinate. Every pixel owns one sampler for its whole lifetime,
//! so an image renders identically no matter how pixels are scheduled.

const MWC1: u32 = 36969;
const MWC2: u32 = 18000;

/// Deterministic random stream for a single pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSampler {
    s1: u32,
    s2: u32,
}

impl PixelSampler {
    /// Create the sampler for pixel (x, y).
    pub fn new(x: u32, y: u32) -> Self {
        let h = mix(x.wrapping_mul(0x9e37_79b9) ^ mix(y));
        Self {
            s1: seed_state(h, MWC1),
            s2: seed_state(mix(h ^ 0x85eb_ca6b), MWC2),
        }
    }

    /// Next uniform value in [0, 1).
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.s1 = MWC1 * (self.s1 & 0xffff) + (self.s1 >> 16);
        self.s2 = MWC2 * (self.s2 & 0xffff) + (self.s2 >> 16);
        let bits = (self.s1 << 16).wrapping_add(self.s2);

        // 23 random mantissa bits under exponent 1: a float in [2, 4)
        let f = f32::from_bits((bits & 0x007f_ffff) | 0x4000_0000);
        (f - 2.0) / 2.0
    }
}

/// Map a hash onto a valid generator state in [1, a * 2^16 - 2].
///
/// Zero and a * 2^16 - 1 are fixed points of the recurrence.
#[inline]
fn seed_state(hash: u32, multiplier: u32) -> u32 {
    1 + hash % (multiplier * 0x1_0000 - 2)
}

/// 32-bit integer finalizer (xorshift-multiply).
#[inline]
fn mix(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x7feb_352d);
    h ^= h >> 15;
    h = h.wrapping_mul(0x846c_a68b);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_values_in_unit_interval() {
        for (x, y) in [(0, 0), (1, 0), (0, 1), (639, 479), (u32::MAX, u32::MAX)] {
            let mut sampler = PixelSampler::new(x, y);
            for _ in 0..10_000 {
                let v = sampler.next_f32();
                assert!((0.0..1.0).contains(&v), "({x}, {y}) produced {v}");
            }
        }
    }

    #[test]
    fn test_same_pixel_same_stream() {
        let mut a = PixelSampler::new(12, 34);
        let mut b = PixelSampler::new(12, 34);
        for _ in 0..100 {
            assert_eq!(a.next_f32().to_bits(), b.next_f32().to_bits());
        }
    }

    #[test]
    fn test_neighbouring_pixels_differ() {
        let first: Vec<f32> = (0..4).map(|x| PixelSampler::new(x, 0).next_f32()).collect();
        for i in 0..first.len() {
            for j in i + 1..first.len() {
                assert_ne!(first[i], first[j]);
            }
        }
    }

    #[test]
    fn test_origin_pixel_not_degenerate() {
        let mut sampler = PixelSampler::new(0, 0);
        let draws: Vec<f32> = (0..8).map(|_| sampler.next_f32()).collect();
        assert!(draws.iter().any(|&v| v != draws[0]));
    }

    #[test]
    fn test_roughly_uniform() {
        let mut sampler = PixelSampler::new(100, 200);
        let n = 100_000;
        let mut buckets = [0u32; 10];
        let mut sum = 0.0f64;
        for _ in 0..n {
            let v = sampler.next_f32();
            sum += v as f64;
            buckets[(v * 10.0) as usize] += 1;
        }

        let mean = sum / n as f64;
        assert!((mean - 0.5).abs() < 0.01, "mean {mean}");
        for count in buckets {
            assert!((count as f64 - 10_000.0).abs() < 1_000.0, "bucket {count}");
        }
    }

    #[test]
    fn test_seed_state_range() {
        assert_eq!(seed_state(0, MWC1), 1);
        assert_eq!(seed_state(u32::MAX, MWC2), 1 + u32::MAX % (MWC2 * 0x1_0000 - 2));
        assert!(seed_state(u32::MAX, MWC1) < MWC1 * 0x1_0000 - 1);
    }
}
