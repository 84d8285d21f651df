//! Seeded 3D gradient noise with a fixed four-octave fractal sum.
//!
//! The permutation table is shuffled with a single scalar seed reused for
//! every swap index, so nearby seeds give strongly correlated tables. Terrain
//! generation depends on this exact table, keep it.

use citydrive_core::constants::{NOISE_OCTAVES, NOISE_PERSISTENCE};

/// Deterministic height-field sampler.
#[derive(Debug, Clone)]
pub struct NoiseGenerator {
    /// 256-entry permutation doubled to avoid index wrapping.
    perm: [u8; 512],
}

impl NoiseGenerator {
    /// Create a generator seeded with `seed` in [0, 1).
    pub fn new(seed: f64) -> Self {
        let mut generator = Self { perm: [0; 512] };
        generator.seed(seed);
        generator
    }

    /// Rebuild the permutation table from `value` in [0, 1).
    pub fn seed(&mut self, value: f64) {
        let mut table: [u8; 256] = std::array::from_fn(|i| i as u8);
        for i in (1..table.len()).rev() {
            let j = ((value * (i as f64 + 1.0)).floor().max(0.0) as usize).min(i);
            table.swap(i, j);
        }
        for (i, slot) in self.perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
    }

    /// Four-octave fractal noise at a point, normalized to [-1, 1].
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..NOISE_OCTAVES {
            total += self.gradient_noise(x * frequency, y * frequency, z * frequency) * amplitude;
            max_value += amplitude;
            amplitude *= NOISE_PERSISTENCE;
            frequency *= 2.0;
        }

        (total / max_value).clamp(-1.0, 1.0)
    }

    /// Single octave of improved gradient noise.
    fn gradient_noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let xf = x.floor();
        let yf = y.floor();
        let zf = z.floor();

        let xi = (xf as i64 & 255) as usize;
        let yi = (yf as i64 & 255) as usize;
        let zi = (zf as i64 & 255) as usize;

        let x = x - xf;
        let y = y - yf;
        let z = z - zf;

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let p = &self.perm;
        let a = p[xi] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p[aa], x, y, z), grad(p[ba], x - 1.0, y, z)),
                lerp(
                    u,
                    grad(p[ab], x, y - 1.0, z),
                    grad(p[bb], x - 1.0, y - 1.0, z),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p[aa + 1], x, y, z - 1.0),
                    grad(p[ba + 1], x - 1.0, y, z - 1.0),
                ),
                lerp(
                    u,
                    grad(p[ab + 1], x, y - 1.0, z - 1.0),
                    grad(p[bb + 1], x - 1.0, y - 1.0, z - 1.0),
                ),
            ),
        )
    }
}

/// Quintic fade curve 6t^5 - 15t^4 + 10t^3.
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Dot product with one of the 16 edge-direction gradients picked by `hash`.
fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}
