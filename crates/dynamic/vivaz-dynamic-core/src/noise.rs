//! 1-D Perlin noise and the stateful sampler used by evaluation methods.

use crate::host::Host;

/// Permutation table from Ken Perlin's reference implementation.
const PERM: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

#[inline]
fn perm(x: i64) -> u8 {
    PERM[(x & 255) as usize]
}

#[inline]
fn grad1(hash: u8, x: f64) -> f64 {
    if hash & 1 != 0 {
        -x
    } else {
        x
    }
}

#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// 1-D Perlin noise in [0, 1].
pub fn perlin1(x: f64) -> f64 {
    let xi = x.floor() as i64;
    let xf = x - x.floor();
    let u = fade(xf);

    let a = grad1(perm(xi), xf);
    let b = grad1(perm(xi + 1), xf - 1.0);

    ((a + (b - a) * u) * 0.5 + 0.5).clamp(0.0, 1.0)
}

/// Stateful noise cursor: each sample reads the host's noise at the current
/// offset, scales it into `[min, max]` and advances the offset by `step`.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseSampler {
    min: f64,
    max: f64,
    step: f64,
    offset: f64,
}

impl NoiseSampler {
    /// Sampler starting at a random offset in `[0, offset_span)`.
    pub fn new(min: f64, max: f64, step: f64, offset_span: f64, host: &mut dyn Host) -> Self {
        let offset = host.random_range(0.0, offset_span);
        Self::with_offset(min, max, step, offset)
    }

    pub fn with_offset(min: f64, max: f64, step: f64, offset: f64) -> Self {
        Self {
            min,
            max,
            step,
            offset,
        }
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn sample(&mut self, host: &dyn Host) -> f64 {
        let v = host.noise(self.offset) * (self.max - self.min) + self.min;
        self.offset += self.step;
        v
    }
}
