//! Host-side mirror of the fragment stage in [`crate::shaders::FRAGMENT_SHADER`].
//!
//! Follows GLSL semantics (`fract` is `x - floor(x)`, `mix` is
//! `x * (1 - a) + y * a`) so values can be checked without a GPU.

use glam::{Vec2, Vec3, Vec3Swizzles};

pub const HASH_SCALE: f32 = 0.13;
pub const HASH_BIAS: f32 = 3.333;

pub const OCTAVES: usize = 5;
pub const OCTAVE_OFFSET: Vec2 = Vec2::new(1.7, 9.2);
pub const TIME_SCALE: f32 = 0.08;

pub const BASE: f32 = 0.02;
pub const VARIATION: f32 = 0.12;
pub const WISP: f32 = 0.08;
/// `smoothstep` edges gating the wisp on the second layer.
pub const WISP_EDGES: (f32, f32) = (0.55, 0.7);

/// Weights of `n1`, `n2`, `n3` in the combined pattern.
pub const LAYER_WEIGHTS: [f32; 3] = [0.4, 0.35, 0.25];

/// Upper bound (exclusive) of [`fbm`]: the sum of the octave amplitudes.
pub const FBM_MAX: f32 = 0.96875;

fn fract(x: f32) -> f32 {
    x - x.floor()
}

fn mix(x: f32, y: f32, a: f32) -> f32 {
    x * (1.0 - a) + y * a
}

pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Pseudo-random value in `[0, 1)` for a grid cell.
pub fn hash(p: Vec2) -> f32 {
    let p3 = Vec3::new(p.x, p.y, p.x) * HASH_SCALE;
    let mut p3 = p3 - p3.floor();
    p3 += p3.dot(p3.yzx() + HASH_BIAS);
    fract((p3.x + p3.y) * p3.z)
}

/// Smoothstep-weighted bilinear blend of the four hashed cell corners.
pub fn value_noise(p: Vec2) -> f32 {
    let i = p.floor();
    let f = p - i;
    let u = f * f * (Vec2::splat(3.0) - 2.0 * f);

    let a = hash(i);
    let b = hash(i + Vec2::X);
    let c = hash(i + Vec2::Y);
    let d = hash(i + Vec2::ONE);

    mix(mix(a, b, u.x), mix(c, d, u.x), u.y)
}

pub fn fbm(mut p: Vec2) -> f32 {
    let mut value = 0.0f32;
    let mut amplitude = 0.5f32;
    let mut frequency = 1.0f32;
    for _ in 0..OCTAVES {
        value += amplitude * value_noise(p * frequency);
        frequency *= 2.0;
        amplitude *= 0.5;
        p += OCTAVE_OFFSET;
    }
    value
}

/// The three fbm layers evaluated for one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layers {
    pub n1: f32,
    pub n2: f32,
    pub n3: f32,
}

impl Layers {
    pub fn pattern(&self) -> f32 {
        let [w1, w2, w3] = LAYER_WEIGHTS;
        self.n1 * w1 + self.n2 * w2 + self.n3 * w3
    }
}

pub fn layers(frag_coord: Vec2, resolution: Vec2, time: f32) -> Layers {
    let uv = frag_coord / resolution.y;
    let t = time * TIME_SCALE;

    let n1 = fbm(uv * 3.0 + Vec2::new(t * 0.3, t * 0.2));
    let n2 = fbm(uv * 5.0 - Vec2::new(t * 0.2, t * 0.15) + Vec2::splat(n1 * 0.5));
    let n3 = fbm(uv * 2.0 + Vec2::new(n2 * 0.3, n1 * 0.3) + Vec2::splat(t * 0.1));

    Layers { n1, n2, n3 }
}

/// Grey level written to `fragColor.rgb` for the pixel at `frag_coord`.
pub fn shade(frag_coord: Vec2, resolution: Vec2, time: f32) -> f32 {
    let layers = layers(frag_coord, resolution, time);
    let wisp = smoothstep(WISP_EDGES.0, WISP_EDGES.1, layers.n2) * WISP;
    BASE + layers.pattern() * VARIATION + wisp
}
