//! Math and noise helpers exposed to the page scripts.

use wasm_bindgen::prelude::*;

#[wasm_bindgen(js_name = formatNumber)]
pub fn format_number(n: f64) -> String {
    dash_core::format_number(n.trunc() as i64)
}

#[wasm_bindgen(js_name = randomBetween)]
pub fn random_between(min: f32, max: f32) -> f32 {
    dash_core::random_between(min, max)
}

#[wasm_bindgen]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    dash_core::lerp(start, end, t)
}

#[wasm_bindgen]
pub fn clamp(value: f32, lo: f32, hi: f32) -> f32 {
    dash_core::clamp(value, lo, hi)
}

#[wasm_bindgen(js_name = easeInOutCubic)]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    dash_core::ease_in_out_cubic(t)
}

#[wasm_bindgen(js_name = easeOutBounce)]
pub fn ease_out_bounce(t: f32) -> f32 {
    dash_core::ease_out_bounce(t)
}

#[wasm_bindgen]
pub fn noise(x: f64, y: f64, z: f64) -> f64 {
    dash_core::noise(x, y, z)
}

#[wasm_bindgen(js_name = smoothNoise)]
pub fn smooth_noise(x: f64, y: f64, z: f64) -> f64 {
    dash_core::smooth_noise(x, y, z)
}

/// `octaves`/`persistence` default to 4 and 0.5 when omitted.
#[wasm_bindgen(js_name = perlinNoise)]
pub fn perlin_noise(x: f64, y: f64, z: f64, octaves: Option<u32>, persistence: Option<f64>) -> f64 {
    dash_core::perlin_noise(
        x,
        y,
        z,
        octaves.unwrap_or(dash_core::constants::PERLIN_OCTAVES),
        persistence.unwrap_or(dash_core::constants::PERLIN_PERSISTENCE),
    )
}

/// Proximity test between two `[x, y, z]` points; `horizontal` ignores height.
#[wasm_bindgen(js_name = checkCollision)]
pub fn check_collision(a: &[f32], b: &[f32], threshold: Option<f32>, horizontal: Option<bool>) -> bool {
    let (Some(a), Some(b)) = (to_vec3(a), to_vec3(b)) else {
        return false;
    };
    let threshold = threshold.unwrap_or(dash_core::constants::DEFAULT_COLLISION_THRESHOLD);
    if horizontal.unwrap_or(false) {
        dash_core::check_collision_horizontal(&a, &b, threshold)
    } else {
        dash_core::check_collision(&a, &b, threshold)
    }
}

fn to_vec3(v: &[f32]) -> Option<glam::Vec3> {
    match v {
        [x, y, z, ..] => Some(glam::Vec3::new(*x, *y, *z)),
        _ => None,
    }
}
