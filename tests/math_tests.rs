// Host-side tests for the numeric helpers.

use dash_core::*;
use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn clamp_stays_in_range_and_keeps_inner_values() {
    let (lo, hi) = (-2.0, 3.0);
    let mut v = -10.0;
    while v <= 10.0 {
        let c = clamp(v, lo, hi);
        assert!((lo..=hi).contains(&c), "clamp({v}) = {c}");
        if (lo..=hi).contains(&v) {
            assert_eq!(c, v);
        }
        v += 0.25;
    }
}

#[test]
fn lerp_hits_endpoints_and_extrapolates() {
    assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
    assert_eq!(lerp(2.0, 10.0, 0.5), 6.0);
    assert_eq!(lerp(0.0, 10.0, 1.5), 15.0);
}

#[test]
fn format_number_inserts_thousands_separators() {
    assert_eq!(format_number(1234567), "1,234,567");
    assert_eq!(format_number(25420), "25,420");
    assert_eq!(format_number(12), "12");
}

#[test]
fn random_between_stays_in_half_open_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..1000 {
        let v = random_between_with(&mut rng, -0.5, 2.5);
        assert!((-0.5..2.5).contains(&v), "{v}");
    }
    let v = random_between(3.0, 4.0);
    assert!((3.0..4.0).contains(&v));
}

#[test]
fn coincident_positions_always_collide() {
    let p = Vec3::new(1.0, 2.0, 3.0);
    for threshold in [0.001, 0.8, 10.0] {
        assert!(check_collision(&p, &p, threshold));
        assert!(check_collision_horizontal(&p, &p, threshold));
    }
}

#[test]
fn collision_is_strict_at_threshold() {
    let a = Vec3::ZERO;
    let b = Vec3::new(3.0, 0.0, 4.0);
    assert!(!check_collision(&a, &b, 5.0));
    assert!(check_collision(&a, &b, 5.01));
    assert!(!check_collision_horizontal(&a, &b, 5.0));
}

#[test]
fn horizontal_collision_ignores_height() {
    let ground = Vec3::new(0.0, 0.0, 0.0);
    let above = Vec3::new(0.1, 5.0, 0.1);
    assert!(check_collision_horizontal(&ground, &above, 0.8));
    assert!(!check_collision(&ground, &above, 0.8));
}

#[test]
fn default_threshold_is_point_eight() {
    let a = Vec3::ZERO;
    assert!(check_collision_default(&a, &Vec3::new(0.79, 0.0, 0.0)));
    assert!(!check_collision_default(&a, &Vec3::new(0.81, 0.0, 0.0)));
}

#[test]
fn easing_curves_span_unit_interval() {
    assert_eq!(ease_in_out_cubic(0.0), 0.0);
    assert_eq!(ease_in_out_cubic(0.5), 0.5);
    assert_eq!(ease_in_out_cubic(1.0), 1.0);
    assert!((ease_in_out_cubic(0.25) - 0.0625).abs() < 1e-6);

    assert_eq!(ease_out_bounce(0.0), 0.0);
    assert!((ease_out_bounce(1.0) - 1.0).abs() < 1e-5);
    // first bounce lands exactly on 1 at t = 1/2.75
    assert!((ease_out_bounce(1.0 / 2.75) - 1.0).abs() < 1e-5);
    assert!((ease_out_bounce(1.5 / 2.75) - 0.75).abs() < 1e-5);
}
