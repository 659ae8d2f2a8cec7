use super::*;

#[test]
fn step_fraction_clamps_to_unit_interval() {
    assert_eq!(step_fraction(1.0, 0.1), 0.1);
    assert_eq!(step_fraction(100.0, 0.1), 1.0);
    assert_eq!(step_fraction(-5.0, 0.1), 0.0);
    assert_eq!(step_fraction(f64::NAN, 0.1), 0.0);
    assert_eq!(step_fraction(f64::INFINITY, 0.1), 1.0);
    assert_eq!(step_fraction(3.0, 0.0), 0.0);
}

#[test]
fn wrap_offset_keeps_canonical_bands() {
    let w = 400.0;
    assert_eq!(wrap_offset(0.0, w, Direction::LeftToRight), 0.0);
    assert_eq!(wrap_offset(-40.0, w, Direction::LeftToRight), -40.0);
    assert_eq!(wrap_offset(-400.0, w, Direction::LeftToRight), 0.0);
    assert_eq!(wrap_offset(-440.0, w, Direction::LeftToRight), -40.0);
    assert_eq!(wrap_offset(-1_000_040.0, w, Direction::LeftToRight), -40.0);
    assert_eq!(wrap_offset(40.0, w, Direction::LeftToRight), -360.0);

    assert_eq!(wrap_offset(0.0, w, Direction::RightToLeft), 0.0);
    assert_eq!(wrap_offset(440.0, w, Direction::RightToLeft), 40.0);
    assert_eq!(wrap_offset(400.0, w, Direction::RightToLeft), 0.0);
    assert_eq!(wrap_offset(-40.0, w, Direction::RightToLeft), 360.0);
}

#[test]
fn wrap_offset_is_mirror_symmetric() {
    let w = 317.0;
    for raw in [-1234.5, -317.0, -12.25, 0.0, 0.5, 316.75, 9999.0] {
        let ltr = wrap_offset(raw, w, Direction::LeftToRight);
        let rtl = wrap_offset(-raw, w, Direction::RightToLeft);
        assert_eq!(ltr, -rtl, "raw={raw}");
        assert!(ltr > -w && ltr <= 0.0, "ltr={ltr}");
        assert!((0.0..w).contains(&rtl), "rtl={rtl}");
    }
}

#[test]
fn wrap_offset_never_returns_the_band_edge() {
    let w = 400.0;
    let tiny = -1e-14;
    let rtl = wrap_offset(tiny, w, Direction::RightToLeft);
    assert!(rtl < w);
    let ltr = wrap_offset(-tiny, w, Direction::LeftToRight);
    assert!(ltr > -w);
}

#[test]
fn wrap_pixels_matches_float_bands() {
    assert_eq!(wrap_pixels(-400, 400, Direction::LeftToRight), 0);
    assert_eq!(wrap_pixels(-40, 400, Direction::LeftToRight), -40);
    assert_eq!(wrap_pixels(400, 400, Direction::RightToLeft), 0);
    assert_eq!(wrap_pixels(40, 400, Direction::RightToLeft), 40);
}

#[test]
fn div_ceil_rounds_up() {
    assert_eq!(div_ceil_i64(800, 400), 2);
    assert_eq!(div_ceil_i64(840, 400), 3);
    assert_eq!(div_ceil_i64(1, 400), 1);
    assert_eq!(div_ceil_i64(0, 400), 0);
}

#[test]
fn mul_div255_bounds() {
    assert_eq!(mul_div255(255, 255), 255);
    assert_eq!(mul_div255(0, 255), 0);
    assert_eq!(mul_div255(128, 255), 128);
}
