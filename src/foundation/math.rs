use crate::foundation::core::Direction;

/// Fraction of a layer width covered in one tick, bounded to `[0, 1]`.
///
/// Negative or non-finite deltas (clock reset on reshow, NaN input) produce no motion; a delta
/// long enough to cross more than one width moves exactly one width.
pub(crate) fn step_fraction(delta_secs: f64, speed: f64) -> f64 {
    let percent = delta_secs * speed;
    if percent.is_nan() || percent <= 0.0 {
        return 0.0;
    }
    percent.min(1.0)
}

/// Wrap `offset` into the canonical band of a layer of width `width`.
///
/// `LeftToRight` offsets land in `(-width, 0]`, `RightToLeft` offsets in `[0, width)`. For the
/// same raw displacement the two results are exact negations of each other.
pub(crate) fn wrap_offset(offset: f64, width: f64, direction: Direction) -> f64 {
    let rem = match direction {
        Direction::LeftToRight => (-offset).rem_euclid(width),
        Direction::RightToLeft => offset.rem_euclid(width),
    };
    // rem_euclid may round up to exactly `width` for tiny negative inputs.
    let rem = if rem >= width || rem == 0.0 { 0.0 } else { rem };
    match direction {
        Direction::LeftToRight if rem == 0.0 => 0.0,
        Direction::LeftToRight => -rem,
        Direction::RightToLeft => rem,
    }
}

/// Integer counterpart of [`wrap_offset`] used once an offset has been snapped to pixels.
pub(crate) fn wrap_pixels(offset: i64, width: i64, direction: Direction) -> i64 {
    match direction {
        Direction::LeftToRight => -((-offset).rem_euclid(width)),
        Direction::RightToLeft => offset.rem_euclid(width),
    }
}

/// Ceiling division for a positive divisor.
pub(crate) fn div_ceil_i64(n: i64, d: i64) -> i64 {
    let q = n.div_euclid(d);
    if n.rem_euclid(d) == 0 { q } else { q + 1 }
}

pub(crate) fn mul_div255(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
