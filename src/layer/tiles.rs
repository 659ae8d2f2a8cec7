use std::iter::FusedIterator;

use crate::foundation::{
    core::Direction,
    math::{div_ceil_i64, wrap_pixels},
};

/// Draw-origin x-coordinates that tile one layer across a viewport.
///
/// The sequence is lazy, finite and never empty; clone it to walk it again. Drawing the layer's
/// texture at every position covers `[0, viewport_width)` with the fewest tiles possible (at
/// most `ceil(viewport_width / width) + 1`).
///
/// `LeftToRight` yields ascending positions starting in `(-width, 0]`; `RightToLeft` yields
/// descending positions starting from the tile whose right edge sits at or past the viewport's
/// right edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TilePositions {
    next: Option<i64>,
    width: i64,
    viewport_width: i64,
    direction: Direction,
}

impl TilePositions {
    /// Tile a layer of `width` pixels whose offset is `offset` across `viewport_width` pixels.
    ///
    /// The offset is snapped to the nearest pixel (halves away from zero, so mirrored offsets
    /// snap to mirrored pixels) and wrapped into its band again.
    pub fn new(direction: Direction, offset: f64, width: u32, viewport_width: u32) -> Self {
        let width = i64::from(width.max(1));
        let viewport_width = i64::from(viewport_width);
        let snapped = wrap_pixels(offset.round() as i64, width, direction);
        let first = match direction {
            Direction::LeftToRight => snapped,
            Direction::RightToLeft => viewport_width - width + snapped,
        };
        Self {
            next: Some(first),
            width,
            viewport_width,
            direction,
        }
    }

    /// Layer width the positions are spaced by.
    pub fn tile_width(&self) -> u32 {
        self.width as u32
    }

    fn remaining(&self) -> usize {
        let Some(current) = self.next else {
            return 0;
        };
        let n = match self.direction {
            Direction::LeftToRight if current >= self.viewport_width => 1,
            Direction::LeftToRight => div_ceil_i64(self.viewport_width - current, self.width),
            Direction::RightToLeft if current <= 0 => 1,
            Direction::RightToLeft => 1 + div_ceil_i64(current, self.width),
        };
        n as usize
    }
}

impl Iterator for TilePositions {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        let current = self.next?;
        self.next = match self.direction {
            Direction::LeftToRight => {
                let right_edge = current + self.width;
                (right_edge < self.viewport_width).then_some(right_edge)
            }
            Direction::RightToLeft => (current > 0).then_some(current - self.width),
        };
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for TilePositions {}

impl FusedIterator for TilePositions {}

#[cfg(test)]
#[path = "../../tests/unit/layer/tiles.rs"]
mod tests;
