use std::collections::HashSet;

use crate::grid::{Grid, PixelRect, Position};

/// Static obstacles for one session.
///
/// Obstacles are declared in pixels and need not align with the tile grid.
/// A tile is blocked when its pixel square overlaps any obstacle.
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    rects: Vec<PixelRect>,
    covered: HashSet<Position>,
}

impl ObstacleSet {
    /// Builds the set and precomputes the covered tiles of `grid`.
    #[must_use]
    pub fn new(rects: Vec<PixelRect>, grid: Grid) -> Self {
        let mut set = Self {
            rects,
            covered: HashSet::new(),
        };
        set.covered = grid
            .tiles()
            .filter(|tile| set.intersects(grid.tile_rect(*tile)))
            .collect();
        set
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if `position` is covered by an obstacle.
    #[must_use]
    pub fn covers(&self, position: Position) -> bool {
        self.covered.contains(&position)
    }

    /// Returns true if `rect` overlaps any obstacle.
    #[must_use]
    pub fn intersects(&self, rect: PixelRect) -> bool {
        self.rects.iter().any(|obstacle| obstacle.intersects(rect))
    }

    #[must_use]
    pub fn rects(&self) -> &[PixelRect] {
        &self.rects
    }

    /// Number of tiles blocked by obstacles.
    #[must_use]
    pub fn covered_tiles(&self) -> usize {
        self.covered.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::{Grid, PixelRect, Position};

    use super::ObstacleSet;

    #[test]
    fn aligned_bar_covers_exactly_its_tiles() {
        let grid = Grid::from_pixels(200, 200, 20);
        let obstacles = ObstacleSet::new(vec![PixelRect::new(40, 60, 100, 20)], grid);

        assert_eq!(obstacles.covered_tiles(), 5);
        for x in 2..7 {
            assert!(obstacles.covers(Position::new(x, 3)));
        }
        assert!(!obstacles.covers(Position::new(7, 3)));
        assert!(!obstacles.covers(Position::new(2, 4)));
    }

    #[test]
    fn unaligned_bar_blocks_both_straddled_rows() {
        // 440 / 4 = 110 sits halfway through row 5.
        let grid = Grid::from_pixels(640, 440, 20);
        let obstacles = ObstacleSet::new(vec![PixelRect::new(160, 110, 100, 20)], grid);

        assert!(obstacles.covers(Position::new(8, 5)));
        assert!(obstacles.covers(Position::new(8, 6)));
        assert!(!obstacles.covers(Position::new(8, 7)));
        assert_eq!(obstacles.covered_tiles(), 10);
    }

    #[test]
    fn tile_intersection_matches_pixel_overlap() {
        let grid = Grid::from_pixels(640, 440, 20);
        let obstacles = ObstacleSet::new(vec![PixelRect::new(320, 220, 20, 100)], grid);

        assert!(obstacles.intersects(grid.tile_rect(Position::new(16, 11))));
        assert!(!obstacles.intersects(grid.tile_rect(Position::new(17, 11))));
    }

    #[test]
    fn empty_set_covers_nothing() {
        let obstacles = ObstacleSet::empty();

        assert_eq!(obstacles.covered_tiles(), 0);
        assert!(!obstacles.covers(Position::new(0, 0)));
    }
}
