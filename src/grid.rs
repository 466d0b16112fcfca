use serde::Deserialize;

/// Grid position in tile coordinates (column, row).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns this position wrapped into bounds on both axes.
    #[must_use]
    pub fn wrapped(self, bounds: GridSize) -> Self {
        Self {
            x: self.x.rem_euclid(i32::from(bounds.width)),
            y: self.y.rem_euclid(i32::from(bounds.height)),
        }
    }
}

/// Logical grid dimensions in tiles.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// Axis-aligned rectangle in screen pixels.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    #[serde(alias = "w")]
    pub width: u32,
    #[serde(alias = "h")]
    pub height: u32,
}

impl PixelRect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns true when both rectangles share an area larger than zero.
    ///
    /// Touching edges do not count as an intersection.
    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        if self.width == 0 || self.height == 0 || other.width == 0 || other.height == 0 {
            return false;
        }

        let (left, top) = (i64::from(self.x), i64::from(self.y));
        let (right, bottom) = (left + i64::from(self.width), top + i64::from(self.height));
        let (other_left, other_top) = (i64::from(other.x), i64::from(other.y));
        let (other_right, other_bottom) = (
            other_left + i64::from(other.width),
            other_top + i64::from(other.height),
        );

        left < other_right && other_left < right && top < other_bottom && other_top < bottom
    }
}

/// Rectangle of whole tiles, `origin` being its top-left tile.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct TileArea {
    pub origin: Position,
    pub size: GridSize,
}

impl TileArea {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.size.total_cells() == 0
    }

    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        Position::new(position.x - self.origin.x, position.y - self.origin.y)
            .is_within_bounds(self.size)
    }
}

/// Maps continuous screen coordinates onto the tile grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Grid {
    size: GridSize,
    tile_size: u16,
}

impl Grid {
    /// Builds a grid covering `width_px` × `height_px` pixels with square tiles.
    ///
    /// Callers validate that the pixel extent is a whole number of tiles; any
    /// remainder is dropped here.
    #[must_use]
    pub fn from_pixels(width_px: u32, height_px: u32, tile_size: u16) -> Self {
        let tile = u32::from(tile_size.max(1));
        let columns = u16::try_from(width_px / tile).unwrap_or(u16::MAX);
        let rows = u16::try_from(height_px / tile).unwrap_or(u16::MAX);

        Self {
            size: GridSize {
                width: columns,
                height: rows,
            },
            tile_size: tile_size.max(1),
        }
    }

    #[must_use]
    pub fn size(self) -> GridSize {
        self.size
    }

    #[must_use]
    pub fn tile_size(self) -> u16 {
        self.tile_size
    }

    /// Returns the tile containing the pixel `(x, y)`.
    #[must_use]
    pub fn tile_at(self, x: i32, y: i32) -> Position {
        let tile = i32::from(self.tile_size);
        Position {
            x: x.div_euclid(tile),
            y: y.div_euclid(tile),
        }
    }

    /// Returns the pixel square covered by `position`.
    #[must_use]
    pub fn tile_rect(self, position: Position) -> PixelRect {
        let tile = i32::from(self.tile_size);
        PixelRect {
            x: position.x * tile,
            y: position.y * tile,
            width: u32::from(self.tile_size),
            height: u32::from(self.tile_size),
        }
    }

    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.is_within_bounds(self.size)
    }

    #[must_use]
    pub fn wrap(self, position: Position) -> Position {
        position.wrapped(self.size)
    }

    /// Returns the whole grid as an area.
    #[must_use]
    pub fn area(self) -> TileArea {
        TileArea {
            origin: Position::new(0, 0),
            size: self.size,
        }
    }

    /// Returns the tiles lying completely inside `rect`, clipped to the grid.
    #[must_use]
    pub fn area_within(self, rect: PixelRect) -> TileArea {
        let tile = i64::from(self.tile_size);
        let first = |start: i32| (i64::from(start) + tile - 1).div_euclid(tile);
        let end = |start: i32, extent: u32| (i64::from(start) + i64::from(extent)).div_euclid(tile);

        let left = first(rect.x).max(0);
        let top = first(rect.y).max(0);
        let right = end(rect.x, rect.width).min(i64::from(self.size.width));
        let bottom = end(rect.y, rect.height).min(i64::from(self.size.height));

        // Clipped to the grid, so every value fits the narrower types.
        let span = |from: i64, to: i64| u16::try_from((to - from).max(0)).unwrap_or_default();
        TileArea {
            origin: Position::new(
                i32::try_from(left).unwrap_or_default(),
                i32::try_from(top).unwrap_or_default(),
            ),
            size: GridSize {
                width: span(left, right),
                height: span(top, bottom),
            },
        }
    }

    /// Iterates every tile in row-major order.
    pub fn tiles(self) -> impl Iterator<Item = Position> {
        let GridSize { width, height } = self.size;
        (0..i32::from(height))
            .flat_map(move |y| (0..i32::from(width)).map(move |x| Position { x, y }))
    }
}
