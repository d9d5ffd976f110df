/// Location at which to display a caption, in video pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// left coordinate
    pub x: i32,
    /// top coordinate
    pub y: i32,
}

impl Position {
    /// Position given to new captions: near the bottom left of a 480 rows frame.
    pub const DEFAULT: Self = Self::new(20, 432);

    /// Create a `Position` from its coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
