use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Shrinks `self` so that it is strictly smaller than `outer` in both
    /// dimensions. Negative results are floored at `0`.
    pub fn clamp_within(&self, outer: Size) -> Self {
        Self::new(
            self.width.min(outer.width - 1).max(0),
            self.height.min(outer.height - 1).max(0),
        )
    }

    /// Returns `true` if a box of this size can be placed strictly inside
    /// `outer` with at least one valid position.
    pub fn fits_within(&self, outer: Size) -> bool {
        outer.width > self.width && outer.height > self.height
    }
}

/// Axis-aligned rectangle with inclusive edges, following screen
/// coordinates (`y` grows downward, so `top <= bottom`).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rect(p1=({}, {}), p2=({}, {}))",
            self.left, self.top, self.right, self.bottom
        )
    }
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds the box of a text run anchored at its left-bottom corner.
    pub fn from_left_bottom(anchor: Point, size: Size) -> Self {
        Self::new(
            anchor.x,
            anchor.y - size.height,
            anchor.x + size.width,
            anchor.y,
        )
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn left_bottom(&self) -> Point {
        Point::new(self.left, self.bottom)
    }

    pub fn offset_by(&self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Returns `true` if `self` lies between the left and right edges of
    /// `outer` without touching either.
    pub fn inside_horizontally(&self, outer: &Rect) -> bool {
        self.left > outer.left && self.right < outer.right
    }

    /// Returns `true` if `self` lies between the top and bottom edges of
    /// `outer` without touching either.
    pub fn inside_vertically(&self, outer: &Rect) -> bool {
        self.top > outer.top && self.bottom < outer.bottom
    }
}
