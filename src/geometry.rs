/// Intrinsic size of an item, in the same unit as the container width.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size::new(0.0, 0.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// An item takes part in packing only once it has a strictly positive width.
    pub fn is_measured(&self) -> bool {
        self.width > 0.0
    }
}

/// Rectangle anchored within the container's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Clamp a host supplied length to a usable, non-negative value.
///
/// Negative and NaN inputs collapse to zero; positive infinity is kept so an
/// unbounded container places everything on one line.
pub fn non_negative(value: f32) -> f32 {
    if value > 0.0 { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measured_requires_positive_width() {
        assert!(Size::new(1.0, 0.0).is_measured());
        assert!(!Size::new(0.0, 10.0).is_measured());
        assert!(!Size::new(-3.0, 10.0).is_measured());
        assert!(!Size::new(f32::NAN, 10.0).is_measured());
    }

    #[test]
    fn non_negative_clamps() {
        assert_eq!(non_negative(-4.0), 0.0);
        assert_eq!(non_negative(f32::NAN), 0.0);
        assert_eq!(non_negative(12.5), 12.5);
        assert_eq!(non_negative(f32::INFINITY), f32::INFINITY);
    }

    #[test]
    fn rect_edges() {
        let rect = Rect::new(2.0, 3.0, 10.0, 4.0);
        assert_eq!(rect.right(), 12.0);
        assert_eq!(rect.bottom(), 7.0);
    }
}
