use crate::Vec2;

/// Axis-aligned rectangle with top-left `origin` and `size`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect<T> {
    pub origin: Vec2<T>,
    pub size: Vec2<T>,
}

impl<T> Rect<T> {
    pub fn new(origin: Vec2<T>, size: Vec2<T>) -> Self {
        Self { origin, size }
    }
}

impl Rect<f32> {
    /// Build a rectangle from its center point and size.
    pub fn from_center(center: Vec2<f32>, size: Vec2<f32>) -> Self {
        Self {
            origin: center - size / 2.0,
            size,
        }
    }

    pub fn max(&self) -> Vec2<f32> {
        self.origin + self.size
    }

    pub fn area(&self) -> f32 {
        self.size.x * self.size.y
    }

    pub fn intersection(&self, other: &Rect<f32>) -> Option<Rect<f32>> {
        let self_max = self.max();
        let other_max = other.max();

        let min_x = self.origin.x.max(other.origin.x);
        let min_y = self.origin.y.max(other.origin.y);
        let max_x = self_max.x.min(other_max.x);
        let max_y = self_max.y.min(other_max.y);

        if min_x >= max_x || min_y >= max_y {
            return None;
        }

        Some(Rect::new(
            Vec2::new(min_x, min_y),
            Vec2::new(max_x - min_x, max_y - min_y),
        ))
    }
}
