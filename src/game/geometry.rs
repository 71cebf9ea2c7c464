/// A point in playfield space. Entity positions are the top-left corner of their box.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn at(pos: Vec2, w: f32, h: f32) -> Self {
        Self::new(pos.x, pos.y, w, h)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap: boxes that only share an edge do not intersect.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// True when the centres are closer than the half-extents plus `clearance` on both axes.
    pub fn within_clearance(&self, other: &Aabb, clearance: f32) -> bool {
        let a = self.center();
        let b = other.center();
        (a.x - b.x).abs() < (self.w + other.w) / 2.0 + clearance
            && (a.y - b.y).abs() < (self.h + other.h) / 2.0 + clearance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_intersect() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(a.intersects(&Aabb::new(9.5, 9.5, 1.0, 1.0)));
    }

    #[test]
    fn containment_counts_as_intersection() {
        let outer = Aabb::new(0.0, 0.0, 100.0, 100.0);
        let inner = Aabb::new(40.0, 40.0, 5.0, 5.0);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
    }

    #[test]
    fn clearance_extends_past_the_box() {
        let a = Aabb::new(0.0, 0.0, 150.0, 150.0);
        let near = Aabb::new(240.0, 0.0, 150.0, 150.0);
        let far = Aabb::new(260.0, 0.0, 150.0, 150.0);
        assert!(a.within_clearance(&near, 100.0));
        assert!(!a.within_clearance(&far, 100.0));
        assert!(!a.intersects(&near));
    }
}
