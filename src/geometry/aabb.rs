use std::ops::{Add, AddAssign};

use glam::Vec3;

/// Axis-aligned bounding box.
///
/// The default box is "unset" (`min > max` on every axis), so growing it by
/// the first point or box yields exactly that point or box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points.into_iter().collect()
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn is_set(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    pub fn extent(&self) -> Vec3 {
        if self.is_set() {
            self.max - self.min
        } else {
            Vec3::ZERO
        }
    }

    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Index (0 = x, 1 = y, 2 = z) of the axis with the greatest extent.
    ///
    /// Ties resolve towards the lower axis.
    pub fn longest_axis(&self) -> usize {
        let extent = self.extent();

        if extent.x >= extent.y && extent.x >= extent.z {
            0
        } else if extent.y >= extent.z {
            1
        } else {
            2
        }
    }

    /// Returns this box grown outward by `amount` on every axis.
    pub fn expanded(&self, amount: f32) -> Self {
        Self::new(self.min - Vec3::splat(amount), self.max + Vec3::splat(amount))
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.min.cmple(point).all() && point.cmple(self.max).all()
    }

    pub fn contains(&self, other: &Self) -> bool {
        !other.is_set() || (self.contains_point(other.min) && self.contains_point(other.max))
    }

    /// Overlap test; boxes that only touch on a face still overlap.
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::new(Vec3::MAX, Vec3::MIN)
    }
}

impl Add<Vec3> for Aabb {
    type Output = Self;

    fn add(mut self, rhs: Vec3) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<Vec3> for Aabb {
    fn add_assign(&mut self, rhs: Vec3) {
        self.min = self.min.min(rhs);
        self.max = self.max.max(rhs);
    }
}

impl Add<Self> for Aabb {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign<Self> for Aabb {
    fn add_assign(&mut self, rhs: Self) {
        self.min = self.min.min(rhs.min);
        self.max = self.max.max(rhs.max);
    }
}

impl FromIterator<Vec3> for Aabb {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Vec3>,
    {
        let mut this = Self::default();

        for item in iter {
            this += item;
        }

        this
    }
}

impl FromIterator<Self> for Aabb {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = Self>,
    {
        let mut this = Self::default();

        for item in iter {
            this += item;
        }

        this
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn default_is_unset() {
        let bb = Aabb::default();

        assert!(!bb.is_set());
        assert_eq!(bb.extent(), Vec3::ZERO);
        assert!(!bb.contains_point(Vec3::ZERO));
        assert!(!bb.intersects(&Aabb::new(Vec3::splat(-1.0), Vec3::ONE)));
    }

    #[test]
    fn union_with_unset_box_is_identity() {
        let bb = Aabb::new(Vec3::ZERO, Vec3::ONE);

        assert_eq!(bb + Aabb::default(), bb);
        assert_eq!(Aabb::default() + bb, bb);
    }

    #[test]
    fn from_points() {
        let bb = Aabb::from_points([
            vec3(0.0, 0.0, 0.0),
            vec3(1.0, -2.0, 0.0),
            vec3(0.5, 1.0, 3.0),
        ]);

        assert_eq!(bb.min(), vec3(0.0, -2.0, 0.0));
        assert_eq!(bb.max(), vec3(1.0, 1.0, 3.0));
        assert_eq!(bb.longest_axis(), 1);
        assert_eq!(bb.centroid(), vec3(0.5, -0.5, 1.5));
    }

    #[test]
    fn flat_box_still_contains_its_points() {
        let bb = Aabb::from_points([vec3(0.0, 0.0, 0.0), vec3(1.0, 1.0, 0.0)]);

        assert!(bb.is_set());
        assert!(bb.contains_point(vec3(0.5, 0.5, 0.0)));
        assert!(!bb.contains_point(vec3(0.5, 0.5, 0.01)));
        assert_eq!(bb.longest_axis(), 0);
    }

    #[test]
    fn expanded_contains_nearby_points() {
        let bb = Aabb::new(Vec3::ZERO, Vec3::ONE);

        assert!(!bb.contains_point(vec3(1.5, 0.5, 0.5)));
        assert!(bb.expanded(0.5).contains_point(vec3(1.5, 0.5, 0.5)));
        assert!(bb.expanded(0.0) == bb);
    }

    #[test]
    fn intersects() {
        let bb = Aabb::new(Vec3::ZERO, Vec3::ONE);

        assert!(bb.intersects(&Aabb::new(Vec3::splat(0.5), Vec3::splat(2.0))));
        assert!(bb.intersects(&Aabb::new(Vec3::ONE, Vec3::splat(2.0))));
        assert!(!bb.intersects(&Aabb::new(
            vec3(1.1, 0.0, 0.0),
            vec3(2.0, 1.0, 1.0)
        )));
    }

    #[test]
    fn contains() {
        let outer = Aabb::new(Vec3::ZERO, Vec3::splat(2.0));
        let inner = Aabb::new(Vec3::splat(0.5), Vec3::ONE);

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(inner.contains(&Aabb::default()));
    }
}
