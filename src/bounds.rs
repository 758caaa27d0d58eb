use crate::point::Point3;
use wasm_bindgen::prelude::*;

/// Represents an axis-aligned bounding box in 3D space.
///
/// Used to seed the initial cube of a subdivision and to report the extent of a cell.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub min_z: f64,
    pub max_x: f64,
    pub max_y: f64,
    pub max_z: f64,
}

#[wasm_bindgen]
impl BoundingBox {
    #[wasm_bindgen(constructor)]
    pub fn new(
        min_x: f64,
        min_y: f64,
        min_z: f64,
        max_x: f64,
        max_y: f64,
        max_z: f64,
    ) -> BoundingBox {
        BoundingBox {
            min_x,
            min_y,
            min_z,
            max_x,
            max_y,
            max_z,
        }
    }

    /// A cube of edge length `size` centered at (`cx`, `cy`, `cz`).
    pub fn cube(cx: f64, cy: f64, cz: f64, size: f64) -> BoundingBox {
        let h = size / 2.0;
        BoundingBox::new(cx - h, cy - h, cz - h, cx + h, cy + h, cz + h)
    }

    pub fn volume(&self) -> f64 {
        (self.max_x - self.min_x) * (self.max_y - self.min_y) * (self.max_z - self.min_z)
    }
}

impl BoundingBox {
    pub fn min(&self) -> Point3 {
        [self.min_x, self.min_y, self.min_z]
    }

    pub fn max(&self) -> Point3 {
        [self.max_x, self.max_y, self.max_z]
    }

    pub fn center(&self) -> Point3 {
        [
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        ]
    }

    /// Smallest box enclosing all `points`, or `None` when there are none.
    pub fn enclosing<'a, I>(points: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = &'a Point3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut b = BoundingBox::new(first[0], first[1], first[2], first[0], first[1], first[2]);
        for p in iter {
            b.min_x = b.min_x.min(p[0]);
            b.min_y = b.min_y.min(p[1]);
            b.min_z = b.min_z.min(p[2]);
            b.max_x = b.max_x.max(p[0]);
            b.max_y = b.max_y.max(p[1]);
            b.max_z = b.max_z.max(p[2]);
        }
        Some(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_bounds() {
        let b = BoundingBox::cube(0.0, 0.0, 0.0, 2.0);
        assert_eq!(b.min(), [-1.0, -1.0, -1.0]);
        assert_eq!(b.max(), [1.0, 1.0, 1.0]);
        assert!((b.volume() - 8.0).abs() < 1e-12);
        assert_eq!(b.center(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_enclosing() {
        let pts = [[1.0, 5.0, -2.0], [-3.0, 2.0, 4.0]];
        let b = BoundingBox::enclosing(pts.iter()).unwrap();
        assert_eq!(b.min(), [-3.0, 2.0, -2.0]);
        assert_eq!(b.max(), [1.0, 5.0, 4.0]);
        assert!(BoundingBox::enclosing(std::iter::empty()).is_none());
    }
}
