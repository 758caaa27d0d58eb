//! Point arithmetic on `[f64; 3]`.
//!
//! The central operation is [`reflect`], the point reflection `D = B + C - A` that completes a
//! parallelogram from three of its corners. Child cells are built entirely from it.

pub type Point3 = [f64; 3];

/// Completes the parallelogram `A, B, D, C` so that `A` and `D` are diagonal.
#[inline]
pub fn reflect(a: Point3, b: Point3, c: Point3) -> Point3 {
    [
        b[0] + c[0] - a[0],
        b[1] + c[1] - a[1],
        b[2] + c[2] - a[2],
    ]
}

#[inline]
pub fn add(a: Point3, b: Point3) -> Point3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn sub(a: Point3, b: Point3) -> Point3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn scale(a: Point3, s: f64) -> Point3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

#[inline]
pub fn dot(a: Point3, b: Point3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: Point3, b: Point3) -> Point3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn distance_sq(a: Point3, b: Point3) -> f64 {
    let d = sub(a, b);
    dot(d, d)
}

#[inline]
pub fn distance(a: Point3, b: Point3) -> f64 {
    distance_sq(a, b).sqrt()
}

/// Point at parameter `t` on the segment from `a` to `b`.
#[inline]
pub fn lerp(a: Point3, b: Point3, t: f64) -> Point3 {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

#[inline]
pub fn midpoint(a: Point3, b: Point3) -> Point3 {
    lerp(a, b, 0.5)
}
