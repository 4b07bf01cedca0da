// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Pure geometric predicates on raw coordinates. All polygon input is
// clockwise, so the sign conventions below are the clockwise ones.

use num_traits::Float;

/// z-component of the cross product (b - a) x (c - a).
#[inline]
pub fn cross<T: Float>(ax: T, ay: T, bx: T, by: T, cx: T, cy: T) -> T {
    (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
}

/// Returns true if the corner a->b->c is reflex (interior angle > pi).
/// Clockwise convention: a positive cross product means reflex. The
/// collinear case reports non-reflex.
#[inline]
pub fn is_reflex<T: Float>(ax: T, ay: T, bx: T, by: T, cx: T, cy: T) -> bool {
    cross(ax, ay, bx, by, cx, cy) > T::zero()
}

/// Signed area of the triangle (a, b, c). Negative for clockwise corners.
#[inline]
pub fn triangle_area<T: Float>(ax: T, ay: T, bx: T, by: T, cx: T, cy: T) -> T {
    let half = T::one() / (T::one() + T::one());
    cross(ax, ay, bx, by, cx, cy) * half
}

/// Signed area of a simple polygon given as a flat [x0,y0,x1,y1,...] buffer.
/// Negative for clockwise orientation.
pub fn polygon_area<T: Float>(coords: &[T]) -> T {
    let n = coords.len() / 2;
    let mut acc = T::zero();
    for i in 0..n {
        let j = (i + 1) % n;
        acc = acc + coords[i * 2] * coords[j * 2 + 1];
        acc = acc - coords[j * 2] * coords[i * 2 + 1];
    }
    let half = T::one() / (T::one() + T::one());
    acc * half
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflex_clockwise_corner() {
        // Clockwise square corner (0,0) -> (0,1) -> (1,1): convex.
        assert!(!is_reflex(0.0, 0.0, 0.0, 1.0, 1.0, 1.0));
        // The notch of an L-shape walked clockwise turns the other way.
        assert!(is_reflex(2.0, 3.0, 2.0, 1.0, 3.0, 1.0));
    }

    #[test]
    fn reflex_collinear_is_not_reflex() {
        assert!(!is_reflex(0.0, 0.0, 1.0, 0.0, 2.0, 0.0));
    }

    #[test]
    fn triangle_area_sign() {
        // Counter-clockwise triangle: positive area.
        let a = triangle_area(0.0, 0.0, 1.0, 0.0, 0.0, 1.0);
        assert!((a - 0.5).abs() < 1e-6, "got {}", a);
        // Reversed: negative.
        let a = triangle_area(0.0, 0.0, 0.0, 1.0, 1.0, 0.0);
        assert!((a + 0.5).abs() < 1e-6, "got {}", a);
    }

    #[test]
    fn polygon_area_clockwise_square() {
        let a = polygon_area(&[0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0]);
        assert!((a + 1.0).abs() < 1e-6, "got {}", a);
    }
}
