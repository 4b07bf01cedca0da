// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// The polygon: a vertex arena with an overlaid doubly-linked ring.
// Partitioning rewrites the ring links to carve out monotone sub-loops;
// the triangle index buffer is cached behind a tri-state validity flag
// set (has_diagonals / has_valid_diagonals / has_valid_indices).

use num_traits::Float;

use crate::error::PolygonError;
use crate::index::Index;
use crate::partition::{self, MonoPart};
use crate::triangulate;

/// A polygon vertex with its ring links. Links are indices into the
/// owning polygon's vertex arena.
#[derive(Clone, Debug)]
pub struct Vertex<T> {
    pub x: T,
    pub y: T,
    pub next: u32,
    pub prev: u32,
}

/// A simple clockwise polygon, generic over the coordinate type and the
/// unsigned index type of the output triangle buffer.
pub struct Polygon<T, N> {
    verts: Vec<Vertex<T>>,

    has_diagonals: bool,
    has_valid_diagonals: bool,
    has_valid_indices: bool,

    /// Monotone parts from the latest valid partition.
    parts: Vec<MonoPart>,
    /// Cached triangle indices, three per triangle.
    indices: Vec<N>,
}

impl<T: Float, N: Index> Polygon<T, N> {
    /// Build a polygon from a flat buffer of alternating x,y values in
    /// clockwise order. Needs at least three vertices.
    pub fn new(coords: &[T]) -> Result<Self, PolygonError> {
        let mut poly = Polygon {
            verts: Vec::new(),
            has_diagonals: false,
            has_valid_diagonals: false,
            has_valid_indices: false,
            parts: Vec::new(),
            indices: Vec::new(),
        };
        poly.set_vertices(coords)?;
        Ok(poly)
    }

    /// Replace the vertices from a flat buffer, reusing the existing
    /// storage. Clears all diagonals and invalidates the caches.
    pub fn set_vertices(&mut self, coords: &[T]) -> Result<(), PolygonError> {
        if coords.len() % 2 != 0 || coords.len() < 6 {
            return Err(PolygonError::InvalidInput {
                components: coords.len(),
            });
        }
        let n = coords.len() / 2;
        self.verts.clear();
        self.verts.reserve(n);
        for i in 0..n {
            self.verts.push(Vertex {
                x: coords[i * 2],
                y: coords[i * 2 + 1],
                next: ((i + 1) % n) as u32,
                prev: ((i + n - 1) % n) as u32,
            });
        }
        self.has_diagonals = false;
        self.invalidate();
        Ok(())
    }

    #[inline]
    fn invalidate(&mut self) {
        self.has_valid_diagonals = false;
        self.has_valid_indices = false;
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.verts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.verts.is_empty()
    }

    /// Coordinates of vertex `i`.
    #[inline]
    pub fn vertex(&self, i: usize) -> (T, T) {
        (self.verts[i].x, self.verts[i].y)
    }

    #[inline]
    pub(crate) fn verts(&self) -> &[Vertex<T>] {
        &self.verts
    }

    /// Rewrite `next[from]` and `prev[to]` to cut a diagonal. Only one
    /// direction is rewritten: the ring reached from `from` is the upper
    /// of the two resulting strips.
    pub(crate) fn add_diagonal(&mut self, from: u32, to: u32) {
        self.verts[from as usize].next = to;
        self.verts[to as usize].prev = from;
        self.has_diagonals = true;
    }

    /// Restore the canonical ring, removing every diagonal.
    pub fn clear_diagonals(&mut self) {
        let n = self.verts.len();
        for (i, v) in self.verts.iter_mut().enumerate() {
            v.next = ((i + 1) % n) as u32;
            v.prev = ((i + n - 1) % n) as u32;
        }
        self.has_diagonals = false;
        self.invalidate();
    }

    /// Partition the polygon into monotone parts, rewriting the ring.
    ///
    /// The four fractions are reciprocal capacity hints for the event
    /// classes: `k` means "expect roughly n/k such vertices". They only
    /// affect allocation, never the result. The polygon must not carry
    /// diagonals from an earlier call; see [`Polygon::compute_diagonals`]
    /// for the managed path.
    pub fn partition(
        &mut self,
        frac_starts: usize,
        frac_merges: usize,
        frac_splits: usize,
        frac_stops: usize,
    ) -> Result<Vec<MonoPart>, PolygonError> {
        let n = self.verts.len();
        let cap = crate::event::EventCapacity {
            starts: (n / frac_starts.max(1)).max(3),
            merges: (n / frac_merges.max(1)).max(2),
            splits: (n / frac_splits.max(1)).max(3),
            stops: (n / frac_stops.max(1)).max(3),
        };
        partition::partition(self, cap)
    }

    /// Compute and cache diagonals (and the monotone part list) for the
    /// current polygon. `force` recomputes even if the cache is valid.
    pub fn compute_diagonals(&mut self, force: bool) -> Result<(), PolygonError> {
        if self.has_valid_diagonals && !force {
            return Ok(());
        }
        if self.has_diagonals {
            self.clear_diagonals();
        }
        let parts = self.partition(8, 10, 10, 8)?;
        self.parts = parts;
        self.has_valid_diagonals = true;
        Ok(())
    }

    /// Triangulate a previously computed monotone part list into the
    /// index buffer.
    pub fn triangulate(&mut self, parts: &[MonoPart]) {
        self.indices.clear();
        self.indices.reserve(3 * self.verts.len().saturating_sub(2));
        triangulate::triangulate_parts(&self.verts, parts, &mut self.indices);
        self.has_valid_indices = true;
    }

    /// The cached triangulation, recomputed if stale: every three
    /// successive indices name one triangle, and together the triangles
    /// tile the polygon interior.
    pub fn indices(&mut self) -> Result<&[N], PolygonError> {
        if !self.has_valid_indices {
            self.compute_diagonals(false)?;
            let parts = core::mem::take(&mut self.parts);
            self.triangulate(&parts);
            self.parts = parts;
        }
        Ok(&self.indices)
    }
}
