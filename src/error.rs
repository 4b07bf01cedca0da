// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Error surface for polygon construction and triangulation.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PolygonError {
    /// Coordinate buffer is malformed: odd number of components or
    /// fewer than three vertices.
    #[error("invalid coordinate buffer: need an even number of components and at least 3 vertices, got {components} components")]
    InvalidInput { components: usize },

    /// The sweep encountered an event of a kind it cannot handle at that
    /// point, meaning the input violated the preconditions (simple,
    /// clockwise, distinct event x-coordinates).
    #[error("degenerate geometry: unexpected {kind} event at vertex {vertex}")]
    DegenerateGeometry {
        vertex: usize,
        kind: &'static str,
    },
}
