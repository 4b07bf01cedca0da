// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// Event classification: one walk around the polygon chain detecting
// x-direction reversals. Each reversal vertex is typed by the reflex
// test and the new sweep direction, then linked into a ring in
// emission order. Start, merge and split records are collected into
// parallel arrays for the partitioner.
//
// The direction flag only updates on edges with nonzero dx, so vertical
// edges inherit the running direction and the reversal lands on the
// vertex where the chain actually turns. The flag is seeded from the
// last non-vertical edge entering vertex 0, which lets vertex 0 itself
// classify as an event.

use log::{debug, trace};
use num_traits::Float;

use crate::geom::is_reflex;
use crate::polygon::Vertex;

pub const INVALID: u32 = u32::MAX;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EventKind {
    Stop,
    Start,
    Merge,
    Split,
    /// Consumed sentinel: a later region pass skips these.
    Normal,
}

impl EventKind {
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Stop => "stop",
            EventKind::Start => "start",
            EventKind::Merge => "merge",
            EventKind::Split => "split",
            EventKind::Normal => "normal",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Event {
    /// Index of this vertex in the polygon.
    pub poly: u32,
    pub kind: EventKind,
    /// Index into `merges` or `splits` depending on kind.
    pub data: u32,
    /// Links in emission order, closed into a ring.
    pub next: u32,
    pub prev: u32,
}

#[derive(Clone, Debug)]
pub struct MergeData {
    pub event: u32,
    /// MonoPart indices filled in by the partitioner as regions open.
    pub part_above: u32,
    pub part_below: u32,
}

#[derive(Clone, Debug)]
pub struct SplitData<T> {
    /// INVALID for the sentinel split.
    pub event: u32,
    /// Cached coordinates of the split vertex.
    pub x: T,
    pub y: T,
    /// Start events whose strip ends at this split.
    pub starts: Vec<u32>,
}

/// Output of the classification pass.
pub struct Events<T> {
    pub events: Vec<Event>,
    /// Event indices of start vertices.
    pub starts: Vec<u32>,
    pub merges: Vec<MergeData>,
    pub splits: Vec<SplitData<T>>,
}

impl<T: Float> Events<T> {
    #[inline]
    pub fn x_of(&self, ev: u32, verts: &[Vertex<T>]) -> T {
        verts[self.events[ev as usize].poly as usize].x
    }
}

/// Reserve capacities for the event collections, one reciprocal hint per
/// event class (`k` means "expect roughly n/k").
#[derive(Clone, Copy, Debug)]
pub struct EventCapacity {
    pub starts: usize,
    pub merges: usize,
    pub splits: usize,
    pub stops: usize,
}

/// Walk the chain and emit the typed event sequence.
pub fn classify<T: Float>(verts: &[Vertex<T>], cap: EventCapacity) -> Events<T> {
    let n = verts.len();

    let mut out = Events {
        events: Vec::with_capacity(cap.starts + cap.merges + cap.splits + cap.stops),
        starts: Vec::with_capacity(cap.starts),
        merges: Vec::with_capacity(cap.merges),
        splits: Vec::with_capacity(cap.splits),
    };

    // Seed the direction flag from the last edge with nonzero dx that
    // enters vertex 0.
    let mut sweeping_right = false;
    for j in (0..n).rev() {
        let dx = verts[(j + 1) % n].x - verts[j].x;
        if dx != T::zero() {
            sweeping_right = dx > T::zero();
            break;
        }
    }

    let mut max_x = verts[0].x;

    for i in 0..n {
        let next = (i + 1) % n;
        let prev = (i + n - 1) % n;

        if verts[i].x > max_x {
            max_x = verts[i].x;
        }

        let dx = verts[next].x - verts[i].x;
        if dx == T::zero() {
            continue;
        }
        let going_right = dx > T::zero();
        if going_right == sweeping_right {
            continue;
        }
        sweeping_right = going_right;

        let reflex = is_reflex(
            verts[prev].x,
            verts[prev].y,
            verts[i].x,
            verts[i].y,
            verts[next].x,
            verts[next].y,
        );
        let kind = match (reflex, going_right) {
            (true, false) => EventKind::Merge,
            (true, true) => EventKind::Split,
            (false, true) => EventKind::Start,
            (false, false) => EventKind::Stop,
        };
        trace!("vertex {} classified {}", i, kind.name());

        let ev = out.events.len() as u32;
        let data = match kind {
            EventKind::Start => {
                out.starts.push(ev);
                INVALID
            }
            EventKind::Merge => {
                out.merges.push(MergeData {
                    event: ev,
                    part_above: INVALID,
                    part_below: INVALID,
                });
                (out.merges.len() - 1) as u32
            }
            EventKind::Split => {
                out.splits.push(SplitData {
                    event: ev,
                    x: verts[i].x,
                    y: verts[i].y,
                    starts: Vec::new(),
                });
                (out.splits.len() - 1) as u32
            }
            _ => INVALID,
        };

        let prev_ev = if ev == 0 { INVALID } else { ev - 1 };
        out.events.push(Event {
            poly: i as u32,
            kind,
            data,
            next: INVALID,
            prev: prev_ev,
        });
        if prev_ev != INVALID {
            out.events[prev_ev as usize].next = ev;
        }
    }

    // Close the emission-order list into a ring.
    if !out.events.is_empty() {
        let last = (out.events.len() - 1) as u32;
        out.events[0].prev = last;
        out.events[last as usize].next = 0;
    }

    // Sentinel split past every real vertex: collection terminator for
    // start attachment and stop guard for the stepping loop.
    out.splits.push(SplitData {
        event: INVALID,
        x: max_x + T::one(),
        y: T::zero(),
        starts: Vec::new(),
    });

    debug!(
        "classified {} events: {} starts, {} merges, {} splits",
        out.events.len(),
        out.starts.len(),
        out.merges.len(),
        out.splits.len() - 1
    );

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::Vertex;

    fn verts(coords: &[(f32, f32)]) -> Vec<Vertex<f32>> {
        let n = coords.len();
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Vertex {
                x,
                y,
                next: ((i + 1) % n) as u32,
                prev: ((i + n - 1) % n) as u32,
            })
            .collect()
    }

    fn caps() -> EventCapacity {
        EventCapacity {
            starts: 4,
            merges: 4,
            splits: 4,
            stops: 4,
        }
    }

    fn kinds(ev: &Events<f32>) -> Vec<(u32, EventKind)> {
        ev.events.iter().map(|e| (e.poly, e.kind)).collect()
    }

    #[test]
    fn square_start_and_stop() {
        // Clockwise unit square; vertical edges must not flip direction.
        let v = verts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let ev = classify(&v, caps());
        assert_eq!(
            kinds(&ev),
            vec![(1, EventKind::Start), (3, EventKind::Stop)]
        );
        assert_eq!(ev.starts.len(), 1);
        assert_eq!(ev.merges.len(), 0);
        assert_eq!(ev.splits.len(), 1, "only the sentinel split");
    }

    #[test]
    fn convex_pentagon() {
        let v = verts(&[(0.0, 0.0), (0.0, 2.0), (1.0, 3.0), (2.0, 2.0), (2.0, 0.0)]);
        let ev = classify(&v, caps());
        assert_eq!(
            kinds(&ev),
            vec![(1, EventKind::Start), (4, EventKind::Stop)]
        );
    }

    #[test]
    fn l_shape_has_no_interior_events() {
        // The L-shape notch is reflex but both adjacent edges sweep the
        // same direction, so it is no event at all.
        let v = verts(&[
            (0.0, 0.0),
            (0.0, 3.0),
            (2.0, 3.0),
            (2.0, 1.0),
            (3.0, 1.0),
            (3.0, 0.0),
        ]);
        let ev = classify(&v, caps());
        assert_eq!(
            kinds(&ev),
            vec![(1, EventKind::Start), (5, EventKind::Stop)]
        );
    }

    #[test]
    fn arrowhead_is_monotone() {
        // x rises to v4 then falls back; no reversal anywhere else, so
        // the whole polygon is a single monotone piece.
        let v = verts(&[
            (0.0, 0.0),
            (1.0, 3.0),
            (2.0, 1.0),
            (3.0, 3.0),
            (4.0, 0.0),
            (2.0, 2.0),
        ]);
        let ev = classify(&v, caps());
        assert_eq!(
            kinds(&ev),
            vec![(0, EventKind::Start), (4, EventKind::Stop)]
        );
    }

    #[test]
    fn notched_rectangle_split_and_merge() {
        // Rectangle with a right-pointing notch in the left edge (merge
        // at v2) and a left-pointing notch in the right edge (split at
        // v7).
        let v = verts(&[
            (0.0, 0.0),
            (0.0, 1.0),
            (2.0, 2.0),
            (0.0, 3.0),
            (0.0, 4.0),
            (6.0, 4.0),
            (6.0, 3.0),
            (4.0, 2.0),
            (6.0, 1.0),
            (6.0, 0.0),
        ]);
        let ev = classify(&v, caps());
        assert_eq!(
            kinds(&ev),
            vec![
                (1, EventKind::Start),
                (2, EventKind::Merge),
                (4, EventKind::Start),
                (6, EventKind::Stop),
                (7, EventKind::Split),
                (9, EventKind::Stop),
            ]
        );
        assert_eq!(ev.splits.len(), 2);
        assert_eq!(ev.splits[0].x, 4.0);
        assert_eq!(ev.splits[0].y, 2.0);
        assert_eq!(ev.merges.len(), 1);
    }

    #[test]
    fn event_ring_is_closed() {
        let v = verts(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]);
        let ev = classify(&v, caps());
        let last = (ev.events.len() - 1) as u32;
        assert_eq!(ev.events[0].prev, last);
        assert_eq!(ev.events[last as usize].next, 0);
        for (i, e) in ev.events.iter().enumerate() {
            assert_eq!(ev.events[e.next as usize].prev as usize, i);
        }
    }

    #[test]
    fn sentinel_sits_past_max_x() {
        let v = verts(&[(0.0, 0.0), (0.0, 1.0), (5.0, 1.0), (5.0, 0.0)]);
        let ev = classify(&v, caps());
        let sentinel = ev.splits.last().unwrap();
        assert_eq!(sentinel.event, INVALID);
        assert!(sentinel.x > 5.0);
    }
}
