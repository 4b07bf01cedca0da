// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// A static balanced search tree answering successor-by-key queries.
// Built once from a pre-sorted sequence by repeated midpoint split, so
// construction is linear and the tree is perfectly balanced. Nodes live
// in a Vec arena and are never mutated after construction.

use num_traits::Float;

pub const INVALID: u32 = u32::MAX;

struct Node<T> {
    key: T,
    /// Caller payload, an index into the caller's own arena.
    data: u32,
    left: u32,
    right: u32,
}

pub struct Bst<T> {
    nodes: Vec<Node<T>>,
    root: u32,
}

impl<T: Float> Bst<T> {
    /// Build from `(key, data)` pairs sorted ascending by key.
    pub fn new(sorted: &[(T, u32)]) -> Self {
        let mut tree = Bst {
            nodes: Vec::with_capacity(sorted.len()),
            root: INVALID,
        };
        tree.root = tree.build(sorted);
        tree
    }

    fn build(&mut self, slice: &[(T, u32)]) -> u32 {
        if slice.is_empty() {
            return INVALID;
        }
        let mid = slice.len() / 2;
        let idx = self.nodes.len() as u32;
        self.nodes.push(Node {
            key: slice[mid].0,
            data: slice[mid].1,
            left: INVALID,
            right: INVALID,
        });
        let left = self.build(&slice[..mid]);
        let right = self.build(&slice[mid + 1..]);
        self.nodes[idx as usize].left = left;
        self.nodes[idx as usize].right = right;
        idx
    }

    /// Find the data of the node with the smallest key >= `key`
    /// (successor semantics; an exact match wins). Returns INVALID when
    /// every key is smaller than `key`.
    pub fn find(&self, key: T) -> u32 {
        let mut node = self.root;
        let mut candidate = INVALID;
        while node != INVALID {
            let n = &self.nodes[node as usize];
            if key <= n.key {
                candidate = n.data;
                node = n.left;
            } else {
                node = n.right;
            }
        }
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(keys: &[f32]) -> Bst<f32> {
        let pairs: Vec<(f32, u32)> = keys.iter().enumerate().map(|(i, &k)| (k, i as u32)).collect();
        Bst::new(&pairs)
    }

    #[test]
    fn successor_between_keys() {
        let t = tree(&[1.0, 3.0, 5.0, 7.0]);
        assert_eq!(t.find(2.0), 1);
        assert_eq!(t.find(4.0), 2);
        assert_eq!(t.find(6.5), 3);
    }

    #[test]
    fn exact_match_wins() {
        let t = tree(&[1.0, 3.0, 5.0]);
        assert_eq!(t.find(3.0), 1);
        assert_eq!(t.find(1.0), 0);
        assert_eq!(t.find(5.0), 2);
    }

    #[test]
    fn below_all_keys_returns_first() {
        let t = tree(&[2.0, 4.0]);
        assert_eq!(t.find(-10.0), 0);
    }

    #[test]
    fn above_all_keys_returns_invalid() {
        let t = tree(&[2.0, 4.0]);
        assert_eq!(t.find(4.5), INVALID);
    }

    #[test]
    fn single_node() {
        let t = tree(&[9.0]);
        assert_eq!(t.find(0.0), 0);
        assert_eq!(t.find(9.0), 0);
        assert_eq!(t.find(9.5), INVALID);
    }
}
