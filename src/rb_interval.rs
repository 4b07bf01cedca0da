// Copyright 2025 Lars Brubaker
// License: SGI Free Software License B (MIT-compatible)
//
// A red-black tree keyed by the y-coordinate of each active region's
// lower boundary. Because active regions are non-overlapping vertical
// strips, storing only the lower boundary is enough to answer "which
// region contains this y" with a predecessor query.
//
// Nodes live in a Vec arena and are addressed by u32 handles. Handles
// are stable: deletion splices nodes structurally instead of copying
// payloads between slots, so a handle held by a caller stays bound to
// the data it was created with. The caller may rewrite a node's key in
// place as the sweep advances, as long as the new key keeps the node
// ordered relative to its neighbours.

use num_traits::Float;

pub const INVALID: u32 = u32::MAX;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Color {
    Red,
    Black,
}

#[derive(Clone)]
struct Node<T> {
    key: T,
    /// Caller payload, an index into the caller's own arena.
    data: u32,
    color: Color,
    left: u32,
    right: u32,
    parent: u32,
}

pub struct RbInterval<T> {
    nodes: Vec<Node<T>>,
    root: u32,
    free: Vec<u32>,
    len: usize,
}

impl<T: Float> RbInterval<T> {
    pub fn new() -> Self {
        RbInterval {
            nodes: Vec::new(),
            root: INVALID,
            free: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(cap: usize) -> Self {
        RbInterval {
            nodes: Vec::with_capacity(cap),
            root: INVALID,
            free: Vec::new(),
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn key(&self, handle: u32) -> T {
        self.nodes[handle as usize].key
    }

    /// Rewrite a node's key in place. The caller guarantees the new key
    /// preserves the node's order relative to its tree neighbours.
    #[inline]
    pub fn update_key(&mut self, handle: u32, key: T) {
        self.nodes[handle as usize].key = key;
    }

    // ──────────────────────────── helpers ────────────────────────────

    #[inline]
    fn color(&self, n: u32) -> Color {
        if n == INVALID {
            Color::Black
        } else {
            self.nodes[n as usize].color
        }
    }

    #[inline]
    fn set_color(&mut self, n: u32, c: Color) {
        self.nodes[n as usize].color = c;
    }

    #[inline]
    fn left(&self, n: u32) -> u32 {
        self.nodes[n as usize].left
    }

    #[inline]
    fn right(&self, n: u32) -> u32 {
        self.nodes[n as usize].right
    }

    #[inline]
    fn parent(&self, n: u32) -> u32 {
        self.nodes[n as usize].parent
    }

    /// Redirect the parent-or-root link that points at `old` to `new`.
    fn replace_child(&mut self, parent: u32, old: u32, new: u32) {
        if parent == INVALID {
            self.root = new;
        } else if self.nodes[parent as usize].left == old {
            self.nodes[parent as usize].left = new;
        } else {
            self.nodes[parent as usize].right = new;
        }
    }

    fn rotate_left(&mut self, n: u32) {
        let r = self.right(n);
        let rl = self.left(r);
        let p = self.parent(n);

        self.nodes[n as usize].right = rl;
        if rl != INVALID {
            self.nodes[rl as usize].parent = n;
        }
        self.nodes[r as usize].left = n;
        self.nodes[n as usize].parent = r;
        self.nodes[r as usize].parent = p;
        self.replace_child(p, n, r);
    }

    fn rotate_right(&mut self, n: u32) {
        let l = self.left(n);
        let lr = self.right(l);
        let p = self.parent(n);

        self.nodes[n as usize].left = lr;
        if lr != INVALID {
            self.nodes[lr as usize].parent = n;
        }
        self.nodes[l as usize].right = n;
        self.nodes[n as usize].parent = l;
        self.nodes[l as usize].parent = p;
        self.replace_child(p, n, l);
    }

    fn alloc(&mut self, key: T, data: u32, parent: u32) -> u32 {
        let node = Node {
            key,
            data,
            color: Color::Red,
            left: INVALID,
            right: INVALID,
            parent,
        };
        if let Some(idx) = self.free.pop() {
            self.nodes[idx as usize] = node;
            idx
        } else {
            let idx = self.nodes.len() as u32;
            self.nodes.push(node);
            idx
        }
    }

    // ──────────────────────────── insert ─────────────────────────────

    /// Insert a key, returning a stable handle to the new node.
    pub fn insert(&mut self, key: T, data: u32) -> u32 {
        let mut parent = INVALID;
        let mut cursor = self.root;
        let mut went_left = false;
        while cursor != INVALID {
            parent = cursor;
            went_left = key < self.nodes[cursor as usize].key;
            cursor = if went_left {
                self.left(cursor)
            } else {
                self.right(cursor)
            };
        }

        let n = self.alloc(key, data, parent);
        if parent == INVALID {
            self.root = n;
        } else if went_left {
            self.nodes[parent as usize].left = n;
        } else {
            self.nodes[parent as usize].right = n;
        }
        self.len += 1;
        self.fixup_postinsert(n);
        n
    }

    fn fixup_postinsert(&mut self, mut n: u32) {
        while self.color(self.parent(n)) == Color::Red {
            let p = self.parent(n);
            let g = self.parent(p);
            if p == self.left(g) {
                let uncle = self.right(g);
                if self.color(uncle) == Color::Red {
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    n = g;
                } else {
                    if n == self.right(p) {
                        n = p;
                        self.rotate_left(n);
                    }
                    let p = self.parent(n);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.left(g);
                if self.color(uncle) == Color::Red {
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    n = g;
                } else {
                    if n == self.left(p) {
                        n = p;
                        self.rotate_right(n);
                    }
                    let p = self.parent(n);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_left(g);
                }
            }
        }
        let root = self.root;
        self.set_color(root, Color::Black);
    }

    // ───────────────────────────── find ──────────────────────────────

    /// Point query: data of the greatest node with key <= `key`.
    /// Returns INVALID when every key is greater.
    pub fn find(&self, key: T) -> u32 {
        let mut node = self.root;
        let mut best = INVALID;
        while node != INVALID {
            let n = &self.nodes[node as usize];
            if n.key <= key {
                best = node;
                node = n.right;
            } else {
                node = n.left;
            }
        }
        if best == INVALID {
            INVALID
        } else {
            self.nodes[best as usize].data
        }
    }

    // ──────────────────────────── remove ─────────────────────────────

    /// Remove the node a handle refers to. The handle is dead afterwards;
    /// all other handles stay valid.
    pub fn remove(&mut self, handle: u32) {
        let mut n = handle;
        if self.left(n) != INVALID && self.right(n) != INVALID {
            let mut s = self.right(n);
            while self.left(s) != INVALID {
                s = self.left(s);
            }
            self.swap_into_place(n, s);
            n = handle;
        }

        // n has at most one child now
        let child = if self.left(n) != INVALID {
            self.left(n)
        } else {
            self.right(n)
        };
        let p = self.parent(n);
        let removed_color = self.color(n);

        self.replace_child(p, n, child);
        if child != INVALID {
            self.nodes[child as usize].parent = p;
        }

        if removed_color == Color::Black {
            if child != INVALID && self.color(child) == Color::Red {
                self.set_color(child, Color::Black);
            } else {
                self.fixup_postdelete(child, p);
            }
        }

        self.free.push(n);
        self.len -= 1;
    }

    /// Exchange the structural positions (links and colors) of `n` and its
    /// in-order successor `s`, leaving each node's key and data untouched
    /// so outstanding handles keep pointing at the same payloads.
    fn swap_into_place(&mut self, n: u32, s: u32) {
        let n_parent = self.parent(n);
        let n_left = self.left(n);
        let n_right = self.right(n);
        let s_parent = self.parent(s);
        let s_right = self.right(s);
        let n_color = self.color(n);
        let s_color = self.color(s);

        self.replace_child(n_parent, n, s);
        self.nodes[s as usize].parent = n_parent;

        self.nodes[s as usize].left = n_left;
        self.nodes[n_left as usize].parent = s;

        if s_parent == n {
            // s is n's right child
            self.nodes[s as usize].right = n;
            self.nodes[n as usize].parent = s;
        } else {
            self.nodes[s as usize].right = n_right;
            self.nodes[n_right as usize].parent = s;
            // s was the leftmost node of n's right subtree
            self.nodes[s_parent as usize].left = n;
            self.nodes[n as usize].parent = s_parent;
        }

        // s had no left child; n inherits s's old right subtree
        self.nodes[n as usize].left = INVALID;
        self.nodes[n as usize].right = s_right;
        if s_right != INVALID {
            self.nodes[s_right as usize].parent = n;
        }

        self.nodes[n as usize].color = s_color;
        self.nodes[s as usize].color = n_color;
    }

    /// Rebalance after removing a black node whose replacement `x` (possibly
    /// absent) is black: the classic six delete cases — red sibling, black
    /// sibling with two black children, and a red sibling child in each of
    /// the LL/LR/RR/RL orientations.
    fn fixup_postdelete(&mut self, mut x: u32, mut parent: u32) {
        while x != self.root && self.color(x) == Color::Black {
            if parent == INVALID {
                break;
            }
            if x == self.left(parent) {
                let mut w = self.right(parent);
                if self.color(w) == Color::Red {
                    self.set_color(w, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    w = self.right(parent);
                }
                if self.color(self.left(w)) == Color::Black
                    && self.color(self.right(w)) == Color::Black
                {
                    self.set_color(w, Color::Red);
                    x = parent;
                    parent = self.parent(x);
                } else {
                    if self.color(self.right(w)) == Color::Black {
                        let wl = self.left(w);
                        self.set_color(wl, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_right(w);
                        w = self.right(parent);
                    }
                    let pc = self.color(parent);
                    self.set_color(w, pc);
                    self.set_color(parent, Color::Black);
                    let wr = self.right(w);
                    if wr != INVALID {
                        self.set_color(wr, Color::Black);
                    }
                    self.rotate_left(parent);
                    x = self.root;
                    break;
                }
            } else {
                let mut w = self.left(parent);
                if self.color(w) == Color::Red {
                    self.set_color(w, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    w = self.left(parent);
                }
                if self.color(self.left(w)) == Color::Black
                    && self.color(self.right(w)) == Color::Black
                {
                    self.set_color(w, Color::Red);
                    x = parent;
                    parent = self.parent(x);
                } else {
                    if self.color(self.left(w)) == Color::Black {
                        let wr = self.right(w);
                        self.set_color(wr, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_left(w);
                        w = self.left(parent);
                    }
                    let pc = self.color(parent);
                    self.set_color(w, pc);
                    self.set_color(parent, Color::Black);
                    let wl = self.left(w);
                    if wl != INVALID {
                        self.set_color(wl, Color::Black);
                    }
                    self.rotate_right(parent);
                    x = self.root;
                    break;
                }
            }
        }
        if x != INVALID {
            self.set_color(x, Color::Black);
        }
    }
}

impl<T: Float> Default for RbInterval<T> {
    fn default() -> Self {
        Self::new()
    }
}
