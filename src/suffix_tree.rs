//! Suffix trees with naive and McCreight construction.
//!
//! A tree is built over a sentinel-terminated coded text and borrows the
//! text and its alphabet. Edge labels are ranges into the text; leaves
//! live in an array indexed by suffix position and inner nodes come from
//! a chunked pool with stable ids.
//!
//! Construction runs in two phases. While inserting, every node knows
//! its parent; once all suffixes are in, the finalising pass links every
//! node to its preorder successor, which is what the matchers iterate.

mod pool;

use crate::alphabet::Alphabet;
use crate::matcher::ExactMatcher;

use self::pool::{InnerId, InnerPool, Leaf, NodeRef};

/// Result of scanning a pattern from a node.
enum Scan<'p> {
    /// The scan consumed the pattern and ended on a node.
    NodeMatch { node: NodeRef },
    /// The scan stopped at a node with no edge to continue along.
    NodeMismatch { node: InnerId, rest: &'p [u8] },
    /// The scan consumed the pattern partway along an edge.
    EdgeMatch { node: NodeRef, shared: usize },
    /// The scan stopped partway along an edge.
    EdgeMismatch {
        node: NodeRef,
        rest: &'p [u8],
        shared: usize,
    },
}

fn lcp(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

/// A suffix tree over a coded text.
pub struct SuffixTree<'a> {
    alpha: &'a Alphabet,
    text: &'a [u8],
    root: InnerId,
    pool: InnerPool,
    leaves: Vec<Leaf>,
}

impl<'a> SuffixTree<'a> {
    /// Build the tree by inserting every suffix from the root with a
    /// slow scan. Takes O(n²) worst case.
    pub fn naive(alpha: &'a Alphabet, text: &'a [u8]) -> SuffixTree<'a> {
        let mut st = SuffixTree::new(alpha, text);
        for i in 0..text.len() {
            st.naive_insert(i as u32);
        }
        st.thread();
        st
    }

    /// Build the tree with McCreight's algorithm in O(n).
    ///
    /// After inserting suffix `i-1` the tree knows its leaf, whose path
    /// decomposes as `a·y·z·w` with `ay` the parent of the previous
    /// head and `ayz` the head itself. Suffix links shortcut from `ayz`
    /// to `yz`; where the link is missing yet, a fast scan over `z` from
    /// the grandparent's link target finds `yz` and installs it. A slow
    /// scan over `w` then finds the next head.
    pub fn mccreight(alpha: &'a Alphabet, text: &'a [u8]) -> SuffixTree<'a> {
        let mut st = SuffixTree::new(alpha, text);
        let n = text.len();

        st.leaves[0].beg = 0;
        st.set_child(st.root, NodeRef::Leaf(0));

        let mut leaf = 0u32;
        for i in 1..n as u32 {
            let w = st.path_tail(NodeRef::Leaf(leaf));
            let ayz = st.leaves[leaf as usize].parent;

            let yz = if let Some(linked) = st.pool.get(ayz).slink {
                linked
            } else {
                let ay = st.pool.get(ayz).parent;
                let y = st
                    .pool
                    .get(ay)
                    .slink
                    .expect("all ancestors of the head carry suffix links");
                let z = st.path_tail(NodeRef::Inner(ayz));

                match st.fast_scan(y, z) {
                    Scan::NodeMatch { node } => {
                        let NodeRef::Inner(v) = node else {
                            unreachable!("a strict prefix of a suffix cannot end on a leaf")
                        };
                        st.pool.get_mut(ayz).slink = Some(v);
                        v
                    }
                    Scan::EdgeMatch { node, shared } => {
                        // The scan ended mid-edge: the break point is yz
                        // and also the head for this suffix, so the leaf
                        // hangs off it directly.
                        let brk = st.break_edge(node, shared);
                        st.pool.get_mut(ayz).slink = Some(brk);
                        st.leaves[i as usize].beg = n - w.len();
                        st.set_child(brk, NodeRef::Leaf(i));
                        leaf = i;
                        continue;
                    }
                    _ => unreachable!("fast scan ends with a match"),
                }
            };

            match st.slow_scan(yz, w) {
                Scan::NodeMismatch { node, rest } => {
                    st.leaves[i as usize].beg = n - rest.len();
                    st.set_child(node, NodeRef::Leaf(i));
                }
                Scan::EdgeMismatch { node, rest, shared } => {
                    let head = st.break_edge(node, shared);
                    st.leaves[i as usize].beg = n - (rest.len() - shared);
                    st.set_child(head, NodeRef::Leaf(i));
                }
                _ => unreachable!("an uninserted suffix always mismatches"),
            }
            leaf = i;
        }

        st.thread();
        st
    }

    /// The length of the indexed text, counting the sentinel. The tree
    /// has exactly this many leaves.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Search for a coded pattern, yielding a matcher over the suffix
    /// indices below the scan end point in depth-first order. The empty
    /// pattern matches every suffix.
    pub fn search(&self, pattern: &[u8]) -> TreeMatcher<'_, 'a> {
        let node = match self.slow_scan(self.root, pattern) {
            Scan::NodeMatch { node } => Some(node),
            Scan::EdgeMatch { node, .. } => Some(node),
            Scan::NodeMismatch { .. } | Scan::EdgeMismatch { .. } => None,
        };
        self.matcher_from(node)
    }

    /// Search for a raw byte pattern, mapping it through the tree's
    /// alphabet first. A pattern outside the alphabet matches nothing.
    pub fn search_bytes(&self, pattern: &[u8]) -> TreeMatcher<'_, 'a> {
        let mut p = vec![0u8; pattern.len()];
        match self.alpha.map_to_bytes(&mut p, pattern) {
            Ok(()) => self.search(&p),
            Err(_) => self.matcher_from(None),
        }
    }

    fn new(alpha: &'a Alphabet, text: &'a [u8]) -> SuffixTree<'a> {
        debug_assert_eq!(
            text.iter().rposition(|&c| c != 0),
            text.len().checked_sub(2),
            "the text must end with a single sentinel",
        );
        let mut pool = InnerPool::new(alpha.len());
        // The root's edge label is arbitrary; it is never scanned. The
        // root is its own parent and suffix link so the construction
        // algorithms need no special cases at the top.
        let root = pool.alloc(0, text.len(), InnerId::default());
        pool.get_mut(root).slink = Some(root);
        let leaves = (0..text.len())
            .map(|i| Leaf {
                beg: i,
                parent: root,
                next: None,
            })
            .collect();
        SuffixTree {
            alpha,
            text,
            root,
            pool,
            leaves,
        }
    }

    fn naive_insert(&mut self, i: u32) {
        let x = self.text;
        let n = x.len();
        match self.slow_scan(self.root, &x[i as usize..]) {
            Scan::NodeMismatch { node, rest } => {
                self.leaves[i as usize].beg = n - rest.len();
                self.set_child(node, NodeRef::Leaf(i));
            }
            Scan::EdgeMismatch { node, rest, shared } => {
                let brk = self.break_edge(node, shared);
                self.leaves[i as usize].beg = n - (rest.len() - shared);
                self.set_child(brk, NodeRef::Leaf(i));
            }
            _ => unreachable!("an uninserted suffix always mismatches"),
        }
    }

    /// The text range labelling the edge into `n`.
    fn span(&self, n: NodeRef) -> (usize, usize) {
        match n {
            NodeRef::Inner(v) => {
                let node = self.pool.get(v);
                (node.beg, node.end)
            }
            NodeRef::Leaf(l) => (self.leaves[l as usize].beg, self.text.len()),
        }
    }

    fn edge(&self, n: NodeRef) -> &'a [u8] {
        let (beg, end) = self.span(n);
        &self.text[beg..end]
    }

    /// The edge label of `n` minus its first symbol when the parent is
    /// the root: the part of the path the next suffix still contains.
    fn path_tail(&self, n: NodeRef) -> &'a [u8] {
        let edge = self.edge(n);
        if self.parent_of(n) == self.root {
            &edge[1..]
        } else {
            edge
        }
    }

    fn parent_of(&self, n: NodeRef) -> InnerId {
        match n {
            NodeRef::Inner(v) => self.pool.get(v).parent,
            NodeRef::Leaf(l) => self.leaves[l as usize].parent,
        }
    }

    fn child(&self, v: InnerId, first: u8) -> Option<NodeRef> {
        // Codes outside the alphabet have no slot and match nothing.
        self.pool
            .get(v)
            .children
            .get(first as usize)
            .copied()
            .flatten()
    }

    /// Hook `child` into `parent` at the slot of its first edge symbol.
    fn set_child(&mut self, parent: InnerId, child: NodeRef) {
        let first = self.text[self.span(child).0];
        self.pool.get_mut(parent).children[first as usize] = Some(child);
        match child {
            NodeRef::Inner(v) => self.pool.get_mut(v).parent = parent,
            NodeRef::Leaf(l) => self.leaves[l as usize].parent = parent,
        }
    }

    /// Split the edge into `to` after `len` symbols, introducing a new
    /// inner node that takes over the shared prefix.
    fn break_edge(&mut self, to: NodeRef, len: usize) -> InnerId {
        let (beg, _) = self.span(to);
        let parent = self.parent_of(to);
        let brk = self.pool.alloc(beg, beg + len, parent);

        match to {
            NodeRef::Inner(v) => self.pool.get_mut(v).beg = beg + len,
            NodeRef::Leaf(l) => self.leaves[l as usize].beg = beg + len,
        }
        self.set_child(parent, NodeRef::Inner(brk));
        self.set_child(brk, to);

        brk
    }

    /// Descend from `from` comparing `p` symbol by symbol.
    fn slow_scan<'p>(&self, from: InnerId, mut p: &'p [u8]) -> Scan<'p> {
        let mut from = from;
        loop {
            if p.is_empty() {
                return Scan::NodeMatch {
                    node: NodeRef::Inner(from),
                };
            }

            let Some(to) = self.child(from, p[0]) else {
                return Scan::NodeMismatch { node: from, rest: p };
            };

            let edge = self.edge(to);
            let shared = lcp(edge, p);
            if shared == p.len() {
                return if shared == edge.len() {
                    Scan::NodeMatch { node: to }
                } else {
                    Scan::EdgeMatch { node: to, shared }
                };
            }
            if shared < edge.len() {
                return Scan::EdgeMismatch {
                    node: to,
                    rest: p,
                    shared,
                };
            }

            p = &p[shared..];
            let NodeRef::Inner(v) = to else {
                unreachable!("a leaf edge runs to the end of the text")
            };
            from = v;
        }
    }

    /// Descend from `from` edge by edge, assuming `p` labels an existing
    /// path, comparing only edge lengths.
    fn fast_scan<'p>(&self, from: InnerId, mut p: &'p [u8]) -> Scan<'p> {
        let mut from = from;
        loop {
            if p.is_empty() {
                return Scan::NodeMatch {
                    node: NodeRef::Inner(from),
                };
            }

            let to = self
                .child(from, p[0])
                .expect("fast scan only follows paths that exist");

            let edge_len = self.edge(to).len();
            if p.len() == edge_len {
                return Scan::NodeMatch { node: to };
            }
            if p.len() < edge_len {
                return Scan::EdgeMatch {
                    node: to,
                    shared: p.len(),
                };
            }

            p = &p[edge_len..];
            let NodeRef::Inner(v) = to else {
                unreachable!("a leaf edge runs to the end of the text")
            };
            from = v;
        }
    }

    fn first_child(&self, v: InnerId) -> NodeRef {
        *self
            .pool
            .get(v)
            .children
            .iter()
            .flatten()
            .next()
            .expect("inner nodes have at least one child")
    }

    /// The rightmost leaf of the subtree below `n`; the traversal
    /// sentinel for matchers.
    fn rightmost_leaf(&self, n: NodeRef) -> u32 {
        let mut n = n;
        loop {
            match n {
                NodeRef::Leaf(l) => return l,
                NodeRef::Inner(v) => {
                    n = *self
                        .pool
                        .get(v)
                        .children
                        .iter()
                        .rev()
                        .flatten()
                        .next()
                        .expect("inner nodes have at least one child");
                }
            }
        }
    }

    /// The preorder successor of `n`, computed from parent pointers:
    /// first child for inner nodes, otherwise the nearest following
    /// sibling on the way up.
    fn preorder_next(&self, n: NodeRef) -> Option<NodeRef> {
        if let NodeRef::Inner(v) = n {
            return Some(self.first_child(v));
        }

        let mut cur = n;
        loop {
            let p = self.parent_of(cur);
            let slot = self.text[self.span(cur).0] as usize;
            if let Some(&sib) = self.pool.get(p).children[slot + 1..].iter().flatten().next() {
                return Some(sib);
            }
            if p == self.root {
                return None;
            }
            cur = NodeRef::Inner(p);
        }
    }

    /// Finalise the tree: write every node's preorder successor into its
    /// `next` field. The matchers only ever walk these threads.
    fn thread(&mut self) {
        let mut n = NodeRef::Inner(self.root);
        loop {
            let next = self.preorder_next(n);
            match n {
                NodeRef::Inner(v) => self.pool.get_mut(v).next = next,
                NodeRef::Leaf(l) => self.leaves[l as usize].next = next,
            }
            match next {
                Some(m) => n = m,
                None => break,
            }
        }
    }

    fn next_of(&self, n: NodeRef) -> Option<NodeRef> {
        match n {
            NodeRef::Inner(v) => self.pool.get(v).next,
            NodeRef::Leaf(l) => self.leaves[l as usize].next,
        }
    }

    fn matcher_from(&self, node: Option<NodeRef>) -> TreeMatcher<'_, 'a> {
        TreeMatcher {
            tree: self,
            sentinel: node.map(|n| NodeRef::Leaf(self.rightmost_leaf(n))),
            cur: node,
        }
    }
}

/// A matcher emitting the suffix indices of the leaves below a matched
/// position, in depth-first order.
pub struct TreeMatcher<'t, 'a> {
    tree: &'t SuffixTree<'a>,
    cur: Option<NodeRef>,
    sentinel: Option<NodeRef>,
}

impl ExactMatcher for TreeMatcher<'_, '_> {
    fn next_match(&mut self) -> Option<usize> {
        while let Some(n) = self.cur {
            self.cur = if Some(n) == self.sentinel {
                None
            } else {
                self.tree.next_of(n)
            };
            if let NodeRef::Leaf(l) = n {
                return Some(l as usize);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(text: &[u8]) -> (Alphabet, Vec<u8>) {
        let alpha = Alphabet::new(text).unwrap();
        let coded = alpha.mapped_bytes(text).unwrap();
        (alpha, coded)
    }

    fn all_leaves(st: &SuffixTree) -> Vec<usize> {
        st.search(&[]).matches().collect()
    }

    #[test]
    fn test_leaves_cover_all_suffixes() {
        let (alpha, coded) = build(b"mississippi");
        for st in [
            SuffixTree::naive(&alpha, &coded),
            SuffixTree::mccreight(&alpha, &coded),
        ] {
            let mut leaves = all_leaves(&st);
            assert_eq!(leaves.len(), 12);
            leaves.sort();
            assert_eq!(leaves, (0..12).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_dfs_order_is_suffix_array_order() {
        // Children are ordered by symbol, so the depth-first leaf order
        // must equal the suffix array.
        let (alpha, coded) = build(b"mississippi");
        let st = SuffixTree::naive(&alpha, &coded);
        assert_eq!(all_leaves(&st), vec![11, 10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2]);
        let st = SuffixTree::mccreight(&alpha, &coded);
        assert_eq!(all_leaves(&st), vec![11, 10, 7, 4, 1, 0, 9, 8, 6, 3, 5, 2]);
    }

    #[test]
    fn test_search() {
        let (alpha, coded) = build(b"mississippi");
        for st in [
            SuffixTree::naive(&alpha, &coded),
            SuffixTree::mccreight(&alpha, &coded),
        ] {
            let hits: Vec<usize> = st.search_bytes(b"i").matches().collect();
            assert_eq!(hits, vec![10, 7, 4, 1]);

            let hits: Vec<usize> = st.search_bytes(b"missi").matches().collect();
            assert_eq!(hits, vec![0]);

            let hits: Vec<usize> = st.search_bytes(b"ssi").matches().collect();
            assert_eq!(hits, vec![5, 2]);

            assert_eq!(st.search_bytes(b"ppp").matches().count(), 0);
            assert_eq!(st.search_bytes(b"x").matches().count(), 0);
        }
    }

    #[test]
    fn test_single_sentinel_text() {
        let (alpha, coded) = build(b"");
        let st = SuffixTree::naive(&alpha, &coded);
        assert_eq!(all_leaves(&st), vec![0]);
        let st = SuffixTree::mccreight(&alpha, &coded);
        assert_eq!(all_leaves(&st), vec![0]);
    }

    #[test]
    fn test_repetitive_text() {
        let (alpha, coded) = build(b"aaaaaaaa");
        for st in [
            SuffixTree::naive(&alpha, &coded),
            SuffixTree::mccreight(&alpha, &coded),
        ] {
            let mut leaves = all_leaves(&st);
            leaves.sort();
            assert_eq!(leaves, (0..9).collect::<Vec<_>>());
            let hits: Vec<usize> = st.search_bytes(b"aaa").matches().collect();
            assert_eq!(hits.len(), 6);
        }
    }

    /// Collect every inner node together with its full path label.
    fn labelled_inner_nodes(st: &SuffixTree) -> Vec<(InnerId, Vec<u8>)> {
        let mut out = Vec::new();
        let mut stack = vec![(st.root, Vec::new())];
        while let Some((v, label)) = stack.pop() {
            for child in st.pool.get(v).children.iter().flatten() {
                if let NodeRef::Inner(u) = *child {
                    let mut l = label.clone();
                    l.extend_from_slice(st.edge(*child));
                    stack.push((u, l));
                }
            }
            out.push((v, label));
        }
        out
    }

    #[test]
    fn test_mccreight_suffix_links() {
        let (alpha, coded) = build(b"mississippimissing");
        let st = SuffixTree::mccreight(&alpha, &coded);

        for (v, label) in labelled_inner_nodes(&st) {
            if v == st.root {
                continue;
            }
            let target = st
                .pool
                .get(v)
                .slink
                .expect("every inner node has a suffix link after construction");
            // The link of the node for a·y must point at the node for y.
            match st.slow_scan(st.root, &label[1..]) {
                Scan::NodeMatch {
                    node: NodeRef::Inner(u),
                } => assert_eq!(u, target),
                _ => panic!("suffix link target is not a node"),
            }
        }
    }

    #[test]
    fn test_naive_and_mccreight_agree() {
        let (alpha, coded) = build(b"abracadabra");
        let naive = SuffixTree::naive(&alpha, &coded);
        let mccreight = SuffixTree::mccreight(&alpha, &coded);
        assert_eq!(all_leaves(&naive), all_leaves(&mccreight));
        assert_eq!(naive.pool.len(), mccreight.pool.len());
    }
}
