//! Adopted from [`petgraph`](https://github.com/petgraph/petgraph/blob/master/src/unionfind.rs)

use std::cmp::Ordering;

/// Disjoint sets over the elements `0..n`.
///
/// The chase uses one element per tableau symbol; unifying two symbols is a `union`.
#[derive(Debug, Clone)]
pub(crate) struct UnionFind {
    // The representative of a set is its own parent.
    parent: Vec<usize>,
    // Upper bound on the height of each tree, only meaningful for representatives.
    rank: Vec<u8>,
}

impl UnionFind {
    /// Create `n` singleton sets.
    pub fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    /// Return the representative for `x`, halving the path on the way.
    ///
    /// **Panics** if `x` is out of bounds.
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            let grandparent = self.parent[self.parent[x]];
            self.parent[x] = grandparent;
            x = grandparent;
        }
        x
    }

    pub fn equiv(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }

    /// Unify the sets containing `x` and `y`.
    ///
    /// Return `false` if they were already the same set.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let xrep = self.find(x);
        let yrep = self.find(y);
        if xrep == yrep {
            return false;
        }

        match self.rank[xrep].cmp(&self.rank[yrep]) {
            Ordering::Less => self.parent[xrep] = yrep,
            Ordering::Greater => self.parent[yrep] = xrep,
            Ordering::Equal => {
                self.parent[yrep] = xrep;
                self.rank[xrep] += 1;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_find() {
        let mut uf = UnionFind::new(5);
        assert!(!uf.equiv(0, 1));
        assert!(uf.union(0, 1));
        assert!(uf.union(3, 4));
        assert!(!uf.union(1, 0));
        assert!(uf.equiv(0, 1));
        assert!(!uf.equiv(1, 3));
        assert!(uf.union(1, 4));
        assert!(uf.equiv(0, 3));
        assert!(!uf.equiv(2, 0));
    }
}
