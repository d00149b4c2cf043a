//! Defines the rooted `Tree` a Chow-Liu model factorizes over.
//!
//! The tree is held as a plain parent array indexed by variable id rather
//! than as a graph object: `parents[v]` is the parent of variable `v`, and
//! `None` marks the root. Derived views (children lists, a leaves-to-root
//! visitation order) are precomputed so inference can walk the structure
//! without allocation.

use util::{CltError, Result};

use ndarray::{Array1, Array2};

use std::collections::VecDeque;

/// A rooted tree over variables `0..d`.
///
/// # Invariants
/// * exactly one variable (the root) has no parent
/// * every variable reaches the root by repeated parent-following
/// * there are exactly `d - 1` parent edges
#[derive(Debug)]
pub struct Tree {

    /// The root variable
    root: usize,

    /// The parent of each variable; `None` exactly at the root
    parents: Vec<Option<usize>>,

    /// The children of each variable
    children: Vec<Vec<usize>>

}

impl Tree {

    /// Build the maximum-weight spanning tree over the complete graph whose
    /// edge weights are given by the symmetric `weights` matrix, rooted at
    /// `root`.
    ///
    /// This is the structure-selection step of Chow & Liu (1968): with
    /// pairwise mutual information as the edge weights, the result is the
    /// best tree-structured approximation to the joint distribution. The
    /// maximum-weight tree is found directly (equivalently, a minimum-weight
    /// spanning tree of the negated matrix); the undirected result is then
    /// oriented by a breadth-first traversal from the root, recording each
    /// visited variable's discovering predecessor as its parent.
    ///
    /// Ties between equal-weight edges are broken deterministically in index
    /// order; callers must not rely on which of several equally good trees
    /// is produced.
    ///
    /// # Errors
    /// * `CltError::DimensionMismatch`, if `weights` is not square
    /// * `CltError::EmptyDataset`, if `weights` is 0×0
    /// * `CltError::InvalidRoot`, if `root` is not in `[0, d)`
    pub fn from_mutual_information(weights: &Array2<f64>, root: usize) -> Result<Self> {
        let d = weights.rows();
        if weights.cols() != d {
            return Err(CltError::DimensionMismatch { expected: d, actual: weights.cols() });
        }

        if d == 0 {
            return Err(CltError::EmptyDataset);
        }

        if root >= d {
            return Err(CltError::InvalidRoot { root, dimension: d });
        }

        // Prim's algorithm, grown from the root. best_weight[v] is the best
        // edge weight linking the out-of-tree variable v to the tree so far,
        // best_link[v] the in-tree endpoint of that edge.
        let mut in_tree = vec![false; d];
        let mut best_weight: Vec<f64> = (0..d).map(|v| weights[[root, v]]).collect();
        let mut best_link = vec![root; d];
        let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); d];

        in_tree[root] = true;

        for _ in 1..d {
            let mut next = None;
            for v in 0..d {
                if in_tree[v] {
                    continue;
                }

                // strict comparison keeps the first of equally weighted edges
                let better = match next {
                    Some(u) => best_weight[v] > best_weight[u],
                    None => true
                };
                if better {
                    next = Some(v);
                }
            }

            // invariant: d - 1 iterations over a complete graph always find
            // an out-of-tree variable
            let v = next.expect("complete graph must yield a spanning tree");
            in_tree[v] = true;
            adjacency[v].push(best_link[v]);
            adjacency[best_link[v]].push(v);

            for u in 0..d {
                if ! in_tree[u] && weights[[v, u]] > best_weight[u] {
                    best_weight[u] = weights[[v, u]];
                    best_link[u] = v;
                }
            }
        }

        // orient the undirected spanning tree away from the root
        let mut parents: Vec<Option<usize>> = vec![None; d];
        let mut visited = vec![false; d];
        let mut queue = VecDeque::new();

        visited[root] = true;
        queue.push_back(root);

        while let Some(v) = queue.pop_front() {
            for &u in adjacency[v].iter() {
                if ! visited[u] {
                    visited[u] = true;
                    parents[u] = Some(v);
                    queue.push_back(u);
                }
            }
        }

        debug!("spanning tree over {} variables rooted at {}", d, root);

        Ok(Tree::assemble(root, parents))
    }

    /// Construct a `Tree` directly from a parent array.
    ///
    /// # Errors
    /// * `CltError::EmptyDataset`, if the array is empty
    /// * `CltError::General`, if there is not exactly one root, a parent
    ///   index is out of range, or parent-following does not reach the root
    pub fn from_parents(parents: Vec<Option<usize>>) -> Result<Self> {
        let d = parents.len();
        if d == 0 {
            return Err(CltError::EmptyDataset);
        }

        let roots: Vec<usize> = (0..d).filter(|&v| parents[v].is_none()).collect();
        if roots.len() != 1 {
            return Err(CltError::General(
                format!("Expected exactly one root, found {}", roots.len())
            ));
        }
        let root = roots[0];

        for v in 0..d {
            if let Some(p) = parents[v] {
                if p >= d || p == v {
                    return Err(CltError::General(
                        format!("Variable {} has invalid parent {}", v, p)
                    ));
                }
            }
        }

        // every variable must reach the root in at most d - 1 steps;
        // anything longer means a cycle off the root's component
        for v in 0..d {
            let mut current = v;
            let mut steps = 0;
            while let Some(p) = parents[current] {
                current = p;
                steps += 1;
                if steps >= d {
                    return Err(CltError::General(
                        format!("Variable {} does not reach the root", v)
                    ));
                }
            }
        }

        Ok(Tree::assemble(root, parents))
    }

    fn assemble(root: usize, parents: Vec<Option<usize>>) -> Self {
        let d = parents.len();
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); d];
        for v in 0..d {
            if let Some(p) = parents[v] {
                children[p].push(v);
            }
        }

        Tree { root, parents, children }
    }

    /// The number of variables.
    pub fn d(&self) -> usize {
        self.parents.len()
    }

    /// The root variable.
    pub fn root(&self) -> usize {
        self.root
    }

    /// The parent of `v`, or `None` if `v` is the root.
    pub fn parent(&self, v: usize) -> Option<usize> {
        self.parents[v]
    }

    /// The parent of each variable, indexed by variable id.
    pub fn parents(&self) -> &[Option<usize>] {
        &self.parents
    }

    /// The children of `v`.
    pub fn children(&self, v: usize) -> &[usize] {
        &self.children[v]
    }

    /// The parent array with a `-1` sentinel at the root, for callers that
    /// exchange the structure with index-based tooling.
    pub fn parent_array(&self) -> Array1<isize> {
        Array1::from_vec(
            self.parents
                .iter()
                .map(|p| match *p {
                    Some(parent) => parent as isize,
                    None => -1
                })
                .collect()
        )
    }

    /// A visitation order in which every variable appears before its parent.
    ///
    /// This is the depth-first post-order of the rooted tree, computed with
    /// an explicit stack so that deep chains cannot exhaust the call stack.
    /// Inference eliminates unobserved variables in this order, guaranteeing
    /// a variable's subtree has been absorbed before the variable itself is
    /// marginalized.
    pub fn post_order(&self) -> Vec<usize> {
        let d = self.d();
        let mut order = Vec::with_capacity(d);
        let mut stack = Vec::with_capacity(d);
        stack.push((self.root, 0));

        while let Some((v, child)) = stack.pop() {
            if child < self.children[v].len() {
                stack.push((v, child + 1));
                stack.push((self.children[v][child], 0));
            } else {
                order.push(v);
            }
        }

        order
    }

}
