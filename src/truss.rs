use std::collections::HashSet;

use crate::graph::{intersect_sorted, Graph};
use crate::Error;

/// Computes the support of each edge, i.e. the number of triangles
/// the edge occurs in.
///
/// Each triangle contributes one unit of support to each of its three
/// edges. A triangle whose implied edge cannot be resolved indicates
/// inconsistent input and fails the whole computation.
pub fn compute_support(graph: &Graph, triangles: &[[usize; 3]]) -> Result<Vec<usize>, Error> {
    let mut support = vec![0; graph.edge_count()];

    for &[u, v, w] in triangles {
        support[resolve_edge(graph, u, v)?] += 1;
        support[resolve_edge(graph, v, w)?] += 1;
        support[resolve_edge(graph, u, w)?] += 1;
    }

    Ok(support)
}

/// Peels the graph level by level to turn edge support into trussness.
///
/// Edges are kept in one bucket per support level. The minimum level is
/// drained one edge at a time; removing an edge takes one unit of
/// support from the two partner edges of each triangle it closes, which
/// migrates them one bucket down. An edge popped at `level` leaves with
/// trussness `level + 2`. Once an edge is completed its support is
/// frozen and the triangles through it no longer demote anyone.
///
/// The implementation is based on Algorithm 2 presented in
///
/// Jia Wang, James Cheng:
/// Truss Decomposition in Massive Networks.
///
/// It runs in O(|E|^1.5) time and uses O(|E|) space. The order in which
/// same-level edges are drained is arbitrary and does not affect the
/// resulting trussness values.
pub fn peel(graph: &Graph, mut support: Vec<usize>) -> Result<Vec<usize>, Error> {
    let edge_count = support.len();

    let mut trussness = vec![0; edge_count];
    if edge_count == 0 {
        return Ok(trussness);
    }

    let max_support = support.iter().max().copied().unwrap_or_default();

    // One set of edges per support level. An uncompleted edge always
    // lives in the bucket matching its current support value.
    let mut buckets: Vec<HashSet<usize>> = vec![HashSet::new(); max_support + 1];
    for (edge, &edge_support) in support.iter().enumerate() {
        buckets[edge_support].insert(edge);
    }

    let mut completed = vec![false; edge_count];

    // Edges outside of any triangle form the trivial 2-truss.
    for &edge in &buckets[0] {
        trussness[edge] = 2;
        completed[edge] = true;
    }
    buckets[0].clear();

    let mut common = Vec::new();

    for level in 1..=max_support {
        while let Some(&seed) = buckets[level].iter().next() {
            buckets[level].remove(&seed);

            let (from, to) = graph.edge_endpoints(seed);

            // Every common neighbor closes a triangle with the seed edge.
            intersect_sorted(graph.neighbors(from), graph.neighbors(to), &mut common);

            for &n in &common {
                let e1 = resolve_edge(graph, from, n)?;
                let e2 = resolve_edge(graph, to, n)?;

                // A triangle with a completed edge is already resolved
                // and holds no support for the remaining two edges.
                if !completed[e1] && !completed[e2] {
                    demote(e1, level, &mut support, &mut buckets);
                    demote(e2, level, &mut support, &mut buckets);
                }
            }

            trussness[seed] = level + 2;
            completed[seed] = true;
        }
    }

    Ok(trussness)
}

// Moves an edge one bucket down if its support exceeds the current level.
fn demote(edge: usize, level: usize, support: &mut [usize], buckets: &mut [HashSet<usize>]) {
    if support[edge] > level {
        support[edge] -= 1;
        let new_level = support[edge];
        buckets[new_level + 1].remove(&edge);
        buckets[new_level].insert(edge);
    }
}

fn resolve_edge(graph: &Graph, source: usize, target: usize) -> Result<usize, Error> {
    graph
        .edge_between(source, target)
        .ok_or(Error::MissingEdge { source, target })
}
