use crate::graph::{intersect_sorted, Graph};

/// Lists all triangles of the graph as vertex triples.
///
/// Each triangle (u, v, w) with u < v < w is reported exactly once.
/// For every edge (u, v) the sorted neighbor lists of both endpoints
/// are intersected; a common neighbor w > v closes a new triangle.
pub fn list_triangles(graph: &Graph) -> Vec<[usize; 3]> {
    let mut triangles = Vec::new();
    let mut common = Vec::new();

    for u in 0..graph.node_count() {
        for &v in graph.neighbors(u) {
            if v <= u {
                continue;
            }

            intersect_sorted(graph.neighbors(u), graph.neighbors(v), &mut common);

            for &w in &common {
                if w > v {
                    triangles.push([u, v, w]);
                }
            }
        }
    }

    triangles
}
