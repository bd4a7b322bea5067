use atoi::FromRadix10;
use std::{convert::TryFrom, fmt::Display, fs::File, io::Read, ops::Deref, str::FromStr, time::Instant};
use std::{fmt::Write, path::Path};

use crate::Error;

use linereader::LineReader;

pub struct Graph {
    node_count: usize,
    edge_count: usize,
    offsets: Box<[usize]>,
    neighbors: Box<[usize]>,
    /// edge id for each adjacency entry, aligned with `neighbors`
    edge_ids: Box<[usize]>,
    sources: Box<[usize]>,
    targets: Box<[usize]>,
    max_degree: usize,
}

impl Graph {
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn degree(&self, node: usize) -> usize {
        self.offsets[node + 1] - self.offsets[node]
    }

    /// Sorted, deduplicated neighbors of `node`, excluding self-loops.
    pub fn neighbors(&self, node: usize) -> &[usize] {
        let from = self.offsets[node];
        let to = self.offsets[node + 1];
        &self.neighbors[from..to]
    }

    pub fn exists(&self, source: usize, target: usize) -> bool {
        self.edge_between(source, target).is_some()
    }

    /// Resolves an edge id by its endpoint pair, in either direction.
    /// Parallel edges resolve to the lowest edge id between the endpoints.
    pub fn edge_between(&self, source: usize, target: usize) -> Option<usize> {
        if source >= self.node_count {
            return None;
        }
        let from = self.offsets[source];
        self.neighbors(source)
            .binary_search(&target)
            .ok()
            .map(|idx| self.edge_ids[from + idx])
    }

    pub fn edge_endpoints(&self, edge: usize) -> (usize, usize) {
        (self.sources[edge], self.targets[edge])
    }

    pub fn max_degree(&self) -> usize {
        self.max_degree
    }
}

/// Intersects two sorted slices into `out`, replacing its contents.
pub(crate) fn intersect_sorted(left: &[usize], right: &[usize], out: &mut Vec<usize>) {
    out.clear();

    let mut i = 0;
    let mut j = 0;

    while i < left.len() && j < right.len() {
        if left[i] < right[j] {
            i += 1;
        } else if left[i] > right[j] {
            j += 1;
        } else {
            out.push(left[i]);
            i += 1;
            j += 1;
        }
    }
}

impl Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "|V|: {}, |E|: {}\nMax Degree: {}",
            self.node_count, self.edge_count, self.max_degree
        )
    }
}

impl FromStr for Graph {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Error> {
        let reader = LineReader::new(input.as_bytes());
        let parse_graph = ParseGraph::try_from(reader)?;
        Ok(Graph::from(parse_graph))
    }
}

struct ParseGraph {
    node_count: usize,
    edge_count: usize,
    sources: Vec<usize>,
    targets: Vec<usize>,
    /// (neighbor, edge id) pairs per node
    adjacency: Vec<Vec<(usize, usize)>>,
}

impl<R> TryFrom<LineReader<R>> for ParseGraph
where
    R: Read,
{
    type Error = Error;

    fn try_from(mut lines: LineReader<R>) -> Result<Self, Error> {
        let mut header = lines.next_line().expect("missing header line")?;

        // skip "t" char and white space
        header = &header[2..];
        let (node_count, used) = usize::from_radix_10(header);
        header = &header[used + 1..];
        let (edge_count, _) = usize::from_radix_10(&header);

        let mut sources = Vec::<usize>::with_capacity(edge_count);
        let mut targets = Vec::<usize>::with_capacity(edge_count);
        let mut adjacency = Vec::<Vec<(usize, usize)>>::with_capacity(node_count);

        let mut batch: &[u8] = &[];

        // read nodes; the input is assumed to be sorted by node id
        while adjacency.len() < node_count {
            if batch.is_empty() {
                batch = lines.next_batch().expect("missing data")?;
            }

            // skip "v" char and white space
            batch = &batch[2..];
            // skip node id since input is always sorted by node id
            let (_, used) = usize::from_radix_10(batch);
            batch = &batch[used + 1..];
            let (degree, used) = usize::from_radix_10(batch);
            batch = &batch[used + 1..];

            adjacency.push(Vec::with_capacity(degree));
        }

        // read (undirected) edges; ids are assigned in input order
        for edge in 0..edge_count {
            if batch.is_empty() {
                batch = lines.next_batch().expect("missing data")?;
            }
            // skip "e" char and white space
            batch = &batch[2..];
            let (source, used) = usize::from_radix_10(batch);
            batch = &batch[used + 1..];
            let (target, used) = usize::from_radix_10(batch);
            batch = &batch[used + 1..];

            sources.push(source);
            targets.push(target);

            // self-loops stay in the edge list but never enter the adjacency
            if source != target {
                adjacency[source].push((target, edge));
                adjacency[target].push((source, edge));
            }
        }

        Ok(Self {
            node_count,
            edge_count,
            sources,
            targets,
            adjacency,
        })
    }
}

impl From<ParseGraph> for Graph {
    fn from(parse_graph: ParseGraph) -> Self {
        let node_count = parse_graph.node_count;

        let mut offsets = Vec::<usize>::with_capacity(node_count + 1);
        let mut neighbors = Vec::<usize>::with_capacity(2 * parse_graph.edge_count);
        let mut edge_ids = Vec::<usize>::with_capacity(2 * parse_graph.edge_count);
        let mut max_degree = 0;

        offsets.push(0);

        for mut node_adjacency in parse_graph.adjacency {
            node_adjacency.sort_unstable();
            // parallel edges collapse onto the lowest edge id
            node_adjacency.dedup_by_key(|entry| entry.0);

            if node_adjacency.len() > max_degree {
                max_degree = node_adjacency.len();
            }

            for (neighbor, edge) in node_adjacency {
                neighbors.push(neighbor);
                edge_ids.push(edge);
            }
            offsets.push(neighbors.len());
        }

        Self {
            node_count,
            edge_count: parse_graph.edge_count,
            offsets: offsets.into_boxed_slice(),
            neighbors: neighbors.into_boxed_slice(),
            edge_ids: edge_ids.into_boxed_slice(),
            sources: parse_graph.sources.into_boxed_slice(),
            targets: parse_graph.targets.into_boxed_slice(),
            max_degree,
        }
    }
}

pub struct GdlGraph(Graph);

impl Deref for GdlGraph {
    type Target = Graph;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromStr for GdlGraph {
    type Err = Error;

    fn from_str(gdl: &str) -> Result<Self, Error> {
        fn degree(gdl_graph: &gdl::Graph, node: &gdl::graph::Node) -> usize {
            let mut degree = 0;

            for rel in gdl_graph.relationships() {
                if rel.source() == node.variable() {
                    degree += 1;
                }
                if rel.target() == node.variable() {
                    degree += 1;
                }
            }
            degree
        }

        let gdl_graph = gdl.parse::<gdl::Graph>()?;

        let header = format!(
            "t {} {}",
            gdl_graph.node_count(),
            gdl_graph.relationship_count()
        );

        let mut nodes_string = String::from("");

        let mut sorted_nodes = gdl_graph.nodes().collect::<Vec<_>>();
        sorted_nodes.sort_by_key(|node| node.id());

        for node in sorted_nodes {
            let _ = writeln!(nodes_string, "v {} {}", node.id(), degree(&gdl_graph, node));
        }

        let mut sorted_rels = gdl_graph
            .relationships()
            .map(|rel| {
                let source_id = gdl_graph
                    .get_node(rel.source())
                    .expect("Source expected")
                    .id();
                let target_id = gdl_graph
                    .get_node(rel.target())
                    .expect("Target expected")
                    .id();
                (source_id, target_id)
            })
            .collect::<Vec<_>>();
        sorted_rels.sort_unstable();

        let mut rels_string = String::from("");

        for (source_id, target_id) in sorted_rels {
            let _ = writeln!(rels_string, "e {} {}", source_id, target_id);
        }

        let graph = format!("{}\n{}{}", header, nodes_string, rels_string).parse::<Graph>()?;

        Ok(GdlGraph(graph))
    }
}

pub fn parse(path: &Path) -> Result<Graph, Error> {
    println!("Reading from: {:?}", path);
    let start = Instant::now();
    let file = File::open(path)?;
    println!("Preparing input: {:?}", start.elapsed());
    let start = Instant::now();
    let parse_graph = ParseGraph::try_from(LineReader::new(file))?;
    println!("Parsing graph: {:?}", start.elapsed());
    let start = Instant::now();
    let graph = Graph::from(parse_graph);
    println!("Building graph: {:?}", start.elapsed());
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use trim_margin::MarginTrimmable;

    #[test]
    fn read_from_slice() {
        let graph = "
        |t 5 6
        |v 0 2
        |v 1 3
        |v 2 3
        |v 3 2
        |v 4 2
        |e 0 1
        |e 0 2
        |e 1 2
        |e 1 3
        |e 2 4
        |e 3 4
        |"
        .trim_margin()
        .unwrap();

        let graph = graph.parse::<Graph>().unwrap();

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 6);
        assert_eq!(graph.max_degree(), 3);

        assert_eq!(graph.degree(0), 2);
        assert_eq!(graph.degree(1), 3);
        assert_eq!(graph.degree(2), 3);
        assert_eq!(graph.degree(3), 2);
        assert_eq!(graph.degree(4), 2);

        assert_eq!(graph.neighbors(0), &[1, 2]);
        assert_eq!(graph.neighbors(1), &[0, 2, 3]);
        assert_eq!(graph.neighbors(2), &[0, 1, 4]);
        assert_eq!(graph.neighbors(3), &[1, 4]);
        assert_eq!(graph.neighbors(4), &[2, 3]);

        assert!(graph.exists(0, 1));
        assert!(graph.exists(0, 2));
        assert!(!graph.exists(0, 3));
        assert!(graph.exists(3, 4));
        assert!(!graph.exists(3, 2));

        assert_eq!(graph.edge_between(0, 1), Some(0));
        assert_eq!(graph.edge_between(0, 2), Some(1));
        assert_eq!(graph.edge_between(1, 2), Some(2));
        assert_eq!(graph.edge_between(1, 3), Some(3));
        assert_eq!(graph.edge_between(2, 4), Some(4));
        assert_eq!(graph.edge_between(3, 4), Some(5));
        assert_eq!(graph.edge_between(4, 3), Some(5));
        assert_eq!(graph.edge_between(0, 4), None);

        assert_eq!(graph.edge_endpoints(0), (0, 1));
        assert_eq!(graph.edge_endpoints(3), (1, 3));
        assert_eq!(graph.edge_endpoints(5), (3, 4));
    }

    #[test]
    fn read_from_gdl() {
        let graph = "
        |(n0),
        |(n1),
        |(n2),
        |(n3),
        |(n4),
        |(n0)-->(n1),
        |(n0)-->(n2),
        |(n1)-->(n2),
        |(n1)-->(n3),
        |(n2)-->(n4),
        |(n3)-->(n4)
        |"
        .trim_margin()
        .unwrap()
        .parse::<GdlGraph>()
        .unwrap();

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 6);
        assert_eq!(graph.max_degree(), 3);

        assert_eq!(graph.neighbors(0), &[1, 2]);
        assert_eq!(graph.neighbors(1), &[0, 2, 3]);
        assert_eq!(graph.neighbors(2), &[0, 1, 4]);
        assert_eq!(graph.neighbors(3), &[1, 4]);
        assert_eq!(graph.neighbors(4), &[2, 3]);

        assert_eq!(graph.edge_between(0, 1), Some(0));
        assert_eq!(graph.edge_between(3, 4), Some(5));
        assert_eq!(graph.edge_endpoints(2), (1, 2));
    }

    #[test]
    fn self_loops_and_parallel_edges() {
        let graph = "
        |t 3 4
        |v 0 2
        |v 1 3
        |v 2 3
        |e 0 1
        |e 0 1
        |e 1 2
        |e 2 2
        |"
        .trim_margin()
        .unwrap()
        .parse::<Graph>()
        .unwrap();

        assert_eq!(graph.edge_count(), 4);

        // adjacency is deduplicated and loop-free
        assert_eq!(graph.neighbors(0), &[1]);
        assert_eq!(graph.neighbors(1), &[0, 2]);
        assert_eq!(graph.neighbors(2), &[1]);

        // the parallel edge resolves to the lowest id, both are stored
        assert_eq!(graph.edge_between(0, 1), Some(0));
        assert_eq!(graph.edge_endpoints(1), (0, 1));
        assert_eq!(graph.edge_endpoints(3), (2, 2));
    }

    #[test]
    fn test_intersect_sorted() {
        let mut out = Vec::new();

        intersect_sorted(&[0, 2, 4, 5, 9], &[1, 2, 5, 6, 9, 12], &mut out);
        assert_eq!(out, vec![2, 5, 9]);

        intersect_sorted(&[0, 3], &[1, 2], &mut out);
        assert_eq!(out, Vec::<usize>::new());
    }
}
