use std::collections::HashSet;

use itertools::Itertools;
use log::debug;
use pathfinding::directed::edmonds_karp::edmonds_karp_sparse;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use thiserror::Error;
use unordered_pair::UnorderedPair;

/// Capacity of a wire. Every wire parsed from input carries `1`.
pub type Capacity = i64;

/// Reasons a cut may not be computed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CutFailure {
    /// A cut needs at least two components.
    #[error("graph has {0} components, at least 2 are needed")]
    TooFewNodes(usize),
    /// A terminal position is past the last component.
    #[error("terminal position {position} is out of range for {node_count} components")]
    TerminalOutOfRange { position: usize, node_count: usize },
    /// Both terminals name the same component.
    #[error("source and sink are both at position {0}")]
    SameTerminal(usize),
}

/// Which components to separate, as positions in order of first mention.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Terminals {
    pub source: usize,
    pub sink: usize,
}

impl Default for Terminals {
    /// The first and fourth components.
    fn default() -> Self {
        Self { source: 0, sink: 3 }
    }
}

/// The result of a minimum cut: its size, the wires cut, and the two sides.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MinimumCut<'a> {
    pub value: Capacity,
    pub cut_edges: Vec<UnorderedPair<&'a str>>,
    /// Components still reachable from the source, in order of first mention.
    pub source_side: Vec<&'a str>,
    /// Every other component, in order of first mention.
    pub sink_side: Vec<&'a str>,
}

impl MinimumCut<'_> {
    /// Product of the sizes of the two sides, the puzzle answer.
    pub fn partition_product(&self) -> usize {
        self.source_side.len() * self.sink_side.len()
    }
}

/// Max-flow based minimum cut over an undirected graph.
///
/// Each undirected wire becomes a pair of opposing arcs of the same capacity.
pub struct CutSolver<'g, 'a> {
    graph: &'g UnGraphMap<&'a str, Capacity>,
    nodes: Vec<&'a str>,
}

impl<'g, 'a> From<&'g UnGraphMap<&'a str, Capacity>> for CutSolver<'g, 'a> {
    fn from(graph: &'g UnGraphMap<&'a str, Capacity>) -> Self {
        Self {
            graph,
            nodes: graph.nodes().collect_vec(),
        }
    }
}

impl<'a> CutSolver<'_, 'a> {
    /// Resolve terminal positions to component names.
    pub fn terminals(&self, terminals: Terminals) -> Result<(&'a str, &'a str), CutFailure> {
        if self.nodes.len() < 2 {
            return Err(CutFailure::TooFewNodes(self.nodes.len()));
        }

        let lookup = |position: usize| self.nodes.get(position).copied()
            .ok_or(CutFailure::TerminalOutOfRange { position, node_count: self.nodes.len() });
        let source = lookup(terminals.source)?;
        let sink = lookup(terminals.sink)?;

        if terminals.source == terminals.sink {
            return Err(CutFailure::SameTerminal(terminals.source));
        }

        Ok((source, sink))
    }

    /// Minimum cut separating `source` from `sink`, both of which must be nodes of the graph.
    pub fn cut(&self, source: &'a str, sink: &'a str) -> MinimumCut<'a> {
        let capacities = self.graph.all_edges()
            .flat_map(|(a, b, capacity)| [((a, b), *capacity), ((b, a), *capacity)]);
        let (_, value, cuts) = edmonds_karp_sparse(&self.nodes, &source, &sink, capacities);

        let cut_edges = cuts.into_iter()
            .map(|((a, b), _)| UnorderedPair(a, b))
            .collect_vec();
        debug!("cutting {:?} separates {} from {}", cut_edges, source, sink);

        // once the saturated wires are gone, the source side is exactly what the source still reaches
        let mut remaining = self.graph.clone();
        for UnorderedPair(a, b) in &cut_edges {
            remaining.remove_edge(*a, *b);
        }

        let mut reachable = HashSet::with_capacity(self.nodes.len());
        let mut bfs = Bfs::new(&remaining, source);
        while let Some(node) = bfs.next(&remaining) {
            reachable.insert(node);
        }

        let (source_side, sink_side) = self.nodes.iter()
            .copied()
            .partition(|node| reachable.contains(node));

        MinimumCut {
            value,
            cut_edges,
            source_side,
            sink_side,
        }
    }

    /// Minimum over all cuts from the first node to every other node.
    pub fn global(&self) -> Result<MinimumCut<'a>, CutFailure> {
        let (source, rest) = match self.nodes.split_first() {
            Some((source, rest)) if !rest.is_empty() => (*source, rest),
            _ => return Err(CutFailure::TooFewNodes(self.nodes.len())),
        };

        let mut best: Option<MinimumCut<'a>> = None;
        for sink in rest {
            let cut = self.cut(source, *sink);
            debug!("{} to {}: {}", source, sink, cut.value);
            if best.as_ref().map_or(true, |best| cut.value < best.value) {
                best = Some(cut);
            }
        }

        best.ok_or(CutFailure::TooFewNodes(self.nodes.len()))
    }
}
