use std::fmt::{Display, Formatter};

use log::{debug, info};
use petgraph::dot::{Config, Dot};
use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::cut::{Capacity, CutFailure, CutSolver, MinimumCut, Terminals};
use crate::error::ParseError;

/// An undirected graph of named components joined by unit-capacity wires.
///
/// Names are borrowed from the input text.
/// Nodes are kept in order of first mention, which is what [`Terminals`] positions index into.
#[derive(Clone, Debug, Default)]
pub struct ComponentGraph<'a> {
    pub(crate) graph: UnGraphMap<&'a str, Capacity>,
}

impl<'a> ComponentGraph<'a> {
    /// Parse lines of the form `name: neighbour neighbour ...`, splitting on the first `:`.
    ///
    /// Wires listed twice (in either direction) are kept once.
    pub fn parse(input: &'a str) -> Result<Self, ParseError> {
        let mut graph = UnGraphMap::new();

        for (index, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let (component, neighbours) = parse_line(line).map_err(|e| e.at_line(index + 1))?;
            debug!("{} wired to {:?}", component, neighbours);

            graph.add_node(component);
            for neighbour in neighbours {
                graph.add_node(neighbour);
                if graph.add_edge(component, neighbour, 1).is_some() {
                    debug!("wire {} - {} listed more than once", component, neighbour);
                }
            }
        }

        Ok(Self { graph })
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Component names in order of first mention.
    pub fn nodes(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.graph.nodes()
    }

    pub fn edges(&self) -> impl Iterator<Item = UnorderedPair<&'a str>> + '_ {
        self.graph.all_edges().map(|(a, b, _)| UnorderedPair(a, b))
    }

    pub fn contains_wire(&self, a: &'a str, b: &'a str) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Minimum cut between the two components at the given positions.
    ///
    /// Returns according to [`CutSolver::cut`].
    pub fn minimum_cut(&self, terminals: Terminals) -> Result<MinimumCut<'a>, CutFailure> {
        let solver = CutSolver::from(&self.graph);
        let (source, sink) = solver.terminals(terminals)?;
        let cut = solver.cut(source, sink);
        info!("cut of {} wires between {} and {}", cut.value, source, sink);
        Ok(cut)
    }

    /// Smallest cut over every choice of sink, with the first component as source.
    ///
    /// Every global minimum cut separates the first component from some other, so this does not depend on terminal choice.
    pub fn global_minimum_cut(&self) -> Result<MinimumCut<'a>, CutFailure> {
        let cut = CutSolver::from(&self.graph).global()?;
        info!("global cut of {} wires", cut.value);
        Ok(cut)
    }

    /// Graphviz rendering of the wiring.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }
}

fn parse_line(line: &str) -> Result<(&str, Vec<&str>), ParseError> {
    let (component, neighbours) = line.split_once(':')
        .ok_or_else(|| ParseError::MissingColon { text: line.to_owned() })?;

    let component = component.trim();
    if component.is_empty() {
        return Err(ParseError::EmptyComponent { text: line.to_owned() });
    }

    let neighbours: Vec<&str> = neighbours.split_whitespace().collect();
    if neighbours.contains(&component) {
        return Err(ParseError::SelfLoop { name: component.to_owned() });
    }

    Ok((component, neighbours))
}

impl Display for ComponentGraph<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} components, {} wires", self.node_count(), self.edge_count())
    }
}
