#![warn(missing_docs)]

//! # `permafrost`
//!
//! Solvers for two snow island puzzles: throwing a rock through a storm of hailstones, and splitting a machine's wiring in two.
//!
//! ## Hailstones
//! Parse a [`Storm`] and hand it to [`RockThrow::solve`].
//! Every hailstone moves at constant velocity; we want one rock, thrown from some position at some velocity, which collides with all of them.
//! Three hailstones are enough: each gives three equations (one per axis) at the cost of one new unknown (the collision time), so nine equations in nine unknowns.
//!
//! The equations `(p + v t_i) - (h_i + hv_i t_i) = 0` are not linear, as `v t_i` is a product of unknowns.
//! [`PolynomialSystem::solve`] handles this exactly, with big rationals throughout:
//! 1. Each time `t_i` appears linearly, so cross-multiplying pairs of its equations eliminates it.
//! 2. The eliminants share their quadratic terms (`x vy - y vx` and so on) across hailstones, so treating each quadratic monomial as its own column and row-reducing those away first leaves a linear system in the rock's six unknowns.
//! 3. The times are recovered by back-substitution, and the whole candidate is checked against the original nine equations.
//!
//! [`Storm::crossings_in_xy`] also counts hailstone paths which cross inside a test area, ignoring the z axis.
//!
//! ## Components
//! Parse a [`ComponentGraph`] from its wiring list, then ask for a [`MinimumCut`] between two [`Terminals`] with [`ComponentGraph::minimum_cut`].
//! Cuts are computed by max-flow (Edmonds-Karp) on the unit-capacity graph.
//! Terminals are positions in order of first mention, so the choice is deterministic for a given input.
//! [`ComponentGraph::global_minimum_cut`] removes the dependency on that choice entirely.

pub use component::ComponentGraph;
pub use cut::{CutFailure, MinimumCut, Terminals};
pub use error::ParseError;
pub use hailstone::{Hailstone, Storm};
pub use polynomial::{Monomial, Polynomial};
pub use rock::{Rock, RockThrow, Unknown};
pub use system::{PolynomialSystem, Solution, SolverFailure};
pub use vector::{Axis, Vector3};

mod tests;
pub mod component;
pub mod cut;
pub(crate) mod error;
pub mod hailstone;
pub mod polynomial;
pub mod rock;
pub mod system;
pub mod vector;
