use std::fmt::{Display, Formatter};

use log::{debug, warn};
use num_rational::BigRational;
use num_traits::ToPrimitive;
use strum::VariantArray;

use crate::hailstone::{Hailstone, Storm};
use crate::polynomial::Polynomial;
use crate::system::{PolynomialSystem, Solution, SolverFailure};
use crate::vector::{Axis, Vector3};

/// Three hailstones give nine equations in nine unknowns: six for the rock and one collision time each.
pub const SAMPLED_HAILSTONES: usize = 3;

/// The unknowns of a rock throw.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Unknown {
    Position(Axis),
    Velocity(Axis),
    /// Time at which the rock meets the hailstone with this index.
    Time(usize),
}

impl Display for Unknown {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Unknown::Position(axis) => write!(f, "{axis}"),
            Unknown::Velocity(axis) => write!(f, "v{axis}"),
            Unknown::Time(index) => write!(f, "t{index}"),
        }
    }
}

/// A rock thrown so that it meets every sampled hailstone.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Rock {
    pub position: Vector3,
    pub velocity: Vector3,
    /// One entry per sampled hailstone, in input order.
    pub collision_times: Vec<BigRational>,
}

impl Rock {
    /// The puzzle answer, `x + y + z` of the starting position.
    pub fn coordinate_sum(&self) -> i64 {
        self.position.sum()
    }
}

/// Builds and solves the polynomial system describing a rock throw.
pub struct RockThrow;

impl RockThrow {
    /// Build the collision equations against the first [`SAMPLED_HAILSTONES`] hailstones; any others are ignored.
    ///
    /// For hailstone `i` and each axis `a`, the rock and hailstone share coordinate `a` at time `t_i`:
    /// `(p_a + v_a * t_i) - (h_a + hv_a * t_i) = 0`.
    pub fn system(hailstones: &[Hailstone]) -> Result<PolynomialSystem<Unknown>, SolverFailure> {
        if hailstones.len() < SAMPLED_HAILSTONES {
            return Err(SolverFailure::NotEnoughHailstones { found: hailstones.len() });
        }

        let mut system = PolynomialSystem::new();
        for axis in Axis::VARIANTS {
            system.add_unknown(Unknown::Position(*axis));
        }
        for axis in Axis::VARIANTS {
            system.add_unknown(Unknown::Velocity(*axis));
        }

        for (index, hailstone) in hailstones.iter().take(SAMPLED_HAILSTONES).enumerate() {
            debug!("sampling hailstone {}: {}", index, hailstone);
            let time = Unknown::Time(index);
            system.add_auxiliary(time);

            for axis in Axis::VARIANTS {
                let rock_at = Polynomial::var(Unknown::Position(*axis))
                    + Polynomial::var(Unknown::Velocity(*axis)) * Polynomial::var(time);
                let hailstone_at = Polynomial::from(hailstone.position[*axis])
                    + Polynomial::from(hailstone.velocity[*axis]) * Polynomial::var(time);

                let equation = rock_at - hailstone_at;
                debug!("{} = 0", equation);
                system.add_equation(equation);
            }
        }

        Ok(system)
    }

    /// Solve for the rock meeting the first three hailstones of `storm`.
    ///
    /// The first solution returned is taken without checking that it is the physically meaningful one.
    pub fn solve(storm: &Storm) -> Result<Rock, SolverFailure> {
        let system = Self::system(storm.hailstones())?;
        let solutions = system.solve()?;

        if solutions.len() > 1 {
            warn!("{} solutions found, taking the first without validation", solutions.len());
        }
        let solution = solutions.into_iter().next().ok_or(SolverFailure::Inconsistent)?;

        let position = integral_vector(&solution, Unknown::Position)?;
        let velocity = integral_vector(&solution, Unknown::Velocity)?;
        let collision_times = (0..SAMPLED_HAILSTONES)
            .map(|index| solution.get(&Unknown::Time(index)).cloned().ok_or_else(|| SolverFailure::Underdetermined(Unknown::Time(index).to_string())))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Rock { position, velocity, collision_times })
    }
}

fn integral_vector(solution: &Solution<Unknown>, unknown: fn(Axis) -> Unknown) -> Result<Vector3, SolverFailure> {
    let components = Axis::VARIANTS.iter()
        .map(|axis| {
            let symbol = unknown(*axis);
            let value = solution.get(&symbol).ok_or_else(|| SolverFailure::Underdetermined(symbol.to_string()))?;
            if !value.is_integer() {
                return Err(SolverFailure::NonIntegral { name: symbol.to_string(), value: value.to_string() });
            }
            value.to_integer().to_i64()
                .ok_or_else(|| SolverFailure::NonIntegral { name: symbol.to_string(), value: value.to_string() })
        })
        .collect::<Result<Vec<i64>, _>>()?;

    Ok(Vector3::new(components[0], components[1], components[2]))
}
