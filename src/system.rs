use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use log::{debug, trace};
use ndarray::Array2;
use num_rational::BigRational;
use num_traits::Zero;
use thiserror::Error;

use crate::polynomial::{Monomial, Polynomial, Symbol};

/// Reasons solving may fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverFailure {
    /// Fewer hailstones were given than are needed to pin down a rock.
    #[error("at least 3 hailstones are needed, found {found}")]
    NotEnoughHailstones { found: usize },
    /// An equation mentions a symbol that is neither a primary nor an auxiliary unknown.
    #[error("equation mentions undeclared symbol {0}")]
    UndeclaredSymbol(String),
    /// An auxiliary unknown appears with a power above one, so it cannot be eliminated pairwise.
    #[error("{0} does not appear linearly and cannot be eliminated")]
    NonLinear(String),
    /// The equations admit no solution.
    #[error("the system is inconsistent")]
    Inconsistent,
    /// The equations do not pin down the named unknown.
    #[error("the system does not determine {0}")]
    Underdetermined(String),
    /// A solution was found, but the named coordinate is not a whole number.
    #[error("{name} = {value} is not an integer")]
    NonIntegral { name: String, value: String },
}

/// An assignment of exact values to unknowns.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Solution<V: Symbol>(BTreeMap<V, BigRational>);

impl<V: Symbol> Solution<V> {
    pub fn get(&self, symbol: &V) -> Option<&BigRational> {
        self.0.get(symbol)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&V, &BigRational)> {
        self.0.iter()
    }

    /// Whether every equation of `system` evaluates to exactly zero.
    pub fn satisfies(&self, system: &PolynomialSystem<V>) -> bool {
        system.equations.iter().all(|equation| equation.evaluate(&self.0).is_some_and(|value| value.is_zero()))
    }
}

/// A system of polynomial equations, each understood as `equation = 0`.
///
/// Unknowns come in two kinds.
/// Primary unknowns are solved for directly.
/// Auxiliary unknowns (e.g. per-collision times) are eliminated first and recovered by back-substitution once the primaries are known.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PolynomialSystem<V: Symbol> {
    equations: Vec<Polynomial<V>>,
    unknowns: Vec<V>,
    auxiliary: Vec<V>,
}

impl<V: Symbol> Default for PolynomialSystem<V> {
    fn default() -> Self {
        Self::new()
    }
}

// a linear form A + B * v, kept so v can be recovered later
type LinearForm<V> = (Polynomial<V>, Polynomial<V>);

impl<V: Symbol> PolynomialSystem<V> {
    pub fn new() -> Self {
        Self {
            equations: Vec::new(),
            unknowns: Vec::new(),
            auxiliary: Vec::new(),
        }
    }

    pub fn add_unknown(&mut self, symbol: V) -> &mut Self {
        if !self.unknowns.contains(&symbol) {
            self.unknowns.push(symbol);
        }
        self
    }

    pub fn add_auxiliary(&mut self, symbol: V) -> &mut Self {
        if !self.auxiliary.contains(&symbol) {
            self.auxiliary.push(symbol);
        }
        self
    }

    pub fn add_equation(&mut self, equation: Polynomial<V>) -> &mut Self {
        self.equations.push(equation);
        self
    }

    pub fn equations(&self) -> &[Polynomial<V>] {
        &self.equations
    }

    pub fn unknowns(&self) -> &[V] {
        &self.unknowns
    }

    pub fn auxiliary(&self) -> &[V] {
        &self.auxiliary
    }

    /// Solve the system exactly.
    ///
    /// Auxiliary unknowns are eliminated in declaration order by cross-multiplying every pair of equations linear in them.
    /// What remains is linearized by treating each higher-degree monomial as a fresh column and row-reducing those columns away first.
    /// The candidate is then checked against every original equation.
    ///
    /// At most one solution is determined; the result is a [`Vec`] so callers choose explicitly.
    pub fn solve(&self) -> Result<Vec<Solution<V>>, SolverFailure> {
        self.check_declared()?;

        let mut remaining = self.equations.clone();
        let mut eliminated: Vec<(V, Vec<LinearForm<V>>)> = Vec::with_capacity(self.auxiliary.len());

        for symbol in &self.auxiliary {
            let (involving, rest): (Vec<_>, Vec<_>) = remaining.into_iter()
                .partition(|equation| equation.degree_in(symbol) > 0);

            let forms = involving.iter()
                .map(|equation| equation.split_linear(symbol).ok_or_else(|| SolverFailure::NonLinear(symbol.to_string())))
                .collect::<Result<Vec<_>, _>>()?;

            remaining = rest;
            // A1 + B1 v = 0 and A2 + B2 v = 0 imply A1 B2 - A2 B1 = 0
            for ((a1, b1), (a2, b2)) in forms.iter().tuple_combinations() {
                let eliminant = a1 * b2 - a2 * b1;
                if !eliminant.is_zero() {
                    trace!("eliminating {} gives {} = 0", symbol, eliminant);
                    remaining.push(eliminant);
                }
            }

            debug!("eliminated {} from {} equations, {} remain", symbol, forms.len(), remaining.len());
            eliminated.push((symbol.clone(), forms));
        }

        let mut assignment = self.solve_linearized(&remaining)?;

        for (symbol, forms) in eliminated.into_iter().rev() {
            let value = forms.iter()
                .find_map(|(a, b)| {
                    let b = b.evaluate(&assignment)?;
                    if b.is_zero() {
                        return None;
                    }
                    Some(-a.evaluate(&assignment)? / b)
                })
                .ok_or_else(|| SolverFailure::Underdetermined(symbol.to_string()))?;

            debug!("back-substituted {} = {}", symbol, value);
            assignment.insert(symbol, value);
        }

        let solution = Solution(assignment);
        if !solution.satisfies(self) {
            return Err(SolverFailure::Inconsistent);
        }

        Ok(vec![solution])
    }

    fn check_declared(&self) -> Result<(), SolverFailure> {
        let declared = self.unknowns.iter().chain(&self.auxiliary).collect::<BTreeSet<_>>();

        match self.equations.iter()
            .flat_map(Polynomial::variables)
            .find(|symbol| !declared.contains(symbol)) {
            Some(symbol) => Err(SolverFailure::UndeclaredSymbol(symbol.to_string())),
            None => Ok(()),
        }
    }

    /// Solve for the primary unknowns, treating every monomial of degree above one as its own column.
    fn solve_linearized(&self, equations: &[Polynomial<V>]) -> Result<BTreeMap<V, BigRational>, SolverFailure> {
        // non-linear columns go first so they are eliminated before any unknown is pivoted on
        let mut columns: Vec<Monomial<V>> = equations.iter()
            .flat_map(|equation| equation.terms().map(|(monomial, _)| monomial))
            .filter(|monomial| monomial.degree() > 1)
            .unique()
            .cloned()
            .sorted()
            .collect_vec();
        let nonlinear = columns.len();
        columns.extend(self.unknowns.iter().cloned().map(Monomial::var));

        let width = columns.len() + 1;
        let mut matrix = Array2::from_elem((equations.len(), width), BigRational::zero());
        for (row, equation) in equations.iter().enumerate() {
            for (col, monomial) in columns.iter().enumerate() {
                matrix[[row, col]] = equation.coefficient(monomial);
            }
            matrix[[row, width - 1]] = equation.coefficient(&Monomial::one());
        }

        let pivots = reduce(&mut matrix);
        debug!("linearized {} equations over {} non-linear and {} linear columns, rank {}",
            equations.len(), nonlinear, self.unknowns.len(), pivots.len());

        // a row of zeros equal to a non-zero constant
        let rank = pivots.len();
        if (rank..equations.len()).any(|row| !matrix[[row, width - 1]].is_zero()) {
            return Err(SolverFailure::Inconsistent);
        }

        let mut assignment = BTreeMap::new();
        for (offset, symbol) in self.unknowns.iter().enumerate() {
            let col = nonlinear + offset;
            let (row, _) = pivots.iter()
                .find(|(_, pivot_col)| *pivot_col == col)
                .ok_or_else(|| SolverFailure::Underdetermined(symbol.to_string()))?;

            // a free linear column to the right of this pivot would leave it depending on another unknown
            if (col + 1..width - 1).any(|other| !matrix[[*row, other]].is_zero()) {
                return Err(SolverFailure::Underdetermined(symbol.to_string()));
            }

            assignment.insert(symbol.clone(), -matrix[[*row, width - 1]].clone());
        }

        Ok(assignment)
    }
}

/// Gauss-Jordan reduction to reduced row echelon form, leaving the last column as the constant term.
///
/// Returns the `(row, column)` position of each pivot.
fn reduce(matrix: &mut Array2<BigRational>) -> Vec<(usize, usize)> {
    let (rows, width) = matrix.dim();
    let mut pivots = Vec::new();

    for col in 0..width - 1 {
        let pivot_row = pivots.len();
        let Some(found) = (pivot_row..rows).find(|row| !matrix[[*row, col]].is_zero()) else {
            continue;
        };

        if found != pivot_row {
            for j in 0..width {
                matrix.swap([found, j], [pivot_row, j]);
            }
        }

        let pivot = matrix[[pivot_row, col]].clone();
        for j in col..width {
            let scaled = &matrix[[pivot_row, j]] / &pivot;
            matrix[[pivot_row, j]] = scaled;
        }

        for row in (0..rows).filter(|row| *row != pivot_row) {
            let factor = matrix[[row, col]].clone();
            if factor.is_zero() {
                continue;
            }
            for j in col..width {
                let reduced = &matrix[[row, j]] - &factor * &matrix[[pivot_row, j]];
                matrix[[row, j]] = reduced;
            }
        }

        pivots.push((pivot_row, col));
        if pivots.len() == rows {
            break;
        }
    }

    pivots
}
