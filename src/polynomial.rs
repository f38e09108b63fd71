use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Debug, Display, Formatter};
use std::hash::Hash;
use std::ops::{Add, Mul, Neg, Sub};

use itertools::Itertools;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

/// Constraint on the unknowns a [`Polynomial`] may be written in.
pub trait Symbol: Clone + Ord + Hash + Debug + Display {}
impl<T> Symbol for T where T: Clone + Ord + Hash + Debug + Display {}

/// A product of symbols raised to positive powers. The empty product is the constant monomial `1`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Monomial<V: Symbol>(BTreeMap<V, u32>);

impl<V: Symbol> Monomial<V> {
    pub fn one() -> Self {
        Self(BTreeMap::new())
    }

    pub fn var(symbol: V) -> Self {
        Self(BTreeMap::from([(symbol, 1)]))
    }

    pub fn is_constant(&self) -> bool {
        self.0.is_empty()
    }

    pub fn degree(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn degree_in(&self, symbol: &V) -> u32 {
        self.0.get(symbol).copied().unwrap_or(0)
    }

    pub fn symbols(&self) -> impl Iterator<Item = &V> {
        self.0.keys()
    }

    fn without(&self, symbol: &V) -> Self {
        let mut powers = self.0.clone();
        powers.remove(symbol);
        Self(powers)
    }

    fn times(&self, other: &Self) -> Self {
        let mut powers = self.0.clone();
        for (symbol, power) in &other.0 {
            *powers.entry(symbol.clone()).or_insert(0) += power;
        }
        Self(powers)
    }

    fn evaluate(&self, assignment: &BTreeMap<V, BigRational>) -> Option<BigRational> {
        self.0.iter().try_fold(BigRational::one(), |acc, (symbol, power)| {
            assignment.get(symbol).map(|value| (0..*power).fold(acc, |acc, _| acc * value))
        })
    }
}

impl<V: Symbol> Display for Monomial<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_constant() {
            return write!(f, "1");
        }

        write!(f, "{}", self.0.iter()
            .map(|(symbol, power)| if *power == 1 { symbol.to_string() } else { format!("{symbol}^{power}") })
            .join("*"))
    }
}

/// A multivariate polynomial with exact rational coefficients.
///
/// Terms are kept normalized: no zero coefficients are stored, so structurally equal polynomials compare equal.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Polynomial<V: Symbol> {
    terms: BTreeMap<Monomial<V>, BigRational>,
}

impl<V: Symbol> Polynomial<V> {
    pub fn zero() -> Self {
        Self { terms: BTreeMap::new() }
    }

    pub fn constant(value: BigRational) -> Self {
        let mut terms = BTreeMap::new();
        if !value.is_zero() {
            terms.insert(Monomial::one(), value);
        }
        Self { terms }
    }

    pub fn var(symbol: V) -> Self {
        Self { terms: BTreeMap::from([(Monomial::var(symbol), BigRational::one())]) }
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Total degree. The zero polynomial has degree 0.
    pub fn degree(&self) -> u32 {
        self.terms.keys().map(Monomial::degree).max().unwrap_or(0)
    }

    pub fn degree_in(&self, symbol: &V) -> u32 {
        self.terms.keys().map(|m| m.degree_in(symbol)).max().unwrap_or(0)
    }

    pub fn variables(&self) -> BTreeSet<V> {
        self.terms.keys().flat_map(Monomial::symbols).cloned().collect()
    }

    pub fn terms(&self) -> impl Iterator<Item = (&Monomial<V>, &BigRational)> {
        self.terms.iter()
    }

    pub fn coefficient(&self, monomial: &Monomial<V>) -> BigRational {
        self.terms.get(monomial).cloned().unwrap_or_else(BigRational::zero)
    }

    /// Write `self` as `A + B * symbol` where neither `A` nor `B` mention `symbol`.
    ///
    /// Returns `None` if `symbol` appears with a power above one.
    pub fn split_linear(&self, symbol: &V) -> Option<(Self, Self)> {
        let mut constant_part = Self::zero();
        let mut linear_part = Self::zero();

        for (monomial, coefficient) in &self.terms {
            match monomial.degree_in(symbol) {
                0 => constant_part.add_term(monomial.clone(), coefficient.clone()),
                1 => linear_part.add_term(monomial.without(symbol), coefficient.clone()),
                _ => return None,
            }
        }

        Some((constant_part, linear_part))
    }

    /// Value at `assignment`, or `None` if some symbol of `self` is unassigned.
    pub fn evaluate(&self, assignment: &BTreeMap<V, BigRational>) -> Option<BigRational> {
        self.terms.iter().try_fold(BigRational::zero(), |acc, (monomial, coefficient)| {
            monomial.evaluate(assignment).map(|value| acc + value * coefficient)
        })
    }

    fn add_term(&mut self, monomial: Monomial<V>, coefficient: BigRational) {
        let entry = self.terms.entry(monomial).or_insert_with(BigRational::zero);
        *entry += coefficient;
        if entry.is_zero() {
            self.terms.retain(|_, c| !c.is_zero());
        }
    }
}

impl<V: Symbol> From<i64> for Polynomial<V> {
    fn from(value: i64) -> Self {
        Self::constant(BigRational::from(BigInt::from(value)))
    }
}

impl<V: Symbol> Add for Polynomial<V> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        for (monomial, coefficient) in rhs.terms {
            self.add_term(monomial, coefficient);
        }
        self
    }
}

impl<V: Symbol> Neg for Polynomial<V> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self { terms: self.terms.into_iter().map(|(m, c)| (m, -c)).collect() }
    }
}

impl<V: Symbol> Sub for Polynomial<V> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl<V: Symbol> Mul for &Polynomial<V> {
    type Output = Polynomial<V>;

    fn mul(self, rhs: Self) -> Self::Output {
        let mut product = Polynomial::zero();
        for ((m1, c1), (m2, c2)) in self.terms.iter().cartesian_product(rhs.terms.iter()) {
            product.add_term(m1.times(m2), c1 * c2);
        }
        product
    }
}

impl<V: Symbol> Mul for Polynomial<V> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        &self * &rhs
    }
}

impl<V: Symbol> Display for Polynomial<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }

        // highest degree first, constant last
        let ordered = self.terms.iter()
            .sorted_by(|(a, _), (b, _)| b.degree().cmp(&a.degree()).then_with(|| a.cmp(b)));

        for (index, (monomial, coefficient)) in ordered.enumerate() {
            let magnitude = coefficient.abs();
            match (index, coefficient.is_negative()) {
                (0, true) => write!(f, "-")?,
                (0, false) => {}
                (_, true) => write!(f, " - ")?,
                (_, false) => write!(f, " + ")?,
            }

            if monomial.is_constant() {
                write!(f, "{magnitude}")?;
            } else if magnitude.is_one() {
                write!(f, "{monomial}")?;
            } else {
                write!(f, "{magnitude}*{monomial}")?;
            }
        }

        Ok(())
    }
}
