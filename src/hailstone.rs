use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use log::debug;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::error::ParseError;
use crate::vector::Vector3;

/// A particle with a fixed starting position and a constant velocity.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Hailstone {
    pub position: Vector3,
    pub velocity: Vector3,
}

impl FromStr for Hailstone {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (position, velocity) = s.split_once('@')
            .ok_or_else(|| ParseError::MissingVelocity { text: s.trim().to_owned() })?;

        Ok(Self {
            position: position.parse()?,
            velocity: velocity.parse()?,
        })
    }
}

impl Display for Hailstone {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.position, self.velocity)
    }
}

#[inline]
fn big(value: i64) -> BigInt {
    BigInt::from(value)
}

impl Hailstone {
    /// Where the XY projections of the paths of `self` and `other` meet, if they do so at a non-negative time for both.
    ///
    /// Times are independent; the two hailstones need not be at the crossing simultaneously.
    pub fn path_crossing_in_xy(&self, other: &Hailstone) -> Option<(BigRational, BigRational)> {
        // self.p + self.v * s = other.p + other.v * t, solved by Cramer's rule over x and y
        let det = big(other.velocity.x) * big(self.velocity.y) - big(self.velocity.x) * big(other.velocity.y);
        if det.is_zero() {
            // parallel (or identical) paths never have a single crossing point
            return None;
        }

        let dx = big(other.position.x) - big(self.position.x);
        let dy = big(other.position.y) - big(self.position.y);
        let s = BigRational::new(big(other.velocity.x) * &dy - &dx * big(other.velocity.y), det.clone());
        let t = BigRational::new(big(self.velocity.x) * &dy - &dx * big(self.velocity.y), det);

        if s.is_negative() || t.is_negative() {
            return None;
        }

        let x = BigRational::from(big(self.position.x)) + &s * BigRational::from(big(self.velocity.x));
        let y = BigRational::from(big(self.position.y)) + &s * BigRational::from(big(self.velocity.y));
        Some((x, y))
    }
}

/// An ordered collection of hailstones, in input order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Storm {
    hailstones: Vec<Hailstone>,
}

impl Storm {
    /// Parse one hailstone per line. Blank lines are skipped; any other malformed line aborts the parse.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut hailstones = Vec::new();

        for (index, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            let hailstone: Hailstone = line.parse().map_err(|e: ParseError| e.at_line(index + 1))?;
            debug!("parsed hailstone {} from {:?}", hailstone, line);
            hailstones.push(hailstone);
        }

        Ok(Self { hailstones })
    }

    pub fn hailstones(&self) -> &[Hailstone] {
        &self.hailstones
    }

    pub fn len(&self) -> usize {
        self.hailstones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hailstones.is_empty()
    }

    /// Count unordered pairs of hailstones whose XY paths cross, in the future of both, inside the inclusive square `[min, max]`.
    pub fn crossings_in_xy(&self, min: i64, max: i64) -> usize {
        let min = BigRational::from(big(min));
        let max = BigRational::from(big(max));

        self.hailstones.iter()
            .tuple_combinations()
            .filter(|(a, b)| match a.path_crossing_in_xy(b) {
                None => {
                    debug!("no future crossing between {} and {}", a, b);
                    false
                }
                Some((x, y)) => {
                    debug!("{} and {} cross at ({}, {})", a, b, x, y);
                    min <= x && x <= max && min <= y && y <= max
                }
            })
            .count()
    }
}

impl From<Vec<Hailstone>> for Storm {
    fn from(hailstones: Vec<Hailstone>) -> Self {
        Self { hailstones }
    }
}
