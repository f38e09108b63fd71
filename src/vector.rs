use std::fmt::{Display, Formatter};
use std::ops::Index;
use std::str::FromStr;

use itertools::Itertools;
use strum::{Display as StrumDisplay, VariantArray};

use crate::error::ParseError;

/// A spatial axis. Iterate all three with [`Axis::VARIANTS`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, VariantArray, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

/// An integer triple, used for both positions and velocities.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Vector3 {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Vector3 {
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    pub fn sum(&self) -> i64 {
        self.x + self.y + self.z
    }
}

impl Index<Axis> for Vector3 {
    type Output = i64;

    fn index(&self, axis: Axis) -> &Self::Output {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl FromStr for Vector3 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // sample inputs pad columns with extra spaces, e.g. "-2,  1, -2"
        let fields = s.split(',').map(str::trim).collect_vec();
        if fields.len() != 3 {
            return Err(ParseError::FieldCount { text: s.trim().to_owned(), found: fields.len() });
        }

        let mut parsed = [0i64; 3];
        for (slot, field) in parsed.iter_mut().zip(fields) {
            *slot = field.parse().map_err(|_| ParseError::NotAnInteger { field: field.to_owned() })?;
        }

        Ok(Self::new(parsed[0], parsed[1], parsed[2]))
    }
}

impl Display for Vector3 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.x, self.y, self.z)
    }
}
