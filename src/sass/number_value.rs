use crate::error::{ErrorKind, Result, SassError};
use crate::operator::Op;

use std::fmt;

/// Digits kept after the decimal point when printing a number.
const PRECISION: f64 = 100_000.0;

#[derive(Debug, Clone, PartialEq)]
pub struct NumberValue {
    pub scalar: f64,
    pub unit: Option<String>,
    /// Source text of a literal, printed as written. Computed numbers have none.
    pub raw: Option<String>,
}

impl NumberValue {
    pub fn from_scalar(num: f64) -> NumberValue {
        NumberValue {
            scalar: num,
            unit: None,
            raw: None,
        }
    }

    pub fn with_units<S: Into<String>>(num: f64, unit: S) -> NumberValue {
        NumberValue {
            scalar: num,
            unit: Some(unit.into()),
            raw: None,
        }
    }

    pub fn with_raw<S: Into<String>>(self, raw: S) -> NumberValue {
        NumberValue {
            raw: Some(raw.into()),
            ..self
        }
    }

    pub fn unit_string(&self) -> &str {
        match self.unit {
            Some(ref u) => u,
            None => "",
        }
    }

    pub fn negate(self) -> NumberValue {
        NumberValue {
            scalar: -self.scalar,
            unit: self.unit,
            raw: None,
        }
    }

    pub fn apply_math(self, op: Op, nv: NumberValue, offset: usize) -> Result<NumberValue> {
        let scalar = op.math(self.scalar, nv.scalar, offset)?;
        let unit = self.compute_units(nv, offset)?;

        Ok(NumberValue { scalar, unit, raw: None })
    }

    // The first operand carrying a unit decides the result unit; unitless
    // operands combine with anything.
    fn compute_units(self, nv: NumberValue, offset: usize) -> Result<Option<String>> {
        let unit = match (self.unit, nv.unit) {
            (Some(u), None) | (None, Some(u)) => Some(u),
            (Some(u1), Some(u2)) => {
                if u1 != u2 {
                    return Err(SassError::new(
                        ErrorKind::IncompatibleUnits,
                        offset,
                        format!("Incompatible units: {} and {}", u1, u2),
                    ));
                }
                Some(u1)
            },
            (None, None) => None,
        };
        Ok(unit)
    }
}

pub fn format_scalar(scalar: f64) -> String {
    let rounded = (scalar * PRECISION).round() / PRECISION;
    if rounded == 0.0 {
        // also catches -0
        String::from("0")
    } else {
        format!("{}", rounded)
    }
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.raw {
            Some(ref raw) => write!(f, "{}", raw),
            None => write!(f, "{}{}", format_scalar(self.scalar), self.unit_string()),
        }
    }
}
