use std::fmt;

use serde::{Deserialize, Serialize};

use crate::numfmt::{format_decimal, format_signed, round2};

const PROMOTE_ABOVE: f64 = 1000.0;

/// Time units reported by Criterion, ordered finest to coarsest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Ns,
    Us,
    Ms,
    S,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 4] = [TimeUnit::Ns, TimeUnit::Us, TimeUnit::Ms, TimeUnit::S];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeUnit::Ns => "ns",
            TimeUnit::Us => "us",
            TimeUnit::Ms => "ms",
            TimeUnit::S => "s",
        }
    }

    pub fn coarser(self) -> Option<TimeUnit> {
        match self {
            TimeUnit::Ns => Some(TimeUnit::Us),
            TimeUnit::Us => Some(TimeUnit::Ms),
            TimeUnit::Ms => Some(TimeUnit::S),
            TimeUnit::S => None,
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A magnitude paired with its unit, already rounded for display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub value: f64,
    pub unit: TimeUnit,
}

impl Measurement {
    /// Renders with an explicit sign, e.g. `+50.0 us`.
    pub fn signed(&self) -> String {
        format!("{} {}", format_signed(self.value), self.unit)
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", format_decimal(self.value), self.unit)
    }
}

/// Promotes `value` to coarser units while its magnitude exceeds 1000.
pub fn bump(value: f64, unit: TimeUnit) -> Measurement {
    bump_capped(value, unit, TimeUnit::S)
}

/// Same as [`bump`] but never promotes past `ceiling`.
pub fn bump_capped(value: f64, unit: TimeUnit, ceiling: TimeUnit) -> Measurement {
    let mut value = value;
    let mut unit = unit;
    while value.abs() > PROMOTE_ABOVE && unit < ceiling {
        let Some(next) = unit.coarser() else {
            break;
        };
        value /= 1000.0;
        unit = next;
    }
    Measurement {
        value: round2(value),
        unit,
    }
}
