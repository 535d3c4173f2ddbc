//! Error types for conversions, formatting and date arithmetic.

use std::fmt;

/// The date component a [`ConversionError::OutOfRange`] refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Component {
    Year,
    Month,
    Day,
    /// A whole solar date, reported as a `YYYYMMDD` code.
    SolarDate,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Component::Year => "year",
            Component::Month => "month",
            Component::Day => "day",
            Component::SolarDate => "solar date",
        })
    }
}

/// Error type for all fallible operations in this crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// A year, month, day or whole date lies outside the supported table.
    #[error("{component} {value} out of range {min}..={max}")]
    OutOfRange {
        /// Which component was rejected.
        component: Component,
        /// The rejected value.
        value: i32,
        /// Smallest accepted value.
        min: i32,
        /// Largest accepted value.
        max: i32,
    },

    /// A leap month was requested for a month that is not intercalary.
    #[error("lunar year {year} has no leap month {month}")]
    NotLeapMonth {
        /// The lunar year.
        year: i32,
        /// The requested month.
        month: u8,
    },

    /// Resolution produced a negative day offset. Signals bad table data.
    #[error("inconsistent lunar table data for solar date {code}")]
    InvalidDate {
        /// The solar date being resolved, as a `YYYYMMDD` code.
        code: u32,
    },

    /// A unit tag that has no defined length.
    #[error("unsupported date unit: {unit:?}")]
    UnsupportedUnit {
        /// The tag as given.
        unit: String,
    },
}

impl ConversionError {
    pub(crate) fn out_of_range(component: Component, value: i32, min: i32, max: i32) -> Self {
        Self::OutOfRange {
            component,
            value,
            min,
            max,
        }
    }
}
