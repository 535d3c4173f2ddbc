//! Utilities for converting between Gregorian (solar) dates and the Chinese
//! lunar calendar.
//!
//! Conversion is driven by a precomputed table of lunar month starts covering
//! lunar years 1900 through 2150. No astronomical computation is involved;
//! the table is the authority.
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use nongli::Date;
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//!
//! assert_eq!(20000101, date.code());
//! assert_eq!(2451545, date.jdn());
//! ```
//!
//! Chinese lunar calendar:
//!
//! ```
//! use nongli::chinese::{self, Month::*};
//!
//! let date = chinese::solar_to_lunar(2000, 1, 1).unwrap();
//! assert_eq!((1999, Common(11), 25), (date.year(), date.lunar_month(), date.day()));
//!
//! let back = chinese::lunar_to_solar(1999, 11, 25, false).unwrap();
//! assert_eq!("2000-01-01", back.solar().iso_gregorian());
//! ```
//!
//! Flat-rate differences:
//!
//! ```
//! use nongli::Date;
//! use nongli::math::{solar_diff, Unit};
//!
//! let a = Date::from_gregorian(2020, 1, 1).unwrap();
//! let b = Date::from_gregorian(2019, 1, 1).unwrap();
//! assert_eq!(1, solar_diff(a, b, Unit::Year));
//! ```
//!
//! # Logging
//!
//! Rejected conversions are reported through [`tracing`] at `debug` level;
//! the crate never installs a subscriber.

pub mod chinese;
pub mod date;
pub mod error;
pub mod math;

pub use chinese::{Field, LunarDate, Month, advance, lunar_to_solar, solar_to_lunar};
pub use date::{Date, YearType};
pub use error::{Component, ConversionError};
pub use math::{Unit, date_code_diff, solar_diff};
