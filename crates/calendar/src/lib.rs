//! # eflow-calendar
//!
//! Gregorian water-year arithmetic for daily hydrologic records.
//!
//! ## Quick Start
//!
//! ```
//! use chrono::NaiveDate;
//! use eflow_calendar::{WaterYearSpan, water_year};
//!
//! let d = NaiveDate::from_ymd_opt(1999, 10, 1).unwrap();
//! assert_eq!(water_year(d, 10).unwrap(), 2000);
//!
//! let span = WaterYearSpan::new(2000, 10).unwrap();
//! assert_eq!(span.end(), NaiveDate::from_ymd_opt(2000, 9, 30).unwrap());
//! assert_eq!(span.start(), d);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `water_year` | Water-year labels and spans |
//! | `runs` | Grouping dates into consecutive runs |
//! | `error` | Error types |

mod error;
mod runs;
mod water_year;

pub use error::CalendarError;
pub use runs::{DateRun, date_runs, is_next_day};
pub use water_year::{WaterYearSpan, water_year};
