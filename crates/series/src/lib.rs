//! # eflow-series
//!
//! Validated daily streamflow series and their water-year segmentation.
//!
//! ```
//! use chrono::{Days, NaiveDate};
//! use eflow_series::{AnalysisRecord, FlowSeries, segment_water_years};
//!
//! let start = NaiveDate::from_ymd_opt(1999, 10, 1).unwrap();
//! let dates: Vec<NaiveDate> = (0..366).map(|i| start + Days::new(i)).collect();
//! let series = FlowSeries::new(dates, vec![1.5; 366]).unwrap();
//!
//! let seg = segment_water_years(&series, 10, &[]).unwrap();
//! assert_eq!(seg.years()[0].label(), 2000);
//! assert!(seg.years()[0].is_complete());
//!
//! let record = AnalysisRecord::from_segmentation(&series, &seg);
//! assert_eq!(record.len(), 366);
//! ```

mod error;
mod exclusion;
mod flow;
mod record;
mod segment;
mod validate;

pub use error::SeriesError;
pub use exclusion::ExclusionRange;
pub use flow::FlowSeries;
pub use record::{AnalysisRecord, RecordYear};
pub use segment::{Segmentation, WaterYear, YearGaps, segment_water_years};
