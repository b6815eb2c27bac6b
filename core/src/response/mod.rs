//! Decodes aggregate histograms that a delegated runner prints as JSON inside its log output.

mod histogram;

pub use histogram::{extract_histogram, try_extract_histogram, DuplicateLabels, Histogram};
