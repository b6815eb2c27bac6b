//! Turns raw program output into canonical outcome labels (`|01⟩` style kets).

mod normalize;

pub use normalize::{is_marker_line, normalize_line, sanitize_output, OutputMode};
