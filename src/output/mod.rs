pub mod buckets;
pub mod formatter;

pub use buckets::{bucket_for, classify, AgeBucket, Classification, Transition, AGE_BUCKETS};
pub use formatter::{format_record_line, format_report, format_summary, should_use_colors};
