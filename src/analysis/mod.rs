pub mod breakdown;
pub mod summary;
pub mod timeline;

pub use breakdown::{category_breakdown, ActivityTier, CategoryBreakdown};
pub use summary::summarize;
pub use timeline::{build_timeline, TimelineEntry};
