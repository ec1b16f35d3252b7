//! Application use cases. One action per intent, plus the dispatch table.

pub mod content_metrics;
pub mod context;
pub mod journalist_contact;
pub mod keyword_alert;
pub mod media_coverage;
pub mod registry;
pub mod reports;
pub mod sentiment;
pub mod social_posts;

pub use content_metrics::ContentMetrics;
pub use context::{ActionContext, DateRangeResolver};
pub use journalist_contact::JournalistContact;
pub use keyword_alert::KeywordAlert;
pub use media_coverage::MediaCoverage;
pub use registry::ActionRegistry;
pub use reports::{CustomReport, KpiReport};
pub use sentiment::SentimentAnalysis;
pub use social_posts::{PublishPost, SchedulePost};
