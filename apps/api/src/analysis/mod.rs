// ATS match analysis core.
// Implements: normalization, keyword matching, section scoring, requirement
// extraction, aggregation, and persistence. The oracle call is the only
// network I/O in the pipeline and all of it goes through the oracle module.

pub mod aggregator;
pub mod handlers;
pub mod keywords;
pub mod normalize;
pub mod prompts;
pub mod requirements;
pub mod sections;
pub mod store;
pub mod vocabulary;
