mod aggregator;
mod assembler;
mod classifier;
mod extractor;
mod patterns;
mod pipeline;

pub use aggregator::{Aggregate, Aggregator, BucketedHits, EXCERPT_CHARS, MENTION_CAP};
pub use assembler::{AssemblyLimits, ProfileAssembler};
pub use classifier::ResultClassifier;
pub use extractor::{FactExtractor, Subject};
pub use patterns::{
    IndicatorRule, PatternLibrary, EDUCATION_INDICATORS, EMAIL_PATTERN, LOCATION_INDICATORS,
    OCCUPATION_INDICATORS, PHONE_PATTERN,
};
pub use pipeline::{ProfileEngine, SearchLimits};
