pub mod config;
pub mod enrich;
pub mod error;
pub mod hit;
pub mod profile;
pub mod render;
pub mod search;
pub mod storage;
pub mod summarize;

pub use config::{ConfigError, EngineConfig, SearchBackend, SearchConfig, SummarizerConfig};
pub use enrich::{
    Aggregate, Aggregator, AssemblyLimits, BucketedHits, FactExtractor, PatternLibrary,
    ProfileAssembler, ProfileEngine, ResultClassifier, SearchLimits, Subject,
};
pub use error::{Error, Result};
pub use hit::SearchHit;
pub use profile::{
    Bucket, CandidateFactSet, DistinctList, ExcerptRecord, FactCategory, Platform, Profile,
    ProfilePreview, ProfessionalRecord, SocialProfileRecord,
};
pub use search::{SearchError, SearchOutcome, SearchProvider};
pub use storage::{HistorySink, RecordKind, SearchRecord, Storage};
pub use summarize::{fallback_summary, Digest, SummarizeError, Summarizer, SummaryOutcome};
