pub mod append;
pub mod args;
pub mod check;
pub mod dataset;
pub mod inference;
pub mod severity;
pub mod source;
pub mod utils;

pub use append::{append_malicious_urls, AppendConfig, AppendSummary};
pub use args::Args;
pub use dataset::{DatasetError, UrlRecord, MALICIOUS_LABEL, MALICIOUS_RESULT};
pub use inference::{InferenceContext, Tokenizer, UrlScorer};
pub use severity::Severity;
