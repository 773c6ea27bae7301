// Scholarship search: request profile → completion query → answer parsing.
// The parsing pipeline (segmenter, extractors, validator, parser, catalog)
// is pure and synchronous; only handlers touch the network.

pub mod catalog;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod parser;
pub mod profile;
pub mod prompts;
pub mod segmenter;
pub mod validator;
