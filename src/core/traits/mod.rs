pub mod commit_source;
pub mod parser;
