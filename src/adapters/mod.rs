pub mod git;
pub mod parsers;
