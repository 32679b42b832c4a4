pub mod config_value;
pub mod resolved_tag;
pub mod values_document;
