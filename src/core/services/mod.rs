pub mod config_merger;
pub mod manifest_pipeline;
pub mod tag_resolver;
pub mod template_renderer;
pub mod validator;
pub mod values_loader;
