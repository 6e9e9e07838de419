pub mod functions;
pub mod template_engine;

pub use functions::{strip_tags, TemplateFunctions};
pub use template_engine::{
    template_file, TemplateContext, TemplateError, TemplateRenderer, TeraTemplateEngine,
};
