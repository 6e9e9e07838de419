pub mod paths;
pub mod loader;
pub mod xml;
pub mod theme;
pub mod init;

pub use paths::DataPaths;
pub use xml::{XmlWriter, XmlError};
pub use theme::{TemplateRenderer, TemplateContext, TeraTemplateEngine, TemplateError};
