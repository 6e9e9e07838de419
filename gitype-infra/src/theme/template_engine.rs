use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use tera::{Context, Tera};
use thiserror::Error;
use tracing::debug;

use super::functions::TemplateFunctions;
use crate::paths::TEMPLATE_EXTENSION;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Invalid template path: {0}")]
    InvalidPath(String),

    #[error("Failed to compile templates: {0}")]
    Compile(String),

    #[error("Template `{0}` is not defined")]
    Missing(String),

    #[error("Failed to render template `{name}`: {message}")]
    Render { name: String, message: String },
}

/// 模板渲染器trait
pub trait TemplateRenderer: Send + Sync {
    /// 渲染模板，name 为不带扩展名的模板名称，例如 `post`
    fn render(&self, name: &str, context: &TemplateContext) -> Result<String, TemplateError>;

    /// 模板是否存在
    fn has_template(&self, name: &str) -> bool;
}

/// 模板上下文
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    /// 模型数据
    pub model: HashMap<String, serde_json::Value>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: HashMap<String, serde_json::Value>) -> Self {
        self.model = model;
        self
    }

    /// 将一个可序列化的对象的各个字段展开到上下文中
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        let model = match serde_json::to_value(value)? {
            serde_json::Value::Object(map) => map.into_iter().collect(),
            other => {
                let mut model = HashMap::new();
                model.insert("data".to_string(), other);
                model
            }
        };
        Ok(Self { model })
    }
}

/// 模板名称对应的文件名
pub fn template_file(name: &str) -> String {
    format!("{}{}", name, TEMPLATE_EXTENSION)
}

/// Tera模板引擎实现
/// 编译主题目录下所有的 `*.html` 文件，编译完成之后不再变化
pub struct TeraTemplateEngine {
    theme_id: String,
    tera: Tera,
}

impl TeraTemplateEngine {
    /// 编译 theme_dir 下的模板，并注册模板函数
    pub fn compile(
        theme_id: &str,
        theme_dir: &Path,
        functions: &TemplateFunctions,
    ) -> Result<Self, TemplateError> {
        let pattern = theme_dir.join(format!("*{}", TEMPLATE_EXTENSION));
        let pattern = pattern
            .to_str()
            .ok_or_else(|| TemplateError::InvalidPath(theme_dir.display().to_string()))?;

        // 创建Tera实例，从主题目录加载模板
        let mut tera = Tera::new(pattern).map_err(|e| TemplateError::Compile(error_chain(&e)))?;
        tera.autoescape_on(vec![".html", ".htm", ".xml"]);
        functions.register(&mut tera);

        debug!(
            "Compiled {} templates for theme {}",
            tera.get_template_names().count(),
            theme_id
        );

        Ok(Self {
            theme_id: theme_id.to_string(),
            tera,
        })
    }

    /// 确认所有需要的模板都已定义
    pub fn verify<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<(), TemplateError> {
        for name in names {
            if !self.has_template(name) {
                return Err(TemplateError::Missing(name.to_string()));
            }
        }
        Ok(())
    }

    pub fn theme_id(&self) -> &str {
        &self.theme_id
    }
}

impl TemplateRenderer for TeraTemplateEngine {
    fn render(&self, name: &str, context: &TemplateContext) -> Result<String, TemplateError> {
        // 构建Tera上下文
        let mut tera_context = Context::new();
        for (key, value) in &context.model {
            tera_context.insert(key, value);
        }

        let file = template_file(name);
        self.tera
            .render(&file, &tera_context)
            .map_err(|e| TemplateError::Render {
                name: file,
                message: error_chain(&e),
            })
    }

    fn has_template(&self, name: &str) -> bool {
        let file = template_file(name);
        self.tera.get_template_names().any(|n| n == file)
    }
}

/// tera 的错误信息通常在 source 链中
fn error_chain(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(e) = source {
        message.push_str(": ");
        message.push_str(&e.to_string());
        source = e.source();
    }
    message
}
