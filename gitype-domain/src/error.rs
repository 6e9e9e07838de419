use std::path::PathBuf;
use thiserror::Error;

/// 字段级别的校验错误
///
/// `file` 在构造时通常为空，由调用方在知道来源文件后补上。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("field `{field}` in file {file}: {message}")]
pub struct FieldError {
    pub file: String,
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            file: String::new(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// 指定出错的文件
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = file.into();
        self
    }

    /// 为字段名添加前缀，例如 `author` + `name` => `author.name`
    pub fn prefixed(mut self, prefix: &str) -> Self {
        self.field = if self.field.is_empty() {
            prefix.to_string()
        } else if self.field.starts_with('[') {
            format!("{}{}", prefix, self.field)
        } else {
            format!("{}.{}", prefix, self.field)
        };
        self
    }

    pub fn empty(field: impl Into<String>) -> Self {
        Self::new(field, "must not be empty")
    }
}

/// 加载数据目录时可能出现的错误
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("Duplicate {kind} slug: {slug}")]
    Duplicate { kind: &'static str, slug: String },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Feed error: {0}")]
    Feed(String),
}

impl LoadError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io { path: path.into(), source }
    }

    pub fn yaml(path: impl Into<PathBuf>, source: serde_yaml::Error) -> Self {
        LoadError::Yaml { path: path.into(), source }
    }
}
