use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::content::Author;
use crate::error::FieldError;

/// 主题信息，对应 themes/<id>/theme.yaml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Theme {
    /// 主题目录名称
    #[serde(skip_deserializing)]
    pub id: String,

    /// 显示名称，可以与 id 不同
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub version: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    #[serde(default)]
    pub author: Option<Author>,

    /// 主题需要的静态资源，非 http(s) 开头的地址相对于主题目录
    #[serde(default)]
    pub assets: Vec<String>,

    #[serde(skip)]
    pub path: PathBuf,
}

impl Theme {
    pub fn sanitize(&self) -> Result<(), FieldError> {
        if self.name.is_empty() {
            return Err(FieldError::empty("name"));
        }
        if let Some(author) = &self.author {
            author.sanitize().map_err(|e| e.prefixed("author"))?;
        }
        Ok(())
    }
}
