use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::error::FieldError;

/// 作者信息
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub email: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub avatar: String,
}

impl Author {
    pub fn sanitize(&self) -> Result<(), FieldError> {
        if self.name.is_empty() {
            return Err(FieldError::empty("name"));
        }

        if !self.url.is_empty() && !is_url(&self.url) {
            return Err(FieldError::new("url", "is not a valid URL"));
        }

        if !self.avatar.is_empty() && !is_url(&self.avatar) {
            return Err(FieldError::new("avatar", "is not a valid URL"));
        }

        if !self.email.is_empty() && !self.email.validate_email() {
            return Err(FieldError::new("email", "is not a valid email"));
        }

        Ok(())
    }
}

/// 链接，用于菜单、友情链接、版权信息以及页面的上下页
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// 图标，可以是字体图标名称或是图片地址
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub icon: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rel: String,

    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub text: String,

    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub mime: String,
}

impl Link {
    pub fn new(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_rel(mut self, rel: &str) -> Self {
        self.rel = rel.to_string();
        self
    }

    pub fn sanitize(&self) -> Result<(), FieldError> {
        if self.text.is_empty() {
            return Err(FieldError::empty("text"));
        }
        if self.url.is_empty() {
            return Err(FieldError::empty("url"));
        }
        Ok(())
    }
}

/// 网站图标
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Icon {
    #[serde(default)]
    pub url: String,

    #[serde(rename = "type", default)]
    pub mime: String,

    #[serde(default)]
    pub sizes: String,
}

impl Icon {
    pub fn sanitize(&self) -> Result<(), FieldError> {
        if self.url.is_empty() {
            return Err(FieldError::empty("url"));
        }
        Ok(())
    }
}

pub(crate) fn is_url(s: &str) -> bool {
    url::Url::parse(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_sanitize() {
        let mut author = Author {
            name: "caixw".to_string(),
            url: "https://example.com".to_string(),
            email: "caixw@example.com".to_string(),
            avatar: String::new(),
        };
        assert!(author.sanitize().is_ok());

        author.email = "not-an-email".to_string();
        assert_eq!(author.sanitize().unwrap_err().field, "email");

        author.email.clear();
        author.avatar = "not a url".to_string();
        assert_eq!(author.sanitize().unwrap_err().field, "avatar");

        author.name.clear();
        assert_eq!(author.sanitize().unwrap_err().field, "name");
    }

    #[test]
    fn test_link_sanitize() {
        assert!(Link::new("https://example.com", "example").sanitize().is_ok());
        assert_eq!(Link::new("", "example").sanitize().unwrap_err().field, "url");
        assert_eq!(Link::new("https://example.com", "").sanitize().unwrap_err().field, "text");
    }
}
