use serde::{Deserialize, Serialize};

use crate::error::FieldError;
use crate::urls;
use crate::Timestamp;

/// 标签
///
/// `series` 为 true 时表示专题。`posts` 保存的是文章在快照中的下标，
/// 文章按快照中的排序顺序加入。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub slug: String,

    #[serde(default)]
    pub title: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub color: String,

    /// 标签的描述内容，可以是 HTML
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub series: bool,

    #[serde(skip_deserializing)]
    pub keywords: String,

    #[serde(skip_deserializing)]
    pub permalink: String,

    /// 小写化后的标题，用于搜索匹配
    #[serde(skip)]
    pub search_title: String,

    #[serde(skip_deserializing)]
    pub modified: Timestamp,

    #[serde(skip)]
    pub posts: Vec<usize>,
}

impl Tag {
    /// 校验并填充派生字段，modified 初始为网站上线时间
    pub fn sanitize(&mut self, uptime: Timestamp) -> Result<(), FieldError> {
        if self.slug.is_empty() {
            return Err(FieldError::empty("slug"));
        }
        if self.title.is_empty() {
            return Err(FieldError::empty("title"));
        }
        if self.content.is_empty() {
            return Err(FieldError::empty("content"));
        }

        self.keywords = if self.title == self.slug {
            self.title.clone()
        } else {
            format!("{},{}", self.title, self.slug)
        };
        self.permalink = urls::tag(&self.slug, 1);
        self.search_title = self.title.to_lowercase();
        self.modified = uptime;
        self.posts.clear();

        Ok(())
    }

    /// 关联一篇文章，并同步更新修改时间
    pub fn attach(&mut self, post_index: usize, post_modified: Timestamp) {
        self.posts.push(post_index);
        if self.modified < post_modified {
            self.modified = post_modified;
        }
    }
}
