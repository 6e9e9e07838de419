use serde::{Deserialize, Serialize};

use super::link::{Author, Link};
use crate::error::FieldError;
use crate::site::PAGE_POST;
use crate::urls;
use crate::Timestamp;

/// 文章状态
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostState {
    /// 置顶
    Top,
    /// 放在列表最后
    Last,
    #[default]
    Default,
    /// 草稿，不会被加载
    Draft,
}

impl PostState {
    /// 排序时的分组，置顶为 0，普通为 1，置尾为 2
    pub fn rank(self) -> u8 {
        match self {
            PostState::Top => 0,
            PostState::Default | PostState::Draft => 1,
            PostState::Last => 2,
        }
    }
}

/// 文章的过时信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outdated {
    /// 以创建时间计算
    Created { date: Timestamp },
    /// 以修改时间计算
    Modified { date: Timestamp },
    /// 直接展示的自定义提示
    Custom { content: String },
}

impl Outdated {
    /// 解析 meta.yaml 中的 outdated 字段，`none` 表示永不过时
    pub fn parse(value: &str, created: Timestamp, modified: Timestamp) -> Option<Self> {
        match value {
            "" | "created" => Some(Outdated::Created { date: created }),
            "modified" => Some(Outdated::Modified { date: modified }),
            "none" => None,
            text => Some(Outdated::Custom { content: text.to_string() }),
        }
    }

    /// 距离参考时间已过的天数，未达到 threshold_days 时返回 None
    ///
    /// threshold_days 为 0 表示不启用过时提示。
    pub fn days(&self, now: Timestamp, threshold_days: u64) -> Option<i64> {
        if threshold_days == 0 {
            return None;
        }
        let date = match self {
            Outdated::Created { date } | Outdated::Modified { date } => date,
            Outdated::Custom { .. } => return None,
        };
        let days = now.signed_duration_since(*date).num_days();
        if days >= threshold_days as i64 {
            Some(days)
        } else {
            None
        }
    }
}

/// posts/<slug>/meta.yaml 的文件结构
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMeta {
    #[serde(default)]
    pub title: String,

    /// 草稿可以不填写，其余文章在转换时检查
    #[serde(default)]
    pub created: Option<Timestamp>,

    #[serde(default)]
    pub modified: Option<Timestamp>,

    #[serde(default)]
    pub summary: String,

    /// 以逗号分隔的标签 slug 列表
    #[serde(default)]
    pub tags: String,

    #[serde(default)]
    pub outdated: String,

    #[serde(default)]
    pub state: PostState,

    #[serde(default)]
    pub author: Option<Author>,

    #[serde(default)]
    pub license: Option<Link>,

    #[serde(default)]
    pub template: String,

    #[serde(default)]
    pub keywords: String,
}

impl PostMeta {
    pub fn is_draft(&self) -> bool {
        self.state == PostState::Draft
    }

    /// 转换为文章对象，author 和 license 缺省时使用全局配置
    ///
    /// 标签只做格式上的解析，与标签的关联由内容加载器完成。
    pub fn into_post(
        self,
        slug: &str,
        content: String,
        default_author: &Author,
        default_license: &Link,
    ) -> Result<Post, FieldError> {
        if content.is_empty() {
            return Err(FieldError::empty("content"));
        }
        if self.title.is_empty() {
            return Err(FieldError::empty("title"));
        }
        let created = self.created.ok_or_else(|| FieldError::empty("created"))?;

        let tag_slugs: Vec<String> = self
            .tags
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if tag_slugs.is_empty() {
            return Err(FieldError::empty("tags"));
        }

        let author = match self.author {
            Some(author) => {
                author.sanitize().map_err(|e| e.prefixed("author"))?;
                author
            }
            None => default_author.clone(),
        };

        let license = match self.license {
            Some(license) => {
                license.sanitize().map_err(|e| e.prefixed("license"))?;
                license
            }
            None => default_license.clone(),
        };

        let modified = self.modified.unwrap_or(created);
        let keywords = if self.keywords.is_empty() {
            tag_slugs.join(",")
        } else {
            self.keywords
        };
        let template = if self.template.is_empty() {
            PAGE_POST.to_string()
        } else {
            self.template
        };

        Ok(Post {
            slug: slug.to_string(),
            permalink: urls::post(slug),
            search_title: self.title.to_lowercase(),
            search_content: content.to_lowercase(),
            search_summary: self.summary.to_lowercase(),
            title: self.title,
            created,
            modified,
            summary: self.summary,
            content,
            tag_slugs,
            tags: Vec::new(),
            keywords,
            state: self.state,
            outdated: Outdated::parse(&self.outdated, created, modified),
            author,
            license,
            template,
        })
    }
}

/// 已加载的文章
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    /// 相对于 posts 目录的路径，可以包含 `/`
    pub slug: String,
    pub title: String,
    pub created: Timestamp,
    pub modified: Timestamp,
    pub summary: String,
    pub content: String,
    pub permalink: String,
    pub keywords: String,
    pub state: PostState,
    /// 过时提示需要结合当前时间计算，由页面自行处理
    #[serde(skip)]
    pub outdated: Option<Outdated>,
    pub author: Author,
    pub license: Link,
    pub template: String,

    /// meta.yaml 中声明的标签 slug
    #[serde(skip)]
    pub tag_slugs: Vec<String>,

    /// 关联标签在快照中的下标
    #[serde(skip)]
    pub tags: Vec<usize>,

    #[serde(skip)]
    pub search_title: String,
    #[serde(skip)]
    pub search_content: String,
    #[serde(skip)]
    pub search_summary: String,
}
