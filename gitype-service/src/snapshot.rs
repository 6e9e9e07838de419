use chrono::{DateTime, Utc};
use gitype_domain::{Archive, Feed, Link, Post, SiteConfig, Tag, Theme};
use gitype_infra::{TemplateContext, TemplateError, TemplateRenderer};
use std::fmt;
use std::sync::Arc;

/// 各类订阅内容，未配置的为 None
#[derive(Debug, Clone, Default)]
pub struct Feeds {
    pub rss: Option<Feed>,
    pub atom: Option<Feed>,
    pub sitemap: Option<Feed>,
    pub opensearch: Option<Feed>,
    pub manifest: Option<Feed>,
    pub service_worker: Option<Feed>,
}

impl Feeds {
    /// 按地址查找订阅内容
    pub fn find(&self, url: &str) -> Option<&Feed> {
        [
            &self.rss,
            &self.atom,
            &self.sitemap,
            &self.opensearch,
            &self.manifest,
            &self.service_worker,
        ]
            .into_iter()
            .flatten()
            .find(|feed| feed.url == url)
    }
}

/// 某一时刻的完整网站数据
///
/// 构建完成之后不再修改，重新加载时整体替换。文章与标签之间通过下标关联：
/// `Tag::posts` 和 `Post::tags` 分别保存对方在 `posts`、`tags` 中的位置。
pub struct Snapshot {
    pub created: DateTime<Utc>,
    /// 创建时间的 unix 秒数
    pub etag: String,
    pub config: SiteConfig,
    pub theme: Theme,
    /// 所有标签，按 tags.yaml 中的顺序
    pub tags: Vec<Tag>,
    /// 普通标签在 `tags` 中的下标
    pub plain_tags: Vec<usize>,
    /// 专题在 `tags` 中的下标
    pub series: Vec<usize>,
    /// 已排序的文章
    pub posts: Vec<Post>,
    pub links: Vec<Link>,
    pub archives: Vec<Archive>,
    pub feeds: Feeds,
    pub renderer: Arc<dyn TemplateRenderer>,
}

impl Snapshot {
    pub fn find_post(&self, slug: &str) -> Option<usize> {
        self.posts.iter().position(|p| p.slug == slug)
    }

    pub fn find_tag(&self, slug: &str) -> Option<usize> {
        self.tags.iter().position(|t| t.slug == slug)
    }

    pub fn render(&self, name: &str, context: &TemplateContext) -> Result<String, TemplateError> {
        self.renderer.render(name, context)
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("created", &self.created)
            .field("etag", &self.etag)
            .field("theme", &self.theme.id)
            .field("tags", &self.tags.len())
            .field("posts", &self.posts.len())
            .field("archives", &self.archives.len())
            .finish_non_exhaustive()
    }
}
