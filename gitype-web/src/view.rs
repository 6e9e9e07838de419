//! 传递给模板的页面数据
//!
//! 所有字段都借用自快照，渲染期间快照保持不变。

use chrono::{DateTime, FixedOffset, Utc};
use gitype_domain::{
    site::PageMeta, Archive, Author, Feed, Icon, Link, Outdated, Post, Tag, Theme, Timestamp, APP_NAME, APP_URL,
    APP_VERSION,
};
use gitype_service::Snapshot;
use serde::Serialize;

/// 网站级别的数据，每个页面都相同
#[derive(Debug, Serialize)]
pub struct SiteView<'a> {
    pub app_name: &'static str,
    pub app_url: &'static str,
    pub app_version: &'static str,
    pub theme: &'a Theme,
    pub site_name: &'a str,
    pub subtitle: &'a str,
    pub url: &'a str,
    pub icon: Option<&'a Icon>,
    pub language: &'a str,
    pub post_size: usize,
    pub beian: &'a str,
    pub uptime: Timestamp,
    /// 快照的生成时间
    pub last_updated: DateTime<Utc>,
    pub rss: Option<&'a Feed>,
    pub atom: Option<&'a Feed>,
    pub opensearch: Option<&'a Feed>,
    pub manifest: Option<&'a Feed>,
    /// 页面中需要注册的 service worker
    pub service_worker: Option<&'a Feed>,
    pub tags: Vec<TagView<'a>>,
    pub series: Vec<TagView<'a>>,
    pub links: &'a [Link],
    pub menus: &'a [Link],
}

impl<'a> SiteView<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        let config = &snapshot.config;
        let tag_views = |indexes: &[usize]| {
            indexes
                .iter()
                .map(|&i| TagView::new(&snapshot.tags[i]))
                .collect::<Vec<_>>()
        };

        Self {
            app_name: APP_NAME,
            app_url: APP_URL,
            app_version: APP_VERSION,
            theme: &snapshot.theme,
            site_name: &config.title,
            subtitle: &config.subtitle,
            url: &config.url,
            icon: config.icon.as_ref(),
            language: &config.language,
            post_size: snapshot.posts.len(),
            beian: &config.beian,
            uptime: config.uptime,
            last_updated: snapshot.created,
            rss: snapshot.feeds.rss.as_ref(),
            atom: snapshot.feeds.atom.as_ref(),
            opensearch: snapshot.feeds.opensearch.as_ref(),
            manifest: snapshot.feeds.manifest.as_ref(),
            service_worker: snapshot.feeds.service_worker.as_ref(),
            tags: tag_views(&snapshot.plain_tags),
            series: tag_views(&snapshot.series),
            links: &snapshot.links,
            menus: &config.menus,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TagView<'a> {
    #[serde(flatten)]
    pub tag: &'a Tag,
    pub post_size: usize,
}

impl<'a> TagView<'a> {
    pub fn new(tag: &'a Tag) -> Self {
        Self {
            tag,
            post_size: tag.posts.len(),
        }
    }
}

/// 文章页中引用的标签
#[derive(Debug, Serialize)]
pub struct TagRef<'a> {
    pub slug: &'a str,
    pub title: &'a str,
    pub permalink: &'a str,
    pub series: bool,
}

/// 过时提示，days 和 content 只会有一个
#[derive(Debug, Serialize, PartialEq)]
pub struct OutdatedView<'a> {
    pub days: Option<i64>,
    pub content: Option<&'a str>,
}

impl<'a> OutdatedView<'a> {
    pub fn new(outdated: &'a Outdated, now: DateTime<FixedOffset>, threshold_days: u64) -> Option<Self> {
        match outdated {
            Outdated::Custom { content } => Some(Self {
                days: None,
                content: Some(content),
            }),
            _ => outdated.days(now, threshold_days).map(|days| Self {
                days: Some(days),
                content: None,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PostView<'a> {
    #[serde(flatten)]
    pub post: &'a Post,
    pub tags: Vec<TagRef<'a>>,
    pub outdated: Option<OutdatedView<'a>>,
}

impl<'a> PostView<'a> {
    pub fn new(snapshot: &'a Snapshot, post: &'a Post, now: DateTime<FixedOffset>) -> Self {
        let tags = post
            .tags
            .iter()
            .map(|&i| {
                let tag = &snapshot.tags[i];
                TagRef {
                    slug: &tag.slug,
                    title: &tag.title,
                    permalink: &tag.permalink,
                    series: tag.series,
                }
            })
            .collect();

        Self {
            post,
            tags,
            outdated: post
                .outdated
                .as_ref()
                .and_then(|o| OutdatedView::new(o, now, snapshot.config.outdated)),
        }
    }

    /// 按下标生成一组文章
    pub fn list(snapshot: &'a Snapshot, indexes: &[usize], now: DateTime<FixedOffset>) -> Vec<Self> {
        indexes
            .iter()
            .map(|&i| Self::new(snapshot, &snapshot.posts[i], now))
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct ArchiveView<'a> {
    #[serde(flatten)]
    pub archive: &'a Archive,
    pub posts: Vec<PostView<'a>>,
}

/// 一个完整的页面
#[derive(Debug, Serialize)]
pub struct Page<'a> {
    pub site: SiteView<'a>,
    pub title: String,
    pub subtitle: &'a str,
    pub canonical: String,
    pub keywords: String,
    pub description: String,
    pub prev_page: Option<Link>,
    pub next_page: Option<Link>,
    /// 页面类型，与 pages 配置中的名称相同
    #[serde(rename = "type")]
    pub page_type: &'static str,
    pub author: &'a Author,
    pub license: &'a Link,
    pub q: String,
    pub tag: Option<TagView<'a>>,
    pub post: Option<PostView<'a>>,
    pub posts: Vec<PostView<'a>>,
    pub archives: Vec<ArchiveView<'a>>,
}

impl<'a> Page<'a> {
    /// 以网站和页面配置中的默认值初始化页面
    pub fn new(snapshot: &'a Snapshot, page_type: &'static str) -> Self {
        Self::with_meta(snapshot, page_type, snapshot.config.page(page_type))
    }

    /// 使用已处理过的页面配置初始化页面，description 为空时使用网站副标题
    pub fn with_meta(snapshot: &'a Snapshot, page_type: &'static str, meta: PageMeta) -> Self {
        let config = &snapshot.config;
        let description = if meta.description.is_empty() {
            config.subtitle.clone()
        } else {
            meta.description
        };

        Self {
            site: SiteView::new(snapshot),
            title: meta.title,
            subtitle: &config.subtitle,
            canonical: String::new(),
            keywords: meta.keywords,
            description,
            prev_page: None,
            next_page: None,
            page_type,
            author: &config.author,
            license: &config.license,
            q: String::new(),
            tag: None,
            post: None,
            posts: Vec::new(),
            archives: Vec::new(),
        }
    }
}
