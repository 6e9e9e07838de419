pub mod pages;
pub mod feeds;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{self, Write};

use crate::content::{link::is_url, Author, Icon, Link};
use crate::error::FieldError;
use crate::Timestamp;

pub use feeds::{
    Changefreq, ManifestConfig, ManifestDir, ManifestDisplay, ManifestOrientation,
    OpensearchConfig, RssConfig, ServiceWorkerConfig, SitemapConfig,
    MIME_ATOM, MIME_MANIFEST, MIME_OPENSEARCH, MIME_RSS, MIME_SERVICE_WORKER, MIME_SITEMAP,
};
pub use pages::*;

/// 未指定语言时的默认值，默认页面标题与之对应
pub const DEFAULT_LANGUAGE: &str = "zh-cmn-Hans";

/// 页面默认的 mime type
pub const MIME_HTML: &str = "text/html";

/// 存档的分组方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveType {
    #[default]
    Year,
    Month,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveOrder {
    Asc,
    #[default]
    Desc,
}

/// 存档页的配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    #[serde(rename = "type", default)]
    pub archive_type: ArchiveType,

    #[serde(default)]
    pub order: ArchiveOrder,

    /// 存档标题的时间格式（strftime）
    #[serde(default = "default_archive_format")]
    pub format: String,
}

fn default_archive_format() -> String {
    "%Y".to_string()
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            archive_type: ArchiveType::default(),
            order: ArchiveOrder::default(),
            format: default_archive_format(),
        }
    }
}

/// 网站配置，对应 meta/config.yaml
///
/// 反序列化之后必须调用 [`SiteConfig::sanitize`]，它会校验各字段并填充默认值。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub title_separator: String,

    #[serde(default)]
    pub language: String,

    #[serde(default)]
    pub subtitle: String,

    /// 备案号
    #[serde(default)]
    pub beian: String,

    /// 网站地址，不带末尾的 `/`
    #[serde(default)]
    pub url: String,

    /// 上线时间
    pub uptime: Timestamp,

    #[serde(default)]
    pub page_size: usize,

    #[serde(rename = "type", default)]
    pub mime: String,

    #[serde(default)]
    pub icon: Option<Icon>,

    #[serde(default)]
    pub menus: Vec<Link>,

    #[serde(default)]
    pub author: Author,

    #[serde(default)]
    pub license: Link,

    #[serde(default)]
    pub long_date_format: String,

    #[serde(default)]
    pub short_date_format: String,

    /// 文章过时的天数，0 表示不提示
    #[serde(default)]
    pub outdated: u64,

    #[serde(default)]
    pub theme: String,

    #[serde(default)]
    pub pages: HashMap<String, PageMeta>,

    #[serde(default)]
    pub archive: ArchiveConfig,

    #[serde(default)]
    pub rss: Option<RssConfig>,

    #[serde(default)]
    pub atom: Option<RssConfig>,

    #[serde(default)]
    pub sitemap: Option<SitemapConfig>,

    #[serde(default)]
    pub opensearch: Option<OpensearchConfig>,

    #[serde(default)]
    pub manifest: Option<ManifestConfig>,

    #[serde(default)]
    pub service_worker: Option<ServiceWorkerConfig>,
}

impl SiteConfig {
    /// 校验配置并填充派生字段
    pub fn sanitize(&mut self) -> Result<(), FieldError> {
        if self.title.is_empty() {
            return Err(FieldError::empty("title"));
        }

        if self.language.is_empty() {
            self.language = DEFAULT_LANGUAGE.to_string();
        }
        if !is_language_tag(&self.language) {
            return Err(FieldError::new("language", "is not a valid language tag"));
        }

        let url = self.url.trim_end_matches('/');
        if url.is_empty() {
            return Err(FieldError::empty("url"));
        }
        if !is_url(url) {
            return Err(FieldError::new("url", "is not a valid URL"));
        }
        self.url = url.to_string();

        if self.page_size == 0 {
            return Err(FieldError::new("pageSize", "must be greater than zero"));
        }
        if self.long_date_format.is_empty() {
            return Err(FieldError::empty("longDateFormat"));
        }
        if self.short_date_format.is_empty() {
            return Err(FieldError::empty("shortDateFormat"));
        }
        if !is_date_format(&self.long_date_format) {
            return Err(FieldError::new("longDateFormat", "is not a valid date format"));
        }
        if !is_date_format(&self.short_date_format) {
            return Err(FieldError::new("shortDateFormat", "is not a valid date format"));
        }
        if self.mime.is_empty() {
            self.mime = MIME_HTML.to_string();
        }

        if let Some(icon) = &self.icon {
            icon.sanitize().map_err(|e| e.prefixed("icon"))?;
        }

        self.author.sanitize().map_err(|e| e.prefixed("author"))?;

        if self.theme.is_empty() {
            return Err(FieldError::empty("theme"));
        }

        if self.archive.format.is_empty() {
            return Err(FieldError::empty("archive.format"));
        }
        if !is_date_format(&self.archive.format) {
            return Err(FieldError::new("archive.format", "is not a valid date format"));
        }

        self.license.sanitize().map_err(|e| e.prefixed("license"))?;

        if let Some(rss) = &mut self.rss {
            rss.sanitize(&self.title, MIME_RSS).map_err(|e| e.prefixed("rss"))?;
        }
        if let Some(atom) = &mut self.atom {
            atom.sanitize(&self.title, MIME_ATOM).map_err(|e| e.prefixed("atom"))?;
        }
        if let Some(sitemap) = &mut self.sitemap {
            sitemap.sanitize().map_err(|e| e.prefixed("sitemap"))?;
        }
        if let Some(opensearch) = &mut self.opensearch {
            opensearch
                .sanitize(self.icon.as_ref())
                .map_err(|e| e.prefixed("opensearch"))?;
        }
        if let Some(manifest) = &mut self.manifest {
            manifest
                .sanitize(feeds::ManifestDefaults {
                    language: &self.language,
                    title: &self.title,
                    subtitle: &self.subtitle,
                    url: &self.url,
                    icon: self.icon.as_ref(),
                })
                .map_err(|e| e.prefixed("manifest"))?;
        }
        if let Some(service_worker) = &mut self.service_worker {
            service_worker
                .sanitize()
                .map_err(|e| e.prefixed("serviceWorker"))?;
        }

        for (index, link) in self.menus.iter().enumerate() {
            link.sanitize()
                .map_err(|e| e.prefixed(&format!("menus[{}]", index)))?;
        }

        self.init_pages();

        Ok(())
    }

    /// 补全各页面的标题，index 与 posts 共用一份配置
    fn init_pages(&mut self) {
        let names = [
            PAGE_POSTS,
            PAGE_POST,
            PAGE_TAG,
            PAGE_TAGS,
            PAGE_ARCHIVES,
            PAGE_SEARCH,
            PAGE_LINKS,
        ];
        for name in names {
            let page = self.pages.entry(name.to_string()).or_default();
            if page.title.is_empty() {
                page.title = pages::default_title(name).to_string();
            }
        }

        let suffix = format!("{}{}", self.title_separator, self.title);
        for page in self.pages.values_mut() {
            page.title = page.title.replace(TITLE_PLACEHOLDER, &self.title);
            if page.title.is_empty() {
                page.title = self.title.clone();
            } else {
                page.title.push_str(&suffix);
            }
        }

        if let Some(posts) = self.pages.get(PAGE_POSTS).cloned() {
            self.pages.insert(PAGE_INDEX.to_string(), posts);
        }
    }

    /// 获取页面配置，未知页面返回以网站标题为标题的默认值
    pub fn page(&self, name: &str) -> PageMeta {
        self.pages.get(name).cloned().unwrap_or_else(|| PageMeta {
            title: self.title.clone(),
            ..Default::default()
        })
    }

    /// 生成完整地址
    pub fn full_url(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }
}

/// 检测 strftime 格式字符串是否合法
pub fn is_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// 按 strftime 格式输出时间，格式非法时返回空字符串而不是 panic
pub fn format_date<Tz>(date: &DateTime<Tz>, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut out = String::new();
    if write!(out, "{}", date.format(format)).is_err() {
        out.clear();
    }
    out
}

/// 简单校验 BCP 47 语言标签的格式：以 `-` 分隔的 1 到 8 位字母数字
fn is_language_tag(tag: &str) -> bool {
    let mut parts = tag.split('-');
    let primary_ok = parts
        .next()
        .map(|p| (1..=8).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphabetic()))
        .unwrap_or(false);
    primary_ok
        && parts.all(|p| (1..=8).contains(&p.len()) && p.chars().all(|c| c.is_ascii_alphanumeric()))
}

#[cfg(test)]
mod tests;
