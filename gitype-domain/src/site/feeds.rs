use serde::{Deserialize, Serialize};

use crate::content::Icon;
use crate::error::FieldError;

pub const MIME_RSS: &str = "application/rss+xml";
pub const MIME_ATOM: &str = "application/atom+xml";
pub const MIME_SITEMAP: &str = "application/xml";
pub const MIME_OPENSEARCH: &str = "application/opensearchdescription+xml";
pub const MIME_MANIFEST: &str = "application/manifest+json";
pub const MIME_SERVICE_WORKER: &str = "application/javascript";

/// RSS 和 Atom 共用的配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RssConfig {
    #[serde(default)]
    pub title: String,

    /// 最多输出的文章数量
    #[serde(default)]
    pub size: usize,

    #[serde(default)]
    pub url: String,

    #[serde(rename = "type", default)]
    pub mime: String,
}

impl RssConfig {
    pub(crate) fn sanitize(&mut self, site_title: &str, default_mime: &str) -> Result<(), FieldError> {
        if self.size == 0 {
            return Err(FieldError::new("size", "must be greater than zero"));
        }
        if self.url.is_empty() {
            return Err(FieldError::empty("url"));
        }
        if self.title.is_empty() {
            self.title = site_title.to_string();
        }
        if self.mime.is_empty() {
            self.mime = default_mime.to_string();
        }
        Ok(())
    }
}

/// sitemap 中的 changefreq 取值
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Changefreq {
    Never,
    Yearly,
    Monthly,
    Weekly,
    #[default]
    Daily,
    Hourly,
    Always,
}

impl Changefreq {
    pub fn as_str(self) -> &'static str {
        match self {
            Changefreq::Never => "never",
            Changefreq::Yearly => "yearly",
            Changefreq::Monthly => "monthly",
            Changefreq::Weekly => "weekly",
            Changefreq::Daily => "daily",
            Changefreq::Hourly => "hourly",
            Changefreq::Always => "always",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapConfig {
    #[serde(default)]
    pub url: String,

    /// 为空表示不输出 xml-stylesheet 指令
    #[serde(rename = "xslURL", default)]
    pub xsl_url: String,

    #[serde(rename = "type", default)]
    pub mime: String,

    #[serde(default)]
    pub enable_tag: bool,

    #[serde(default)]
    pub priority: f64,

    #[serde(default)]
    pub changefreq: Changefreq,

    #[serde(default)]
    pub post_priority: f64,

    #[serde(default)]
    pub post_changefreq: Changefreq,
}

impl SitemapConfig {
    pub(crate) fn sanitize(&mut self) -> Result<(), FieldError> {
        if self.url.is_empty() {
            return Err(FieldError::empty("url"));
        }
        if !(0.0..=1.0).contains(&self.priority) {
            return Err(FieldError::new("priority", "must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.post_priority) {
            return Err(FieldError::new("postPriority", "must be within [0, 1]"));
        }
        if self.mime.is_empty() {
            self.mime = MIME_SITEMAP.to_string();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpensearchConfig {
    #[serde(default)]
    pub url: String,

    #[serde(rename = "type", default)]
    pub mime: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub short_name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub long_name: String,

    #[serde(default)]
    pub image: Option<Icon>,
}

impl OpensearchConfig {
    pub(crate) fn sanitize(&mut self, icon: Option<&Icon>) -> Result<(), FieldError> {
        if self.url.is_empty() {
            return Err(FieldError::empty("url"));
        }
        if self.short_name.is_empty() {
            return Err(FieldError::empty("shortName"));
        }
        if self.description.is_empty() {
            return Err(FieldError::empty("description"));
        }
        if self.mime.is_empty() {
            self.mime = MIME_OPENSEARCH.to_string();
        }
        if self.title.is_empty() {
            self.title = self.short_name.clone();
        }
        if self.image.is_none() {
            self.image = icon.cloned();
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManifestDisplay {
    Fullscreen,
    Standalone,
    MinimalUi,
    #[default]
    Browser,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManifestDir {
    Rtl,
    Ltr,
    #[default]
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ManifestOrientation {
    Any,
    Natural,
    Landscape,
    LandscapePrimary,
    LandscapeSecondary,
    Portrait,
    PortraitPrimary,
    PortraitSecondary,
}

/// PWA 的 manifest 配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestConfig {
    #[serde(default)]
    pub url: String,

    #[serde(rename = "type", default)]
    pub mime: String,

    #[serde(default)]
    pub lang: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub short_name: String,

    #[serde(rename = "startURL", default)]
    pub start_url: String,

    #[serde(default)]
    pub display: ManifestDisplay,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub dir: ManifestDir,

    #[serde(default)]
    pub orientation: Option<ManifestOrientation>,

    #[serde(default)]
    pub scope: String,

    #[serde(default)]
    pub theme_color: String,

    #[serde(default)]
    pub background_color: String,

    #[serde(default)]
    pub icons: Vec<Icon>,
}

pub(crate) struct ManifestDefaults<'a> {
    pub language: &'a str,
    pub title: &'a str,
    pub subtitle: &'a str,
    pub url: &'a str,
    pub icon: Option<&'a Icon>,
}

impl ManifestConfig {
    pub(crate) fn sanitize(&mut self, defaults: ManifestDefaults<'_>) -> Result<(), FieldError> {
        if self.url.is_empty() {
            return Err(FieldError::empty("url"));
        }
        if self.mime.is_empty() {
            self.mime = MIME_MANIFEST.to_string();
        }
        if self.lang.is_empty() {
            self.lang = defaults.language.to_string();
        }
        if self.name.is_empty() {
            self.name = defaults.title.to_string();
        }
        if self.short_name.is_empty() {
            self.short_name = defaults.subtitle.to_string();
        }
        if self.start_url.is_empty() {
            self.start_url = defaults.url.to_string();
        }
        if self.icons.is_empty() {
            if let Some(icon) = defaults.icon {
                self.icons.push(icon.clone());
            }
        }
        for (index, icon) in self.icons.iter().enumerate() {
            icon.sanitize().map_err(|e| e.prefixed(&format!("icons[{}]", index)))?;
        }
        Ok(())
    }
}

/// PWA 的 service worker 脚本
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceWorkerConfig {
    /// 脚本的地址，决定了 service worker 的作用范围，一般为 `/sw.js`
    #[serde(default)]
    pub url: String,

    #[serde(rename = "type", default)]
    pub mime: String,
}

impl ServiceWorkerConfig {
    pub(crate) fn sanitize(&mut self) -> Result<(), FieldError> {
        if !self.url.starts_with('/') || self.url.len() == 1 {
            return Err(FieldError::new("url", "must start with / and name a file"));
        }
        if self.mime.is_empty() {
            self.mime = MIME_SERVICE_WORKER.to_string();
        }
        Ok(())
    }
}
