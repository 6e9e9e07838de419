pub mod error;
pub mod site;
pub mod content;
pub mod feed;
pub mod theme;
pub mod urls;

use chrono::{DateTime, FixedOffset};

/// 内容文件中使用的时间类型，保留原始时区
pub type Timestamp = DateTime<FixedOffset>;

/// 程序名称，输出到 opensearch 和页面的 generator 中
pub const APP_NAME: &str = "gitype";

/// 程序的官网
pub const APP_URL: &str = "https://github.com/caixw/gitype";

pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{FieldError, LoadError};

pub use site::{
    SiteConfig, PageMeta, ArchiveConfig, ArchiveType, ArchiveOrder,
    RssConfig, SitemapConfig, Changefreq, OpensearchConfig,
    ManifestConfig, ManifestDisplay, ManifestDir, ManifestOrientation,
    ServiceWorkerConfig,
};

pub use content::{
    Author, Icon, Link,
    Tag, Post, PostMeta, PostState, Outdated,
    Archive,
};

pub use feed::Feed;
pub use theme::Theme;
