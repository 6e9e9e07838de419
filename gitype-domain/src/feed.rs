use serde::Serialize;

/// 已生成的订阅内容，RSS、Atom、Sitemap、Opensearch、Manifest 和 service worker 共用
#[derive(Debug, Clone, Default, Serialize)]
pub struct Feed {
    pub title: String,
    pub url: String,
    #[serde(rename = "type")]
    pub mime: String,
    #[serde(skip)]
    pub content: Vec<u8>,
}
