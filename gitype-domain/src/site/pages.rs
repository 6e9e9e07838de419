use serde::{Deserialize, Serialize};

pub const PAGE_INDEX: &str = "index";
pub const PAGE_POSTS: &str = "posts";
pub const PAGE_POST: &str = "post";
pub const PAGE_TAG: &str = "tag";
pub const PAGE_TAGS: &str = "tags";
pub const PAGE_ARCHIVES: &str = "archives";
pub const PAGE_SEARCH: &str = "search";
pub const PAGE_LINKS: &str = "links";

/// 页面标题等配置中表示当前内容的占位符
pub const CONTENT_PLACEHOLDER: &str = "%content%";

/// 配置中表示网站标题的占位符
pub const TITLE_PLACEHOLDER: &str = "%title%";

/// 主题必须提供的模板
pub const REQUIRED_TEMPLATES: [&str; 7] = [
    PAGE_POST,
    PAGE_POSTS,
    PAGE_TAGS,
    PAGE_TAG,
    PAGE_LINKS,
    PAGE_ARCHIVES,
    PAGE_SEARCH,
];

/// 各类页面可自定义的 head 内容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub keywords: String,

    #[serde(default)]
    pub description: String,
}

impl PageMeta {
    /// 将各字段中的 `%content%` 替换为页面的具体内容，例如文章标题或搜索关键字
    pub fn with_content(&self, content: &str) -> PageMeta {
        PageMeta {
            title: self.title.replace(CONTENT_PLACEHOLDER, content),
            keywords: self.keywords.replace(CONTENT_PLACEHOLDER, content),
            description: self.description.replace(CONTENT_PLACEHOLDER, content),
        }
    }
}

/// 各页面未配置时的默认标题
pub(crate) fn default_title(page: &str) -> &'static str {
    match page {
        PAGE_TAG => "标签：%content%",
        PAGE_TAGS => "标签",
        PAGE_ARCHIVES => "归档",
        PAGE_SEARCH => "搜索：%content%",
        PAGE_LINKS => "友情链接",
        PAGE_POST => CONTENT_PLACEHOLDER,
        _ => "",
    }
}
