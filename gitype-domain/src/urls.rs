//! 站内各类页面的地址生成
//!
//! 所有函数返回以 `/` 开头的站内路径，需要完整地址时拼接 `SiteConfig::url`。

use url::form_urlencoded;

/// 页面的统一后缀
pub const SUFFIX: &str = ".html";

/// 分页的查询参数名称
pub const QUERY_PAGE: &str = "page";

/// 搜索关键字的查询参数名称
pub const QUERY_SEARCH: &str = "q";

/// 文章详情页及文章附属资源的前缀
pub const POSTS_PREFIX: &str = "/posts";

/// 标签详情页的前缀
pub const TAGS_PREFIX: &str = "/tags";

/// 主题资源的前缀
pub const THEMES_PREFIX: &str = "/themes";

/// 首页，第一页直接指向根路径
pub fn posts(page: usize) -> String {
    if page <= 1 {
        "/".to_string()
    } else {
        index(page)
    }
}

/// `/index.html`，页码大于 1 时带上 page 参数
pub fn index(page: usize) -> String {
    if page <= 1 {
        format!("/index{}", SUFFIX)
    } else {
        format!("/index{}?{}={}", SUFFIX, QUERY_PAGE, page)
    }
}

pub fn post(slug: &str) -> String {
    format!("{}/{}{}", POSTS_PREFIX, slug, SUFFIX)
}

pub fn tags() -> String {
    format!("{}{}", TAGS_PREFIX, SUFFIX)
}

pub fn tag(slug: &str, page: usize) -> String {
    if page <= 1 {
        format!("{}/{}{}", TAGS_PREFIX, slug, SUFFIX)
    } else {
        format!("{}/{}{}?{}={}", TAGS_PREFIX, slug, SUFFIX, QUERY_PAGE, page)
    }
}

pub fn links() -> String {
    format!("/links{}", SUFFIX)
}

pub fn archives() -> String {
    format!("/archives{}", SUFFIX)
}

/// 搜索页地址，q 会被编码
pub fn search(q: &str, page: usize) -> String {
    let mut url = format!("/search{}", SUFFIX);
    let mut params = form_urlencoded::Serializer::new(String::new());
    if !q.is_empty() {
        params.append_pair(QUERY_SEARCH, q);
    }
    if page > 1 {
        params.append_pair(QUERY_PAGE, &page.to_string());
    }
    let query = params.finish();
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }
    url
}

/// opensearch 使用的搜索模板，`{searchTerms}` 不能被编码
pub fn search_template() -> String {
    format!("/search{}?{}={{searchTerms}}", SUFFIX, QUERY_SEARCH)
}

pub fn theme(path: &str) -> String {
    format!("{}/{}", THEMES_PREFIX, path.trim_start_matches('/'))
}
