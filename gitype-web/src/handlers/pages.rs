//! 各类 HTML 页面

use axum::{
    extract::{Path, Query, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
    Extension,
};
use chrono::{DateTime, FixedOffset, Utc};
use gitype_domain::{
    site::{
        PAGE_ARCHIVES, PAGE_LINKS, PAGE_POST, PAGE_POSTS, PAGE_SEARCH,
        PAGE_TAG, PAGE_TAGS,
    },
    urls::{self, QUERY_SEARCH, SUFFIX},
    Link,
};
use gitype_service::{search, Snapshot};
use std::collections::HashMap;
use std::sync::Arc;

use super::{files, get_posts_range, parse_page, render, render_error};
use crate::view::{ArchiveView, Page, PostView, TagView};
use crate::AppState;

type QueryMap = Query<HashMap<String, String>>;

fn now() -> DateTime<FixedOffset> {
    Utc::now().fixed_offset()
}

/// 当前页码及其在列表中的范围
struct Pagination {
    page: usize,
    start: usize,
    end: usize,
    total: usize,
}

impl Pagination {
    async fn new(snapshot: &Snapshot, query: &HashMap<String, String>, total: usize) -> Result<Self, Response> {
        let page = match parse_page(query) {
            Ok(page) => page,
            Err(status) => return Err(render_error(snapshot, status).await),
        };
        let Some((start, end)) = get_posts_range(total, page, snapshot.config.page_size) else {
            return Err(render_error(snapshot, StatusCode::NOT_FOUND).await);
        };

        Ok(Self {
            // get_posts_range 已经保证 page >= 1
            page: page as usize,
            start,
            end,
            total,
        })
    }

    /// 设置页面的上一页和下一页
    fn apply(&self, page: &mut Page<'_>, url: impl Fn(usize) -> String) {
        if self.start > 0 {
            page.prev_page = Some(Link::new(url(self.page - 1), "上一页").with_rel("prev"));
        }
        if self.end < self.total {
            page.next_page = Some(Link::new(url(self.page + 1), "下一页").with_rel("next"));
        }
    }
}

/// 首页以及 `/index.html`
pub async fn get_posts(Extension(snapshot): Extension<Arc<Snapshot>>, Query(query): QueryMap) -> Response {
    let snapshot = snapshot.as_ref();
    let config = &snapshot.config;

    let pagination = match Pagination::new(snapshot, &query, snapshot.posts.len()).await {
        Ok(p) => p,
        Err(response) => return response,
    };

    let mut page = Page::new(snapshot, PAGE_POSTS);
    if pagination.page > 1 {
        page.title = format!("第 {} 页{}{}", pagination.page, config.title_separator, config.title);
    }
    page.canonical = config.full_url(&urls::posts(pagination.page));
    pagination.apply(&mut page, urls::posts);

    let indexes: Vec<usize> = (pagination.start..pagination.end).collect();
    page.posts = PostView::list(snapshot, &indexes, now());

    render(snapshot, PAGE_POSTS, &page).await
}

/// `/posts/*path`
///
/// 以 `.html` 结尾且能找到对应文章时输出文章，否则当作文章目录下的资源文件。
pub async fn get_post(
    State(state): State<AppState>,
    Extension(snapshot): Extension<Arc<Snapshot>>,
    Path(path): Path<String>,
    uri: Uri,
) -> Response {
    let found = path
        .strip_suffix(SUFFIX)
        .and_then(|slug| snapshot.find_post(slug));

    match found {
        Some(index) => post_page(&snapshot, index).await,
        None => {
            let posts = state.store.paths().posts_dir();
            files::asset(&state, &snapshot, &posts, &path, uri.path()).await
        }
    }
}

async fn post_page(snapshot: &Snapshot, index: usize) -> Response {
    let config = &snapshot.config;
    let post = &snapshot.posts[index];

    let meta = config.page(PAGE_POST).with_content(&post.title);
    let mut page = Page::with_meta(snapshot, PAGE_POST, meta);
    page.canonical = config.full_url(&post.permalink);
    if !post.keywords.is_empty() {
        page.keywords = post.keywords.clone();
    }
    if !post.summary.is_empty() {
        page.description = post.summary.clone();
    }
    page.author = &post.author;
    page.license = &post.license;

    if let Some(prev) = index.checked_sub(1).and_then(|i| snapshot.posts.get(i)) {
        page.prev_page = Some(Link::new(prev.permalink.clone(), prev.title.clone()).with_rel("prev"));
    }
    if let Some(next) = snapshot.posts.get(index + 1) {
        page.next_page = Some(Link::new(next.permalink.clone(), next.title.clone()).with_rel("next"));
    }

    page.post = Some(PostView::new(snapshot, post, now()));
    render(snapshot, &post.template, &page).await
}

/// `/tags.html`
pub async fn get_tags(Extension(snapshot): Extension<Arc<Snapshot>>) -> Response {
    let snapshot = snapshot.as_ref();
    let mut page = Page::new(snapshot, PAGE_TAGS);
    page.canonical = snapshot.config.full_url(&urls::tags());
    render(snapshot, PAGE_TAGS, &page).await
}

/// `/tags/*path`，找不到标签时当作普通文件处理
pub async fn get_tag(
    State(state): State<AppState>,
    Extension(snapshot): Extension<Arc<Snapshot>>,
    Path(path): Path<String>,
    Query(query): QueryMap,
    uri: Uri,
) -> Response {
    let found = path
        .strip_suffix(SUFFIX)
        .and_then(|slug| snapshot.find_tag(slug));
    let Some(index) = found else {
        return files::raw(&state, &snapshot, uri.path()).await;
    };

    let snapshot = snapshot.as_ref();
    let tag = &snapshot.tags[index];
    let pagination = match Pagination::new(snapshot, &query, tag.posts.len()).await {
        Ok(p) => p,
        Err(response) => return response,
    };

    let meta = snapshot.config.page(PAGE_TAG).with_content(&tag.title);
    let mut page = Page::with_meta(snapshot, PAGE_TAG, meta);
    page.keywords = tag.keywords.clone();
    page.canonical = snapshot.config.full_url(&urls::tag(&tag.slug, pagination.page));
    pagination.apply(&mut page, |n| urls::tag(&tag.slug, n));

    page.tag = Some(TagView::new(tag));
    page.posts = PostView::list(snapshot, &tag.posts[pagination.start..pagination.end], now());

    render(snapshot, PAGE_TAG, &page).await
}

/// `/archives.html`
pub async fn get_archives(Extension(snapshot): Extension<Arc<Snapshot>>) -> Response {
    let snapshot = snapshot.as_ref();
    let now = now();

    let mut page = Page::new(snapshot, PAGE_ARCHIVES);
    page.canonical = snapshot.config.full_url(&urls::archives());
    page.archives = snapshot
        .archives
        .iter()
        .map(|archive| ArchiveView {
            archive,
            posts: PostView::list(snapshot, &archive.posts, now),
        })
        .collect();

    render(snapshot, PAGE_ARCHIVES, &page).await
}

/// `/links.html`
pub async fn get_links(Extension(snapshot): Extension<Arc<Snapshot>>) -> Response {
    let snapshot = snapshot.as_ref();
    let mut page = Page::new(snapshot, PAGE_LINKS);
    page.canonical = snapshot.config.full_url(&urls::links());
    render(snapshot, PAGE_LINKS, &page).await
}

/// `/search.html?q=...`，关键字为空时永久跳转到首页
pub async fn get_search(Extension(snapshot): Extension<Arc<Snapshot>>, Query(query): QueryMap) -> Response {
    let q = query.get(QUERY_SEARCH).map(|q| q.trim()).unwrap_or_default();
    if q.is_empty() {
        return Redirect::permanent(&urls::posts(1)).into_response();
    }

    let snapshot = snapshot.as_ref();
    let results = search(q, snapshot);
    let pagination = match Pagination::new(snapshot, &query, results.len()).await {
        Ok(p) => p,
        Err(response) => return response,
    };

    // 未配置 keywords 或 description 时使用与关键字相关的默认值
    let mut meta = snapshot.config.page(PAGE_SEARCH).with_content(q);
    if meta.keywords.is_empty() {
        meta.keywords = format!("{},搜索,search", q);
    }
    if meta.description.is_empty() {
        meta.description = format!("搜索关键字{}的结果", q);
    }

    let mut page = Page::with_meta(snapshot, PAGE_SEARCH, meta);
    page.canonical = snapshot.config.full_url(&urls::search(q, pagination.page));
    page.q = q.to_string();
    pagination.apply(&mut page, |n| urls::search(q, n));
    page.posts = PostView::list(snapshot, &results[pagination.start..pagination.end], now());

    render(snapshot, PAGE_SEARCH, &page).await
}
