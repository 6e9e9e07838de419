use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    response::Response,
    routing::MethodFilter,
    Router,
};
use gitype_infra::{DataPaths, TemplateContext, TemplateError, TemplateRenderer};
use gitype_service::{ReloadError, SnapshotStore, SourceUpdater, Webhook};
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::{create_router, webhook_router, AppState};

const CONFIG: &str = r#"
title: test
titleSeparator: " | "
url: https://example.com
uptime: 2016-01-01T00:00:00+08:00
pageSize: 2
longDateFormat: "%Y-%m-%d %H:%M"
shortDateFormat: "%m-%d"
theme: t
author:
  name: author
license:
  url: https://example.com/license
  text: license
rss:
  url: /rss.xml
  size: 10
"#;

const TAGS: &str = "
- slug: a
  title: TagA
  content: tag a
- slug: b
  title: TagB
  content: tag b
";

const TEMPLATES: [(&str, &str); 8] = [
    ("posts", "posts:{% for p in posts %}{{ p.slug }};{% endfor %}"),
    ("post", "post:{{ post.slug }}:{{ title }}"),
    (
        "tag",
        "tag:{{ tag.slug }}:{% for p in posts %}{{ p.slug }};{% endfor %}\
         {% if prev_page %}|prev{% endif %}{% if next_page %}|next={{ next_page.url | safe }}{% endif %}",
    ),
    ("tags", "tags:{% for t in site.tags %}{{ t.slug }}={{ t.post_size }};{% endfor %}"),
    ("links", "links"),
    ("archives", "archives:{{ archives | length }}"),
    ("search", "search:{{ q }}:{% for p in posts %}{{ p.slug }};{% endfor %}"),
    ("404", "<h1>not found</h1>"),
];

struct Site {
    dir: TempDir,
}

impl Site {
    /// 三篇文章，标签分别为 a、a,b、b
    fn new() -> Self {
        let site = Self { dir: TempDir::new().unwrap() };
        let paths = site.paths();
        site.write(&paths.config_file(), CONFIG);
        site.write(&paths.tags_file(), TAGS);
        site.write(&paths.links_file(), "- url: https://example.org\n  text: example\n");
        site.write(&paths.theme_meta("t"), "name: test\n");
        site.write(&paths.theme_dir("t").join("style.css"), "body{}");
        for (name, content) in TEMPLATES {
            site.write(&paths.theme_dir("t").join(format!("{}.html", name)), content);
        }

        site.post("p1", "2017-01-01T00:00:00+08:00", "a");
        site.post("p2", "2017-02-01T00:00:00+08:00", "a,b");
        site.post("p3", "2017-03-01T00:00:00+08:00", "b");
        site
    }

    fn paths(&self) -> DataPaths {
        DataPaths::new(self.dir.path())
    }

    fn write(&self, path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn post(&self, slug: &str, created: &str, tags: &str) {
        let paths = self.paths();
        self.write(
            &paths.post_meta(slug),
            &format!("title: title-{}\ncreated: {}\ntags: \"{}\"\n", slug, created, tags),
        );
        self.write(&paths.post_content(slug), &format!("<p>content of {}</p>", slug));
    }

    fn store(&self) -> Arc<SnapshotStore> {
        Arc::new(SnapshotStore::open(self.paths()).unwrap())
    }

    fn router(&self) -> Router {
        create_router(AppState::new(self.store()))
    }
}

async fn get(app: &Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

async fn body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn get_body(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = get(app, uri).await;
    let status = response.status();
    (status, body(response).await)
}

#[tokio::test]
async fn test_posts_pagination() {
    let site = Site::new();
    let app = site.router();

    let response = get(&app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/html;charset=utf-8"
    );
    assert_eq!(body(response).await, "posts:p3;p2;");

    assert_eq!(get_body(&app, "/index.html?page=2").await, (StatusCode::OK, "posts:p1;".to_string()));
    assert_eq!(get(&app, "/index.html?page=3").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/?page=0").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/?page=x").await.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tag_pagination() {
    let site = Site::new();
    let app = site.router();

    assert_eq!(
        get_body(&app, "/tags/a.html").await,
        (StatusCode::OK, "tag:a:p2;p1;".to_string())
    );
    assert_eq!(
        get_body(&app, "/tags/b.html").await,
        (StatusCode::OK, "tag:b:p3;p2;".to_string())
    );

    // pageSize 为 1 时才会有第二页
    let mut config = CONFIG.replace("pageSize: 2", "pageSize: 1");
    config.push('\n');
    site.write(&site.paths().config_file(), &config);
    let app = site.router();
    assert_eq!(
        get_body(&app, "/tags/a.html").await,
        (StatusCode::OK, "tag:a:p2;|next=/tags/a.html?page=2".to_string())
    );
    assert_eq!(
        get_body(&app, "/tags/a.html?page=2").await,
        (StatusCode::OK, "tag:a:p1;|prev".to_string())
    );
    assert_eq!(get(&app, "/tags/a.html?page=3").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_tag_scenario_three_posts() {
    let site = Site::new();
    site.post("p4", "2017-04-01T00:00:00+08:00", "a");
    let app = site.router();

    // 标签 a 下有 p4、p2、p1 三篇文章，每页两篇
    assert_eq!(
        get_body(&app, "/tags/a.html").await,
        (StatusCode::OK, "tag:a:p4;p2;|next=/tags/a.html?page=2".to_string())
    );
    assert_eq!(
        get_body(&app, "/tags/a.html?page=2").await,
        (StatusCode::OK, "tag:a:p1;|prev".to_string())
    );
}

#[tokio::test]
async fn test_tags_and_archives() {
    let site = Site::new();
    let app = site.router();

    assert_eq!(get_body(&app, "/tags.html").await, (StatusCode::OK, "tags:a=2;b=2;".to_string()));
    assert_eq!(get_body(&app, "/archives.html").await, (StatusCode::OK, "archives:1".to_string()));
    assert_eq!(get_body(&app, "/links.html").await, (StatusCode::OK, "links".to_string()));
}

#[tokio::test]
async fn test_post() {
    let site = Site::new();
    let app = site.router();

    assert_eq!(
        get_body(&app, "/posts/p2.html").await,
        (StatusCode::OK, "post:p2:title-p2 | test".to_string())
    );
}

#[tokio::test]
async fn test_post_assets_and_fallthrough() {
    let site = Site::new();
    let paths = site.paths();
    site.write(&paths.posts_dir().join("p1/image.png"), "png");
    site.write(&paths.raws_dir().join("posts/missing.html"), "raw page");
    let app = site.router();

    let response = get(&app, "/posts/p1/image.png").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(body(response).await, "png");

    // 不存在的文章交由 raws 目录处理
    assert_eq!(
        get_body(&app, "/posts/missing.html").await,
        (StatusCode::OK, "raw page".to_string())
    );

    // 元数据不允许直接访问，使用主题的 404 页面
    assert_eq!(
        get_body(&app, "/posts/p1/meta.yaml").await,
        (StatusCode::NOT_FOUND, "<h1>not found</h1>".to_string())
    );
}

#[tokio::test]
async fn test_tag_fallthrough_to_raw() {
    let site = Site::new();
    site.write(&site.paths().raws_dir().join("tags/none.html"), "raw tag");
    let app = site.router();

    assert_eq!(get_body(&app, "/tags/none.html").await, (StatusCode::OK, "raw tag".to_string()));
    assert_eq!(get(&app, "/tags/other.html").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_themes() {
    let site = Site::new();
    let app = site.router();

    let response = get(&app, "/themes/t/style.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), "text/css");

    assert_eq!(get(&app, "/themes/t/theme.yaml").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/themes/t/post.html").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/themes/t/none.css").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_raws_and_feeds() {
    let site = Site::new();
    site.write(&site.paths().raws_dir().join("robots.txt"), "User-agent:*");
    let app = site.router();

    assert_eq!(get_body(&app, "/robots.txt").await, (StatusCode::OK, "User-agent:*".to_string()));

    let response = get(&app, "/rss.xml").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/rss+xml;charset=utf-8"
    );
    let rss = body(response).await;
    assert!(rss.starts_with("<?xml"));
    assert!(rss.contains("https://example.com/posts/p3.html"));

    assert_eq!(get(&app, "/atom.xml").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/../meta/config.yaml").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_raws_with_encoded_names() {
    let site = Site::new();
    let raws = site.paths().raws_dir();
    site.write(&raws.join("a b.txt"), "space");
    site.write(&raws.join("中文.txt"), "cjk");
    site.write(&raws.join("tags/标签.html"), "raw cjk tag");
    let app = site.router();

    assert_eq!(get_body(&app, "/a%20b.txt").await, (StatusCode::OK, "space".to_string()));
    assert_eq!(
        get_body(&app, "/%E4%B8%AD%E6%96%87.txt").await,
        (StatusCode::OK, "cjk".to_string())
    );
    assert_eq!(
        get_body(&app, "/tags/%E6%A0%87%E7%AD%BE.html").await,
        (StatusCode::OK, "raw cjk tag".to_string())
    );

    // 解码后的上级目录同样被忽略
    assert_eq!(get(&app, "/%2e%2e/meta/config.yaml").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/%FF.txt").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_service_worker() {
    let site = Site::new();
    let paths = site.paths();
    assert_eq!(get(&site.router(), "/sw.js").await.status(), StatusCode::NOT_FOUND);

    site.write(&paths.config_file(), &format!("{}serviceWorker:\n  url: /sw.js\n", CONFIG));
    site.write(&paths.theme_meta("t"), "name: test\nversion: \"2\"\nassets:\n  - style.css\n");
    let app = site.router();

    let response = get(&app, "/sw.js").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/javascript;charset=utf-8"
    );
    let script = body(response).await;
    assert!(script.contains("versions.set(\"theme-t-2\", [\"/themes/t/style.css\"]);"));
    assert!(script.contains("\"/posts/p2.html\""));
    assert!(script.contains("\"/tags/a.html\""));
}

#[tokio::test]
async fn test_search() {
    let site = Site::new();
    let app = site.router();

    let response = get(&app, "/search.html").await;
    assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

    assert_eq!(get(&app, "/search.html?q=%20").await.status(), StatusCode::PERMANENT_REDIRECT);

    assert_eq!(
        get_body(&app, "/search.html?q=title-p1").await,
        (StatusCode::OK, "search:title-p1:p1;".to_string())
    );
    assert_eq!(
        get_body(&app, "/search.html?q=tag%3Atagb").await,
        (StatusCode::OK, "search:tag:tagb:p3;p2;".to_string())
    );
    assert_eq!(get(&app, "/search.html?q=none&page=2").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_page_meta() {
    let site = Site::new();
    let paths = site.paths();
    site.write(
        &paths.theme_dir("t").join("search.html"),
        "{{ title }}|{{ keywords }}|{{ description }}",
    );
    let app = site.router();

    // 未配置时使用与关键字相关的默认值
    assert_eq!(
        get_body(&app, "/search.html?q=abc").await,
        (StatusCode::OK, "搜索：abc | test|abc,搜索,search|搜索关键字abc的结果".to_string())
    );

    let config = format!(
        "{}pages:\n  search:\n    title: \"s-%content%\"\n    keywords: \"kw-%content%\"\n    description: \"desc-%content%\"\n",
        CONFIG
    );
    site.write(&paths.config_file(), &config);
    let app = site.router();
    assert_eq!(
        get_body(&app, "/search.html?q=abc").await,
        (StatusCode::OK, "s-abc | test|kw-abc|desc-abc".to_string())
    );
}

#[tokio::test]
async fn test_headers() {
    let site = Site::new();
    let store = site.store();
    let etag = store.current().etag.clone();

    let mut headers = HeaderMap::new();
    headers.insert("x-powered-by", HeaderValue::from_static("gitype"));
    let app = create_router(AppState::new(store).with_headers(headers));

    let response = get(&app, "/").await;
    let headers = response.headers();
    assert_eq!(headers.get(header::ETAG).unwrap(), etag.as_str());
    assert_eq!(headers.get(header::CONTENT_LANGUAGE).unwrap(), "zh-cmn-Hans");
    assert_eq!(headers.get("x-powered-by").unwrap(), "gitype");

    // 404 同样带有这些报头
    let response = get(&app, "/none").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.headers().get(header::ETAG).unwrap(), etag.as_str());
}

/// 记录渲染次数
struct CountingRenderer {
    inner: Arc<dyn TemplateRenderer>,
    count: Arc<AtomicUsize>,
}

impl TemplateRenderer for CountingRenderer {
    fn render(&self, name: &str, context: &TemplateContext) -> Result<String, TemplateError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.inner.render(name, context)
    }

    fn has_template(&self, name: &str) -> bool {
        self.inner.has_template(name)
    }
}

#[tokio::test]
async fn test_not_modified() {
    let site = Site::new();
    let mut snapshot = gitype_service::load(&site.paths()).unwrap();
    let count = Arc::new(AtomicUsize::new(0));
    snapshot.renderer = Arc::new(CountingRenderer {
        inner: snapshot.renderer.clone(),
        count: count.clone(),
    });
    let etag = snapshot.etag.clone();
    let app = create_router(AppState::new(Arc::new(SnapshotStore::new(site.paths(), snapshot))));

    assert_eq!(get(&app, "/").await.status(), StatusCode::OK);
    assert_eq!(count.load(Ordering::SeqCst), 1);

    let request = Request::builder()
        .uri("/")
        .header(header::IF_NONE_MATCH, etag.as_str())
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(response.headers().get(header::ETAG).unwrap(), etag.as_str());
    assert!(body(response).await.is_empty());
    assert_eq!(count.load(Ordering::SeqCst), 1);

    let request = Request::builder()
        .uri("/")
        .header(header::IF_NONE_MATCH, "0")
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.clone().oneshot(request).await.unwrap().status(), StatusCode::OK);
    assert_eq!(count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_reload_serves_new_snapshot() {
    let site = Site::new();
    let store = site.store();
    let app = create_router(AppState::new(store.clone()));
    assert_eq!(get_body(&app, "/").await.1, "posts:p3;p2;");

    site.post("p4", "2017-04-01T00:00:00+08:00", "b");
    store.reload().await.unwrap();
    assert_eq!(get_body(&app, "/").await.1, "posts:p4;p3;");
}

struct NoopUpdater;

#[async_trait]
impl SourceUpdater for NoopUpdater {
    async fn update(&self, _: &Path) -> Result<(), ReloadError> {
        Ok(())
    }
}

#[tokio::test]
async fn test_webhook() {
    let site = Site::new();
    let store = site.store();

    let webhook = Arc::new(Webhook::new(store.clone(), Arc::new(NoopUpdater), Duration::from_secs(3600)));
    let app = webhook_router("/webhooks", MethodFilter::POST, webhook);
    let request = Request::builder()
        .method("POST")
        .uri("/webhooks")
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.clone().oneshot(request).await.unwrap().status(), StatusCode::TOO_MANY_REQUESTS);

    let request = Request::builder().uri("/webhooks").body(Body::empty()).unwrap();
    assert_eq!(
        app.clone().oneshot(request).await.unwrap().status(),
        StatusCode::METHOD_NOT_ALLOWED
    );

    let webhook = Arc::new(Webhook::new(store, Arc::new(NoopUpdater), Duration::ZERO));
    let app = webhook_router("/webhooks", MethodFilter::POST, webhook);
    let request = Request::builder()
        .method("POST")
        .uri("/webhooks")
        .body(Body::empty())
        .unwrap();
    assert_eq!(app.oneshot(request).await.unwrap().status(), StatusCode::ACCEPTED);
}
