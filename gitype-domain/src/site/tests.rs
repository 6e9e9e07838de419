use super::*;

const CONFIG: &str = r#"
title: 示例网站
titleSeparator: " | "
subtitle: 副标题
url: https://example.com/
uptime: 2016-01-01T00:00:00+08:00
pageSize: 10
longDateFormat: "%Y-%m-%d %H:%M:%S"
shortDateFormat: "%Y-%m-%d"
theme: default
icon:
  url: /icon.png
  type: image/png
  sizes: 256x256
author:
  name: caixw
  url: https://example.com
license:
  text: CC BY 4.0
  url: https://creativecommons.org/licenses/by/4.0/
archive:
  type: month
  order: asc
  format: "%Y-%m"
rss:
  size: 20
  url: /rss.xml
atom:
  size: 20
  url: /atom.xml
  title: Atom
sitemap:
  url: /sitemap.xml
  priority: 0.5
  postPriority: 0.9
  changefreq: weekly
  enableTag: true
opensearch:
  url: /opensearch.xml
  shortName: 搜索
  description: 搜索示例网站
manifest:
  url: /manifest.json
  display: minimal-ui
serviceWorker:
  url: /sw.js
pages:
  tags:
    title: 所有标签
    keywords: tags
"#;

fn load(yaml: &str) -> SiteConfig {
    serde_yaml::from_str(yaml).unwrap()
}

#[test]
fn test_sanitize_defaults() {
    let mut conf = load(CONFIG);
    conf.sanitize().unwrap();

    // 测试 URL 末尾的 / 被去掉
    assert_eq!(conf.url, "https://example.com");
    assert_eq!(conf.language, DEFAULT_LANGUAGE);
    assert_eq!(conf.mime, MIME_HTML);
    assert_eq!(conf.archive.archive_type, ArchiveType::Month);
    assert_eq!(conf.archive.order, ArchiveOrder::Asc);

    let rss = conf.rss.as_ref().unwrap();
    assert_eq!(rss.title, "示例网站");
    assert_eq!(rss.mime, MIME_RSS);
    assert_eq!(conf.atom.as_ref().unwrap().title, "Atom");
    assert_eq!(conf.atom.as_ref().unwrap().mime, MIME_ATOM);

    let sitemap = conf.sitemap.as_ref().unwrap();
    assert_eq!(sitemap.mime, MIME_SITEMAP);
    assert_eq!(sitemap.changefreq, Changefreq::Weekly);
    assert_eq!(sitemap.post_changefreq, Changefreq::Daily);

    let opensearch = conf.opensearch.as_ref().unwrap();
    assert_eq!(opensearch.mime, MIME_OPENSEARCH);
    assert_eq!(opensearch.image.as_ref().unwrap().url, "/icon.png");

    let manifest = conf.manifest.as_ref().unwrap();
    assert_eq!(manifest.display, ManifestDisplay::MinimalUi);
    assert_eq!(manifest.dir, ManifestDir::Auto);
    assert_eq!(manifest.name, "示例网站");
    assert_eq!(manifest.short_name, "副标题");
    assert_eq!(manifest.start_url, "https://example.com");
    assert_eq!(manifest.icons.len(), 1);

    let service_worker = conf.service_worker.as_ref().unwrap();
    assert_eq!(service_worker.url, "/sw.js");
    assert_eq!(service_worker.mime, MIME_SERVICE_WORKER);
}

#[test]
fn test_sanitize_pages() {
    let mut conf = load(CONFIG);
    conf.sanitize().unwrap();

    assert_eq!(conf.page(PAGE_TAGS).title, "所有标签 | 示例网站");
    assert_eq!(conf.page(PAGE_TAGS).keywords, "tags");
    assert_eq!(conf.page(PAGE_TAG).title, "标签：%content% | 示例网站");
    assert_eq!(conf.page(PAGE_TAG).with_content("rust").title, "标签：rust | 示例网站");
    assert_eq!(conf.page(PAGE_POST).with_content("文章").title, "文章 | 示例网站");
    // 测试空标题的页面直接使用网站标题
    assert_eq!(conf.page(PAGE_POSTS).title, "示例网站");
    assert_eq!(conf.page(PAGE_INDEX), conf.page(PAGE_POSTS));
    assert_eq!(conf.page("unknown").title, "示例网站");
}

#[test]
fn test_sanitize_errors() {
    let cases = [
        ("pageSize: 10", "pageSize: 0", "pageSize"),
        ("url: https://example.com/", "url: not a url", "url"),
        ("theme: default", "theme: ''", "theme"),
        ("  name: caixw", "  name: ''", "author.name"),
        ("  text: CC BY 4.0", "  text: ''", "license.text"),
        ("  size: 20\n  url: /rss.xml", "  size: 0\n  url: /rss.xml", "rss.size"),
        ("  priority: 0.5", "  priority: 1.5", "sitemap.priority"),
        ("  shortName: 搜索", "  shortName: ''", "opensearch.shortName"),
        ("  url: /sw.js", "  url: sw.js", "serviceWorker.url"),
        ("  url: /sw.js", "  url: /", "serviceWorker.url"),
        ("shortDateFormat: \"%Y-%m-%d\"", "shortDateFormat: ''", "shortDateFormat"),
    ];

    for (from, to, field) in cases {
        let yaml = CONFIG.replacen(from, to, 1);
        let mut conf = load(&yaml);
        let err = conf.sanitize().unwrap_err();
        assert_eq!(err.field, field, "replacing `{}`", from);
    }
}

#[test]
fn test_invalid_enum_value_is_rejected() {
    let yaml = CONFIG.replacen("changefreq: weekly", "changefreq: sometimes", 1);
    assert!(serde_yaml::from_str::<SiteConfig>(&yaml).is_err());
}

#[test]
fn test_language_tag() {
    assert!(is_language_tag("zh-cmn-Hans"));
    assert!(is_language_tag("en"));
    assert!(!is_language_tag(""));
    assert!(!is_language_tag("en_US"));
    assert!(!is_language_tag("-en"));
}

#[test]
fn test_date_format() {
    let date = chrono::DateTime::parse_from_rfc3339("2016-01-02T15:04:05+08:00").unwrap();
    assert!(is_date_format("%Y-%m-%d"));
    assert!(!is_date_format("%Y-%Q"));
    assert_eq!(format_date(&date, "%Y-%m-%d %H:%M"), "2016-01-02 15:04");
    assert_eq!(format_date(&date, "%Y-%Q"), "");

    let yaml = CONFIG.replacen("format: \"%Y-%m\"", "format: \"%Q\"", 1);
    let mut conf = load(&yaml);
    assert_eq!(conf.sanitize().unwrap_err().field, "archive.format");
}
