//! 测试用的数据目录

use chrono::DateTime;
use gitype_domain::site::REQUIRED_TEMPLATES;
use gitype_domain::{Author, Link, LoadError, Post, PostState};
use gitype_infra::DataPaths;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::snapshot::Snapshot;

pub const CONFIG: &str = r#"
title: test
subtitle: sub
url: https://example.com/
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
atom:
  url: /atom.xml
  size: 10
sitemap:
  url: /sitemap.xml
  xslURL: /sitemap.xsl
  enableTag: true
  priority: 0.5
  postPriority: 0.9
  postChangefreq: weekly
opensearch:
  url: /opensearch.xml
  shortName: test
  description: search test
manifest:
  url: /manifest.json
serviceWorker:
  url: /sw.js
"#;

pub struct DataFixture {
    pub dir: TempDir,
}

impl DataFixture {
    /// 包含配置、一个默认标签和最小主题的数据目录，没有文章
    pub fn new() -> Self {
        let fixture = Self { dir: TempDir::new().unwrap() };
        let paths = fixture.paths();
        fixture.write(&paths.config_file(), CONFIG);
        fixture.tags("- slug: default\n  title: Default\n  content: default tag\n");
        fixture.write(&paths.links_file(), "- url: https://example.org\n  text: example\n");
        fixture.write(&paths.theme_meta("t"), "name: test theme\n");
        for name in REQUIRED_TEMPLATES {
            fixture.template(name, &format!("{}:{{{{ title }}}}", name));
        }
        fixture
    }

    pub fn paths(&self) -> DataPaths {
        DataPaths::new(self.dir.path())
    }

    pub fn write(&self, path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    pub fn config(&self, yaml: &str) {
        self.write(&self.paths().config_file(), yaml);
    }

    pub fn tags(&self, yaml: &str) {
        self.write(&self.paths().tags_file(), yaml);
    }

    pub fn template(&self, name: &str, content: &str) {
        self.write(&self.paths().theme_dir("t").join(format!("{}.html", name)), content);
    }

    pub fn post(&self, slug: &str, created: &str, tags: &str, title: &str, content: &str) {
        self.post_meta(
            slug,
            &format!("title: {}\ncreated: {}\ntags: \"{}\"\n", title, created, tags),
            content,
        );
    }

    pub fn post_meta(&self, slug: &str, meta: &str, content: &str) {
        let paths = self.paths();
        self.write(&paths.post_meta(slug), meta);
        self.write(&paths.post_content(slug), content);
    }

    pub fn load(&self) -> Result<Snapshot, LoadError> {
        crate::content::load(&self.paths())
    }
}

/// 只包含排序和分组需要字段的文章
pub fn post(slug: &str, created: &str) -> Post {
    let created = DateTime::parse_from_rfc3339(created).unwrap();
    Post {
        slug: slug.to_string(),
        title: slug.to_string(),
        created,
        modified: created,
        summary: String::new(),
        content: String::new(),
        permalink: gitype_domain::urls::post(slug),
        keywords: String::new(),
        state: PostState::Default,
        outdated: None,
        author: Author::default(),
        license: Link::default(),
        template: "post".to_string(),
        tag_slugs: Vec::new(),
        tags: Vec::new(),
        search_title: slug.to_string(),
        search_content: String::new(),
        search_summary: String::new(),
    }
}
