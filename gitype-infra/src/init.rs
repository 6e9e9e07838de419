//! 生成一个可以直接运行的默认数据目录

use chrono::{Datelike, Local, SecondsFormat};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::paths::{DataPaths, THEME_META_FILENAME};

/// 默认主题的目录名称
pub const DEFAULT_THEME: &str = "default";

/// 默认主题的文件，内容在编译时嵌入
const THEME_FILES: [(&str, &str); 10] = [
    ("layout.html", include_str!("../assets/theme/layout.html")),
    ("posts.html", include_str!("../assets/theme/posts.html")),
    ("post.html", include_str!("../assets/theme/post.html")),
    ("tag.html", include_str!("../assets/theme/tag.html")),
    ("tags.html", include_str!("../assets/theme/tags.html")),
    ("links.html", include_str!("../assets/theme/links.html")),
    ("archives.html", include_str!("../assets/theme/archives.html")),
    ("search.html", include_str!("../assets/theme/search.html")),
    ("404.html", include_str!("../assets/theme/404.html")),
    ("style.css", include_str!("../assets/theme/style.css")),
];

const THEME_META: &str = "name: default\nversion: \"0.1\"\ndescription: 默认主题\nassets:\n  - style.css\n";

const TAGS: &str = "- slug: default\n  title: 默认\n  content: 默认的标签\n";

const LINKS: &str = "\
- url: https://github.com/caixw/gitype
  text: gitype
  title: gitype 的源码
";

const ROBOTS: &str = "User-agent:*\nDisallow:/themes/\n";

const ABOUT_CONTENT: &str = "<section>about\n</section>";

#[derive(Error, Debug)]
pub enum InitError {
    #[error("Directory {0} already exists and is not empty")]
    NotEmpty(PathBuf),

    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 在 root 下生成默认的数据目录，root 已存在且不为空时返回错误
pub fn init_data_dir(root: &Path) -> Result<(), InitError> {
    if root.exists() {
        let mut entries = fs::read_dir(root).map_err(|e| io_error(root, e))?;
        if entries.next().is_some() {
            return Err(InitError::NotEmpty(root.to_path_buf()));
        }
    }

    let paths = DataPaths::new(root);
    let now = Local::now();
    let uptime = now.to_rfc3339_opts(SecondsFormat::Secs, false);

    write(&paths.config_file(), &config_yaml(&uptime))?;
    write(&paths.tags_file(), TAGS)?;
    write(&paths.links_file(), LINKS)?;
    write(&paths.raws_dir().join("robots.txt"), ROBOTS)?;

    let about = format!("{}/about", now.year());
    write(&paths.post_meta(&about), &about_meta(&uptime))?;
    write(&paths.post_content(&about), ABOUT_CONTENT)?;

    let theme_dir = paths.theme_dir(DEFAULT_THEME);
    write(&theme_dir.join(THEME_META_FILENAME), THEME_META)?;
    for (name, content) in THEME_FILES {
        write(&theme_dir.join(name), content)?;
    }

    info!("Initialized data directory at {}", root.display());
    Ok(())
}

fn config_yaml(uptime: &str) -> String {
    format!(
        "\
title: gitype
titleSeparator: \" | \"
subtitle: 基于 git 的博客系统
language: zh-cmn-Hans
url: http://localhost:8080
uptime: {uptime}
pageSize: 20
longDateFormat: \"%Y年%m月%d日 %H:%M:%S\"
shortDateFormat: \"%Y-%m-%d\"
outdated: 180
theme: {theme}
menus:
  - url: /tags.html
    text: 标签
  - url: /archives.html
    text: 归档
  - url: /links.html
    text: 友情链接
author:
  name: gitype
license:
  url: https://creativecommons.org/licenses/by/4.0/
  text: CC BY 4.0
  title: 署名 4.0 国际 (CC BY 4.0)
archive:
  type: year
  order: desc
  format: \"%Y年\"
rss:
  url: /rss.xml
  size: 20
atom:
  url: /atom.xml
  size: 20
sitemap:
  url: /sitemap.xml
  enableTag: true
  priority: 0.9
  changefreq: daily
  postPriority: 0.8
  postChangefreq: weekly
serviceWorker:
  url: /sw.js
",
        uptime = uptime,
        theme = DEFAULT_THEME,
    )
}

fn about_meta(created: &str) -> String {
    format!(
        "title: 关于\ncreated: {created}\nsummary: 关于本站\ntags: default\nstate: last\noutdated: none\n",
        created = created,
    )
}

fn write(path: &Path, content: &str) -> Result<(), InitError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    fs::write(path, content).map_err(|e| io_error(path, e))
}

fn io_error(path: &Path, source: std::io::Error) -> InitError {
    InitError::Io {
        path: path.to_path_buf(),
        source,
    }
}
