use std::path::{Path, PathBuf};

/// 文章的元数据文件名
pub const POST_META_FILENAME: &str = "meta.yaml";

/// 文章的内容文件名
pub const POST_CONTENT_FILENAME: &str = "content.html";

/// 主题的元数据文件名
pub const THEME_META_FILENAME: &str = "theme.yaml";

/// 主题模板文件的扩展名
pub const TEMPLATE_EXTENSION: &str = ".html";

/// 数据目录的布局
///
/// ```text
/// data/
///   meta/config.yaml, tags.yaml, links.yaml
///   posts/<slug>/meta.yaml, content.html
///   themes/<id>/theme.yaml, *.html
///   raws/
/// ```
#[derive(Debug, Clone)]
pub struct DataPaths {
    root: PathBuf,
}

impl DataPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn meta_dir(&self) -> PathBuf {
        self.root.join("meta")
    }

    pub fn config_file(&self) -> PathBuf {
        self.meta_dir().join("config.yaml")
    }

    pub fn tags_file(&self) -> PathBuf {
        self.meta_dir().join("tags.yaml")
    }

    pub fn links_file(&self) -> PathBuf {
        self.meta_dir().join("links.yaml")
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.root.join("posts")
    }

    pub fn post_meta(&self, slug: &str) -> PathBuf {
        self.posts_dir().join(slug).join(POST_META_FILENAME)
    }

    pub fn post_content(&self, slug: &str) -> PathBuf {
        self.posts_dir().join(slug).join(POST_CONTENT_FILENAME)
    }

    pub fn themes_dir(&self) -> PathBuf {
        self.root.join("themes")
    }

    pub fn theme_dir(&self, id: &str) -> PathBuf {
        self.themes_dir().join(id)
    }

    pub fn theme_meta(&self, id: &str) -> PathBuf {
        self.theme_dir(id).join(THEME_META_FILENAME)
    }

    pub fn raws_dir(&self) -> PathBuf {
        self.root.join("raws")
    }
}

/// 将请求路径安全地拼接到 base 之下，过滤掉 `..` 等非普通路径组件
///
/// 结果为空（即指向 base 本身）时返回 None。
pub fn join_safe(base: &Path, request_path: &str) -> Option<PathBuf> {
    let normalized = Path::new(request_path)
        .components()
        .filter(|c| matches!(c, std::path::Component::Normal(_)))
        .collect::<PathBuf>();

    if normalized.as_os_str().is_empty() {
        return None;
    }
    Some(base.join(normalized))
}

/// 主题和文章目录下不允许直接访问的文件类型
pub fn is_ignored_asset(path: &str) -> bool {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    matches!(ext.as_str(), "html" | "yaml" | "yml")
}
