//! 数据目录中各类文件的读取
//!
//! 这里只负责读取和反序列化，字段的校验和数据之间的关联由内容加载服务完成。

use gitype_domain::{Link, LoadError, PostMeta, SiteConfig, Tag, Theme};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

use crate::paths::DataPaths;

/// 从文件中读取的一篇文章
#[derive(Debug, Clone)]
pub struct RawPost {
    pub slug: String,
    pub meta: PostMeta,
    /// 草稿不会读取内容
    pub content: String,
}

/// 读取 YAML 文件并反序列化
pub fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let bytes = fs::read(path).map_err(|e| LoadError::io(path, e))?;
    serde_yaml::from_slice(&bytes).map_err(|e| LoadError::yaml(path, e))
}

pub fn read_config(paths: &DataPaths) -> Result<SiteConfig, LoadError> {
    load_yaml(&paths.config_file())
}

pub fn read_tags(paths: &DataPaths) -> Result<Vec<Tag>, LoadError> {
    load_optional_list(&paths.tags_file())
}

pub fn read_links(paths: &DataPaths) -> Result<Vec<Link>, LoadError> {
    load_optional_list(&paths.links_file())
}

/// 空文件反序列化为空列表
fn load_optional_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, LoadError> {
    let bytes = fs::read(path).map_err(|e| LoadError::io(path, e))?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    serde_yaml::from_slice(&bytes).map_err(|e| LoadError::yaml(path, e))
}

/// 读取主题目录下的 theme.yaml，主题目录不存在时返回错误
pub fn read_theme(paths: &DataPaths, id: &str) -> Result<Theme, LoadError> {
    let dir = paths.theme_dir(id);
    if !dir.is_dir() {
        return Err(LoadError::Field(
            gitype_domain::FieldError::new("theme", format!("theme `{}` does not exist", id))
                .with_file(paths.config_file().display().to_string()),
        ));
    }

    let meta = paths.theme_meta(id);
    let mut theme: Theme = load_yaml(&meta)?;
    theme.id = id.to_string();
    theme.path = dir;
    Ok(theme)
}

/// 遍历 posts 目录，同时包含 meta.yaml 和 content.html 的目录即为一篇文章
///
/// 返回的 slug 为相对 posts 目录的路径，使用 `/` 分隔，按路径排序。
pub fn discover_posts(paths: &DataPaths) -> Result<Vec<String>, LoadError> {
    let posts_dir = paths.posts_dir();
    let mut slugs = Vec::new();

    for entry in WalkDir::new(&posts_dir).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| posts_dir.clone());
            LoadError::io(path, e.into())
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let relative = match entry.path().strip_prefix(&posts_dir) {
            Ok(p) => p,
            Err(_) => continue,
        };
        let slug = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if slug.is_empty() {
            continue;
        }

        if paths.post_meta(&slug).is_file() && paths.post_content(&slug).is_file() {
            slugs.push(slug);
        }
    }

    debug!("Discovered {} post directories", slugs.len());
    Ok(slugs)
}

/// 读取一篇文章的元数据和内容
pub fn read_post(paths: &DataPaths, slug: &str) -> Result<RawPost, LoadError> {
    let meta: PostMeta = load_yaml(&paths.post_meta(slug))?;

    let content = if meta.is_draft() {
        String::new()
    } else {
        let path = paths.post_content(slug);
        fs::read_to_string(&path).map_err(|e| LoadError::io(path, e))?
    };

    Ok(RawPost {
        slug: slug.to_string(),
        meta,
        content,
    })
}
