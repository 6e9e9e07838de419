//! 从数据目录加载完整的网站快照

pub mod archive;
pub mod search;

pub use archive::build_archives;
pub use search::search;

use chrono::Utc;
use gitype_domain::site::REQUIRED_TEMPLATES;
use gitype_domain::{FieldError, Link, LoadError, Post, SiteConfig, Tag};
use gitype_infra::loader::{self, RawPost};
use gitype_infra::theme::TemplateFunctions;
use gitype_infra::{DataPaths, TeraTemplateEngine};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

use crate::feed;
use crate::snapshot::{Feeds, Snapshot};

/// 加载数据目录，任何一步出错都会返回错误而不会生成快照
pub fn load(paths: &DataPaths) -> Result<Snapshot, LoadError> {
    let config = load_config(paths)?;
    let mut tags = load_tags(paths, &config)?;
    let links = load_links(paths)?;

    let mut theme = loader::read_theme(paths, &config.theme)?;
    theme
        .sanitize()
        .map_err(|e| e.with_file(paths.theme_meta(&theme.id).display().to_string()))?;

    let mut posts = load_posts(paths, &config)?;
    check_duplicate_posts(&posts)?;
    sort_posts(&mut posts);
    resolve_tags(paths, &mut posts, &mut tags)?;

    let (plain_tags, series): (Vec<usize>, Vec<usize>) =
        (0..tags.len()).partition(|&i| !tags[i].series);

    let archives = build_archives(
        &posts,
        config.archive.archive_type,
        config.archive.order,
        &config.archive.format,
    );

    let functions = TemplateFunctions {
        long_date_format: config.long_date_format.clone(),
        short_date_format: config.short_date_format.clone(),
    };
    let engine = TeraTemplateEngine::compile(&theme.id, &theme.path, &functions)
        .map_err(|e| LoadError::Template(e.to_string()))?;
    let mut templates: BTreeSet<&str> = posts.iter().map(|p| p.template.as_str()).collect();
    templates.extend(REQUIRED_TEMPLATES);
    engine
        .verify(templates)
        .map_err(|e| LoadError::Template(e.to_string()))?;

    let created = Utc::now();
    let mut snapshot = Snapshot {
        created,
        etag: created.timestamp().to_string(),
        config,
        theme,
        tags,
        plain_tags,
        series,
        posts,
        links,
        archives,
        feeds: Feeds::default(),
        renderer: Arc::new(engine),
    };
    snapshot.feeds = feed::build_feeds(&snapshot)?;

    debug!(
        "Loaded {} posts, {} tags, {} archives from {}",
        snapshot.posts.len(),
        snapshot.tags.len(),
        snapshot.archives.len(),
        paths.root().display()
    );
    Ok(snapshot)
}

fn load_config(paths: &DataPaths) -> Result<SiteConfig, LoadError> {
    let mut config = loader::read_config(paths)?;
    config
        .sanitize()
        .map_err(|e| e.with_file(paths.config_file().display().to_string()))?;
    Ok(config)
}

fn load_tags(paths: &DataPaths, config: &SiteConfig) -> Result<Vec<Tag>, LoadError> {
    let file = paths.tags_file().display().to_string();
    let mut tags = loader::read_tags(paths)?;

    for (index, tag) in tags.iter_mut().enumerate() {
        tag.sanitize(config.uptime)
            .map_err(|e| e.prefixed(&format!("[{}]", index)).with_file(file.clone()))?;
    }

    for (i, tag) in tags.iter().enumerate() {
        if tags[..i].iter().any(|t| t.slug == tag.slug) {
            return Err(LoadError::Duplicate {
                kind: "tag",
                slug: tag.slug.clone(),
            });
        }
    }

    Ok(tags)
}

fn load_links(paths: &DataPaths) -> Result<Vec<Link>, LoadError> {
    let file = paths.links_file().display().to_string();
    let links = loader::read_links(paths)?;
    for (index, link) in links.iter().enumerate() {
        link.sanitize()
            .map_err(|e| e.prefixed(&format!("[{}]", index)).with_file(file.clone()))?;
    }
    Ok(links)
}

/// 读取所有非草稿的文章
fn load_posts(paths: &DataPaths, config: &SiteConfig) -> Result<Vec<Post>, LoadError> {
    let mut posts = Vec::new();

    for slug in loader::discover_posts(paths)? {
        let RawPost { slug, meta, content } = loader::read_post(paths, &slug)?;
        if meta.is_draft() {
            debug!("Skip draft post {}", slug);
            continue;
        }

        let post = meta
            .into_post(&slug, content, &config.author, &config.license)
            .map_err(|e| e.with_file(paths.post_meta(&slug).display().to_string()))?;
        posts.push(post);
    }

    Ok(posts)
}

fn check_duplicate_posts(posts: &[Post]) -> Result<(), LoadError> {
    for (i, post) in posts.iter().enumerate() {
        if posts[..i].iter().any(|p| p.slug == post.slug) {
            return Err(LoadError::Duplicate {
                kind: "post",
                slug: post.slug.clone(),
            });
        }
    }
    Ok(())
}

/// 置顶的在前，置尾的在后，其它按创建时间倒序，相同时保持原有顺序
pub(crate) fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        a.state
            .rank()
            .cmp(&b.state.rank())
            .then_with(|| b.created.cmp(&a.created))
    });
}

/// 关联文章与标签，每篇文章引用的标签都必须存在
fn resolve_tags(paths: &DataPaths, posts: &mut [Post], tags: &mut [Tag]) -> Result<(), LoadError> {
    for (post_index, post) in posts.iter_mut().enumerate() {
        for slug in &post.tag_slugs {
            let tag_index = tags.iter().position(|t| &t.slug == slug).ok_or_else(|| {
                FieldError::new("tags", format!("tag `{}` does not exist", slug))
                    .with_file(paths.post_meta(&post.slug).display().to_string())
            })?;

            if !post.tags.contains(&tag_index) {
                post.tags.push(tag_index);
                tags[tag_index].attach(post_index, post.modified);
            }
        }

        if post.tags.is_empty() {
            return Err(FieldError::empty("tags")
                .with_file(paths.post_meta(&post.slug).display().to_string())
                .into());
        }
    }
    Ok(())
}
