//! 订阅内容的生成
//!
//! 每种订阅都是从快照到字节内容的纯函数，在快照发布之前生成。

pub mod atom;
pub mod manifest;
pub mod opensearch;
pub mod rss;
pub mod service_worker;
pub mod sitemap;

use gitype_domain::{Feed, LoadError, Post, PostState};

use crate::snapshot::{Feeds, Snapshot};

/// 生成配置中启用的所有订阅
pub fn build_feeds(snapshot: &Snapshot) -> Result<Feeds, LoadError> {
    let config = &snapshot.config;
    let mut feeds = Feeds::default();

    if let Some(rss_config) = &config.rss {
        feeds.rss = Some(Feed {
            title: rss_config.title.clone(),
            url: rss_config.url.clone(),
            mime: rss_config.mime.clone(),
            content: rss::build(snapshot, rss_config).map_err(feed_error("rss"))?,
        });
    }

    if let Some(atom_config) = &config.atom {
        feeds.atom = Some(Feed {
            title: atom_config.title.clone(),
            url: atom_config.url.clone(),
            mime: atom_config.mime.clone(),
            content: atom::build(snapshot, atom_config).map_err(feed_error("atom"))?,
        });
    }

    if let Some(sitemap_config) = &config.sitemap {
        feeds.sitemap = Some(Feed {
            title: config.title.clone(),
            url: sitemap_config.url.clone(),
            mime: sitemap_config.mime.clone(),
            content: sitemap::build(snapshot, sitemap_config).map_err(feed_error("sitemap"))?,
        });
    }

    if let Some(opensearch_config) = &config.opensearch {
        feeds.opensearch = Some(Feed {
            title: opensearch_config.title.clone(),
            url: opensearch_config.url.clone(),
            mime: opensearch_config.mime.clone(),
            content: opensearch::build(snapshot, opensearch_config)
                .map_err(feed_error("opensearch"))?,
        });
    }

    if let Some(manifest_config) = &config.manifest {
        feeds.manifest = Some(Feed {
            title: manifest_config.name.clone(),
            url: manifest_config.url.clone(),
            mime: manifest_config.mime.clone(),
            content: manifest::build(manifest_config).map_err(feed_error("manifest"))?,
        });
    }

    if let Some(sw_config) = &config.service_worker {
        feeds.service_worker = Some(Feed {
            title: config.title.clone(),
            url: sw_config.url.clone(),
            mime: sw_config.mime.clone(),
            content: service_worker::build(snapshot).map_err(feed_error("service worker"))?,
        });
    }

    Ok(feeds)
}

fn feed_error<E: std::fmt::Display>(kind: &'static str) -> impl Fn(E) -> LoadError {
    move |err| LoadError::Feed(format!("{}: {}", kind, err))
}

/// RSS 和 Atom 输出的文章：置顶和置尾的文章不参与，最多 size 篇
pub(crate) fn recent_posts(posts: &[Post], size: usize) -> impl Iterator<Item = &Post> {
    posts
        .iter()
        .filter(|post| post.state == PostState::Default)
        .take(size)
}
