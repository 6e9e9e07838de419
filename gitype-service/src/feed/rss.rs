use gitype_domain::RssConfig;
use gitype_infra::{XmlError, XmlWriter};

use super::recent_posts;
use crate::snapshot::Snapshot;

/// 生成 RSS 2.0 内容
pub fn build(snapshot: &Snapshot, rss: &RssConfig) -> Result<Vec<u8>, XmlError> {
    let config = &snapshot.config;
    let mut w = XmlWriter::new();

    w.start_element(
        "rss",
        &[("version", "2.0"), ("xmlns:atom", "http://www.w3.org/2005/Atom")],
    );
    w.start_element("channel", &[]);
    w.element("title", &rss.title, &[]);
    w.element("description", &config.subtitle, &[]);
    w.element("link", &config.url, &[]);

    if let Some(opensearch) = &config.opensearch {
        let href = config.full_url(&opensearch.url);
        w.empty_element(
            "atom:link",
            &[
                ("rel", "search"),
                ("type", &opensearch.mime),
                ("title", &opensearch.title),
                ("href", &href),
            ],
        );
    }

    for post in recent_posts(&snapshot.posts, rss.size) {
        w.start_element("item", &[]);
        w.element("link", &config.full_url(&post.permalink), &[]);
        w.element("title", &post.title, &[]);
        w.element("pubDate", &post.created.to_rfc2822(), &[]);
        w.element("description", &post.summary, &[]);
        w.end_element("item");
    }

    w.end_element("channel");
    w.end_element("rss");
    w.into_bytes()
}
