use gitype_domain::RssConfig;
use gitype_infra::{XmlError, XmlWriter};

use super::recent_posts;
use crate::snapshot::Snapshot;

/// 生成 Atom 1.0 内容
pub fn build(snapshot: &Snapshot, atom: &RssConfig) -> Result<Vec<u8>, XmlError> {
    let config = &snapshot.config;
    let mut w = XmlWriter::new();

    w.start_element(
        "feed",
        &[
            ("xmlns", "http://www.w3.org/2005/Atom"),
            ("xmlns:opensearch", "http://a9.com/-/spec/opensearch/1.1/"),
        ],
    );
    w.element("id", &config.url, &[]);
    w.empty_element("link", &[("href", &config.url)]);

    if let Some(opensearch) = &config.opensearch {
        let href = config.full_url(&opensearch.url);
        w.empty_element(
            "link",
            &[
                ("rel", "search"),
                ("type", &opensearch.mime),
                ("title", &opensearch.title),
                ("href", &href),
            ],
        );
    }

    w.element("title", &atom.title, &[]);
    w.element("subtitle", &config.subtitle, &[]);
    w.element("updated", &snapshot.created.to_rfc3339(), &[]);

    for post in recent_posts(&snapshot.posts, atom.size) {
        let url = config.full_url(&post.permalink);
        w.start_element("entry", &[]);
        w.element("id", &url, &[]);
        w.empty_element("link", &[("href", &url)]);
        w.element("title", &post.title, &[]);
        w.element("updated", &post.modified.to_rfc3339(), &[]);
        w.element("summary", &post.summary, &[("type", "html")]);
        w.end_element("entry");
    }

    w.end_element("feed");
    w.into_bytes()
}
