use gitype_domain::{urls, Changefreq, SitemapConfig};
use gitype_infra::{XmlError, XmlWriter};

use crate::snapshot::Snapshot;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// 生成 sitemap 内容，包含所有文章、存档页、友情链接页，以及可选的标签页
pub fn build(snapshot: &Snapshot, sitemap: &SitemapConfig) -> Result<Vec<u8>, XmlError> {
    let config = &snapshot.config;
    let mut w = XmlWriter::new();

    if !sitemap.xsl_url.is_empty() {
        w.write_pi("xml-stylesheet", &[("type", "text/xsl"), ("href", &sitemap.xsl_url)]);
    }
    w.start_element("urlset", &[("xmlns", SITEMAP_NS)]);

    for post in &snapshot.posts {
        write_url(
            &mut w,
            &config.full_url(&post.permalink),
            &post.modified.to_rfc3339(),
            sitemap.post_changefreq,
            sitemap.post_priority,
        );
    }

    let created = snapshot.created.to_rfc3339();
    for path in [urls::archives(), urls::links()] {
        write_url(
            &mut w,
            &config.full_url(&path),
            &created,
            sitemap.changefreq,
            sitemap.priority,
        );
    }

    if sitemap.enable_tag {
        write_url(
            &mut w,
            &config.full_url(&urls::tags()),
            &created,
            sitemap.changefreq,
            sitemap.priority,
        );
        for tag in &snapshot.tags {
            write_url(
                &mut w,
                &config.full_url(&tag.permalink),
                &tag.modified.to_rfc3339(),
                sitemap.changefreq,
                sitemap.priority,
            );
        }
    }

    w.end_element("urlset");
    w.into_bytes()
}

fn write_url(w: &mut XmlWriter, loc: &str, lastmod: &str, changefreq: Changefreq, priority: f64) {
    w.start_element("url", &[]);
    w.element("loc", loc, &[]);
    w.element("lastmod", lastmod, &[]);
    w.element("changefreq", changefreq.as_str(), &[]);
    w.element("priority", &format!("{:.1}", priority), &[]);
    w.end_element("url");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::DataFixture;

    #[test]
    fn test_build_sitemap() {
        let fixture = DataFixture::new();
        fixture.post("a", "2017-01-02T15:04:05+08:00", "default", "A", "c");
        let snapshot = fixture.load().unwrap();
        let mut sitemap = snapshot.config.sitemap.clone().unwrap();

        let xml = String::from_utf8(build(&snapshot, &sitemap).unwrap()).unwrap();
        assert!(xml.contains("<?xml-stylesheet type=\"text/xsl\" href=\"/sitemap.xsl\"?>"));
        assert!(xml.contains(
            "<loc>https://example.com/posts/a.html</loc>\n        \
             <lastmod>2017-01-02T15:04:05+08:00</lastmod>\n        \
             <changefreq>weekly</changefreq>\n        \
             <priority>0.9</priority>"
        ));
        assert!(xml.contains("<loc>https://example.com/archives.html</loc>"));
        assert!(xml.contains("<loc>https://example.com/links.html</loc>"));
        assert!(xml.contains("<loc>https://example.com/tags/default.html</loc>"));
        assert!(xml.contains("<changefreq>daily</changefreq>"));
        assert!(xml.contains("<priority>0.5</priority>"));

        sitemap.enable_tag = false;
        sitemap.xsl_url.clear();
        let xml = String::from_utf8(build(&snapshot, &sitemap).unwrap()).unwrap();
        assert!(!xml.contains("xml-stylesheet"));
        assert!(!xml.contains("/tags/default.html"));
        assert!(!xml.contains("/tags.html"));
    }
}
