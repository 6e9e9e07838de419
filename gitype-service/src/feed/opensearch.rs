use gitype_domain::{urls, OpensearchConfig, APP_NAME};
use gitype_infra::{XmlError, XmlWriter};

use crate::snapshot::Snapshot;

const OPENSEARCH_NS: &str = "http://a9.com/-/spec/opensearch/1.1/";

/// 生成 OpenSearch 描述文件
pub fn build(snapshot: &Snapshot, opensearch: &OpensearchConfig) -> Result<Vec<u8>, XmlError> {
    let config = &snapshot.config;
    let mut w = XmlWriter::new();

    w.start_element("OpenSearchDescription", &[("xmlns", OPENSEARCH_NS)]);
    w.element("InputEncoding", "UTF-8", &[]);
    w.element("OutputEncoding", "UTF-8", &[]);
    w.element("ShortName", &opensearch.short_name, &[]);
    w.element("Description", &opensearch.description, &[]);

    if !opensearch.long_name.is_empty() {
        w.element("LongName", &opensearch.long_name, &[]);
    }

    if let Some(image) = &opensearch.image {
        w.element("Image", &image.url, &[("type", &image.mime)]);
    }

    let template = config.full_url(&urls::search_template());
    w.empty_element(
        "Url",
        &[("type", &config.mime), ("method", "GET"), ("template", &template)],
    );
    w.element("Developer", APP_NAME, &[]);
    w.element("Language", &config.language, &[]);

    w.end_element("OpenSearchDescription");
    w.into_bytes()
}
