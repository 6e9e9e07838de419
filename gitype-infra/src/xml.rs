use std::borrow::Cow;
use thiserror::Error;

/// XML 声明
const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n";

const INDENT: &str = "    ";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum XmlError {
    #[error("Unexpected end element </{found}>, expected </{expected}>")]
    Mismatched { expected: String, found: String },

    #[error("Unexpected end element </{0}> without start element")]
    Unopened(String),

    #[error("Unclosed elements: {0}")]
    Unclosed(String),
}

/// 带缩进的简单 XML 写入器
///
/// 所有文本和属性值都会被转义。属性按传入的顺序输出。
/// 元素嵌套不正确时，错误在 [`XmlWriter::into_bytes`] 时返回。
#[derive(Debug)]
pub struct XmlWriter {
    buf: String,
    stack: Vec<String>,
    error: Option<XmlError>,
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            buf: String::from(XML_HEADER),
            stack: Vec::new(),
            error: None,
        }
    }

    fn indent(&mut self) {
        for _ in 0..self.stack.len() {
            self.buf.push_str(INDENT);
        }
    }

    fn write_attrs(&mut self, attrs: &[(&str, &str)]) {
        for (name, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(name);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape(value));
            self.buf.push('"');
        }
    }

    /// 写入处理指令，例如 `<?xml-stylesheet type="text/xsl" href="..."?>`
    pub fn write_pi(&mut self, target: &str, attrs: &[(&str, &str)]) {
        self.indent();
        self.buf.push_str("<?");
        self.buf.push_str(target);
        self.write_attrs(attrs);
        self.buf.push_str("?>\n");
    }

    pub fn start_element(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(name);
        self.write_attrs(attrs);
        self.buf.push_str(">\n");
        self.stack.push(name.to_string());
    }

    pub fn end_element(&mut self, name: &str) {
        match self.stack.pop() {
            Some(open) if open == name => {}
            Some(open) => {
                self.error.get_or_insert(XmlError::Mismatched {
                    expected: open,
                    found: name.to_string(),
                });
            }
            None => {
                self.error.get_or_insert(XmlError::Unopened(name.to_string()));
            }
        }

        self.indent();
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push_str(">\n");
    }

    /// 写入一个包含文本的完整元素
    pub fn element(&mut self, name: &str, text: &str, attrs: &[(&str, &str)]) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(name);
        self.write_attrs(attrs);
        self.buf.push('>');
        self.buf.push_str(&escape(text));
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push_str(">\n");
    }

    /// 写入自闭合元素，例如 `<link href="..." />`
    pub fn empty_element(&mut self, name: &str, attrs: &[(&str, &str)]) {
        self.indent();
        self.buf.push('<');
        self.buf.push_str(name);
        self.write_attrs(attrs);
        self.buf.push_str(" />\n");
    }

    pub fn into_bytes(self) -> Result<Vec<u8>, XmlError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if !self.stack.is_empty() {
            return Err(XmlError::Unclosed(self.stack.join(",")));
        }
        Ok(self.buf.into_bytes())
    }
}

/// 转义 XML 中的特殊字符
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_output() {
        let mut w = XmlWriter::new();
        w.write_pi("xml-stylesheet", &[("type", "text/xsl"), ("href", "/sitemap.xsl")]);
        w.start_element("urlset", &[("xmlns", "http://www.sitemaps.org/schemas/sitemap/0.9")]);
        w.element("loc", "https://example.com/?a=1&b=2", &[]);
        w.empty_element("link", &[("href", "/x")]);
        w.end_element("urlset");

        let xml = String::from_utf8(w.into_bytes().unwrap()).unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <?xml-stylesheet type=\"text/xsl\" href=\"/sitemap.xsl\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
             \x20   <loc>https://example.com/?a=1&amp;b=2</loc>\n\
             \x20   <link href=\"/x\" />\n\
             </urlset>\n"
        );
    }

    #[test]
    fn test_escape() {
        assert!(matches!(escape("plain text"), Cow::Borrowed(_)));
        assert_eq!(escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &apos;Jerry&apos;&lt;/a&gt;");
    }

    #[test]
    fn test_attribute_escape() {
        let mut w = XmlWriter::new();
        w.empty_element("link", &[("title", "a \"quoted\" <title>")]);
        let xml = String::from_utf8(w.into_bytes().unwrap()).unwrap();
        assert!(xml.contains(r#"title="a &quot;quoted&quot; &lt;title&gt;""#));
    }

    #[test]
    fn test_unbalanced_elements() {
        let mut w = XmlWriter::new();
        w.start_element("rss", &[]);
        assert_eq!(w.into_bytes().unwrap_err(), XmlError::Unclosed("rss".to_string()));

        let mut w = XmlWriter::new();
        w.start_element("rss", &[]);
        w.end_element("channel");
        assert!(matches!(w.into_bytes(), Err(XmlError::Mismatched { .. })));

        let mut w = XmlWriter::new();
        w.end_element("rss");
        assert_eq!(w.into_bytes().unwrap_err(), XmlError::Unopened("rss".to_string()));
    }
}
