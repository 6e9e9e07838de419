//! 注册到模板中的过滤器和函数
//!
//! 时间在模板上下文中以 RFC 3339 字符串的形式存在，各个时间过滤器都从该格式解析。

use chrono::DateTime;
use gitype_domain::site::format_date;
use gitype_domain::urls;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::OnceLock;
use tera::{Filter, Tera};

/// 匹配 `</?tag/?>` 形式的标签，并非完整的 HTML 解析，嵌套或残缺的标签可能无法正确去除
fn strip_regex() -> Option<&'static Regex> {
    static STRIP: OnceLock<Option<Regex>> = OnceLock::new();
    STRIP.get_or_init(|| Regex::new(r"</?[^</>]+/?>").ok()).as_ref()
}

/// 去掉所有的 HTML 标签
pub fn strip_tags(html: &str) -> String {
    match strip_regex() {
        Some(re) => re.replace_all(html, "").into_owned(),
        None => html.to_string(),
    }
}

/// 模板函数需要用到的配置
#[derive(Debug, Clone)]
pub struct TemplateFunctions {
    pub long_date_format: String,
    pub short_date_format: String,
}

impl TemplateFunctions {
    /// 将所有过滤器和函数注册到 tera
    pub fn register(&self, tera: &mut Tera) {
        tera.register_filter("strip", strip_filter);
        tera.register_filter("html", HtmlFilter);
        tera.register_filter("unix", unix_filter);
        tera.register_filter("rfc3339", rfc3339_filter);
        tera.register_filter("ldate", DateFilter::new(&self.long_date_format));
        tera.register_filter("sdate", DateFilter::new(&self.short_date_format));
        tera.register_function("themeURL", theme_url);
    }
}

fn as_str<'a>(value: &'a Value, filter: &str) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("Filter `{}` expects a string value", filter)))
}

fn parse_time(value: &Value, filter: &str) -> tera::Result<DateTime<chrono::FixedOffset>> {
    let s = as_str(value, filter)?;
    DateTime::parse_from_rfc3339(s)
        .map_err(|e| tera::Error::msg(format!("Filter `{}`: invalid time `{}`: {}", filter, s, e)))
}

fn strip_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(strip_tags(as_str(value, "strip")?)))
}

fn unix_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::from(parse_time(value, "unix")?.timestamp()))
}

fn rfc3339_filter(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    Ok(Value::String(parse_time(value, "rfc3339")?.to_rfc3339()))
}

/// 将内容原样输出，不做转义
struct HtmlFilter;

impl Filter for HtmlFilter {
    fn filter(&self, value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
        Ok(value.clone())
    }

    fn is_safe(&self) -> bool {
        true
    }
}

/// 按指定格式输出时间
struct DateFilter {
    format: String,
}

impl DateFilter {
    fn new(format: &str) -> Self {
        Self { format: format.to_string() }
    }
}

impl Filter for DateFilter {
    fn filter(&self, value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
        let time = parse_time(value, "date")?;
        Ok(Value::String(format_date(&time, &self.format)))
    }
}

fn theme_url(args: &HashMap<String, Value>) -> tera::Result<Value> {
    let path = args
        .get("path")
        .and_then(Value::as_str)
        .ok_or_else(|| tera::Error::msg("Function `themeURL` requires a string argument `path`"))?;
    Ok(Value::String(urls::theme(path)))
}
