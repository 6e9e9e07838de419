//! PWA 的 service worker 脚本
//!
//! 缓存名称中带有内容的版本，内容变化后旧的缓存会在 activate 时被删除。

use gitype_domain::{urls, Theme};

use crate::snapshot::Snapshot;

const SCRIPT: &str = include_str!("sw.js");

/// 脚本中被替换为缓存列表的位置
const VERSIONS_PLACEHOLDER: &str = "/* versions */";

/// 按缓存名称分组的地址，保持添加时的顺序
#[derive(Debug, Default)]
pub struct CacheList {
    caches: Vec<(String, Vec<String>)>,
}

impl CacheList {
    /// 添加地址到 name 对应的缓存，同名缓存的地址会合并
    pub fn add<I, S>(&mut self, name: &str, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: Vec<String> = urls.into_iter().map(Into::into).collect();
        if urls.is_empty() {
            return;
        }

        match self.caches.iter_mut().find(|(n, _)| n == name) {
            Some((_, list)) => list.extend(urls),
            None => self.caches.push((name.to_string(), urls)),
        }
    }

    /// 生成 `versions.set(name, [urls])` 语句
    fn script(&self) -> Result<String, serde_json::Error> {
        let mut out = String::new();
        for (name, urls) in &self.caches {
            out.push_str(&format!(
                "versions.set({}, {});\n",
                serde_json::to_string(name)?,
                serde_json::to_string(urls)?
            ));
        }
        Ok(out)
    }
}

/// 快照中需要缓存的页面
///
/// 首页、标签列表和存档以快照时间为版本，文章和标签以各自的修改时间为版本，
/// 主题资源以主题的版本号为版本。
pub fn cache_list(snapshot: &Snapshot) -> CacheList {
    let mut caches = CacheList::default();

    caches.add(
        &format!("gitype-{}", snapshot.created.timestamp()),
        [urls::posts(1), urls::tags(), urls::archives()],
    );
    for post in &snapshot.posts {
        caches.add(
            &format!("post-{}", post.modified.timestamp()),
            [post.permalink.as_str()],
        );
    }
    for tag in &snapshot.tags {
        caches.add(
            &format!("tag-{}", tag.modified.timestamp()),
            [tag.permalink.as_str()],
        );
    }

    let theme = &snapshot.theme;
    caches.add(
        &format!("theme-{}-{}", theme.id, theme.version),
        theme
            .assets
            .iter()
            .filter(|asset| !asset.is_empty())
            .map(|asset| theme_asset_url(theme, asset)),
    );

    caches
}

/// 生成 sw.js 的内容
pub fn build(snapshot: &Snapshot) -> Result<Vec<u8>, serde_json::Error> {
    let versions = cache_list(snapshot).script()?;
    Ok(SCRIPT.replacen(VERSIONS_PLACEHOLDER, &versions, 1).into_bytes())
}

/// 主题资源的地址，非 http(s) 开头的相对于主题目录
fn theme_asset_url(theme: &Theme, asset: &str) -> String {
    if asset.starts_with("https://") || asset.starts_with("http://") {
        asset.to_string()
    } else {
        urls::theme(&format!("{}/{}", theme.id, asset.trim_start_matches('/')))
    }
}
