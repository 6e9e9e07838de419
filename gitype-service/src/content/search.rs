//! 文章搜索
//!
//! 查询语法为 `类型:内容`，类型可以是 `title`、`tag` 或 `series`。
//! 没有分隔符、任意一侧为空或类型无法识别时，整个字符串作为关键字，
//! 在标题、内容和摘要中查找。结果保持快照中文章的顺序。

use crate::snapshot::Snapshot;

/// 查询类型与内容的分隔符
pub const TYPE_SEPARATOR: char = ':';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchType {
    Title,
    Tag,
    Series,
    Default,
}

fn parse_query(query: &str) -> (SearchType, String) {
    if let Some((kind, content)) = query.split_once(TYPE_SEPARATOR) {
        let kind = kind.trim();
        let content = content.trim();
        if !kind.is_empty() && !content.is_empty() {
            let search_type = match kind.to_lowercase().as_str() {
                "title" => Some(SearchType::Title),
                "tag" => Some(SearchType::Tag),
                "series" => Some(SearchType::Series),
                _ => None,
            };
            if let Some(search_type) = search_type {
                return (search_type, content.to_lowercase());
            }
        }
    }
    (SearchType::Default, query.trim().to_lowercase())
}

/// 搜索文章，返回文章在快照中的下标
///
/// 空查询返回空结果，是否跳转由调用方决定。
pub fn search(query: &str, snapshot: &Snapshot) -> Vec<usize> {
    let (search_type, keyword) = parse_query(query);
    if keyword.is_empty() {
        return Vec::new();
    }

    match search_type {
        SearchType::Title => matching_posts(snapshot, |post| post.search_title.contains(&keyword)),
        SearchType::Default => matching_posts(snapshot, |post| {
            post.search_title.contains(&keyword)
                || post.search_content.contains(&keyword)
                || post.search_summary.contains(&keyword)
        }),
        SearchType::Tag => posts_of_tags(snapshot, &snapshot.plain_tags, &keyword),
        SearchType::Series => posts_of_tags(snapshot, &snapshot.series, &keyword),
    }
}

fn matching_posts<F>(snapshot: &Snapshot, predicate: F) -> Vec<usize>
where
    F: Fn(&gitype_domain::Post) -> bool,
{
    snapshot
        .posts
        .iter()
        .enumerate()
        .filter(|(_, post)| predicate(post))
        .map(|(index, _)| index)
        .collect()
}

/// 标题包含关键字的标签下所有文章的并集
fn posts_of_tags(snapshot: &Snapshot, tags: &[usize], keyword: &str) -> Vec<usize> {
    let mut selected = vec![false; snapshot.posts.len()];
    for &tag in tags {
        let tag = &snapshot.tags[tag];
        if tag.search_title.contains(keyword) {
            for &post in &tag.posts {
                selected[post] = true;
            }
        }
    }

    selected
        .into_iter()
        .enumerate()
        .filter(|(_, selected)| *selected)
        .map(|(index, _)| index)
        .collect()
}
