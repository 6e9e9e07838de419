use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use gitype_domain::site::format_date;
use gitype_domain::{Archive, ArchiveOrder, ArchiveType, Post};

/// 按创建时间将文章分组为存档
///
/// 按月分组时取当月 2 日，按年分组时取当年 1 月 31 日作为分组日期，
/// 避免与文章的实际时间混淆。
pub fn build_archives(
    posts: &[Post],
    archive_type: ArchiveType,
    order: ArchiveOrder,
    format: &str,
) -> Vec<Archive> {
    let mut archives: Vec<Archive> = Vec::new();

    for (index, post) in posts.iter().enumerate() {
        let created = post.created.date_naive();
        let date = match archive_type {
            ArchiveType::Month => NaiveDate::from_ymd_opt(created.year(), created.month(), 2),
            ArchiveType::Year => NaiveDate::from_ymd_opt(created.year(), 1, 31),
        };
        let Some(date) = date else {
            continue;
        };

        match archives.iter_mut().find(|a| a.date == date) {
            Some(archive) => archive.posts.push(index),
            None => archives.push(Archive {
                date,
                title: format_date(&Utc.from_utc_datetime(&date.and_time(NaiveTime::default())), format),
                posts: vec![index],
            }),
        }
    }

    archives.sort_by(|a, b| b.date.cmp(&a.date));
    if order == ArchiveOrder::Asc {
        archives.reverse();
    }
    archives
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::post;

    #[test]
    fn test_archives_by_year() {
        let posts = vec![
            post("a", "2017-03-01T00:00:00+08:00"),
            post("b", "2016-12-31T10:00:00+08:00"),
            post("c", "2017-01-05T00:00:00+08:00"),
        ];

        let archives = build_archives(&posts, ArchiveType::Year, ArchiveOrder::Desc, "%Y年");
        assert_eq!(archives.len(), 2);
        assert_eq!(archives[0].title, "2017年");
        assert_eq!(archives[0].posts, vec![0, 2]);
        assert_eq!(archives[1].title, "2016年");
        assert_eq!(archives[1].posts, vec![1]);

        let archives = build_archives(&posts, ArchiveType::Year, ArchiveOrder::Asc, "%Y");
        let titles: Vec<_> = archives.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["2016", "2017"]);
    }

    #[test]
    fn test_archives_by_month() {
        let posts = vec![
            post("a", "2017-03-01T00:00:00+08:00"),
            post("b", "2017-03-20T00:00:00+08:00"),
            post("c", "2017-01-05T00:00:00+08:00"),
        ];

        let archives = build_archives(&posts, ArchiveType::Month, ArchiveOrder::Desc, "%Y-%m");
        let titles: Vec<_> = archives.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["2017-03", "2017-01"]);
        assert_eq!(archives[0].posts, vec![0, 1]);
        assert_eq!(archives[0].date, NaiveDate::from_ymd_opt(2017, 3, 2).unwrap());
    }

    #[test]
    fn test_archives_empty() {
        assert!(build_archives(&[], ArchiveType::Year, ArchiveOrder::Desc, "%Y").is_empty());
    }
}
