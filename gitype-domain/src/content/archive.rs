use chrono::NaiveDate;
use serde::Serialize;

/// 某一时间段的存档
#[derive(Debug, Clone, Serialize)]
pub struct Archive {
    /// 分组用的日期，按月为当月 2 日，按年为当年 1 月 31 日
    #[serde(skip)]
    pub date: NaiveDate,

    pub title: String,

    /// 文章在快照中的下标
    #[serde(skip)]
    pub posts: Vec<usize>,
}
