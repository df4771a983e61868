//! 时间类型模块
//!
//! 后端返回的时间字段既可能是完整的 RFC 3339 时间，也可能只有日期部分
//! (`YYYY-MM-DD`)。`Timestamp` 统一为毫秒时间戳，用于排序和展示。

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// 毫秒时间戳
///
/// 内部存储为 `i64`，表示自 Unix 纪元以来的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// 从 RFC 3339 / ISO 8601 字符串或纯日期解析
    ///
    /// 返回 None 如果两种格式都无法解析
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(Self(dt.timestamp_millis()));
        }
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
        let dt = date.and_hms_opt(0, 0, 0)?.and_utc();
        Some(Self(dt.timestamp_millis()))
    }

    fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.0)
    }

    /// 展示格式，如 `Jan 15, 2024`
    pub fn display_date(&self) -> String {
        self.to_datetime()
            .map(|dt| dt.format("%b %-d, %Y").to_string())
            .unwrap_or_default()
    }
}

/// 将后端时间字符串格式化为展示文本，无法解析时原样返回
pub fn format_display(raw: &str) -> String {
    Timestamp::parse(raw)
        .map(|ts| ts.display_date())
        .unwrap_or_else(|| raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rfc3339() {
        let ts = Timestamp::parse("2024-01-15T00:00:00Z").unwrap();
        assert_eq!(ts.as_millis(), 1_705_276_800_000);
    }

    #[test]
    fn test_parse_date_only_matches_midnight() {
        let a = Timestamp::parse("2024-01-15").unwrap();
        let b = Timestamp::parse("2024-01-15T00:00:00.000Z").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_garbage() {
        assert!(Timestamp::parse("yesterday").is_none());
        assert!(Timestamp::parse("").is_none());
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format_display("2024-01-05"), "Jan 5, 2024");
        assert_eq!(format_display("not a date"), "not a date");
    }
}
