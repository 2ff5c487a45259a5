// ==========================================
// 冰球选秀池阵容决策系统 - 赛季与赛段
// ==========================================
// 职责: 赛季日历、月度赛段、回看窗口与计分窗口
// 红线: 回看窗口必须在计分窗口开始之前结束
// ==========================================

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 各赛季工资帽上限
pub const SEASONS_CAP_HIT: [(i32, u64); 5] = [
    (2020, 81_500_000),
    (2021, 81_500_000),
    (2022, 82_500_000),
    (2023, 83_500_000),
    (2024, 88_000_000),
];

/// 默认回看天数
pub const DEFAULT_LOOK_BACK_DAYS: i64 = 7;

// ==========================================
// Season - 赛季 (跨两个自然年)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Season {
    pub start: i32,
}

impl Season {
    pub fn new(start: i32) -> Self {
        Self { start }
    }

    pub fn end(&self) -> i32 {
        self.start + 1
    }

    pub fn next(&self) -> Season {
        Season::new(self.end())
    }

    /// 该赛季的工资帽（未收录的赛季返回 None）
    pub fn salary_cap(&self) -> Option<u64> {
        SEASONS_CAP_HIT
            .iter()
            .find(|(year, _)| *year == self.start)
            .map(|(_, cap)| *cap)
    }

    /// 常规赛月度赛段: 开赛年 10-12 月 + 次年 1-4 月
    pub fn regular_season_periods(&self) -> Vec<Period> {
        let months = [(self.start, 10), (self.start, 11), (self.start, 12)]
            .into_iter()
            .chain((1..=4).map(|m| (self.end(), m)));
        months
            .filter_map(|(year, month)| Period::new(year, month))
            .collect()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end())
    }
}

// ==========================================
// DateWindow - 闭区间日期窗口
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ~ {}",
            self.start.format("%b %d, %Y"),
            self.end.format("%b %d, %Y")
        )
    }
}

// ==========================================
// Period - 月度赛段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    year: i32,
    month: u32,
    first_day: NaiveDate,
    last_day: NaiveDate,
}

impl Period {
    /// 创建月度赛段（月份非法时返回 None）
    pub fn new(year: i32, month: u32) -> Option<Self> {
        let first_day = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next_month_first = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        let last_day = next_month_first.pred_opt()?;
        Some(Self {
            year,
            month,
            first_day,
            last_day,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// 月份序号（跨年单调递增）
    pub fn ordinal(&self) -> i64 {
        self.first_day.year() as i64 * 12 + self.first_day.month0() as i64
    }

    /// 计分窗口: 整个自然月
    pub fn scoring_window(&self) -> DateWindow {
        DateWindow::new(self.first_day, self.last_day)
    }

    /// 回看窗口: 月初之前的 `days` 天（不含月初当天）
    ///
    /// `days` 小于 1 时按 1 天处理
    pub fn look_back_window(&self, days: i64) -> DateWindow {
        let days = days.max(1);
        let end = self.first_day - Duration::days(1);
        let start = self.first_day - Duration::days(days);
        DateWindow::new(start, end)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day.format("%B %Y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_regular_season_periods_span_two_years() {
        let periods = Season::new(2022).regular_season_periods();
        let labels: Vec<(i32, u32)> = periods.iter().map(|p| (p.year(), p.month())).collect();
        assert_eq!(
            labels,
            vec![(2022, 10), (2022, 11), (2022, 12), (2023, 1), (2023, 2), (2023, 3), (2023, 4)]
        );
        assert!(periods.windows(2).all(|w| w[0].ordinal() < w[1].ordinal()));
    }

    #[test]
    fn test_scoring_window_covers_whole_month() {
        let period = Period::new(2024, 2).unwrap();
        let window = period.scoring_window();
        assert_eq!(window.start, date(2024, 2, 1));
        assert_eq!(window.end, date(2024, 2, 29));

        let december = Period::new(2022, 12).unwrap().scoring_window();
        assert_eq!(december.end, date(2022, 12, 31));
    }

    #[test]
    fn test_look_back_window_ends_before_scoring_window() {
        let period = Period::new(2023, 1).unwrap();
        let look = period.look_back_window(DEFAULT_LOOK_BACK_DAYS);
        assert_eq!(look.start, date(2022, 12, 25));
        assert_eq!(look.end, date(2022, 12, 31));
        assert!(look.end < period.scoring_window().start);
        assert!(!look.contains(date(2023, 1, 1)));
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert!(Period::new(2022, 13).is_none());
        assert!(Period::new(2022, 0).is_none());
    }

    #[test]
    fn test_salary_cap_lookup() {
        assert_eq!(Season::new(2022).salary_cap(), Some(82_500_000));
        assert_eq!(Season::new(1999).salary_cap(), None);
        assert_eq!(Season::new(2022).to_string(), "2022-2023");
    }
}
