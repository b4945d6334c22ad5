//! Pure date and aggregation helpers over the loaded problem collection.
//! Everything here is stateless and UI-free so it can be tested in isolation.

use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::models::{Difficulty, ParsedProblem};

/// Number of cells in the activity heatmap: days `today-365 ..= today`.
pub const HEATMAP_DAYS: usize = 366;

// ─── Date formatting ────────────────────────────────────────────────────────

/// Zero-padded `DD-MM-YYYY`, the wire format and the solved-day key.
pub fn format_dmy(day: NaiveDate) -> String {
    format!("{:02}-{:02}-{:04}", day.day(), day.month(), day.year())
}

/// Zero-padded `YYYY-MM-DD`, the daily-count key.
pub fn format_ymd(day: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", day.year(), day.month(), day.day())
}

/// Parse a `DD-MM-YYYY` string by splitting on `-`. Returns `None` for
/// anything that is not exactly three numeric parts naming a real day.
pub fn parse_dmy(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split('-');
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let year: i32 = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Calendar-day equality. `NaiveDate` carries no time-of-day, so two
/// timestamps on the same day always compare equal once truncated here.
pub fn is_same_day(a: NaiveDate, b: NaiveDate) -> bool {
    a == b
}

// ─── Month math (calendar panel) ────────────────────────────────────────────

pub fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

pub fn add_months(month: NaiveDate, delta: i32) -> NaiveDate {
    let shifted = if delta >= 0 {
        month.checked_add_months(Months::new(delta as u32))
    } else {
        month.checked_sub_months(Months::new(delta.unsigned_abs()))
    };
    shifted.unwrap_or(month)
}

/// Weekday of day 1 of the month containing `month`, 0 = Sunday.
pub fn first_weekday_of_month(month: NaiveDate) -> u32 {
    first_of_month(month).weekday().num_days_from_sunday()
}

pub fn days_in_month(month: NaiveDate) -> u32 {
    let first = first_of_month(month);
    let next = add_months(first, 1);
    next.signed_duration_since(first).num_days() as u32
}

/// `"March 2024"` style header for the calendar panel.
pub fn month_label(month: NaiveDate) -> String {
    month.format("%B %Y").to_string()
}

// ─── Aggregation ────────────────────────────────────────────────────────────

/// All problems on the given day, in original collection order.
pub fn problems_for_day(problems: &[ParsedProblem], day: NaiveDate) -> Vec<&ParsedProblem> {
    problems.iter().filter(|p| is_same_day(p.day, day)).collect()
}

/// The set of `DD-MM-YYYY` keys with at least one completed problem.
pub fn solved_days(problems: &[ParsedProblem]) -> HashSet<String> {
    problems
        .iter()
        .filter(|p| p.record.is_completed())
        .map(|p| format_dmy(p.day))
        .collect()
}

/// Completed-problem count per day, keyed `YYYY-MM-DD`.
pub fn daily_solved_counts(problems: &[ParsedProblem]) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for p in problems.iter().filter(|p| p.record.is_completed()) {
        *counts.entry(format_ymd(p.day)).or_insert(0) += 1;
    }
    counts
}

/// Heatmap intensity bucket for a day's completed count.
pub fn activity_level(count: u32) -> u8 {
    match count {
        0 => 0,
        1 => 1,
        2..=3 => 2,
        4..=5 => 3,
        _ => 4,
    }
}

/// Problems in the inclusive window `[today-7, today]`, most recent day
/// first. The sort is stable, so same-day entries keep their input order.
pub fn recent_problems(problems: &[ParsedProblem], today: NaiveDate) -> Vec<&ParsedProblem> {
    let start = today.checked_sub_days(Days::new(7)).unwrap_or(today);
    let mut recent: Vec<&ParsedProblem> = problems
        .iter()
        .filter(|p| p.day >= start && p.day <= today)
        .collect();
    recent.sort_by(|a, b| b.day.cmp(&a.day));
    recent
}

// ─── Heatmap cells ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapCell {
    pub day: NaiveDate,
    pub count: u32,
    pub level: u8,
}

impl HeatmapCell {
    pub fn tooltip(&self) -> String {
        format!("{}: {} problem(s) solved", format_dmy(self.day), self.count)
    }
}

/// Exactly [`HEATMAP_DAYS`] cells, ascending from `today-365` through `today`.
pub fn heatmap_cells(problems: &[ParsedProblem], today: NaiveDate) -> Vec<HeatmapCell> {
    let counts = daily_solved_counts(problems);
    let start = today
        .checked_sub_days(Days::new(HEATMAP_DAYS as u64 - 1))
        .unwrap_or(today);
    start
        .iter_days()
        .take(HEATMAP_DAYS)
        .map(|day| {
            let count = counts.get(&format_ymd(day)).copied().unwrap_or(0);
            HeatmapCell {
                day,
                count,
                level: activity_level(count),
            }
        })
        .collect()
}

// ─── Difficulty progress ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierStats {
    pub tier: Difficulty,
    pub solved: u32,
    pub total: u32,
}

impl TierStats {
    /// Solved percentage in [0, 100]; 0 when the tier has no records.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.solved) / f64::from(self.total) * 100.0
        }
    }

    /// Gauge label, percentage rounded to the nearest whole number.
    pub fn label(&self) -> String {
        format!("{}/{} ({:.0}%)", self.solved, self.total, self.percentage())
    }
}

/// Totals and completions for the three fixed tiers. Records whose
/// `Difficult` string does not name a tier are excluded from every bucket.
pub fn difficulty_stats(problems: &[ParsedProblem]) -> [TierStats; 3] {
    let mut stats = Difficulty::ALL.map(|tier| TierStats {
        tier,
        solved: 0,
        total: 0,
    });
    for p in problems {
        let Some(tier) = Difficulty::parse(&p.record.difficulty) else {
            continue;
        };
        let entry = &mut stats[match tier {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }];
        entry.total += 1;
        if p.record.is_completed() {
            entry.solved += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProblemRecord;

    fn problem(title: &str, difficulty: &str, status: &str, date: &str) -> ParsedProblem {
        ParsedProblem {
            day: parse_dmy(date).unwrap(),
            record: ProblemRecord {
                problem: title.into(),
                difficulty: difficulty.into(),
                language: "Python".into(),
                status: status.into(),
                date: date.into(),
            },
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn dmy_round_trip() {
        let day = ymd(2024, 3, 1);
        assert_eq!(format_dmy(day), "01-03-2024");
        assert_eq!(parse_dmy(&format_dmy(day)), Some(day));
        assert_eq!(format_ymd(day), "2024-03-01");
    }

    #[test]
    fn parse_dmy_rejects_garbage() {
        assert_eq!(parse_dmy(""), None);
        assert_eq!(parse_dmy("2024-03-01-extra"), None);
        assert_eq!(parse_dmy("32-01-2024"), None);
        assert_eq!(parse_dmy("01-13-2024"), None);
        assert_eq!(parse_dmy("ab-cd-efgh"), None);
    }

    #[test]
    fn same_day_is_reflexive() {
        let day = ymd(2023, 12, 31);
        assert!(is_same_day(day, day));
        assert!(!is_same_day(day, ymd(2024, 1, 1)));
    }

    #[test]
    fn month_math() {
        assert_eq!(first_of_month(ymd(2024, 3, 15)), ymd(2024, 3, 1));
        assert_eq!(add_months(ymd(2024, 1, 1), -1), ymd(2023, 12, 1));
        assert_eq!(add_months(ymd(2024, 12, 1), 1), ymd(2025, 1, 1));
        // 1 March 2024 is a Friday.
        assert_eq!(first_weekday_of_month(ymd(2024, 3, 10)), 5);
        assert_eq!(days_in_month(ymd(2024, 2, 10)), 29);
        assert_eq!(days_in_month(ymd(2023, 2, 10)), 28);
        assert_eq!(days_in_month(ymd(2024, 4, 1)), 30);
        assert_eq!(month_label(ymd(2024, 3, 1)), "March 2024");
    }

    #[test]
    fn daily_counts_sum_to_completed_total() {
        let problems = vec![
            problem("A", "Easy", "Completed", "01-03-2024"),
            problem("B", "Medium", "Completed", "01-03-2024"),
            problem("C", "Hard", "Attempted", "01-03-2024"),
            problem("D", "Easy", "Completed", "05-03-2024"),
        ];
        let counts = daily_solved_counts(&problems);
        assert_eq!(counts.get("2024-03-01"), Some(&2));
        assert_eq!(counts.get("2024-03-05"), Some(&1));
        let completed = problems.iter().filter(|p| p.record.is_completed()).count() as u32;
        assert_eq!(counts.values().sum::<u32>(), completed);
    }

    #[test]
    fn solved_days_collapse_duplicates_and_skip_attempts() {
        let problems = vec![
            problem("A", "Easy", "Completed", "01-03-2024"),
            problem("B", "Medium", "Completed", "01-03-2024"),
            problem("C", "Hard", "Attempted", "02-03-2024"),
        ];
        let days = solved_days(&problems);
        assert_eq!(days.len(), 1);
        assert!(days.contains("01-03-2024"));
    }

    #[test]
    fn problems_for_day_keeps_input_order() {
        let problems = vec![
            problem("First", "Easy", "Completed", "01-03-2024"),
            problem("Other", "Easy", "Completed", "02-03-2024"),
            problem("Second", "Hard", "Attempted", "01-03-2024"),
        ];
        let day = problems_for_day(&problems, ymd(2024, 3, 1));
        let titles: Vec<&str> = day.iter().map(|p| p.record.problem.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
    }

    #[test]
    fn activity_level_step_function() {
        let expected: [(u32, u8); 8] = [
            (0, 0),
            (1, 1),
            (2, 2),
            (3, 2),
            (4, 3),
            (5, 3),
            (6, 4),
            (10, 4),
        ];
        for (count, level) in expected {
            assert_eq!(activity_level(count), level, "count {count}");
        }
    }

    #[test]
    fn heatmap_window_is_366_ascending() {
        let today = ymd(2024, 3, 10);
        let cells = heatmap_cells(&[], today);
        assert_eq!(cells.len(), HEATMAP_DAYS);
        assert_eq!(cells.first().unwrap().day, ymd(2023, 3, 11));
        assert_eq!(cells.last().unwrap().day, today);
        assert!(cells.windows(2).all(|w| w[0].day < w[1].day));
    }

    #[test]
    fn two_completions_same_day_reach_level_two() {
        let problems = vec![
            problem("A", "Easy", "Completed", "10-03-2024"),
            problem("B", "Easy", "Completed", "10-03-2024"),
        ];
        let today = ymd(2024, 3, 10);
        let cells = heatmap_cells(&problems, today);
        let cell = cells.last().unwrap();
        assert_eq!(cell.count, 2);
        assert_eq!(cell.level, 2);
        assert_eq!(cell.tooltip(), "10-03-2024: 2 problem(s) solved");
    }

    #[test]
    fn recent_window_is_inclusive_of_today_minus_seven() {
        let problems = vec![
            problem("Outside", "Easy", "Completed", "02-03-2024"),
            problem("Edge", "Easy", "Completed", "03-03-2024"),
            problem("Inside", "Medium", "Attempted", "09-03-2024"),
            problem("Today", "Hard", "Completed", "10-03-2024"),
        ];
        let recent = recent_problems(&problems, ymd(2024, 3, 10));
        let titles: Vec<&str> = recent.iter().map(|p| p.record.problem.as_str()).collect();
        assert_eq!(titles, ["Today", "Inside", "Edge"]);
    }

    #[test]
    fn recent_sort_is_stable_within_a_day() {
        let problems = vec![
            problem("First", "Easy", "Completed", "09-03-2024"),
            problem("Second", "Easy", "Completed", "09-03-2024"),
        ];
        let recent = recent_problems(&problems, ymd(2024, 3, 10));
        let titles: Vec<&str> = recent.iter().map(|p| p.record.problem.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
    }

    #[test]
    fn difficulty_stats_exclude_unrecognized_tiers() {
        let problems = vec![
            problem("A", "Easy", "Completed", "01-03-2024"),
            problem("B", "Easy", "Attempted", "02-03-2024"),
            problem("C", "Medium", "Completed", "03-03-2024"),
            problem("D", "Extreme", "Completed", "04-03-2024"),
        ];
        let [easy, medium, hard] = difficulty_stats(&problems);
        assert_eq!((easy.solved, easy.total), (1, 2));
        assert_eq!((medium.solved, medium.total), (1, 1));
        assert_eq!((hard.solved, hard.total), (0, 0));
        assert_eq!(easy.label(), "1/2 (50%)");
        assert_eq!(medium.label(), "1/1 (100%)");
        assert_eq!(hard.label(), "0/0 (0%)");
    }

    #[test]
    fn percentage_stays_in_range() {
        let full = TierStats {
            tier: Difficulty::Easy,
            solved: 7,
            total: 7,
        };
        let empty = TierStats {
            tier: Difficulty::Hard,
            solved: 0,
            total: 0,
        };
        assert_eq!(full.percentage(), 100.0);
        assert_eq!(empty.percentage(), 0.0);
        let partial = TierStats {
            tier: Difficulty::Medium,
            solved: 1,
            total: 3,
        };
        assert!(partial.percentage() > 0.0 && partial.percentage() < 100.0);
        assert_eq!(partial.label(), "1/3 (33%)");
    }
}
