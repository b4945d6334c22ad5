pub mod event;
pub mod ui;

use chrono::{Local, NaiveDate, TimeDelta};
use tokio::sync::oneshot;

use crate::api::ApiClient;
use crate::models::{Difficulty, ParsedProblem, ProblemRecord};
use crate::stats;

// ─── Background Fetch Result ─────────────────────────────────────────────────

pub struct FetchResult {
    pub records: Vec<ProblemRecord>,
    /// Error message when the fetch failed; logged, never shown.
    pub error: Option<String>,
}

// ─── App State ──────────────────────────────────────────────────────────────

/// All mutable dashboard state. The collection is written once (on fetch
/// success) and only read afterwards; the two date cursors move on key
/// presses and every panel recomputes its view from them each frame.
pub struct App {
    pub client: ApiClient,
    pub running: bool,

    // Data
    pub problems: Vec<ParsedProblem>,
    pub strict_difficulties: bool,

    // Date cursors, both starting at "today"
    pub today: NaiveDate,
    /// First day of the month the calendar panel shows.
    pub cursor_month: NaiveDate,
    /// Day whose problems the detail panel lists.
    pub selected_day: NaiveDate,

    // UI state
    pub show_recent: bool,
    pub loading: bool,

    // Background fetch channel
    pub fetch_rx: Option<oneshot::Receiver<FetchResult>>,

    // Incremented each frame; drives the loading spinner.
    pub frame_count: u64,
}

impl App {
    pub fn new(client: ApiClient, strict_difficulties: bool) -> Self {
        let today = Local::now().date_naive();
        Self {
            client,
            running: true,
            problems: Vec::new(),
            strict_difficulties,
            today,
            cursor_month: stats::first_of_month(today),
            selected_day: today,
            show_recent: false,
            loading: false,
            fetch_rx: None,
            frame_count: 0,
        }
    }

    /// Spawn the one startup fetch on a background task. The draw loop polls
    /// `poll_fetch_result` each frame to collect the outcome. No-ops if a
    /// fetch is already in flight.
    pub fn start_fetch(&mut self) {
        if self.fetch_rx.is_some() {
            return;
        }
        let client = self.client.clone();
        let (tx, rx) = oneshot::channel();
        self.fetch_rx = Some(rx);
        self.loading = true;
        tokio::spawn(async move {
            let result = match client.fetch_problems().await {
                Ok(records) => FetchResult {
                    records,
                    error: None,
                },
                Err(e) => FetchResult {
                    records: Vec::new(),
                    error: Some(e.to_string()),
                },
            };
            let _ = tx.send(result);
        });
    }

    /// Check the fetch channel without blocking. Returns `true` once data
    /// (or a logged failure) has been applied.
    pub fn poll_fetch_result(&mut self) -> bool {
        let result = match self.fetch_rx.as_mut() {
            None => return false,
            Some(rx) => match rx.try_recv() {
                Ok(r) => r,
                Err(oneshot::error::TryRecvError::Empty) => return false,
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.fetch_rx = None;
                    self.loading = false;
                    return false;
                }
            },
        };
        self.fetch_rx = None;
        self.apply_fetch_result(result);
        true
    }

    fn apply_fetch_result(&mut self, result: FetchResult) {
        self.loading = false;
        if let Some(err) = result.error {
            // Load failures stay off-screen: the panels keep their empty state.
            tracing::error!(error = %err, "loading problems failed");
            return;
        }
        match parse_records(result.records, self.strict_difficulties) {
            Ok(problems) => {
                tracing::info!(count = problems.len(), "loaded problem history");
                self.problems = problems;
            }
            Err(err) => {
                tracing::error!(error = %err, "rejecting problem payload");
            }
        }
    }

    // ── Navigation ──────────────────────────────────────────────────────

    /// Move the selected day by `days`. The calendar follows the selection
    /// into an adjacent month so the highlighted cell stays visible.
    pub fn move_selection(&mut self, days: i64) {
        if let Some(day) = self.selected_day.checked_add_signed(TimeDelta::days(days)) {
            self.selected_day = day;
            self.cursor_month = stats::first_of_month(day);
        }
    }

    /// Shift the displayed month without touching the selected day.
    pub fn shift_month(&mut self, delta: i32) {
        self.cursor_month = stats::add_months(self.cursor_month, delta);
    }

    pub fn jump_to_today(&mut self) {
        self.selected_day = self.today;
        self.cursor_month = stats::first_of_month(self.today);
    }

    pub fn toggle_recent(&mut self) {
        self.show_recent = !self.show_recent;
    }

    /// Header for the day-detail panel: "Today" for the system date,
    /// otherwise the DD-MM-YYYY form.
    pub fn detail_header(&self) -> String {
        if stats::is_same_day(self.selected_day, self.today) {
            "Today".into()
        } else {
            stats::format_dmy(self.selected_day)
        }
    }
}

// ─── Load-time normalization ────────────────────────────────────────────────

/// Parse each record's `Date` once. Records with unparseable dates are
/// dropped with a warning; unrecognized difficulties are warned about and
/// kept (they still show in day lists) unless `strict` rejects the payload.
pub(crate) fn parse_records(
    records: Vec<ProblemRecord>,
    strict: bool,
) -> Result<Vec<ParsedProblem>, String> {
    let mut parsed = Vec::with_capacity(records.len());
    for record in records {
        let Some(day) = stats::parse_dmy(&record.date) else {
            tracing::warn!(
                date = %record.date,
                problem = %record.problem,
                "dropping record with unparseable date"
            );
            continue;
        };
        if Difficulty::parse(&record.difficulty).is_none() {
            if strict {
                return Err(format!(
                    "unrecognized difficulty '{}' on '{}'",
                    record.difficulty, record.problem
                ));
            }
            tracing::warn!(
                difficulty = %record.difficulty,
                problem = %record.problem,
                "unrecognized difficulty, excluded from progress stats"
            );
        }
        parsed.push(ParsedProblem { record, day });
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn test_app() -> App {
        let client = ApiClient::new("https://example.com/api/code/data").unwrap();
        App::new(client, false)
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(problem: &str, difficulty: &str, date: &str) -> ProblemRecord {
        ProblemRecord {
            problem: problem.into(),
            difficulty: difficulty.into(),
            language: "Rust".into(),
            status: "Completed".into(),
            date: date.into(),
        }
    }

    #[test]
    fn month_navigation_keeps_selection() {
        let mut app = test_app();
        app.today = ymd(2024, 3, 1);
        app.selected_day = ymd(2024, 3, 1);
        app.cursor_month = ymd(2024, 3, 1);

        app.shift_month(1);
        assert_eq!(app.cursor_month, ymd(2024, 4, 1));
        assert_eq!(app.selected_day, ymd(2024, 3, 1));

        app.shift_month(-2);
        assert_eq!(app.cursor_month, ymd(2024, 2, 1));
        assert_eq!(app.selected_day, ymd(2024, 3, 1));
    }

    #[test]
    fn selection_within_a_month_keeps_cursor() {
        let mut app = test_app();
        app.selected_day = ymd(2024, 3, 10);
        app.cursor_month = ymd(2024, 3, 1);

        app.move_selection(1);
        assert_eq!(app.selected_day, ymd(2024, 3, 11));
        assert_eq!(app.cursor_month, ymd(2024, 3, 1));
    }

    #[test]
    fn selection_across_month_boundary_moves_cursor() {
        let mut app = test_app();
        app.selected_day = ymd(2024, 3, 31);
        app.cursor_month = ymd(2024, 3, 1);

        app.move_selection(1);
        assert_eq!(app.selected_day, ymd(2024, 4, 1));
        assert_eq!(app.cursor_month, ymd(2024, 4, 1));
    }

    #[test]
    fn jump_to_today_resets_both_cursors() {
        let mut app = test_app();
        app.today = ymd(2024, 3, 15);
        app.selected_day = ymd(2023, 11, 2);
        app.cursor_month = ymd(2023, 11, 1);

        app.jump_to_today();
        assert_eq!(app.selected_day, ymd(2024, 3, 15));
        assert_eq!(app.cursor_month, ymd(2024, 3, 1));
    }

    #[test]
    fn detail_header_says_today_for_system_date() {
        let mut app = test_app();
        app.today = ymd(2024, 3, 1);
        app.selected_day = ymd(2024, 3, 1);
        assert_eq!(app.detail_header(), "Today");

        app.selected_day = ymd(2024, 2, 29);
        assert_eq!(app.detail_header(), "29-02-2024");
    }

    #[test]
    fn single_completed_problem_lights_up_every_panel() {
        let mut app = test_app();
        app.today = ymd(2024, 3, 1);
        app.selected_day = app.today;
        app.cursor_month = ymd(2024, 3, 1);
        app.problems = parse_records(vec![record("Two Sum", "Easy", "01-03-2024")], false).unwrap();

        assert_eq!(app.detail_header(), "Today");

        let solved = stats::solved_days(&app.problems);
        assert!(solved.contains("01-03-2024"));
        assert!(stats::is_same_day(app.today, ymd(2024, 3, 1)));

        let [easy, _, _] = stats::difficulty_stats(&app.problems);
        assert_eq!(easy.label(), "1/1 (100%)");

        let detail = stats::problems_for_day(&app.problems, app.selected_day);
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0].record.problem, "Two Sum");
    }

    #[test]
    fn parse_records_drops_bad_dates() {
        let records = vec![
            record("Good", "Easy", "01-03-2024"),
            record("Bad", "Easy", "not-a-date"),
        ];
        let parsed = parse_records(records, false).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].record.problem, "Good");
        assert_eq!(parsed[0].day, ymd(2024, 3, 1));
    }

    #[test]
    fn parse_records_keeps_unknown_difficulty_when_lenient() {
        let records = vec![record("Odd", "Extreme", "01-03-2024")];
        let parsed = parse_records(records, false).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn parse_records_rejects_unknown_difficulty_when_strict() {
        let records = vec![record("Odd", "Extreme", "01-03-2024")];
        assert!(parse_records(records, true).is_err());
    }
}
