use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph},
    Frame,
};

use super::App;
use crate::models::{Difficulty, ParsedProblem};
use crate::stats::{self, HeatmapCell};
use chrono::{Datelike, Local};

const ACCENT: Color = Color::Cyan;
const HEADER_BG: Color = Color::DarkGray;
const SELECTED_BG: Color = Color::Rgb(40, 40, 60);
const DIM: Color = Color::DarkGray;
const GOOD: Color = Color::Green;
const WARN: Color = Color::Yellow;
const BAD: Color = Color::Red;

/// ANSI-256 green ramp for heatmap levels 0-4, dark gray for empty days.
const LEVEL_COLORS: [Color; 5] = [
    Color::Indexed(236),
    Color::Indexed(22),
    Color::Indexed(28),
    Color::Indexed(34),
    Color::Indexed(40),
];

// ─── Main render ────────────────────────────────────────────────────────────

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_clock(f, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(0)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(11), Constraint::Min(9)])
        .split(body[0]);

    render_calendar(f, app, left[0]);
    render_difficulty_progress(f, app, left[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(body[1]);

    render_heatmap(f, app, right[0]);
    render_day_detail(f, app, right[1]);

    render_status_bar(f, app, chunks[2]);

    if app.show_recent {
        render_recent_modal(f, app, f.area());
    }
}

// ─── Header / Clock ─────────────────────────────────────────────────────────

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " CodeTrack ",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("— coding practice dashboard", Style::default().fg(DIM)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn render_clock(f: &mut Frame, header_area: Rect) {
    let time_str = format!(" {} ", Local::now().format("%a %b %d  %H:%M:%S"));
    let clock_width = time_str.len() as u16;
    let clock_area = Rect {
        x: header_area.right().saturating_sub(clock_width),
        y: header_area.y,
        width: clock_width.min(header_area.width),
        height: 1,
    };
    f.render_widget(
        Paragraph::new(time_str).style(Style::default().fg(ACCENT)),
        clock_area,
    );
}

// ─── Status Bar ─────────────────────────────────────────────────────────────

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let state = if app.loading {
        format!(" {} loading…", SPINNER[(app.frame_count / 2) as usize % SPINNER.len()])
    } else {
        format!(" {} problems", app.problems.len())
    };

    let status = Paragraph::new(Line::from(vec![
        Span::styled(state, Style::default().fg(if app.loading { WARN } else { Color::White })),
        Span::styled(
            "  q:quit  h/l:day  j/k:week  p/n:month  t:today  7:last 7 days  ",
            Style::default().fg(DIM),
        ),
    ]))
    .style(Style::default().bg(HEADER_BG));

    f.render_widget(status, area);
}

// ─── Calendar ───────────────────────────────────────────────────────────────

fn render_calendar(f: &mut Frame, app: &App, area: Rect) {
    let solved = stats::solved_days(&app.problems);
    let first_weekday = stats::first_weekday_of_month(app.cursor_month);
    let days = stats::days_in_month(app.cursor_month);

    let mut lines: Vec<Line> = vec![Line::from(Span::styled(
        " Su  Mo  Tu  We  Th  Fr  Sa",
        Style::default().fg(DIM),
    ))];

    let mut week: Vec<Span> = vec![Span::raw("    ".repeat(first_weekday as usize))];
    for day in 1..=days {
        let Some(date) = app.cursor_month.with_day(day) else {
            continue;
        };
        let is_today = stats::is_same_day(date, app.today);
        let is_selected = stats::is_same_day(date, app.selected_day);
        let is_solved = solved.contains(&stats::format_dmy(date));

        let mut style = Style::default().fg(if is_solved { GOOD } else { Color::White });
        if is_today {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        if is_selected {
            style = style.bg(SELECTED_BG);
        }
        week.push(Span::styled(format!("{day:>3} "), style));

        if (first_weekday + day) % 7 == 0 {
            lines.push(Line::from(std::mem::take(&mut week)));
        }
    }
    if !week.is_empty() {
        lines.push(Line::from(week));
    }

    let calendar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", stats::month_label(app.cursor_month)))
            .title_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(calendar, area);
}

// ─── Activity Heatmap ───────────────────────────────────────────────────────

fn render_heatmap(f: &mut Frame, app: &App, area: Rect) {
    let cells = stats::heatmap_cells(&app.problems, app.today);

    // Column-per-week grid, rows Sun..Sat, window kept in ascending order.
    let offset = cells
        .first()
        .map(|c| c.day.weekday().num_days_from_sunday() as usize)
        .unwrap_or(0);
    let columns = (offset + cells.len()).div_ceil(7);
    let mut grid: Vec<Vec<Option<&HeatmapCell>>> = vec![vec![None; columns]; 7];
    for (i, cell) in cells.iter().enumerate() {
        let pos = offset + i;
        grid[pos % 7][pos / 7] = Some(cell);
    }

    let row_labels = ["   ", "Mon", "   ", "Wed", "   ", "Fri", "   "];
    let mut lines: Vec<Line> = Vec::with_capacity(8);
    for (row, label) in grid.iter().zip(row_labels) {
        let mut spans: Vec<Span> = vec![Span::styled(format!("{label} "), Style::default().fg(DIM))];
        for slot in row {
            spans.push(match slot {
                Some(cell) => Span::styled(
                    "█",
                    Style::default().fg(LEVEL_COLORS[cell.level as usize]),
                ),
                None => Span::raw(" "),
            });
        }
        lines.push(Line::from(spans));
    }

    // Tooltip line for the selected day, when it falls inside the window.
    let tooltip = cells
        .iter()
        .find(|c| stats::is_same_day(c.day, app.selected_day))
        .map(|c| c.tooltip())
        .unwrap_or_default();
    lines.push(Line::from(Span::styled(
        format!("    {tooltip}"),
        Style::default().fg(DIM),
    )));

    let heatmap = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Activity (365 days) ")
            .title_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(heatmap, area);
}

// ─── Day Detail ─────────────────────────────────────────────────────────────

fn problem_line(p: &ParsedProblem, meta: String, width: usize) -> Line<'_> {
    let status_color = if p.record.is_completed() { GOOD } else { WARN };
    let title = truncate_to(&p.record.problem, width.saturating_sub(meta.len() + 16));
    Line::from(vec![
        Span::styled("  ", Style::default()),
        Span::styled(title, Style::default().fg(Color::White)),
        Span::styled(meta, Style::default().fg(DIM)),
        Span::styled(
            format!("  {}", p.record.status),
            Style::default().fg(status_color),
        ),
    ])
}

fn render_day_detail(f: &mut Frame, app: &App, area: Rect) {
    let problems = stats::problems_for_day(&app.problems, app.selected_day);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.detail_header()))
        .title_style(Style::default().fg(ACCENT));

    if problems.is_empty() {
        let empty = Paragraph::new("  No problems for this day.")
            .style(Style::default().fg(DIM))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let width = area.width as usize;
    let items: Vec<ListItem> = problems
        .iter()
        .map(|p| {
            let meta = format!(" - {} ({})", p.record.difficulty, p.record.language);
            ListItem::new(problem_line(p, meta, width))
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

// ─── Recent-Activity Modal ──────────────────────────────────────────────────

fn render_recent_modal(f: &mut Frame, app: &App, area: Rect) {
    let modal_area = centered_rect(70, 60, area);
    f.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Last 7 Days ")
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    let recent = stats::recent_problems(&app.problems, app.today);
    if recent.is_empty() {
        let empty = Paragraph::new("  No problems in the last 7 days.")
            .style(Style::default().fg(DIM))
            .block(block);
        f.render_widget(empty, modal_area);
        return;
    }

    let width = modal_area.width as usize;
    let items: Vec<ListItem> = recent
        .iter()
        .map(|p| {
            // Style tag derived from the lowercased status string.
            let tag = p.record.status.to_lowercase();
            let tag_color = if tag == "completed" { GOOD } else { WARN };
            let meta = format!(" - {} ({})", stats::format_dmy(p.day), p.record.language);
            let title = truncate_to(&p.record.problem, width.saturating_sub(meta.len() + 16));
            ListItem::new(Line::from(vec![
                Span::styled("  ", Style::default()),
                Span::styled(title, Style::default().fg(Color::White)),
                Span::styled(meta, Style::default().fg(DIM)),
                Span::styled(format!("  {}", p.record.status), Style::default().fg(tag_color)),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(block), modal_area);
}

// ─── Difficulty Progress ────────────────────────────────────────────────────

fn render_difficulty_progress(f: &mut Frame, app: &App, area: Rect) {
    let tiers = stats::difficulty_stats(&app.problems);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    for (tier, chunk) in tiers.iter().zip(chunks.iter()) {
        let color = match tier.tier {
            Difficulty::Easy => GOOD,
            Difficulty::Medium => WARN,
            Difficulty::Hard => BAD,
        };
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", tier.tier.label())),
            )
            .gauge_style(Style::default().fg(color))
            .ratio((tier.percentage() / 100.0).clamp(0.0, 1.0))
            .label(tier.label());
        f.render_widget(gauge, *chunk);
    }
}

// ─── Helpers ────────────────────────────────────────────────────────────────

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Truncate to a display width, appending an ellipsis when anything is cut.
fn truncate_to(s: &str, max: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    let mut width = 0usize;
    let mut out = String::new();
    for ch in s.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if width + w + 1 > max {
            break;
        }
        width += w;
        out.push(ch);
    }
    out.push('…');
    out
}
