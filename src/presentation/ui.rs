use crate::application::{App, AppMode, DetailTab, FilterDraft, FilterEntry, Remote, Screen};
use crate::domain::performance::{FEEDBACK, PROJECTS, RESPONSIBILITIES, SKILLS};
use crate::domain::analytics::{SUMMARY_CARDS, SummaryCard};
use crate::domain::{AnalyticsReport, EmployeeProfile, FetchError, Rating};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        BarChart, Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table,
        TableState, Tabs, Wrap,
    },
    Frame,
};

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    match app.screen {
        Screen::Employees => render_employees(f, app, chunks[1]),
        Screen::Detail => render_detail(f, app, chunks[1]),
        Screen::Bookmarks => render_bookmarks(f, app, chunks[1]),
        Screen::Analytics => render_analytics(f, app, chunks[1]),
    }
    render_status_bar(f, app, chunks[2]);

    match app.mode {
        AppMode::Filter => render_filter_popup(f, &app.filter_draft),
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::Normal | AppMode::Search => {}
    }
}

/// Filled and empty stars for `rating`, e.g. "★★★☆☆".
pub fn stars(rating: Rating) -> String {
    let filled = rating.value() as usize;
    let empty = Rating::MAX as usize - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(empty))
}

pub fn rating_color(rating: Rating) -> Color {
    match rating.value() {
        1 => Color::Red,
        2 => Color::LightRed,
        3 => Color::Yellow,
        4 => Color::Green,
        _ => Color::Blue,
    }
}

/// Message shown when a fetch fails.
pub fn error_text(err: &FetchError) -> String {
    if err.is_not_found() {
        "Employee not found".to_string()
    } else {
        format!("Error: {err}")
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let tab = |label: &'static str, active: bool| {
        if active {
            Span::styled(label, Style::default().bg(Color::LightBlue).fg(Color::Black))
        } else {
            Span::styled(label, Style::default().fg(Color::Cyan))
        }
    };
    let header = Line::from(vec![
        Span::styled(
            "HR Performance Dashboard ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        tab(" 1 Employees ", matches!(app.screen, Screen::Employees | Screen::Detail)),
        Span::raw(" "),
        tab(" 2 Bookmarks ", app.screen == Screen::Bookmarks),
        Span::raw(" "),
        tab(" 3 Analytics ", app.screen == Screen::Analytics),
    ]);
    f.render_widget(Paragraph::new(header), area);
}

fn centered_message(f: &mut Frame, area: Rect, title: &str, text: String, style: Style) {
    let widget = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .style(style)
        .wrap(Wrap { trim: true });
    f.render_widget(widget, area);
}

fn render_employees(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let active = app.active_filter_count();
    let search_title = if active > 0 {
        format!("Search | Filters: {active}")
    } else {
        "Search".to_string()
    };
    let search_style = if app.mode == AppMode::Search {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    let search_text = if app.search_input.is_empty() && app.mode != AppMode::Search {
        "Search by name, email, or department... (/)".to_string()
    } else {
        app.search_input.clone()
    };
    f.render_widget(
        Paragraph::new(search_text)
            .style(search_style)
            .block(Block::default().borders(Borders::ALL).title(search_title)),
        chunks[0],
    );

    let employees = match &app.employees {
        Remote::Idle | Remote::Loading => {
            centered_message(
                f,
                chunks[1],
                "Employees",
                "Loading employees...".to_string(),
                Style::default(),
            );
            return;
        }
        Remote::Failed(err) => {
            centered_message(
                f,
                chunks[1],
                "Employees",
                format!("{}\n\nPress r to try again.", error_text(err)),
                Style::default().fg(Color::Red),
            );
            return;
        }
        Remote::Ready(employees) => employees,
    };

    let rows_data = app.visible_employees();
    let title = format!("Employees ({}/{})", rows_data.len(), employees.len());
    if rows_data.is_empty() {
        centered_message(
            f,
            chunks[1],
            &title,
            "No employees found matching your criteria.".to_string(),
            Style::default().fg(Color::DarkGray),
        );
        return;
    }

    let header = Row::new(vec!["", "Name", "Email", "Age", "Department", "Rating"])
        .style(Style::default().fg(Color::Yellow));
    let rows: Vec<Row> = rows_data
        .iter()
        .map(|(employee, bookmarked)| {
            Row::new(vec![
                Cell::from(if *bookmarked { "◆" } else { " " }),
                Cell::from(employee.full_name()),
                Cell::from(employee.email.clone()),
                Cell::from(employee.age.to_string()),
                Cell::from(employee.department.name()),
                Cell::from(stars(employee.rating))
                    .style(Style::default().fg(rating_color(employee.rating))),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(1),
        Constraint::Length(22),
        Constraint::Min(20),
        Constraint::Length(4),
        Constraint::Length(12),
        Constraint::Length(6),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .column_spacing(1);

    let mut state = TableState::default();
    state.select(Some(app.list_cursor));
    f.render_stateful_widget(table, chunks[1], &mut state);
}

fn render_detail(f: &mut Frame, app: &App, area: Rect) {
    let profile = match &app.detail {
        Remote::Idle | Remote::Loading => {
            centered_message(
                f,
                area,
                "Employee",
                "Loading employee...".to_string(),
                Style::default(),
            );
            return;
        }
        Remote::Failed(err) => {
            centered_message(
                f,
                area,
                "Employee",
                format!(
                    "{}\n\nPress r to try again or Esc to go back to the dashboard.",
                    error_text(err)
                ),
                Style::default().fg(Color::Red),
            );
            return;
        }
        Remote::Ready(profile) => profile,
    };

    let bookmarked = app.store.is_bookmarked(profile.employee.id);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(11),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);

    render_profile_card(f, profile, bookmarked, top[0]);
    render_history(f, profile, top[1]);

    let titles: Vec<&str> = DetailTab::ALL.iter().map(|t| t.title()).collect();
    let tabs = Tabs::new(titles)
        .select(app.detail_tab.index())
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Black).bg(Color::LightBlue));
    f.render_widget(tabs, rows[1]);

    let body: Vec<Line> = match app.detail_tab {
        DetailTab::Overview => {
            let mut lines = vec![
                Line::from(Span::styled("Skills", Style::default().add_modifier(Modifier::BOLD))),
                Line::from(SKILLS.join(" · ")),
                Line::from(""),
                Line::from(Span::styled(
                    "Responsibilities",
                    Style::default().add_modifier(Modifier::BOLD),
                )),
            ];
            lines.extend(RESPONSIBILITIES.iter().map(|r| Line::from(format!("• {r}"))));
            lines
        }
        DetailTab::Projects => PROJECTS
            .iter()
            .map(|p| {
                let filled = usize::from(p.completion) / 10;
                Line::from(format!(
                    "{:<28} {:<12} [{}{}] {:>3}%",
                    p.name,
                    p.status,
                    "#".repeat(filled),
                    " ".repeat(10 - filled),
                    p.completion
                ))
            })
            .collect(),
        DetailTab::Feedback => FEEDBACK
            .iter()
            .flat_map(|fb| {
                [
                    Line::from(Span::styled(
                        format!("{} ({}) - {}", fb.from, fb.role, fb.date),
                        Style::default().fg(Color::Yellow),
                    )),
                    Line::from(format!("  {}", fb.content)),
                ]
            })
            .collect(),
    };
    let first_name = &profile.employee.first_name;
    let title = match app.detail_tab {
        DetailTab::Overview => {
            format!("Summary of {first_name}'s performance and responsibilities")
        }
        DetailTab::Projects => format!("Projects {first_name} is currently working on"),
        DetailTab::Feedback => "Recent feedback from managers and peers".to_string(),
    };
    f.render_widget(
        Paragraph::new(body)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false }),
        rows[2],
    );
}

fn render_profile_card(f: &mut Frame, profile: &EmployeeProfile, bookmarked: bool, area: Rect) {
    let employee = &profile.employee;
    let marker = if bookmarked { "◆ Bookmarked" } else { "◇ Not bookmarked" };
    let lines = vec![
        Line::from(Span::styled(
            employee.full_name(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw(format!("{} | ", employee.department)),
            Span::styled(
                stars(employee.rating),
                Style::default().fg(rating_color(employee.rating)),
            ),
            Span::raw(format!(" | {marker}")),
        ]),
        Line::from(format!("Email:   {}", employee.email)),
        Line::from(format!("Phone:   {}", profile.phone)),
        Line::from(format!("Address: {}", profile.address)),
        Line::from(format!("Age:     {}", employee.age)),
        Line::from(format!("Image:   {}", profile.image)),
        Line::from(""),
        Line::from(profile.bio),
    ];
    f.render_widget(
        Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Employee Profile"))
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn render_history(f: &mut Frame, profile: &EmployeeProfile, area: Rect) {
    let items: Vec<ListItem> = profile
        .history
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{}  ", entry.year)),
                Span::styled(
                    stars(entry.rating),
                    Style::default().fg(rating_color(entry.rating)),
                ),
                Span::raw(format!("  {}", entry.review)),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(items)
            .block(Block::default().borders(Borders::ALL).title("Performance Overview")),
        area,
    );
}

fn render_bookmarks(f: &mut Frame, app: &App, area: Rect) {
    let bookmarks = &app.store.state().bookmarked_users;
    let title = format!("Bookmarked Employees ({} Bookmarks)", bookmarks.len());
    if bookmarks.is_empty() {
        centered_message(
            f,
            area,
            &title,
            "No bookmarked employees.\n\nYou haven't bookmarked any employees yet. \
             Press 1 to go to the dashboard and b to bookmark."
                .to_string(),
            Style::default().fg(Color::DarkGray),
        );
        return;
    }

    let header = Row::new(vec!["Name", "Department", "Rating", "Email", "Age"])
        .style(Style::default().fg(Color::Yellow));
    let rows: Vec<Row> = bookmarks
        .iter()
        .map(|user| {
            Row::new(vec![
                Cell::from(user.full_name()),
                Cell::from(user.department.name()),
                Cell::from(stars(user.rating))
                    .style(Style::default().fg(rating_color(user.rating))),
                Cell::from(user.email.clone()),
                Cell::from(user.age.to_string()),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(22),
        Constraint::Length(12),
        Constraint::Length(6),
        Constraint::Min(20),
        Constraint::Length(4),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .column_spacing(1);

    let mut state = TableState::default();
    state.select(Some(app.bookmark_cursor));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_analytics(f: &mut Frame, app: &App, area: Rect) {
    let report: &AnalyticsReport = match &app.analytics {
        Remote::Ready(report) => report,
        Remote::Failed(err) => {
            let style = Style::default().fg(Color::Red);
            centered_message(f, area, "Analytics", error_text(err), style);
            return;
        }
        Remote::Idle | Remote::Loading => {
            let text = "Loading analytics...".to_string();
            centered_message(f, area, "Analytics", text, Style::default());
            return;
        }
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Percentage(50),
            Constraint::Min(0),
        ])
        .split(area);

    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(chunks[0]);
    for (card, slot) in SUMMARY_CARDS.iter().zip(cards.iter()) {
        render_summary_card(f, card, *slot);
    }

    let departments = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    // Bar heights are integers, so ratings are drawn in tenths.
    let ratings: Vec<(&str, u64)> = report
        .department_ratings
        .iter()
        .map(|r| (r.department.name(), (r.avg_rating * 10.0).round() as u64))
        .collect();
    let counts: Vec<(&str, u64)> = report
        .department_ratings
        .iter()
        .map(|r| (r.department.name(), u64::from(r.employee_count)))
        .collect();
    f.render_widget(
        BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Average Rating (x10)"))
            .data(ratings.as_slice())
            .bar_width(5)
            .bar_gap(1)
            .max(50)
            .bar_style(Style::default().fg(Color::Cyan))
            .value_style(Style::default().fg(Color::Black).bg(Color::Cyan)),
        departments[0],
    );
    f.render_widget(
        BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Employee Count"))
            .data(counts.as_slice())
            .bar_width(5)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Yellow))
            .value_style(Style::default().fg(Color::Black).bg(Color::Yellow)),
        departments[1],
    );

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    let bookmarks: Vec<(&str, u64)> = report
        .bookmark_trends
        .iter()
        .map(|t| (t.month.as_str(), u64::from(t.bookmarks)))
        .collect();
    let promotions: Vec<(&str, u64)> = report
        .bookmark_trends
        .iter()
        .map(|t| (t.month.as_str(), u64::from(t.promotions)))
        .collect();
    f.render_widget(
        BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Bookmarks per Month"))
            .data(bookmarks.as_slice())
            .bar_width(5)
            .bar_style(Style::default().fg(Color::Green)),
        halves[0],
    );
    f.render_widget(
        BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Promotions per Month"))
            .data(promotions.as_slice())
            .bar_width(5)
            .bar_style(Style::default().fg(Color::Magenta)),
        halves[1],
    );
}

fn render_summary_card(f: &mut Frame, card: &SummaryCard, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            card.value,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(card.change, Style::default().fg(Color::DarkGray))),
        Line::from(card.description),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(card.title)),
        area,
    );
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                match app.screen {
                    Screen::Employees => "/: search | f: filter | c: clear | Enter: profile | b: bookmark | p: promote | r: reload | ?: help | q: quit".to_string(),
                    Screen::Detail => "Tab/←→: tabs | b: bookmark | p: promote | r: retry | Esc: back | q: quit".to_string(),
                    Screen::Bookmarks => "Enter: profile | p: promote | a: assign project | d: remove | ?: help | q: quit".to_string(),
                    Screen::Analytics => "r: regenerate | 1/2/3: switch view | q: quit".to_string(),
                }
            }
        }
        AppMode::Search => {
            format!("Search: {} (Enter to apply, Esc to clear)", app.search_input)
        }
        AppMode::Filter => {
            "↑↓/jk: move | Space: toggle | Enter: apply | c: clear | Esc: cancel".to_string()
        }
        AppMode::Help => {
            "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string()
        }
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal if app.status_message.is_some() => {
                Style::default().fg(Color::Green)
            }
            AppMode::Normal => Style::default(),
            AppMode::Search => Style::default().fg(Color::Green),
            AppMode::Filter => Style::default().fg(Color::Yellow),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(input, area);
}

fn popup_area(area: Rect, width_pct: u16, height_pct: u16) -> Rect {
    let width = area.width * width_pct / 100;
    let height = area.height * height_pct / 100;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Checkbox label for an editor row.
pub fn filter_label(draft: &FilterDraft, entry: FilterEntry) -> String {
    let mark = if draft.is_selected(entry) { "[x]" } else { "[ ]" };
    match entry {
        FilterEntry::Department(dept) => format!("{mark} {dept}"),
        FilterEntry::Rating(rating) if rating.value() == 1 => format!("{mark} 1 Star"),
        FilterEntry::Rating(rating) => format!("{mark} {rating} Stars"),
    }
}

fn render_filter_popup(f: &mut Frame, draft: &FilterDraft) {
    let area = popup_area(f.area(), 40, 70);
    f.render_widget(Clear, area);

    let department_count = crate::domain::Department::ALL.len();
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let items: Vec<ListItem> = FilterDraft::entries()
        .into_iter()
        .enumerate()
        .flat_map(|(i, entry)| {
            let mut items = Vec::new();
            if i == 0 {
                items.push(ListItem::new(Span::styled("Department", heading)));
            }
            if i == department_count {
                items.push(ListItem::new(Span::styled("Rating", heading)));
            }
            items.push(ListItem::new(format!("  {}", filter_label(draft, entry))));
            items
        })
        .collect();

    // Section headings shift the list positions.
    let selected = if draft.cursor < department_count {
        draft.cursor + 1
    } else {
        draft.cursor + 2
    };
    let mut state = ListState::default();
    state.select(Some(selected));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Filters"))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(format!("hrdash Help (Line {}/{})", start_line + 1, help_lines.len()))
            .style(Style::default().fg(Color::Cyan)))
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> &'static str {
    r#"HRDASH KEY REFERENCE

=== VIEWS ===
1               Employee dashboard (reloads the list)
2               Bookmarked employees
3               Analytics (figures are generated, not real)
Tab             Cycle views (tabs on the profile screen)

=== EMPLOYEE DASHBOARD ===
↑↓ or j/k       Move selection
Enter           Open employee profile
b               Bookmark / remove bookmark
p               Promote
/               Search by name, email, or department
                Results update shortly after you stop typing
                Enter applies now, Esc clears the search
f               Open filters (department, rating)
c               Clear all filters
r               Reload employees

=== FILTERS ===
↑↓ or j/k       Move between options
Space           Toggle option
Enter           Apply selection
c               Clear all filters
Esc             Discard changes
                Options in one group match any selected value;
                department and rating groups must both match

=== EMPLOYEE PROFILE ===
←→ or h/l       Switch between Overview, Projects, Feedback
b               Bookmark / remove bookmark
p               Promote
r               Retry loading
Esc             Back

=== BOOKMARKS ===
↑↓ or j/k       Move selection
Enter           Open profile
p               Promote
a               Assign project
d or Delete     Remove bookmark

=== GENERAL ===
F1 or ?         Show this help
q or Ctrl+C     Quit

Note: departments and ratings are assigned at random each time
employees are loaded; bookmarks keep the values they were saved with.
Bookmarks last until the dashboard exits."#
}
