use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};
use ratatui::Frame;
use summarizer_core::{AccuracyBand, AppViewModel, ResultView, SummaryView};

use super::constants::*;

pub fn render(frame: &mut Frame, view: &AppViewModel) {
    let [header, input, validation, controls, results, help] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                APP_TITLE,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::Gray))),
        ]),
        header,
    );

    render_input(frame, input, view);

    if let Some(message) = &view.url_error {
        frame.render_widget(
            Paragraph::new(Span::styled(message.as_str(), Style::default().fg(Color::Red))),
            validation,
        );
    }

    frame.render_widget(Paragraph::new(controls_line(view)), controls);

    match &view.result {
        ResultView::Hidden => {}
        ResultView::Error { message } => render_error(frame, results, message),
        ResultView::Summary(summary) => render_summary(frame, results, summary),
    }

    frame.render_widget(
        Paragraph::new(Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray))),
        help,
    );
}

fn render_input(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let border = if view.url_error.is_some() {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };
    let text = if view.url.is_empty() {
        Span::styled(INPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(view.url.as_str())
    };

    // Keep the end of the text and the cursor cell inside the box.
    let inner_width = area.width.saturating_sub(2);
    let text_width = u16::try_from(view.url.chars().count()).unwrap_or(u16::MAX);
    let offset = text_width.saturating_add(1).saturating_sub(inner_width);

    frame.render_widget(
        Paragraph::new(text)
            .scroll((0, offset))
            .block(Block::bordered().title(INPUT_TITLE).border_style(border)),
        area,
    );
    if !view.loading {
        let x = area.x + 1 + text_width.saturating_sub(offset).min(inner_width.saturating_sub(1));
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn controls_line(view: &AppViewModel) -> Line<'_> {
    let submit_style = if view.submit_enabled {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else if view.loading {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::styled(
        format!(" {} ", view.submit_label),
        submit_style,
    )];
    if view.clear_visible {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("[{CLEAR_LABEL}]"),
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

fn render_error(frame: &mut Frame, area: Rect, message: &str) {
    frame.render_widget(
        Paragraph::new(message)
            .wrap(Wrap { trim: true })
            .block(
                Block::bordered()
                    .title(ERROR_TITLE)
                    .border_style(Style::default().fg(Color::Red)),
            ),
        area,
    );
}

fn render_summary(frame: &mut Frame, area: Rect, summary: &SummaryView) {
    let [left, right] =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);
    let [points, accuracy] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(right);

    frame.render_widget(
        Paragraph::new(summary.summary.as_str())
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(section_title(
                SUMMARY_TITLE,
                &summary.copy_summary_label,
            ))),
        left,
    );

    let lines: Vec<Line> = summary
        .key_points
        .iter()
        .map(|point| Line::from(format!("• {point}")))
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::bordered().title(section_title(
                POINTS_TITLE,
                &summary.copy_points_label,
            ))),
        points,
    );

    let score_style = Style::default()
        .fg(band_color(summary.band))
        .add_modifier(Modifier::BOLD);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(summary.accuracy_score.to_string(), score_style),
            Span::raw("/100 "),
            Span::styled(format!("({})", summary.band.label()), score_style),
        ]))
        .block(Block::bordered().title(ACCURACY_TITLE)),
        accuracy,
    );
}

fn section_title(title: &str, copy_label: &str) -> String {
    format!(" {title} [{copy_label}] ")
}

fn band_color(band: AccuracyBand) -> Color {
    match band {
        AccuracyBand::High => Color::Green,
        AccuracyBand::Medium => Color::Yellow,
        AccuracyBand::Low => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;
    use summarizer_core::{update, AppState, CopyTarget, Msg, SummaryResult};

    use super::*;

    fn draw(view: &AppViewModel) -> String {
        buffer_text(draw_terminal(view).backend().buffer())
    }

    fn draw_terminal(view: &AppViewModel) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, view)).unwrap();
        terminal
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn succeeded() -> AppState {
        succeeded_with(vec!["alpha".to_string(), "beta".to_string()])
    }

    fn succeeded_with(key_points: Vec<String>) -> AppState {
        let (state, _) = update(
            AppState::new(),
            Msg::InputChanged("https://example.com/a".to_string()),
        );
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::RequestSucceeded {
                request_id: 1,
                result: SummaryResult {
                    summary: "Short summary".to_string(),
                    key_points,
                    accuracy_score: 82,
                },
            },
        );
        state
    }

    #[test]
    fn idle_screen_shows_placeholder_and_label() {
        let text = draw(&AppState::new().view());
        assert!(text.contains(APP_TITLE));
        assert!(text.contains(INPUT_PLACEHOLDER));
        assert!(text.contains("Summarize"));
        assert!(!text.contains(CLEAR_LABEL));
    }

    #[test]
    fn validation_message_is_rendered() {
        let (state, _) = update(AppState::new(), Msg::InputChanged("not a url".to_string()));
        let text = draw(&state.view());
        assert!(text.contains("Please enter a valid URL format"));
    }

    #[test]
    fn summary_cards_show_points_score_and_copy_state() {
        let (state, _) = update(
            succeeded(),
            Msg::CopyClicked {
                target: CopyTarget::Summary,
                at: std::time::Instant::now(),
            },
        );
        let text = draw(&state.view());

        assert!(text.contains("AI Summary [Copied!]"));
        assert!(text.contains("Key Points [Copy Points]"));
        assert!(text.contains("• alpha"));
        assert!(text.contains("• beta"));
        assert!(text.contains("82/100 (high)"));
        assert!(text.contains(CLEAR_LABEL));
    }

    #[test]
    fn error_box_shows_message() {
        let (state, _) = update(
            AppState::new(),
            Msg::InputChanged("https://example.com/a".to_string()),
        );
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::RequestFailed {
                request_id: 1,
                message: Some("rate limited".to_string()),
            },
        );
        let text = draw(&state.view());

        assert!(text.contains("An Error Occurred"));
        assert!(text.contains("rate limited"));
    }

    #[test]
    fn long_key_points_wrap_instead_of_being_cut() {
        let point = "The committee approved the revised budget after a lengthy debate over transit ENDMARK";
        let text = draw(&succeeded_with(vec![
            point.to_string(),
            "second point".to_string(),
        ])
        .view());

        assert!(text.contains("• The committee"));
        assert!(text.contains("ENDMARK"));
        assert!(text.contains("• second point"));
    }

    #[test]
    fn long_url_scrolls_to_keep_its_end_visible() {
        let url = format!("https://example.com/{}/ENDMARK", "segment".repeat(20));
        let (state, _) = update(AppState::new(), Msg::InputChanged(url));
        let mut terminal = draw_terminal(&state.view());

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("/ENDMARK"));
        assert!(!text.contains("https://example.com"));

        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!(cursor.y, 3);
        assert!(cursor.x < 99);
    }

    #[test]
    fn short_url_is_not_scrolled() {
        let (state, _) = update(
            AppState::new(),
            Msg::InputChanged("https://example.com/a".to_string()),
        );
        let mut terminal = draw_terminal(&state.view());

        assert!(buffer_text(terminal.backend().buffer()).contains("https://example.com/a"));
        let cursor = terminal.get_cursor_position().unwrap();
        assert_eq!((cursor.x, cursor.y), (1 + 21, 3));
    }
}
