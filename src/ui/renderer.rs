use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::core::analysis::AnalysisResult;
use crate::core::app::{App, Screen};
use crate::core::config::data::path_display;
use crate::core::config::{Config, ConfigField};
use crate::ui::text_field::InputFields;
use crate::ui::theme::{score_label, Theme};

const LOGO: [&str; 3] = ["◯─◯─◯", "◯ ◎ ◯", "◯─◯─◯"];
const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SCORE_BAR_WIDTH: usize = 30;
const MASKED_PREVIEW_MAX: usize = 20;

pub fn ui(f: &mut Frame, app: &App, fields: &InputFields, theme: &Theme) {
    match app.screen() {
        Screen::Main => draw_main(f, app, fields, theme),
        Screen::Settings => draw_settings(f, app, fields, theme),
        Screen::Exiting => draw_exiting(f, theme),
    }
}

/// Textual progress bar: `floor(score * width)` filled cells, the rest empty.
pub fn format_score_bar(score: f64, width: usize) -> String {
    let filled = filled_cells(score, width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn filled_cells(score: f64, width: usize) -> usize {
    ((score.clamp(0.0, 1.0) * width as f64).floor() as usize).min(width)
}

fn draw_main(f: &mut Frame, app: &App, fields: &InputFields, theme: &Theme) {
    let notice = if app.config_required() {
        config_notice_lines(theme)
    } else {
        Vec::new()
    };
    let palette = palette_lines(app, theme);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(LOGO.len() as u16),
            Constraint::Length(1),
            Constraint::Length(notice.len() as u16),
            Constraint::Length(3),
            Constraint::Length(palette.len() as u16),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(padded(f.area()));

    draw_header(f, chunks[0], app, theme);
    f.render_widget(Paragraph::new(notice), chunks[2]);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(if app.is_analyzing() {
            theme.input_border_style
        } else {
            theme.input_focused_border_style
        })
        .title(Span::styled(" Prompt ", theme.label_style));
    let input_inner = input_block.inner(chunks[3]);
    f.render_widget(input_block, chunks[3]);
    f.render_widget(fields.prompt.textarea(), input_inner);

    f.render_widget(Paragraph::new(palette), chunks[4]);

    let body = Paragraph::new(body_lines(app, theme)).wrap(Wrap { trim: false });
    f.render_widget(body, chunks[5]);

    let hint = Line::from(Span::styled(
        "Enter to analyze • / for commands • Ctrl+C to exit",
        theme.hint_style,
    ));
    f.render_widget(Paragraph::new(hint), chunks[6]);
}

fn draw_header(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(7), Constraint::Min(0)])
        .split(area);

    let logo: Vec<Line> = LOGO
        .iter()
        .map(|row| Line::from(Span::styled(*row, theme.logo_style)))
        .collect();
    f.render_widget(Paragraph::new(logo), columns[0]);

    let title = vec![
        Line::from(Span::styled("MAHORAGA", theme.title_style)),
        Line::from(Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            theme.subtitle_style,
        )),
        Line::from(Span::styled(
            app.provider_kind().display_name(),
            theme.subtitle_style,
        )),
    ];
    f.render_widget(Paragraph::new(title), columns[1]);
}

fn config_notice_lines(theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled("Configuration Required", theme.error_style)),
        Line::from(Span::styled(
            "To use Mahoraga, you need to configure your API settings.",
            theme.text_style,
        )),
        Line::from(vec![
            Span::styled("Run ", theme.text_style),
            Span::styled("/settings", theme.heading_style),
            Span::styled(" to configure:", theme.text_style),
        ]),
    ];
    for field in ConfigField::ALL {
        lines.push(Line::from(vec![
            Span::styled("  - ", theme.hint_style),
            Span::styled(field.label(), theme.text_style),
        ]));
    }
    lines.push(Line::default());
    lines
}

fn palette_lines(app: &App, theme: &Theme) -> Vec<Line<'static>> {
    let selected = app.palette().selected_index();
    app.palette_commands()
        .iter()
        .enumerate()
        .map(|(index, command)| {
            let (marker, style) = if index == selected {
                ("› ", theme.palette_selected_style)
            } else {
                ("  ", theme.palette_item_style)
            };
            Line::from(vec![
                Span::styled(format!("{marker}{:<18}", command.name), style),
                Span::styled(command.help, theme.palette_help_style),
            ])
        })
        .collect()
}

/// Status and result lines under the prompt.
pub(crate) fn body_lines(app: &App, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::default()];

    if app.is_analyzing() {
        let frame = SPINNER_FRAMES[app.spinner_frame() % SPINNER_FRAMES.len()];
        lines.push(Line::from(vec![
            Span::styled(format!("{frame} "), theme.indicator_style),
            Span::styled(format!("{}...", app.analyzing_verb()), theme.text_style),
        ]));
        lines.push(Line::default());
    }

    if let Some(error) = app.last_error() {
        lines.push(Line::from(Span::styled(
            format!("Error: {error}"),
            theme.error_style,
        )));
        lines.push(Line::default());
    }

    if let Some(result) = app.last_result() {
        lines.extend(result_lines(result, theme));
    }

    lines
}

fn result_lines(result: &AnalysisResult, theme: &Theme) -> Vec<Line<'static>> {
    let percent = result.percent();
    let score_style = theme.score_style(percent);
    let filled = filled_cells(result.score, SCORE_BAR_WIDTH);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Score: ", theme.text_style),
            Span::styled(format!("{percent}%"), score_style),
            Span::styled(format!(" {}", score_label(percent)), score_style),
        ]),
        Line::from(vec![
            Span::styled("█".repeat(filled), score_style),
            Span::styled("░".repeat(SCORE_BAR_WIDTH - filled), theme.bar_empty_style),
        ]),
        Line::default(),
    ];

    lines.extend(feedback_section(
        "Areas to Improve:",
        &result.improvements,
        theme,
    ));
    lines.push(Line::default());
    lines.extend(feedback_section(
        "Unclear Parts:",
        &result.unclear_parts,
        theme,
    ));

    if result.improvements.is_empty() && result.unclear_parts.is_empty() {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "Your prompt is clear and well-structured!",
            theme.success_style,
        )));
    }
    lines
}

fn feedback_section(title: &str, items: &[String], theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        title.to_string(),
        theme.heading_style,
    ))];
    if items.is_empty() {
        lines.push(Line::from(Span::styled("  none", theme.hint_style)));
    }
    for item in items {
        lines.push(Line::from(vec![
            Span::styled("  • ", theme.hint_style),
            Span::styled(item.clone(), theme.text_style),
        ]));
    }
    lines
}

fn draw_settings(f: &mut Frame, app: &App, fields: &InputFields, theme: &Theme) {
    let rows = ConfigField::ALL.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(LOGO.len() as u16),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Length(rows * 3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(padded(f.area()));

    draw_header(f, chunks[0], app, theme);

    let title = vec![
        Line::from(Span::styled("Settings", theme.heading_style)),
        Line::from(Span::styled(
            "Configure your Azure OpenAI connection",
            theme.subtitle_style,
        )),
    ];
    f.render_widget(Paragraph::new(title), chunks[2]);

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(ConfigField::ALL.map(|_| Constraint::Length(3)))
        .split(chunks[3]);

    let editor = app.settings();
    for (field, area) in ConfigField::ALL.into_iter().zip(row_areas.iter()) {
        let focused = field == editor.focus();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(if focused {
                theme.input_focused_border_style
            } else {
                theme.input_border_style
            })
            .title(Span::styled(
                format!(" {} ", field.label()),
                if focused {
                    theme.focused_label_style
                } else {
                    theme.label_style
                },
            ));
        let inner = block.inner(*area);
        f.render_widget(block, *area);

        if focused {
            f.render_widget(fields.setting.textarea(), inner);
        } else {
            f.render_widget(Paragraph::new(setting_preview(editor.draft(), field, theme)), inner);
        }
    }

    let footer = vec![
        Line::from(Span::styled(
            "Tab next field • Enter next / save on last field • Esc cancel",
            theme.hint_style,
        )),
        Line::from(Span::styled(
            format!("Saved to {}", path_display(app.config_store().path())),
            theme.hint_style,
        )),
    ];
    f.render_widget(Paragraph::new(footer), chunks[5]);
}

/// How an unfocused settings value is shown.
pub(crate) fn setting_preview(draft: &Config, field: ConfigField, theme: &Theme) -> Line<'static> {
    let value = draft.get(field);
    if value.is_empty() {
        return Line::from(Span::styled(field.placeholder(), theme.placeholder_style));
    }
    if field.is_secret() {
        let masked = "*".repeat(value.chars().count().min(MASKED_PREVIEW_MAX));
        return Line::from(Span::styled(masked, theme.input_text_style));
    }
    Line::from(Span::styled(value.to_string(), theme.input_text_style))
}

fn draw_exiting(f: &mut Frame, theme: &Theme) {
    let line = Line::from(Span::styled("disintegrated", theme.subtitle_style));
    f.render_widget(Paragraph::new(line), padded(f.area()));
}

fn padded(area: Rect) -> Rect {
    Block::default().padding(Padding::uniform(1)).inner(area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::app::{apply_action, AppAction};
    use crate::utils::test_utils::{create_configured_test_app, create_test_app, sample_result};
    use ratatui::{backend::TestBackend, Terminal};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    fn render_to_string(app: &App) -> String {
        let theme = Theme::mahoraga();
        let fields = InputFields::new(&theme);
        let mut terminal = Terminal::new(TestBackend::new(80, 40)).expect("terminal");
        terminal
            .draw(|f| ui(f, app, &fields, &theme))
            .expect("draw");
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn score_bar_rounds_down() {
        assert_eq!(format_score_bar(0.0, 10), "░░░░░░░░░░");
        assert_eq!(format_score_bar(1.0, 10), "██████████");
        assert_eq!(format_score_bar(0.72, 10), "███████░░░");
        assert_eq!(format_score_bar(0.99, 4), "███░");
        assert_eq!(format_score_bar(0.5, 0), "");
    }

    #[test]
    fn score_bar_clamps_out_of_range_scores() {
        assert_eq!(format_score_bar(1.7, 5), "█████");
        assert_eq!(format_score_bar(-0.2, 5), "░░░░░");
    }

    #[test]
    fn result_lines_show_percent_label_and_feedback() {
        let theme = Theme::mahoraga();
        let result = AnalysisResult {
            score: 0.72,
            improvements: vec!["Name the output format".to_string()],
            unclear_parts: Vec::new(),
        };
        let text: Vec<String> = result_lines(&result, &theme).iter().map(line_text).collect();

        assert_eq!(text[0], "Score: 72% Good");
        assert!(text.contains(&"  • Name the output format".to_string()));
        let unclear = text
            .iter()
            .position(|line| line == "Unclear Parts:")
            .expect("unclear heading");
        assert_eq!(text[unclear + 1], "  none");
        assert!(!text.iter().any(|line| line.contains("well-structured")));
    }

    #[test]
    fn perfect_prompt_gets_praise() {
        let theme = Theme::mahoraga();
        let text: Vec<String> = result_lines(&sample_result(0.95), &theme)
            .iter()
            .map(line_text)
            .collect();
        assert_eq!(text[0], "Score: 95% Excellent");
        assert!(text.iter().any(|line| line.contains("well-structured")));
    }

    #[test]
    fn api_key_preview_is_masked_and_capped() {
        let theme = Theme::mahoraga();
        let config = Config {
            api_key: "k".repeat(64),
            ..Config::default()
        };
        let preview = line_text(&setting_preview(&config, ConfigField::ApiKey, &theme));
        assert_eq!(preview, "*".repeat(MASKED_PREVIEW_MAX));

        let short = Config {
            api_key: "abc".to_string(),
            ..Config::default()
        };
        assert_eq!(
            line_text(&setting_preview(&short, ConfigField::ApiKey, &theme)),
            "***"
        );
    }

    #[test]
    fn empty_setting_shows_placeholder() {
        let theme = Theme::mahoraga();
        let preview = line_text(&setting_preview(
            &Config::default(),
            ConfigField::Deployment,
            &theme,
        ));
        assert_eq!(preview, ConfigField::Deployment.placeholder());
    }

    #[test]
    fn main_screen_shows_notice_and_palette() {
        let (mut app, _dir) = create_test_app();
        apply_action(
            &mut app,
            AppAction::SubmitInput {
                value: "hello".to_string(),
            },
        );
        let screen = render_to_string(&app);
        assert!(screen.contains("MAHORAGA"));
        assert!(screen.contains("Configuration Required"));

        apply_action(
            &mut app,
            AppAction::InputChanged {
                value: "/".to_string(),
            },
        );
        let screen = render_to_string(&app);
        assert!(!screen.contains("Configuration Required"));
        assert!(screen.contains("/settings"));
        assert!(screen.contains("Exit the application"));
    }

    #[test]
    fn analyzing_line_uses_chosen_verb() {
        let (mut app, _dir) = create_configured_test_app();
        apply_action(
            &mut app,
            AppAction::SubmitInput {
                value: "Rate me".to_string(),
            },
        );
        let theme = Theme::mahoraga();
        let text: Vec<String> = body_lines(&app, &theme).iter().map(line_text).collect();
        let expected = format!("{} {}...", SPINNER_FRAMES[0], app.analyzing_verb());
        assert!(text.contains(&expected), "{text:?}");
    }

    #[test]
    fn error_is_rendered_in_body() {
        let (mut app, _dir) = create_configured_test_app();
        apply_action(
            &mut app,
            AppAction::SubmitInput {
                value: "Rate me".to_string(),
            },
        );
        apply_action(
            &mut app,
            AppAction::AnalysisCompleted {
                token: 1,
                result: Err("No response content from the API".to_string()),
            },
        );
        let theme = Theme::mahoraga();
        let text: Vec<String> = body_lines(&app, &theme).iter().map(line_text).collect();
        assert!(text.contains(&"Error: No response content from the API".to_string()));
    }

    #[test]
    fn settings_screen_lists_every_field() {
        let (mut app, _dir) = create_test_app();
        apply_action(
            &mut app,
            AppAction::SubmitInput {
                value: "/settings".to_string(),
            },
        );
        let screen = render_to_string(&app);
        for field in ConfigField::ALL {
            assert!(screen.contains(field.label()), "missing {}", field.label());
        }
        assert!(screen.contains("Esc cancel"));
    }

    #[test]
    fn exiting_screen_says_goodbye() {
        let (mut app, _dir) = create_test_app();
        apply_action(
            &mut app,
            AppAction::SubmitInput {
                value: "/exit".to_string(),
            },
        );
        let screen = render_to_string(&app);
        assert!(screen.contains("disintegrated"));
        assert!(!screen.contains("MAHORAGA"));
    }
}
