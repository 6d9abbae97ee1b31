use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};
use cloudai_core::{ChatRole, Theme, SUGGESTED_QUERIES, TEMPLATES};
use crate::app::{App, FocusPane};

const CHAT_TITLE: &str = " Cloud Automation Assistant ";
const CHAT_DESCRIPTION: &str = "Ask me anything about cloud infrastructure, deployments, and optimization";
const INPUT_PLACEHOLDER: &str = "Type your message...";

/// Colors for one theme
struct Palette {
    text: Color,
    muted: Color,
    accent: Color,
    user: Color,
    border: Color,
    header_bg: Color,
    highlight_fg: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                text: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                user: Color::LightBlue,
                border: Color::DarkGray,
                header_bg: Color::DarkGray,
                highlight_fg: Color::Black,
            },
            Theme::Light => Self {
                text: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                user: Color::Magenta,
                border: Color::Gray,
                header_bg: Color::Gray,
                highlight_fg: Color::White,
            },
        }
    }

    fn border_for(&self, focused: bool) -> Style {
        Style::default().fg(if focused { self.accent } else { self.border })
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();
    let palette = Palette::for_theme(app.theme);

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    // Chat takes three of four columns, picklists the last one
    let [main_area, side_area] = Layout::horizontal([
        Constraint::Percentage(75),
        Constraint::Percentage(25),
    ])
    .areas(body_area);

    render_header(app, &palette, frame, header_area);
    render_chat(app, &palette, frame, main_area);
    render_side_panels(app, &palette, frame, side_area);
    render_footer(app, frame, footer_area);

    if app.toast.is_some() {
        render_toast(app, &palette, frame, body_area);
    }
}

fn render_header(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" AI Assistant ", Style::default().fg(palette.accent).bold()),
        Span::styled(
            format!("[{}] ", app.theme.display_name()),
            Style::default().fg(palette.text),
        ),
        Span::styled("h: View History ", Style::default().fg(palette.text)),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(palette.text),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(palette.header_bg));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let (mode_text, mode_style) = match app.focus {
        FocusPane::Input => (" INPUT ", Style::default().bg(Color::Yellow).fg(Color::Black)),
        FocusPane::Chat => (" CHAT ", Style::default().bg(Color::Blue).fg(Color::White)),
        FocusPane::QuickActions => (" ACTIONS ", Style::default().bg(Color::Blue).fg(Color::White)),
        FocusPane::Templates => (" TEMPLATES ", Style::default().bg(Color::Blue).fg(Color::White)),
    };

    let mut hints = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];
    let pairs: &[(&str, &str)] = match app.focus {
        FocusPane::Input => &[(" Enter ", " send "), (" Esc ", " leave input ")],
        FocusPane::Chat => &[(" j/k ", " scroll "), (" g/G ", " top/bottom ")],
        FocusPane::QuickActions => &[(" j/k ", " nav "), (" Enter ", " use suggestion ")],
        FocusPane::Templates => &[(" j/k ", " nav "), (" Enter ", " use template ")],
    };
    for (key, label) in pairs {
        hints.push(Span::styled(*key, key_style));
        hints.push(Span::styled(*label, label_style));
    }
    hints.extend(vec![
        Span::styled(" Tab ", key_style),
        Span::styled(" focus ", label_style),
    ]);
    if app.focus != FocusPane::Input {
        hints.extend(vec![
            Span::styled(" h ", key_style),
            Span::styled(" history ", label_style),
            Span::styled(" t ", key_style),
            Span::styled(" theme ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ]);
    }

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}

/// Build the transcript, typing indicator included.
fn chat_text(app: &App, palette: &Palette) -> Text<'static> {
    let mut lines: Vec<Line> = Vec::new();

    for msg in app.session.messages() {
        match msg.role {
            ChatRole::User => {
                lines.push(
                    Line::from(Span::styled(
                        "You",
                        Style::default().fg(palette.user).add_modifier(Modifier::BOLD),
                    ))
                    .alignment(Alignment::Right),
                );
                for line in msg.content.lines() {
                    lines.push(
                        Line::from(Span::styled(line.to_string(), Style::default().fg(palette.user)))
                            .alignment(Alignment::Right),
                    );
                }
            }
            ChatRole::System => {
                lines.push(Line::from(Span::styled(
                    "CloudAI",
                    Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
                )));
                for line in msg.content.lines() {
                    lines.push(Line::from(Span::styled(
                        line.to_string(),
                        Style::default().fg(palette.text),
                    )));
                }
            }
        }
        lines.push(Line::default());
    }

    if app.is_composing() {
        lines.push(Line::from(Span::styled(
            "CloudAI",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(typing_dots(app.animation_frame, palette)));
    }

    Text::from(lines)
}

/// Three dots with one raised, cycling with the animation frame.
fn typing_dots(frame: u8, palette: &Palette) -> Vec<Span<'static>> {
    (0..3u8)
        .map(|i| {
            let style = if i == frame % 3 {
                Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(palette.muted)
            };
            Span::styled(if i == frame % 3 { "● " } else { "• " }, style)
        })
        .collect()
}

fn render_chat(app: &mut App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let [chat_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(area);

    app.chat_area = Some(chat_area);
    app.input_area = Some(input_area);

    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_for(app.focus == FocusPane::Chat))
        .title(Span::styled(CHAT_TITLE, Style::default().fg(palette.text).bold()));
    let inner = chat_block.inner(chat_area);
    frame.render_widget(chat_block, chat_area);

    let [description_area, messages_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
    ])
    .areas(inner);

    let description = Paragraph::new(Span::styled(
        CHAT_DESCRIPTION,
        Style::default().fg(palette.muted),
    ));
    frame.render_widget(description, description_area);

    let messages = Paragraph::new(chat_text(app, palette)).wrap(Wrap { trim: false });

    // Resolve scroll against the real wrapped height
    app.chat_height = messages_area.height;
    app.chat_total_lines = messages.line_count(messages_area.width).min(u16::MAX as usize) as u16;
    if app.follow_chat {
        app.chat_scroll = app.max_chat_scroll();
    } else {
        app.chat_scroll = app.chat_scroll.min(app.max_chat_scroll());
    }

    frame.render_widget(messages.scroll((app.chat_scroll, 0)), messages_area);

    render_input(app, palette, frame, input_area);
}

fn render_input(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Input;

    // Send is disabled while blank or while a reply is pending
    let send_style = if app.session.can_submit() {
        Style::default().fg(palette.accent).bold()
    } else {
        Style::default().fg(palette.muted)
    };
    let send_hint = Line::from(Span::styled(" Send ⏎ ", send_style)).alignment(Alignment::Right);

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border_for(focused))
        .title(" Message ")
        .title(send_hint);

    // Calculate visible portion of input with horizontal scrolling
    // Inner width = total width - 2 (for borders)
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.input_cursor;

    // Calculate scroll offset to keep cursor visible
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let input = if app.session.input().is_empty() {
        Paragraph::new(Span::styled(INPUT_PLACEHOLDER, Style::default().fg(palette.muted)))
    } else {
        let visible_text: String = app
            .session
            .input()
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        Paragraph::new(visible_text).style(Style::default().fg(palette.text))
    };

    frame.render_widget(input.block(input_block), area);

    if focused {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_side_panels(app: &mut App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let queries_height = (SUGGESTED_QUERIES.len() + 2) as u16; // +2 for borders
    let [queries_area, templates_area] = Layout::vertical([
        Constraint::Length(queries_height),
        Constraint::Min(0),
    ])
    .areas(area);

    app.queries_area = Some(queries_area);
    app.templates_area = Some(templates_area);

    let highlight = Style::default()
        .bg(palette.accent)
        .fg(palette.highlight_fg)
        .add_modifier(Modifier::BOLD);

    // Quick actions
    let queries_focused = app.focus == FocusPane::QuickActions;
    let query_items: Vec<ListItem> = SUGGESTED_QUERIES
        .iter()
        .map(|q| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", q.icon.glyph()), Style::default().fg(palette.accent)),
                Span::styled(q.text, Style::default().fg(palette.text)),
            ]))
        })
        .collect();

    let queries = List::new(query_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border_for(queries_focused))
                .title(" Quick Actions "),
        )
        .highlight_style(if queries_focused { highlight } else { Style::default() })
        .highlight_symbol(if queries_focused { "> " } else { "  " });

    frame.render_stateful_widget(queries, queries_area, &mut app.query_state);

    // Templates: name, services, link
    let templates_focused = app.focus == FocusPane::Templates;
    let template_items: Vec<ListItem> = TEMPLATES
        .iter()
        .map(|t| {
            ListItem::new(Text::from(vec![
                Line::from(Span::styled(t.name, Style::default().fg(palette.text).bold())),
                Line::from(Span::styled(t.services, Style::default().fg(palette.muted))),
                Line::from(Span::styled("Use Template →", Style::default().fg(palette.accent))),
            ]))
        })
        .collect();

    let templates = List::new(template_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(palette.border_for(templates_focused))
                .title(" Suggested Templates "),
        )
        .highlight_style(if templates_focused { highlight } else { Style::default() })
        .highlight_symbol(if templates_focused { "> " } else { "  " });

    frame.render_stateful_widget(templates, templates_area, &mut app.template_state);
}

fn render_toast(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let Some(toast) = &app.toast else {
        return;
    };

    let width = 44.min(area.width);
    let height = 4.min(area.height);
    let toast_area = Rect {
        x: area.x + area.width - width,
        y: area.y + area.height - height,
        width,
        height,
    };

    frame.render_widget(Clear, toast_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(Span::styled(
            format!(" {} ", toast.notification.title),
            Style::default().fg(palette.accent).bold(),
        ));

    let body = Paragraph::new(toast.notification.description.as_str())
        .style(Style::default().fg(palette.text))
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(body, toast_area);
}
