use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use super::app::{Focus, InputMode, MessageType, StatusMessage};
use super::layout::AppLayout;
use super::timestamps::{format_full, format_timestamp};
use crate::models::Conversation;
use crate::utils::{format_path_with_tilde, sanitize_for_display};
use crate::viewer::Viewer;

const MUTED: Color = Color::Rgb(113, 113, 122);
const BRIGHT: Color = Color::Rgb(250, 250, 250);
const ACCENT: Color = Color::Rgb(16, 185, 129);
const ERROR: Color = Color::Rgb(239, 68, 68);
const BAR_BG: Color = Color::Rgb(24, 24, 27);

/// Borrowed snapshot of everything a frame needs
pub struct RenderState<'a> {
    pub viewer: &'a Viewer,
    pub selected_idx: usize,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub search_input: &'a str,
    pub keyword_input: &'a str,
    pub thread_scroll: u16,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_query_bar(frame, layout.query_area, state);
    render_conversation_list(frame, layout.list_area, state);
    render_thread(
        frame,
        layout.thread_area,
        state.viewer.select_conversation(state.selected_idx).ok(),
        state.thread_scroll,
        state.focus == Focus::Thread,
    );
    render_status_bar(frame, layout.status_area, state);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let border = if focused { ACCENT } else { MUTED };
    Block::default().borders(Borders::ALL).border_style(Style::default().fg(border)).title(title)
}

fn render_query_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let query = state.viewer.query();

    let (title, prompt, input) = match state.input_mode {
        InputMode::Search => (" Search ", "> ", state.search_input),
        InputMode::Keyword => (" Add keyword (Enter: add, Esc: cancel) ", "+ ", state.keyword_input),
    };

    let mut spans = vec![
        Span::styled(prompt, Style::default().fg(ACCENT)),
        Span::styled(sanitize_for_display(input), Style::default().fg(BRIGHT)),
    ];

    if !query.keywords.is_empty() {
        spans.push(Span::raw("   "));
        for keyword in query.keywords.iter() {
            spans.push(Span::styled(
                format!("[{}]", sanitize_for_display(keyword)),
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" "));
        }
    }

    spans.push(Span::styled(format!("  sort: {}", query.sort), Style::default().fg(MUTED)));

    let paragraph = Paragraph::new(Line::from(spans)).block(pane_block(title.to_string(), true));
    frame.render_widget(paragraph, area);
}

fn render_conversation_list(frame: &mut Frame, area: Rect, state: &RenderState) {
    let viewer = state.viewer;

    let items: Vec<ListItem> = viewer
        .view_conversations()
        .map(|conversation| {
            let timestamp = format_timestamp(conversation.create_time.as_ref());
            let title = sanitize_for_display(&conversation.title);
            ListItem::new(Line::from(vec![
                Span::raw(title),
                Span::styled(format!("  {}", timestamp), Style::default().fg(MUTED)),
            ]))
        })
        .collect();

    let title = format!(
        " Conversations ({}/{}) ",
        viewer.view_len(),
        viewer.archive().len()
    );

    let list = List::new(items)
        .block(pane_block(title, state.focus == Focus::List))
        .highlight_style(Style::default().fg(BRIGHT).bg(ACCENT).add_modifier(Modifier::BOLD));

    // The list widget keeps the highlighted row visible when it scrolls past the pane
    let mut list_state = ListState::default()
        .with_selected((viewer.view_len() > 0).then_some(state.selected_idx));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn role_style(role: &str) -> Style {
    let color = match role {
        "user" => Color::Rgb(96, 165, 250),
        "assistant" => ACCENT,
        "system" | "tool" => Color::Rgb(234, 179, 8),
        _ => MUTED,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn thread_text(conversation: &Conversation) -> Text<'static> {
    let label = |s: &'static str| Span::styled(s, Style::default().fg(MUTED));

    let mut lines = vec![
        Line::from(Span::styled(
            sanitize_for_display(&conversation.title),
            Style::default().fg(BRIGHT).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            label("Created: "),
            Span::raw(format_full(conversation.create_time.as_ref())),
            label("  Updated: "),
            Span::raw(format_full(conversation.update_time.as_ref())),
        ]),
        Line::from(""),
    ];

    if conversation.thread.is_empty() {
        lines.push(Line::from(Span::styled("(no messages)", Style::default().fg(MUTED))));
        return Text::from(lines);
    }

    for message in &conversation.thread {
        lines.push(Line::from(Span::styled(
            format!("{}:", sanitize_for_display(&message.role).to_uppercase()),
            role_style(&message.role),
        )));
        for line in sanitize_for_display(&message.content).lines() {
            lines.push(Line::from(line.to_string()));
        }
        lines.push(Line::from(""));
    }

    Text::from(lines)
}

fn render_thread(
    frame: &mut Frame,
    area: Rect,
    conversation: Option<&Conversation>,
    scroll: u16,
    focused: bool,
) {
    let content = match conversation {
        Some(conversation) => thread_text(conversation),
        None => Text::from("No conversation selected"),
    };

    let paragraph = Paragraph::new(content)
        .block(pane_block(" Thread ".to_string(), focused))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, state: &RenderState) {
    let (status_text, style) = match state.status_message {
        Some(msg) => {
            let fg = match msg.message_type {
                MessageType::Success => ACCENT,
                MessageType::Error => ERROR,
            };
            (format!(" {} ", msg.text), Style::default().fg(fg).bg(BAR_BG))
        }
        None => {
            let viewer = state.viewer;
            let mut parts = vec![format_path_with_tilde(viewer.archive_path())];

            if viewer.view_len() == 0 {
                parts.push("No conversations".to_string());
            } else {
                parts.push(format!("{}/{}", state.selected_idx + 1, viewer.view_len()));
            }

            let report = viewer.report();
            if !report.is_clean() {
                parts.push(format!("{} defects", report.defects.len()));
            }

            parts.push(
                "Tab: focus | Ctrl+K: keyword | Ctrl+S: sort | Ctrl+R: reload | Ctrl+Y: copy | Esc: clear/quit"
                    .to_string(),
            );

            (format!(" {} ", parts.join(" | ")), Style::default().fg(BRIGHT).bg(BAR_BG))
        }
    };

    frame.render_widget(Paragraph::new(status_text).style(style), area);
}
