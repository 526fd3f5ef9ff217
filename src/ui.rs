use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, List, ListItem, Paragraph, Wrap};

use crate::app::{App, BuilderFocus, BuilderState, DetailState, Focus, View};
use crate::concept::build_parts;
use crate::models::{Concept, Prompt};
use crate::parser::preview;
use crate::template::render_segments;

const ACCENT: Color = Color::Rgb(56, 189, 248);
const MUTED: Color = Color::Rgb(161, 161, 170);
const SELECTED_MARKER: &str = "▸ ";

pub(crate) fn render_app(frame: &mut Frame, app: &mut App) {
    match app.view {
        View::Library => render_library(frame, app),
        View::Detail => render_detail(frame, app),
        View::Builder => render_builder(frame, app),
        View::Error => render_error(frame, app),
    }
}

fn render_error(frame: &mut Frame, app: &mut App) {
    let message = app
        .error_message
        .clone()
        .unwrap_or_else(|| "Unknown error".to_string());
    let paragraph = Paragraph::new(format!("{message}\n\nq/Esc to quit"))
        .block(Block::bordered().title("Error"))
        .style(Style::new().fg(Color::Red))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, frame.area());
}

fn render_library(frame: &mut Frame, app: &mut App) {
    let [content_area, help_area] = split_status(frame.area());
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(content_area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(8)])
        .split(horizontal[1]);

    let roles_area = horizontal[0];
    let prompts_area = right[0];
    let card_area = right[1];
    app.roles_area = inner_rect(roles_area);
    app.prompts_area = inner_rect(prompts_area);

    let role_items: Vec<ListItem> = app.roles.iter().map(|role| ListItem::new(role.as_str())).collect();
    let roles = List::new(role_items)
        .block(focus_block("Prompt Library", app.focus == Focus::Roles))
        .highlight_style(Style::new().bg(Color::Blue).fg(Color::White))
        .highlight_symbol(SELECTED_MARKER);
    frame.render_stateful_widget(roles, roles_area, &mut app.role_state);

    let heading = app.selected_role().unwrap_or("Select a Role").to_string();
    let prompt_items: Vec<ListItem> = app
        .visible_prompts()
        .iter()
        .map(|prompt| ListItem::new(prompt.title.clone()))
        .collect();
    let prompts = List::new(prompt_items)
        .block(focus_block(&heading, app.focus == Focus::Prompts))
        .highlight_style(Style::new().bg(Color::Blue).fg(Color::White))
        .highlight_symbol(SELECTED_MARKER);
    frame.render_stateful_widget(prompts, prompts_area, &mut app.prompt_state);

    render_card(frame, app, card_area);

    let help = "Tab focus  ↑↓/j k select  Enter/double-click open  c copy  b builder  e edit  q quit";
    render_status_line(frame, app, help, help_area);
}

fn render_card(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::bordered().title("Preview");
    let prompt = match app.selected_prompt() {
        Some(prompt) => prompt,
        None => {
            frame.render_widget(block, area);
            return;
        }
    };

    let mut badges = vec![badge(&prompt.role)];
    if let Some(author) = &prompt.author {
        badges.push(Span::raw(" "));
        badges.push(badge(&format!("@{author}")));
    }
    let mut text = Text::from(Line::from(Span::styled(
        prompt.title.clone(),
        Style::new().fg(ACCENT).add_modifier(Modifier::BOLD),
    )));
    for line in preview(prompt).lines() {
        text.push_line(Line::raw(line.to_string()));
    }
    text.push_line(Line::from(badges));

    let paragraph = Paragraph::new(text).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_detail(frame: &mut Frame, app: &mut App) {
    let status_text = app.status_text().map(str::to_string);
    let detail = match app.detail.as_mut() {
        Some(detail) => detail,
        None => return,
    };

    let [content_area, status_area] = split_status(frame.area());
    let title = format!("{} (Preview)", detail.prompt.title);

    if detail.is_customizable() {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(content_area);
        render_fields(frame, detail, horizontal[0]);
        let segments = render_segments(&detail.prompt.prompt, &detail.values);
        let spans = segments.iter().map(|segment| {
            let style = if segment.is_substitution() {
                Style::new().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::new()
            };
            (segment.text(), style)
        });
        render_preview(frame, &title, styled_text(spans), &detail.prompt, horizontal[1]);
    } else {
        let text = Text::raw(detail.prompt.prompt.clone());
        render_preview(frame, &title, text, &detail.prompt, content_area);
    }

    let help = "Esc back  Tab/↑↓ next field  Ctrl+C copy";
    render_help(frame, help, status_text.as_deref(), status_area);
}

fn render_fields(frame: &mut Frame, detail: &mut DetailState, area: Rect) {
    let block = Block::bordered().title("Variables");
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let field_height: u16 = 3;
    let view_capacity = (inner.height / field_height) as usize;
    detail.field_scroll = ensure_visible(
        detail.field_scroll,
        detail.active_field,
        detail.variables.len(),
        view_capacity,
    );

    let start = detail.field_scroll;
    let end = (start + view_capacity).min(detail.variables.len());
    for (row, index) in (start..end).enumerate() {
        let mut value = detail.field_value(index).to_string();
        let is_active = index == detail.active_field;
        if is_active {
            value.push('|');
        }
        let label = detail.variables[index].label.as_str();
        render_field(frame, label, value, is_active, field_row(inner, row, field_height));
    }
}

fn render_builder(frame: &mut Frame, app: &mut App) {
    let status_text = app.status_text().map(str::to_string);
    let builder = &mut app.builder;

    let [content_area, status_area] = split_status(frame.area());
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(content_area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Fill(1)])
        .split(horizontal[0]);

    render_concept_selector(frame, builder, left[0]);
    render_concept_fields(frame, builder, left[1]);

    let parts = build_parts(&builder.selected, &builder.values);
    let spans = parts.iter().map(|part| {
        let style = Style::new().fg(concept_color(part.concept));
        (part.text.as_str(), style)
    });
    let paragraph = Paragraph::new(styled_text(spans))
        .block(Block::bordered().title("Custom Prompt (Preview)"))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, horizontal[1]);

    let help = "Esc back  Tab focus  Space toggle  ←→ example  F5 reroll  Ctrl+C copy";
    render_help(frame, help, status_text.as_deref(), status_area);
}

fn render_concept_selector(frame: &mut Frame, builder: &BuilderState, area: Rect) {
    let focused = builder.focus == BuilderFocus::Concepts;
    let mut spans = Vec::new();
    for (index, concept) in Concept::ALL.into_iter().enumerate() {
        let mark = if builder.selected.contains(&concept) {
            "[x]"
        } else {
            "[ ]"
        };
        let mut style = Style::new().fg(concept_color(concept));
        if focused && index == builder.concept_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        spans.push(Span::styled(format!("{mark} {}", concept.name()), style));
        spans.push(Span::raw(" "));
    }
    let paragraph = Paragraph::new(Line::from(spans)).block(focus_block("Select Concepts", focused));
    frame.render_widget(paragraph, area);
}

fn render_concept_fields(frame: &mut Frame, builder: &mut BuilderState, area: Rect) {
    let focused = builder.focus == BuilderFocus::Fields;
    let block = focus_block("Custom Prompt Builder", focused);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let heights: Vec<u16> = builder
        .selected
        .iter()
        .map(|concept| if concept.is_multiline() { 5 } else { 3 })
        .collect();
    let view_capacity = visible_count(&heights, builder.field_scroll, inner.height);
    builder.field_scroll = ensure_visible(
        builder.field_scroll,
        builder.active_field,
        builder.selected.len(),
        view_capacity.max(1),
    );

    let mut y = inner.y;
    for (index, concept) in builder.selected.iter().enumerate().skip(builder.field_scroll) {
        let height = heights[index];
        if y + height > inner.y + inner.height {
            break;
        }
        let is_active = focused && index == builder.active_field;
        let mut value = builder.value(*concept).to_string();
        if is_active {
            value.push('|');
        }
        let label = if builder.is_custom(*concept) {
            format!("{} (Custom)", concept.name())
        } else {
            concept.name().to_string()
        };
        let area = Rect {
            x: inner.x,
            y,
            width: inner.width,
            height,
        };
        render_field(frame, &label, value, is_active, area);
        y += height;
    }
}

fn render_field(frame: &mut Frame, label: &str, value: String, is_active: bool, area: Rect) {
    let border_style = if is_active {
        Style::new().fg(Color::Blue)
    } else {
        Style::new().fg(Color::DarkGray)
    };
    let block = Block::bordered()
        .title(Span::styled(format!("{label}:"), Style::new().fg(MUTED)))
        .border_style(border_style);
    let paragraph = Paragraph::new(value).block(block).wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_preview(frame: &mut Frame, title: &str, mut text: Text<'static>, prompt: &Prompt, area: Rect) {
    let mut badges = vec![badge(&prompt.role)];
    if let Some(author) = &prompt.author {
        badges.push(Span::raw(" "));
        badges.push(badge(&format!("@{author}")));
    }
    text.push_line(Line::default());
    text.push_line(Line::from(badges));
    let paragraph = Paragraph::new(text)
        .block(Block::bordered().title(title))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_status_line(frame: &mut Frame, app: &App, help: &str, area: Rect) {
    render_help(frame, help, app.status_text(), area);
}

fn render_help(frame: &mut Frame, help: &str, status: Option<&str>, area: Rect) {
    let mut line = help.to_string();
    if let Some(status) = status {
        line.push_str("  |  ");
        line.push_str(status);
    }
    let paragraph = Paragraph::new(line).style(Style::new().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Lays styled fragments out as lines, splitting on embedded newlines.
fn styled_text<'a>(fragments: impl Iterator<Item = (&'a str, Style)>) -> Text<'static> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    for (fragment, style) in fragments {
        let mut pieces = fragment.split('\n');
        if let Some(first) = pieces.next() {
            if !first.is_empty() {
                current.push(Span::styled(first.to_string(), style));
            }
        }
        for piece in pieces {
            lines.push(Line::from(std::mem::take(&mut current)));
            if !piece.is_empty() {
                current.push(Span::styled(piece.to_string(), style));
            }
        }
    }
    lines.push(Line::from(current));
    Text::from(lines)
}

fn badge(text: &str) -> Span<'static> {
    Span::styled(format!(" {text} "), Style::new().bg(Color::DarkGray).fg(Color::White))
}

fn concept_color(concept: Concept) -> Color {
    match concept {
        Concept::Persona => Color::Rgb(56, 189, 248),
        Concept::Task => Color::Rgb(52, 211, 153),
        Concept::Context => Color::Rgb(251, 191, 36),
        Concept::Format => Color::Rgb(244, 114, 182),
        Concept::Example => Color::Rgb(167, 139, 250),
        Concept::Tone => Color::Rgb(248, 113, 113),
    }
}

fn focus_block(title: &str, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::new().fg(ACCENT)
    } else {
        Style::new()
    };
    Block::bordered().title(title.to_string()).border_style(style)
}

fn split_status(area: Rect) -> [Rect; 2] {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Fill(1), Constraint::Length(1)])
        .split(area);
    [layout[0], layout[1]]
}

fn field_row(inner: Rect, row: usize, height: u16) -> Rect {
    Rect {
        x: inner.x,
        y: inner.y + (row as u16) * height,
        width: inner.width,
        height,
    }
}

fn inner_rect(area: Rect) -> Rect {
    let mut inner = area;
    if inner.width >= 2 {
        inner.x += 1;
        inner.width -= 2;
    }
    if inner.height >= 2 {
        inner.y += 1;
        inner.height -= 2;
    }
    inner
}

/// How many fields starting at `start` fit into `height` rows.
fn visible_count(heights: &[u16], start: usize, height: u16) -> usize {
    let mut used = 0;
    let mut count = 0;
    for field in heights.iter().skip(start) {
        if used + field > height {
            break;
        }
        used += field;
        count += 1;
    }
    count
}

fn ensure_visible(current_scroll: usize, selected: usize, total: usize, view_height: usize) -> usize {
    if total == 0 || view_height == 0 {
        return 0;
    }
    let mut scroll = current_scroll.min(total.saturating_sub(1));
    if selected < scroll {
        scroll = selected;
    } else if selected >= scroll + view_height {
        scroll = selected + 1 - view_height;
    }
    scroll
}
