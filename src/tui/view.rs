use crate::color_utils::{
    Rgb, color_accessibility, color_harmony, color_name, is_dark, rgb_to_cmyk,
};
use crate::tui::state::{AppState, InputMode, Panel};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn tui_color(color: Rgb) -> Color {
    Color::Rgb(color.r, color.g, color.b)
}

fn text_on(color: Rgb) -> Color {
    if is_dark(color) { Color::White } else { Color::Black }
}

pub fn draw(f: &mut Frame, state: &AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.area());

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(v_chunks[1]);

    draw_stats(f, state, v_chunks[0]);
    draw_swatches(f, state, h_chunks[0]);
    match state.panel {
        Panel::Details => draw_details(f, state, h_chunks[1]),
        Panel::History => draw_history(f, state, h_chunks[1]),
        Panel::Export => draw_export(f, state, h_chunks[1]),
    }
    draw_footer(f, state, v_chunks[2]);
}

fn draw_stats(f: &mut Frame, state: &AppState, area: Rect) {
    let training = match state.training {
        Some(percent) => format!(" | Training {}%", percent),
        None => String::new(),
    };
    let stats = &state.stats;
    let text = format!(
        " Mode: {} | Creativity: {:.1} | Preset: {} | Samples: {} (+{} / -{}) | Confidence: {:.0}%{}",
        state.mode,
        state.creativity,
        state.preset,
        stats.total_samples,
        stats.liked_colors,
        stats.disliked_colors,
        stats.confidence * 100.0,
        training
    );
    let bar = Paragraph::new(text).style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Gray)
            .add_modifier(Modifier::BOLD),
    );
    f.render_widget(bar, area);
}

fn draw_swatches(f: &mut Frame, state: &AppState, area: Rect) {
    let title = if state.loading {
        " Palette (Loading...) ".to_string()
    } else {
        format!(" Palette ({}) ", state.palette.len())
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if state.palette.is_empty() {
        return;
    }

    let constraints: Vec<Constraint> = state
        .palette
        .iter()
        .map(|_| Constraint::Ratio(1, state.palette.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for (i, (&color, column)) in state.palette.iter().zip(columns.iter()).enumerate() {
        let fg = text_on(color);
        let mut label_style = Style::default().fg(fg).bg(tui_color(color));
        if i == state.selected {
            label_style = label_style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        let marker = if i == state.selected { "▶ " } else { "" };

        let mut lines = vec![Line::from(""); column.height.saturating_sub(3) as usize];
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, state.color_format.format(color, i)),
            label_style,
        )));
        lines.push(Line::from(Span::styled(color_name(color), label_style)));

        let swatch = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(Style::default().bg(tui_color(color)).fg(fg));
        f.render_widget(swatch, *column);
    }
}

fn draw_details(f: &mut Frame, state: &AppState, area: Rect) {
    let lines = match state.selected_color() {
        Some(color) => {
            let hsl = color.to_hsl();
            let cmyk = rgb_to_cmyk(color);
            let access = color_accessibility(color);
            let harmony: Vec<Span> = color_harmony(color)
                .iter()
                .map(|&c| Span::styled("  ██  ", Style::default().fg(tui_color(c))))
                .collect();
            vec![
                Line::from(Span::styled(
                    color_name(color),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(format!("HEX   {}", color)),
                Line::from(format!("RGB   {}, {}, {}", color.r, color.g, color.b)),
                Line::from(format!(
                    "HSL   {:.0}°, {:.0}%, {:.0}%",
                    hsl.h,
                    hsl.s * 100.0,
                    hsl.l * 100.0
                )),
                Line::from(format!(
                    "CMYK  {}%, {}%, {}%, {}%",
                    cmyk.c, cmyk.m, cmyk.y, cmyk.k
                )),
                Line::from(""),
                Line::from(format!("On white  {:.2}:1", access.white_contrast)),
                Line::from(format!("On black  {:.2}:1", access.black_contrast)),
                Line::from(""),
                Line::from("Harmony"),
                Line::from(harmony),
            ]
        }
        None => vec![Line::from("No color selected.")],
    };

    let details = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" Details "));
    f.render_widget(details, area);
}

fn draw_history(f: &mut Frame, state: &AppState, area: Rect) {
    let lines: Vec<Line> = if state.history.is_empty() {
        vec![Line::from("No history yet.")]
    } else {
        state
            .history
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let mut spans = vec![Span::raw(format!("{} ", i + 1))];
                spans.extend(
                    entry
                        .colors
                        .iter()
                        .map(|&c| Span::styled("███", Style::default().fg(tui_color(c)))),
                );
                spans.push(Span::styled(
                    format!(" {}", entry.saved_at.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ));
                Line::from(spans)
            })
            .collect()
    };

    let history = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" History (1-5) ")
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(history, area);
}

fn draw_export(f: &mut Frame, state: &AppState, area: Rect) {
    let export = Paragraph::new(state.export_format.render(&state.palette))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Export: {} (X: next) ", state.export_format.label()))
                .border_style(Style::default().fg(Color::Green)),
        );
    f.render_widget(export, area);
}

fn draw_footer(f: &mut Frame, state: &AppState, footer_area: Rect) {
    match state.input_mode {
        InputMode::Importing | InputMode::EditingColor => {
            let (title, prefix, color) = match state.input_mode {
                InputMode::EditingColor => (" Edit Color ", "# ", Color::Magenta),
                _ => (" Import (hex list or CSS) ", "> ", Color::Yellow),
            };
            let input = Paragraph::new(format!("{}{}", prefix, state.input_buffer))
                .style(Style::default().fg(color))
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_widget(input, footer_area);
            let cursor_x =
                footer_area.x + 1 + prefix.chars().count() as u16 + state.cursor_position as u16;
            let cursor_y = footer_area.y + 1;
            f.set_cursor_position((cursor_x, cursor_y));
        }
        InputMode::Normal => {
            let f_chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(footer_area);
            let status = Paragraph::new(state.message.clone())
                .style(Style::default().fg(Color::Cyan))
                .block(
                    Block::default()
                        .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                        .title(" Status "),
                );
            let help_text = "f:Fmt | p:Preset | t:Train | H:Hist | x:Export | i:Import | e:Edit";
            let help = Paragraph::new(help_text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Right)
                .block(
                    Block::default()
                        .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                        .title(" Actions "),
                );
            f.render_widget(status, f_chunks[0]);
            f.render_widget(help, f_chunks[1]);
        }
    }
}
