//! TUI rendering for the Stellar viewer using ratatui.

mod input;
mod theme;

pub use input::{InputPump, apply_event, command_for_key, handle_events};
pub use theme::{Glyphs, Palette, glyphs, palette, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Axis, Block, BorderType, Borders, Chart, Clear, Dataset, GraphType, Paragraph},
};

use stellar_core::scaling::{format_tick, tick_labels};
use stellar_engine::{App, Quantity, Termination, command_specs};

const X_AXIS_TITLE: &str = "Time (years)";

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let options = app.ui_options();
    let palette = palette(options);
    let glyphs = glyphs(options);
    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(4),    // Charts
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0], &palette, &glyphs);
    draw_charts(frame, app, chunks[1], &palette, &glyphs);
    draw_status_bar(frame, app, chunks[2], &palette, &glyphs);

    if app.show_help() {
        draw_help(frame, &palette);
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let trajectory = app.trajectory();
    let params = trajectory.params();
    let status_style = match trajectory.termination() {
        Termination::Completed => Style::default().fg(palette.success),
        Termination::Diverged { .. } => Style::default().fg(palette.warning),
    };
    let status_icon = if trajectory.termination().is_diverged() {
        format!("{} ", glyphs.diverged)
    } else {
        String::new()
    };

    let line = Line::from(vec![
        Span::styled(" Stellar Evolution ", styles::title(palette)),
        Span::styled(
            format!(
                "{sep} h = {} yr {sep} {} {sep} {} fusion {sep} ",
                format_tick(params.step_years),
                params.step_mode,
                params.fusion_mode,
                sep = glyphs.separator,
            ),
            Style::default().fg(palette.text_secondary),
        ),
        Span::styled(
            format!("{status_icon}{}", trajectory.termination().describe()),
            status_style,
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_charts(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let panels = app.panels();
    match panels.as_slice() {
        [single] => draw_chart(frame, app, *single, area, palette, glyphs),
        many => {
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(area);
            for (row_idx, row) in rows.iter().enumerate() {
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(*row);
                for (col_idx, cell) in cols.iter().enumerate() {
                    if let Some(quantity) = many.get(row_idx * 2 + col_idx) {
                        draw_chart(frame, app, *quantity, *cell, palette, glyphs);
                    }
                }
            }
        }
    }
}

fn draw_chart(
    frame: &mut Frame,
    app: &App,
    quantity: Quantity,
    area: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let data = app.visible_series(quantity);
    let bounds = app.bounds();
    let time_bounds = bounds.time;
    let value_bounds = bounds.value(quantity);
    let color = palette.series(quantity);

    let dataset = Dataset::default()
        .marker(glyphs.marker)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&data);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(styles::border(palette))
        .title(Span::styled(
            format!(" {} ", quantity.label()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

    let x_axis = Axis::default()
        .title(Span::styled(X_AXIS_TITLE, styles::axis(palette)))
        .style(styles::axis(palette))
        .bounds(time_bounds)
        .labels(tick_labels(time_bounds));
    let y_axis = Axis::default()
        .title(Span::styled(quantity.short_label(), styles::axis(palette)))
        .style(styles::axis(palette))
        .bounds(value_bounds)
        .labels(tick_labels(value_bounds));

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis)
        .legend_position(None);
    frame.render_widget(chart, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette, glyphs: &Glyphs) {
    let playback = app.playback();
    let (state_icon, state_label, state_style) = if playback.is_finished() {
        (glyphs.finished, "done", Style::default().fg(palette.success))
    } else if playback.is_paused() {
        (glyphs.paused, "paused", Style::default().fg(palette.warning))
    } else {
        (glyphs.running, "playing", Style::default().fg(palette.accent))
    };
    let time = app
        .current_time()
        .map_or_else(|| "-".to_string(), format_tick);

    let mut spans = vec![
        Span::styled(format!(" {state_icon} {state_label} "), state_style),
        Span::styled(
            format!(
                "{sep} frame {}/{} {sep} t = {time} yr {sep} speed {}x ",
                playback.frame(),
                playback.last_frame(),
                format_tick(playback.speed()),
                sep = glyphs.separator,
            ),
            Style::default().fg(palette.text_secondary),
        ),
        Span::styled(glyphs.separator, styles::key_hint(palette)),
    ];
    for spec in command_specs() {
        let Some(hint) = spec.hint else {
            continue;
        };
        spans.push(Span::styled(format!(" {}", spec.keys), styles::key_highlight(palette)));
        spans.push(Span::styled(format!(" {hint}"), styles::key_hint(palette)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help(frame: &mut Frame, palette: &Palette) {
    let area = frame.area();
    let specs = command_specs();

    let help_width = 48.min(area.width.saturating_sub(4));
    let help_height = u16::try_from(specs.len())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .min(area.height);
    let help_area = Rect {
        x: area.x + (area.width.saturating_sub(help_width) / 2),
        y: area.y + (area.height.saturating_sub(help_height) / 2),
        width: help_width,
        height: help_height,
    };

    frame.render_widget(Clear, help_area);

    let mut lines: Vec<Line> = vec![Line::from("")];
    for spec in specs {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<12}", spec.keys), Style::default().fg(palette.peach)),
            Span::styled(spec.description, Style::default().fg(palette.text_primary)),
        ]));
    }

    let help = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.primary))
            .style(Style::default().bg(palette.bg_popup))
            .title(Span::styled(" Keys ", styles::title(palette)))
            .title_alignment(Alignment::Center),
    );
    frame.render_widget(help, help_area);
}
