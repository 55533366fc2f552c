//! Home screen - tree, summary panel, status line and help bar

use crate::components::{calculate_main_layout, render_summary, TreeViewComponent};
use crate::model::{BomPath, Forest};
use anyhow::Result;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Context needed for rendering the home screen
pub struct HomeRenderContext<'a> {
    pub forest: &'a Forest,
    pub status_message: Option<&'a str>,
    pub error: Option<&'a str>,
}

pub fn draw_home_screen(
    frame: &mut Frame,
    area: Rect,
    tree: &mut TreeViewComponent,
    ctx: &HomeRenderContext,
) -> Result<()> {
    let layout = calculate_main_layout(area);

    tree.draw_with_forest(frame, layout.tree, ctx.forest)?;

    let selected = tree.selected_path(ctx.forest);
    render_summary(frame, layout.info, ctx.forest, selected.as_ref());
    render_status_bar(frame, layout.status, selected.as_ref(), ctx);
    render_help_bar(frame, layout.help);

    Ok(())
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    selected: Option<&BomPath>,
    ctx: &HomeRenderContext,
) {
    let mut spans = vec![Span::styled(
        " BOM ",
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(error) = ctx.error {
        spans.push(Span::styled(
            format!(" Error: {} ", error),
            Style::default().fg(Color::Red),
        ));
    } else if let Some(status) = ctx.status_message {
        spans.push(Span::styled(
            format!(" {} ", status),
            Style::default().fg(Color::Green),
        ));
    } else if let Some(path) = selected {
        spans.push(Span::styled(
            format!(" path {} ", path),
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_help_bar(frame: &mut Frame, area: Rect) {
    let key_style = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);

    let help_spans = vec![
        Span::styled(" q ", key_style(Color::Yellow)),
        Span::raw("Quit "),
        Span::styled(" a ", key_style(Color::Green)),
        Span::raw("Add Child "),
        Span::styled(" A ", key_style(Color::Green)),
        Span::raw("Add Root "),
        Span::styled(" j/k ", key_style(Color::Cyan)),
        Span::raw("Move "),
        Span::styled(" ? ", key_style(Color::White)),
        Span::raw("Help"),
    ];

    frame.render_widget(Paragraph::new(Line::from(help_spans)), area);
}
