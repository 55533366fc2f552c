//! Summary panel - forest totals and the highlighted component

use crate::model::{BomPath, Forest};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<11}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

pub fn summary_lines(forest: &Forest, selected: Option<&BomPath>) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Bill of Materials"),
        field("Components", forest.len().to_string()),
        field("Roots", forest.root_count().to_string()),
        field(
            "Levels",
            forest
                .max_depth()
                .map(|depth| (depth + 1).to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
    ];

    if let Some((path, node)) = selected.and_then(|path| forest.get(path).map(|node| (path, node))) {
        lines.push(Line::from(""));
        lines.push(heading("Selected"));
        lines.push(field("Name", node.name.clone()));
        lines.push(field(
            "Quantity",
            node.quantity
                .map(|q| q.to_string())
                .unwrap_or_else(|| "not tracked".to_string()),
        ));
        lines.push(field("Children", node.children.len().to_string()));
        lines.push(field("Path", path.to_string()));
    }

    lines
}

pub fn render_summary(frame: &mut Frame, area: Rect, forest: &Forest, selected: Option<&BomPath>) {
    let paragraph = Paragraph::new(summary_lines(forest, selected))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Summary ")
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
