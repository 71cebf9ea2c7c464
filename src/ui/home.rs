use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::HomeItem;
use crate::scores::RunRecord;

const BANNER: &str = r#"
███████╗ ██████╗   █████╗   ██████╗ ███████╗      █████╗  ████████╗ ████████╗  █████╗   ██████╗ ██╗  ██╗
██╔════╝ ██╔══██╗ ██╔══██╗ ██╔════╝ ██╔════╝     ██╔══██╗ ╚══██╔══╝ ╚══██╔══╝ ██╔══██╗ ██╔════╝ ██║ ██╔╝
███████╗ ██████╔╝ ███████║ ██║      █████╗       ███████║    ██║       ██║    ███████║ ██║      █████╔╝ 
╚════██║ ██╔═══╝  ██╔══██║ ██║      ██╔══╝       ██╔══██║    ██║       ██║    ██╔══██║ ██║      ██╔═██╗ 
███████║ ██║      ██║  ██║ ╚██████╗ ███████╗     ██║  ██║    ██║       ██║    ██║  ██║ ╚██████╗ ██║  ██╗
╚══════╝ ╚═╝      ╚═╝  ╚═╝  ╚═════╝ ╚══════╝     ╚═╝  ╚═╝    ╚═╝       ╚═╝    ╚═╝  ╚═╝  ╚═════╝ ╚═╝  ╚═╝"#;

const BANNER_WIDTH: u16 = 106;

const MEDAL_COLORS: [Color; 3] = [
    Color::Rgb(255, 215, 0),   // Gold
    Color::Rgb(192, 192, 192), // Silver
    Color::Rgb(205, 127, 50),  // Bronze
];

fn title(frame: &mut Frame, area: Rect) {
    if area.width >= BANNER_WIDTH {
        let banner = Paragraph::new(BANNER)
            .style(Style::default().fg(Color::Rgb(80, 200, 255)))
            .alignment(Alignment::Center);
        frame.render_widget(banner, area);
    } else {
        let lines = vec![
            Line::from(""),
            Line::from(""),
            Line::from(""),
            Line::from(Span::styled(
                "S P A C E   A T T A C K",
                Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD),
            )),
        ];
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}

/// Menu rows; the selected one is marked and highlighted.
pub fn menu_lines(labels: &[&'static str], selected: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        let line = if i == selected {
            Line::from(vec![
                Span::styled("\u{25b6} ", Style::default().fg(Color::Rgb(255, 220, 80))),
                Span::styled(
                    *label,
                    Style::default().fg(Color::Rgb(255, 255, 255)).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" \u{25c0}", Style::default().fg(Color::Rgb(255, 220, 80))),
            ])
        } else {
            Line::from(Span::styled(*label, Style::default().fg(Color::Rgb(120, 120, 140))))
        };
        lines.push(line);
        lines.push(Line::from(""));
    }
    lines
}

fn footer(frame: &mut Frame, area: Rect, hints: &[(&'static str, &'static str)]) {
    let mut spans = vec![Span::styled("  \u{1f980} ", Style::default().fg(Color::Rgb(255, 100, 50)))];
    for (i, (key, what)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  \u{2502}  ", Style::default().fg(Color::Rgb(40, 40, 60))));
        }
        spans.push(Span::styled(
            *key,
            Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", what),
            Style::default().fg(Color::Rgb(100, 100, 130)),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

pub fn render_home(frame: &mut Frame, area: Rect, selected: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8), // Banner
            Constraint::Length(2), // Subtitle
            Constraint::Min(6),    // Menu
            Constraint::Length(2), // Footer
        ])
        .split(area);

    title(frame, chunks[0]);

    let subtitle = Paragraph::new(Line::from(Span::styled(
        "  \u{26a1} Dodge the planets, blast the saucers \u{26a1}  ",
        Style::default()
            .fg(Color::Rgb(255, 220, 80))
            .add_modifier(Modifier::BOLD | Modifier::ITALIC),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(subtitle, chunks[1]);

    let labels: Vec<&'static str> = HomeItem::ALL.iter().map(|item| item.label()).collect();
    let mut lines = vec![Line::from("")];
    lines.extend(menu_lines(&labels, selected));
    let menu = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
            .title(" \u{1f680} \u{2191}\u{2193} Select, Enter to confirm ")
            .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(menu, centered(chunks[2], 44));

    footer(frame, chunks[3], &[("P", "Play"), ("S", "Stats"), ("Q", "Quit")]);
}

pub fn render_stats(frame: &mut Frame, area: Rect, records: &[RunRecord]) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(6),
            Constraint::Length(2),
        ])
        .split(area);

    title(frame, chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 200, 80)))
        .title(" \u{1f3c6} HIGH SCORES ")
        .title_style(Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));

    let mut lines: Vec<Line> = vec![Line::from("")];
    if records.is_empty() {
        lines.push(Line::from(Span::styled(
            "NO DATA",
            Style::default().fg(Color::Rgb(120, 120, 140)).add_modifier(Modifier::BOLD),
        )));
    }
    for (rank, record) in records.iter().enumerate() {
        let color = MEDAL_COLORS.get(rank).copied().unwrap_or(Color::Rgb(200, 200, 220));
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2}. ", rank + 1), Style::default().fg(Color::Rgb(100, 100, 130))),
            Span::styled(
                format!("SCORE {:<6}", record.score),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  KILLS {:<4}", record.kills),
                Style::default().fg(Color::Rgb(255, 160, 60)),
            ),
        ]));
    }

    let p = Paragraph::new(lines).alignment(Alignment::Center).block(block);
    frame.render_widget(p, centered(chunks[1], 44));

    footer(frame, chunks[2], &[("Esc", "Back")]);
}

/// Horizontally centred strip at most `width` columns wide.
pub fn centered(area: Rect, width: u16) -> Rect {
    let w = width.min(area.width);
    Rect::new(area.x + (area.width - w) / 2, area.y, w, area.height)
}
