pub mod braille;
pub mod home;
pub mod play;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, EndItem, Screen};
use crate::game::RunSummary;

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    match app.screen {
        Screen::Home => home::render_home(frame, area, app.selected),
        Screen::Stats => home::render_stats(frame, area, &app.leaderboard),
        Screen::Playing => play::render_play(frame, area, &app.session, app.now),
        Screen::GameOver => render_game_over(frame, area, app.last_run, app.selected),
    }
}

fn render_game_over(frame: &mut Frame, area: Rect, run: RunSummary, selected: usize) {
    let overlay_w = 44u16.min(area.width.saturating_sub(4));
    let overlay_h = 16u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(overlay_w)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_h)) / 2;
    let overlay_area = Rect::new(x, y, overlay_w, overlay_h);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 80, 80)))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Rgb(255, 80, 80)).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("SCORE: {}", run.score),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("KILLS: {}", run.kills),
            Style::default().fg(Color::Rgb(255, 160, 60)).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(""),
    ];
    let labels: Vec<&'static str> = EndItem::ALL.iter().map(|item| item.label()).collect();
    lines.extend(home::menu_lines(&labels, selected));

    let p = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(p, inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn game_over_shows_the_final_tally() {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let run = RunSummary { score: 60, kills: 3 };
        terminal
            .draw(|frame| render_game_over(frame, frame.area(), run, 0))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("SCORE: 60"));
        assert!(text.contains("KILLS: 3"));
        assert!(text.contains("RESTART"));
        assert!(text.contains("END"));
    }
}
