use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::game::geometry::Aabb;
use crate::game::tuning::*;
use crate::game::world::PlanetKind;
use crate::game::{Phase, Session};
use crate::ui::braille::{Canvas, Dots};

const STAR_COUNT: u32 = 90;

fn planet_color(kind: PlanetKind) -> Color {
    match kind {
        PlanetKind::Ringed => Color::Rgb(230, 180, 90),
        PlanetKind::Giant => Color::Rgb(220, 110, 70),
        PlanetKind::Rocky => Color::Rgb(150, 140, 130),
        PlanetKind::Ice => Color::Rgb(120, 200, 255),
    }
}

/// Ship is drawn on the even blink phase while invincible.
fn ship_visible(session: &Session, now: u64) -> bool {
    !session.is_invincible() || (now / BLINK_MS) % 2 == 0
}

// xorshift, seeded per star so the field is stable between frames
fn star_hash(mut v: u32) -> u32 {
    v ^= v << 13;
    v ^= v >> 17;
    v ^= v << 5;
    v
}

fn draw_stars(canvas: &mut Canvas, distance: u64) {
    let mut dots = Dots::new();
    let bw = canvas.dot_width().max(1) as u32;
    let bh = canvas.dot_height().max(1) as u32;
    let scroll = (distance as f32 * canvas.y_scale()) as u32;
    for i in 1..=STAR_COUNT {
        let h = star_hash(i.wrapping_mul(2_654_435_761));
        let x = h % bw;
        let y = (star_hash(h) % bh + scroll) % bh;
        canvas.set_dot(&mut dots, x as i32, y as i32);
    }
    canvas.stamp(&dots, Color::Rgb(70, 70, 110), false);
}

fn draw_ship(canvas: &mut Canvas, session: &Session) {
    let hull = session.ship_bounds();
    let mut dots = Dots::new();
    canvas.wedge(&mut dots, &hull);
    canvas.stamp(&dots, Color::Rgb(80, 255, 120), true);

    let mut flame = Dots::new();
    let exhaust = Aabb::new(hull.x + hull.w * 0.35, hull.bottom() - hull.h * 0.12, hull.w * 0.3, hull.h * 0.12);
    canvas.fill_rect(&mut flame, &exhaust);
    canvas.stamp(&flame, Color::Rgb(255, 160, 40), true);
}

fn render_field(session: &Session, now: u64, width: usize, height: usize) -> Vec<Line<'static>> {
    let bg = Color::Rgb(0, 0, 8);
    let mut canvas = Canvas::new(width, height, FIELD_WIDTH, FIELD_HEIGHT, bg);
    let world = session.world();

    draw_stars(&mut canvas, session.distance());

    for planet in &world.planets {
        let mut dots = Dots::new();
        canvas.ellipse(&mut dots, &planet.bounds(), 0.0);
        canvas.stamp(&dots, planet_color(planet.kind), false);
    }

    for meteor in &world.meteors {
        let mut dots = Dots::new();
        canvas.ellipse(&mut dots, &meteor.bounds(), 0.0);
        canvas.stamp(&dots, Color::Rgb(170, 120, 80), false);
    }

    for enemy in &world.enemies {
        let body = enemy.bounds();
        let mut saucer = Dots::new();
        canvas.ellipse(&mut saucer, &Aabb::new(body.x, body.y + body.h * 0.4, body.w, body.h * 0.6), 0.0);
        canvas.stamp(&saucer, Color::Rgb(200, 80, 255), false);
        let mut dome = Dots::new();
        canvas.ellipse(&mut dome, &Aabb::new(body.x + body.w * 0.3, body.y, body.w * 0.4, body.h * 0.55), 0.0);
        canvas.stamp(&dome, Color::Rgb(120, 255, 220), false);
    }

    for bullet in &world.bullets {
        let mut dots = Dots::new();
        canvas.fill_rect(&mut dots, &bullet.bounds());
        canvas.stamp(&dots, Color::Rgb(255, 255, 200), true);
    }

    for explosion in &world.explosions {
        let mut dots = Dots::new();
        let blast = Aabb::new(explosion.pos.x, explosion.pos.y, EXPLOSION_SIZE, EXPLOSION_SIZE);
        canvas.ellipse(&mut dots, &blast, 0.5);
        canvas.stamp(&dots, Color::Rgb(255, 200, 60), true);
    }

    if ship_visible(session, now) {
        draw_ship(&mut canvas, session);
    }

    canvas.into_lines()
}

fn render_blackout(session: &Session, now: u64, width: usize, height: usize) -> Vec<Line<'static>> {
    let mut canvas = Canvas::new(width, height, FIELD_WIDTH, FIELD_HEIGHT, Color::Black);

    if let Some(wreck) = session.wreck() {
        let blast = Aabb::new(wreck.x, wreck.y, WRECK_SIZE, WRECK_SIZE);
        let mut outer = Dots::new();
        canvas.ellipse(&mut outer, &blast, 0.55);
        canvas.stamp(&outer, Color::Rgb(255, 120, 30), true);
        let mut core = Dots::new();
        canvas.ellipse(&mut core, &Aabb::new(blast.x + 40.0, blast.y + 40.0, 70.0, 70.0), 0.0);
        canvas.stamp(&core, Color::Rgb(255, 230, 120), true);
    }

    if (now / BLINK_MS) % 2 == 0 {
        draw_ship(&mut canvas, session);
    }

    canvas.into_lines()
}

pub fn render_play(frame: &mut Frame, area: Rect, session: &Session, now: u64) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(120, 90, 255)))
        .title(" Space Attack ")
        .title_style(Style::default().fg(Color::Rgb(180, 150, 255)).add_modifier(Modifier::BOLD));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(1),
        ])
        .split(inner);

    // Status bar
    let lives_str = "\u{2665} ".repeat(session.lives() as usize);
    let status = Line::from(vec![
        Span::styled(" \u{1f680} ", Style::default()),
        Span::styled(
            format!("Score: {} ", session.score()),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Kills: {} ", session.kills()),
            Style::default().fg(Color::Rgb(255, 200, 0)),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Lives: {}", lives_str),
            Style::default().fg(Color::Rgb(255, 80, 80)).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Distance: {} ", session.distance()),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    frame.render_widget(Paragraph::new(status), chunks[0]);

    let fw = chunks[1].width as usize;
    let fh = chunks[1].height as usize;
    let blackout = matches!(session.phase(), Phase::Blackout { .. } | Phase::GameOver);
    if fw > 0 && fh > 0 {
        let lines = if blackout {
            render_blackout(session, now, fw, fh)
        } else {
            render_field(session, now, fw, fh)
        };
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    if blackout {
        let banner = Rect::new(chunks[1].x, chunks[1].y + chunks[1].height / 4, chunks[1].width, 1);
        let msg = Paragraph::new(Line::from(Span::styled(
            "LIFE LOST!",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        frame.render_widget(msg, banner);
    }

    let help = Paragraph::new(Line::from(vec![
        Span::styled(" \u{2190}\u{2192} Move ", Style::default().fg(Color::DarkGray)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Space Shoot ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled("Esc End run", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(help, chunks[2]);
}
