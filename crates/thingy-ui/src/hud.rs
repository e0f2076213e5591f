use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use thingy_core::logging::{LogLevel, LogLine};
use thingy_pet::{MoodBand, Thingy};

use crate::layout::ShellRects;

/// Everything the shell chrome shows besides the playfield.
#[derive(Debug, Clone)]
pub struct HudView<'a> {
    pub clip: &'a str,
    pub frame_index: usize,
    pub mood: MoodBand,
    pub happiness: f32,
    pub hunger: f32,
    pub health: f32,
    pub feeding: bool,
    pub tps: f64,
    pub logs: &'a [LogLine],
}

impl<'a> HudView<'a> {
    pub fn from_pet(pet: &'a Thingy, tps: f64, logs: &'a [LogLine]) -> Self {
        let frame = pet.render();
        let state = pet.state();
        Self {
            clip: frame.clip,
            frame_index: frame.frame_index,
            mood: pet.mood(),
            happiness: state.happiness,
            hunger: state.hunger,
            health: state.health,
            feeding: state.feeding,
            tps,
            logs,
        }
    }
}

/// Draw the title bar and HUD, and hand the playfield to `playfield`.
pub fn render_shell(
    f: &mut Frame,
    rects: ShellRects,
    view: &HudView<'_>,
    playfield: impl FnOnce(&mut Frame, Rect),
) {
    let status = if view.feeding { "eating" } else { mood_label(view.mood) };
    let top = Line::from(vec![
        Span::styled(" THINGY ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("| {status} | ")),
        Span::styled("f feed  q quit", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(top), rects.top);

    playfield(f, rects.playfield);

    render_stats(f, rects.hud_stats, view);
    render_log(f, rects.hud_log, view.logs);
}

fn render_stats(f: &mut Frame, area: Rect, view: &HudView<'_>) {
    let block = Block::default().borders(Borders::ALL).title("PET");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let clip_line = Line::from(format!(
        "{} #{}  {:.0} tps",
        view.clip, view.frame_index, view.tps
    ));
    f.render_widget(Paragraph::new(clip_line), rows[0]);
    f.render_widget(gauge("happy", view.happiness, mood_color(view.mood)), rows[1]);
    f.render_widget(gauge("fed", view.hunger, Color::Yellow), rows[2]);
    f.render_widget(gauge("health", view.health, Color::Red), rows[3]);
}

fn render_log(f: &mut Frame, area: Rect, logs: &[LogLine]) {
    let block = Block::default().borders(Borders::ALL).title("LOG");
    let visible = block.inner(area).height as usize;
    let skip = logs.len().saturating_sub(visible);

    let lines: Vec<Line> = logs
        .iter()
        .skip(skip)
        .map(|entry| {
            Line::from(vec![
                Span::styled(
                    format!("{:5} ", entry.level),
                    Style::default()
                        .fg(level_color(entry.level))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(entry.message.as_str()),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn gauge(label: &str, value: f32, color: Color) -> Gauge<'static> {
    let ratio = if value.is_finite() {
        value.clamp(0.0, 1.0) as f64
    } else {
        0.0
    };
    Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(ratio)
        .label(format!("{label} {:>3.0}%", ratio * 100.0))
}

fn mood_label(mood: MoodBand) -> &'static str {
    match mood {
        MoodBand::Angry => "angry",
        MoodBand::Neutral => "content",
        MoodBand::Happy => "happy",
    }
}

fn mood_color(mood: MoodBand) -> Color {
    match mood {
        MoodBand::Angry => Color::Red,
        MoodBand::Neutral => Color::Cyan,
        MoodBand::Happy => Color::Green,
    }
}

fn level_color(level: LogLevel) -> Color {
    match level {
        LogLevel::Error => Color::Red,
        LogLevel::Warn => Color::Yellow,
        LogLevel::Info => Color::Green,
        LogLevel::Debug => Color::Cyan,
        LogLevel::Trace => Color::DarkGray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::shell_layout;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn view<'a>(logs: &'a [LogLine]) -> HudView<'a> {
        HudView {
            clip: "bounce_right_happy",
            frame_index: 3,
            mood: MoodBand::Happy,
            happiness: 0.8,
            hunger: 0.5,
            health: 1.0,
            feeding: false,
            tps: 60.0,
            logs,
        }
    }

    fn log(level: LogLevel, message: &str) -> LogLine {
        LogLine {
            level,
            target: "thingy".into(),
            message: message.into(),
        }
    }

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "));
            }
            out.push('\n');
        }
        out
    }

    fn draw(view: &HudView<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal
            .draw(|f| {
                let rects = shell_layout(f.area(), 8);
                render_shell(f, rects, view, |_, _| {});
            })
            .unwrap();
        text(terminal.backend().buffer())
    }

    #[test]
    fn shows_clip_mood_and_gauges() {
        let screen = draw(&view(&[]));
        assert!(screen.contains("THINGY"));
        assert!(screen.contains("happy"));
        assert!(screen.contains("bounce_right_happy #3"));
        assert!(screen.contains("60 tps"));
        assert!(screen.contains("happy  80%"));
        assert!(screen.contains("fed  50%"));
        assert!(screen.contains("health 100%"));
    }

    #[test]
    fn feeding_replaces_mood_in_title() {
        let mut v = view(&[]);
        v.feeding = true;
        let screen = draw(&v);
        let title = screen.lines().next().unwrap();
        assert!(title.contains("eating"), "{title}");
    }

    #[test]
    fn log_panel_keeps_newest_lines() {
        let logs: Vec<LogLine> = (0..20)
            .map(|i| log(LogLevel::Info, &format!("line {i:02}")))
            .collect();
        let screen = draw(&view(&logs));
        assert!(screen.contains("line 19"));
        assert!(!screen.contains("line 00"));
        assert!(screen.contains("INFO"));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut v = view(&[]);
        v.happiness = f32::NAN;
        v.hunger = 3.0;
        let screen = draw(&v);
        assert!(screen.contains("happy   0%"));
        assert!(screen.contains("fed 100%"));
    }

    #[test]
    fn playfield_callback_gets_middle_region() {
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        let mut seen = None;
        terminal
            .draw(|f| {
                let rects = shell_layout(f.area(), 8);
                render_shell(f, rects, &view(&[]), |_, area| seen = Some(area));
            })
            .unwrap();
        assert_eq!(seen, Some(Rect::new(0, 1, 40, 11)));
    }
}
