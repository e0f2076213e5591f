use std::env;
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CEvent, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Frame, Terminal};

use thingy_config::PetTuning;
use thingy_core::{
    bus::EventBus,
    clock::FrameClock,
    event::Event,
    logging::{self, LogRing},
};
use thingy_pet::{Action, Thingy, Viewport};
use thingy_sheet::{default_sheet, default_sheet_png, load_sheet, FileSource, SheetPixels};
use thingy_ui::{
    hud::{render_shell, HudView},
    layout::{playfield_viewport, shell_layout},
    sprite::render_sprite,
};

const HUD_HEIGHT: u16 = 8;
const FALLBACK_SPRITE_WIDTH: f32 = 16.0;

struct App {
    pet: Thingy,
    pixels: SheetPixels,
    bus: EventBus,
    clock: FrameClock,
    logs: LogRing,
}

impl App {
    fn new(logs: LogRing, cols: u16, rows: u16) -> Result<Self> {
        let tuning = load_tuning()?;
        let (sheet, pixels) = match env::var("THINGY_SHEET") {
            Ok(location) => {
                let sheet = load_sheet(&FileSource, &location)?;
                let pixels = SheetPixels::from_file(Path::new(&sheet.image), &sheet)?;
                (sheet, pixels)
            }
            Err(_) => {
                let sheet = default_sheet()?;
                let pixels = SheetPixels::decode(default_sheet_png(), &sheet)?;
                (sheet, pixels)
            }
        };

        let sprite_width = sheet
            .frames
            .first()
            .and_then(|frame| frame.rect)
            .map(|rect| rect.w as f32)
            .unwrap_or(FALLBACK_SPRITE_WIDTH);
        let pet = Thingy::from_sheet(&sheet, tuning, viewport_for(cols, rows), sprite_width)
            .context("sprite sheet cannot drive the pet")?;

        Ok(Self {
            pet,
            pixels,
            bus: EventBus::new(),
            clock: FrameClock::default(),
            logs,
        })
    }

    /// Handle one event. Returns true when the app should exit.
    fn handle(&mut self, event: Event) -> bool {
        match event {
            Event::Tick { now } => {
                let delta_ms = self.clock.tick(now);
                let report = self.pet.tick(delta_ms);
                if report.mood_changed {
                    tracing::debug!(mood = ?self.pet.mood(), "mood changed");
                }
            }
            Event::Feed => {
                if self.pet.on_action(Action::Feed) {
                    tracing::info!("feeding");
                } else {
                    tracing::debug!("feed ignored while eating");
                }
            }
            Event::Resize { cols, rows } => self.pet.resize(viewport_for(cols, rows)),
            Event::Key(key) => tracing::trace!(?key, "unbound key"),
            Event::Quit => return true,
        }
        false
    }

    fn draw(&self, f: &mut Frame) {
        let logs = self.logs.recent(HUD_HEIGHT as usize);
        let view = HudView::from_pet(&self.pet, self.clock.tps(), &logs);
        let rects = shell_layout(f.area(), HUD_HEIGHT);
        render_shell(f, rects, &view, |f, area| {
            let frame = self.pet.render();
            if let Some(pixels) = self.pixels.frame(frame.sheet_frame) {
                let center = (frame.position.x, frame.position.y);
                render_sprite(f.buffer_mut(), area, pixels, center);
            }
        });
    }
}

fn load_tuning() -> Result<PetTuning> {
    match env::var_os("THINGY_CONFIG") {
        Some(path) => {
            let path = PathBuf::from(path);
            tracing::info!(path = %path.display(), "loading tuning");
            PetTuning::from_path(&path)
        }
        None => Ok(PetTuning::default()),
    }
}

/// The pet's viewport for a terminal of `cols` x `rows` cells.
fn viewport_for(cols: u16, rows: u16) -> Viewport {
    playfield_viewport(shell_layout(Rect::new(0, 0, cols, rows), HUD_HEIGHT).playfield)
}

/// Translate a key press into a shell event.
fn map_key(key: KeyEvent) -> Option<Event> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    Some(match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Event::Quit,
        KeyCode::Char('f') | KeyCode::Char(' ') => Event::Feed,
        _ => Event::Key(key),
    })
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<()> {
    let logs = logging::init();
    tracing::info!("thingy starting up");

    let mut terminal = setup_terminal()?;
    let res = run(&mut terminal, logs);
    restore_terminal(terminal)?;
    if let Err(err) = &res {
        tracing::error!(error = %err, "thingy exited with an error");
    }
    res
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, logs: LogRing) -> Result<()> {
    let (cols, rows) = crossterm::terminal::size()?;
    let mut app = App::new(logs, cols, rows)?;
    let tick_interval = Duration::from_millis(16);
    let mut next_tick = Instant::now();

    loop {
        terminal.draw(|f| app.draw(f))?;

        // ── Poll → Publish ──
        let timeout = next_tick.saturating_duration_since(Instant::now());
        if event::poll(timeout)? {
            match event::read()? {
                CEvent::Key(key) => {
                    if let Some(ev) = map_key(key) {
                        app.bus.publish(ev);
                    }
                }
                CEvent::Resize(cols, rows) => app.bus.publish(Event::Resize { cols, rows }),
                _ => {}
            }
        }

        let now = Instant::now();
        if now >= next_tick {
            next_tick = now + tick_interval;
            app.bus.publish(Event::Tick { now });
        }

        // ── Drain → Handle ──
        for ev in app.bus.drain() {
            if app.handle(ev) {
                tracing::info!("thingy shutting down");
                return Ok(());
            }
        }
    }
}
