#![doc = include_str!("../README.md")]

use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::style::{Attribute, ResetColor, SetAttribute};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{cursor, execute};
use std::fs::OpenOptions;
use std::io;
use std::io::{Write, stdout};
use std::path::Path;
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

pub mod components;
pub mod config;
pub mod error;
pub mod patterns;
pub mod rendering;
pub mod seeds;
pub mod theme;
pub mod util;

use crate::components::keyboard::Command;
use crate::components::mouse::{MouseInfo, MouseTracker};
use crate::components::pacing::FramePacer;
use crate::config::{Config, FPS_RANGE, Quality};
use crate::error::Result;
use crate::patterns::{FrameContext, Pattern};
use crate::rendering::buffer::DoubleBuffer;
use crate::rendering::display::Size;
use crate::rendering::renderer::TerminalWriter;
use crate::seeds::Seeds;
use crate::theme::Theme;

/// How much one `+`/`-` press changes the target FPS.
const FPS_STEP: u32 = 5;

/// Actions that end the render loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakingAction {
    /// Quit the loop.
    Quit,
}

/// The render loop and everything it drives.
///
/// Each tick:
///
/// 1.  drains pending terminal events (keys, mouse, resizes),
/// 2.  clears the current frame and lets the active pattern draw into it,
/// 3.  hands the diff against the previous frame to the [`TerminalWriter`],
/// 4.  swaps frames.
///
/// Events arrive over a channel, normally fed by an [`EventReader`], so an `App` can
/// also be driven without a terminal.
pub struct App<W: Write> {
    buffer: DoubleBuffer,
    writer: TerminalWriter<W>,
    pattern: Box<dyn Pattern>,
    theme: Theme,
    quality: Quality,
    mouse_enabled: bool,
    mouse: MouseTracker,
    pacer: FramePacer,
    seeds: Seeds,
    events: Receiver<Event>,
}

impl<W: Write> App<W> {
    pub fn new(config: &Config, size: Size, sink: W, events: Receiver<Event>) -> Result<Self> {
        let seeds = Seeds::from_option(config.seed);
        let pattern = patterns::by_name(&config.pattern, size, config.quality, &seeds)?;
        log::info!(
            "starting {} at {}x{}, theme {}, {:?} quality, {} fps, seed {}",
            config.pattern,
            size.width(),
            size.height(),
            config.theme.name(),
            config.quality,
            config.fps,
            seeds.base()
        );
        Ok(Self {
            buffer: DoubleBuffer::new(size),
            writer: TerminalWriter::new(sink, config.theme.background()),
            pattern,
            theme: config.theme.clone(),
            quality: config.quality,
            mouse_enabled: config.mouse,
            mouse: MouseTracker::new(),
            pacer: FramePacer::new(config.fps),
            seeds,
            events,
        })
    }

    pub fn buffer(&self) -> &DoubleBuffer {
        &self.buffer
    }

    pub fn writer(&self) -> &TerminalWriter<W> {
        &self.writer
    }

    pub fn pattern_name(&self) -> &'static str {
        self.pattern.name()
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn fps(&self) -> u32 {
        self.pacer.fps()
    }

    /// Runs ticks until the user quits.
    pub fn run(&mut self) -> Result<()> {
        loop {
            if let Some(BreakingAction::Quit) = self.tick()? {
                log::info!("quitting after {} ticks", self.pacer.update_info().tick);
                return Ok(());
            }
            if self.pacer.overran(Instant::now()) {
                log::debug!(
                    "tick {} overran its {:?} budget",
                    self.pacer.update_info().tick,
                    self.pacer.interval()
                );
            }
            self.pacer.wait();
        }
    }

    /// Runs a single tick without any frame pacing.
    pub fn tick(&mut self) -> Result<Option<BreakingAction>> {
        if let Some(action) = self.consume_events()? {
            return Ok(Some(action));
        }

        let mouse = if self.mouse_enabled {
            self.mouse.take_frame()
        } else {
            MouseInfo::default()
        };
        let ctx = FrameContext {
            time: self.pacer.update_info(),
            theme: &self.theme,
            quality: self.quality,
            mouse: &mouse,
        };

        self.buffer.clear();
        self.pattern.tick(&mut self.buffer, &ctx);
        if self.buffer.rejected_writes() > 0 {
            log::trace!(
                "{} skipped {} out-of-bounds writes",
                self.pattern.name(),
                self.buffer.rejected_writes()
            );
        }

        let changes = self.buffer.changes();
        self.writer.write_changes(&changes)?;
        self.buffer.swap();
        Ok(None)
    }

    fn consume_events(&mut self) -> Result<Option<BreakingAction>> {
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    if let Some(action) = self.on_event(event)? {
                        return Ok(Some(action));
                    }
                }
                Err(TryRecvError::Empty) => return Ok(None),
                // input is gone for good; nobody can ask us to quit anymore
                Err(TryRecvError::Disconnected) => {
                    log::warn!("event channel closed");
                    return Ok(Some(BreakingAction::Quit));
                }
            }
        }
    }

    fn on_event(&mut self, event: Event) -> Result<Option<BreakingAction>> {
        if let Event::Resize(width, height) = event {
            self.on_resize(Size::from((width, height)));
            return Ok(None);
        }
        if self.mouse_enabled {
            self.mouse.on_event(&event);
        }
        match Command::from_event(&event) {
            Some(Command::Quit) => return Ok(Some(BreakingAction::Quit)),
            Some(Command::NextPattern) => self.next_pattern()?,
            Some(Command::NextTheme) => self.next_theme(),
            Some(Command::FasterFps) => self.set_fps(self.pacer.fps().saturating_add(FPS_STEP)),
            Some(Command::SlowerFps) => self.set_fps(self.pacer.fps().saturating_sub(FPS_STEP)),
            Some(Command::Redraw) => self.force_redraw(),
            None => {}
        }
        Ok(None)
    }

    fn on_resize(&mut self, size: Size) {
        log::debug!("resize to {}x{}", size.width(), size.height());
        self.buffer.resize(size);
        self.writer.invalidate();
        self.pattern.on_resize(size);
    }

    /// Forgets all diff history and repaints the whole screen on the next tick.
    pub fn force_redraw(&mut self) {
        self.buffer.resize(self.buffer.size());
        self.writer.invalidate();
    }

    fn next_pattern(&mut self) -> Result<()> {
        let name = patterns::next_name(self.pattern.name());
        self.pattern = patterns::by_name(name, self.buffer.size(), self.quality, &self.seeds)?;
        log::info!("pattern: {name}");
        Ok(())
    }

    fn next_theme(&mut self) {
        self.theme = self.theme.next();
        self.writer.set_default_bg_color(self.theme.background());
        // the screen gets cleared with the new background, so the previous frame is stale
        self.force_redraw();
        log::info!("theme: {}", self.theme.name());
    }

    fn set_fps(&mut self, fps: u32) {
        let fps = fps.clamp(*FPS_RANGE.start(), *FPS_RANGE.end());
        self.pacer.set_fps(fps);
        log::debug!("target fps: {fps}");
    }
}

/// Reads terminal events on a background thread and forwards them over a channel.
///
/// The thread only ever touches the channel, never any frame state. It stops when the
/// reader is dropped or the receiving side goes away.
pub struct EventReader {
    handle: Option<JoinHandle<()>>,
    stop: Sender<()>,
}

impl EventReader {
    pub fn spawn() -> (Self, Receiver<Event>) {
        let (event_writer, event_reader) = std::sync::mpsc::channel();
        let (stop, stop_receiver) = std::sync::mpsc::channel::<()>();

        let handle = std::thread::spawn(move || {
            loop {
                match crossterm::event::poll(Duration::from_millis(10)) {
                    Ok(true) => match crossterm::event::read() {
                        Ok(event) => {
                            if event_writer.send(event).is_err() {
                                break;
                            }
                        }
                        Err(err) => {
                            log::warn!("failed to read terminal event: {err}");
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(err) => {
                        log::warn!("failed to poll terminal events: {err}");
                        break;
                    }
                }
                if !matches!(stop_receiver.try_recv(), Err(TryRecvError::Empty)) {
                    break;
                }
            }
        });

        (
            Self {
                handle: Some(handle),
                stop,
            },
            event_reader,
        )
    }
}

impl Drop for EventReader {
    fn drop(&mut self) {
        let _ = self.stop.send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

/// Routes `log` output to `path`, filtered by `RUST_LOG` (default `info`).
///
/// The terminal is in raw mode on the alternate screen while running, so logs never go
/// to stderr. Without a path, logging stays disabled.
pub fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()?;
    Ok(())
}

/// Sets up the terminal: alternate screen, raw mode, hidden cursor and, if `mouse` is
/// set, mouse capture.
///
/// It is recommended to call [`install_panic_handler`] after this function, and
/// [`terminal_cleanup`] when done.
///
/// Note: If you are stuck in a bad terminal state, you can try running `reset` in the terminal.
pub fn terminal_setup(mouse: bool) -> io::Result<()> {
    let mut stdout = stdout();

    execute!(stdout, crossterm::terminal::EnterAlternateScreen)?;
    enable_raw_mode()?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    execute!(stdout, cursor::Hide)?;

    Ok(())
}

/// Undoes everything [`terminal_setup`] did.
pub fn terminal_cleanup() -> io::Result<()> {
    let mut stdout = stdout();
    execute!(
        stdout,
        DisableMouseCapture,
        SetAttribute(Attribute::Reset),
        ResetColor,
        cursor::Show,
        crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
    )?;
    disable_raw_mode()?;
    execute!(stdout, crossterm::terminal::LeaveAlternateScreen)?;

    Ok(())
}

/// Installs a panic handler that restores the terminal before printing the panic.
///
/// Without this, the panic message would be lost on the alternate screen.
pub fn install_panic_handler() {
    let old_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = terminal_cleanup();
        old_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
    use std::sync::mpsc::channel;

    fn app(config: Config, size: Size) -> (App<Vec<u8>>, Sender<Event>) {
        let (tx, rx) = channel();
        let config = Config {
            seed: Some(1),
            ..config
        };
        (App::new(&config, size, Vec::new(), rx).unwrap(), tx)
    }

    fn key(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
    }

    #[test]
    fn test_tick_writes_and_swaps() {
        let (mut app, _tx) = app(Config::default(), Size::new(30, 10));
        assert_eq!(app.tick().unwrap(), None);
        assert!(!app.writer().sink().is_empty());
        // after the swap, the fresh current frame is blank
        assert!(app.buffer().get_cell(0, 0).is_some_and(|c| c.is_blank()));
    }

    #[test]
    fn test_quit_key() {
        let (mut app, tx) = app(Config::default(), Size::new(10, 5));
        tx.send(key('q')).unwrap();
        assert_eq!(app.tick().unwrap(), Some(BreakingAction::Quit));
    }

    #[test]
    fn test_closed_event_channel_quits() {
        let (mut app, tx) = app(Config::default(), Size::new(10, 5));
        drop(tx);
        assert_eq!(app.tick().unwrap(), Some(BreakingAction::Quit));
    }

    #[test]
    fn test_resize_event_reallocates() {
        let (mut app, tx) = app(Config::default(), Size::new(10, 5));
        app.tick().unwrap();
        tx.send(Event::Resize(40, 12)).unwrap();
        app.tick().unwrap();
        assert_eq!(app.buffer().size(), Size::new(40, 12));
        let out = String::from_utf8_lossy(app.writer().sink());
        assert_eq!(out.matches("\x1b[2J").count(), 2);
    }

    #[test]
    fn test_commands() {
        let (mut app, tx) = app(Config::default(), Size::new(20, 8));
        tx.send(key(' ')).unwrap();
        tx.send(key('t')).unwrap();
        tx.send(key('+')).unwrap();
        app.tick().unwrap();
        assert_eq!(app.pattern_name(), "starfield");
        assert_eq!(app.theme().name(), "matrix");
        assert_eq!(app.fps(), 35);

        for _ in 0..100 {
            tx.send(key('-')).unwrap();
        }
        app.tick().unwrap();
        assert_eq!(app.fps(), 1);
    }

    fn all_blank(app: &App<Vec<u8>>) -> bool {
        let size = app.buffer().size();
        (0..size.height() as i64).all(|y| {
            (0..size.width() as i64).all(|x| {
                app.buffer().get_cell(x, y).is_some_and(|c| c.is_blank())
                    && app.buffer().previous_cell(x, y).is_some_and(|c| c.is_blank())
            })
        })
    }

    #[test]
    fn test_force_redraw_forgets_history() {
        let (mut app, _tx) = app(Config::default(), Size::new(20, 8));
        app.tick().unwrap();
        assert!(!all_blank(&app));

        app.force_redraw();
        assert_eq!(app.buffer().size(), Size::new(20, 8));
        assert!(app.buffer().changes().is_empty());
        assert!(all_blank(&app));
    }

    #[test]
    fn test_redraw_key_repaints_everything() {
        let (mut app, tx) = app(Config::default(), Size::new(20, 8));
        app.tick().unwrap();
        app.tick().unwrap();
        let before = app.writer().sink().len();

        tx.send(key('r')).unwrap();
        app.tick().unwrap();
        let out = String::from_utf8_lossy(&app.writer().sink()[before..]);
        assert_eq!(out.matches("\x1b[2J").count(), 1);
        assert_eq!(app.pattern_name(), "waves");
    }

    #[test]
    fn test_theme_switch_repaints_everything() {
        let (mut app, tx) = app(Config::default(), Size::new(20, 8));
        app.tick().unwrap();
        let before = app.writer().sink().len();

        tx.send(key('t')).unwrap();
        app.tick().unwrap();
        let bg = app.theme().background();
        let out = String::from_utf8_lossy(&app.writer().sink()[before..]);
        let clear = out.find("\x1b[2J").unwrap();
        assert_eq!(out.matches("\x1b[2J").count(), 1);
        assert!(out[..clear].contains(&format!("48;2;{};{};{}", bg.r, bg.g, bg.b)));

        let total = String::from_utf8_lossy(app.writer().sink());
        assert_eq!(total.matches("\x1b[2J").count(), 2);
    }

    #[test]
    fn test_mouse_reaches_patterns_only_when_enabled() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 2,
            modifiers: KeyModifiers::NONE,
        });
        let config = Config {
            pattern: "particles".to_string(),
            ..Config::default()
        };

        let (mut enabled, tx) = app(config.clone(), Size::new(40, 20));
        tx.send(click.clone()).unwrap();
        enabled.tick().unwrap();

        let (mut disabled, tx) = app(
            Config {
                mouse: false,
                ..config
            },
            Size::new(40, 20),
        );
        tx.send(click).unwrap();
        disabled.tick().unwrap();

        assert!(enabled.writer().sink().len() > disabled.writer().sink().len());
    }
}
