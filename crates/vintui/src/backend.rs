#![forbid(unsafe_code)]

//! Terminal backends.
//!
//! The main loop talks to the terminal through the [`Backend`] trait:
//! report a size, deliver blocking events, and present a finished frame.
//! [`CrosstermBackend`] drives a real terminal; [`TestBackend`] replays a
//! scripted event stream and captures every presented frame, which is
//! what the integration tests run against.

use std::collections::VecDeque;
use std::io::{self, Write};

use crossterm::{cursor, queue, style, terminal};

use vintui_core::{Event, KeyCode, KeyEvent, Modifiers, Size};
use vintui_render::Buffer;
use vintui_style::{PairCache, PairId};

use crate::tree::Cursor;

/// The terminal contract the main loop needs.
pub trait Backend {
    /// Prepare the terminal (raw mode, alternate screen).
    fn enter(&mut self) -> io::Result<()>;

    /// Restore the terminal.
    fn leave(&mut self) -> io::Result<()>;

    /// Current terminal size.
    fn size(&self) -> io::Result<Size>;

    /// How many color pairs the terminal can hold.
    fn max_pairs(&self) -> usize;

    /// Block until the next event the toolkit understands.
    fn read_event(&mut self) -> io::Result<Event>;

    /// Put a finished frame on screen.
    fn present(&mut self, buffer: &Buffer, pairs: &PairCache, cursor: &Cursor) -> io::Result<()>;
}

/// Backend over a real terminal via crossterm.
pub struct CrosstermBackend<W: Write> {
    out: W,
}

impl<W: Write> CrosstermBackend<W> {
    /// Wrap a writer (normally stdout).
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn queue_pair(&mut self, pairs: &PairCache, pair: PairId) -> io::Result<()> {
        let colors = pairs.get(pair);

        match colors.fg.terminal_index() {
            Some(index) => queue!(
                self.out,
                style::SetForegroundColor(style::Color::AnsiValue(index))
            )?,
            None => queue!(self.out, style::SetForegroundColor(style::Color::Reset))?,
        }

        match colors.bg.terminal_index() {
            Some(index) => queue!(
                self.out,
                style::SetBackgroundColor(style::Color::AnsiValue(index))
            )?,
            None => queue!(self.out, style::SetBackgroundColor(style::Color::Reset))?,
        }

        Ok(())
    }
}

impl CrosstermBackend<io::Stdout> {
    /// Backend on stdout.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Backend for CrosstermBackend<W> {
    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        queue!(
            self.out,
            terminal::EnterAlternateScreen,
            terminal::Clear(terminal::ClearType::All),
            cursor::Hide
        )?;
        self.out.flush()
    }

    fn leave(&mut self) -> io::Result<()> {
        queue!(
            self.out,
            style::ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()
    }

    fn size(&self) -> io::Result<Size> {
        let (w, h) = terminal::size()?;
        Ok(Size::new(i32::from(w), i32::from(h)))
    }

    fn max_pairs(&self) -> usize {
        256
    }

    fn read_event(&mut self) -> io::Result<Event> {
        loop {
            if let Some(event) = Event::from_crossterm(crossterm::event::read()?) {
                return Ok(event);
            }
        }
    }

    fn present(&mut self, buffer: &Buffer, pairs: &PairCache, cursor: &Cursor) -> io::Result<()> {
        queue!(self.out, cursor::Hide)?;

        let mut last_pair: Option<PairId> = None;

        for y in 0..buffer.height() {
            queue!(self.out, cursor::MoveTo(0, y as u16))?;

            for x in 0..buffer.width() {
                let cell = buffer.get(x, y).copied().unwrap_or_default();

                if last_pair != Some(cell.pair) {
                    self.queue_pair(pairs, cell.pair)?;
                    last_pair = Some(cell.pair);
                }

                queue!(self.out, style::Print(cell.symbol))?;
            }
        }

        if cursor.is_active
            && cursor.x >= 0
            && cursor.x < buffer.width()
            && cursor.y >= 0
            && cursor.y < buffer.height()
        {
            queue!(
                self.out,
                cursor::MoveTo(cursor.x as u16, cursor.y as u16),
                cursor::Show
            )?;
        }

        self.out.flush()
    }
}

/// Scripted backend for tests and headless runs.
///
/// Events are replayed in order; when the script runs dry a `Ctrl-C`
/// arrives so the main loop always terminates. Presented frames are
/// captured as display strings.
pub struct TestBackend {
    size: Size,
    events: VecDeque<Event>,
    /// Every presented frame, in order, as [`Buffer::to_display_string`].
    pub frames: Vec<String>,
    /// The cursor state of the last present.
    pub last_cursor: Cursor,
}

impl TestBackend {
    /// A backend reporting the given screen size.
    #[must_use]
    pub fn new(w: i32, h: i32) -> Self {
        Self {
            size: Size::new(w, h),
            events: VecDeque::new(),
            frames: Vec::new(),
            last_cursor: Cursor::default(),
        }
    }

    /// Queue an event for the script.
    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Queue a plain key press.
    pub fn push_key(&mut self, code: KeyCode) {
        self.push_event(Event::Key(KeyEvent::new(code)));
    }

    /// The last presented frame, if any.
    #[must_use]
    pub fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

impl Backend for TestBackend {
    fn enter(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn leave(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn size(&self) -> io::Result<Size> {
        Ok(self.size)
    }

    fn max_pairs(&self) -> usize {
        256
    }

    fn read_event(&mut self) -> io::Result<Event> {
        Ok(self.events.pop_front().unwrap_or(Event::Key(
            KeyEvent::new(KeyCode::Char('c')).with_modifiers(Modifiers::CTRL),
        )))
    }

    fn present(&mut self, buffer: &Buffer, _pairs: &PairCache, cursor: &Cursor) -> io::Result<()> {
        self.frames.push(buffer.to_display_string());
        self.last_cursor = *cursor;
        Ok(())
    }
}
