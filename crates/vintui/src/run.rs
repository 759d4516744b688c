#![forbid(unsafe_code)]

//! The main loop.
//!
//! Strictly single-threaded: block for an event, dispatch it, render,
//! present, repeat. `Ctrl-C` exits immediately; a handler calling
//! [`Tui::stop`] lets the current dispatch finish, renders once more,
//! and then exits.

use vintui_core::{Event, Size};
use vintui_render::Buffer;
use vintui_style::PairCache;

use crate::backend::Backend;
use crate::error::Error;
use crate::tree::Tui;

impl Tui {
    /// Run the interface until stopped.
    ///
    /// The backend is entered and left around the loop; the terminal is
    /// restored even when the loop errors out.
    pub fn run<B: Backend>(&mut self, backend: &mut B) -> Result<(), Error> {
        backend.enter()?;

        let result = self.run_loop(backend);
        let restored = backend.leave().map_err(Error::from);

        result.and(restored)
    }

    fn run_loop<B: Backend>(&mut self, backend: &mut B) -> Result<(), Error> {
        self.pairs = PairCache::new(backend.max_pairs());
        self.size = backend.size()?;
        self.running = true;

        let mut buffer = Buffer::new(self.size.w, self.size.h);

        self.render_frame(&mut buffer);
        backend.present(&buffer, &self.pairs, &self.cursor)?;

        while self.running {
            match backend.read_event()? {
                Event::Key(key) if key.is_ctrl('c') => {
                    self.running = false;
                    break;
                }
                Event::Resize { w, h } => {
                    self.size = Size::new(w, h);
                    self.relayout();
                }
                Event::Key(key) => {
                    // Tab navigation is the fallback for unconsumed keys.
                    if !self.dispatch_key(key) {
                        self.tab_event(key);
                    }
                }
            }

            self.render_frame(&mut buffer);
            backend.present(&buffer, &self.pairs, &self.cursor)?;
        }

        Ok(())
    }
}
