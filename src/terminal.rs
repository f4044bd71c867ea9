//! Owning the terminal for the length of the show, and the frame loop.

use std::io::{BufWriter, Stdout, stdout};
use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr as _};
use crossterm::{
    cursor::{Hide, Show},
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use crate::app::BirthdayApp;
use crate::canvas::{PixelCanvas, Viewport};
use crate::clock::AnimationClock;
use crate::constants::FPS;
use crate::input;

/// Raw mode, alternate screen, hidden cursor and mouse capture, all undone on
/// drop so a failing frame still leaves a usable shell behind.
pub struct TerminalSession {
    out: BufWriter<Stdout>,
}

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        let mut out = BufWriter::with_capacity(1024 * 64, stdout());
        terminal::enable_raw_mode().wrap_err("Couldn't enable raw mode")?;
        execute!(
            out,
            EnterAlternateScreen,
            Hide,
            Clear(ClearType::All),
            EnableMouseCapture
        )?;
        tracing::debug!("Terminal session started");
        Ok(Self { out })
    }

    pub fn viewport() -> Result<Viewport> {
        let (cols, rows) = terminal::size().wrap_err("Couldn't read the terminal size")?;
        Ok(Viewport::new(cols, rows))
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let result = execute!(self.out, Show, LeaveAlternateScreen, DisableMouseCapture);
        if let Err(error) = result {
            tracing::error!("Couldn't restore the screen: {error:?}");
        }
        if let Err(error) = terminal::disable_raw_mode() {
            tracing::error!("Couldn't disable raw mode: {error:?}");
        }
        tracing::debug!("Terminal session ended");
    }
}

/// Run the celebration until the user quits.
pub fn run(app: &mut BirthdayApp) -> Result<()> {
    let mut session = TerminalSession::enter()?;
    let mut canvas = PixelCanvas::new(TerminalSession::viewport()?);
    let mut clock = AnimationClock::new(FPS);
    tracing::debug!("Frame budget {:?}", clock.frame_duration());

    while app.is_running() {
        while event::poll(Duration::ZERO)? {
            let event = event::read()?;
            if let Event::Resize(cols, rows) = event {
                tracing::debug!("Resized to {cols}x{rows}");
                canvas.resize(Viewport::new(cols, rows));
                execute!(session.out, Clear(ClearType::All))?;
                continue;
            }
            if let Some(input) = input::translate(&event, canvas.viewport()) {
                app.handle_input(input);
            }
        }
        if !app.is_running() {
            break;
        }

        app.update();

        canvas.clear();
        app.draw(&mut canvas);
        canvas.present(&mut session.out)?;

        clock.wait_for_next_frame();
    }

    tracing::info!("Stopped after {} frames", clock.frames());
    Ok(())
}
