//! Terminal output: log holding while the skeleton is on screen, and the redraw itself.

use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use crossterm::cursor::MoveUp;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tracing_subscriber::fmt::MakeWriter;

use crate::render::Grid;

/// Log writer for stderr that can be told to buffer instead of write.
///
/// While held, log lines are kept in memory so they cannot land between the skeleton
/// and the final grid; `release` writes them out afterwards.
#[derive(Debug, Clone, Default)]
pub struct LogGate {
    held: Arc<Mutex<Option<Vec<u8>>>>,
}

impl LogGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(&self) {
        let mut held = self.lock();
        if held.is_none() {
            *held = Some(Vec::new());
        }
    }

    pub fn is_held(&self) -> bool {
        self.lock().is_some()
    }

    /// Stop buffering and write everything held so far to stderr.
    pub fn release(&self) -> io::Result<()> {
        self.release_into(&mut io::stderr().lock())
    }

    pub fn release_into<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let buffered = self.lock().take();
        match buffered {
            Some(bytes) if !bytes.is_empty() => {
                out.write_all(&bytes)?;
                out.flush()
            }
            _ => Ok(()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<Vec<u8>>> {
        self.held.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub struct GateWriter {
    gate: LogGate,
}

impl Write for GateWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(pending) = self.gate.lock().as_mut() {
            pending.extend_from_slice(buf);
            return Ok(buf.len());
        }
        io::stderr().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for LogGate {
    type Writer = GateWriter;

    fn make_writer(&'a self) -> Self::Writer {
        GateWriter { gate: self.clone() }
    }
}

/// Draw a grid and return how many lines it took.
pub fn draw<W: Write>(out: &mut W, grid: &Grid) -> io::Result<usize> {
    write!(out, "{}", grid)?;
    out.flush()?;
    Ok(grid.height())
}

/// Move back over `previous_height` lines, clear them, and draw `grid` in their place.
pub fn redraw<W: Write>(out: &mut W, previous_height: usize, grid: &Grid) -> io::Result<usize> {
    if previous_height > 0 {
        let up = u16::try_from(previous_height).unwrap_or(u16::MAX);
        queue!(out, MoveUp(up), Clear(ClearType::FromCursorDown))?;
    }
    draw(out, grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, Layout};
    use crate::state::{reduce, Action, ViewState};

    #[test]
    fn held_lines_are_buffered_until_release() {
        let gate = LogGate::new();
        gate.hold();
        assert!(gate.is_held());

        let mut writer = gate.make_writer();
        writer.write_all(b"ERROR Schedule request failed\n").unwrap();
        writer.write_all(b"ERROR Error fetching games\n").unwrap();

        let mut out = Vec::new();
        gate.release_into(&mut out).unwrap();
        assert!(!gate.is_held());
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ERROR Schedule request failed\nERROR Error fetching games\n"
        );

        // Nothing left to replay the second time
        let mut again = Vec::new();
        gate.release_into(&mut again).unwrap();
        assert!(again.is_empty());
    }

    #[test]
    fn subscriber_output_goes_through_the_gate() {
        let gate = LogGate::new();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(gate.clone())
            .with_ansi(false)
            .with_target(false)
            .finish();

        gate.hold();
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(error = "refused", "Error fetching games");
        });

        let mut out = Vec::new();
        gate.release_into(&mut out).unwrap();
        let logged = String::from_utf8(out).unwrap();
        assert!(logged.contains("Error fetching games"), "logged: {}", logged);
        assert!(logged.contains("refused"), "logged: {}", logged);
    }

    #[test]
    fn redraw_moves_up_exactly_the_skeleton_height() {
        let layout = Layout::fixed(3);
        let skeleton = render(&ViewState::initial(), layout);
        let failed = render(&reduce(ViewState::initial(), Action::FetchFailed("x".into())), layout);

        let mut out = Vec::new();
        let height = draw(&mut out, &skeleton).unwrap();
        assert_eq!(height, 12);

        out.clear();
        redraw(&mut out, height, &failed).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("\u{1b}[12A\u{1b}[J"), "output was: {:?}", text);
        assert!(text.ends_with(&failed.to_string()));
    }
}
