// SPDX-License-Identifier: MIT
//
// wisp — a looping ghost animation for the terminal.
//
// This is the lifecycle controller: it wires the crates together and owns
// every piece of mutable state the render loop touches.
//
//   wisp-term → raw mode, ANSI output, non-blocking input, signal flags
//   wisp-anim → layout, compositing, diff presentation, frame scheduling
//
// Each wake of the loop flows:
//
//   signal flags → (relayout | teardown)
//   frame clock  → compose changed frame → present diff → single flush
//   keyboard     → quit on q / Q / Ctrl-C
//   sleep half a frame period
//
// State machine:
//
//   UNINITIALIZED ─ geometry gate ─→ RUNNING ⇄ RESIZING
//                         │                │
//                         ↓                ↓ quit / interrupt / shrunk
//                      exit(1)        TERMINATING → terminal restored
//
// The terminal is never left in raw or alternate-screen mode: the same
// teardown runs for every trigger, the `Terminal` drop guard backs it up,
// and the panic hook covers crashes. An undersized terminal at launch is
// diagnosed on stderr before any mode change at all.

mod frames;

use std::io;
use std::process;
use std::thread;
use std::time::Instant;

use wisp_anim::clock::{FrameClock, WAKE_PERIOD};
use wisp_anim::compose;
use wisp_anim::frame::FrameSet;
use wisp_anim::layout::Layout;
use wisp_anim::present::ScreenBuffers;
use wisp_term::ansi;
use wisp_term::input::Keyboard;
use wisp_term::output::OutputBuffer;
use wisp_term::signal;
use wisp_term::terminal::{self, Size, Terminal};

/// Ctrl-C arrives as a raw byte with ISIG cleared.
const CTRL_C: u8 = 0x03;

/// Breathing room required around the image, per dimension.
const MIN_MARGIN: u16 = 2;

// ─── Shutdown ───────────────────────────────────────────────────────────────

/// Why the render loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shutdown {
    /// The user pressed a quit key.
    Quit,
    /// SIGINT or SIGTERM arrived.
    Interrupted,
    /// A resize left the terminal below the minimum size.
    TooSmall(Size),
}

// ─── Player ─────────────────────────────────────────────────────────────────

/// The renderer context — all mutable state, threaded explicitly.
///
/// One struct instead of file-scope globals: the signal handlers can't
/// alias any of this (they only set flags), and every method is testable
/// without a terminal.
struct Player {
    /// The validated frame table.
    frames: FrameSet,
    /// Centered placement for the current geometry.
    layout: Layout,
    /// Double-buffered resolved rows.
    buffers: ScreenBuffers,
    /// Wall-clock frame scheduler.
    clock: FrameClock,
    /// Index of the frame currently on screen; `None` forces a repaint.
    last_frame: Option<usize>,
    /// Current terminal geometry.
    size: Size,
}

impl Player {
    fn new(frames: FrameSet, size: Size) -> Self {
        Self {
            frames,
            layout: Layout::compute(size, frames.width(), frames.height()),
            buffers: ScreenBuffers::new(frames.height(), size.cols),
            clock: FrameClock::new(),
            last_frame: None,
            size,
        }
    }

    /// Resolve every row of frame `index` into the `next` buffer.
    fn compose(&mut self, index: usize) {
        for row in 0..self.buffers.height() {
            let markup = self.frames.row(index, usize::from(row));
            compose::resolve_into(
                self.buffers.next_row_mut(row),
                markup,
                self.layout.start_col,
                self.size.cols,
            );
        }
    }

    /// Write the diff against what's on screen; returns rows written.
    fn present(&mut self, out: &mut OutputBuffer) -> io::Result<usize> {
        self.buffers.present(self.layout, out)
    }

    /// Adopt a new geometry: recenter, reallocate buffers if the width
    /// changed, and invalidate so the next redraw repaints every row.
    ///
    /// The caller has already confirmed `size` meets the minimum and
    /// clears the physical screen right after.
    fn apply_resize(&mut self, size: Size) {
        self.size = size;
        self.layout = Layout::compute(size, self.frames.width(), self.frames.height());
        self.buffers.resize(size.cols);
        self.buffers.invalidate();
        self.last_frame = None;
    }
}

/// Smallest terminal the animation will run in.
fn min_size(frames: &FrameSet) -> Size {
    Size {
        cols: frames.width() + MIN_MARGIN,
        rows: frames.height() + MIN_MARGIN,
    }
}

// ─── Render loop ────────────────────────────────────────────────────────────

/// The steady-state loop: poll flags, redraw on frame change, drain input,
/// sleep. Returns why it stopped; the caller runs teardown either way.
fn run(
    term: &mut Terminal,
    player: &mut Player,
    keyboard: &mut Keyboard,
    out: &mut OutputBuffer,
) -> io::Result<Shutdown> {
    loop {
        // ── Asynchronous flags, handled at one safe point ────────
        if signal::take_interrupt() {
            return Ok(Shutdown::Interrupted);
        }
        if signal::take_resize() {
            let size = term.refresh_size();
            if !size.fits(min_size(&player.frames)) {
                return Ok(Shutdown::TooSmall(size));
            }
            player.apply_resize(size);
            ansi::clear_screen(out)?;
            ansi::cursor_home(out)?;
            out.flush_stdout()?;
        }

        // ── Redraw when the wall clock says the frame moved ──────
        let index = player
            .clock
            .frame_at(Instant::now(), player.frames.frame_count());
        if player.last_frame != Some(index) {
            player.compose(index);
            ansi::begin_sync(out)?;
            player.present(out)?;
            ansi::end_sync(out)?;
            out.flush_stdout()?;
            player.last_frame = Some(index);
        }

        // ── Drain pending input without blocking ─────────────────
        while keyboard.pending()? {
            let Some(byte) = keyboard.poll()? else { break };
            match byte {
                b'q' | b'Q' | CTRL_C => return Ok(Shutdown::Quit),
                _ => {} // Every other byte is discarded.
            }
        }

        thread::sleep(WAKE_PERIOD);
    }
}

/// Wipe the rows the image occupied, then restore the terminal.
///
/// Runs identically for every shutdown trigger — quit, interrupt, and
/// undersized resize all leave the terminal exactly as we found it.
fn teardown(term: &mut Terminal, player: &Player, out: &mut OutputBuffer) -> io::Result<()> {
    for row in 0..player.buffers.height() {
        ansi::cursor_to(out, 0, player.layout.start_row + row)?;
        ansi::erase_line_end(out)?;
    }
    out.flush_stdout()?;
    term.leave()
}

fn main() {
    let frames = FrameSet::new(&frames::FRAMES).unwrap_or_else(|e| {
        eprintln!("wisp: invalid frame table: {e}");
        process::exit(1);
    });

    signal::install_handlers();

    if !terminal::is_tty() {
        eprintln!("wisp: stdout is not a terminal");
        process::exit(1);
    }

    let mut term = Terminal::new().unwrap_or_else(|e| {
        eprintln!("wisp: failed to initialize terminal: {e}");
        process::exit(1);
    });

    // Geometry gate: diagnose an undersized terminal before touching any
    // terminal state, leaving the user's screen exactly as it was.
    let size = term.size();
    let min = min_size(&frames);
    if !size.fits(min) {
        eprintln!(
            "wisp: terminal too small: minimum required {}x{}, current {}x{}",
            min.cols, min.rows, size.cols, size.rows
        );
        process::exit(1);
    }

    if let Err(e) = term.enter() {
        eprintln!("wisp: failed to enter raw mode: {e}");
        process::exit(1);
    }

    let mut player = Player::new(frames, size);
    let mut keyboard = Keyboard::new();
    let mut out = OutputBuffer::new();

    let outcome = run(&mut term, &mut player, &mut keyboard, &mut out);

    // Teardown runs before the outcome is inspected so the diagnostic
    // (if any) prints to a restored terminal.
    if let Err(e) = teardown(&mut term, &player, &mut out) {
        eprintln!("wisp: failed to restore terminal: {e}");
    }

    match outcome {
        Ok(Shutdown::Quit | Shutdown::Interrupted) => {}
        Ok(Shutdown::TooSmall(size)) => {
            eprintln!(
                "wisp: terminal too small: minimum required {}x{}, current {}x{}",
                min.cols, min.rows, size.cols, size.rows
            );
            process::exit(1);
        }
        Err(e) => {
            eprintln!("wisp: {e}");
            process::exit(1);
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use wisp_anim::frame::MAX_LINE_LENGTH;

    use super::*;

    fn player_at(cols: u16, rows: u16) -> Player {
        let frames = FrameSet::new(&frames::FRAMES).unwrap();
        Player::new(frames, Size { cols, rows })
    }

    fn present_count(player: &mut Player) -> usize {
        let mut out = OutputBuffer::new();
        player.present(&mut out).unwrap()
    }

    /// Display columns of a resolved row: drop the escape sequences,
    /// count what's left (the asset is ASCII, one column per char).
    fn visible_width(row: &str) -> usize {
        row.replace(ansi::FG_BLUE, "")
            .replace(ansi::SGR_RESET, "")
            .chars()
            .count()
    }

    // ── Frame table asset ─────────────────────────────────────────────

    #[test]
    fn frame_table_is_valid() {
        let frames = FrameSet::new(&frames::FRAMES).unwrap();
        assert_eq!(frames.frame_count(), frames::FRAME_COUNT);
        assert_eq!(frames.height(), 10);
        assert_eq!(frames.width(), 14);
    }

    #[test]
    fn every_row_resolves_within_bounds() {
        let frames = FrameSet::new(&frames::FRAMES).unwrap();
        for frame in 0..frames.frame_count() {
            for row in 0..usize::from(frames.height()) {
                let resolved = compose::resolve(frames.row(frame, row), 0, frames.width());
                assert!(
                    resolved.len() <= 2 * MAX_LINE_LENGTH,
                    "frame {frame} row {row} resolved to {} bytes",
                    resolved.len()
                );
                assert!(!resolved.contains(compose::OPEN_MARKER));
                assert!(!resolved.contains(compose::CLOSE_MARKER));
            }
        }
    }

    // ── Startup geometry ──────────────────────────────────────────────

    #[test]
    fn player_centers_in_startup_geometry() {
        let player = player_at(120, 60);
        assert_eq!(
            player.layout,
            Layout {
                start_row: 25,
                start_col: 53
            }
        );
    }

    #[test]
    fn min_size_adds_margin() {
        let frames = FrameSet::new(&frames::FRAMES).unwrap();
        let min = min_size(&frames);
        assert_eq!(min.cols, frames.width() + MIN_MARGIN);
        assert_eq!(min.rows, frames.height() + MIN_MARGIN);
    }

    #[test]
    fn undersized_terminal_fails_the_gate() {
        let frames = FrameSet::new(&frames::FRAMES).unwrap();
        let min = min_size(&frames);
        let small = Size {
            cols: min.cols - 1,
            rows: min.rows,
        };
        assert!(!small.fits(min));
    }

    // ── Composition + presentation ────────────────────────────────────

    #[test]
    fn first_redraw_paints_every_row() {
        let mut player = player_at(120, 60);
        player.compose(0);
        assert_eq!(present_count(&mut player), 10);
    }

    #[test]
    fn fringe_sway_rewrites_one_row() {
        // Frames 0 and 1 differ only in the bottom fringe.
        let mut player = player_at(120, 60);
        player.compose(0);
        present_count(&mut player);

        player.compose(1);
        assert_eq!(present_count(&mut player), 1);
    }

    #[test]
    fn blink_rewrites_eye_and_fringe_rows() {
        // Frames 2 and 3 differ in the eye row and the fringe row.
        let mut player = player_at(120, 60);
        player.compose(2);
        present_count(&mut player);

        player.compose(3);
        assert_eq!(present_count(&mut player), 2);
    }

    #[test]
    fn steady_frame_rewrites_nothing() {
        let mut player = player_at(120, 60);
        player.compose(0);
        present_count(&mut player);

        player.compose(0);
        assert_eq!(present_count(&mut player), 0);
    }

    #[test]
    fn composed_row_is_padded_to_terminal_width() {
        let mut player = player_at(120, 60);
        player.compose(0);
        let row = player.buffers.next_row_mut(0).clone();

        // start_col of padding, then the row's own leading spaces, then
        // the colored top of the ghost.
        assert!(row.starts_with(&" ".repeat(56)));
        assert!(row.contains(ansi::FG_BLUE));
        assert!(row.contains(".-~~~~~-."));
        assert!(row.ends_with(' '));
        assert_eq!(visible_width(&row), 120);
    }

    // ── Resize ────────────────────────────────────────────────────────

    #[test]
    fn width_resize_reallocates_and_repaints() {
        let mut player = player_at(120, 60);
        player.compose(0);
        present_count(&mut player);

        player.apply_resize(Size {
            cols: 140,
            rows: 60,
        });
        assert_eq!(player.buffers.width(), 140);
        assert_eq!(player.last_frame, None);

        player.compose(0);
        assert_eq!(
            present_count(&mut player),
            10,
            "full repaint after width change"
        );
    }

    #[test]
    fn height_only_resize_recenters_and_repaints() {
        let mut player = player_at(120, 60);
        player.compose(0);
        present_count(&mut player);

        let before = player.layout;
        player.apply_resize(Size {
            cols: 120,
            rows: 30,
        });

        assert_eq!(player.buffers.width(), 120);
        assert_ne!(player.layout.start_row, before.start_row);
        assert_eq!(player.layout.start_col, before.start_col);

        // Rows moved on screen, so every row must repaint even though
        // the width (and the resolved content) did not change.
        player.compose(0);
        assert_eq!(present_count(&mut player), 10);
    }

    #[test]
    fn resize_recenters_horizontally() {
        let mut player = player_at(120, 60);
        player.apply_resize(Size { cols: 20, rows: 60 });
        assert_eq!(player.layout.start_col, 3);

        player.compose(0);
        let row = player.buffers.next_row_mut(2).clone();
        assert_eq!(visible_width(&row), 20);
    }

    // ── Shutdown reasons ──────────────────────────────────────────────

    #[test]
    fn shutdown_carries_the_offending_size() {
        let shrunk = Size { cols: 10, rows: 5 };
        let s = Shutdown::TooSmall(shrunk);
        assert_eq!(s, Shutdown::TooSmall(shrunk));
        assert_ne!(s, Shutdown::Quit);
    }

    #[test]
    fn quit_bytes_are_exactly_q_and_ctrl_c() {
        let quits = |b: u8| matches!(b, b'q' | b'Q' | CTRL_C);
        assert!(quits(b'q'));
        assert!(quits(b'Q'));
        assert!(quits(0x03));
        assert!(!quits(b'x'));
        assert!(!quits(b' '));
        assert!(!quits(0x1b));
    }
}
