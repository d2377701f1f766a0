// SPDX-License-Identifier: MIT
//
// Double-buffered diff presentation — the heart of redraw performance.
//
// Two row buffers: `current` mirrors exactly what's on screen, `next` is
// the frame being assembled. Presenting compares them row by row and
// emits terminal writes only for rows whose resolved content changed —
// cursor move, row bytes, erase-to-end-of-line — then swaps the new row
// into `current`. Between most consecutive ghost frames only a handful
// of rows differ, so a redraw costs a few row writes instead of a
// full-screen repaint.
//
// All emission lands in the caller's `OutputBuffer`; nothing touches the
// terminal here. The lifecycle controller wraps the presentation in
// synchronized-output markers and flushes once per frame.
//
// Resize is the delicate path: when the terminal width changes, both
// buffers are released and reallocated at the new width before any
// further presenting — and because resize is flag-and-poll, no signal
// handler can ever observe the buffers mid-swap.

use std::io;
use std::mem;

use wisp_term::ansi;
use wisp_term::output::OutputBuffer;

use crate::layout::Layout;

/// Extra row capacity beyond the terminal width, covering the escape
/// sequences a resolved row carries on top of its glyphs.
const ESCAPE_HEADROOM: usize = 32;

/// The pair of per-row display buffers owned by the lifecycle controller.
pub struct ScreenBuffers {
    /// What the terminal currently shows, row by row.
    current: Vec<String>,
    /// The frame being assembled for the next present.
    next: Vec<String>,
    /// Terminal width the rows were allocated for.
    width: u16,
}

impl ScreenBuffers {
    /// Allocate both buffers: `height` rows sized for a `width`-column
    /// terminal. All rows start empty, so the first present repaints
    /// everything.
    #[must_use]
    pub fn new(height: u16, width: u16) -> Self {
        Self {
            current: alloc_rows(height, width),
            next: alloc_rows(height, width),
            width,
        }
    }

    /// Number of rows in each buffer (the image height).
    #[inline]
    #[must_use]
    pub fn height(&self) -> u16 {
        // Allocated from a u16, so the narrowing is lossless.
        u16::try_from(self.current.len()).unwrap_or(u16::MAX)
    }

    /// Terminal width the buffers are currently sized for.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Reallocate both buffers for a new terminal width.
    ///
    /// No-op when the width is unchanged. Otherwise the old rows are
    /// released first, then fresh empty rows are allocated — never both
    /// generations alive at once. The empty rows double as invalidation:
    /// the next present repaints every row.
    pub fn resize(&mut self, width: u16) {
        if width == self.width {
            return;
        }
        let height = self.height();

        // Free the old generation before allocating the new one.
        self.current = Vec::new();
        self.next = Vec::new();

        self.current = alloc_rows(height, width);
        self.next = alloc_rows(height, width);
        self.width = width;
    }

    /// Forget what's on screen: clear every `current` row so the next
    /// present treats every row as changed.
    ///
    /// Called after the physical screen is cleared (resize relayout) —
    /// `current` must keep mirroring the actual display, which is now
    /// blank.
    pub fn invalidate(&mut self) {
        for row in &mut self.current {
            row.clear();
        }
    }

    /// Mutable access to a `next` row, for the compositor to fill.
    ///
    /// # Panics
    ///
    /// Panics if `row` is out of range.
    #[inline]
    pub fn next_row_mut(&mut self, row: u16) -> &mut String {
        &mut self.next[usize::from(row)]
    }

    /// Write every changed row to `out` and commit `next` as current.
    ///
    /// Per changed row: cursor move to `(start_row + i, column 1)`, the
    /// row's bytes, then erase-to-end-of-line to wipe stale trailing
    /// glyphs from a previous, wider frame. Unchanged rows emit nothing.
    /// Returns the number of rows written.
    ///
    /// # Errors
    ///
    /// Propagates writer errors (infallible for an in-memory buffer).
    pub fn present(&mut self, layout: Layout, out: &mut OutputBuffer) -> io::Result<usize> {
        let mut written = 0;
        for (i, (cur, next)) in self.current.iter_mut().zip(&mut self.next).enumerate() {
            if cur == next {
                continue;
            }
            #[allow(clippy::cast_possible_truncation)] // i < height, a u16.
            ansi::cursor_to(out, 0, layout.start_row + i as u16)?;
            io::Write::write_all(out, next.as_bytes())?;
            ansi::erase_line_end(out)?;

            // The freshly written row becomes the on-screen truth; the
            // old current row's allocation is recycled as scratch for
            // the next compose.
            mem::swap(cur, next);
            written += 1;
        }
        Ok(written)
    }
}

/// `height` empty rows, each with capacity for a full-width resolved row.
fn alloc_rows(height: u16, width: u16) -> Vec<String> {
    (0..height)
        .map(|_| String::with_capacity(usize::from(width) + ESCAPE_HEADROOM))
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn layout(start_row: u16, start_col: u16) -> Layout {
        Layout {
            start_row,
            start_col,
        }
    }

    /// Fill a `next` row and return the buffers ready to present.
    fn fill(buffers: &mut ScreenBuffers, row: u16, content: &str) {
        let slot = buffers.next_row_mut(row);
        slot.clear();
        slot.push_str(content);
    }

    fn present_to_string(buffers: &mut ScreenBuffers, lay: Layout) -> (usize, String) {
        let mut out = OutputBuffer::new();
        let written = buffers.present(lay, &mut out).unwrap();
        (written, String::from_utf8(out.as_bytes().to_vec()).unwrap())
    }

    // ── First present ───────────────────────────────────────────────────

    #[test]
    fn first_present_writes_every_row() {
        let mut buffers = ScreenBuffers::new(3, 20);
        for i in 0..3 {
            fill(&mut buffers, i, "row");
        }
        let (written, _) = present_to_string(&mut buffers, layout(0, 0));
        assert_eq!(written, 3);
    }

    #[test]
    fn row_write_has_position_content_erase() {
        let mut buffers = ScreenBuffers::new(1, 20);
        fill(&mut buffers, 0, "ghost");
        let (_, out) = present_to_string(&mut buffers, layout(5, 0));
        // Row 0 lands at terminal row start_row + 0 → ANSI row 6, col 1.
        assert_eq!(out, "\x1b[6;1Hghost\x1b[K");
    }

    // ── Diffing ─────────────────────────────────────────────────────────

    #[test]
    fn unchanged_rows_emit_nothing() {
        let mut buffers = ScreenBuffers::new(4, 20);
        for i in 0..4 {
            fill(&mut buffers, i, "same");
        }
        present_to_string(&mut buffers, layout(0, 0));

        // Recompose identical content.
        for i in 0..4 {
            fill(&mut buffers, i, "same");
        }
        let (written, out) = present_to_string(&mut buffers, layout(0, 0));
        assert_eq!(written, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn exactly_the_changed_rows_are_written() {
        // Buffers differing in exactly rows {2, 5} issue exactly two
        // row writes.
        let mut buffers = ScreenBuffers::new(7, 20);
        for i in 0..7 {
            fill(&mut buffers, i, "base");
        }
        present_to_string(&mut buffers, layout(0, 0));

        for i in 0..7 {
            let content = if i == 2 || i == 5 { "changed" } else { "base" };
            fill(&mut buffers, i, content);
        }
        let (written, out) = present_to_string(&mut buffers, layout(10, 0));
        assert_eq!(written, 2);
        assert_eq!(out.matches("\x1b[K").count(), 2);
        assert!(out.contains("\x1b[13;1H")); // row 2 → terminal row 13
        assert!(out.contains("\x1b[16;1H")); // row 5 → terminal row 16
    }

    #[test]
    fn present_commits_next_as_current() {
        let mut buffers = ScreenBuffers::new(1, 20);
        fill(&mut buffers, 0, "one");
        present_to_string(&mut buffers, layout(0, 0));

        // Same content again: committed, so nothing to redraw.
        fill(&mut buffers, 0, "one");
        let (written, _) = present_to_string(&mut buffers, layout(0, 0));
        assert_eq!(written, 0);

        // Different content: redrawn.
        fill(&mut buffers, 0, "two");
        let (written, _) = present_to_string(&mut buffers, layout(0, 0));
        assert_eq!(written, 1);
    }

    #[test]
    fn revert_to_prior_content_is_a_change() {
        let mut buffers = ScreenBuffers::new(1, 20);
        fill(&mut buffers, 0, "a");
        present_to_string(&mut buffers, layout(0, 0));
        fill(&mut buffers, 0, "b");
        present_to_string(&mut buffers, layout(0, 0));
        fill(&mut buffers, 0, "a");
        let (written, _) = present_to_string(&mut buffers, layout(0, 0));
        assert_eq!(written, 1);
    }

    // ── Invalidation ────────────────────────────────────────────────────

    #[test]
    fn invalidate_forces_full_repaint() {
        let mut buffers = ScreenBuffers::new(3, 20);
        for i in 0..3 {
            fill(&mut buffers, i, "steady");
        }
        present_to_string(&mut buffers, layout(0, 0));

        buffers.invalidate();
        for i in 0..3 {
            fill(&mut buffers, i, "steady");
        }
        let (written, _) = present_to_string(&mut buffers, layout(0, 0));
        assert_eq!(written, 3);
    }

    // ── Resize ──────────────────────────────────────────────────────────

    #[test]
    fn resize_changes_width_and_repaints_everything() {
        let mut buffers = ScreenBuffers::new(2, 40);
        for i in 0..2 {
            fill(&mut buffers, i, "wide");
        }
        present_to_string(&mut buffers, layout(0, 0));

        buffers.resize(60);
        assert_eq!(buffers.width(), 60);
        assert_eq!(buffers.height(), 2);

        for i in 0..2 {
            fill(&mut buffers, i, "wide");
        }
        let (written, _) = present_to_string(&mut buffers, layout(0, 0));
        assert_eq!(written, 2, "every row repaints after a width change");
    }

    #[test]
    fn resize_to_same_width_keeps_diff_state() {
        let mut buffers = ScreenBuffers::new(2, 40);
        for i in 0..2 {
            fill(&mut buffers, i, "kept");
        }
        present_to_string(&mut buffers, layout(0, 0));

        buffers.resize(40); // No-op.

        for i in 0..2 {
            fill(&mut buffers, i, "kept");
        }
        let (written, _) = present_to_string(&mut buffers, layout(0, 0));
        assert_eq!(written, 0);
    }

    // ── Geometry ────────────────────────────────────────────────────────

    #[test]
    fn rows_are_offset_by_start_row() {
        let mut buffers = ScreenBuffers::new(2, 20);
        fill(&mut buffers, 0, "a");
        fill(&mut buffers, 1, "b");
        let (_, out) = present_to_string(&mut buffers, layout(25, 0));
        assert!(out.contains("\x1b[26;1H"));
        assert!(out.contains("\x1b[27;1H"));
    }

    #[test]
    fn writes_always_target_column_one() {
        // Horizontal placement is baked into the resolved row's padding;
        // the cursor always homes to column 1.
        let mut buffers = ScreenBuffers::new(1, 20);
        fill(&mut buffers, 0, "   padded");
        let (_, out) = present_to_string(&mut buffers, layout(0, 3));
        assert!(out.starts_with("\x1b[1;1H"));
    }
}
