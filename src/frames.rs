// SPDX-License-Identifier: MIT
//
// The animation frame table — a little ghost, hovering in place.
//
// Read-only content, not engine code: six frames of markup rows with
// `<color>` spans around the ghost's body. The fringe along the bottom
// alternates every frame, the mouth rounds mid-loop, and the eyes blink
// once per cycle — small per-frame deltas on purpose, so the diff
// presenter usually rewrites one or two rows out of ten.
//
// Shape invariants (uniform height, line length, balanced spans) are
// checked by `FrameSet::new` at startup and pinned by the tests in
// `main.rs`.

/// Frames in one animation cycle.
pub const FRAME_COUNT: usize = 6;

/// The frame table: `FRAME_COUNT` frames × 10 markup rows.
pub static FRAMES: [&[&str]; FRAME_COUNT] = [
    // Frame 0 — at rest.
    &[
        "   <color>.-~~~~~-.</color>",
        "  <color>/         \\</color>",
        " <color>|           |</color>",
        " <color>|   O   O   |</color>",
        " <color>|           |</color>",
        " <color>|     v     |</color>",
        " <color>|           |</color>",
        " <color>|           |</color>",
        "  <color>\\         /</color>",
        "   <color>\\_/\\_/\\_/</color>",
    ],
    // Frame 1 — fringe sways.
    &[
        "   <color>.-~~~~~-.</color>",
        "  <color>/         \\</color>",
        " <color>|           |</color>",
        " <color>|   O   O   |</color>",
        " <color>|           |</color>",
        " <color>|     v     |</color>",
        " <color>|           |</color>",
        " <color>|           |</color>",
        "  <color>\\         /</color>",
        "   <color>_/\\_/\\_/\\</color>",
    ],
    // Frame 2 — mouth rounds.
    &[
        "   <color>.-~~~~~-.</color>",
        "  <color>/         \\</color>",
        " <color>|           |</color>",
        " <color>|   O   O   |</color>",
        " <color>|           |</color>",
        " <color>|     o     |</color>",
        " <color>|           |</color>",
        " <color>|           |</color>",
        "  <color>\\         /</color>",
        "   <color>\\_/\\_/\\_/</color>",
    ],
    // Frame 3 — blink.
    &[
        "   <color>.-~~~~~-.</color>",
        "  <color>/         \\</color>",
        " <color>|           |</color>",
        " <color>|   -   -   |</color>",
        " <color>|           |</color>",
        " <color>|     o     |</color>",
        " <color>|           |</color>",
        " <color>|           |</color>",
        "  <color>\\         /</color>",
        "   <color>_/\\_/\\_/\\</color>",
    ],
    // Frame 4 — eyes open again.
    &[
        "   <color>.-~~~~~-.</color>",
        "  <color>/         \\</color>",
        " <color>|           |</color>",
        " <color>|   O   O   |</color>",
        " <color>|           |</color>",
        " <color>|     v     |</color>",
        " <color>|           |</color>",
        " <color>|           |</color>",
        "  <color>\\         /</color>",
        "   <color>\\_/\\_/\\_/</color>",
    ],
    // Frame 5 — fringe sways back.
    &[
        "   <color>.-~~~~~-.</color>",
        "  <color>/         \\</color>",
        " <color>|           |</color>",
        " <color>|   O   O   |</color>",
        " <color>|           |</color>",
        " <color>|     v     |</color>",
        " <color>|           |</color>",
        " <color>|           |</color>",
        "  <color>\\         /</color>",
        "   <color>_/\\_/\\_/\\</color>",
    ],
];
