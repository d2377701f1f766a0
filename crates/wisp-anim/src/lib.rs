// SPDX-License-Identifier: MIT
//
// wisp-anim — the animation engine.
//
// Everything between the frame table and the terminal: centering layout,
// markup-to-escape compositing, double-buffered diff presentation, and
// wall-clock frame scheduling. The engine is pure with respect to the
// terminal — it writes ANSI bytes into an `OutputBuffer` and never touches
// stdout itself, which is what makes every stage testable byte-for-byte.
//
// The lifecycle controller (the `wisp` binary) owns all of this state and
// threads it through explicitly. No module here keeps globals.

pub mod clock;
pub mod compose;
pub mod frame;
pub mod layout;
pub mod present;
