// SPDX-License-Identifier: MIT
//
// wisp-term — terminal control for wisp.
//
// Direct terminal access via ANSI escape sequences and raw termios: no
// curses, no TUI framework. The animation engine needs exactly four
// capabilities from the terminal — raw-mode toggling, geometry queries,
// escape-sequence output, and non-blocking keyboard polling — and this
// crate provides each one behind a small, testable surface. Every byte
// sent to the terminal is accounted for.

pub mod ansi;
pub mod input;
pub mod output;
pub mod signal;
pub mod terminal;
