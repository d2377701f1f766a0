// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Non-blocking keyboard polling.
//
// The render loop must never block on input: it wakes on a fixed cadence,
// drains whatever bytes are pending on stdin, and goes back to sleep.
// `poll(2)` with a zero timeout answers "is a byte waiting?" without
// consuming anything; a one-byte `read(2)` then fetches it. Raw mode
// (VMIN=1) guarantees that read returns immediately once poll reports
// readability.
//
// A one-byte push-back slot mirrors stdio's ungetc: a byte that was
// examined but not consumed is returned by the next poll. The lifecycle
// controller uses this for its peek-then-read input drain.

use std::io;

/// Non-blocking keyboard poller over raw stdin.
///
/// Only meaningful while the terminal is in raw mode — in canonical mode
/// bytes sit in the line buffer until Enter and `poll` won't see them.
#[derive(Debug, Default)]
pub struct Keyboard {
    /// Byte returned by the next [`poll`](Self::poll) before stdin is
    /// consulted again.
    pushback: Option<u8>,
}

impl Keyboard {
    /// Create a poller with an empty push-back slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { pushback: None }
    }

    /// Return a pending byte, or `None` if no input is waiting.
    ///
    /// Never blocks. The push-back slot, if occupied, is drained first.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying `read` fails for a reason other
    /// than "no data" (`EAGAIN`) or an interrupting signal (`EINTR`) —
    /// both of those simply yield `None`.
    pub fn poll(&mut self) -> io::Result<Option<u8>> {
        if let Some(byte) = self.pushback.take() {
            return Ok(Some(byte));
        }
        read_byte_nonblocking()
    }

    /// Check whether a byte is waiting without consuming it.
    ///
    /// Reads one byte and parks it in the push-back slot, so a following
    /// [`poll`](Self::poll) returns exactly that byte.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`poll`](Self::poll).
    pub fn pending(&mut self) -> io::Result<bool> {
        if self.pushback.is_some() {
            return Ok(true);
        }
        match read_byte_nonblocking()? {
            Some(byte) => {
                self.pushback = Some(byte);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Return a byte to the poller; the next [`poll`](Self::poll) yields it.
    ///
    /// Only one byte can be parked — pushing while the slot is occupied
    /// replaces the parked byte.
    pub fn push_back(&mut self, byte: u8) {
        self.pushback = Some(byte);
    }
}

/// Read one byte from stdin if one is immediately available.
#[cfg(unix)]
fn read_byte_nonblocking() -> io::Result<Option<u8>> {
    let fd = libc::STDIN_FILENO;

    // Zero timeout: report readiness without waiting.
    let ready = unsafe {
        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };
        libc::poll(&raw mut pfd, 1, 0)
    };

    if ready <= 0 {
        // Not readable, poll error, or interrupted — nothing to deliver.
        return Ok(None);
    }

    let mut byte = 0u8;
    let n = unsafe { libc::read(fd, (&raw mut byte).cast(), 1) };

    match n {
        1 => Ok(Some(byte)),
        // EOF: stdin closed (e.g. redirected from an exhausted pipe).
        0 => Ok(None),
        _ => {
            let err = io::Error::last_os_error();
            match err.kind() {
                io::ErrorKind::WouldBlock | io::ErrorKind::Interrupted => Ok(None),
                _ => Err(err),
            }
        }
    }
}

#[cfg(not(unix))]
fn read_byte_nonblocking() -> io::Result<Option<u8>> {
    Ok(None)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
