// SPDX-License-Identifier: MIT
#![allow(unsafe_code)]
//
// Asynchronous signal flags — resize and interrupt notification.
//
// Two signals matter to a fullscreen animation: SIGWINCH (the terminal
// changed size) and SIGINT/SIGTERM (someone wants us gone). Both arrive
// at an arbitrary instruction boundary, so the handlers do exactly one
// thing: set an `AtomicBool`. Storing to an atomic is async-signal-safe;
// nothing else we'd want to do (allocate, write the terminal, free
// buffers) is. The render loop polls both flags at one safe point per
// wake and performs the actual relayout or teardown synchronously.
//
// Note that with the terminal in raw mode (ISIG cleared) Ctrl-C never
// raises SIGINT — it arrives as byte 0x03 on stdin. The interrupt flag
// here covers external delivery: `kill`, a closing terminal emulator,
// a session manager shutting things down.

use std::sync::atomic::{AtomicBool, Ordering};

/// Set by the SIGWINCH handler; consumed by [`take_resize`].
static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);

/// Set by the SIGINT/SIGTERM handler; consumed by [`take_interrupt`].
static INTERRUPT_PENDING: AtomicBool = AtomicBool::new(false);

/// Install flag-setting handlers for SIGWINCH, SIGINT, and SIGTERM.
///
/// Safe to call more than once; later calls simply reinstall the same
/// handlers. `SA_RESTART` keeps interrupted syscalls (the render loop's
/// sleep, stdin reads) transparent to the caller.
#[cfg(unix)]
pub fn install_handlers() {
    unsafe {
        let mut sa: libc::sigaction = std::mem::zeroed();
        sa.sa_flags = libc::SA_RESTART;
        libc::sigemptyset(&raw mut sa.sa_mask);

        sa.sa_sigaction = resize_handler as *const () as usize;
        libc::sigaction(libc::SIGWINCH, &raw const sa, std::ptr::null_mut());

        sa.sa_sigaction = interrupt_handler as *const () as usize;
        libc::sigaction(libc::SIGINT, &raw const sa, std::ptr::null_mut());
        libc::sigaction(libc::SIGTERM, &raw const sa, std::ptr::null_mut());
    }
}

#[cfg(not(unix))]
pub fn install_handlers() {
    // No-op on non-unix platforms.
}

#[cfg(unix)]
extern "C" fn resize_handler(_sig: libc::c_int) {
    RESIZE_PENDING.store(true, Ordering::Relaxed);
}

#[cfg(unix)]
extern "C" fn interrupt_handler(_sig: libc::c_int) {
    INTERRUPT_PENDING.store(true, Ordering::Relaxed);
}

/// Consume the pending-resize flag. Returns `true` at most once per signal.
#[must_use]
pub fn take_resize() -> bool {
    RESIZE_PENDING.swap(false, Ordering::Relaxed)
}

/// Consume the pending-interrupt flag. Returns `true` at most once per signal.
#[must_use]
pub fn take_interrupt() -> bool {
    INTERRUPT_PENDING.swap(false, Ordering::Relaxed)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
