//! POSIX terminal: termios raw mode and unbuffered reads on the stdin
//! descriptor.

#![allow(unsafe_code)]

use std::{
    io,
    mem::MaybeUninit,
    os::fd::RawFd,
    time::{Duration, Instant},
};

use crate::{
    ByteSource, EscapeTiming, KeyError, NormalizedKey, RawModeScope, TerminalMode, read_key_from,
};

/// Raw-stream console on one descriptor.
pub(crate) struct Console {
    mode: Termios,
    source: FdSource,
    timing: EscapeTiming,
}

impl Console {
    pub(crate) fn stdin(timing: EscapeTiming) -> Self {
        Self {
            mode: Termios { fd: libc::STDIN_FILENO },
            source: FdSource { fd: libc::STDIN_FILENO },
            timing,
        }
    }

    pub(crate) fn read_key(&mut self) -> Result<NormalizedKey, KeyError> {
        let _raw = RawModeScope::acquire(&mut self.mode)?;
        read_key_from(&mut self.source, &self.timing)
    }
}

/// termios line discipline of a descriptor.
struct Termios {
    fd: RawFd,
}

impl TerminalMode for Termios {
    type Saved = libc::termios;

    fn enter_raw(&mut self) -> Result<libc::termios, KeyError> {
        let mut original = MaybeUninit::<libc::termios>::uninit();
        // SAFETY: tcgetattr only writes through the pointer, and fully
        // initializes it when it returns 0.
        if unsafe { libc::tcgetattr(self.fd, original.as_mut_ptr()) } != 0 {
            return Err(KeyError::NoTerminal(io::Error::last_os_error()));
        }
        // SAFETY: initialized by the successful tcgetattr above.
        let original = unsafe { original.assume_init() };

        let mut raw = original;
        // SAFETY: `raw` is a valid, initialized termios.
        unsafe { libc::cfmakeraw(&mut raw) };

        // SAFETY: `raw` is a valid termios and outlives the call.
        if unsafe { libc::tcsetattr(self.fd, libc::TCSADRAIN, &raw) } != 0 {
            return Err(KeyError::Io(io::Error::last_os_error()));
        }

        Ok(original)
    }

    fn restore(&mut self, saved: &libc::termios) -> io::Result<()> {
        // SAFETY: `saved` came from tcgetattr on this descriptor.
        if unsafe { libc::tcsetattr(self.fd, libc::TCSADRAIN, saved) } != 0 {
            return Err(io::Error::last_os_error());
        }
        Ok(())
    }
}

/// Unbuffered reads on a descriptor.
///
/// `std::io::Stdin` buffers ahead, which would make `poll` report an empty
/// descriptor while bytes sit in the userspace buffer.
struct FdSource {
    fd: RawFd,
}

impl ByteSource for FdSource {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = 0u8;
        loop {
            // SAFETY: reads at most one byte into `byte`.
            let n = unsafe { libc::read(self.fd, (&raw mut byte).cast::<libc::c_void>(), 1) };
            match n {
                1 => return Ok(Some(byte)),
                0 => return Ok(None),
                _ => {
                    let err = io::Error::last_os_error();
                    if err.kind() != io::ErrorKind::Interrupted {
                        return Err(err);
                    }
                },
            }
        }
    }

    fn poll_byte(&mut self, timeout: Duration) -> io::Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let millis = libc::c_int::try_from(remaining.as_millis()).unwrap_or(libc::c_int::MAX);
            let mut pollfd = libc::pollfd { fd: self.fd, events: libc::POLLIN, revents: 0 };

            // SAFETY: exactly one valid pollfd is passed.
            let ready = unsafe { libc::poll(&mut pollfd, 1, millis) };
            if ready > 0 {
                return Ok(pollfd.revents & (libc::POLLIN | libc::POLLHUP | libc::POLLERR) != 0);
            }
            if ready == 0 {
                return Ok(false);
            }

            // EINTR (e.g. SIGWINCH): wait out the rest of the window.
            let err = io::Error::last_os_error();
            if err.kind() != io::ErrorKind::Interrupted {
                return Err(err);
            }
        }
    }
}
