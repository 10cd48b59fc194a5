//! Streaming output to a character device.
//!
//! There is no process-wide "current device": a [`Console`] owns the device
//! and every streaming call goes through it. Wrap it in a
//! [`SharedConsole`] (feature `spin`) to reach it from a `static`.

use crate::arg::Arg;
use crate::format::vformat;
use crate::sink::Sink;

/// A byte-oriented transmitter, typically a UART.
pub trait Device {
    /// `true` once everything handed to [`put`](Device::put) has left the
    /// transmit buffer.
    fn is_tx_empty(&self) -> bool;

    fn put(&mut self, c: u8);
}

impl<D: Device + ?Sized> Device for &mut D {
    fn is_tx_empty(&self) -> bool {
        (**self).is_tx_empty()
    }

    fn put(&mut self, c: u8) {
        (**self).put(c)
    }
}

struct Tx<'d, D: ?Sized>(&'d mut D);

impl<D: Device + ?Sized> Sink for Tx<'_, D> {
    #[inline]
    fn put(&mut self, c: u8) {
        self.0.put(c)
    }
}

/// Formatting context bound to one device.
///
/// ```
/// use hiprintf::{Console, Device};
///
/// struct Uart { sent: usize }
///
/// impl Device for Uart {
///     fn is_tx_empty(&self) -> bool { true }
///     fn put(&mut self, _: u8) { self.sent += 1; }
/// }
///
/// let mut con = Console::new(Uart { sent: 0 });
/// assert_eq!(hiprintf::printf!(con, "%s %d\n", "boot", 3), 7);
/// assert_eq!(con.device().sent, 7);
/// ```
pub struct Console<D> {
    device: D,
}

impl<D> Console<D> {
    pub const fn new(device: D) -> Self {
        Self { device }
    }

    /// Routes all further output to `device`, returning the previous one.
    pub fn select(&mut self, device: D) -> D {
        core::mem::replace(&mut self.device, device)
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_inner(self) -> D {
        self.device
    }
}

impl<D: Device> Console<D> {
    /// Formats straight to the device, then waits for it to drain.
    /// Returns the number of bytes written.
    pub fn vprintf(&mut self, fmt: &[u8], args: &mut [Arg<'_>]) -> usize {
        let written = vformat(&mut Tx(&mut self.device), fmt, args);
        self.flush();
        written
    }

    /// Spins until the transmit buffer is empty. There is no timeout: a
    /// device that never drains blocks here forever.
    pub fn flush(&self) {
        if self.device.is_tx_empty() {
            return;
        }
        trace!("waiting for transmit buffer to drain");
        while !self.device.is_tx_empty() {
            core::hint::spin_loop();
        }
    }
}

/// A [`Console`] behind a spinlock, so a `static` can be shared by every
/// context that prints. Whole calls are serialized: output of concurrent
/// `vprintf`s never interleaves.
#[cfg(feature = "spin")]
pub struct SharedConsole<D> {
    inner: spin::Mutex<Console<D>>,
}

#[cfg(feature = "spin")]
impl<D> SharedConsole<D> {
    pub const fn new(device: D) -> Self {
        Self {
            inner: spin::Mutex::new(Console::new(device)),
        }
    }

    pub fn select(&self, device: D) -> D {
        self.inner.lock().select(device)
    }

    pub fn lock(&self) -> spin::MutexGuard<'_, Console<D>> {
        self.inner.lock()
    }
}

#[cfg(feature = "spin")]
impl<D: Device> SharedConsole<D> {
    pub fn vprintf(&self, fmt: &[u8], args: &mut [Arg<'_>]) -> usize {
        self.inner.lock().vprintf(fmt, args)
    }
}
