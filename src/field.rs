//! Output ceiling and field padding.

use crate::sink::Sink;

/// Pad byte used to fill a right-justified field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pad {
    Space,
    Zero,
}

impl Pad {
    pub const fn byte(self) -> u8 {
        match self {
            Pad::Space => b' ',
            Pad::Zero => b'0',
        }
    }
}

/// Bounded output cursor: how many bytes have been deposited and how many
/// may be deposited in total.
///
/// The limit is a count, not an address, so it can neither wrap nor be
/// compared against an unrelated buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ceiling {
    deposited: usize,
    cap: usize,
}

impl Ceiling {
    pub const fn unbounded() -> Self {
        Self {
            deposited: 0,
            cap: usize::MAX,
        }
    }

    /// Ceiling for a destination of `size` bytes, keeping the last slot free
    /// for the terminator. A zero-sized destination admits nothing.
    pub const fn reserving_terminator(size: usize) -> Self {
        Self {
            deposited: 0,
            cap: size.saturating_sub(1),
        }
    }

    pub const fn deposited(&self) -> usize {
        self.deposited
    }

    pub const fn remaining(&self) -> usize {
        self.cap - self.deposited
    }

    /// Claims one slot. Returns `false` once the ceiling is reached.
    #[inline]
    pub fn admit(&mut self) -> bool {
        if self.deposited < self.cap {
            self.deposited += 1;
            true
        } else {
            false
        }
    }

    /// Claims up to `n` slots, returns how many were granted.
    pub fn admit_many(&mut self, n: usize) -> usize {
        let granted = n.min(self.remaining());
        self.deposited += granted;
        granted
    }
}

/// A sink behind a ceiling. Every `put*` returns the logical number of bytes
/// it stands for, whether or not they reached the sink.
pub(crate) struct Bounded<'s, S: ?Sized> {
    sink: &'s mut S,
    ceiling: Ceiling,
}

impl<'s, S: Sink + ?Sized> Bounded<'s, S> {
    pub(crate) fn new(sink: &'s mut S, ceiling: Ceiling) -> Self {
        Self { sink, ceiling }
    }

    pub(crate) fn ceiling(&self) -> &Ceiling {
        &self.ceiling
    }

    #[inline]
    pub(crate) fn put(&mut self, c: u8) -> usize {
        if self.ceiling.admit() {
            self.sink.put(c);
        }
        1
    }

    pub(crate) fn put_buf(&mut self, buf: &[u8]) -> usize {
        let granted = self.ceiling.admit_many(buf.len());
        self.sink.put_buf(&buf[..granted]);
        buf.len()
    }

    pub(crate) fn repeat(&mut self, c: u8, n: usize) -> usize {
        for _ in 0..self.ceiling.admit_many(n) {
            self.sink.put(c);
        }
        n
    }

    /// Emits `val` in a field of `width` bytes. A negative width
    /// left-justifies and always fills with spaces; `pad` only applies to
    /// right-justified fields.
    pub(crate) fn field(&mut self, val: &[u8], width: i32, pad: Pad) -> usize {
        let fill = (width.unsigned_abs() as usize).saturating_sub(val.len());
        if width >= 0 {
            self.repeat(pad.byte(), fill) + self.put_buf(val)
        } else {
            self.put_buf(val) + self.repeat(b' ', fill)
        }
    }
}
