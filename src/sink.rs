//! Character sinks.
//!
//! Every output path of the crate ends in a [`Sink`]: the interpreter never
//! touches a destination directly, it only hands bytes to `put`.

/// A destination that accepts one byte at a time.
pub trait Sink {
    fn put(&mut self, c: u8);

    fn put_buf(&mut self, buf: &[u8]) {
        for &c in buf {
            self.put(c);
        }
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    #[inline]
    fn put(&mut self, c: u8) {
        (**self).put(c)
    }

    #[inline]
    fn put_buf(&mut self, buf: &[u8]) {
        (**self).put_buf(buf)
    }
}

/// An opaque destination handle paired with its write-one-byte function.
///
/// Useful when the output routine is a plain function, e.g. a register poke
/// provided by a board support package:
///
/// ```
/// use hiprintf::{Arg, FnSink};
///
/// fn push(out: &mut ([u8; 8], usize), c: u8) {
///     out.0[out.1] = c;
///     out.1 += 1;
/// }
///
/// let mut sink = FnSink::new(([0_u8; 8], 0), push);
/// let n = hiprintf::vformat(&mut sink, b"%d!", &mut [Arg::Int(42)]);
/// assert_eq!(n, 3);
/// assert_eq!(&sink.handle().0[..3], b"42!");
/// ```
pub struct FnSink<H> {
    handle: H,
    put: fn(&mut H, u8),
}

impl<H> FnSink<H> {
    pub const fn new(handle: H, put: fn(&mut H, u8)) -> Self {
        Self { handle, put }
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    pub fn into_handle(self) -> H {
        self.handle
    }
}

impl<H> Sink for FnSink<H> {
    #[inline]
    fn put(&mut self, c: u8) {
        (self.put)(&mut self.handle, c)
    }
}

/// Write cursor over a caller-owned buffer.
///
/// The cursor advances by exactly one per stored byte and never moves past
/// the end of the slice: bytes that do not fit are dropped. How many bytes
/// are *allowed* in is decided above the sink, by a [`Ceiling`](crate::Ceiling).
pub struct Cursor<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes stored so far, without the terminator.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Stores the NUL terminator at the cursor, if the slice has room for it.
    /// The cursor itself does not move.
    pub fn terminate(&mut self) -> bool {
        match self.buf.get_mut(self.pos) {
            Some(slot) => {
                *slot = 0;
                true
            }
            None => false,
        }
    }
}

impl Sink for Cursor<'_> {
    #[inline]
    fn put(&mut self, c: u8) {
        if let Some(slot) = self.buf.get_mut(self.pos) {
            *slot = c;
            self.pos += 1;
        }
    }

    fn put_buf(&mut self, buf: &[u8]) {
        let len = buf.len().min(self.buf.len() - self.pos);
        self.buf[self.pos..self.pos + len].copy_from_slice(&buf[..len]);
        self.pos += len;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cursor_drops_overflow() {
        let mut buf = [b'x'; 4];
        let mut cursor = Cursor::new(&mut buf);
        cursor.put_buf(b"abcdef");
        assert_eq!(cursor.written(), b"abcd");
        assert_eq!(cursor.position(), 4);
        assert!(!cursor.terminate());
        cursor.put(b'z');
        assert_eq!(buf, *b"abcd");
    }

    #[test]
    fn cursor_terminates_in_place() {
        let mut buf = [b'x'; 4];
        let mut cursor = Cursor::new(&mut buf);
        cursor.put(b'a');
        cursor.put(b'b');
        assert!(cursor.terminate());
        assert_eq!(cursor.position(), 2);
        assert_eq!(buf, *b"ab\0x");
    }

    #[test]
    fn fn_sink_forwards_to_handle() {
        fn count(n: &mut usize, _: u8) {
            *n += 1;
        }
        let mut sink = FnSink::new(0_usize, count);
        sink.put_buf(b"hello");
        (&mut sink).put(b'!');
        assert_eq!(sink.into_handle(), 6);
    }
}
