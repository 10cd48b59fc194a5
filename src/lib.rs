//! hiprintf - printf-style formatting without heap, locale or std
//!
//! # Design objective:
//! 1. One interpreter, many destinations: every output goes through a [`Sink`].
//! 2. Buffer output is bounded by a [`Ceiling`]; nothing is ever written past it,
//!    while the returned length is always the untruncated one (`snprintf` contract).
//! 3. Format strings written as literals are checked at compile time, and every
//!    argument is typed by the directive that consumes it.
//!
//! Supported directives: `%[-][0][width][l](u|d|i|x|X|c|s|%|n|f)`.
//!
//! # Examples
//!
//! ```rust
//! let mut buf = [0_u8; 32];
//! let n = hiprintf::snprintf!(&mut buf, "val=%-6d|end", 42);
//! assert_eq!(n, 14);
//! assert_eq!(&buf[..15], b"val=42    |end\0");
//!
//! let mut small = [0_u8; 6];
//! let n = hiprintf::snprintf!(&mut small, "%08x", 255_u32);
//! assert_eq!(n, 8);
//! assert_eq!(&small, b"00000\0");
//!
//! let mut mark = 0;
//! hiprintf::sprintf!(&mut buf, "%s%n!", "abc", &mut mark);
//! assert_eq!(mark, 3);
//! ```
//!
//! Format strings only known at runtime go through [`vsnprintf`] and friends
//! with a hand-built [`Arg`] list.

#![no_std]

#[allow(unused_macros)]
macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*);
    };
}

#[allow(unused_macros)]
macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*);
    };
}

mod arg;
mod device;
mod field;
mod format;
pub mod num;
mod sink;

pub use arg::Arg;
#[cfg(feature = "spin")]
pub use device::SharedConsole;
pub use device::{Console, Device};
pub use field::{Ceiling, Pad};
pub use format::{parse_directive, vformat, Conversion, Directive, Parsed};
pub use sink::{Cursor, FnSink, Sink};

pub use hiprintf_macros::{fprintf, printf, printfln, snprintf, sprintf};

use format::interpret;

/// Formats into `buf` and appends a NUL terminator.
///
/// There is no limit on the formatted length; `buf` is expected to be large
/// enough. Bytes that would land past its end are dropped, and the
/// terminator is then omitted.
pub fn vsprintf(buf: &mut [u8], fmt: &[u8], args: &mut [Arg<'_>]) -> usize {
    let mut cursor = Cursor::new(buf);
    let written = interpret(&mut cursor, Ceiling::unbounded(), fmt, args).written;
    cursor.terminate();
    written
}

/// Formats at most `buf.len() - 1` bytes into `buf` and always terminates
/// it with a NUL (unless `buf` is empty).
///
/// Returns the length the complete output would have; a value of
/// `buf.len()` or more means the output was truncated.
pub fn vsnprintf(buf: &mut [u8], fmt: &[u8], args: &mut [Arg<'_>]) -> usize {
    let ceiling = Ceiling::reserving_terminator(buf.len());
    let mut cursor = Cursor::new(buf);
    let outcome = interpret(&mut cursor, ceiling, fmt, args);
    cursor.terminate();
    if outcome.deposited < outcome.written {
        trace!(
            written = outcome.written,
            kept = outcome.deposited,
            "bounded output truncated"
        );
    }
    outcome.written
}
