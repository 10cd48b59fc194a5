//! Format string interpreter.
//!
//! Directive grammar, each part optional and in this order:
//!
//! ```text
//! % [-] [0] [width] [l] conversion
//! ```
//!
//! `conversion` is one of `u d i x X c s % n f`. `l` is only recognized with
//! feature `long`, `f` only with feature `float`.

use core::slice::IterMut;

use crate::arg::Arg;
use crate::field::{Bounded, Ceiling, Pad};
use crate::num::{self, NumBuf, Radix, NUM_BUF_LEN};
use crate::sink::Sink;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion {
    Unsigned,
    Signed,
    LowerHex,
    UpperHex,
    Char,
    Str,
    Percent,
    Count,
    #[cfg(feature = "float")]
    Float,
}

impl Conversion {
    fn from_byte(c: u8) -> Option<Self> {
        Some(match c {
            b'u' => Conversion::Unsigned,
            b'd' | b'i' => Conversion::Signed,
            b'x' => Conversion::LowerHex,
            b'X' => Conversion::UpperHex,
            b'c' => Conversion::Char,
            b's' => Conversion::Str,
            b'%' => Conversion::Percent,
            b'n' => Conversion::Count,
            #[cfg(feature = "float")]
            b'f' => Conversion::Float,
            _ => return None,
        })
    }
}

/// A parsed `%` directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Directive {
    pub pad: Pad,
    /// Field width, negative when left-justified.
    pub width: i32,
    pub long: bool,
    pub conversion: Conversion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parsed {
    /// A complete directive spanning `len` bytes after the `%`.
    Directive { directive: Directive, len: usize },
    /// The byte in conversion position is not a conversion.
    Unsupported(u8),
    /// The format ended inside the directive.
    Truncated,
}

/// Parses one directive; `spec` starts right after the `%`.
/// A NUL byte ends the format just like the end of the slice.
pub fn parse_directive(spec: &[u8]) -> Parsed {
    let mut pos = 0;
    let at = |pos: usize| spec.get(pos).copied().filter(|&c| c != 0);

    let left = at(pos) == Some(b'-');
    if left {
        pos += 1;
    }
    let pad = if at(pos) == Some(b'0') {
        pos += 1;
        Pad::Zero
    } else {
        Pad::Space
    };

    let mut width = 0_i32;
    while let Some(c @ b'0'..=b'9') = at(pos) {
        width = width.saturating_mul(10).saturating_add((c - b'0') as i32);
        pos += 1;
    }
    if left {
        width = -width;
    }

    let long = cfg!(feature = "long") && at(pos) == Some(b'l');
    if long {
        pos += 1;
    }

    let Some(c) = at(pos) else {
        return Parsed::Truncated;
    };
    match Conversion::from_byte(c) {
        Some(conversion) => Parsed::Directive {
            directive: Directive {
                pad,
                width,
                long,
                conversion,
            },
            len: pos + 1,
        },
        None => Parsed::Unsupported(c),
    }
}

/// Why interpretation ended before the end of the format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Stop {
    Unsupported(u8),
    Truncated,
    MissingArgument,
    Mismatch(Conversion),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Outcome {
    /// Logical length of the output, truncated or not.
    pub written: usize,
    /// Bytes that actually reached the sink.
    pub deposited: usize,
    pub stopped: Option<Stop>,
}

/// Formats `fmt` with `args` into `sink`, returning the number of bytes
/// written. There is no size limit at this level.
///
/// ```
/// use hiprintf::{Arg, Cursor};
///
/// let mut buf = [0_u8; 16];
/// let mut cursor = Cursor::new(&mut buf);
/// let n = hiprintf::vformat(&mut cursor, b"%s=%04x", &mut [Arg::str("id"), Arg::Uint(0xbe)]);
/// assert_eq!(cursor.written(), b"id=00be");
/// assert_eq!(n, 7);
/// ```
pub fn vformat<S: Sink + ?Sized>(sink: &mut S, fmt: &[u8], args: &mut [Arg<'_>]) -> usize {
    interpret(sink, Ceiling::unbounded(), fmt, args).written
}

pub(crate) fn interpret<S: Sink + ?Sized>(
    sink: &mut S,
    ceiling: Ceiling,
    fmt: &[u8],
    args: &mut [Arg<'_>],
) -> Outcome {
    let mut out = Bounded::new(sink, ceiling);
    let mut args = args.iter_mut();
    let mut written = 0;
    let mut pos = 0;

    let stopped = loop {
        let c = match fmt.get(pos) {
            None | Some(0) => break None,
            Some(&c) => c,
        };
        pos += 1;
        if c != b'%' {
            written += out.put(c);
            continue;
        }

        let directive = match parse_directive(&fmt[pos..]) {
            Parsed::Directive { directive, len } => {
                pos += len;
                directive
            }
            Parsed::Unsupported(c) => break Some(Stop::Unsupported(c)),
            Parsed::Truncated => break Some(Stop::Truncated),
        };
        match convert(&mut out, &directive, &mut args, written) {
            Ok(n) => written += n,
            Err(stop) => break Some(stop),
        }
    };

    if stopped.is_some() {
        debug!(stop = ?stopped, written, at = pos, "format interpretation stopped early");
    }
    Outcome {
        written,
        deposited: out.ceiling().deposited(),
        stopped,
    }
}

fn convert<S: Sink + ?Sized>(
    out: &mut Bounded<'_, S>,
    d: &Directive,
    args: &mut IterMut<'_, Arg<'_>>,
    written: usize,
) -> Result<usize, Stop> {
    let mismatch = Stop::Mismatch(d.conversion);
    let mut buf: NumBuf = [0_u8; NUM_BUF_LEN];

    let text = match d.conversion {
        Conversion::Percent => return Ok(out.put(b'%')),
        Conversion::Char => {
            let c = next(args)?.as_char().ok_or(mismatch)?;
            return Ok(out.put(c));
        }
        Conversion::Count => {
            match next(args)? {
                Arg::Count(slot) => **slot = i32::try_from(written).unwrap_or(i32::MAX),
                _ => return Err(mismatch),
            }
            return Ok(0);
        }
        Conversion::Str => {
            let s = match next(args)? {
                Arg::Str(s) => until_nul(*s),
                _ => return Err(mismatch),
            };
            return Ok(out.field(s, d.width, Pad::Space));
        }
        #[cfg(feature = "float")]
        Conversion::Float => match next(args)? {
            Arg::Float(v) => num::f64_buf(*v, &mut buf),
            _ => return Err(mismatch),
        },
        Conversion::Unsigned | Conversion::Signed | Conversion::LowerHex | Conversion::UpperHex => {
            integer(d, next(args)?, &mut buf).ok_or(mismatch)?
        }
    };
    Ok(out.field(text, d.width, d.pad))
}

fn next<'i, 'a>(args: &'i mut IterMut<'_, Arg<'a>>) -> Result<&'i mut Arg<'a>, Stop> {
    args.next().ok_or(Stop::MissingArgument)
}

fn integer<'b>(d: &Directive, arg: &Arg<'_>, buf: &'b mut NumBuf) -> Option<&'b [u8]> {
    let radix = match d.conversion {
        Conversion::LowerHex => Radix::LowerHex,
        Conversion::UpperHex => Radix::UpperHex,
        _ => Radix::Decimal,
    };
    let signed = d.conversion == Conversion::Signed;
    Some(match (d.long, signed) {
        (true, true) => num::i64_buf(arg.as_i64()?, buf),
        (true, false) => num::u64_buf(arg.as_u64()?, radix, buf),
        (false, true) => num::i32_buf(arg.as_i32()?, buf),
        (false, false) => num::u32_buf(arg.as_u32()?, radix, buf),
    })
}

fn until_nul(s: &[u8]) -> &[u8] {
    match s.iter().position(|&c| c == 0) {
        Some(end) => &s[..end],
        None => s,
    }
}
