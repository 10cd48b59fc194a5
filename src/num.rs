//! Number to text conversion into fixed stack buffers.
//!
//! Digits are produced right-aligned at the end of the buffer and the
//! rendered sub-slice is returned, so no copy or shift is needed.

/// Length of [`NumBuf`]; holds the longest rendering, `-18446744073709551615.999999`.
pub const NUM_BUF_LEN: usize = 32;

pub type NumBuf = [u8; NUM_BUF_LEN];

/// Fractional digits printed by [`f64_buf`].
#[cfg(feature = "float")]
pub const FRACTION_DIGITS: usize = 6;

#[cfg(feature = "float")]
const FRACTION_SCALE: u64 = 1_000_000;

// 2^64 as f64, the first magnitude that no longer fits the integer part.
#[cfg(feature = "float")]
const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    LowerHex,
    UpperHex,
}

impl Radix {
    const fn base(self) -> u64 {
        match self {
            Radix::Decimal => 10,
            Radix::LowerHex | Radix::UpperHex => 16,
        }
    }

    const fn table(self) -> &'static [u8; 16] {
        match self {
            Radix::UpperHex => b"0123456789ABCDEF",
            _ => b"0123456789abcdef",
        }
    }
}

// Writes `val` right-aligned into `buf`, returns the index of the first digit.
fn put_digits(mut val: u64, radix: Radix, buf: &mut [u8]) -> usize {
    let base = radix.base();
    let table = radix.table();
    let mut pos = buf.len();
    loop {
        pos -= 1;
        buf[pos] = table[(val % base) as usize];
        val /= base;
        if val == 0 {
            break;
        }
    }
    pos
}

// Same, but always exactly `width` decimal digits.
#[cfg(feature = "float")]
fn put_fixed(mut val: u64, width: usize, buf: &mut [u8]) -> usize {
    let mut pos = buf.len();
    for _ in 0..width {
        pos -= 1;
        buf[pos] = b'0' + (val % 10) as u8;
        val /= 10;
    }
    pos
}

#[inline(never)]
pub fn u64_buf(val: u64, radix: Radix, buf: &mut NumBuf) -> &[u8] {
    let pos = put_digits(val, radix, buf);
    &buf[pos..]
}

#[inline(never)]
pub fn i64_buf(val: i64, buf: &mut NumBuf) -> &[u8] {
    let mut pos = put_digits(val.unsigned_abs(), Radix::Decimal, buf);
    if val < 0 {
        pos -= 1;
        buf[pos] = b'-';
    }
    &buf[pos..]
}

pub fn u32_buf(val: u32, radix: Radix, buf: &mut NumBuf) -> &[u8] {
    u64_buf(val as u64, radix, buf)
}

pub fn i32_buf(val: i32, buf: &mut NumBuf) -> &[u8] {
    i64_buf(val as i64, buf)
}

/// Fixed-point rendering with [`FRACTION_DIGITS`] digits, rounded half up.
///
/// `f64::log10`/`powf` need std, so magnitudes past the `u64` range are
/// normalized by repeated division and printed as `d.dddddde+NN`.
#[cfg(feature = "float")]
#[inline(never)]
pub fn f64_buf(val: f64, buf: &mut NumBuf) -> &[u8] {
    if val.is_nan() {
        return b"nan";
    }
    let negative = val.is_sign_negative();
    if val.is_infinite() {
        return if negative { b"-inf" } else { b"inf" };
    }

    let mag = if negative { -val } else { val };
    let mut pos = if mag < TWO_POW_64 {
        let (int, fract) = split(mag);
        let pos = put_fixed(fract, FRACTION_DIGITS, buf);
        buf[pos - 1] = b'.';
        put_digits(int, Radix::Decimal, &mut buf[..pos - 1])
    } else {
        let mut exp = 0_u64;
        let mut m = mag;
        while m >= 10.0 {
            m /= 10.0;
            exp += 1;
        }
        let (mut lead, fract) = split(m);
        if lead == 10 {
            lead = 1;
            exp += 1;
        }
        let mut pos = put_digits(exp, Radix::Decimal, buf);
        pos -= 2;
        buf[pos..pos + 2].copy_from_slice(b"e+");
        pos = put_fixed(fract, FRACTION_DIGITS, &mut buf[..pos]);
        buf[pos - 1] = b'.';
        put_digits(lead, Radix::Decimal, &mut buf[..pos - 1])
    };

    if negative {
        pos -= 1;
        buf[pos] = b'-';
    }
    &buf[pos..]
}

// Integer part and rounded fraction scaled by FRACTION_SCALE, carry applied.
#[cfg(feature = "float")]
fn split(mag: f64) -> (u64, u64) {
    let mut int = mag as u64;
    let mut fract = ((mag - int as f64) * FRACTION_SCALE as f64 + 0.5) as u64;
    if fract >= FRACTION_SCALE {
        fract -= FRACTION_SCALE;
        int = int.saturating_add(1);
    }
    (int, fract)
}
