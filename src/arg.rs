/// One formatting argument.
///
/// The macros build these with the constructor matching each directive, so
/// `printf!(con, "%d", 1_u8)` is a type error instead of garbage output.
/// Lists assembled by hand are checked at runtime: integers are converted to
/// whatever the directive asks for, anything else that does not fit stops
/// interpretation.
#[derive(Debug)]
pub enum Arg<'a> {
    Int(i32),
    Uint(u32),
    #[cfg(feature = "long")]
    Long(i64),
    #[cfg(feature = "long")]
    ULong(u64),
    Char(u8),
    Str(&'a [u8]),
    #[cfg(feature = "float")]
    Float(f64),
    /// Target of `%n`.
    Count(&'a mut i32),
}

impl<'a> Arg<'a> {
    pub fn str<S: AsRef<[u8]> + ?Sized>(s: &'a S) -> Self {
        Arg::Str(s.as_ref())
    }

    pub(crate) fn as_i32(&self) -> Option<i32> {
        self.as_i64().map(|v| v as i32)
    }

    pub(crate) fn as_u32(&self) -> Option<u32> {
        self.as_i64().map(|v| v as u32)
    }

    pub(crate) fn as_u64(&self) -> Option<u64> {
        self.as_i64().map(|v| v as u64)
    }

    // Sign-extends signed sources, zero-extends unsigned ones.
    pub(crate) fn as_i64(&self) -> Option<i64> {
        match *self {
            Arg::Int(v) => Some(v as i64),
            Arg::Uint(v) => Some(v as i64),
            #[cfg(feature = "long")]
            Arg::Long(v) => Some(v),
            #[cfg(feature = "long")]
            Arg::ULong(v) => Some(v as i64),
            Arg::Char(c) => Some(c as i64),
            _ => None,
        }
    }

    pub(crate) fn as_char(&self) -> Option<u8> {
        self.as_i64().map(|v| v as u8)
    }
}

impl From<i32> for Arg<'_> {
    fn from(v: i32) -> Self {
        Arg::Int(v)
    }
}

impl From<u32> for Arg<'_> {
    fn from(v: u32) -> Self {
        Arg::Uint(v)
    }
}

#[cfg(feature = "long")]
impl From<i64> for Arg<'_> {
    fn from(v: i64) -> Self {
        Arg::Long(v)
    }
}

#[cfg(feature = "long")]
impl From<u64> for Arg<'_> {
    fn from(v: u64) -> Self {
        Arg::ULong(v)
    }
}

impl From<u8> for Arg<'_> {
    fn from(c: u8) -> Self {
        Arg::Char(c)
    }
}

#[cfg(feature = "float")]
impl From<f64> for Arg<'_> {
    fn from(v: f64) -> Self {
        Arg::Float(v)
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Str(s.as_bytes())
    }
}

impl<'a> From<&'a [u8]> for Arg<'a> {
    fn from(s: &'a [u8]) -> Self {
        Arg::Str(s)
    }
}

impl<'a> From<&'a mut i32> for Arg<'a> {
    fn from(slot: &'a mut i32) -> Self {
        Arg::Count(slot)
    }
}
