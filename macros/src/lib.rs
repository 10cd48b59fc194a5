//!
//! hiprintf-macros
//! Checks printf-style format literals at compile time and builds the typed
//! `hiprintf::Arg` list, so a directive and its argument can never disagree
//! at runtime.
//!

extern crate proc_macro;
use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::{quote, quote_spanned};
use syn::{
    parse_macro_input,
    Expr, LitByteStr, LitStr, Token,
    parse::{self, Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
};

/// `printf!(console, "fmt", args...)`: streams to a `hiprintf::Console`.
#[proc_macro]
pub fn printf(input: TokenStream) -> TokenStream {
    stream(input, false)
}

/// Like `printf!`, with a trailing newline.
#[proc_macro]
pub fn printfln(input: TokenStream) -> TokenStream {
    stream(input, true)
}

/// `sprintf!(buf, "fmt", args...)`: unbounded fill of a `&mut [u8]`.
#[proc_macro]
pub fn sprintf(input: TokenStream) -> TokenStream {
    call(input, quote!(::hiprintf::vsprintf))
}

/// `snprintf!(buf, "fmt", args...)`: fill bounded by the buffer length.
#[proc_macro]
pub fn snprintf(input: TokenStream) -> TokenStream {
    call(input, quote!(::hiprintf::vsnprintf))
}

/// `fprintf!(sink, "fmt", args...)`: any `&mut impl hiprintf::Sink`.
#[proc_macro]
pub fn fprintf(input: TokenStream) -> TokenStream {
    call(input, quote!(::hiprintf::vformat))
}

fn stream(input: TokenStream, ln: bool) -> TokenStream {
    let input = parse_macro_input!(input as TargetInput);
    let mut format = input.input.format.value();
    if ln {
        format.push('\n');
    }
    let target = &input.target;
    expand(&format, &input.input, |format, args| {
        quote!{ (#target).vprintf(#format, &mut [#(#args),*]) }
    })
}

fn call(input: TokenStream, func: proc_macro2::TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as TargetInput);
    let format = input.input.format.value();
    let target = &input.target;
    expand(&format, &input.input, |format, args| {
        quote!{ #func(#target, #format, &mut [#(#args),*]) }
    })
}

fn expand<F>(format: &str, input: &Input, f: F) -> TokenStream
    where F: Fn(&LitByteStr, &[proc_macro2::TokenStream]) -> proc_macro2::TokenStream
{
    let span = input.format.span();
    let pieces = match parse(format, span) {
        Err(e) => return e.to_compile_error().into(),
        Ok(pieces) => pieces,
    };

    let argc: usize = input.args.len();
    if argc != pieces.len() {
        return parse::Error::new(span,
            &format!("format string required {} arguments but {} were supplied",
                pieces.len(), argc)).to_compile_error().into();
    }

    let args: Vec<_> = pieces.iter().zip(input.args.iter()).map(|(piece, arg)| {
        let ctor = piece.constructor();
        quote_spanned!{ arg.span()=> ::hiprintf::Arg::#ctor(#arg) }
    }).collect();

    let format = LitByteStr::new(format.as_bytes(), span);
    f(&format, &args).into()
}

struct Input {
    format: LitStr,
    _comma: Option<Token![,]>,
    args:   Punctuated<Expr, Token![,]>,
}

impl Parse for Input {
    fn parse(input: ParseStream) -> parse::Result<Self> {
        let format = input.parse()?;
        if input.is_empty() {
            Ok(Input {
                format,
                _comma: None,
                args:   Punctuated::new(),
            })
        } else {
            Ok(Input {
                format,
                _comma: input.parse()?,
                args:   Punctuated::parse_terminated(input)?,
            })
        }
    }
}

struct TargetInput {
    target: Expr,
    input: Input,
}

impl Parse for TargetInput {
    fn parse(input: ParseStream) -> parse::Result<Self> {
        let target = input.parse()?;
        let _: Token![,] = input.parse()?;
        let input = Input::parse(input)?;
        Ok(TargetInput {
            target,
            input,
        })
    }
}

/// An argument-consuming directive. `%%` consumes nothing and is not a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    Signed { long: bool },
    Unsigned { long: bool },
    Char,
    Str,
    Count,
    Float,
}

impl Piece {
    fn constructor(self) -> syn::Ident {
        let name = match self {
            Piece::Signed { long: false } => "Int",
            Piece::Signed { long: true } => "Long",
            Piece::Unsigned { long: false } => "Uint",
            Piece::Unsigned { long: true } => "ULong",
            Piece::Char => "Char",
            Piece::Str => "str",
            Piece::Count => "Count",
            Piece::Float => "Float",
        };
        syn::Ident::new(name, Span::call_site())
    }
}

const EXPECTED: &str = "expected one of %u %d %i %x %X %c %s %f %n %%, \
    optionally preceded by `-`, `0`, a width and `l`";

/// Same grammar as `hiprintf::parse_directive`: `%[-][0][width][l]conversion`.
fn parse(format: &str, span: Span) -> parse::Result<Vec<Piece>> {
    let bytes = format.as_bytes();
    if bytes.contains(&0) {
        return Err(parse::Error::new(span, "invalid format string: NUL byte ends the format early"));
    }

    let mut pieces = vec![];
    let mut pos = 0;
    while pos < bytes.len() {
        let c = bytes[pos];
        pos += 1;
        if c != b'%' {
            continue;
        }
        let start = pos - 1;
        let spec = &bytes[pos..];
        let mut i = 0;
        if spec.get(i) == Some(&b'-') {
            i += 1;
        }
        if spec.get(i) == Some(&b'0') {
            i += 1;
        }
        while spec.get(i).map_or(false, u8::is_ascii_digit) {
            i += 1;
        }
        let long = spec.get(i) == Some(&b'l');
        if long {
            i += 1;
        }
        let piece = match spec.get(i).copied() {
            None => {
                return Err(parse::Error::new(span,
                    &format!("invalid format string: incomplete directive `{}` at end, {}",
                        &format[start..], EXPECTED)));
            }
            Some(b'd' | b'i') => Some(Piece::Signed { long }),
            Some(b'u' | b'x' | b'X') => Some(Piece::Unsigned { long }),
            Some(b'c') => Some(Piece::Char),
            Some(b's') => Some(Piece::Str),
            Some(b'n') => Some(Piece::Count),
            Some(b'f') => Some(Piece::Float),
            Some(b'%') => None,
            Some(_) => {
                let end = (pos + i + 1..=format.len())
                    .find(|&end| format.is_char_boundary(end))
                    .unwrap_or(format.len());
                return Err(parse::Error::new(span,
                    &format!("invalid format string: unsupported directive `{}`, {}",
                        &format[start..end], EXPECTED)));
            }
        };
        pieces.extend(piece);
        pos += i + 1;
    }

    Ok(pieces)
}

#[cfg(test)]
mod test {
    use super::*;

    fn pieces(format: &str) -> Vec<Piece> {
        parse(format, Span::call_site()).unwrap()
    }

    fn error(format: &str) -> String {
        parse(format, Span::call_site()).unwrap_err().to_string()
    }

    #[test]
    fn test_literal_only() {
        assert!(pieces("no directives here").is_empty());
        assert!(pieces("100%% sure %5%").is_empty());
    }

    #[test]
    fn test_directives() {
        assert_eq!(
            pieces("%d %-05i %u %08x %X %c %s %n %f"),
            vec![
                Piece::Signed { long: false },
                Piece::Signed { long: false },
                Piece::Unsigned { long: false },
                Piece::Unsigned { long: false },
                Piece::Unsigned { long: false },
                Piece::Char,
                Piece::Str,
                Piece::Count,
                Piece::Float,
            ]
        );
        assert_eq!(
            pieces("%ld %12lu %lx"),
            vec![
                Piece::Signed { long: true },
                Piece::Unsigned { long: true },
                Piece::Unsigned { long: true },
            ]
        );
    }

    #[test]
    fn test_constructors() {
        assert_eq!(Piece::Unsigned { long: true }.constructor().to_string(), "ULong");
        assert_eq!(Piece::Str.constructor().to_string(), "str");
    }

    #[test]
    fn test_rejects() {
        assert!(error("%q").contains("unsupported directive `%q`"));
        assert!(error("%0-5d").contains("unsupported directive `%0-`"));
        assert!(error("x %ä").contains("`%ä`"));
        assert!(error("tail %-0").contains("incomplete directive `%-0`"));
        assert!(error("a\0b").contains("NUL"));
    }
}
