use hiprintf::{fprintf, printf, printfln, snprintf, sprintf, Arg, Console, Cursor, Device};

fn show(buf: &[u8]) -> &str {
    let end = buf.iter().position(|&c| c == 0).unwrap_or(buf.len());
    std::str::from_utf8(&buf[..end]).unwrap()
}

#[test]
fn width_and_padding() {
    let mut buf = [0_u8; 16];
    assert_eq!(sprintf!(&mut buf, "%05d", 5), 5);
    assert_eq!(show(&buf), "00005");
    assert_eq!(sprintf!(&mut buf, "%-5d", 5), 5);
    assert_eq!(show(&buf), "5    ");
    assert_eq!(sprintf!(&mut buf, "%5d", 5), 5);
    assert_eq!(show(&buf), "    5");
}

#[test]
fn left_justify_never_zero_pads() {
    let mut buf = [0_u8; 16];
    sprintf!(&mut buf, "[%-06u]", 12_u32);
    assert_eq!(show(&buf), "[12    ]");
}

#[test]
fn justified_scenario() {
    let mut buf = [b'#'; 32];
    let n = sprintf!(&mut buf, "val=%-6d|end", 42);
    assert_eq!(n, 14);
    assert_eq!(&buf[..15], b"val=42    |end\0");
}

#[test]
fn zero_padded_hex() {
    let mut buf = [0_u8; 16];
    assert_eq!(sprintf!(&mut buf, "%08x", 255_u32), 8);
    assert_eq!(show(&buf), "000000ff");
}

#[test]
fn hex_case_only_differs_in_letters() {
    let mut lower = [0_u8; 16];
    let mut upper = [0_u8; 16];
    for v in [0_u32, 9, 0xa, 0xdeadbeef, u32::MAX] {
        sprintf!(&mut lower, "%x", v);
        sprintf!(&mut upper, "%X", v);
        assert_eq!(show(&lower).to_ascii_uppercase(), show(&upper));
    }
}

#[test]
fn signed_extremes() {
    let mut buf = [0_u8; 32];
    sprintf!(&mut buf, "%d|%i|%d", 0, i32::MIN, i32::MAX);
    assert_eq!(show(&buf), "0|-2147483648|2147483647");
}

#[cfg(feature = "long")]
#[test]
fn long_conversions() {
    let mut buf = [0_u8; 64];
    sprintf!(&mut buf, "%ld %lu %lX", i64::MIN, u64::MAX, 0xfeed_u64);
    assert_eq!(show(&buf), "-9223372036854775808 18446744073709551615 FEED");
}

#[cfg(feature = "float")]
#[test]
fn fixed_float() {
    let mut buf = [0_u8; 32];
    sprintf!(&mut buf, "%f %010f", 2.5, -1.25);
    assert_eq!(show(&buf), "2.500000 0-1.250000");
}

#[test]
fn chars_and_strings() {
    let mut buf = [0_u8; 32];
    let owned = String::from("own");
    let bytes: &[u8] = b"raw\0ignored";
    sprintf!(&mut buf, "%c%c %s %s %4s", b'o', b'k', owned.as_str(), bytes, "x");
    assert_eq!(show(&buf), "ok own raw    x");
}

#[test]
fn percent_literal() {
    let mut buf = [0_u8; 16];
    assert_eq!(sprintf!(&mut buf, "%d%% %-4%|", 50), 6);
    assert_eq!(show(&buf), "50% %|");
}

#[test]
fn count_stores_prefix_length() {
    let mut buf = [0_u8; 32];
    let (mut start, mut mid, mut end) = (-1, -1, -1);
    let n = sprintf!(&mut buf, "%nhello %n%-4s%n", &mut start, &mut mid, "x", &mut end);
    assert_eq!((start, mid, end), (0, 6, 10));
    assert_eq!(n, 10);
}

#[test]
fn count_sees_untruncated_length() {
    let mut buf = [0_u8; 4];
    let mut at = 0;
    let n = snprintf!(&mut buf, "%8u%n", 1_u32, &mut at);
    assert_eq!((n, at), (8, 8));
    assert_eq!(&buf, b"   \0");
}

#[test]
fn bounded_fill() {
    let mut buf = [b'#'; 10];
    let n = snprintf!(&mut buf[..6], "%s=%d", "answer", 42);
    assert_eq!(n, 9);
    assert_eq!(&buf, b"answe\0####");
}

#[test]
fn bounded_fill_exact_fit() {
    let mut buf = [b'#'; 6];
    assert_eq!(snprintf!(&mut buf, "%5u", 7_u32), 5);
    assert_eq!(&buf, b"    7\0");
    assert_eq!(snprintf!(&mut buf, "%6u", 7_u32), 6);
    assert_eq!(&buf, b"     \0");
}

#[test]
fn fprintf_into_cursor() {
    let mut raw = [0_u8; 8];
    let mut cursor = Cursor::new(&mut raw);
    let n = fprintf!(&mut cursor, "%s:%u", "k", 1_u32);
    assert_eq!(n, 3);
    assert_eq!(cursor.written(), b"k:1");
}

#[test]
fn runtime_malformed_format_keeps_prefix() {
    let mut buf = [b'#'; 16];
    let n = hiprintf::vsnprintf(&mut buf, b"abc%-05", &mut []);
    assert_eq!(n, 3);
    assert_eq!(&buf[..4], b"abc\0");

    let n = hiprintf::vsnprintf(&mut buf, b"x%wy", &mut [Arg::Int(1)]);
    assert_eq!(n, 1);
    assert_eq!(&buf[..2], b"x\0");
}

#[derive(Default)]
struct Capture {
    out: Vec<u8>,
    polls: std::cell::Cell<usize>,
}

impl Device for Capture {
    fn is_tx_empty(&self) -> bool {
        self.polls.set(self.polls.get() + 1);
        true
    }

    fn put(&mut self, c: u8) {
        self.out.push(c);
    }
}

#[test]
fn console_streams() {
    let mut con = Console::new(Capture::default());
    assert_eq!(printf!(con, "%s-%02u", "t", 3_u32), 4);
    assert_eq!(printfln!(con, "!"), 2);
    assert_eq!(con.device().out, b"t-03!\n");
    assert_eq!(con.device().polls.get(), 2);
}

#[test]
fn console_select() {
    let mut con = Console::new(Capture::default());
    printf!(con, "one");
    let old = con.select(Capture::default());
    printf!(&mut con, "two");
    assert_eq!(old.out, b"one");
    assert_eq!(con.into_inner().out, b"two");
}
