use std::io::Write;

use hiprintf::{Arg, Console, Device};

struct Stdout(std::io::Stdout);

impl Device for Stdout {
    fn is_tx_empty(&self) -> bool {
        self.0.lock().flush().is_ok()
    }

    fn put(&mut self, c: u8) {
        let _ = self.0.write_all(&[c]);
    }
}

fn main() {
    let mut con = Console::new(Stdout(std::io::stdout()));

    let b = &mut [0_u8; 32];
    let n = hiprintf::snprintf!(b, "snprintf(%s)", "hello, bounded buffer");
    hiprintf::printfln!(con, "wrote %d of %d bytes: %s", b.len() as i32 - 1, n as i32, &b[..]);

    let mut mark = 0;
    hiprintf::printfln!(
        con,
        "d = %d u = %u x = %08x X = %X c = %c f = %f long = %ld%n",
        -100,
        200_u32,
        0xbeef_u32,
        0xcafe_u32,
        b'!',
        -2.5,
        i64::MIN,
        &mut mark
    );
    hiprintf::printfln!(con, "[%-8s|%8s] %d%% done, first line was %d bytes", "left", "right", 50, mark);

    // Runtime format strings take a hand-built argument list.
    let fmt = b"runtime: %05u\n";
    con.vprintf(fmt, &mut [Arg::Uint(42)]);
}
