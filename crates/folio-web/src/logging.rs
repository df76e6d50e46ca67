//! `tracing` output routed to the browser console

use std::io;

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Hands out one [`ConsoleWriter`] per event
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleMakeWriter;

/// Buffers one formatted event and logs it when dropped
pub struct ConsoleWriter {
    buf: Vec<u8>,
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter { buf: Vec::new() }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&self.buf);
        web_sys::console::log_1(&line.trim_end().into());
        self.buf.clear();
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}

/// Install the panic hook and the console subscriber
///
/// Safe to call more than once; only the first call installs anything.
pub fn init(verbose: bool) {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(level)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .try_init();
}
