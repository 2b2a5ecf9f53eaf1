//! Browser console writer.

use std::io;

/// Accumulates one formatted event and hands it over as a single line.
///
/// The fmt layer may issue several `write` calls per event; the console
/// wants one call per message.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the buffered text without its trailing newline, if any was
    /// written.
    pub fn take_line(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let bytes = std::mem::take(&mut self.buf);
        let text = String::from_utf8_lossy(&bytes);
        Some(text.trim_end_matches(['\n', '\r']).to_string())
    }
}

impl io::Write for LineBuffer {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use self::wasm::ConsoleWriter;

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    use super::LineBuffer;

    /// [`MakeWriter`] that routes each event to the console method for its
    /// level.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ConsoleWriter;

    pub struct ConsoleLine {
        level: Level,
        line: LineBuffer,
    }

    impl io::Write for ConsoleLine {
        fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
            io::Write::write(&mut self.line, bytes)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleLine {
        fn drop(&mut self) {
            let Some(text) = self.line.take_line() else {
                return;
            };
            let text = JsValue::from_str(&text);
            match self.level {
                Level::ERROR => web_sys::console::error_1(&text),
                Level::WARN => web_sys::console::warn_1(&text),
                Level::INFO => web_sys::console::info_1(&text),
                _ => web_sys::console::debug_1(&text),
            }
        }
    }

    impl<'a> MakeWriter<'a> for ConsoleWriter {
        type Writer = ConsoleLine;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleLine {
                level: Level::INFO,
                line: LineBuffer::new(),
            }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleLine {
                level: *meta.level(),
                line: LineBuffer::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn joins_partial_writes() {
        let mut line = LineBuffer::new();
        write!(line, " INFO folio_form").unwrap();
        writeln!(line, ": Submission accepted").unwrap();
        assert_eq!(
            line.take_line().as_deref(),
            Some(" INFO folio_form: Submission accepted")
        );
        assert_eq!(line.take_line(), None);
    }
}
