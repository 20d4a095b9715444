//! `tracing` subscriber setup.
//!
//! In the browser, events go to the devtools console (errors and warnings
//! through `console.error`/`console.warn` so they keep their styling).
//! Natively, events go to stderr filtered by `GALLERYVIEW_LOG`.
//!
//! Installing twice is harmless: the second call is a no-op.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the native filter directive.
pub const LOG_ENV: &str = "GALLERYVIEW_LOG";

const DEFAULT_DIRECTIVE: &str = "info";

fn filter_for(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the native stderr subscriber.
#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    let directive = std::env::var(LOG_ENV).ok();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(directive.as_deref()))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Install the browser console subscriber with an optional filter
/// directive such as `"debug"` or `"galleryview=trace"`.
#[cfg(target_arch = "wasm32")]
pub fn init_with(directive: Option<&str>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter_for(directive))
        .with_writer(console::MakeConsoleWriter)
        .with_ansi(false)
        .without_time()
        .try_init();
}

#[cfg(target_arch = "wasm32")]
mod console {
    use std::io;

    use tracing::{Level, Metadata};
    use tracing_subscriber::fmt::MakeWriter;
    use wasm_bindgen::JsValue;

    /// Hands out one buffered writer per event.
    pub(super) struct MakeConsoleWriter;

    /// Buffers one formatted event and emits it when dropped.
    pub(super) struct ConsoleWriter {
        level: Level,
        buf: Vec<u8>,
    }

    impl io::Write for ConsoleWriter {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.buf.extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Drop for ConsoleWriter {
        fn drop(&mut self) {
            if self.buf.is_empty() {
                return;
            }
            let text = String::from_utf8_lossy(&self.buf);
            let line = JsValue::from_str(text.trim_end());
            match self.level {
                Level::ERROR => web_sys::console::error_1(&line),
                Level::WARN => web_sys::console::warn_1(&line),
                Level::DEBUG | Level::TRACE => web_sys::console::debug_1(&line),
                Level::INFO => web_sys::console::log_1(&line),
            }
        }
    }

    impl<'a> MakeWriter<'a> for MakeConsoleWriter {
        type Writer = ConsoleWriter;

        fn make_writer(&'a self) -> Self::Writer {
            ConsoleWriter {
                level: Level::INFO,
                buf: Vec::new(),
            }
        }

        fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
            ConsoleWriter {
                level: *meta.level(),
                buf: Vec::new(),
            }
        }
    }
}
