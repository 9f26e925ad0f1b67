//! Message text for the `send` command.

use std::io::{Read, Write};
use tracing::{debug, error};

const CHUNK_SIZE: usize = 1024;

/// Build the message text from arguments, falling back to `reader` when there are none.
///
/// Arguments are joined with newlines, echoed once, and the reader is left untouched.
pub fn message_text<R: Read, W: Write>(args: &[String], reader: R, mut echo: W) -> String {
    if !args.is_empty() {
        let text = args.join("\n");
        if let Err(e) = writeln!(echo, "{}", text).and_then(|()| echo.flush()) {
            debug!("Failed to echo arguments: {}", e);
        }
        return text;
    }

    read_echoed(reader, echo)
}

/// Read `reader` to end-of-stream, writing every chunk to `echo` as it arrives.
///
/// A read error stops reading; whatever was read before it is returned.
pub fn read_echoed<R: Read, W: Write>(mut reader: R, mut echo: W) -> String {
    let mut buf = [0u8; CHUNK_SIZE];
    let mut bytes = Vec::new();

    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                if let Err(e) = echo.write_all(&buf[..n]).and_then(|()| echo.flush()) {
                    debug!("Failed to echo input: {}", e);
                }
                bytes.extend_from_slice(&buf[..n]);
            }
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                error!("Failed reading standard input: {}", e);
                break;
            }
        }
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    struct UnreadableInput;

    impl Read for UnreadableInput {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            panic!("input must not be read when arguments are present");
        }
    }

    /// Yields some bytes, then fails.
    struct FailingInput {
        served: bool,
    }

    impl Read for FailingInput {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
            }
            self.served = true;
            buf[..7].copy_from_slice(b"partial");
            Ok(7)
        }
    }

    #[test]
    fn test_args_joined_without_reading_input() {
        let args = vec!["first".to_string(), "second".to_string()];
        let mut echo = Vec::new();

        let text = message_text(&args, UnreadableInput, &mut echo);

        assert_eq!(text, "first\nsecond");
        assert_eq!(echo, b"first\nsecond\n");
    }

    #[test]
    fn test_reads_and_echoes_input() {
        let input = "line one\nline two\n".repeat(200);
        let mut echo = Vec::new();

        let text = message_text(&[], Cursor::new(input.clone()), &mut echo);

        assert_eq!(text, input);
        assert_eq!(echo, input.as_bytes());
    }

    #[test]
    fn test_empty_input() {
        let text = message_text(&[], Cursor::new(Vec::new()), io::sink());
        assert_eq!(text, "");
    }

    #[test]
    fn test_read_error_keeps_partial_text() {
        let text = read_echoed(FailingInput { served: false }, io::sink());
        assert_eq!(text, "partial");
    }
}
