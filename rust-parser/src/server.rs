//! Request loop of the native parser.

use crate::protocol::{ERR_DECODE, ParseOutput, respond};
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How long to wait before polling the input again after end of input.
const EOF_POLL_INTERVAL: Duration = Duration::from_millis(500);

/// What to do once the input reaches end of file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnEof {
    /// Stop serving.
    #[default]
    Exit,
    /// Keep polling for more requests.
    Wait,
}

/// Answers every request line read from `reader` with one response line on
/// `writer`.
///
/// # Returns
/// * `Ok(usize)` - Number of requests served once the input is exhausted
/// * `Err(anyhow::Error)` - Reading the input or writing a response failed
pub fn serve<R: BufRead, W: Write>(mut reader: R, mut writer: W, on_eof: OnEof) -> Result<usize> {
    let mut served = 0;
    let mut line = String::new();

    loop {
        line.clear();
        let output = match reader.read_line(&mut line) {
            Ok(0) => match on_eof {
                OnEof::Exit => {
                    info!("End of input after {} request(s)", served);
                    return Ok(served);
                }
                OnEof::Wait => {
                    thread::sleep(EOF_POLL_INTERVAL);
                    continue;
                }
            },
            Ok(_) => respond(&line),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!("Request is not valid UTF-8: {}", e);
                ParseOutput::from_error(ERR_DECODE)
            }
            Err(e) => return Err(e).context("failed to read request"),
        };

        debug!("Responding with status {:?}", output.status);
        serde_json::to_writer(&mut writer, &output).context("failed to encode response")?;
        writer
            .write_all(b"\n")
            .and_then(|()| writer.flush())
            .context("failed to write response")?;
        served += 1;
    }
}
