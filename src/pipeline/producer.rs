// src/pipeline/producer.rs
// =============================================================================
// Reads the URL file and feeds every line into the work channel.
//
// How it works:
// 1. Open the file (failure is logged and counts as "no URLs")
// 2. Send each line, exactly as read, to the channel. A full channel makes
//    the send wait, which is how slow workers throttle the reader
// 3. Stop at end of file, at the first read error, or if no worker is left
// 4. Drop the Sender: the channel closes and each worker exits once it has
//    drained what is left
//
// Step 4 happens on every path, so workers always shut down even when not a
// single line could be read.
// =============================================================================

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{error, info, warn};

use crate::channel::{SendError, Sender};

/// What the producer managed to do before it finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProducerReport {
    /// Lines handed to the channel
    pub records: usize,
    /// Most URLs that were ever waiting in the channel at once
    pub peak_queue_len: usize,
}

/// Sends each line of `reader` into the channel and returns how many were
/// sent.
///
/// Lines are not trimmed or validated; only the line terminator is removed.
/// Blank lines are sent too and will be classified like any other malformed
/// URL. Bytes that are not valid UTF-8 are replaced rather than ending the
/// read, so every line in the file is still counted.
pub fn produce_lines<R: BufRead>(mut reader: R, sender: &Sender<String>) -> usize {
    let mut records = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                error!(error = %e, records, "failed to read URL list; stopping early");
                break;
            }
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        let line = String::from_utf8_lossy(&buf).into_owned();

        if let Err(SendError(url)) = sender.send(line) {
            warn!(url = %url, records, "no workers left to check URLs; stopping early");
            break;
        }
        records += 1;
    }

    records
}

/// Reads `path` into the channel, then closes it by dropping `sender`.
pub fn produce_from_path(path: &Path, sender: Sender<String>) -> ProducerReport {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            error!(path = %path.display(), error = %e, "could not open URL list");
            return ProducerReport::default();
        }
    };

    let records = produce_lines(BufReader::new(file), &sender);
    info!(path = %path.display(), records, "finished reading URL list");

    // Nothing is sent after this point, so the peak is final
    ProducerReport {
        records,
        peak_queue_len: sender.peak_len(),
    }
}
