//! Follows the image classifier's prediction feed, one `label confidence` per line.

use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;

use binwise_core::Prediction;
use tokio::fs::{self, File};
use tokio::io::{AsyncBufReadExt, AsyncSeekExt, BufReader};
use tokio::sync::mpsc::Sender;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StartAt {
    /// Replay lines already in the file.
    Beginning,
    /// Only lines appended after opening.
    End,
}

/// Follow `path` on a background task until the receiver goes away.
pub(crate) fn spawn(path: PathBuf, start: StartAt, predictions: Sender<Prediction>) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(err) = follow(&path, start, &predictions).await {
            warn!(path = %path.display(), error = %err, "prediction feed stopped");
        }
    })
}

async fn follow(path: &Path, start: StartAt, predictions: &Sender<Prediction>) -> io::Result<()> {
    let file = open_when_present(path).await?;
    let mut reader = BufReader::new(file);
    if start == StartAt::End {
        reader.seek(SeekFrom::End(0)).await?;
    }
    info!(path = %path.display(), "following prediction feed");

    let mut line = String::new();
    loop {
        let read = reader.read_line(&mut line).await?;
        if read == 0 {
            rewind_if_truncated(path, &mut reader).await?;
            sleep(POLL_INTERVAL).await;
            continue;
        }
        // Writer has not finished the line yet.
        if !line.ends_with('\n') {
            continue;
        }

        match Prediction::parse_line(&line) {
            Some(prediction) => {
                if predictions.send(prediction).await.is_err() {
                    return Ok(());
                }
            }
            None => debug!(line = line.trim_end(), "skipping feed line"),
        }
        line.clear();
    }
}

async fn open_when_present(path: &Path) -> io::Result<File> {
    loop {
        match File::open(path).await {
            Ok(file) => return Ok(file),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "waiting for prediction feed");
                sleep(POLL_INTERVAL).await;
            }
            Err(err) => return Err(err),
        }
    }
}

async fn rewind_if_truncated(path: &Path, reader: &mut BufReader<File>) -> io::Result<()> {
    let length = fs::metadata(path).await?.len();
    if length < reader.stream_position().await? {
        debug!(path = %path.display(), "feed truncated, reading from start");
        reader.seek(SeekFrom::Start(0)).await?;
    }
    Ok(())
}
