//! Sources of input lines for the question loop.

use std::io::{self, BufRead};

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, Lines};
use tokio::sync::mpsc;
use tracing::debug;

const LINE_BUFFER: usize = 16;

/// Yields one line of user input at a time; `None` marks end of input.
#[async_trait]
pub trait LineSource: Send {
    async fn next_line(&mut self) -> io::Result<Option<String>>;
}

#[async_trait]
impl<R> LineSource for Lines<R>
where
    R: AsyncBufRead + Unpin + Send,
{
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        Self::next_line(self).await
    }
}

#[async_trait]
impl LineSource for mpsc::Receiver<io::Result<String>> {
    async fn next_line(&mut self) -> io::Result<Option<String>> {
        self.recv().await.transpose()
    }
}

/// Read lines from a blocking reader on a detached thread.
///
/// Dropping the receiver abandons the reader, even while a read is pending,
/// so the caller can stop waiting for input at any time.
pub fn spawn_line_reader<R>(reader: R) -> io::Result<mpsc::Receiver<io::Result<String>>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel(LINE_BUFFER);
    std::thread::Builder::new()
        .name("factbot-input".to_string())
        .spawn(move || {
            for line in reader.lines() {
                let failed = line.is_err();
                if tx.blocking_send(line).is_err() || failed {
                    break;
                }
            }
            debug!("Input reader finished");
        })?;
    Ok(rx)
}
