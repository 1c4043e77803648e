//! Driving a line reader from an async byte source.

use crate::reader::LineReader;
use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::trace;

/// Read buffer size
const READ_BUFFER_SIZE: usize = 4 * 1024;

/// Attach a line callback to an async byte source.
///
/// Reads chunks until end of stream, handing each completed line to
/// `on_line`; the trailing partial line, if any, is handed over when the
/// source ends. Resolves once the stream has ended and the reader is
/// closed. Line framing itself has no error states; the `Err` case is the
/// transport's.
pub async fn attach<R, F>(mut source: R, on_line: F) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    F: FnMut(&str),
{
    let mut reader = LineReader::new(on_line);
    let mut buf = BytesMut::with_capacity(READ_BUFFER_SIZE);

    loop {
        buf.clear();
        let n = source.read_buf(&mut buf).await?;
        if n == 0 {
            trace!("end of stream");
            reader.finish();
            return Ok(());
        }
        reader.push(&buf);
    }
}
