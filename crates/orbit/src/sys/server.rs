use crate::events::AppEvent;
use async_channel::Sender;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::UnixListener;

pub const SOCKET_PATH: &str = "/tmp/orbit.sock";

/// Reply sent for every accepted command line.
pub const REPLY_OK: &str = "ok";

/// Listens on the control socket. Each client may send any number of command lines and gets one
/// reply line per command.
pub async fn run_server(tx: Sender<AppEvent>) {
    // a stale socket from a previous run blocks bind
    if let Err(e) = fs_err::remove_file(SOCKET_PATH)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        log::warn!("Could not remove stale socket: {}", e);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind {}: {}", SOCKET_PATH, e);
            return;
        }
    };
    log::info!("Listening for commands on {}", SOCKET_PATH);

    loop {
        let stream = match listener.accept().await {
            Ok((stream, _)) => stream,
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
                continue;
            }
        };

        let tx = tx.clone();
        tokio::spawn(async move {
            let (read, mut write) = stream.into_split();
            if let Err(e) = serve_lines(BufReader::new(read), &mut write, &tx).await {
                log::debug!("Control client dropped: {}", e);
            }
        });
    }
}

/// Parses command lines from `reader`, forwards them to the window and answers on `writer`.
/// Returns once the client hangs up or the window is gone.
pub async fn serve_lines<R, W>(
    reader: R,
    writer: &mut W,
    tx: &Sender<AppEvent>,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let reply = match line.parse::<AppEvent>() {
            Ok(event) => {
                log::debug!("Control command: {}", event);
                if tx.send(event).await.is_err() {
                    return Ok(());
                }
                REPLY_OK.to_string()
            }
            Err(e) => {
                log::warn!("Ignoring control command '{}': {}", line, e);
                format!("error: {e}")
            }
        };
        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_serve_lines_forwards_and_replies() {
        let (tx, rx) = async_channel::unbounded();
        let input: &[u8] = b"today\n\n  select 2026-10-20 \nshow\nmonth\n";
        let mut output = Vec::new();

        serve_lines(input, &mut output, &tx).await.unwrap();

        let replies = String::from_utf8(output).unwrap();
        let replies: Vec<_> = replies.lines().collect();
        assert_eq!(replies.len(), 4);
        assert_eq!(replies[0], REPLY_OK);
        assert_eq!(replies[1], REPLY_OK);
        assert!(replies[2].starts_with("error: Unknown command"));
        assert_eq!(replies[3], REPLY_OK);

        let events: Vec<_> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert_eq!(
            events,
            vec![
                AppEvent::JumpToToday,
                AppEvent::Select(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()),
                AppEvent::SwitchKind(datewheel::WheelKind::Month),
            ]
        );
    }

    #[tokio::test]
    async fn test_serve_lines_stops_when_window_is_gone() {
        let (tx, rx) = async_channel::unbounded();
        drop(rx);
        let input: &[u8] = b"today\nnext\n";
        let mut output = Vec::new();

        serve_lines(input, &mut output, &tx).await.unwrap();
        assert!(output.is_empty());
    }
}
