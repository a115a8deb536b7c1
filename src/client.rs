// Websocket transport for the game server
//
// Frames are processed strictly one at a time: read, decide, send, then read
// the next. There is no reconnect; when the connection goes away the run ends.

use futures_util::{SinkExt, StreamExt};
use log::{error, info, warn};
use tokio::sync::oneshot;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::handler::ControlLoop;

/// Rewrites the player URL issued by the contest into the websocket endpoint
///
/// `http://host/codenjoy-contest/board/player/ID?code=CODE`
/// becomes `ws://host/codenjoy-contest/ws?user=ID&code=CODE`.
pub fn websocket_url(player_url: &str) -> String {
    player_url
        .replace("http", "ws")
        .replace("board/player/", "ws?user=")
        .replace("?code=", "&code=")
}

/// Connects and drives the control loop until the server disconnects or the
/// operator asks to exit through `exit_signal`.
pub async fn run(
    player_url: &str,
    control: &mut ControlLoop,
    mut exit_signal: oneshot::Receiver<()>,
) -> Result<(), String> {
    let url = websocket_url(player_url);
    let (stream, _) = connect_async(url.as_str())
        .await
        .map_err(|e| format!("Failed to connect to {}: {}", url, e))?;
    info!("Connection established");

    let (mut write, mut read) = stream.split();

    loop {
        tokio::select! {
            _ = &mut exit_signal => {
                control.request_exit();
                if let Err(e) = write.send(Message::Close(None)).await {
                    warn!("Failed to close connection cleanly: {}", e);
                }
                info!("Connection closed on request");
                break;
            }
            frame = read.next() => {
                match frame {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(token) = control.handle_frame(&text) {
                            write
                                .send(Message::Text(token))
                                .await
                                .map_err(|e| format!("Failed to send action: {}", e))?;
                        }
                    }
                    Some(Ok(Message::Close(reason))) => {
                        warn!("### disconnected ### {:?}", reason);
                        break;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        error!("### error ### {}", e);
                        return Err(format!("Connection error: {}", e));
                    }
                    None => {
                        warn!("### disconnected ###");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
