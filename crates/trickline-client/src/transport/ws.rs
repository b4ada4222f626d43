//! WebSocket connector.
//!
//! `open` performs the handshake, then hands the socket to a pump task that
//! moves frames between the socket and a [`Connection`] channel pair. The pump
//! ends (and the socket closes) when either side goes away:
//! - server close, read error, or write error: `inbound` yields `None`
//! - client drops `outbound`: a close frame is sent

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info};

use trickline_core::{Result, TricklineError};

use crate::transport::codec::{into_frame, into_message};
use crate::transport::connector::{Connection, Connector, Peer};

#[derive(Debug, Default, Clone, Copy)]
pub struct WsConnector;

#[async_trait]
impl Connector for WsConnector {
    async fn open(&self, endpoint: &str) -> Result<Connection> {
        let (socket, _resp) = connect_async(endpoint)
            .await
            .map_err(|e| TricklineError::Internal(format!("websocket connect failed: {e}")))?;
        info!(endpoint, "websocket open");

        let (conn, peer) = Connection::pair();
        tokio::spawn(pump(socket, peer));
        Ok(conn)
    }
}

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn pump(socket: Socket, mut peer: Peer) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    loop {
        tokio::select! {
            // outbound writer
            maybe_out = peer.from_client.recv() => {
                match maybe_out {
                    Some(frame) => {
                        if ws_tx.send(into_message(frame)).await.is_err() {
                            debug!("websocket write failed");
                            break;
                        }
                    }
                    None => {
                        let _ = ws_tx.send(Message::Close(None)).await;
                        break;
                    }
                }
            }

            // inbound reader
            incoming = ws_rx.next() => {
                let Some(incoming) = incoming else { break; };
                let msg = match incoming {
                    Ok(msg) => msg,
                    Err(e) => {
                        debug!(error = %e, "websocket read failed");
                        break;
                    }
                };
                if let Message::Close(_) = msg {
                    break;
                }
                if let Some(frame) = into_frame(msg) {
                    if peer.to_client.send(frame).is_err() {
                        break;
                    }
                }
            }
        }
    }
    debug!("websocket pump finished");
}
