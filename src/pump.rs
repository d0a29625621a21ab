//! Connection pump
//!
//! Owns the socket for the lifetime of one connection. Lifecycle is
//! Idle -> Opening -> Open -> Closed: [`ConnectionPump::open`] dials the
//! server and, once the transport is ready, spawns the two loops that run
//! until closure. Closed is terminal — a new connect attempt builds a
//! fresh pump instance.
//!
//! The reader loop decodes inbound frames and publishes them as events;
//! the writer loop drains the outbound queue and publishes a
//! send-confirmation only after each write completes, so folded history
//! reflects only messages that actually left the wire. The loops share
//! nothing but the split transport halves and never block each other.

use crate::journey::Event;
use crate::outbound::OutboundReceiver;
use crate::protocol;
use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use thiserror::Error;

/// Transport failure; fatal to the current connection only
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("transport closed")]
    Closed,
    #[error("websocket error: {0}")]
    Ws(#[from] tokio_tungstenite::tungstenite::Error),
}

/// Inbound half of the transport, read exclusively by the reader loop
#[async_trait]
pub trait FrameSource: Send + 'static {
    /// Next text frame. `None` once the transport has closed normally.
    async fn next_frame(&mut self) -> Option<Result<String, TransportError>>;
}

/// Outbound half of the transport, written exclusively by the writer loop
#[async_trait]
pub trait FrameSink: Send + 'static {
    async fn send_frame(&mut self, frame: String) -> Result<(), TransportError>;
}

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Production reader half over a split websocket stream
pub struct WsFrameSource {
    inner: SplitStream<WsStream>,
}

/// Production writer half over a split websocket stream
pub struct WsFrameSink {
    inner: SplitSink<WsStream, Message>,
}

#[async_trait]
impl FrameSource for WsFrameSource {
    async fn next_frame(&mut self) -> Option<Result<String, TransportError>> {
        loop {
            match self.inner.next().await {
                Some(Ok(Message::Text(text))) => return Some(Ok(text)),
                Some(Ok(Message::Close(_))) | None => return None,
                // Control frames are transport plumbing, not protocol frames.
                Some(Ok(_)) => {}
                Some(Err(e)) => return Some(Err(e.into())),
            }
        }
    }
}

#[async_trait]
impl FrameSink for WsFrameSink {
    async fn send_frame(&mut self, frame: String) -> Result<(), TransportError> {
        Ok(self.inner.send(Message::Text(frame)).await?)
    }
}

/// Dial `ws(s)://<address>/api` and return the split transport halves.
pub async fn dial(
    address: &str,
    secure: bool,
) -> Result<(WsFrameSink, WsFrameSource), TransportError> {
    let scheme = if secure { "wss" } else { "ws" };
    let url = format!("{scheme}://{address}/api");
    tracing::info!(%url, "opening transport");
    let (stream, _response) = connect_async(url).await?;
    let (sink, source) = stream.split();
    Ok((WsFrameSink { inner: sink }, WsFrameSource { inner: source }))
}

/// Handle to the two running loops of an open connection
pub struct ConnectionPump {
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl ConnectionPump {
    /// Spawn the reader and writer loops over an already-open transport.
    pub fn open<Src, Snk>(
        source: Src,
        sink: Snk,
        outbound: OutboundReceiver,
        events: mpsc::UnboundedSender<Event>,
    ) -> Self
    where
        Src: FrameSource,
        Snk: FrameSink,
    {
        let reader = tokio::spawn(read_loop(source, events.clone()));
        let writer = tokio::spawn(write_loop(sink, outbound, events));
        Self { reader, writer }
    }

    /// Explicit close. Terminal, like a transport error.
    pub fn shutdown(&self) {
        self.reader.abort();
        self.writer.abort();
    }
}

/// Decode inbound frames and publish them, until the transport closes.
///
/// A single malformed frame is reported and skipped; it must not kill
/// the connection.
async fn read_loop<Src: FrameSource>(mut source: Src, events: mpsc::UnboundedSender<Event>) {
    loop {
        match source.next_frame().await {
            Some(Ok(frame)) => match protocol::decode(&frame) {
                Ok(output) => {
                    if events.send(Event::OutputReceived(output)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(error = %e, frame = %frame, "dropping malformed frame");
                    if events
                        .send(Event::FrameRejected {
                            reason: e.to_string(),
                        })
                        .is_err()
                    {
                        break;
                    }
                }
            },
            Some(Err(e)) => {
                tracing::warn!(error = %e, "transport error, reader stopping");
                let _ = events.send(Event::TransportClosed);
                break;
            }
            None => {
                tracing::info!("transport closed, reader stopping");
                let _ = events.send(Event::TransportClosed);
                break;
            }
        }
    }
}

/// Drain the outbound queue one input at a time. The confirmation for an
/// input is published only after its write completed, and always before
/// any later-enqueued input is sent.
async fn write_loop<Snk: FrameSink>(
    mut sink: Snk,
    mut outbound: OutboundReceiver,
    events: mpsc::UnboundedSender<Event>,
) {
    while let Some(input) = outbound.next().await {
        let frame = match protocol::encode(&input) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(error = %e, "failed to encode outbound input");
                continue;
            }
        };
        match sink.send_frame(frame).await {
            Ok(()) => {
                if events.send(Event::SendConfirmed(input)).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "transport error, writer stopping");
                let _ = events.send(Event::TransportClosed);
                break;
            }
        }
    }
}
