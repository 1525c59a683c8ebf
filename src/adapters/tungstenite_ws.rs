//! Tungstenite-based WebSocket adapter.
//!
//! Opens sockets with tokio-tungstenite and narrows them to the text-frame
//! sink/stream pair the realtime client works with.

use async_trait::async_trait;
use futures_util::{future, SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::debug;

use crate::traits::{FrameSink, FrameStream, WebSocketConnector, WsError, WsFrame};

/// WebSocket connector using tokio-tungstenite.
///
/// Ping frames are answered by tungstenite itself on the next write or
/// flush; pong and raw frames are dropped. Binary frames carrying UTF-8 are
/// passed on as text.
#[derive(Debug, Clone, Default)]
pub struct TungsteniteConnector;

impl TungsteniteConnector {
    pub fn new() -> Self {
        Self
    }
}

fn convert_message(msg: Message) -> Option<WsFrame> {
    match msg {
        Message::Text(text) => Some(WsFrame::Text(text)),
        Message::Binary(data) => String::from_utf8(data).ok().map(WsFrame::Text),
        Message::Close(frame) => {
            debug!("Received close frame from server: {:?}", frame);
            Some(WsFrame::Close)
        }
        Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => None,
    }
}

#[async_trait]
impl WebSocketConnector for TungsteniteConnector {
    async fn connect(&self, url: &str) -> Result<(FrameSink, FrameStream), WsError> {
        let (ws_stream, _response) = connect_async(url)
            .await
            .map_err(|e| WsError::ConnectionFailed(e.to_string()))?;

        let (ws_sink, ws_stream) = ws_stream.split();

        let sink = ws_sink
            .sink_map_err(|e| WsError::SendFailed(e.to_string()))
            .with(|text: String| future::ok::<Message, WsError>(Message::Text(text)));

        let stream = ws_stream.filter_map(|msg| {
            future::ready(match msg {
                Ok(msg) => convert_message(msg).map(Ok),
                Err(e) => Some(Err(WsError::Protocol(e.to_string()))),
            })
        });

        Ok((Box::pin(sink), Box::pin(stream)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_text() {
        assert_eq!(
            convert_message(Message::Text("{}".to_string())),
            Some(WsFrame::Text("{}".to_string()))
        );
    }

    #[test]
    fn test_convert_binary_utf8() {
        assert_eq!(
            convert_message(Message::Binary(b"hello".to_vec())),
            Some(WsFrame::Text("hello".to_string()))
        );
        assert_eq!(convert_message(Message::Binary(vec![0xff, 0xfe])), None);
    }

    #[test]
    fn test_control_frames_dropped() {
        assert_eq!(convert_message(Message::Ping(vec![1])), None);
        assert_eq!(convert_message(Message::Pong(vec![1])), None);
        assert_eq!(convert_message(Message::Close(None)), Some(WsFrame::Close));
    }

    #[tokio::test]
    async fn test_connect_failure() {
        let connector = TungsteniteConnector::new();
        let result = connector.connect("ws://127.0.0.1:59999/ws?token=t").await;
        assert!(matches!(result, Err(WsError::ConnectionFailed(_))));
    }
}
