//! SSE streaming parser for Assistants v2 run streams.
//!
//! Converts a raw `reqwest` byte stream into `RunEvent` values.
//! Handles `event:`/`data:` line pairs, `data: [DONE]`, partial lines,
//! and buffering.

use bytes::Bytes;
use futures::stream::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::error::OpenAIError;

/// Event type emitted when the assistant streams message text.
pub const MESSAGE_DELTA_EVENT: &str = "thread.message.delta";

/// Event type emitted when the run finishes successfully.
pub const RUN_COMPLETED_EVENT: &str = "thread.run.completed";

/// Event type emitted when the run fails server-side.
pub const RUN_FAILED_EVENT: &str = "thread.run.failed";

/// A single event from a streaming assistant run.
#[derive(Debug, Clone)]
pub struct RunEvent {
    /// The SSE event type (e.g., "thread.message.delta").
    pub event: String,
    /// Text delta carried by this event. Empty for non-message events.
    pub delta: String,
    /// Whether the run stream has ended.
    pub done: bool,
}

/// Raw message-delta payload from the Assistants API.
#[derive(Debug, serde::Deserialize)]
struct MessageDeltaRaw {
    delta: DeltaRaw,
}

#[derive(Debug, serde::Deserialize)]
struct DeltaRaw {
    #[serde(default)]
    content: Vec<DeltaBlockRaw>,
}

#[derive(Debug, serde::Deserialize)]
struct DeltaBlockRaw {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<DeltaTextRaw>,
}

#[derive(Debug, serde::Deserialize)]
struct DeltaTextRaw {
    #[serde(default)]
    value: Option<String>,
}

/// Stream adapter that converts raw SSE bytes into `RunEvent` values.
pub struct RunEventStream {
    inner: Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>,
    buffer: String,
    pending_event: Option<String>,
}

impl RunEventStream {
    pub(crate) fn new(
        byte_stream: impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static,
    ) -> Self {
        Self {
            inner: Box::pin(byte_stream),
            buffer: String::new(),
            pending_event: None,
        }
    }
}

impl Stream for RunEventStream {
    type Item = Result<RunEvent, OpenAIError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            // Try to parse a complete line from the buffer
            if let Some(event) = try_parse_line(&mut this.buffer, &mut this.pending_event) {
                return Poll::Ready(Some(event));
            }

            // Need more data from the byte stream
            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(bytes))) => {
                    match std::str::from_utf8(&bytes) {
                        Ok(text) => this.buffer.push_str(text),
                        Err(e) => {
                            return Poll::Ready(Some(Err(OpenAIError::Parse(format!(
                                "Invalid UTF-8 in stream: {}",
                                e
                            )))));
                        }
                    }
                    // Loop to try parsing again
                }
                Poll::Ready(Some(Err(e))) => {
                    return Poll::Ready(Some(Err(OpenAIError::Network(e.to_string()))));
                }
                Poll::Ready(None) => {
                    // Stream ended; check for remaining buffer content
                    if this.buffer.trim().is_empty() {
                        return Poll::Ready(None);
                    }
                    if let Some(event) =
                        try_parse_line(&mut this.buffer, &mut this.pending_event)
                    {
                        return Poll::Ready(Some(event));
                    }
                    return Poll::Ready(None);
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Try to extract and parse a complete SSE line from the buffer.
/// Returns `None` if no complete line is available yet.
fn try_parse_line(
    buffer: &mut String,
    pending_event: &mut Option<String>,
) -> Option<Result<RunEvent, OpenAIError>> {
    loop {
        let newline_pos = buffer.find('\n')?;
        let line = buffer[..newline_pos].trim().to_string();
        buffer.drain(..=newline_pos);

        // Blank lines separate SSE events
        if line.is_empty() {
            continue;
        }

        // Remember the event type; the payload arrives on the next data line
        if let Some(event) = line.strip_prefix("event: ") {
            *pending_event = Some(event.trim().to_string());
            continue;
        }

        if let Some(data) = line.strip_prefix("data: ") {
            let data = data.trim();
            let event = pending_event.take().unwrap_or_default();

            // Done signal
            if data == "[DONE]" {
                return Some(Ok(RunEvent {
                    event,
                    delta: String::new(),
                    done: true,
                }));
            }

            match event.as_str() {
                MESSAGE_DELTA_EVENT => match serde_json::from_str::<MessageDeltaRaw>(data) {
                    Ok(raw) => {
                        let delta: String = raw
                            .delta
                            .content
                            .into_iter()
                            .filter(|b| b.block_type == "text")
                            .filter_map(|b| b.text.and_then(|t| t.value))
                            .collect();

                        return Some(Ok(RunEvent {
                            event,
                            delta,
                            done: false,
                        }));
                    }
                    Err(e) => {
                        return Some(Err(OpenAIError::Parse(format!(
                            "Failed to parse message delta: {} (data: {})",
                            e,
                            &data[..data.len().min(200)]
                        ))));
                    }
                },
                RUN_FAILED_EVENT => {
                    let reason = serde_json::from_str::<serde_json::Value>(data)
                        .ok()
                        .and_then(|v| {
                            v.get("last_error")
                                .and_then(|e| e.get("message"))
                                .and_then(|m| m.as_str())
                                .map(String::from)
                        })
                        .unwrap_or_else(|| "run failed".to_string());

                    return Some(Err(OpenAIError::Stream(reason)));
                }
                RUN_COMPLETED_EVENT => {
                    return Some(Ok(RunEvent {
                        event,
                        delta: String::new(),
                        done: true,
                    }));
                }
                // Lifecycle events we don't consume (run.created, step deltas, ...)
                _ => {
                    return Some(Ok(RunEvent {
                        event,
                        delta: String::new(),
                        done: false,
                    }));
                }
            }
        }

        // Skip non-event, non-data lines (e.g., "id:", "retry:")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    fn make_sse_bytes(lines: &[&str]) -> Vec<Result<Bytes, reqwest::Error>> {
        lines
            .iter()
            .map(|line| Ok(Bytes::from(format!("{}\n", line))))
            .collect()
    }

    fn delta_line(text: &str) -> String {
        format!(
            r#"data: {{"delta":{{"content":[{{"index":0,"type":"text","text":{{"value":"{}"}}}}]}}}}"#,
            text
        )
    }

    #[tokio::test]
    async fn test_parse_single_delta() {
        let delta = delta_line("Hello");
        let data = make_sse_bytes(&[
            "event: thread.message.delta",
            &delta,
            "",
            "event: thread.run.completed",
            r#"data: {"id":"run_1"}"#,
        ]);

        let byte_stream = futures::stream::iter(data);
        let mut stream = RunEventStream::new(byte_stream);

        let event = stream.next().await.unwrap().unwrap();
        assert_eq!(event.event, MESSAGE_DELTA_EVENT);
        assert_eq!(event.delta, "Hello");
        assert!(!event.done);

        let done = stream.next().await.unwrap().unwrap();
        assert!(done.done);
    }

    #[tokio::test]
    async fn test_deltas_preserve_arrival_order() {
        let d1 = delta_line("Hello");
        let d2 = delta_line(" world");
        let data = make_sse_bytes(&[
            "event: thread.message.delta",
            &d1,
            "",
            "event: thread.message.delta",
            &d2,
            "",
            "event: done",
            "data: [DONE]",
        ]);

        let byte_stream = futures::stream::iter(data);
        let mut stream = RunEventStream::new(byte_stream);

        let e1 = stream.next().await.unwrap().unwrap();
        assert_eq!(e1.delta, "Hello");

        let e2 = stream.next().await.unwrap().unwrap();
        assert_eq!(e2.delta, " world");

        let done = stream.next().await.unwrap().unwrap();
        assert!(done.done);
    }

    #[tokio::test]
    async fn test_lifecycle_events_carry_no_text() {
        let data = make_sse_bytes(&[
            "event: thread.run.created",
            r#"data: {"id":"run_1","status":"queued"}"#,
            "",
            "event: done",
            "data: [DONE]",
        ]);

        let byte_stream = futures::stream::iter(data);
        let mut stream = RunEventStream::new(byte_stream);

        let event = stream.next().await.unwrap().unwrap();
        assert_eq!(event.event, "thread.run.created");
        assert_eq!(event.delta, "");
        assert!(!event.done);
    }

    #[tokio::test]
    async fn test_run_failed_surfaces_error() {
        let data = make_sse_bytes(&[
            "event: thread.run.failed",
            r#"data: {"id":"run_1","last_error":{"code":"server_error","message":"boom"}}"#,
        ]);

        let byte_stream = futures::stream::iter(data);
        let mut stream = RunEventStream::new(byte_stream);

        let err = stream.next().await.unwrap().unwrap_err();
        assert!(matches!(err, OpenAIError::Stream(_)));
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_non_text_blocks_ignored() {
        let data = make_sse_bytes(&[
            "event: thread.message.delta",
            r#"data: {"delta":{"content":[{"index":0,"type":"image_file"}]}}"#,
            "",
            "event: done",
            "data: [DONE]",
        ]);

        let byte_stream = futures::stream::iter(data);
        let mut stream = RunEventStream::new(byte_stream);

        let event = stream.next().await.unwrap().unwrap();
        assert_eq!(event.delta, "");
    }
}
