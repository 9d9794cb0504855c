//! Parser for YouTube "json3" timed-text documents.
//!
//! `yt-dlp --sub-format json3` writes caption tracks as a single JSON object
//! with an `events` array. Each event carries a start offset and duration in
//! milliseconds plus zero or more text runs (`segs`). Events without text runs
//! (window styling/positioning records) are skipped, as are events whose runs
//! collapse to whitespace.

use serde::Deserialize;

use crate::error::Result;
use crate::segments::CaptionSegment;

#[derive(Debug, Deserialize)]
struct Json3Document {
    #[serde(default)]
    events: Vec<Json3Event>,
}

#[derive(Debug, Deserialize)]
struct Json3Event {
    #[serde(rename = "tStartMs")]
    start_ms: Option<u64>,

    #[serde(rename = "dDurationMs")]
    duration_ms: Option<u64>,

    #[serde(default)]
    segs: Vec<Json3Run>,
}

#[derive(Debug, Deserialize)]
struct Json3Run {
    #[serde(default)]
    utf8: String,
}

/// Parse a json3 caption document into ordered caption segments.
///
/// Text runs within one event are concatenated, then whitespace-normalized
/// (auto captions embed newlines mid-cue). Events without usable text are
/// dropped. Output order follows document order, which YouTube emits in
/// nondecreasing start order.
pub fn parse_json3(document: &str) -> Result<Vec<CaptionSegment>> {
    let doc: Json3Document = serde_json::from_str(document)?;

    let mut segments = Vec::new();
    for event in doc.events {
        let (Some(start_ms), Some(duration_ms)) = (event.start_ms, event.duration_ms) else {
            continue;
        };

        let joined: String = event.segs.iter().map(|run| run.utf8.as_str()).collect();
        let text = joined.split_whitespace().collect::<Vec<_>>().join(" ");
        if text.is_empty() {
            continue;
        }

        segments.push(CaptionSegment::new(
            text,
            start_ms as f64 / 1_000.0,
            duration_ms as f64 / 1_000.0,
        ));
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_events_with_text_runs() -> anyhow::Result<()> {
        let doc = r#"{
            "wireMagic": "pb3",
            "events": [
                { "tStartMs": 0, "dDurationMs": 3000, "segs": [{ "utf8": "[Music]" }] },
                { "tStartMs": 3100, "dDurationMs": 1500, "segs": [{ "utf8": "hello " }, { "utf8": "world" }] }
            ]
        }"#;

        let segments = parse_json3(doc)?;
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "[Music]");
        assert_eq!(segments[0].start, 0.0);
        assert_eq!(segments[0].duration, 3.0);
        assert_eq!(segments[1].text, "hello world");
        assert_eq!(segments[1].start, 3.1);
        assert_eq!(segments[1].duration, 1.5);
        Ok(())
    }

    #[test]
    fn skips_window_events_and_whitespace_runs() -> anyhow::Result<()> {
        let doc = r#"{
            "events": [
                { "tStartMs": 0, "dDurationMs": 100, "wpWinPosId": 1 },
                { "tStartMs": 200, "dDurationMs": 400, "segs": [{ "utf8": "\n" }] },
                { "tStartMs": 600, "dDurationMs": 800, "segs": [{ "utf8": "real\ntext" }] }
            ]
        }"#;

        let segments = parse_json3(doc)?;
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].text, "real text");
        Ok(())
    }

    #[test]
    fn empty_document_yields_no_segments() -> anyhow::Result<()> {
        assert!(parse_json3("{}")?.is_empty());
        Ok(())
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_json3("not json").is_err());
    }
}
