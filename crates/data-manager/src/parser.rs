//! Event feed parser
//!
//! The feed is a JSON array of `{time, lng, lat, mag}` objects. `time` may
//! arrive as a number or as a numeric string; strings are read like
//! JavaScript's `parseInt`, taking the leading integer and ignoring the
//! rest. Extra fields are ignored.

use gaia_shared::{EventRecord, GaiaError, GaiaResult};
use serde::Deserialize;

use crate::timeline::Timeline;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FeedTime {
    Int(i64),
    Float(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct FeedRecord {
    time: FeedTime,
    lng: f64,
    lat: f64,
    mag: f64,
}

/// Parse the raw feed into a validated timeline
pub fn parse_feed(json: &str) -> GaiaResult<Timeline> {
    let raw: Vec<FeedRecord> = serde_json::from_str(json)?;

    let records = raw
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let time = feed_time_to_millis(&record.time).ok_or_else(|| GaiaError::DataParse {
                message: format!("Record {index} has an unreadable time: {:?}", record.time),
                line: None,
            })?;
            Ok(EventRecord::new(time, record.lng, record.lat, record.mag))
        })
        .collect::<GaiaResult<Vec<_>>>()?;

    log::debug!("Parsed {} feed records", records.len());
    Timeline::new(records)
}

fn feed_time_to_millis(time: &FeedTime) -> Option<i64> {
    match time {
        FeedTime::Int(ms) => Some(*ms),
        FeedTime::Float(ms) => {
            let ms = ms.trunc();
            // i64::MAX as f64 rounds up to 2^63, which is already out of range
            (ms >= i64::MIN as f64 && ms < i64::MAX as f64).then_some(ms as i64)
        }
        FeedTime::Text(text) => parse_leading_int(text),
    }
}

/// Leading optionally-signed decimal integer, after leading whitespace
fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first()? {
        b'-' => (-1, &text[1..]),
        b'+' => (1, &text[1..]),
        _ => (1, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}
