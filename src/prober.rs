//! Metadata-only scan of raw Lottie text.
//!
//! Used when no worker thread is available to hide the cost of a full parse: only the top-level
//! `fr`, `ip`, `op`, `w` and `h` fields are read, everything else is skipped without allocating.

use crate::foundation::core::FLOAT_EPSILON;

/// Headline document metadata extracted by [`probe`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HeaderInfo {
    /// Canvas width.
    pub width: f32,
    /// Canvas height.
    pub height: f32,
    /// Frames per second.
    pub frame_rate: f32,
    /// In-point (`ip`).
    pub start_frame: f32,
    /// Out-point (`op`).
    pub end_frame: f32,
}

impl HeaderInfo {
    /// Total number of frames (`op - ip`).
    pub fn frame_count(&self) -> f32 {
        self.end_frame - self.start_frame
    }
}

#[derive(Clone, Copy)]
enum Field {
    FrameRate,
    Start,
    End,
    Width,
    Height,
}

const VERSION_KEY: &[u8] = b"\"v\":";

const FIELDS: [(&[u8], Field); 5] = [
    (b"\"fr\":", Field::FrameRate),
    (b"\"ip\":", Field::Start),
    (b"\"op\":", Field::End),
    (b"\"w\":", Field::Width),
    (b"\"h\":", Field::Height),
];

/// Scan `content` for top-level header fields.
///
/// Only keys at brace depth 1 are considered so nested `w`/`h`/`ip` values (layers, assets) are
/// never misread. Returns `None` when the frame rate resolves to zero, i.e. the text does not
/// look like a Lottie document.
pub fn probe(content: &[u8]) -> Option<HeaderInfo> {
    let mut info = HeaderInfo::default();
    let mut depth = 0u32;
    let mut i = 0usize;

    'scan: while i < content.len() {
        match content[i] {
            0 => break,
            b'{' => {
                depth += 1;
                i += 1;
                continue;
            }
            b'}' => {
                depth = depth.saturating_sub(1);
                i += 1;
                continue;
            }
            _ => {}
        }
        if depth != 1 {
            i += 1;
            continue;
        }

        let rest = &content[i..];
        if rest.starts_with(VERSION_KEY) {
            i += VERSION_KEY.len();
            continue;
        }

        for (key, field) in FIELDS {
            if !rest.starts_with(key) {
                continue;
            }
            let value_at = i + key.len();
            let value = leading_number(&content[value_at..]);
            match field {
                Field::FrameRate => info.frame_rate = value,
                Field::Start => info.start_frame = value,
                Field::End => info.end_frame = value,
                Field::Width => info.width = value,
                Field::Height => info.height = value,
            }
            i = value_end(content, value_at);
            continue 'scan;
        }

        i += 1;
    }

    if info.frame_rate < FLOAT_EPSILON {
        tracing::debug!("not a Lottie document? frame rate is 0");
        return None;
    }

    Some(info)
}

// Position of the next ',' (or '}' when no comma follows) at or after `from`.
fn value_end(content: &[u8], from: usize) -> usize {
    let tail = &content[from..];
    let nul = tail.iter().position(|&b| b == 0).unwrap_or(tail.len());
    let tail = &tail[..nul];
    tail.iter()
        .position(|&b| b == b',')
        .or_else(|| tail.iter().position(|&b| b == b'}'))
        .map_or(content.len(), |p| from + p)
}

// Parse the longest numeric prefix (after leading whitespace); 0.0 when there is none.
fn leading_number(bytes: &[u8]) -> f32 {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let bytes = &bytes[start..];

    let mut end = 0usize;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp = end + 1;
        if exp < bytes.len() && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let digits = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp > digits {
            end = exp;
        }
    }

    std::str::from_utf8(&bytes[..end])
        .ok()
        .and_then(|s| s.parse::<f32>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
#[path = "../tests/unit/prober.rs"]
mod tests;
