//! M3U playlist parser.
//!
//! Tolerant by construction: unknown directives, stray URLs and broken
//! attribute quoting never fail the parse, they just produce fewer channels
//! or fall back to default attribute values.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::{new_id, Channel, UNCATEGORIZED};

const EXTINF: &str = "#EXTINF:";

struct AttrPatterns {
    group_title: Option<Regex>,
    tvg_logo: Option<Regex>,
    tvg_id: Option<Regex>,
}

static ATTR_PATTERNS: OnceLock<AttrPatterns> = OnceLock::new();

fn attr_patterns() -> &'static AttrPatterns {
    ATTR_PATTERNS.get_or_init(|| AttrPatterns {
        group_title: quoted_attr("group-title"),
        tvg_logo: quoted_attr("tvg-logo"),
        tvg_id: quoted_attr("tvg-id"),
    })
}

fn quoted_attr(name: &str) -> Option<Regex> {
    match Regex::new(&format!(r#"{}="([^"]*)""#, regex::escape(name))) {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::error!("m3u: bad attribute pattern for {}: {}", name, e);
            None
        }
    }
}

fn capture(re: Option<&Regex>, line: &str) -> Option<String> {
    re?
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Parse M3U text into channels, in playlist order.
///
/// A `#EXTINF` line only becomes a channel once a URL line follows it; a
/// metadata line followed by another metadata line is dropped, but it still
/// consumes a channel number.
pub fn parse(content: &str) -> Vec<Channel> {
    let mut channels = Vec::new();
    let mut pending: Option<Channel> = None;
    let mut number: u32 = 1;

    for line in content.lines() {
        let line = line.trim();

        if line.starts_with(EXTINF) {
            if let Some(dropped) = pending.replace(parse_extinf(line, number)) {
                tracing::trace!("m3u: #{} '{}' has no stream url", dropped.number, dropped.name);
            }
            number += 1;
            continue;
        }

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(mut channel) = pending.take() {
            channel.stream_url = line.to_string();
            channel.id = new_id();
            channels.push(channel);
        }
    }

    tracing::debug!("m3u: parsed {} channels ({} metadata lines)", channels.len(), number - 1);
    channels
}

/// Parse one `#EXTINF:` line into a channel record without id or URL.
pub fn parse_extinf(line: &str, number: u32) -> Channel {
    let patterns = attr_patterns();

    let group_title = capture(patterns.group_title.as_ref(), line)
        .filter(|g| !g.is_empty())
        .unwrap_or_else(|| UNCATEGORIZED.to_string());
    let logo = capture(patterns.tvg_logo.as_ref(), line).unwrap_or_default();
    let tvg_id = capture(patterns.tvg_id.as_ref(), line);

    let name = line
        .rfind(',')
        .map(|idx| line[idx + 1..].trim().to_string())
        .unwrap_or_default();

    Channel {
        id: String::new(),
        number,
        name,
        group_title,
        logo,
        tvg_id,
        stream_url: String::new(),
    }
}
