//! Beacon log-line contract.
//!
//! The node's logger prefixes every line with a bracketed UTC timestamp:
//!
//! `[2023-05-01T12:00:00.123456Z INFO node::core] Beacon value: 7`
//!
//! The contract is declared once, here, as an anchored pattern over that
//! prefix rather than as character offsets into the line. Any producer
//! integrated with this harness must keep the prefix format identical;
//! a marker line whose prefix does not match is treated as malformed, never
//! silently skipped.

use anyhow::Context;
use chrono::NaiveDateTime;
use regex::Regex;

/// Marker substring identifying a beacon event line.
pub const BEACON_MARKER: &str = "Beacon value:";

/// Timestamp layout inside the prefix: microsecond precision, no zone.
const TIMESTAMP_FMT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// What a marker line turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeaconLine {
    /// Prefix matched the contract and parsed.
    Timestamped(NaiveDateTime),
    /// Marker present but the prefix violates the contract.
    Malformed,
}

/// Compiled line-format contract. Build once per analysis pass.
pub struct LineParser {
    prefix: Regex,
}

impl LineParser {
    pub fn new() -> anyhow::Result<Self> {
        let prefix = Regex::new(r"^\[(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d{6})Z\s")
            .context("compile beacon line pattern")?;
        Ok(Self { prefix })
    }

    /// Classify one log line. `None` for lines without the beacon marker.
    pub fn classify(&self, line: &str) -> Option<BeaconLine> {
        if !line.contains(BEACON_MARKER) {
            return None;
        }
        let ts = match self.prefix.captures(line) {
            Some(caps) => caps.get(1).map(|m| m.as_str())?,
            None => return Some(BeaconLine::Malformed),
        };
        // The pattern pins the shape; chrono still rejects impossible dates.
        match NaiveDateTime::parse_from_str(ts, TIMESTAMP_FMT) {
            Ok(dt) => Some(BeaconLine::Timestamped(dt)),
            Err(_) => Some(BeaconLine::Malformed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parser() -> LineParser {
        LineParser::new().unwrap()
    }

    #[test]
    fn beacon_line_yields_timestamp() {
        let line = "[2023-05-01T12:00:00.123456Z INFO node::core] Beacon value: 7";
        let got = parser().classify(line);
        let want = NaiveDateTime::parse_from_str("2023-05-01T12:00:00.123456", TIMESTAMP_FMT).unwrap();
        assert_eq!(got, Some(BeaconLine::Timestamped(want)));
    }

    #[test]
    fn non_marker_lines_are_ignored() {
        let line = "[2023-05-01T12:00:00.123456Z INFO node::net] peer connected";
        assert_eq!(parser().classify(line), None);
    }

    #[test]
    fn marker_with_broken_prefix_is_malformed_not_skipped() {
        for line in [
            "Beacon value: 7",
            "[not-a-timestamp INFO node] Beacon value: 7",
            "[2023-05-01T12:00:00.123Z INFO node] Beacon value: 7",
            "[2023-13-01T12:00:00.123456Z INFO node] Beacon value: 7",
        ] {
            assert_eq!(parser().classify(line), Some(BeaconLine::Malformed), "{line}");
        }
    }
}
