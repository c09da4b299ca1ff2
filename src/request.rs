//! Request parsing: a pure function from a function-string to a
//! [`Request`] value (or a [`ParseError`]).

use std::fmt;

use crate::error::ParseError;
use crate::packed::{Map, LANE_COUNT};

/// How a request's lanes are shaped, relative to the goal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RequestKind {
    /// Every lane is fixed (`min == max` everywhere).
    Exact,
    /// Every lane is either fixed or a full don't-care (`min = 0, max = 15`).
    Partial,
    /// At least one lane has `min < max` but isn't a full don't-care.
    Ranged,
}

impl RequestKind {
    /// Classify a request, including the dead `mapPairContainsRanges` check
    /// (`minVal != minVal` is always false). As a result this never
    /// actually returns [`RequestKind::Ranged`]; any non-exact request is
    /// reported as `Partial`. Kept for outward-facing `Request::kind`
    /// reporting; the solver itself dispatches on
    /// [`RequestKind::classify_ranged_aware`] instead, so ranged requests
    /// are still solved correctly.
    pub fn classify(mins: Map, maxs: Map) -> RequestKind {
        if mins == maxs {
            return RequestKind::Exact;
        }
        RequestKind::Partial
    }

    /// A corrected classifier that actually detects ranged lanes.
    pub fn classify_ranged_aware(mins: Map, maxs: Map) -> RequestKind {
        if mins == maxs {
            return RequestKind::Exact;
        }
        for i in 0..LANE_COUNT {
            let (min_i, max_i) = (mins.lane(i), maxs.lane(i));
            if min_i != max_i && !(min_i == 0 && max_i == 15) {
                return RequestKind::Ranged;
            }
        }
        RequestKind::Partial
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Request {
    pub mins: Map,
    pub maxs: Map,
    pub kind: RequestKind,
}

impl Request {
    pub fn exact(map: Map) -> Self {
        Request {
            mins: map,
            maxs: map,
            kind: RequestKind::Exact,
        }
    }

    pub fn lane_is_dont_care(&self, i: usize) -> bool {
        self.mins.lane(i) == 0 && self.maxs.lane(i) == 15
    }

    pub fn effective_kind(&self) -> RequestKind {
        RequestKind::classify_ranged_aware(self.mins, self.maxs)
    }

    /// Number of distinct values forced among non-don't-care lanes that
    /// share an equal min==max value (`getMinGroup`), used as a lower
    /// bound on the goal's group when some lanes are left wildcard.
    pub fn min_group(&self) -> u32 {
        let mut seen: u16 = 0;
        for i in 0..LANE_COUNT {
            let (min_i, max_i) = (self.mins.lane(i), self.maxs.lane(i));
            if min_i == max_i {
                seen |= 1 << min_i;
            }
        }
        let count = seen.count_ones();
        count.max(1)
    }

    pub fn parse(s: Option<&str>) -> Result<Request, ParseError> {
        let s = s.ok_or(ParseError::Null)?;
        if s.is_empty() {
            return Err(ParseError::Blank);
        }

        let bytes = s.as_bytes();
        let mut mins: u64 = 0;
        let mut maxs: u64 = 0;
        let mut length: usize = 0;
        let mut i = 0usize;

        while i < bytes.len() {
            let c = bytes[i];
            if c == b'[' || c == b']' {
                i += 1;
                continue;
            }
            if i + 1 < bytes.len() && bytes[i + 1] == b'-' {
                if !is_hex(c) || i + 2 >= bytes.len() || !is_hex(bytes[i + 2]) {
                    return Err(ParseError::Malformed { at: i });
                }
                mins = (mins << 4) | to_hex(c) as u64;
                maxs = (maxs << 4) | to_hex(bytes[i + 2]) as u64;
                length += 1;
                i += 3;
                continue;
            }
            if c == b'.' || c == b'x' || c == b'X' {
                mins <<= 4;
                maxs = (maxs << 4) | 0xF;
                length += 1;
                i += 1;
                continue;
            }
            if is_hex(c) {
                let v = to_hex(c) as u64;
                mins = (mins << 4) | v;
                maxs = (maxs << 4) | v;
                length += 1;
                i += 1;
                continue;
            }
            return Err(ParseError::Malformed { at: i });
        }

        if length > LANE_COUNT {
            return Err(ParseError::TooLong { got: length });
        }

        let remaining = LANE_COUNT - length;
        if remaining == LANE_COUNT {
            mins = 0;
            maxs = u64::MAX;
        } else {
            mins <<= remaining * 4;
            maxs <<= remaining * 4;
            maxs |= (1u64 << (remaining * 4)) - 1;
        }

        let mins = Map::from_raw(mins);
        let maxs = Map::from_raw(maxs);
        let kind = RequestKind::classify(mins, maxs);
        Ok(Request { mins, maxs, kind })
    }
}

fn is_hex(c: u8) -> bool {
    c.is_ascii_hexdigit()
}

fn to_hex(c: u8) -> u8 {
    (c as char).to_digit(16).unwrap() as u8
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..LANE_COUNT).rev() {
            if i % 4 == 3 && i != LANE_COUNT - 1 {
                write!(f, " ")?;
            }
            let (min_i, max_i) = (self.mins.lane(i), self.maxs.lane(i));
            if min_i == max_i {
                write!(f, "{:X}", min_i)?;
            } else if min_i == 0 && max_i == 15 {
                write!(f, "X")?;
            } else {
                write!(f, "[{:X}-{:X}]", min_i, max_i)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_and_blank_are_distinct_errors() {
        assert_eq!(Request::parse(None), Err(ParseError::Null));
        assert_eq!(Request::parse(Some("")), Err(ParseError::Blank));
    }

    #[test]
    fn exact_string_parses_to_exact_kind() {
        let r = Request::parse(Some("0123456789ABCDEF")).unwrap();
        assert_eq!(r.kind, RequestKind::Exact);
        assert_eq!(r.mins, r.maxs);
        assert_eq!(r.mins, Map::identity());
    }

    #[test]
    fn left_most_token_is_most_significant_lane() {
        let r = Request::parse(Some("A0")).unwrap();
        assert_eq!(r.mins.lane(15), 0xA);
        assert_eq!(r.mins.lane(14), 0x0);
    }

    #[test]
    fn short_input_is_right_padded_with_dont_care() {
        let r = Request::parse(Some("0")).unwrap();
        assert_eq!(r.mins.lane(15), 0);
        for i in 0..15 {
            assert!(r.lane_is_dont_care(i));
        }
    }

    #[test]
    fn dont_care_tokens_parse() {
        for tok in [".", "x", "X"] {
            let r = Request::parse(Some(tok)).unwrap();
            assert!(r.lane_is_dont_care(15));
        }
    }

    #[test]
    fn bracketed_range_token_parses() {
        let r = Request::parse(Some("[0-F]")).unwrap();
        assert_eq!(r.mins.lane(15), 0);
        assert_eq!(r.maxs.lane(15), 15);
        assert_eq!(r.effective_kind(), RequestKind::Partial); // full range == don't-care
    }

    #[test]
    fn unbracketed_range_parses() {
        let r = Request::parse(Some("3-7")).unwrap();
        assert_eq!(r.mins.lane(15), 3);
        assert_eq!(r.maxs.lane(15), 7);
        assert_eq!(r.effective_kind(), RequestKind::Ranged);
    }

    #[test]
    fn too_long_input_is_rejected() {
        let s = "0".repeat(17);
        assert_eq!(
            Request::parse(Some(&s)),
            Err(ParseError::TooLong { got: 17 })
        );
    }

    #[test]
    fn malformed_input_is_rejected() {
        assert!(Request::parse(Some("G")).is_err());
        assert!(Request::parse(Some("0-")).is_err());
    }

    #[test]
    fn classify_quirk_never_reports_ranged() {
        let r = Request::parse(Some("3-7")).unwrap();
        assert_eq!(r.kind, RequestKind::Partial);
        assert_eq!(r.effective_kind(), RequestKind::Ranged);
    }

    #[test]
    fn display_round_trips_through_parse_for_exact_requests() {
        let original = Request::parse(Some("0123456789ABCDEF")).unwrap();
        let printed = original.to_string();
        let reparsed = Request::parse(Some(&printed.replace(' ', ""))).unwrap();
        assert_eq!(reparsed.mins, original.mins);
        assert_eq!(reparsed.maxs, original.maxs);
    }
}
