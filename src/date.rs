//! Best-effort multi-format date parser
//!
//! Feeds in the wild carry dates in far more shapes than RFC 822 and
//! RFC 3339 allow. [`parse_date`] tries every layout of [`DATE_LAYOUTS`] in
//! order and returns the first one that consumes the whole input.
//!
//! Layouts are chrono strftime patterns with two deviations:
//!
//! - `%a` / `%A` check weekday names for syntax only. Feeds often carry a
//!   weekday that disagrees with the date, and the date wins.
//! - `%Z` reads a 3 to 5 letter uppercase zone abbreviation and resolves it
//!   through a fixed RFC 822 table; unknown abbreviations mean UTC. A numeric
//!   offset elsewhere in the same layout takes precedence.
//!
//! Components a layout lacks are filled deterministically: UTC for the
//! zone, midnight for the time, zero minutes, and year 0 when no year is
//! present. Nothing depends on the local timezone.

use std::sync::LazyLock;

use chrono::format::{Item, Parsed, StrftimeItems, parse_and_remainder};
use chrono::{DateTime, Utc};

use crate::DateError;

/// Ordered date layout table
///
/// Order is significant and part of the API: the first layout that matches
/// wins, so new layouts are only ever appended.
pub const DATE_LAYOUTS: &[&str] = &[
    // RFC 822
    "%d %b %y %H:%M %Z",
    // RFC 822 with numeric zone
    "%d %b %y %H:%M %z",
    // RFC 3339
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    // Unix date
    "%a %b %e %H:%M:%S %Z %Y",
    // Ruby date
    "%a %b %d %H:%M:%S %z %Y",
    // RFC 850
    "%A, %d-%b-%y %H:%M:%S %Z",
    // RFC 1123 with numeric zone
    "%a, %d %b %Y %H:%M:%S %z",
    // RFC 1123
    "%a, %d %b %Y %H:%M:%S %Z",
    // ANSI C
    "%a %b %e %H:%M:%S %Y",
    // Observed variants
    "%a, %B %d %Y %H:%M:%S %z",
    "%a, %B %d, %Y, %H:%M:%S %Z",
    "%a, %B %d, %Y %H:%M:%S %Z",
    "%a, %b %d, %Y %H:%M %Z",
    "%a, %b %d %Y %H:%M %Z",
    "%a, %b %d, %Y %H:%M:%S %Z",
    "%a, %b %d %Y %H:%M:%S %z",
    "%a %b %d %H:%M %Y",
    "%a %b %d %H:%M:%S %Y %Z",
    "%a %b %d, %Y %I:%M %p",
    "%a, %b %d,%Y %H:%M:%S %Z",
    "%a %b %d %Y %H:%M:%S %z",
    "%A, %B %d, %Y %H:%M:%S %Z",
    "%A, %B %d, %Y %I:%M %p",
    "%A, %B %d, %Y",
    "%A, %d %B %Y %H:%M:%S %Z",
    "%A, %d %B %Y %H:%M:%S %z",
    "%A, %d %b %Y %H:%M:%S %Z",
    "%A, %d %b %Y %H:%M:%S %z",
    "%A, %d %B %Y %H:%M:%S",
    "%a, %d %B %Y %H:%M %Z",
    "%a, %d %B %Y, %H:%M %z",
    "%a, %d %B %Y, %H:%M:%S %Z",
    "%a, %d %B %Y %H:%M:%S %Z",
    "%a, %d %B %Y %H:%M:%S %z",
    "%a, %d %B %Y",
    "%a, %d %b %Y %I:%M:%S %p %z",
    "%a, %d %b %Y %H:%M:%S %z GMT",
    "%a, %d, %b %Y %H:%M",
    "%a, %d %b %Y %H:%M %Z",
    "%a, %d %b %Y, %H:%M %z",
    "%a, %d %b %Y %H:%M %z",
    "%a, %d %b %Y %H:%M:%S UT",
    "%a, %d %b %Y %H:%M:%S%Z",
    "%a %d %b %Y %H:%M:%S %Z",
    "mon,%d %b %Y %H:%M:%S %Z",
    "%a, %d %b %Y %H:%M:%S %z %Z",
    "%a, %d %b %Y %H:%M:%S%z",
    "%a, %d %b %Y %H:%M:%S",
    "%a, %d %b %Y %H:%M",
    "%a,%d %b %Y",
    "%a, %d %b %Y",
    "%a, %d %b %H:%M:%S %Z",
    "%a, %d %b %y %H:%M:%S %Z",
    "%a, %d %b %y %H:%M:%S %z",
    "%a, %Y-%m-%d %H:%M",
    "%a,%d %B %Y 14:%M:%S %Z",
    "%a, %d %b %Y %I:%M:%S %p %Z",
    "%a, %d %b %Y %H %z",
    "%a,%d %b %Y %H:%M %Z",
    "%a, %d %b %Y %H:%M:%S Z",
    "%a, %d %b %Y %H:%M:%S %Z%:z",
    "%a, %d %b %Y %H:%M:%S %Z %z",
    "%a, %d %b %Y, %H:%M:%S %Z",
    "%a , %d %b %Y %H:%M:%S %Z",
    "%a, %d %b %Y %H:%M:%S GMT%z",
    "%a,%d %b %Y %H:%M:%S %z",
    "%a, %d %b %Y %H:%M:%S %:z",
    "%a, %d %b %Y %H:%M:%S -%z",
    "%a %d %b %Y %H:%M:%S %z",
    "%a, %d %b %Y %H:%M:%S %#z",
    "%a, %d %b %Y %H:%M:%S 00",
    "%B %d, %Y %I:%M %p",
    "%B %d, %Y, %I:%M p.m.",
    "%B %d, %Y %H:%M:%S %Z",
    "%B %d, %Y %H:%M:%S",
    "%B %d, %Y",
    "%B %d, %Y %H:%M",
    "%b %d, %Y %I:%M:%S %p %Z",
    "%b %d, %Y %I:%M:%S %p",
    "%b %d, %Y %H:%M:%S %Z",
    "%b %d, %Y",
    "%b %d %Y %I:%M:%S%p",
    "%y/%m/%d %H:%M",
    "%y-%m-%d %H:%M",
    "%d %B %Y %H:%M:%S %Z",
    "%d %B %Y %H:%M:%S %z",
    "%d %B %Y",
    "%d %b %Y %H:%M:%S Z",
    "%d %b %Y %H:%M:%S %Z",
    "%d %b %Y %H:%M:%S %z",
    "%d %b %Y",
    "%d.%m.%Y %H:%M:%S",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y %B %d",
    "%Y-%m-%dT%H:%M:%SZ",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d",
    "%Y-%m-%dT%H:%MZ",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%:z:00",
    "%Y-%m-%dT%H:%M:%S:%z",
    "%Y-%m-%dT%H:%M:%S%z",
    "%Y-%m-%dT%H:%M:%S%:z",
    "%Y-%m-%dT%H:%M:%S %z",
    "%Y-%m-%dT%H:%M:%S:00",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d at %H:%M:%S",
    "%Y-%m-%d %H:%M:%SZ",
    "%Y-%m-%d %H:%M:%S %Z",
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S%:z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d 00:00:00.0 %H:%M:%S%.f %z",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%Y.%m.%d %H:%M:%S",
    "%H:%M %d.%m.%Y %z",
    "%m/%d/%Y %I:%M:%S %p %Z",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M:%S %Z",
    "%m/%d/%Y",
    "%d %A, %b %Y %H:%M",
    "%d %b %Y %H:%M %Z",
    "%d %b %Y %H:%M:%S UT",
    "%d %b %Y %H:%M:%S",
    "%d/%m/%Y %H:%M %Z",
    "%d-%m-%Y %H:%M:%S %Z",
    "%d/%m/%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
    "%d/%m/%Y - %H:%M",
    "%d.%m.%Y %z",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y - %H:%M",
    "%m-%d-%Y",
];

static COMPILED_LAYOUTS: LazyLock<Vec<Layout<'static>>> =
    LazyLock::new(|| DATE_LAYOUTS.iter().copied().map(Layout::compile).collect());

/// Parse a free-form feed date into a UTC instant
///
/// # Examples
///
/// ```
/// use syndfeed_rs::date::parse_date;
/// use syndfeed_rs::DateError;
/// use chrono::{TimeZone, Utc};
///
/// let date = parse_date("Sun, 06 Sep 2009 16:20:00 +0000").unwrap();
/// assert_eq!(date, Utc.with_ymd_and_hms(2009, 9, 6, 16, 20, 0).unwrap());
///
/// // Atom timestamps
/// parse_date("2003-12-13T18:30:02Z").unwrap();
///
/// assert_eq!(parse_date("   "), Err(DateError::EmptyInput));
/// assert!(parse_date("not-a-date").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, DateError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DateError::EmptyInput);
    }

    COMPILED_LAYOUTS
        .iter()
        .find_map(|layout| layout.parse(input))
        .ok_or_else(|| DateError::UnrecognizedFormat(input.to_string()))
}

/// Parse a date against a single layout
///
/// The layout uses the same conventions as [`DATE_LAYOUTS`]. The whole
/// input must be consumed.
pub fn parse_with_layout(input: &str, layout: &str) -> Option<DateTime<Utc>> {
    Layout::compile(layout).parse(input.trim())
}

enum Piece<'a> {
    Chrono(Vec<Item<'a>>),
    Weekday { long: bool },
    ZoneName,
}

struct Layout<'a> {
    pieces: Vec<Piece<'a>>,
    has_year: bool,
}

impl<'a> Layout<'a> {
    fn compile(pattern: &'a str) -> Self {
        let mut pieces = Vec::new();
        let mut start = 0;
        let mut chars = pattern.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if c != '%' {
                continue;
            }
            let Some(&(_, spec)) = chars.peek() else {
                break;
            };
            chars.next();

            let piece = match spec {
                'a' => Piece::Weekday { long: false },
                'A' => Piece::Weekday { long: true },
                'Z' => Piece::ZoneName,
                _ => continue,
            };
            if start < i {
                pieces.push(Piece::Chrono(StrftimeItems::new(&pattern[start..i]).collect()));
            }
            pieces.push(piece);
            start = i + 2;
        }
        if start < pattern.len() {
            pieces.push(Piece::Chrono(StrftimeItems::new(&pattern[start..]).collect()));
        }

        Self {
            pieces,
            has_year: pattern.contains("%Y") || pattern.contains("%y"),
        }
    }

    fn parse(&self, input: &str) -> Option<DateTime<Utc>> {
        let mut parsed = Parsed::new();
        let mut zone_name_offset = None;
        let mut rest = input;

        for piece in &self.pieces {
            rest = match piece {
                Piece::Chrono(items) => parse_and_remainder(&mut parsed, rest, items.iter()).ok()?,
                Piece::Weekday { long } => skip_weekday(rest, *long)?,
                Piece::ZoneName => {
                    let (offset, after) = take_zone_name(rest)?;
                    zone_name_offset = Some(offset);
                    after
                }
            };
        }
        if !rest.is_empty() {
            return None;
        }

        // Defaults only fill fields the layout left unset
        if let Some(offset) = zone_name_offset {
            let _ = parsed.set_offset(i64::from(offset));
        }
        let _ = parsed.set_offset(0);
        if !self.has_year {
            let _ = parsed.set_year(0);
        }
        let _ = parsed.set_ampm(false);
        let _ = parsed.set_hour(0);
        let _ = parsed.set_minute(0);
        let _ = parsed.set_second(0);

        parsed.to_datetime().ok().map(|dt| dt.with_timezone(&Utc))
    }
}

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

fn skip_weekday(s: &str, long: bool) -> Option<&str> {
    WEEKDAYS.iter().find_map(|&day| {
        let name = if long { day } else { &day[..3] };
        s.get(..name.len())
            .filter(|head| head.eq_ignore_ascii_case(name))
            .map(|_| &s[name.len()..])
    })
}

fn take_zone_name(s: &str) -> Option<(i32, &str)> {
    let s = s.trim_start();
    let len = s.bytes().take_while(u8::is_ascii_uppercase).count();
    if !(3..=5).contains(&len) {
        return None;
    }
    let (name, rest) = s.split_at(len);
    Some((zone_offset(name), rest))
}

/// UTC offset in seconds for an RFC 822 zone abbreviation
fn zone_offset(name: &str) -> i32 {
    const HOUR: i32 = 3600;
    match name {
        "EST" => -5 * HOUR,
        "EDT" => -4 * HOUR,
        "CST" => -6 * HOUR,
        "CDT" => -5 * HOUR,
        "MST" => -7 * HOUR,
        "MDT" => -6 * HOUR,
        "PST" => -8 * HOUR,
        "PDT" => -7 * HOUR,
        // UT, UTC, GMT and anything unknown
        _ => 0,
    }
}
