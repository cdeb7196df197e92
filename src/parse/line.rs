//! Line classification for coverage report text.
//!
//! Keywords are matched case-insensitively at the start of the trimmed line
//! and must be followed by a colon. Values are trimmed.

/// Value of a percentage field; `Err` carries the raw text.
pub type PercentValue<'a> = Result<f64, &'a str>;

#[derive(Debug, Clone, PartialEq)]
pub struct Header<'a> {
    pub name: &'a str,
    /// Inline `- Coverage: <pct>%` suffix, when present.
    pub coverage: Option<PercentValue<'a>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinFields<'a> {
    pub name: &'a str,
    pub hits: u64,
    pub status: &'a str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Line<'a> {
    Blank,
    Design(&'a str),
    Overall(PercentValue<'a>),
    Covergroup(Header<'a>),
    Coverpoint(Header<'a>),
    Cross(Header<'a>),
    Coverage(PercentValue<'a>),
    /// `Err` carries the text after `Bin:` when fields are missing.
    Bin(Result<BinFields<'a>, &'a str>),
    Unrecognized(&'a str),
}

pub fn classify_line(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if let Some(value) = strip_keyword(line, "design") {
        return Line::Design(value);
    }
    if let Some(value) =
        strip_keyword(line, "overall coverage").or_else(|| strip_keyword(line, "total coverage"))
    {
        return Line::Overall(parse_percent(value));
    }
    if let Some(value) = strip_keyword(line, "covergroup") {
        return Line::Covergroup(parse_header(value));
    }
    if let Some(value) = strip_keyword(line, "coverpoint") {
        return Line::Coverpoint(parse_header(value));
    }
    if let Some(value) = strip_keyword(line, "cross") {
        return Line::Cross(parse_header(value));
    }
    if let Some(value) = strip_keyword(line, "coverage") {
        return Line::Coverage(parse_percent(value));
    }
    if let Some(value) = strip_keyword(line, "bin") {
        return Line::Bin(parse_bin(value).ok_or(value));
    }
    Line::Unrecognized(line)
}

/// Match `keyword` (words separated by whitespace) followed by `:`.
/// Returns the trimmed text after the colon.
pub fn strip_keyword<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let mut rest = line;
    for word in keyword.split(' ') {
        rest = rest.trim_start();
        let head = rest.get(..word.len())?;
        if !head.eq_ignore_ascii_case(word) {
            return None;
        }
        rest = &rest[word.len()..];
    }
    rest.trim_start().strip_prefix(':').map(str::trim)
}

/// Split `text` at the first `- <field>:` marker.
pub fn split_field<'a>(text: &'a str, field: &str) -> Option<(&'a str, &'a str)> {
    text.match_indices('-').find_map(|(idx, _)| {
        strip_keyword(&text[idx + 1..], field).map(|value| (text[..idx].trim(), value))
    })
}

/// Parse the leading number of a percentage field (`50`, `50.5 %`,
/// `62.50% (5/8)`).
pub fn parse_percent(text: &str) -> PercentValue<'_> {
    let end = text
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
        .unwrap_or(text.len());
    text[..end]
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(text)
}

fn parse_header(value: &str) -> Header<'_> {
    match split_field(value, "coverage") {
        Some((name, coverage)) => Header {
            name,
            coverage: Some(parse_percent(coverage)),
        },
        None => Header {
            name: value,
            coverage: None,
        },
    }
}

fn parse_bin(value: &str) -> Option<BinFields<'_>> {
    let (name, rest) = split_field(value, "hits")?;
    let (hits, status) = split_field(rest, "status")?;
    let status = leading_word(status);
    if name.is_empty() || status.is_empty() {
        return None;
    }
    let hits = hits.parse::<u64>().ok()?;
    Some(BinFields { name, hits, status })
}

/// The leading run of word characters (`Covered.` → `Covered`).
fn leading_word(text: &str) -> &str {
    let end = text
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(text.len());
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_are_case_insensitive_and_whitespace_tolerant() {
        assert_eq!(classify_line("  DESIGN :  dma_ctrl "), Line::Design("dma_ctrl"));
        assert_eq!(classify_line("overall   coverage: 72.5%"), Line::Overall(Ok(72.5)));
        assert_eq!(classify_line("Total Coverage: 10%"), Line::Overall(Ok(10.0)));
    }

    #[test]
    fn overall_is_not_mistaken_for_scope_coverage() {
        assert_eq!(classify_line("Coverage: 40%"), Line::Coverage(Ok(40.0)));
        assert!(matches!(classify_line("Overall Coverage: 40%"), Line::Overall(_)));
    }

    #[test]
    fn headers_accept_inline_coverage() {
        assert_eq!(
            classify_line("Cross: cp_a x cp_b - Coverage: 25.00%"),
            Line::Cross(Header {
                name: "cp_a x cp_b",
                coverage: Some(Ok(25.0)),
            })
        );
        assert_eq!(
            classify_line("Coverpoint: cp_len"),
            Line::Coverpoint(Header {
                name: "cp_len",
                coverage: None,
            })
        );
    }

    #[test]
    fn keyword_must_end_at_colon() {
        assert_eq!(
            classify_line("Crosses: none"),
            Line::Unrecognized("Crosses: none")
        );
        assert_eq!(
            classify_line("Binary data follows"),
            Line::Unrecognized("Binary data follows")
        );
    }

    #[test]
    fn bin_fields_are_split() {
        assert_eq!(
            classify_line("Bin: len_max - Hits: 0 - Status: Uncovered"),
            Line::Bin(Ok(BinFields {
                name: "len_max",
                hits: 0,
                status: "Uncovered",
            }))
        );
    }

    #[test]
    fn bin_names_may_contain_dashes() {
        assert_eq!(
            classify_line("Bin: addr[0-15] - hits:12 - status: covered"),
            Line::Bin(Ok(BinFields {
                name: "addr[0-15]",
                hits: 12,
                status: "covered",
            }))
        );
    }

    #[test]
    fn malformed_bin_keeps_raw_text() {
        assert_eq!(
            classify_line("Bin: lonely - Hits: many - Status: Covered"),
            Line::Bin(Err("lonely - Hits: many - Status: Covered"))
        );
        assert_eq!(classify_line("Bin: x"), Line::Bin(Err("x")));
    }

    #[test]
    fn percent_accepts_trailing_commentary() {
        assert_eq!(parse_percent("62.50% (5/8 bins)"), Ok(62.5));
        assert_eq!(parse_percent("100"), Ok(100.0));
        assert_eq!(parse_percent("n/a"), Err("n/a"));
        assert_eq!(parse_percent("-5%"), Ok(-5.0));
    }

    #[test]
    fn status_ignores_trailing_punctuation() {
        for raw in [
            "Bin: b - Hits: 2 - Status: Covered.",
            "Bin: b - Hits: 2 - Status: Covered, sampled twice",
            "Bin: b - Hits: 2 - Status: Covered (auto)",
        ] {
            assert_eq!(
                classify_line(raw),
                Line::Bin(Ok(BinFields {
                    name: "b",
                    hits: 2,
                    status: "Covered",
                })),
                "{raw}"
            );
        }
        assert_eq!(
            classify_line("Bin: b - Hits: 2 - Status: ???"),
            Line::Bin(Err("b - Hits: 2 - Status: ???"))
        );
    }
}
