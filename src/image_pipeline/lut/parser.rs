//! `.cube` text parser.
//!
//! Header keywords (`TITLE`, `DOMAIN_MIN`, `DOMAIN_MAX`, `LUT_3D_SIZE`) may
//! appear anywhere before or between data rows. Every line whose first token
//! is numeric is a data row of exactly three floats; its lattice coordinate
//! is implied by its position in the file.

use std::str::{FromStr, SplitWhitespace};

use tracing::debug;

use crate::image_pipeline::common::error::ParseError;
use crate::image_pipeline::lut::types::{Domain, Lattice, LutTable};

/// Parses the full text of a `.cube` file into a [`LutTable`].
pub fn parse(text: &str) -> Result<LutTable, ParseError> {
    let mut title = None;
    let mut declared_size = None;
    let mut domain_min = None;
    let mut domain_max = None;
    let mut rows: Vec<[f32; 3]> = Vec::new();

    // Files saved by some Windows editors start with a UTF-8 byte order mark.
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);

    for (index, raw_line) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };

        if is_numeric_token(keyword) {
            rows.push(parse_triple(line.split_whitespace(), line_no)?);
            continue;
        }

        match keyword {
            "TITLE" => {
                let value = line["TITLE".len()..].trim().trim_matches('"');
                title = Some(value.to_string());
            }
            "DOMAIN_MIN" => domain_min = Some(parse_triple(tokens, line_no)?),
            "DOMAIN_MAX" => domain_max = Some(parse_triple(tokens, line_no)?),
            "LUT_3D_SIZE" => declared_size = Some(parse_size(tokens, line_no)?),
            "LUT_1D_SIZE" => {
                return Err(ParseError::UnsupportedFormat(
                    "1D LUT (LUT_1D_SIZE)".to_string(),
                ));
            }
            other => {
                debug!(line = line_no, keyword = other, "Skipping unrecognised LUT directive");
            }
        }
    }

    if rows.is_empty() {
        return Err(ParseError::EmptyFile);
    }

    let size = match declared_size {
        Some(size) => size,
        None => infer_size(rows.len()).ok_or(ParseError::SizeMismatch {
            declared: None,
            rows: rows.len(),
        })?,
    };

    let domain = Domain::new(
        domain_min.unwrap_or(Domain::default().min),
        domain_max.unwrap_or(Domain::default().max),
    )?;
    let lattice = Lattice::new(size, rows)?;

    debug!(
        size,
        title = title.as_deref().unwrap_or(""),
        "Parsed 3D LUT"
    );

    Ok(LutTable::new(title, domain, lattice))
}

impl LutTable {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        parse(text)
    }
}

impl FromStr for LutTable {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Drops a trailing `#` comment, ignoring `#` inside double quotes.
fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (pos, ch) in line.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..pos],
            _ => {}
        }
    }
    line
}

fn is_numeric_token(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'))
}

fn parse_triple(tokens: SplitWhitespace<'_>, line: usize) -> Result<[f32; 3], ParseError> {
    let mut out = [0.0f32; 3];
    let mut count = 0;
    for token in tokens {
        if count == 3 {
            return Err(ParseError::MalformedRow {
                line,
                reason: "expected 3 values, found more".to_string(),
            });
        }
        let value: f32 = token.parse().map_err(|_| ParseError::MalformedRow {
            line,
            reason: format!("'{}' is not a number", token),
        })?;
        if !value.is_finite() {
            return Err(ParseError::MalformedRow {
                line,
                reason: format!("'{}' is not a finite number", token),
            });
        }
        out[count] = value;
        count += 1;
    }

    if count != 3 {
        return Err(ParseError::MalformedRow {
            line,
            reason: format!("expected 3 values, found {}", count),
        });
    }
    Ok(out)
}

fn parse_size(mut tokens: SplitWhitespace<'_>, line: usize) -> Result<usize, ParseError> {
    let malformed = |reason: &str| ParseError::MalformedRow {
        line,
        reason: reason.to_string(),
    };

    let token = tokens.next().ok_or_else(|| malformed("LUT_3D_SIZE has no value"))?;
    if tokens.next().is_some() {
        return Err(malformed("LUT_3D_SIZE takes a single value"));
    }
    match token.parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(malformed("LUT_3D_SIZE must be a positive integer")),
    }
}

/// Exact integer cube root of `rows`, if there is one.
fn infer_size(rows: usize) -> Option<usize> {
    let guess = (rows as f64).cbrt().round() as usize;
    (guess.saturating_sub(1)..=guess + 1).find(|n| n.checked_pow(3) == Some(rows))
}
