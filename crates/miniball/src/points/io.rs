//! Dense text format for point sets.
//!
//! ```text
//! 3 2
//! 0 0
//! 2 3
//! 4 5
//! ```
//!
//! The first non-empty line holds `N D`; each of the next `N` non-empty lines holds `D`
//! whitespace-separated reals in `.`-decimal syntax. Anything after the `N`-th row is ignored.

use super::{ArrayPointSet, PointSet};
use std::fmt;
use std::io::{self, BufRead, Write};

/// Parse failure. Line numbers are 1-based.
#[derive(Debug)]
pub enum FormatError {
    MissingHeader,
    BadHeader {
        line: usize,
    },
    MissingRow {
        line: usize,
        expected: usize,
    },
    WrongTokenCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    BadNumber {
        line: usize,
        token: String,
    },
    Io(io::Error),
}

impl FormatError {
    /// The offending line, if the error is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::BadHeader { line }
            | Self::MissingRow { line, .. }
            | Self::WrongTokenCount { line, .. }
            | Self::BadNumber { line, .. } => Some(*line),
            Self::MissingHeader | Self::Io(_) => None,
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeader => write!(f, "missing header line `N D`"),
            Self::BadHeader { line } => {
                write!(f, "line {line}: header must be two non-negative integers `N D`")
            }
            Self::MissingRow { line, expected } => write!(
                f,
                "line {line}: unexpected end of input, {expected} more point(s) expected"
            ),
            Self::WrongTokenCount {
                line,
                expected,
                found,
            } => write!(
                f,
                "line {line}: expected {expected} coordinates, found {found}"
            ),
            Self::BadNumber { line, token } => {
                write!(f, "line {line}: `{token}` is not a finite real number")
            }
            Self::Io(err) => write!(f, "i/o error while reading points: {err}"),
        }
    }
}

impl std::error::Error for FormatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for FormatError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Parse a point set from an in-memory string.
pub fn parse_points(text: &str) -> Result<ArrayPointSet, FormatError> {
    read_points(text.as_bytes())
}

/// Parse a point set from a buffered reader.
pub fn read_points<R: BufRead>(reader: R) -> Result<ArrayPointSet, FormatError> {
    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(k, line)| line.map(|l| (k + 1, l)));

    let mut next_non_empty = || -> Result<Option<(usize, String)>, FormatError> {
        for item in lines.by_ref() {
            let (no, line) = item?;
            if !line.trim().is_empty() {
                return Ok(Some((no, line)));
            }
        }
        Ok(None)
    };

    let (header_no, header) = next_non_empty()?.ok_or(FormatError::MissingHeader)?;
    let (n, d) = parse_header(header_no, &header)?;

    // The header is untrusted: grow with the rows actually read instead of reserving n·d.
    let mut coords = Vec::new();
    let mut last_line = header_no;
    for i in 0..n {
        let (no, line) = next_non_empty()?.ok_or(FormatError::MissingRow {
            line: last_line + 1,
            expected: n - i,
        })?;
        last_line = no;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() != d {
            return Err(FormatError::WrongTokenCount {
                line: no,
                expected: d,
                found: tokens.len(),
            });
        }
        for tok in &tokens {
            coords.push(parse_real(no, tok)?);
        }
    }
    Ok(ArrayPointSet::from_row_major(d, n, coords))
}

fn parse_header(line_no: usize, line: &str) -> Result<(usize, usize), FormatError> {
    let bad = || FormatError::BadHeader { line: line_no };
    let mut it = line.split_whitespace();
    let n = it.next().and_then(|t| t.parse::<usize>().ok()).ok_or_else(bad)?;
    let d = it.next().and_then(|t| t.parse::<usize>().ok()).ok_or_else(bad)?;
    if it.next().is_some() || n.checked_mul(d).is_none() {
        return Err(bad());
    }
    Ok((n, d))
}

fn parse_real(line: usize, token: &str) -> Result<f64, FormatError> {
    match token.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(x),
        _ => Err(FormatError::BadNumber {
            line,
            token: token.to_string(),
        }),
    }
}

/// Write any point set in the dense text format (round-trips through `read_points`).
pub fn write_points<P: PointSet + ?Sized, W: Write>(pts: &P, mut out: W) -> io::Result<()> {
    writeln!(out, "{} {}", pts.size(), pts.dimension())?;
    for i in 0..pts.size() {
        for j in 0..pts.dimension() {
            if j > 0 {
                out.write_all(b" ")?;
            }
            // `{:?}` is shortest round-trip and switches to exponents for tiny/huge values
            write!(out, "{:?}", pts.coord(i, j))?;
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}
