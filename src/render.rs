//! Plain-text presentation of shares.
//!
//! ```text
//! ================================================================================
//!                                List of shares
//! ================================================================================
//! Share 1:
//!     Part 1: 0x1f
//!     Part 2: 0x2a
//! ================================================================================
//! ```

use crate::bigint_serde::hex;
use crate::error::{ShamirError, ShamirResult};
use crate::sss::Share;

const BANNER_WIDTH: usize = 80;
const TITLE: &str = " List of shares ";
const TITLE_INDENT: usize = 30;
const PART_1: &str = "Part 1:";
const PART_2: &str = "Part 2:";

pub fn render_shares(shares: &[Share]) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let mut out = format!("{0}\n{1}{2}\n{0}\n", banner, " ".repeat(TITLE_INDENT), TITLE);
    for (i, share) in shares.iter().enumerate() {
        out.push_str(&format!(
            "Share {}:\n\t{} {:#x}\n\t{} {:#x}\n",
            i + 1,
            PART_1,
            share.x,
            PART_2,
            share.y
        ));
    }
    out.push_str(&banner);
    out.push('\n');
    out
}

/// Reads shares back out of [`render_shares`] output.
///
/// Only the `Part 1:` / `Part 2:` lines matter; each `Part 1` must be followed
/// by its `Part 2` before the next share starts.
pub fn parse_shares(text: &str) -> ShamirResult<Vec<Share>> {
    let mut shares = Vec::new();
    let mut pending_x = None;

    for (number, line) in text.lines().enumerate() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix(PART_1) {
            if pending_x.is_some() {
                return Err(malformed(number, "two Part 1 lines in a row"));
            }
            pending_x = Some(parse_coordinate(number, rest)?);
        } else if let Some(rest) = line.strip_prefix(PART_2) {
            let x = pending_x
                .take()
                .ok_or_else(|| malformed(number, "Part 2 without a Part 1"))?;
            shares.push(Share::new(x, parse_coordinate(number, rest)?));
        }
    }

    if pending_x.is_some() {
        return Err(ShamirError::MalformedShares(
            "last share is missing its Part 2".to_string(),
        ));
    }
    Ok(shares)
}

fn parse_coordinate(number: usize, text: &str) -> ShamirResult<num_bigint::BigUint> {
    hex::parse(text).ok_or_else(|| malformed(number, "expected a hex integer"))
}

fn malformed(number: usize, reason: &str) -> ShamirError {
    ShamirError::MalformedShares(format!("line {}: {}", number + 1, reason))
}
