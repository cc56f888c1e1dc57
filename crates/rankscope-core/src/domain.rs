//! Domain string handling: normalization, the add-domain shape check, and
//! the rolling hash that seeds per-domain metric variation.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

/// One label plus a letters-only TLD, checked after the protocol is removed.
static DOMAIN_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9-]{0,61}[a-zA-Z0-9]\.[a-zA-Z]{2,}$")
    .expect("static domain pattern compiles")
});

fn strip_protocol(s: &str) -> &str {
  s.strip_prefix("https://")
    .or_else(|| s.strip_prefix("http://"))
    .unwrap_or(s)
}

/// Canonicalize a competitor domain.
///
/// Trims, lower-cases, removes one leading `http://` or `https://`, then one
/// trailing `/`. Rejects input that is empty before or after normalization.
pub fn normalize_domain(input: &str) -> Result<String> {
  let lowered = input.trim().to_lowercase();
  if lowered.is_empty() {
    return Err(Error::validation("domain is required"));
  }
  let stripped = strip_protocol(&lowered);
  let stripped = stripped.strip_suffix('/').unwrap_or(stripped);
  if stripped.is_empty() {
    return Err(Error::validation(format!("{input:?} has no host part")));
  }
  Ok(stripped.to_owned())
}

/// Whether `input` looks like a registrable domain such as `example.com`.
///
/// Front-ends use this to reject obvious typos before calling a store; the
/// stores themselves only require a non-empty value.
pub fn looks_like_domain(input: &str) -> bool {
  DOMAIN_SHAPE.is_match(strip_protocol(input.trim()))
}

/// The 32-bit rolling string hash `h = h * 31 + unit` over UTF-16 code units,
/// wrapping on overflow.
pub fn domain_hash(domain: &str) -> i32 {
  domain
    .encode_utf16()
    .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

/// Deterministic per-domain offset in `-10..=9`.
pub fn variation(domain: &str) -> i64 {
  // Widen before `abs` so `i32::MIN` does not overflow.
  i64::from(domain_hash(domain)).abs() % 20 - 10
}
