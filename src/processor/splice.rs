//! # Splice Module
//!
//! Locates an existing autogenerated header block in raw file content and
//! computes the byte segments of the rewritten file.

use crate::header::{SECTION_END, SECTION_START};

/// Line ending convention of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eol {
  Lf,
  CrLf,
}

impl Eol {
  /// CRLF if the byte sequence `\r\n` occurs anywhere in `content`.
  pub fn detect(content: &[u8]) -> Self {
    if find_bytes(content, b"\r\n", 0).is_some() {
      Eol::CrLf
    } else {
      Eol::Lf
    }
  }

  pub const fn as_str(self) -> &'static str {
    match self {
      Eol::Lf => "\n",
      Eol::CrLf => "\r\n",
    }
  }

  pub const fn as_bytes(self) -> &'static [u8] {
    self.as_str().as_bytes()
  }
}

/// Byte range `[start, end)` of a previous header block, whole lines
/// included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpliceRegion {
  pub start: usize,
  pub end: usize,
}

/// First occurrence of `needle` in `haystack` at or after `from`.
fn find_bytes(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
  if needle.is_empty() || from > haystack.len() {
    return None;
  }
  haystack[from..]
    .windows(needle.len())
    .position(|window| window == needle)
    .map(|i| i + from)
}

/// Last occurrence of `needle` that ends at or before `before`.
fn rfind_bytes(haystack: &[u8], needle: &[u8], before: usize) -> Option<usize> {
  if needle.is_empty() {
    return None;
  }
  let end = before.min(haystack.len());
  haystack[..end].windows(needle.len()).rposition(|window| window == needle)
}

/// Finds the previous header block in `content`.
///
/// The region starts at the beginning of the line holding the start marker
/// and ends after the line ending that follows the end marker (or at the end
/// of the file). Returns `None` unless both markers are present, the end
/// marker following the start marker.
pub fn find_splice_region(content: &[u8], eol: Eol) -> Option<SpliceRegion> {
  let eol = eol.as_bytes();

  let start_marker = find_bytes(content, SECTION_START.as_bytes(), 0)?;
  let start = rfind_bytes(content, eol, start_marker).map_or(0, |i| i + eol.len());

  let end_marker = find_bytes(content, SECTION_END.as_bytes(), start_marker + SECTION_START.len())?;
  let end = find_bytes(content, eol, end_marker + SECTION_END.len()).map_or(content.len(), |i| i + eol.len());

  Some(SpliceRegion { start, end })
}

/// The rewritten file as three consecutive byte segments: content kept
/// before the header, the header, and content kept after it.
#[derive(Debug, PartialEq, Eq)]
pub struct SplicePlan<'a> {
  pub before: &'a [u8],
  pub header: &'a [u8],
  pub after: &'a [u8],
}

impl<'a> SplicePlan<'a> {
  /// Plans replacing `region` with `header`, or prepending `header` when
  /// there is no region.
  pub fn new(content: &'a [u8], header: &'a [u8], region: Option<SpliceRegion>) -> Self {
    match region {
      Some(SpliceRegion { start, end }) => Self {
        before: &content[..start],
        header,
        after: &content[end..],
      },
      None => Self {
        before: &[],
        header,
        after: content,
      },
    }
  }

  /// Segments in write order, skipping empty ones.
  pub fn segments(&self) -> impl Iterator<Item = &'a [u8]> {
    [self.before, self.header, self.after]
      .into_iter()
      .filter(|segment| !segment.is_empty())
  }

  pub fn len(&self) -> usize {
    self.before.len() + self.header.len() + self.after.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Whether writing this plan would reproduce `content` exactly.
  pub fn is_identity(&self, content: &[u8]) -> bool {
    if self.len() != content.len() {
      return false;
    }
    let mut offset = 0;
    self.segments().all(|segment| {
      let same = content[offset..offset + segment.len()] == *segment;
      offset += segment.len();
      same
    })
  }

  pub fn to_vec(&self) -> Vec<u8> {
    let mut out = Vec::with_capacity(self.len());
    for segment in self.segments() {
      out.extend_from_slice(segment);
    }
    out
  }
}
