//! # Authors Module
//!
//! Aggregates a file's commit history into one [`AuthorInterval`] per
//! contributor, spanning the UTC years of their first and last commit.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Datelike, Utc};
use tracing::trace;

use crate::git::{Git, GitError};

/// A contributor's first-to-last commit year range for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorInterval {
  /// Identity as reported by git: `Name <email>`.
  pub name: String,
  pub from: i32,
  pub to: i32,
}

impl AuthorInterval {
  /// `"{from}-{to}"`, or just `"{to}"` when both years are equal.
  pub fn year_range(&self) -> String {
    if self.from != self.to {
      format!("{}-{}", self.from, self.to)
    } else {
      self.to.to_string()
    }
  }
}

/// Insertion-ordered map of identity to [`AuthorInterval`].
///
/// Iteration yields contributors in order of first appearance.
#[derive(Debug, Default, Clone)]
pub struct AuthorMap {
  entries: Vec<AuthorInterval>,
  index: HashMap<String, usize>,
}

impl AuthorMap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Records one commit by `name` in `year`.
  ///
  /// The first record for a name fixes `from`; every record moves `to`.
  /// Records are expected in chronological order.
  pub fn record(&mut self, name: &str, year: i32) {
    if let Some(&i) = self.index.get(name) {
      self.entries[i].to = year;
      return;
    }
    self.index.insert(name.to_string(), self.entries.len());
    self.entries.push(AuthorInterval {
      name: name.to_string(),
      from: year,
      to: year,
    });
  }

  pub fn get(&self, name: &str) -> Option<&AuthorInterval> {
    self.index.get(name).map(|&i| &self.entries[i])
  }

  pub fn iter(&self) -> std::slice::Iter<'_, AuthorInterval> {
    self.entries.iter()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

impl<'a> IntoIterator for &'a AuthorMap {
  type Item = &'a AuthorInterval;
  type IntoIter = std::slice::Iter<'a, AuthorInterval>;

  fn into_iter(self) -> Self::IntoIter {
    self.iter()
  }
}

/// Parses the UTC calendar year out of an ISO-8601 timestamp.
fn utc_year(date: &str) -> Option<i32> {
  DateTime::parse_from_rfc3339(date.trim())
    .ok()
    .map(|d| d.with_timezone(&Utc).year())
}

/// Builds an [`AuthorMap`] from `git log` output in [`crate::git::LOG_FORMAT`].
///
/// The line ending is detected once: CRLF if the output contains one,
/// otherwise LF. Lines without a `|`, with an empty identity or an unreadable
/// date are skipped.
pub fn parse_author_log(raw: &str) -> AuthorMap {
  let eol = if raw.contains("\r\n") { "\r\n" } else { "\n" };

  let mut authors = AuthorMap::new();
  for line in raw.split(eol) {
    if line.is_empty() {
      continue;
    }
    let Some((date, name)) = line.split_once('|') else {
      trace!("Skipping log line without separator: {:?}", line);
      continue;
    };
    if name.is_empty() {
      continue;
    }
    let Some(year) = utc_year(date) else {
      trace!("Skipping log line with unreadable date: {:?}", line);
      continue;
    };
    authors.record(name, year);
  }
  authors
}

/// Queries git for the history of `path` and aggregates it.
///
/// An empty history yields an empty map.
///
/// # Errors
///
/// Fails if git cannot be spawned or `git log` exits unsuccessfully.
pub async fn retrieve_authors(git: &Git, path: &Path) -> Result<AuthorMap, GitError> {
  let raw = git.log_authors(path).await?;
  Ok(parse_author_log(&raw))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_intervals_follow_first_appearance() {
    let log = "2020-03-01T12:00:00+00:00|A <a@example.com>\n\
               2021-06-01T12:00:00+00:00|B <b@example.com>\n\
               2022-09-01T12:00:00+00:00|A <a@example.com>";
    let authors = parse_author_log(log);

    let entries: Vec<_> = authors.iter().collect();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "A <a@example.com>");
    assert_eq!((entries[0].from, entries[0].to), (2020, 2022));
    assert_eq!(entries[1].name, "B <b@example.com>");
    assert_eq!((entries[1].from, entries[1].to), (2021, 2021));
  }

  #[test]
  fn test_year_range_collapses_single_year() {
    let interval = AuthorInterval {
      name: "C".to_string(),
      from: 2023,
      to: 2023,
    };
    assert_eq!(interval.year_range(), "2023");

    let interval = AuthorInterval { from: 2019, ..interval };
    assert_eq!(interval.year_range(), "2019-2023");
  }

  #[test]
  fn test_empty_log_yields_empty_map() {
    assert!(parse_author_log("").is_empty());
    assert!(parse_author_log("\n").is_empty());
  }

  #[test]
  fn test_crlf_output_is_split_on_crlf() {
    let log = "2020-01-01T00:00:00Z|A <a@x>\r\n2024-01-01T00:00:00Z|A <a@x>\r\n";
    let authors = parse_author_log(log);
    assert_eq!(authors.len(), 1);
    let a = authors.get("A <a@x>").expect("author present");
    assert_eq!((a.from, a.to), (2020, 2024));
  }

  #[test]
  fn test_year_is_taken_in_utc() {
    // 00:30 on new year's day at +01:00 is still the previous year in UTC.
    let authors = parse_author_log("2023-01-01T00:30:00+01:00|A <a@x>");
    assert_eq!(authors.get("A <a@x>").map(|a| a.to), Some(2022));

    let authors = parse_author_log("2022-12-31T20:00:00-05:00|A <a@x>");
    assert_eq!(authors.get("A <a@x>").map(|a| a.to), Some(2023));
  }

  #[test]
  fn test_malformed_lines_are_skipped() {
    let log = "garbage without separator\n\
               not-a-date|A <a@x>\n\
               2021-05-05T05:05:05+00:00|\n\
               2021-05-05T05:05:05+00:00|B <b@x>";
    let authors = parse_author_log(log);
    assert_eq!(authors.len(), 1);
    assert!(authors.get("B <b@x>").is_some());
  }

  #[test]
  fn test_identity_may_contain_separator() {
    let authors = parse_author_log("2021-05-05T05:05:05+00:00|Pipe | Person <p@x>");
    assert!(authors.get("Pipe | Person <p@x>").is_some());
  }
}
