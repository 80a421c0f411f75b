//! # Header Module
//!
//! This module maps files to comment styles and renders the autogenerated
//! copyright block for them.
//!
//! The module includes:
//! - [`HeaderStyle`] and the ordered [`STYLES`] table
//! - [`HeaderBlock`], the rendered list of header lines
//! - [`make_header`], which combines a style with an [`AuthorMap`]
//!
//! ## Example
//!
//! ```rust
//! use std::path::Path;
//!
//! use autocopyright::authors::AuthorMap;
//! use autocopyright::header::make_header;
//!
//! let mut authors = AuthorMap::new();
//! authors.record("Jane Doe <jane@example.com>", 2021);
//! authors.record("Jane Doe <jane@example.com>", 2024);
//!
//! let header = make_header(Path::new("src/main.cpp"), &authors).unwrap();
//! assert_eq!(
//!   header.lines(),
//!   [
//!     "// AUTOGENERATED COPYRIGHT HEADER START",
//!     "// Copyright (C) 2021-2024 Jane Doe <jane@example.com>",
//!     "// AUTOGENERATED COPYRIGHT HEADER END",
//!   ]
//! );
//! ```

use std::path::{Path, PathBuf};

use crate::authors::AuthorMap;

/// Marker opening the autogenerated block. Must never change.
pub const SECTION_START: &str = "AUTOGENERATED COPYRIGHT HEADER START";

/// Marker closing the autogenerated block. Must never change.
pub const SECTION_END: &str = "AUTOGENERATED COPYRIGHT HEADER END";

/// Comment syntax for one family of files.
///
/// Marker lines are the section markers wrapped in the same prefix and suffix
/// as every copyright line.
#[derive(Debug, PartialEq, Eq)]
pub struct HeaderStyle {
  /// Short name for diagnostics (`#`, `;`, `//`, `<!---->`).
  pub name: &'static str,
  /// Lower-cased file names this style applies to.
  pub match_files: &'static [&'static str],
  /// Lower-cased extensions, including the leading dot and compound forms.
  pub match_exts: &'static [&'static str],
  pub line_prefix: &'static str,
  pub line_suffix: &'static str,
}

impl HeaderStyle {
  /// Wraps `text` in this style's line prefix and suffix.
  pub fn comment(&self, text: &str) -> String {
    format!("{}{}{}", self.line_prefix, text, self.line_suffix)
  }

  pub fn prepend_line(&self) -> String {
    self.comment(SECTION_START)
  }

  pub fn append_line(&self) -> String {
    self.comment(SECTION_END)
  }

  fn matches(&self, file_name: &str, extension: Option<&str>) -> bool {
    self.match_files.contains(&file_name) || extension.is_some_and(|ext| self.match_exts.contains(&ext))
  }
}

/// Known styles, evaluated in order; the first match wins.
pub static STYLES: [HeaderStyle; 4] = [
  HeaderStyle {
    name: "#",
    match_files: &["cmakelists.txt"],
    match_exts: &[
      ".clang-tidy",
      ".clang-format",
      ".cmake",
      ".editorconfig",
      ".gitignore",
      ".gitmodules",
      ".yml",
    ],
    line_prefix: "# ",
    line_suffix: "",
  },
  HeaderStyle {
    name: ";",
    match_files: &[],
    match_exts: &[".iss", ".iss.in"],
    line_prefix: "; ",
    line_suffix: "",
  },
  HeaderStyle {
    name: "//",
    match_files: &[],
    match_exts: &[
      ".c", ".c.in", ".cpp", ".cpp.in", ".h", ".h.in", ".hpp", ".hpp.in", ".js", ".rc", ".rc.in", ".effect",
    ],
    line_prefix: "// ",
    line_suffix: "",
  },
  HeaderStyle {
    name: "<!---->",
    match_files: &[],
    match_exts: &[
      ".htm",
      ".htm.in",
      ".html",
      ".html.in",
      ".xml",
      ".xml.in",
      ".plist",
      ".plist.in",
      ".pkgproj",
      ".pkgproj.in",
    ],
    line_prefix: "<!-- ",
    line_suffix: " -->",
  },
];

/// Error type for header generation.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
  /// No entry of [`STYLES`] matches the file. Callers skip such files.
  #[error("unrecognized file format: {}", path.display())]
  UnrecognizedFormat { path: PathBuf },
}

/// Lower-cased file name and the extension starting at its first `.`.
///
/// `Foo.RC.in` yields `("foo.rc.in", Some(".rc.in"))`; `Makefile` has no
/// extension.
pub fn file_keys(path: &Path) -> (String, Option<String>) {
  let file_name = path
    .file_name()
    .map(|name| name.to_string_lossy().to_lowercase())
    .unwrap_or_default();
  let extension = file_name.find('.').map(|i| file_name[i..].to_string());
  (file_name, extension)
}

/// Finds the style for `path`, if any.
pub fn find_style(path: &Path) -> Option<&'static HeaderStyle> {
  let (file_name, extension) = file_keys(path);
  STYLES
    .iter()
    .find(|style| style.matches(&file_name, extension.as_deref()))
}

/// The rendered header: marker line, copyright lines, marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
  lines: Vec<String>,
}

impl HeaderBlock {
  pub fn lines(&self) -> &[String] {
    &self.lines
  }

  /// Joins the lines with `eol` and terminates the last one with `eol` too.
  pub fn render(&self, eol: &str) -> String {
    let mut out = self.lines.join(eol);
    out.push_str(eol);
    out
  }
}

/// Builds the header block for `path` from its author intervals.
///
/// # Errors
///
/// Returns [`HeaderError::UnrecognizedFormat`] when no style matches.
pub fn make_header(path: &Path, authors: &AuthorMap) -> Result<HeaderBlock, HeaderError> {
  let style = find_style(path).ok_or_else(|| HeaderError::UnrecognizedFormat {
    path: path.to_path_buf(),
  })?;

  let mut lines = Vec::with_capacity(authors.len() + 2);
  lines.push(style.prepend_line());
  for author in authors {
    lines.push(style.comment(&format!("Copyright (C) {} {}", author.year_range(), author.name)));
  }
  lines.push(style.append_line());

  Ok(HeaderBlock { lines })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn style_name(path: &str) -> Option<&'static str> {
    find_style(Path::new(path)).map(|s| s.name)
  }

  #[test]
  fn test_file_keys_compound_extension() {
    assert_eq!(
      file_keys(Path::new("dir/Resource.RC.in")),
      ("resource.rc.in".to_string(), Some(".rc.in".to_string()))
    );
    assert_eq!(file_keys(Path::new("Makefile")), ("makefile".to_string(), None));
    assert_eq!(
      file_keys(Path::new(".clang-format")),
      (".clang-format".to_string(), Some(".clang-format".to_string()))
    );
  }

  #[test]
  fn test_style_lookup() {
    assert_eq!(style_name("CMakeLists.txt"), Some("#"));
    assert_eq!(style_name("cmake/module.cmake"), Some("#"));
    assert_eq!(style_name(".github/workflows/ci.yml"), Some("#"));
    assert_eq!(style_name("installer.iss.in"), Some(";"));
    assert_eq!(style_name("src/plugin.cpp"), Some("//"));
    assert_eq!(style_name("src/version.h.in"), Some("//"));
    assert_eq!(style_name("data/effects/blur.effect"), Some("//"));
    assert_eq!(style_name("ui/About.HTML"), Some("<!---->"));
    assert_eq!(style_name("Info.plist.in"), Some("<!---->"));
  }

  #[test]
  fn test_no_progressive_suffix_fallback() {
    // `.tar.c` is not listed even though `.c` is.
    assert_eq!(style_name("archive.tar.c"), None);
    assert_eq!(style_name("data.bin"), None);
    assert_eq!(style_name("README"), None);
    assert_eq!(style_name("notes.txt"), None);
  }

  #[test]
  fn test_markup_style_wraps_each_line() {
    let mut authors = AuthorMap::new();
    authors.record("A <a@x>", 2020);

    let header = make_header(Path::new("index.html"), &authors).expect("html is known");
    assert_eq!(
      header.lines(),
      [
        "<!-- AUTOGENERATED COPYRIGHT HEADER START -->",
        "<!-- Copyright (C) 2020 A <a@x> -->",
        "<!-- AUTOGENERATED COPYRIGHT HEADER END -->",
      ]
    );
  }

  #[test]
  fn test_entries_follow_author_order() {
    let mut authors = AuthorMap::new();
    authors.record("A", 2020);
    authors.record("B", 2021);
    authors.record("A", 2022);

    let header = make_header(Path::new("CMakeLists.txt"), &authors).expect("cmake is known");
    assert_eq!(header.lines()[1], "# Copyright (C) 2020-2022 A");
    assert_eq!(header.lines()[2], "# Copyright (C) 2021 B");
  }

  #[test]
  fn test_unrecognized_format_is_distinguishable() {
    let err = make_header(Path::new("data.bin"), &AuthorMap::new()).expect_err("bin is unknown");
    assert!(matches!(err, HeaderError::UnrecognizedFormat { .. }));
  }

  #[test]
  fn test_render_uses_given_eol() {
    let header = make_header(Path::new("a.iss"), &AuthorMap::new()).expect("iss is known");
    assert_eq!(
      header.render("\r\n"),
      "; AUTOGENERATED COPYRIGHT HEADER START\r\n; AUTOGENERATED COPYRIGHT HEADER END\r\n"
    );
  }
}
