//! Line/column source locations.

use serde::{Deserialize, Serialize};

/// A 1-based line/column position in a request document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    /// Creates a new source location.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Computes the location of a byte offset within `source`.
    ///
    /// `\n`, `\r\n` and a lone `\r` all terminate a line. Offsets past the end
    /// of the source are clamped to the end.
    #[must_use]
    pub fn from_offset(source: &str, offset: u32) -> Self {
        let offset = (offset as usize).min(source.len());
        let bytes = source.as_bytes();
        let mut line = 1;
        let mut line_start = 0;
        let mut i = 0;

        while i < offset {
            match bytes[i] {
                b'\n' => {
                    line += 1;
                    line_start = i + 1;
                }
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    line += 1;
                    line_start = i + 1;
                }
                _ => {}
            }
            i += 1;
        }

        let column = source
            .get(line_start..offset)
            .map_or(offset.saturating_sub(line_start), |s| s.chars().count());

        Self {
            line,
            column: u32::try_from(column + 1).unwrap_or(u32::MAX),
        }
    }
}
