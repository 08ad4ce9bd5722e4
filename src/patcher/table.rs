// src/patcher/table.rs
//! Line-oriented pipe tables.
//!
//! Line 0 is the header, line 1 the alignment row, everything after is data.
//! Cells are never re-parsed; edits only append to or overwrite whole lines.

use crate::batch::CellValue;

/// Everything up to and including the last occurrence of this is front-matter.
pub const FRONT_MATTER_DELIMITER: &str = "---\n";

const HEADER_LINE: usize = 0;
const SEPARATOR_LINE: usize = 1;
/// Index of the first data row.
pub const FIRST_DATA_LINE: usize = 2;

const NEW_COLUMN_ALIGNMENT: &str = ":---:|";
const NEW_COLUMN_PLACEHOLDER: &str = " - |";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    lines: Vec<String>,
}

impl Table {
    /// Splits on `\n` and drops empty lines.
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text
                .split('\n')
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Like [`Table::from_text`], after discarding any front-matter.
    pub fn from_markdown(raw: &str) -> Self {
        Self::from_text(strip_front_matter(raw))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of rows below the header and separator.
    pub fn data_row_count(&self) -> usize {
        self.lines.len().saturating_sub(FIRST_DATA_LINE)
    }

    pub fn has_header(&self) -> bool {
        self.lines.len() > SEPARATOR_LINE
    }

    /// Appends a column: name to the header, a centered alignment cell to the
    /// separator, and a `-` placeholder to every data row.
    ///
    /// Returns `false` and leaves the table untouched when there is no header
    /// and separator to extend.
    pub fn add_column(&mut self, name: &str) -> bool {
        if !self.has_header() {
            return false;
        }
        self.lines[HEADER_LINE].push_str(&format!(" {} |", name));
        self.lines[SEPARATOR_LINE].push_str(NEW_COLUMN_ALIGNMENT);
        for line in self.lines.iter_mut().skip(FIRST_DATA_LINE) {
            line.push_str(NEW_COLUMN_PLACEHOLDER);
        }
        true
    }

    pub fn push_row<'a>(&mut self, cells: impl IntoIterator<Item = &'a CellValue>) {
        self.lines.push(render_row(cells));
    }

    /// Overwrites data row `index`. Negative or out-of-range indices are ignored.
    pub fn replace_row<'a>(
        &mut self,
        index: i64,
        cells: impl IntoIterator<Item = &'a CellValue>,
    ) -> bool {
        let Ok(index) = usize::try_from(index) else {
            return false;
        };
        match index
            .checked_add(FIRST_DATA_LINE)
            .and_then(|line| self.lines.get_mut(line))
        {
            Some(line) => {
                *line = render_row(cells);
                true
            }
            None => false,
        }
    }
}

/// Drops everything up to and including the last front-matter delimiter.
pub fn strip_front_matter(raw: &str) -> &str {
    match raw.rfind(FRONT_MATTER_DELIMITER) {
        Some(pos) => &raw[pos + FRONT_MATTER_DELIMITER.len()..],
        None => raw,
    }
}

/// `|` followed by ` value |` per cell.
pub fn render_row<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> String {
    let mut line = String::from("|");
    for cell in cells {
        line.push_str(&format!(" {} |", cell));
    }
    line
}
