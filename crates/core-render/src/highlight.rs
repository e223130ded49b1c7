//! Search highlight projection.
//!
//! Projects the matches a view holds for one buffer line onto that row's
//! cells. Pure with respect to the match frame: highlighting never changes
//! search state. Cells are indexed by character column, so `cells[c]` is
//! column `c` of the line.

use crate::style::StyleAttr;
use crate::{Cell, CellFlags};
use core_search::MatchFrame;
use core_text::Position;

/// How highlighted cells are marked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Semantic style attributes, resolved by the writer.
    #[default]
    Styled,
    /// Reverse video toggling for terminals without a style palette.
    Plain,
}

impl RenderMode {
    pub fn from_styled(styled: bool) -> Self {
        if styled {
            RenderMode::Styled
        } else {
            RenderMode::Plain
        }
    }
}

/// Mark the cells of `row` (1-based buffer line) covered by a match.
///
/// In styled mode every covered cell gets `SearchMatch`, except the cell
/// under `cursor` which gets `SearchMatchCursor`. In plain mode covered cells
/// have their reverse-video bit toggled. Columns past the end of `cells` are
/// ignored. Returns the number of cells touched.
pub fn project_row(
    frame: &MatchFrame,
    row: usize,
    cursor: Option<Position>,
    cells: &mut [Cell],
    mode: RenderMode,
) -> usize {
    let cursor_col = cursor.filter(|c| c.line == row).map(|c| c.col);
    let mut touched = 0;
    for m in frame.on_line(row) {
        let end = m.end.min(cells.len());
        for col in m.start.min(end)..end {
            let cell = &mut cells[col];
            match mode {
                RenderMode::Styled => {
                    cell.style = Some(if cursor_col == Some(col) {
                        StyleAttr::SearchMatchCursor
                    } else {
                        StyleAttr::SearchMatch
                    });
                }
                RenderMode::Plain => cell.flags.toggle(CellFlags::REVERSE),
            }
            touched += 1;
        }
    }
    touched
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_search::Match;

    fn cells(n: usize) -> Vec<Cell> {
        vec![Cell::default(); n]
    }

    fn frame() -> MatchFrame {
        MatchFrame::from_matches(vec![
            Match::new(1, 1, 3),
            Match::new(1, 5, 6),
            Match::new(2, 0, 2),
        ])
    }

    #[test]
    fn styled_projection_marks_cursor_cell() {
        let mut row = cells(8);
        let n = project_row(
            &frame(),
            1,
            Some(Position::new(1, 2)),
            &mut row,
            RenderMode::Styled,
        );
        assert_eq!(n, 3);
        let styles: Vec<_> = row.iter().map(|c| c.style).collect();
        assert_eq!(
            styles,
            vec![
                None,
                Some(StyleAttr::SearchMatch),
                Some(StyleAttr::SearchMatchCursor),
                None,
                None,
                Some(StyleAttr::SearchMatch),
                None,
                None,
            ]
        );
    }

    #[test]
    fn cursor_on_other_line_is_ignored() {
        let mut row = cells(4);
        project_row(
            &frame(),
            2,
            Some(Position::new(1, 0)),
            &mut row,
            RenderMode::Styled,
        );
        assert!(row[..2].iter().all(|c| c.style == Some(StyleAttr::SearchMatch)));
    }

    #[test]
    fn plain_mode_toggles_reverse() {
        let mut row = cells(8);
        row[1].flags |= CellFlags::REVERSE;
        project_row(&frame(), 1, None, &mut row, RenderMode::Plain);
        assert!(!row[1].flags.contains(CellFlags::REVERSE));
        assert!(row[2].flags.contains(CellFlags::REVERSE));
        assert!(row[5].flags.contains(CellFlags::REVERSE));
        assert!(row.iter().all(|c| c.style.is_none()));
    }

    #[test]
    fn spans_past_row_width_are_clipped() {
        let mut row = cells(2);
        let n = project_row(&frame(), 1, None, &mut row, RenderMode::Styled);
        assert_eq!(n, 1);
        assert_eq!(row[1].style, Some(StyleAttr::SearchMatch));
    }

    #[test]
    fn rows_without_matches_are_untouched() {
        let mut row = cells(4);
        assert_eq!(project_row(&frame(), 3, None, &mut row, RenderMode::Styled), 0);
        assert!(row.iter().all(|c| c.style.is_none()));
    }

    #[test]
    fn mode_from_config_flag() {
        assert_eq!(RenderMode::from_styled(true), RenderMode::Styled);
        assert_eq!(RenderMode::from_styled(false), RenderMode::Plain);
    }
}
