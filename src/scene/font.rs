//! Block letters for the banner.
//!
//! Each glyph is 5 rows tall with a per-glyph width; `#` marks a filled cell.
//! Lowercase input is folded to uppercase.

pub const GLYPH_HEIGHT: usize = 5;

pub fn glyph(ch: char) -> Option<[&'static str; GLYPH_HEIGHT]> {
    let rows = match ch.to_ascii_uppercase() {
        'A' => [" ### ", "#   #", "#####", "#   #", "#   #"],
        'B' => ["#### ", "#   #", "#### ", "#   #", "#### "],
        'C' => [" ### ", "#   #", "#    ", "#   #", " ### "],
        'D' => ["#### ", "#   #", "#   #", "#   #", "#### "],
        'E' => ["#####", "#    ", "###  ", "#    ", "#####"],
        'F' => ["#####", "#    ", "###  ", "#    ", "#    "],
        'G' => [" ### ", "#    ", "#  ##", "#   #", " ### "],
        'H' => ["#   #", "#   #", "#####", "#   #", "#   #"],
        'I' => ["###", " # ", " # ", " # ", "###"],
        'J' => ["  ###", "   # ", "   # ", "#  # ", " ##  "],
        'K' => ["#   #", "#  # ", "###  ", "#  # ", "#   #"],
        'L' => ["#    ", "#    ", "#    ", "#    ", "#####"],
        'M' => ["#   #", "## ##", "# # #", "#   #", "#   #"],
        'N' => ["#   #", "##  #", "# # #", "#  ##", "#   #"],
        'O' => [" ### ", "#   #", "#   #", "#   #", " ### "],
        'P' => ["#### ", "#   #", "#### ", "#    ", "#    "],
        'R' => ["#### ", "#   #", "#### ", "#  # ", "#   #"],
        'S' => [" ####", "#    ", " ### ", "    #", "#### "],
        'T' => ["#####", "  #  ", "  #  ", "  #  ", "  #  "],
        'U' => ["#   #", "#   #", "#   #", "#   #", " ### "],
        'V' => ["#   #", "#   #", "#   #", " # # ", "  #  "],
        'W' => ["#   #", "#   #", "# # #", "## ##", "#   #"],
        'Y' => ["#   #", " # # ", "  #  ", "  #  ", "  #  "],
        '0' => [" ### ", "#   #", "#   #", "#   #", " ### "],
        '1' => [" # ", "## ", " # ", " # ", "###"],
        '2' => [" ### ", "#   #", "  ## ", " #   ", "#####"],
        '3' => [" ### ", "#   #", "  ## ", "#   #", " ### "],
        ' ' => ["   ", "   ", "   ", "   ", "   "],
        '!' => ["#", "#", "#", " ", "#"],
        _ => return None,
    };
    debug_assert!(
        rows.iter().all(|row| row.len() == rows[0].len()),
        "glyph '{ch}' has inconsistent row widths",
    );
    Some(rows)
}

/// Filled cells of `text` laid out left to right with one blank column between
/// glyphs, as `(column, row)`. Returns the cells and the total width in
/// columns. Characters without a glyph are skipped.
pub fn layout(text: &str) -> (Vec<(usize, usize)>, usize) {
    let mut cells = Vec::new();
    let mut column = 0;
    for rows in text.chars().filter_map(glyph) {
        let width = rows[0].len();
        for (row, line) in rows.iter().enumerate() {
            for (offset, mark) in line.bytes().enumerate() {
                if mark == b'#' {
                    cells.push((column + offset, row));
                }
            }
        }
        column += width + 1;
    }
    (cells, column.saturating_sub(1))
}
