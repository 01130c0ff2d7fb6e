#![forbid(unsafe_code)]

//! Text renderings of grid occupancy and snapshot assertions.
//!
//! One line per row, one character per cell:
//!
//! - `A`, `B`, ... an item, lettered by ascending id among the items present;
//! - `.` a free cell holding a placeholder;
//! - ` ` a free cell with no placeholder;
//! - `!` (host view only) two live widgets claiming the same cell.

use std::path::{Path, PathBuf};

use gridinv_inventory::{InventoryGrid, WidgetHost, WidgetId};

use crate::recording::RecordingHost;

const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Letter for the item at `rank` in id order; `#` once letters run out.
pub fn item_glyph(rank: usize) -> char {
    GLYPHS.get(rank).map_or('#', |b| char::from(*b))
}

/// Render the grid's own view of occupancy and placeholders.
pub fn grid_to_text<H: WidgetHost>(grid: &InventoryGrid<H>) -> String {
    let config = grid.config();
    let (rows, columns) = (config.rows(), config.columns());
    let mut cells = vec![' '; config.cell_count()];

    for cell in grid.placeholders().cells() {
        if cell.row >= 0 && cell.row < rows && cell.column >= 0 && cell.column < columns {
            cells[cell.row as usize * columns as usize + cell.column as usize] = '.';
        }
    }
    for (rank, item) in grid.occupancy().iter().enumerate() {
        let glyph = item_glyph(rank);
        for cell in item.rect().cells() {
            if cell.row >= 0 && cell.row < rows && cell.column >= 0 && cell.column < columns {
                cells[cell.row as usize * columns as usize + cell.column as usize] = glyph;
            }
        }
    }
    join_rows(&cells, columns as usize)
}

/// Render what the host actually has slotted. Widgets of `placeholder_class`
/// draw as `.`; everything else is lettered by ascending id.
pub fn host_layout_text(
    host: &RecordingHost,
    rows: i32,
    columns: i32,
    placeholder_class: &str,
) -> String {
    let mut cells = vec![' '; (rows.max(0) as usize) * (columns.max(0) as usize)];
    let items: Vec<WidgetId> = host
        .slotted()
        .filter(|(_, record)| record.class.name() != placeholder_class)
        .map(|(id, _)| id)
        .collect();

    for (id, record) in host.slotted() {
        let Some(rect) = record.slot else { continue };
        let glyph = match items.binary_search(&id) {
            Ok(rank) => item_glyph(rank),
            Err(_) => '.',
        };
        for cell in rect.cells() {
            if cell.row < 0 || cell.row >= rows || cell.column < 0 || cell.column >= columns {
                continue;
            }
            let slot = &mut cells[cell.row as usize * columns as usize + cell.column as usize];
            *slot = if *slot == ' ' { glyph } else { '!' };
        }
    }
    join_rows(&cells, columns.max(0) as usize)
}

fn join_rows(cells: &[char], columns: usize) -> String {
    if columns == 0 {
        return String::new();
    }
    cells
        .chunks(columns)
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// Diff
// ============================================================================

/// Line-by-line diff. ` ` marks equal lines, `-` lines only in `expected`,
/// `+` lines only in `actual`. Empty when the inputs match.
pub fn diff_text(expected: &str, actual: &str) -> String {
    let expected_lines: Vec<&str> = expected.lines().collect();
    let actual_lines: Vec<&str> = actual.lines().collect();
    let mut out = String::new();
    let mut has_diff = false;

    for i in 0..expected_lines.len().max(actual_lines.len()) {
        match (expected_lines.get(i), actual_lines.get(i)) {
            (Some(e), Some(a)) if e == a => out.push_str(&format!(" {e}\n")),
            (Some(e), Some(a)) => {
                out.push_str(&format!("-{e}\n+{a}\n"));
                has_diff = true;
            }
            (Some(e), None) => {
                out.push_str(&format!("-{e}\n"));
                has_diff = true;
            }
            (None, Some(a)) => {
                out.push_str(&format!("+{a}\n"));
                has_diff = true;
            }
            (None, None) => {}
        }
    }

    if has_diff { out } else { String::new() }
}

// ============================================================================
// Snapshot Assertion
// ============================================================================

fn snapshot_path(base_dir: &Path, name: &str) -> PathBuf {
    base_dir
        .join("tests")
        .join("snapshots")
        .join(format!("{name}.snap"))
}

fn is_bless() -> bool {
    std::env::var("BLESS").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Compare `actual` with the stored snapshot `name` under `base_dir`.
///
/// Trailing whitespace at the end of the file is ignored.
///
/// # Panics
///
/// * If the snapshot file does not exist and `BLESS=1` is **not** set.
/// * If `actual` does not match the stored snapshot.
pub fn assert_grid_snapshot_at(name: &str, actual: &str, base_dir: &str) {
    let path = snapshot_path(Path::new(base_dir), name);

    if is_bless() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create snapshot directory");
        }
        std::fs::write(&path, format!("{actual}\n")).expect("failed to write snapshot");
        return;
    }

    let Ok(expected) = std::fs::read_to_string(&path) else {
        panic!(
            "snapshot '{name}' not found at {}\nrun with BLESS=1 to create it\n\nactual:\n{actual}",
            path.display()
        );
    };
    let expected = expected.trim_end();
    let actual = actual.trim_end();
    if expected != actual {
        panic!(
            "snapshot '{name}' mismatch\n\n{}",
            diff_text(expected, actual)
        );
    }
}

/// Assert that a grid's text rendering matches a stored snapshot.
///
/// Uses `CARGO_MANIFEST_DIR` to locate `tests/snapshots/` automatically.
///
/// ```ignore
/// assert_grid_snapshot!("after_remove", &grid);
/// ```
#[macro_export]
macro_rules! assert_grid_snapshot {
    ($name:expr, $grid:expr) => {
        $crate::assert_grid_snapshot_at(
            $name,
            &$crate::grid_to_text($grid),
            env!("CARGO_MANIFEST_DIR"),
        )
    };
}
