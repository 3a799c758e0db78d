//! Frames produced while the cursor walks a long buffer.

use core_events::KeyEvent;
use core_lint::Annotations;
use core_render::{build_frame, gutter_width, render_to};
use core_state::BufferModel;
use core_terminal::TerminalContext;
use core_text::Buffer;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn long_model(rows: usize, height: u16) -> BufferModel {
    let lines: Vec<String> = (0..rows).map(|i| format!("line {i}")).collect();
    BufferModel::new(Buffer::from_lines(&lines), usize::from(height)).with_file_name("long.txt")
}

#[test]
fn first_visible_row_follows_scroll() {
    let ctx = TerminalContext::new(20, 10);
    let mut m = long_model(30, 10);
    for _ in 0..20 {
        m.apply(KeyEvent::Down);
    }
    assert_eq!(m.scroll(), 15);
    let f = build_frame(&m, &Annotations::new(), ctx);
    assert_eq!(f.row_text(0).trim_end(), "  16 line 15");
    assert_eq!(f.row_text(8).trim_end(), "  24 line 23");
    assert_eq!(f.cursor, Some((gutter_width(30) as u16, 5)));
    assert_eq!(f.row_text(9).trim_end(), " -- INSERT --  long.txt  1:21");
}

#[test]
fn ansi_output_clears_then_positions_cursor() {
    let ctx = TerminalContext::new(20, 4);
    let mut m = long_model(3, 4);
    m.apply(KeyEvent::Down);
    m.apply(KeyEvent::End);
    let mut out = Vec::new();
    render_to(&mut out, &m, &Annotations::new(), ctx).unwrap();
    let s = String::from_utf8(out).unwrap();
    assert!(s.starts_with("\x1b[?25l\x1b[2J\x1b[3J"));
    assert!(s.contains("   2 "));
    assert!(s.contains("line 1"));
    // cursor at column 5 + 6, screen row 1 (1-based: 2;12)
    assert!(s.ends_with("\x1b[2;12H\x1b[?25h"));
}

proptest! {
    #[test]
    fn every_painted_row_spans_the_width(width in 1u16..120, height in 1u16..40, rows in 1usize..80, downs in 0usize..100) {
        let mut m = long_model(rows, height);
        for _ in 0..downs {
            m.apply(KeyEvent::Down);
        }
        let f = build_frame(&m, &Annotations::new(), TerminalContext::new(width, height));
        prop_assert_eq!(f.rows.len(), usize::from(height));
        for row in &f.rows {
            prop_assert!(row.is_empty() || row.len() == usize::from(width));
        }
        if let Some((x, y)) = f.cursor {
            prop_assert!(x < width);
            prop_assert!(y < height - 1);
        }
    }
}
