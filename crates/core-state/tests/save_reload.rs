//! Editing session written through `core_text::save` and read back.

use core_events::KeyEvent;
use core_state::BufferModel;
use core_text::{Position, load, save};

#[test]
fn edited_buffer_survives_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.py");
    std::fs::write(&path, "def f():\nreturn 1\n").unwrap();

    let buffer = load(&path).unwrap();
    let mut m = BufferModel::new(buffer, 24).with_file_name(&path);
    m.set_cursor(Position::new(1, 0));
    m.apply(KeyEvent::Tab);
    assert!(m.modified);

    let res = m.apply(KeyEvent::Save);
    assert!(res.save_requested);
    let written = save(m.buffer(), &path).unwrap();
    m.mark_saved();

    assert_eq!(written, "def f():\n    return 1\n".len());
    assert!(!m.modified);
    assert_eq!(load(&path).unwrap(), *m.buffer());
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "def f():\n    return 1\n"
    );
}

#[test]
fn untouched_buffer_is_byte_identical_after_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixed.txt");
    let original = "a\r\n\n  b\t c\n\n";
    std::fs::write(&path, original).unwrap();
    let m = BufferModel::new(load(&path).unwrap(), 24);
    save(m.buffer(), &path).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
}
