use super::*;
use crate::catalog::Track;

fn t(id: &str) -> Track {
    Track {
        id: id.into(),
        source: format!("{id}.ogg"),
        title: format!("Track {id}"),
    }
}

#[test]
fn cursor_wraps_in_both_directions() {
    let mut app = App::new(vec![t("1"), t("2"), t("3")]);
    app.prev();
    assert_eq!(app.selected, 2);
    app.next();
    assert_eq!(app.selected, 0);
    app.last();
    assert_eq!(app.selected, 2);
    app.first();
    assert_eq!(app.selected, 0);
}

#[test]
fn cursor_on_empty_list_stays_put() {
    let mut app = App::new(Vec::new());
    app.next();
    app.prev();
    app.last();
    assert_eq!(app.selected, 0);
    assert!(app.selected_track().is_none());
}

#[test]
fn select_id_moves_cursor_only_for_known_ids() {
    let mut app = App::new(vec![t("1"), t("3")]);
    assert!(app.select_id("3"));
    assert_eq!(app.selected_track().map(|t| t.id.as_str()), Some("3"));
    assert!(!app.select_id("2"));
    assert_eq!(app.selected, 1);
}

#[test]
fn command_line_editing() {
    let mut app = App::new(Vec::new());
    app.set_message("old");
    app.enter_command_mode();
    assert!(app.message.is_none());
    for c in "play 33".chars() {
        app.push_command_char(c);
    }
    app.pop_command_char();
    assert_eq!(app.take_command(), "play 3");
    assert!(!app.command_mode);
    assert!(app.command_line.is_empty());
}

#[test]
fn step_volume_snaps_and_clamps() {
    assert!((step_volume(0.5, 0.05, true) - 0.55).abs() < 1e-6);
    assert!((step_volume(0.52, 0.05, false) - 0.45).abs() < 1e-6);
    assert_eq!(step_volume(0.98, 0.05, true), 1.0);
    assert_eq!(step_volume(0.02, 0.05, false), 0.0);

    let mut v = 0.0;
    for _ in 0..20 {
        v = step_volume(v, 0.05, true);
    }
    assert_eq!(v, 1.0);
}
