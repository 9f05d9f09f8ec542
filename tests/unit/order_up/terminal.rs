use super::*;

fn game(name: &str) -> Game {
    Game {
        name: name.to_string(),
        date: "1999".to_string(),
    }
}

#[test]
fn insert_places_cards_and_appends_past_the_end() {
    let mut view = TerminalView::new(Vec::new());
    view.insert("90", &game("b"), 0);
    view.insert("90", &game("a"), 0);
    view.insert("90", &game("c"), 7);

    let names: Vec<&str> = view.track().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(view.track()[0].background, "90s/abg.png");
}

#[test]
fn show_current_redraws_and_clears() {
    let mut view = TerminalView::new(Vec::new());
    view.show_current("00", Some(&game("sh2")));
    assert_eq!(view.current().map(|c| c.logo.as_str()), Some("00s/sh2logo.png"));

    view.show_current("00", None);
    assert!(view.current().is_none());

    let printed = String::from_utf8(view.out.clone()).unwrap();
    assert!(printed.contains("now showing: sh2 [00s/sh2logo.png]"));
    assert!(printed.contains("now showing: (done)"));
}
