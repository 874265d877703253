use tunebox::media::catalog::{SongCatalog, DEFAULT_DESC};

#[test]
fn insert_assigns_sequential_ids_and_default_desc() {
    let mut catalog = SongCatalog::new();
    let a = catalog.insert("a.mp3".to_string(), None);
    let b = catalog.insert("b.mp3".to_string(), Some("loud".to_string()));
    assert_eq!(a.id, 1);
    assert_eq!(a.desc, DEFAULT_DESC);
    assert_eq!(b.id, 2);
    assert_eq!(b.desc, "loud");
    assert_eq!(catalog.len(), 2);
}

#[test]
fn ids_are_not_reused_after_delete() {
    let mut catalog = SongCatalog::new();
    catalog.insert("a.mp3".to_string(), None);
    let b = catalog.insert("b.mp3".to_string(), None);
    catalog.remove(1).unwrap();

    // With count+1 numbering this would collide with song 2.
    let c = catalog.insert("c.mp3".to_string(), None);
    assert_eq!(c.id, 3);
    assert_ne!(c.id, b.id);
}

#[test]
fn list_keeps_insertion_order() {
    let mut catalog = SongCatalog::new();
    for name in ["z.mp3", "a.mp3", "m.mp3"] {
        catalog.insert(name.to_string(), None);
    }
    let titles: Vec<_> = catalog.list().iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, ["z.mp3", "a.mp3", "m.mp3"]);
}

#[test]
fn remove_unknown_id_returns_none() {
    let mut catalog = SongCatalog::new();
    assert!(catalog.remove(7).is_none());
    assert!(catalog.is_empty());
}

#[test]
fn title_taken_ignores_the_excepted_song() {
    let mut catalog = SongCatalog::new();
    let song = catalog.insert("a.mp3".to_string(), None);
    assert!(catalog.title_taken("a.mp3", None));
    assert!(!catalog.title_taken("a.mp3", Some(song.id)));
    assert!(!catalog.title_taken("b.mp3", None));
}
