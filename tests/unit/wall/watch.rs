use super::*;
use crate::wall::events::WallEventKind;

fn config() -> WallConfig {
    WallConfig {
        rows: Some(2),
        jitter_ms: 0,
        seed: Some(4),
        ..WallConfig::default()
    }
}

#[test]
fn script_parses_tagged_events_and_sorts_by_time() {
    let script = WatchScript::from_json(
        r#"[
            {"at": 5000, "type": "visibility", "state": "hidden"},
            {"at": 0, "type": "items", "items": [{"id": "a", "image": "a.jpg"}]},
            {"at": 100, "type": "resize", "width": 250, "height": 318},
            {"at": 200, "type": "config", "config": {"rows": 1}}
        ]"#,
    )
    .unwrap();
    let at: Vec<u64> = script.events().iter().map(|e| e.at.0).collect();
    assert_eq!(at, vec![0, 100, 200, 5000]);
    assert_eq!(
        script.events()[1].event,
        WatchEvent::Resize {
            width: 250.0,
            height: 318.0
        }
    );
    let WatchEvent::Config { config } = &script.events()[2].event else {
        panic!("expected config event");
    };
    assert_eq!(config.rows, Some(1));
    assert_eq!(config.padding, 6);
}

#[test]
fn script_rejects_invalid_config() {
    let err = WatchScript::from_json(
        r#"[{"at": 1, "type": "config", "config": {"aspect_ratio": -2}}]"#,
    )
    .unwrap_err();
    assert!(matches!(err, WallError::Validation(_)));
}

#[test]
fn handle_dispatches_each_event_kind() {
    let mut wall = Wall::new(config(), Viewport::new(200.0, 318.0)).unwrap();
    let items: Vec<Item> = (0..8)
        .map(|i| Item::new(format!("i{i}"), format!("{i}.jpg")))
        .collect();

    wall.handle(WatchEvent::Items { items }, Millis(0)).unwrap();
    assert_eq!(wall.grid().len(), 4);

    wall.handle(
        WatchEvent::Resize {
            width: 250.0,
            height: 318.0,
        },
        Millis(10),
    )
    .unwrap();
    assert_eq!(wall.grid().len(), 6);

    wall.handle(
        WatchEvent::Visibility {
            state: Visibility::Hidden,
        },
        Millis(20),
    )
    .unwrap();
    assert_eq!(wall.visibility(), Visibility::Hidden);

    let err = wall.handle(
        WatchEvent::Config {
            config: WallConfig {
                flip_duration_ms: 0,
                ..config()
            },
        },
        Millis(30),
    );
    assert!(err.is_err());

    let rebuilt = wall
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e.kind, WallEventKind::Rebuilt { .. }))
        .count();
    assert_eq!(rebuilt, 2);
}

#[test]
fn replay_runs_a_whole_session() {
    let script = WatchScript::from_json(
        r#"[
            {"at": 0, "type": "items", "items": [
                {"id": "a", "image": "a.jpg"}, {"id": "b", "image": "b.jpg"},
                {"id": "c", "image": "c.jpg"}, {"id": "d", "image": "d.jpg"},
                {"id": "e", "image": "e.jpg"}, {"id": "f", "image": "f.jpg"}
            ]},
            {"at": 7000, "type": "visibility", "state": "hidden"}
        ]"#,
    )
    .unwrap();
    let mut wall = Wall::new(config(), Viewport::new(200.0, 318.0)).unwrap();
    wall.replay(&script).unwrap();
    wall.advance_to(Millis(60_000));

    let flips = wall
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e.kind, WallEventKind::Flipped { .. }))
        .count();
    // Ticks at 3000 and 6000, then hidden.
    assert_eq!(flips, 2);
}
