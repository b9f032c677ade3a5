use manatan_nav::{Location, Replay, DEFAULT_KEY};

const SESSION: &str = r#"
# mount, then the runtime echoes the initial location
{"key":"default","pathname":"/library","action":"POP"}
{"key":"default","pathname":"/library","search":"?tab=2","action":"POP"}
{"key":"k2","pathname":"/manga/5","action":"PUSH"}
{"key":"k3","url":"https://manatan.local/manga/5/chapter/1?page=3","action":"PUSH"}
{"key":"k4","pathname":"/manga/5/chapter/2","action":"REPLACE"}
{"key":"default","pathname":"/library","search":"?tab=2","action":"POP"}
{"key":"k5","pathname":"/updates","action":"PUSH"}
"#;

#[tokio::test]
async fn replays_a_session() {
    let mut replay = Replay::from_first_event();
    let mut snapshots = Vec::new();

    replay
        .run(SESSION.as_bytes(), |tracker| {
            snapshots.push(tracker.paths().join(" "));
            Ok(())
        })
        .await
        .unwrap();

    assert_eq!(
        snapshots,
        vec![
            "/library",
            "/library?tab=2",
            "/library?tab=2 /manga/5",
            "/library?tab=2 /manga/5 /manga/5/chapter/1?page=3",
            "/library?tab=2 /manga/5 /manga/5/chapter/2",
            "/library?tab=2",
            "/library?tab=2 /updates",
        ]
    );
    assert_eq!(replay.events(), 7);
    assert_eq!(
        replay.finish().unwrap().paths(),
        vec!["/library?tab=2", "/updates"]
    );
}

#[tokio::test]
async fn initial_location_makes_every_event_a_navigation() {
    let initial = Location::parse(DEFAULT_KEY, "/library").unwrap();
    let mut replay = Replay::with_initial(&initial);

    let events = concat!(
        r#"{"key":"k1","pathname":"/manga/1","action":"PUSH"}"#,
        "\n",
        r#"{"key":"k2","pathname":"/manga/2","action":"PUSH"}"#,
        "\n",
    );
    replay.run(events.as_bytes(), |_| Ok(())).await.unwrap();

    assert_eq!(
        replay.finish().unwrap().paths(),
        vec!["/library", "/manga/1", "/manga/2"]
    );
}

#[tokio::test]
async fn unknown_action_aborts_with_line_number() {
    let mut replay = Replay::from_first_event();
    let events = concat!(
        r#"{"key":"default","pathname":"/library","action":"POP"}"#,
        "\n",
        r#"{"key":"k1","pathname":"/manga/1","action":"FORWARD"}"#,
        "\n",
    );

    let err = replay.run(events.as_bytes(), |_| Ok(())).await.unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("line 2"), "{}", message);
    assert!(message.contains("Unexpected NavigationType \"FORWARD\""), "{}", message);
}

#[tokio::test]
async fn initial_echo_in_pathname_form_is_a_no_op() {
    for (initial, echo) in [
        ("/a/./b", r#"{"key":"default","pathname":"/a/./b","action":"POP"}"#),
        ("/library?", r#"{"key":"default","pathname":"/library","search":"?","action":"POP"}"#),
        (
            "https://manatan.local/manga/a b/../x?q=1",
            r#"{"key":"default","pathname":"/manga/a b/../x","search":"?q=1","action":"POP"}"#,
        ),
    ] {
        let mut replay = Replay::with_initial(&Location::parse(DEFAULT_KEY, initial).unwrap());
        let before = Location::parse(DEFAULT_KEY, initial).unwrap().path();
        let mut changes = 0;

        replay
            .run(echo.as_bytes(), |_| {
                changes += 1;
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(changes, 0, "{}", echo);
        assert_eq!(replay.finish().unwrap().paths(), vec![before.as_str()]);
    }
}
