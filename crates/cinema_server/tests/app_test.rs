mod common;

use cinema_core::Color;
use cinema_playback::RoomId;
use common::{HOLY_GRAIL, cinema, write_movie};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn unregistered_client_gets_no_reply() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (cinema, messenger) = cinema(dir.path(), 1.0);

    assert!(cinema.handle_message("stranger", "/play hackers").await.is_none());
    assert!(messenger.sent().is_empty());
}

#[tokio::test(start_paused = true)]
async fn install_registers_room() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (cinema, _messenger) = cinema(dir.path(), 1.0);

    cinema
        .install("client-1", "secret", RoomId::from("42"))
        .await
        .expect("install");
    assert_eq!(cinema.room_for("client-1"), Some(RoomId::from("42")));
    assert!(cinema.theater().is_installed(&RoomId::from("42")));
}

#[tokio::test(start_paused = true)]
async fn failed_authorization_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (cinema, _messenger) = cinema(dir.path(), 1.0);

    let result = cinema.install("client-1", "", RoomId::from("42")).await;
    assert!(result.is_err());
    assert_eq!(cinema.room_for("client-1"), None);
}

#[tokio::test(start_paused = true)]
async fn unknown_movie_lists_allowed_movies() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (cinema, messenger) = cinema(dir.path(), 1.0);
    cinema
        .install("client-1", "secret", RoomId::from("42"))
        .await
        .expect("install");

    let reply = cinema
        .handle_message("client-1", "/play gigli")
        .await
        .expect("reply");
    assert_eq!(reply.message(), "Allowed movies are [hackers, the_holy_grail]");
    assert_eq!(messenger.messages(), vec![reply.message().clone()]);
    assert_eq!(messenger.sent()[0].from(), "Hipchat Cinema");
}

#[tokio::test(start_paused = true)]
async fn play_confirms_then_narrates() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_movie(dir.path(), "the_holy_grail", HOLY_GRAIL);
    let (cinema, messenger) = cinema(dir.path(), 1.0);
    cinema
        .install("client-1", "secret", RoomId::from("42"))
        .await
        .expect("install");

    let reply = cinema
        .handle_message("client-1", "/play the_holy_grail")
        .await
        .expect("reply");
    assert_eq!(reply.message(), "Got it, now playing \"The Holy Grail\"");
    assert_eq!(*reply.color(), Color::Green);
    assert!(cinema.theater().is_playing(&RoomId::from("42")));

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(!cinema.theater().is_playing(&RoomId::from("42")));

    assert_eq!(
        messenger.messages(),
        vec![
            "Got it, now playing \"The Holy Grail\"",
            "<em>A bridge over the Gorge of Eternal Peril</em>",
            "What... is your name?",
            "It is Arthur, King of the Britons.",
            "<em>The Black Knight</em>",
            "'Tis but a scratch.",
        ]
    );
    let sent = messenger.sent();
    assert_eq!(sent[2].from(), "Bridgekeeper");
    assert_eq!(*sent[2].color(), Color::Yellow);
}

#[tokio::test(start_paused = true)]
async fn second_play_is_refused_while_playing() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_movie(dir.path(), "the_holy_grail", HOLY_GRAIL);
    write_movie(dir.path(), "hackers", "SCENE: Ellingson\nDade: Hack the planet!\n");
    let (cinema, _messenger) = cinema(dir.path(), 1.0);
    cinema
        .install("client-1", "secret", RoomId::from("42"))
        .await
        .expect("install");

    cinema
        .handle_message("client-1", "/play the_holy_grail")
        .await
        .expect("reply");
    let reply = cinema
        .handle_message("client-1", "/play hackers")
        .await
        .expect("reply");

    assert_eq!(reply.message(), "Movie is already playing!");
    assert_eq!(
        cinema.theater().now_playing(&RoomId::from("42")).as_deref(),
        Some("The Holy Grail")
    );
}

#[tokio::test(start_paused = true)]
async fn stop_replies_depend_on_state() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_movie(dir.path(), "the_holy_grail", HOLY_GRAIL);
    let (cinema, messenger) = cinema(dir.path(), 1.0);
    cinema
        .install("client-1", "secret", RoomId::from("42"))
        .await
        .expect("install");

    let idle = cinema.handle_message("client-1", "/stop").await.expect("reply");
    assert_eq!(idle.message(), "Movie is not playing!");

    cinema
        .handle_message("client-1", "/play the_holy_grail")
        .await
        .expect("reply");
    tokio::time::sleep(Duration::from_millis(500)).await;

    let stopped = cinema.handle_message("client-1", "/stop").await.expect("reply");
    assert_eq!(stopped.message(), "Movie stopped");
    assert!(!cinema.theater().is_playing(&RoomId::from("42")));

    let before = messenger.sent().len();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(messenger.sent().len(), before, "no lines after stop");
}

#[tokio::test(start_paused = true)]
async fn broken_script_replies_with_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_movie(dir.path(), "hackers", "Dade: no scene yet\n");
    let (cinema, _messenger) = cinema(dir.path(), 1.0);
    cinema
        .install("client-1", "secret", RoomId::from("42"))
        .await
        .expect("install");

    let reply = cinema
        .handle_message("client-1", "/play hackers")
        .await
        .expect("reply");
    assert_eq!(reply.message(), "Error parsing movie file!");
    assert_eq!(*reply.color(), Color::Red);
    assert!(!cinema.theater().is_playing(&RoomId::from("42")));
}

#[tokio::test(start_paused = true)]
async fn missing_script_replies_with_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (cinema, _messenger) = cinema(dir.path(), 1.0);
    cinema
        .install("client-1", "secret", RoomId::from("42"))
        .await
        .expect("install");

    let reply = cinema
        .handle_message("client-1", "/play hackers")
        .await
        .expect("reply");
    assert_eq!(reply.message(), "Error parsing movie file!");
}

#[tokio::test(start_paused = true)]
async fn unknown_command_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (cinema, _messenger) = cinema(dir.path(), 1.0);
    cinema
        .install("client-1", "secret", RoomId::from("42"))
        .await
        .expect("install");

    let reply = cinema
        .handle_message("client-1", "/rewind")
        .await
        .expect("reply");
    assert_eq!(reply.message(), "Unknown command: /rewind");
}

#[tokio::test(start_paused = true)]
async fn uninstall_forgets_client_and_stops_movie() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_movie(dir.path(), "the_holy_grail", HOLY_GRAIL);
    let (cinema, _messenger) = cinema(dir.path(), 1.0);
    cinema
        .install("client-1", "secret", RoomId::from("42"))
        .await
        .expect("install");
    cinema
        .handle_message("client-1", "/play the_holy_grail")
        .await
        .expect("reply");

    assert!(cinema.uninstall("client-1"));
    assert!(!cinema.uninstall("client-1"));
    assert!(!cinema.theater().is_installed(&RoomId::from("42")));
    assert!(cinema.handle_message("client-1", "/stop").await.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn simultaneous_plays_confirm_only_once() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_movie(dir.path(), "the_holy_grail", HOLY_GRAIL);
    write_movie(dir.path(), "hackers", "SCENE: Ellingson\nDade: Hack the planet!\n");
    let (cinema, messenger) = cinema(dir.path(), 1.0);
    cinema
        .install("client-1", "secret", RoomId::from("42"))
        .await
        .expect("install");

    let (first, second) = tokio::join!(
        cinema.handle_message("client-1", "/play the_holy_grail"),
        cinema.handle_message("client-1", "/play hackers"),
    );
    let replies = [first.expect("reply"), second.expect("reply")];

    let accepted: Vec<_> = replies
        .iter()
        .filter(|r| r.message().starts_with("Got it"))
        .collect();
    let refused = replies
        .iter()
        .filter(|r| r.message() == "Movie is already playing!")
        .count();
    assert_eq!(accepted.len(), 1);
    assert_eq!(refused, 1);

    let messages = messenger.messages();
    let confirmations = messages.iter().filter(|m| m.starts_with("Got it")).count();
    assert_eq!(confirmations, 1, "room was told: {messages:?}");
    let confirmed_at = messages
        .iter()
        .position(|m| m == accepted[0].message())
        .expect("confirmation sent");
    if let Some(first_intro) = messages.iter().position(|m| m.starts_with("<em>")) {
        assert!(confirmed_at < first_intro, "confirmation precedes the movie");
    }

    let playing = cinema
        .theater()
        .now_playing(&RoomId::from("42"))
        .expect("one movie is playing");
    assert!(accepted[0].message().contains(&playing));

    cinema.handle_message("client-1", "/stop").await.expect("reply");
}

#[tokio::test(start_paused = true)]
async fn reinstall_into_new_room_releases_old_room() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_movie(dir.path(), "the_holy_grail", HOLY_GRAIL);
    let (cinema, messenger) = cinema(dir.path(), 1.0);
    cinema
        .install("client-1", "secret", RoomId::from("42"))
        .await
        .expect("install");
    cinema
        .handle_message("client-1", "/play the_holy_grail")
        .await
        .expect("reply");
    tokio::time::sleep(Duration::from_millis(500)).await;

    cinema
        .install("client-1", "secret", RoomId::from("43"))
        .await
        .expect("reinstall");

    assert_eq!(cinema.room_for("client-1"), Some(RoomId::from("43")));
    assert!(!cinema.theater().is_installed(&RoomId::from("42")));
    assert!(!cinema.theater().is_playing(&RoomId::from("42")));
    assert_eq!(cinema.theater().rooms(), vec![RoomId::from("43")]);

    let before = messenger.sent().len();
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(messenger.sent().len(), before, "old run keeps quiet");
}

#[tokio::test(start_paused = true)]
async fn shared_room_survives_one_client_moving() {
    let dir = tempfile::tempdir().expect("temp dir");
    let (cinema, _messenger) = cinema(dir.path(), 1.0);
    cinema
        .install("client-1", "secret", RoomId::from("42"))
        .await
        .expect("install");
    cinema
        .install("client-2", "secret", RoomId::from("42"))
        .await
        .expect("install");

    cinema
        .install("client-1", "secret", RoomId::from("43"))
        .await
        .expect("reinstall");

    assert!(cinema.theater().is_installed(&RoomId::from("42")));
    assert!(cinema.theater().is_installed(&RoomId::from("43")));
}
