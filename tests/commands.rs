//! End-to-end protocol scenarios, driving the engine over an in-process
//! `tokio::io::duplex` pair against the in-memory reference collaborators.

use std::sync::Arc;

use postus::collaborators::persistence::{Persistence, PostingMode};
use postus::identifiers::NewsgroupName;
use postus::mem::{MemIdentity, MemPersistence, MemPolicy};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

type Client = (
    BufReader<tokio::io::DuplexStream>,
    tokio::io::DuplexStream,
    Arc<MemPersistence>,
);

async fn spawn_session() -> Client {
    spawn_session_with_policy(MemPolicy::new()).await
}

async fn spawn_session_with_policy(policy: MemPolicy) -> Client {
    let (client, server) = tokio::io::duplex(8192);
    let persistence = Arc::new(MemPersistence::new());
    let identity = Arc::new(MemIdentity::new("test.example"));
    let policy = Arc::new(policy);

    let persistence_for_engine = persistence.clone();
    tokio::spawn(async move {
        let (read_half, write_half) = tokio::io::split(server);
        let mut framing = postus::Framing::new(BufReader::new(read_half), write_half);
        let _ = postus::engine::run(
            &mut framing,
            persistence_for_engine,
            identity,
            policy,
            "test",
            None,
        )
        .await;
    });

    let (read_half, write_half) = tokio::io::split(client);
    (BufReader::new(read_half), write_half, persistence)
}

async fn read_line(reader: &mut BufReader<tokio::io::DuplexStream>) -> String {
    let mut line = String::new();
    reader.read_line(&mut line).await.unwrap();
    line.trim_end_matches(['\r', '\n']).to_string()
}

async fn read_until_dot(reader: &mut BufReader<tokio::io::DuplexStream>) -> Vec<String> {
    let mut lines = Vec::new();
    loop {
        let line = read_line(reader).await;
        if line == "." {
            break;
        }
        lines.push(line);
    }
    lines
}

#[tokio::test]
async fn greeting_then_quit() {
    let (mut reader, mut writer) = spawn_session().await;
    let greeting = read_line(&mut reader).await;
    assert!(greeting.starts_with("200 Postus 0.7"));

    writer.write_all(b"QUIT\r\n").await.unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("205"));
}

#[tokio::test]
async fn group_selection_and_navigation_over_the_bootstrap_log_group() {
    let (mut reader, mut writer) = spawn_session().await;
    read_line(&mut reader).await; // greeting

    // The startup bootstrap (§6.5) always leaves exactly one article in
    // `local.nntp.<server>.log`, so this group is a reliable fixture for
    // exercising GROUP/STAT/NEXT without needing a prior POST.
    writer
        .write_all(b"GROUP local.nntp.test.log\r\n")
        .await
        .unwrap();
    let reply = read_line(&mut reader).await;
    assert_eq!(reply, "211 1 1 1 local.nntp.test.log");

    writer.write_all(b"STAT\r\n").await.unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("223 1 "));

    // NEXT has nothing past article 1, so it must report 421 rather than
    // moving the cursor.
    writer.write_all(b"NEXT\r\n").await.unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("421"));

    writer.write_all(b"QUIT\r\n").await.unwrap();
    let _ = read_line(&mut reader).await;
}

#[tokio::test]
async fn article_lookup_by_message_id_does_not_move_the_cursor() {
    let (mut reader, mut writer) = spawn_session().await;
    read_line(&mut reader).await; // greeting

    writer
        .write_all(b"GROUP local.nntp.test.log\r\n")
        .await
        .unwrap();
    let _ = read_line(&mut reader).await;

    writer.write_all(b"STAT\r\n").await.unwrap();
    let reply = read_line(&mut reader).await;
    let message_id = reply.rsplit(' ').next().unwrap().to_string();

    // Looking the same article up again by its message-id must not change
    // what STAT reports afterwards.
    writer
        .write_all(format!("HEAD {message_id}\r\n").as_bytes())
        .await
        .unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("221 0 "));
    let _ = read_until_dot(&mut reader).await;

    writer.write_all(b"STAT\r\n").await.unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("223 1 "));

    writer.write_all(b"QUIT\r\n").await.unwrap();
    let _ = read_line(&mut reader).await;
}

#[tokio::test]
async fn capabilities_and_help_and_date() {
    let (mut reader, mut writer) = spawn_session().await;
    read_line(&mut reader).await; // greeting

    writer.write_all(b"DATE\r\n").await.unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("111 "));
    assert_eq!(reply.len(), "111 20260101000000".len());

    writer.write_all(b"CAPABILITIES\r\n").await.unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("101"));
    let lines = read_until_dot(&mut reader).await;
    assert_eq!(lines[0], "VERSION 2");
    assert!(lines.contains(&"POST".to_string()));
    assert!(lines.contains(&"QUIT".to_string()));

    writer.write_all(b"HELP\r\n").await.unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("100"));
    let lines = read_until_dot(&mut reader).await;
    assert!(lines.contains(&"QUIT".to_string()));

    writer.write_all(b"QUIT\r\n").await.unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("205"));
}

#[tokio::test]
async fn list_active_includes_bootstrap_log_group() {
    let (mut reader, mut writer) = spawn_session().await;
    read_line(&mut reader).await; // greeting

    writer.write_all(b"LIST\r\n").await.unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("215"));
    let lines = read_until_dot(&mut reader).await;
    // The bootstrap group is Prohibited-mode and therefore not ignored, so
    // it shows up in LIST ACTIVE like any other group.
    assert!(lines.iter().any(|l| l.starts_with("local.nntp.test.log")));

    writer.write_all(b"QUIT\r\n").await.unwrap();
    let _ = read_line(&mut reader).await;
}

#[tokio::test]
async fn newnews_with_no_matching_groups_returns_empty_block() {
    let (mut reader, mut writer) = spawn_session().await;
    read_line(&mut reader).await; // greeting

    writer
        .write_all(b"NEWNEWS nonexistent.* 19990101 000000 GMT\r\n")
        .await
        .unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("230"));
    let lines = read_until_dot(&mut reader).await;
    assert!(lines.is_empty());

    writer.write_all(b"QUIT\r\n").await.unwrap();
    let _ = read_line(&mut reader).await;
}

#[tokio::test]
async fn post_rejected_when_policy_denies_posting() {
    let mut policy = MemPolicy::new();
    policy.set_posting_allowed(false);
    let (mut reader, mut writer) = spawn_session_with_policy(policy).await;

    let greeting = read_line(&mut reader).await;
    assert!(greeting.starts_with("201"));

    writer.write_all(b"POST\r\n").await.unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("440"));

    writer.write_all(b"QUIT\r\n").await.unwrap();
    let _ = read_line(&mut reader).await;
}

#[tokio::test]
async fn ihave_with_matching_header_and_unknown_id_succeeds() {
    let (mut reader, mut writer) = spawn_session().await;
    read_line(&mut reader).await; // greeting

    writer
        .write_all(b"IHAVE <fresh@example.com>\r\n")
        .await
        .unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("335"));

    let article = "Newsgroups: local.nntp.test.log\r\n\
        Subject: hello\r\n\
        From: a@b\r\n\
        Date: Mon, 01 Jan 2026 00:00:00 GMT\r\n\
        Path: test.example!not-for-email\r\n\
        Message-ID: <fresh@example.com>\r\n\
        \r\n\
        body text\r\n\
        .\r\n";
    writer.write_all(article.as_bytes()).await.unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("235"));

    // The same id arriving again is now known, so it is refused outright.
    writer
        .write_all(b"IHAVE <fresh@example.com>\r\n")
        .await
        .unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("435"));

    writer.write_all(b"QUIT\r\n").await.unwrap();
    let _ = read_line(&mut reader).await;
}

#[tokio::test]
async fn ihave_with_mismatched_message_id_is_rejected() {
    let (mut reader, mut writer) = spawn_session().await;
    read_line(&mut reader).await; // greeting

    writer
        .write_all(b"IHAVE <claimed@example.com>\r\n")
        .await
        .unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("335"));

    let article = "Newsgroups: local.nntp.test.log\r\n\
        Subject: hello\r\n\
        From: a@b\r\n\
        Date: Mon, 01 Jan 2026 00:00:00 GMT\r\n\
        Path: test.example!not-for-email\r\n\
        Message-ID: <different@example.com>\r\n\
        \r\n\
        body text\r\n\
        .\r\n";
    writer.write_all(article.as_bytes()).await.unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("437"));

    writer.write_all(b"QUIT\r\n").await.unwrap();
    let _ = read_line(&mut reader).await;
}

#[tokio::test]
async fn unknown_command_closes_connection_after_500() {
    let (mut reader, mut writer) = spawn_session().await;
    read_line(&mut reader).await; // greeting

    writer.write_all(b"BOGUS\r\n").await.unwrap();
    let reply = read_line(&mut reader).await;
    assert!(reply.starts_with("500"));
}
