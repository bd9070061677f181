//! Integration tests for the REST client against a local fake backend

mod common;

use learnit::api::{ApiError, GamificationApi, HttpGamificationApi};
use learnit::config::ApiSettings;

use common::spawn_backend;

fn client(base_url: &str, token: &str) -> HttpGamificationApi {
    HttpGamificationApi::new(&ApiSettings {
        base_url: base_url.to_string(),
        token: token.to_string(),
        ..Default::default()
    })
}

#[tokio::test]
async fn test_fetch_stats_sends_bearer_token() {
    let body = r#"{
        "success": true,
        "data": {
            "xp": 450,
            "level": 3,
            "currentStreak": 2,
            "longestStreak": 9,
            "badges": [
                {"id": "first-lesson", "name": "First Steps", "description": "", "icon": "🎯"},
                {"id": "first-lesson", "name": "First Steps", "description": "", "icon": "🎯"}
            ],
            "totalLessonsCompleted": 12,
            "totalQuizzesTaken": 4
        }
    }"#;
    let (base_url, server) = spawn_backend(
        vec![("GET", "/gamification/stats", 200, body.to_string())],
        1,
    );

    let stats = client(&base_url, "abc123").fetch_stats().await.unwrap();
    assert_eq!(stats.xp, 450);
    assert_eq!(stats.level, 3);
    assert_eq!(stats.longest_streak, 9);
    assert_eq!(stats.total_lessons_completed, 12);
    // the client reports what the server sent; dedup happens in the store
    assert_eq!(stats.badges.len(), 2);

    let seen = server.join().unwrap();
    assert_eq!(seen[0].method, "GET");
    assert_eq!(seen[0].url, "/api/gamification/stats");
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer abc123"));
}

#[tokio::test]
async fn test_post_endpoints() {
    let streak = r#"{"success":true,"data":{"currentStreak":3,"newBadges":[{"id":"streak-3","name":"On Fire","description":"3 days","icon":"🔥"}]}}"#;
    let lesson = r#"{"success":true,"data":{"xpEarned":50,"totalXP":550,"level":3,"newBadges":[]}}"#;
    let (base_url, server) = spawn_backend(
        vec![
            ("POST", "/gamification/update-streak", 200, streak.to_string()),
            ("POST", "/gamification/lesson-complete", 200, lesson.to_string()),
        ],
        2,
    );

    let api = client(&base_url, "");
    let update = api.update_streak().await.unwrap();
    assert_eq!(update.current_streak, 3);
    assert_eq!(update.new_badges[0].id, "streak-3");

    let completion = api.lesson_complete().await.unwrap();
    assert_eq!(completion.xp_earned, 50);
    assert_eq!(completion.total_xp, 550);

    let seen = server.join().unwrap();
    assert!(seen.iter().all(|r| r.method == "POST"));
    assert!(seen.iter().all(|r| r.authorization.is_none()));
}

#[tokio::test]
async fn test_leaderboard() {
    let body = r#"{"success":true,"data":[
        {"_id":"u1","name":"Ada","xp":2500,"level":6,"currentStreak":12,"badgeCount":8},
        {"_id":"u2","name":"Linus","xp":900,"level":4}
    ]}"#;
    let (base_url, server) = spawn_backend(
        vec![("GET", "/gamification/leaderboard", 200, body.to_string())],
        1,
    );

    let entries = client(&base_url, "t").leaderboard().await.unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].name, "Ada");
    assert_eq!(entries[1].badge_count, 0);
    server.join().unwrap();
}

#[tokio::test]
async fn test_http_error_status_is_reported() {
    let (base_url, server) = spawn_backend(
        vec![(
            "GET",
            "/gamification/stats",
            401,
            r#"{"success":false,"message":"Not authorized, token failed"}"#.to_string(),
        )],
        1,
    );

    let err = client(&base_url, "expired").fetch_stats().await.unwrap_err();
    match &err {
        ApiError::Status {
            status, message, ..
        } => {
            assert_eq!(*status, 401);
            assert_eq!(message, "Not authorized, token failed");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.is_unauthorized());
    server.join().unwrap();
}

#[tokio::test]
async fn test_success_false_is_rejected() {
    let (base_url, server) = spawn_backend(
        vec![(
            "POST",
            "/gamification/lesson-complete",
            200,
            r#"{"success":false,"message":"Lesson already completed"}"#.to_string(),
        )],
        1,
    );

    let err = client(&base_url, "t").lesson_complete().await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { .. }));
    assert!(err.to_string().contains("Lesson already completed"));
    server.join().unwrap();
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // bind and drop to get a port nobody listens on
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let err = client(&format!("http://127.0.0.1:{port}/api"), "")
        .fetch_stats()
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
}
