use crate::utils::logged_in_client;
use crate::utils::send;
use futures::future::join_all;
use hyper::Body;
use hyper::Request;
use mission_control_client::error::MissionControlError;
use mission_control_client::providers::api::GENERIC_FAILURE_DETAIL;
use mission_control_client::providers::session::SessionStoreImpl;
use mission_control_client::MissionControl;
use std::collections::HashSet;

#[tokio::test]
async fn created_astronaut_should_appear_in_the_list() {
    let (app, _) = logged_in_client().await;

    let created = app
        .astronauts
        .create("Ada", "ada@paisa.com")
        .await
        .expect("could not create astronaut");
    assert!(app.astronauts.is_stale());

    let astronauts = app.astronauts.list().await.expect("could not list astronauts");
    assert!(!app.astronauts.is_stale());
    assert_eq!(astronauts.len(), 1);
    assert_eq!(astronauts[0].id, created.id);
    assert_eq!(astronauts[0].name, "Ada");
    assert_eq!(astronauts[0].email, "ada@paisa.com");
    assert!(astronauts[0].missions.is_empty());
    assert_eq!(app.astronauts.astronauts(), astronauts);
}

#[tokio::test]
async fn update_then_delete_should_be_reflected_by_list() {
    let (app, _) = logged_in_client().await;
    let ada = app
        .astronauts
        .create("Ada", "ada@paisa.com")
        .await
        .expect("could not create astronaut");

    app.astronauts
        .update(ada.id, "Ada Lovelace", "lovelace@paisa.com")
        .await
        .expect("could not update astronaut");
    let astronauts = app.astronauts.list().await.expect("could not list astronauts");
    assert_eq!(astronauts.len(), 1);
    assert_eq!(astronauts[0].name, "Ada Lovelace");
    assert_eq!(astronauts[0].email, "lovelace@paisa.com");

    app.astronauts
        .delete(ada.id)
        .await
        .expect("could not delete astronaut");
    assert!(app
        .astronauts
        .list()
        .await
        .expect("could not list astronauts")
        .is_empty());
}

#[tokio::test]
async fn deleting_a_missing_astronaut_should_404_and_keep_the_list() {
    let (app, _) = logged_in_client().await;
    app.astronauts
        .create("Ada", "ada@paisa.com")
        .await
        .expect("could not create astronaut");
    let before = app.astronauts.list().await.expect("could not list astronauts");

    match app.astronauts.delete(9999).await {
        Err(MissionControlError::Rejected { status, detail }) => {
            assert_eq!(status, 404);
            assert_eq!(detail, "Astronaut not found");
        }
        other => panic!("expected a rejected delete, got {:?}", other.err()),
    }

    let after = app.astronauts.list().await.expect("could not list astronauts");
    assert_eq!(before, after);
    assert!(app.auth.is_authenticated());
}

#[tokio::test]
async fn show_should_include_the_astronaut_missions() {
    let (app, _) = logged_in_client().await;
    let ada = app
        .astronauts
        .create("Ada", "ada@paisa.com")
        .await
        .expect("could not create astronaut");
    app.missions
        .create_mission(ada.id, "Lunar survey", None)
        .await
        .expect("could not create mission");

    let fetched = app.astronauts.get(ada.id).await.expect("could not get astronaut");

    assert_eq!(fetched.missions.len(), 1);
    assert_eq!(fetched.missions[0].title, "Lunar survey");
}

#[tokio::test]
async fn duplicate_astronaut_email_should_be_rejected() {
    let (app, _) = logged_in_client().await;
    app.astronauts
        .create("Ada", "ada@paisa.com")
        .await
        .expect("could not create astronaut");

    assert!(matches!(
        app.astronauts.create("Other Ada", "ada@paisa.com").await,
        Err(MissionControlError::Rejected { status: 400, .. })
    ));
}

#[tokio::test]
async fn astronaut_routes_should_401_without_a_bearer() {
    let (_, base_url) = logged_in_client().await;

    let req = Request::get(format!("{}/astronauts/", base_url))
        .body(Body::empty())
        .expect("issue creating request");
    let (status, body) = send(req).await;

    assert_eq!(status, 401);
    assert_eq!(body["detail"], "Not authenticated");
}

#[tokio::test]
async fn concurrent_creates_should_get_distinct_ids() {
    const OPERATIONS: usize = 50;
    let (app, base_url) = logged_in_client().await;
    let token = app.session().get_token().expect("no token stored");

    let futures = (0..OPERATIONS).map(|i| {
        let base_url = base_url.clone();
        let token = token.clone();
        async move {
            let req = Request::post(format!("{}/astronauts/", base_url))
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {}", token))
                .body(Body::from(format!(
                    r#"{{ "name": "astro_{i:0>4}", "email": "astro_{i:0>4}@paisa.com" }}"#,
                )))
                .expect("issue creating request");
            let (status, body) = send(req).await;
            assert_eq!(status, 201);
            body["id"].as_i64().expect("created astronaut has no id")
        }
    });

    let ids: HashSet<i64> = join_all(futures).await.into_iter().collect();
    assert_eq!(ids.len(), OPERATIONS);

    let astronauts = app.astronauts.list().await.expect("could not list astronauts");
    assert_eq!(astronauts.len(), OPERATIONS);
}

#[tokio::test]
async fn updating_a_missing_astronaut_should_404() {
    let (app, _) = logged_in_client().await;

    match app.astronauts.update(9999, "Ada", "ada@paisa.com").await {
        Err(MissionControlError::Rejected { status, detail }) => {
            assert_eq!(status, 404);
            assert_eq!(detail, "Astronaut not found");
        }
        other => panic!("expected a rejected update, got {:?}", other.err()),
    }
    assert!(!app.astronauts.is_stale());
}

#[tokio::test]
async fn non_401_list_failure_should_be_a_failed_fetch() {
    let (app, base_url) = logged_in_client().await;
    app.astronauts
        .create("Ada", "ada@paisa.com")
        .await
        .expect("could not create astronaut");
    let listed = app.astronauts.list().await.expect("could not list astronauts");

    // a client pointed below the api root gets 404 for every route
    let token = app.session().get_token().expect("no token stored");
    let session = SessionStoreImpl::in_memory();
    session.set_token(&token).expect("could not set token");
    let misplaced = MissionControl::new(&format!("{}/v2", base_url), session);

    match misplaced.astronauts.list().await {
        Err(MissionControlError::FetchFailed { status, detail }) => {
            assert_eq!(status, 404);
            assert_eq!(detail, GENERIC_FAILURE_DETAIL);
        }
        other => panic!("expected a failed fetch, got {:?}", other.err()),
    }
    assert!(misplaced.astronauts.astronauts().is_empty());
    assert!(misplaced.auth.is_authenticated());
    assert_eq!(app.astronauts.astronauts(), listed);
}
