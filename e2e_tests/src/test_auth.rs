use crate::utils::logged_in_client;
use crate::utils::send;
use crate::utils::start_server;
use crate::utils::ADMIN_EMAIL;
use crate::utils::ADMIN_NAME;
use crate::utils::ADMIN_PASSWORD;
use hyper::Body;
use hyper::Request;
use mission_control_client::error::MissionControlError;
use mission_control_client::providers::session::SessionStoreImpl;
use mission_control_client::MissionControl;
use serde_json::json;

#[tokio::test]
async fn root_should_report_the_api_is_running() {
    let base_url = start_server();

    let req = Request::get(format!("{}/", base_url))
        .body(Body::empty())
        .expect("issue creating request");
    let (status, body) = send(req).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "status": "API is running" }));
}

#[tokio::test]
async fn login_should_store_a_token_that_lists_astronauts() {
    let base_url = start_server();
    let app = MissionControl::new(&base_url, SessionStoreImpl::in_memory());

    app.auth
        .register(ADMIN_NAME, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("could not register admin");
    assert!(!app.auth.is_authenticated());

    app.auth
        .login(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("could not log in admin");
    assert!(app.auth.is_authenticated());

    let astronauts = app.astronauts.list().await.expect("could not list astronauts");
    assert!(astronauts.is_empty());
}

#[tokio::test]
async fn wrong_password_should_be_rejected_without_touching_the_session() {
    let base_url = start_server();
    let app = MissionControl::new(&base_url, SessionStoreImpl::in_memory());
    app.auth
        .register(ADMIN_NAME, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("could not register admin");
    app.auth
        .login(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("could not log in admin");

    match app.auth.login(ADMIN_EMAIL, "not-the-password").await {
        Err(MissionControlError::Rejected { status, detail }) => {
            assert_eq!(status, 401);
            assert_eq!(detail, "Incorrect username or password");
        }
        other => panic!("expected a rejected login, got {:?}", other.err()),
    }
    assert!(app.auth.is_authenticated());
}

#[tokio::test]
async fn duplicate_registration_should_be_rejected() {
    let base_url = start_server();
    let app = MissionControl::new(&base_url, SessionStoreImpl::in_memory());
    app.auth
        .register(ADMIN_NAME, ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("could not register admin");

    match app.auth.register("Someone Else", ADMIN_EMAIL, "other").await {
        Err(MissionControlError::Rejected { status, detail }) => {
            assert_eq!(status, 400);
            assert_eq!(detail, "Email already registered");
        }
        other => panic!("expected a rejected registration, got {:?}", other.err()),
    }
}

#[tokio::test]
async fn token_endpoint_should_answer_401_with_a_bearer_challenge() {
    let base_url = start_server();

    let req = Request::post(format!("{}/token", base_url))
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from("username=nobody%40paisa.com&password=x"))
        .expect("issue creating request");
    let res = hyper::Client::new()
        .request(req)
        .await
        .expect("error in response");

    assert_eq!(res.status(), 401);
    assert_eq!(
        res.headers()
            .get("www-authenticate")
            .and_then(|v| v.to_str().ok()),
        Some("Bearer")
    );
}

#[tokio::test]
async fn rejected_token_should_clear_the_session() {
    let base_url = start_server();
    let session = SessionStoreImpl::in_memory();
    session
        .set_token("forged.token.value")
        .expect("could not set token");
    let app = MissionControl::new(&base_url, session);

    assert!(matches!(
        app.astronauts.list().await,
        Err(MissionControlError::Unauthorized)
    ));
    assert!(!app.auth.is_authenticated());

    // no token left, so this one never reaches the server
    assert!(matches!(
        app.astronauts.create("Ada", "ada@paisa.com").await,
        Err(MissionControlError::Unauthorized)
    ));
}

#[tokio::test]
async fn rejected_token_should_clear_the_session_on_every_authenticated_call() {
    let (app, _) = logged_in_client().await;
    let ada = app
        .astronauts
        .create("Ada", "ada@paisa.com")
        .await
        .expect("could not create astronaut");
    let forge = || {
        app.session()
            .set_token("forged.token.value")
            .expect("could not set token")
    };

    forge();
    assert!(matches!(
        app.astronauts.create("Grace", "grace@paisa.com").await,
        Err(MissionControlError::Unauthorized)
    ));
    assert!(!app.auth.is_authenticated());

    forge();
    assert!(matches!(
        app.astronauts.update(ada.id, "Ada", "lovelace@paisa.com").await,
        Err(MissionControlError::Unauthorized)
    ));
    assert!(!app.auth.is_authenticated());

    forge();
    assert!(matches!(
        app.astronauts.delete(ada.id).await,
        Err(MissionControlError::Unauthorized)
    ));
    assert!(!app.auth.is_authenticated());

    forge();
    assert!(matches!(
        app.missions.list_missions(ada.id).await,
        Err(MissionControlError::Unauthorized)
    ));
    assert!(!app.auth.is_authenticated());

    forge();
    assert!(matches!(
        app.missions.create_mission(ada.id, "Lunar survey", None).await,
        Err(MissionControlError::Unauthorized)
    ));
    assert!(!app.auth.is_authenticated());

    // none of the forged calls got through
    app.auth
        .login(ADMIN_EMAIL, ADMIN_PASSWORD)
        .await
        .expect("could not log in admin");
    let astronauts = app.astronauts.list().await.expect("could not list astronauts");
    assert_eq!(astronauts.len(), 1);
    assert_eq!(astronauts[0].email, "ada@paisa.com");
    assert!(astronauts[0].missions.is_empty());
}
