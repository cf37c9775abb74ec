use crate::utils::logged_in_client;
use crate::utils::send;
use hyper::Body;
use hyper::Request;
use mission_control_client::domain::mission_model::MissionStatus;
use mission_control_client::error::MissionControlError;
use serde_json::json;

#[tokio::test]
async fn created_mission_should_be_pending() {
    let (app, _) = logged_in_client().await;
    let ada = app
        .astronauts
        .create("Ada", "ada@paisa.com")
        .await
        .expect("could not create astronaut");

    let mission = app
        .missions
        .create_mission(ada.id, "Lunar survey", Some("Map the south pole"))
        .await
        .expect("could not create mission");

    assert_eq!(mission.title, "Lunar survey");
    assert_eq!(mission.description.as_deref(), Some("Map the south pole"));
    assert_eq!(mission.status, MissionStatus::Pending);
    assert_eq!(mission.astronaut_id, ada.id);

    let missions = app
        .missions
        .list_missions(ada.id)
        .await
        .expect("could not list missions");
    assert_eq!(missions, vec![mission]);
}

#[tokio::test]
async fn blank_description_should_be_sent_as_absent() {
    let (app, _) = logged_in_client().await;
    let ada = app
        .astronauts
        .create("Ada", "ada@paisa.com")
        .await
        .expect("could not create astronaut");

    let mission = app
        .missions
        .create_mission(ada.id, "Dock", Some("   "))
        .await
        .expect("could not create mission");

    assert_eq!(mission.description, None);
}

#[tokio::test]
async fn missions_of_a_missing_astronaut_should_404() {
    let (app, _) = logged_in_client().await;

    assert!(matches!(
        app.missions.create_mission(404, "Nowhere", None).await,
        Err(MissionControlError::Rejected { status: 404, .. })
    ));
    assert!(matches!(
        app.missions.list_missions(404).await,
        Err(MissionControlError::Rejected { status: 404, .. })
    ));
}

#[tokio::test]
async fn deleting_an_astronaut_should_drop_its_missions() {
    let (app, base_url) = logged_in_client().await;
    let ada = app
        .astronauts
        .create("Ada", "ada@paisa.com")
        .await
        .expect("could not create astronaut");
    let mission = app
        .missions
        .create_mission(ada.id, "Lunar survey", None)
        .await
        .expect("could not create mission");

    app.astronauts
        .delete(ada.id)
        .await
        .expect("could not delete astronaut");

    let token = app.session().get_token().expect("no token stored");
    let req = Request::delete(format!("{}/missions/{}", base_url, mission.id))
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .expect("issue creating request");
    let (status, body) = send(req).await;

    assert_eq!(status, 404);
    assert_eq!(body["detail"], "Mission not found");
}

#[tokio::test]
async fn mission_status_should_change_through_the_api() {
    let (app, base_url) = logged_in_client().await;
    let ada = app
        .astronauts
        .create("Ada", "ada@paisa.com")
        .await
        .expect("could not create astronaut");
    let mission = app
        .missions
        .create_mission(ada.id, "Lunar survey", None)
        .await
        .expect("could not create mission");

    let token = app.session().get_token().expect("no token stored");
    let req = Request::put(format!("{}/missions/{}", base_url, mission.id))
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {}", token))
        .body(Body::from(
            json!({
                "title": "Lunar survey",
                "description": "Map the south pole",
                "status": "In Progress"
            })
            .to_string(),
        ))
        .expect("issue creating request");
    let (status, body) = send(req).await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "In Progress");

    let missions = app
        .missions
        .list_missions(ada.id)
        .await
        .expect("could not list missions");
    assert_eq!(missions[0].status, MissionStatus::InProgress);
    assert_eq!(missions[0].description.as_deref(), Some("Map the south pole"));
}
