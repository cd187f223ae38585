use actix_web::{post, test, web, App, HttpRequest, HttpResponse};
use chrono::{Duration, NaiveDate, Utc};
use pretty_assertions::assert_eq;
use serde_json::json;
use sprintboard::models::{Sprint, Task, TaskInput, TaskStatus, User};
use sprintboard::representers::{
    Directory, SprintRepresenter, TaskRepresenter, UserRepresenter, WriteMode,
};
use sprintboard::{AppError, Config, LinkBuilder};
use uuid::Uuid;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config() -> Config {
    Config {
        channel_server_host: "chat.example.com".to_string(),
        secure_channel: true,
        api_root: "/api".to_string(),
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

struct Board {
    sprints: Vec<Sprint>,
    users: Vec<User>,
}

impl Directory for Board {
    fn sprint(&self, id: Uuid) -> Option<Sprint> {
        self.sprints.iter().find(|s| s.id == id).cloned()
    }

    fn user_exists(&self, username: &str) -> bool {
        self.users.iter().any(|u| u.username == username)
    }
}

fn board() -> Board {
    Board {
        sprints: vec![
            Sprint {
                id: Uuid::new_v4(),
                name: "Current".to_string(),
                description: String::new(),
                end: today() + Duration::days(7),
            },
            Sprint {
                id: Uuid::new_v4(),
                name: "Finished".to_string(),
                description: String::new(),
                end: today() - Duration::days(7),
            },
        ],
        users: vec![User {
            id: 1,
            username: "alice".to_string(),
            first_name: "Alice".to_string(),
            last_name: String::new(),
            is_active: true,
        }],
    }
}

#[::core::prelude::v1::test]
fn test_user_wire_shape() {
    init_logging();
    let links = LinkBuilder::new("https://board.example.com", &config());
    let board = board();

    let value = serde_json::to_value(UserRepresenter::render(&board.users[0], &links)).unwrap();

    assert_eq!(
        value,
        json!({
            "id": 1,
            "username": "alice",
            "full_name": "Alice",
            "is_active": true,
            "links": {
                "self": "https://board.example.com/api/users/alice/",
                "tasks": "https://board.example.com/api/tasks/?assigned=alice"
            }
        })
    );
}

#[::core::prelude::v1::test]
fn test_sprint_wire_shape() {
    init_logging();
    let links = LinkBuilder::new("https://board.example.com", &config());
    let sprint = Sprint {
        id: Uuid::new_v4(),
        name: "Sprint 4".to_string(),
        description: "Polish".to_string(),
        end: NaiveDate::from_ymd_opt(2030, 1, 31).unwrap(),
    };

    let value = serde_json::to_value(SprintRepresenter::render(&sprint, &links)).unwrap();

    assert_eq!(
        value,
        json!({
            "id": sprint.id,
            "name": "Sprint 4",
            "description": "Polish",
            "end": "2030-01-31",
            "links": {
                "self": format!("https://board.example.com/api/sprints/{}/", sprint.id),
                "tasks": format!("https://board.example.com/api/tasks/?sprint={}", sprint.id),
                "channel": format!("wss://chat.example.com/{}", sprint.id)
            }
        })
    );
}

#[::core::prelude::v1::test]
fn test_task_wire_shape() {
    init_logging();
    let links = LinkBuilder::new("https://board.example.com", &config());
    let board = board();
    let sprint = &board.sprints[0];
    let task = Task {
        id: Uuid::new_v4(),
        name: "Ship it".to_string(),
        description: String::new(),
        sprint: Some(sprint.id),
        status: TaskStatus::Done,
        order: 3,
        assigned: Some("alice".to_string()),
        started: NaiveDate::from_ymd_opt(2030, 1, 2),
        due: None,
        completed: NaiveDate::from_ymd_opt(2030, 1, 5),
    };

    let value = serde_json::to_value(TaskRepresenter::render(&task, &links)).unwrap();

    assert_eq!(
        value,
        json!({
            "id": task.id,
            "name": "Ship it",
            "description": "",
            "sprint": sprint.id,
            "status": 4,
            "order": 3,
            "assigned": "alice",
            "started": "2030-01-02",
            "due": null,
            "completed": "2030-01-05",
            "links": {
                "self": format!("https://board.example.com/api/tasks/{}/", task.id),
                "sprint": format!("https://board.example.com/api/sprints/{}/", sprint.id),
                "assigned": "https://board.example.com/api/users/alice/"
            },
            "status_display": "Done"
        })
    );
}

#[::core::prelude::v1::test]
fn test_sprint_end_relative_to_today() {
    init_logging();
    let yesterday = today() - Duration::days(1);

    assert!(SprintRepresenter::validate_end(yesterday, None, today()).is_err());
    assert!(SprintRepresenter::validate_end(today(), None, today()).is_ok());
}

#[::core::prelude::v1::test]
fn test_task_payload_from_json() {
    init_logging();
    let board = board();
    let current = &board.sprints[0];

    let input: TaskInput = serde_json::from_value(json!({
        "name": "Review",
        "sprint": current.id,
        "status": 2,
        "assigned": "alice",
        "started": today()
    }))
    .unwrap();
    let attrs = TaskRepresenter::deserialize(input, WriteMode::Create, &board, today()).unwrap();
    assert_eq!(attrs.sprint, Some(Some(current.clone())));

    let input: TaskInput = serde_json::from_value(json!({
        "name": "Review",
        "sprint": null,
        "status": 2
    }))
    .unwrap();
    let err = TaskRepresenter::deserialize(input, WriteMode::Create, &board, today()).unwrap_err();
    assert_eq!(err.field, "non_field_errors");
    assert_eq!(err.message, "Backlog tasks must have not started status");
}

#[::core::prelude::v1::test]
fn test_done_task_moved_to_backlog_is_rejected() {
    init_logging();
    let board = board();
    let existing = Task {
        id: Uuid::new_v4(),
        name: "Ship it".to_string(),
        description: String::new(),
        sprint: Some(board.sprints[0].id),
        status: TaskStatus::Done,
        order: 0,
        assigned: None,
        started: None,
        due: None,
        completed: None,
    };

    let input: TaskInput = serde_json::from_value(json!({ "sprint": null })).unwrap();
    let err = TaskRepresenter::deserialize(
        input,
        WriteMode::PartialUpdate {
            existing: &existing,
        },
        &board,
        today(),
    )
    .unwrap_err();

    assert_eq!(err.field, "sprint");
    assert_eq!(err.message, "Cannot change the sprint of completed Task");
}

#[post("/api/tasks/")]
async fn create_task(
    req: HttpRequest,
    config: web::Data<Config>,
    payload: web::Json<TaskInput>,
) -> Result<HttpResponse, AppError> {
    let board = board();
    let attrs = TaskRepresenter::deserialize(
        payload.into_inner(),
        WriteMode::Create,
        &board,
        today(),
    )?;

    let task = Task {
        id: Uuid::new_v4(),
        name: attrs.name.unwrap_or_default(),
        description: attrs.description.unwrap_or_default(),
        sprint: attrs.sprint.flatten().map(|s| s.id),
        status: attrs.status.unwrap_or_default(),
        order: attrs.order.unwrap_or_default(),
        assigned: attrs.assigned.flatten(),
        started: attrs.started.flatten(),
        due: attrs.due.flatten(),
        completed: attrs.completed.flatten(),
    };
    let links = LinkBuilder::from_request(&req, &config);

    Ok(HttpResponse::Created().json(TaskRepresenter::render(&task, &links)))
}

#[actix_web::test]
async fn test_write_path_through_actix() {
    init_logging();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(config()))
            .service(create_task),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/tasks/")
        .insert_header(("host", "board.example.com"))
        .set_json(json!({ "name": "Backlog item" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status_display"], "Not Started");
    assert_eq!(body["links"]["sprint"], serde_json::Value::Null);
    assert!(body["links"]["self"]
        .as_str()
        .unwrap()
        .starts_with("http://board.example.com/api/tasks/"));

    let req = test::TestRequest::post()
        .uri("/api/tasks/")
        .insert_header(("host", "board.example.com"))
        .set_json(json!({ "name": "Too early", "status": 1, "started": "2030-01-01" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["field"], "non_field_errors");
    assert_eq!(body["error"], "Start date can't be set for Not Started task");
}
