use groupview_engine::{
    ActionSubmitter, HttpActionSubmitter, ServiceError, ServiceSettings, SubmitRequest,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> SubmitRequest {
    SubmitRequest {
        task_group_id: "g1".to_string(),
        action_name: "retrigger".to_string(),
        input: "force: true\n".to_string(),
    }
}

#[tokio::test]
async fn submit_posts_input_and_yields_task_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/task-groups/g1/actions/retrigger"))
        .and(body_json(serde_json::json!({ "input": "force: true\n" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"{ "taskId": "abc" }"#, "application/json"),
        )
        .mount(&server)
        .await;

    let submitter = HttpActionSubmitter::new(ServiceSettings {
        base_url: server.uri(),
        ..ServiceSettings::default()
    })
    .expect("submitter");

    let outcome = submitter.submit(&request()).await.expect("submit ok");
    assert_eq!(outcome.task_id, "abc");
}

#[tokio::test]
async fn submit_surfaces_rejection_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let submitter = HttpActionSubmitter::new(ServiceSettings {
        base_url: server.uri(),
        ..ServiceSettings::default()
    })
    .expect("submitter");

    let err = submitter.submit(&request()).await.unwrap_err();
    assert_eq!(err, ServiceError::HttpStatus(403));
}
