use wiremock::{
    matchers::{any, bearer_token, method, path},
    Mock, ResponseTemplate,
};

use crate::helper::{generated_forms, spawn_app, spawn_app_with_api_key, TEST_API_KEY};

fn kim() -> serde_json::Value {
    serde_json::json!({
        "name": "Kim",
        "email": "kim@x.com",
        "subject": "Hi",
        "message": "Hello",
    })
}

#[tokio::test]
async fn valid_message_is_delivered() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .and(bearer_token(TEST_API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "email-123" })))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app.post_send(&kim()).await;
    assert_eq!(200, res.status().as_u16());

    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({ "success": true, "data": { "id": "email-123" } })
    );

    let sent = &app.provider_requests().await[0];
    assert_eq!(sent["from"], app.mail.sender_mailbox());
    assert_eq!(sent["to"], serde_json::json!([app.mail.recipient.as_ref()]));
    assert_eq!(sent["subject"], format!("{} Hi", app.mail.subject_tag));
    assert_eq!(sent["reply_to"], "kim@x.com");
    let html = sent["html"].as_str().unwrap();
    assert!(html.contains("Kim (kim@x.com)"));
    assert!(html.contains("Hello"));
    assert!(html.contains("mailto:kim@x.com"));
}

#[tokio::test]
async fn empty_or_missing_fields_are_rejected_before_delivery() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let mut cases = Vec::new();
    for field in ["name", "email", "subject", "message"] {
        let mut empty = kim();
        empty[field] = serde_json::json!("");
        cases.push((empty, format!("{field} is empty.")));

        let mut missing = kim();
        missing.as_object_mut().unwrap().remove(field);
        cases.push((missing, format!("{field} is missing.")));

        let mut null = kim();
        null[field] = serde_json::Value::Null;
        cases.push((null, format!("{field} is null.")));
    }

    for (body, case) in cases {
        let res = app.post_send(&body).await;
        assert_eq!(400, res.status().as_u16(), "{case}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body, serde_json::json!({ "error": "all fields required" }), "{case}");
    }
}

#[tokio::test]
async fn unparseable_body_fails_as_delivery_error() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let cases = [
        ("{not json", "invalid JSON."),
        (r#"{"name": 5, "email": "kim@x.com", "subject": "Hi", "message": "Hello"}"#, "name is a number."),
    ];
    for (body, case) in cases {
        let res = app.post_send_raw(body, Some("application/json")).await;
        assert_eq!(500, res.status().as_u16(), "{case}");
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body, serde_json::json!({ "error": "delivery failed, please retry" }), "{case}");
    }
}

#[tokio::test]
async fn json_body_is_read_whatever_the_content_type() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "email-123" })))
        .expect(2)
        .mount(&app.email_server)
        .await;

    for content_type in [Some("text/plain"), None] {
        let res = app.post_send_raw(kim().to_string(), content_type).await;
        assert_eq!(200, res.status().as_u16(), "{content_type:?}");
    }
}

#[tokio::test]
async fn provider_failure_returns_500() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let res = app.post_send(&kim()).await;
    assert_eq!(500, res.status().as_u16());
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body, serde_json::json!({ "error": "delivery failed, please retry" }));
}

#[tokio::test]
async fn missing_api_key_fails_only_the_send() {
    let app = spawn_app_with_api_key(None).await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let res = app.post_send(&kim()).await;
    assert_eq!(500, res.status().as_u16());

    let res = app
        .client
        .get(format!("{}/health_check", &app.address))
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());
}

#[tokio::test]
async fn identical_messages_are_each_delivered() {
    let app = spawn_app().await;

    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "email-123" })))
        .expect(2)
        .mount(&app.email_server)
        .await;

    for _ in 0..2 {
        let res = app.post_send(&kim()).await;
        assert_eq!(200, res.status().as_u16());
    }
}

#[tokio::test]
async fn generated_messages_are_relayed_unchanged() {
    for form in generated_forms(10) {
        let app = spawn_app().await;

        Mock::given(path("/emails"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "email-123" })))
            .expect(1)
            .mount(&app.email_server)
            .await;

        let res = app.post_send(&serde_json::to_value(&form).unwrap()).await;
        assert_eq!(200, res.status().as_u16(), "{form:?}");

        let sent = &app.provider_requests().await[0];
        assert_eq!(sent["subject"], format!("{} {}", app.mail.subject_tag, form.subject));
        assert_eq!(sent["reply_to"], form.email.as_str());
        let text = sent["text"].as_str().unwrap();
        assert!(text.contains(&format!("From: {} ({})", form.name, form.email)), "{text}");
        assert!(text.contains(&format!("Subject: {}", form.subject)), "{text}");
        assert!(text.contains(&form.message), "{text}");
    }
}
