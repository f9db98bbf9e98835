mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{profile_body, TestApp, TestUser};

async fn user_with_profile(app: &TestApp) -> Result<TestUser> {
    let ada = app.create_user("Ada").await;
    let (status, _) = app.post("/api/profile", &ada.token, profile_body()).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(ada)
}

fn experience(title: &str) -> Value {
    json!({
        "title": title,
        "company": "Acme",
        "location": "Remote",
        "from": "2020-01-15",
        "current": true
    })
}

fn education(school: &str) -> Value {
    json!({
        "school": school,
        "degree": "BSc",
        "fieldofstudy": "Mathematics",
        "from": "2012-09-01",
        "to": "2016-06-30"
    })
}

fn titles(profile: &Value, list: &str, key: &str) -> Vec<String> {
    profile[list]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e[key].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn experiences_are_added_newest_first() -> Result<()> {
    let app = TestApp::new();
    let ada = user_with_profile(&app).await?;

    let (status, first) = app
        .put("/api/profile/experiences", &ada.token, experience("Engineer"))
        .await?;
    assert_eq!(status, StatusCode::OK, "{}", first);
    assert_eq!(first["experiences"][0]["from"], "2020-01-15");
    assert_eq!(first["experiences"][0]["current"], true);
    assert!(first["experiences"][0]["id"].is_string());

    let (_, second) = app
        .put("/api/profile/experiences", &ada.token, experience("Lead"))
        .await?;
    assert_eq!(titles(&second, "experiences", "title"), ["Lead", "Engineer"]);
    assert_eq!(second["status"], "Developer");
    Ok(())
}

#[tokio::test]
async fn experience_requires_title_company_and_from() -> Result<()> {
    let app = TestApp::new();
    let ada = user_with_profile(&app).await?;

    let (status, body) = app
        .put("/api/profile/experiences", &ada.token, json!({ "title": "Engineer" }))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["errors"],
        json!([
            { "msg": "Company is required", "param": "company", "location": "body" },
            { "msg": "From date is required", "param": "from", "location": "body" }
        ])
    );

    let (_, me) = app.get("/api/profile/me", Some(&ada.token)).await?;
    assert_eq!(me["experiences"], json!([]));
    Ok(())
}

#[tokio::test]
async fn experience_with_unparseable_date_is_rejected() -> Result<()> {
    let app = TestApp::new();
    let ada = user_with_profile(&app).await?;

    let mut body = experience("Engineer");
    body["from"] = json!("last spring");
    let (status, body) = app.put("/api/profile/experiences", &ada.token, body).await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["param"], "from");
    Ok(())
}

#[tokio::test]
async fn null_current_flag_means_not_current() -> Result<()> {
    let app = TestApp::new();
    let ada = user_with_profile(&app).await?;

    let mut body = experience("Engineer");
    body["current"] = Value::Null;
    body["to"] = Value::Null;
    let (status, profile) = app.put("/api/profile/experiences", &ada.token, body).await?;
    assert_eq!(status, StatusCode::OK, "{}", profile);
    assert_eq!(profile["experiences"][0]["current"], false);

    let mut body = education("MIT");
    body["current"] = Value::Null;
    let (status, profile) = app.put("/api/profile/education", &ada.token, body).await?;
    assert_eq!(status, StatusCode::OK, "{}", profile);
    assert_eq!(profile["education"][0]["current"], false);
    Ok(())
}

#[tokio::test]
async fn experience_removal_by_id() -> Result<()> {
    let app = TestApp::new();
    let ada = user_with_profile(&app).await?;
    app.put("/api/profile/experiences", &ada.token, experience("Engineer"))
        .await?;
    let (_, profile) = app
        .put("/api/profile/experiences", &ada.token, experience("Lead"))
        .await?;
    let engineer_id = profile["experiences"][1]["id"].as_str().expect("id").to_string();

    let (status, profile) = app
        .delete(&format!("/api/profile/experiences/{}", engineer_id), &ada.token)
        .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&profile, "experiences", "title"), ["Lead"]);
    Ok(())
}

#[tokio::test]
async fn removing_unknown_or_malformed_id_leaves_list_unchanged() -> Result<()> {
    let app = TestApp::new();
    let ada = user_with_profile(&app).await?;
    app.put("/api/profile/experiences", &ada.token, experience("Engineer"))
        .await?;
    app.put("/api/profile/education", &ada.token, education("MIT"))
        .await?;

    let (status, profile) = app
        .delete(
            &format!("/api/profile/experiences/{}", uuid::Uuid::new_v4()),
            &ada.token,
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&profile, "experiences", "title"), ["Engineer"]);

    let (status, profile) = app
        .delete("/api/profile/education/not-an-id", &ada.token)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&profile, "education", "school"), ["MIT"]);
    Ok(())
}

#[tokio::test]
async fn education_add_and_remove() -> Result<()> {
    let app = TestApp::new();
    let ada = user_with_profile(&app).await?;

    app.put("/api/profile/education", &ada.token, education("MIT"))
        .await?;
    let (status, profile) = app
        .put("/api/profile/education", &ada.token, education("Stanford"))
        .await?;
    assert_eq!(status, StatusCode::OK, "{}", profile);
    assert_eq!(titles(&profile, "education", "school"), ["Stanford", "MIT"]);
    assert_eq!(profile["education"][0]["to"], "2016-06-30");
    assert_eq!(profile["education"][0]["current"], false);

    let stanford_id = profile["education"][0]["id"].as_str().expect("id").to_string();
    let (status, profile) = app
        .delete(&format!("/api/profile/education/{}", stanford_id), &ada.token)
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&profile, "education", "school"), ["MIT"]);
    Ok(())
}

#[tokio::test]
async fn education_requires_school_degree_field_and_from() -> Result<()> {
    let app = TestApp::new();
    let ada = user_with_profile(&app).await?;

    let (status, body) = app
        .put("/api/profile/education", &ada.token, json!({ "school": "" }))
        .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let params: Vec<&str> = body["errors"]
        .as_array()
        .expect("errors")
        .iter()
        .filter_map(|e| e["param"].as_str())
        .collect();
    assert_eq!(params, ["degree", "fieldofstudy", "from", "school"]);
    Ok(())
}

#[tokio::test]
async fn list_edits_without_profile_are_server_errors() -> Result<()> {
    let app = TestApp::new();
    let ada = app.create_user("Ada").await;

    let (status, body) = app
        .put("/api/profile/experiences", &ada.token, experience("Engineer"))
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["msg"], "Server Error");

    let (status, _) = app
        .delete(
            &format!("/api/profile/education/{}", uuid::Uuid::new_v4()),
            &ada.token,
        )
        .await?;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    Ok(())
}

#[tokio::test]
async fn list_routes_require_token() -> Result<()> {
    let app = TestApp::new();

    let (status, _) = app
        .request(
            axum::http::Method::PUT,
            "/api/profile/experiences",
            None,
            Some(experience("Engineer")),
        )
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn profile_update_keeps_history() -> Result<()> {
    let app = TestApp::new();
    let ada = user_with_profile(&app).await?;
    app.put("/api/profile/experiences", &ada.token, experience("Engineer"))
        .await?;

    let (_, profile) = app
        .post(
            "/api/profile",
            &ada.token,
            json!({ "status": "Lead", "skills": "Rust , Go" }),
        )
        .await?;

    assert_eq!(titles(&profile, "experiences", "title"), ["Engineer"]);
    assert_eq!(profile["skills"], json!(["Rust", "Go"]));
    Ok(())
}
