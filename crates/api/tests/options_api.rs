//! Integration tests for `GET /api/v1/options`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get};

#[tokio::test]
async fn options_list_every_choice_in_display_order() {
    let app = build_test_app();
    let response = get(app.router, "/api/v1/options").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = body_json(response).await["data"].clone();
    assert_eq!(
        data["test_types"],
        serde_json::json!(["Thyroid", "FNAC", "CBC", "Lipid Profile", "COVID-19", "Other"])
    );
    assert_eq!(data["languages"], serde_json::json!(["English", "Gujarati", "Hindi"]));
    assert_eq!(data["audio_moods"], serde_json::json!(["Energetic", "Calm"]));
    assert_eq!(
        data["animations"],
        serde_json::json!(["Zoom In", "Slide In", "Pulse", "Bounce"])
    );
}

#[tokio::test]
async fn options_carry_defaults_and_limits() {
    let app = build_test_app();
    let data = body_json(get(app.router, "/api/v1/options").await).await["data"].clone();

    assert_eq!(data["font_size"]["min"], 20);
    assert_eq!(data["font_size"]["max"], 60);
    assert_eq!(data["script_soft_limit"], 200);

    let defaults = &data["defaults"];
    assert_eq!(defaults["test_type"], "Thyroid");
    assert_eq!(defaults["language"], "English");
    assert_eq!(defaults["audio_mood"], "Energetic");
    assert_eq!(defaults["script"], "Get your tests done today!");
    assert_eq!(defaults["styling"]["text_color"], "#FFFFFF");
    assert_eq!(defaults["styling"]["bg_color"], "#0056b3");
    assert_eq!(defaults["styling"]["font_size"], 40);
    assert_eq!(defaults["styling"]["animation"], "Zoom In");

    assert_eq!(data["video"]["width"], 1080);
    assert_eq!(data["video"]["height"], 1920);
    assert_eq!(data["video"]["fps"], 24);
    assert_eq!(data["video"]["header"], "City Pathology Laboratory");
}
