//! Tests for credential checks, verified-source propagation and text stages.

mod test_utils;

use lessonloom_core::{AspectRatio, PageAnalysis, Session, VerifiedSource, VideoResolution};
use lessonloom_error::{ErrorCategory, LessonloomResult};
use lessonloom_interface::ResponseModality;
use std::sync::Arc;
use test_utils::{MockCall, MockReply, MockService, page_image, pipeline, session, verified_source};

fn assert_missing_credential<T: std::fmt::Debug>(result: LessonloomResult<T>) {
    let err = result.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::MissingCredential);
}

#[tokio::test]
async fn test_every_stage_requires_credential() {
    let mock = Arc::new(MockService::new().with_text("unused"));
    let pipeline = pipeline(&mock);
    let signed_out = Session::signed_out();
    let source = verified_source();
    let image = page_image();

    assert_missing_credential(pipeline.analyze_page(&signed_out, &image).await);
    assert_missing_credential(
        pipeline
            .generate_roadmap(&signed_out, "Grade 5 science", &[image.clone()])
            .await,
    );
    assert_missing_credential(pipeline.teacher_script(&signed_out, &source).await);
    assert_missing_credential(pipeline.synthesize_speech(&signed_out, "Hello", None).await);
    assert_missing_credential(pipeline.storyboard_prompt(&signed_out, &source).await);
    assert_missing_credential(pipeline.storyboard_image(&signed_out, "A leaf", None).await);
    assert_missing_credential(pipeline.video_prompt(&signed_out, &source).await);
    assert_missing_credential(pipeline.translate_for_video(&signed_out, "Une feuille").await);
    assert_missing_credential(
        pipeline
            .generate_video(
                &signed_out,
                "A leaf",
                &image,
                VideoResolution::Hd720,
                AspectRatio::Landscape,
            )
            .await,
    );
    assert_missing_credential(pipeline.dialogue_script(&signed_out, &source).await);
    assert_missing_credential(
        pipeline
            .synthesize_dialogue(&signed_out, "Teacher: Hi\nStudent: Hello")
            .await,
    );

    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_blank_credential_is_missing() {
    let mock = Arc::new(MockService::new().with_text("unused"));
    let pipeline = pipeline(&mock);

    let result = pipeline
        .teacher_script(&Session::signed_in("   "), &verified_source())
        .await;

    assert_missing_credential(result);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_credential_snapshot_is_passed_to_service() {
    let mock = Arc::new(MockService::new().with_text("script"));
    let pipeline = pipeline(&mock);
    let mut session = Session::signed_in("first-key");

    pipeline
        .teacher_script(&session, &verified_source())
        .await
        .unwrap();
    session.sign_out();

    match &mock.calls()[0] {
        MockCall::GenerateContent { credential, .. } => assert_eq!(credential, "first-key"),
        other => panic!("Expected content call, got {:?}", other),
    }
}

#[tokio::test]
async fn test_downstream_stages_quote_verified_fields() {
    let mock = Arc::new(
        MockService::new()
            .with_text("script")
            .with_text("storyboard")
            .with_text("video")
            .with_text("dialogue"),
    );
    let pipeline = pipeline(&mock);
    let session = session();
    let source = VerifiedSource::new("T", "D");

    pipeline.teacher_script(&session, &source).await.unwrap();
    pipeline.storyboard_prompt(&session, &source).await.unwrap();
    pipeline.video_prompt(&session, &source).await.unwrap();
    pipeline.dialogue_script(&session, &source).await.unwrap();

    let requests = mock.content_requests();
    assert_eq!(requests.len(), 4);
    for request in requests {
        let text = request.text();
        assert!(text.contains("<extracted_text>\nT\n</extracted_text>"));
        assert!(text.contains("<image_description>\nD\n</image_description>"));
        assert!(text.contains("Do not invent"));
    }
}

#[tokio::test]
async fn test_multiline_verified_fields_are_not_rewritten() {
    let mock = Arc::new(MockService::new().with_text("script"));
    let pipeline = pipeline(&mock);
    let source = verified_source();

    pipeline.teacher_script(&session(), &source).await.unwrap();

    let text = mock.content_requests()[0].text();
    assert!(text.contains(source.extracted_text().as_str()));
    assert!(text.contains(source.image_description().as_str()));
}

#[tokio::test]
async fn test_empty_verified_fields_still_run() {
    let mock = Arc::new(MockService::new().with_text("A gentle script"));
    let pipeline = pipeline(&mock);

    let script = pipeline
        .teacher_script(&session(), &VerifiedSource::new("", ""))
        .await
        .unwrap();

    assert_eq!(script, "A gentle script");
    let text = mock.content_requests()[0].text();
    assert!(text.contains("<extracted_text>\n\n</extracted_text>"));
}

#[tokio::test]
async fn test_analysis_request_declares_schema_and_sends_image() {
    let mock = Arc::new(MockService::new().with_text(
        r#"{"analysis": "Key ideas", "extractedText": "T", "imageDescription": "D"}"#,
    ));
    let pipeline = pipeline(&mock);

    let outcome = pipeline
        .analyze_page(&session(), &page_image())
        .await
        .unwrap();

    assert!(!outcome.is_fallback());
    assert_eq!(outcome.value().extracted_text, "T");
    assert_eq!(outcome.value().image_description, "D");

    let request = &mock.content_requests()[0];
    let config = request.generation_config.as_ref().unwrap();
    assert_eq!(config.response_mime_type.as_deref(), Some("application/json"));
    assert!(config.response_schema.is_some());
    assert!(config.temperature.is_some());
    assert_eq!(request.inline_data().len(), 1);
    assert_eq!(request.inline_data()[0].mime_type, "image/png");
}

#[tokio::test]
async fn test_analysis_non_json_returns_fallback() {
    let mock = Arc::new(MockService::new().with_text("I could not read this page."));
    let pipeline = pipeline(&mock);

    let outcome = pipeline
        .analyze_page(&session(), &page_image())
        .await
        .unwrap();

    assert!(outcome.is_fallback());
    assert_eq!(outcome.into_value(), PageAnalysis::fallback());
}

#[tokio::test]
async fn test_analysis_schema_violation_returns_fallback() {
    let mock = Arc::new(MockService::new().with_text(r#"{"analysis": 42}"#));
    let pipeline = pipeline(&mock);

    let outcome = pipeline
        .analyze_page(&session(), &page_image())
        .await
        .unwrap();

    assert!(outcome.is_fallback());
    assert_eq!(outcome.value().analysis, "Error parsing analysis.");
    assert!(outcome.value().extracted_text.is_empty());
}

#[tokio::test]
async fn test_roadmap_sends_every_page_and_context() {
    let mock = Arc::new(MockService::new().with_text("Week 1: leaves"));
    let pipeline = pipeline(&mock);
    let pages = vec![page_image(), page_image(), page_image()];

    let roadmap = pipeline
        .generate_roadmap(&session(), "Grade 5, forty minute lessons", &pages)
        .await
        .unwrap();

    assert_eq!(roadmap, "Week 1: leaves");
    let request = &mock.content_requests()[0];
    assert_eq!(request.inline_data().len(), 3);
    assert!(request.text().contains("Grade 5, forty minute lessons"));
}

#[tokio::test]
async fn test_roadmap_without_pages_is_rejected() {
    let mock = Arc::new(MockService::new());
    let pipeline = pipeline(&mock);

    let err = pipeline
        .generate_roadmap(&session(), "context", &[])
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Decoding);
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn test_free_text_stage_falls_back_when_text_absent() {
    let mock = Arc::new(MockService::new().with_empty_response());
    let pipeline = pipeline(&mock);

    let script = pipeline
        .teacher_script(&session(), &verified_source())
        .await
        .unwrap();

    assert_eq!(script, "Could not generate a teacher script.");
}

#[tokio::test]
async fn test_translation_returns_translated_text() {
    let mock = Arc::new(MockService::new().with_text("A green leaf in sunlight"));
    let pipeline = pipeline(&mock);

    let translated = pipeline
        .translate_for_video(&session(), "Une feuille verte au soleil")
        .await
        .unwrap();

    assert_eq!(translated, "A green leaf in sunlight");
    assert!(
        mock.content_requests()[0]
            .text()
            .contains("Une feuille verte au soleil")
    );
}

#[tokio::test]
async fn test_translation_falls_back_to_original() {
    let mock = Arc::new(MockService::new().with_empty_response());
    let pipeline = pipeline(&mock);

    let translated = pipeline
        .translate_for_video(&session(), "Une feuille verte")
        .await
        .unwrap();

    assert_eq!(translated, "Une feuille verte");
}

#[tokio::test(start_paused = true)]
async fn test_rate_limited_stage_is_retried() {
    let mock = Arc::new(
        MockService::new()
            .with_reply(MockReply::RateLimited)
            .with_reply(MockReply::RateLimited)
            .with_text("Recovered script"),
    );
    let pipeline = pipeline(&mock);

    let script = pipeline
        .teacher_script(&session(), &verified_source())
        .await
        .unwrap();

    assert_eq!(script, "Recovered script");
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_persistent_rate_limit_surfaces_after_four_calls() {
    let mock = Arc::new(
        MockService::new()
            .with_reply(MockReply::RateLimited)
            .with_reply(MockReply::RateLimited)
            .with_reply(MockReply::RateLimited)
            .with_reply(MockReply::RateLimited),
    );
    let pipeline = pipeline(&mock);

    let err = pipeline
        .storyboard_prompt(&session(), &verified_source())
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::RateLimited);
    assert_eq!(mock.call_count(), 4);
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mock = Arc::new(
        MockService::new()
            .with_reply(MockReply::ServerError)
            .with_text("never reached"),
    );
    let pipeline = pipeline(&mock);

    let err = pipeline
        .video_prompt(&session(), &verified_source())
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::RemoteService);
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_text_stages_use_text_model() {
    let mock = Arc::new(MockService::new().with_text("script"));
    let pipeline = pipeline(&mock);

    pipeline
        .teacher_script(&session(), &verified_source())
        .await
        .unwrap();

    assert_eq!(mock.content_models(), vec!["gemini-2.5-flash".to_string()]);
    let config = &mock.content_requests()[0].generation_config;
    assert!(
        config
            .as_ref()
            .and_then(|c| c.response_modalities.as_ref())
            .is_none_or(|m| m.contains(&ResponseModality::Text))
    );
}
