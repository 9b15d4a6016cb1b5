//! Tests for the video stage's submit, poll and download sequence.
//!
//! Time is paused so poll intervals elapse instantly.

mod test_utils;

use lessonloom_core::{AspectRatio, MediaKind, VideoResolution};
use lessonloom_error::{ErrorCategory, LessonloomErrorKind, StageErrorKind};
use lessonloom_interface::VideoJob;
use lessonloom_retry::LessonloomConfig;
use std::sync::Arc;
use std::time::Duration;
use test_utils::{MockJobReply, MockService, page_image, pipeline, pipeline_with, session};
use tokio::time::Instant;

const OPERATION: &str = "models/veo/operations/op-7";
const LOCATOR: &str = "https://files.example/v1beta/files/clip:download?alt=media";

fn pending() -> MockJobReply {
    MockJobReply::Job(VideoJob::pending(OPERATION))
}

fn done_with_locator() -> MockJobReply {
    MockJobReply::Job(VideoJob::completed(OPERATION, LOCATOR))
}

fn done_without_locator() -> MockJobReply {
    MockJobReply::Job(VideoJob {
        name: OPERATION.to_string(),
        done: true,
        ..Default::default()
    })
}

#[tokio::test(start_paused = true)]
async fn test_polls_until_done_then_downloads_with_key() {
    let mock = Arc::new(
        MockService::new()
            .with_text("A leaf turning toward the sun")
            .with_jobs([pending(), pending(), done_with_locator()])
            .with_media(vec![0x00, 0x00, 0x00, 0x20, b'f', b't', b'y', b'p']),
    );
    let pipeline = pipeline(&mock);
    let start = Instant::now();

    let blob = pipeline
        .generate_video(
            &session(),
            "Une feuille qui se tourne vers le soleil",
            &page_image(),
            VideoResolution::Hd1080,
            AspectRatio::Landscape,
        )
        .await
        .unwrap();

    assert_eq!(mock.submit_count(), 1);
    assert_eq!(mock.refreshed_jobs(), vec![OPERATION.to_string(); 2]);
    assert_eq!(start.elapsed(), Duration::from_millis(10_000));

    let locators = mock.fetched_locators();
    assert_eq!(locators.len(), 1);
    assert!(locators[0].starts_with(LOCATOR));
    assert!(locators[0].ends_with("&key=test-key"));

    assert_eq!(*blob.kind(), MediaKind::Video);
    assert_eq!(blob.mime_type(), "video/mp4");
    assert_eq!(blob.data(), &vec![0x00, 0x00, 0x00, 0x20, b'f', b't', b'y', b'p']);
}

#[tokio::test(start_paused = true)]
async fn test_submission_uses_translated_prompt_and_parameters() {
    let mock = Arc::new(
        MockService::new()
            .with_text("A leaf turning toward the sun")
            .with_jobs([done_with_locator()])
            .with_media(vec![1]),
    );
    let pipeline = pipeline(&mock);

    pipeline
        .generate_video(
            &session(),
            "Une feuille",
            &page_image(),
            VideoResolution::Hd720,
            AspectRatio::Portrait,
        )
        .await
        .unwrap();

    let submitted = mock
        .calls()
        .into_iter()
        .find_map(|call| match call {
            test_utils::MockCall::SubmitVideoJob { model, request } => Some((model, request)),
            _ => None,
        })
        .unwrap();

    assert_eq!(submitted.0, "veo-3.1-fast-generate-preview");
    assert_eq!(submitted.1.prompt, "A leaf turning toward the sun");
    assert_eq!(submitted.1.resolution, VideoResolution::Hd720);
    assert_eq!(submitted.1.aspect_ratio, AspectRatio::Portrait);
    assert_eq!(submitted.1.number_of_videos, 1);
    assert_eq!(submitted.1.image.as_ref().unwrap().mime_type, "image/png");
    assert!(mock.refreshed_jobs().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_done_without_locator_fails_without_fetch() {
    let mock = Arc::new(
        MockService::new()
            .with_text("A leaf")
            .with_jobs([pending(), done_without_locator()]),
    );
    let pipeline = pipeline(&mock);

    let err = pipeline
        .generate_video(
            &session(),
            "A leaf",
            &page_image(),
            VideoResolution::Hd720,
            AspectRatio::Landscape,
        )
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::VideoFailed);
    assert!(mock.fetched_locators().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_service_reason_is_reported_on_failure() {
    let mock = Arc::new(MockService::new().with_text("A leaf").with_jobs([
        MockJobReply::Job(VideoJob {
            name: OPERATION.to_string(),
            done: true,
            videos: Vec::new(),
            error: Some("Prompt blocked by safety filters".to_string()),
        }),
    ]));
    let pipeline = pipeline(&mock);

    let err = pipeline
        .generate_video(
            &session(),
            "A leaf",
            &page_image(),
            VideoResolution::Hd720,
            AspectRatio::Landscape,
        )
        .await
        .unwrap_err();

    assert!(format!("{}", err).contains("Prompt blocked by safety filters"));
}

#[tokio::test(start_paused = true)]
async fn test_poll_cap_raises_timeout() {
    let mut config = LessonloomConfig::default();
    config.poller.max_polls = 3;
    let mock = Arc::new(
        MockService::new()
            .with_text("A leaf")
            .with_jobs([pending(), pending(), pending(), pending(), pending()]),
    );
    let pipeline = pipeline_with(&mock, config);

    let err = pipeline
        .generate_video(
            &session(),
            "A leaf",
            &page_image(),
            VideoResolution::Hd720,
            AspectRatio::Landscape,
        )
        .await
        .unwrap_err();

    match err.kind() {
        LessonloomErrorKind::Stage(stage) => {
            assert_eq!(stage.kind, StageErrorKind::PollTimeout { attempts: 3 });
        }
        other => panic!("Expected stage error, got {:?}", other),
    }
    assert_eq!(err.category(), ErrorCategory::PollTimeout);
    assert_eq!(mock.refreshed_jobs().len(), 3);
    assert_eq!(mock.submit_count(), 1);
    assert!(mock.fetched_locators().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_unbounded_poller_keeps_waiting() {
    let mut config = LessonloomConfig::default();
    config.poller.max_polls = 0;
    let mut jobs: Vec<MockJobReply> = (0..200).map(|_| pending()).collect();
    jobs.push(done_with_locator());
    let mock = Arc::new(
        MockService::new()
            .with_text("A leaf")
            .with_jobs(jobs)
            .with_media(vec![7]),
    );
    let pipeline = pipeline_with(&mock, config);

    pipeline
        .generate_video(
            &session(),
            "A leaf",
            &page_image(),
            VideoResolution::Hd720,
            AspectRatio::Landscape,
        )
        .await
        .unwrap();

    assert_eq!(mock.refreshed_jobs().len(), 200);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limited_submission_retried_once() {
    let mock = Arc::new(
        MockService::new()
            .with_text("A leaf")
            .with_jobs([MockJobReply::RateLimited, MockJobReply::RateLimited]),
    );
    let pipeline = pipeline(&mock);

    let err = pipeline
        .generate_video(
            &session(),
            "A leaf",
            &page_image(),
            VideoResolution::Hd720,
            AspectRatio::Landscape,
        )
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::RateLimited);
    assert_eq!(mock.submit_count(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_rate_limit_mid_poll_resubmits_job() {
    let mock = Arc::new(
        MockService::new()
            .with_text("A leaf")
            .with_jobs([
                pending(),
                MockJobReply::RateLimited,
                pending(),
                done_with_locator(),
            ])
            .with_media(vec![1]),
    );
    let pipeline = pipeline(&mock);

    pipeline
        .generate_video(
            &session(),
            "A leaf",
            &page_image(),
            VideoResolution::Hd720,
            AspectRatio::Landscape,
        )
        .await
        .unwrap();

    assert_eq!(mock.submit_count(), 2);
    assert_eq!(mock.refreshed_jobs().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_polling_does_not_hold_throttle_slot() {
    let mock = Arc::new(
        MockService::new()
            .with_text("A leaf turning toward the sun")
            .with_text("Good morning, class.")
            .with_jobs(
                std::iter::repeat_with(pending)
                    .take(6)
                    .chain([done_with_locator()]),
            )
            .with_media(vec![1]),
    );
    let mut config = LessonloomConfig::default();
    config.throttle.max_concurrent = Some(1);
    let pipeline = pipeline_with(&mock, config);
    let session = session();
    let source = test_utils::verified_source();
    let start = Instant::now();

    let video = async {
        let result = pipeline
            .generate_video(
                &session,
                "A leaf",
                &page_image(),
                VideoResolution::Hd720,
                AspectRatio::Landscape,
            )
            .await;
        (result, start.elapsed())
    };
    let script = async {
        let result = pipeline.teacher_script(&session, &source).await;
        (result, start.elapsed())
    };

    let ((video, video_at), (script, script_at)) = tokio::join!(video, script);

    assert!(video.is_ok());
    assert!(script.is_ok());
    assert_eq!(mock.refreshed_jobs().len(), 6);
    assert_eq!(video_at, Duration::from_millis(30_000));
    assert_eq!(script_at, Duration::ZERO);
}
