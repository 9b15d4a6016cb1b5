//! Wire types for the long-running video endpoints and error bodies.
//!
//! `generateContent` bodies are already in wire shape in
//! `lessonloom_interface`; only the Veo job protocol differs from the
//! in-process job model.

use lessonloom_interface::{GeneratedVideo, VideoJob, VideoJobRequest};
use serde::{Deserialize, Serialize};

//
// ─── SUBMISSION ─────────────────────────────────────────────────────────────
//

/// Body of `:predictLongRunning`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PredictLongRunningRequest {
    pub instances: Vec<VideoInstance>,
    pub parameters: VideoParameters,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoInstance {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<VideoImage>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoImage {
    pub bytes_base64_encoded: String,
    pub mime_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoParameters {
    pub aspect_ratio: String,
    pub resolution: String,
    pub sample_count: u32,
}

impl From<&VideoJobRequest> for PredictLongRunningRequest {
    fn from(request: &VideoJobRequest) -> Self {
        Self {
            instances: vec![VideoInstance {
                prompt: request.prompt.clone(),
                image: request.image.as_ref().map(|image| VideoImage {
                    bytes_base64_encoded: image.data.clone(),
                    mime_type: image.mime_type.clone(),
                }),
            }],
            parameters: VideoParameters {
                aspect_ratio: request.aspect_ratio.to_string(),
                resolution: request.resolution.to_string(),
                sample_count: request.number_of_videos,
            },
        }
    }
}

//
// ─── OPERATION ──────────────────────────────────────────────────────────────
//

/// A long-running operation as returned by submit and refresh.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Operation {
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub response: Option<OperationResponse>,
    #[serde(default)]
    pub error: Option<RpcStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OperationResponse {
    #[serde(default)]
    pub generate_video_response: Option<GenerateVideoResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<GeneratedSample>,
    #[serde(default)]
    pub rai_media_filtered_reasons: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct GeneratedSample {
    #[serde(default)]
    pub video: Option<VideoFile>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoFile {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

impl From<Operation> for VideoJob {
    fn from(operation: Operation) -> Self {
        let generated = operation
            .response
            .and_then(|response| response.generate_video_response)
            .unwrap_or_default();

        // Safety filters drop samples without an RPC error, so surface why.
        let error = operation.error.map(|status| status.message).or_else(|| {
            (!generated.rai_media_filtered_reasons.is_empty())
                .then(|| generated.rai_media_filtered_reasons.join("; "))
        });

        let videos = generated
            .generated_samples
            .into_iter()
            .filter_map(|sample| sample.video)
            .map(|video| GeneratedVideo {
                uri: video.uri,
                mime_type: video.mime_type,
            })
            .collect();

        VideoJob {
            name: operation.name,
            done: operation.done,
            videos,
            error,
        }
    }
}

//
// ─── ERRORS ─────────────────────────────────────────────────────────────────
//

/// `{"error": {...}}` body of a failed call.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: RpcStatus,
}

/// Google RPC status.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RpcStatus {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
