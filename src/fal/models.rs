//! Wire shapes for the fal queue API plus the fixed per-route input presets.
//!
//! Queue responses are validated into tagged types at the boundary; nothing
//! downstream indexes into untyped JSON.
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stable Cascade endpoint used by `/api/fal`.
pub const STABLE_CASCADE: &str = "fal-ai/stable-cascade";
/// Lightning SDXL endpoint used by `/api/falfast`.
pub const FAST_LIGHTNING_SDXL: &str = "fal-ai/fast-lightning-sdxl";

const IMAGE_SIZE_SQUARE_HD: &str = "square_hd";

/// Handle returned when a job is accepted onto the provider queue.
#[derive(Debug, Clone, Deserialize)]
pub struct QueueTicket {
    pub request_id: String,
    pub status_url: String,
    pub response_url: String,
}

/// One observed status of a queued job.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueueUpdate {
    InQueue {
        #[serde(default)]
        queue_position: Option<u32>,
    },
    InProgress {
        #[serde(default)]
        logs: Vec<QueueLogLine>,
    },
    Completed {
        #[serde(default)]
        logs: Vec<QueueLogLine>,
    },
}

impl QueueUpdate {
    pub fn is_completed(&self) -> bool {
        matches!(self, QueueUpdate::Completed { .. })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueueLogLine {
    pub message: String,
}

/// Final output of the image endpoints: a list of generated images.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageBatch {
    #[serde(default)]
    pub images: Vec<GeneratedImage>,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub content_type: Option<String>,
}

impl ImageBatch {
    /// URL of the first image, if the batch holds any.
    pub fn first_url(&self) -> Option<&str> {
        self.images.first().map(|img| img.url.as_str())
    }
}

/// Input for `fal-ai/stable-cascade` with the parameters `/api/fal` fixes.
#[derive(Debug, Clone, Serialize)]
pub struct StableCascadeInput {
    pub prompt: String,
    pub negative_prompt: String,
    pub first_stage_steps: u32,
    pub second_stage_steps: u32,
    pub guidance_scale: f32,
    pub image_size: &'static str,
    pub num_images: u32,
    pub loras: Vec<Value>,
    pub enable_safety_checker: bool,
}

impl StableCascadeInput {
    pub fn new(prompt: impl Into<String>) -> Self {
        StableCascadeInput {
            prompt: prompt.into(),
            negative_prompt: String::new(),
            first_stage_steps: 20,
            second_stage_steps: 10,
            guidance_scale: 4.0,
            image_size: IMAGE_SIZE_SQUARE_HD,
            num_images: 1,
            loras: Vec::new(),
            enable_safety_checker: true,
        }
    }
}

/// Input for `fal-ai/fast-lightning-sdxl` with the parameters `/api/falfast` fixes.
#[derive(Debug, Clone, Serialize)]
pub struct LightningSdxlInput {
    pub prompt: String,
    pub image_size: &'static str,
    pub num_inference_steps: u32,
    pub num_images: u32,
    pub enable_safety_checker: bool,
}

impl LightningSdxlInput {
    pub fn new(prompt: impl Into<String>) -> Self {
        LightningSdxlInput {
            prompt: prompt.into(),
            image_size: IMAGE_SIZE_SQUARE_HD,
            num_inference_steps: 4,
            num_images: 1,
            enable_safety_checker: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn queue_updates_deserialize_all_statuses() {
        let update: QueueUpdate =
            serde_json::from_value(json!({"status": "IN_QUEUE", "queue_position": 3})).unwrap();
        assert!(matches!(update, QueueUpdate::InQueue { queue_position: Some(3) }));

        let update: QueueUpdate = serde_json::from_value(json!({
            "status": "IN_PROGRESS",
            "logs": [{"message": "step 2/10"}]
        }))
        .unwrap();
        match update {
            QueueUpdate::InProgress { logs } => assert_eq!(logs[0].message, "step 2/10"),
            other => panic!("unexpected update: {:?}", other),
        }

        let update: QueueUpdate = serde_json::from_value(json!({"status": "COMPLETED"})).unwrap();
        assert!(update.is_completed());
    }

    #[test]
    fn empty_batches_have_no_first_url() {
        let batch: ImageBatch = serde_json::from_value(json!({"images": []})).unwrap();
        assert!(batch.first_url().is_none());

        let batch: ImageBatch = serde_json::from_value(json!({
            "images": [
                {"url": "https://cdn.example/one.png", "width": 1024, "height": 1024},
                {"url": "https://cdn.example/two.png"}
            ],
            "seed": 42
        }))
        .unwrap();
        assert_eq!(batch.first_url(), Some("https://cdn.example/one.png"));
    }

    #[test]
    fn presets_carry_the_fixed_route_parameters() {
        let cascade = serde_json::to_value(StableCascadeInput::new("a loom")).unwrap();
        assert_eq!(cascade["prompt"], "a loom");
        assert_eq!(cascade["negative_prompt"], "");
        assert_eq!(cascade["first_stage_steps"], 20);
        assert_eq!(cascade["second_stage_steps"], 10);
        assert_eq!(cascade["guidance_scale"], 4.0);
        assert_eq!(cascade["image_size"], "square_hd");
        assert_eq!(cascade["num_images"], 1);
        assert_eq!(cascade["loras"], json!([]));
        assert_eq!(cascade["enable_safety_checker"], true);

        let lightning = serde_json::to_value(LightningSdxlInput::new("a loom")).unwrap();
        assert_eq!(lightning["num_inference_steps"], 4);
        assert_eq!(lightning["image_size"], "square_hd");
        assert_eq!(lightning["num_images"], 1);
        assert_eq!(lightning["enable_safety_checker"], true);
        // The fast preset has no cascade knobs.
        assert!(lightning.get("guidance_scale").is_none());
        assert!(lightning.get("first_stage_steps").is_none());
    }
}
