use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, Error, PartialEq, Eq)]
#[error("{code}: {message}")]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl AppError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        suggestion: Option<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VideoQuality {
    Low,
    Medium,
    High,
}

impl VideoQuality {
    pub fn value(self) -> i64 {
        match self {
            VideoQuality::Low => 1,
            VideoQuality::Medium => 2,
            VideoQuality::High => 3,
        }
    }

    /// Unknown values resolve to `Low`.
    pub fn from_integer(value: i64) -> Self {
        match value {
            2 => VideoQuality::Medium,
            3 => VideoQuality::High,
            _ => VideoQuality::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordMode {
    Mixed,
    PhotoOnly,
    VideoOnly,
}

impl RecordMode {
    pub fn value(self) -> i64 {
        match self {
            RecordMode::Mixed => 0,
            RecordMode::PhotoOnly => 1,
            RecordMode::VideoOnly => 2,
        }
    }

    /// Unknown values resolve to `Mixed`.
    pub fn from_integer(value: i64) -> Self {
        match value {
            1 => RecordMode::PhotoOnly,
            2 => RecordMode::VideoOnly,
            _ => RecordMode::Mixed,
        }
    }
}

/// Outcome vocabulary reported to hosts. Only the recorder layer produces these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordResultCode {
    Success,
    ErrorCancel,
    ErrorRecording,
    ErrorStorageUnavailable,
    ErrorLessThanMinDuration,
    ErrorRecordInnerFail,
    ErrorRecordPermissionDenied,
    ErrorUseAiDenoiseNoLiteavSdk,
    ErrorUseAiDenoiseNoImSdk,
    ErrorUseAiDenoiseNoTuiCore,
    ErrorUseAiDenoiseNoSignature,
    ErrorUseAiDenoiseWrongSignature,
}

impl RecordResultCode {
    pub const ALL: [RecordResultCode; 12] = [
        RecordResultCode::Success,
        RecordResultCode::ErrorCancel,
        RecordResultCode::ErrorRecording,
        RecordResultCode::ErrorStorageUnavailable,
        RecordResultCode::ErrorLessThanMinDuration,
        RecordResultCode::ErrorRecordInnerFail,
        RecordResultCode::ErrorRecordPermissionDenied,
        RecordResultCode::ErrorUseAiDenoiseNoLiteavSdk,
        RecordResultCode::ErrorUseAiDenoiseNoImSdk,
        RecordResultCode::ErrorUseAiDenoiseNoTuiCore,
        RecordResultCode::ErrorUseAiDenoiseNoSignature,
        RecordResultCode::ErrorUseAiDenoiseWrongSignature,
    ];

    pub fn code(self) -> i32 {
        match self {
            RecordResultCode::Success => 0,
            RecordResultCode::ErrorCancel => -1,
            RecordResultCode::ErrorRecording => -2,
            RecordResultCode::ErrorStorageUnavailable => -3,
            RecordResultCode::ErrorLessThanMinDuration => -4,
            RecordResultCode::ErrorRecordInnerFail => -5,
            RecordResultCode::ErrorRecordPermissionDenied => -6,
            RecordResultCode::ErrorUseAiDenoiseNoLiteavSdk => -7,
            RecordResultCode::ErrorUseAiDenoiseNoImSdk => -8,
            RecordResultCode::ErrorUseAiDenoiseNoTuiCore => -9,
            RecordResultCode::ErrorUseAiDenoiseNoSignature => -10,
            RecordResultCode::ErrorUseAiDenoiseWrongSignature => -11,
        }
    }

    /// Unknown codes collapse to `ErrorRecordInnerFail`.
    pub fn from_code(code: i32) -> Self {
        Self::ALL
            .into_iter()
            .find(|candidate| candidate.code() == code)
            .unwrap_or(RecordResultCode::ErrorRecordInnerFail)
    }

    pub fn is_success(self) -> bool {
        self == RecordResultCode::Success
    }
}

/// Host-supplied configuration. `None` defers to the JSON override, then to
/// the compiled default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplicitConfig {
    pub max_video_duration: Option<u32>,
    pub min_video_duration: Option<u32>,
    pub video_quality: Option<VideoQuality>,
    pub record_mode: Option<RecordMode>,
    pub primary_color: Option<String>,
    pub default_front_camera: Option<bool>,
    pub support_beauty: Option<bool>,
    pub support_aspect: Option<bool>,
    pub support_torch: Option<bool>,
    pub support_scroll_filter: Option<bool>,
}

impl ExplicitConfig {
    pub fn for_photo(primary_color: Option<String>, default_front_camera: Option<bool>) -> Self {
        Self {
            record_mode: Some(RecordMode::PhotoOnly),
            primary_color,
            default_front_camera,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub theme_color: u32,
    pub max_record_duration_ms: u32,
    pub min_record_duration_ms: u32,
    pub video_quality: VideoQuality,
    pub record_mode: RecordMode,
    pub default_front_camera: bool,
    pub support_beauty: bool,
    pub support_aspect: bool,
    pub support_torch: bool,
    pub support_scroll_filter: bool,
}

/// Completion payload as delivered by the capture engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorRecordResult {
    pub ret_code: i32,
    pub video_path: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    pub enable_ai_denoise: bool,
}
