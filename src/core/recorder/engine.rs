use crate::domain::models::{AppError, AudioConfig, RecordResultCode, VendorRecordResult};
use std::sync::Weak;

/// Completion code the engine uses for "recording shorter than the minimum".
pub const VENDOR_ERROR_LESS_THAN_MIN_DURATION: i32 = 1;
/// Start code the engine returns when its licence check fails.
pub const VENDOR_START_ERR_LICENCE_VERIFICATION_FAILED: i32 = -5;

/// Statically typed adapter over the third-party capture SDK.
pub trait CaptureEngine: Send + Sync {
    /// Binds the engine and registers the sink for asynchronous events.
    fn init(&self, events: Weak<dyn EngineEvents>) -> Result<(), AppError>;
    /// Returns the raw vendor start code.
    fn start_record(&self, path: &str, config: &AudioConfig) -> i32;
    fn stop_record(&self);
}

/// Inbound callbacks delivered on the engine's own thread.
pub trait EngineEvents: Send + Sync {
    fn on_progress(&self, elapsed_ms: u64);
    /// Input level in decibels, reported periodically while recording.
    fn on_amplitude_changed(&self, db: i32);
    fn on_complete(&self, result: VendorRecordResult);
}

/// Host-facing recorder callbacks.
pub trait RecordListener: Send + Sync {
    fn on_record_time(&self, elapsed_ms: u64);
    fn on_amplitude_changed(&self, _db: i32) {}
    fn on_completed(&self, result: RecordResultCode, output_path: Option<&str>);
}
