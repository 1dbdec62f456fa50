use crate::core::recorder::service::AudioRecorderListener;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// One host-visible audio recording, from accepted start until its single completion.
#[derive(Clone)]
pub struct RecordingSession {
    pub session_id: Uuid,
    pub output_path: PathBuf,
    pub started_at: DateTime<Utc>,
    pub ai_denoise: bool,
    pub last_record_time_ms: u64,
    /// Set once stop has been forwarded; the session then only awaits completion.
    pub stopping: bool,
    pub listener: Arc<dyn AudioRecorderListener>,
}

impl RecordingSession {
    pub fn new(
        output_path: PathBuf,
        ai_denoise: bool,
        listener: Arc<dyn AudioRecorderListener>,
    ) -> Self {
        Self {
            session_id: Uuid::new_v4(),
            output_path,
            started_at: Utc::now(),
            ai_denoise,
            last_record_time_ms: 0,
            stopping: false,
            listener,
        }
    }

    pub fn output_path_str(&self) -> String {
        self.output_path.to_string_lossy().to_string()
    }

    pub fn elapsed_ms(&self) -> i64 {
        (Utc::now() - self.started_at).num_milliseconds()
    }
}
