use crate::domain::models::{AppError, RecordResultCode};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state", content = "result")]
pub enum RecordingState {
    Idle,
    Recording,
    Completed(RecordResultCode),
}

#[derive(Debug, Clone)]
pub struct RecordingMachine {
    state: RecordingState,
}

impl RecordingMachine {
    pub fn new() -> Self {
        Self {
            state: RecordingState::Idle,
        }
    }

    pub fn state(&self) -> RecordingState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == RecordingState::Recording
    }

    /// A finished session may be restarted; only an active one is rejected.
    pub fn start(&mut self) -> Result<(), AppError> {
        if self.state == RecordingState::Recording {
            return Err(AppError::new(
                "INVALID_RECORDING_STATE",
                "a recording session is already active",
                Some("wait for the current session to complete first".to_string()),
            ));
        }
        self.state = RecordingState::Recording;
        Ok(())
    }

    pub fn ensure_recording(&self) -> Result<(), AppError> {
        if self.state != RecordingState::Recording {
            return Err(AppError::new(
                "INVALID_RECORDING_STATE",
                "only an active recording can be stopped",
                Some("start recording before stop".to_string()),
            ));
        }
        Ok(())
    }

    /// Completion is engine-driven and accepted from any state.
    pub fn complete(&mut self, result: RecordResultCode) {
        self.state = RecordingState::Completed(result);
    }

    pub fn reset(&mut self) {
        self.state = RecordingState::Idle;
    }
}

impl Default for RecordingMachine {
    fn default() -> Self {
        Self::new()
    }
}
