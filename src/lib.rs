//! Recorder configuration resolution and capture-engine result translation.
//!
//! [`ConfigResolver`] layers explicit host settings over a JSON override and
//! compiled defaults. [`ResultTranslator`] turns a vendor capture engine's codes
//! and callbacks into [`RecordResultCode`]s for a host listener, and
//! [`RecorderService`] adds the audio-recorder session rules on top.

pub mod core;
pub mod domain;
pub mod infra;
pub mod state;

pub use crate::core::config::resolver::ConfigResolver;
pub use crate::core::recorder::engine::{CaptureEngine, EngineEvents, RecordListener};
pub use crate::core::recorder::service::{AudioRecorderListener, EngineKind, RecorderService};
pub use crate::core::recorder::signature::{SignatureChecker, SignatureCodeTable};
pub use crate::core::recorder::translator::ResultTranslator;
pub use crate::domain::models::{
    AppError, AudioConfig, ExplicitConfig, RecordMode, RecordResultCode, ResolvedConfig,
    VendorRecordResult, VideoQuality,
};
pub use crate::domain::state_machine::RecordingState;
pub use crate::infra::logging::init_tracing;
pub use crate::infra::storage::config_resource::{
    ConfigResource, FileConfigResource, StaticConfigResource,
};
