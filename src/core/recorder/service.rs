use crate::core::recorder::engine::{CaptureEngine, RecordListener};
use crate::core::recorder::signature::{SignatureChecker, SignatureCodeTable};
use crate::core::recorder::translator::ResultTranslator;
use crate::domain::models::RecordResultCode;
use crate::domain::state_machine::RecordingState;
use crate::infra::storage::output_path::default_audio_path;
use crate::state::RecordingSession;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use uuid::Uuid;

/// Completion callback handed to [`RecorderService::start_record`]. Called once per start.
pub trait AudioRecorderListener: Send + Sync {
    fn on_completed(&self, result: RecordResultCode, output_path: Option<&str>, duration_ms: u64);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineKind {
    Vendor,
    Fallback,
}

struct Backend {
    translator: Arc<ResultTranslator>,
    kind: EngineKind,
}

/// Audio recorder front: busy detection, default paths, cancel and engine fallback
/// on top of a [`ResultTranslator`].
pub struct RecorderService {
    backend: Option<Backend>,
    output_root: PathBuf,
    session: Mutex<Option<RecordingSession>>,
    current_time_ms: AtomicU64,
    current_power: AtomicI32,
}

impl RecorderService {
    pub fn new(
        vendor: Arc<dyn CaptureEngine>,
        fallback: Option<Arc<dyn CaptureEngine>>,
        signature: Arc<dyn SignatureChecker>,
        codes: SignatureCodeTable,
        output_root: impl Into<PathBuf>,
    ) -> Arc<Self> {
        let backend = match ResultTranslator::attach(vendor, signature.clone(), codes.clone()) {
            Ok(translator) => Some(Backend {
                translator,
                kind: EngineKind::Vendor,
            }),
            Err(error) => {
                tracing::warn!("can not create vendor audio recorder: {error}");
                fallback.and_then(|engine| {
                    match ResultTranslator::attach(engine, signature, codes) {
                        Ok(translator) => Some(Backend {
                            translator,
                            kind: EngineKind::Fallback,
                        }),
                        Err(error) => {
                            tracing::error!("fallback audio recorder unavailable: {error}");
                            None
                        }
                    }
                })
            }
        };

        let service = Arc::new(Self {
            backend,
            output_root: output_root.into(),
            session: Mutex::new(None),
            current_time_ms: AtomicU64::new(0),
            current_power: AtomicI32::new(0),
        });
        if let Some(backend) = &service.backend {
            let listener = Arc::downgrade(&service) as Weak<dyn RecordListener>;
            backend.translator.set_listener(Some(listener));
        }
        service
    }

    pub fn engine_kind(&self) -> Option<EngineKind> {
        self.backend.as_ref().map(|backend| backend.kind)
    }

    /// False once stop has been requested, even before the engine completes.
    pub fn is_recording(&self) -> bool {
        self.session
            .lock()
            .as_ref()
            .is_some_and(|session| !session.stopping)
    }

    /// Last progress tick of the current or most recent session.
    pub fn current_time_ms(&self) -> u64 {
        self.current_time_ms.load(Ordering::SeqCst)
    }

    /// Last input level in decibels reported by the engine.
    pub fn current_power(&self) -> i32 {
        self.current_power.load(Ordering::SeqCst)
    }

    pub fn session_id(&self) -> Option<Uuid> {
        self.session.lock().as_ref().map(|session| session.session_id)
    }

    pub fn recording_state(&self) -> RecordingState {
        self.backend
            .as_ref()
            .map(|backend| backend.translator.state())
            .unwrap_or(RecordingState::Idle)
    }

    pub fn start_record(
        &self,
        path: Option<&str>,
        enable_ai_denoise: bool,
        listener: Arc<dyn AudioRecorderListener>,
    ) {
        tracing::info!("start record filepath: {path:?}");
        let stale = {
            let mut current = self.session.lock();
            match current.as_ref().map(|session| session.stopping) {
                Some(false) => {
                    drop(current);
                    listener.on_completed(RecordResultCode::ErrorRecording, None, 0);
                    return;
                }
                Some(true) => current.take(),
                None => None,
            }
        };
        if let Some(stale) = stale {
            tracing::warn!(
                session_id = %stale.session_id,
                "engine never completed the stopped session, abandoning it"
            );
            self.abandon_session(stale, RecordResultCode::ErrorRecordInnerFail);
        }

        let (translator, output_path) = {
            let mut current = self.session.lock();
            if current.is_some() {
                drop(current);
                listener.on_completed(RecordResultCode::ErrorRecording, None, 0);
                return;
            }

            let output_path = match path.filter(|value| !value.trim().is_empty()) {
                Some(value) => PathBuf::from(value),
                None => match default_audio_path(&self.output_root) {
                    Ok(generated) => generated,
                    Err(error) => {
                        drop(current);
                        tracing::warn!("no storage for audio file: {error}");
                        listener.on_completed(RecordResultCode::ErrorStorageUnavailable, None, 0);
                        return;
                    }
                },
            };

            let Some(backend) = &self.backend else {
                drop(current);
                listener.on_completed(RecordResultCode::ErrorRecordInnerFail, None, 0);
                return;
            };
            if enable_ai_denoise && backend.kind == EngineKind::Fallback {
                drop(current);
                listener.on_completed(RecordResultCode::ErrorUseAiDenoiseNoLiteavSdk, None, 0);
                return;
            }

            backend.translator.enable_ai_denoise(enable_ai_denoise);
            self.current_time_ms.store(0, Ordering::SeqCst);
            self.current_power.store(0, Ordering::SeqCst);
            let session = RecordingSession::new(output_path, enable_ai_denoise, listener);
            tracing::info!(session_id = %session.session_id, "recording session accepted");
            let output_path = session.output_path_str();
            *current = Some(session);
            (backend.translator.clone(), output_path)
        };

        if let Err(error) = translator.start_record(&output_path) {
            tracing::warn!("engine refused start: {error}");
            self.complete_session(RecordResultCode::ErrorRecording, None);
        }
    }

    /// Forwards the stop once per session. A later start abandons the session
    /// if the engine has not completed it by then.
    pub fn stop_record(&self) {
        tracing::info!("stop record");
        {
            let mut current = self.session.lock();
            match current.as_mut() {
                Some(session) if !session.stopping => session.stopping = true,
                _ => return,
            }
        }
        if let Some(backend) = &self.backend {
            if let Err(error) = backend.translator.stop_record() {
                tracing::warn!("stop ignored: {error}");
            }
        }
    }

    /// Completes the session with `ErrorCancel`; the engine's own completion is discarded.
    pub fn cancel_record(&self) {
        tracing::info!("cancel record");
        let Some(session) = self.session.lock().take() else {
            return;
        };
        if !session.stopping {
            if let Some(backend) = &self.backend {
                if let Err(error) = backend.translator.stop_record() {
                    tracing::warn!("cancel stop ignored: {error}");
                }
            }
        }
        self.abandon_session(session, RecordResultCode::ErrorCancel);
    }

    fn abandon_session(&self, session: RecordingSession, result: RecordResultCode) {
        if let Some(backend) = &self.backend {
            backend.translator.abandon();
        }
        tracing::info!(
            session_id = %session.session_id,
            elapsed_ms = session.elapsed_ms(),
            ai_denoise = session.ai_denoise,
            "record session closed without engine completion: {result:?}"
        );
        let path = session.output_path_str();
        session
            .listener
            .on_completed(result, Some(&path), session.last_record_time_ms);
    }

    fn complete_session(&self, result: RecordResultCode, path: Option<&str>) {
        let Some(session) = self.session.lock().take() else {
            tracing::debug!("completion {result:?} without an active session, dropped");
            return;
        };
        if !result.is_success() {
            tracing::error!(session_id = %session.session_id, "on record completed. result: {result:?}");
        }
        tracing::info!(
            session_id = %session.session_id,
            elapsed_ms = session.elapsed_ms(),
            ai_denoise = session.ai_denoise,
            "on record completed. path: {path:?}"
        );
        session
            .listener
            .on_completed(result, path, session.last_record_time_ms);
    }
}

impl RecordListener for RecorderService {
    fn on_record_time(&self, elapsed_ms: u64) {
        self.current_time_ms.store(elapsed_ms, Ordering::SeqCst);
        if let Some(session) = self.session.lock().as_mut() {
            session.last_record_time_ms = elapsed_ms;
        }
    }

    fn on_amplitude_changed(&self, db: i32) {
        self.current_power.store(db, Ordering::SeqCst);
    }

    fn on_completed(&self, result: RecordResultCode, output_path: Option<&str>) {
        self.complete_session(result, output_path);
    }
}
