use crate::core::recorder::engine::{
    CaptureEngine, EngineEvents, RecordListener, VENDOR_ERROR_LESS_THAN_MIN_DURATION,
    VENDOR_START_ERR_LICENCE_VERIFICATION_FAILED,
};
use crate::core::recorder::signature::{
    SignatureChecker, SignatureCodeTable, SIGNATURE_RESULT_SUCCESS,
};
use crate::domain::models::{AppError, AudioConfig, RecordResultCode, VendorRecordResult};
use crate::domain::state_machine::{RecordingMachine, RecordingState};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// Maps a vendor completion code onto the domain vocabulary.
pub fn translate_completion(ret_code: i32) -> RecordResultCode {
    if ret_code == VENDOR_ERROR_LESS_THAN_MIN_DURATION {
        RecordResultCode::ErrorLessThanMinDuration
    } else if ret_code >= 0 {
        RecordResultCode::Success
    } else {
        RecordResultCode::ErrorRecordInnerFail
    }
}

/// Adapts one capture engine to the host listener contract.
///
/// The listener is held weakly; the host owns it and should clear it with
/// `set_listener(None)` before tearing it down. Listener callbacks never run
/// under an internal lock.
pub struct ResultTranslator {
    engine: Arc<dyn CaptureEngine>,
    signature: Arc<dyn SignatureChecker>,
    codes: SignatureCodeTable,
    listener: RwLock<Option<Weak<dyn RecordListener>>>,
    ai_denoise: AtomicBool,
    machine: Mutex<RecordingMachine>,
}

impl ResultTranslator {
    pub fn attach(
        engine: Arc<dyn CaptureEngine>,
        signature: Arc<dyn SignatureChecker>,
        codes: SignatureCodeTable,
    ) -> Result<Arc<Self>, AppError> {
        let translator = Arc::new(Self {
            engine,
            signature,
            codes,
            listener: RwLock::new(None),
            ai_denoise: AtomicBool::new(false),
            machine: Mutex::new(RecordingMachine::new()),
        });
        let events = Arc::downgrade(&translator) as Weak<dyn EngineEvents>;
        tracing::info!("capture engine init");
        translator.engine.init(events)?;
        Ok(translator)
    }

    pub fn set_listener(&self, listener: Option<Weak<dyn RecordListener>>) {
        *self.listener.write() = listener;
    }

    /// Applies to the next [`Self::start_record`] only.
    pub fn enable_ai_denoise(&self, enable: bool) {
        tracing::info!("{} ai denoise", if enable { "enable" } else { "disable" });
        self.ai_denoise.store(enable, Ordering::SeqCst);
    }

    pub fn ai_denoise_enabled(&self) -> bool {
        self.ai_denoise.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> RecordingState {
        self.machine.lock().state()
    }

    /// Starts the engine. A non-negative vendor code only means the engine
    /// accepted the request; completion arrives through [`EngineEvents`].
    pub fn start_record(&self, path: &str) -> Result<(), AppError> {
        self.machine.lock().start()?;
        let config = AudioConfig {
            enable_ai_denoise: self.ai_denoise_enabled(),
        };
        tracing::info!("start record path={path} ai_denoise={}", config.enable_ai_denoise);
        let code = self.engine.start_record(path, &config);
        tracing::info!("start record result: {code}");

        if code == VENDOR_START_ERR_LICENCE_VERIFICATION_FAILED {
            let result = self.licence_failure_result();
            self.finish(result, None);
        } else if code < 0 {
            self.finish(RecordResultCode::ErrorRecordInnerFail, None);
        }
        Ok(())
    }

    /// Fire-and-forget; the terminal state is only known once the engine completes.
    pub fn stop_record(&self) -> Result<(), AppError> {
        self.machine.lock().ensure_recording()?;
        tracing::info!("stop record");
        self.engine.stop_record();
        Ok(())
    }

    /// Drops the current session without waiting for the engine. A completion
    /// that arrives afterwards is discarded.
    pub fn abandon(&self) {
        let mut machine = self.machine.lock();
        if machine.is_recording() {
            tracing::info!("abandon active record session");
            machine.reset();
        }
    }

    fn licence_failure_result(&self) -> RecordResultCode {
        tracing::info!("handle licence verification failed");
        let checker_code = self.signature.set_signature_result();
        if checker_code == SIGNATURE_RESULT_SUCCESS {
            RecordResultCode::ErrorUseAiDenoiseWrongSignature
        } else {
            self.codes.translate(checker_code)
        }
    }

    fn listener(&self) -> Option<Arc<dyn RecordListener>> {
        self.listener.read().as_ref().and_then(Weak::upgrade)
    }

    fn finish(&self, result: RecordResultCode, path: Option<&str>) {
        self.machine.lock().complete(result);
        if !result.is_success() {
            tracing::warn!("record completed with {result:?}");
        }
        if let Some(listener) = self.listener() {
            listener.on_completed(result, path);
        }
    }
}

impl EngineEvents for ResultTranslator {
    fn on_progress(&self, elapsed_ms: u64) {
        tracing::debug!("on progress = {elapsed_ms}");
        if !self.machine.lock().is_recording() {
            return;
        }
        if let Some(listener) = self.listener() {
            listener.on_record_time(elapsed_ms);
        }
    }

    fn on_amplitude_changed(&self, db: i32) {
        if !self.machine.lock().is_recording() {
            return;
        }
        if let Some(listener) = self.listener() {
            listener.on_amplitude_changed(db);
        }
    }

    fn on_complete(&self, result: VendorRecordResult) {
        tracing::info!(
            "on record complete. ret_code: {} path: {:?}",
            result.ret_code,
            result.video_path
        );
        if !self.machine.lock().is_recording() {
            tracing::debug!("completion outside an active session, discarded");
            return;
        }
        self.finish(
            translate_completion(result.ret_code),
            result.video_path.as_deref(),
        );
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::{translate_completion, ResultTranslator};
    use crate::core::recorder::engine::{CaptureEngine, EngineEvents, RecordListener};
    use crate::core::recorder::signature::{SignatureChecker, SignatureCodeTable};
    use crate::domain::models::{AppError, AudioConfig, RecordResultCode, VendorRecordResult};
    use crate::domain::state_machine::RecordingState;
    use parking_lot::Mutex;
    use std::sync::{Arc, Weak};

    #[derive(Default)]
    pub(crate) struct FakeEngine {
        pub fail_init: bool,
        pub start_code: Mutex<i32>,
        pub events: Mutex<Option<Weak<dyn EngineEvents>>>,
        pub starts: Mutex<Vec<(String, AudioConfig)>>,
        pub stops: Mutex<usize>,
    }

    impl FakeEngine {
        pub fn failing_init() -> Self {
            Self {
                fail_init: true,
                ..Self::default()
            }
        }

        pub fn set_start_code(&self, code: i32) {
            *self.start_code.lock() = code;
        }

        pub fn progress(&self, elapsed_ms: u64) {
            let events = self.events.lock().clone();
            if let Some(events) = events.and_then(|weak| weak.upgrade()) {
                events.on_progress(elapsed_ms);
            }
        }

        pub fn amplitude(&self, db: i32) {
            let events = self.events.lock().clone();
            if let Some(events) = events.and_then(|weak| weak.upgrade()) {
                events.on_amplitude_changed(db);
            }
        }

        pub fn complete(&self, ret_code: i32, path: Option<&str>) {
            let events = self.events.lock().clone();
            if let Some(events) = events.and_then(|weak| weak.upgrade()) {
                events.on_complete(VendorRecordResult {
                    ret_code,
                    video_path: path.map(str::to_string),
                });
            }
        }
    }

    impl CaptureEngine for FakeEngine {
        fn init(&self, events: Weak<dyn EngineEvents>) -> Result<(), AppError> {
            if self.fail_init {
                return Err(AppError::new("ENGINE_UNAVAILABLE", "sdk not linked", None));
            }
            *self.events.lock() = Some(events);
            Ok(())
        }

        fn start_record(&self, path: &str, config: &AudioConfig) -> i32 {
            self.starts.lock().push((path.to_string(), *config));
            *self.start_code.lock()
        }

        fn stop_record(&self) {
            *self.stops.lock() += 1;
        }
    }

    pub(crate) struct FakeChecker(pub i32);

    impl SignatureChecker for FakeChecker {
        fn set_signature_result(&self) -> i32 {
            self.0
        }
    }

    #[derive(Default)]
    pub(crate) struct RecordingListener {
        pub times: Mutex<Vec<u64>>,
        pub levels: Mutex<Vec<i32>>,
        pub completions: Mutex<Vec<(RecordResultCode, Option<String>)>>,
    }

    impl RecordListener for RecordingListener {
        fn on_record_time(&self, elapsed_ms: u64) {
            self.times.lock().push(elapsed_ms);
        }

        fn on_amplitude_changed(&self, db: i32) {
            self.levels.lock().push(db);
        }

        fn on_completed(&self, result: RecordResultCode, output_path: Option<&str>) {
            self.completions
                .lock()
                .push((result, output_path.map(str::to_string)));
        }
    }

    fn setup(checker_code: i32) -> (Arc<FakeEngine>, Arc<ResultTranslator>, Arc<RecordingListener>) {
        let engine = Arc::new(FakeEngine::default());
        let translator = ResultTranslator::attach(
            engine.clone(),
            Arc::new(FakeChecker(checker_code)),
            SignatureCodeTable::new(),
        )
        .unwrap();
        let listener = Arc::new(RecordingListener::default());
        let weak: Weak<dyn RecordListener> = Arc::downgrade(&listener) as Weak<dyn RecordListener>;
        translator.set_listener(Some(weak));
        (engine, translator, listener)
    }

    #[test]
    fn completion_code_mapping() {
        assert_eq!(
            translate_completion(1),
            RecordResultCode::ErrorLessThanMinDuration
        );
        assert_eq!(translate_completion(0), RecordResultCode::Success);
        assert_eq!(translate_completion(7), RecordResultCode::Success);
        assert_eq!(translate_completion(-3), RecordResultCode::ErrorRecordInnerFail);
    }

    #[test]
    fn progress_and_completion_reach_listener() {
        let (engine, translator, listener) = setup(0);
        translator.start_record("/tmp/a.m4a").unwrap();
        assert_eq!(translator.state(), RecordingState::Recording);

        engine.progress(100);
        engine.progress(250);
        engine.complete(0, Some("/tmp/a.m4a"));

        assert_eq!(*listener.times.lock(), vec![100, 250]);
        assert_eq!(
            *listener.completions.lock(),
            vec![(RecordResultCode::Success, Some("/tmp/a.m4a".to_string()))]
        );
        assert_eq!(
            translator.state(),
            RecordingState::Completed(RecordResultCode::Success)
        );
    }

    #[test]
    fn too_short_sentinel_is_reported() {
        let (engine, translator, listener) = setup(0);
        translator.start_record("/tmp/b.m4a").unwrap();
        engine.complete(1, Some("/tmp/b.m4a"));
        assert_eq!(
            listener.completions.lock()[0].0,
            RecordResultCode::ErrorLessThanMinDuration
        );
    }

    #[test]
    fn licence_failure_with_valid_signature_reports_wrong_signature() {
        let (engine, translator, listener) = setup(0);
        engine.set_start_code(-5);
        translator.start_record("/tmp/c.m4a").unwrap();
        assert_eq!(
            *listener.completions.lock(),
            vec![(RecordResultCode::ErrorUseAiDenoiseWrongSignature, None)]
        );
        assert_eq!(
            translator.state(),
            RecordingState::Completed(RecordResultCode::ErrorUseAiDenoiseWrongSignature)
        );
    }

    #[test]
    fn licence_failure_translates_checker_code() {
        let (engine, translator, listener) = setup(-10);
        engine.set_start_code(-5);
        translator.start_record("/tmp/d.m4a").unwrap();
        assert_eq!(
            listener.completions.lock()[0].0,
            RecordResultCode::ErrorUseAiDenoiseNoSignature
        );
    }

    #[test]
    fn other_negative_start_is_inner_failure() {
        let (engine, translator, listener) = setup(0);
        engine.set_start_code(-2);
        translator.start_record("/tmp/e.m4a").unwrap();
        assert_eq!(
            listener.completions.lock()[0].0,
            RecordResultCode::ErrorRecordInnerFail
        );
    }

    #[test]
    fn ai_denoise_flag_reaches_next_start() {
        let (engine, translator, _listener) = setup(0);
        translator.enable_ai_denoise(true);
        translator.start_record("/tmp/f.m4a").unwrap();
        assert!(engine.starts.lock()[0].1.enable_ai_denoise);
    }

    #[test]
    fn stop_requires_active_recording() {
        let (engine, translator, _listener) = setup(0);
        assert!(translator.stop_record().is_err());
        translator.start_record("/tmp/g.m4a").unwrap();
        translator.stop_record().unwrap();
        assert_eq!(*engine.stops.lock(), 1);
        assert!(translator.start_record("/tmp/h.m4a").is_err());
    }

    #[test]
    fn events_without_listener_are_dropped() {
        let (engine, translator, listener) = setup(0);
        translator.set_listener(None);
        translator.start_record("/tmp/i.m4a").unwrap();
        engine.progress(10);
        engine.complete(0, None);
        assert!(listener.times.lock().is_empty());
        assert!(listener.completions.lock().is_empty());
        assert_eq!(
            translator.state(),
            RecordingState::Completed(RecordResultCode::Success)
        );
    }

    #[test]
    fn dropped_listener_is_not_called() {
        let (engine, translator, listener) = setup(0);
        drop(listener);
        translator.start_record("/tmp/j.m4a").unwrap();
        engine.progress(10);
        engine.complete(0, None);
        assert!(translator.state() != RecordingState::Recording);
    }

    #[test]
    fn amplitude_is_forwarded_only_while_recording() {
        let (engine, translator, listener) = setup(0);
        engine.amplitude(-40);
        translator.start_record("/tmp/k.m4a").unwrap();
        engine.amplitude(-32);
        engine.amplitude(-18);
        engine.complete(0, None);
        engine.amplitude(-50);
        assert_eq!(*listener.levels.lock(), vec![-32, -18]);
    }

    #[test]
    fn abandoned_session_ignores_late_completion() {
        let (engine, translator, listener) = setup(0);
        translator.start_record("/tmp/l.m4a").unwrap();
        translator.stop_record().unwrap();
        translator.abandon();
        assert_eq!(translator.state(), RecordingState::Idle);

        engine.progress(900);
        engine.complete(0, Some("/tmp/l.m4a"));
        assert!(listener.times.lock().is_empty());
        assert!(listener.completions.lock().is_empty());

        translator.start_record("/tmp/m.m4a").unwrap();
        assert_eq!(engine.starts.lock().len(), 2);
    }

    #[test]
    fn duplicate_completion_is_reported_once() {
        let (engine, translator, listener) = setup(0);
        translator.start_record("/tmp/n.m4a").unwrap();
        engine.complete(0, Some("/tmp/n.m4a"));
        engine.complete(-3, None);
        assert_eq!(listener.completions.lock().len(), 1);
        assert_eq!(
            translator.state(),
            RecordingState::Completed(RecordResultCode::Success)
        );
    }

    #[test]
    fn engine_init_failure_is_returned() {
        let result = ResultTranslator::attach(
            Arc::new(FakeEngine::failing_init()),
            Arc::new(FakeChecker(0)),
            SignatureCodeTable::new(),
        );
        assert_eq!(result.err().unwrap().code, "ENGINE_UNAVAILABLE");
    }
}
