use crate::domain::models::RecordResultCode;
use std::collections::HashMap;

pub const SIGNATURE_RESULT_SUCCESS: i32 = 0;

/// Cached outcome of the external signature verification.
pub trait SignatureChecker: Send + Sync {
    fn set_signature_result(&self) -> i32;
}

/// Maps signature-checker failure codes into [`RecordResultCode`].
///
/// Explicit entries take precedence; other codes are shifted by `offset` and
/// looked up by value, collapsing to `ErrorRecordInnerFail` when unknown.
#[derive(Debug, Clone, Default)]
pub struct SignatureCodeTable {
    offset: i32,
    entries: HashMap<i32, RecordResultCode>,
}

impl SignatureCodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(offset: i32) -> Self {
        Self {
            offset,
            entries: HashMap::new(),
        }
    }

    pub fn insert(mut self, checker_code: i32, result: RecordResultCode) -> Self {
        self.entries.insert(checker_code, result);
        self
    }

    pub fn translate(&self, checker_code: i32) -> RecordResultCode {
        if let Some(result) = self.entries.get(&checker_code) {
            return *result;
        }
        checker_code
            .checked_add(self.offset)
            .map(RecordResultCode::from_code)
            .unwrap_or(RecordResultCode::ErrorRecordInnerFail)
    }
}
