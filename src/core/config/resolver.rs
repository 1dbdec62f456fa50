use crate::core::config::color::parse_rgb;
use crate::domain::models::{ExplicitConfig, RecordMode, ResolvedConfig, VideoQuality};
use crate::infra::storage::config_resource::ConfigResource;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::sync::{Arc, OnceLock};

pub const DEFAULT_MAX_RECORD_DURATION_MS: u32 = 15_000;
pub const DEFAULT_MIN_RECORD_DURATION_MS: u32 = 2_000;
pub const MAX_RECORD_DURATION_FLOOR_MS: u32 = 3_000;
pub const DEFAULT_PRIMARY_THEME_COLOR: &str = "#147AFF";
const DEFAULT_THEME_RGB: u32 = 0x147AFF;

pub const KEY_SUPPORT_BEAUTY: &str = "support_record_beauty";
pub const KEY_SUPPORT_ASPECT: &str = "support_record_aspect";
pub const KEY_SUPPORT_TORCH: &str = "support_record_torch";
pub const KEY_SUPPORT_SCROLL_FILTER: &str = "support_record_scroll_filter";
pub const KEY_PRIMARY_THEME_COLOR: &str = "primary_theme_color";
pub const KEY_MAX_RECORD_DURATION: &str = "max_record_duration_ms";
pub const KEY_MIN_RECORD_DURATION: &str = "min_record_duration_ms";
pub const KEY_VIDEO_QUALITY: &str = "video_quality";
pub const KEY_RECORD_MODE: &str = "record_mode";
pub const KEY_DEFAULT_FRONT_CAMERA: &str = "is_default_front_camera";

type JsonObject = Map<String, Value>;

/// Resolves recorder settings from explicit host config, then the JSON
/// override, then compiled defaults. Every getter is total.
///
/// The bundled resource is read at most once, on first use. Concurrent first
/// callers block on that single read.
pub struct ConfigResolver {
    resource: Box<dyn ConfigResource>,
    bundled: OnceLock<Option<Arc<JsonObject>>>,
    json_override: RwLock<Option<Arc<JsonObject>>>,
    explicit: RwLock<Option<ExplicitConfig>>,
}

impl ConfigResolver {
    pub fn new(resource: impl ConfigResource + 'static) -> Self {
        Self {
            resource: Box::new(resource),
            bundled: OnceLock::new(),
            json_override: RwLock::new(None),
            explicit: RwLock::new(None),
        }
    }

    /// Loads the bundled override if it has not been loaded yet.
    pub fn ensure_loaded(&self) {
        self.bundled_layer();
    }

    pub fn set_explicit_config(&self, config: Option<ExplicitConfig>) {
        *self.explicit.write() = config;
    }

    pub fn explicit_config(&self) -> Option<ExplicitConfig> {
        self.explicit.read().clone()
    }

    /// Replaces the JSON layer. Empty or unparsable input keeps the current one.
    pub fn set_json_override(&self, json: &str) {
        if json.trim().is_empty() {
            return;
        }
        tracing::info!("set recorder config json = {json}");
        match parse_object(json) {
            Some(object) => *self.json_override.write() = Some(Arc::new(object)),
            None => tracing::warn!("ignoring malformed recorder config override"),
        }
    }

    pub fn theme_color(&self) -> u32 {
        self.layers().theme_color()
    }

    pub fn max_record_duration_ms(&self) -> u32 {
        self.layers().max_record_duration_ms()
    }

    /// Never exceeds [`Self::max_record_duration_ms`].
    pub fn min_record_duration_ms(&self) -> u32 {
        self.layers().min_record_duration_ms()
    }

    pub fn video_quality(&self) -> VideoQuality {
        self.layers().video_quality()
    }

    pub fn record_mode(&self) -> RecordMode {
        self.layers().record_mode()
    }

    pub fn is_default_front_camera(&self) -> bool {
        self.layers()
            .flag(|config| config.default_front_camera, KEY_DEFAULT_FRONT_CAMERA, false)
    }

    pub fn is_support_record_beauty(&self) -> bool {
        self.layers()
            .flag(|config| config.support_beauty, KEY_SUPPORT_BEAUTY, true)
    }

    pub fn is_support_record_aspect(&self) -> bool {
        self.layers()
            .flag(|config| config.support_aspect, KEY_SUPPORT_ASPECT, true)
    }

    pub fn is_support_record_torch(&self) -> bool {
        self.layers()
            .flag(|config| config.support_torch, KEY_SUPPORT_TORCH, true)
    }

    pub fn is_support_record_scroll_filter(&self) -> bool {
        self.layers().flag(
            |config| config.support_scroll_filter,
            KEY_SUPPORT_SCROLL_FILTER,
            true,
        )
    }

    /// Every field is derived from one read of the explicit and JSON layers.
    pub fn resolve(&self) -> ResolvedConfig {
        let layers = self.layers();
        ResolvedConfig {
            theme_color: layers.theme_color(),
            max_record_duration_ms: layers.max_record_duration_ms(),
            min_record_duration_ms: layers.min_record_duration_ms(),
            video_quality: layers.video_quality(),
            record_mode: layers.record_mode(),
            default_front_camera: layers.flag(
                |config| config.default_front_camera,
                KEY_DEFAULT_FRONT_CAMERA,
                false,
            ),
            support_beauty: layers.flag(|config| config.support_beauty, KEY_SUPPORT_BEAUTY, true),
            support_aspect: layers.flag(|config| config.support_aspect, KEY_SUPPORT_ASPECT, true),
            support_torch: layers.flag(|config| config.support_torch, KEY_SUPPORT_TORCH, true),
            support_scroll_filter: layers.flag(
                |config| config.support_scroll_filter,
                KEY_SUPPORT_SCROLL_FILTER,
                true,
            ),
        }
    }

    fn layers(&self) -> Layers {
        Layers {
            explicit: self.explicit.read().clone(),
            json: self.json_layer(),
        }
    }

    fn bundled_layer(&self) -> Option<Arc<JsonObject>> {
        self.bundled
            .get_or_init(|| {
                let json = match self.resource.read_text() {
                    Ok(json) => json,
                    Err(error) => {
                        tracing::warn!("recorder config resource unavailable: {error}");
                        return None;
                    }
                };
                tracing::info!("init default recorder config json = {json}");
                if json.trim().is_empty() {
                    return None;
                }
                let parsed = parse_object(&json);
                if parsed.is_none() {
                    tracing::warn!("bundled recorder config is not a JSON object, ignoring");
                }
                parsed.map(Arc::new)
            })
            .clone()
    }

    fn json_layer(&self) -> Option<Arc<JsonObject>> {
        if let Some(layer) = self.json_override.read().clone() {
            return Some(layer);
        }
        self.bundled_layer()
    }
}

/// One consistent view of the explicit and JSON sources.
struct Layers {
    explicit: Option<ExplicitConfig>,
    json: Option<Arc<JsonObject>>,
}

impl Layers {
    fn theme_color(&self) -> u32 {
        let color = self
            .explicit_field(|config| config.primary_color.clone())
            .or_else(|| {
                self.json_value(KEY_PRIMARY_THEME_COLOR, |value| {
                    value.as_str().map(str::to_string)
                })
            })
            .unwrap_or_else(|| DEFAULT_PRIMARY_THEME_COLOR.to_string());
        parse_rgb(&color).unwrap_or_else(|error| {
            tracing::warn!("theme color fallback to default: {error}");
            DEFAULT_THEME_RGB
        })
    }

    fn max_record_duration_ms(&self) -> u32 {
        self.explicit_field(|config| config.max_video_duration)
            .or_else(|| self.json_duration(KEY_MAX_RECORD_DURATION))
            .unwrap_or(DEFAULT_MAX_RECORD_DURATION_MS)
            .max(MAX_RECORD_DURATION_FLOOR_MS)
    }

    fn min_record_duration_ms(&self) -> u32 {
        self.explicit_field(|config| config.min_video_duration)
            .or_else(|| self.json_duration(KEY_MIN_RECORD_DURATION))
            .unwrap_or(DEFAULT_MIN_RECORD_DURATION_MS)
            .min(self.max_record_duration_ms())
    }

    fn video_quality(&self) -> VideoQuality {
        self.explicit_field(|config| config.video_quality)
            .or_else(|| {
                self.json_value(KEY_VIDEO_QUALITY, json_int)
                    .map(VideoQuality::from_integer)
            })
            .unwrap_or(VideoQuality::Medium)
    }

    fn record_mode(&self) -> RecordMode {
        self.explicit_field(|config| config.record_mode)
            .or_else(|| {
                self.json_value(KEY_RECORD_MODE, json_int)
                    .map(RecordMode::from_integer)
            })
            .unwrap_or(RecordMode::Mixed)
    }

    fn flag(
        &self,
        field: impl FnOnce(&ExplicitConfig) -> Option<bool>,
        key: &str,
        default: bool,
    ) -> bool {
        self.explicit_field(field)
            .or_else(|| self.json_value(key, json_bool))
            .unwrap_or(default)
    }

    fn explicit_field<T>(&self, field: impl FnOnce(&ExplicitConfig) -> Option<T>) -> Option<T> {
        self.explicit.as_ref().and_then(field)
    }

    fn json_value<T>(&self, key: &str, extract: impl FnOnce(&Value) -> Option<T>) -> Option<T> {
        let value = self.json.as_ref()?.get(key)?;
        let extracted = extract(value);
        if extracted.is_none() {
            tracing::warn!("recorder config key {key} has unexpected value {value}, using default");
        }
        extracted
    }

    fn json_duration(&self, key: &str) -> Option<u32> {
        self.json_value(key, json_int)
            .map(|value| u32::try_from(value.max(0)).unwrap_or(u32::MAX))
    }
}

/// Integers, whole-number floats and numeric strings.
fn json_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && float.abs() <= i64::MAX as f64)
                .map(|float| float as i64)
        }),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>().ok().or_else(|| {
                text.parse::<f64>()
                    .ok()
                    .filter(|float| float.fract() == 0.0 && float.abs() <= i64::MAX as f64)
                    .map(|float| float as i64)
            })
        }
        _ => None,
    }
}

/// Booleans and the strings `"true"`/`"false"` in any case.
fn json_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(text) if text.trim().eq_ignore_ascii_case("true") => Some(true),
        Value::String(text) if text.trim().eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn parse_object(json: &str) -> Option<JsonObject> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(object)) => Some(object),
        Ok(_) => None,
        Err(error) => {
            tracing::debug!("recorder config parse error: {error}");
            None
        }
    }
}
