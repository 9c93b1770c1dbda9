use thiserror::Error;

use crate::fruit::FruitKind;

/// Reasons a tart session cannot start.
///
/// None of these are recoverable: without a complete roster, a tart base and
/// a single camera the placement rules are undefined.  Commands issued in the
/// wrong state are not errors; they are ignored.
#[derive(Debug, Error)]
pub enum TartError {
    #[error("expecting scene to have exactly one camera, but it has {0}")]
    CameraCount(usize),
    #[error("tart shell base '{0}' not found")]
    MissingTartBase(String),
    #[error("tart shell rim '{0}' not found")]
    MissingTartRim(String),
    #[error("{0} not found")]
    MissingFruit(FruitKind),
    #[error("scene has {count} transforms named '{name}', expected exactly one")]
    DuplicateTransform { name: String, count: usize },
    #[error("roster is empty")]
    EmptyRoster,
    #[error("{0} appears more than once in the roster")]
    RepeatedKind(FruitKind),
    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
