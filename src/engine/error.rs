use thiserror::Error;

/// The only fatal failures in the renderer: a shader stage refusing to
/// compile, or the program refusing to link. Both carry the driver's
/// diagnostic untouched and abort startup; everything else in the pipeline
/// degrades by absence instead of erroring.
#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("{stage} shader compile error: {log}")]
    Compile { stage: &'static str, log: String },

    #[error("shader program link error: {log}")]
    Link { log: String },
}
