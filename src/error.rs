use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while building a simulation.
///
/// The per-frame step never fails; degenerate geometry is handled by the
/// collision resolver's fallback rules instead.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Rejection sampling could not fit another ball into the arena.
    #[error(
        "placed {placed} of {requested} balls; no free spot found after {attempts} attempts \
         (try fewer balls, a smaller radius or a smaller separation)"
    )]
    PlacementFailed {
        placed: usize,
        requested: usize,
        attempts: u32,
    },

    /// A color string was neither `rgb(r, g, b)` nor `#rrggbb`.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// Config file was not valid JSON for `SimConfig`.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Config file could not be read or written.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidConfig("radius must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid configuration"));
        assert!(msg.contains("radius"));
    }

    #[test]
    fn placement_failure_reports_progress() {
        let e = Error::PlacementFailed {
            placed: 3,
            requested: 50,
            attempts: 100,
        };
        let msg = e.to_string();
        assert!(msg.contains("3 of 50"));
        assert!(msg.contains("100 attempts"));
    }
}
