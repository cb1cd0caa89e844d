use crate::types::HealthRes;

/// Simple health service shared by every API surface.
///
/// Provides a standardised way to report that the TextLens service is up.
#[derive(Clone, Default)]
pub struct HealthService;

impl HealthService {
    /// Check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "TextLens is alive".into(),
        }
    }
}
