use crate::wire::HealthRes;

/// Simple health service used by the REST API and the CLI.
///
/// Provides a standardised way to report that the clinic records service is up.
#[derive(Clone)]
pub struct HealthService;

impl HealthService {
    /// Static method to check health without creating an instance.
    ///
    /// # Returns
    /// A `HealthRes` indicating the service is healthy.
    pub fn check_health() -> HealthRes {
        HealthRes {
            ok: true,
            message: "Clinic records service is alive".into(),
        }
    }
}
