use crate::core::Endpoint;
use crate::utils::error::{Result, ScaffoldError};

/// Placeholder for request handling that has not been written yet.
///
/// Every call fails with `ScaffoldError::Unimplemented`; it is never a no-op.
#[derive(Debug, Clone)]
pub struct UnimplementedEndpoint {
    name: String,
}

impl UnimplementedEndpoint {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Endpoint for UnimplementedEndpoint {
    type Input = serde_json::Value;
    type Output = serde_json::Value;

    fn execute(&self, _input: Self::Input) -> Result<Self::Output> {
        tracing::error!("Endpoint '{}' invoked but has no implementation", self.name);
        Err(ScaffoldError::Unimplemented {
            operation: format!("endpoint '{}'", self.name),
        })
    }
}
