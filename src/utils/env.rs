use std::env;

/// An enum representing the current environment that this tool is running in.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PlaneBotEnvironment {
    Dev,
    Prod,
}

impl PlaneBotEnvironment {
    /// Returns the current environment based on the `PLANE_ENV` environment variable.
    pub fn current() -> Self {
        match env::var("PLANE_ENV").as_deref() {
            Ok("dev") => Self::Dev,
            _ => Self::Prod,
        }
    }
}
