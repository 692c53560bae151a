use crate::args::DeviceArgs;

/// What a single invocation does once arguments and config are settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(in crate::entry) enum RunPlan {
    Dashboard,
    Devices,
    Device(DeviceArgs),
    Login,
}

impl RunPlan {
    /// The dashboard owns the terminal, so logs stay off unless asked for.
    pub(in crate::entry) const fn is_interactive(&self) -> bool {
        matches!(self, RunPlan::Dashboard)
    }

    pub(in crate::entry) const fn needs_session(&self) -> bool {
        !matches!(self, RunPlan::Login)
    }
}
