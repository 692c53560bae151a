mod commands;
mod dashboard;
mod session;

#[cfg(test)]
mod test_support;

pub(crate) use commands::{run_device, run_devices, run_login};
pub(crate) use dashboard::run_dashboard;
pub(crate) use session::{Credentials, Session};
