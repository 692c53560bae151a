use crate::args::{Command, LookArgs};

use super::types::RunPlan;

/// Picks the plan for the parsed arguments. Without a terminal on stdout, or
/// with `--no-ui`, the dashboard falls back to the plain device list.
pub(in crate::entry) fn build_plan(args: &LookArgs, stdout_is_terminal: bool) -> RunPlan {
    let interactive = stdout_is_terminal && !args.no_ui;
    match args.command.as_ref() {
        Some(Command::Devices) => RunPlan::Devices,
        Some(Command::Device(device)) => RunPlan::Device(device.clone()),
        Some(Command::Login) => RunPlan::Login,
        Some(Command::Dashboard) | None => {
            if interactive {
                RunPlan::Dashboard
            } else {
                tracing::debug!("No interactive terminal; printing the device list");
                RunPlan::Devices
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::build_plan;
    use crate::args::{DeviceArgs, LookArgs};
    use crate::entry::plan::types::RunPlan;
    use crate::error::{AppError, AppResult};

    fn args(argv: &[&str]) -> AppResult<LookArgs> {
        let mut full = vec!["nyanlook"];
        full.extend_from_slice(argv);
        Ok(LookArgs::try_parse_from(full)?)
    }

    #[test]
    fn dashboard_needs_a_terminal() -> AppResult<()> {
        let parsed = args(&[])?;
        if build_plan(&parsed, true) != RunPlan::Dashboard {
            return Err(AppError::validation("Expected the dashboard on a terminal"));
        }
        if build_plan(&parsed, false) != RunPlan::Devices {
            return Err(AppError::validation("Expected the device list without a terminal"));
        }
        let no_ui = args(&["dashboard", "--no-ui"])?;
        if build_plan(&no_ui, true) != RunPlan::Devices {
            return Err(AppError::validation("--no-ui should disable the dashboard"));
        }
        Ok(())
    }

    #[test]
    fn subcommands_map_to_plans() -> AppResult<()> {
        let device = args(&["device", "dev-7"])?;
        let expected = RunPlan::Device(DeviceArgs {
            device_id: "dev-7".to_owned(),
        });
        if build_plan(&device, true) != expected {
            return Err(AppError::validation("Expected the device plan"));
        }
        let login = args(&["login"])?;
        if build_plan(&login, true) != RunPlan::Login {
            return Err(AppError::validation("Expected the login plan"));
        }
        if RunPlan::Login.needs_session() || !RunPlan::Devices.needs_session() {
            return Err(AppError::validation("Only login skips authentication"));
        }
        Ok(())
    }
}
