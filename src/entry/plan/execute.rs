use std::io::Write;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::app::{Credentials, Session, run_dashboard, run_device, run_devices, run_login};
use crate::args::LookArgs;
use crate::auth::SessionTokenStore;
use crate::error::{AppError, AppResult};

use super::types::RunPlan;

pub(in crate::entry) async fn execute_plan(plan: RunPlan, args: &LookArgs) -> AppResult<()> {
    let client = ApiClient::new(&args.api_url, args.request_timeout).map_err(AppError::api)?;
    let session = Session::new(
        Arc::new(client),
        Arc::new(SessionTokenStore::default()),
        args.history_limit.get(),
    );
    let credentials = Credentials::from_args(args);
    if plan.needs_session() {
        session.authenticate(&credentials).await?;
    }

    let mut stdout = std::io::stdout();
    match plan {
        RunPlan::Dashboard => run_dashboard(args, &session).await,
        RunPlan::Devices => run_devices(&session, &mut stdout).await,
        RunPlan::Device(device) => {
            let policy = args.window.policy(args.custom_hours);
            run_device(&session, &device.device_id, policy, &mut stdout).await
        }
        RunPlan::Login => run_login(&session, &credentials, &mut stdout).await,
    }?;
    stdout.flush()?;
    Ok(())
}
