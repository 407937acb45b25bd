//! Command runners behind the `track`, `fleet`, and `history` subcommands.
mod fleet;
mod history;
mod report;
mod track;


use std::sync::Arc;

use crate::api::{FleetApi, FleetClient};
use crate::args::{Command, ViewerArgs};
use crate::error::AppResult;

pub(crate) async fn run(args: ViewerArgs) -> AppResult<()> {
    let client = FleetClient::new(&args.base_url, args.request_timeout)?;
    tracing::debug!(base_url = %client.base_url(), "Using fleet backend");
    let api: Arc<dyn FleetApi> = Arc::new(client);

    match &args.command {
        Command::Track(track) => track::run(api, &args, track).await,
        Command::Fleet(fleet) => {
            let report = fleet::collect(api.as_ref(), fleet).await?;
            report::present(report, &args).await
        }
        Command::History(history) => {
            let report = history::collect(api.as_ref(), &history.command).await?;
            report::present(report, &args).await
        }
    }
}
