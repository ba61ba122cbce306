use clap::Args;

use super::RunArgs;
use crate::app::api::{self, ConfirmMode};
use crate::domain::{AppError, CommitOutcome};

#[derive(Args, Debug, Clone)]
pub(crate) struct SetupArgs {
    #[command(flatten)]
    run: RunArgs,
    /// Answer "yes" to every confirmation (e.g. exiting an active stk workspace)
    #[arg(short, long, conflicts_with = "interactive")]
    yes: bool,
    /// Ask confirmations on the terminal
    #[arg(short, long)]
    interactive: bool,
}

impl SetupArgs {
    fn confirm_mode(&self) -> ConfirmMode {
        if self.yes {
            ConfirmMode::AssumeYes
        } else if self.interactive {
            ConfirmMode::Interactive
        } else {
            ConfirmMode::AssumeNo
        }
    }
}

pub(crate) fn run_setup(args: SetupArgs) -> Result<(), AppError> {
    let confirm = args.confirm_mode();
    let report = api::setup(&args.run.into_request(confirm))?;
    let outcome = &report.outcome;

    if outcome.created_repo {
        println!("✅ Created repository {}", outcome.repository_url);
    }
    match &outcome.commit {
        CommitOutcome::InitializedMain => println!("✅ Workflow files committed to main"),
        CommitOutcome::PullRequest { url, .. } => println!("✅ Opened pull request {}", url),
        CommitOutcome::Unchanged => println!("✅ Workflow files already up to date"),
    }
    println!("✅ Configure the repository at {}", outcome.scm_config_url);
    println!("  Output written to {}", report.output_file.display());
    Ok(())
}
