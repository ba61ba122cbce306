use super::RunArgs;
use crate::app::api::{self, ConfirmMode};
use crate::domain::AppError;

pub(crate) fn run_create_repo(args: RunArgs) -> Result<(), AppError> {
    let report = api::create_repo(&args.into_request(ConfirmMode::AssumeNo))?;
    println!("✅ Repository ready at {}", report.repository_url);
    println!("  Output written to {}", report.output_file.display());
    Ok(())
}
