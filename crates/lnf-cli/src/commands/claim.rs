use lnf_core::enums::ClaimStatus;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ClaimCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lnf claim`.
pub async fn handle(
    action: &ClaimCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ClaimCommands::Submit { item_id, message } => {
            let outcome = ctx
                .service
                .submit_claim(ctx.identity.as_ref(), item_id, message.clone())
                .await?;
            output(&outcome, flags.format)
        }
        ClaimCommands::Review { id, decision } => {
            let admin = ctx.require_admin()?;
            let decision = parse_enum::<ClaimStatus>(decision, "decision")?;
            let outcome = ctx.service.review_claim(admin, id, decision).await?;
            output(&outcome, flags.format)
        }
    }
}
