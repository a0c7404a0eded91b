use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lnf categories`.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let categories = ctx.service.list_categories().await?;
    output(&categories, flags.format)
}
