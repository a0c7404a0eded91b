mod create;
mod list;
mod update;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ItemCommands;
use crate::commands::shared::parse::read_image;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lnf item`.
pub async fn handle(
    action: &ItemCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ItemCommands::Create { .. } => create::run(action, ctx, flags).await,
        ItemCommands::List {
            search,
            category,
            status,
            page,
            per_page,
        } => {
            list::run(
                list::ListArgs {
                    search: search.as_deref(),
                    category: category.as_deref(),
                    status: status.as_deref(),
                    page: *page,
                    per_page: *per_page,
                },
                ctx,
                flags,
            )
            .await
        }
        ItemCommands::Show { id } => {
            let detail = ctx.service.get_item(ctx.viewer(), id).await?;
            output(&detail, flags.format)
        }
        ItemCommands::Update { .. } => update::run(action, ctx, flags).await,
        ItemCommands::Delete { id } => {
            let admin = ctx.require_admin()?;
            ctx.service.delete_item(admin, id).await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
        ItemCommands::Attach { id, path, primary } => {
            let admin = ctx.require_admin()?;
            let upload = read_image(path).await?;
            let image = ctx.service.attach_image(admin, id, upload, *primary).await?;
            output(&image, flags.format)
        }
    }
}
