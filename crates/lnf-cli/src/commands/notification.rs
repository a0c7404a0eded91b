use crate::cli::GlobalFlags;
use crate::cli::subcommands::NotificationCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lnf notifications`.
pub async fn handle(
    action: &NotificationCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let viewer = ctx.require_identity()?;
    match action {
        NotificationCommands::List { unread } => {
            let notifications = ctx.service.list_notifications(viewer, *unread).await?;
            output(&notifications, flags.format)
        }
        NotificationCommands::Read { id } => {
            ctx.service.mark_notification_read(viewer, id).await?;
            output(&serde_json::json!({ "read": id }), flags.format)
        }
    }
}
