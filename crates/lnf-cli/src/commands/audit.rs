use lnf_core::enums::{AuditAction, ResourceType};
use lnf_core::filters::AuditFilter;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AuditArgs;
use crate::commands::shared::parse::parse_optional_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `lnf audit`.
pub async fn handle(args: &AuditArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.require_admin()?;
    let filter = AuditFilter {
        user_id: args.user.clone(),
        action: parse_optional_enum::<AuditAction>(args.action.as_deref(), "action")?,
        resource_type: parse_optional_enum::<ResourceType>(
            args.resource_type.as_deref(),
            "resource type",
        )?,
        resource_id: args.resource.clone(),
        limit: args.limit,
    };
    let entries = ctx.service.list_audit(&filter).await?;
    output(&entries, flags.format)
}
