use lnf_core::entities::{AuditEntry, Claim, Item, Notification, User, UserStats};
use lnf_core::responses::{ClaimOutcome, ItemDetail, ItemPage};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

/// Handle `lnf schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = match args.type_name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
        "item" => schema_for!(Item),
        "item-page" => schema_for!(ItemPage),
        "item-detail" => schema_for!(ItemDetail),
        "claim" => schema_for!(Claim),
        "claim-outcome" => schema_for!(ClaimOutcome),
        "notification" => schema_for!(Notification),
        "user" => schema_for!(User),
        "user-stats" => schema_for!(UserStats),
        "audit-entry" => schema_for!(AuditEntry),
        other => anyhow::bail!("unknown schema type '{other}'"),
    };
    output(&schema, flags.format)
}
