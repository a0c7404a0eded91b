use lnf_core::enums::{CustodyStatus, ItemStatus};
use lnf_core::updates::{ItemPatch, ItemPatchBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ItemCommands;
use crate::commands::shared::parse::{parse_enum, parse_optional_enum};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(action: &ItemCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let ItemCommands::Update { id, .. } = action else {
        anyhow::bail!("expected `item update`");
    };
    let admin = ctx.require_admin()?;
    let patch = build_patch(action)?;
    let item = ctx.service.update_item(admin, id, patch).await?;
    output(&item, flags.format)
}

/// Translate update flags into a sparse patch. `--clear-*` flags become
/// explicit clears.
fn build_patch(action: &ItemCommands) -> anyhow::Result<ItemPatch> {
    let ItemCommands::Update {
        status,
        title,
        description,
        category,
        location,
        admin_notes,
        clear_admin_notes,
        custody,
        clear_custody,
        contact_info,
        clear_contact_info,
        ..
    } = action
    else {
        anyhow::bail!("expected `item update`");
    };

    let mut builder = ItemPatchBuilder::new();
    if let Some(status) = parse_optional_enum::<ItemStatus>(status.as_deref(), "status")? {
        builder = builder.status(status);
    }
    if let Some(title) = title {
        builder = builder.title(title);
    }
    if let Some(description) = description {
        builder = builder.description(description);
    }
    if let Some(category) = category {
        builder = builder.category(category);
    }
    if let Some(location) = location {
        builder = builder.location(location);
    }
    if *clear_admin_notes {
        builder = builder.admin_notes(None);
    } else if let Some(notes) = admin_notes {
        builder = builder.admin_notes(Some(notes.clone()));
    }
    if *clear_custody {
        builder = builder.custody_status(None);
    } else if let Some(custody) = custody {
        builder = builder.custody_status(Some(parse_enum::<CustodyStatus>(custody, "custody")?));
    }
    if *clear_contact_info {
        builder = builder.contact_info(None);
    } else if let Some(contact) = contact_info {
        builder = builder.contact_info(Some(contact.clone()));
    }
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use lnf_core::enums::{CustodyStatus, ItemStatus};
    use pretty_assertions::assert_eq;

    use super::build_patch;
    use crate::cli::{Cli, Commands};

    fn patch_for(args: &[&str]) -> lnf_core::updates::ItemPatch {
        let mut argv = vec!["lnf", "item", "update", "itm-1"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).expect("cli should parse");
        let Commands::Item { action } = cli.command else {
            panic!("expected item command");
        };
        build_patch(&action).expect("patch should build")
    }

    #[test]
    fn no_flags_yield_empty_patch() {
        assert!(patch_for(&[]).is_empty());
    }

    #[test]
    fn values_and_clears_map_onto_patch() {
        let patch = patch_for(&[
            "--status",
            "returned",
            "--custody",
            "handed-to-one-stop",
            "--clear-admin-notes",
        ]);
        assert_eq!(patch.status, Some(ItemStatus::Returned));
        assert_eq!(patch.custody_status, Some(Some(CustodyStatus::HandedToOneStop)));
        assert_eq!(patch.admin_notes, Some(None));
        assert_eq!(patch.contact_info, None);
    }

    #[test]
    fn unknown_status_is_rejected() {
        let cli = Cli::try_parse_from(["lnf", "item", "update", "itm-1", "--status", "gone"])
            .expect("cli should parse");
        let Commands::Item { action } = cli.command else {
            panic!("expected item command");
        };
        assert!(build_patch(&action).is_err());
    }
}
