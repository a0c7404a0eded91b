use lnf_core::enums::CustodyStatus;
use lnf_engine::NewItem;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ItemCommands;
use crate::commands::shared::parse::{parse_date, parse_optional_enum, read_image};
use crate::context::AppContext;
use crate::output::output;

pub async fn run(action: &ItemCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let ItemCommands::Create {
        description,
        title,
        category,
        status,
        location,
        date,
        custody,
        contact_info,
        image,
        image_url,
    } = action
    else {
        anyhow::bail!("expected `item create`");
    };

    let image = match image {
        Some(path) => Some(read_image(path).await?),
        None => None,
    };
    let new = NewItem {
        title: title.clone(),
        description: Some(description.clone()),
        category: category.clone(),
        status: status.clone(),
        location: location.clone(),
        date_found: date.as_deref().map(parse_date).transpose()?,
        image_url: image_url.clone(),
        custody_status: parse_optional_enum::<CustodyStatus>(custody.as_deref(), "custody")?,
        contact_info: contact_info.clone(),
        image,
    };

    let item = ctx.service.create_item(ctx.identity.as_ref(), new).await?;
    output(&item, flags.format)
}
