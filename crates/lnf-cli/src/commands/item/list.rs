use lnf_core::enums::ItemStatus;
use lnf_engine::ListQuery;

use crate::cli::GlobalFlags;
use crate::commands::shared::parse::parse_optional_enum;
use crate::context::AppContext;
use crate::output::output;

pub struct ListArgs<'a> {
    pub search: Option<&'a str>,
    pub category: Option<&'a str>,
    pub status: Option<&'a str>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

pub async fn run(args: ListArgs<'_>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let query = ListQuery {
        search: args.search.map(String::from),
        category: args.category.map(String::from),
        status: parse_optional_enum::<ItemStatus>(args.status, "status")?,
        page: args.page,
        per_page: args.per_page,
    };

    let page = ctx.service.list_items(ctx.viewer(), &query).await?;
    output(&page, flags.format)
}
