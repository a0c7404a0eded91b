use lnf_core::enums::UserRole;
use lnf_core::filters::UserFilter;
use lnf_engine::NewUser;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::UserCommands;
use crate::commands::shared::parse::{parse_enum, parse_optional_enum};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct Registered {
    user: lnf_core::entities::User,
    token: String,
}

/// Handle `lnf user`.
///
/// `user add` needs no token: whoever can open the database file can
/// register accounts, which is how the first admin is created.
pub async fn handle(
    action: &UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UserCommands::Add { name, email, role } => {
            let user = ctx
                .service
                .register_user(NewUser {
                    name: name.clone(),
                    email: email.clone(),
                    role: parse_enum::<UserRole>(role, "role")?,
                })
                .await?;
            let token = ctx.db.issue_token(&user.id).await?;
            output(&Registered { user, token }, flags.format)
        }
        UserCommands::List { search, role } => {
            ctx.require_admin()?;
            let filter = UserFilter {
                search: search.clone(),
                role: parse_optional_enum::<UserRole>(role.as_deref(), "role")?,
            };
            let users = ctx.service.list_users(&filter).await?;
            output(&users, flags.format)
        }
        UserCommands::Delete { id } => {
            let admin = ctx.require_admin()?;
            ctx.service.delete_user(admin, id).await?;
            output(&serde_json::json!({ "deleted": id }), flags.format)
        }
    }
}
