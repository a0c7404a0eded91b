//! ID prefix constants.
//!
//! Every identifier is `{prefix}-{8 hex chars}`, generated by the repository.

pub const PREFIX_ITEM: &str = "itm";
pub const PREFIX_CLAIM: &str = "clm";
pub const PREFIX_NOTIFICATION: &str = "ntf";
pub const PREFIX_AUDIT: &str = "aud";
pub const PREFIX_IMAGE: &str = "img";
pub const PREFIX_USER: &str = "usr";

pub const ALL_PREFIXES: [&str; 6] = [
    PREFIX_ITEM,
    PREFIX_CLAIM,
    PREFIX_NOTIFICATION,
    PREFIX_AUDIT,
    PREFIX_IMAGE,
    PREFIX_USER,
];
