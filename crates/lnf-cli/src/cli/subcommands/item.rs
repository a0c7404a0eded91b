use clap::Subcommand;

/// Item commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ItemCommands {
    /// Report a lost or found item.
    Create {
        #[arg(long)]
        description: String,
        /// Defaults to the description, shortened.
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        category: Option<String>,
        /// lost or found (default found)
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Date found, YYYY-MM-DD (default today).
        #[arg(long)]
        date: Option<String>,
        /// kept_by_finder, handed_to_one_stop, or left_where_found
        #[arg(long)]
        custody: Option<String>,
        #[arg(long = "contact-info")]
        contact_info: Option<String>,
        /// Path to an image to upload.
        #[arg(long)]
        image: Option<String>,
        /// Pre-hosted image URL, used when no image is uploaded.
        #[arg(long = "image-url")]
        image_url: Option<String>,
    },
    /// List items visible to the caller.
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long = "per-page")]
        per_page: Option<u32>,
    },
    /// Show one item with its images.
    Show { id: String },
    /// Update item fields (admin).
    Update {
        id: String,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long = "admin-notes", conflicts_with = "clear_admin_notes")]
        admin_notes: Option<String>,
        #[arg(long = "clear-admin-notes")]
        clear_admin_notes: bool,
        #[arg(long, conflicts_with = "clear_custody")]
        custody: Option<String>,
        #[arg(long = "clear-custody")]
        clear_custody: bool,
        #[arg(long = "contact-info", conflicts_with = "clear_contact_info")]
        contact_info: Option<String>,
        #[arg(long = "clear-contact-info")]
        clear_contact_info: bool,
    },
    /// Delete an item with its images and claims (admin).
    Delete { id: String },
    /// Upload an additional image for an item (admin).
    Attach {
        id: String,
        /// Path to the image file.
        path: String,
        /// Make this the primary image.
        #[arg(long)]
        primary: bool,
    },
}
