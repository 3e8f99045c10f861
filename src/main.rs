use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use clubsite::views::{
    AdminPage, AdminView, Confirm, DeleteOutcome, EventFields, EventForm, GroupInfoForm,
    ImageList, Presence, ProjectForm, PublicPage,
};
use clubsite::{
    ClubClient, ClubError, Config, GroupInfoPayload, ImageOwner, Platform, ProjectPayload,
    UploadFile,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type CliResult = Result<(), Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "clubsite")]
#[command(version, about = "Public page and admin tool for the club website", long_about = None)]
struct Cli {
    /// Base URL of the REST API (overrides CLUBSITE_API_URL)
    #[arg(long, value_name = "URL", global = true)]
    api_url: Option<String>,

    /// Origin used to resolve image and file paths (overrides CLUBSITE_ASSET_ORIGIN)
    #[arg(long, value_name = "URL", global = true)]
    asset_origin: Option<String>,

    /// API key for admin commands; development override for CLUBSITE_API_KEY
    #[arg(long, value_name = "KEY", global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the public page
    Public,

    /// Manage projects
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Manage events
    Events {
        #[command(subcommand)]
        action: EventAction,
    },

    /// Show or save the group info
    About {
        #[command(subcommand)]
        action: AboutAction,
    },

    /// List or delete images
    Images {
        #[command(subcommand)]
        action: ImageAction,
    },

    /// Upload images, archives and executables
    Upload {
        #[command(subcommand)]
        action: UploadAction,
    },

    /// Manage project source archives
    Files {
        #[command(subcommand)]
        action: StoredFileAction,
    },

    /// Manage project executables
    Executables {
        #[command(subcommand)]
        action: StoredFileAction,
    },
}

#[derive(Subcommand)]
enum ProjectAction {
    /// List all projects
    List,
    /// Print one project as JSON
    Show { id: u32 },
    /// Create a project
    Create {
        #[command(flatten)]
        fields: ProjectArgs,
    },
    /// Update a project; omitted fields keep their current value
    Update {
        id: u32,
        #[command(flatten)]
        fields: ProjectArgs,
    },
    /// Delete a project
    Delete {
        id: u32,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
struct ProjectArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    technologies: Option<String>,
    #[arg(long)]
    year: Option<i32>,
}

impl ProjectArgs {
    fn apply(self, fields: &mut ProjectPayload) {
        if let Some(name) = self.name {
            fields.name = name;
        }
        if let Some(description) = self.description {
            fields.description = description;
        }
        if let Some(technologies) = self.technologies {
            fields.technologies = technologies;
        }
        if self.year.is_some() {
            fields.year = self.year;
        }
    }
}

#[derive(Subcommand)]
enum EventAction {
    /// List all events
    List,
    /// Print one event as JSON
    Show { id: u32 },
    /// Create an event
    Create {
        #[command(flatten)]
        fields: EventArgs,
    },
    /// Update an event; omitted fields keep their current value
    Update {
        id: u32,
        #[command(flatten)]
        fields: EventArgs,
    },
    /// Delete an event
    Delete {
        id: u32,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
struct EventArgs {
    #[arg(long)]
    name: Option<String>,
    /// Event day as YYYY-MM-DD
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<String>,
    #[arg(long)]
    description: Option<String>,
}

impl EventArgs {
    fn apply(self, fields: &mut EventFields) {
        if let Some(name) = self.name {
            fields.name = name;
        }
        if let Some(date) = self.date {
            fields.date = date;
        }
        if let Some(description) = self.description {
            fields.description = description;
        }
    }
}

#[derive(Subcommand)]
enum AboutAction {
    /// Print the group info
    Show,
    /// Create or update the group info; omitted fields keep their current value
    Save {
        #[command(flatten)]
        fields: AboutArgs,
    },
}

#[derive(Args)]
struct AboutArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    contact: Option<String>,
}

impl AboutArgs {
    fn apply(self, fields: &mut GroupInfoPayload) {
        if let Some(name) = self.name {
            fields.name = name;
        }
        if let Some(description) = self.description {
            fields.description = description;
        }
        if let Some(contact) = self.contact {
            fields.contact = contact;
        }
    }
}

#[derive(Args)]
struct OwnerArgs {
    /// Project the images belong to
    #[arg(long, value_name = "ID")]
    project: Option<u32>,
    /// Event the images belong to
    #[arg(long, value_name = "ID")]
    event: Option<u32>,
}

#[derive(Subcommand)]
enum ImageAction {
    /// List the images of a project or an event
    List {
        #[command(flatten)]
        owner: OwnerArgs,
    },
    /// Delete an image
    Delete {
        id: u32,
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum UploadAction {
    /// Upload an image for exactly one project or event
    Image {
        file: PathBuf,
        #[command(flatten)]
        owner: OwnerArgs,
    },
    /// Upload a source archive for a project
    Archive {
        file: PathBuf,
        #[arg(long, value_name = "ID")]
        project: u32,
    },
    /// Upload an executable for a project
    Executable {
        file: PathBuf,
        #[arg(long, value_name = "ID")]
        project: u32,
        #[arg(long)]
        version: String,
        /// Windows, Linux or MacOS
        #[arg(long, default_value = "Windows")]
        platform: Platform,
    },
}

#[derive(Subcommand)]
enum StoredFileAction {
    /// Delete a stored file
    Delete {
        id: u32,
        #[arg(short, long)]
        yes: bool,
    },
    /// Download a stored file
    Download {
        id: u32,
        /// Where to write the file
        #[arg(short, long, value_name = "PATH")]
        out: PathBuf,
    },
}

/// Confirmation on the terminal, or unconditional with `--yes`.
struct Prompt {
    assume_yes: bool,
}

impl Confirm for Prompt {
    fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{prompt} [y/N] ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(asset_origin) = cli.asset_origin {
        config.asset_origin = asset_origin;
    }
    if let Some(api_key) = cli.api_key {
        config = config.with_api_key(api_key);
    }
    let config = config.validated()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    tracing::debug!(?config, "starting");
    let client = ClubClient::new(&config);

    match cli.command {
        Commands::Public => public(&client).await,
        Commands::Projects { action } => projects(action, &client).await,
        Commands::Events { action } => events(action, &client).await,
        Commands::About { action } => about(action, &client).await,
        Commands::Images { action } => images(action, &client).await,
        Commands::Upload { action } => upload(action, &client).await,
        Commands::Files { action } => project_files(action, &client).await,
        Commands::Executables { action } => executables(action, &client).await,
    }
}

async fn public(client: &ClubClient) -> CliResult {
    let mut page = PublicPage::new();
    page.load(client).await;
    for problem in page.errors() {
        eprintln!("warning: {problem}");
    }
    print!("{}", page.render(client));
    Ok(())
}

async fn projects(action: ProjectAction, client: &ClubClient) -> CliResult {
    let mut page = AdminPage::new();
    match action {
        ProjectAction::List => {
            page.switch(AdminView::Projects, client).await?;
            for project in page.projects.items() {
                println!(
                    "{:>4}  {}  [{}]",
                    project.id, project.name, project.technologies
                );
            }
        }
        ProjectAction::Show { id } => {
            let project = client.get_project(id).await?;
            println!("{}", serde_json::to_string_pretty(&project)?);
        }
        ProjectAction::Create { fields } => {
            let mut form = ProjectForm::new();
            fields.apply(&mut form.fields);
            page.project_form = Some(form);
            let saved = page.submit_project(client).await?;
            println!("created project {}", saved.id);
        }
        ProjectAction::Update { id, fields } => {
            page.switch(AdminView::Projects, client).await?;
            if !page.edit_project(id) {
                let project = client.get_project(id).await?;
                page.project_form = Some(ProjectForm::editing(&project));
            }
            if let Some(form) = page.project_form.as_mut() {
                fields.apply(&mut form.fields);
            }
            let saved = page.submit_project(client).await?;
            println!("updated project {}", saved.id);
        }
        ProjectAction::Delete { id, yes } => {
            page.switch(AdminView::Projects, client).await?;
            let outcome = page
                .projects
                .delete(client, id, &Prompt { assume_yes: yes })
                .await;
            report_delete(outcome)?;
        }
    }
    Ok(())
}

async fn events(action: EventAction, client: &ClubClient) -> CliResult {
    let mut page = AdminPage::new();
    match action {
        EventAction::List => {
            page.switch(AdminView::Events, client).await?;
            for event in page.events.items() {
                println!(
                    "{:>4}  {}  {}",
                    event.id,
                    event.date_input_value(),
                    event.name
                );
            }
        }
        EventAction::Show { id } => {
            let event = client.get_event(id).await?;
            println!("{}", serde_json::to_string_pretty(&event)?);
        }
        EventAction::Create { fields } => {
            let mut form = EventForm::new();
            fields.apply(&mut form.fields);
            page.event_form = Some(form);
            let saved = page.submit_event(client).await?;
            println!("created event {}", saved.id);
        }
        EventAction::Update { id, fields } => {
            page.switch(AdminView::Events, client).await?;
            if !page.edit_event(id) {
                let event = client.get_event(id).await?;
                page.event_form = Some(EventForm::editing(&event));
            }
            if let Some(form) = page.event_form.as_mut() {
                fields.apply(&mut form.fields);
            }
            let saved = page.submit_event(client).await?;
            println!("updated event {}", saved.id);
        }
        EventAction::Delete { id, yes } => {
            page.switch(AdminView::Events, client).await?;
            let outcome = page
                .events
                .delete(client, id, &Prompt { assume_yes: yes })
                .await;
            report_delete(outcome)?;
        }
    }
    Ok(())
}

async fn about(action: AboutAction, client: &ClubClient) -> CliResult {
    match action {
        AboutAction::Show => match client.get_group_info().await? {
            Some(info) => println!("{}", serde_json::to_string_pretty(&info)?),
            None => println!("No group info yet."),
        },
        AboutAction::Save { fields } => {
            let mut form = GroupInfoForm::new();
            form.load(client).await?;
            fields.apply(&mut form.fields);
            let verb = match form.presence() {
                Presence::Present => "updated",
                _ => "created",
            };
            form.submit(client).await?;
            println!("group info {verb}");
        }
    }
    Ok(())
}

async fn images(action: ImageAction, client: &ClubClient) -> CliResult {
    match action {
        ImageAction::List { owner } => {
            let owner = ImageOwner::from_selection(owner.project, owner.event)?;
            let mut page = AdminPage::new();
            page.show_images(Some(owner), client).await?;
            for image in page.images.items() {
                println!("{:>4}  {}", image.id, client.asset_url(&image.file_path));
            }
        }
        ImageAction::Delete { id, yes } => {
            let mut list = ImageList::for_owner(None);
            let outcome = list.delete(client, id, &Prompt { assume_yes: yes }).await;
            report_delete(outcome)?;
        }
    }
    Ok(())
}

async fn upload(action: UploadAction, client: &ClubClient) -> CliResult {
    let mut page = AdminPage::new();
    match action {
        UploadAction::Image { file, owner } => {
            let form = &mut page.image_upload;
            form.project_id = owner.project;
            form.event_id = owner.event;
            form.set_file(UploadFile::from_path(&file).await?);
            let image = page.upload_image(client).await?;
            println!(
                "uploaded image {}: {}",
                image.id,
                client.asset_url(&image.file_path)
            );
        }
        UploadAction::Archive { file, project } => {
            let form = &mut page.archive_upload;
            form.project_id = Some(project);
            form.file = Some(UploadFile::from_path(&file).await?);
            let stored = page.upload_archive(client).await?;
            println!("uploaded archive {}: {}", stored.id, stored.file_path);
        }
        UploadAction::Executable {
            file,
            project,
            version,
            platform,
        } => {
            let form = &mut page.executable_upload;
            form.project_id = Some(project);
            form.version = version;
            form.platform = platform;
            form.file = Some(UploadFile::from_path(&file).await?);
            let exe = page.upload_executable(client).await?;
            println!(
                "uploaded {} v{} as {}: {}",
                exe.platform,
                exe.version,
                exe.id,
                client.executable_download_url(exe.id)
            );
        }
    }
    Ok(())
}

async fn project_files(action: StoredFileAction, client: &ClubClient) -> CliResult {
    match action {
        StoredFileAction::Delete { id, yes } => {
            if !(Prompt { assume_yes: yes }).confirm("Are you sure you want to delete this file?") {
                println!("cancelled");
                return Ok(());
            }
            let ack = client.delete_project_file(id).await?;
            println!("{}", ack.message);
        }
        StoredFileAction::Download { id, out } => {
            let bytes = client.download_project_file(id).await?;
            write_download(&out, &bytes).await?;
        }
    }
    Ok(())
}

async fn executables(action: StoredFileAction, client: &ClubClient) -> CliResult {
    match action {
        StoredFileAction::Delete { id, yes } => {
            let prompt = "Are you sure you want to delete this executable?";
            if !(Prompt { assume_yes: yes }).confirm(prompt) {
                println!("cancelled");
                return Ok(());
            }
            let ack = client.delete_executable(id).await?;
            println!("{}", ack.message);
        }
        StoredFileAction::Download { id, out } => {
            let bytes = client.download_executable(id).await?;
            write_download(&out, &bytes).await?;
        }
    }
    Ok(())
}

async fn write_download(path: &Path, bytes: &[u8]) -> Result<(), ClubError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| ClubError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    println!("wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

fn report_delete(outcome: DeleteOutcome) -> Result<(), ClubError> {
    match outcome {
        DeleteOutcome::Declined => println!("cancelled"),
        DeleteOutcome::Removed(ack) => println!("{}", ack.message),
        DeleteOutcome::Gone => println!("already deleted"),
        DeleteOutcome::Failed(e) => return Err(e),
    }
    Ok(())
}
