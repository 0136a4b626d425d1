use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use dnd::doc::Tag;
use serde::Serialize;
use studio::api::types::ImageUpload;
use studio::api::{Backend, HttpBackend};
use studio::config::{ConfigError, StudioConfig};
use studio::error::{ApiError, ErrorCode, SubmitError};
use studio::forms::{CardForm, FeedbackForm, TextForm};
use studio::notice::Notice;
use studio::session::{FileSessionStore, Session, SessionError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error("no tag matches `{0}`; run `studio tags list`")]
    UnknownTag(String),
    #[error("cannot read image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("output encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl ErrorCode for CliError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Session(e) => e.error_code(),
            Self::Api(e) => e.error_code(),
            Self::Submit(e) => e.error_code(),
            Self::UnknownTag(_) => "E_UNKNOWN_TAG",
            Self::Image { .. } => "E_IMAGE_READ",
            Self::Json(_) => "E_JSON",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "studio", about = "Studio content dashboard CLI")]
struct Cli {
    #[arg(long, env = "STUDIO_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, env = "STUDIO_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Remember the operator email.
    Login { email: String },
    Logout,
    Whoami,
    Tags(TagsCommand),
    Cards(CardsCommand),
    Feedback(FeedbackCommand),
    Text(TextCommand),
}

#[derive(Args, Debug)]
struct TagsCommand {
    #[command(subcommand)]
    command: TagsSubcommand,
}

#[derive(Subcommand, Debug)]
enum TagsSubcommand {
    List,
}

#[derive(Args, Debug)]
struct CardsCommand {
    #[command(subcommand)]
    command: CardsSubcommand,
}

#[derive(Subcommand, Debug)]
enum CardsSubcommand {
    /// Cards with their tag names.
    List,
    Create(CardCreateArgs),
}

#[derive(Args, Debug)]
struct CardCreateArgs {
    #[arg(long)]
    title: String,

    #[arg(long, help = "Tag id, slug, or name")]
    tag: String,

    #[arg(long)]
    img: PathBuf,

    #[arg(long, default_value_t = false)]
    latest: bool,
}

#[derive(Args, Debug)]
struct FeedbackCommand {
    #[command(subcommand)]
    command: FeedbackSubcommand,
}

#[derive(Subcommand, Debug)]
enum FeedbackSubcommand {
    List,
    Submit(FeedbackSubmitArgs),
}

#[derive(Args, Debug)]
struct FeedbackSubmitArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    company: String,

    #[arg(long)]
    description: String,

    #[arg(long)]
    img: PathBuf,
}

#[derive(Args, Debug)]
struct TextCommand {
    #[command(subcommand)]
    command: TextSubcommand,
}

#[derive(Subcommand, Debug)]
enum TextSubcommand {
    Show,
    /// Set one field by wire path, e.g. `overview.statistics.projects 150`.
    Set { path: String, value: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    if let Err(e) = dotenv {
        if !e.not_found() {
            tracing::warn!(error = %e, ".env not loaded");
        }
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(code = e.error_code(), retryable = e.retryable(), "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = StudioConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url)?;
    }
    if let Some(path) = cli.session_file {
        config.session_file = path;
    }

    let mut session = Session::init(FileSessionStore::new(&config.session_file))?;
    let backend = HttpBackend::new(&config)?;
    tracing::debug!(base_url = backend.base_url(), "backend configured");

    let result = dispatch(cli.command, &mut session, &backend).await;
    drop(session.teardown());
    result
}

async fn dispatch(
    command: Command,
    session: &mut Session<FileSessionStore>,
    backend: &dyn Backend,
) -> Result<(), CliError> {
    match command {
        Command::Login { email } => {
            session.login(&email)?;
            println!("logged in as {}", email.trim());
            Ok(())
        }
        Command::Logout => {
            session.logout()?;
            println!("logged out");
            Ok(())
        }
        Command::Whoami => {
            println!("{}", session.require_user()?);
            Ok(())
        }
        Command::Tags(tags) => match tags.command {
            TagsSubcommand::List => print_json(&backend.list_tags().await?),
        },
        Command::Cards(cards) => match cards.command {
            CardsSubcommand::List => print_json(&studio::portfolio::load(backend).await?),
            CardsSubcommand::Create(args) => {
                session.require_user()?;
                create_card(backend, args).await
            }
        },
        Command::Feedback(feedback) => match feedback.command {
            FeedbackSubcommand::List => print_json(&backend.list_feedback().await?),
            FeedbackSubcommand::Submit(args) => {
                session.require_user()?;
                submit_feedback(backend, args).await
            }
        },
        Command::Text(text) => match text.command {
            TextSubcommand::Show => print_json(&backend.home_text().await?),
            TextSubcommand::Set { path, value } => {
                session.require_user()?;
                set_text(backend, &path, &value).await
            }
        },
    }
}

async fn create_card(backend: &dyn Backend, args: CardCreateArgs) -> Result<(), CliError> {
    let mut form = CardForm::new();
    form.mount(backend).await;
    print_notices(form.take_notices());

    let tag_id = resolve_tag(form.board().available(), &args.tag)?.id.clone();
    form.drop_tag(&tag_id, 0).map_err(SubmitError::from)?;
    form.set_title(args.title);
    form.set_latest(args.latest);
    form.set_image(read_image(args.img).await?);

    let result = form.submit(backend).await;
    print_notices(form.take_notices());
    result?;
    Ok(())
}

async fn submit_feedback(backend: &dyn Backend, args: FeedbackSubmitArgs) -> Result<(), CliError> {
    let mut form = FeedbackForm::new();
    form.name = args.name;
    form.company = args.company;
    form.description = args.description;
    form.image = Some(read_image(args.img).await?);
    let result = form.submit(backend).await;
    print_notices(form.take_notices());
    result?;
    Ok(())
}

async fn set_text(backend: &dyn Backend, path: &str, value: &str) -> Result<(), CliError> {
    let mut form = TextForm::new();
    let loaded = form.load(backend).await.map(|_| ());
    print_notices(form.take_notices());
    loaded?;

    form.set_field(path, value).map_err(SubmitError::from)?;
    let result = form.save(backend).await;
    print_notices(form.take_notices());
    result?;
    Ok(())
}

/// Match by id first, then slug, then case-insensitive name.
fn resolve_tag<'a>(tags: &'a [Tag], needle: &str) -> Result<&'a Tag, CliError> {
    tags.iter()
        .find(|t| t.id.as_str() == needle)
        .or_else(|| tags.iter().find(|t| t.slug == needle))
        .or_else(|| tags.iter().find(|t| t.name.eq_ignore_ascii_case(needle)))
        .ok_or_else(|| CliError::UnknownTag(needle.to_owned()))
}

async fn read_image(path: PathBuf) -> Result<ImageUpload, CliError> {
    ImageUpload::from_path(&path)
        .await
        .map_err(|source| CliError::Image { path, source })
}

fn print_notices(notices: Vec<Notice>) {
    for notice in notices {
        if notice.is_error() {
            eprintln!("{notice}");
        } else {
            println!("{notice}");
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
