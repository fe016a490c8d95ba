mod parse;
mod render;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use blazing_admin::config::{ClientConfig, ConfigError, normalize_base_url};
use blazing_admin::error::ApiError;
use blazing_admin::net::client::ApiClient;
use blazing_admin::net::query::{ListQuery, PageRequest};
use blazing_admin::net::session::{FileTokenStore, SessionError, TokenStore};
use blazing_admin::net::types::{DistributionKind, NewContact, Paginated, RecipientType, SendRequest, SocialIcon};
use blazing_admin::services::contacts::ContactFilter;
use blazing_admin::services::default_templates::{DefaultTemplateFilter, DistributeRequest, PreviewRequest};
use blazing_admin::services::distributions::{DistributionFilter, StatusChangeError};
use blazing_admin::services::ecards::EcardFilter;
use blazing_admin::services::email_history::HistoryFilter;
use blazing_admin::services::{
    auth, contacts, cron_jobs, customer_templates, default_templates, distributions, ecards, email_history,
    newsletters, social_icons, users,
};
use blazing_admin::state::distribution::{DistributionStatus, DistributionTracker};
use blazing_admin::state::table::{PageInfo, SortSpec, sort_records};
use blazing_admin::util::lookup::{LookupError, LookupTables};
use blazing_admin::util::placeholder::{PlaceholderSet, Recipient};
use blazing_admin::util::recipients::{self, ResolvedRecipients};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::parse::{FieldParseError, parse_contact_field, parse_customer_type, parse_send_status, parse_status};
use crate::render::{page_footer, table, yes_no};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("{}", .0.notice())]
    Api(#[from] ApiError),
    #[error(transparent)]
    StatusChange(#[from] StatusChangeError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Field(#[from] FieldParseError),
    #[error("invalid recipient addresses: {}", .0.join(", "))]
    InvalidRecipients(Vec<String>),
    #[error("no recipients to send to")]
    NoRecipients,
    #[error("--emails is required when --to custom")]
    MissingEmails,
    #[error("not logged in; run `blazing login`")]
    NotLoggedIn,
    #[error("output encode failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "blazing", about = "BlazingSocial admin CLI")]
struct Cli {
    /// API origin; overrides BLAZING_API_URL from the environment config.
    #[arg(long, env = "BLAZING_API_URL", global = true)]
    base_url: Option<String>,

    /// Log level when RUST_LOG is unset.
    #[arg(long, default_value = "warn", global = true)]
    verbosity: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login {
        #[arg(long, env = "BLAZING_EMAIL")]
        email: String,
        #[arg(long, env = "BLAZING_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Whoami,
    #[command(subcommand)]
    Contacts(ContactsCommand),
    #[command(subcommand)]
    Templates(TemplatesCommand),
    #[command(subcommand)]
    Defaults(DefaultsCommand),
    History(HistoryArgs),
    #[command(subcommand)]
    Ecards(EcardsCommand),
    #[command(subcommand)]
    Newsletters(NewslettersCommand),
    #[command(subcommand)]
    Distributions(DistributionsCommand),
    #[command(subcommand)]
    Cron(CronCommand),
    #[command(subcommand)]
    Icons(ListOnlyCommand),
    #[command(subcommand)]
    Users(ListOnlyCommand),
    /// Resolve a recipient set locally and print it.
    Recipients(RecipientArgs),
}

#[derive(Args, Debug, Clone, Default)]
struct PageArgs {
    #[arg(long)]
    page: Option<u32>,
    #[arg(long)]
    page_size: Option<u32>,
}

impl PageArgs {
    fn request(&self) -> PageRequest {
        PageRequest { page: self.page, page_size: self.page_size }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Audience {
    Contacts,
    Partners,
    All,
    Custom,
}

impl From<Audience> for RecipientType {
    fn from(audience: Audience) -> Self {
        match audience {
            Audience::Contacts => Self::Contacts,
            Audience::Partners => Self::Partners,
            Audience::All => Self::All,
            Audience::Custom => Self::Custom,
        }
    }
}

#[derive(Args, Debug, Clone)]
struct RecipientArgs {
    #[arg(long = "to", value_enum, default_value = "contacts")]
    audience: Audience,
    /// Comma-separated addresses for `--to custom`.
    #[arg(long)]
    emails: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct SampleArgs {
    #[arg(long, default_value = "Jane Doe")]
    name: String,
    #[arg(long, default_value = "jane@example.com")]
    email: String,
}

#[derive(Subcommand, Debug)]
enum ContactsCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long = "type")]
        customer_type: Option<String>,
        #[arg(long)]
        send_status: Option<String>,
        #[arg(long)]
        optout: Option<bool>,
        /// Backend ordering, `-field` for descending.
        #[arg(long)]
        sort: Option<String>,
        /// Walk every page instead of one.
        #[arg(long)]
        all: bool,
        #[command(flatten)]
        page: PageArgs,
    },
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        company: Option<String>,
        #[arg(long = "type")]
        customer_type: Option<String>,
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Update a single column.
    Set {
        id: i64,
        field: String,
        value: String,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
enum TemplatesCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
    Show {
        id: i64,
    },
    Send {
        id: i64,
        #[command(flatten)]
        recipients: RecipientArgs,
        #[arg(long)]
        subject: Option<String>,
    },
    /// Render the template for a sample recipient.
    Preview {
        id: i64,
        #[command(flatten)]
        sample: SampleArgs,
    },
    UploadHtml {
        id: i64,
        path: PathBuf,
    },
    Attach {
        id: i64,
        path: PathBuf,
    },
    Detach {
        id: i64,
        attachment_id: i64,
    },
    /// Copy a default template into a new editable template.
    Clone {
        default_id: i64,
        #[arg(long)]
        name: Option<String>,
    },
    Delete {
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
enum DefaultsCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<u16>,
        #[arg(long = "type")]
        email_type: Option<u16>,
        #[command(flatten)]
        page: PageArgs,
    },
    Distribute {
        id: i64,
        #[command(flatten)]
        recipients: RecipientArgs,
    },
    /// Server-rendered preview.
    Preview {
        id: i64,
        #[command(flatten)]
        sample: SampleArgs,
    },
}

#[derive(Args, Debug)]
struct HistoryArgs {
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    recipient: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[command(flatten)]
    page: PageArgs,
}

#[derive(Subcommand, Debug)]
enum EcardsCommand {
    List {
        #[arg(long)]
        category: Option<u16>,
        #[command(flatten)]
        page: PageArgs,
    },
    Preview {
        id: i64,
        #[command(flatten)]
        sample: SampleArgs,
    },
    /// Queue the ecard for every user.
    Distribute {
        id: i64,
    },
    /// Send personalized copies to a recipient set.
    Send {
        id: i64,
        #[command(flatten)]
        recipients: RecipientArgs,
    },
}

#[derive(Subcommand, Debug)]
enum NewslettersCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    Send {
        id: i64,
        #[command(flatten)]
        recipients: RecipientArgs,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Kind {
    Ecard,
    Newsletter,
}

impl From<Kind> for DistributionKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Ecard => Self::Ecard,
            Kind::Newsletter => Self::Newsletter,
        }
    }
}

#[derive(Subcommand, Debug)]
enum DistributionsCommand {
    List {
        #[arg(long, value_enum)]
        kind: Kind,
        #[arg(long, value_parser = parse_status)]
        status: Option<DistributionStatus>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Request a status change; invalid transitions are refused locally.
    Status {
        #[arg(long, value_enum)]
        kind: Kind,
        id: i64,
        #[arg(value_parser = parse_status)]
        target: DistributionStatus,
    },
}

#[derive(Subcommand, Debug)]
enum CronCommand {
    List,
    Start { id: i64 },
    Stop { id: i64 },
    Restart { id: i64 },
}

#[derive(Subcommand, Debug)]
enum ListOnlyCommand {
    List {
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        page: PageArgs,
    },
}

struct Context {
    client: ApiClient,
    config: ClientConfig,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.verbosity);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbosity: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_context(base_url: Option<&str>) -> Result<Context, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = base_url {
        config.base_url = normalize_base_url(url);
    }
    let store = FileTokenStore::open(config.session_path()?)?;
    debug!(base_url = %config.base_url, session = %store.path().display(), "cli configured");
    let client = ApiClient::new(&config, Arc::new(store))?
        .with_session_expired_hook(|| warn!("session expired; run `blazing login` again"));
    Ok(Context { client, config })
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let ctx = build_context(cli.base_url.as_deref())?;

    match cli.command {
        Command::Login { email, password } => {
            let user = auth::login(&ctx.client, &email, &password).await?;
            println!("logged in as {} <{}>", user.display_name(), user.email);
            Ok(())
        }
        Command::Logout => {
            auth::logout(&ctx.client)?;
            println!("logged out");
            Ok(())
        }
        Command::Whoami => run_whoami(&ctx).await,
        Command::Contacts(command) => run_contacts(&ctx, command).await,
        Command::Templates(command) => run_templates(&ctx, command).await,
        Command::Defaults(command) => run_defaults(&ctx, command).await,
        Command::History(args) => run_history(&ctx, args).await,
        Command::Ecards(command) => run_ecards(&ctx, command).await,
        Command::Newsletters(command) => run_newsletters(&ctx, command).await,
        Command::Distributions(command) => run_distributions(&ctx, command).await,
        Command::Cron(command) => run_cron(&ctx, command).await,
        Command::Icons(ListOnlyCommand::List { search, page }) => {
            let query = list_query(search, &page);
            let icons = social_icons::list(&ctx.client, &query).await?;
            println!("{}", icon_listing(&icons, &page));
            Ok(())
        }
        Command::Users(ListOnlyCommand::List { search, page }) => {
            let query = list_query(search, &page);
            let listed = users::list(&ctx.client, &query).await?;
            let rows = listed
                .results
                .iter()
                .map(|u| vec![u.id.to_string(), u.email.clone(), format!("{} {}", u.first_name, u.last_name), yes_no(u.is_staff)])
                .collect::<Vec<_>>();
            print!("{}", table(&["ID", "EMAIL", "NAME", "STAFF"], &rows));
            println!("{}", page_footer(&page_info(&page, listed.count)));
            Ok(())
        }
        Command::Recipients(args) => {
            let resolved = resolve_audience(&ctx.client, &args).await?;
            for email in &resolved.emails {
                println!("{email}");
            }
            for entry in &resolved.invalid {
                eprintln!("invalid: {entry}");
            }
            eprintln!("{} recipients", resolved.emails.len());
            Ok(())
        }
    }
}

async fn run_whoami(ctx: &Context) -> Result<(), CliError> {
    if ctx.client.store().get().is_none() {
        return Err(CliError::NotLoggedIn);
    }
    let user = match auth::cached_user(&ctx.client) {
        Some(user) => user,
        None => auth::me(&ctx.client).await?,
    };
    println!("{} <{}>{}", user.display_name(), user.email, if user.is_staff { " (staff)" } else { "" });
    Ok(())
}

async fn run_contacts(ctx: &Context, command: ContactsCommand) -> Result<(), CliError> {
    match command {
        ContactsCommand::List { search, customer_type, send_status, optout, sort, all, page } => {
            let filter = ContactFilter {
                search,
                customer_type: customer_type.as_deref().map(parse_customer_type).transpose()?,
                send_status: send_status.as_deref().map(parse_send_status).transpose()?,
                optout,
                newsletter_version: None,
                ordering: sort.clone(),
                page: page.request(),
            };
            let (mut rows, total) = if all {
                let rows = contacts::fetch_all(&ctx.client, &filter).await?;
                let total = rows.len() as u64;
                (rows, total)
            } else {
                let listed = contacts::list(&ctx.client, &filter).await?;
                (listed.results, listed.count)
            };
            if all {
                if let Some(spec) = sort.as_deref().and_then(SortSpec::parse) {
                    sort_records(&mut rows, &spec);
                }
            }
            let cells = rows
                .iter()
                .map(|c| {
                    vec![
                        c.id.to_string(),
                        c.display_name(),
                        c.email.clone(),
                        c.customer_type.as_str().to_owned(),
                        c.send_status.as_str().to_owned(),
                        yes_no(c.optout),
                    ]
                })
                .collect::<Vec<_>>();
            print!("{}", table(&["ID", "NAME", "EMAIL", "TYPE", "SEND", "OPTOUT"], &cells));
            if !all {
                println!("{}", page_footer(&page_info(&page, total)));
            }
            Ok(())
        }
        ContactsCommand::Show { id } => print_json(&contacts::get(&ctx.client, id).await?),
        ContactsCommand::Create { email, first_name, last_name, phone, company, customer_type, photo } => {
            let contact = NewContact {
                first_name,
                last_name,
                email,
                phone,
                company,
                customer_type: customer_type.as_deref().map(parse_customer_type).transpose()?,
                ..NewContact::default()
            };
            let created = contacts::create(&ctx.client, &contact, photo.as_deref()).await?;
            println!("created contact {}", created.id);
            Ok(())
        }
        ContactsCommand::Set { id, field, value } => {
            let field = parse_contact_field(&field, &value)?;
            let updated = contacts::update_field(&ctx.client, id, &field).await?;
            println!("updated {} on contact {}", field.name(), updated.id);
            Ok(())
        }
        ContactsCommand::Delete { id } => {
            contacts::delete(&ctx.client, id).await?;
            println!("deleted contact {id}");
            Ok(())
        }
    }
}

async fn run_templates(ctx: &Context, command: TemplatesCommand) -> Result<(), CliError> {
    match command {
        TemplatesCommand::List { search, page } => {
            let query = list_query(search, &page);
            let listed = customer_templates::list(&ctx.client, &query).await?;
            let rows = listed
                .results
                .iter()
                .map(|t| {
                    vec![
                        t.id.to_string(),
                        t.name.clone(),
                        t.subject.clone(),
                        yes_no(t.is_active),
                        t.attachments.len().to_string(),
                    ]
                })
                .collect::<Vec<_>>();
            print!("{}", table(&["ID", "NAME", "SUBJECT", "ACTIVE", "FILES"], &rows));
            println!("{}", page_footer(&page_info(&page, listed.count)));
            Ok(())
        }
        TemplatesCommand::Show { id } => print_json(&customer_templates::get(&ctx.client, id).await?),
        TemplatesCommand::Send { id, recipients, subject } => {
            let request = send_request(&ctx.client, &recipients, subject).await?;
            let response = customer_templates::send(&ctx.client, id, &request).await?;
            println!("queued {}", response.queued);
            Ok(())
        }
        TemplatesCommand::Preview { id, sample } => {
            let template = customer_templates::get(&ctx.client, id).await?;
            println!("{}", PlaceholderSet::default().substitute(&template.html, &sample_recipient(&sample)));
            Ok(())
        }
        TemplatesCommand::UploadHtml { id, path } => {
            let updated = customer_templates::upload_html(&ctx.client, id, &path).await?;
            println!("template {} body replaced ({} bytes)", updated.id, updated.html.len());
            Ok(())
        }
        TemplatesCommand::Attach { id, path } => {
            let attachment = customer_templates::add_attachment(&ctx.client, id, &path).await?;
            println!("attached {} as {}", attachment.file_name, attachment.id);
            Ok(())
        }
        TemplatesCommand::Detach { id, attachment_id } => {
            customer_templates::remove_attachment(&ctx.client, id, attachment_id).await?;
            println!("removed attachment {attachment_id}");
            Ok(())
        }
        TemplatesCommand::Clone { default_id, name } => {
            let source = default_templates::get(&ctx.client, default_id).await?;
            let created = customer_templates::clone_from_default(&ctx.client, &source, name.as_deref()).await?;
            println!("created template {} from default {default_id}", created.id);
            Ok(())
        }
        TemplatesCommand::Delete { id } => {
            customer_templates::delete(&ctx.client, id).await?;
            println!("deleted template {id}");
            Ok(())
        }
    }
}

async fn run_defaults(ctx: &Context, command: DefaultsCommand) -> Result<(), CliError> {
    match command {
        DefaultsCommand::List { search, category, email_type, page } => {
            let lookup = load_lookup(&ctx.config)?;
            let filter = DefaultTemplateFilter { search, category, email_type, is_active: None, page: page.request() };
            let listed = default_templates::list(&ctx.client, &filter).await?;
            let rows = listed
                .results
                .iter()
                .map(|t| {
                    vec![
                        t.id.to_string(),
                        t.name.clone(),
                        lookup.category_opt(t.category),
                        lookup.email_type_opt(t.email_type),
                        yes_no(t.is_active),
                    ]
                })
                .collect::<Vec<_>>();
            print!("{}", table(&["ID", "NAME", "CATEGORY", "TYPE", "ACTIVE"], &rows));
            println!("{}", page_footer(&page_info(&page, listed.count)));
            Ok(())
        }
        DefaultsCommand::Distribute { id, recipients } => {
            let resolved = resolve_for_send(&ctx.client, &recipients).await?;
            let request = DistributeRequest { recipient_type: recipients.audience.into(), emails: resolved.emails };
            let response = default_templates::distribute(&ctx.client, id, &request).await?;
            println!("queued {}", response.queued);
            Ok(())
        }
        DefaultsCommand::Preview { id, sample } => {
            let request = PreviewRequest { name: sample.name, email: sample.email };
            let preview = default_templates::preview(&ctx.client, id, &request).await?;
            if let Some(subject) = &preview.subject {
                println!("Subject: {subject}\n");
            }
            println!("{}", preview.html);
            Ok(())
        }
    }
}

async fn run_history(ctx: &Context, args: HistoryArgs) -> Result<(), CliError> {
    let filter = HistoryFilter {
        search: args.search,
        recipient: args.recipient,
        status: args.status,
        page: args.page.request(),
        ..HistoryFilter::default()
    };
    let listed = email_history::list(&ctx.client, &filter).await?;
    let rows = listed
        .results
        .iter()
        .map(|h| {
            vec![
                h.sent_at.map(|t| t.format("%Y-%m-%d %H:%M").to_string()).unwrap_or_default(),
                h.recipient.clone(),
                h.template_name.clone(),
                h.status.clone(),
            ]
        })
        .collect::<Vec<_>>();
    print!("{}", table(&["SENT", "RECIPIENT", "TEMPLATE", "STATUS"], &rows));
    println!("{}", page_footer(&page_info(&args.page, listed.count)));
    Ok(())
}

async fn run_ecards(ctx: &Context, command: EcardsCommand) -> Result<(), CliError> {
    match command {
        EcardsCommand::List { category, page } => {
            let lookup = load_lookup(&ctx.config)?;
            let filter = EcardFilter { category, page: page.request(), ..EcardFilter::default() };
            let listed = ecards::list(&ctx.client, &filter).await?;
            let rows = listed
                .results
                .iter()
                .map(|e| {
                    vec![
                        e.id.to_string(),
                        e.name.clone(),
                        lookup.ecard_category(e.category),
                        e.date.map(|d| d.to_string()).unwrap_or_default(),
                        yes_no(e.is_active),
                    ]
                })
                .collect::<Vec<_>>();
            print!("{}", table(&["ID", "NAME", "CATEGORY", "DATE", "ACTIVE"], &rows));
            println!("{}", page_footer(&page_info(&page, listed.count)));
            Ok(())
        }
        EcardsCommand::Preview { id, sample } => {
            let ecard = ecards::get(&ctx.client, id).await?;
            println!("{}", PlaceholderSet::default().substitute(&ecard.html, &sample_recipient(&sample)));
            Ok(())
        }
        EcardsCommand::Distribute { id } => {
            let response = ecards::distribute(&ctx.client, id).await?;
            println!("queued {}", response.queued);
            Ok(())
        }
        EcardsCommand::Send { id, recipients } => {
            let ecard = ecards::get(&ctx.client, id).await?;
            let targets = personalized_targets(&ctx.client, &recipients).await?;
            let response = ecards::send_personalized(&ctx.client, &ecard, &targets, &PlaceholderSet::default()).await?;
            println!("queued {}", response.queued);
            Ok(())
        }
    }
}

async fn run_newsletters(ctx: &Context, command: NewslettersCommand) -> Result<(), CliError> {
    match command {
        NewslettersCommand::List { page } => {
            let query = list_query(None, &page);
            let listed = newsletters::list(&ctx.client, &query).await?;
            let rows = listed
                .results
                .iter()
                .map(|n| vec![n.id.to_string(), n.title.clone(), n.schedule_date.map(|d| d.to_string()).unwrap_or_default()])
                .collect::<Vec<_>>();
            print!("{}", table(&["ID", "TITLE", "SCHEDULED"], &rows));
            println!("{}", page_footer(&page_info(&page, listed.count)));
            Ok(())
        }
        NewslettersCommand::Send { id, recipients } => {
            let request = send_request(&ctx.client, &recipients, None).await?;
            let response = newsletters::send(&ctx.client, id, &request).await?;
            println!("queued {}", response.queued);
            Ok(())
        }
    }
}

async fn run_distributions(ctx: &Context, command: DistributionsCommand) -> Result<(), CliError> {
    match command {
        DistributionsCommand::List { kind, status, page } => {
            let filter = DistributionFilter { status, page: page.request() };
            let listed = distributions::list(&ctx.client, kind.into(), &filter).await?;
            let rows = listed
                .results
                .iter()
                .map(|d| {
                    vec![
                        d.id.to_string(),
                        d.status.to_string(),
                        d.recipient_type.as_str().to_owned(),
                        format!("{}/{}", d.sent_count, d.total_count),
                        d.failed_count.to_string(),
                    ]
                })
                .collect::<Vec<_>>();
            print!("{}", table(&["ID", "STATUS", "AUDIENCE", "SENT", "FAILED"], &rows));
            println!("{}", page_footer(&page_info(&page, listed.count)));
            Ok(())
        }
        DistributionsCommand::Status { kind, id, target } => {
            let kind = DistributionKind::from(kind);
            let record = distributions::get(&ctx.client, kind, id).await?;
            let mut tracker = DistributionTracker::new(record);
            let from = tracker.status();
            let now = distributions::request_status(&ctx.client, kind, &mut tracker, target).await?;
            println!("distribution {id}: {from} -> {now}");
            Ok(())
        }
    }
}

async fn run_cron(ctx: &Context, command: CronCommand) -> Result<(), CliError> {
    let (id, action) = match command {
        CronCommand::List => {
            let listed = cron_jobs::list(&ctx.client, &ListQuery::default()).await?;
            let rows = listed
                .results
                .iter()
                .map(|j| {
                    vec![
                        j.id.to_string(),
                        j.name.clone(),
                        j.schedule.clone(),
                        j.status.as_str().to_owned(),
                        j.last_run.map(|t| t.to_rfc3339()).unwrap_or_default(),
                    ]
                })
                .collect::<Vec<_>>();
            print!("{}", table(&["ID", "NAME", "SCHEDULE", "STATUS", "LAST RUN"], &rows));
            return Ok(());
        }
        CronCommand::Start { id } => (id, cron_jobs::CronAction::Start),
        CronCommand::Stop { id } => (id, cron_jobs::CronAction::Stop),
        CronCommand::Restart { id } => (id, cron_jobs::CronAction::Restart),
    };
    let job = cron_jobs::control(&ctx.client, id, action).await?;
    println!("{} {}: now {}", action.as_str(), job.name, job.status.as_str());
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

fn list_query(search: Option<String>, page: &PageArgs) -> ListQuery {
    ListQuery { search, page: page.request(), ..ListQuery::default() }
}

fn page_info(page: &PageArgs, total: u64) -> PageInfo {
    PageInfo::new(page.page.unwrap_or(1), page.page_size.unwrap_or(25), total)
}

fn icon_listing(icons: &Paginated<SocialIcon>, page: &PageArgs) -> String {
    let rows = icons
        .results
        .iter()
        .map(|i| vec![i.id.to_string(), i.name.clone(), yes_no(i.is_active), i.icon.clone().unwrap_or_default()])
        .collect::<Vec<_>>();
    format!("{}{}", table(&["ID", "NAME", "ACTIVE", "ICON"], &rows), page_footer(&page_info(page, icons.count)))
}

fn sample_recipient(sample: &SampleArgs) -> Recipient {
    Recipient::new(sample.name.clone(), sample.email.clone())
}

fn load_lookup(config: &ClientConfig) -> Result<LookupTables, CliError> {
    match &config.lookup_file {
        Some(path) => Ok(LookupTables::load(path)?),
        None => Ok(LookupTables::default()),
    }
}

/// Resolve `args` without judging the result.
async fn resolve_audience(client: &ApiClient, args: &RecipientArgs) -> Result<ResolvedRecipients, CliError> {
    let recipient_type = RecipientType::from(args.audience);
    if recipient_type == RecipientType::Custom {
        let raw = args.emails.as_deref().ok_or(CliError::MissingEmails)?;
        return Ok(recipients::parse_custom(raw));
    }
    let all = contacts::fetch_all(client, &ContactFilter::default()).await?;
    Ok(recipients::resolve(recipient_type, &all, ""))
}

/// Resolve `args` for a send: any invalid entry or an empty set is an error.
async fn resolve_for_send(client: &ApiClient, args: &RecipientArgs) -> Result<ResolvedRecipients, CliError> {
    let resolved = resolve_audience(client, args).await?;
    if !resolved.invalid.is_empty() {
        return Err(CliError::InvalidRecipients(resolved.invalid));
    }
    if resolved.emails.is_empty() {
        return Err(CliError::NoRecipients);
    }
    Ok(resolved)
}

async fn send_request(client: &ApiClient, args: &RecipientArgs, subject: Option<String>) -> Result<SendRequest, CliError> {
    let resolved = resolve_for_send(client, args).await?;
    Ok(SendRequest { recipient_type: args.audience.into(), emails: resolved.emails, subject })
}

async fn personalized_targets(client: &ApiClient, args: &RecipientArgs) -> Result<Vec<Recipient>, CliError> {
    let recipient_type = RecipientType::from(args.audience);
    let targets = if recipient_type == RecipientType::Custom {
        resolve_for_send(client, args)
            .await?
            .emails
            .into_iter()
            .map(|email| Recipient::new(email.clone(), email))
            .collect()
    } else {
        let all = contacts::fetch_all(client, &ContactFilter::default()).await?;
        recipients::resolve_recipients(&all, recipient_type)
    };
    if targets.is_empty() {
        return Err(CliError::NoRecipients);
    }
    Ok(targets)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
