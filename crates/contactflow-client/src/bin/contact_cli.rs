//! Contact form CLI
//!
//! Drives the headless contact form from a terminal.
//!
//! ```bash
//! contact-cli --endpoint https://example.com/v1/contact submit \
//!     --name "Jane Doe" --email jane@example.com \
//!     --service website --service seo \
//!     --message "Looking for a new website."
//! contact-cli validate --name J --email nope --message short
//! contact-cli chat "Do you build online stores?"
//! ```
use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use contactflow_client::chat::{ChatClient, ChatConfig};
use contactflow_client::events::FormEvent;
use contactflow_client::fallback::MailClientLauncher;
use contactflow_client::security::MemorySessionStore;
use contactflow_client::{
    ClientError, ContactForm, Dispatcher, DispatcherConfig, FormValidator, FormView,
    HeadlessForm, HttpNotificationTransport, SubmitOutcome,
};
use contactflow_core::constants::{CHAT_WEBHOOK_URL, FALLBACK_NOTICE_DELAY_MS, RECIPIENT_EMAIL};
use contactflow_core::models::{Field, FormFields};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "contact-cli")]
#[command(version, about = "Pro Build Digital contact form client", long_about = None)]
struct Cli {
    /// Notification endpoint URL
    #[arg(long, env = "CONTACT_ENDPOINT", default_value = "http://localhost:9000/v1/contact")]
    endpoint: String,

    /// Mailbox used by the mailto fallback
    #[arg(long, env = "CONTACT_TO_EMAIL", default_value = RECIPIENT_EMAIL)]
    recipient: String,

    /// Delay before confirming the mailto fallback, in milliseconds
    #[arg(long, default_value_t = FALLBACK_NOTICE_DELAY_MS)]
    fallback_delay_ms: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and submit the form
    Submit(FormArgs),
    /// Only run the form validator
    Validate(FormArgs),
    /// Send a message to the chat assistant
    Chat {
        message: String,

        /// Chat webhook URL
        #[arg(long, env = "CONTACT_CHAT_WEBHOOK", default_value = CHAT_WEBHOOK_URL)]
        webhook: String,
    },
}

#[derive(Args, Clone)]
struct FormArgs {
    #[arg(long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "")]
    phone: String,

    #[arg(long, default_value = "")]
    business_type: String,

    /// Service of interest, repeatable
    #[arg(long = "service")]
    services: Vec<String>,

    #[arg(long, default_value = "")]
    message: String,
}

/// Headless form that echoes every page change to the terminal
#[derive(Default)]
struct TerminalView {
    form: HeadlessForm,
}

impl FormView for TerminalView {
    fn values(&self) -> FormFields {
        self.form.values()
    }

    fn set_value(&self, field: Field, value: &str) {
        self.form.set_value(field, value)
    }

    fn show_field_error(&self, field: Field, message: &str) {
        eprintln!("  {}: {}", field, message);
        self.form.show_field_error(field, message)
    }

    fn clear_field_error(&self, field: Field) {
        self.form.clear_field_error(field)
    }

    fn set_loading(&self, loading: bool) {
        if loading {
            println!("Sending...");
        }
        self.form.set_loading(loading)
    }

    fn show_success(&self, message: &str) {
        println!("{}", message);
        self.form.show_success(message)
    }

    fn show_error(&self, message: &str) {
        eprintln!("{}", message);
        self.form.show_error(message)
    }

    fn hide_messages(&self) {
        self.form.hide_messages()
    }

    fn reset(&self) {
        self.form.reset()
    }

    fn csrf_token(&self) -> Option<String> {
        self.form.csrf_token()
    }

    fn set_csrf_token(&self, token: &str) {
        self.form.set_csrf_token(token)
    }
}

/// Prints the mailto link instead of opening a mail client
struct PrintingLauncher;

impl MailClientLauncher for PrintingLauncher {
    fn open(&self, uri: &str) -> Result<(), ClientError> {
        println!("Open this link in your mail client:\n{}", uri);
        Ok(())
    }
}

fn fill(form: &ContactForm, args: FormArgs) {
    let inputs = [
        (Field::Name, args.name),
        (Field::Email, args.email),
        (Field::Phone, args.phone),
        (Field::BusinessType, args.business_type),
        (Field::Message, args.message),
    ];
    for (field, value) in inputs {
        form.emit(FormEvent::Input { field, value });
    }
    for service in args.services {
        form.emit(FormEvent::ServiceToggled {
            service,
            checked: true,
        });
    }
}

async fn run_form(cli: &Cli, session: Arc<MemorySessionStore>, args: FormArgs, submit: bool) -> Result<()> {
    let config = DispatcherConfig {
        recipient: cli.recipient.clone(),
        fallback_delay: Duration::from_millis(cli.fallback_delay_ms),
        ..Default::default()
    };
    let dispatcher = Arc::new(Dispatcher::new(
        config,
        FormValidator::with_session(session.clone()),
        Arc::new(HttpNotificationTransport::new(cli.endpoint.clone())),
        Arc::new(PrintingLauncher),
    ));

    let view = Arc::new(TerminalView::default());
    let form = ContactForm::attach(view.clone(), dispatcher.clone(), Some(session.as_ref()))?;
    fill(&form, args);

    if !submit {
        let values = view.values();
        if dispatcher.validator().validate_form(&values, view.as_ref()) {
            println!("Form is valid");
            return Ok(());
        }
        bail!("Form is invalid");
    }

    let outcome = form.submit().await?;
    form.teardown();

    match outcome {
        SubmitOutcome::Delivered | SubmitOutcome::FellBack { .. } => Ok(()),
        SubmitOutcome::Invalid => bail!("Form is invalid"),
        SubmitOutcome::Failed { reason } => bail!("Submission failed: {}", reason),
        SubmitOutcome::Dropped => bail!("Another submission is in progress"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let session = Arc::new(MemorySessionStore::new());

    match &cli.command {
        Commands::Chat { message, webhook } => {
            let config = ChatConfig {
                webhook_url: webhook.clone(),
                ..Default::default()
            };
            let Some(reply) = ChatClient::new(config, session).send(message).await else {
                bail!("Nothing to send");
            };
            println!("{}", reply.text);
            Ok(())
        }
        Commands::Submit(args) => run_form(&cli, session, args.clone(), true).await,
        Commands::Validate(args) => run_form(&cli, session, args.clone(), false).await,
    }
}
