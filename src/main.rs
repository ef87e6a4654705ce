use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use neuron::application::dashboard::AdminDashboard;
use neuron::application::payment::PaymentOrchestrator;
use neuron::application::registration::RegistrationController;
use neuron::application::session::AdminSession;
use neuron::config::{ClientConfig, DEFAULT_CHECKOUT_SCRIPT, DEFAULT_STORAGE_PATH};
use neuron::domain::ports::{NavigatorRef, NotifierRef};
use neuron::domain::registration::RegistrationForm;
use neuron::domain::session::AdminCredentials;
use neuron::infrastructure::checkout::ConsoleCheckout;
use neuron::infrastructure::downloads::DirectoryDownloads;
use neuron::infrastructure::http::HttpBackend;
use neuron::infrastructure::local_storage::LocalStorage;
use neuron::interfaces::console::{
    ConsoleNavigator, ConsoleNotifier, render_dashboard, render_export, render_outcome,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Backend base URL; endpoints live under `<url>/api`
    #[arg(long, env = "NEURON_BACKEND_URL", default_value = "http://localhost:8001", global = true)]
    backend_url: String,

    /// File the admin session is persisted in
    #[arg(long, env = "NEURON_STORAGE", default_value = DEFAULT_STORAGE_PATH, global = true)]
    storage: PathBuf,

    /// Payment gateway client script, fetched before checkout opens
    #[arg(long, env = "NEURON_CHECKOUT_SCRIPT", default_value = DEFAULT_CHECKOUT_SCRIPT, global = true)]
    checkout_script: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Register for the hackathon and pay the entry fee
    Register(RegisterArgs),
    /// Admin dashboard commands
    #[command(subcommand)]
    Admin(AdminCommand),
}

// Required fields default to empty so the form validation, not clap, reports them.
#[derive(Args)]
struct RegisterArgs {
    #[arg(long, default_value = "")]
    full_name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, default_value = "")]
    college: String,
    #[arg(long, default_value = "")]
    team_name: String,
    #[arg(long, default_value = "", hide = true)]
    honeypot: String,
}

impl From<RegisterArgs> for RegistrationForm {
    fn from(args: RegisterArgs) -> Self {
        Self {
            full_name: args.full_name,
            email: args.email,
            phone: args.phone,
            college: args.college,
            team_name: args.team_name,
            honeypot: args.honeypot,
        }
    }
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Sign in and store the session token
    Login {
        #[arg(long, default_value = "")]
        username: String,
        #[arg(long, env = "NEURON_ADMIN_PASSWORD", default_value = "", hide_env_values = true)]
        password: String,
    },
    /// Show statistics and every registration
    Dashboard,
    /// Download all registrations as CSV
    Export {
        #[arg(long, env = "NEURON_DOWNLOAD_DIR", default_value = ".")]
        dir: PathBuf,
    },
    /// Forget the stored session token
    Logout,
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::new(&cli.backend_url, cli.storage, &cli.checkout_script)
        .into_diagnostic()?;

    let backend = Arc::new(HttpBackend::new(&config).into_diagnostic()?);
    let notifier: NotifierRef = Arc::new(ConsoleNotifier);

    match cli.command {
        Command::Register(args) => {
            let gateway = Arc::new(ConsoleCheckout::new(
                reqwest::Client::new(),
                config.checkout_script.clone(),
            ));
            let payments = PaymentOrchestrator::new(backend.clone(), gateway, notifier.clone());
            let controller = RegistrationController::new(backend, payments, notifier);

            // Failures have already been reported to the user.
            match controller.submit(&args.into()).await {
                Ok(outcome) => {
                    print!("{}", render_outcome(&outcome));
                    Ok(exit_code(outcome.is_complete()))
                }
                Err(_) => Ok(ExitCode::FAILURE),
            }
        }
        Command::Admin(command) => {
            let navigator: NavigatorRef = Arc::new(ConsoleNavigator);
            let tokens = Arc::new(LocalStorage::new(config.storage_path.clone()));
            let session = AdminSession::new(backend, tokens, notifier, navigator);
            let dashboard = AdminDashboard::new(&session);

            match command {
                AdminCommand::Login { username, password } => {
                    let credentials = AdminCredentials::new(username, password);
                    Ok(exit_code(session.login(&credentials).await.is_ok()))
                }
                AdminCommand::Dashboard => match dashboard.load().await {
                    Ok(data) => {
                        print!("{}", render_dashboard(&data));
                        Ok(ExitCode::SUCCESS)
                    }
                    Err(_) => Ok(ExitCode::FAILURE),
                },
                AdminCommand::Export { dir } => {
                    let sink = DirectoryDownloads::new(dir);
                    match dashboard.export(&sink).await {
                        Ok(receipt) => {
                            print!("{}", render_export(&receipt));
                            Ok(ExitCode::SUCCESS)
                        }
                        Err(_) => Ok(ExitCode::FAILURE),
                    }
                }
                AdminCommand::Logout => {
                    session.logout().into_diagnostic()?;
                    Ok(ExitCode::SUCCESS)
                }
            }
        }
    }
}
