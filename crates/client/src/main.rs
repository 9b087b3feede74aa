//! vetforum - command-line front end for the veterinary forum.

use std::sync::Arc;

use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use vetforum_auth::{FileCredentialStore, SessionError, SessionIdentityResolver};
use vetforum_client::{ClientConfig, ForumService, HttpGateway, RegistrationService};
use vetforum_core::PostId;
use vetforum_registration::{
    PasswordRequirement, PasswordStrength, ProfileKind, RegistrationForm, format_document,
};

/// vetforum - veterinary Q&A forum client
#[derive(Parser, Debug)]
#[command(name = "vetforum")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    // === Forum ===
    /// List forum posts
    Posts,

    /// Show a post with its answer
    Post {
        /// Post id
        id: PostId,
    },

    /// Answer a post as the stored session
    Answer {
        /// Post id
        id: PostId,

        /// Answer text (remaining words are joined with spaces)
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        text: Vec<String>,
    },

    /// Show the principal of the stored session
    Whoami,

    // === Offline checks ===
    /// Validate a document for a profile kind
    CheckDocument {
        /// Profile kind (person, vet, department)
        kind: ProfileKind,

        /// Document as typed, with or without mask
        document: String,
    },

    /// Show the password checklist
    CheckPassword {
        /// Password to evaluate
        password: String,
    },

    // === Registration ===
    /// Register a new account
    Register(RegisterArgs),
}

#[derive(Args, Debug)]
struct RegisterArgs {
    /// Profile kind (person, vet, department)
    #[arg(long, env = "VETFORUM_REG_KIND", default_value = "person")]
    kind: ProfileKind,

    #[arg(long, env = "VETFORUM_REG_EMAIL")]
    email: String,

    #[arg(long, env = "VETFORUM_REG_PASSWORD", hide_env_values = true)]
    password: String,

    /// Password typed a second time
    #[arg(long, env = "VETFORUM_REG_CONFIRMATION", hide_env_values = true)]
    confirmation: String,

    /// Display name
    #[arg(long, env = "VETFORUM_REG_NAME")]
    name: String,

    #[arg(long, env = "VETFORUM_REG_PHONE")]
    phone: String,

    /// CPF, CRMV number or CNPJ, depending on the kind
    #[arg(long, env = "VETFORUM_REG_DOCUMENT")]
    document: String,
}

impl RegisterArgs {
    fn into_form(self) -> RegistrationForm {
        let mut form = RegistrationForm::new(self.kind);
        form.email = self.email;
        form.password = self.password;
        form.password_confirmation = self.confirmation;
        form.display_name = self.name;
        form.phone = self.phone;
        form.set_document(self.document);
        form
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    vetforum_observability::init();

    match cli.command {
        Commands::CheckDocument { kind, document } => check_document(kind, &document),
        Commands::CheckPassword { password } => check_password(&password),
        Commands::Whoami => whoami(&ClientConfig::from_env()),
        Commands::Posts => list_posts(&ClientConfig::from_env()).await,
        Commands::Post { id } => show_post(&ClientConfig::from_env(), &id).await,
        Commands::Answer { id, text } => answer(&ClientConfig::from_env(), id, text.join(" ")).await,
        Commands::Register(args) => register(&ClientConfig::from_env(), args.into_form()).await,
    }
}

fn check_document(kind: ProfileKind, document: &str) -> anyhow::Result<()> {
    match format_document(kind, document) {
        Some(formatted) => println!("valid {}: {formatted}", kind.document_label()),
        None => println!("invalid {}", kind.document_label()),
    }
    Ok(())
}

fn check_password(password: &str) -> anyhow::Result<()> {
    let strength = PasswordStrength::evaluate(password);
    for requirement in PasswordRequirement::ALL {
        let mark = if strength.holds(requirement) { "x" } else { " " };
        println!("[{mark}] {requirement}");
    }
    if strength.is_satisfied() {
        println!("password accepted");
    }
    Ok(())
}

fn resolver(config: &ClientConfig) -> anyhow::Result<Arc<SessionIdentityResolver>> {
    let path = match &config.credentials_path {
        Some(path) => path.clone(),
        None => FileCredentialStore::default_path()?,
    };
    let store = FileCredentialStore::open(&path)
        .with_context(|| format!("failed to open credential store at {}", path.display()))?;
    Ok(Arc::new(SessionIdentityResolver::new(Arc::new(store))))
}

fn whoami(config: &ClientConfig) -> anyhow::Result<()> {
    let resolver = resolver(config)?;
    match resolver.require_fresh_principal(Utc::now()) {
        Ok(id) => println!("{id}"),
        Err(SessionError::NoSession) => println!("no session"),
        Err(e) => bail!(e),
    }
    Ok(())
}

fn forum(config: &ClientConfig) -> anyhow::Result<ForumService> {
    let gateway = Arc::new(HttpGateway::new(config)?);
    Ok(ForumService::new(gateway, resolver(config)?))
}

async fn list_posts(config: &ClientConfig) -> anyhow::Result<()> {
    let posts = forum(config)?.list_posts().await?;
    if posts.is_empty() {
        println!("no posts yet");
    }
    for post in posts {
        println!("[category {}] {}", post.category_id, post.question);
    }
    Ok(())
}

async fn show_post(config: &ClientConfig, id: &PostId) -> anyhow::Result<()> {
    let post = forum(config)?.post_detail(id).await?;
    println!("{}", post.question);
    println!("{}", post.answer.as_deref().unwrap_or("(no answer yet)"));
    println!("category: {}", post.category_name);
    Ok(())
}

async fn answer(config: &ClientConfig, id: PostId, text: String) -> anyhow::Result<()> {
    match forum(config)?.submit_answer(id, text).await {
        Ok(_) => println!("answer added"),
        Err(e) if e.requires_login() => bail!("{e}; log in through the web client first"),
        Err(e) => bail!(e),
    }
    Ok(())
}

async fn register(config: &ClientConfig, form: RegistrationForm) -> anyhow::Result<()> {
    let service = RegistrationService::new(Arc::new(HttpGateway::new(config)?));
    let reply = service.register(&form, &form.password_confirmation).await?;
    println!("{}", reply.message.as_deref().unwrap_or("registered"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("vetforum").chain(args.iter().copied()))
    }

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn help_flags_never_reach_the_id_parser() {
        for args in [&["post", "--help"][..], &["answer", "-h"], &["--help"]] {
            let err = parse(args).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DisplayHelp, "{args:?}");
        }
    }

    #[test]
    fn post_ids_keep_their_wire_form() {
        let cli = parse(&["post", "42"]).unwrap();
        assert!(matches!(cli.command, Commands::Post { id } if id == PostId::from(42)));

        assert!(parse(&["post"]).is_err());
        assert!(parse(&["post", " "]).is_err());
    }

    #[test]
    fn answer_collects_the_remaining_words() {
        let cli = parse(&["answer", "7", "Keep", "it", "-", "away"]).unwrap();
        let Commands::Answer { id, text } = cli.command else {
            panic!("expected answer command");
        };
        assert_eq!(id, PostId::from(7));
        assert_eq!(text.join(" "), "Keep it - away");

        let err = parse(&["answer", "7"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn profile_kinds_parse_by_short_name() {
        let cli = parse(&["check-document", "vet", "123456"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::CheckDocument { kind: ProfileKind::VeterinaryPractice, .. }
        ));

        let err = parse(&["check-document", "clinic", "123456"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn register_flags_fill_the_form() {
        let cli = parse(&[
            "register",
            "--kind",
            "department",
            "--email",
            "ops@example.org",
            "--password",
            "Sup3r!Secret",
            "--confirmation",
            "Sup3r!Secret",
            "--name",
            "Zoonoses",
            "--phone",
            "1133334444",
            "--document",
            "11.222.333/0001-81",
        ])
        .unwrap();
        let Commands::Register(args) = cli.command else {
            panic!("expected register command");
        };

        let form = args.into_form();
        assert_eq!(form.profile_kind(), ProfileKind::Department);
        assert_eq!(form.document(), "11.222.333/0001-81");
        assert_eq!(form.display_name, "Zoonoses");
        assert_eq!(form.validate().unwrap().role_code.as_u8(), 3);
    }
}
