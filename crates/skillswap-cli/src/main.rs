//! SkillSwap CLI - browse, post and manage skill listings

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use skillswap_core::api::SkillSwap;
use skillswap_core::api::health::{self, HealthStatus};
use skillswap_core::application::{Action, SkillForm, parse_tags, user_message};
use skillswap_core::config::Config;
use skillswap_core::domain::auth::{Login, SessionStore, SignUp};
use skillswap_core::domain::profiles::ProfileUpdate;
use skillswap_core::domain::skills::{LoadState, Skill, SkillFilter, SkillListing};
use skillswap_core::infrastructure::FileSessionStore;
use tokio::sync::Mutex;
use tracing::warn;

#[derive(Parser)]
#[command(name = "skillswap")]
#[command(author, version, about = "Community skill exchange", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and post skills
    Skills {
        #[command(subcommand)]
        action: SkillAction,
    },

    /// View and edit user profiles
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Sign up, sign in and out
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Run health check
    Doctor,
}

#[derive(Subcommand)]
enum SkillAction {
    /// List approved skills
    List {
        /// Match title, description, category or tags
        #[arg(short, long)]
        search: Option<String>,
        /// Category or tag; "All" for every category
        #[arg(short, long)]
        category: Option<String>,
        /// Location substring
        #[arg(short, long)]
        location: Option<String>,
        /// Exact level, e.g. Beginner
        #[arg(long)]
        level: Option<String>,
    },
    /// Show a single skill
    Show { id: String },
    /// List the tags in use
    Tags,
    /// Post a new skill
    Post {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        location: String,
        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
        /// Defaults to Beginner
        #[arg(long, default_value = "")]
        level: String,
        /// Defaults to Free
        #[arg(long, default_value = "")]
        exchange_type: String,
        #[arg(long, default_value = "")]
        image_url: String,
    },
    /// List the skills you posted
    Mine,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show a profile and its skills (defaults to your own)
    Show { uid: Option<String> },
    /// Update your profile
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
        /// Comma-separated
        #[arg(long)]
        skill_tags: Option<String>,
    },
}

#[derive(Subcommand)]
enum AuthAction {
    /// Create an account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Sign in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Get a config value
    Get { key: String },
    /// Set a config value
    Set { key: String, value: String },
    /// List all config values
    List,
    /// Reset to defaults
    Reset,
    /// Show config file path
    Path,
}

#[tokio::main]
async fn main() {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::from_default_env();
    let filter = match "skillswap=info".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        report(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let out = Output {
        format: cli.format,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Skills { action } => cmd_skills(action, out).await,
        Commands::Profile { action } => cmd_profile(action, out).await,
        Commands::Auth { action } => cmd_auth(action, out).await,
        Commands::Config { action } => cmd_config(action, out),
        Commands::Doctor => cmd_doctor(out).await,
    }
}

/// Print an error with its code and suggestion when it is a core error
fn report(error: &anyhow::Error) {
    match error.downcast_ref::<skillswap_core::Error>() {
        Some(core) => {
            eprintln!("Error [{}]: {}", core.code(), core);
            if let Some(suggestion) = core.suggestion() {
                eprintln!("  Try: {}", suggestion);
            }
        }
        None => eprintln!("Error: {:#}", error),
    }
}

#[derive(Clone, Copy)]
struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn print_json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    /// Informational line, suppressed in quiet and JSON modes
    fn note(&self, line: impl std::fmt::Display) {
        if !self.quiet && !self.json() {
            println!("{}", line);
        }
    }
}

/// Connect and restore the stored session
async fn connect() -> anyhow::Result<(Config, SkillSwap)> {
    let config = Config::load()?;
    let app = SkillSwap::connect(&config)?;
    app.initialize().await?;
    Ok((config, app))
}

/// Map a failed write to the message shown for that action
fn action_error(action: Action, error: skillswap_core::Error) -> anyhow::Error {
    match error {
        e @ (skillswap_core::Error::ConfigError(_) | skillswap_core::Error::NotAuthenticated(_)) => {
            e.into()
        }
        e => anyhow::anyhow!(user_message(action, &e)),
    }
}

fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn print_skill_line(skill: &Skill) {
    let mut line = format!("  {} - {}", short_id(&skill.id), skill.title);
    if !skill.category.is_empty() {
        line.push_str(&format!(" [{}]", skill.category));
    }
    if !skill.location.is_empty() {
        line.push_str(&format!(" @ {}", skill.location));
    }
    if !skill.level.is_empty() || !skill.exchange_type.is_empty() {
        line.push_str(&format!(" ({}, {})", skill.level, skill.exchange_type));
    }
    println!("{}", line);
}

fn print_skill_detail(skill: &Skill) {
    println!("{}", skill.title);
    println!("  ID: {}", skill.id);
    println!("  Category: {}", skill.category);
    println!("  Location: {}", skill.location);
    println!("  Level: {}", skill.level);
    println!("  Exchange: {}", skill.exchange_type);
    if !skill.tags.is_empty() {
        println!("  Tags: {}", skill.tags.join(", "));
    }
    if !skill.user_name.is_empty() {
        println!("  Offered by: {}", skill.user_name);
    }
    println!("  Posted: {}", skill.created_at.format("%Y-%m-%d"));
    if !skill.image_url.is_empty() {
        println!("  Image: {}", skill.image_url);
    }
    if !skill.description.is_empty() {
        println!();
        println!("{}", skill.description);
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

async fn cmd_skills(action: SkillAction, out: Output) -> anyhow::Result<()> {
    let (config, app) = connect().await?;

    match action {
        SkillAction::List {
            search,
            category,
            location,
            level,
        } => {
            let criteria = SkillFilter::new()
                .with_search(search.unwrap_or_default())
                .with_category(category.unwrap_or(config.listing.default_category))
                .with_location(location.unwrap_or_default())
                .with_level(level.unwrap_or(config.listing.default_level));
            let listing = Mutex::new(SkillListing::with_criteria(criteria));

            let (_, tags) = tokio::join!(app.catalog.refresh(&listing), app.catalog.tags());
            let tags = tags.unwrap_or_else(|e| {
                warn!(error = %e, "Could not load tag options");
                Vec::new()
            });
            let listing = listing.into_inner();

            if let LoadState::Failed(message) = listing.state() {
                eprintln!("Warning: could not load skills: {}", message);
            }

            if out.json() {
                return out.print_json(&json!({
                    "summary": listing.summary(),
                    "state": listing.state(),
                    "criteria": listing.criteria(),
                    "skills": listing.visible(),
                    "tags": tags,
                }));
            }

            let visible = listing.visible();
            if visible.is_empty() {
                out.note("No skills found matching your criteria.");
                out.note("\nTry adjusting your search or filters.");
            } else {
                out.note(listing.summary());
                for skill in visible {
                    print_skill_line(skill);
                }
            }
            if !tags.is_empty() {
                out.note(format!("\nTags: {}", tags.join(", ")));
            }
        }

        SkillAction::Show { id } => {
            let skill = app
                .catalog
                .get(&id)
                .await?
                .ok_or_else(|| skillswap_core::Error::SkillNotFound(id.clone()))?;
            if out.json() {
                out.print_json(&skill)?;
            } else {
                print_skill_detail(&skill);
            }
        }

        SkillAction::Tags => {
            let tags = app.catalog.tags().await?;
            if out.json() {
                out.print_json(&tags)?;
            } else if tags.is_empty() {
                out.note("No tags yet.");
            } else {
                for tag in tags {
                    println!("{}", tag);
                }
            }
        }

        SkillAction::Post {
            title,
            description,
            category,
            location,
            tags,
            level,
            exchange_type,
            image_url,
        } => {
            let author = app.session().require_user("post a skill")?;
            let form = SkillForm {
                title,
                description,
                category,
                location,
                tags,
                level,
                exchange_type,
                image_url,
            };

            let created = app
                .catalog
                .submit(form.into_new_skill(&author))
                .await
                .map_err(|e| action_error(Action::CreateSkill, e))?;

            if out.json() {
                out.print_json(&created)?;
            } else {
                out.note("Skill created successfully!");
                out.note(format!("  ID: {}", created.id));
                out.note(format!("  Title: {}", created.title));
                out.note(format!("  Level: {}", created.level));
                out.note(format!("  Exchange: {}", created.exchange_type));
            }
        }

        SkillAction::Mine => {
            let user = app.session().require_user("view your skills")?;
            let skills = app.catalog.by_user(&user.id).await?;
            if out.json() {
                out.print_json(&skills)?;
            } else if skills.is_empty() {
                out.note("You have not posted any skills yet.");
                out.note("\nPost one with: skillswap skills post --title <title> ...");
            } else {
                out.note(format!("Your skills ({}):", skills.len()));
                for skill in &skills {
                    print_skill_line(skill);
                }
            }
        }
    }

    Ok(())
}

async fn cmd_profile(action: ProfileAction, out: Output) -> anyhow::Result<()> {
    let (_, app) = connect().await?;

    match action {
        ProfileAction::Show { uid } => {
            let uid = match uid {
                Some(uid) => uid,
                None => app.session().require_user("view your profile")?.id,
            };
            let overview = app.profiles.overview(&uid).await?;

            if out.json() {
                return out.print_json(&overview);
            }

            let profile = &overview.profile;
            println!("{}", profile.full_name);
            println!("  Email: {}", profile.email);
            if let Some(location) = &profile.location {
                println!("  Location: {}", location);
            }
            if let Some(bio) = &profile.bio {
                println!("  Bio: {}", bio);
            }
            if let Some(tags) = profile.skill_tags.as_ref().filter(|t| !t.is_empty()) {
                println!("  Skills: {}", tags.join(", "));
            }
            println!("  Member since: {}", profile.created_at.format("%Y-%m-%d"));
            println!();
            if overview.skills.is_empty() {
                println!("No skills posted.");
            } else {
                println!("Posted skills ({}):", overview.skills.len());
                for skill in &overview.skills {
                    print_skill_line(skill);
                }
            }
        }

        ProfileAction::Update {
            name,
            bio,
            location,
            avatar_url,
            skill_tags,
        } => {
            let user = app.session().require_user("update your profile")?;
            let update = ProfileUpdate {
                full_name: name,
                bio,
                location,
                avatar_url,
                skill_tags: skill_tags.as_deref().map(parse_tags),
            };

            let profile = app
                .profiles
                .update(&user.id, &update)
                .await
                .map_err(|e| action_error(Action::UpdateProfile, e))?;

            if out.json() {
                out.print_json(&profile)?;
            } else {
                out.note("Profile updated.");
            }
        }
    }

    Ok(())
}

async fn cmd_auth(action: AuthAction, out: Output) -> anyhow::Result<()> {
    match action {
        AuthAction::Signup {
            name,
            email,
            password,
            confirm_password,
        } => {
            let (_, app) = connect().await?;
            let form = SignUp {
                full_name: name,
                email,
                password,
                confirm_password,
            };
            let user = app
                .auth
                .sign_up(&form)
                .await
                .map_err(|e| action_error(Action::SignUp, e))?;

            if out.json() {
                out.print_json(&user)?;
            } else {
                out.note(format!("Account created for {}.", user.email));
                out.note("\nNext: confirm your email if required, then run `skillswap auth login`.");
            }
        }

        AuthAction::Login { email, password } => {
            let (_, app) = connect().await?;
            let session = app
                .auth
                .sign_in(&Login { email, password })
                .await
                .map_err(|e| action_error(Action::SignIn, e))?;

            if out.json() {
                out.print_json(&session.user)?;
            } else {
                out.note(format!("Signed in as {}.", session.user.display_name()));
            }
        }

        AuthAction::Logout => {
            let store = FileSessionStore::in_config_dir()?;
            if store.load()?.is_none() {
                out.note("Not signed in.");
                return Ok(());
            }

            match Config::load().map(|config| SkillSwap::connect(&config)) {
                Ok(Ok(app)) => {
                    app.initialize().await?;
                    app.auth.sign_out().await?;
                }
                // Without a backend the local session is still removed
                Ok(Err(e)) => {
                    warn!(error = %e, "Backend unavailable; removing local session only");
                }
                Err(e) => {
                    warn!(error = %e, "Could not load configuration; removing local session only");
                }
            }
            store.clear()?;
            out.note("Signed out.");
        }

        AuthAction::Whoami => {
            let (_, app) = connect().await?;
            let user = app.session().user();
            if out.json() {
                out.print_json(&json!({
                    "state": app.session().state().as_str(),
                    "user": user,
                }))?;
            } else {
                match user {
                    Some(user) => {
                        println!("{} <{}>", user.display_name(), user.email);
                        if !out.quiet {
                            println!("  ID: {}", user.id);
                        }
                    }
                    None => out.note("Not signed in."),
                }
            }
        }
    }

    Ok(())
}

fn cmd_config(action: ConfigAction, out: Output) -> anyhow::Result<()> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config.get(&key)?;
            println!("{}", value);
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            config.set(&key, &value)?;
            config.save()?;
            out.note(format!("Set {} = {}", key, value));
        }
        ConfigAction::List => {
            let config = Config::load()?;
            let items = config.list()?;
            if out.json() {
                let map: serde_json::Map<String, serde_json::Value> = items
                    .into_iter()
                    .map(|(key, value)| (key, serde_json::Value::String(value)))
                    .collect();
                out.print_json(&map)?;
            } else {
                for (key, value) in items {
                    println!("{} = {}", key, value);
                }
            }
        }
        ConfigAction::Reset => {
            Config::reset()?;
            out.note("Configuration reset to defaults.");
        }
        ConfigAction::Path => {
            let path = Config::config_path()?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

async fn cmd_doctor(out: Output) -> anyhow::Result<()> {
    let config = Config::load()?;
    let report = health::doctor(&config).await;

    if out.json() {
        out.print_json(&report)?;
    } else if !out.quiet {
        println!("SkillSwap Health Check");
        println!("======================");
        println!();
        for check in &report.checks {
            let marker = match check.status {
                HealthStatus::Ok => "[OK]",
                HealthStatus::Warning => "[--]",
                HealthStatus::Error => "[!!]",
            };
            match &check.message {
                Some(message) => println!("{} {}: {}", marker, check.name, message),
                None => println!("{} {}", marker, check.name),
            }
        }
        println!();
        if report.overall_status == HealthStatus::Ok {
            println!("All checks passed.");
        } else {
            println!("Some checks need attention.");
        }
    }

    if report.overall_status == HealthStatus::Error {
        anyhow::bail!("health check failed");
    }
    Ok(())
}

#[cfg(test)]
mod main_tests;
