//! CLI tests

use clap::Parser;

use crate::{AuthAction, Cli, Commands, ConfigAction, OutputFormat, ProfileAction, SkillAction};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("skillswap").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_skills_list_filters() {
    let cli = parse(&[
        "skills", "list", "--search", "guitar", "--category", "Music", "--location", "accra",
        "--level", "Beginner",
    ]);
    match cli.command {
        Commands::Skills {
            action:
                SkillAction::List {
                    search,
                    category,
                    location,
                    level,
                },
        } => {
            assert_eq!(search.as_deref(), Some("guitar"));
            assert_eq!(category.as_deref(), Some("Music"));
            assert_eq!(location.as_deref(), Some("accra"));
            assert_eq!(level.as_deref(), Some("Beginner"));
        }
        _ => panic!("expected skills list"),
    }
}

#[test]
fn test_skills_list_without_filters() {
    let cli = parse(&["skills", "list"]);
    assert!(matches!(
        cli.command,
        Commands::Skills {
            action: SkillAction::List {
                search: None,
                category: None,
                ..
            }
        }
    ));
    assert_eq!(cli.format, OutputFormat::Text);
    assert!(!cli.quiet);
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = parse(&["skills", "tags", "--format", "json", "-q"]);
    assert_eq!(cli.format, OutputFormat::Json);
    assert!(cli.quiet);
}

#[test]
fn test_post_defaults_optional_fields() {
    let cli = parse(&[
        "skills",
        "post",
        "--title",
        "Python 101",
        "--description",
        "Intro to Python",
        "--category",
        "Tech",
        "--location",
        "Kumasi",
    ]);
    match cli.command {
        Commands::Skills {
            action:
                SkillAction::Post {
                    tags,
                    level,
                    exchange_type,
                    ..
                },
        } => {
            assert_eq!(tags, "");
            assert_eq!(level, "");
            assert_eq!(exchange_type, "");
        }
        _ => panic!("expected skills post"),
    }
}

#[test]
fn test_post_requires_title() {
    let result = Cli::try_parse_from(["skillswap", "skills", "post", "--description", "x"]);
    assert!(result.is_err());
}

#[test]
fn test_profile_show_optional_uid() {
    let cli = parse(&["profile", "show"]);
    assert!(matches!(
        cli.command,
        Commands::Profile {
            action: ProfileAction::Show { uid: None }
        }
    ));

    let cli = parse(&["profile", "show", "u1"]);
    assert!(matches!(
        cli.command,
        Commands::Profile {
            action: ProfileAction::Show { uid: Some(ref uid) }
        } if uid == "u1"
    ));
}

#[test]
fn test_auth_login_args() {
    let cli = parse(&["auth", "login", "--email", "a@x.io", "--password", "secret1"]);
    match cli.command {
        Commands::Auth {
            action: AuthAction::Login { email, password },
        } => {
            assert_eq!(email, "a@x.io");
            assert_eq!(password, "secret1");
        }
        _ => panic!("expected auth login"),
    }
}

#[test]
fn test_config_set_args() {
    let cli = parse(&["config", "set", "backend.url", "https://x.supabase.co"]);
    assert!(matches!(
        cli.command,
        Commands::Config {
            action: ConfigAction::Set { ref key, .. }
        } if key == "backend.url"
    ));
}

#[test]
fn test_unknown_format_is_rejected() {
    assert!(Cli::try_parse_from(["skillswap", "--format", "yaml", "doctor"]).is_err());
}
