use clap::Parser;
use pageforge::cli::config::{AppConfig, Cli, Commands, PageAction, TestCaseAction, load_config};

// ============================================================================
// CLI Argument Parsing Tests
// ============================================================================

#[test]
fn cli_parse_page_add() {
    let cli = Cli::parse_from(["pageforge", "page", "add", "--name", "Login Page"]);
    match cli.command {
        Commands::Page {
            action: PageAction::Add { name },
        } => assert_eq!(name, "Login Page"),
        _ => panic!("Expected page add"),
    }
}

#[test]
fn cli_parse_locator_add_defaults_kind_to_id() {
    let cli = Cli::parse_from([
        "pageforge", "locator", "add", "--page", "login-page", "--name", "Login Button",
        "--value", "login-btn",
    ]);
    match cli.command {
        Commands::Locator { action } => match action {
            pageforge::cli::config::LocatorAction::Add { kind, .. } => {
                assert_eq!(kind, "id");
            }
            _ => panic!("Expected locator add"),
        },
        _ => panic!("Expected locator command"),
    }
}

#[test]
fn cli_parse_render_with_output() {
    let cli = Cli::parse_from([
        "pageforge", "render", "--page", "login-page", "--output", "LoginPage.java",
    ]);
    match cli.command {
        Commands::Render { page, output } => {
            assert_eq!(page, "login-page");
            assert_eq!(output.as_deref(), Some("LoginPage.java"));
        }
        _ => panic!("Expected render command"),
    }
}

#[test]
fn cli_parse_testcase_create_with_repeated_steps() {
    let cli = Cli::parse_from([
        "pageforge",
        "testcase",
        "create",
        "--name",
        "Successful Login",
        "--step",
        "login-page::Login Page::enterUsername",
        "--step",
        "login-page::Login Page::clickLoginButton",
    ]);
    match cli.command {
        Commands::Testcase {
            action: TestCaseAction::Create { name, steps },
        } => {
            assert_eq!(name, "Successful Login");
            assert_eq!(steps.len(), 2);
        }
        _ => panic!("Expected testcase create"),
    }
}

#[test]
fn cli_global_flags_apply_to_subcommands() {
    let cli = Cli::parse_from([
        "pageforge",
        "page",
        "list",
        "--data-dir",
        "/tmp/pf",
        "--ollama-model",
        "llama3",
        "-vv",
    ]);
    assert_eq!(cli.data_dir.as_deref(), Some("/tmp/pf"));
    assert_eq!(cli.ollama_model.as_deref(), Some("llama3"));
    assert_eq!(cli.verbose, 2);
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn missing_config_file_yields_defaults() {
    let config = load_config(Some("/nonexistent/pageforge.yaml"));
    assert_eq!(config.storage.data_dir, ".pageforge");
    assert!(config.storage.trace_file.is_none());
    assert!(config.ollama.endpoint.is_none());
}

#[test]
fn config_parses_partial_yaml() {
    let yaml = r#"
ollama:
  endpoint: http://localhost:11434/api/generate
  model: qwen2.5:7b
"#;
    let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(
        config.ollama.endpoint.as_deref(),
        Some("http://localhost:11434/api/generate")
    );
    assert_eq!(config.ollama.model.as_deref(), Some("qwen2.5:7b"));
    // Unspecified sections keep their defaults
    assert_eq!(config.storage.data_dir, ".pageforge");
}

#[test]
fn config_parses_storage_section() {
    let yaml = r#"
storage:
  data_dir: workspace/data
  trace_file: mutations.jsonl
"#;
    let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.storage.data_dir, "workspace/data");
    assert_eq!(config.storage.trace_file.as_deref(), Some("mutations.jsonl"));
}
