use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "pageforge",
    version,
    about = "Page object studio for Selenium-style UI tests"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Directory holding the persisted collections
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Ollama API endpoint
    #[arg(long, global = true)]
    pub ollama_endpoint: Option<String>,

    /// Ollama model name
    #[arg(long, global = true)]
    pub ollama_model: Option<String>,

    /// Path to config file (default: pageforge.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage page objects
    Page {
        #[command(subcommand)]
        action: PageAction,
    },

    /// Manage locators on a page
    Locator {
        #[command(subcommand)]
        action: LocatorAction,
    },

    /// View or edit a page's accumulated method text
    Methods {
        #[command(subcommand)]
        action: MethodsAction,
    },

    /// Manage test data entries
    Data {
        #[command(subcommand)]
        action: DataAction,
    },

    /// Manage test cases
    Testcase {
        #[command(subcommand)]
        action: TestCaseAction,
    },

    /// Render one page object class to Java source
    Render {
        /// Page id
        #[arg(long)]
        page: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Render every page object class into a directory
    Export {
        /// Output directory for generated .java files
        #[arg(short, long, default_value = "out/pages")]
        output_dir: String,
    },

    /// List the methods available for test case assembly
    Catalog {
        /// Restrict to one page id
        #[arg(long)]
        page: Option<String>,
    },

    /// Ask the model to suggest a locator for an element
    Suggest {
        /// Page providing the stored source and URL context
        #[arg(long)]
        page: String,

        /// Element HTML snippet to locate
        #[arg(long)]
        html: Option<String>,

        /// Read the element HTML from a file
        #[arg(long)]
        html_file: Option<String>,

        /// Override the page's stored URL
        #[arg(long)]
        url: Option<String>,

        /// Add the suggested locator to the page under this name
        #[arg(long)]
        apply_as: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PageAction {
    /// Create a new page
    Add {
        #[arg(long)]
        name: String,
    },

    /// Rename an existing page
    Rename {
        #[arg(long)]
        page: String,

        #[arg(long)]
        name: String,
    },

    /// Delete a page and the locators it owns
    Remove {
        #[arg(long)]
        page: String,
    },

    /// List all pages
    List,

    /// Show a page with its locator table
    Show {
        #[arg(long)]
        page: String,
    },

    /// Store the page's HTML source (context for locator suggestions)
    SetSource {
        #[arg(long)]
        page: String,

        /// File holding the page HTML
        #[arg(long)]
        file: String,
    },

    /// Store the page's canonical URL
    SetUrl {
        #[arg(long)]
        page: String,

        #[arg(long)]
        url: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum LocatorAction {
    /// Add a locator to a page
    Add {
        #[arg(long)]
        page: String,

        /// Human label; also the source of the generated field name
        #[arg(long)]
        name: String,

        /// Locator kind: id, name, className, tagName, linkText,
        /// partialLinkText, css or xpath (unknown values fall back to xpath)
        #[arg(long, default_value = "id")]
        kind: String,

        #[arg(long)]
        value: String,
    },

    /// Update a locator in place
    Update {
        #[arg(long)]
        page: String,

        #[arg(long)]
        locator: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        kind: Option<String>,

        #[arg(long)]
        value: Option<String>,
    },

    /// Remove a locator from a page
    Remove {
        #[arg(long)]
        page: String,

        #[arg(long)]
        locator: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum MethodsAction {
    /// Print the page's accumulated method text
    Show {
        #[arg(long)]
        page: String,
    },

    /// Replace the method text wholesale
    Set {
        #[arg(long)]
        page: String,

        /// Read the method text from a file
        #[arg(long)]
        file: Option<String>,

        /// Method text given inline
        #[arg(long)]
        text: Option<String>,
    },

    /// Append method text after the existing content
    Append {
        #[arg(long)]
        page: String,

        #[arg(long)]
        file: Option<String>,

        #[arg(long)]
        text: Option<String>,
    },

    /// Generate methods from a natural language description
    Generate {
        #[arg(long)]
        page: String,

        /// What the methods should do
        #[arg(long)]
        description: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataAction {
    /// Add a test data entry
    Add {
        #[arg(long)]
        key: String,

        #[arg(long)]
        value: String,

        /// Scope: "global" or a page id
        #[arg(long, default_value = "global")]
        scope: String,
    },

    /// Update a test data entry
    Update {
        #[arg(long)]
        id: String,

        #[arg(long)]
        key: Option<String>,

        #[arg(long)]
        value: Option<String>,

        #[arg(long)]
        scope: Option<String>,
    },

    /// Remove a test data entry
    Remove {
        #[arg(long)]
        id: String,
    },

    /// List all test data entries
    List,
}

#[derive(Subcommand, Debug)]
pub enum TestCaseAction {
    /// Create a test case from catalog step keys
    Create {
        #[arg(long)]
        name: String,

        /// Step reference, repeatable: "pageId::pageName::methodName"
        /// (a catalog key) or "pageId::methodName"
        #[arg(long = "step")]
        steps: Vec<String>,
    },

    /// Replace a test case's name and steps
    Update {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long = "step")]
        steps: Vec<String>,
    },

    /// Delete a test case
    Remove {
        #[arg(long)]
        id: String,
    },

    /// List all test cases
    List,

    /// Show a test case with its steps
    Show {
        #[arg(long)]
        id: String,
    },

    /// Attach generated code to a test case
    SaveCode {
        #[arg(long)]
        id: String,

        #[arg(long)]
        file: Option<String>,

        #[arg(long)]
        text: Option<String>,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `pageforge.yaml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ollama: OllamaConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// JSONL mutation trace; disabled when unset
    pub trace_file: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            trace_file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OllamaConfig {
    pub endpoint: Option<String>,
    pub model: Option<String>,
}

// Serde default helpers
fn default_data_dir() -> String {
    ".pageforge".to_string()
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if the file is missing
/// or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or("pageforge.yaml");
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    }
}
