//! repo-toolkit - CLI entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use repo_toolkit::config::ConfigArgs;
use repo_toolkit::logging::init_logging;
use repo_toolkit::mcp::serve_stdio;
use repo_toolkit::tools::ToolRegistry;

/// GitHub tools for agent hosts.
#[derive(Parser, Debug)]
#[command(name = "repo-toolkit")]
#[command(about = "GitHub repository tools for agent hosts")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the tools over MCP on stdin/stdout until the host disconnects
    Serve,

    /// Invoke one tool and print its reply
    Call {
        /// Registered tool name
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// Print the registered tools and their argument schemas
    Tools,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = cli
        .config
        .into_settings()
        .context("Invalid configuration")?;

    init_logging(&settings.log).context("Failed to set up logging")?;

    let registry = ToolRegistry::with_defaults(settings.api);

    match cli.command {
        Command::Serve => {
            serve_stdio(registry).await.context("MCP server failed")?;
        }
        Command::Call { tool, args } => {
            let args: serde_json::Value =
                serde_json::from_str(&args).context("--args must be a JSON object")?;
            let output = registry.call(&tool, args).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Command::Tools => {
            println!("{}", serde_json::to_string_pretty(&registry.list_tools())?);
        }
    }

    Ok(())
}
