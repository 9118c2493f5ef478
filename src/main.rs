use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prompt_relay::ai::{CompletionService, ProviderFactory};
use prompt_relay::generator;
use prompt_relay::models::{
    ApiConfig, KeywordRequest, PromptRequest, PromptStyle, Provider, ServerConfig, MAX_COUNT,
};
use prompt_relay::server;
use prompt_relay::settings::{mask_secret, ApiConfigPatch, SettingsStore, DEFAULT_SETTINGS_FILE};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "prompt-relay")]
#[command(about = "Generate keywords and creative prompts via Gemini or OpenRouter")]
struct CliArgs {
    /// Path of the saved API settings used by client commands.
    #[arg(long, global = true, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP relay.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate keywords for a topic with the saved provider.
    Keywords {
        topic: String,
        #[arg(short, long, default_value_t = 10)]
        count: u32,
    },
    /// Generate one prompt per keyword with the saved provider.
    Prompts {
        #[arg(short, long, default_value = "photography", value_parser = parse_style_arg)]
        style: PromptStyle,
        #[arg(short, long)]
        count: Option<u32>,
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// List OpenRouter models using the saved OpenRouter key.
    Models,
    /// Show or change the saved API settings.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    Show,
    Set {
        #[arg(long, value_parser = parse_provider_arg)]
        provider: Option<Provider>,
        #[arg(long)]
        gemini_key: Option<String>,
        #[arg(long)]
        openrouter_key: Option<String>,
        #[arg(long)]
        openrouter_model: Option<String>,
    },
}

fn parse_style_arg(input: &str) -> std::result::Result<PromptStyle, String> {
    input.parse().map_err(|e: prompt_relay::Error| e.to_string())
}

fn parse_provider_arg(input: &str) -> std::result::Result<Provider, String> {
    input
        .parse()
        .map_err(|_| format!("Invalid provider '{}'. Expected gemini or openrouter", input))
}

fn print_config(config: &ApiConfig) {
    let show = |value: &Option<String>| match value.as_deref() {
        Some(v) if !v.is_empty() => mask_secret(v),
        _ => "(not set)".to_string(),
    };
    println!("provider:          {}", config.selected_provider.as_str());
    println!("gemini api key:    {}", show(&config.gemini_api_key));
    println!("openrouter key:    {}", show(&config.openrouter_api_key));
    println!(
        "openrouter model:  {}",
        config.openrouter_model.as_deref().unwrap_or("(not set)")
    );
    println!("configured:        {}", config.is_configured());
}

/// Saved settings and provider wiring used by the client subcommands.
struct ClientContext {
    store: SettingsStore,
    api_config: ApiConfig,
    providers: ProviderFactory,
}

impl ClientContext {
    fn load(settings: &Path, server_config: &ServerConfig) -> Result<Self> {
        let store = SettingsStore::new(settings);
        let api_config = store
            .load()
            .with_context(|| format!("Failed to read settings from {}", settings.display()))?;

        Ok(Self {
            store,
            api_config,
            providers: ProviderFactory::from_config(server_config),
        })
    }

    fn completion_service(&self) -> Result<Box<dyn CompletionService>> {
        Ok(self
            .providers
            .completion_service(&self.api_config.selection()?))
    }
}

/// Prompt count used when `--count` is not given: every keyword, capped at the maximum.
fn default_prompt_count(keywords: &[String]) -> u32 {
    keywords.len().min(MAX_COUNT as usize) as u32
}

async fn run(args: CliArgs) -> Result<()> {
    let mut server_config = ServerConfig::from_env().context("Invalid server configuration")?;

    match args.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                server_config.host = host;
            }
            if let Some(port) = port {
                server_config.port = port;
            }
            server::serve(&server_config).await?;
        }
        Command::Keywords { topic, count } => {
            let request = KeywordRequest {
                input: topic,
                count,
            };
            request.validate()?;
            let client = ClientContext::load(&args.settings, &server_config)?;
            let service = client.completion_service()?;
            for keyword in generator::generate_keywords(service.as_ref(), &request).await? {
                println!("{}", keyword);
            }
        }
        Command::Prompts {
            style,
            count,
            keywords,
        } => {
            let count = count.unwrap_or_else(|| default_prompt_count(&keywords));
            let request = PromptRequest {
                keywords,
                style,
                count,
            };
            request.validate()?;
            let client = ClientContext::load(&args.settings, &server_config)?;
            let service = client.completion_service()?;
            let prompts =
                generator::generate_prompts(service.as_ref(), &request, server_config.prompt_delay)
                    .await?;
            for prompt in prompts {
                println!("{}", prompt);
            }
        }
        Command::Models => {
            let client = ClientContext::load(&args.settings, &server_config)?;
            let api_key = client
                .api_config
                .openrouter_api_key
                .as_deref()
                .filter(|k| !k.trim().is_empty())
                .context("OpenRouter API key required. Run `config set --openrouter-key`")?;
            for model in client.providers.models_client(api_key).list_models().await? {
                println!("{}\t{}", model.id, model.name);
            }
        }
        Command::Config(ConfigCommand::Show) => {
            let client = ClientContext::load(&args.settings, &server_config)?;
            println!("settings file:     {}", client.store.path().display());
            print_config(&client.api_config);
        }
        Command::Config(ConfigCommand::Set {
            provider,
            gemini_key,
            openrouter_key,
            openrouter_model,
        }) => {
            let client = ClientContext::load(&args.settings, &server_config)?;
            let updated = client.store.update(
                &client.api_config,
                ApiConfigPatch {
                    selected_provider: provider,
                    gemini_api_key: gemini_key,
                    openrouter_api_key: openrouter_key,
                    openrouter_model,
                },
            )?;
            print_config(&updated);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prompt_relay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();
    info!("Starting prompt-relay");

    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}
