//! CLI for Veo Studio - serve the web UI or generate a single video.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use veo_studio::server::{self, AppState};
use veo_studio::{generate_video, Config, GenerationInput, GenerationRequest, VeoClient, VideoClient};

#[derive(Parser)]
#[command(name = "veo-studio")]
#[command(about = "Generate videos from text prompts with Google Veo")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web UI and HTTP API
    Serve(ServeArgs),

    /// Generate one video and write it to disk
    Generate(GenerateArgs),

    /// Verify that the API key is accepted
    Check,
}

#[derive(Args)]
struct ServeArgs {
    /// Host to bind to (overrides VEO_STUDIO_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides VEO_STUDIO_PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[derive(Args)]
struct GenerateArgs {
    /// The text prompt describing the video
    prompt: String,

    /// Output file path
    #[arg(short, long, default_value = "ai-generated-video.mp4")]
    output: PathBuf,

    /// Aspect ratio (e.g., 9:16, 16:9)
    #[arg(long)]
    aspect_ratio: Option<String>,

    /// Resolution (e.g., 720p, 1080p)
    #[arg(long)]
    resolution: Option<String>,

    /// What the video should avoid
    #[arg(long)]
    negative_prompt: Option<String>,

    /// Model identifier (defaults to VEO_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Commands::Serve(args) => run_server(config, args).await?,
        Commands::Generate(args) => generate(config, args).await?,
        Commands::Check => check(config).await?,
    }

    Ok(())
}

fn build_client(config: &Config) -> anyhow::Result<VeoClient> {
    let mut builder = VeoClient::builder().model(&config.default_model);
    if let Some(key) = &config.api_key {
        builder = builder.api_key(key);
    }
    Ok(builder.build()?)
}

async fn run_server(mut config: Config, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let client = build_client(&config)?;
    let state = AppState::new(Arc::new(client), &config.default_model, config.settings);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        model = %config.default_model,
        timeout_secs = config.settings.timeout.as_secs(),
        poll_interval_secs = config.settings.poll_interval.as_secs(),
        "starting veo-studio on http://{}",
        config.bind_addr()
    );
    server::serve(listener, state).await?;
    Ok(())
}

async fn generate(config: Config, args: GenerateArgs) -> anyhow::Result<()> {
    let request = GenerationRequest::from_input(
        GenerationInput {
            prompt: Some(args.prompt),
            aspect_ratio: args.aspect_ratio,
            resolution: args.resolution,
            negative_prompt: args.negative_prompt,
            model: args.model,
        },
        &config.default_model,
    )?;

    let client = build_client(&config)?;
    let video = generate_video(&client, &request, &config.settings).await?;
    video.save(&args.output)?;

    if args.json {
        let result = serde_json::json!({
            "type": "video",
            "success": true,
            "output": args.output.display().to_string(),
            "size_bytes": video.size(),
            "mime_type": video.mime_type,
            "model": video.metadata.model,
            "duration_ms": video.metadata.duration_ms,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "Generated video: {} ({} bytes) via {}",
            args.output.display(),
            video.size(),
            client.name()
        );
        if let Some(duration) = video.metadata.duration_ms {
            println!("Generation time: {}ms", duration);
        }
    }

    Ok(())
}

async fn check(config: Config) -> anyhow::Result<()> {
    let client = build_client(&config)?;
    client.health_check().await?;
    println!("{}: API key accepted for {}", client.name(), config.default_model);
    Ok(())
}
