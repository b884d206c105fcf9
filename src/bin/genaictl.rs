use clap::{Parser, Subcommand};
use genai_api_proxy::fal::models::{
    LightningSdxlInput, QueueUpdate, StableCascadeInput, FAST_LIGHTNING_SDXL, STABLE_CASCADE,
};
use genai_api_proxy::prompt::template::{machine_analysis, truncate_prompt, ANALYSIS_TEMPERATURE};
use genai_api_proxy::{Config, FalClient, OpenAiClient};
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(name = "genaictl", about = "CLI for the generative-AI API proxy", version)]
struct Cli {
    /// Override OPENAI_API_BASE
    #[arg(global = true, long)]
    openai_api_base: Option<String>,

    /// Override FAL_QUEUE_URL
    #[arg(global = true, long)]
    fal_queue_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a prompt through the interface-analysis completion
    Gpt {
        /// Machine description to analyse
        prompt: String,
        /// Sampling temperature
        #[arg(long, default_value_t = ANALYSIS_TEMPERATURE)]
        temperature: f32,
    },
    /// Generate an image with the direct image provider
    Dalle {
        /// Image prompt (truncated to 1024 characters)
        prompt: String,
        /// Output raw result JSON instead of the first image URL
        #[arg(long)]
        json: bool,
    },
    /// Queue an image generation job and wait for it to finish
    Fal {
        /// Image prompt (truncated to 1024 characters)
        prompt: String,
        /// Use the fast lightning model
        #[arg(long)]
        fast: bool,
        /// Print queue progress while waiting
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env and parse CLI
    Config::dotenv_load();
    let cli = Cli::parse();

    let mut conf = Config::new().expect("Failed to load config");
    if let Some(base) = cli.openai_api_base {
        conf.openai_api_base = base;
    }
    if let Some(url) = cli.fal_queue_url {
        conf.fal_queue_url = url;
    }

    match cli.command {
        Commands::Gpt { prompt, temperature } => {
            let client = OpenAiClient::new(&conf);
            let analysis = machine_analysis(&prompt);
            match client.complete(&analysis, temperature).await {
                Ok(text) => {
                    println!("{}", text);
                    Ok(())
                }
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Commands::Dalle { prompt, json } => {
            let client = OpenAiClient::new(&conf);
            let result = client.generate_image(truncate_prompt(&prompt)).await.map_err(|e| {
                eprintln!("Error: {}", e);
                e
            })?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else if let Some(url) = result.data.first().and_then(|d| d.url.as_deref()) {
                println!("{}", url);
            } else {
                eprintln!("No image URL in result; rerun with --json to inspect it");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Fal { prompt, fast, verbose } => {
            let client = FalClient::new(&conf);
            let short_prompt = truncate_prompt(&prompt).to_string();

            let updates = if verbose {
                let (tx, mut rx) = mpsc::unbounded_channel();
                tokio::spawn(async move {
                    while let Some(update) = rx.recv().await {
                        match update {
                            QueueUpdate::InQueue { queue_position } => match queue_position {
                                Some(pos) => eprintln!("[queue] position {}", pos),
                                None => eprintln!("[queue] waiting"),
                            },
                            QueueUpdate::InProgress { logs } => {
                                for line in logs {
                                    eprintln!("[progress] {}", line.message);
                                }
                            }
                            QueueUpdate::Completed { .. } => eprintln!("[done]"),
                        }
                    }
                });
                Some(tx)
            } else {
                None
            };

            let result = if fast {
                let input = LightningSdxlInput::new(short_prompt);
                client.subscribe_with_updates(FAST_LIGHTNING_SDXL, &input, updates).await
            } else {
                let input = StableCascadeInput::new(short_prompt);
                client.subscribe_with_updates(STABLE_CASCADE, &input, updates).await
            };
            match result {
                Ok(batch) => match batch.first_url() {
                    Some(url) => {
                        println!("{}", url);
                        Ok(())
                    }
                    None => {
                        eprintln!("Error: provider returned an empty image list");
                        std::process::exit(1);
                    }
                },
                Err(e) => {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}
