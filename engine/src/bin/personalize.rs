use std::path::PathBuf;

use clap::Parser;
use color_eyre::{Result, eyre::eyre};
use engine::{Config, ImageModel, Personalize, SelectedImage, config::API_URL_ENV, fetch_image};

/// Sends one photo to the personalize endpoint and prints the result url
#[derive(clap::Parser)]
struct Arg {
    image: PathBuf,

    #[arg(long, env = API_URL_ENV)]
    api_url: Option<String>,

    /// Also download the generated image to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    pretty_env_logger::init();
    color_eyre::install()?;
    let Arg {
        image,
        api_url,
        output,
    } = Arg::parse();

    let cfg = Config::resolve(api_url)?;
    let image = SelectedImage::load(&image).await?;
    let client = reqwest::Client::new();
    let model = Personalize::with_client(cfg.api_url, client.clone());

    let result = model.generate(image).await.map_err(|e| {
        let notice = e.notice();
        eyre!("{}: {}", notice.title, notice.message)
    })?;
    println!("{}", result.url);

    if let Some(path) = output {
        let bytes = fetch_image(&client, &result.url).await?;
        tokio::fs::write(&path, &bytes).await?;
        println!("Saved image to {}, {} bytes", path.display(), bytes.len());
    }

    Ok(())
}
