use clap::Parser;
use color_eyre::Result;
use engine::Config;
use little_portrait::{APP_NAME, Gui, cli::Cli};

pub fn main() -> Result<()> {
    pretty_env_logger::init();
    color_eyre::install()?;
    let cli = Cli::parse();
    let cfg = Config::resolve(cli.api_url)?;
    log::info!("Using backend {}", cfg.api_url);
    iced::application(move || Gui::new(cfg.clone()), Gui::update, Gui::view)
        .title(APP_NAME)
        .subscription(Gui::subscription)
        .run()?;
    Ok(())
}
