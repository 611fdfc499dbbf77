use engine::config::API_URL_ENV;

#[derive(Debug, clap::Parser)]
#[command(about = "Turn ordinary photos into watercolor portraits")]
pub struct Cli {
    /// Base url of the personalize backend
    #[arg(long, env = API_URL_ENV)]
    pub api_url: Option<String>,
}
