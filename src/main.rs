use anyhow::Result;
use clap::Parser;
use placeholder_icons::{
    font::default_font_strategies,
    icon_gen::{self, parse_color, Config, IconStyle},
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[clap(
    name = "placeholder-icons",
    about = "Generate placeholder app and splash icons for a mobile app build"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = icon_gen::DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Label drawn in the middle of each icon.
    #[clap(short, long, default_value = icon_gen::DEFAULT_TEXT)]
    text: String,

    /// TrueType font to try before the system fonts.
    #[clap(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// The background color (CSS color format)
    #[clap(long, value_name = "COLOR", default_value = "#673ab7")]
    background: String,

    /// The label color (CSS color format)
    #[clap(long, value_name = "COLOR", default_value = "#ffffff")]
    text_color: String,

    /// The border color (CSS color format)
    #[clap(long, value_name = "COLOR", default_value = "#ffd700")]
    border_color: String,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let style = IconStyle {
            background: parse_color(&self.background)?,
            text: parse_color(&self.text_color)?,
            border: parse_color(&self.border_color)?,
        };

        Ok(Config {
            output_dir: self.output,
            text: self.text,
            style,
            fonts: default_font_strategies(self.font),
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Args::parse().into_config()?;

    icon_gen::generate_icons(&config)
}
