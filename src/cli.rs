/*!
buoymap Command Line Interface

Renders the data buoys in a CSV file over an ocean boundary and writes the
map to an image file.
*/

use std::path::PathBuf;

use anyhow::Context;
use buoymap::{render_with_config, MapConfig, VERSION};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "buoymap")]
#[command(about = "Plot data buoy locations on a map")]
#[command(version = VERSION)]
pub struct Cli {
    /// Output image path (png, jpg, bmp or svg)
    #[arg(default_value = "bouys_plot.png")]
    pub output: PathBuf,

    /// GeoJSON file with the boundary polygons
    #[arg(long, default_value = "data/north_atlantic.geojson")]
    pub boundary: PathBuf,

    /// CSV file with Name, latitude and longitude columns
    #[arg(long, default_value = "data/buoy_data.csv")]
    pub points: PathBuf,

    /// JSON file with size and style settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Image width in pixels (overrides the config file)
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels (overrides the config file)
    #[arg(long)]
    pub height: Option<u32>,
}

impl Cli {
    fn map_config(&self) -> anyhow::Result<MapConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            None => MapConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.map_config()?;

    render_with_config(&cli.boundary, &cli.points, &cli.output, &config)
        .with_context(|| format!("Failed to render {}", cli.output.display()))?;

    println!("Map written to: {}", cli.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["buoymap"]);
        assert_eq!(cli.output, PathBuf::from("bouys_plot.png"));
        assert_eq!(cli.boundary, PathBuf::from("data/north_atlantic.geojson"));
        assert_eq!(cli.points, PathBuf::from("data/buoy_data.csv"));
        assert_eq!(cli.map_config().unwrap(), MapConfig::default());
    }

    #[test]
    fn test_size_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.json");
        std::fs::write(&path, r#"{"width": 1000, "height": 700, "point_color": "black"}"#)
            .unwrap();

        let cli = Cli::parse_from([
            "buoymap",
            "map.svg",
            "--config",
            path.to_str().unwrap(),
            "--height",
            "900",
        ]);
        let config = cli.map_config().unwrap();
        assert_eq!(config.width, 1000);
        assert_eq!(config.height, 900);
        assert_eq!(config.point_color, "black");
    }
}
