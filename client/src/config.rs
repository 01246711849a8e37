use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, bail};

pub type Rgb = [u8; 3];

/// Everything the front end needs for one run, read from an ini-style file.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the seed description (dimensions, alive character, rows).
    pub seed_file: PathBuf,

    /// Birth/survival specifier, e.g. "B3/S23".
    pub rules: String,

    pub max_gen: usize,
    pub fps: u64,

    /// Export one PNG frame per generation under `image_dir`.
    pub generate_image: bool,
    pub alive_color: Rgb,
    pub bkg_color: Rgb,
    pub image_dir: PathBuf,

    /// Square edge, in real pixels, of one exported cell.
    pub block_size: u32,
}

impl Config {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Couldn't read config file {}", path.display()))?;

        Self::parse(&text)
    }

    /// Ini-style `key = value` lines; `#`/`;` comment lines, inline `;`
    /// comments, and section headers are skipped, unknown keys ignored.
    /// Every key but `seed_file` has a default.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let entries = parse_entries(text);

        let seed_file = entries
            .get("seed_file")
            .context("Config is missing the seed_file key")?;

        let default_image_dir = format!("frames_{}", chrono::Local::now().format("%Y%m%d"));

        Ok(Self {
            seed_file: PathBuf::from(seed_file),
            rules: entries
                .get("rules")
                .cloned()
                .unwrap_or_else(|| "B3/S23".to_owned()),
            max_gen: typed(&entries, "max_gen", 50)?,
            fps: typed(&entries, "fps", 2)?,
            generate_image: typed(&entries, "generate_image", false)?,
            alive_color: color(&entries, "alive_color", [255, 255, 255])?,
            bkg_color: color(&entries, "bkg_color", [0, 0, 0])?,
            image_dir: PathBuf::from(
                entries
                    .get("image_dir")
                    .cloned()
                    .unwrap_or(default_image_dir),
            ),
            block_size: typed(&entries, "block_size", 4)?,
        })
    }
}

fn parse_entries(text: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();

    for line in text.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with(['#', ';', '[']) {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let value = value.split(';').next().unwrap_or_default().trim();
        entries.insert(key.trim().to_owned(), value.to_owned());
    }

    entries
}

fn typed<T>(entries: &HashMap<String, String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match entries.get(key) {
        Some(raw) => raw
            .parse()
            .with_context(|| format!("Bad value {raw:?} for config key {key:?}")),
        None => Ok(default),
    }
}

fn color(entries: &HashMap<String, String>, key: &str, default: Rgb) -> anyhow::Result<Rgb> {
    match entries.get(key) {
        Some(raw) => parse_color(raw).with_context(|| format!("Bad color for config key {key:?}")),
        None => Ok(default),
    }
}

/// `#rrggbb` hex or one of a few named colors.
pub fn parse_color(name: &str) -> anyhow::Result<Rgb> {
    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            bail!("Color {name:?} must be #rrggbb");
        }

        let channel = |index: usize| {
            u8::from_str_radix(&hex[index..index + 2], 16)
                .with_context(|| format!("Color {name:?} must be #rrggbb"))
        };

        return Ok([channel(0)?, channel(2)?, channel(4)?]);
    }

    match name.to_ascii_lowercase().as_str() {
        "black" => Ok([0, 0, 0]),
        "white" => Ok([255, 255, 255]),
        "red" => Ok([255, 0, 0]),
        "green" => Ok([0, 255, 0]),
        "blue" => Ok([0, 0, 255]),
        "yellow" => Ok([255, 255, 0]),
        "cyan" => Ok([0, 255, 255]),
        "magenta" => Ok([255, 0, 255]),
        _ => bail!("Unknown color {name:?}"),
    }
}
