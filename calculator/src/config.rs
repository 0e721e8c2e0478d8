use crate::cli::Cli;
use crate::prices::{PriceTable, PriceTableError};
use mesh_parser::ExtractOptions;
use std::path::PathBuf;
use std::time::Duration;

/// Format names tried for each kind of tagged source
pub const MESHVIEWER_HINTS: &[&str] = &["meshviewer"];
pub const NODES_JSON_HINTS: &[&str] = &["nodes-v1", "nodes-v2"];
pub const ALFRED_HINTS: &[&str] = &["alfred"];
pub const FRANKEN_HINTS: &[&str] = &["franken"];

/// A place to download a snapshot from
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub url: String,
    /// Expected formats; empty means detect from content
    pub hints: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PriceSource {
    Bundled,
    File(PathBuf),
}

impl PriceSource {
    pub fn load(&self) -> Result<PriceTable, PriceTableError> {
        match self {
            PriceSource::Bundled => PriceTable::builtin(),
            PriceSource::File(path) => PriceTable::load(path),
        }
    }
}

/// Resolved settings for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub sources: Vec<Source>,
    pub extract: ExtractOptions,
    pub output: OutputMode,
    pub prices: PriceSource,
    pub timeout: Duration,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Self {
        let tagged = [
            (&cli.meshviewer_json, MESHVIEWER_HINTS),
            (&cli.nodes_json, NODES_JSON_HINTS),
            (&cli.alfred_json, ALFRED_HINTS),
            (&cli.franken, FRANKEN_HINTS),
            (&cli.urls, &[] as &'static [&'static str]),
        ];

        let sources = tagged
            .into_iter()
            .flat_map(|(urls, hints)| {
                urls.iter().map(move |url| Source {
                    url: url.clone(),
                    hints,
                })
            })
            .collect();

        Self {
            sources,
            extract: ExtractOptions::excluding(cli.exclude_domain.iter().cloned()),
            output: if cli.output_json {
                OutputMode::Json
            } else {
                OutputMode::Text
            },
            prices: cli
                .devices
                .clone()
                .map_or(PriceSource::Bundled, PriceSource::File),
            timeout: Duration::from_millis(cli.timeout_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_sources_in_flag_order() {
        let cli = Cli::try_parse_from([
            "ff-net-worth-calc",
            "--url",
            "https://any.example/data.json",
            "--franken",
            "https://fff.example/routerlist.json",
            "--nodes-json",
            "https://b.example/nodes.json",
            "--meshviewer-json",
            "https://a.example/meshviewer.json",
        ])
        .unwrap();

        let settings = Settings::from_cli(&cli);
        let urls: Vec<_> = settings.sources.iter().map(|s| s.url.as_str()).collect();

        assert_eq!(
            urls,
            vec![
                "https://a.example/meshviewer.json",
                "https://b.example/nodes.json",
                "https://fff.example/routerlist.json",
                "https://any.example/data.json",
            ]
        );
        assert_eq!(settings.sources[1].hints, NODES_JSON_HINTS);
        assert!(settings.sources[3].hints.is_empty());
    }

    #[test]
    fn test_settings_from_flags() {
        let cli = Cli::try_parse_from([
            "ff-net-worth-calc",
            "--exclude-domain",
            "dom01",
            "--devices",
            "/etc/ff/devices.json",
            "--timeout-ms",
            "250",
            "--output-json",
        ])
        .unwrap();

        let settings = Settings::from_cli(&cli);

        assert!(settings.sources.is_empty());
        assert!(settings.extract.exclude_domains.contains("dom01"));
        assert_eq!(settings.output, OutputMode::Json);
        assert_eq!(settings.prices, PriceSource::File(PathBuf::from("/etc/ff/devices.json")));
        assert_eq!(settings.timeout, Duration::from_millis(250));
    }
}
