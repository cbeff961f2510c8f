use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_slug, Validate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "lorrgs")]
#[command(about = "Fetch fight analysis, spell lists and ranking files from a Lorrgs backend")]
pub struct CliConfig {
    /// TOML file with [endpoints], [defaults] and [logging] sections
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL [default: http://127.0.0.1:5000]
    #[arg(long, global = true)]
    pub api_base: Option<String>,

    /// Base URL of the host serving data/*.json [default: http://127.0.0.1:5000]
    #[arg(long, global = true)]
    pub static_base: Option<String>,

    #[arg(long, value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Cast timeline of one fight, filtered to a spec
    Fight {
        report_id: String,
        fight_id: u32,
        /// Falls back to [defaults].spec_slug, then redmage-redmage
        #[arg(long)]
        spec: Option<String>,
    },
    /// Spell mapping of a spec
    Spells { spec: String },
    /// Precomputed ranking file for a spec and boss
    Ranking { spec: String, boss: String },
    /// Boss timeline file
    Boss { short_name: String },
}

impl CliConfig {
    /// Defaults, then `--config`, then flags given on the command line.
    pub fn resolve(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_settings(),
            None => Settings::default(),
        };

        if let Some(api_base) = &self.api_base {
            settings.api_base = api_base.clone();
        }
        if let Some(static_base) = &self.static_base {
            settings.static_base = static_base.clone();
        }
        if let Some(format) = self.log_format {
            settings.log_format = format;
        }
        if self.verbose {
            settings.verbose = true;
        }

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for Command {
    fn validate(&self) -> Result<()> {
        match self {
            Command::Fight {
                report_id, spec, ..
            } => {
                validate_slug("report_id", report_id)?;
                if let Some(spec) = spec {
                    validate_slug("spec", spec)?;
                }
                Ok(())
            }
            Command::Spells { spec } => validate_slug("spec", spec),
            Command::Ranking { spec, boss } => {
                validate_slug("spec", spec)?;
                validate_slug("boss", boss)
            }
            Command::Boss { short_name } => validate_slug("short_name", short_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_fight_command() {
        let cli = CliConfig::try_parse_from(["lorrgs", "fight", "abc", "1", "--spec", "sage-sage"]).unwrap();
        match &cli.command {
            Command::Fight {
                report_id,
                fight_id,
                spec,
            } => {
                assert_eq!(report_id, "abc");
                assert_eq!(*fight_id, 1);
                assert_eq!(spec.as_deref(), Some("sage-sage"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert_eq!(cli.resolve().unwrap(), Settings::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[endpoints]\napi_base = \"http://file-host:5000\"\nstatic_base = \"http://file-static:8000\"\n[logging]\nformat = \"json\""
        )
        .unwrap();

        let cli = CliConfig::try_parse_from([
            "lorrgs",
            "--config",
            file.path().to_str().unwrap(),
            "--api-base",
            "http://flag-host:5000",
            "spells",
            "paladin",
        ])
        .unwrap();

        let settings = cli.resolve().unwrap();
        assert_eq!(settings.api_base, "http://flag-host:5000");
        assert_eq!(settings.static_base, "http://file-static:8000");
        assert_eq!(settings.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_base_fails_resolution() {
        let cli = CliConfig::try_parse_from(["lorrgs", "--api-base", "localhost", "spells", "paladin"]).unwrap();
        assert!(cli.resolve().is_err());
    }

    #[test]
    fn test_command_validation() {
        let cli = CliConfig::try_parse_from(["lorrgs", "ranking", "warrior-warrior", "../../etc"]).unwrap();
        assert!(cli.command.validate().is_err());

        let cli = CliConfig::try_parse_from(["lorrgs", "boss", "m4s"]).unwrap();
        assert!(cli.command.validate().is_ok());
    }
}
