use super::Host;
use crate::Result;
use crate::config::Config;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file (default is one of `cov19.[toml|yml|yaml|json]`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let config_path = args.config.as_ref();

    match Config::load(Utf8Path::new("."), config_path) {
        Ok((_, warnings)) => {
            let _ = writeln!(host.output(), "Configuration file is valid");
            if let Some(path) = config_path {
                let _ = writeln!(host.output(), "Config file: {path}");
            } else {
                let _ = writeln!(host.output(), "Using default configuration (no config file found)");
            }

            if !warnings.is_empty() {
                let _ = writeln!(host.error(), "\n⚠️  Configuration validation warnings:");
                for warning in &warnings {
                    let _ = writeln!(host.error(), "   {warning}");
                }
                let _ = writeln!(host.error());
            }
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::commands::init::{InitArgs, init_config};

    fn temp_path(tmp: &tempfile::TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::try_from(tmp.path().join(name)).unwrap()
    }

    #[test]
    fn test_default_config_is_valid() {
        let tmp = tempfile::tempdir().unwrap();

        for name in ["cov19.yml", "cov19.toml", "cov19.json"] {
            let config_path = temp_path(&tmp, name);

            let mut init_host = TestHost::new();
            init_config(&mut init_host, &InitArgs { output: config_path.clone() }).unwrap();
            assert!(init_host.output_text().contains("Generated default configuration file"));

            let mut host = TestHost::new();
            validate_config(&mut host, &ValidateArgs { config: Some(config_path) }).unwrap();
            assert!(host.output_text().starts_with("Configuration file is valid"), "{name}");
            assert!(host.error_text().is_empty(), "{name}: {}", host.error_text());
            assert_eq!(host.exit_code, None);
        }
    }

    #[test]
    fn test_invalid_toml_syntax() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = temp_path(&tmp, "invalid.toml");
        std::fs::write(&config_path, "[ecdc\nurl = 3\n").unwrap();

        let mut host = TestHost::new();
        let _err = validate_config(&mut host, &ValidateArgs { config: Some(config_path) }).unwrap_err();

        assert!(host.error_text().starts_with("❌ Configuration validation failed"));
        assert_eq!(host.exit_code, Some(1));
    }

    #[test]
    fn test_unknown_field() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = temp_path(&tmp, "unknown.yml");
        std::fs::write(&config_path, "mathdro:\n  endpoint: https://example.com\n").unwrap();

        let mut host = TestHost::new();
        let _err = validate_config(&mut host, &ValidateArgs { config: Some(config_path) }).unwrap_err();
        assert_eq!(host.exit_code, Some(1));
    }

    #[test]
    fn test_warnings_are_reported_but_valid() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = temp_path(&tmp, "cov19.json");
        std::fs::write(&config_path, r#"{"ecdc": {"timeout_secs": 0}}"#).unwrap();

        let mut host = TestHost::new();
        validate_config(&mut host, &ValidateArgs { config: Some(config_path) }).unwrap();

        assert!(host.output_text().starts_with("Configuration file is valid"));
        assert!(host.error_text().contains("ecdc: timeout_secs is 0"));
        assert_eq!(host.exit_code, None);
    }

    #[test]
    fn test_empty_config_is_valid() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = temp_path(&tmp, "empty.toml");
        std::fs::write(&config_path, "# Empty config file\n").unwrap();

        let mut host = TestHost::new();
        validate_config(&mut host, &ValidateArgs { config: Some(config_path) }).unwrap();
    }
}
