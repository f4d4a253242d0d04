//! Saved default flags.
//!
//! A defaults file holds the same `--flag` tokens the command line accepts,
//! so it is parsed by clap with the very [`ConfigFlags`] the CLI flattens.
//! Blank lines and `#` comments are ignored.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

const APP_DIR: &str = "mdview";
const GLOBAL_FILE: &str = "config";
const LOCAL_FILE: &str = ".mdviewrc";

/// Colour scheme requested for the rendered page.
#[derive(clap::ValueEnum, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    /// Follow the platform preference.
    #[default]
    Auto,
    Light,
    Dark,
}

impl ThemeMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

/// Flags that can be saved as defaults.
#[derive(clap::Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    /// Reload the file when it changes on disk
    #[arg(short, long)]
    pub watch: bool,

    /// Do not maximize the window on startup
    #[arg(long)]
    pub no_maximize: bool,

    /// Page colour scheme
    #[arg(long, value_enum)]
    pub theme: Option<ThemeMode>,
}

/// Command line of a defaults file: flags only, no program name.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_help_flag = true)]
struct SavedFlags {
    #[command(flatten)]
    flags: ConfigFlags,
}

impl ConfigFlags {
    /// Layer `other` on top of `self`.
    ///
    /// Switches are sticky: a saved `--watch` cannot be turned off from the
    /// command line, only cleared with `--clear`.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            watch: self.watch || other.watch,
            no_maximize: self.no_maximize || other.no_maximize,
            theme: other.theme.or(self.theme),
        }
    }

    /// Parse the contents of a defaults file.
    ///
    /// # Errors
    /// Returns an error for unknown flags or invalid values.
    pub fn parse_saved(content: &str) -> Result<Self> {
        let tokens = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .flat_map(str::split_whitespace);
        let saved = SavedFlags::try_parse_from(tokens).context("Invalid saved flags")?;
        Ok(saved.flags)
    }

    /// The command-line tokens that reproduce these flags.
    pub fn to_tokens(&self) -> Vec<String> {
        let switches = [(self.watch, "--watch"), (self.no_maximize, "--no-maximize")];
        switches
            .into_iter()
            .filter_map(|(on, flag)| on.then(|| flag.to_string()))
            .chain(self.theme.map(|theme| format!("--theme={}", theme.as_str())))
            .collect()
    }
}

/// A file of saved default flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultsFile {
    path: PathBuf,
}

impl DefaultsFile {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Per-user defaults under the platform config directory.
    ///
    /// `None` when the platform reports no config directory.
    pub fn global() -> Option<Self> {
        dirs::config_dir().map(|dir| Self::at(dir.join(APP_DIR).join(GLOBAL_FILE)))
    }

    /// Defaults for the current directory, layered over the global ones.
    pub fn local() -> Self {
        Self::at(LOCAL_FILE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved flags; a missing file means no defaults.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<ConfigFlags> {
        match fs::read_to_string(&self.path) {
            Ok(content) => ConfigFlags::parse_saved(&content)
                .with_context(|| format!("Bad defaults file {}", self.path.display())),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(ConfigFlags::default()),
            Err(err) => Err(err)
                .with_context(|| format!("Failed to read defaults {}", self.path.display())),
        }
    }

    /// Replace the file with `flags`.
    ///
    /// # Errors
    /// Returns an error if the directory or the file cannot be written.
    pub fn save(&self, flags: &ConfigFlags) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }
        let mut content = String::from("# mdview defaults (saved with --save)\n");
        for token in flags.to_tokens() {
            content.push_str(&token);
            content.push('\n');
        }
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write defaults {}", self.path.display()))?;
        tracing::info!(path = %self.path.display(), "saved defaults");
        Ok(())
    }

    /// Remove the file; clearing absent defaults is not an error.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be removed.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Err(err) if err.kind() != ErrorKind::NotFound => {
                Err(err).with_context(|| format!("Failed to remove {}", self.path.display()))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_saved_accepts_both_value_forms() {
        let flags = ConfigFlags::parse_saved("--watch --theme dark\n").unwrap();
        assert!(flags.watch);
        assert_eq!(flags.theme, Some(ThemeMode::Dark));

        let flags = ConfigFlags::parse_saved("--theme=light\n").unwrap();
        assert_eq!(flags.theme, Some(ThemeMode::Light));
    }

    #[test]
    fn test_parse_saved_rejects_unknown_flags_and_values() {
        assert!(ConfigFlags::parse_saved("--fullscreen\n").is_err());
        assert!(ConfigFlags::parse_saved("--theme sepia\n").is_err());
        assert!(ConfigFlags::parse_saved("README.md\n").is_err());
    }

    #[test]
    fn test_to_tokens_omits_unset_flags() {
        assert!(ConfigFlags::default().to_tokens().is_empty());
        let flags = ConfigFlags {
            no_maximize: true,
            theme: Some(ThemeMode::Auto),
            ..ConfigFlags::default()
        };
        assert_eq!(flags.to_tokens(), vec!["--no-maximize", "--theme=auto"]);
    }

    #[test]
    fn test_union_keeps_switches_and_prefers_later_theme() {
        let file = ConfigFlags {
            watch: true,
            theme: Some(ThemeMode::Light),
            ..ConfigFlags::default()
        };
        let cli = ConfigFlags {
            no_maximize: true,
            theme: Some(ThemeMode::Dark),
            ..ConfigFlags::default()
        };
        let merged = file.union(&cli);
        assert!(merged.watch);
        assert!(merged.no_maximize);
        assert_eq!(merged.theme, Some(ThemeMode::Dark));
        assert_eq!(cli.union(&ConfigFlags::default()).theme, Some(ThemeMode::Dark));
    }

    #[test]
    fn test_save_load_and_clear() {
        let dir = tempdir().unwrap();
        let file = DefaultsFile::at(dir.path().join("nested").join("config"));
        let flags = ConfigFlags {
            watch: true,
            no_maximize: true,
            theme: Some(ThemeMode::Light),
        };

        file.save(&flags).unwrap();
        assert_eq!(file.load().unwrap(), flags);

        file.clear().unwrap();
        assert!(!file.path().exists());
        file.clear().unwrap();
        assert_eq!(file.load().unwrap(), ConfigFlags::default());
    }

    #[test]
    fn test_global_file_lives_under_app_dir() {
        if let Some(file) = DefaultsFile::global() {
            assert!(file.path().ends_with(Path::new(APP_DIR).join(GLOBAL_FILE)));
        }
    }
}
