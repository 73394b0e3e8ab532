//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;
use crate::download::Batch;

/// Configuration file looked up when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "pkgfetch.toml";

/// Sequential package downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "pkgfetch",
    version,
    about = "Download installer packages one at a time with live progress",
    long_about = "Downloads each locator in order into the output directory, showing a \
                  progress line per file.\n\n\
                  The first failure stops the whole run; files already downloaded are kept."
)]
pub struct Args {
    /// Locators (URLs) to download, in order.
    #[arg(required = true, num_args = 1..)]
    pub locators: Vec<String>,

    /// Distribution manifest locator. When given, it is downloaded first and
    /// the package locators are sorted.
    #[arg(short, long)]
    pub manifest: Option<String>,

    /// Directory that receives the downloaded files.
    #[arg(short = 'o', long = "output-directory", env = "PKGFETCH_OUTPUT_DIR")]
    pub output_directory: Option<PathBuf>,

    /// Scratch directory for in-flight downloads.
    #[arg(long = "temporary-directory", env = "PKGFETCH_TEMP_DIR")]
    pub temporary_directory: Option<PathBuf>,

    /// User agent sent with every request.
    #[arg(long = "user-agent", env = "PKGFETCH_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Path to configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Hide progress lines.
    #[arg(long, short)]
    pub quiet: bool,

    /// Redraw progress with carriage returns instead of ANSI escapes.
    #[arg(long)]
    pub no_ansi: bool,

    /// Width of the progress line.
    #[arg(long)]
    pub width: Option<usize>,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// The batch described by the arguments.
    pub fn batch(&self) -> Batch {
        match &self.manifest {
            Some(manifest) => Batch::for_packages(manifest.clone(), self.locators.clone()),
            None => Batch::new(self.locators.clone()),
        }
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(dir) = &self.output_directory {
            config.download.output_directory = Some(dir.clone());
        }

        if let Some(dir) = &self.temporary_directory {
            config.download.temporary_directory = Some(dir.clone());
        }

        if let Some(user_agent) = &self.user_agent {
            config.download.user_agent = user_agent.clone();
        }

        // Boolean flags (only override if set to non-default)
        if self.quiet {
            config.output.quiet = true;
        }

        if self.no_ansi {
            config.output.ansi = false;
        }

        if let Some(width) = self.width {
            config.output.line_width = width;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_batch_keeps_order() {
        let args = Args::parse_from(["pkgfetch", "https://h/b.pkg", "https://h/a.pkg"]);
        assert_eq!(args.batch().locators(), ["https://h/b.pkg", "https://h/a.pkg"]);
    }

    #[test]
    fn test_manifest_batch_sorted() {
        let args = Args::parse_from([
            "pkgfetch",
            "--manifest",
            "https://h/x.dist",
            "https://h/b.pkg",
            "https://h/a.pkg",
        ]);
        assert_eq!(
            args.batch().locators(),
            ["https://h/x.dist", "https://h/a.pkg", "https://h/b.pkg"]
        );
    }

    #[test]
    fn test_requires_locator() {
        assert!(Args::try_parse_from(["pkgfetch"]).is_err());
    }

    #[test]
    fn test_merge_overrides() {
        let args = Args::parse_from([
            "pkgfetch",
            "-o",
            "/srv/out",
            "--quiet",
            "--no-ansi",
            "--width",
            "100",
            "https://h/a.pkg",
        ]);
        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.output_directory(), PathBuf::from("/srv/out"));
        assert!(config.output.quiet);
        assert!(!config.output.ansi);
        assert_eq!(config.output.line_width, 100);
    }

    #[test]
    fn test_merge_leaves_unset_values() {
        let args = Args::parse_from(["pkgfetch", "https://h/a.pkg"]);
        let mut config = Config::default();
        config.output.line_width = 120;
        args.merge_into_config(&mut config);

        assert_eq!(config.output.line_width, 120);
        assert!(config.output.ansi);
    }
}
