//! mailtext - render HTML mail bodies as plain text

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use url::Url;

use mailtext::{Renderer, RendererConfig, RendererConfigBuilder, Result};

#[derive(Parser)]
#[command(name = "mailtext")]
#[command(version, about = "Render HTML mail bodies as plain text", long_about = None)]
#[command(after_help = "EXAMPLES:
    mailtext message.html                 Render with RFC defaults
    mailtext --links --width 60 msg.html  Wrap at 60 and show link targets
    cat msg.html | mailtext --newline lf  Read stdin, emit LF line endings")]
struct Cli {
    /// Input HTML file, or `-` for stdin
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Write the text here instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// JSON file with renderer settings; flags take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum line length, 0 to disable wrapping
    #[arg(short, long)]
    width: Option<usize>,

    /// Number of dashes drawn for <hr>
    #[arg(long)]
    hr_width: Option<usize>,

    /// Spaces of indentation per list level
    #[arg(long)]
    list_indent: Option<usize>,

    /// Line ending to emit
    #[arg(long, value_enum)]
    newline: Option<Newline>,

    /// Append <url> after each link
    #[arg(short, long)]
    links: bool,

    /// Render images as [alt text]
    #[arg(short, long)]
    alt_text: bool,

    /// Bullet characters, cycled by list depth
    #[arg(long)]
    bullets: Option<String>,

    /// Separator written after each table cell
    #[arg(long)]
    cell_separator: Option<String>,

    /// Base URL for resolving relative links
    #[arg(long)]
    base_url: Option<String>,

    /// Keep non-breaking spaces instead of converting them
    #[arg(long)]
    keep_nbsp: bool,
}

#[derive(Clone, Copy, Debug, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
enum Newline {
    Crlf,
    Lf,
}

impl Newline {
    fn as_str(self) -> &'static str {
        match self {
            Newline::Crlf => "\r\n",
            Newline::Lf => "\n",
        }
    }
}

/// Renderer settings as read from a `--config` file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    max_line_length: Option<usize>,
    hr_line_length: Option<usize>,
    list_indent_size: Option<usize>,
    newline: Option<Newline>,
    include_hyperlink_urls: Option<bool>,
    include_alt_text: Option<bool>,
    convert_non_breaking_spaces: Option<bool>,
    list_bullets: Option<String>,
    table_cell_separator: Option<String>,
    base_url: Option<String>,
}

impl ConfigFile {
    fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Overlay command-line flags onto the file's values.
    fn merge(mut self, cli: &Cli) -> Self {
        if cli.width.is_some() {
            self.max_line_length = cli.width;
        }
        if cli.hr_width.is_some() {
            self.hr_line_length = cli.hr_width;
        }
        if cli.list_indent.is_some() {
            self.list_indent_size = cli.list_indent;
        }
        if cli.newline.is_some() {
            self.newline = cli.newline;
        }
        if cli.links {
            self.include_hyperlink_urls = Some(true);
        }
        if cli.alt_text {
            self.include_alt_text = Some(true);
        }
        if cli.keep_nbsp {
            self.convert_non_breaking_spaces = Some(false);
        }
        if cli.bullets.is_some() {
            self.list_bullets = cli.bullets.clone();
        }
        if cli.cell_separator.is_some() {
            self.table_cell_separator = cli.cell_separator.clone();
        }
        if cli.base_url.is_some() {
            self.base_url = cli.base_url.clone();
        }
        self
    }

    fn into_config(self) -> Result<RendererConfig> {
        let mut builder: RendererConfigBuilder = RendererConfig::builder();
        if let Some(width) = self.max_line_length {
            builder = builder.max_line_length(width);
        }
        if let Some(hr) = self.hr_line_length {
            builder = builder.hr_line_length(hr);
        }
        if let Some(indent) = self.list_indent_size {
            builder = builder.list_indent_size(indent);
        }
        if let Some(newline) = self.newline {
            builder = builder.line_ending(newline.as_str());
        }
        if let Some(links) = self.include_hyperlink_urls {
            builder = builder.include_hyperlink_urls(links);
        }
        if let Some(alt) = self.include_alt_text {
            builder = builder.include_alt_text(alt);
        }
        if let Some(convert) = self.convert_non_breaking_spaces {
            builder = builder.convert_non_breaking_spaces(convert);
        }
        if let Some(bullets) = self.list_bullets {
            builder = builder.list_bullets(bullets.chars());
        }
        if let Some(separator) = self.table_cell_separator {
            builder = builder.table_cell_separator(separator);
        }
        if let Some(base) = self.base_url {
            builder = builder.base_url(Url::parse(&base)?);
        }
        builder.build()
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let file = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let config = file.merge(cli).into_config()?;

    let html = read_input(cli.input.as_deref())?;
    let text = Renderer::new(config).render_bytes(&html);

    match &cli.output {
        Some(path) => fs::write(path, text)?,
        None => io::stdout().lock().write_all(text.as_bytes())?,
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) if path != Path::new("-") => Ok(fs::read(path)?),
        _ => {
            let mut buf = Vec::new();
            io::stdin().lock().read_to_end(&mut buf)?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_file() {
        let file: ConfigFile =
            serde_json::from_str(r#"{"max_line_length": 40, "newline": "lf"}"#).unwrap();
        let cli = Cli::parse_from(["mailtext", "--width", "60", "--links"]);

        let config = file.merge(&cli).into_config().unwrap();
        assert_eq!(config.max_line_length(), 60);
        assert_eq!(config.line_ending(), "\n");
        assert!(config.include_hyperlink_urls());
    }

    #[test]
    fn test_unknown_config_field_is_rejected() {
        let result: std::result::Result<ConfigFile, _> =
            serde_json::from_str(r#"{"max_width": 40}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_bullets_fail() {
        let cli = Cli::parse_from(["mailtext", "--bullets", ""]);
        let err = ConfigFile::default().merge(&cli).into_config().unwrap_err();
        assert!(matches!(err, mailtext::Error::InvalidConfig(_)));
    }

    #[test]
    fn test_bad_base_url_fails() {
        let cli = Cli::parse_from(["mailtext", "--base-url", "not a url"]);
        let err = ConfigFile::default().merge(&cli).into_config().unwrap_err();
        assert!(matches!(err, mailtext::Error::InvalidBaseUrl(_)));
    }
}
