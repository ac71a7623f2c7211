//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::{net::SocketAddr, str::FromStr, time::Duration};

use axum::http::HeaderValue;
use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

pub use cli::{CliArgs, Command, ExportArgs, ServeArgs, ServeOverrides, SiteOverride};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "folio";
const ENV_PREFIX: &str = "FOLIO";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_GRACEFUL_SHUTDOWN_SECS: u64 = 10;

const DEFAULT_SITE_URL: &str = "https://nabil-thange.vercel.app";
const DEFAULT_SITE_NAME: &str = "Nabil Thange";
const DEFAULT_SITE_TITLE: &str = "Nabil Thange - Full-Stack Developer & Creative Technologist";
const DEFAULT_SITE_DESCRIPTION: &str = "Full-stack developer specializing in Next.js, React, and modern web technologies. Creating innovative digital experiences with expertise in AI integration, responsive design, and performance optimization.";
const DEFAULT_AUTHOR_NAME: &str = "Nabil Thange";
const DEFAULT_AUTHOR_FULL_NAME: &str = "Nabil Salim Thange";
const DEFAULT_AUTHOR_EMAIL: &str = "thangenabil@gmail.com";
const DEFAULT_JOB_TITLE: &str = "Full-Stack Developer & Creative Technologist";
const DEFAULT_TWITTER_HANDLE: &str = "@THEONLYNABIL";
const DEFAULT_LOCALE: &str = "en_IN";
const DEFAULT_LANGUAGE: &str = "en-IN";
const DEFAULT_OG_IMAGE: &str = "/og-image.png";
const DEFAULT_CITY: &str = "Mumbai";
const DEFAULT_REGION: &str = "Maharashtra";
const DEFAULT_COUNTRY: &str = "India";
const DEFAULT_SOCIAL_LINKS: [&str; 8] = [
    "https://github.com/NabilThange",
    "https://www.linkedin.com/in/nabil-thange/",
    "https://x.com/THEONLYNABIL",
    "https://dev.to/nabil_thange",
    "https://devpost.com/thangenabil",
    "https://huggingface.co/Nabil-Oc",
    "https://www.instagram.com/nabil_thange/",
    "https://lablab.ai/u/@NabilT",
];
const DEFAULT_SITE_KEYWORDS: [&str; 8] = [
    "Nabil Thange",
    "Full-Stack Developer",
    "Next.js Developer",
    "React Developer",
    "Web Development",
    "TypeScript",
    "Portfolio",
    "Creative Technologist",
];
const DEFAULT_BLOG_KEYWORDS: [&str; 3] = ["Nabil Thange", "Blog", "Web Development"];

const DEFAULT_STATIC_PREFIXES: [&str; 3] = ["/static/", "/_next/static/", "/public/"];
const DEFAULT_PRELOAD_HINT: &str = "</static/css/site.css>; rel=preload; as=style";

/// Fully-resolved deployment settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub site: SiteSettings,
    pub edge: EdgeSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub graceful_shutdown: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

/// Identity of the site owner and the public origin everything links back to.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    /// Public origin without a trailing slash.
    pub url: String,
    pub name: String,
    pub title: String,
    pub description: String,
    pub author_name: String,
    pub author_full_name: String,
    pub email: String,
    pub job_title: String,
    pub twitter_handle: String,
    pub locale: String,
    pub language: String,
    pub og_image: String,
    pub city: String,
    pub region: String,
    pub country: String,
    pub social_links: Vec<String>,
    pub keywords: Vec<String>,
    pub blog_keywords: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_SITE_URL.to_string(),
            name: DEFAULT_SITE_NAME.to_string(),
            title: DEFAULT_SITE_TITLE.to_string(),
            description: DEFAULT_SITE_DESCRIPTION.to_string(),
            author_name: DEFAULT_AUTHOR_NAME.to_string(),
            author_full_name: DEFAULT_AUTHOR_FULL_NAME.to_string(),
            email: DEFAULT_AUTHOR_EMAIL.to_string(),
            job_title: DEFAULT_JOB_TITLE.to_string(),
            twitter_handle: DEFAULT_TWITTER_HANDLE.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            og_image: DEFAULT_OG_IMAGE.to_string(),
            city: DEFAULT_CITY.to_string(),
            region: DEFAULT_REGION.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            social_links: to_owned_list(&DEFAULT_SOCIAL_LINKS),
            keywords: to_owned_list(&DEFAULT_SITE_KEYWORDS),
            blog_keywords: to_owned_list(&DEFAULT_BLOG_KEYWORDS),
        }
    }
}

/// Request-edge behaviour: which paths are long-lived assets and what to hint to crawlers.
#[derive(Debug, Clone)]
pub struct EdgeSettings {
    pub static_prefixes: Vec<String>,
    pub preload_hint: String,
}

impl Default for EdgeSettings {
    fn default() -> Self {
        Self {
            static_prefixes: to_owned_list(&DEFAULT_STATIC_PREFIXES),
            preload_hint: DEFAULT_PRELOAD_HINT.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    match cli.command.as_ref() {
        Some(Command::Serve(args)) => raw.apply_serve_overrides(&args.overrides),
        Some(Command::Export(args)) => raw.apply_site_override(&args.site),
        None => raw.apply_serve_overrides(&ServeOverrides::default()),
    }

    Settings::from_raw(raw)
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    logging: RawLoggingSettings,
    site: RawSiteSettings,
    edge: RawEdgeSettings,
}

impl RawSettings {
    fn apply_serve_overrides(&mut self, overrides: &ServeOverrides) {
        if let Some(host) = overrides.server_host.as_ref() {
            self.server.host = Some(host.clone());
        }
        if let Some(port) = overrides.server_port {
            self.server.port = Some(port);
        }
        if let Some(seconds) = overrides.server_graceful_shutdown_seconds {
            self.server.graceful_shutdown_seconds = Some(seconds);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        self.apply_site_override(&overrides.site);
    }

    fn apply_site_override(&mut self, overrides: &SiteOverride) {
        if let Some(url) = overrides.site_url.as_ref() {
            self.site.url = Some(url.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            server,
            logging,
            site,
            edge,
        } = raw;

        Ok(Self {
            server: build_server_settings(server)?,
            logging: build_logging_settings(logging)?,
            site: build_site_settings(site)?,
            edge: build_edge_settings(edge)?,
        })
    }
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = server.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(LoadError::invalid(
            "server.port",
            "port must be greater than zero",
        ));
    }
    let addr = parse_socket_addr(&host, port)
        .map_err(|reason| LoadError::invalid("server.addr", reason))?;

    let graceful_secs = server
        .graceful_shutdown_seconds
        .unwrap_or(DEFAULT_GRACEFUL_SHUTDOWN_SECS);
    if graceful_secs == 0 {
        return Err(LoadError::invalid(
            "server.graceful_shutdown_seconds",
            "must be greater than zero",
        ));
    }

    Ok(ServerSettings {
        addr,
        graceful_shutdown: Duration::from_secs(graceful_secs),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_site_settings(site: RawSiteSettings) -> Result<SiteSettings, LoadError> {
    let defaults = SiteSettings::default();

    let url = match site.url {
        Some(value) => normalize_site_url(&value)?,
        None => defaults.url,
    };
    let name = site.name.unwrap_or(defaults.name);
    if name.trim().is_empty() {
        return Err(LoadError::invalid("site.name", "must not be empty"));
    }
    let email = site.email.unwrap_or(defaults.email);
    if !email.contains('@') {
        return Err(LoadError::invalid(
            "site.email",
            format!("`{email}` is not an email address"),
        ));
    }

    Ok(SiteSettings {
        url,
        name,
        title: site.title.unwrap_or(defaults.title),
        description: site.description.unwrap_or(defaults.description),
        author_name: site.author_name.unwrap_or(defaults.author_name),
        author_full_name: site.author_full_name.unwrap_or(defaults.author_full_name),
        email,
        job_title: site.job_title.unwrap_or(defaults.job_title),
        twitter_handle: site.twitter_handle.unwrap_or(defaults.twitter_handle),
        locale: site.locale.unwrap_or(defaults.locale),
        language: site.language.unwrap_or(defaults.language),
        og_image: site.og_image.unwrap_or(defaults.og_image),
        city: site.city.unwrap_or(defaults.city),
        region: site.region.unwrap_or(defaults.region),
        country: site.country.unwrap_or(defaults.country),
        social_links: site.social_links.unwrap_or(defaults.social_links),
        keywords: site.keywords.unwrap_or(defaults.keywords),
        blog_keywords: site.blog_keywords.unwrap_or(defaults.blog_keywords),
    })
}

fn build_edge_settings(edge: RawEdgeSettings) -> Result<EdgeSettings, LoadError> {
    let defaults = EdgeSettings::default();

    let static_prefixes = edge.static_prefixes.unwrap_or(defaults.static_prefixes);
    if static_prefixes.is_empty() {
        return Err(LoadError::invalid(
            "edge.static_prefixes",
            "at least one prefix is required",
        ));
    }
    if let Some(bad) = static_prefixes.iter().find(|prefix| !prefix.starts_with('/')) {
        return Err(LoadError::invalid(
            "edge.static_prefixes",
            format!("prefix `{bad}` must start with `/`"),
        ));
    }

    let preload_hint = edge.preload_hint.unwrap_or(defaults.preload_hint);
    HeaderValue::from_str(&preload_hint).map_err(|err| {
        LoadError::invalid("edge.preload_hint", format!("not a valid header value: {err}"))
    })?;

    Ok(EdgeSettings {
        static_prefixes,
        preload_hint,
    })
}

fn normalize_site_url(value: &str) -> Result<String, LoadError> {
    let parsed = Url::parse(value.trim())
        .map_err(|err| LoadError::invalid("site.url", format!("failed to parse: {err}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(LoadError::invalid(
            "site.url",
            format!("unsupported scheme `{}`", parsed.scheme()),
        ));
    }
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
    graceful_shutdown_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSiteSettings {
    url: Option<String>,
    name: Option<String>,
    title: Option<String>,
    description: Option<String>,
    author_name: Option<String>,
    author_full_name: Option<String>,
    email: Option<String>,
    job_title: Option<String>,
    twitter_handle: Option<String>,
    locale: Option<String>,
    language: Option<String>,
    og_image: Option<String>,
    city: Option<String>,
    region: Option<String>,
    country: Option<String>,
    social_links: Option<Vec<String>>,
    keywords: Option<Vec<String>>,
    blog_keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawEdgeSettings {
    static_prefixes: Option<Vec<String>>,
    preload_hint: Option<String>,
}

fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, String> {
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| format!("invalid address `{candidate}`: {err}"))
}

fn to_owned_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests;
