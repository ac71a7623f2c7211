use super::*;

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(4000);
    raw.logging.level = Some("info".to_string());
    raw.site.url = Some("https://from-file.example".to_string());

    let overrides = ServeOverrides {
        server_port: Some(4321),
        log_level: Some("debug".to_string()),
        site: SiteOverride {
            site_url: Some("https://from-cli.example/".to_string()),
        },
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.server.addr.port(), 4321);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert_eq!(settings.site.url, "https://from-cli.example");
}

#[test]
fn defaults_describe_the_portfolio_site() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.server.addr.port(), DEFAULT_PORT);
    assert_eq!(settings.site.url, DEFAULT_SITE_URL);
    assert_eq!(settings.site.locale, "en_IN");
    assert_eq!(settings.site.social_links.len(), DEFAULT_SOCIAL_LINKS.len());
    assert_eq!(
        settings.edge.static_prefixes,
        vec!["/static/", "/_next/static/", "/public/"]
    );
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = ServeOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_serve_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn zero_port_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.port = Some(0);

    let err = Settings::from_raw(raw).unwrap_err();
    assert!(matches!(err, LoadError::Invalid { key: "server.port", .. }));
}

#[test]
fn zero_shutdown_timeout_is_rejected() {
    let mut raw = RawSettings::default();
    raw.server.graceful_shutdown_seconds = Some(0);

    let err = Settings::from_raw(raw).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "server.graceful_shutdown_seconds",
            ..
        }
    ));
}

#[test]
fn unknown_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("chatty".to_string());

    let err = Settings::from_raw(raw).unwrap_err();
    assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
}

#[test]
fn site_url_must_be_http() {
    for candidate in ["not a url", "ftp://example.com"] {
        let mut raw = RawSettings::default();
        raw.site.url = Some(candidate.to_string());

        let err = Settings::from_raw(raw).unwrap_err();
        assert!(
            matches!(err, LoadError::Invalid { key: "site.url", .. }),
            "`{candidate}` should be rejected"
        );
    }
}

#[test]
fn site_url_keeps_path_without_trailing_slash() {
    let mut raw = RawSettings::default();
    raw.site.url = Some("https://example.com/portfolio/".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.site.url, "https://example.com/portfolio");
}

#[test]
fn static_prefixes_must_be_absolute_and_non_empty() {
    let mut raw = RawSettings::default();
    raw.edge.static_prefixes = Some(Vec::new());
    assert!(Settings::from_raw(raw).is_err());

    let mut raw = RawSettings::default();
    raw.edge.static_prefixes = Some(vec!["assets/".to_string()]);
    let err = Settings::from_raw(raw).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "edge.static_prefixes",
            ..
        }
    ));
}

#[test]
fn preload_hint_must_be_a_header_value() {
    let mut raw = RawSettings::default();
    raw.edge.preload_hint = Some("bad\nvalue".to_string());

    let err = Settings::from_raw(raw).unwrap_err();
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "edge.preload_hint",
            ..
        }
    ));
}

#[test]
fn default_to_serve_command() {
    let args = CliArgs::parse_from(["folio"]);
    let command = args
        .command
        .unwrap_or(Command::Serve(Box::<ServeArgs>::default()));
    assert!(matches!(command, Command::Serve(_)));
}

#[test]
fn parse_serve_overrides() {
    let args = CliArgs::parse_from([
        "folio",
        "serve",
        "--server-host",
        "0.0.0.0",
        "--server-port",
        "8080",
        "--log-json",
        "true",
    ]);
    match args.command.expect("serve command") {
        Command::Serve(serve) => {
            assert_eq!(serve.overrides.server_host.as_deref(), Some("0.0.0.0"));
            assert_eq!(serve.overrides.server_port, Some(8080));
            assert_eq!(serve.overrides.log_json, Some(true));
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_export_arguments() {
    let args = CliArgs::parse_from([
        "folio",
        "export",
        "--site-url",
        "https://staging.example",
        "/tmp/public",
    ]);
    match args.command.expect("export command") {
        Command::Export(export) => {
            assert_eq!(
                export.site.site_url.as_deref(),
                Some("https://staging.example")
            );
            assert_eq!(export.directory, std::path::Path::new("/tmp/public"));
        }
        _ => panic!("wrong command parsed"),
    }
}
