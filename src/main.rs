// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! tokenguard CLI
//!
//! Drives the session guard and the authenticated client against a
//! file-backed token store.

use std::env;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use reqwest::Method;

use tokenguard::auth::now_secs;
use tokenguard::{
    decode_claims, ApiClient, ClientConfig, FileStorage, GuardOutcome, LoggingNavigator,
    RequestOptions, SessionGuard, StorageTokenProvider, TokenProvider,
};

const DEFAULT_STORAGE_PATH: &str = ".tokenguard/storage.json";

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("tokenguard=info".parse().expect("static directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    let result = match args[1].as_str() {
        "check" => check().map(|allowed| if allowed { 0 } else { 2 }),
        "decode" => match args.get(2) {
            Some(token) => decode(token).map(|_| 0),
            None => usage_error("Usage: tokenguard decode <token>"),
        },
        "login" => match args.get(2) {
            Some(token) => login(token).map(|_| 0),
            None => usage_error("Usage: tokenguard login <token>"),
        },
        "logout" => logout().map(|_| 0),
        "request" => match (args.get(2), args.get(3)) {
            (Some(method), Some(path)) => request(method, path, args.get(4).map(String::as_str))
                .await
                .map(|_| 0),
            _ => usage_error("Usage: tokenguard request <METHOD> <path> [json-body]"),
        },
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(0)
        }
        "--version" | "-v" | "version" => {
            println!("tokenguard {}", tokenguard::VERSION);
            Ok(0)
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            Ok(1)
        }
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(1)
        }
    }
}

fn usage_error(usage: &str) -> anyhow::Result<u8> {
    eprintln!("{}", usage);
    Ok(1)
}

fn print_usage() {
    println!(
        r#"tokenguard - Bearer-token HTTP client and session guard

USAGE:
    tokenguard <COMMAND> [OPTIONS]

COMMANDS:
    check                             Run the session guard against the stored token
    decode <token>                    Print the claims of a JWT
    login <token>                     Store a token
    logout                            Remove the stored token
    request <METHOD> <path> [body]    Send an authenticated request, print the body
    help                              Show this help message
    version                           Show version information

ENVIRONMENT:
    TOKENGUARD_STORAGE       Token store file (default: {storage})
    TOKENGUARD_BASE_URL      API base URL (default: https://api.example.com)
    TOKENGUARD_TIMEOUT_MS    Request timeout in milliseconds (default: 10000)
    TOKENGUARD_TOKEN_KEY     Storage key holding the token (default: jtck)
    TOKENGUARD_LOGIN_PATH    Login location (default: /login.html)
    TOKENGUARD_PROXY         Proxy URL
    TOKENGUARD_LOG_BODIES    Log request and response bodies (default: false)
    RUST_LOG                 Log filter

EXAMPLES:
    tokenguard login eyJhbGciOiJIUzI1NiJ9.eyJleHAiOjE5MDAwMDAwMDB9.sig
    tokenguard check
    tokenguard request GET /users
    tokenguard request POST /users '{{"name":"Alice","age":30}}'
"#,
        storage = DEFAULT_STORAGE_PATH
    );
}

fn open_store() -> anyhow::Result<(ClientConfig, Arc<FileStorage>)> {
    let config = ClientConfig::from_env().context("reading configuration")?;
    let path = env::var("TOKENGUARD_STORAGE").unwrap_or_else(|_| DEFAULT_STORAGE_PATH.to_string());
    let storage = FileStorage::open(&path).with_context(|| format!("opening {}", path))?;
    Ok((config, Arc::new(storage)))
}

fn token_provider(config: &ClientConfig, storage: Arc<FileStorage>) -> Arc<StorageTokenProvider> {
    Arc::new(StorageTokenProvider::new(storage, config.token_key.clone()))
}

fn check() -> anyhow::Result<bool> {
    let (config, storage) = open_store()?;
    let guard = SessionGuard::new(token_provider(&config, storage), Arc::new(LoggingNavigator))
        .login_path(config.login_path.clone());

    match guard.check() {
        GuardOutcome::Allowed => {
            println!("[OK] Session valid");
            Ok(true)
        }
        GuardOutcome::Redirected(reason) => {
            println!("[!] Session rejected ({:?}), login at {}", reason, config.login_path);
            Ok(false)
        }
    }
}

fn decode(token: &str) -> anyhow::Result<()> {
    let claims = decode_claims(token)?;
    println!("{}", serde_json::to_string_pretty(&claims)?);

    match (claims.exp, claims.expires_at(), claims.remaining(now_secs())) {
        (None, _, _) => println!("\nNo exp claim: treated as expired"),
        (Some(_), Some(at), Some(left)) if left >= 0 => {
            println!("\nExpires: {} ({}s left)", at, left)
        }
        (Some(_), Some(at), Some(left)) => {
            println!("\nExpired: {} ({}s ago)", at, left.unsigned_abs())
        }
        (Some(exp), _, _) if claims.is_expired_at(now_secs()) => {
            println!("\nExpired: exp {} is before any representable date", exp)
        }
        (Some(exp), _, _) => println!("\nExpires: exp {} is past any representable date", exp),
    }
    Ok(())
}

fn login(token: &str) -> anyhow::Result<()> {
    let (config, storage) = open_store()?;
    token_provider(&config, storage.clone()).set(token)?;
    println!("Token stored in {}", storage.path().display());
    Ok(())
}

fn logout() -> anyhow::Result<()> {
    let (config, storage) = open_store()?;
    token_provider(&config, storage).clear()?;
    println!("Token removed");
    Ok(())
}

async fn request(method: &str, path: &str, body: Option<&str>) -> anyhow::Result<()> {
    let (config, storage) = open_store()?;
    let method = Method::from_str(&method.to_uppercase())
        .with_context(|| format!("invalid method '{}'", method))?;

    let mut options = RequestOptions::new(path).method(method);
    if let Some(body) = body {
        let value: serde_json::Value = serde_json::from_str(body).context("body must be JSON")?;
        options = options.data(tokenguard::RequestData::Json(value));
    }

    let client = ApiClient::with_storage(config, storage, Arc::new(LoggingNavigator))?;
    let value: serde_json::Value = client.request(options).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
