//! Standalone web server binary
//!
//! Usage: cargo run -p seatread_web --bin seatread-web-server -- --port 8080

use seatread_web::{LogFormat, ServerConfig, WebServer};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut config = ServerConfig::new("127.0.0.1", 8080);
    let mut log_format = LogFormat::Text;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" => {
                print_help();
                return Ok(());
            }
            flag @ ("--host" | "-h" | "--port" | "-p" | "--prompt-log" | "--play-style"
            | "--advice" | "--table-ttl" | "--log-format") => {
                let Some(value) = iter.next() else {
                    return Err(format!("{flag} requires a value").into());
                };
                match flag {
                    "--host" | "-h" => config = config.with_host(value.clone()),
                    "--port" | "-p" => {
                        let port: u16 = value
                            .parse()
                            .map_err(|_| format!("invalid port number `{value}`"))?;
                        config = config.with_port(port)
                    }
                    "--prompt-log" => config = config.with_prompt_log(value),
                    "--play-style" => config = config.with_play_style(value.clone()),
                    "--advice" => config = config.with_advice_source(value.clone()),
                    "--table-ttl" => {
                        let secs: u64 = value
                            .parse()
                            .map_err(|_| format!("invalid table TTL `{value}`"))?;
                        config = config.with_table_ttl(Duration::from_secs(secs))
                    }
                    _ => {
                        log_format = LogFormat::parse(value)
                            .ok_or_else(|| format!("invalid log format `{value}`"))?
                    }
                }
            }
            other => {
                print_help();
                return Err(format!("unknown argument: {other}").into());
            }
        }
    }

    seatread_web::init_logging(log_format)?;

    tracing::info!(
        host = config.host(),
        port = config.port(),
        prompt_log = ?config.prompt_log(),
        advice = config.advice_source(),
        table_ttl_secs = config.table_ttl().as_secs(),
        "starting seatread web server"
    );

    let handle = WebServer::new(config)?.start().await?;
    println!("Server running at http://{}", handle.address());
    println!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;

    tracing::info!("shutting down");
    handle.shutdown().await?;
    Ok(())
}

fn print_help() {
    println!("seatread web server");
    println!();
    println!("Usage: seatread-web-server [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --host, -h <HOST>       Host to bind to (default: 127.0.0.1)");
    println!("  --port, -p <PORT>       Port to bind to (default: 8080)");
    println!("  --prompt-log <FILE>     Append rendered prompts to a JSONL file");
    println!("  --play-style <TEXT>     Play-style line used in first prompts");
    println!("  --advice <NAME>         Advice source (default: disabled)");
    println!("  --table-ttl <SECS>      Drop tables idle this long (default: 1800)");
    println!("  --log-format <FMT>      text or json (default: text)");
    println!("  --help                  Show this help message");
}
