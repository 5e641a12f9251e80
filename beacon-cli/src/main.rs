use std::io::Write;

use anyhow::{Context, Result};
use beacon_core::ErrorNotice;
use clap::Parser;
use colored::Colorize;
use dialoguer::Input;
use futures::{SinkExt, StreamExt};
use tokio::io::AsyncBufReadExt;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use url::Url;
use uuid::Uuid;

/// Interactive client for a beacon signaling relay.
#[derive(Debug, Parser)]
#[command(name = "beacon", about = "Connect to a signaling relay and exchange raw envelopes")]
struct Args {
    /// WebSocket endpoint of the relay.
    #[arg(long, default_value = "ws://localhost:8080/ws")]
    url: String,

    /// Room to join. Prompted for when omitted.
    #[arg(long)]
    room: Option<String>,

    /// Peer id to announce. A random one is generated when omitted.
    #[arg(long)]
    peer: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let room = match args.room {
        Some(room) => room,
        None => Input::new().with_prompt("room").interact_text()?,
    };
    let peer = args
        .peer
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut endpoint = Url::parse(&args.url).context("invalid url")?;
    endpoint
        .query_pairs_mut()
        .append_pair("room", &room)
        .append_pair("peer", &peer);

    tokio::runtime::Runtime::new()?.block_on(run(endpoint, &room, &peer))
}

async fn run(endpoint: Url, room: &str, peer: &str) -> Result<()> {
    let (socket, _) = connect_async(endpoint.as_str())
        .await
        .context("failed to connect")?;
    let (mut sink, mut stream) = socket.split();

    println!(
        "{} {} as {} in {}",
        "connected to".green(),
        endpoint,
        peer.bold(),
        room.bold()
    );
    println!("Enter JSON messages to send. Submit an empty line to exit.");

    let reader = tokio::spawn(async move {
        while let Some(message) = stream.next().await {
            match message {
                Ok(Message::Text(text)) => print_inbound(text.as_str()),
                Ok(Message::Close(_)) => {
                    println!("{}", "connection closed".yellow());
                    break;
                }
                Ok(_) => {}
                Err(err) => {
                    eprintln!("{} {err}", "read error:".red());
                    break;
                }
            }
        }
    });

    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("-> ");
        std::io::stdout().flush()?;

        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim().to_owned();
                if line.is_empty() {
                    break;
                }
                sink.send(Message::text(line))
                    .await
                    .context("failed to send")?;
            }
        }
    }

    let frame = CloseFrame {
        code: CloseCode::Normal,
        reason: "client done".into(),
    };
    let _ = sink.send(Message::Close(Some(frame))).await;
    reader.abort();

    Ok(())
}

fn print_inbound(raw: &str) {
    match serde_json::from_str::<ErrorNotice>(raw) {
        Ok(notice) if notice.kind == "error" => {
            println!("{} {}", "<- error:".red(), notice.message);
        }
        _ => println!("{} {raw}", "<-".cyan()),
    }
}
