use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::{LegalDomain, Message, Role, SubmitOutcome};

use super::super::{Container, DISCLAIMER};

const HELP: &str = "Commands: /domain <name>, /domains, /history, /help, /quit";

/// Interactive terminal session. One session lives for the whole loop and is
/// ended when input closes or the user quits.
pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn run<R, W>(&self, input: R, mut output: W, domain: LegalDomain) -> Result<String>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let sessions = self.container.session_use_case();
        let submit = self.container.submit_use_case();
        let session_id = sessions.start().await?;
        let mut domain = domain;

        output
            .write_all(
                format!(
                    "Indian Legal Law Chatbot ({})\n{}\nDomain: {}\n{}\n\n",
                    self.container.model_name(),
                    DISCLAIMER,
                    domain.display_label(),
                    HELP
                )
                .as_bytes(),
            )
            .await?;

        let mut lines = input.lines();
        loop {
            output.write_all(b"You: ").await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let command = line.trim();

            if command.starts_with('/') {
                let (name, arg) = match command.split_once(char::is_whitespace) {
                    Some((name, arg)) => (name, arg.trim()),
                    None => (command, ""),
                };

                match name {
                    "/quit" | "/exit" => break,
                    "/domains" => {
                        let labels: Vec<String> =
                            LegalDomain::ALL.iter().map(|d| d.display_label()).collect();
                        output
                            .write_all(format!("{}\n", labels.join("\n")).as_bytes())
                            .await?;
                    }
                    "/history" => {
                        let transcript = sessions.transcript(session_id).await?;
                        output
                            .write_all(format_transcript(&transcript).as_bytes())
                            .await?;
                    }
                    "/domain" if arg.is_empty() => {
                        output
                            .write_all(
                                format!(
                                    "Domain: {}\nUsage: /domain <name>\n",
                                    domain.display_label()
                                )
                                .as_bytes(),
                            )
                            .await?;
                    }
                    "/domain" => match arg.parse::<LegalDomain>() {
                        Ok(selected) => {
                            domain = selected;
                            output
                                .write_all(
                                    format!("Domain: {}\n", domain.display_label()).as_bytes(),
                                )
                                .await?;
                        }
                        Err(e) => output.write_all(format!("{}\n", e).as_bytes()).await?,
                    },
                    // /help and anything unrecognised
                    _ => output.write_all(format!("{}\n", HELP).as_bytes()).await?,
                }
            } else {
                match submit.execute(session_id, &line, domain).await {
                    Ok(SubmitOutcome::Ignored) => {}
                    Ok(SubmitOutcome::Answered { reply }) => {
                        output
                            .write_all(format!("Legal Assistant: {}\n\n", reply).as_bytes())
                            .await?;
                    }
                    // The question stays in the transcript; the loop carries on.
                    Err(e) => {
                        output.write_all(format!("Error: {}\n\n", e).as_bytes()).await?;
                    }
                }
            }
        }

        let message_count = sessions.transcript(session_id).await?.len();
        sessions.end(session_id).await?;
        debug!("Chat loop finished with {} messages", message_count);

        Ok(format!("\nSession ended after {} messages.", message_count))
    }
}

pub fn format_transcript(messages: &[Message]) -> String {
    if messages.is_empty() {
        return "No messages yet.\n".to_string();
    }

    let mut output = String::new();
    for message in messages {
        let label = match message.role() {
            Role::User => "You",
            Role::Assistant => "Legal Assistant",
        };
        output.push_str(&format!("{}: {}\n", label, message.content()));
    }
    output
}
