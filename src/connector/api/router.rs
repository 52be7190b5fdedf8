use anyhow::{bail, Result};

use crate::Commands;

use super::container::Container;
use super::controller::{AskController, ChatController, DomainsController};

pub struct Router<'a> {
    ask_controller: AskController<'a>,
    chat_controller: ChatController<'a>,
    domains_controller: DomainsController,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            ask_controller: AskController::new(container),
            chat_controller: ChatController::new(container),
            domains_controller: DomainsController::new(),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Ask { question, domain } => self.ask_controller.ask(question, domain).await,
            Commands::Chat { domain } => {
                let stdin = tokio::io::BufReader::new(tokio::io::stdin());
                self.chat_controller
                    .run(stdin, tokio::io::stdout(), domain)
                    .await
            }
            Commands::Domains => Ok(self.domains_controller.list()),
            Commands::Serve { .. } => bail!("serve is handled by the web server, not the router"),
        }
    }
}
