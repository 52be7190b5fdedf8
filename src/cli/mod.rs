use clap::Subcommand;

use crate::LegalDomain;

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the chat page over HTTP
    Serve {
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Bind to 0.0.0.0 instead of 127.0.0.1, exposing the server on all network interfaces
        #[arg(long)]
        public: bool,

        /// Drop sessions idle for this many minutes
        #[arg(long, default_value = "60")]
        session_ttl_minutes: u64,
    },

    /// Interactive chat in the terminal
    Chat {
        /// Legal domain slug or label (see `domains`)
        #[arg(short, long, default_value = "all")]
        domain: LegalDomain,
    },

    /// Ask a single question and print the answer
    Ask {
        question: String,

        #[arg(short, long, default_value = "all")]
        domain: LegalDomain,
    },

    /// List the legal domains a question can be scoped to
    Domains,
}
