use clap::{Parser, Subcommand};
use mailprobe_lib::{SmtpProbeOptions, VerifyOptions};

#[derive(Parser, Debug)]
#[command(name = "mailprobe-cli", version, about = "SMTP deliverability probe")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Option<Commands>,

    /// lit des adresses depuis stdin (une par ligne)
    #[arg(long)]
    pub stdin: bool,

    /// write report to file (JSON/NDJSON/CSV selon --format)
    #[arg(long)]
    pub out: Option<String>,

    /// format: human|json|ndjson|csv
    #[arg(long, default_value = "human")]
    pub format: String,

    /// attach the probed MX host to each result
    #[arg(long)]
    pub debug: bool,

    /// nom utilisé pour HELO
    #[arg(long)]
    pub helo: Option<String>,

    /// enveloppe MAIL FROM (par défaut postmaster@domaine)
    #[arg(long = "from")]
    pub mail_from: Option<String>,

    /// SMTP port
    #[arg(long, default_value_t = 25)]
    pub port: u16,

    /// nombre maximum d'MX interrogés
    #[arg(long = "max-mx", default_value_t = 1)]
    pub max_mx: usize,

    /// DNS timeout (ms), MX and address lookups together
    #[arg(long = "dns-timeout-ms", default_value_t = 5_000)]
    pub dns_timeout_ms: u64,

    /// timeout of one SMTP dialogue (ms)
    #[arg(long = "smtp-timeout-ms", default_value_t = 30_000)]
    pub smtp_timeout_ms: u64,

    /// skip the catch-all probe after an acceptance
    #[arg(long = "no-catch-all")]
    pub no_catch_all: bool,

    /// debug logs on stderr (overrides RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Verify {
        /// adresse e-mail à tester
        email: String,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn clap_command() -> clap::Command {
        <Self as clap::CommandFactory>::command()
    }

    pub fn verify_options(&self) -> VerifyOptions {
        let mut probe = SmtpProbeOptions {
            port: self.port,
            timeout_ms: self.smtp_timeout_ms,
            ..SmtpProbeOptions::default()
        };
        if let Some(helo) = &self.helo {
            probe.helo_domain = helo.clone();
        }
        if let Some(from) = &self.mail_from {
            probe.mail_from = from.clone();
        }

        VerifyOptions {
            debug: self.debug,
            dns_timeout_ms: self.dns_timeout_ms,
            max_mx: self.max_mx.max(1),
            catch_all: !self.no_catch_all,
            probe,
        }
    }
}
