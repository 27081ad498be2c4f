use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Local};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use voucher_pdf::server::run_server;
use voucher_pdf::store::SupabaseClient;
use voucher_pdf::voucher::{render_voucher_pdf, Voucher};

#[derive(Parser, Debug)]
#[command(name = "voucher-pdf", version, about = "Renders hotel booking vouchers as PDF")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve `GET /vouchers/:id/pdf` backed by a Supabase table
    Serve {
        /// Base URL of the Supabase project
        #[arg(long, env = "SUPABASE_URL")]
        supabase_url: String,

        /// API key sent with every request to Supabase
        #[arg(long, env = "SUPABASE_KEY", hide_env_values = true)]
        supabase_key: String,

        /// Table the vouchers are stored in
        #[arg(long, env = "VOUCHER_TABLE", default_value = "voucher_PousadaPedraBranca")]
        table: String,

        #[arg(long, env = "PORT", default_value_t = 3000)]
        port: u16,
    },

    /// Render a voucher stored as JSON into a PDF file
    Render {
        /// JSON file holding a single voucher record
        input: PathBuf,

        #[arg(short, long, default_value = "voucher.pdf")]
        output: PathBuf,
    },
}

/// Renders fully in memory, so a failed render never leaves a partial file behind
fn render_to_vec(voucher: &Voucher, now: DateTime<FixedOffset>) -> Result<Vec<u8>> {
    let mut pdf: Vec<u8> = Vec::new();
    render_voucher_pdf(voucher, &mut pdf, now)?;
    Ok(pdf)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Serve {
            supabase_url,
            supabase_key,
            table,
            port,
        } => {
            let client = SupabaseClient::new(supabase_url, supabase_key, table);
            run_server(client, port)
                .await
                .context("voucher server stopped with an error")?;
        }
        Command::Render { input, output } => {
            let json = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let voucher = Voucher::from_json(&json)
                .with_context(|| format!("{} is not a voucher record", input.display()))?;

            let pdf = render_to_vec(&voucher, Local::now().fixed_offset())
                .with_context(|| format!("failed to render {}", input.display()))?;
            std::fs::write(&output, &pdf)
                .with_context(|| format!("failed to write {}", output.display()))?;
            log::info!("wrote {}", output.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339("2025-03-01T09:30:00-03:00").unwrap()
    }

    #[test]
    fn failed_renders_produce_no_bytes() {
        let voucher = Voucher {
            empresa: "\u{1F3E8}".into(),
            ..Default::default()
        };
        assert!(render_to_vec(&voucher, now()).is_err());
    }

    #[test]
    fn renders_a_complete_pdf_in_memory() {
        let voucher = Voucher {
            empresa: "ACME".into(),
            ..Default::default()
        };
        let pdf = render_to_vec(&voucher, now()).unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
    }

    #[test]
    fn cli_parses_the_render_command() {
        let cli = Cli::try_parse_from(["voucher-pdf", "render", "voucher.json", "-o", "out.pdf"]).unwrap();
        match cli.command {
            Command::Render { input, output } => {
                assert_eq!(input, PathBuf::from("voucher.json"));
                assert_eq!(output, PathBuf::from("out.pdf"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
