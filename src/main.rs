use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use book_store::application::service::CatalogService;
use book_store::config::{Command, Config};
use book_store::domain::model::book::NewBook;
use book_store::infra::json_store::JsonBookWriter;

fn main() -> anyhow::Result<()> {
    let config = Config::parse();
    init_tracing(&config);

    let writer = JsonBookWriter::new(&config.store);
    match config.command {
        Command::Add {
            title,
            author,
            year,
        } => {
            let mut req = NewBook::new(title, author);
            req.published_year = year;
            let svc = CatalogService::new(writer);
            let book = svc.register(req)?;
            println!("{}", book.id());
        }
        Command::List => {
            let books = writer
                .load_all()
                .with_context(|| format!("failed to read {}", config.store.display()))?;
            for book in books {
                match book.published_year() {
                    Some(year) => println!(
                        "{}  {} / {} ({year})",
                        book.id().short(),
                        book.title(),
                        book.author()
                    ),
                    None => println!("{}  {} / {}", book.id().short(), book.title(), book.author()),
                }
            }
        }
    }
    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
