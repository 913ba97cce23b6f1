use anyhow::{anyhow, bail, Context};
use book_buddy_rust::config::log;
use book_buddy_rust::fetcher::ImportOutcome;
use book_buddy_rust::item::{Book, ReadingStatus};
use book_buddy_rust::sync::SyncOutcome;
use book_buddy_rust::{config, genre, Components};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "book-buddy", version, about = "개인 서재 관리")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 서재의 모든 도서를 최근에 추가된 순서로 출력한다.
    List,
    Show { id: i64 },
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long, default_value_t = 0)]
        year: i32,
        /// 장르 표시 이름 ("Science Fiction", "Fantazija", "MYSTERY" ...)
        #[arg(long, default_value = "Other")]
        genre: String,
        /// WANT_TO_READ, CURRENTLY_READING, FINISHED, ABANDONED
        #[arg(long, default_value = "WANT_TO_READ")]
        status: String,
        #[arg(long, default_value_t = 0.0)]
        rating: f32,
    },
    Status { id: i64, status: String },
    Rate { id: i64, rating: f32 },
    Delete { id: i64 },
    Search {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
    },
    /// 검색 결과 중 하나를 표지와 함께 서재에 추가한다.
    Import {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long, default_value_t = 0)]
        index: usize,
    },
    /// 인기 도서를 한 번 동기화 한다.
    Sync,
    /// 서재가 비어 있으면 예시 도서를 추가한다.
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    config::load_dotenv();
    let config = config::load_config().context("cannot load config")?;
    let _guard = match config.logger() {
        Some(logger) => Some(log::init(logger)?),
        None => {
            log::init_console(tracing::Level::INFO)?;
            None
        }
    };

    let components = book_buddy_rust::create_components(&config)?;
    run(cli.command, components).await
}

async fn run(command: Command, components: Components) -> anyhow::Result<()> {
    let Components { resolver, fetcher, orchestrator } = components;

    match command {
        Command::List => {
            for book in resolver.fetch_books()? {
                print_book(&book);
            }
        }
        Command::Show { id } => {
            let book = resolver.get_book(id)?.ok_or_else(|| anyhow!("book {} not found", id))?;
            print_book(&book);
        }
        Command::Add { title, author, year, genre: genre_name, status, rating } => {
            let status = ReadingStatus::try_from(status.as_str())?;
            let book = Book::builder()
                .title(title)
                .author(author)
                .year(year)
                .genre(genre::display_to_local(&genre_name))
                .status(status)
                .rating(rating)
                .build()?;

            if resolver.contains_duplicate(book.title(), book.author())? {
                bail!("\"{}\" by {} is already in the library", book.title(), book.author());
            }
            let id = resolver.insert_book(&book).ok_or_else(|| anyhow!("cannot save book"))?;
            println!("added book {}", id);
        }
        Command::Status { id, status } => {
            let status = ReadingStatus::try_from(status.as_str())?;
            let book = resolver.get_book(id)?.ok_or_else(|| anyhow!("book {} not found", id))?;
            resolver.update_book(&book.to_builder().status(status).build()?)?;
            println!("book {} is now {}", id, status.label());
        }
        Command::Rate { id, rating } => {
            let book = resolver.get_book(id)?.ok_or_else(|| anyhow!("book {} not found", id))?;
            resolver.update_book(&book.to_builder().rating(rating).build()?)?;
            println!("book {} rated {}", id, rating);
        }
        Command::Delete { id } => {
            let deleted = resolver.delete_book(id)?;
            println!("deleted {} book(s)", deleted);
        }
        Command::Search { title, author } => {
            let candidates = fetcher.search(title.as_deref(), author.as_deref()).await
                .map_err(|e| anyhow!(e.reason()))?;
            for (index, candidate) in candidates.iter().enumerate() {
                let converted = fetcher.convert_candidate(candidate).ok();
                println!("[{}] {} / {} ({}) {}",
                    index,
                    candidate.title().unwrap_or("-"),
                    candidate.primary_author(),
                    candidate.published_year(),
                    converted.map(|b| genre::local_to_display(b.genre())).unwrap_or("-"));
            }
        }
        Command::Import { title, author, index } => {
            let candidates = fetcher.search(title.as_deref(), author.as_deref()).await
                .map_err(|e| anyhow!(e.reason()))?;
            let candidate = candidates.get(index)
                .ok_or_else(|| anyhow!("no search result at index {}", index))?;

            match fetcher.import_candidate(candidate).await? {
                ImportOutcome::Inserted(id) => println!("added book {}", id),
                ImportOutcome::Duplicate => println!("already in the library"),
            }
        }
        Command::Sync => {
            match orchestrator.sync().await {
                SyncOutcome::Completed { inserted } => println!("sync completed, {} new book(s)", inserted),
                SyncOutcome::RetryLater => println!("network unavailable, try again later"),
                SyncOutcome::TimedOut => println!("sync timed out, no new books"),
                SyncOutcome::Failed { reason } => bail!("sync failed: {}", reason),
                SyncOutcome::Superseded => println!("sync was replaced by a newer run"),
            }
        }
        Command::Seed => {
            let inserted = resolver.seed_if_empty()?;
            println!("seeded {} book(s)", inserted);
        }
    }
    Ok(())
}

fn print_book(book: &Book) {
    let rating = if book.rating() > 0.0 { format!("{:.1}", book.rating()) } else { "-".to_owned() };
    println!("{:>4}  {} / {} ({})  {}  {}  {}",
        book.id().unwrap_or_default(),
        book.title(),
        book.author(),
        book.year(),
        genre::local_to_display(book.genre()),
        book.status().label(),
        rating);
}
