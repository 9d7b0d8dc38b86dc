use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use ticketbook::application::booking::BookingSession;
use ticketbook::application::checkout::CheckoutSession;
use ticketbook::domain::payment::PaymentSubmission;
use ticketbook::domain::ports::{CartStoreBox, SystemClock};
use ticketbook::error::BookingError;
use ticketbook::infrastructure::file::FileCartStore;
use ticketbook::interfaces::csv::action_reader::{ActionReader, BookingAction};
use ticketbook::interfaces::csv::cart_writer::CartWriter;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the persisted carts.
    #[arg(long, env = "TICKETBOOK_DATA_DIR", default_value = ".ticketbook")]
    data_dir: PathBuf,

    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "TICKETBOOK_DB_PATH")]
    db_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start a new booking and replay a CSV of actions (action,movie,seats,price)
    Book {
        /// Input actions CSV file
        input: PathBuf,
    },
    /// Show the order summary of the booked cart
    Summary,
    /// Pay for the booked cart
    Checkout {
        /// 16-digit card number
        #[arg(long)]
        card_number: String,
        /// Card expiry month as YYYY-MM
        #[arg(long)]
        expiry: Option<String>,
        /// 3-digit card verification value
        #[arg(long)]
        cvv: String,
        /// Seats to reserve, e.g. A1,A2
        #[arg(long, value_delimiter = ',')]
        seats: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let store = open_store(&cli).await?;

    match cli.command {
        Command::Book { input } => book(store, input).await,
        Command::Summary => summary(store).await,
        Command::Checkout {
            card_number,
            expiry,
            cvv,
            seats,
        } => {
            let submission = PaymentSubmission {
                card_number,
                expiry,
                cvv,
            };
            checkout(store, submission, seats).await
        }
    }
}

#[cfg(feature = "storage-rocksdb")]
async fn open_store(cli: &Cli) -> Result<CartStoreBox> {
    use ticketbook::infrastructure::rocksdb::RocksDBStore;

    if let Some(db_path) = &cli.db_path {
        let store = RocksDBStore::open(db_path).into_diagnostic()?;
        return Ok(Box::new(store));
    }
    let store = FileCartStore::open(&cli.data_dir).await.into_diagnostic()?;
    Ok(Box::new(store))
}

#[cfg(not(feature = "storage-rocksdb"))]
async fn open_store(cli: &Cli) -> Result<CartStoreBox> {
    if cli.db_path.is_some() {
        eprintln!(
            "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to file storage in {}.",
            cli.data_dir.display()
        );
    }
    let store = FileCartStore::open(&cli.data_dir).await.into_diagnostic()?;
    Ok(Box::new(store))
}

async fn book(store: CartStoreBox, input: PathBuf) -> Result<ExitCode> {
    let mut session = BookingSession::start(store).await.into_diagnostic()?;

    let file = File::open(input).into_diagnostic()?;
    let reader = ActionReader::new(file);
    for action in reader.actions() {
        let action = match action {
            Ok(action) => action,
            Err(e) => {
                eprintln!("Error reading action: {}", e);
                continue;
            }
        };

        let outcome = match action {
            BookingAction::Add {
                movie,
                seats,
                price,
            } => session.add_or_merge(&movie, seats, price).await.map(|_| None),
            BookingAction::Clear => session.clear().await.map(|_| Some("Cart cleared!")),
            BookingAction::SaveFavorite => session
                .save_favorite()
                .await
                .map(|_| Some("Cart saved as favorite!")),
            BookingAction::ApplyFavorite => session
                .apply_favorite()
                .await
                .map(|_| Some("Favorite cart applied!")),
        };

        match outcome {
            Ok(Some(notice)) => println!("{notice}"),
            Ok(None) => {}
            Err(e) if e.is_validation() => eprintln!("{e}"),
            Err(e) => return Err(e).into_diagnostic(),
        }
    }

    let stdout = io::stdout();
    let mut writer = CartWriter::new(stdout.lock());
    writer.write_items(session.cart().items()).into_diagnostic()?;
    println!("Grand total: {}", session.grand_total().into_diagnostic()?);

    Ok(ExitCode::SUCCESS)
}

async fn summary(store: CartStoreBox) -> Result<ExitCode> {
    let session = CheckoutSession::open(store, SystemClock)
        .await
        .into_diagnostic()?;

    let Some(summary) = session.summary() else {
        println!("{}", BookingError::EmptyCartCheckout);
        return Ok(ExitCode::SUCCESS);
    };

    let stdout = io::stdout();
    let mut writer = CartWriter::new(stdout.lock());
    writer.write_items(&summary.items).into_diagnostic()?;
    println!("Grand total: {}", summary.grand_total);
    println!(
        "{} (showing {} of {} seats)",
        summary.seat_placeholder(),
        summary.visible_seats(),
        session.seat_map().labels().len()
    );

    Ok(ExitCode::SUCCESS)
}

async fn checkout(
    store: CartStoreBox,
    submission: PaymentSubmission,
    seats: Vec<String>,
) -> Result<ExitCode> {
    let mut session = CheckoutSession::open(store, SystemClock)
        .await
        .into_diagnostic()?;

    if !session.accepts_payment() {
        eprintln!("{}", BookingError::EmptyCartCheckout);
        return Ok(ExitCode::FAILURE);
    }

    let result = match session.seat_map().select(&seats) {
        Ok(selection) => {
            session
                .submit(&submission, &selection, &mut rand::thread_rng())
                .await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(confirmation) => {
            println!("{confirmation}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_validation() => {
            if let Some(field) = e.field() {
                debug!(%field, "payment rejected");
            }
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e).into_diagnostic(),
    }
}
