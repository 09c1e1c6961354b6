//! Terminal driver for the cart widget
//!
//! Each invocation is one page activation against a file-backed store: the
//! catalog page for `add`, the cart page for `show`/`inc`/`dec`/`set`/`remove`,
//! the checkout button for `checkout`.

use anyhow::Context;
use cart_store::FileStore;
use cart_widget::{
    CartView, CheckoutOutcome, Navigator, Notifier, ProductCard, Storefront, WidgetConfig,
    WidgetError,
};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

/// Store file used when neither `--store` nor `CART_STORE` is given
pub const DEFAULT_STORE_PATH: &str = ".cart/storage.json";

/// Exit code for a checkout refused because the cart is empty
pub const EXIT_EMPTY_CART: i32 = 1;

type FileFront = Storefront<Arc<FileStore>>;

/// Build the command line interface
#[must_use]
pub fn build_cli() -> Command {
    let row = || {
        Arg::new("row")
            .required(true)
            .value_parser(value_parser!(u64).range(1..))
            .help("Row number as listed by `show` (1-based)")
    };

    Command::new("cart")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Storefront cart widget driver")
        .subcommand_required(true)
        .arg(
            Arg::new("store")
                .long("store")
                .global(true)
                .env("CART_STORE")
                .value_parser(value_parser!(PathBuf))
                .help("Storage file standing in for browser local storage"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .env("CART_CONFIG")
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .subcommand(
            Command::new("add")
                .about("Add a product card to the cart")
                .arg(Arg::new("name").long("name").required(true).help("Product name"))
                .arg(Arg::new("price").long("price").required(true).help("Display price, e.g. ₦5,000"))
                .arg(Arg::new("image").long("image").default_value("").help("Image locator"))
                .arg(Arg::new("id").long("id").help("data-id attribute"))
                .arg(Arg::new("element-id").long("element-id").help("Element id attribute")),
        )
        .subcommand(
            Command::new("show").about("Render the cart").arg(
                Arg::new("json")
                    .long("json")
                    .action(ArgAction::SetTrue)
                    .help("Print the stored record instead"),
            ),
        )
        .subcommand(Command::new("inc").about("Press the + control on a row").arg(row()))
        .subcommand(Command::new("dec").about("Press the - control on a row").arg(row()))
        .subcommand(
            Command::new("set")
                .about("Type a quantity into a row")
                .arg(row())
                .arg(Arg::new("value").required(true).help("Raw field text")),
        )
        .subcommand(Command::new("remove").about("Press Remove on a row").arg(row()))
        .subcommand(Command::new("checkout").about("Hand the order off to the messaging link"))
        .subcommand(Command::new("clear").about("Empty the stored cart"))
}

/// Prints notices and navigations to the terminal
#[derive(Debug)]
pub struct TerminalHost<W> {
    out: W,
}

impl<W: Write> TerminalHost<W> {
    /// Wrap writer
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Notifier for TerminalHost<W> {
    fn acknowledge(&mut self, message: &str) {
        let _ = writeln!(self.out, "{message}");
    }

    fn blocking_notice(&mut self, message: &str) {
        let _ = writeln!(self.out, "! {message}");
    }
}

impl<W: Write> Navigator for TerminalHost<W> {
    fn navigate(&mut self, url: &str) {
        let _ = writeln!(self.out, "Opening {url}");
    }
}

/// Parse args and run, writing output to `out`
///
/// # Errors
/// Invalid arguments, unreadable config, or storage failure.
pub fn run_from<I, T, W>(args: I, out: &mut W) -> anyhow::Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    W: Write,
{
    let matches = build_cli().try_get_matches_from(args)?;
    run(&matches, out)
}

/// Run parsed command
///
/// # Errors
/// Unreadable config or storage failure.
pub fn run<W: Write>(matches: &ArgMatches, out: &mut W) -> anyhow::Result<i32> {
    let config = match matches.get_one::<PathBuf>("config") {
        Some(path) => WidgetConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WidgetConfig::from_env().context("reading config from environment")?,
    };
    let store_path = matches
        .get_one::<PathBuf>("store")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));
    tracing::debug!(store = %store_path.display(), key = %config.storage_key, "storefront opened");

    let front = Storefront::new(Arc::new(FileStore::open(store_path)), config);

    match matches.subcommand() {
        Some(("add", args)) => {
            let mut card = ProductCard::new(
                string_arg(args, "name"),
                string_arg(args, "price"),
                string_arg(args, "image"),
            );
            card.data_id = args.get_one::<String>("id").cloned();
            card.element_id = args.get_one::<String>("element-id").cloned();
            front
                .catalog()
                .add_to_cart(&card, &mut TerminalHost::new(&mut *out))?;
        }
        Some(("show", args)) => {
            if args.get_flag("json") {
                let cart = front.repository().load()?;
                writeln!(out, "{}", serde_json::to_string_pretty(&cart)?)?;
            } else {
                print_view(&front.cart_view()?, out)?;
            }
        }
        Some(("inc", args)) => {
            let mut view = front.cart_view()?;
            view.increment(row_arg(args)?).map_err(listed_row)?;
            print_view(&view, out)?;
        }
        Some(("dec", args)) => {
            let mut view = front.cart_view()?;
            view.decrement(row_arg(args)?).map_err(listed_row)?;
            print_view(&view, out)?;
        }
        Some(("set", args)) => {
            let row = row_arg(args)?;
            let mut view = front.cart_view()?;
            view.input(row, &string_arg(args, "value")).map_err(listed_row)?;
            view.change(row).map_err(listed_row)?;
            print_view(&view, out)?;
        }
        Some(("remove", args)) => {
            let mut view = front.cart_view()?;
            let removed = view.remove(row_arg(args)?).map_err(listed_row)?;
            writeln!(out, "Removed {}", removed.name)?;
            print_view(&view, out)?;
        }
        Some(("checkout", _)) => return checkout(&front, out),
        Some(("clear", _)) => {
            front.repository().clear()?;
            writeln!(out, "Cart cleared")?;
        }
        _ => unreachable!("subcommand_required"),
    }
    Ok(0)
}

fn checkout<W: Write>(front: &FileFront, out: &mut W) -> anyhow::Result<i32> {
    let outcome = front.handoff().checkout(&mut TerminalHost::new(&mut *out))?;
    Ok(match outcome {
        CheckoutOutcome::EmptyCart => EXIT_EMPTY_CART,
        CheckoutOutcome::Navigated { .. } => 0,
    })
}

fn print_view<W: Write>(view: &CartView<Arc<FileStore>>, out: &mut W) -> anyhow::Result<()> {
    if let Some(message) = view.container().empty_message() {
        writeln!(out, "{message}")?;
    }
    for (index, row) in view.container().rows().iter().enumerate() {
        writeln!(
            out,
            "{}. {}  {} x {}",
            index + 1,
            row.name,
            row.price,
            row.quantity.value()
        )?;
    }
    writeln!(out, "Subtotal: {}", view.subtotal_text())?;
    Ok(())
}

fn string_arg(args: &ArgMatches, name: &str) -> String {
    args.get_one::<String>(name).cloned().unwrap_or_default()
}

/// Report row errors with the 1-based numbers `show` lists
fn listed_row(err: WidgetError) -> anyhow::Error {
    match err {
        WidgetError::RowOutOfRange { row, rows } => {
            anyhow::anyhow!("row {} is not in the cart ({rows} rows listed)", row + 1)
        }
        other => other.into(),
    }
}

fn row_arg(args: &ArgMatches) -> anyhow::Result<usize> {
    let row = args
        .get_one::<u64>("row")
        .copied()
        .context("row is required")?;
    Ok(usize::try_from(row - 1)?)
}
