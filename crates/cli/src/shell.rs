//! The interactive storefront shell.
//!
//! Reads commands from stdin and renders views to stdout. The product
//! listing is fetched once when first needed and kept for the session;
//! `retry` re-runs the fetch after a failure, and that is the only retry
//! path - the adapter itself never retries.

use std::io::{self, BufRead, Write};

use shophub_core::ProductId;
use shophub_storefront::catalog::{FetchState, Product};
use shophub_storefront::state::AppState;
use shophub_storefront::storage::KeyValueStore;

const PROMPT: &str = "shophub> ";

// Form-level policy only; the auth service itself does not enforce it.
const MIN_PASSWORD_LENGTH: usize = 6;

/// One parsed shell command.
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    List,
    Search(String),
    ClearSearch,
    Show(ProductId),
    Add(ProductId),
    Remove(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
    Cart,
    Signup { name: String, email: String, password: String },
    Login { email: String, password: String },
    Logout,
    Whoami,
    Retry,
    Quit,
}

/// Run the shell until `quit` or end of input.
///
/// # Errors
///
/// Returns an error only for I/O failures on the terminal itself; store
/// and catalog failures render as messages and the loop continues.
pub async fn run<S: KeyValueStore>(mut state: AppState<S>) -> shophub_storefront::Result<()> {
    let mut products: FetchState<Vec<Product>> = FetchState::Loading;

    println!("ShopHub - type 'help' for commands");
    if let Some(user) = state.auth().current_user() {
        println!("Welcome back, {}!", user.name);
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{PROMPT}");
        let _ = io::stdout().flush();

        let Some(line) = lines.next() else {
            break; // end of input
        };
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue, // blank line
            Err(message) => {
                println!("{message}");
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => print_help(),
            Command::List => {
                ensure_listing(&state, &mut products).await;
                print_listing(&products, state.search().query());
            }
            Command::Retry => {
                products = FetchState::Loading;
                ensure_listing(&state, &mut products).await;
                print_listing(&products, state.search().query());
            }
            Command::Search(query) => {
                state.search_mut().set(query);
                ensure_listing(&state, &mut products).await;
                print_listing(&products, state.search().query());
            }
            Command::ClearSearch => {
                state.search_mut().clear();
                println!("Search cleared.");
            }
            Command::Show(id) => {
                // The single-product variant: one fetch per distinct id.
                let detail = FetchState::run(state.catalog().get_product(id)).await;
                match detail {
                    FetchState::Loaded(product) => print_detail(&product),
                    FetchState::Failed(message) => print_fetch_error(&message),
                    FetchState::Loading => unreachable!("run never returns Loading"),
                }
            }
            Command::Add(id) => match find_or_fetch(&state, &products, id).await {
                Ok(product) => {
                    state.cart_mut().add(&product);
                    println!("Added \"{}\" to cart.", product.title);
                }
                Err(message) => print_fetch_error(&message),
            },
            Command::Remove(id) => {
                state.cart_mut().remove(id);
                print_cart(&state);
            }
            Command::Increase(id) => {
                state.cart_mut().increase_quantity(id);
                print_cart(&state);
            }
            Command::Decrease(id) => {
                state.cart_mut().decrease_quantity(id);
                print_cart(&state);
            }
            Command::Cart => print_cart(&state),
            Command::Signup { name, email, password } => {
                if password.len() < MIN_PASSWORD_LENGTH {
                    println!("Password must be at least {MIN_PASSWORD_LENGTH} characters.");
                    continue;
                }
                match state.auth_mut().signup(&name, &email, &password) {
                    Ok(user) => println!("Account created. You are logged in as {}.", user.name),
                    Err(error) => println!("Signup failed: {error}"),
                }
            }
            Command::Login { email, password } => {
                match state.auth_mut().login(&email, &password) {
                    Ok(user) => println!("Welcome back, {}!", user.name),
                    Err(error) => println!("Login failed: {error}"),
                }
            }
            Command::Logout => match state.auth_mut().logout() {
                Ok(()) => println!("Logged out."),
                Err(error) => println!("Logout failed: {error}"),
            },
            Command::Whoami => match state.auth().current_user() {
                Some(user) => println!("{} <{}>", user.name, user.email),
                None => println!("Not logged in."),
            },
        }
    }

    println!("Bye!");
    Ok(())
}

/// Fetch the listing if it has not been loaded yet this session.
async fn ensure_listing<S: KeyValueStore>(
    state: &AppState<S>,
    products: &mut FetchState<Vec<Product>>,
) {
    if products.is_loading() {
        println!("Loading products...");
        *products = FetchState::run(state.catalog().list_products()).await;
    }
}

/// Resolve a product for `add`: prefer the loaded listing's snapshot, fall
/// back to a single-product fetch.
async fn find_or_fetch<S: KeyValueStore>(
    state: &AppState<S>,
    products: &FetchState<Vec<Product>>,
    id: ProductId,
) -> Result<Product, String> {
    if let Some(product) = products
        .data()
        .and_then(|list| list.iter().find(|p| p.id == id))
    {
        return Ok(product.clone());
    }

    match FetchState::run(state.catalog().get_product(id)).await {
        FetchState::Loaded(product) => Ok(product),
        FetchState::Failed(message) => Err(message),
        FetchState::Loading => unreachable!("run never returns Loading"),
    }
}

/// Parse one input line. `Ok(None)` means a blank line.
fn parse(line: &str) -> Result<Option<Command>, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = words.collect();

    let id_arg = |name: &str, rest: &[&str]| -> Result<ProductId, String> {
        match rest {
            [raw] => raw
                .parse()
                .map_err(|_| format!("usage: {name} <product-id>")),
            _ => Err(format!("usage: {name} <product-id>")),
        }
    };

    let command = match head {
        "help" | "?" => Command::Help,
        "list" | "ls" => Command::List,
        "search" => {
            if rest.is_empty() {
                return Err("usage: search <query>".to_owned());
            }
            Command::Search(rest.join(" "))
        }
        "clear" => Command::ClearSearch,
        "show" => Command::Show(id_arg("show", &rest)?),
        "add" => Command::Add(id_arg("add", &rest)?),
        "remove" | "rm" => Command::Remove(id_arg("remove", &rest)?),
        "inc" | "+" => Command::Increase(id_arg("inc", &rest)?),
        "dec" | "-" => Command::Decrease(id_arg("dec", &rest)?),
        "cart" => Command::Cart,
        "signup" => match rest.as_slice() {
            [name, email, password] => Command::Signup {
                name: (*name).to_owned(),
                email: (*email).to_owned(),
                password: (*password).to_owned(),
            },
            _ => return Err("usage: signup <name> <email> <password>".to_owned()),
        },
        "login" => match rest.as_slice() {
            [email, password] => Command::Login {
                email: (*email).to_owned(),
                password: (*password).to_owned(),
            },
            _ => return Err("usage: login <email> <password>".to_owned()),
        },
        "logout" => Command::Logout,
        "whoami" => Command::Whoami,
        "retry" => Command::Retry,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try 'help')")),
    };

    Ok(Some(command))
}

// =============================================================================
// Views
// =============================================================================

fn print_help() {
    println!("Catalog:");
    println!("  list                      show products (filtered by search)");
    println!("  search <query>            filter listing by title");
    println!("  clear                     clear the search filter");
    println!("  show <id>                 product details");
    println!("  retry                     re-fetch the listing after an error");
    println!("Cart:");
    println!("  add <id>                  add one unit to the cart");
    println!("  remove <id>               remove a line entirely");
    println!("  inc <id> / dec <id>       change a line's quantity");
    println!("  cart                      show the cart");
    println!("Account:");
    println!("  signup <name> <email> <password>");
    println!("  login <email> <password>");
    println!("  logout / whoami");
    println!("Other: help, quit");
}

fn print_listing(products: &FetchState<Vec<Product>>, query: &str) {
    match products {
        FetchState::Loading => println!("Loading products..."),
        FetchState::Failed(message) => print_fetch_error(message),
        FetchState::Loaded(list) => {
            let matching: Vec<&Product> =
                list.iter().filter(|p| p.title_matches(query)).collect();

            if !query.is_empty() {
                println!("Search: \"{query}\" ({} of {} products)", matching.len(), list.len());
            }
            if matching.is_empty() {
                println!("No products found.");
                return;
            }
            for product in matching {
                println!(
                    "  [{:>3}] {:<60} {:>9}",
                    product.id.as_i64(),
                    truncate(&product.title, 60),
                    product.price.to_string()
                );
            }
        }
    }
}

fn print_detail(product: &Product) {
    println!("{}", product.title);
    println!("  id:       {}", product.id);
    println!("  price:    {}", product.price);
    println!("  category: {}", product.category);
    if let Some(rating) = product.rating {
        println!("  rating:   {:.1} ({} reviews)", rating.rate, rating.count);
    }
    if !product.description.is_empty() {
        println!("  {}", product.description);
    }
}

fn print_cart<S: KeyValueStore>(state: &AppState<S>) {
    let cart = state.cart();
    if cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for line in cart.lines() {
        println!(
            "  [{:>3}] {:<50} {:>3} x {:>9} = {:>9}",
            line.id.as_i64(),
            truncate(&line.title, 50),
            line.quantity,
            line.price.to_string(),
            line.line_total().to_string()
        );
    }
    println!(
        "  {} item(s), subtotal {}",
        cart.item_count(),
        cart.subtotal()
    );
}

fn print_fetch_error(message: &str) {
    println!("Error: {message}");
    println!("Type 'retry' to try again.");
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_owned()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank_line() {
        assert_eq!(parse(""), Ok(None));
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn test_parse_id_commands() {
        assert_eq!(parse("add 3"), Ok(Some(Command::Add(ProductId::new(3)))));
        assert_eq!(parse("- 7"), Ok(Some(Command::Decrease(ProductId::new(7)))));
        assert!(parse("add").is_err());
        assert!(parse("add three").is_err());
    }

    #[test]
    fn test_parse_search_joins_words() {
        assert_eq!(
            parse("search gold ring"),
            Ok(Some(Command::Search("gold ring".to_owned())))
        );
        assert!(parse("search").is_err());
    }

    #[test]
    fn test_parse_auth_commands() {
        assert_eq!(
            parse("login a@x.com secret1"),
            Ok(Some(Command::Login {
                email: "a@x.com".to_owned(),
                password: "secret1".to_owned(),
            }))
        );
        assert!(parse("signup Ada ada@x.com").is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        assert!(parse("frobnicate").is_err());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long product title", 10), "a very ...");
    }
}
