//! Console front-end - the thin view controller over the core.
//!
//! A line-oriented command loop: routes each command to the registry, scan
//! session, or theme store, owns the y/N confirmation for destructive
//! operations, and re-renders state after every mutation. All rendering
//! helpers are pure functions over core types so they stay testable without
//! a terminal.

/// Keyboard-wedge capture and decode over console lines
pub mod wedge;

use crate::{
    config::AppConfig,
    core::{
        lookup::{self, LookupOutcome},
        registry::Registry,
    },
    errors::{Error, Result},
    render::BarcodeRenderer,
    scan::ScanSession,
    store::{LocalStore, Product},
};
use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};
use tracing::{error, info, warn};
use wedge::{SharedInput, WedgeDecoder, WedgeSource, shared_stdin};

const HELP: &str = "Commands:\n\
    add            Add a product (prompts for name and description)\n\
    list           List all products with their barcode labels\n\
    find <code>    Look up a barcode entered by hand\n\
    scan           Scan: each input line is one frame, `stop` ends the scan\n\
    print <code>   Print one product's label placard\n\
    remove <code>  Delete the product with this barcode (asks y/N)\n\
    clear          Delete every product (asks y/N)\n\
    theme          Toggle the light/dark preference (local backend only)\n\
    help           Show this help\n\
    quit           Exit";

/// Runs the command loop until `quit` or end of input.
///
/// # Errors
/// Returns an error only on console I/O failure; operation failures are
/// reported to the user and the loop continues.
pub async fn run(
    mut registry: Registry,
    config: &AppConfig,
    renderer: &dyn BarcodeRenderer,
    theme_store: Option<LocalStore>,
) -> Result<()> {
    let input = shared_stdin();
    let mut out = tokio::io::stdout();

    say(&mut out, "barcode-buddy ready. Type `help` for commands.").await?;
    loop {
        prompt(&mut out, "> ").await?;
        let Some(line) = next_line(&input).await? else {
            // End of input is host teardown; leave quietly
            info!("input ended; shutting down");
            break;
        };
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "help" => say(&mut out, HELP).await?,
            "quit" | "exit" => break,
            "add" => handle_add(&mut registry, &input, &mut out).await?,
            "list" => {
                let listing = render_product_list(registry.products(), renderer);
                say(&mut out, &listing).await?;
            }
            "find" => match lookup::resolve_manual(&registry, rest) {
                Ok(outcome) => say(&mut out, &render_outcome(&outcome)).await?,
                Err(e) => report(&mut out, &e).await?,
            },
            "scan" => handle_scan(&registry, config, &input, &mut out).await?,
            "print" => handle_print(&registry, renderer, rest, &mut out).await?,
            "remove" => handle_remove(&mut registry, rest, &input, &mut out).await?,
            "clear" => handle_clear(&mut registry, &input, &mut out).await?,
            "theme" => handle_theme(theme_store.as_ref(), &mut out).await?,
            other => {
                say(&mut out, &format!("Unknown command `{other}`. Type `help`."))
                    .await?;
            }
        }
    }
    Ok(())
}

async fn handle_add(
    registry: &mut Registry,
    input: &SharedInput,
    out: &mut Stdout,
) -> Result<()> {
    prompt(out, "Product name: ").await?;
    let Some(name) = next_line(input).await? else {
        return Ok(());
    };
    prompt(out, "Description (optional): ").await?;
    let description = next_line(input).await?.unwrap_or_default();

    match registry.add(&name, &description).await {
        Ok(product) => {
            say(
                out,
                &format!(
                    "✅ Product added successfully with barcode ID: {}",
                    product.code
                ),
            )
            .await
        }
        Err(e) => report(out, &e).await,
    }
}

async fn handle_scan(
    registry: &Registry,
    config: &AppConfig,
    input: &SharedInput,
    out: &mut Stdout,
) -> Result<()> {
    let source = WedgeSource::new(std::sync::Arc::clone(input));
    let mut decoder = WedgeDecoder::new();
    let mut session = ScanSession::new();

    if let Err(e) = session
        .start(&source, &config.scanner.constraints())
        .await
    {
        return report(out, &e).await;
    }
    say(
        out,
        "Camera started. Point at a barcode to scan (enter the value, `stop` to cancel).",
    )
    .await?;

    match session.run(&mut decoder, registry).await {
        Ok(Some(outcome)) => say(out, &render_outcome(&outcome)).await,
        Ok(None) => say(out, "Scan stopped.").await,
        Err(e) => report(out, &e).await,
    }
}

async fn handle_print(
    registry: &Registry,
    renderer: &dyn BarcodeRenderer,
    code: &str,
    out: &mut Stdout,
) -> Result<()> {
    if code.is_empty() {
        return report(out, &Error::validation("Please enter a barcode number")).await;
    }
    match registry.find_by_code(code) {
        Some(product) => say(out, &render_product_placard(product, renderer)).await,
        None => say(out, "Product not found").await,
    }
}

async fn handle_remove(
    registry: &mut Registry,
    code: &str,
    input: &SharedInput,
    out: &mut Stdout,
) -> Result<()> {
    if code.is_empty() {
        return report(out, &Error::validation("Please enter a barcode number")).await;
    }
    let Some(product) = registry.find_by_code(code) else {
        return say(out, "Product not found").await;
    };
    let id = product.id.clone();

    if !confirm(input, out, "Are you sure you want to delete this product?").await? {
        return Ok(());
    }
    match registry.remove(&id).await {
        Ok(()) => say(out, "✅ Product deleted successfully").await,
        Err(e) => report(out, &e).await,
    }
}

async fn handle_clear(
    registry: &mut Registry,
    input: &SharedInput,
    out: &mut Stdout,
) -> Result<()> {
    if !confirm(
        input,
        out,
        "Are you sure you want to delete all products? This action cannot be undone.",
    )
    .await?
    {
        return Ok(());
    }
    match registry.remove_all().await {
        Ok(()) => say(out, "✅ All products cleared").await,
        Err(e) => report(out, &e).await,
    }
}

async fn handle_theme(theme_store: Option<&LocalStore>, out: &mut Stdout) -> Result<()> {
    let Some(store) = theme_store else {
        return say(out, "Theme preference is only stored by the local backend.").await;
    };
    match store.load_theme().await {
        Ok(theme) => {
            let next = theme.toggled();
            match store.save_theme(next).await {
                Ok(()) => say(out, &format!("Theme set to {}.", next.as_flag())).await,
                Err(e) => report(out, &e).await,
            }
        }
        Err(e) => report(out, &e).await,
    }
}

/// Renders the product listing, newest-backend-order, with an empty-state
/// message and per-product label fault tolerance.
#[must_use]
pub fn render_product_list(products: &[Product], renderer: &dyn BarcodeRenderer) -> String {
    if products.is_empty() {
        return "No products added yet. Add your first product to get started!".to_string();
    }

    let mut output = String::new();
    for product in products {
        output.push_str(&format!("- {}\n", product.name));
        if !product.description.is_empty() {
            output.push_str(&format!("  {}\n", product.description));
        }
        match renderer.render(&product.code) {
            Ok(label) => {
                for line in label.lines() {
                    output.push_str(&format!("  {line}\n"));
                }
            }
            // A bad label skips this product's image, never the listing
            Err(e) => error!("failed to render barcode for '{}': {e}", product.name),
        }
        output.push_str(&format!(
            "  Barcode ID: {}  (created {})\n",
            product.code,
            product.created_at.format("%Y-%m-%d")
        ));
    }
    output.trim_end().to_string()
}

/// Renders the found/not-found display shared by the scan and manual paths.
#[must_use]
pub fn render_outcome(outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::Found(product) => {
            let mut text = format!("Product Found!\nName: {}\n", product.name);
            if !product.description.is_empty() {
                text.push_str(&format!("Description: {}\n", product.description));
            }
            text.push_str(&format!(
                "Barcode ID: {}\nCreated: {}",
                product.code,
                product.created_at.format("%Y-%m-%d")
            ));
            text
        }
        LookupOutcome::NotFound { raw } => format!(
            "Product Not Found\nScanned Barcode: {raw}\n\
             This barcode is not associated with any product in your system."
        ),
    }
}

/// Renders the single-product print placard: name, optional description,
/// label, code, and creation date.
#[must_use]
pub fn render_product_placard(product: &Product, renderer: &dyn BarcodeRenderer) -> String {
    let mut placard = format!("{}\n", product.name);
    if !product.description.is_empty() {
        placard.push_str(&format!("{}\n", product.description));
    }
    match renderer.render(&product.code) {
        Ok(label) => {
            placard.push('\n');
            placard.push_str(&label);
            placard.push('\n');
        }
        Err(e) => warn!("failed to render barcode for '{}': {e}", product.name),
    }
    placard.push_str(&format!(
        "\nBarcode ID: {}\nCreated: {}",
        product.code,
        product.created_at.format("%Y-%m-%d")
    ));
    placard
}

async fn confirm(input: &SharedInput, out: &mut Stdout, question: &str) -> Result<bool> {
    prompt(out, &format!("{question} [y/N] ")).await?;
    let answer = next_line(input).await?.unwrap_or_default();
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

async fn next_line(input: &SharedInput) -> Result<Option<String>> {
    Ok(input.lock().await.next_line().await?)
}

async fn say<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}

async fn prompt<W: AsyncWrite + Unpin>(out: &mut W, text: &str) -> Result<()> {
    out.write_all(text.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

/// Reports an operation failure inline; the loop continues afterwards.
async fn report<W: AsyncWrite + Unpin>(out: &mut W, error: &Error) -> Result<()> {
    say(out, &format!("❌ {error}")).await
}
