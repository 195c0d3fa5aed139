//! Builds the poll form page, clicks "add option" a few times and prints the
//! result.
//!
//! Usage: `cargo run -p pollform --example poll_demo -- [CONFIG.toml] [CLICKS]`
//!
//! Set `RUST_LOG=pollform=trace` to see the event loop at work.

use pollform::dom::DocumentTreeDebug;
use pollform::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_CLICKS: usize = 2;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pollform=debug")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => OptionListConfig::load(path)?,
        None => OptionListConfig::default(),
    };
    let clicks = match args.next() {
        Some(n) => n.parse()?,
        None => DEFAULT_CLICKS,
    };

    let page = Page::new(poll_form_page(&config));
    let controller = OptionListController::new(&page, config.clone())?;
    controller.attach();
    page.load();

    for _ in 0..clicks {
        page.click_by_id(&config.trigger_id)?;
    }

    println!(
        "{} of {} options ({} remaining)\n",
        controller.option_count(),
        controller.max_options(),
        controller.remaining()
    );
    page.with_document(|doc| {
        println!("{}\n", doc.to_html());
        print!("{}", DocumentTreeDebug::new().format(doc, doc.root()));
    });
    Ok(())
}
