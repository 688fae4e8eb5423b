//! Session Replay Example
//!
//! Replays a scripted shopper session against an empty store and prints the
//! resulting cart with its order summary.
//!
//! Use `-f` to load a fixture set by name
//! Use `-s` to pick the session script
//! Use `-o` to write the final store snapshot as YAML

use std::{
    fs,
    io::{self, Write},
    time::Instant,
};

use anyhow::Result;
use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing_subscriber::EnvFilter;

use storefront::{fixtures::Fixture, utils::ExampleSessionArgs};

/// Session Replay Example
#[expect(clippy::print_stdout, reason = "Example program output to user")]
pub fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("storefront=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = ExampleSessionArgs::parse();

    let fixture = Fixture::from_set(&args.fixture)?;
    let mut store = fixture.store();

    let start = Instant::now();
    let steps = fixture.replay(&args.session, &mut store)?;
    let elapsed = start.elapsed();

    let summary = store.order_summary()?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    summary.write_to(&mut handle, store.cart())?;

    writeln!(
        handle,
        " Items in cart: {}  Wishlist count: {}",
        store.cart().total_quantity(),
        store.wishlist().total_quantity()
    )?;

    writeln!(
        handle,
        " {steps} steps in {} ({}s)",
        elapsed.human(Truncate::Nano),
        elapsed.as_secs_f32()
    )?;

    if let Some(out) = args.out.as_deref() {
        fs::write(out, store.snapshot().to_yaml()?)?;

        println!("\nSnapshot written to: {}", out.display());
    }

    Ok(())
}
