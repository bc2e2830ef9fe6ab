//! Runs the reference echo Function once, the way a kubeless runtime would.
//!
//! The request body is read from stdin and the result is written to stdout. The received event
//! is logged to stderr.
//!
//! ```sh
//! echo -n hello | FUNC_HANDLER=echo cargo run --example echo
//! ```

use std::{
    error::Error,
    io::{self, Read, Write},
};

use kubeless_functions::{echo, invoke, select_function};
use kubeless_functions_host::{context::InvocationContext, event::Event, logging::LogDestination};

fn main() -> Result<(), Box<dyn Error>> {
    kubeless_functions_log::configure_logging(log::LevelFilter::Info, LogDestination::Stderr)?;

    let handler = select_function!(echo)?;

    let mut data = String::new();
    io::stdin().read_to_string(&mut data)?;
    let event = Event::new(data)
        .with_metadata("event-type", "text/plain")
        .with_metadata("event-namespace", "cli");

    let result = invoke(&*handler, event, &InvocationContext::from_env())?;
    io::stdout().write_all(result.as_bytes())?;
    Ok(())
}
