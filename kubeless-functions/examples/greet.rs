//! An example Function that receives a JSON payload and returns a JSON response.
//!
//! This is a typed hello world, exposed next to a plain-text variant. Pick one with
//! `FUNC_HANDLER` and pass the event as JSON on stdin:
//!
//! ```sh
//! echo '{"data": "{\"name\": \"kvc\"}"}' | FUNC_HANDLER=greet cargo run --example greet
//! ```
//!
//! It will respond with `{"message":"Hello, kvc!"}`.

use std::{error::Error, io};

use kubeless_functions::{invoke, select_function};
use kubeless_functions_host::{
    FunctionResult, context::InvocationContext, encoding::Json, event::Event,
    logging::LogDestination,
};

#[derive(serde::Deserialize, Debug)]
struct Request {
    name: String,
}

#[derive(serde::Serialize)]
struct Response {
    message: String,
}

fn greet(
    Json(request): Json<Request>,
    context: &InvocationContext,
) -> FunctionResult<Json<Response>> {
    context.log(log::Level::Info, format_args!("Received request: {request:?}"));
    Ok(Json(Response {
        message: format!("Hello, {}!", request.name),
    }))
}

fn say_hello(data: String, _context: &InvocationContext) -> String {
    format!("Hello, {data}")
}

fn main() -> Result<(), Box<dyn Error>> {
    kubeless_functions_log::configure_logging(log::LevelFilter::Debug, LogDestination::Stderr)?;

    let handler = select_function!(greet, say_hello)?;
    let event: Event = serde_json::from_reader(io::stdin())?;

    let result = invoke(&*handler, event, &InvocationContext::from_env())?;
    println!("{result}");
    Ok(())
}
