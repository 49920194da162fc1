#[macro_use]
extern crate rocket;

use clap::Parser;
use log::info;
use rocket::fairing::AdHoc;
use std::env;
use std::path::PathBuf;

use minimax_snake::bot::Bot;
use minimax_snake::config::Config;

mod handler;

#[derive(Parser, Debug)]
#[command(author, version, about = "Minimax Battlesnake server")]
struct Args {
    /// Port to listen on. Falls back to $PORT, then 8000
    #[arg(long)]
    port: Option<u16>,

    /// Seed for the fallback move random source
    #[arg(long)]
    seed: Option<u64>,

    /// Path to Snake.toml
    #[arg(long, default_value = "Snake.toml")]
    config: PathBuf,
}

#[launch]
fn rocket() -> _ {
    let args = Args::parse();

    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }

    env_logger::init();

    // Lots of web hosting services expect you to bind to the port specified by the `PORT`
    // environment variable, so honour it when no --port was given.
    let port = args
        .port
        .or_else(|| env::var("PORT").ok().and_then(|p| p.parse().ok()))
        .unwrap_or(8000);

    info!("Starting Battlesnake Server on port {}...", port);

    // Load configuration once at startup
    let config = Config::load_or_default_from(&args.config);
    info!(
        "Search depth {}, opponent model {:?}",
        config.search.depth, config.search.opponent_model
    );
    let bot = Bot::with_seed(config, args.seed);

    let figment = rocket::Config::figment().merge(("port", port));

    rocket::custom(figment)
        .manage(bot)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "battlesnake/github/minimax-snake");
            })
        }))
        .mount(
            "/",
            routes![handler::index, handler::start, handler::get_move, handler::end],
        )
}
