mod app;
mod audio;
mod catalog;
mod config;
mod engine;
mod error;
mod runtime;
mod sync;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
