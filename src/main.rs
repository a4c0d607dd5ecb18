mod audio;
mod config;
mod metadata;
mod player;
mod runtime;
mod selection;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
