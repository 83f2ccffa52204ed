mod app;
mod effects;
mod logging;
mod mock;
mod render;

fn main() -> anyhow::Result<()> {
    app::run_app()
}
