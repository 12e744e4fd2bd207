mod app;
mod ui;

fn main() -> eframe::Result<()> {
    env_logger::init();
    ui::app_shell::run()
}
