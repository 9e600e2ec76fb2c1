use crate::data::{persistence::get_data_dir, AppSettings};
use crate::speech::CommandSpeaker;
use crate::ui::app::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;
use tracing::info;

pub fn run() -> Result<()> {
    let settings = AppSettings::load()?;
    let speaker = CommandSpeaker::from_settings(&settings.speech);

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let data_dir = get_data_dir()?;
    info!(%today, data_dir = %data_dir.display(), "starting");
    let mut app = App::new(settings, Box::new(speaker), today, data_dir);

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    info!("exiting");

    result
}
