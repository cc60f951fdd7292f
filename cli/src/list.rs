use crate::cli::FilterArgs;
use crate::data;
use crate::error::Result;
use crate::ui;
use log::debug;

pub fn execute(
    file: Option<String>,
    args: FilterArgs,
    notes: bool,
    config_path: &str,
) -> Result<()> {
    let config = data::load_config(config_path)?;
    let runtime = data::runtime()?;
    let repository = data::load_repository(&runtime, data::data_path(file, &config))?;

    let filters = data::filter_state(&args, &repository)?;
    let now = data::reference_now(args.now.as_deref())?;
    debug!("Listing with {filters:?} relative to {now}");

    let visible = repository.filter(&filters, &now);
    if visible.is_empty() {
        ui::warning_message("No releases match the selected filters");
        return Ok(());
    }

    ui::section_header(&format!("{} of {} release(s)", visible.len(), repository.releases().len()));
    let current = repository.current().map(|release| release.version.as_str());
    for release in visible {
        ui::release_line(release, current == Some(release.version.as_str()));
        for section in release.non_empty_sections() {
            ui::section_line(&releases::humanize_key(&section.key), section.items.len());
            if notes {
                for item in &section.items {
                    ui::note_line(item);
                }
            }
        }
    }
    Ok(())
}
