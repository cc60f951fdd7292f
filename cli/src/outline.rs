use crate::data;
use crate::error::Result;
use crate::ui;
use navigator::{HumanizedTitles, LayoutMode, ScrollState, build_outline};

pub fn execute(file: Option<String>, width: u32, config_path: &str, verbose: bool) -> Result<()> {
    let config = data::load_config(config_path)?;
    let runtime = data::runtime()?;
    let repository = data::load_repository(&runtime, data::data_path(file, &config))?;

    let outline = build_outline(repository.releases(), &mut HumanizedTitles);
    let mode = LayoutMode::from_width(width, &config.breakpoints());
    let model = mode.view().render(&outline, &ScrollState::default());

    ui::section_header(&format!("{mode:?} outline at {width}px"));
    if verbose {
        let breakpoints = config.breakpoints();
        ui::info_message(&format!(
            "Breakpoints: mobile <= {}px, desktop >= {}px{}",
            breakpoints.mobile_max,
            breakpoints.desktop_min,
            if model.sticky { ", sticky" } else { "" }
        ));
    }
    for item in &model.items {
        ui::nav_item_line(item);
    }
    Ok(())
}
