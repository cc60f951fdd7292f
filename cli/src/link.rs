use crate::cli::FilterArgs;
use crate::data;
use crate::error::{Result, ResultExt};
use navigator::url_with_filters;
use url::Url;

pub fn execute(
    file: Option<String>,
    args: FilterArgs,
    base: Option<String>,
    config_path: &str,
) -> Result<()> {
    let config = data::load_config(config_path)?;
    let runtime = data::runtime()?;
    let repository = data::load_repository(&runtime, data::data_path(file, &config))?;

    let filters = data::filter_state(&args, &repository)?;
    let base = base.unwrap_or_else(|| config.url.base.clone());
    let url = Url::parse(&base).with_context(|| format!("Invalid base URL {base}"))?;

    println!("{}", url_with_filters(&url, &filters));
    Ok(())
}
