// src/fetch/urls.rs

use url::Url;

use crate::error::FetchError;

/// URL template for Disaggregated Futures Only ZIP archives by year.
pub const BASE_URL: &str = "https://www.cftc.gov/files/dea/history/fut_disagg_txt_{year}.zip";

/// First year the disaggregated report was published.
pub const MIN_YEAR: i32 = 2006;
pub const MAX_YEAR: i32 = 2100;

pub fn check_year(year: i32) -> Result<(), FetchError> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(FetchError::InvalidInput(year))
    }
}

/// Substitute `{year}` in `template` and parse the result.
pub fn report_url(template: &str, year: i32) -> Result<Url, FetchError> {
    check_year(year)?;
    let url = template.replace("{year}", &year.to_string());
    Url::parse(&url).map_err(|source| FetchError::Url { url, source })
}
