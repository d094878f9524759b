// Fan-out loading of the category sources.

use log::{debug, info};
use snafu::prelude::*;
use std::time::Duration;

use crate::board::config_reader::SheetSource;
use crate::board::*;

/// The published endpoints give no latency guarantee; bound every fetch so
/// one dead source surfaces as a load failure instead of an indefinite hang.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

pub type RawRows = Vec<Vec<String>>;

/// Loads every category source, one result per sheet in configuration
/// order. A failing source yields its error in place and never aborts the
/// other loads; the caller decides what an unloadable category becomes.
pub fn load_all_sources(sheets: &[SheetSource]) -> BoardResult<Vec<BoardResult<RawRows>>> {
    let bodies = fetch_remote_bodies(sheets)?;
    let mut res: Vec<BoardResult<RawRows>> = Vec::new();
    for (sheet, body) in sheets.iter().zip(bodies) {
        res.push(load_one(sheet, body));
    }
    Ok(res)
}

fn load_one(sheet: &SheetSource, body: Option<BoardResult<String>>) -> BoardResult<RawRows> {
    debug!("load_one: {:?} from {:?}", sheet.name, sheet.source);
    match (body, sheet.provider.as_deref()) {
        (Some(body_r), None | Some("csv")) => io_csv::read_raw_rows(body_r?.as_bytes()),
        (None, None | Some("csv")) => io_csv::read_raw_rows_path(&sheet.source),
        (None, Some("workbook")) => io_workbook::read_raw_rows(&sheet.source, &sheet.worksheet()),
        (Some(_), Some("workbook")) => {
            whatever!("Workbook sources must be local files: {:?}", sheet.source)
        }
        (_, Some(x)) => whatever!("Provider not implemented {:?}", x),
    }
}

/// Fetches all the URL sources concurrently, one task per source, joined
/// once all of them complete. File sources come back as `None`.
fn fetch_remote_bodies(sheets: &[SheetSource]) -> BoardResult<Vec<Option<BoardResult<String>>>> {
    let urls: Vec<Option<String>> = sheets
        .iter()
        .map(|s| is_url(&s.source).then(|| s.source.clone()))
        .collect();
    if urls.iter().all(|u| u.is_none()) {
        return Ok(urls.into_iter().map(|_| None).collect());
    }

    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context(FetchClientSnafu {})?;
    let runtime = tokio::runtime::Runtime::new().context(FetchRuntimeSnafu {})?;

    let bodies = runtime.block_on(async {
        let mut handles = Vec::new();
        for url_o in urls {
            let client = client.clone();
            handles.push(tokio::spawn(async move {
                match url_o {
                    None => None,
                    Some(url) => Some(fetch_one(&client, url).await),
                }
            }));
        }
        let mut res: Vec<Option<BoardResult<String>>> = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(x) => res.push(x),
                Err(e) => res.push(Some(Err(BoardError::Whatever {
                    message: format!("Fetch task aborted: {}", e),
                    source: None,
                }))),
            }
        }
        res
    });
    Ok(bodies)
}

async fn fetch_one(client: &reqwest::Client, url: String) -> BoardResult<String> {
    info!("Fetching category data from {}", url);
    let response = client
        .get(&url)
        .send()
        .await
        .context(FetchSnafu { url: url.clone() })?
        .error_for_status()
        .context(FetchSnafu { url: url.clone() })?;
    response.text().await.context(FetchSnafu { url })
}

fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(name: &str, source: &str) -> SheetSource {
        serde_json::from_str(&format!(
            r#"{{"name": "{}", "source": "{}"}}"#,
            name, source
        ))
        .unwrap()
    }

    #[test]
    fn recognizes_urls() {
        assert!(is_url("https://example.com/pub?output=csv"));
        assert!(is_url("http://example.com/a.csv"));
        assert!(!is_url("data/attendance.csv"));
        assert!(!is_url("httpdocs/a.csv"));
    }

    #[test]
    fn failing_sources_do_not_abort_the_others() {
        let sheets = vec![
            sheet("Attendance", "/definitely/not/here.csv"),
            sheet("Speeches", "/also/not/here.csv"),
        ];
        let res = load_all_sources(&sheets).unwrap();
        assert_eq!(res.len(), 2);
        assert!(res.iter().all(|r| r.is_err()));
    }
}
