// src/fetch/urls.rs

use url::Url;

use crate::error::{Error, Result};
use crate::request::RequestDescriptor;

const API_VERSION: &str = "v1";

pub const PARAM_API_KEY: &str = "APIKey";
pub const PARAM_PERIOD: &str = "Period";
pub const PARAM_SETTLEMENT_DATE: &str = "SettlementDate";
pub const PARAM_SERVICE_TYPE: &str = "ServiceType";

/// `<base>/<report>/v1?APIKey=..&Period=..&SettlementDate=..&ServiceType=..`
pub fn report_url(base: &Url, req: &RequestDescriptor) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| Error::Config(format!("base URL {base} cannot be a base")))?
        .pop_if_empty()
        .push(req.report())
        .push(API_VERSION);

    url.query_pairs_mut()
        .clear()
        .append_pair(PARAM_API_KEY, req.api_key().expose())
        .append_pair(PARAM_PERIOD, req.period())
        .append_pair(PARAM_SETTLEMENT_DATE, &req.date().format("%Y-%m-%d").to_string())
        .append_pair(PARAM_SERVICE_TYPE, req.service_type());

    Ok(url)
}

/// Copy of `url` safe to log: the `APIKey` value is masked.
pub fn redacted(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == PARAM_API_KEY {
                "***".to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();

    let mut out = url.clone();
    if !pairs.is_empty() {
        out.query_pairs_mut().clear().extend_pairs(pairs);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiKey;

    fn req() -> RequestDescriptor {
        RequestDescriptor::parse("B1770", "2023-01-05", ApiKey::new("s3cr3t")).unwrap()
    }

    #[test]
    fn url_carries_every_parameter() {
        let base = Url::parse("https://api.bmreports.com/BMRS/").unwrap();
        let url = report_url(&base, &req()).unwrap();

        assert_eq!(url.path(), "/BMRS/B1770/v1");
        let q: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            q,
            vec![
                ("APIKey".to_string(), "s3cr3t".to_string()),
                ("Period".to_string(), "*".to_string()),
                ("SettlementDate".to_string(), "2023-01-05".to_string()),
                ("ServiceType".to_string(), "csv".to_string()),
            ]
        );
    }

    #[test]
    fn base_without_trailing_slash_still_appends() {
        let base = Url::parse("http://localhost:9000/api").unwrap();
        let url = report_url(&base, &req()).unwrap();
        assert_eq!(url.path(), "/api/B1770/v1");
    }

    #[test]
    fn redacted_url_hides_the_key() {
        let base = Url::parse("https://api.bmreports.com/BMRS/").unwrap();
        let url = report_url(&base, &req()).unwrap();
        let shown = redacted(&url).to_string();

        assert!(!shown.contains("s3cr3t"), "{shown}");
        assert!(shown.contains("APIKey=***"), "{shown}");
        assert!(shown.contains("SettlementDate=2023-01-05"), "{shown}");
    }
}
