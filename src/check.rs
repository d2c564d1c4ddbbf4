use anyhow::Result;
use tracing::info;

use crate::inference::UrlScorer;
use crate::severity::Severity;

#[derive(Debug)]
pub struct CheckReport {
    pub url: String,
    pub probability: f32,
    pub severity: Severity,
}

/// Score each URL with the injected scorer and attach its severity band.
pub fn check_urls(scorer: &dyn UrlScorer, urls: &[String]) -> Result<Vec<CheckReport>> {
    let mut reports = Vec::with_capacity(urls.len());
    for url in urls {
        let probability = scorer.predict(url)?;
        let severity = Severity::from_probability(probability);
        info!(
            action = "predict",
            component = "check",
            url = url.as_str(),
            probability,
            severity = severity.label(),
            "URL scored"
        );
        reports.push(CheckReport {
            url: url.clone(),
            probability,
            severity,
        });
    }
    Ok(reports)
}

pub fn print_check_reports(reports: &[CheckReport]) {
    for report in reports {
        println!(
            "[{}] There is a {:.2}% probability that {} is malicious",
            report.severity,
            report.probability * 100.0,
            report.url
        );
    }
}
