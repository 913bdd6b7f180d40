use super::rates::ratio_percent;
use super::types::{FunnelStage, FunnelStep};
use crate::domain::ApplicationStatus;

/// Convert ordered stage counts into share-of-entry and stage-to-stage rates.
///
/// Stage 0 is the entry population. Its conversion rate is 100 by
/// convention, as is the conversion of any stage following an empty one.
/// Counts need not be non-increasing.
pub fn analyze_funnel(stages: &[FunnelStage]) -> Vec<FunnelStep> {
    let Some(first) = stages.first() else {
        return Vec::new();
    };
    let total = first.count;

    stages
        .iter()
        .enumerate()
        .map(|(i, stage)| {
            let conversion_rate = if i == 0 {
                100
            } else {
                let previous = stages[i - 1].count;
                if previous == 0 {
                    100
                } else {
                    ratio_percent(stage.count, previous)
                }
            };
            FunnelStep {
                name: stage.name.clone(),
                count: stage.count,
                percentage_of_total: ratio_percent(stage.count, total),
                conversion_rate,
            }
        })
        .collect()
}

/// Stage counts for the hiring pipeline: every application, then those
/// currently reviewing, interviewing and accepted.
pub fn application_stages(statuses: &[ApplicationStatus]) -> Vec<FunnelStage> {
    let count = |wanted: ApplicationStatus| {
        statuses.iter().filter(|s| **s == wanted).count() as u64
    };
    vec![
        FunnelStage::new("submitted", statuses.len() as u64),
        FunnelStage::new("reviewing", count(ApplicationStatus::Reviewing)),
        FunnelStage::new("interviewing", count(ApplicationStatus::Interviewing)),
        FunnelStage::new("accepted", count(ApplicationStatus::Accepted)),
    ]
}

pub fn application_funnel(statuses: &[ApplicationStatus]) -> Vec<FunnelStep> {
    analyze_funnel(&application_stages(statuses))
}
