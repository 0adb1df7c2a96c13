//! Demo filter configuration: a facility encounter listing
//!
//! This is the caller-authored side of the engine's contract, kept in one
//! place so every subcommand drives the same filter bar.

use sift_core::editors::InMemoryTagSource;
use sift_core::{ConfigError, FilterConfig, FilterMode, FilterOption, TagNode, TagResource};

pub const TAG_RESOURCE: &str = "patient_tag";

/// The demo filter bar: status, encounter class, patient tags and admission
/// date.
pub fn demo_filters() -> Result<Vec<FilterConfig>, ConfigError> {
    Ok(vec![
        FilterConfig::command(
            "status",
            "Status",
            vec![
                FilterOption::new("active", "Active").with_color("#10b981"),
                FilterOption::new("inactive", "Inactive"),
                FilterOption::new("discharged", "Discharged"),
            ],
        )?,
        FilterConfig::command(
            "class",
            "Encounter class",
            vec![
                FilterOption::new("inpatient", "Inpatient"),
                FilterOption::new("outpatient", "Outpatient"),
                FilterOption::new("emergency", "Emergency"),
                FilterOption::new("home_health", "Home health"),
            ],
        )?
        .with_mode(FilterMode::Multi),
        FilterConfig::tag("tags", "Patient tags", TagResource::new(TAG_RESOURCE))?
            .with_operation_key("tags_op"),
        FilterConfig::date("admitted", "Admitted")?.with_operation_key("admitted_op"),
    ])
}

/// An in-memory tag hierarchy standing in for the tag lookup endpoint.
pub fn demo_tag_source() -> InMemoryTagSource {
    InMemoryTagSource::new(vec![
        TagNode::group("wards", "Wards"),
        TagNode::leaf("icu", "ICU").with_parent("wards"),
        TagNode::leaf("er", "ER").with_parent("wards"),
        TagNode::leaf("ward_b", "Ward B").with_parent("wards"),
        TagNode::group("programs", "Programs"),
        TagNode::leaf("dialysis", "Dialysis").with_parent("programs"),
        TagNode::leaf("oncology", "Oncology").with_parent("programs"),
        TagNode::leaf("vip", "VIP"),
        TagNode::leaf("isolation", "Isolation"),
    ])
}
