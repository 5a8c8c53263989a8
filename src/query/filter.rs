//! Backend filter construction.

/// Scope a query to one workload, then append the caller's fragment.
///
/// Neither the service name nor the fragment is escaped; the fragment is
/// handed to the backend parser as written.
pub fn build_filter(resource_type: &str, service: &str, fragment: &str) -> String {
    let mut filter = format!(
        r#"resource.type="{resource_type}" resource.labels.service_name="{service}""#
    );
    if !fragment.is_empty() {
        filter.push(' ');
        filter.push_str(fragment);
    }
    filter
}
