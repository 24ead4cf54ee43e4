use std::sync::Once;

use metrics::{Unit, describe_counter};

pub const METRIC_QUERY_CACHE_HIT_TOTAL: &str = "wpbridge_query_cache_hit_total";
pub const METRIC_QUERY_CACHE_MISS_TOTAL: &str = "wpbridge_query_cache_miss_total";
pub const METRIC_QUERY_CACHE_EVICT_TOTAL: &str = "wpbridge_query_cache_evict_total";
pub const METRIC_CALL_FAILURE_TOTAL: &str = "wpbridge_call_failure_total";

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Register descriptions for the counters this crate emits.
///
/// Call after installing a metrics recorder; repeated calls are no-ops.
pub fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            METRIC_QUERY_CACHE_HIT_TOTAL,
            Unit::Count,
            "Total number of forwarded calls served from the query cache."
        );
        describe_counter!(
            METRIC_QUERY_CACHE_MISS_TOTAL,
            Unit::Count,
            "Total number of cacheable calls that missed the query cache."
        );
        describe_counter!(
            METRIC_QUERY_CACHE_EVICT_TOTAL,
            Unit::Count,
            "Total number of query cache evictions due to capacity."
        );
        describe_counter!(
            METRIC_CALL_FAILURE_TOTAL,
            Unit::Count,
            "Total number of failed WordPress API calls, by method."
        );
    });
}
