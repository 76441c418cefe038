use std::cmp::Ordering;
use crate::models::TestResult;

/// Safe comparison of floating point numbers, handling NaN values
pub fn safe_float_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Extract total average milliseconds from optional statistics, with default fallback
pub fn extract_total_avg_ms<T>(
    item: &T,
    extractor: impl Fn(&T) -> Option<f64>,
    default: f64,
) -> f64 {
    extractor(item).unwrap_or(default)
}

/// Create a comparator for finding minimum response times
pub fn min_response_time_comparator<T>(
    extractor: impl Fn(&T) -> f64,
) -> impl Fn(&T, &T) -> Ordering {
    move |a, b| safe_float_cmp(extractor(a), extractor(b))
}

/// Create a comparator for finding maximum response times
pub fn max_response_time_comparator<T>(
    extractor: impl Fn(&T) -> f64,
) -> impl Fn(&T, &T) -> Ordering {
    move |a, b| safe_float_cmp(extractor(a), extractor(b))
}

/// Extract total average milliseconds from TestResult statistics
pub fn extract_test_result_avg_ms(result: &TestResult) -> f64 {
    result.statistics.as_ref().map(|s| s.total_avg_ms).unwrap_or(f64::MAX)
}

/// Extract total average milliseconds from TestResult statistics with custom default
pub fn extract_test_result_avg_ms_with_default(result: &TestResult, default: f64) -> f64 {
    result.statistics.as_ref().map(|s| s.total_avg_ms).unwrap_or(default)
}

/// Create a comparator for TestResult tuples (&String, &TestResult) for minimum response time
pub fn test_result_min_comparator() -> impl Fn(&(&String, &TestResult), &(&String, &TestResult)) -> Ordering {
    |a, b| {
        let a_time = extract_test_result_avg_ms(a.1);
        let b_time = extract_test_result_avg_ms(b.1);
        safe_float_cmp(a_time, b_time)
    }
}

/// Create a comparator for TestResult tuples (&String, &TestResult) for maximum response time
pub fn test_result_max_comparator() -> impl Fn(&(&String, &TestResult), &(&String, &TestResult)) -> Ordering {
    |a, b| {
        let a_time = extract_test_result_avg_ms_with_default(a.1, 0.0);
        let b_time = extract_test_result_avg_ms_with_default(b.1, 0.0);
        safe_float_cmp(a_time, b_time)
    }
}
