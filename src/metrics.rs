use std::{
    collections::BTreeMap,
    sync::{Mutex, MutexGuard, OnceLock},
};

static METRICS: OnceLock<Mutex<MetricsState>> = OnceLock::new();

#[derive(Default)]
struct MetricsState {
    total: u64,
    errors: u64,
    per_endpoint: BTreeMap<&'static str, u64>,
    per_endpoint_err: BTreeMap<&'static str, u64>,
    // 上游成功/失败与时延统计（毫秒）
    upstream_ok: u64,
    upstream_err: u64,
    upstream_latency_sum_ms: u128,
    // 简易直方图分桶（毫秒）：<50, <100, <250, <500, <1000, >=1000
    upstream_hist_buckets: [u64; 6],
    // 表单提交
    submissions_total: u64,
    submissions_rejected: u64,
    submissions_failed: u64,
    rwa_degraded: u64,
    stats_degraded: u64,
}

fn state() -> MutexGuard<'static, MetricsState> {
    let lock = METRICS.get_or_init(|| Mutex::new(MetricsState::default()));
    match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(), // 避免因锁污染导致 panic
    }
}

pub fn count_ok(endpoint: &'static str) {
    let mut s = state();
    s.total += 1;
    *s.per_endpoint.entry(endpoint).or_insert(0) += 1;
}

pub fn count_err(endpoint: &'static str) {
    let mut s = state();
    s.total += 1;
    s.errors += 1;
    *s.per_endpoint.entry(endpoint).or_insert(0) += 1;
    *s.per_endpoint_err.entry(endpoint).or_insert(0) += 1;
}

pub fn observe_upstream_latency_ms(latency_ms: u128, ok: bool) {
    let mut s = state();
    if ok {
        s.upstream_ok += 1;
    } else {
        s.upstream_err += 1;
    }
    s.upstream_latency_sum_ms += latency_ms;
    let b = if latency_ms < 50 {
        0
    } else if latency_ms < 100 {
        1
    } else if latency_ms < 250 {
        2
    } else if latency_ms < 500 {
        3
    } else if latency_ms < 1000 {
        4
    } else {
        5
    };
    s.upstream_hist_buckets[b] += 1;
}

pub fn inc_submission() {
    state().submissions_total += 1;
}

pub fn inc_submission_rejected() {
    state().submissions_rejected += 1;
}

pub fn inc_submission_failed() {
    state().submissions_failed += 1;
}

pub fn inc_rwa_degraded() {
    state().rwa_degraded += 1;
}

pub fn inc_stats_degraded() {
    state().stats_degraded += 1;
}

pub fn render_prometheus() -> String {
    let s = state();
    let mut out = String::new();
    out.push_str("# HELP guardianx_requests_total Total upstream requests\n");
    out.push_str("# TYPE guardianx_requests_total counter\n");
    out.push_str(&format!("guardianx_requests_total {}\n", s.total));

    out.push_str("# HELP guardianx_errors_total Total failed upstream requests\n");
    out.push_str("# TYPE guardianx_errors_total counter\n");
    out.push_str(&format!("guardianx_errors_total {}\n", s.errors));

    out.push_str("# HELP guardianx_endpoint_requests_total Requests per endpoint\n");
    out.push_str("# TYPE guardianx_endpoint_requests_total counter\n");
    for (k, v) in s.per_endpoint.iter() {
        out.push_str(&format!(
            "guardianx_endpoint_requests_total{{endpoint=\"{}\"}} {}\n",
            k, v
        ));
    }

    out.push_str("# HELP guardianx_endpoint_errors_total Errors per endpoint\n");
    out.push_str("# TYPE guardianx_endpoint_errors_total counter\n");
    for (k, v) in s.per_endpoint_err.iter() {
        out.push_str(&format!(
            "guardianx_endpoint_errors_total{{endpoint=\"{}\"}} {}\n",
            k, v
        ));
    }

    // 上游统计
    out.push_str("# HELP guardianx_upstream_requests_total Upstream requests by result\n");
    out.push_str("# TYPE guardianx_upstream_requests_total counter\n");
    out.push_str(&format!(
        "guardianx_upstream_requests_total{{result=\"ok\"}} {}\n",
        s.upstream_ok
    ));
    out.push_str(&format!(
        "guardianx_upstream_requests_total{{result=\"err\"}} {}\n",
        s.upstream_err
    ));

    out.push_str("# HELP guardianx_upstream_latency_ms_sum Sum of upstream latency in ms\n");
    out.push_str("# TYPE guardianx_upstream_latency_ms_sum counter\n");
    out.push_str(&format!(
        "guardianx_upstream_latency_ms_sum {}\n",
        s.upstream_latency_sum_ms
    ));

    out.push_str("# HELP guardianx_upstream_latency_ms_bucket Upstream latency histogram buckets\n");
    out.push_str("# TYPE guardianx_upstream_latency_ms_bucket histogram\n");
    let bounds = [50, 100, 250, 500, 1000];
    let mut cumulative = 0u64;
    for (i, bound) in bounds.iter().enumerate() {
        cumulative += s.upstream_hist_buckets[i];
        out.push_str(&format!(
            "guardianx_upstream_latency_ms_bucket{{le=\"{}\"}} {}\n",
            bound, cumulative
        ));
    }
    // +Inf 桶
    out.push_str(&format!(
        "guardianx_upstream_latency_ms_bucket{{le=\"+Inf\"}} {}\n",
        s.upstream_hist_buckets.iter().sum::<u64>()
    ));

    out.push_str("# HELP guardianx_submissions_total Form submissions by outcome\n");
    out.push_str("# TYPE guardianx_submissions_total counter\n");
    out.push_str(&format!(
        "guardianx_submissions_total{{outcome=\"all\"}} {}\n",
        s.submissions_total
    ));
    out.push_str(&format!(
        "guardianx_submissions_total{{outcome=\"rejected\"}} {}\n",
        s.submissions_rejected
    ));
    out.push_str(&format!(
        "guardianx_submissions_total{{outcome=\"failed\"}} {}\n",
        s.submissions_failed
    ));

    out.push_str("# HELP guardianx_degraded_total Non-fatal lookups that fell back to placeholders\n");
    out.push_str("# TYPE guardianx_degraded_total counter\n");
    out.push_str(&format!(
        "guardianx_degraded_total{{lookup=\"rwa\"}} {}\n",
        s.rwa_degraded
    ));
    out.push_str(&format!(
        "guardianx_degraded_total{{lookup=\"stats\"}} {}\n",
        s.stats_degraded
    ));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_counters() {
        count_ok("metrics_test_endpoint");
        count_err("metrics_test_endpoint");
        observe_upstream_latency_ms(120, true);
        inc_rwa_degraded();

        let out = render_prometheus();
        assert!(out.contains("guardianx_endpoint_requests_total{endpoint=\"metrics_test_endpoint\"}"));
        assert!(out.contains("guardianx_endpoint_errors_total{endpoint=\"metrics_test_endpoint\"}"));
        assert!(out.contains("guardianx_upstream_latency_ms_bucket{le=\"+Inf\"}"));
        assert!(out.contains("guardianx_degraded_total{lookup=\"rwa\"}"));
    }

    #[test]
    fn test_histogram_is_cumulative() {
        observe_upstream_latency_ms(10, true);
        observe_upstream_latency_ms(2000, false);
        let out = render_prometheus();
        let le_1000: u64 = out
            .lines()
            .find(|l| l.starts_with("guardianx_upstream_latency_ms_bucket{le=\"1000\"}"))
            .and_then(|l| l.rsplit(' ').next())
            .and_then(|v| v.parse().ok())
            .unwrap();
        let le_inf: u64 = out
            .lines()
            .find(|l| l.starts_with("guardianx_upstream_latency_ms_bucket{le=\"+Inf\"}"))
            .and_then(|l| l.rsplit(' ').next())
            .and_then(|v| v.parse().ok())
            .unwrap();
        assert!(le_inf > le_1000);
    }
}
