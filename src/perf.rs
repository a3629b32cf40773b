use std::cell::Cell;
use std::sync::OnceLock;
use std::time::Instant;

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
}

static SLOW_OP_THRESHOLD_MS: OnceLock<u64> = OnceLock::new();

/// 慢操作阈值（毫秒）
///
/// - `PROPERTY_VALUATION_SLOW_MS=50` 配置阈值
/// - `PROPERTY_VALUATION_SLOW_MS=off` 关闭慢操作告警
/// - 未配置时 Debug 为 200ms，Release 为 1000ms
fn slow_threshold_ms() -> u64 {
    *SLOW_OP_THRESHOLD_MS.get_or_init(|| match std::env::var("PROPERTY_VALUATION_SLOW_MS") {
        // 非数字视为关闭
        Ok(v) => v.trim().parse::<u64>().unwrap_or(0),
        Err(_) => {
            if cfg!(debug_assertions) {
                200
            } else {
                1000
            }
        }
    })
}

/// 性能统计 Guard：记录 elapsed_ms + 处理条数 + 嵌套深度
///
/// 使用方式：
/// ```ignore
/// let _perf = property_valuation::perf::PerfGuard::with_items("batch_valuation", 20);
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    items: usize,
    depth: u32,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self::with_items(op, 0)
    }

    pub fn with_items(op: &'static str, items: usize) -> Self {
        let depth = PERF_DEPTH.with(|d| {
            let next = d.get().saturating_add(1);
            d.set(next);
            next
        });
        Self {
            op,
            start: Instant::now(),
            items,
            depth,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();

        tracing::info!(
            target: "perf",
            op = self.op,
            elapsed_ms,
            items = self.items,
            depth = self.depth,
            "done"
        );

        let threshold = slow_threshold_ms();
        if threshold > 0 && elapsed_ms >= threshold {
            tracing::warn!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                threshold_ms = threshold,
                "slow operation"
            );
        }

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guards_track_nesting_depth() {
        let outer = PerfGuard::new("outer");
        assert_eq!(outer.depth, 1);
        {
            let inner = PerfGuard::with_items("inner", 3);
            assert_eq!(inner.depth, 2);
            assert_eq!(inner.items, 3);
        }
        let sibling = PerfGuard::new("sibling");
        assert_eq!(sibling.depth, 2);
        drop(sibling);
        drop(outer);

        assert_eq!(PERF_DEPTH.with(|d| d.get()), 0);
    }
}
