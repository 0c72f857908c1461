//! 时间预算与超时取消
//!
//! 搜索每进入一层递归都检查一次剩余时间，低于安全阈值时返回 [`Cancelled`]，
//! 由迭代加深驱动统一接住。

use std::time::{Duration, Instant};

use thiserror::Error;

/// 剩余时间查询接口
///
/// 由调用方在每次走棋时注入，搜索只读不写
pub trait TimeBudget {
    /// 本回合剩余毫秒数
    fn time_left_ms(&self) -> f64;
}

impl<F> TimeBudget for F
where
    F: Fn() -> f64,
{
    fn time_left_ms(&self) -> f64 {
        self()
    }
}

/// 基于截止时刻的时间预算
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    deadline: Instant,
}

impl Deadline {
    /// 截止于给定时刻
    pub fn at(deadline: Instant) -> Self {
        Self { deadline }
    }

    /// 从现在起 `limit` 之后截止
    pub fn after(limit: Duration) -> Self {
        Self::at(Instant::now() + limit)
    }

    /// 从现在起 `ms` 毫秒之后截止
    pub fn after_ms(ms: u64) -> Self {
        Self::after(Duration::from_millis(ms))
    }
}

impl TimeBudget for Deadline {
    fn time_left_ms(&self) -> f64 {
        let now = Instant::now();
        if now >= self.deadline {
            -(now.duration_since(self.deadline).as_secs_f64() * 1000.0)
        } else {
            self.deadline.duration_since(now).as_secs_f64() * 1000.0
        }
    }
}

/// 不限时
#[derive(Debug, Clone, Copy, Default)]
pub struct Unlimited;

impl TimeBudget for Unlimited {
    fn time_left_ms(&self) -> f64 {
        f64::INFINITY
    }
}

/// 搜索因超时被取消
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("search cancelled: time budget below threshold")]
pub struct Cancelled;

/// 超时守卫
pub struct TimeGuard<'a, T: ?Sized> {
    budget: &'a T,
    threshold_ms: f64,
}

impl<'a, T: TimeBudget + ?Sized> TimeGuard<'a, T> {
    pub fn new(budget: &'a T, threshold_ms: f64) -> Self {
        Self {
            budget,
            threshold_ms,
        }
    }

    /// 剩余时间低于阈值时返回 `Err(Cancelled)`
    #[inline]
    pub fn check(&self) -> Result<(), Cancelled> {
        if self.budget.time_left_ms() < self.threshold_ms {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    pub fn threshold_ms(&self) -> f64 {
        self.threshold_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_guard_threshold() {
        let remaining = Cell::new(100.0);
        let budget = || remaining.get();
        let guard = TimeGuard::new(&budget, 10.0);

        assert!(guard.check().is_ok());
        remaining.set(10.0);
        assert!(guard.check().is_ok());
        remaining.set(9.5);
        assert_eq!(guard.check(), Err(Cancelled));
    }

    #[test]
    fn test_deadline() {
        let budget = Deadline::after_ms(60_000);
        let left = budget.time_left_ms();
        assert!(left > 59_000.0 && left <= 60_000.0);

        let expired = Deadline::at(Instant::now() - Duration::from_millis(5));
        assert!(expired.time_left_ms() < 0.0);
    }

    #[test]
    fn test_unlimited() {
        let guard = TimeGuard::new(&Unlimited, 1_000_000.0);
        assert!(guard.check().is_ok());
    }
}
