//! Toast notifications and the stats counter animation

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast-success",
            Self::Error => "toast-error",
            Self::Info => "toast-info",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "fas fa-check",
            Self::Error => "fas fa-exclamation-circle",
            Self::Info => "fas fa-info-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

/// Pending toasts for one page render. Unbounded; each toast dismisses itself
/// after the queue's TTL regardless of the others.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
    ttl: Duration,
}

impl ToastQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            ttl,
        }
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toasts.push(Toast {
            kind,
            message: message.into(),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Success, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Error, message);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastKind::Info, message);
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Toast> {
        self.toasts.iter()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// Shortest delay between frames; timers reject a zero period
pub const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

/// Counts from 0 up to `target` in equal increments, one value per step,
/// ending exactly on `target`.
#[derive(Debug, Clone)]
pub struct CounterAnimation {
    target: u64,
    steps: u32,
    interval: Duration,
    step: u32,
}

impl CounterAnimation {
    pub fn new(target: u64, steps: u32, interval: Duration) -> Self {
        Self {
            target,
            steps: steps.max(1),
            interval: interval.max(MIN_FRAME_INTERVAL),
            step: 0,
        }
    }

    /// Delay between two frames
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wall time of the whole animation
    pub fn duration(&self) -> Duration {
        self.interval * self.steps
    }

    pub fn target(&self) -> u64 {
        self.target
    }
}

impl Iterator for CounterAnimation {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.step >= self.steps {
            return None;
        }
        self.step += 1;

        if self.step == self.steps {
            return Some(self.target);
        }
        let current = self.target as f64 * f64::from(self.step) / f64::from(self.steps);
        Some(current.floor() as u64)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.steps - self.step) as usize;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_ends_on_target() {
        let frames: Vec<u64> = CounterAnimation::new(7, 50, Duration::from_millis(20)).collect();
        assert_eq!(frames.len(), 50);
        assert_eq!(*frames.last().unwrap(), 7);
    }

    #[test]
    fn test_counter_is_linear_and_monotonic() {
        let frames: Vec<u64> = CounterAnimation::new(100, 4, Duration::from_millis(20)).collect();
        assert_eq!(frames, vec![25, 50, 75, 100]);

        let frames: Vec<u64> = CounterAnimation::new(3, 10, Duration::ZERO).collect();
        assert!(frames.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(frames[0], 0);
    }

    #[test]
    fn test_counter_zero_target_and_steps() {
        let frames: Vec<u64> = CounterAnimation::new(0, 5, Duration::ZERO).collect();
        assert_eq!(frames, vec![0; 5]);

        let frames: Vec<u64> = CounterAnimation::new(9, 0, Duration::ZERO).collect();
        assert_eq!(frames, vec![9]);
    }

    #[test]
    fn test_counter_duration() {
        let animation = CounterAnimation::new(10, 50, Duration::from_millis(20));
        assert_eq!(animation.duration(), Duration::from_secs(1));
    }

    #[test]
    fn test_counter_zero_interval_is_clamped() {
        let animation = CounterAnimation::new(10, 5, Duration::ZERO);
        assert_eq!(animation.interval(), MIN_FRAME_INTERVAL);
        assert_eq!(animation.duration(), Duration::from_millis(5));
    }

    #[tokio::test]
    async fn test_counter_interval_drives_a_timer() {
        let config = crate::config::Config {
            ui: crate::config::UiConfig {
                counter_interval_ms: 0,
                counter_steps: 3,
                ..Default::default()
            },
            ..Default::default()
        };
        let animation = CounterAnimation::new(6, config.ui.counter_steps, config.counter_interval());
        let mut ticker = tokio::time::interval(animation.interval());

        let mut frames = Vec::new();
        for value in animation {
            ticker.tick().await;
            frames.push(value);
        }
        assert_eq!(frames, vec![2, 4, 6]);
    }

    #[test]
    fn test_toast_queue_is_unbounded() {
        let mut toasts = ToastQueue::new(Duration::from_secs(3));
        for i in 0..100 {
            toasts.info(format!("toast {i}"));
        }
        toasts.error("Request failed: timeout");
        assert_eq!(toasts.len(), 101);
        assert_eq!(toasts.iter().last().unwrap().kind, ToastKind::Error);
    }
}
