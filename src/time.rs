//! Monotonic time source for non-blocking animation
//!
//! [`Animator`](crate::animation::Animator) derives the current frame from
//! elapsed wall time, so it needs a millisecond counter. The counter may
//! wrap; elapsed time is computed with wrapping subtraction.

/// Monotonic millisecond clock
pub trait Clock {
    /// Milliseconds since an arbitrary epoch
    fn now_ms(&self) -> u32;
}

impl<F> Clock for F
where
    F: Fn() -> u32,
{
    fn now_ms(&self) -> u32 {
        self()
    }
}
