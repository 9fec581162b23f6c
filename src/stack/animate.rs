use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use crate::stack::gesture::Offset;

/// Settle time credited to the snap-back spring, which has no explicit
/// duration of its own.
pub const SPRING_SETTLE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transition {
    /// Critically damped spring toward a target offset.
    SpringTo { target: Offset },
    /// Fixed-duration move along a trajectory.
    TimingTo { target: Offset, duration: Duration },
    /// Accept gesture: scale to half, fade to nothing.
    ShrinkFade { duration: Duration },
    FadeIn { duration: Duration },
    FadeOut { duration: Duration },
}

impl Transition {
    pub fn duration(&self) -> Duration {
        match self {
            Transition::SpringTo { .. } => SPRING_SETTLE,
            Transition::TimingTo { duration, .. }
            | Transition::ShrinkFade { duration }
            | Transition::FadeIn { duration }
            | Transition::FadeOut { duration } => *duration,
        }
    }
}

pub type TransitionFuture = Pin<Box<dyn Future<Output = bool> + Send>>;

/// Runs a transition and resolves `true` once it finished. Gesture logic
/// awaits the future instead of nesting completion callbacks, and only
/// acts on a finished run.
pub trait Animator: Send + Sync {
    fn run(&self, transition: Transition) -> TransitionFuture;
}

/// Wall-clock driver: resolves after the transition's nominal duration.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimingAnimator;

impl Animator for TimingAnimator {
    fn run(&self, transition: Transition) -> TransitionFuture {
        let duration = transition.duration();
        Box::pin(async move {
            tokio::time::sleep(duration).await;
            true
        })
    }
}

/// Every transition completes immediately. For tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantAnimator;

impl Animator for InstantAnimator {
    fn run(&self, _transition: Transition) -> TransitionFuture {
        Box::pin(async { true })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nominal_durations() {
        assert_eq!(
            Transition::SpringTo {
                target: Offset::default()
            }
            .duration(),
            SPRING_SETTLE
        );
        assert_eq!(
            Transition::ShrinkFade {
                duration: Duration::from_millis(800)
            }
            .duration(),
            Duration::from_millis(800)
        );
    }

    #[test]
    fn instant_animator_finishes() {
        let finished = tokio_test::block_on(InstantAnimator.run(Transition::FadeIn {
            duration: Duration::from_millis(500),
        }));
        assert!(finished);
    }

    #[tokio::test]
    async fn timing_animator_waits_out_the_duration() {
        let started = std::time::Instant::now();
        let finished = TimingAnimator
            .run(Transition::TimingTo {
                target: Offset::new(1200.0, 0.0),
                duration: Duration::from_millis(20),
            })
            .await;
        assert!(finished);
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
