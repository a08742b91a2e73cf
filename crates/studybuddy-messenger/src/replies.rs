//! Canned replies with a random "typing" delay.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use studybuddy_config::MessengerConfig;

pub const DEFAULT_REPLIES: &[&str] = &[
    "That's interesting!",
    "Can you tell me more?",
    "I agree with you.",
    "Let's catch up later.",
    "Cool!",
    "Got it, thanks.",
    "I'm here to help!",
    "Tell me more about that.",
];

#[derive(Debug, Clone)]
pub struct ReplySimulator {
    replies: Vec<String>,
    min_delay: Duration,
    max_delay: Duration,
}

impl ReplySimulator {
    /// An empty reply list falls back to [`DEFAULT_REPLIES`]. Bounds given
    /// in the wrong order are swapped.
    pub fn new(replies: Vec<String>, min_delay: Duration, max_delay: Duration) -> Self {
        let replies = if replies.is_empty() {
            DEFAULT_REPLIES.iter().map(|s| s.to_string()).collect()
        } else {
            replies
        };
        let (min_delay, max_delay) = if min_delay <= max_delay {
            (min_delay, max_delay)
        } else {
            (max_delay, min_delay)
        };
        Self {
            replies,
            min_delay,
            max_delay,
        }
    }

    pub fn from_config(config: &MessengerConfig) -> Self {
        Self::new(
            config.canned_replies.clone(),
            Duration::from_millis(config.reply_delay_min_ms),
            Duration::from_millis(config.reply_delay_max_ms),
        )
    }

    pub fn replies(&self) -> &[String] {
        &self.replies
    }

    pub fn pick_reply<R: Rng>(&self, rng: &mut R) -> String {
        self.replies
            .choose(rng)
            .cloned()
            .unwrap_or_default()
    }

    pub fn pick_delay<R: Rng>(&self, rng: &mut R) -> Duration {
        rng.gen_range(self.min_delay..=self.max_delay)
    }

    /// Wait a random delay, then produce a reply.
    pub async fn next_reply(&self) -> String {
        let (reply, delay) = {
            let mut rng = rand::thread_rng();
            (self.pick_reply(&mut rng), self.pick_delay(&mut rng))
        };
        tokio::time::sleep(delay).await;
        reply
    }
}

impl Default for ReplySimulator {
    fn default() -> Self {
        Self::from_config(&MessengerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn defaults_to_eight_replies() {
        let sim = ReplySimulator::default();
        assert_eq!(sim.replies().len(), 8);
    }

    #[test]
    fn delays_stay_within_bounds() {
        let sim = ReplySimulator::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let d = sim.pick_delay(&mut rng);
            assert!(d >= Duration::from_millis(1000) && d <= Duration::from_millis(3000));
        }
    }

    #[test]
    fn replies_come_from_pool() {
        let sim = ReplySimulator::new(
            vec!["yes".into(), "no".into()],
            Duration::ZERO,
            Duration::ZERO,
        );
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let r = sim.pick_reply(&mut rng);
            assert!(r == "yes" || r == "no");
        }
    }

    #[test]
    fn inverted_bounds_are_swapped() {
        let sim = ReplySimulator::new(vec![], Duration::from_millis(50), Duration::from_millis(10));
        let mut rng = StdRng::seed_from_u64(3);
        let d = sim.pick_delay(&mut rng);
        assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(50));
    }

    #[tokio::test(start_paused = true)]
    async fn next_reply_waits_then_answers() {
        let sim = ReplySimulator::new(
            vec!["Cool!".into()],
            Duration::from_millis(1000),
            Duration::from_millis(1000),
        );
        let start = tokio::time::Instant::now();
        let reply = sim.next_reply().await;
        assert_eq!(reply, "Cool!");
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }
}
