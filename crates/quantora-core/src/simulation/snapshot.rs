//! One-shot samplers for status queries and per-pattern streams

use super::uniform;
use crate::{ConfidenceTrend, GenerationError, LivePattern, PatternPerformance, SystemStatus};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

const LIVE_CREATORS: &[&str] = &["claude-3.5", "quantora-ai", "evolutionary"];
const TRENDS: &[ConfidenceTrend] = &[
    ConfidenceTrend::Increasing,
    ConfidenceTrend::Stable,
    ConfidenceTrend::Decreasing,
];

/// Aggregate status reported to a `request_status` query
pub fn sample_system_status<R: Rng + ?Sized>(
    rng: &mut R,
    websocket_connections: usize,
) -> Result<SystemStatus, GenerationError> {
    Ok(SystemStatus {
        patterns_active: 50,
        ai_engines_running: 3,
        success_rate_peak: 88.5,
        discoveries_today: rng.gen_range(8..=15),
        system_health: uniform(rng, "system health", (96.5, 99.2))?,
        magic_level: "MAXIMUM".to_string(),
        websocket_connections,
    })
}

/// Figures pushed on a per-pattern performance stream
pub fn sample_pattern_performance<R: Rng + ?Sized>(
    rng: &mut R,
) -> Result<PatternPerformance, GenerationError> {
    Ok(PatternPerformance {
        success_rate_current: uniform(rng, "current success rate", (0.82, 0.89))?,
        trades_today: rng.gen_range(15..=35),
        profit_today: uniform(rng, "profit", (3.2, 7.8))?,
        confidence_trend: *TRENDS
            .choose(rng)
            .ok_or(GenerationError::EmptyPool("confidence trends"))?,
        status: "PERFORMING_EXCELLENTLY".to_string(),
    })
}

/// `count` freshly sampled live patterns, all stamped `now`
pub fn sample_live_patterns<R: Rng + ?Sized>(
    rng: &mut R,
    count: usize,
    now: DateTime<Utc>,
) -> Result<Vec<LivePattern>, GenerationError> {
    (1..=count)
        .map(|index| {
            Ok(LivePattern {
                pattern_id: Uuid::new_v4(),
                name: format!("Live Pattern {index}"),
                success_rate: uniform(rng, "success rate", (0.75, 0.89))?,
                sharpe_ratio: uniform(rng, "sharpe ratio", (1.2, 2.1))?,
                level: rng.gen_range(1..=3),
                max_drawdown: uniform(rng, "max drawdown", (0.02, 0.08))?,
                status: "live".to_string(),
                creator_ai: LIVE_CREATORS
                    .choose(rng)
                    .ok_or(GenerationError::EmptyPool("live creators"))?
                    .to_string(),
                created_at: now,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_system_status_reports_connection_count() {
        let mut rng = StdRng::seed_from_u64(1);
        let status = sample_system_status(&mut rng, 7).unwrap();

        assert_eq!(status.websocket_connections, 7);
        assert_eq!(status.patterns_active, 50);
        assert_eq!(status.ai_engines_running, 3);
        assert!((8..=15).contains(&status.discoveries_today));
        assert!((96.5..=99.2).contains(&status.system_health));
    }

    #[test]
    fn test_pattern_performance_bounds() {
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..50 {
            let perf = sample_pattern_performance(&mut rng).unwrap();
            assert!((0.82..=0.89).contains(&perf.success_rate_current));
            assert!((15..=35).contains(&perf.trades_today));
            assert!((3.2..=7.8).contains(&perf.profit_today));
            assert_eq!(perf.status, "PERFORMING_EXCELLENTLY");
        }
    }

    #[test]
    fn test_live_patterns_are_numbered() {
        let mut rng = StdRng::seed_from_u64(3);
        let now = Utc::now();
        let patterns = sample_live_patterns(&mut rng, 10, now).unwrap();

        assert_eq!(patterns.len(), 10);
        assert_eq!(patterns[0].name, "Live Pattern 1");
        assert_eq!(patterns[9].name, "Live Pattern 10");
        assert!(patterns.iter().all(|p| p.created_at == now && p.status == "live"));
        assert!(patterns.iter().all(|p| (1..=3).contains(&p.level)));
        assert!(patterns
            .iter()
            .all(|p| LIVE_CREATORS.contains(&p.creator_ai.as_str())));
    }
}
