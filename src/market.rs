//! Cosmetic drift of the investment return labels.

use rand::Rng;

use crate::config::MarketConfig;

/// Fires once per configured interval of tick time, like a beat clock.
pub struct MarketTicker {
    interval_ms: f64,
    start_ms: f64,
    last_fired: i64,
}

impl MarketTicker {
    pub fn new(interval_ms: u32, now: f64) -> Self {
        Self { interval_ms: interval_ms as f64, start_ms: now, last_fired: 0 }
    }

    /// Number of intervals that elapsed since the previous call.
    pub fn due(&mut self, now: f64) -> u32 {
        if self.interval_ms <= 0.0 {
            return 0;
        }
        let idx = ((now - self.start_ms) / self.interval_ms).floor() as i64;
        if idx <= self.last_fired {
            return 0;
        }
        let fired = idx - self.last_fired;
        self.last_fired = idx;
        fired as u32
    }
}

/// Parses a label like `+12.5%`. Anything else is `None`.
pub fn parse_return(label: &str) -> Option<f64> {
    let value: f64 = label.trim().trim_end_matches('%').trim_start_matches('+').parse().ok()?;
    value.is_finite().then_some(value)
}

pub fn format_return(value: f64) -> String {
    format!("+{value:.1}%")
}

/// One label after a market move.
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnMove {
    pub index: usize,
    pub text: String,
    pub rising: bool,
}

/// Randomly moves some of `labels`. Unparsable labels are left untouched.
pub fn drift<R: Rng + ?Sized>(labels: &[String], cfg: &MarketConfig, rng: &mut R) -> Vec<ReturnMove> {
    let mut moves = Vec::new();
    for (index, label) in labels.iter().enumerate() {
        if !rng.gen_bool(cfg.change_chance) {
            continue;
        }
        let Some(current) = parse_return(label) else {
            log::debug!("skipping unparsable return label {:?}", label);
            continue;
        };
        let change = rng.gen_range(-cfg.max_delta..=cfg.max_delta);
        let next = (current + change).max(0.0);
        moves.push(ReturnMove { index, text: format_return(next), rising: change > 0.0 });
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn ticker_fires_once_per_interval() {
        let mut t = MarketTicker::new(5_000, 100.0);
        assert_eq!(t.due(4_000.0), 0);
        assert_eq!(t.due(5_100.0), 1);
        assert_eq!(t.due(6_000.0), 0);
        assert_eq!(t.due(20_100.0), 3);
    }

    #[test]
    fn zero_interval_never_fires() {
        let mut t = MarketTicker::new(0, 0.0);
        assert_eq!(t.due(1.0), 0);
        assert_eq!(t.due(60_000.0), 0);
    }

    #[test]
    fn parses_labels() {
        assert_eq!(parse_return("+12.5%"), Some(12.5));
        assert_eq!(parse_return(" 3% "), Some(3.0));
        assert_eq!(parse_return("N/A"), None);
        assert_eq!(parse_return("+inf%"), None);
        assert_eq!(format_return(4.04), "+4.0%");
    }

    #[test]
    fn drift_stays_bounded_and_non_negative() {
        let cfg = MarketConfig { change_chance: 1.0, ..MarketConfig::default() };
        let labels: Vec<String> = vec!["+0.1%".into(), "+8.0%".into(), "oops".into()];
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let moves = drift(&labels, &cfg, &mut rng);
            assert_eq!(moves.len(), 2);
            for m in moves {
                let v = parse_return(&m.text).unwrap();
                let before = parse_return(&labels[m.index]).unwrap();
                assert!(v >= 0.0);
                assert!((v - before).abs() <= 0.2 + 0.05);
            }
        }
    }

    #[test]
    fn zero_chance_moves_nothing() {
        let cfg = MarketConfig { change_chance: 0.0, ..MarketConfig::default() };
        let labels = vec!["+5.0%".to_string(); 10];
        let mut rng = StdRng::seed_from_u64(1);
        assert!(drift(&labels, &cfg, &mut rng).is_empty());
    }
}
