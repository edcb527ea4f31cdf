use crate::types::{Advice, ForecastOutcome};

/// Compare the latest observed price with the next projected price.
///
/// Returns `None` when either price is zero, since no percentage change can be
/// reported against it.
pub fn advise(last_price: f64, next_price: f64) -> Option<Advice> {
    if last_price == 0.0 || next_price == 0.0 || !last_price.is_finite() || !next_price.is_finite() {
        return None;
    }

    let change_pct = (next_price - last_price) / last_price * 100.0;

    let advice = if next_price > last_price {
        Advice::Hold { change_pct }
    } else if next_price < last_price {
        Advice::Sell { change_pct }
    } else {
        Advice::Stable
    };

    Some(advice)
}

/// Advice for a completed forecast run.
pub fn advise_outcome(outcome: &ForecastOutcome) -> Option<Advice> {
    let last = outcome.historical.last()?.price;
    let next = outcome.forecast.first()?.price as f64;
    advise(last, next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advise_hold() {
        match advise(100.0, 105.0) {
            Some(Advice::Hold { change_pct }) => assert!((change_pct - 5.0).abs() < 1e-9),
            other => panic!("expected hold, got {:?}", other),
        }
    }

    #[test]
    fn test_advise_sell() {
        match advise(200.0, 190.0) {
            Some(Advice::Sell { change_pct }) => assert!((change_pct + 5.0).abs() < 1e-9),
            other => panic!("expected sell, got {:?}", other),
        }
    }

    #[test]
    fn test_advise_stable() {
        assert_eq!(advise(150.0, 150.0), Some(Advice::Stable));
    }

    #[test]
    fn test_advise_zero_prices() {
        assert_eq!(advise(0.0, 100.0), None);
        assert_eq!(advise(100.0, 0.0), None);
    }
}
