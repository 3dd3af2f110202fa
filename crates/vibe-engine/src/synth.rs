//! Recommendation synthesis
//!
//! Pure functions of the two optional payloads.

use vibe_core::{Action, Recommendation, SentimentSnapshot, TechnicalSnapshot, TradePlan};

/// Confidence used for a missing signal
const NEUTRAL_CONFIDENCE: f64 = 0.5;

const REASON_BOTH: &str = "Technical breakout confirmed by positive sentiment";
const REASON_TECHNICAL: &str = "Technical indicators show strength";
const REASON_SENTIMENT: &str = "Market sentiment is bullish";
const REASON_NONE: &str = "Insufficient data for strong recommendation";

/// Build the recommendation from whatever arrived
///
/// Confidence is the larger of the technical strength and the sentiment
/// confidence, each defaulting to 0.5. It is not clamped.
pub fn synthesize(
    technical: Option<&TechnicalSnapshot>,
    sentiment: Option<&SentimentSnapshot>,
) -> Recommendation {
    let strength = technical
        .and_then(|t| t.strength)
        .unwrap_or(NEUTRAL_CONFIDENCE);
    let sentiment_confidence = sentiment
        .and_then(|s| s.confidence)
        .unwrap_or(NEUTRAL_CONFIDENCE);

    let reasoning = match (technical.is_some(), sentiment.is_some()) {
        (true, true) => REASON_BOTH,
        (true, false) => REASON_TECHNICAL,
        (false, true) => REASON_SENTIMENT,
        (false, false) => REASON_NONE,
    };

    Recommendation::new(
        determine_action(technical, sentiment),
        strength.max(sentiment_confidence),
        reasoning,
    )
}

/// Copy price levels from a trade plan onto the recommendation
///
/// A plan written for a different direction is ignored; a plan without a
/// direction is taken as agreeing.
pub fn apply_trade_plan(
    mut recommendation: Recommendation,
    plan: Option<&TradePlan>,
) -> Recommendation {
    let Some(plan) = plan else {
        return recommendation;
    };
    if plan.action.is_some_and(|action| action != recommendation.action) {
        return recommendation;
    }

    recommendation.entry_price = plan.entry_price;
    recommendation.stop_loss = plan.stop_loss;
    recommendation.take_profit = plan.take_profit;
    recommendation.position_size.clone_from(&plan.position_size);
    recommendation
}

/// Direction from the trend and sentiment labels
///
/// Bullish signals score +1, bearish -1, anything else 0. A positive sum
/// buys, a negative one sells, zero holds.
pub fn determine_action(
    technical: Option<&TechnicalSnapshot>,
    sentiment: Option<&SentimentSnapshot>,
) -> Action {
    let trend = technical.and_then(|t| t.trend.as_deref()).map_or(0, label_score);
    let mood = sentiment
        .and_then(|s| s.market_sentiment.as_deref())
        .map_or(0, label_score);

    match trend + mood {
        score if score > 0 => Action::Buy,
        score if score < 0 => Action::Sell,
        _ => Action::Hold,
    }
}

fn label_score(label: &str) -> i32 {
    match label.trim().to_ascii_lowercase().as_str() {
        "uptrend" | "bullish" => 1,
        "downtrend" | "bearish" => -1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn technical(trend: &str, strength: Option<f64>) -> TechnicalSnapshot {
        TechnicalSnapshot {
            trend: Some(trend.to_string()),
            strength,
            ..Default::default()
        }
    }

    fn sentiment(mood: &str, confidence: Option<f64>) -> SentimentSnapshot {
        SentimentSnapshot {
            market_sentiment: Some(mood.to_string()),
            confidence,
            ..Default::default()
        }
    }

    #[test]
    fn test_reasoning_by_presence() {
        let t = technical("uptrend", Some(0.78));
        let s = sentiment("bullish", Some(0.72));

        assert_eq!(synthesize(Some(&t), Some(&s)).reasoning, REASON_BOTH);
        assert_eq!(synthesize(Some(&t), None).reasoning, REASON_TECHNICAL);
        assert_eq!(synthesize(None, Some(&s)).reasoning, REASON_SENTIMENT);
        assert_eq!(synthesize(None, None).reasoning, REASON_NONE);
    }

    #[test]
    fn test_confidence_is_max_with_neutral_default() {
        let t = technical("uptrend", Some(0.78));
        let s = sentiment("bullish", Some(0.72));

        assert_eq!(synthesize(Some(&t), Some(&s)).confidence, 0.78);
        assert_eq!(synthesize(Some(&t), None).confidence, 0.78);
        assert_eq!(synthesize(None, Some(&s)).confidence, 0.72);
        assert_eq!(synthesize(None, None).confidence, 0.5);

        let weak = technical("uptrend", Some(0.2));
        assert_eq!(synthesize(Some(&weak), None).confidence, 0.5);
    }

    #[test]
    fn test_confidence_not_clamped() {
        let t = technical("uptrend", Some(1.4));
        assert_eq!(synthesize(Some(&t), None).confidence, 1.4);
    }

    #[test]
    fn test_action_rule() {
        let up = technical("uptrend", None);
        let down = technical("downtrend", None);
        let bull = sentiment("bullish", None);
        let bear = sentiment("bearish", None);

        assert_eq!(determine_action(Some(&up), Some(&bull)), Action::Buy);
        assert_eq!(determine_action(Some(&down), Some(&bear)), Action::Sell);
        assert_eq!(determine_action(Some(&up), Some(&bear)), Action::Hold);
        assert_eq!(determine_action(None, Some(&bear)), Action::Sell);
        assert_eq!(determine_action(None, None), Action::Hold);

        let sideways = technical("sideways", None);
        assert_eq!(determine_action(Some(&sideways), None), Action::Hold);
    }

    fn long_plan() -> TradePlan {
        TradePlan {
            action: Some(Action::Buy),
            entry_price: Some(43_100.0),
            stop_loss: Some(42_200.0),
            take_profit: Some(45_000.0),
            position_size: Some("2.5%".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_agreeing_plan_adds_levels() {
        let t = technical("uptrend", Some(0.78));
        let recommendation = apply_trade_plan(synthesize(Some(&t), None), Some(&long_plan()));

        assert_eq!(recommendation.action, Action::Buy);
        assert_eq!(recommendation.entry_price, Some(43_100.0));
        assert_eq!(recommendation.stop_loss, Some(42_200.0));
        assert_eq!(recommendation.take_profit, Some(45_000.0));
        assert_eq!(recommendation.position_size.as_deref(), Some("2.5%"));
        assert_eq!(recommendation.confidence, 0.78);
    }

    #[test]
    fn test_conflicting_plan_is_ignored() {
        let t = technical("downtrend", None);
        let recommendation = apply_trade_plan(synthesize(Some(&t), None), Some(&long_plan()));

        assert_eq!(recommendation.action, Action::Sell);
        assert_eq!(recommendation.entry_price, None);
        assert_eq!(recommendation.position_size, None);
    }

    #[test]
    fn test_undirected_plan_applies() {
        let plan = TradePlan {
            action: None,
            ..long_plan()
        };
        let recommendation = apply_trade_plan(synthesize(None, None), Some(&plan));

        assert_eq!(recommendation.action, Action::Hold);
        assert_eq!(recommendation.stop_loss, Some(42_200.0));
        assert_eq!(apply_trade_plan(synthesize(None, None), None).stop_loss, None);
    }
}
