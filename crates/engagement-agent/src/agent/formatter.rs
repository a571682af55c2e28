use super::domain::{Recommendation, RecommendedAction, UserId};

/// Builds the response shape with the score rounded to two decimal places,
/// halves rounding away from zero.
pub fn format_recommendation_output(
    user_id: UserId,
    action: RecommendedAction,
    score: f64,
) -> Recommendation {
    Recommendation {
        user_id,
        action,
        score: round_to_cents(score),
    }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_score_to_two_places() {
        let output = format_recommendation_output(UserId(1), RecommendedAction::SendMessage, 0.666);

        assert_eq!(output.user_id, UserId(1));
        assert_eq!(output.action, RecommendedAction::SendMessage);
        assert_eq!(output.score, 0.67);
    }

    #[test]
    fn halfway_scores_round_away_from_zero() {
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(-0.125), -0.13);
        assert_eq!(round_to_cents(0.375), 0.38);
    }

    #[test]
    fn scores_outside_unit_interval_pass_through() {
        assert_eq!(round_to_cents(1.5), 1.5);
        assert_eq!(round_to_cents(-0.004), -0.0);
        assert_eq!(round_to_cents(0.0), 0.0);
    }
}
