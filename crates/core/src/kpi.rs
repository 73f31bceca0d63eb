use serde::Serialize;
use storage::models::Kpi;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCards {
    pub total_reviews: String,
    pub nps: String,
    pub nps_trending_up: bool,
    pub nps_delta: String,
    pub nps_delta_good: bool,
    pub model_quality: String,
}

fn signed_percent(value: i32) -> String {
    if value > 0 {
        format!("+{value}%")
    } else {
        format!("{value}%")
    }
}

pub fn cards(kpi: &Kpi) -> KpiCards {
    KpiCards {
        total_reviews: kpi.total_reviews.to_string(),
        nps: signed_percent(kpi.nps),
        nps_trending_up: kpi.nps > 0,
        nps_delta: format!("{} за неделю", signed_percent(kpi.nps_delta)),
        nps_delta_good: kpi.nps_delta >= 0,
        model_quality: format!("{}%", kpi.avg_confidence),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_nps_has_no_plus_sign() {
        let c = cards(&Kpi {
            total_reviews: 1240,
            nps: -15,
            nps_delta: -2,
            avg_confidence: 89,
        });
        assert_eq!(c.nps, "-15%");
        assert!(!c.nps_trending_up);
        assert_eq!(c.nps_delta, "-2% за неделю");
        assert!(!c.nps_delta_good);
        assert_eq!(c.model_quality, "89%");
    }

    #[test]
    fn zero_delta_counts_as_good_but_unsigned() {
        let c = cards(&Kpi {
            total_reviews: 0,
            nps: 42,
            nps_delta: 0,
            avg_confidence: 0,
        });
        assert_eq!(c.nps, "+42%");
        assert_eq!(c.nps_delta, "0% за неделю");
        assert!(c.nps_delta_good);
    }
}
