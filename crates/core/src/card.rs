use serde::Serialize;

use crate::company::{display_value, CompanyRecord};

pub const NOT_AVAILABLE: &str = "N/A";

/// Rendered width of the card image, in CSS pixels.
pub const IMAGE_WIDTH: u32 = 200;

/// Placeholder family for a breakdown field when its key is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Points,
    Text,
    List,
}

impl FieldKind {
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Points => "0",
            Self::Text => NOT_AVAILABLE,
            Self::List => "None",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakdownField {
    pub label: &'static str,
    pub key: &'static str,
    pub kind: FieldKind,
}

const fn field(label: &'static str, key: &'static str, kind: FieldKind) -> BreakdownField {
    BreakdownField { label, key, kind }
}

/// Details panel rows in display order. Each row reads exactly one key.
///
/// "EPS Result" is the beat/miss verdict, "EPS Points" the points it earned.
pub const BREAKDOWN_FIELDS: [BreakdownField; 8] = [
    field("EPS Result", "eps_result", FieldKind::Text),
    field("EPS Points", "eps", FieldKind::Points),
    field("Revenue Points", "revenue", FieldKind::Points),
    field("Guidance Points", "guidance_score", FieldKind::Points),
    field("Daily Change Points", "daily_pct_change", FieldKind::Points),
    field("Monthly Change Points", "monthly_price_change", FieldKind::Points),
    field("Bonus Points", "bonus", FieldKind::Points),
    field("Tags", "tags", FieldKind::List),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailLine {
    pub label: &'static str,
    pub value: String,
}

impl DetailLine {
    pub fn text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardImage {
    pub src: Option<String>,
    pub alt: String,
    pub ticker: String,
    pub placeholder: String,
}

impl CardImage {
    /// Source to load first; cards without an image start on the placeholder.
    pub fn initial_src(&self) -> &str {
        self.src.as_deref().unwrap_or(&self.placeholder)
    }
}

/// Everything a container needs to draw one company.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyCard {
    pub title: String,
    pub subtitle: Option<String>,
    pub earnings: String,
    pub image: CardImage,
    pub score_label: String,
    pub details: Vec<DetailLine>,
}

impl CompanyCard {
    pub fn from_record(record: &CompanyRecord) -> Self {
        let title = record.label().to_string();
        let ticker = record.ticker_text().to_string();

        let earnings = display_value(record.earnings_date.as_ref())
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let score = display_value(record.score.as_ref()).unwrap_or_else(|| "0".to_string());

        let details = BREAKDOWN_FIELDS
            .iter()
            .map(|field| DetailLine {
                label: field.label,
                value: display_value(
                    record
                        .breakdown
                        .as_ref()
                        .and_then(|breakdown| breakdown.get(field.key)),
                )
                .unwrap_or_else(|| field.kind.placeholder().to_string()),
            })
            .collect();

        Self {
            subtitle: record
                .industry
                .as_deref()
                .map(str::trim)
                .filter(|industry| !industry.is_empty())
                .map(str::to_string),
            earnings: format!("Earnings: {earnings}"),
            image: CardImage {
                src: record
                    .image_url
                    .as_deref()
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .map(str::to_string),
                alt: title.clone(),
                placeholder: placeholder_image(&ticker),
                ticker,
            },
            score_label: format!("Score: {score}"),
            details,
            title,
        }
    }
}

/// Open/closed state of a card's details panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelVisibility {
    #[default]
    Hidden,
    Visible,
}

impl PanelVisibility {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Hidden => Self::Visible,
            Self::Visible => Self::Hidden,
        }
    }

    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }

    pub const fn css_display(self) -> &'static str {
        match self {
            Self::Hidden => "none",
            Self::Visible => "block",
        }
    }

    /// Reads the state back from an inline `display` value. Anything but `block` is hidden.
    pub fn from_css_display(display: &str) -> Self {
        if display.trim() == "block" {
            Self::Visible
        } else {
            Self::Hidden
        }
    }
}

/// Inline SVG data URL showing the ticker on a grey square.
pub fn placeholder_image(ticker: &str) -> String {
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}"><rect width="100%" height="100%" fill="#ccc"/><text x="50%" y="50%" text-anchor="middle" dy=".3em" fill="#999">{text}</text></svg>"##,
        size = IMAGE_WIDTH,
        text = xml_escape(ticker),
    );
    format!("data:image/svg+xml,{}", data_uri_escape(&svg))
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn data_uri_escape(s: &str) -> String {
    s.replace('%', "%25")
        .replace('#', "%23")
        .replace('<', "%3C")
        .replace('>', "%3E")
        .replace('"', "%22")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company::Breakdown;
    use serde_json::json;

    #[test]
    fn bare_record_gets_every_placeholder() {
        let card = CompanyCard::from_record(&CompanyRecord::default());

        assert_eq!(card.title, "");
        assert_eq!(card.subtitle, None);
        assert_eq!(card.earnings, "Earnings: N/A");
        assert_eq!(card.score_label, "Score: 0");
        assert_eq!(card.image.src, None);
        assert_eq!(card.image.initial_src(), card.image.placeholder);

        let values = card
            .details
            .iter()
            .map(|line| (line.label, line.value.as_str()))
            .collect::<Vec<_>>();
        assert_eq!(
            values,
            vec![
                ("EPS Result", "N/A"),
                ("EPS Points", "0"),
                ("Revenue Points", "0"),
                ("Guidance Points", "0"),
                ("Daily Change Points", "0"),
                ("Monthly Change Points", "0"),
                ("Bonus Points", "0"),
                ("Tags", "None"),
            ]
        );
    }

    #[test]
    fn eps_result_and_eps_points_read_different_keys() {
        let breakdown = [
            ("eps_result", json!("Beat")),
            ("eps", json!(3)),
        ]
        .into_iter()
        .collect::<Breakdown>();
        let record = CompanyRecord {
            breakdown: Some(breakdown),
            ..CompanyRecord::new(1, "Apple", "AAPL")
        };

        let card = CompanyCard::from_record(&record);

        assert_eq!(card.details[0].text(), "EPS Result: Beat");
        assert_eq!(card.details[1].text(), "EPS Points: 3");
    }

    #[test]
    fn result_only_breakdown_leaves_points_at_zero() {
        let mut breakdown = Breakdown::default();
        breakdown.insert("eps_result", "Miss");
        let record = CompanyRecord {
            breakdown: Some(breakdown),
            ..CompanyRecord::default()
        };

        let card = CompanyCard::from_record(&record);

        assert_eq!(card.details[0].value, "Miss");
        assert_eq!(card.details[1].value, "0");
    }

    #[test]
    fn populated_record_fills_every_line() {
        let record: CompanyRecord = serde_json::from_value(json!({
            "id": 4,
            "name": "Amazon",
            "ticker": "AMZN",
            "industry": "Retail",
            "earningsDate": "2026-02-05",
            "imageUrl": "img/amzn.png",
            "score": "14.5",
            "breakdown": {
                "eps_result": "Beat",
                "eps": 5,
                "revenue": 2,
                "guidance_score": -1,
                "daily_pct_change": 3.2,
                "monthly_price_change": 1,
                "bonus": 4,
                "tags": ["beat", "raise"]
            }
        }))
        .unwrap();

        let card = CompanyCard::from_record(&record);

        assert_eq!(card.title, "Amazon");
        assert_eq!(card.subtitle.as_deref(), Some("Retail"));
        assert_eq!(card.earnings, "Earnings: 2026-02-05");
        assert_eq!(card.score_label, "Score: 14.5");
        assert_eq!(card.image.initial_src(), "img/amzn.png");
        assert_eq!(card.image.alt, "Amazon");
        assert_eq!(card.details[5].text(), "Monthly Change Points: 1");
        assert_eq!(card.details[7].text(), "Tags: beat, raise");
    }

    #[test]
    fn title_falls_back_to_ticker() {
        let record = CompanyRecord {
            ticker: Some("NVDA".to_string()),
            ..CompanyRecord::default()
        };

        let card = CompanyCard::from_record(&record);

        assert_eq!(card.title, "NVDA");
        assert_eq!(card.image.alt, "NVDA");
    }

    #[test]
    fn placeholder_embeds_escaped_ticker() {
        let url = placeholder_image("AAPL");
        assert!(url.starts_with("data:image/svg+xml,"));
        assert!(url.contains("AAPL"));
        assert!(!url.contains('#'));

        let url = placeholder_image("A<B");
        assert!(url.contains("A&lt;B"));
    }

    #[test]
    fn panel_toggles_between_display_values() {
        let panel = PanelVisibility::default();
        assert_eq!(panel.css_display(), "none");
        assert_eq!(panel.toggled().css_display(), "block");
        assert_eq!(panel.toggled().toggled(), PanelVisibility::Hidden);
        assert_eq!(PanelVisibility::from_css_display("block"), PanelVisibility::Visible);
        assert_eq!(PanelVisibility::from_css_display(""), PanelVisibility::Hidden);
    }
}
