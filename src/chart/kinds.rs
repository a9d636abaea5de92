//! The charts the dashboard knows how to draw
//!
//! A [`ChartKind`] is the recipe for one visualization: where its data lives,
//! how series are pulled out of the response, and which settings it layers on
//! top of the shared base options.

use crate::chart::data::{Series, SeriesSet};
use crate::chart::error::FetchError;
use crate::chart::format::ValueFormatter;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ChartName {
    ProfitEvolution,
    RoiBySport,
    MonthlySummary,
}

impl ChartName {
    pub fn container_id(&self) -> &'static str {
        match self {
            ChartName::ProfitEvolution => "profit-evolution-chart",
            ChartName::RoiBySport => "roi-by-sport-chart",
            ChartName::MonthlySummary => "monthly-summary-chart",
        }
    }

    pub fn endpoint(&self) -> &'static str {
        match self {
            ChartName::ProfitEvolution => "/bets/chart-data/profit-evolution/",
            ChartName::RoiBySport => "/bets/chart-data/roi-by-sport/",
            ChartName::MonthlySummary => "/bets/chart-data/monthly-summary/",
        }
    }

    pub fn kind(&self) -> Box<dyn ChartKind> {
        match self {
            ChartName::ProfitEvolution => Box::new(ProfitEvolution),
            ChartName::RoiBySport => Box::new(RoiBySport),
            ChartName::MonthlySummary => Box::new(MonthlySummary),
        }
    }
}

pub trait ChartKind: Send + Sync {
    /// Shown in the container when the chart cannot be loaded.
    fn error_message(&self) -> &'static str;

    /// Pull the series out of an endpoint response. Absent fields are empty.
    fn extract(&self, data: &Value) -> Result<SeriesSet, FetchError>;

    /// Settings layered over the base options for this chart.
    fn specific_options(&self, data: &SeriesSet) -> Value;
}

fn decode<'a, T: Deserialize<'a>>(data: &'a Value) -> Result<T, FetchError> {
    if !data.is_object() {
        return Err(FetchError::Decode(serde::de::Error::custom(format!(
            "expected a JSON object, got {}",
            data
        ))));
    }
    Ok(T::deserialize(data)?)
}

pub struct ProfitEvolution;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProfitEvolutionData {
    cumulative_profit: Option<Vec<f64>>,
    #[serde(alias = "daily_profit")]
    monthly_profit: Option<Vec<f64>>,
    labels: Option<Vec<Value>>,
}

impl ChartKind for ProfitEvolution {
    fn error_message(&self) -> &'static str {
        "Erro ao carregar evolução dos lucros"
    }

    fn extract(&self, data: &Value) -> Result<SeriesSet, FetchError> {
        let data: ProfitEvolutionData = decode(data)?;
        Ok(SeriesSet {
            series: vec![
                Series::new("Lucro Acumulado", data.cumulative_profit.unwrap_or_default()),
                Series::new("Lucro Mensal", data.monthly_profit.unwrap_or_default()),
            ],
            categories: data.labels.unwrap_or_default(),
        })
    }

    fn specific_options(&self, data: &SeriesSet) -> Value {
        let currency = ValueFormatter::Currency.to_string();
        json!({
            "chart": {
                "type": "area",
                "height": 300,
                "zoom": { "enabled": false }
            },
            "series": data.series_json(),
            "xaxis": {
                "categories": data.categories_json(),
                "title": { "text": "Período" },
                "labels": { "style": { "fontSize": "12px" } }
            },
            "yaxis": {
                "title": { "text": "Lucro (€)" },
                "labels": { "formatter": currency }
            },
            "tooltip": {
                "y": { "formatter": currency }
            },
            "fill": {
                "type": "gradient",
                "gradient": {
                    "shadeIntensity": 1,
                    "inverseColors": false,
                    "opacityFrom": 0.5,
                    "opacityTo": 0,
                    "stops": [0, 90, 100]
                }
            },
            "stroke": {
                "curve": "smooth",
                "width": 2
            },
            "markers": {
                "size": 4,
                "colors": ["#fff"],
                "strokeColors": ["#3B82F6", "#10B981"],
                "strokeWidth": 2,
                "hover": { "size": 6 }
            },
            "legend": {
                "position": "top",
                "horizontalAlign": "right"
            }
        })
    }
}

pub struct RoiBySport;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RoiBySportData {
    roi_values: Option<Vec<f64>>,
    labels: Option<Vec<Value>>,
}

impl ChartKind for RoiBySport {
    fn error_message(&self) -> &'static str {
        "Erro ao carregar ROI por desporto"
    }

    fn extract(&self, data: &Value) -> Result<SeriesSet, FetchError> {
        let data: RoiBySportData = decode(data)?;
        Ok(SeriesSet {
            series: vec![Series::new("ROI (%)", data.roi_values.unwrap_or_default())],
            categories: data.labels.unwrap_or_default(),
        })
    }

    fn specific_options(&self, data: &SeriesSet) -> Value {
        let percentage = ValueFormatter::Percentage.to_string();
        json!({
            "chart": { "type": "bar", "height": 300 },
            "plotOptions": {
                "bar": { "borderRadius": 4, "columnWidth": "55%" }
            },
            "dataLabels": { "enabled": false },
            "series": data.series_json(),
            "xaxis": {
                "categories": data.categories_json(),
                "title": { "text": "Desporto" }
            },
            "yaxis": {
                "title": { "text": "ROI (%)" },
                "labels": { "formatter": percentage }
            },
            "tooltip": {
                "y": { "formatter": percentage }
            }
        })
    }
}

pub struct MonthlySummary;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct MonthlySummaryData {
    profits: Option<Vec<f64>>,
    staked: Option<Vec<f64>>,
    labels: Option<Vec<Value>>,
}

impl ChartKind for MonthlySummary {
    fn error_message(&self) -> &'static str {
        "Erro ao carregar resumo mensal"
    }

    fn extract(&self, data: &Value) -> Result<SeriesSet, FetchError> {
        let data: MonthlySummaryData = decode(data)?;
        Ok(SeriesSet {
            series: vec![
                Series::new("Lucro", data.profits.unwrap_or_default()),
                Series::new("Valor Apostado", data.staked.unwrap_or_default()),
            ],
            categories: data.labels.unwrap_or_default(),
        })
    }

    fn specific_options(&self, data: &SeriesSet) -> Value {
        let currency = ValueFormatter::Currency.to_string();
        json!({
            "chart": { "type": "bar", "height": 300, "stacked": false },
            "dataLabels": { "enabled": false },
            "series": data.series_json(),
            "xaxis": {
                "categories": data.categories_json(),
                "title": { "text": "Mês" }
            },
            "yaxis": {
                "title": { "text": "Valor (€)" },
                "labels": { "formatter": currency }
            },
            "tooltip": {
                "y": { "formatter": currency }
            },
            "legend": {
                "position": "top",
                "horizontalAlign": "right"
            }
        })
    }
}
